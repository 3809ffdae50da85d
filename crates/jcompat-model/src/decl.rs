use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::modifiers::{ElementType, Modifiers, Visibility};
use crate::reference::{PrimitiveType, TypeRef, REPEATABLE, STRING, TARGET};

/// Where a declaration comes from. `line` is `-1` when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "SourceLocation::unknown_line")]
    pub line: i32,
}

impl SourceLocation {
    pub const UNKNOWN: SourceLocation = SourceLocation {
        file: None,
        line: -1,
    };

    pub fn new(file: impl Into<PathBuf>, line: i32) -> Self {
        Self {
            file: Some(file.into()),
            line,
        }
    }

    fn unknown_line() -> i32 {
        -1
    }

    pub fn is_unknown(&self) -> bool {
        self.file.is_none() && self.line < 0
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}", file.display(), self.line),
            None => write!(f, "<unknown>:{}", self.line),
        }
    }
}

/// An annotation instance, with element values rendered as source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub qualified_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, String>,
}

impl Annotation {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, element: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(element.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormalTypeParameter {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

impl FormalTypeParameter {
    /// An empty bound list is replaced by `java.lang.Object`.
    pub fn new(name: impl Into<String>, bounds: Vec<TypeRef>) -> Self {
        let bounds = if bounds.is_empty() {
            vec![TypeRef::object()]
        } else {
            bounds
        };
        Self {
            name: name.into(),
            bounds,
        }
    }

    pub fn unbounded(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn first_bound(&self) -> TypeRef {
        self.bounds.first().cloned().unwrap_or_else(TypeRef::object)
    }
}

impl fmt::Display for FormalTypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.bounds.iter().all(TypeRef::is_object) {
            return Ok(());
        }
        f.write_str(" extends ")?;
        for (idx, bound) in self.bounds.iter().enumerate() {
            if idx > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{bound}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    /// Element type for a varargs parameter.
    pub ty: TypeRef,
    #[serde(default)]
    pub varargs: bool,
}

impl ParameterDecl {
    /// The type seen by callers: `ty[]` for varargs.
    pub fn effective_type(&self) -> TypeRef {
        if self.varargs {
            TypeRef::array(self.ty.clone(), 1)
        } else {
            self.ty.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutableKind {
    Method,
    Constructor,
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutableDecl {
    pub kind: ExecutableKind,
    pub name: String,
    /// Qualified name of the declaring type. Filled in by the snapshot builder.
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<FormalTypeParameter>,
    #[serde(default)]
    pub params: Vec<ParameterDecl>,
    pub return_type: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thrown: Vec<TypeRef>,
    #[serde(default)]
    pub location: SourceLocation,
}

impl ExecutableDecl {
    pub fn method(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            kind: ExecutableKind::Method,
            name: name.into(),
            owner: String::new(),
            visibility: Visibility::Public,
            modifiers: Modifiers::NONE,
            annotations: Vec::new(),
            type_params: Vec::new(),
            params: Vec::new(),
            return_type,
            thrown: Vec::new(),
            location: SourceLocation::UNKNOWN,
        }
    }

    /// The name is replaced by the owner's simple name when the constructor is added to a type.
    pub fn constructor() -> Self {
        Self {
            kind: ExecutableKind::Constructor,
            ..Self::method(String::new(), TypeRef::void())
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(ParameterDecl {
            name: name.into(),
            ty,
            varargs: false,
        });
        self
    }

    pub fn with_varargs(mut self, name: impl Into<String>, element: TypeRef) -> Self {
        self.params.push(ParameterDecl {
            name: name.into(),
            ty: element,
            varargs: true,
        });
        self
    }

    pub fn with_type_param(mut self, param: FormalTypeParameter) -> Self {
        self.type_params.push(param);
        self
    }

    pub fn throws(mut self, exception: TypeRef) -> Self {
        self.thrown.push(exception);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == ExecutableKind::Constructor
    }

    pub fn is_varargs(&self) -> bool {
        self.params.last().is_some_and(|p| p.varargs)
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    pub fn is_default(&self) -> bool {
        self.modifiers.is_default()
    }

    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.qualified_name == qualified_name)
    }

    fn refs_mut(&mut self, f: &mut impl FnMut(&mut TypeRef)) {
        for tp in &mut self.type_params {
            tp.bounds.iter_mut().for_each(&mut *f);
        }
        for param in &mut self.params {
            f(&mut param.ty);
        }
        f(&mut self.return_type);
        self.thrown.iter_mut().for_each(&mut *f);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    /// Constant initializer, for fields initialized with a constant expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_value: Option<String>,
    #[serde(default)]
    pub location: SourceLocation,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            owner: String::new(),
            visibility: Visibility::Public,
            modifiers: Modifiers::NONE,
            annotations: Vec::new(),
            ty,
            constant_value: None,
            location: SourceLocation::UNKNOWN,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_constant(mut self, value: impl Into<String>) -> Self {
        self.constant_value = Some(value.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    /// A `final` primitive or `String` field initialized with a constant expression. Clients
    /// inline its value at compile time.
    pub fn is_compile_time_constant(&self) -> bool {
        self.is_final()
            && self.constant_value.is_some()
            && (matches!(self.ty.as_primitive(), Some(p) if p != PrimitiveType::Void)
                || self.ty.is_class_named(STRING))
    }

    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.qualified_name == qualified_name)
    }
}

/// An element of an annotation type, e.g. `String value() default "";`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationElementDecl {
    pub name: String,
    #[serde(default)]
    pub owner: String,
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub location: SourceLocation,
}

impl AnnotationElementDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            owner: String::new(),
            ty,
            default_value: None,
            annotations: Vec::new(),
            location: SourceLocation::UNKNOWN,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeNature {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl fmt::Display for TypeNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeNature::Class => "class",
            TypeNature::Interface => "interface",
            TypeNature::Enum => "enum",
            TypeNature::Record => "record",
            TypeNature::Annotation => "annotation",
        })
    }
}

/// The variant-specific part of a [`TypeDecl`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "nature", rename_all = "snake_case")]
pub enum TypeKind {
    Class {
        #[serde(default)]
        constructors: Vec<ExecutableDecl>,
    },
    Interface,
    Enum {
        #[serde(default)]
        constructors: Vec<ExecutableDecl>,
    },
    Record {
        #[serde(default)]
        constructors: Vec<ExecutableDecl>,
    },
    Annotation {
        #[serde(default)]
        elements: Vec<AnnotationElementDecl>,
        /// `None` when the type carries no `@Target`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        targets: Option<BTreeSet<ElementType>>,
    },
}

impl TypeKind {
    pub fn nature(&self) -> TypeNature {
        match self {
            TypeKind::Class { .. } => TypeNature::Class,
            TypeKind::Interface => TypeNature::Interface,
            TypeKind::Enum { .. } => TypeNature::Enum,
            TypeKind::Record { .. } => TypeNature::Record,
            TypeKind::Annotation { .. } => TypeNature::Annotation,
        }
    }
}

/// A class, interface, enum, record or annotation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub qualified_name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<FormalTypeParameter>,
    /// `None` stands for `java.lang.Object`. Always `None` for interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_class: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permitted: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<ExecutableDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<TypeRef>,
    #[serde(default)]
    pub location: SourceLocation,
}

impl TypeDecl {
    pub fn new(qualified_name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            visibility: Visibility::Public,
            modifiers: Modifiers::NONE,
            annotations: Vec::new(),
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
            permitted: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            enclosing: None,
            location: SourceLocation::UNKNOWN,
        }
    }

    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self::new(
            qualified_name,
            TypeKind::Class {
                constructors: Vec::new(),
            },
        )
    }

    pub fn interface(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, TypeKind::Interface)
    }

    pub fn enumeration(qualified_name: impl Into<String>) -> Self {
        Self::new(
            qualified_name,
            TypeKind::Enum {
                constructors: Vec::new(),
            },
        )
    }

    pub fn record(qualified_name: impl Into<String>) -> Self {
        Self::new(
            qualified_name,
            TypeKind::Record {
                constructors: Vec::new(),
            },
        )
    }

    pub fn annotation(qualified_name: impl Into<String>) -> Self {
        Self::new(
            qualified_name,
            TypeKind::Annotation {
                elements: Vec::new(),
                targets: None,
            },
        )
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn extends(mut self, super_class: TypeRef) -> Self {
        self.super_class = Some(super_class);
        self
    }

    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn permits(mut self, subtype: TypeRef) -> Self {
        self.permitted.push(subtype);
        self
    }

    pub fn with_type_param(mut self, param: FormalTypeParameter) -> Self {
        self.type_params.push(param);
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: ExecutableDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Ignored for interfaces and annotation types, which have no constructors.
    pub fn with_constructor(mut self, constructor: ExecutableDecl) -> Self {
        if let Some(constructors) = self.constructors_mut() {
            constructors.push(constructor);
        }
        self
    }

    /// Adds a public no-arg constructor, the one `javac` generates for a class without any.
    pub fn with_default_constructor(self) -> Self {
        self.with_constructor(ExecutableDecl::constructor())
    }

    /// Ignored unless this is an annotation type.
    pub fn with_element(mut self, element: AnnotationElementDecl) -> Self {
        if let TypeKind::Annotation { elements, .. } = &mut self.kind {
            elements.push(element);
        }
        self
    }

    /// Ignored unless this is an annotation type.
    pub fn with_targets(mut self, new_targets: impl IntoIterator<Item = ElementType>) -> Self {
        if let TypeKind::Annotation { targets, .. } = &mut self.kind {
            *targets = Some(new_targets.into_iter().collect());
        }
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn nested_in(mut self, enclosing: TypeRef) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn nature(&self) -> TypeNature {
        self.kind.nature()
    }

    /// Class, enum or record.
    pub fn is_class(&self) -> bool {
        matches!(
            self.nature(),
            TypeNature::Class | TypeNature::Enum | TypeNature::Record
        )
    }

    /// Interface or annotation type.
    pub fn is_interface(&self) -> bool {
        matches!(
            self.nature(),
            TypeNature::Interface | TypeNature::Annotation
        )
    }

    pub fn is_annotation(&self) -> bool {
        self.nature() == TypeNature::Annotation
    }

    pub fn is_nested(&self) -> bool {
        self.enclosing.is_some()
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract()
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn constructors(&self) -> &[ExecutableDecl] {
        match &self.kind {
            TypeKind::Class { constructors }
            | TypeKind::Enum { constructors }
            | TypeKind::Record { constructors } => constructors,
            TypeKind::Interface | TypeKind::Annotation { .. } => &[],
        }
    }

    fn constructors_mut(&mut self) -> Option<&mut Vec<ExecutableDecl>> {
        match &mut self.kind {
            TypeKind::Class { constructors }
            | TypeKind::Enum { constructors }
            | TypeKind::Record { constructors } => Some(constructors),
            TypeKind::Interface | TypeKind::Annotation { .. } => None,
        }
    }

    pub fn annotation_elements(&self) -> &[AnnotationElementDecl] {
        match &self.kind {
            TypeKind::Annotation { elements, .. } => elements,
            _ => &[],
        }
    }

    /// Element types this annotation type may be applied to. Without an explicit `@Target`,
    /// that is every element type except `TYPE_USE`.
    pub fn effective_targets(&self) -> BTreeSet<ElementType> {
        match &self.kind {
            TypeKind::Annotation {
                targets: Some(targets),
                ..
            } => targets.clone(),
            TypeKind::Annotation { targets: None, .. } if self.has_annotation(TARGET) => {
                BTreeSet::new()
            }
            TypeKind::Annotation { targets: None, .. } => ElementType::ALL
                .into_iter()
                .filter(|t| *t != ElementType::TypeUse)
                .collect(),
            _ => BTreeSet::new(),
        }
    }

    pub fn is_repeatable(&self) -> bool {
        self.has_annotation(REPEATABLE)
    }

    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.qualified_name == qualified_name)
    }

    /// `Inner` for `pkg.Outer$Inner`, `Foo` for `pkg.Foo`.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }

    /// Package of the outermost enclosing type. Empty for the default package.
    pub fn package_name(&self) -> &str {
        package_name(&self.qualified_name)
    }

    /// A reference to this type parameterized by its own formal type parameters.
    pub fn self_reference(&self) -> TypeRef {
        TypeRef::class(
            self.qualified_name.clone(),
            self.type_params
                .iter()
                .map(|tp| TypeRef::type_param(tp.name.clone()))
                .collect(),
        )
    }

    /// Superclass and interfaces as declared, with the implicit `java.lang.Object` made
    /// explicit for classes.
    pub fn declared_super_types(&self) -> Vec<TypeRef> {
        let mut out = Vec::with_capacity(self.interfaces.len() + 1);
        if self.is_class() {
            out.push(self.super_class.clone().unwrap_or_else(TypeRef::object));
        }
        out.extend(self.interfaces.iter().cloned());
        out
    }

    /// Visits every type reference held by this declaration and its members.
    pub fn refs_mut(&mut self, f: &mut impl FnMut(&mut TypeRef)) {
        for tp in &mut self.type_params {
            tp.bounds.iter_mut().for_each(&mut *f);
        }
        if let Some(sc) = &mut self.super_class {
            f(sc);
        }
        self.interfaces.iter_mut().for_each(&mut *f);
        self.permitted.iter_mut().for_each(&mut *f);
        if let Some(enclosing) = &mut self.enclosing {
            f(enclosing);
        }
        for field in &mut self.fields {
            f(&mut field.ty);
        }
        for method in &mut self.methods {
            method.refs_mut(f);
        }
        if let Some(constructors) = self.constructors_mut() {
            for constructor in constructors {
                constructor.refs_mut(f);
            }
        }
        if let TypeKind::Annotation { elements, .. } = &mut self.kind {
            for element in elements {
                f(&mut element.ty);
            }
        }
    }

    /// Stamps the owner name on every member and names constructors after the type.
    pub(crate) fn link_members(&mut self) {
        let owner = self.qualified_name.clone();
        let simple = self.simple_name().to_string();
        for field in &mut self.fields {
            field.owner = owner.clone();
        }
        for method in &mut self.methods {
            method.owner = owner.clone();
        }
        if let Some(constructors) = self.constructors_mut() {
            for constructor in constructors {
                constructor.owner = owner.clone();
                constructor.name = simple.clone();
            }
        }
        if let TypeKind::Annotation { elements, .. } = &mut self.kind {
            for element in elements {
                element.owner = owner.clone();
            }
        }
    }

    pub(crate) fn executables(&self) -> impl Iterator<Item = &ExecutableDecl> {
        self.methods.iter().chain(self.constructors())
    }
}

pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once(['.', '$'])
        .map_or(qualified_name, |(_, simple)| simple)
}

pub fn package_name(qualified_name: &str) -> &str {
    let top_level = qualified_name
        .split_once('$')
        .map_or(qualified_name, |(outer, _)| outer);
    top_level.rsplit_once('.').map_or("", |(pkg, _)| pkg)
}

/// The module a snapshot belongs to. The unnamed module exports every package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exports: BTreeSet<String>,
}

impl ModuleDecl {
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>, exports: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: Some(name.into()),
            exports: exports.into_iter().collect(),
        }
    }

    pub fn is_unnamed(&self) -> bool {
        self.name.is_none()
    }

    pub fn exports_package(&self, package: &str) -> bool {
        self.is_unnamed() || self.exports.contains(package)
    }
}
