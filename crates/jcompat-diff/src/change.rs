use std::fmt;

use jcompat_model::{
    AnnotationElementDecl, ElementType, ExecutableDecl, FieldDecl, FormalTypeParameter,
    SourceLocation, TypeDecl, TypeNature, TypeRef,
};
use serde::{Deserialize, Serialize};

use crate::kind::BreakingChangeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Type,
    Field,
    Method,
    Constructor,
    AnnotationElement,
}

/// A reference to one API symbol: a type or one of its members.
///
/// `qualified_name` is the type name for types, `Owner.field` for fields, and
/// `Owner.name(erasures)` for executables and annotation elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub qualified_name: String,
    /// Declaring type of a member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Field name or erased signature of a member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    #[serde(default)]
    pub location: SourceLocation,
}

impl Symbol {
    pub fn of_type(decl: &TypeDecl) -> Self {
        Self {
            kind: SymbolKind::Type,
            qualified_name: decl.qualified_name.clone(),
            owner: None,
            member: None,
            location: decl.location.clone(),
        }
    }

    pub fn of_field(field: &FieldDecl) -> Self {
        Self::member(
            SymbolKind::Field,
            &field.owner,
            field.name.clone(),
            &field.location,
        )
    }

    /// `signature` is the erased signature computed against the snapshot `executable` lives in.
    pub fn of_executable(executable: &ExecutableDecl, signature: String) -> Self {
        let kind = if executable.is_constructor() {
            SymbolKind::Constructor
        } else {
            SymbolKind::Method
        };
        Self::member(kind, &executable.owner, signature, &executable.location)
    }

    pub fn of_element(element: &AnnotationElementDecl) -> Self {
        Self::member(
            SymbolKind::AnnotationElement,
            &element.owner,
            format!("{}()", element.name),
            &element.location,
        )
    }

    fn member(kind: SymbolKind, owner: &str, member: String, location: &SourceLocation) -> Self {
        Self {
            kind,
            qualified_name: format!("{owner}.{member}"),
            owner: Some(owner.to_string()),
            member: Some(member),
            location: location.clone(),
        }
    }

    pub fn is_type(&self) -> bool {
        self.kind == SymbolKind::Type
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

/// Structured payload attached to a breaking change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BreakingChangeDetails {
    #[default]
    None,
    FieldTypeChanged {
        previous: TypeRef,
        new: TypeRef,
    },
    MethodReturnTypeChanged {
        previous: TypeRef,
        new: TypeRef,
    },
    MethodAddedToInterface {
        method: String,
    },
    MethodAbstractAddedToClass {
        method: String,
    },
    TypeNewAbstractMethod {
        method: String,
        declared_in: String,
    },
    ClassTypeChanged {
        previous: TypeNature,
        new: TypeNature,
    },
    SuperTypeRemoved {
        super_type: TypeRef,
    },
    AnnotationTargetRemoved {
        target: ElementType,
    },
    MethodNoLongerThrowsCheckedException {
        exception: TypeRef,
    },
    MethodNowThrowsCheckedException {
        exception: TypeRef,
    },
    MethodParameterGenericsChanged {
        previous: TypeRef,
        new: TypeRef,
    },
    FormalTypeParameterRemoved {
        parameter: FormalTypeParameter,
    },
    FormalTypeParameterAdded {
        parameter: FormalTypeParameter,
    },
    FormalTypeParameterChanged {
        previous: FormalTypeParameter,
        new: FormalTypeParameter,
    },
    AnnotationMethodAddedWithoutDefault {
        element: String,
    },
}

impl BreakingChangeDetails {
    pub fn is_none(&self) -> bool {
        matches!(self, BreakingChangeDetails::None)
    }
}

/// Short human-readable form, e.g. `int -> long`. Empty for [`BreakingChangeDetails::None`].
impl fmt::Display for BreakingChangeDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakingChangeDetails::None => Ok(()),
            BreakingChangeDetails::FieldTypeChanged { previous, new }
            | BreakingChangeDetails::MethodReturnTypeChanged { previous, new }
            | BreakingChangeDetails::MethodParameterGenericsChanged { previous, new } => {
                write!(f, "{previous} -> {new}")
            }
            BreakingChangeDetails::MethodAddedToInterface { method }
            | BreakingChangeDetails::MethodAbstractAddedToClass { method } => f.write_str(method),
            BreakingChangeDetails::TypeNewAbstractMethod {
                method,
                declared_in,
            } => write!(f, "{method} from {declared_in}"),
            BreakingChangeDetails::ClassTypeChanged { previous, new } => {
                write!(f, "{previous} -> {new}")
            }
            BreakingChangeDetails::SuperTypeRemoved { super_type } => write!(f, "{super_type}"),
            BreakingChangeDetails::AnnotationTargetRemoved { target } => write!(f, "{target}"),
            BreakingChangeDetails::MethodNoLongerThrowsCheckedException { exception }
            | BreakingChangeDetails::MethodNowThrowsCheckedException { exception } => {
                write!(f, "throws {exception}")
            }
            BreakingChangeDetails::FormalTypeParameterRemoved { parameter }
            | BreakingChangeDetails::FormalTypeParameterAdded { parameter } => {
                write!(f, "<{parameter}>")
            }
            BreakingChangeDetails::FormalTypeParameterChanged { previous, new } => {
                write!(f, "<{previous}> -> <{new}>")
            }
            BreakingChangeDetails::AnnotationMethodAddedWithoutDefault { element } => {
                f.write_str(element)
            }
        }
    }
}

/// One detected incompatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingChange {
    pub kind: BreakingChangeKind,
    /// Qualified name of the type clients observe the change through.
    pub impacted_type: String,
    pub impacted_symbol: Symbol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_symbol: Option<Symbol>,
    /// Location of the impacted symbol in the old version.
    pub location: SourceLocation,
    /// Parameter index for parameter-level changes, `-1` otherwise.
    pub position: i32,
    #[serde(default)]
    pub details: BreakingChangeDetails,
}

impl BreakingChange {
    pub fn new(kind: BreakingChangeKind, impacted_type: &TypeDecl, impacted_symbol: Symbol) -> Self {
        Self {
            kind,
            impacted_type: impacted_type.qualified_name.clone(),
            location: impacted_symbol.location.clone(),
            impacted_symbol,
            new_symbol: None,
            position: -1,
            details: BreakingChangeDetails::None,
        }
    }

    pub fn with_new_symbol(mut self, symbol: Symbol) -> Self {
        self.new_symbol = Some(symbol);
        self
    }

    pub fn with_details(mut self, details: BreakingChangeDetails) -> Self {
        self.details = details;
        self
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = i32::try_from(position).unwrap_or(i32::MAX);
        self
    }

    pub fn is_binary_breaking(&self) -> bool {
        self.kind.is_binary_breaking()
    }

    pub fn is_source_breaking(&self) -> bool {
        self.kind.is_source_breaking()
    }
}

impl fmt::Display for BreakingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.impacted_symbol)?;
        if self.position >= 0 {
            write!(f, " #{}", self.position)?;
        }
        let local = match &self.impacted_symbol.owner {
            Some(owner) => *owner == self.impacted_type,
            None => self.impacted_symbol.qualified_name == self.impacted_type,
        };
        if !local {
            write!(f, " in {}", self.impacted_type)?;
        }
        if !self.details.is_none() {
            write!(f, " [{}]", self.details)?;
        }
        if self.location.is_unknown() {
            f.write_str(" (no source location)")
        } else {
            write!(f, " at {}", self.location)
        }
    }
}
