use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const THROWABLE: &str = "java.lang.Throwable";
pub const RUNTIME_EXCEPTION: &str = "java.lang.RuntimeException";
pub const ERROR: &str = "java.lang.Error";
pub const CLONEABLE: &str = "java.lang.Cloneable";
pub const SERIALIZABLE: &str = "java.io.Serializable";
pub const REPEATABLE: &str = "java.lang.annotation.Repeatable";
pub const TARGET: &str = "java.lang.annotation.Target";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Char,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
        PrimitiveType::Void,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structure of a type reference.
///
/// `Class` covers both plain nominal references (`type_args` empty) and parameterized ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRefKind {
    Primitive {
        name: PrimitiveType,
    },
    Array {
        component: TypeRef,
        dimension: u32,
    },
    TypeParameter {
        name: String,
    },
    Wildcard {
        bounds: Vec<TypeRef>,
        upper: bool,
    },
    Class {
        qualified_name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        type_args: Vec<TypeRef>,
    },
}

/// A shared, immutable type reference.
///
/// Equality and hashing are structural. References interned by the same [`RefInterner`] also
/// share their allocation, so [`TypeRef::ptr_eq`] is a cheap identity check inside one snapshot.
#[derive(Clone)]
pub struct TypeRef(Arc<TypeRefKind>);

impl TypeRef {
    pub fn new(kind: TypeRefKind) -> Self {
        Self(Arc::new(kind))
    }

    pub fn kind(&self) -> &TypeRefKind {
        &self.0
    }

    pub fn ptr_eq(&self, other: &TypeRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self::new(TypeRefKind::Primitive { name: primitive })
    }

    pub fn void() -> Self {
        Self::primitive(PrimitiveType::Void)
    }

    pub fn class(qualified_name: impl Into<String>, type_args: Vec<TypeRef>) -> Self {
        Self::new(TypeRefKind::Class {
            qualified_name: qualified_name.into(),
            type_args,
        })
    }

    pub fn named(qualified_name: impl Into<String>) -> Self {
        Self::class(qualified_name, Vec::new())
    }

    pub fn object() -> Self {
        Self::named(OBJECT)
    }

    pub fn type_param(name: impl Into<String>) -> Self {
        Self::new(TypeRefKind::TypeParameter { name: name.into() })
    }

    /// Builds an array reference, folding nested arrays into a single dimension count.
    pub fn array(component: TypeRef, dimension: u32) -> Self {
        if dimension == 0 {
            return component;
        }
        match component.kind() {
            TypeRefKind::Array {
                component: inner,
                dimension: inner_dim,
            } => Self::new(TypeRefKind::Array {
                component: inner.clone(),
                dimension: inner_dim + dimension,
            }),
            _ => Self::new(TypeRefKind::Array {
                component,
                dimension,
            }),
        }
    }

    pub fn unbounded_wildcard() -> Self {
        Self::new(TypeRefKind::Wildcard {
            bounds: vec![Self::object()],
            upper: true,
        })
    }

    pub fn wildcard_extends(bound: TypeRef) -> Self {
        Self::new(TypeRefKind::Wildcard {
            bounds: vec![bound],
            upper: true,
        })
    }

    pub fn wildcard_super(bound: TypeRef) -> Self {
        Self::new(TypeRefKind::Wildcard {
            bounds: vec![bound],
            upper: false,
        })
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.kind(), TypeRefKind::Primitive { .. })
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self.kind() {
            TypeRefKind::Primitive { name } => Some(*name),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        self.as_primitive() == Some(PrimitiveType::Void)
    }

    /// Qualified name and type arguments of a class reference.
    pub fn as_class(&self) -> Option<(&str, &[TypeRef])> {
        match self.kind() {
            TypeRefKind::Class {
                qualified_name,
                type_args,
            } => Some((qualified_name.as_str(), type_args.as_slice())),
            _ => None,
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        self.as_class().map(|(name, _)| name)
    }

    pub fn as_type_param(&self) -> Option<&str> {
        match self.kind() {
            TypeRefKind::TypeParameter { name } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_class_named(&self, qualified_name: &str) -> bool {
        self.class_name() == Some(qualified_name)
    }

    pub fn is_object(&self) -> bool {
        matches!(self.as_class(), Some((OBJECT, [])))
    }

    pub fn is_unbounded_wildcard(&self) -> bool {
        match self.kind() {
            TypeRefKind::Wildcard { bounds, upper } => {
                *upper && bounds.iter().all(TypeRef::is_object)
            }
            _ => false,
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({self})")
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            TypeRefKind::Primitive { name } => f.write_str(name.name()),
            TypeRefKind::Array {
                component,
                dimension,
            } => {
                write!(f, "{component}")?;
                for _ in 0..*dimension {
                    f.write_str("[]")?;
                }
                Ok(())
            }
            TypeRefKind::TypeParameter { name } => f.write_str(name),
            TypeRefKind::Wildcard { bounds, upper } => {
                if self.is_unbounded_wildcard() {
                    return f.write_str("?");
                }
                f.write_str(if *upper { "? extends " } else { "? super " })?;
                write_joined(f, bounds, " & ")
            }
            TypeRefKind::Class {
                qualified_name,
                type_args,
            } => {
                f.write_str(qualified_name)?;
                if !type_args.is_empty() {
                    f.write_str("<")?;
                    write_joined(f, type_args, ", ")?;
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, refs: &[TypeRef], sep: &str) -> fmt::Result {
    for (idx, r) in refs.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{r}")?;
    }
    Ok(())
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.kind().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TypeRefKind::deserialize(deserializer).map(TypeRef::new)
    }
}

/// Hash-consing table for [`TypeRef`]s.
///
/// Every snapshot owns one. Interning always returns an allocation owned by this table, so two
/// snapshots never end up sharing a reference even when both were built from the same input.
#[derive(Debug, Default)]
pub struct RefInterner {
    table: HashSet<TypeRef>,
}

impl RefInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, r: &TypeRef) -> TypeRef {
        if let Some(existing) = self.table.get(r) {
            return existing.clone();
        }

        let kind = match r.kind() {
            TypeRefKind::Primitive { name } => TypeRefKind::Primitive { name: *name },
            TypeRefKind::Array {
                component,
                dimension,
            } => TypeRefKind::Array {
                component: self.intern(component),
                dimension: *dimension,
            },
            TypeRefKind::TypeParameter { name } => TypeRefKind::TypeParameter { name: name.clone() },
            TypeRefKind::Wildcard { bounds, upper } => TypeRefKind::Wildcard {
                bounds: bounds.iter().map(|b| self.intern(b)).collect(),
                upper: *upper,
            },
            TypeRefKind::Class {
                qualified_name,
                type_args,
            } => TypeRefKind::Class {
                qualified_name: qualified_name.clone(),
                type_args: type_args.iter().map(|a| self.intern(a)).collect(),
            },
        };

        let fresh = TypeRef::new(kind);
        self.table.insert(fresh.clone());
        fresh
    }

    /// Returns the interned instance structurally equal to `r`, if any.
    pub fn lookup(&self, r: &TypeRef) -> Option<&TypeRef> {
        self.table.get(r)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
