//! Declaration and type-reference model of a Java library API.
//!
//! An [`ApiSnapshot`] is built once per library version through an [`ApiBuilder`] and is
//! immutable afterwards. Every snapshot owns the interning table for its [`TypeRef`]s.

#![forbid(unsafe_code)]

mod decl;
mod modifiers;
mod reference;
mod snapshot;

pub use decl::{
    package_name, simple_name, Annotation, AnnotationElementDecl, ExecutableDecl, ExecutableKind,
    FieldDecl, FormalTypeParameter, ModuleDecl, ParameterDecl, SourceLocation, TypeDecl, TypeKind,
    TypeNature,
};
pub use modifiers::{ElementType, Modifiers, Visibility};
pub use reference::{
    PrimitiveType, RefInterner, TypeRef, TypeRefKind, CLONEABLE, ERROR, OBJECT, REPEATABLE,
    RUNTIME_EXCEPTION, SERIALIZABLE, STRING, TARGET, THROWABLE,
};
pub use snapshot::{ApiBuilder, ApiSnapshot, ModelError, TypeId};
