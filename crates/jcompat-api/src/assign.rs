use jcompat_model::{PrimitiveType, TypeRef};

use crate::api::{Api, Scope};

impl Api {
    /// Whether a value of type `source` can be assigned to a variable of type `target`: identity,
    /// primitive widening, boxing and unboxing, unchecked conversion of raw types, or
    /// subtyping.
    pub fn is_assignable(&self, scope: Scope<'_>, source: &TypeRef, target: &TypeRef) -> bool {
        let mut source = source.clone();
        let mut seen: Vec<String> = Vec::new();
        while let Some(name) = source.as_type_param() {
            if source == *target {
                return true;
            }
            if seen.iter().any(|s| s == name) {
                return false;
            }
            seen.push(name.to_string());
            source = self.direct_type_parameter_bound(scope, name);
        }

        if source == *target {
            return true;
        }
        if target.as_type_param().is_some() {
            return false;
        }

        match (source.as_primitive(), target.as_primitive()) {
            (Some(from), Some(to)) => widens(from, to),
            (Some(from), None) => match boxed(from) {
                Some(boxed) => {
                    let boxed = TypeRef::named(boxed);
                    boxed == *target || self.is_reference_assignable(scope, &boxed, target)
                }
                None => false,
            },
            (None, Some(to)) => source
                .class_name()
                .and_then(unboxed)
                .is_some_and(|from| from == to || widens(from, to)),
            (None, None) => self.is_reference_assignable(scope, &source, target),
        }
    }

    fn is_reference_assignable(&self, scope: Scope<'_>, source: &TypeRef, target: &TypeRef) -> bool {
        if let (Some((from, from_args)), Some((to, to_args))) = (source.as_class(), target.as_class())
        {
            if from_args.is_empty() || to_args.is_empty() {
                return from == to || self.is_nominal_subtype(from, to);
            }
        }
        self.is_subtype(scope, source, target)
    }
}

/// Widening primitive conversion (JLS 5.1.2).
pub fn widens(from: PrimitiveType, to: PrimitiveType) -> bool {
    use PrimitiveType::*;
    match from {
        Byte => matches!(to, Short | Int | Long | Float | Double),
        Short | Char => matches!(to, Int | Long | Float | Double),
        Int => matches!(to, Long | Float | Double),
        Long => matches!(to, Float | Double),
        Float => to == Double,
        Double | Boolean | Void => false,
    }
}

const BOXES: [(PrimitiveType, &str); 8] = [
    (PrimitiveType::Boolean, "java.lang.Boolean"),
    (PrimitiveType::Byte, "java.lang.Byte"),
    (PrimitiveType::Char, "java.lang.Character"),
    (PrimitiveType::Short, "java.lang.Short"),
    (PrimitiveType::Int, "java.lang.Integer"),
    (PrimitiveType::Long, "java.lang.Long"),
    (PrimitiveType::Float, "java.lang.Float"),
    (PrimitiveType::Double, "java.lang.Double"),
];

/// Boxing conversion (JLS 5.1.7).
pub fn boxed(primitive: PrimitiveType) -> Option<&'static str> {
    BOXES
        .iter()
        .find(|(p, _)| *p == primitive)
        .map(|(_, name)| *name)
}

/// Unboxing conversion (JLS 5.1.8).
pub fn unboxed(qualified_name: &str) -> Option<PrimitiveType> {
    BOXES
        .iter()
        .find(|(_, name)| *name == qualified_name)
        .map(|(p, _)| *p)
}
