use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use jcompat_model::{
    TypeDecl, TypeRef, TypeRefKind, CLONEABLE, ERROR, OBJECT, RUNTIME_EXCEPTION, SERIALIZABLE,
    THROWABLE,
};

use crate::api::{Api, Scope};
use crate::erasure::mentions_type_parameter;

impl Api {
    /// Whether `reference` is a subtype of `other`, following Java's generic subtyping rules.
    ///
    /// Reflexive; primitives are only subtypes of themselves. Type parameters are expanded to
    /// their bounds within `scope`.
    pub fn is_subtype(&self, scope: Scope<'_>, reference: &TypeRef, other: &TypeRef) -> bool {
        let mut expanding = Vec::new();
        self.subtype(scope, reference, other, &mut expanding)
    }

    /// Subtyping on qualified names only, ignoring type arguments.
    pub fn is_nominal_subtype(&self, reference: &str, other: &str) -> bool {
        reference == other
            || self
                .all_super_types_of(reference)
                .iter()
                .any(|sup| sup.class_name() == Some(other))
    }

    /// Supertypes of `reference` with type arguments substituted along the way, so that
    /// `ArrayList<String>` yields `List<String>`, `Collection<String>`, and so on. Raw references
    /// produce raw supertypes.
    pub fn instantiated_super_types(&self, reference: &TypeRef) -> Arc<[TypeRef]> {
        if let Some(cached) = self.caches.instantiated.read().get(reference) {
            return cached.clone();
        }

        let mut out = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<TypeRef> = VecDeque::new();
        if let Some(name) = reference.class_name() {
            seen.insert(name.to_string());
        }
        queue.push_back(reference.clone());

        while let Some(current) = queue.pop_front() {
            let Some((_, args)) = current.as_class() else {
                continue;
            };
            let Some(decl) = self.resolve(&current) else {
                continue;
            };

            let raw = args.is_empty() && !decl.type_params.is_empty();
            let substitution: HashMap<&str, &TypeRef> = if args.len() == decl.type_params.len() {
                decl.type_params
                    .iter()
                    .map(|tp| tp.name.as_str())
                    .zip(args.iter())
                    .collect()
            } else {
                HashMap::new()
            };

            for sup in direct_super_types(decl) {
                let Some(name) = sup.class_name() else {
                    continue;
                };
                if !seen.insert(name.to_string()) {
                    continue;
                }
                let instantiated = if raw {
                    TypeRef::named(name)
                } else {
                    substitute(&sup, &substitution)
                };
                out.push(instantiated.clone());
                queue.push_back(instantiated);
            }
        }

        let out: Arc<[TypeRef]> = out.into();
        self.caches
            .instantiated
            .write()
            .insert(reference.clone(), out.clone());
        out
    }

    pub fn is_checked_exception(&self, decl: &TypeDecl) -> bool {
        decl.is_class()
            && self.is_nominal_subtype(&decl.qualified_name, THROWABLE)
            && !self.is_unchecked_exception(decl)
    }

    pub fn is_unchecked_exception(&self, decl: &TypeDecl) -> bool {
        decl.is_class()
            && (self.is_nominal_subtype(&decl.qualified_name, RUNTIME_EXCEPTION)
                || self.is_nominal_subtype(&decl.qualified_name, ERROR))
    }

    /// Unresolvable references are neither checked nor unchecked.
    pub fn is_checked_exception_ref(&self, reference: &TypeRef) -> bool {
        self.resolve(reference)
            .is_some_and(|decl| self.is_checked_exception(decl))
    }

    fn subtype(
        &self,
        scope: Scope<'_>,
        reference: &TypeRef,
        other: &TypeRef,
        expanding: &mut Vec<String>,
    ) -> bool {
        if reference == other {
            return true;
        }

        let cacheable = !mentions_type_parameter(reference) && !mentions_type_parameter(other);
        if cacheable {
            if let Some(hit) = self
                .caches
                .subtype
                .read()
                .get(&(reference.clone(), other.clone()))
            {
                return *hit;
            }
        }

        let result = self.subtype_uncached(scope, reference, other, expanding);

        if cacheable {
            self.caches
                .subtype
                .write()
                .insert((reference.clone(), other.clone()), result);
        }
        result
    }

    fn subtype_uncached(
        &self,
        scope: Scope<'_>,
        reference: &TypeRef,
        other: &TypeRef,
        expanding: &mut Vec<String>,
    ) -> bool {
        if let Some(name) = reference.as_type_param() {
            return self.with_expanded(scope, name, expanding, |api, bound, expanding| {
                api.subtype(scope, bound, other, expanding)
            });
        }

        if let Some(name) = other.as_type_param() {
            return self.with_expanded(scope, name, expanding, |api, bound, expanding| {
                api.subtype(scope, reference, bound, expanding)
            });
        }

        match reference.kind() {
            TypeRefKind::Primitive { .. } => false,
            TypeRefKind::Array { .. } => self.array_subtype(scope, reference, other, expanding),
            TypeRefKind::Class { .. } => self.class_subtype(scope, reference, other, expanding),
            TypeRefKind::Wildcard { .. } => match other.kind() {
                TypeRefKind::Wildcard { .. } => {
                    self.wildcard_contained(scope, reference, other, expanding)
                }
                _ => false,
            },
            TypeRefKind::TypeParameter { .. } => false,
        }
    }

    /// Runs `check` against each bound of type parameter `name`; the parameter is a subtype
    /// when any bound is (intersection semantics). A parameter bounded only by `Object`, or one
    /// already being expanded, does not expand.
    fn with_expanded(
        &self,
        scope: Scope<'_>,
        name: &str,
        expanding: &mut Vec<String>,
        mut check: impl FnMut(&Api, &TypeRef, &mut Vec<String>) -> bool,
    ) -> bool {
        if expanding.iter().any(|n| n == name) {
            return false;
        }
        let Some(tp) = self.find_type_parameter(scope, name) else {
            return false;
        };
        if tp.bounds.iter().all(TypeRef::is_object) {
            return false;
        }

        expanding.push(name.to_string());
        let result = tp
            .bounds
            .iter()
            .filter(|b| !b.is_object())
            .any(|bound| check(self, bound, expanding));
        expanding.pop();
        result
    }

    fn array_subtype(
        &self,
        scope: Scope<'_>,
        reference: &TypeRef,
        other: &TypeRef,
        expanding: &mut Vec<String>,
    ) -> bool {
        match other.kind() {
            TypeRefKind::Class { qualified_name, .. } => matches!(
                qualified_name.as_str(),
                OBJECT | CLONEABLE | SERIALIZABLE
            ),
            TypeRefKind::Array { .. } => {
                let (Some(from), Some(to)) = (element_type(reference), element_type(other)) else {
                    return false;
                };
                if from.is_primitive() || to.is_primitive() {
                    return from == to;
                }
                self.subtype(scope, &from, &to, expanding)
            }
            _ => false,
        }
    }

    fn class_subtype(
        &self,
        scope: Scope<'_>,
        reference: &TypeRef,
        other: &TypeRef,
        expanding: &mut Vec<String>,
    ) -> bool {
        let Some((name, args)) = reference.as_class() else {
            return false;
        };
        match other.kind() {
            TypeRefKind::Class {
                qualified_name,
                type_args,
            } => {
                if name == qualified_name {
                    return self.arguments_contained(scope, args, type_args, expanding);
                }
                self.instantiated_super_types(reference)
                    .iter()
                    .filter(|sup| sup.class_name() == Some(qualified_name.as_str()))
                    .any(|sup| {
                        let sup_args = sup.as_class().map(|(_, a)| a).unwrap_or_default();
                        self.arguments_contained(scope, sup_args, type_args, expanding)
                    })
            }
            TypeRefKind::Wildcard { .. } => {
                self.argument_contained(scope, reference, other, expanding)
            }
            _ => false,
        }
    }

    fn arguments_contained(
        &self,
        scope: Scope<'_>,
        from: &[TypeRef],
        to: &[TypeRef],
        expanding: &mut Vec<String>,
    ) -> bool {
        if to.is_empty() {
            return true;
        }
        if from.len() != to.len() {
            return false;
        }
        from.iter()
            .zip(to)
            .all(|(f, t)| self.argument_contained(scope, f, t, expanding))
    }

    /// Type-argument containment (JLS 4.5.1).
    fn argument_contained(
        &self,
        scope: Scope<'_>,
        from: &TypeRef,
        to: &TypeRef,
        expanding: &mut Vec<String>,
    ) -> bool {
        let TypeRefKind::Wildcard { bounds, upper } = to.kind() else {
            return from == to;
        };
        if matches!(from.kind(), TypeRefKind::Wildcard { .. }) {
            return self.wildcard_contained(scope, from, to, expanding);
        }
        if to.is_unbounded_wildcard() {
            return true;
        }
        if *upper {
            bounds
                .iter()
                .all(|bound| self.subtype(scope, from, bound, expanding))
        } else {
            bounds
                .first()
                .is_some_and(|lower| self.subtype(scope, lower, from, expanding))
        }
    }

    fn wildcard_contained(
        &self,
        scope: Scope<'_>,
        reference: &TypeRef,
        other: &TypeRef,
        expanding: &mut Vec<String>,
    ) -> bool {
        let (
            TypeRefKind::Wildcard {
                bounds: from_bounds,
                upper: from_upper,
            },
            TypeRefKind::Wildcard {
                bounds: to_bounds,
                upper: to_upper,
            },
        ) = (reference.kind(), other.kind())
        else {
            return false;
        };

        if other.is_unbounded_wildcard() {
            return true;
        }
        if reference.is_unbounded_wildcard() || from_upper != to_upper {
            return false;
        }
        if *from_upper {
            return to_bounds.iter().all(|to| {
                from_bounds
                    .iter()
                    .any(|from| self.subtype(scope, from, to, expanding))
            });
        }
        match (to_bounds.first(), from_bounds.first()) {
            (Some(to), Some(from)) => self.subtype(scope, to, from, expanding),
            _ => false,
        }
    }
}

/// Direct supertypes of a declaration, with `java.lang.Object` implied for interfaces and for
/// classes without an explicit superclass.
pub(crate) fn direct_super_types(decl: &TypeDecl) -> Vec<TypeRef> {
    let mut out = decl.declared_super_types();
    if decl.is_interface() {
        out.insert(0, TypeRef::object());
    }
    out.retain(|sup| sup.class_name() != Some(decl.qualified_name.as_str()));
    out
}

/// The element type one dimension down: `int[][]` gives `int[]`.
fn element_type(array: &TypeRef) -> Option<TypeRef> {
    match array.kind() {
        TypeRefKind::Array {
            component,
            dimension,
        } => Some(TypeRef::array(component.clone(), dimension - 1)),
        _ => None,
    }
}

/// Replaces type parameters named in `substitution` throughout `reference`.
pub(crate) fn substitute(reference: &TypeRef, substitution: &HashMap<&str, &TypeRef>) -> TypeRef {
    if substitution.is_empty() {
        return reference.clone();
    }
    match reference.kind() {
        TypeRefKind::Primitive { .. } => reference.clone(),
        TypeRefKind::TypeParameter { name } => substitution
            .get(name.as_str())
            .map(|r| (*r).clone())
            .unwrap_or_else(|| reference.clone()),
        TypeRefKind::Array {
            component,
            dimension,
        } => TypeRef::array(substitute(component, substitution), *dimension),
        TypeRefKind::Wildcard { bounds, upper } => TypeRef::new(TypeRefKind::Wildcard {
            bounds: bounds.iter().map(|b| substitute(b, substitution)).collect(),
            upper: *upper,
        }),
        TypeRefKind::Class {
            qualified_name,
            type_args,
        } => TypeRef::class(
            qualified_name.clone(),
            type_args.iter().map(|a| substitute(a, substitution)).collect(),
        ),
    }
}
