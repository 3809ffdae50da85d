use std::collections::HashSet;

use jcompat_model::{ExecutableDecl, FormalTypeParameter, TypeRef, TypeRefKind};

use crate::api::{Api, Scope};

/// Nesting depth past which enclosing-type walks give up. Only reachable with cyclic input.
const MAX_ENCLOSING_DEPTH: usize = 64;

impl Api {
    /// Finds the formal type parameter named `name` visible from `scope`.
    pub fn find_type_parameter(&self, scope: Scope<'_>, name: &str) -> Option<FormalTypeParameter> {
        if let Some(tp) = scope
            .executable
            .and_then(|e| e.type_params.iter().find(|tp| tp.name == name))
        {
            return Some(tp.clone());
        }

        let mut current = scope.ty;
        let mut depth = 0;
        while let Some(ty) = current {
            if let Some(tp) = ty.type_params.iter().find(|tp| tp.name == name) {
                return Some(tp.clone());
            }
            depth += 1;
            if depth > MAX_ENCLOSING_DEPTH {
                break;
            }
            current = ty.enclosing.as_ref().and_then(|e| self.resolve(e));
        }
        None
    }

    /// Follows first bounds through chains like `T extends U, U extends Number` to the first
    /// bound that is not itself a type parameter. Unknown names and cycles yield
    /// `java.lang.Object`.
    pub fn resolve_type_parameter_bound(&self, scope: Scope<'_>, name: &str) -> TypeRef {
        let mut seen: HashSet<String> = HashSet::new();
        let mut current = name.to_string();
        loop {
            if !seen.insert(current.clone()) {
                tracing::debug!(name, "cyclic type parameter bounds");
                return TypeRef::object();
            }
            let Some(tp) = self.find_type_parameter(scope, &current) else {
                return TypeRef::object();
            };
            let bound = tp.first_bound();
            match bound.as_type_param() {
                Some(next) => current = next.to_string(),
                None => return bound,
            }
        }
    }

    /// The first declared bound of a type parameter, one step only.
    pub fn direct_type_parameter_bound(&self, scope: Scope<'_>, name: &str) -> TypeRef {
        self.find_type_parameter(scope, name)
            .map(|tp| tp.first_bound())
            .unwrap_or_else(TypeRef::object)
    }

    /// Replaces a type parameter reference by its resolved bound; other references pass through.
    pub fn resolve_bound(&self, scope: Scope<'_>, reference: &TypeRef) -> TypeRef {
        match reference.as_type_param() {
            Some(name) => self.resolve_type_parameter_bound(scope, name),
            None => reference.clone(),
        }
    }

    /// Erasure of a reference: type arguments dropped, type parameters replaced by the erasure
    /// of their leftmost bound.
    pub fn erasure(&self, scope: Scope<'_>, reference: &TypeRef) -> TypeRef {
        match reference.kind() {
            TypeRefKind::Primitive { .. } => reference.clone(),
            TypeRefKind::Array {
                component,
                dimension,
            } => TypeRef::array(self.erasure(scope, component), *dimension),
            TypeRefKind::TypeParameter { name } => {
                let bound = self.resolve_type_parameter_bound(scope, name);
                self.erasure(scope, &bound)
            }
            TypeRefKind::Wildcard { bounds, upper } => match bounds.first() {
                Some(bound) if *upper => self.erasure(scope, bound),
                _ => TypeRef::object(),
            },
            TypeRefKind::Class {
                qualified_name,
                type_args,
            } => {
                if type_args.is_empty() {
                    reference.clone()
                } else {
                    TypeRef::named(qualified_name.clone())
                }
            }
        }
    }

    /// Erased signature of an executable, e.g. `m(java.lang.Object,int[])`. A varargs parameter
    /// erases to the same shape as the equivalent array parameter.
    pub fn signature(&self, executable: &ExecutableDecl) -> String {
        let scope = self.scope_of(executable);
        let params: Vec<String> = executable
            .params
            .iter()
            .map(|p| self.erasure(scope, &p.effective_type()).to_string())
            .collect();
        format!("{}({})", executable.name, params.join(","))
    }

    pub fn have_same_signature(&self, a: &ExecutableDecl, b: &ExecutableDecl) -> bool {
        self.signature(a) == self.signature(b)
    }
}

/// Whether `reference` mentions a type parameter anywhere.
pub(crate) fn mentions_type_parameter(reference: &TypeRef) -> bool {
    match reference.kind() {
        TypeRefKind::Primitive { .. } => false,
        TypeRefKind::TypeParameter { .. } => true,
        TypeRefKind::Array { component, .. } => mentions_type_parameter(component),
        TypeRefKind::Wildcard { bounds, .. } => bounds.iter().any(mentions_type_parameter),
        TypeRefKind::Class { type_args, .. } => type_args.iter().any(mentions_type_parameter),
    }
}
