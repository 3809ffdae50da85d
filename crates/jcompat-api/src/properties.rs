use jcompat_model::{ExecutableDecl, TypeDecl, TypeNature, TypeRef, Visibility};

use crate::api::Api;
use crate::resolve::Origin;

/// Enclosing chains longer than this are treated as cyclic.
const MAX_NESTING: usize = 64;

impl Api {
    /// Whether client code outside the library can name `decl`.
    ///
    /// The type and every enclosing type must be public, or protected and open for extension.
    /// Library types must also live in a package exported by the snapshot's module.
    pub fn is_exported(&self, decl: &TypeDecl) -> bool {
        let mut current = decl;
        for _ in 0..MAX_NESTING {
            if !self.is_visible_type(current) {
                return false;
            }
            match current.enclosing.as_ref().and_then(|e| self.resolve(e)) {
                Some(enclosing) => current = enclosing,
                None => return self.is_in_exported_package(decl),
            }
        }
        tracing::debug!(ty = %decl.qualified_name, "enclosing chain too deep or cyclic");
        false
    }

    /// [`Api::is_exported`] for a reference. Types outside every known source are opaque and
    /// count as exported.
    pub fn is_exported_ref(&self, reference: &TypeRef) -> bool {
        self.resolve(reference)
            .map_or(true, |decl| self.is_exported(decl))
    }

    fn is_visible_type(&self, decl: &TypeDecl) -> bool {
        match decl.visibility {
            Visibility::Public => true,
            Visibility::Protected => !self.is_effectively_final(decl),
            Visibility::PackagePrivate | Visibility::Private => false,
        }
    }

    fn is_in_exported_package(&self, decl: &TypeDecl) -> bool {
        match self.resolver().origin(&decl.qualified_name) {
            Some(Origin::Library) => self
                .snapshot()
                .module()
                .exports_package(decl.package_name()),
            _ => true,
        }
    }

    /// Whether a member with `visibility` declared in or inherited by `decl` is reachable by
    /// clients. Protected members only count when `decl` can be subclassed.
    pub fn is_exported_member(&self, decl: &TypeDecl, visibility: Visibility) -> bool {
        self.is_exported(decl)
            && (visibility.is_public()
                || (visibility.is_protected() && !self.is_effectively_final(decl)))
    }

    /// Whether no client can extend or implement `decl`.
    pub fn is_effectively_final(&self, decl: &TypeDecl) -> bool {
        if decl.modifiers.is_non_sealed() {
            return false;
        }
        if decl.is_final() || decl.modifiers.is_sealed() {
            return true;
        }
        match decl.nature() {
            TypeNature::Enum | TypeNature::Record => true,
            TypeNature::Class => !decl
                .constructors()
                .iter()
                .any(|c| c.visibility.is_public() || c.visibility.is_protected()),
            TypeNature::Interface | TypeNature::Annotation => false,
        }
    }

    /// Whether no client can override `executable`.
    pub fn is_effectively_final_executable(
        &self,
        decl: &TypeDecl,
        executable: &ExecutableDecl,
    ) -> bool {
        executable.is_constructor() || executable.is_final() || self.is_effectively_final(decl)
    }

    /// The checked exceptions in `executable`'s throws clause; type variables are replaced by
    /// their bounds first.
    pub fn thrown_checked_exceptions(&self, executable: &ExecutableDecl) -> Vec<TypeRef> {
        let scope = self.scope_of(executable);
        executable
            .thrown
            .iter()
            .map(|thrown| self.resolve_bound(scope, thrown))
            .filter(|thrown| self.is_checked_exception_ref(thrown))
            .collect()
    }
}
