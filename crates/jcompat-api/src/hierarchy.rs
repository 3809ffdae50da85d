use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use jcompat_model::{ExecutableDecl, FieldDecl, TypeDecl, TypeRef, Visibility};

use crate::api::{Api, Scope};
use crate::subtyping::direct_super_types;

impl Api {
    /// Transitive supertypes of `decl` in depth-first declaration order, deduplicated by
    /// qualified name. Interfaces include `java.lang.Object`. Unresolvable supertypes are listed
    /// but not expanded.
    pub fn all_super_types(&self, decl: &TypeDecl) -> Arc<[TypeRef]> {
        let canonical = self
            .find_type(&decl.qualified_name)
            .is_some_and(|found| std::ptr::eq(found, decl));
        if canonical {
            if let Some(cached) = self.caches.super_types.read().get(&decl.qualified_name) {
                return cached.clone();
            }
        }

        let mut out = Vec::new();
        let mut seen = HashSet::from([decl.qualified_name.clone()]);
        self.collect_super_types(decl, &mut seen, &mut out);
        let out: Arc<[TypeRef]> = out.into();

        if canonical {
            self.caches
                .super_types
                .write()
                .insert(decl.qualified_name.clone(), out.clone());
        }
        out
    }

    pub fn all_super_types_of(&self, qualified_name: &str) -> Arc<[TypeRef]> {
        match self.find_type(qualified_name) {
            Some(decl) => self.all_super_types(decl),
            None => Arc::from(Vec::new()),
        }
    }

    fn collect_super_types(&self, decl: &TypeDecl, seen: &mut HashSet<String>, out: &mut Vec<TypeRef>) {
        for sup in direct_super_types(decl) {
            let Some(name) = sup.class_name() else {
                continue;
            };
            if !seen.insert(name.to_string()) {
                continue;
            }
            out.push(sup.clone());
            if let Some(next) = self.resolve(&sup) {
                self.collect_super_types(next, seen, out);
            }
        }
    }

    /// The entries of [`Api::all_super_types`] that resolve to interfaces.
    pub fn all_interfaces(&self, decl: &TypeDecl) -> Vec<TypeRef> {
        self.all_super_types(decl)
            .iter()
            .filter(|sup| self.resolve(sup).is_some_and(TypeDecl::is_interface))
            .cloned()
            .collect()
    }

    /// Declared and inherited non-private methods, one per erased signature. When several
    /// candidates share a signature the overriding one is kept. Static interface methods are not
    /// inherited.
    pub fn all_methods<'a>(&'a self, decl: &'a TypeDecl) -> Vec<&'a ExecutableDecl> {
        let mut merged: IndexMap<String, &'a ExecutableDecl> = IndexMap::new();
        let mut seen = HashSet::from([decl.qualified_name.clone()]);
        self.collect_methods(decl, true, &mut seen, &mut merged);
        merged.into_values().collect()
    }

    fn collect_methods<'a>(
        &'a self,
        decl: &'a TypeDecl,
        declared_here: bool,
        seen: &mut HashSet<String>,
        merged: &mut IndexMap<String, &'a ExecutableDecl>,
    ) {
        for method in &decl.methods {
            if method.visibility == Visibility::Private {
                continue;
            }
            if !declared_here && decl.is_interface() && method.is_static() {
                continue;
            }
            let signature = self.signature(method);
            match merged.get(&signature) {
                Some(existing) if self.is_overriding(existing, method) => {}
                _ => {
                    merged.insert(signature, method);
                }
            }
        }

        for sup in direct_super_types(decl) {
            let Some(sup_decl) = self.resolve(&sup) else {
                continue;
            };
            if !seen.insert(sup_decl.qualified_name.clone()) {
                continue;
            }
            self.collect_methods(sup_decl, false, seen, merged);
        }
    }

    /// [`Api::all_methods`] restricted to members exported through `decl`.
    pub fn exported_methods<'a>(&'a self, decl: &'a TypeDecl) -> Vec<&'a ExecutableDecl> {
        self.all_methods(decl)
            .into_iter()
            .filter(|m| self.is_exported_member(decl, m.visibility))
            .collect()
    }

    /// Exported methods a concrete subtype of `decl` has to implement.
    pub fn methods_to_implement<'a>(&'a self, decl: &'a TypeDecl) -> Vec<&'a ExecutableDecl> {
        self.exported_methods(decl)
            .into_iter()
            .filter(|m| self.is_abstract_method(m))
            .collect()
    }

    pub fn find_method<'a>(
        &'a self,
        decl: &'a TypeDecl,
        signature: &str,
    ) -> Option<&'a ExecutableDecl> {
        self.exported_methods(decl)
            .into_iter()
            .find(|m| self.signature(m) == signature)
    }

    pub fn exported_constructors<'a>(&'a self, decl: &'a TypeDecl) -> Vec<&'a ExecutableDecl> {
        decl.constructors()
            .iter()
            .filter(|c| self.is_exported_member(decl, c.visibility))
            .collect()
    }

    pub fn find_constructor<'a>(
        &'a self,
        decl: &'a TypeDecl,
        signature: &str,
    ) -> Option<&'a ExecutableDecl> {
        self.exported_constructors(decl)
            .into_iter()
            .find(|c| self.signature(c) == signature)
    }

    /// Declared and inherited non-private fields, one per name; a field shadows the ones of its
    /// supertypes.
    pub fn all_fields<'a>(&'a self, decl: &'a TypeDecl) -> Vec<&'a FieldDecl> {
        let mut merged: IndexMap<&'a str, &'a FieldDecl> = IndexMap::new();
        let mut seen = HashSet::from([decl.qualified_name.clone()]);
        self.collect_fields(decl, &mut seen, &mut merged);
        merged.into_values().collect()
    }

    fn collect_fields<'a>(
        &'a self,
        decl: &'a TypeDecl,
        seen: &mut HashSet<String>,
        merged: &mut IndexMap<&'a str, &'a FieldDecl>,
    ) {
        for field in &decl.fields {
            if field.visibility == Visibility::Private {
                continue;
            }
            match merged.get(field.name.as_str()) {
                Some(existing) if self.is_shadowing(existing, field) => {}
                _ => {
                    merged.insert(field.name.as_str(), field);
                }
            }
        }

        for sup in direct_super_types(decl) {
            let Some(sup_decl) = self.resolve(&sup) else {
                continue;
            };
            if !seen.insert(sup_decl.qualified_name.clone()) {
                continue;
            }
            self.collect_fields(sup_decl, seen, merged);
        }
    }

    pub fn exported_fields<'a>(&'a self, decl: &'a TypeDecl) -> Vec<&'a FieldDecl> {
        self.all_fields(decl)
            .into_iter()
            .filter(|f| self.is_exported_member(decl, f.visibility))
            .collect()
    }

    pub fn find_field<'a>(&'a self, decl: &'a TypeDecl, name: &str) -> Option<&'a FieldDecl> {
        self.exported_fields(decl)
            .into_iter()
            .find(|f| f.name == name)
    }

    /// Abstract, either declared so or as a plain interface method.
    pub fn is_abstract_method(&self, method: &ExecutableDecl) -> bool {
        if method.is_constructor() {
            return false;
        }
        if method.is_abstract() {
            return true;
        }
        let in_interface = self
            .find_type(&method.owner)
            .is_some_and(TypeDecl::is_interface);
        in_interface
            && !method.is_default()
            && !method.is_static()
            && method.visibility != Visibility::Private
    }

    /// Whether `method` overrides (or implements) `other`.
    pub fn is_overriding(&self, method: &ExecutableDecl, other: &ExecutableDecl) -> bool {
        if std::ptr::eq(method, other) {
            return true;
        }
        if !self.have_same_signature(method, other) || !self.returns_compatible(method, other) {
            return false;
        }
        if method.owner == other.owner || self.is_nominal_subtype(&method.owner, &other.owner) {
            return true;
        }
        let method_abstract = self.is_abstract_method(method);
        if !method_abstract && self.is_abstract_method(other) {
            return true;
        }
        !method.is_default() && !method_abstract && other.is_default()
    }

    /// Same name, different erased signature, owners in one hierarchy.
    pub fn is_overloading(&self, method: &ExecutableDecl, other: &ExecutableDecl) -> bool {
        method.name == other.name
            && !self.have_same_signature(method, other)
            && self.in_same_hierarchy(&method.owner, &other.owner)
    }

    pub fn is_shadowing(&self, field: &FieldDecl, other: &FieldDecl) -> bool {
        field.name == other.name && self.is_nominal_subtype(&field.owner, &other.owner)
    }

    pub fn in_same_hierarchy(&self, a: &str, b: &str) -> bool {
        self.is_nominal_subtype(a, b) || self.is_nominal_subtype(b, a)
    }

    /// Return types must match exactly when primitive; reference returns may be covariant.
    fn returns_compatible(&self, method: &ExecutableDecl, other: &ExecutableDecl) -> bool {
        let (ret, other_ret) = (&method.return_type, &other.return_type);
        if ret.is_primitive() || other_ret.is_primitive() {
            return ret == other_ret;
        }
        let erased = self.erasure(self.scope_of(method), ret);
        let other_erased = self.erasure(self.scope_of(other), other_ret);
        other_erased.is_object()
            || erased == other_erased
            || self.is_subtype(Scope::empty(), &erased, &other_erased)
    }
}
