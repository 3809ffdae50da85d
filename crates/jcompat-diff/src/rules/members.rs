//! Field, method and constructor rules.

use std::collections::HashMap;

use jcompat_api::{Api, Scope};
use jcompat_model::{ExecutableDecl, FieldDecl, TypeDecl, TypeRef, Visibility};

use crate::change::{BreakingChangeDetails, Symbol};
use crate::diff::DiffContext;
use crate::kind::BreakingChangeKind;

fn narrowed(old: Visibility, new: Visibility) -> bool {
    old == Visibility::Public && new == Visibility::Protected
}

/// Scope of a member's declaring type, falling back to the type it was reached through.
fn owner_scope<'a>(api: &'a Api, owner: &str, via: &'a TypeDecl) -> Scope<'a> {
    Scope::of_type(api.find_type(owner).unwrap_or(via))
}

impl DiffContext<'_> {
    pub(crate) fn diff_fields(&mut self, old_type: &TypeDecl, new_type: &TypeDecl) {
        let (v1, v2) = (self.v1, self.v2);
        let new_fields: HashMap<&str, &FieldDecl> = v2
            .exported_fields(new_type)
            .into_iter()
            .map(|f| (f.name.as_str(), f))
            .collect();

        for old in v1.exported_fields(old_type) {
            match new_fields.get(old.name.as_str()) {
                Some(new) => self.diff_field(old_type, new_type, old, new),
                None => self.member_change(
                    BreakingChangeKind::FIELD_REMOVED,
                    old_type,
                    Symbol::of_field(old),
                    None,
                    BreakingChangeDetails::None,
                ),
            }
        }
    }

    fn diff_field(&mut self, old_type: &TypeDecl, new_type: &TypeDecl, old: &FieldDecl, new: &FieldDecl) {
        let report = |cx: &mut Self, kind, details| {
            cx.member_change(
                kind,
                old_type,
                Symbol::of_field(old),
                Some(Symbol::of_field(new)),
                details,
            )
        };

        if !old.is_final() && new.is_final() {
            report(self, BreakingChangeKind::FIELD_NOW_FINAL, BreakingChangeDetails::None);
        }
        if !old.is_static() && new.is_static() {
            report(self, BreakingChangeKind::FIELD_NOW_STATIC, BreakingChangeDetails::None);
        }
        if old.is_static() && !new.is_static() {
            report(self, BreakingChangeKind::FIELD_NO_LONGER_STATIC, BreakingChangeDetails::None);
        }
        if narrowed(old.visibility, new.visibility) {
            report(self, BreakingChangeKind::FIELD_NOW_PROTECTED, BreakingChangeDetails::None);
        }

        if old.ty == new.ty {
            return;
        }
        let details = BreakingChangeDetails::FieldTypeChanged {
            previous: old.ty.clone(),
            new: new.ty.clone(),
        };

        let (v1, v2) = (self.v1, self.v2);
        let old_erased = v1.erasure(owner_scope(v1, &old.owner, old_type), &old.ty);
        let new_scope = owner_scope(v2, &new.owner, new_type);
        let new_erased = v2.erasure(new_scope, &new.ty);
        if old_erased != new_erased && !old.is_compile_time_constant() {
            report(self, BreakingChangeKind::FIELD_TYPE_ERASURE_CHANGED, details.clone());
        }

        let readable = v2.is_assignable(new_scope, &new.ty, &old.ty);
        let writable = old.is_final() || v2.is_assignable(new_scope, &old.ty, &new.ty);
        if !readable || !writable {
            report(self, BreakingChangeKind::FIELD_TYPE_CHANGED_INCOMPATIBLE, details);
        }
    }

    pub(crate) fn diff_methods(&mut self, old_type: &TypeDecl, new_type: &TypeDecl) {
        let (v1, v2) = (self.v1, self.v2);
        let new_methods: HashMap<String, &ExecutableDecl> = v2
            .exported_methods(new_type)
            .into_iter()
            .map(|m| (v2.signature(m), m))
            .collect();

        for old in v1.exported_methods(old_type) {
            let signature = v1.signature(old);
            match new_methods.get(&signature) {
                Some(new) => self.diff_method(old_type, new_type, old, new),
                None => self.member_change(
                    BreakingChangeKind::METHOD_REMOVED,
                    old_type,
                    Symbol::of_executable(old, signature),
                    None,
                    BreakingChangeDetails::None,
                ),
            }
        }
    }

    fn diff_method(
        &mut self,
        old_type: &TypeDecl,
        new_type: &TypeDecl,
        old: &ExecutableDecl,
        new: &ExecutableDecl,
    ) {
        let (v1, v2) = (self.v1, self.v2);
        let symbols = || {
            (
                Symbol::of_executable(old, v1.signature(old)),
                Some(Symbol::of_executable(new, v2.signature(new))),
            )
        };
        let report = |cx: &mut Self, kind, details| {
            let (symbol, new_symbol) = symbols();
            cx.member_change(kind, old_type, symbol, new_symbol, details)
        };

        if !v1.is_effectively_final_executable(old_type, old)
            && v2.is_effectively_final_executable(new_type, new)
        {
            report(self, BreakingChangeKind::METHOD_NOW_FINAL, BreakingChangeDetails::None);
        }
        if !old.is_static() && new.is_static() {
            report(self, BreakingChangeKind::METHOD_NOW_STATIC, BreakingChangeDetails::None);
        }
        if old.is_static() && !new.is_static() {
            report(self, BreakingChangeKind::METHOD_NO_LONGER_STATIC, BreakingChangeDetails::None);
        }
        if !v1.is_abstract_method(old) && v2.is_abstract_method(new) {
            report(self, BreakingChangeKind::METHOD_NOW_ABSTRACT, BreakingChangeDetails::None);
        }
        if narrowed(old.visibility, new.visibility) {
            report(self, BreakingChangeKind::METHOD_NOW_PROTECTED, BreakingChangeDetails::None);
        }

        if old.return_type != new.return_type {
            let details = BreakingChangeDetails::MethodReturnTypeChanged {
                previous: old.return_type.clone(),
                new: new.return_type.clone(),
            };
            let (old_scope, new_scope) = (v1.scope_of(old), v2.scope_of(new));
            if v1.erasure(old_scope, &old.return_type) != v2.erasure(new_scope, &new.return_type) {
                report(
                    self,
                    BreakingChangeKind::METHOD_RETURN_TYPE_ERASURE_CHANGED,
                    details.clone(),
                );
            }

            let invoker = v2.is_assignable(new_scope, &new.return_type, &old.return_type);
            let overrider = v1.is_effectively_final_executable(old_type, old)
                || v2.is_subtype(new_scope, &old.return_type, &new.return_type);
            if !invoker || !overrider {
                report(
                    self,
                    BreakingChangeKind::METHOD_RETURN_TYPE_CHANGED_INCOMPATIBLE,
                    details,
                );
            }
        }

        self.diff_executable(old_type, old, new);
    }

    pub(crate) fn diff_constructors(&mut self, old_type: &TypeDecl, new_type: &TypeDecl) {
        let (v1, v2) = (self.v1, self.v2);
        for old in v1.exported_constructors(old_type) {
            let signature = v1.signature(old);
            let Some(new) = v2.find_constructor(new_type, &signature) else {
                self.member_change(
                    BreakingChangeKind::CONSTRUCTOR_REMOVED,
                    old_type,
                    Symbol::of_executable(old, signature),
                    None,
                    BreakingChangeDetails::None,
                );
                continue;
            };

            if narrowed(old.visibility, new.visibility) {
                self.member_change(
                    BreakingChangeKind::CONSTRUCTOR_NOW_PROTECTED,
                    old_type,
                    Symbol::of_executable(old, signature),
                    Some(Symbol::of_executable(new, v2.signature(new))),
                    BreakingChangeDetails::None,
                );
            }
            self.diff_executable(old_type, old, new);
        }
    }

    /// Rules shared by methods and constructors.
    fn diff_executable(&mut self, old_type: &TypeDecl, old: &ExecutableDecl, new: &ExecutableDecl) {
        self.diff_thrown_exceptions(old_type, old, new);
        self.diff_executable_formal_parameters(old_type, old, new);
        self.diff_parameter_generics(old_type, old, new);
    }

    /// Throwing a new checked exception breaks invokers; dropping one breaks overriders and
    /// `catch` blocks, unless nothing can override the executable.
    fn diff_thrown_exceptions(
        &mut self,
        old_type: &TypeDecl,
        old: &ExecutableDecl,
        new: &ExecutableDecl,
    ) {
        let (v1, v2) = (self.v1, self.v2);
        let thrown1: Vec<TypeRef> = v1.thrown_checked_exceptions(old);
        let thrown2: Vec<TypeRef> = v2.thrown_checked_exceptions(new);
        let scope = v2.scope_of(new);
        let is_final = v1.is_effectively_final_executable(old_type, old);

        let report = |cx: &mut Self, kind, details| {
            cx.member_change(
                kind,
                old_type,
                Symbol::of_executable(old, v1.signature(old)),
                Some(Symbol::of_executable(new, v2.signature(new))),
                details,
            )
        };

        if !is_final {
            for exception in &thrown1 {
                if !thrown2.iter().any(|e2| v2.is_subtype(scope, exception, e2)) {
                    report(
                        self,
                        BreakingChangeKind::METHOD_NO_LONGER_THROWS_CHECKED_EXCEPTION,
                        BreakingChangeDetails::MethodNoLongerThrowsCheckedException {
                            exception: exception.clone(),
                        },
                    );
                }
            }
        }

        for exception in &thrown2 {
            if !thrown1.iter().any(|e1| v2.is_subtype(scope, exception, e1)) {
                report(
                    self,
                    BreakingChangeKind::METHOD_NOW_THROWS_CHECKED_EXCEPTION,
                    BreakingChangeDetails::MethodNowThrowsCheckedException {
                        exception: exception.clone(),
                    },
                );
            }
        }
    }
}
