//! Rules comparing two versions of one type declaration.

use jcompat_api::Scope;
use jcompat_model::{TypeDecl, TypeRef, Visibility};

use crate::change::BreakingChangeDetails;
use crate::diff::DiffContext;
use crate::kind::BreakingChangeKind;

impl DiffContext<'_> {
    pub(crate) fn diff_type(&mut self, old: &TypeDecl, new: &TypeDecl) {
        if old.visibility == Visibility::Public && new.visibility == Visibility::Protected {
            self.type_change(BreakingChangeKind::TYPE_NOW_PROTECTED, old, BreakingChangeDetails::None);
        }

        let same_nature = old.nature() == new.nature();
        if !same_nature {
            self.type_change(
                BreakingChangeKind::CLASS_TYPE_CHANGED,
                old,
                BreakingChangeDetails::ClassTypeChanged {
                    previous: old.nature(),
                    new: new.nature(),
                },
            );
        }

        self.diff_super_types(old, new);
        self.diff_type_formal_parameters(old, new);

        if !same_nature {
            return;
        }

        if old.is_class() {
            self.diff_class(old, new);
        }
        if old.is_annotation() {
            self.diff_annotation_type(old, new);
        }

        self.diff_new_abstract_methods(old, new);
        self.diff_fields(old, new);
        self.diff_methods(old, new);
        self.diff_constructors(old, new);
    }

    fn diff_class(&mut self, old: &TypeDecl, new: &TypeDecl) {
        if !self.v1.is_effectively_final(old) && self.v2.is_effectively_final(new) {
            self.type_change(BreakingChangeKind::CLASS_NOW_FINAL, old, BreakingChangeDetails::None);
        }

        if !old.is_abstract() && new.is_abstract() {
            self.type_change(BreakingChangeKind::CLASS_NOW_ABSTRACT, old, BreakingChangeDetails::None);
        }

        if old.is_nested() && new.is_nested() {
            if !old.is_static() && new.is_static() {
                self.type_change(
                    BreakingChangeKind::NESTED_CLASS_NOW_STATIC,
                    old,
                    BreakingChangeDetails::None,
                );
            }
            if old.is_static() && !new.is_static() {
                self.type_change(
                    BreakingChangeKind::NESTED_CLASS_NO_LONGER_STATIC,
                    old,
                    BreakingChangeDetails::None,
                );
            }
        }

        if self.v1.is_unchecked_exception(old) && self.v2.is_checked_exception(new) {
            self.type_change(
                BreakingChangeKind::CLASS_NOW_CHECKED_EXCEPTION,
                old,
                BreakingChangeDetails::None,
            );
        }
    }

    /// Exported supertypes that clients may have cast to and that `new` no longer has. Only the
    /// closest removed supertypes are reported.
    fn diff_super_types(&mut self, old: &TypeDecl, new: &TypeDecl) {
        let new_scope = Scope::of_type(new);
        let new_self = new.self_reference();

        let removed: Vec<TypeRef> = self
            .v1
            .all_super_types(old)
            .iter()
            .filter(|sup| self.v1.is_exported_ref(sup))
            .filter(|sup| !self.v2.is_subtype(new_scope, &new_self, sup))
            .cloned()
            .collect();

        let old_scope = Scope::of_type(old);
        for sup in &removed {
            let covered = removed
                .iter()
                .any(|other| other != sup && self.v1.is_subtype(old_scope, other, sup));
            if !covered {
                self.type_change(
                    BreakingChangeKind::SUPERTYPE_REMOVED,
                    old,
                    BreakingChangeDetails::SuperTypeRemoved {
                        super_type: sup.clone(),
                    },
                );
            }
        }
    }
}
