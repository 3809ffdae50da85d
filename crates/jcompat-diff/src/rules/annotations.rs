//! Annotation type rules: targets, repeatability and elements.

use std::collections::HashMap;

use jcompat_model::{AnnotationElementDecl, TypeDecl};

use crate::change::{BreakingChangeDetails, Symbol};
use crate::diff::DiffContext;
use crate::kind::BreakingChangeKind;

impl DiffContext<'_> {
    /// Targets, `@Repeatable` and elements of an annotation type. Elements are matched by name.
    pub(crate) fn diff_annotation_type(&mut self, old: &TypeDecl, new: &TypeDecl) {
        let new_targets = new.effective_targets();
        for target in old.effective_targets().difference(&new_targets) {
            self.type_change(
                BreakingChangeKind::ANNOTATION_TARGET_REMOVED,
                old,
                BreakingChangeDetails::AnnotationTargetRemoved { target: *target },
            );
        }

        if old.is_repeatable() && !new.is_repeatable() {
            self.type_change(
                BreakingChangeKind::ANNOTATION_NO_LONGER_REPEATABLE,
                old,
                BreakingChangeDetails::None,
            );
        }

        let before: HashMap<&str, &AnnotationElementDecl> = old
            .annotation_elements()
            .iter()
            .map(|e| (e.name.as_str(), e))
            .collect();
        let after: HashMap<&str, &AnnotationElementDecl> = new
            .annotation_elements()
            .iter()
            .map(|e| (e.name.as_str(), e))
            .collect();

        for e1 in old.annotation_elements() {
            let Some(e2) = after.get(e1.name.as_str()) else {
                self.member_change(
                    BreakingChangeKind::METHOD_REMOVED,
                    old,
                    Symbol::of_element(e1),
                    None,
                    BreakingChangeDetails::None,
                );
                continue;
            };

            if e1.has_default() && !e2.has_default() {
                self.member_change(
                    BreakingChangeKind::ANNOTATION_METHOD_NO_LONGER_DEFAULT,
                    old,
                    Symbol::of_element(e1),
                    Some(Symbol::of_element(e2)),
                    BreakingChangeDetails::None,
                );
            }
            if e1.ty != e2.ty {
                self.member_change(
                    BreakingChangeKind::METHOD_RETURN_TYPE_CHANGED,
                    old,
                    Symbol::of_element(e1),
                    Some(Symbol::of_element(e2)),
                    BreakingChangeDetails::MethodReturnTypeChanged {
                        previous: e1.ty.clone(),
                        new: e2.ty.clone(),
                    },
                );
            }
        }

        for e2 in new.annotation_elements() {
            if !before.contains_key(e2.name.as_str()) && !e2.has_default() {
                self.type_change(
                    BreakingChangeKind::ANNOTATION_METHOD_ADDED_WITHOUT_DEFAULT,
                    old,
                    BreakingChangeDetails::AnnotationMethodAddedWithoutDefault {
                        element: e2.name.clone(),
                    },
                );
            }
        }
    }
}
