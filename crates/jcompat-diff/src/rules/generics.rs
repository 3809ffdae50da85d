//! Formal type parameter and parameter type-argument rules.

use std::collections::HashSet;

use jcompat_api::{Api, Scope};
use jcompat_model::{ExecutableDecl, FormalTypeParameter, TypeDecl, TypeRef};

use crate::change::{BreakingChange, BreakingChangeDetails, Symbol};
use crate::diff::DiffContext;
use crate::kind::BreakingChangeKind;

impl DiffContext<'_> {
    /// Removing a type parameter breaks, adding one breaks unless the type was not generic, and
    /// a bound change breaks when it rejects an argument the old bounds accepted.
    pub(crate) fn diff_type_formal_parameters(&mut self, old: &TypeDecl, new: &TypeDecl) {
        let (before, after) = (&old.type_params, &new.type_params);

        if before.len() > after.len() {
            for parameter in &before[after.len()..] {
                self.type_change(
                    BreakingChangeKind::TYPE_FORMAL_TYPE_PARAMETERS_REMOVED,
                    old,
                    BreakingChangeDetails::FormalTypeParameterRemoved {
                        parameter: parameter.clone(),
                    },
                );
            }
            return;
        }

        if after.len() > before.len() && !before.is_empty() {
            for parameter in &after[before.len()..] {
                self.type_change(
                    BreakingChangeKind::TYPE_FORMAL_TYPE_PARAMETERS_ADDED,
                    old,
                    BreakingChangeDetails::FormalTypeParameterAdded {
                        parameter: parameter.clone(),
                    },
                );
            }
            return;
        }

        let scope = Scope::of_type(new);
        for (p1, p2) in before.iter().zip(after) {
            if narrows_bounds(self.v2, scope, p1, p2) {
                self.type_change(
                    BreakingChangeKind::TYPE_FORMAL_TYPE_PARAMETERS_CHANGED,
                    old,
                    BreakingChangeDetails::FormalTypeParameterChanged {
                        previous: p1.clone(),
                        new: p2.clone(),
                    },
                );
            }
        }
    }

    /// Overridable executables must keep their bounds; others may only widen them. Removing
    /// parameters breaks overriders, and explicit type arguments at call sites when there was
    /// more than one.
    pub(crate) fn diff_executable_formal_parameters(
        &mut self,
        old_type: &TypeDecl,
        old: &ExecutableDecl,
        new: &ExecutableDecl,
    ) {
        let (before, after) = (&old.type_params, &new.type_params);
        let (v1, v2) = (self.v1, self.v2);
        let overridable = !v1.is_effectively_final_executable(old_type, old);
        let change = |kind, details| {
            let symbol = Symbol::of_executable(old, v1.signature(old));
            let new_symbol = Symbol::of_executable(new, v2.signature(new));
            BreakingChange::new(kind, old_type, symbol)
                .with_new_symbol(new_symbol)
                .with_details(details)
        };

        if before.len() > after.len() && (overridable || before.len() > 1) {
            let changes: Vec<BreakingChange> = before[after.len()..]
                .iter()
                .map(|parameter| {
                    change(
                        BreakingChangeKind::METHOD_FORMAL_TYPE_PARAMETERS_REMOVED,
                        BreakingChangeDetails::FormalTypeParameterRemoved {
                            parameter: parameter.clone(),
                        },
                    )
                })
                .collect();
            changes.into_iter().for_each(|c| self.emit(c));
            return;
        }

        if !before.is_empty() && before.len() < after.len() {
            let changes: Vec<BreakingChange> = after[before.len()..]
                .iter()
                .map(|parameter| {
                    change(
                        BreakingChangeKind::METHOD_FORMAL_TYPE_PARAMETERS_ADDED,
                        BreakingChangeDetails::FormalTypeParameterAdded {
                            parameter: parameter.clone(),
                        },
                    )
                })
                .collect();
            changes.into_iter().for_each(|c| self.emit(c));
            return;
        }

        let scope = v1.scope_of(old);
        let mut changes = Vec::new();
        for (p1, p2) in before.iter().zip(after) {
            let breaking = if overridable {
                let b1: HashSet<&TypeRef> = p1.bounds.iter().collect();
                let b2: HashSet<&TypeRef> = p2.bounds.iter().collect();
                b1 != b2
            } else {
                narrows_bounds(v1, scope, p1, p2)
            };
            if breaking {
                changes.push(change(
                    BreakingChangeKind::METHOD_FORMAL_TYPE_PARAMETERS_CHANGED,
                    BreakingChangeDetails::FormalTypeParameterChanged {
                        previous: p1.clone(),
                        new: p2.clone(),
                    },
                ));
            }
        }
        changes.into_iter().for_each(|c| self.emit(c));
    }

    /// Type arguments of class-typed parameters: invariant when the executable can be
    /// overridden, covariant otherwise.
    pub(crate) fn diff_parameter_generics(
        &mut self,
        old_type: &TypeDecl,
        old: &ExecutableDecl,
        new: &ExecutableDecl,
    ) {
        let is_final = self.v1.is_effectively_final_executable(old_type, old);
        let scope = self.v1.scope_of(old);

        for (position, (p1, p2)) in old.params.iter().zip(&new.params).enumerate() {
            let (t1, t2) = (p1.effective_type(), p2.effective_type());
            let (Some((_, args1)), Some((_, args2))) = (t1.as_class(), t2.as_class()) else {
                continue;
            };

            let breaking = args1.len() != args2.len()
                || (!is_final && t1 != t2)
                || (is_final && !self.v1.is_subtype(scope, &t1, &t2));
            if !breaking {
                continue;
            }

            let change = BreakingChange::new(
                BreakingChangeKind::METHOD_PARAMETER_GENERICS_CHANGED,
                old_type,
                Symbol::of_executable(old, self.v1.signature(old)),
            )
            .with_new_symbol(Symbol::of_executable(new, self.v2.signature(new)))
            .with_details(BreakingChangeDetails::MethodParameterGenericsChanged {
                previous: t1.clone(),
                new: t2.clone(),
            })
            .at_position(position);
            self.emit(change);
        }
    }
}

/// Whether some bound of `new` other than `Object` has no subtype among the bounds of `old`,
/// i.e. an argument accepted before may be rejected now.
fn narrows_bounds(
    api: &Api,
    scope: Scope<'_>,
    old: &FormalTypeParameter,
    new: &FormalTypeParameter,
) -> bool {
    new.bounds
        .iter()
        .filter(|b2| !b2.is_object())
        .any(|b2| !old.bounds.iter().any(|b1| api.is_subtype(scope, b1, b2)))
}
