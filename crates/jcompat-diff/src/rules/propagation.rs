//! New abstract methods and the subtypes that inherit the obligation to implement them.

use std::collections::{HashSet, VecDeque};

use jcompat_model::{ExecutableDecl, TypeDecl};

use crate::change::{BreakingChange, BreakingChangeDetails, Symbol};
use crate::diff::DiffContext;
use crate::kind::BreakingChangeKind;
use crate::report::Anomaly;

impl DiffContext<'_> {
    /// Signatures `old` must now implement but did not have to before.
    ///
    /// A method declared by the type itself is reported once on the type and then pushed down
    /// to its subtypes; one inherited from a supertype is reported on the type directly.
    pub(crate) fn diff_new_abstract_methods(&mut self, old: &TypeDecl, new: &TypeDecl) {
        let (v1, v2) = (self.v1, self.v2);
        if v1.is_effectively_final(old) {
            return;
        }

        let previous = self.previous_obligations(old);
        let added: Vec<&ExecutableDecl> = v2
            .methods_to_implement(new)
            .into_iter()
            .filter(|m| !previous.contains(&v2.signature(m)))
            .collect();

        for method in added {
            let signature = v2.signature(method);
            if method.owner == new.qualified_name {
                let (kind, details) = if new.is_interface() {
                    (
                        BreakingChangeKind::METHOD_ADDED_TO_INTERFACE,
                        BreakingChangeDetails::MethodAddedToInterface {
                            method: signature.clone(),
                        },
                    )
                } else {
                    (
                        BreakingChangeKind::METHOD_ABSTRACT_ADDED_TO_CLASS,
                        BreakingChangeDetails::MethodAbstractAddedToClass {
                            method: signature.clone(),
                        },
                    )
                };
                self.type_change(kind, old, details);
                self.propagate(new, method, &signature);
            } else {
                self.new_obligation(old, &method.owner, &signature);
            }
        }
    }

    /// Signatures `old` already had to implement, or inherited a concrete implementation of.
    fn previous_obligations(&self, old: &TypeDecl) -> HashSet<String> {
        let v1 = self.v1;
        let mut signatures: HashSet<String> = v1
            .methods_to_implement(old)
            .into_iter()
            .map(|m| v1.signature(m))
            .collect();
        signatures.extend(
            v1.all_methods(old)
                .into_iter()
                .filter(|m| !v1.is_abstract_method(m))
                .map(|m| v1.signature(m)),
        );
        signatures
    }

    /// Walks the subtypes of `root` in the new version and reports every previously exported,
    /// extensible one that now has to implement `signature`.
    fn propagate(&mut self, root: &TypeDecl, method: &ExecutableDecl, signature: &str) {
        let (v1, v2) = (self.v1, self.v2);
        let limit = self.options.max_propagation_steps;

        let mut visited: HashSet<&str> = HashSet::from([root.qualified_name.as_str()]);
        let mut queue: VecDeque<&TypeDecl> = VecDeque::from([root]);
        let mut steps = 0usize;

        while let Some(current) = queue.pop_front() {
            for sub in v2.direct_subtypes(&current.qualified_name) {
                if !visited.insert(sub.qualified_name.as_str()) {
                    continue;
                }
                steps += 1;
                if steps > limit {
                    self.anomaly(Anomaly::PropagationLimit {
                        root: root.qualified_name.clone(),
                        steps: limit,
                    });
                    return;
                }
                queue.push_back(sub);

                let Some(old_sub) = v1.snapshot().type_by_name(&sub.qualified_name) else {
                    continue;
                };
                if !v1.is_exported(old_sub) || v1.is_effectively_final(old_sub) {
                    continue;
                }
                let still_abstract = v2
                    .methods_to_implement(sub)
                    .into_iter()
                    .any(|m| v2.signature(m) == signature);
                if !still_abstract || self.previous_obligations(old_sub).contains(signature) {
                    continue;
                }
                self.new_obligation(old_sub, &method.owner, signature);
            }
        }
    }

    fn new_obligation(&mut self, old: &TypeDecl, declared_in: &str, signature: &str) {
        let key = (old.qualified_name.clone(), signature.to_string());
        if !self.obligations.insert(key) {
            return;
        }
        let change = BreakingChange::new(
            BreakingChangeKind::TYPE_NEW_ABSTRACT_METHOD,
            old,
            Symbol::of_type(old),
        )
        .with_details(BreakingChangeDetails::TypeNewAbstractMethod {
            method: signature.to_string(),
            declared_in: declared_in.to_string(),
        });
        self.emit(change);
    }
}
