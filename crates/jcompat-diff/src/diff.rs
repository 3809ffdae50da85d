use std::collections::HashSet;
use std::sync::Arc;

use jcompat_api::Api;
use jcompat_model::{ApiSnapshot, TypeDecl, OBJECT};

use crate::change::{BreakingChange, BreakingChangeDetails, Symbol};
use crate::exclusion::ExclusionOptions;
use crate::kind::BreakingChangeKind;
use crate::report::{Anomaly, Report};

pub const DEFAULT_MAX_PROPAGATION_STEPS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub exclusions: ExclusionOptions,
    /// Upper bound on the subtypes visited while spreading one new abstract method.
    pub max_propagation_steps: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            exclusions: ExclusionOptions::default(),
            max_propagation_steps: DEFAULT_MAX_PROPAGATION_STEPS,
        }
    }
}

impl DiffOptions {
    pub fn with_exclusions(mut self, exclusions: ExclusionOptions) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_max_propagation_steps(mut self, steps: usize) -> Self {
        self.max_propagation_steps = steps;
        self
    }
}

/// Compares two versions of a library API.
///
/// ```ignore
/// let report = ApiDiff::new(before, after).compare();
/// for change in report.breaking_changes() {
///     println!("{change}");
/// }
/// ```
#[derive(Debug)]
pub struct ApiDiff {
    before: Api,
    after: Api,
    options: DiffOptions,
}

impl ApiDiff {
    pub fn new(before: impl Into<Arc<ApiSnapshot>>, after: impl Into<Arc<ApiSnapshot>>) -> Self {
        Self::from_apis(Api::new(before), Api::new(after))
    }

    /// Compares two prepared facades, e.g. ones resolving against their own classpaths.
    pub fn from_apis(before: Api, after: Api) -> Self {
        Self {
            before,
            after,
            options: DiffOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    pub fn before(&self) -> &Api {
        &self.before
    }

    pub fn after(&self) -> &Api {
        &self.after
    }

    /// Runs every rule over each exported type of the old version.
    pub fn compare(&self) -> Report {
        let mut cx = DiffContext::new(&self.before, &self.after, &self.options);

        for old in self.before.exported_types() {
            let _span = tracing::debug_span!("compare_type", ty = %old.qualified_name).entered();
            let counterpart = self
                .after
                .snapshot()
                .type_by_name(&old.qualified_name)
                .filter(|new| self.after.is_exported(new));
            match counterpart {
                Some(new) => cx.diff_type(old, new),
                None => cx.type_change(BreakingChangeKind::TYPE_REMOVED, old, BreakingChangeDetails::None),
            }
        }

        cx.finish()
    }
}

/// Mutable state of one comparison, shared by the rule modules.
pub(crate) struct DiffContext<'a> {
    pub(crate) v1: &'a Api,
    pub(crate) v2: &'a Api,
    pub(crate) options: &'a DiffOptions,
    changes: Vec<BreakingChange>,
    anomalies: Vec<Anomaly>,
    /// `(type, signature)` pairs already reported as new abstract obligations.
    pub(crate) obligations: HashSet<(String, String)>,
}

impl<'a> DiffContext<'a> {
    fn new(v1: &'a Api, v2: &'a Api, options: &'a DiffOptions) -> Self {
        Self {
            v1,
            v2,
            options,
            changes: Vec::new(),
            anomalies: Vec::new(),
            obligations: HashSet::new(),
        }
    }

    /// Records `change` unless it concerns a member of `java.lang.Object`.
    pub(crate) fn emit(&mut self, change: BreakingChange) {
        if change.impacted_symbol.owner.as_deref() == Some(OBJECT) {
            return;
        }
        tracing::trace!(kind = %change.kind, symbol = %change.impacted_symbol, "breaking change");
        self.changes.push(change);
    }

    pub(crate) fn type_change(
        &mut self,
        kind: BreakingChangeKind,
        old: &TypeDecl,
        details: BreakingChangeDetails,
    ) {
        self.emit(BreakingChange::new(kind, old, Symbol::of_type(old)).with_details(details));
    }

    pub(crate) fn member_change(
        &mut self,
        kind: BreakingChangeKind,
        old_type: &TypeDecl,
        old: Symbol,
        new: Option<Symbol>,
        details: BreakingChangeDetails,
    ) {
        let mut change = BreakingChange::new(kind, old_type, old).with_details(details);
        change.new_symbol = new;
        self.emit(change);
    }

    pub(crate) fn anomaly(&mut self, anomaly: Anomaly) {
        tracing::warn!(%anomaly, "diff cut short");
        self.anomalies.push(anomaly);
    }

    fn finish(self) -> Report {
        let exclusions = &self.options.exclusions;
        let v1 = self.v1;
        let changes = self
            .changes
            .into_iter()
            .map(|change| {
                let excluded = exclusions.is_excluded(v1, &change);
                (change, excluded)
            })
            .collect();
        Report::new(changes, self.anomalies)
    }
}
