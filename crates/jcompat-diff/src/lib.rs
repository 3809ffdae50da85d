//! Breaking-change detection between two versions of a Java library API.
//!
//! [`ApiDiff`] walks every exported type of the old version, pairs it with its counterpart in
//! the new version, and runs the compatibility rules over types, fields, methods,
//! constructors and annotation elements. The result is a [`Report`] that keeps excluded
//! changes apart from the ones clients should hear about.

#![forbid(unsafe_code)]

mod change;
mod diff;
mod exclusion;
mod kind;
mod report;
mod rules;

pub use change::{BreakingChange, BreakingChangeDetails, Symbol, SymbolKind};
pub use diff::{ApiDiff, DiffOptions, DEFAULT_MAX_PROPAGATION_STEPS};
pub use exclusion::{AnnotationExclusion, ExclusionOptions};
pub use kind::{BreakingChangeKind, BreakingChangeNature};
pub use report::{Anomaly, Report};
