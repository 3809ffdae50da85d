use std::fmt;

use serde::{Deserialize, Serialize};

use crate::change::BreakingChange;

/// Something the diff had to cut short. The report is still usable but may be incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Anomaly {
    /// Abstract-method propagation from `root` stopped after `steps` subtypes.
    PropagationLimit { root: String, steps: usize },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::PropagationLimit { root, steps } => {
                write!(f, "propagation from {root} stopped after {steps} steps")
            }
        }
    }
}

/// Outcome of one comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    all: Vec<BreakingChange>,
    excluded: Vec<bool>,
    anomalies: Vec<Anomaly>,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    binary_breaking: bool,
    source_breaking: bool,
    breaking_changes: Vec<&'a BreakingChange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    excluded: Vec<&'a BreakingChange>,
    #[serde(skip_serializing_if = "<[Anomaly]>::is_empty")]
    anomalies: &'a [Anomaly],
}

impl Report {
    /// Each change comes paired with whether it is excluded.
    pub(crate) fn new(
        mut changes: Vec<(BreakingChange, bool)>,
        anomalies: Vec<Anomaly>,
    ) -> Self {
        changes.sort_by(|(a, _), (b, _)| {
            a.impacted_type
                .cmp(&b.impacted_type)
                .then_with(|| a.impacted_symbol.qualified_name.cmp(&b.impacted_symbol.qualified_name))
                .then_with(|| a.kind.cmp(&b.kind))
                .then_with(|| a.location.cmp(&b.location))
                .then_with(|| a.position.cmp(&b.position))
        });
        changes.dedup_by(|(a, _), (b, _)| a == b);
        let (all, excluded) = changes.into_iter().unzip();
        Self {
            all,
            excluded,
            anomalies,
        }
    }

    /// Every detected change, exclusions ignored.
    pub fn all_breaking_changes(&self) -> &[BreakingChange] {
        &self.all
    }

    /// Detected changes minus excluded ones.
    pub fn breaking_changes(&self) -> Vec<&BreakingChange> {
        self.all
            .iter()
            .zip(&self.excluded)
            .filter(|(_, excluded)| !**excluded)
            .map(|(change, _)| change)
            .collect()
    }

    pub fn excluded_changes(&self) -> Vec<&BreakingChange> {
        self.all
            .iter()
            .zip(&self.excluded)
            .filter(|(_, excluded)| **excluded)
            .map(|(change, _)| change)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.breaking_changes().is_empty()
    }

    pub fn is_binary_breaking(&self) -> bool {
        self.breaking_changes()
            .iter()
            .any(|change| change.is_binary_breaking())
    }

    pub fn is_source_breaking(&self) -> bool {
        self.breaking_changes()
            .iter()
            .any(|change| change.is_source_breaking())
    }

    /// Qualified names of types with at least one non-excluded change, in report order.
    pub fn impacted_types(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for change in self.breaking_changes() {
            if out.last() != Some(&change.impacted_type.as_str()) {
                out.push(&change.impacted_type);
            }
        }
        out
    }

    /// Non-excluded changes impacting `qualified_name`.
    pub fn changes_for(&self, qualified_name: &str) -> Vec<&BreakingChange> {
        self.breaking_changes()
            .into_iter()
            .filter(|change| change.impacted_type == qualified_name)
            .collect()
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Pretty-printed JSON with the non-excluded changes, the excluded ones, and anomalies.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&ReportJson {
            binary_breaking: self.is_binary_breaking(),
            source_breaking: self.is_source_breaking(),
            breaking_changes: self.breaking_changes(),
            excluded: self.excluded_changes(),
            anomalies: &self.anomalies,
        })
    }

    /// A Markdown table of the non-excluded changes, followed by any anomalies.
    pub fn to_markdown(&self) -> String {
        let changes = self.breaking_changes();
        let mut out = String::from("## Breaking changes\n\n");
        if changes.is_empty() {
            out.push_str("No breaking changes detected.\n");
        } else {
            out.push_str(&format!("{} breaking changes detected.\n\n", changes.len()));
            out.push_str("| Type | Symbol | Kind | Nature | Location |\n");
            out.push_str("|------|--------|------|--------|----------|\n");
            for change in changes {
                let location = if change.location.is_unknown() {
                    "No location".to_owned()
                } else {
                    change.location.to_string()
                };
                out.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    md_cell(&change.impacted_type),
                    md_cell(&change.impacted_symbol.qualified_name),
                    change.kind,
                    change.kind.nature(),
                    md_cell(&location),
                ));
            }
        }
        if !self.anomalies.is_empty() {
            out.push('\n');
            for anomaly in &self.anomalies {
                out.push_str(&format!("> warning: {anomaly}\n"));
            }
        }
        out
    }
}

/// Escapes pipes so generic signatures and paths stay inside their cell.
fn md_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in self.breaking_changes() {
            writeln!(f, "{change}")?;
        }
        for anomaly in &self.anomalies {
            writeln!(f, "warning: {anomaly}")?;
        }
        Ok(())
    }
}
