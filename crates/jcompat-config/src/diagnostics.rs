use serde::de::DeserializeOwned;

/// Non-fatal findings from loading a config. The config is still usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    /// Keys the schema does not know, as full dotted paths (`diff.max_steps`).
    pub unknown_keys: Vec<String>,
    pub warnings: Vec<ConfigWarning>,
}

impl ConfigDiagnostics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unknown_keys.is_empty() && self.warnings.is_empty()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The pattern does not compile and will be ignored.
    InvalidExclusionPattern { pattern: String, message: String },
    /// An annotation exclusion with an empty annotation name matches nothing.
    EmptyAnnotationExclusion { index: usize },
    InvalidValue { toml_path: String, message: String },
}

pub(crate) fn deserialize_toml_with_unknown_keys<T: DeserializeOwned>(
    text: &str,
) -> Result<(T, Vec<String>), toml::de::Error> {
    let mut unknown = Vec::new();
    let deserializer = toml::de::Deserializer::new(text);
    let value = serde_ignored::deserialize(deserializer, |path| {
        unknown.push(normalize_path(&path.to_string()));
    })?;
    unknown.sort();
    unknown.dedup();
    Ok((value, unknown))
}

/// `serde_ignored` renders paths with a leading `.` and sequence indices as `.0`; TOML users
/// expect `a[0].b`.
fn normalize_path(raw: &str) -> String {
    raw.trim_start_matches('.')
        .split('.')
        .enumerate()
        .fold(String::new(), |mut out, (idx, segment)| {
            if idx > 0 && !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                out.push('[');
                out.push_str(segment);
                out.push(']');
                return out;
            }
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(segment);
            out
        })
}
