//! `jcompat.toml` configuration and logging setup.
//!
//! ```toml
//! [exclusions]
//! symbols = ["com\\.acme\\.internal\\..*"]
//!
//! [[exclusions.annotations]]
//! name = "com.acme.Beta"
//! values = { since = "2.0" }
//!
//! [diff]
//! max_propagation_steps = 10000
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jcompat_diff::{AnnotationExclusion, DiffOptions, ExclusionOptions, DEFAULT_MAX_PROPAGATION_STEPS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod diagnostics;
mod logging;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning};
pub use logging::{init_tracing, LoggingConfig};

/// File name looked up by [`discover_config_path`].
pub const CONFIG_FILE_NAME: &str = "jcompat.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` quotes the offending input; keep only the message and position.
        let message = redact_quoted(err.message());
        match err.span() {
            Some(span) => ConfigError::Toml(format!("{message} (at byte {})", span.start)),
            None => ConfigError::Toml(message),
        }
    }
}

/// Replaces quoted values in a parser message, which may echo config contents.
fn redact_quoted(message: &str) -> String {
    static QUOTED: OnceLock<Option<regex::Regex>> = OnceLock::new();
    let quoted = QUOTED.get_or_init(|| {
        regex::Regex::new(r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'"#).ok()
    });
    match quoted {
        Some(re) => re.replace_all(message, "\"<redacted>\"").into_owned(),
        None => message.to_owned(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JcompatConfig {
    pub exclusions: ExclusionConfig,
    pub diff: DiffConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// Regular expressions matched against whole qualified symbol names.
    pub symbols: Vec<String>,
    pub annotations: Vec<AnnotationExclusionConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationExclusionConfig {
    /// Qualified name of the annotation type.
    pub name: String,
    /// Element values the annotation must carry, compared as written in the model.
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub max_propagation_steps: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_propagation_steps: DEFAULT_MAX_PROPAGATION_STEPS,
        }
    }
}

impl JcompatConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = read(path.as_ref())?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Like [`JcompatConfig::load_from_path`], also reporting unknown keys and values that
    /// will be ignored.
    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let text = read(path.as_ref())?;
        Self::load_from_str_with_diagnostics(&text)
    }

    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<JcompatConfig>(text)?;
        let diagnostics = ConfigDiagnostics {
            unknown_keys,
            warnings: config.validate(),
        };
        Ok((config, diagnostics))
    }

    /// Problems that do not prevent loading but change what the config does.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        for pattern in &self.exclusions.symbols {
            if let Err(err) = regex::Regex::new(&format!("^(?:{pattern})$")) {
                warnings.push(ConfigWarning::InvalidExclusionPattern {
                    pattern: pattern.clone(),
                    message: err.to_string(),
                });
            }
        }
        for (index, exclusion) in self.exclusions.annotations.iter().enumerate() {
            if exclusion.name.trim().is_empty() {
                warnings.push(ConfigWarning::EmptyAnnotationExclusion { index });
            }
        }
        if self.diff.max_propagation_steps == 0 {
            warnings.push(ConfigWarning::InvalidValue {
                toml_path: "diff.max_propagation_steps".to_owned(),
                message: "0 disables propagation of new abstract methods to subtypes".to_owned(),
            });
        }
        if !self.logging.level_is_valid() {
            warnings.push(ConfigWarning::InvalidValue {
                toml_path: "logging.level".to_owned(),
                message: format!("`{}` is not a valid filter; using `info`", self.logging.level),
            });
        }
        warnings
    }

    pub fn exclusion_options(&self) -> ExclusionOptions {
        let mut options = ExclusionOptions::from_patterns(&self.exclusions.symbols);
        for exclusion in &self.exclusions.annotations {
            let mut converted = AnnotationExclusion::new(exclusion.name.trim());
            for (element, value) in &exclusion.values {
                converted = converted.with_value(element, value);
            }
            options = options.exclude_annotation(converted);
        }
        options
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions::default()
            .with_exclusions(self.exclusion_options())
            .with_max_propagation_steps(self.diff.max_propagation_steps)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// `jcompat.toml` in `root`, if present.
pub fn discover_config_path(root: &Path) -> Option<PathBuf> {
    let candidate = root.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Loads the config of `root`, or the defaults when it has none.
pub fn load_for_root(root: &Path) -> Result<JcompatConfig, ConfigError> {
    match discover_config_path(root) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            JcompatConfig::load_from_path(path)
        }
        None => Ok(JcompatConfig::default()),
    }
}
