use jcompat_config::{ConfigWarning, JcompatConfig};

use pretty_assertions::assert_eq;

#[test]
fn reports_unknown_keys_with_full_paths() {
    let text = r#"
typo = 1

[diff]
max_steps = 5

[[exclusions.annotations]]
name = "com.acme.Beta"
valeus = { since = "2.0" }
"#;

    let (_config, diagnostics) = JcompatConfig::load_from_str_with_diagnostics(text).unwrap();
    assert_eq!(
        diagnostics.unknown_keys,
        vec!["diff.max_steps", "exclusions.annotations[0].valeus", "typo"]
    );
}

#[test]
fn clean_configs_have_no_diagnostics() {
    let text = r#"
[exclusions]
symbols = ["com\\.acme\\..*"]

[logging]
level = "info,jcompat_diff=trace"
"#;
    let (_config, diagnostics) = JcompatConfig::load_from_str_with_diagnostics(text).unwrap();
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn warns_about_values_that_will_be_ignored() {
    let text = r#"
[exclusions]
symbols = ["ok\\..*", "(unclosed"]

[[exclusions.annotations]]
name = "  "

[diff]
max_propagation_steps = 0
"#;
    let (config, diagnostics) = JcompatConfig::load_from_str_with_diagnostics(text).unwrap();
    assert!(diagnostics.unknown_keys.is_empty());

    let warnings = &diagnostics.warnings;
    assert_eq!(warnings.len(), 3, "{warnings:?}");
    assert!(matches!(
        &warnings[0],
        ConfigWarning::InvalidExclusionPattern { pattern, .. } if pattern == "(unclosed"
    ));
    assert_eq!(warnings[1], ConfigWarning::EmptyAnnotationExclusion { index: 0 });
    assert!(matches!(
        &warnings[2],
        ConfigWarning::InvalidValue { toml_path, .. } if toml_path == "diff.max_propagation_steps"
    ));

    // The broken pattern is dropped; the valid one still applies.
    let options = config.exclusion_options();
    assert_eq!(options.name_patterns.len(), 1);
    assert!(options.matches_name("ok.Type"));
}
