use jcompat_diff::{BreakingChangeKind, DiffOptions, DEFAULT_MAX_PROPAGATION_STEPS};
use jcompat_model::{
    ExecutableDecl, FieldDecl, PrimitiveType, SourceLocation, TypeDecl, TypeRef,
};

use pretty_assertions::assert_eq;

use super::{compare, compare_with};

#[test]
fn changes_are_sorted_by_impacted_type() {
    let report = compare(
        vec![
            TypeDecl::class("pkg.Zeta").with_default_constructor(),
            TypeDecl::class("pkg.Alpha").with_default_constructor(),
            TypeDecl::class("pkg.Mid").with_default_constructor(),
        ],
        Vec::new(),
    );
    assert_eq!(report.impacted_types(), vec!["pkg.Alpha", "pkg.Mid", "pkg.Zeta"]);
    assert!(report.is_binary_breaking());
    assert!(report.is_source_breaking());
}

#[test]
fn json_report_lists_changes_and_flags() {
    let report = compare(vec![TypeDecl::class("pkg.Gone").with_default_constructor()], Vec::new());
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["binary_breaking"], true);
    assert_eq!(json["source_breaking"], true);
    let changes = json["breaking_changes"].as_array().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0]["kind"], "TYPE_REMOVED");
    assert_eq!(changes[0]["impacted_type"], "pkg.Gone");
    assert_eq!(changes[0]["impacted_symbol"]["kind"], "type");
    assert!(json.get("excluded").is_none());
    assert!(json.get("anomalies").is_none());
}

#[test]
fn source_only_changes_are_not_binary_breaking() {
    let report = compare(
        vec![TypeDecl::interface("pkg.I")],
        vec![TypeDecl::interface("pkg.I").with_method(ExecutableDecl::method("m", TypeRef::void()))],
    );
    assert_eq!(
        report.breaking_changes()[0].kind,
        BreakingChangeKind::METHOD_ADDED_TO_INTERFACE
    );
    assert!(!report.is_binary_breaking());
    assert!(report.is_source_breaking());
}

#[test]
fn default_options() {
    let options = DiffOptions::default();
    assert_eq!(options.max_propagation_steps, DEFAULT_MAX_PROPAGATION_STEPS);
    assert!(options.exclusions.is_empty());

    let report = compare_with(Vec::new(), Vec::new(), options);
    assert!(report.is_empty());
    assert!(report.anomalies().is_empty());
}

#[test]
fn display_includes_details_and_locations() {
    let holder = |ty: PrimitiveType| {
        vec![TypeDecl::class("pkg.A")
            .with_default_constructor()
            .with_field(
                FieldDecl::new("f", TypeRef::primitive(ty)).at(SourceLocation::new("A.java", 3)),
            )]
    };
    let report = compare(holder(PrimitiveType::Int), holder(PrimitiveType::Long));
    assert_eq!(
        report.to_string(),
        "FIELD_TYPE_ERASURE_CHANGED pkg.A.f [int -> long] at A.java:3\n\
         FIELD_TYPE_CHANGED_INCOMPATIBLE pkg.A.f [int -> long] at A.java:3\n"
    );

    let read = || ExecutableDecl::method("read", TypeRef::void());
    let report = compare(
        vec![TypeDecl::class("pkg.A")
            .with_default_constructor()
            .with_method(read())],
        vec![TypeDecl::class("pkg.A")
            .with_default_constructor()
            .with_method(read().throws(TypeRef::named("java.io.IOException")))],
    );
    assert_eq!(
        report.to_string(),
        "METHOD_NOW_THROWS_CHECKED_EXCEPTION pkg.A.read() [throws java.io.IOException] \
         (no source location)\n"
    );
}

#[test]
fn markdown_report_is_a_table() {
    let report = compare(
        vec![
            TypeDecl::class("pkg.Gone")
                .with_default_constructor()
                .at(SourceLocation::new("Gone.java", 1)),
            TypeDecl::interface("pkg.I"),
        ],
        vec![TypeDecl::interface("pkg.I")
            .with_method(ExecutableDecl::method("m", TypeRef::void()))],
    );
    assert_eq!(
        report.to_markdown(),
        "## Breaking changes\n\
         \n\
         2 breaking changes detected.\n\
         \n\
         | Type | Symbol | Kind | Nature | Location |\n\
         |------|--------|------|--------|----------|\n\
         | pkg.Gone | pkg.Gone | TYPE_REMOVED | DELETION | Gone.java:1 |\n\
         | pkg.I | pkg.I | METHOD_ADDED_TO_INTERFACE | ADDITION | No location |\n"
    );

    assert_eq!(
        compare(Vec::new(), Vec::new()).to_markdown(),
        "## Breaking changes\n\nNo breaking changes detected.\n"
    );
}
