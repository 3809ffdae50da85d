use jcompat_diff::{AnnotationExclusion, BreakingChangeKind, DiffOptions, ExclusionOptions};
use jcompat_model::{Annotation, ExecutableDecl, TypeDecl, TypeRef};

use pretty_assertions::assert_eq;

use super::{changes, compare_with};

#[test]
fn name_patterns_hide_matching_changes() {
    let before = vec![
        TypeDecl::class("pkg.api.Client").with_default_constructor(),
        TypeDecl::class("pkg.internal.Impl").with_default_constructor(),
    ];
    let options = DiffOptions::default()
        .with_exclusions(ExclusionOptions::from_patterns(["pkg\\.internal\\..*"]));

    let report = compare_with(before, Vec::new(), options);
    assert_eq!(report.all_breaking_changes().len(), 2);
    assert_eq!(
        changes(&report),
        vec![("pkg.api.Client".to_string(), BreakingChangeKind::TYPE_REMOVED)]
    );
    assert_eq!(report.excluded_changes()[0].impacted_type, "pkg.internal.Impl");
}

#[test]
fn annotated_members_and_their_types_are_excluded() {
    let beta = || Annotation::new("pkg.Beta");
    let before = vec![
        TypeDecl::class("pkg.A")
            .with_default_constructor()
            .with_method(ExecutableDecl::method("stable", TypeRef::void()))
            .with_method(ExecutableDecl::method("preview", TypeRef::void()).with_annotation(beta())),
        TypeDecl::class("pkg.Experimental")
            .with_annotation(beta())
            .with_default_constructor()
            .with_method(ExecutableDecl::method("run", TypeRef::void())),
    ];
    let after = vec![
        TypeDecl::class("pkg.A").with_default_constructor(),
        TypeDecl::class("pkg.Experimental").with_default_constructor(),
    ];
    let options = DiffOptions::default().with_exclusions(
        ExclusionOptions::none().exclude_annotation(AnnotationExclusion::new("pkg.Beta")),
    );

    let report = compare_with(before, after, options);
    assert_eq!(
        changes(&report),
        vec![("pkg.A.stable()".to_string(), BreakingChangeKind::METHOD_REMOVED)]
    );

    let mut excluded: Vec<&str> = report
        .excluded_changes()
        .into_iter()
        .map(|c| c.impacted_symbol.qualified_name.as_str())
        .collect();
    excluded.sort();
    assert_eq!(excluded, vec!["pkg.A.preview()", "pkg.Experimental.run()"]);
}

#[test]
fn required_values_narrow_annotation_exclusions() {
    let before = vec![TypeDecl::class("pkg.A")
        .with_default_constructor()
        .with_method(
            ExecutableDecl::method("old", TypeRef::void())
                .with_annotation(Annotation::new("pkg.Since").with_value("value", "1.0")),
        )
        .with_method(
            ExecutableDecl::method("fresh", TypeRef::void())
                .with_annotation(Annotation::new("pkg.Since").with_value("value", "2.0")),
        )];
    let after = vec![TypeDecl::class("pkg.A").with_default_constructor()];
    let options = DiffOptions::default().with_exclusions(
        ExclusionOptions::none()
            .exclude_annotation(AnnotationExclusion::new("pkg.Since").with_value("value", "2.0")),
    );

    let report = compare_with(before, after, options);
    assert_eq!(
        changes(&report),
        vec![("pkg.A.old()".to_string(), BreakingChangeKind::METHOD_REMOVED)]
    );
}
