use jcompat_diff::{BreakingChangeDetails, BreakingChangeKind};
use jcompat_model::{
    Annotation, AnnotationElementDecl, ElementType, PrimitiveType, TypeDecl, TypeRef, REPEATABLE,
};

use pretty_assertions::assert_eq;

use super::{changes, compare, kinds};

fn string() -> TypeRef {
    TypeRef::named("java.lang.String")
}

#[test]
fn annotation_type_changes() {
    let before = vec![TypeDecl::annotation("pkg.Tag")
        .with_targets([ElementType::Type, ElementType::Method])
        .with_annotation(Annotation::new(REPEATABLE).with_value("value", "pkg.Tags"))
        .with_element(AnnotationElementDecl::new("value", string()).with_default("\"\""))
        .with_element(AnnotationElementDecl::new(
            "weight",
            TypeRef::primitive(PrimitiveType::Int),
        ))];
    let after = vec![TypeDecl::annotation("pkg.Tag")
        .with_targets([ElementType::Type])
        .with_element(AnnotationElementDecl::new("value", string()))
        .with_element(AnnotationElementDecl::new(
            "weight",
            TypeRef::primitive(PrimitiveType::Long),
        ))
        .with_element(AnnotationElementDecl::new("owner", string()))];

    let report = compare(before, after);
    assert_eq!(
        kinds(&report),
        vec![
            BreakingChangeKind::METHOD_RETURN_TYPE_CHANGED,
            BreakingChangeKind::ANNOTATION_TARGET_REMOVED,
            BreakingChangeKind::ANNOTATION_METHOD_NO_LONGER_DEFAULT,
            BreakingChangeKind::ANNOTATION_METHOD_ADDED_WITHOUT_DEFAULT,
            BreakingChangeKind::ANNOTATION_NO_LONGER_REPEATABLE,
        ]
    );

    let target = report
        .breaking_changes()
        .into_iter()
        .find(|c| c.kind == BreakingChangeKind::ANNOTATION_TARGET_REMOVED)
        .unwrap();
    assert_eq!(
        target.details,
        BreakingChangeDetails::AnnotationTargetRemoved {
            target: ElementType::Method,
        }
    );
}

#[test]
fn removed_elements_and_optional_additions() {
    let before = vec![TypeDecl::annotation("pkg.Tag")
        .with_element(AnnotationElementDecl::new("value", string()))
        .with_element(AnnotationElementDecl::new("gone", string()))];
    let after = vec![TypeDecl::annotation("pkg.Tag")
        .with_element(AnnotationElementDecl::new("value", string()))
        .with_element(AnnotationElementDecl::new("extra", string()).with_default("\"\""))];

    let report = compare(before, after);
    assert_eq!(
        changes(&report),
        vec![("pkg.Tag.gone()".to_string(), BreakingChangeKind::METHOD_REMOVED)]
    );
}
