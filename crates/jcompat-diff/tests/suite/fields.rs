use jcompat_diff::{BreakingChangeDetails, BreakingChangeKind};
use jcompat_model::{FieldDecl, Modifiers, PrimitiveType, TypeDecl, TypeRef, Visibility};

use pretty_assertions::assert_eq;

use super::{changes, compare, kinds};

fn holder(field: FieldDecl) -> Vec<TypeDecl> {
    vec![TypeDecl::class("pkg.A")
        .with_default_constructor()
        .with_field(field)]
}

fn int() -> TypeRef {
    TypeRef::primitive(PrimitiveType::Int)
}

#[test]
fn boxing_a_field_changes_only_its_erasure() {
    let report = compare(
        holder(FieldDecl::new("f", int())),
        holder(FieldDecl::new("f", TypeRef::named("java.lang.Integer"))),
    );
    assert_eq!(
        changes(&report),
        vec![("pkg.A.f".to_string(), BreakingChangeKind::FIELD_TYPE_ERASURE_CHANGED)]
    );
    assert_eq!(
        report.breaking_changes()[0].details,
        BreakingChangeDetails::FieldTypeChanged {
            previous: int(),
            new: TypeRef::named("java.lang.Integer"),
        }
    );
}

#[test]
fn widening_a_field_breaks_readers() {
    let report = compare(
        holder(FieldDecl::new("f", int())),
        holder(FieldDecl::new("f", TypeRef::primitive(PrimitiveType::Long))),
    );
    assert_eq!(
        kinds(&report),
        vec![
            BreakingChangeKind::FIELD_TYPE_ERASURE_CHANGED,
            BreakingChangeKind::FIELD_TYPE_CHANGED_INCOMPATIBLE,
        ]
    );
}

#[test]
fn narrowing_a_final_field_only_changes_its_erasure() {
    let report = compare(
        holder(FieldDecl::new("f", TypeRef::object()).with_modifiers(Modifiers::FINAL)),
        holder(
            FieldDecl::new("f", TypeRef::named("java.lang.String")).with_modifiers(Modifiers::FINAL),
        ),
    );
    assert_eq!(kinds(&report), vec![BreakingChangeKind::FIELD_TYPE_ERASURE_CHANGED]);

    // Writers of a non-final field can no longer store arbitrary objects.
    let report = compare(
        holder(FieldDecl::new("f", TypeRef::object())),
        holder(FieldDecl::new("f", TypeRef::named("java.lang.String"))),
    );
    assert_eq!(
        kinds(&report),
        vec![
            BreakingChangeKind::FIELD_TYPE_ERASURE_CHANGED,
            BreakingChangeKind::FIELD_TYPE_CHANGED_INCOMPATIBLE,
        ]
    );
}

#[test]
fn boxing_a_final_field_changes_only_its_erasure() {
    let report = compare(
        holder(FieldDecl::new("f", int()).with_modifiers(Modifiers::FINAL)),
        holder(
            FieldDecl::new("f", TypeRef::named("java.lang.Integer")).with_modifiers(Modifiers::FINAL),
        ),
    );
    assert_eq!(
        changes(&report),
        vec![("pkg.A.f".to_string(), BreakingChangeKind::FIELD_TYPE_ERASURE_CHANGED)]
    );
}

#[test]
fn constants_are_inlined_so_their_erasure_does_not_matter() {
    let report = compare(
        holder(
            FieldDecl::new("MAX", int())
                .with_modifiers(Modifiers::FINAL | Modifiers::STATIC)
                .with_constant("10"),
        ),
        holder(
            FieldDecl::new("MAX", TypeRef::named("java.lang.Integer"))
                .with_modifiers(Modifiers::FINAL | Modifiers::STATIC),
        ),
    );
    assert!(report.is_empty(), "{report}");
}

#[test]
fn field_modifier_changes() {
    let before = vec![TypeDecl::class("pkg.A")
        .with_default_constructor()
        .with_field(FieldDecl::new("a", int()))
        .with_field(FieldDecl::new("b", int()))
        .with_field(FieldDecl::new("c", int()).with_modifiers(Modifiers::STATIC))
        .with_field(FieldDecl::new("d", int()))
        .with_field(FieldDecl::new("e", int()))];
    let after = vec![TypeDecl::class("pkg.A")
        .with_default_constructor()
        .with_field(FieldDecl::new("a", int()).with_modifiers(Modifiers::FINAL))
        .with_field(FieldDecl::new("b", int()).with_modifiers(Modifiers::STATIC))
        .with_field(FieldDecl::new("c", int()))
        .with_field(FieldDecl::new("d", int()).with_visibility(Visibility::Protected))];

    let report = compare(before, after);
    assert_eq!(
        changes(&report),
        vec![
            ("pkg.A.a".to_string(), BreakingChangeKind::FIELD_NOW_FINAL),
            ("pkg.A.b".to_string(), BreakingChangeKind::FIELD_NOW_STATIC),
            ("pkg.A.c".to_string(), BreakingChangeKind::FIELD_NO_LONGER_STATIC),
            ("pkg.A.d".to_string(), BreakingChangeKind::FIELD_NOW_PROTECTED),
            ("pkg.A.e".to_string(), BreakingChangeKind::FIELD_REMOVED),
        ]
    );
}

#[test]
fn protected_to_public_is_compatible() {
    let report = compare(
        holder(FieldDecl::new("f", int()).with_visibility(Visibility::Protected)),
        holder(FieldDecl::new("f", int())),
    );
    assert!(report.is_empty(), "{report}");
}
