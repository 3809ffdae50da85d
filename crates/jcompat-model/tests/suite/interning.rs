use jcompat_model::{ApiBuilder, ExecutableDecl, FieldDecl, TypeDecl, TypeRef};

use pretty_assertions::assert_eq;

fn list_of(name: &str) -> TypeRef {
    TypeRef::class("java.util.List", vec![TypeRef::named(name)])
}

fn snapshot_with_two_uses() -> jcompat_model::ApiSnapshot {
    ApiBuilder::new()
        .with_type(
            TypeDecl::class("pkg.A")
                .with_field(FieldDecl::new("xs", list_of("pkg.B")))
                .with_method(ExecutableDecl::method("ys", list_of("pkg.B"))),
        )
        .unwrap()
        .build()
}

#[test]
fn identical_structures_share_one_instance_per_snapshot() {
    let snapshot = snapshot_with_two_uses();
    let decl = snapshot.type_by_name("pkg.A").unwrap();
    let field_ty = &decl.fields[0].ty;
    let return_ty = &decl.methods[0].return_type;
    assert!(field_ty.ptr_eq(return_ty));
    assert!(snapshot.interned(&list_of("pkg.B")).unwrap().ptr_eq(field_ty));
}

#[test]
fn snapshots_never_share_references() {
    let first = snapshot_with_two_uses();
    let second = snapshot_with_two_uses();
    let a = &first.type_by_name("pkg.A").unwrap().fields[0].ty;
    let b = &second.type_by_name("pkg.A").unwrap().fields[0].ty;
    assert_eq!(a, b);
    assert!(!a.ptr_eq(b));
}
