use jcompat_api::{Api, Scope};
use jcompat_model::{
    ApiBuilder, ApiSnapshot, ExecutableDecl, FormalTypeParameter, PrimitiveType, TypeDecl,
    TypeRef,
};

fn prim(p: PrimitiveType) -> TypeRef {
    TypeRef::primitive(p)
}

#[test]
fn primitive_widening_and_narrowing() {
    let api = Api::new(ApiSnapshot::empty());
    let scope = Scope::empty();

    assert!(api.is_assignable(scope, &prim(PrimitiveType::Byte), &prim(PrimitiveType::Int)));
    assert!(api.is_assignable(scope, &prim(PrimitiveType::Int), &prim(PrimitiveType::Double)));
    assert!(!api.is_assignable(scope, &prim(PrimitiveType::Double), &prim(PrimitiveType::Float)));
    assert!(!api.is_assignable(scope, &prim(PrimitiveType::Boolean), &prim(PrimitiveType::Int)));
}

#[test]
fn unboxing_allows_widening_afterwards() {
    let api = Api::new(ApiSnapshot::empty());
    let scope = Scope::empty();
    let short = TypeRef::named("java.lang.Short");

    assert!(api.is_assignable(scope, &short, &prim(PrimitiveType::Short)));
    assert!(api.is_assignable(scope, &short, &prim(PrimitiveType::Float)));
    assert!(!api.is_assignable(scope, &short, &prim(PrimitiveType::Byte)));
    assert!(!api.is_assignable(scope, &TypeRef::named("java.lang.String"), &prim(PrimitiveType::Int)));
}

#[test]
fn raw_types_convert_unchecked() {
    let api = Api::new(ApiSnapshot::empty());
    let scope = Scope::empty();
    let raw = TypeRef::named("java.util.ArrayList");
    let strings = TypeRef::class("java.util.List", vec![TypeRef::named("java.lang.String")]);

    assert!(api.is_assignable(scope, &raw, &strings));
    assert!(!api.is_subtype(scope, &raw, &strings));
    assert!(!api.is_assignable(
        scope,
        &TypeRef::class("java.util.List", vec![TypeRef::object()]),
        &strings
    ));
}

#[test]
fn type_parameters_assign_through_their_bound() {
    let api = Api::new(
        ApiBuilder::new()
            .with_type(
                TypeDecl::class("pkg.A")
                    .with_type_param(FormalTypeParameter::new(
                        "N",
                        vec![TypeRef::named("java.lang.Integer")],
                    ))
                    .with_method(ExecutableDecl::method("m", TypeRef::type_param("N"))),
            )
            .unwrap()
            .build(),
    );
    let a = api.find_type("pkg.A").unwrap();
    let scope = Scope::of_type(a);
    let n = TypeRef::type_param("N");

    assert!(api.is_assignable(scope, &n, &TypeRef::named("java.lang.Number")));
    assert!(api.is_assignable(scope, &n, &prim(PrimitiveType::Long)));
    assert!(api.is_assignable(scope, &n, &n));
    assert!(!api.is_assignable(scope, &TypeRef::named("java.lang.Integer"), &n));
}
