use jcompat_api::{Api, Scope};
use jcompat_model::{
    ApiBuilder, ApiSnapshot, ExecutableDecl, FormalTypeParameter, PrimitiveType, TypeDecl,
    TypeRef,
};

use pretty_assertions::assert_eq;

fn jdk_only() -> Api {
    Api::new(ApiSnapshot::empty())
}

fn named(name: &str) -> TypeRef {
    TypeRef::named(name)
}

fn generic(name: &str, args: Vec<TypeRef>) -> TypeRef {
    TypeRef::class(name, args)
}

#[test]
fn generic_supertypes_are_instantiated() {
    let api = jdk_only();
    let list = generic("java.util.ArrayList", vec![named("java.lang.String")]);
    let supers: Vec<String> = api
        .instantiated_super_types(&list)
        .iter()
        .map(|r| r.to_string())
        .collect();
    assert!(supers.contains(&"java.util.List<java.lang.String>".to_string()));
    assert!(supers.contains(&"java.lang.Iterable<java.lang.String>".to_string()));
    assert!(supers.contains(&"java.lang.Object".to_string()));
}

#[test]
fn parameterized_types_are_invariant() {
    let api = jdk_only();
    let scope = Scope::empty();
    let strings = generic("java.util.List", vec![named("java.lang.String")]);
    let objects = generic("java.util.List", vec![TypeRef::object()]);

    assert!(api.is_subtype(
        scope,
        &generic("java.util.ArrayList", vec![named("java.lang.String")]),
        &strings
    ));
    assert!(!api.is_subtype(scope, &strings, &objects));
    assert!(!api.is_subtype(scope, &objects, &strings));
}

#[test]
fn wildcards_contain_their_bounds() {
    let api = jdk_only();
    let scope = Scope::empty();
    let strings = generic("java.util.List", vec![named("java.lang.String")]);
    let objects = generic("java.util.List", vec![TypeRef::object()]);

    let extends_seq = generic(
        "java.util.List",
        vec![TypeRef::wildcard_extends(named("java.lang.CharSequence"))],
    );
    let super_string = generic(
        "java.util.Collection",
        vec![TypeRef::wildcard_super(named("java.lang.String"))],
    );
    let any = generic("java.util.Collection", vec![TypeRef::unbounded_wildcard()]);

    assert!(api.is_subtype(scope, &strings, &extends_seq));
    assert!(!api.is_subtype(scope, &objects, &extends_seq));
    assert!(api.is_subtype(scope, &objects, &super_string));
    assert!(api.is_subtype(scope, &strings, &super_string));
    assert!(api.is_subtype(scope, &extends_seq, &any));
    assert!(!api.is_subtype(scope, &any, &extends_seq));
}

#[test]
fn raw_types_accept_any_parameterization() {
    let api = jdk_only();
    let scope = Scope::empty();
    let raw = named("java.util.Collection");
    let strings = generic("java.util.ArrayList", vec![named("java.lang.String")]);

    assert!(api.is_subtype(scope, &strings, &raw));
    assert!(!api.is_subtype(
        scope,
        &named("java.util.ArrayList"),
        &generic("java.util.Collection", vec![named("java.lang.String")])
    ));
}

#[test]
fn arrays_are_covariant_for_references_only() {
    let api = jdk_only();
    let scope = Scope::empty();
    let int = TypeRef::primitive(PrimitiveType::Int);
    let long = TypeRef::primitive(PrimitiveType::Long);

    assert!(api.is_subtype(
        scope,
        &TypeRef::array(named("java.lang.String"), 1),
        &TypeRef::array(TypeRef::object(), 1)
    ));
    assert!(!api.is_subtype(scope, &TypeRef::array(int.clone(), 1), &TypeRef::array(long, 1)));
    assert!(api.is_subtype(scope, &TypeRef::array(int.clone(), 1), &named("java.lang.Cloneable")));
    assert!(api.is_subtype(
        scope,
        &TypeRef::array(int.clone(), 2),
        &TypeRef::array(TypeRef::object(), 1)
    ));
    assert!(!api.is_subtype(scope, &int, &TypeRef::object()));
}

#[test]
fn type_parameters_expand_to_their_bounds() {
    let api = Api::new(
        ApiBuilder::new()
            .with_type(
                TypeDecl::class("pkg.A")
                    .with_default_constructor()
                    .with_method(
                        ExecutableDecl::method("m", TypeRef::type_param("T")).with_type_param(
                            FormalTypeParameter::new(
                                "T",
                                vec![
                                    named("java.lang.Number"),
                                    generic("java.lang.Comparable", vec![TypeRef::type_param("T")]),
                                ],
                            ),
                        ),
                    ),
            )
            .unwrap()
            .build(),
    );
    let a = api.find_type("pkg.A").unwrap();
    let scope = api.scope_of(&a.methods[0]);
    let t = TypeRef::type_param("T");

    assert!(api.is_subtype(scope, &t, &named("java.lang.Number")));
    assert!(api.is_subtype(scope, &t, &named("java.io.Serializable")));
    assert!(!api.is_subtype(scope, &t, &named("java.lang.Integer")));
    assert_eq!(api.erasure(scope, &t), named("java.lang.Number"));
}

#[test]
fn checked_exceptions_follow_the_throwable_hierarchy() {
    let api = jdk_only();
    let check = |name: &str| api.is_checked_exception(api.find_type(name).unwrap());

    assert!(check("java.io.IOException"));
    assert!(check("java.lang.Exception"));
    assert!(!check("java.lang.IllegalArgumentException"));
    assert!(!check("java.lang.Error"));
    assert!(!check("java.lang.String"));
}
