use jcompat_api::Api;
use jcompat_model::{
    ApiBuilder, ExecutableDecl, FieldDecl, Modifiers, PrimitiveType, TypeDecl, TypeRef,
    Visibility,
};

use pretty_assertions::assert_eq;

fn int() -> TypeRef {
    TypeRef::primitive(PrimitiveType::Int)
}

/// `Hidden` is package-private; `Shown` extends it publicly and so leaks its members.
fn leaking_api() -> Api {
    Api::new(
        ApiBuilder::new()
            .with_type(
                TypeDecl::class("pkg.Hidden")
                    .with_visibility(Visibility::PackagePrivate)
                    .with_default_constructor()
                    .with_field(FieldDecl::new("count", int()))
                    .with_method(ExecutableDecl::method("size", int()))
                    .with_method(
                        ExecutableDecl::method("hook", TypeRef::void())
                            .with_visibility(Visibility::Protected),
                    )
                    .with_method(
                        ExecutableDecl::method("secret", TypeRef::void())
                            .with_visibility(Visibility::Private),
                    ),
            )
            .unwrap()
            .with_type(
                TypeDecl::class("pkg.Shown")
                    .extends(TypeRef::named("pkg.Hidden"))
                    .with_default_constructor()
                    .with_field(FieldDecl::new("count", TypeRef::named("java.lang.String"))),
            )
            .unwrap()
            .with_type(
                TypeDecl::class("pkg.Sealed")
                    .extends(TypeRef::named("pkg.Hidden"))
                    .with_modifiers(Modifiers::FINAL)
                    .with_default_constructor(),
            )
            .unwrap()
            .build(),
    )
}

#[test]
fn members_of_hidden_supertypes_leak_through_exported_subtypes() {
    let api = leaking_api();
    let hidden = api.find_type("pkg.Hidden").unwrap();
    let shown = api.find_type("pkg.Shown").unwrap();

    assert!(api.exported_methods(hidden).is_empty());

    let mut names: Vec<String> = api
        .exported_methods(shown)
        .iter()
        .map(|m| format!("{}.{}", m.owner, m.name))
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "java.lang.Object.equals",
            "java.lang.Object.hashCode",
            "java.lang.Object.toString",
            "pkg.Hidden.hook",
            "pkg.Hidden.size",
        ]
    );
}

#[test]
fn protected_members_do_not_leak_through_final_types() {
    let api = leaking_api();
    let sealed = api.find_type("pkg.Sealed").unwrap();
    assert!(api.find_method(sealed, "size()").is_some());
    assert!(api.find_method(sealed, "hook()").is_none());
    assert!(api.find_method(sealed, "secret()").is_none());
}

#[test]
fn fields_shadow_by_name() {
    let api = leaking_api();
    let shown = api.find_type("pkg.Shown").unwrap();
    let fields = api.exported_fields(shown);
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].owner, "pkg.Shown");
    assert_eq!(fields[0].ty, TypeRef::named("java.lang.String"));
}

#[test]
fn covariant_returns_override() {
    let api = Api::new(
        ApiBuilder::new()
            .with_type(TypeDecl::interface("pkg.Source").with_method(ExecutableDecl::method(
                "get",
                TypeRef::named("java.lang.CharSequence"),
            )))
            .unwrap()
            .with_type(
                TypeDecl::class("pkg.Impl")
                    .implements(TypeRef::named("pkg.Source"))
                    .with_default_constructor()
                    .with_method(ExecutableDecl::method("get", TypeRef::named("java.lang.String"))),
            )
            .unwrap()
            .with_type(
                TypeDecl::class("pkg.Wrong")
                    .with_default_constructor()
                    .with_method(ExecutableDecl::method("get", TypeRef::named("java.lang.Integer"))),
            )
            .unwrap()
            .build(),
    );
    let source = &api.find_type("pkg.Source").unwrap().methods[0];
    let implementation = &api.find_type("pkg.Impl").unwrap().methods[0];
    let wrong = &api.find_type("pkg.Wrong").unwrap().methods[0];

    assert!(api.is_overriding(implementation, source));
    assert!(!api.is_overriding(source, implementation));
    assert!(!api.is_overriding(wrong, source));

    let impl_decl = api.find_type("pkg.Impl").unwrap();
    assert!(api.methods_to_implement(impl_decl).is_empty());
}

#[test]
fn default_methods_yield_to_concrete_ones() {
    let api = Api::new(
        ApiBuilder::new()
            .with_type(TypeDecl::interface("pkg.I").with_method(
                ExecutableDecl::method("run", TypeRef::void()).with_modifiers(Modifiers::DEFAULT),
            ))
            .unwrap()
            .with_type(
                TypeDecl::class("pkg.Base")
                    .with_default_constructor()
                    .with_method(ExecutableDecl::method("run", TypeRef::void())),
            )
            .unwrap()
            .build(),
    );
    let default = &api.find_type("pkg.I").unwrap().methods[0];
    let concrete = &api.find_type("pkg.Base").unwrap().methods[0];
    assert!(api.is_overriding(concrete, default));
    assert!(!api.is_overriding(default, concrete));
    assert!(!api.is_abstract_method(default));
}

#[test]
fn executables_of_final_types_are_effectively_final() {
    let api = leaking_api();
    let shown = api.find_type("pkg.Shown").unwrap();
    let sealed = api.find_type("pkg.Sealed").unwrap();
    let hidden = api.find_type("pkg.Hidden").unwrap();
    let size = &hidden.methods[0];

    assert!(!api.is_effectively_final_executable(shown, size));
    assert!(api.is_effectively_final_executable(sealed, size));
    assert!(api.is_effectively_final_executable(shown, &shown.constructors()[0]));
}
