use jcompat_diff::{BreakingChangeDetails, BreakingChangeKind};
use jcompat_model::{ExecutableDecl, FormalTypeParameter, Modifiers, TypeDecl, TypeRef, Visibility};

use pretty_assertions::assert_eq;

use super::{changes, compare, kinds};

fn open_class(methods: Vec<ExecutableDecl>) -> Vec<TypeDecl> {
    let mut decl = TypeDecl::class("pkg.A").with_default_constructor();
    for method in methods {
        decl = decl.with_method(method);
    }
    vec![decl]
}

fn final_class(methods: Vec<ExecutableDecl>) -> Vec<TypeDecl> {
    open_class(methods)
        .into_iter()
        .map(|decl| decl.with_modifiers(Modifiers::FINAL))
        .collect()
}

fn void(name: &str) -> ExecutableDecl {
    ExecutableDecl::method(name, TypeRef::void())
}

fn io() -> TypeRef {
    TypeRef::named("java.io.IOException")
}

#[test]
fn removed_methods_are_reported_by_signature() {
    let report = compare(
        open_class(vec![
            void("keep"),
            void("gone").with_param("s", TypeRef::named("java.lang.String")),
        ]),
        open_class(vec![void("keep")]),
    );
    assert_eq!(
        changes(&report),
        vec![(
            "pkg.A.gone(java.lang.String)".to_string(),
            BreakingChangeKind::METHOD_REMOVED
        )]
    );
}

#[test]
fn narrowing_visibility_breaks_but_widening_does_not() {
    let public = || open_class(vec![void("m")]);
    let protected = || open_class(vec![void("m").with_visibility(Visibility::Protected)]);

    assert_eq!(
        kinds(&compare(public(), protected())),
        vec![BreakingChangeKind::METHOD_NOW_PROTECTED]
    );
    assert!(compare(protected(), public()).is_empty());
}

#[test]
fn method_modifier_changes() {
    let report = compare(
        open_class(vec![
            void("a"),
            void("b"),
            void("c").with_modifiers(Modifiers::STATIC),
        ]),
        open_class(vec![
            void("a").with_modifiers(Modifiers::FINAL),
            void("b").with_modifiers(Modifiers::STATIC),
            void("c"),
        ]),
    );
    assert_eq!(
        changes(&report),
        vec![
            ("pkg.A.a()".to_string(), BreakingChangeKind::METHOD_NOW_FINAL),
            ("pkg.A.b()".to_string(), BreakingChangeKind::METHOD_NOW_STATIC),
            ("pkg.A.c()".to_string(), BreakingChangeKind::METHOD_NO_LONGER_STATIC),
        ]
    );
}

#[test]
fn making_a_concrete_method_abstract() {
    let abstract_class = |m: ExecutableDecl| {
        vec![TypeDecl::class("pkg.A")
            .with_modifiers(Modifiers::ABSTRACT)
            .with_default_constructor()
            .with_method(m)]
    };
    let report = compare(
        abstract_class(void("m")),
        abstract_class(void("m").with_modifiers(Modifiers::ABSTRACT)),
    );
    assert_eq!(kinds(&report), vec![BreakingChangeKind::METHOD_NOW_ABSTRACT]);
}

#[test]
fn new_abstract_method_in_a_class() {
    let abstract_class = |methods: Vec<ExecutableDecl>| {
        let mut decl = TypeDecl::class("pkg.A")
            .with_modifiers(Modifiers::ABSTRACT)
            .with_default_constructor();
        for m in methods {
            decl = decl.with_method(m);
        }
        vec![
            decl,
            TypeDecl::class("pkg.B")
                .extends(TypeRef::named("pkg.A"))
                .with_modifiers(Modifiers::ABSTRACT)
                .with_default_constructor(),
        ]
    };
    let report = compare(
        abstract_class(vec![]),
        abstract_class(vec![void("run").with_modifiers(Modifiers::ABSTRACT)]),
    );
    assert_eq!(
        changes(&report),
        vec![
            ("pkg.A".to_string(), BreakingChangeKind::METHOD_ABSTRACT_ADDED_TO_CLASS),
            ("pkg.B".to_string(), BreakingChangeKind::TYPE_NEW_ABSTRACT_METHOD),
        ]
    );
}

#[test]
fn return_type_changes() {
    let get = |ret: &str| ExecutableDecl::method("get", TypeRef::named(ret));

    // Overriders returning `Object` no longer compile.
    let report = compare(
        open_class(vec![get("java.lang.Object")]),
        open_class(vec![get("java.lang.String")]),
    );
    assert_eq!(
        kinds(&report),
        vec![
            BreakingChangeKind::METHOD_RETURN_TYPE_ERASURE_CHANGED,
            BreakingChangeKind::METHOD_RETURN_TYPE_CHANGED_INCOMPATIBLE,
        ]
    );
    assert_eq!(
        report.breaking_changes()[0].details,
        BreakingChangeDetails::MethodReturnTypeChanged {
            previous: TypeRef::object(),
            new: TypeRef::named("java.lang.String"),
        }
    );

    // Without overriders, a more specific return type only changes the descriptor.
    let report = compare(
        final_class(vec![get("java.lang.Object")]),
        final_class(vec![get("java.lang.String")]),
    );
    assert_eq!(
        kinds(&report),
        vec![BreakingChangeKind::METHOD_RETURN_TYPE_ERASURE_CHANGED]
    );
}

#[test]
fn checked_exceptions() {
    let read = || void("read");

    assert_eq!(
        kinds(&compare(open_class(vec![read()]), open_class(vec![read().throws(io())]))),
        vec![BreakingChangeKind::METHOD_NOW_THROWS_CHECKED_EXCEPTION]
    );
    assert_eq!(
        kinds(&compare(open_class(vec![read().throws(io())]), open_class(vec![read()]))),
        vec![BreakingChangeKind::METHOD_NO_LONGER_THROWS_CHECKED_EXCEPTION]
    );

    // Nothing overrides a method of a final class, so dropping an exception is harmless.
    assert!(compare(final_class(vec![read().throws(io())]), final_class(vec![read()])).is_empty());

    // A narrower exception still lets callers catch the old one.
    let narrower = compare(
        open_class(vec![read().throws(io())]),
        open_class(vec![read().throws(TypeRef::named("java.io.FileNotFoundException"))]),
    );
    assert_eq!(
        kinds(&narrower),
        vec![BreakingChangeKind::METHOD_NO_LONGER_THROWS_CHECKED_EXCEPTION]
    );

    // Unchecked exceptions are not part of the contract.
    let unchecked = compare(
        open_class(vec![read()]),
        open_class(vec![read().throws(TypeRef::named("java.lang.IllegalStateException"))]),
    );
    assert!(unchecked.is_empty(), "{unchecked}");
}

#[test]
fn method_type_parameter_bounds() {
    let generic = |bound: &str| {
        void("accept")
            .with_type_param(FormalTypeParameter::new("T", vec![TypeRef::named(bound)]))
            .with_param("t", TypeRef::type_param("T"))
    };

    // Moving the leftmost bound changes the erased signature.
    let report = compare(
        open_class(vec![generic("java.lang.Integer")]),
        open_class(vec![generic("java.lang.Number")]),
    );
    assert_eq!(
        changes(&report),
        vec![(
            "pkg.A.accept(java.lang.Integer)".to_string(),
            BreakingChangeKind::METHOD_REMOVED
        )]
    );

    // Overriders must repeat every bound, even ones that do not affect the erasure.
    let two_bounds = |second: &str| {
        void("accept")
            .with_type_param(FormalTypeParameter::new(
                "T",
                vec![TypeRef::named("java.lang.Number"), TypeRef::named(second)],
            ))
            .with_param("t", TypeRef::type_param("T"))
    };
    let report = compare(
        open_class(vec![two_bounds("java.lang.Comparable")]),
        open_class(vec![two_bounds("java.io.Serializable")]),
    );
    assert_eq!(
        kinds(&report),
        vec![BreakingChangeKind::METHOD_FORMAL_TYPE_PARAMETERS_CHANGED]
    );

    // A final method may accept more arguments than before.
    let report = compare(
        final_class(vec![two_bounds("java.lang.Comparable")]),
        final_class(vec![void("accept")
            .with_type_param(FormalTypeParameter::new(
                "T",
                vec![TypeRef::named("java.lang.Number")],
            ))
            .with_param("t", TypeRef::type_param("T"))]),
    );
    assert!(report.is_empty(), "{report}");
}

#[test]
fn parameter_type_arguments_are_invariant_for_overridable_methods() {
    let take = |arg: &str| {
        void("take").with_param(
            "values",
            TypeRef::class(
                "java.util.List",
                vec![TypeRef::wildcard_extends(TypeRef::named(arg))],
            ),
        )
    };

    let report = compare(
        open_class(vec![take("java.lang.Integer")]),
        open_class(vec![take("java.lang.Number")]),
    );
    assert_eq!(
        kinds(&report),
        vec![BreakingChangeKind::METHOD_PARAMETER_GENERICS_CHANGED]
    );
    assert_eq!(report.breaking_changes()[0].position, 0);

    let report = compare(
        final_class(vec![take("java.lang.Integer")]),
        final_class(vec![take("java.lang.Number")]),
    );
    assert!(report.is_empty(), "{report}");
}

#[test]
fn constructor_changes() {
    let with_ctors = |ctors: Vec<ExecutableDecl>| {
        let mut decl = TypeDecl::class("pkg.A").with_default_constructor();
        for c in ctors {
            decl = decl.with_constructor(c);
        }
        vec![decl]
    };
    let string_ctor =
        || ExecutableDecl::constructor().with_param("s", TypeRef::named("java.lang.String"));

    let removed = compare(with_ctors(vec![string_ctor()]), with_ctors(vec![]));
    assert_eq!(
        changes(&removed),
        vec![(
            "pkg.A.A(java.lang.String)".to_string(),
            BreakingChangeKind::CONSTRUCTOR_REMOVED
        )]
    );

    let protected = compare(
        with_ctors(vec![string_ctor()]),
        with_ctors(vec![string_ctor().with_visibility(Visibility::Protected)]),
    );
    assert_eq!(
        kinds(&protected),
        vec![BreakingChangeKind::CONSTRUCTOR_NOW_PROTECTED]
    );

    // Constructors cannot be overridden, so dropping a checked exception is fine.
    let relaxed = compare(
        with_ctors(vec![string_ctor().throws(io())]),
        with_ctors(vec![string_ctor()]),
    );
    assert!(relaxed.is_empty(), "{relaxed}");
}
