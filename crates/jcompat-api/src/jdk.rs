//! A small slice of the JDK, enough to answer the questions the engine asks about platform
//! types: the exception hierarchy, boxed primitives, `Number`, and the core collection
//! interfaces.

use jcompat_model::{
    Annotation, ApiBuilder, ApiSnapshot, ElementType, ExecutableDecl, FormalTypeParameter,
    Modifiers, PrimitiveType, TypeDecl, TypeRef, Visibility, REPEATABLE, TARGET,
};

struct JdkType {
    name: &'static str,
    shape: Shape,
    modifiers: Modifiers,
    type_params: &'static [&'static str],
    super_class: Option<&'static str>,
    interfaces: &'static [&'static str],
    methods: &'static [&'static str],
}

#[derive(Clone, Copy)]
enum Shape {
    Class,
    Interface,
    Annotation,
}

const NONE: Modifiers = Modifiers::NONE;
const FINAL: Modifiers = Modifiers::FINAL;
const ABSTRACT: Modifiers = Modifiers::ABSTRACT;

const fn class(
    name: &'static str,
    modifiers: Modifiers,
    super_class: Option<&'static str>,
    interfaces: &'static [&'static str],
) -> JdkType {
    JdkType {
        name,
        shape: Shape::Class,
        modifiers,
        type_params: &[],
        super_class,
        interfaces,
        methods: &[],
    }
}

const fn interface(name: &'static str, interfaces: &'static [&'static str]) -> JdkType {
    JdkType {
        name,
        shape: Shape::Interface,
        modifiers: NONE,
        type_params: &[],
        super_class: None,
        interfaces,
        methods: &[],
    }
}

const fn annotation(name: &'static str) -> JdkType {
    JdkType {
        name,
        shape: Shape::Annotation,
        modifiers: NONE,
        type_params: &[],
        super_class: None,
        interfaces: &["java.lang.annotation.Annotation"],
        methods: &[],
    }
}

impl JdkType {
    const fn params(mut self, type_params: &'static [&'static str]) -> Self {
        self.type_params = type_params;
        self
    }

    /// Method signatures in the form `ret name(T1,T2)`.
    const fn methods(mut self, methods: &'static [&'static str]) -> Self {
        self.methods = methods;
        self
    }
}

const EXCEPTION_CLASSES: &[(&str, &str)] = &[
    ("java.lang.Exception", "java.lang.Throwable"),
    ("java.lang.Error", "java.lang.Throwable"),
    ("java.lang.RuntimeException", "java.lang.Exception"),
    ("java.lang.IllegalArgumentException", "java.lang.RuntimeException"),
    ("java.lang.IllegalStateException", "java.lang.RuntimeException"),
    ("java.lang.NullPointerException", "java.lang.RuntimeException"),
    ("java.lang.UnsupportedOperationException", "java.lang.RuntimeException"),
    ("java.lang.IndexOutOfBoundsException", "java.lang.RuntimeException"),
    ("java.lang.ClassCastException", "java.lang.RuntimeException"),
    ("java.lang.ArithmeticException", "java.lang.RuntimeException"),
    ("java.lang.NumberFormatException", "java.lang.IllegalArgumentException"),
    ("java.lang.InterruptedException", "java.lang.Exception"),
    ("java.lang.CloneNotSupportedException", "java.lang.Exception"),
    ("java.lang.ReflectiveOperationException", "java.lang.Exception"),
    ("java.lang.ClassNotFoundException", "java.lang.ReflectiveOperationException"),
    ("java.lang.AssertionError", "java.lang.Error"),
    ("java.lang.LinkageError", "java.lang.Error"),
    ("java.lang.VirtualMachineError", "java.lang.Error"),
    ("java.lang.OutOfMemoryError", "java.lang.VirtualMachineError"),
    ("java.lang.StackOverflowError", "java.lang.VirtualMachineError"),
    ("java.io.IOException", "java.lang.Exception"),
    ("java.io.FileNotFoundException", "java.io.IOException"),
    ("java.io.EOFException", "java.io.IOException"),
    ("java.io.UncheckedIOException", "java.lang.RuntimeException"),
    ("java.util.NoSuchElementException", "java.lang.RuntimeException"),
    ("java.util.ConcurrentModificationException", "java.lang.RuntimeException"),
    ("java.util.concurrent.ExecutionException", "java.lang.Exception"),
    ("java.util.concurrent.TimeoutException", "java.lang.Exception"),
];

const BOXES: &[(&str, bool)] = &[
    ("java.lang.Byte", true),
    ("java.lang.Short", true),
    ("java.lang.Integer", true),
    ("java.lang.Long", true),
    ("java.lang.Float", true),
    ("java.lang.Double", true),
    ("java.lang.Character", false),
    ("java.lang.Boolean", false),
];

const TYPES: &[JdkType] = &[
    class("java.lang.Object", NONE, None, &[]).methods(&[
        "boolean equals(java.lang.Object)",
        "int hashCode()",
        "java.lang.String toString()",
    ]),
    interface("java.io.Serializable", &[]),
    interface("java.lang.Cloneable", &[]),
    interface("java.lang.Runnable", &[]).methods(&["void run()"]),
    interface("java.lang.AutoCloseable", &[]).methods(&["void close() throws java.lang.Exception"]),
    interface("java.io.Closeable", &["java.lang.AutoCloseable"])
        .methods(&["void close() throws java.io.IOException"]),
    interface("java.lang.CharSequence", &[]).methods(&["int length()", "char charAt(int)"]),
    interface("java.lang.Comparable", &[])
        .params(&["T"])
        .methods(&["int compareTo(T)"]),
    interface("java.lang.Iterable", &[])
        .params(&["T"])
        .methods(&["java.util.Iterator<T> iterator()"]),
    interface("java.util.Iterator", &[])
        .params(&["E"])
        .methods(&["boolean hasNext()", "E next()"]),
    interface("java.util.Collection", &["java.lang.Iterable<E>"])
        .params(&["E"])
        .methods(&["int size()", "boolean add(E)", "boolean isEmpty()"]),
    interface("java.util.List", &["java.util.Collection<E>"])
        .params(&["E"])
        .methods(&["E get(int)"]),
    interface("java.util.Set", &["java.util.Collection<E>"]).params(&["E"]),
    interface("java.util.Queue", &["java.util.Collection<E>"])
        .params(&["E"])
        .methods(&["E peek()"]),
    interface("java.util.Map", &[])
        .params(&["K", "V"])
        .methods(&["V get(java.lang.Object)", "V put(K,V)", "int size()"]),
    interface("java.util.function.Supplier", &[])
        .params(&["T"])
        .methods(&["T get()"]),
    interface("java.util.function.Function", &[])
        .params(&["T", "R"])
        .methods(&["R apply(T)"]),
    class(
        "java.util.AbstractCollection",
        ABSTRACT,
        None,
        &["java.util.Collection<E>"],
    )
    .params(&["E"]),
    class(
        "java.util.AbstractList",
        ABSTRACT,
        Some("java.util.AbstractCollection<E>"),
        &["java.util.List<E>"],
    )
    .params(&["E"]),
    class(
        "java.util.ArrayList",
        NONE,
        Some("java.util.AbstractList<E>"),
        &[
            "java.util.List<E>",
            "java.lang.Cloneable",
            "java.io.Serializable",
        ],
    )
    .params(&["E"]),
    class(
        "java.util.HashMap",
        NONE,
        None,
        &["java.util.Map<K,V>", "java.lang.Cloneable", "java.io.Serializable"],
    )
    .params(&["K", "V"]),
    class(
        "java.lang.String",
        FINAL,
        None,
        &[
            "java.io.Serializable",
            "java.lang.Comparable<java.lang.String>",
            "java.lang.CharSequence",
        ],
    ),
    class("java.lang.Number", ABSTRACT, None, &["java.io.Serializable"]),
    class(
        "java.lang.Enum",
        ABSTRACT,
        None,
        &["java.lang.Comparable<E>", "java.io.Serializable"],
    )
    .params(&["E"]),
    class("java.lang.Record", ABSTRACT, None, &[]),
    class("java.lang.Throwable", NONE, None, &["java.io.Serializable"])
        .methods(&["java.lang.String getMessage()"]),
    class("java.io.InputStream", ABSTRACT, None, &["java.io.Closeable"])
        .methods(&["int read() throws java.io.IOException"]),
    class(
        "java.io.FileInputStream",
        NONE,
        Some("java.io.InputStream"),
        &[],
    ),
    interface("java.lang.annotation.Annotation", &[]),
    annotation("java.lang.annotation.Documented"),
    annotation("java.lang.annotation.Inherited"),
    annotation("java.lang.annotation.Retention"),
    annotation(TARGET),
    annotation(REPEATABLE),
    annotation("java.lang.Deprecated"),
    annotation("java.lang.FunctionalInterface"),
    annotation("java.lang.Override"),
];

/// Builds the bundled JDK subset as a standalone snapshot.
///
/// Every call produces a fresh snapshot with its own interning table.
pub fn minimal_jdk() -> ApiSnapshot {
    let mut builder = ApiBuilder::new();
    let mut add = |decl: TypeDecl| {
        if let Err(err) = builder.add_type(decl) {
            tracing::warn!(error = %err, "skipping bundled JDK type");
        }
    };

    for entry in TYPES {
        add(build(entry));
    }

    for (name, super_class) in EXCEPTION_CLASSES {
        add(TypeDecl::class(*name)
            .extends(TypeRef::named(*super_class))
            .with_default_constructor()
            .with_constructor(
                ExecutableDecl::constructor().with_param("message", TypeRef::named("java.lang.String")),
            ));
    }

    for (name, numeric) in BOXES {
        let mut decl = TypeDecl::class(*name)
            .with_modifiers(FINAL)
            .implements(TypeRef::class(
                "java.lang.Comparable",
                vec![TypeRef::named(*name)],
            ))
            .implements(TypeRef::named("java.io.Serializable"));
        if *numeric {
            decl = decl.extends(TypeRef::named("java.lang.Number"));
        }
        add(decl);
    }

    builder.build()
}

fn build(entry: &JdkType) -> TypeDecl {
    let mut decl = match entry.shape {
        Shape::Class => TypeDecl::class(entry.name).with_default_constructor(),
        Shape::Interface => TypeDecl::interface(entry.name),
        Shape::Annotation => {
            let ann = TypeDecl::annotation(entry.name)
                .with_annotation(Annotation::new("java.lang.annotation.Documented"));
            if entry.name == TARGET || entry.name == REPEATABLE {
                ann.with_targets([ElementType::AnnotationType])
            } else {
                ann
            }
        }
    }
    .with_modifiers(entry.modifiers)
    .with_visibility(Visibility::Public);

    for name in entry.type_params {
        decl = decl.with_type_param(FormalTypeParameter::unbounded(*name));
    }
    if let Some(super_class) = entry.super_class {
        decl = decl.extends(parse(super_class, entry.type_params));
    }
    for iface in entry.interfaces {
        decl = decl.implements(parse(iface, entry.type_params));
    }
    for method in entry.methods {
        if let Some(method) = parse_method(method, entry.type_params) {
            decl = decl.with_method(method);
        }
    }
    decl
}

fn parse_method(text: &str, type_params: &[&str]) -> Option<ExecutableDecl> {
    let (signature, thrown) = match text.split_once(" throws ") {
        Some((signature, thrown)) => (signature, Some(thrown)),
        None => (text, None),
    };
    let (ret, rest) = signature.split_once(' ')?;
    let (name, params) = rest.split_once('(')?;
    let params = params.strip_suffix(')')?;

    let mut method = ExecutableDecl::method(name, parse(ret, type_params));
    for (idx, param) in params.split(',').filter(|p| !p.is_empty()).enumerate() {
        method = method.with_param(format!("arg{idx}"), parse(param, type_params));
    }
    if let Some(thrown) = thrown {
        method = method.throws(parse(thrown, type_params));
    }
    Some(method)
}

/// Parses the restricted reference syntax used in the tables above: names, type arguments,
/// type parameters listed in `type_params`, and trailing `[]`.
fn parse(text: &str, type_params: &[&str]) -> TypeRef {
    let text = text.trim();
    if let Some(component) = text.strip_suffix("[]") {
        return TypeRef::array(parse(component, type_params), 1);
    }
    if let Some(primitive) = PrimitiveType::from_name(text) {
        return TypeRef::primitive(primitive);
    }
    if type_params.contains(&text) {
        return TypeRef::type_param(text);
    }
    match text.split_once('<') {
        Some((name, args)) => {
            let args = args.strip_suffix('>').unwrap_or(args);
            TypeRef::class(
                name,
                split_args(args)
                    .into_iter()
                    .map(|arg| parse(arg, type_params))
                    .collect(),
            )
        }
        None => TypeRef::named(text),
    }
}

fn split_args(args: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in args.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(&args[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    out.push(&args[start..]);
    out
}
