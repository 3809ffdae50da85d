use std::fmt;
use std::ops::BitOr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Access level of a declaration, ordered from least to most visible.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    #[default]
    PackagePrivate,
    Protected,
    Public,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }

    pub fn is_protected(self) -> bool {
        self == Visibility::Protected
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Private => "private",
            Visibility::PackagePrivate => "package-private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        })
    }
}

/// Declaration modifiers packed into a bitset.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u16);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const ABSTRACT: Modifiers = Modifiers(0x0001);
    pub const FINAL: Modifiers = Modifiers(0x0002);
    pub const STATIC: Modifiers = Modifiers(0x0004);
    pub const SEALED: Modifiers = Modifiers(0x0008);
    pub const NON_SEALED: Modifiers = Modifiers(0x0010);
    pub const DEFAULT: Modifiers = Modifiers(0x0020);
    pub const SYNCHRONIZED: Modifiers = Modifiers(0x0040);
    pub const NATIVE: Modifiers = Modifiers(0x0080);
    pub const STRICTFP: Modifiers = Modifiers(0x0100);
    pub const TRANSIENT: Modifiers = Modifiers(0x0200);
    pub const VOLATILE: Modifiers = Modifiers(0x0400);

    const NAMES: [(Modifiers, &'static str); 11] = [
        (Modifiers::ABSTRACT, "abstract"),
        (Modifiers::FINAL, "final"),
        (Modifiers::STATIC, "static"),
        (Modifiers::SEALED, "sealed"),
        (Modifiers::NON_SEALED, "non-sealed"),
        (Modifiers::DEFAULT, "default"),
        (Modifiers::SYNCHRONIZED, "synchronized"),
        (Modifiers::NATIVE, "native"),
        (Modifiers::STRICTFP, "strictfp"),
        (Modifiers::TRANSIENT, "transient"),
        (Modifiers::VOLATILE, "volatile"),
    ];

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Modifiers) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Modifiers) {
        self.0 &= !other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_abstract(self) -> bool {
        self.contains(Modifiers::ABSTRACT)
    }

    pub fn is_final(self) -> bool {
        self.contains(Modifiers::FINAL)
    }

    pub fn is_static(self) -> bool {
        self.contains(Modifiers::STATIC)
    }

    pub fn is_sealed(self) -> bool {
        self.contains(Modifiers::SEALED)
    }

    pub fn is_non_sealed(self) -> bool {
        self.contains(Modifiers::NON_SEALED)
    }

    pub fn is_default(self) -> bool {
        self.contains(Modifiers::DEFAULT)
    }

    pub fn from_name(name: &str) -> Option<Modifiers> {
        Self::NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(m, _)| *m)
    }

    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |(m, _)| self.contains(*m))
            .map(|(_, n)| n)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl Serialize for Modifiers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        let mut out = Modifiers::NONE;
        for name in names {
            let modifier = Modifiers::from_name(&name)
                .ok_or_else(|| D::Error::custom(format!("unknown modifier `{name}`")))?;
            out.insert(modifier);
        }
        Ok(out)
    }
}

/// Program elements an annotation type may be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementType {
    Type,
    Field,
    Method,
    Parameter,
    Constructor,
    LocalVariable,
    AnnotationType,
    Package,
    TypeParameter,
    TypeUse,
    Module,
    RecordComponent,
}

impl ElementType {
    pub const ALL: [ElementType; 12] = [
        ElementType::Type,
        ElementType::Field,
        ElementType::Method,
        ElementType::Parameter,
        ElementType::Constructor,
        ElementType::LocalVariable,
        ElementType::AnnotationType,
        ElementType::Package,
        ElementType::TypeParameter,
        ElementType::TypeUse,
        ElementType::Module,
        ElementType::RecordComponent,
    ];

    /// The `java.lang.annotation.ElementType` constant name.
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Type => "TYPE",
            ElementType::Field => "FIELD",
            ElementType::Method => "METHOD",
            ElementType::Parameter => "PARAMETER",
            ElementType::Constructor => "CONSTRUCTOR",
            ElementType::LocalVariable => "LOCAL_VARIABLE",
            ElementType::AnnotationType => "ANNOTATION_TYPE",
            ElementType::Package => "PACKAGE",
            ElementType::TypeParameter => "TYPE_PARAMETER",
            ElementType::TypeUse => "TYPE_USE",
            ElementType::Module => "MODULE",
            ElementType::RecordComponent => "RECORD_COMPONENT",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
