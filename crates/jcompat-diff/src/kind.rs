use std::fmt;

use serde::{Deserialize, Serialize};

/// How a breaking change relates to the declarations it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakingChangeNature {
    Addition,
    Deletion,
    Mutation,
}

impl fmt::Display for BreakingChangeNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BreakingChangeNature::Addition => "ADDITION",
            BreakingChangeNature::Deletion => "DELETION",
            BreakingChangeNature::Mutation => "MUTATION",
        })
    }
}

macro_rules! kinds {
    ($($name:ident => ($nature:ident, $binary:literal, $source:literal),)*) => {
        /// The catalog of detectable incompatibilities.
        ///
        /// Each kind records whether it breaks previously compiled clients (binary), client
        /// sources (source), or both.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[allow(non_camel_case_types)]
        pub enum BreakingChangeKind {
            $($name,)*
        }

        impl BreakingChangeKind {
            pub const ALL: &'static [BreakingChangeKind] = &[$(BreakingChangeKind::$name,)*];

            pub fn nature(self) -> BreakingChangeNature {
                match self {
                    $(BreakingChangeKind::$name => BreakingChangeNature::$nature,)*
                }
            }

            pub fn is_binary_breaking(self) -> bool {
                match self {
                    $(BreakingChangeKind::$name => $binary,)*
                }
            }

            pub fn is_source_breaking(self) -> bool {
                match self {
                    $(BreakingChangeKind::$name => $source,)*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(BreakingChangeKind::$name => stringify!($name),)*
                }
            }
        }
    };
}

kinds! {
    // Types
    TYPE_REMOVED => (Deletion, true, true),
    TYPE_NOW_PROTECTED => (Mutation, true, true),
    CLASS_NOW_ABSTRACT => (Mutation, true, true),
    CLASS_NOW_FINAL => (Mutation, true, true),
    CLASS_TYPE_CHANGED => (Mutation, true, true),
    CLASS_NOW_CHECKED_EXCEPTION => (Mutation, false, true),
    METHOD_ADDED_TO_INTERFACE => (Addition, false, true),
    NESTED_CLASS_NOW_STATIC => (Mutation, true, true),
    NESTED_CLASS_NO_LONGER_STATIC => (Mutation, true, true),
    TYPE_NEW_ABSTRACT_METHOD => (Addition, false, true),

    // Fields
    FIELD_NOW_FINAL => (Mutation, true, true),
    FIELD_NOW_STATIC => (Mutation, true, false),
    FIELD_NO_LONGER_STATIC => (Mutation, true, true),
    FIELD_TYPE_ERASURE_CHANGED => (Mutation, true, false),
    FIELD_TYPE_CHANGED_INCOMPATIBLE => (Mutation, false, true),
    FIELD_REMOVED => (Deletion, true, true),
    FIELD_NOW_PROTECTED => (Mutation, true, true),

    // Methods
    METHOD_REMOVED => (Deletion, true, true),
    METHOD_NOW_PROTECTED => (Mutation, true, true),
    METHOD_RETURN_TYPE_CHANGED => (Mutation, true, true),
    METHOD_RETURN_TYPE_ERASURE_CHANGED => (Mutation, true, false),
    METHOD_RETURN_TYPE_CHANGED_INCOMPATIBLE => (Mutation, false, true),
    METHOD_NOW_ABSTRACT => (Mutation, true, true),
    METHOD_NOW_FINAL => (Mutation, true, true),
    METHOD_NOW_STATIC => (Mutation, true, false),
    METHOD_NO_LONGER_STATIC => (Mutation, true, true),
    METHOD_NOW_THROWS_CHECKED_EXCEPTION => (Mutation, false, true),
    METHOD_NO_LONGER_THROWS_CHECKED_EXCEPTION => (Mutation, false, true),
    METHOD_ABSTRACT_ADDED_TO_CLASS => (Addition, false, true),
    METHOD_PARAMETER_GENERICS_CHANGED => (Mutation, false, true),

    // Constructors
    CONSTRUCTOR_REMOVED => (Deletion, true, true),
    CONSTRUCTOR_NOW_PROTECTED => (Mutation, true, true),

    // Hierarchy
    SUPERTYPE_REMOVED => (Mutation, true, true),

    // Formal type parameters
    TYPE_FORMAL_TYPE_PARAMETERS_ADDED => (Mutation, false, true),
    TYPE_FORMAL_TYPE_PARAMETERS_REMOVED => (Mutation, false, true),
    TYPE_FORMAL_TYPE_PARAMETERS_CHANGED => (Mutation, false, true),
    METHOD_FORMAL_TYPE_PARAMETERS_ADDED => (Mutation, false, true),
    METHOD_FORMAL_TYPE_PARAMETERS_REMOVED => (Mutation, false, true),
    METHOD_FORMAL_TYPE_PARAMETERS_CHANGED => (Mutation, false, true),

    // Annotation types
    ANNOTATION_TARGET_REMOVED => (Mutation, false, true),
    ANNOTATION_METHOD_NO_LONGER_DEFAULT => (Mutation, false, true),
    ANNOTATION_METHOD_ADDED_WITHOUT_DEFAULT => (Addition, false, true),
    ANNOTATION_NO_LONGER_REPEATABLE => (Mutation, false, true),
}

impl fmt::Display for BreakingChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
