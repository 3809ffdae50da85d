use std::collections::BTreeMap;

use jcompat_api::Api;
use jcompat_model::{Annotation, TypeDecl};
use regex::Regex;

use crate::change::{BreakingChange, Symbol, SymbolKind};

/// Enclosing-type chains longer than this are not followed.
const MAX_ENCLOSING_DEPTH: usize = 64;

/// Excludes symbols carrying `annotation`, optionally only when specific element values match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationExclusion {
    pub annotation: String,
    pub required_values: BTreeMap<String, String>,
}

impl AnnotationExclusion {
    pub fn new(annotation: impl Into<String>) -> Self {
        Self {
            annotation: annotation.into(),
            required_values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, element: impl Into<String>, value: impl Into<String>) -> Self {
        self.required_values.insert(element.into(), value.into());
        self
    }

    pub fn matches(&self, annotation: &Annotation) -> bool {
        annotation.qualified_name == self.annotation
            && self
                .required_values
                .iter()
                .all(|(element, value)| annotation.values.get(element) == Some(value))
    }
}

/// Which breaking changes to leave out of [`crate::Report::breaking_changes`].
#[derive(Debug, Clone, Default)]
pub struct ExclusionOptions {
    pub name_patterns: Vec<Regex>,
    pub annotation_exclusions: Vec<AnnotationExclusion>,
}

impl ExclusionOptions {
    pub fn none() -> Self {
        Self::default()
    }

    /// Compiles each pattern so it must match a whole symbol name. Patterns that fail to compile
    /// are logged and dropped.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for pattern in patterns {
            options = options.exclude_pattern(pattern.as_ref());
        }
        options
    }

    pub fn exclude_pattern(mut self, pattern: &str) -> Self {
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(regex) => self.name_patterns.push(regex),
            Err(err) => tracing::warn!(pattern, error = %err, "ignoring invalid exclusion pattern"),
        }
        self
    }

    pub fn exclude_annotation(mut self, exclusion: AnnotationExclusion) -> Self {
        self.annotation_exclusions.push(exclusion);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name_patterns.is_empty() && self.annotation_exclusions.is_empty()
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name_patterns.iter().any(|re| re.is_match(name))
    }

    pub fn matches_annotations(&self, annotations: &[Annotation]) -> bool {
        self.annotation_exclusions
            .iter()
            .any(|exclusion| annotations.iter().any(|a| exclusion.matches(a)))
    }

    /// Whether `change` is excluded. The impacted symbol, its declaring type, the declaring
    /// type's enclosing types and the impacted type are checked, all as declared in `before`.
    pub fn is_excluded(&self, before: &Api, change: &BreakingChange) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.is_symbol_excluded(before, &change.impacted_symbol) {
            return true;
        }

        let owner = change
            .impacted_symbol
            .owner
            .as_deref()
            .unwrap_or(&change.impacted_symbol.qualified_name);
        self.is_type_chain_excluded(before, owner)
            || self.is_type_chain_excluded(before, &change.impacted_type)
    }

    fn is_symbol_excluded(&self, before: &Api, symbol: &Symbol) -> bool {
        if self.matches_name(&symbol.qualified_name) {
            return true;
        }
        if self.annotation_exclusions.is_empty() {
            return false;
        }
        let (Some(owner), Some(member)) = (&symbol.owner, &symbol.member) else {
            return false;
        };
        let Some(decl) = before.find_type(owner) else {
            return false;
        };
        let annotations = member_annotations(before, decl, symbol.kind, member);
        annotations.is_some_and(|annotations| self.matches_annotations(annotations))
    }

    fn is_type_chain_excluded(&self, before: &Api, qualified_name: &str) -> bool {
        if self.matches_name(qualified_name) {
            return true;
        }
        let mut current = before.find_type(qualified_name);
        let mut depth = 0;
        while let Some(decl) = current {
            if self.matches_name(&decl.qualified_name) || self.matches_annotations(&decl.annotations) {
                return true;
            }
            depth += 1;
            if depth > MAX_ENCLOSING_DEPTH {
                break;
            }
            current = decl.enclosing.as_ref().and_then(|e| before.resolve(e));
        }
        false
    }
}

fn member_annotations<'a>(
    api: &'a Api,
    decl: &'a TypeDecl,
    kind: SymbolKind,
    member: &str,
) -> Option<&'a [Annotation]> {
    match kind {
        SymbolKind::Type => Some(&decl.annotations),
        SymbolKind::Field => decl
            .fields
            .iter()
            .find(|f| f.name == member)
            .map(|f| f.annotations.as_slice()),
        SymbolKind::Method => decl
            .methods
            .iter()
            .find(|m| api.signature(m) == member)
            .map(|m| m.annotations.as_slice()),
        SymbolKind::Constructor => decl
            .constructors()
            .iter()
            .find(|c| api.signature(c) == member)
            .map(|c| c.annotations.as_slice()),
        SymbolKind::AnnotationElement => decl
            .annotation_elements()
            .iter()
            .find(|e| format!("{}()", e.name) == member)
            .map(|e| e.annotations.as_slice()),
    }
}
