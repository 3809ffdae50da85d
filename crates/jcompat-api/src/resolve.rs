use std::collections::HashMap;
use std::sync::Arc;

use jcompat_model::{ApiSnapshot, TypeDecl, TypeRef};
use parking_lot::RwLock;

/// A source of type declarations, looked up by qualified name.
pub trait TypeProvider: Send + Sync {
    fn lookup_type(&self, qualified_name: &str) -> Option<&TypeDecl>;
}

impl TypeProvider for ApiSnapshot {
    fn lookup_type(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.type_by_name(qualified_name)
    }
}

/// Where a resolved declaration was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Declared by the snapshot under analysis.
    Library,
    /// Declared by a classpath provider (including the bundled JDK subset).
    Classpath,
}

/// Maps type references to declarations.
///
/// Providers are consulted in order: the library snapshot first, then classpath providers.
/// Lookups that fail are cached too, so an opaque external type costs one probe per provider.
pub struct Resolver {
    library: Arc<ApiSnapshot>,
    classpath: Vec<Arc<dyn TypeProvider>>,
    cache: RwLock<HashMap<String, Option<Slot>>>,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Library,
    Classpath(usize),
}

impl Resolver {
    pub fn new(library: Arc<ApiSnapshot>, classpath: Vec<Arc<dyn TypeProvider>>) -> Self {
        Self {
            library,
            classpath,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn library(&self) -> &ApiSnapshot {
        &self.library
    }

    /// Declaration for a class reference. `None` for primitives, arrays, type parameters,
    /// wildcards and names no provider knows about.
    pub fn resolve(&self, reference: &TypeRef) -> Option<&TypeDecl> {
        reference
            .class_name()
            .and_then(|name| self.resolve_name(name))
    }

    pub fn resolve_name(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.locate(qualified_name).and_then(|slot| self.fetch(slot, qualified_name))
    }

    pub fn origin(&self, qualified_name: &str) -> Option<Origin> {
        self.locate(qualified_name).map(|slot| match slot {
            Slot::Library => Origin::Library,
            Slot::Classpath(_) => Origin::Classpath,
        })
    }

    fn locate(&self, qualified_name: &str) -> Option<Slot> {
        if let Some(slot) = self.cache.read().get(qualified_name) {
            return *slot;
        }

        let slot = if self.library.lookup_type(qualified_name).is_some() {
            Some(Slot::Library)
        } else {
            self.classpath
                .iter()
                .position(|provider| provider.lookup_type(qualified_name).is_some())
                .map(Slot::Classpath)
        };

        if slot.is_none() {
            tracing::trace!(name = qualified_name, "unresolved type reference");
        }
        self.cache.write().insert(qualified_name.to_string(), slot);
        slot
    }

    fn fetch(&self, slot: Slot, qualified_name: &str) -> Option<&TypeDecl> {
        match slot {
            Slot::Library => self.library.lookup_type(qualified_name),
            Slot::Classpath(idx) => self
                .classpath
                .get(idx)
                .and_then(|provider| provider.lookup_type(qualified_name)),
        }
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("library_types", &self.library.len())
            .field("classpath_providers", &self.classpath.len())
            .finish()
    }
}
