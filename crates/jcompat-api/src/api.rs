use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use jcompat_model::{ApiSnapshot, ExecutableDecl, TypeDecl, TypeId, TypeRef};
use parking_lot::RwLock;

use crate::jdk::minimal_jdk;
use crate::resolve::{Resolver, TypeProvider};

/// Type-parameter scope for resolving `T`-style references.
///
/// Executable type parameters shadow those of the declaring type, which shadow those of its
/// enclosing types.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope<'a> {
    pub ty: Option<&'a TypeDecl>,
    pub executable: Option<&'a ExecutableDecl>,
}

impl<'a> Scope<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn of_type(ty: &'a TypeDecl) -> Self {
        Self {
            ty: Some(ty),
            executable: None,
        }
    }

    pub fn of_executable(ty: &'a TypeDecl, executable: &'a ExecutableDecl) -> Self {
        Self {
            ty: Some(ty),
            executable: Some(executable),
        }
    }
}

#[derive(Default)]
pub(crate) struct Caches {
    pub(crate) super_types: RwLock<HashMap<String, Arc<[TypeRef]>>>,
    pub(crate) instantiated: RwLock<HashMap<TypeRef, Arc<[TypeRef]>>>,
    pub(crate) subtype: RwLock<HashMap<(TypeRef, TypeRef), bool>>,
    pub(crate) direct_subtypes: OnceLock<HashMap<String, Vec<TypeId>>>,
}

/// Analysis facade over one API snapshot.
///
/// Answers the resolution, subtyping and hierarchy questions the diff engine asks. All memo
/// tables are owned by this value and never shared with another snapshot.
pub struct Api {
    snapshot: Arc<ApiSnapshot>,
    resolver: Resolver,
    pub(crate) caches: Caches,
}

impl Api {
    /// Analyzes `snapshot` against the bundled JDK subset.
    pub fn new(snapshot: impl Into<Arc<ApiSnapshot>>) -> Self {
        Self::with_classpath(snapshot, Vec::new())
    }

    /// Analyzes `snapshot`, resolving outside references through `classpath` and then the
    /// bundled JDK subset.
    pub fn with_classpath(
        snapshot: impl Into<Arc<ApiSnapshot>>,
        classpath: Vec<Arc<dyn TypeProvider>>,
    ) -> Self {
        let snapshot = snapshot.into();
        let mut providers = classpath;
        providers.push(Arc::new(minimal_jdk()));
        Self {
            resolver: Resolver::new(snapshot.clone(), providers),
            snapshot,
            caches: Caches::default(),
        }
    }

    pub fn snapshot(&self) -> &ApiSnapshot {
        &self.snapshot
    }

    pub fn shared_snapshot(&self) -> Arc<ApiSnapshot> {
        self.snapshot.clone()
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn resolve(&self, reference: &TypeRef) -> Option<&TypeDecl> {
        self.resolver.resolve(reference)
    }

    pub fn find_type(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.resolver.resolve_name(qualified_name)
    }

    /// Exported library types, ordered by qualified name.
    pub fn exported_types(&self) -> Vec<&TypeDecl> {
        let mut out: Vec<&TypeDecl> = self
            .snapshot
            .types()
            .iter()
            .filter(|t| self.is_exported(t))
            .collect();
        out.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
        out
    }

    /// Scope of an executable, resolved through its owner.
    pub fn scope_of<'a>(&'a self, executable: &'a ExecutableDecl) -> Scope<'a> {
        Scope {
            ty: self.find_type(&executable.owner),
            executable: Some(executable),
        }
    }

    /// Library types that directly extend or implement `qualified_name`.
    pub fn direct_subtypes(&self, qualified_name: &str) -> Vec<&TypeDecl> {
        let index = self.caches.direct_subtypes.get_or_init(|| {
            let mut index: HashMap<String, Vec<TypeId>> = HashMap::new();
            for id in self.snapshot.ids() {
                let Some(decl) = self.snapshot.get(id) else {
                    continue;
                };
                for sup in decl.declared_super_types() {
                    if let Some(name) = sup.class_name() {
                        if name != decl.qualified_name {
                            index.entry(name.to_string()).or_default().push(id);
                        }
                    }
                }
            }
            index
        });

        index
            .get(qualified_name)
            .map(|ids| ids.iter().filter_map(|id| self.snapshot.get(*id)).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("types", &self.snapshot.len())
            .field("resolver", &self.resolver)
            .finish()
    }
}
