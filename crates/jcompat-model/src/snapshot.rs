use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decl::{ModuleDecl, TypeDecl};
use crate::reference::{RefInterner, TypeRef};

/// Index of a type declaration inside one [`ApiSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub fn to_raw(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate type declaration `{0}`")]
    DuplicateType(String),
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error("`{owner}.{executable}`: only the last parameter may be varargs")]
    InvalidVarargs { owner: String, executable: String },
    #[error("failed to decode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// An immutable set of declared types, as extracted from one library version.
#[derive(Debug)]
pub struct ApiSnapshot {
    module: ModuleDecl,
    types: Vec<TypeDecl>,
    by_name: HashMap<String, TypeId>,
    refs: RefInterner,
}

impl ApiSnapshot {
    pub fn builder() -> ApiBuilder {
        ApiBuilder::default()
    }

    pub fn empty() -> Self {
        ApiBuilder::default().build()
    }

    pub fn module(&self) -> &ModuleDecl {
        &self.module
    }

    pub fn types(&self) -> &[TypeDecl] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn type_id(&self, qualified_name: &str) -> Option<TypeId> {
        self.by_name.get(qualified_name).copied()
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDecl> {
        self.types.get(id.index())
    }

    pub fn type_by_name(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.type_id(qualified_name).and_then(|id| self.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len()).map(|idx| TypeId(idx as u32))
    }

    /// The interned instance of `r` in this snapshot, if one of its declarations uses it.
    pub fn interned(&self, r: &TypeRef) -> Option<&TypeRef> {
        self.refs.lookup(r)
    }

    pub fn interned_len(&self) -> usize {
        self.refs.len()
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        let file = SnapshotFileRef {
            module: &self.module,
            types: &self.types,
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Decodes a snapshot written by [`ApiSnapshot::to_json`], re-running the builder checks.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let file: SnapshotFile = serde_json::from_str(text)?;
        let mut builder = ApiBuilder::default().with_module(file.module);
        for decl in file.types {
            builder.add_type(decl)?;
        }
        Ok(builder.build())
    }
}

#[derive(Serialize)]
struct SnapshotFileRef<'a> {
    module: &'a ModuleDecl,
    types: &'a [TypeDecl],
}

#[derive(Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    module: ModuleDecl,
    #[serde(default)]
    types: Vec<TypeDecl>,
}

/// Collects declarations for a snapshot.
///
/// Declarations live in an arena indexed by [`TypeId`]; the name index is rebuilt after every
/// edit so lookups never observe a stale id.
#[derive(Debug, Default)]
pub struct ApiBuilder {
    module: ModuleDecl,
    types: Vec<TypeDecl>,
    by_name: HashMap<String, TypeId>,
    refs: RefInterner,
}

impl ApiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module: ModuleDecl) -> Self {
        self.module = module;
        self
    }

    pub fn add_type(&mut self, decl: TypeDecl) -> Result<TypeId, ModelError> {
        if self.by_name.contains_key(&decl.qualified_name) {
            return Err(ModelError::DuplicateType(decl.qualified_name));
        }
        let decl = self.prepare(decl)?;
        let id = TypeId(self.types.len() as u32);
        self.by_name.insert(decl.qualified_name.clone(), id);
        self.types.push(decl);
        Ok(id)
    }

    /// Chained form of [`ApiBuilder::add_type`].
    pub fn with_type(mut self, decl: TypeDecl) -> Result<Self, ModelError> {
        self.add_type(decl)?;
        Ok(self)
    }

    /// Swaps the declaration with the same qualified name for `decl`, keeping its id.
    pub fn replace_type(&mut self, decl: TypeDecl) -> Result<TypeId, ModelError> {
        let id = self
            .type_id(&decl.qualified_name)
            .ok_or_else(|| ModelError::UnknownType(decl.qualified_name.clone()))?;
        let decl = self.prepare(decl)?;
        self.types[id.index()] = decl;
        Ok(id)
    }

    /// Removes a declaration. Ids of the declarations after it shift down by one.
    pub fn remove_type(&mut self, qualified_name: &str) -> Result<TypeDecl, ModelError> {
        let id = self
            .type_id(qualified_name)
            .ok_or_else(|| ModelError::UnknownType(qualified_name.to_string()))?;
        let removed = self.types.remove(id.index());
        self.reindex();
        Ok(removed)
    }

    pub fn type_id(&self, qualified_name: &str) -> Option<TypeId> {
        self.by_name.get(qualified_name).copied()
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDecl> {
        self.types.get(id.index())
    }

    pub fn build(self) -> ApiSnapshot {
        ApiSnapshot {
            module: self.module,
            types: self.types,
            by_name: self.by_name,
            refs: self.refs,
        }
    }

    fn prepare(&mut self, mut decl: TypeDecl) -> Result<TypeDecl, ModelError> {
        for executable in decl.executables() {
            let misplaced = executable
                .params
                .iter()
                .rev()
                .skip(1)
                .any(|param| param.varargs);
            if misplaced {
                return Err(ModelError::InvalidVarargs {
                    owner: decl.qualified_name.clone(),
                    executable: executable.name.clone(),
                });
            }
        }

        decl.link_members();
        let refs = &mut self.refs;
        decl.refs_mut(&mut |r| *r = refs.intern(r));
        Ok(decl)
    }

    fn reindex(&mut self) {
        self.by_name = self
            .types
            .iter()
            .enumerate()
            .map(|(idx, decl)| (decl.qualified_name.clone(), TypeId(idx as u32)))
            .collect();
    }
}
