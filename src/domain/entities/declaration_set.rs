//! Declaration set - deduplicated native declarations keyed by identity

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{BridgeError, BridgeResult};

use super::EntryPointDeclaration;

/// Native declarations keyed by `(owning_class, native_symbol)`
///
/// Iteration order is sorted by identity, never by discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet {
    entries: BTreeMap<(String, String), EntryPointDeclaration>,
    /// Scanned classes that extend a throwable
    throwables: BTreeSet<String>,
}

impl DeclarationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set, failing on the first identity conflict
    pub fn from_declarations(
        declarations: impl IntoIterator<Item = EntryPointDeclaration>,
    ) -> BridgeResult<Self> {
        let mut set = Self::new();
        for decl in declarations {
            set.insert(decl)?;
        }
        Ok(set)
    }

    /// Insert a declaration.
    ///
    /// An identical signature under the same identity is merged (first source kept);
    /// a differing one is a `ConflictingDeclaration`.
    pub fn insert(&mut self, decl: EntryPointDeclaration) -> BridgeResult<()> {
        let key = (
            decl.owning_class().to_string(),
            decl.native_symbol().to_string(),
        );
        match self.entries.get(&key) {
            Some(existing) if existing.same_signature(&decl) => Ok(()),
            Some(existing) => {
                let mut pair = [existing.display_signature(), decl.display_signature()];
                pair.sort();
                let [first, second] = pair;
                Err(BridgeError::ConflictingDeclaration {
                    owning_class: key.0,
                    native_symbol: key.1,
                    first,
                    second,
                })
            }
            None => {
                self.entries.insert(key, decl);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryPointDeclaration> {
        self.entries.values()
    }

    pub fn get(&self, owning_class: &str, native_symbol: &str) -> Option<&EntryPointDeclaration> {
        self.entries
            .get(&(owning_class.to_string(), native_symbol.to_string()))
    }

    /// Remove a declaration by identity, returning it
    pub fn remove(
        &mut self,
        owning_class: &str,
        native_symbol: &str,
    ) -> Option<EntryPointDeclaration> {
        self.entries
            .remove(&(owning_class.to_string(), native_symbol.to_string()))
    }

    /// Record scanned classes that JNI passes as `jthrowable`
    pub fn with_throwables(mut self, throwables: BTreeSet<String>) -> Self {
        self.throwables = throwables;
        self
    }

    pub fn throwables(&self) -> &BTreeSet<String> {
        &self.throwables
    }

    /// Group declarations by owning class; each group is sorted by native symbol
    pub fn by_class(&self) -> BTreeMap<&str, Vec<&EntryPointDeclaration>> {
        let mut groups: BTreeMap<&str, Vec<&EntryPointDeclaration>> = BTreeMap::new();
        for decl in self.entries.values() {
            groups.entry(decl.owning_class()).or_default().push(decl);
        }
        groups
    }
}
