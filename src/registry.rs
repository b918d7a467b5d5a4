//! Promise Registry.
//!
//! Owns the mapping from promise hash to promise class. Classes are created
//! once and never mutated or removed, even after every credential minted
//! under them has been burned.

use crate::identity::Identity;
use crate::promise::{PromiseClass, PromiseDeclaration, PromiseHash};
use crate::{PopError, PopResult};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PromiseRegistry {
    promises: HashMap<PromiseHash, PromiseClass>,
}

impl PromiseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new promise class created by `creator`.
    ///
    /// The declaration is not otherwise validated: an empty receiver list is
    /// a valid, unrestricted class.
    ///
    /// # Errors
    /// Returns `PopError::AlreadyExists` if a class is already stored under the
    /// declaration's hash. The stored class is left untouched.
    pub fn create(&mut self, creator: &Identity, decl: PromiseDeclaration) -> PopResult<&PromiseClass> {
        use std::collections::hash_map::Entry;

        match self.promises.entry(decl.promise_hash.clone()) {
            Entry::Occupied(existing) => Err(PopError::AlreadyExists(existing.key().to_string())),
            Entry::Vacant(slot) => Ok(slot.insert(PromiseClass::from_declaration(creator.clone(), decl))),
        }
    }

    /// Look up a promise class.
    pub fn get(&self, hash: &PromiseHash) -> PopResult<&PromiseClass> {
        self.promises
            .get(hash)
            .ok_or_else(|| PopError::NotFound(format!("promise {}", hash)))
    }

    pub fn contains(&self, hash: &PromiseHash) -> bool {
        self.promises.contains_key(hash)
    }

    pub fn count(&self) -> usize {
        self.promises.len()
    }

    /// Every class declared by `creator`, in no particular order.
    pub fn created_by<'a>(&'a self, creator: &'a Identity) -> impl Iterator<Item = (&'a PromiseHash, &'a PromiseClass)> + 'a {
        self.promises.iter().filter(move |(_, class)| &class.creator == creator)
    }
}
