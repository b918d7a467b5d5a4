//! Credential ledger.
//!
//! The `Ledger` trait is the minimal non-fungible ledger the registry needs:
//! it issues unique ids, records the owner of each id, and retires ids. There
//! is deliberately no transfer operation; a credential's owner is set at mint
//! and only ever removed. `MemoryLedger` is a `BTreeMap`-backed implementation.

use crate::identity::Identity;
use crate::{PopError, PopResult};
use std::collections::BTreeMap;

/// Ledger-issued credential id. The first id issued is 1.
pub type CredentialId = u64;

/// Trait for credential ledgers.
pub trait Ledger {
    /// Issue a fresh id owned by `to`.
    ///
    /// Ids are never reused, including ids that have since been retired.
    fn mint(&mut self, to: &Identity) -> PopResult<CredentialId>;

    /// The current owner of `id`.
    ///
    /// Returns `PopError::NotFound` for ids never issued or already retired.
    fn owner_of(&self, id: CredentialId) -> PopResult<Identity>;

    /// Remove the owner record of `id`. Irreversible.
    ///
    /// Returns `PopError::NotFound` if there is no owner record.
    fn retire(&mut self, id: CredentialId) -> PopResult<()>;

    /// Whether `id` currently has an owner record.
    fn exists(&self, id: CredentialId) -> bool;

    /// Number of live credentials owned by `owner`.
    fn balance_of(&self, owner: &Identity) -> usize;

    /// Number of ids issued so far, retired ones included.
    fn minted(&self) -> u64;

    /// Number of credentials currently owned.
    fn live(&self) -> usize;
}

/// In-memory credential ledger.
///
/// Not thread-safe on its own; see `SharedPop` for a lock-guarded registry.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    owners: BTreeMap<CredentialId, Identity>,
    last_id: CredentialId,
}

impl MemoryLedger {
    /// Create a new, empty `MemoryLedger`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ledger for MemoryLedger {
    fn mint(&mut self, to: &Identity) -> PopResult<CredentialId> {
        let id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| PopError::LedgerError("credential id space exhausted".to_string()))?;
        self.owners.insert(id, to.clone());
        self.last_id = id;
        Ok(id)
    }

    fn owner_of(&self, id: CredentialId) -> PopResult<Identity> {
        self.owners
            .get(&id)
            .cloned()
            .ok_or_else(|| PopError::NotFound(format!("invalid token ID {}", id)))
    }

    fn retire(&mut self, id: CredentialId) -> PopResult<()> {
        self.owners
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PopError::NotFound(format!("invalid token ID {}", id)))
    }

    fn exists(&self, id: CredentialId) -> bool {
        self.owners.contains_key(&id)
    }

    fn balance_of(&self, owner: &Identity) -> usize {
        self.owners.values().filter(|o| *o == owner).count()
    }

    fn minted(&self) -> u64 {
        self.last_id
    }

    fn live(&self) -> usize {
        self.owners.len()
    }
}
