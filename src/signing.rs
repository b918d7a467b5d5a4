//! Signing Engine.
//!
//! Validates a claim against a promise class's receiver list, mints one
//! credential on the ledger, and records the credential's link back to its
//! class together with a snapshot of the class's burn policy.
//!
//! Signing is repeatable: the same eligible caller may sign the same class
//! again and receives a new, distinct credential each time.

use crate::identity::Identity;
use crate::ledger::{CredentialId, Ledger};
use crate::promise::{BurnAuth, PromiseHash};
use crate::registry::PromiseRegistry;
use crate::{PopError, PopResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the registry remembers about a minted credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(rename = "promiseHash")]
    pub promise_hash: PromiseHash,
    #[serde(rename = "burnAuth")]
    pub burn_auth: BurnAuth,
}

#[derive(Debug, Default)]
pub struct SigningEngine {
    records: BTreeMap<CredentialId, CredentialRecord>,
}

impl SigningEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign promise `hash` on behalf of `caller` and return the new credential id.
    ///
    /// # Errors
    /// - `PopError::NotFound` if no class exists for `hash`
    /// - `PopError::NotAuthorizedReceiver` if the class is restricted and
    ///   `caller` is not listed
    ///
    /// Both are raised before the ledger is touched.
    pub fn sign<L: Ledger>(
        &mut self,
        registry: &PromiseRegistry,
        ledger: &mut L,
        caller: &Identity,
        hash: &PromiseHash,
    ) -> PopResult<CredentialId> {
        let class = registry.get(hash)?;
        if !class.admits(caller) {
            return Err(PopError::NotAuthorizedReceiver(caller.to_string()));
        }

        let id = ledger.mint(caller)?;
        self.records.insert(
            id,
            CredentialRecord {
                promise_hash: hash.clone(),
                burn_auth: class.burn_auth,
            },
        );
        Ok(id)
    }

    /// The record of a live credential.
    pub fn record(&self, id: CredentialId) -> PopResult<&CredentialRecord> {
        self.records
            .get(&id)
            .ok_or_else(|| PopError::NotFound(format!("invalid token ID {}", id)))
    }

    /// Drop the record of a credential that has been retired.
    pub(crate) fn forget(&mut self, id: CredentialId) -> Option<CredentialRecord> {
        self.records.remove(&id)
    }

    /// Ids of live credentials minted under `hash`, ascending.
    pub fn credentials_of(&self, hash: &PromiseHash) -> Vec<CredentialId> {
        self.records
            .iter()
            .filter(|(_, record)| &record.promise_hash == hash)
            .map(|(id, _)| *id)
            .collect()
    }
}
