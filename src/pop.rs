//! The `Pop` registry facade.
//!
//! Composes the promise registry, the signing engine, the burn authorization
//! engine, and a credential ledger behind the operations callers use. Every
//! operation takes the caller's identity explicitly and is all-or-nothing: a
//! rejected call leaves registry, ledger, and journal exactly as they were.

use crate::burn;
use crate::config::PopConfig;
use crate::events::{EventJournal, EventRecord, PopEvent};
use crate::identity::Identity;
use crate::ledger::{CredentialId, Ledger, MemoryLedger};
use crate::promise::{BurnAuth, PromiseClass, PromiseDeclaration, PromiseHash};
use crate::registry::PromiseRegistry;
use crate::signing::SigningEngine;
use crate::PopResult;
use tracing::{info, warn};

pub struct Pop<L: Ledger = MemoryLedger> {
    config: PopConfig,
    registry: PromiseRegistry,
    signing: SigningEngine,
    ledger: L,
    journal: EventJournal,
}

impl Pop<MemoryLedger> {
    /// A registry over an empty in-memory ledger with default configuration.
    pub fn new() -> Self {
        Self::with_config(PopConfig::default())
    }

    pub fn with_config(config: PopConfig) -> Self {
        Self::with_ledger(config, MemoryLedger::new())
    }
}

impl Default for Pop<MemoryLedger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Ledger> Pop<L> {
    /// A registry over a caller-provided ledger.
    pub fn with_ledger(config: PopConfig, ledger: L) -> Self {
        let journal = EventJournal::new(config.record_events);
        Pop {
            config,
            registry: PromiseRegistry::new(),
            signing: SigningEngine::new(),
            ledger,
            journal,
        }
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Declare a new promise class with `caller` as its creator.
    ///
    /// # Errors
    /// `PopError::AlreadyExists` if the hash is already declared.
    pub fn create_promise(&mut self, caller: &Identity, decl: PromiseDeclaration) -> PopResult<()> {
        let hash = decl.promise_hash.clone();
        let class = self.registry.create(caller, decl).inspect_err(|e| {
            warn!(promise = %hash, caller = %caller, error = %e, "createPromise rejected");
        })?;

        info!(
            promise = %hash,
            creator = %caller,
            burn_auth = %class.burn_auth,
            receivers = class.receivers.len(),
            "Promise class created"
        );
        self.journal.record(PopEvent::PromiseCreated {
            promise_hash: hash,
            creator: caller.clone(),
            burn_auth: class.burn_auth,
        });
        Ok(())
    }

    /// Sign promise `hash` and receive a new credential.
    ///
    /// # Errors
    /// `PopError::NotFound` for an unknown hash, `PopError::NotAuthorizedReceiver`
    /// if the class is restricted and `caller` is not on its receiver list.
    pub fn sign_promise(&mut self, caller: &Identity, hash: &PromiseHash) -> PopResult<CredentialId> {
        let id = self
            .signing
            .sign(&self.registry, &mut self.ledger, caller, hash)
            .inspect_err(|e| {
                warn!(promise = %hash, caller = %caller, error = %e, "signPromise rejected");
            })?;

        let class = self.registry.get(hash)?;
        info!(promise = %hash, signer = %caller, credential = id, "Credential issued");
        self.journal.record(PopEvent::Issued {
            from: class.creator.clone(),
            to: caller.clone(),
            credential_id: id,
            burn_auth: class.burn_auth,
        });
        Ok(id)
    }

    /// Burn credential `id` of promise `hash`.
    ///
    /// # Errors
    /// `PopError::NotFound`, `PopError::InvalidReference`,
    /// `PopError::OnlyIssuerMayBurn`, `PopError::OnlyOwnerMayBurn`, or
    /// `PopError::BurnNotAllowed`; see [`burn::burn_token`].
    pub fn burn_token(&mut self, caller: &Identity, id: CredentialId, hash: &PromiseHash) -> PopResult<()> {
        let record = burn::burn_token(
            &self.registry,
            &mut self.signing,
            &mut self.ledger,
            caller,
            id,
            hash,
        )
        .inspect_err(|e| {
            warn!(promise = %hash, credential = id, caller = %caller, error = %e, "burnToken rejected");
        })?;

        info!(
            promise = %hash,
            credential = id,
            by = %caller,
            burn_auth = %record.burn_auth,
            "Credential burned"
        );
        self.journal.record(PopEvent::Burned {
            credential_id: id,
            promise_hash: record.promise_hash,
            by: caller.clone(),
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn get_promise(&self, hash: &PromiseHash) -> PopResult<&PromiseClass> {
        self.registry.get(hash)
    }

    pub fn owner_of(&self, id: CredentialId) -> PopResult<Identity> {
        self.ledger.owner_of(id)
    }

    /// Burn policy snapshotted onto credential `id` when it was minted.
    pub fn burn_auth_of(&self, id: CredentialId) -> PopResult<BurnAuth> {
        self.signing.record(id).map(|r| r.burn_auth)
    }

    /// The promise class a live credential was minted under.
    pub fn promise_of(&self, id: CredentialId) -> PopResult<&PromiseHash> {
        self.signing.record(id).map(|r| &r.promise_hash)
    }

    /// Display reference of the class a live credential belongs to.
    pub fn display_ref_of(&self, id: CredentialId) -> PopResult<&str> {
        let hash = self.promise_of(id)?;
        Ok(self.registry.get(hash)?.display_ref.as_str())
    }

    pub fn balance_of(&self, owner: &Identity) -> usize {
        self.ledger.balance_of(owner)
    }

    /// Live credentials minted under `hash`, ascending by id.
    pub fn credentials_of_promise(&self, hash: &PromiseHash) -> Vec<CredentialId> {
        self.signing.credentials_of(hash)
    }

    pub fn promise_count(&self) -> usize {
        self.registry.count()
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn events(&self) -> &[EventRecord] {
        self.journal.records()
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PopError;

    fn declare(pop: &mut Pop, creator: &Identity, burn_auth: BurnAuth, receivers: Vec<Identity>) -> PromiseHash {
        let hash = crate::promise::derive_promise_hash("12345", creator);
        pop.create_promise(
            creator,
            PromiseDeclaration {
                promise_hash: hash.clone(),
                burn_auth,
                display_ref: "12345".to_string(),
                receivers,
            },
        )
        .unwrap();
        hash
    }

    #[test]
    fn test_events_follow_successful_operations() {
        let mut pop = Pop::new();
        let issuer = Identity::new("issuer");
        let bob = Identity::new("bob");
        let hash = declare(&mut pop, &issuer, BurnAuth::Both, vec![]);

        let id = pop.sign_promise(&bob, &hash).unwrap();
        assert_eq!(pop.burn_token(&Identity::new("eve"), id, &hash), Err(PopError::OnlyOwnerMayBurn));
        pop.burn_token(&bob, id, &hash).unwrap();

        let events: Vec<_> = pop.events().iter().map(|r| r.event.clone()).collect();
        assert_eq!(
            events,
            vec![
                PopEvent::PromiseCreated {
                    promise_hash: hash.clone(),
                    creator: issuer.clone(),
                    burn_auth: BurnAuth::Both,
                },
                PopEvent::Issued {
                    from: issuer,
                    to: bob.clone(),
                    credential_id: id,
                    burn_auth: BurnAuth::Both,
                },
                PopEvent::Burned {
                    credential_id: id,
                    promise_hash: hash,
                    by: bob,
                },
            ]
        );
    }

    #[test]
    fn test_journal_disabled_by_config() {
        let mut pop = Pop::with_config(PopConfig {
            record_events: false,
            ..PopConfig::default()
        });
        let issuer = Identity::new("issuer");
        let hash = declare(&mut pop, &issuer, BurnAuth::Both, vec![]);
        pop.sign_promise(&issuer, &hash).unwrap();
        assert!(pop.events().is_empty());
    }

    #[test]
    fn test_display_ref_and_promise_of() {
        let mut pop = Pop::new();
        let issuer = Identity::new("issuer");
        let hash = declare(&mut pop, &issuer, BurnAuth::IssuerOnly, vec![]);
        let id = pop.sign_promise(&Identity::new("bob"), &hash).unwrap();

        assert_eq!(pop.promise_of(id).unwrap(), &hash);
        assert_eq!(pop.display_ref_of(id).unwrap(), "12345");
        assert_eq!(pop.name(), "Proof of Promise");
        assert_eq!(pop.symbol(), "POP");
    }

    #[test]
    fn test_wrong_promise_hash_is_invalid_reference() {
        let mut pop = Pop::new();
        let issuer = Identity::new("issuer");
        let other_issuer = Identity::new("other");
        let hash = declare(&mut pop, &issuer, BurnAuth::Both, vec![]);
        let other = declare(&mut pop, &other_issuer, BurnAuth::Both, vec![]);
        let id = pop.sign_promise(&Identity::new("bob"), &hash).unwrap();

        let err = pop.burn_token(&other_issuer, id, &other).unwrap_err();
        assert!(matches!(err, PopError::InvalidReference { credential_id, .. } if credential_id == id));
        assert!(pop.owner_of(id).is_ok());
    }
}
