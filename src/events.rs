//! Event journal.
//!
//! Successful operations append one event each. Rejected operations leave
//! no trace here.

use crate::crypto;
use crate::identity::Identity;
use crate::ledger::CredentialId;
use crate::promise::{BurnAuth, PromiseHash};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PopEvent {
    PromiseCreated {
        #[serde(rename = "promiseHash")]
        promise_hash: PromiseHash,
        creator: Identity,
        #[serde(rename = "burnAuth")]
        burn_auth: BurnAuth,
    },
    /// A credential was signed. `from` is the class creator, `to` the signer.
    Issued {
        from: Identity,
        to: Identity,
        #[serde(rename = "credentialId")]
        credential_id: CredentialId,
        #[serde(rename = "burnAuth")]
        burn_auth: BurnAuth,
    },
    Burned {
        #[serde(rename = "credentialId")]
        credential_id: CredentialId,
        #[serde(rename = "promiseHash")]
        promise_hash: PromiseHash,
        by: Identity,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(flatten)]
    pub event: PopEvent,
    #[serde(rename = "recordedAt")]
    pub recorded_at: String,
}

#[derive(Debug, Default)]
pub struct EventJournal {
    enabled: bool,
    records: Vec<EventRecord>,
}

impl EventJournal {
    pub fn new(enabled: bool) -> Self {
        EventJournal {
            enabled,
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, event: PopEvent) {
        if !self.enabled {
            return;
        }
        self.records.push(EventRecord {
            event,
            recorded_at: crypto::timestamp(),
        });
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
