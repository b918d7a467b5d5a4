//! Promise classes: declarations, burn policies, and their identifiers.
//!
//! A promise class is an immutable declaration keyed by a `PromiseHash`. The
//! hash is computed by the caller and binds the class's display reference to
//! its creator, so identical display references from different creators never
//! collide. The registry treats the hash as opaque.

use crate::crypto;
use crate::identity::Identity;
use crate::{PopError, PopResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Caller-supplied identifier of a promise class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromiseHash(String);

impl PromiseHash {
    pub fn new(hash: impl Into<String>) -> Self {
        PromiseHash(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromiseHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who may burn a credential minted under a promise class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BurnAuth {
    IssuerOnly,
    OwnerOnly,
    Both,
    Neither,
}

impl BurnAuth {
    /// Numeric encoding: `IssuerOnly`=0, `OwnerOnly`=1, `Both`=2, `Neither`=3.
    pub fn code(self) -> u8 {
        match self {
            BurnAuth::IssuerOnly => 0,
            BurnAuth::OwnerOnly => 1,
            BurnAuth::Both => 2,
            BurnAuth::Neither => 3,
        }
    }
}

impl TryFrom<u8> for BurnAuth {
    type Error = PopError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BurnAuth::IssuerOnly),
            1 => Ok(BurnAuth::OwnerOnly),
            2 => Ok(BurnAuth::Both),
            3 => Ok(BurnAuth::Neither),
            other => Err(PopError::InvalidInput(format!(
                "burnAuth code must be 0..=3, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for BurnAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BurnAuth::IssuerOnly => "IssuerOnly",
            BurnAuth::OwnerOnly => "OwnerOnly",
            BurnAuth::Both => "Both",
            BurnAuth::Neither => "Neither",
        };
        f.write_str(name)
    }
}

/// The arguments of `createPromise`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromiseDeclaration {
    #[serde(rename = "promiseHash")]
    pub promise_hash: PromiseHash,
    #[serde(rename = "burnAuth")]
    pub burn_auth: BurnAuth,
    #[serde(rename = "displayRef")]
    pub display_ref: String,
    /// Empty means anyone may sign.
    #[serde(default)]
    pub receivers: Vec<Identity>,
}

/// A stored, immutable promise class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromiseClass {
    pub creator: Identity,
    #[serde(rename = "burnAuth")]
    pub burn_auth: BurnAuth,
    #[serde(rename = "displayRef")]
    pub display_ref: String,
    pub receivers: Vec<Identity>,
}

impl PromiseClass {
    /// Build the class a declaration describes, created by `creator`.
    pub fn from_declaration(creator: Identity, decl: PromiseDeclaration) -> Self {
        PromiseClass {
            creator,
            burn_auth: decl.burn_auth,
            display_ref: decl.display_ref,
            receivers: decl.receivers,
        }
    }

    pub fn is_restricted(&self) -> bool {
        !self.receivers.is_empty()
    }

    /// Whether `caller` may sign this class: always when unrestricted,
    /// otherwise only when listed.
    pub fn admits(&self, caller: &Identity) -> bool {
        !self.is_restricted() || self.receivers.contains(caller)
    }
}

// ---------------------------------------------------------------------------
// Hash derivation
// ---------------------------------------------------------------------------

/// Derive the promise hash a creator should declare a display reference under.
///
/// SHA-256 over `"{display_ref}:{creator}"`. This is a caller-side helper; the
/// registry accepts whatever hash it is given.
pub fn derive_promise_hash(display_ref: &str, creator: &Identity) -> PromiseHash {
    PromiseHash(crypto::sha256_string(&format!("{}:{}", display_ref, creator)))
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serialize a PromiseClass to a JSON string.
pub fn serialize_promise(class: &PromiseClass) -> PopResult<String> {
    serde_json::to_string_pretty(class)
        .map_err(|e| PopError::SerializationError(format!("Failed to serialize promise: {}", e)))
}

/// Deserialize a JSON string into a PromiseClass.
pub fn deserialize_promise(json: &str) -> PopResult<PromiseClass> {
    serde_json::from_str(json)
        .map_err(|e| PopError::SerializationError(format!("Failed to deserialize promise: {}", e)))
}

/// Deserialize a JSON string into a PromiseDeclaration.
pub fn deserialize_declaration(json: &str) -> PopResult<PromiseDeclaration> {
    serde_json::from_str(json)
        .map_err(|e| PopError::SerializationError(format!("Failed to deserialize declaration: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_with(receivers: Vec<Identity>) -> PromiseClass {
        PromiseClass {
            creator: Identity::new("issuer"),
            burn_auth: BurnAuth::Both,
            display_ref: "12345".to_string(),
            receivers,
        }
    }

    #[test]
    fn test_unrestricted_class_admits_anyone() {
        let class = class_with(vec![]);
        assert!(!class.is_restricted());
        assert!(class.admits(&Identity::new("stranger")));
    }

    #[test]
    fn test_restricted_class_admits_only_listed() {
        let class = class_with(vec![Identity::new("bob"), Identity::new("carol")]);
        assert!(class.admits(&Identity::new("carol")));
        assert!(!class.admits(&Identity::new("dave")));
        assert!(!class.admits(&Identity::new("issuer")));
    }

    #[test]
    fn test_burn_auth_codes() {
        for auth in [BurnAuth::IssuerOnly, BurnAuth::OwnerOnly, BurnAuth::Both, BurnAuth::Neither] {
            assert_eq!(BurnAuth::try_from(auth.code()).unwrap(), auth);
        }
        assert!(matches!(BurnAuth::try_from(4), Err(PopError::InvalidInput(_))));
    }

    #[test]
    fn test_derived_hash_binds_creator() {
        let alice = Identity::new("alice");
        let bob = Identity::new("bob");
        assert_eq!(derive_promise_hash("12345", &alice), derive_promise_hash("12345", &alice));
        assert_ne!(derive_promise_hash("12345", &alice), derive_promise_hash("12345", &bob));
        assert_ne!(derive_promise_hash("12345", &alice), derive_promise_hash("54321", &alice));
    }

    #[test]
    fn test_declaration_without_receivers_parses() {
        let decl = deserialize_declaration(
            r#"{"promiseHash":"abc","burnAuth":"Neither","displayRef":"ipfs://x"}"#,
        )
        .unwrap();
        assert_eq!(decl.burn_auth, BurnAuth::Neither);
        assert!(decl.receivers.is_empty());
    }

    #[test]
    fn test_promise_json_field_names() {
        let json = serialize_promise(&class_with(vec![Identity::new("bob")])).unwrap();
        assert!(json.contains("\"burnAuth\": \"Both\""));
        assert!(json.contains("\"displayRef\""));
        let restored = deserialize_promise(&json).unwrap();
        assert_eq!(restored.receivers, vec![Identity::new("bob")]);
    }
}
