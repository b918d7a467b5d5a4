//! Caller identities and request authentication.
//!
//! Every registry operation takes the caller's `Identity` as an explicit
//! argument. How that identity is established is the job of this layer: a
//! caller signs its request payload with an Ed25519 key, and `authenticate`
//! turns a verified request into the hex-encoded public key that names the
//! caller. The registry treats identities as opaque and only compares them.

use crate::crypto;
use crate::{PopError, PopResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated caller identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap an already-verified identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Identity(id.into())
    }

    /// The identity named by an Ed25519 public key (lowercase hex).
    pub fn from_verifying_key(key: &ed25519_dalek::VerifyingKey) -> Self {
        Identity(hex::encode(key.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&crypto::KeyPair> for Identity {
    fn from(kp: &crypto::KeyPair) -> Self {
        Identity::from_verifying_key(&kp.verifying_key)
    }
}

/// A request payload signed by its caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedRequest {
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub payload: String,
    pub signature: String,
}

impl SignedRequest {
    /// Sign `payload` with the caller's key pair.
    pub fn sign(payload: impl Into<String>, kp: &crypto::KeyPair) -> Self {
        let payload = payload.into();
        let signature = crypto::sign(payload.as_bytes(), &kp.signing_key);
        SignedRequest {
            public_key: kp.public_key_hex.clone(),
            payload,
            signature: hex::encode(signature),
        }
    }
}

/// Verify a signed request and return the identity of its caller.
///
/// # Errors
/// Returns `PopError::CryptoError` if the public key or signature cannot be
/// decoded or the signature does not cover the payload.
pub fn authenticate(request: &SignedRequest) -> PopResult<Identity> {
    let vk = crypto::verifying_key_from_hex(&request.public_key)?;
    let sig_bytes = hex::decode(&request.signature)
        .map_err(|e| PopError::CryptoError(format!("Signature is not valid hex: {}", e)))?;
    if !crypto::verify(request.payload.as_bytes(), &sig_bytes, &vk) {
        return Err(PopError::CryptoError(
            "Request signature verification failed".to_string(),
        ));
    }
    Ok(Identity::from_verifying_key(&vk))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_signed_request() {
        let kp = crypto::generate_key_pair().unwrap();
        let request = SignedRequest::sign("signPromise", &kp);
        let caller = authenticate(&request).unwrap();
        assert_eq!(caller, Identity::from(&kp));
        assert_eq!(caller.as_str(), kp.public_key_hex);
    }

    #[test]
    fn test_authenticate_rejects_tampered_payload() {
        let kp = crypto::generate_key_pair().unwrap();
        let mut request = SignedRequest::sign("signPromise", &kp);
        request.payload = "burnToken".to_string();
        assert!(matches!(authenticate(&request), Err(PopError::CryptoError(_))));
    }

    #[test]
    fn test_authenticate_rejects_foreign_key() {
        let kp = crypto::generate_key_pair().unwrap();
        let other = crypto::generate_key_pair().unwrap();
        let mut request = SignedRequest::sign("createPromise", &kp);
        request.public_key = other.public_key_hex;
        assert!(authenticate(&request).is_err());
    }

    #[test]
    fn test_identity_serializes_transparently() {
        let id = Identity::new("alice");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"alice\"");
        assert_eq!(id.to_string(), "alice");
    }
}
