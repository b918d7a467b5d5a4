//! Cryptographic primitives used around the registry.
//!
//! Ed25519 key pairs and signatures back the identity layer (who is calling),
//! SHA-256 backs caller-side promise hash derivation. The registry core itself
//! never hashes or verifies anything; these helpers live at its edges.

use crate::PopError;
use ed25519_dalek::{Signer, Verifier};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// An Ed25519 key pair containing the signing key, verifying key, and hex-encoded public key.
pub struct KeyPair {
    pub signing_key: ed25519_dalek::SigningKey,
    pub verifying_key: ed25519_dalek::VerifyingKey,
    pub public_key_hex: String,
}

/// Generate a new Ed25519 key pair from cryptographically secure randomness.
pub fn generate_key_pair() -> Result<KeyPair, PopError> {
    let mut rng = rand::thread_rng();
    let mut secret = [0u8; 32];
    rng.fill_bytes(&mut secret);
    Ok(key_pair_from_secret(&secret))
}

/// Reconstruct a `KeyPair` from a 32-byte private key.
///
/// # Errors
/// Returns `PopError::CryptoError` if the byte slice is not exactly 32 bytes.
pub fn key_pair_from_private_key(bytes: &[u8]) -> Result<KeyPair, PopError> {
    let secret: [u8; 32] = bytes
        .try_into()
        .map_err(|_| PopError::CryptoError(format!("Private key must be 32 bytes, got {}", bytes.len())))?;
    Ok(key_pair_from_secret(&secret))
}

fn key_pair_from_secret(secret: &[u8; 32]) -> KeyPair {
    let signing_key = ed25519_dalek::SigningKey::from_bytes(secret);
    let verifying_key = signing_key.verifying_key();
    let public_key_hex = hex::encode(verifying_key.as_bytes());
    KeyPair {
        signing_key,
        verifying_key,
        public_key_hex,
    }
}

/// Sign a message with an Ed25519 signing key.
///
/// Returns the 64-byte signature as a `Vec<u8>`.
pub fn sign(message: &[u8], signing_key: &ed25519_dalek::SigningKey) -> Vec<u8> {
    signing_key.sign(message).to_bytes().to_vec()
}

/// Verify an Ed25519 signature against a message and verifying key.
///
/// Returns `true` if the signature is valid, `false` otherwise. Never panics
/// on malformed inputs; any error is treated as an invalid signature.
pub fn verify(
    message: &[u8],
    signature: &[u8],
    verifying_key: &ed25519_dalek::VerifyingKey,
) -> bool {
    let sig_bytes: [u8; 64] = match signature.try_into() {
        Ok(b) => b,
        Err(_) => return false,
    };
    let sig = ed25519_dalek::Signature::from_bytes(&sig_bytes);
    verifying_key.verify(message, &sig).is_ok()
}

/// Parse a hex-encoded Ed25519 public key.
///
/// # Errors
/// Returns `PopError::CryptoError` for malformed hex, wrong length, or a
/// point that is not a valid curve element.
pub fn verifying_key_from_hex(public_key_hex: &str) -> Result<ed25519_dalek::VerifyingKey, PopError> {
    let bytes = hex::decode(public_key_hex)
        .map_err(|e| PopError::CryptoError(format!("Public key is not valid hex: {}", e)))?;
    let array: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| PopError::CryptoError(format!("Public key must be 32 bytes, got {}", bytes.len())))?;
    ed25519_dalek::VerifyingKey::from_bytes(&array)
        .map_err(|e| PopError::CryptoError(format!("Invalid public key: {}", e)))
}

/// Compute the SHA-256 hash of raw bytes and return it as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute the SHA-256 hash of a UTF-8 string and return it as a lowercase hex string.
pub fn sha256_string(data: &str) -> String {
    sha256_hex(data.as_bytes())
}

/// Return the current UTC time as an ISO 8601 string.
///
/// Format: `YYYY-MM-DDTHH:MM:SS.sssZ`
pub fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
