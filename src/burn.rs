//! Burn Authorization Engine.
//!
//! A credential can only be burned by the parties its burn policy names:
//!
//! | policy       | may burn                     | otherwise             |
//! |--------------|------------------------------|-----------------------|
//! | `IssuerOnly` | class creator                | `OnlyIssuerMayBurn`   |
//! | `OwnerOnly`  | credential owner             | `OnlyOwnerMayBurn`    |
//! | `Both`       | creator or owner             | `OnlyOwnerMayBurn`    |
//! | `Neither`    | nobody                       | `BurnNotAllowed`      |
//!
//! Burning retires the credential on the ledger. `Minted -> Retired` is the
//! only transition a credential ever makes.

use crate::identity::Identity;
use crate::ledger::{CredentialId, Ledger};
use crate::promise::{BurnAuth, PromiseHash};
use crate::registry::PromiseRegistry;
use crate::signing::{CredentialRecord, SigningEngine};
use crate::{PopError, PopResult};

/// Decide whether `caller` may burn a credential under `policy`.
pub fn authorize_burn(
    policy: BurnAuth,
    caller: &Identity,
    creator: &Identity,
    owner: &Identity,
) -> PopResult<()> {
    match policy {
        BurnAuth::IssuerOnly if caller == creator => Ok(()),
        BurnAuth::IssuerOnly => Err(PopError::OnlyIssuerMayBurn),
        BurnAuth::OwnerOnly if caller == owner => Ok(()),
        BurnAuth::OwnerOnly => Err(PopError::OnlyOwnerMayBurn),
        BurnAuth::Both if caller == creator || caller == owner => Ok(()),
        BurnAuth::Both => Err(PopError::OnlyOwnerMayBurn),
        BurnAuth::Neither => Err(PopError::BurnNotAllowed),
    }
}

/// Burn credential `id`, which must belong to promise `hash`.
///
/// Checks run in order: the credential exists (`NotFound`), it was minted
/// under `hash` (`InvalidReference`), and `caller` satisfies its policy.
/// Nothing is mutated until all three pass. Returns the retired record.
pub fn burn_token<L: Ledger>(
    registry: &PromiseRegistry,
    signing: &mut SigningEngine,
    ledger: &mut L,
    caller: &Identity,
    id: CredentialId,
    hash: &PromiseHash,
) -> PopResult<CredentialRecord> {
    let owner = ledger.owner_of(id)?;
    let record = signing.record(id)?;
    if &record.promise_hash != hash {
        return Err(PopError::InvalidReference {
            credential_id: id,
            promise_hash: hash.to_string(),
        });
    }
    let class = registry.get(hash)?;
    authorize_burn(record.burn_auth, caller, &class.creator, &owner)?;

    ledger.retire(id)?;
    signing
        .forget(id)
        .ok_or_else(|| PopError::NotFound(format!("invalid token ID {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties() -> (Identity, Identity, Identity) {
        (Identity::new("issuer"), Identity::new("owner"), Identity::new("stranger"))
    }

    #[test]
    fn test_issuer_only() {
        let (issuer, owner, stranger) = parties();
        assert!(authorize_burn(BurnAuth::IssuerOnly, &issuer, &issuer, &owner).is_ok());
        assert_eq!(
            authorize_burn(BurnAuth::IssuerOnly, &owner, &issuer, &owner),
            Err(PopError::OnlyIssuerMayBurn)
        );
        assert_eq!(
            authorize_burn(BurnAuth::IssuerOnly, &stranger, &issuer, &owner),
            Err(PopError::OnlyIssuerMayBurn)
        );
    }

    #[test]
    fn test_owner_only() {
        let (issuer, owner, _) = parties();
        assert!(authorize_burn(BurnAuth::OwnerOnly, &owner, &issuer, &owner).is_ok());
        assert_eq!(
            authorize_burn(BurnAuth::OwnerOnly, &issuer, &issuer, &owner),
            Err(PopError::OnlyOwnerMayBurn)
        );
    }

    #[test]
    fn test_both() {
        let (issuer, owner, stranger) = parties();
        assert!(authorize_burn(BurnAuth::Both, &issuer, &issuer, &owner).is_ok());
        assert!(authorize_burn(BurnAuth::Both, &owner, &issuer, &owner).is_ok());
        assert_eq!(
            authorize_burn(BurnAuth::Both, &stranger, &issuer, &owner),
            Err(PopError::OnlyOwnerMayBurn)
        );
    }

    #[test]
    fn test_neither_rejects_everyone() {
        let (issuer, owner, stranger) = parties();
        for caller in [&issuer, &owner, &stranger] {
            assert_eq!(
                authorize_burn(BurnAuth::Neither, caller, &issuer, &owner),
                Err(PopError::BurnNotAllowed)
            );
        }
    }

    #[test]
    fn test_self_issued_credential_under_owner_only() {
        // creator signed their own class, so creator is also the owner
        let issuer = Identity::new("issuer");
        assert!(authorize_burn(BurnAuth::OwnerOnly, &issuer, &issuer, &issuer).is_ok());
    }
}
