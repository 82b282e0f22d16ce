// crates/late-economics/src/registry.rs
//
// Protocol registry bookkeeping: record construction and owner checks.

use late_core::{Identity, ProtocolRegistryRecord, StakingError, PROTOCOL_FEE};

/// Build the registry record for a token.
///
/// An absent or all-zero fee recipient falls back to the owner.
pub fn new_registry(
    owner: Identity,
    token: Identity,
    fee_recipient: Option<Identity>,
) -> ProtocolRegistryRecord {
    let fee_recipient = match fee_recipient {
        Some(recipient) if !recipient.is_zero() => recipient,
        _ => owner,
    };

    ProtocolRegistryRecord {
        owner,
        token,
        fee_recipient,
        staking_fee: PROTOCOL_FEE,
    }
}

/// Reject callers other than the registry owner.
pub fn ensure_owner(registry: &ProtocolRegistryRecord, caller: &Identity) -> Result<(), StakingError> {
    if registry.owner != *caller {
        return Err(StakingError::Unauthorized(format!(
            "{} is not the protocol owner for token {}",
            caller, registry.token
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_recipient_defaults_to_owner() {
        let owner = Identity::from_label("owner");
        let token = Identity::from_label("token");

        assert_eq!(new_registry(owner, token, None).fee_recipient, owner);
        assert_eq!(new_registry(owner, token, Some(Identity::ZERO)).fee_recipient, owner);

        let treasury = Identity::from_label("treasury");
        assert_eq!(new_registry(owner, token, Some(treasury)).fee_recipient, treasury);
    }

    #[test]
    fn test_registry_carries_protocol_fee() {
        let registry = new_registry(Identity::random(), Identity::random(), None);
        assert_eq!(registry.staking_fee, PROTOCOL_FEE);
    }

    #[test]
    fn test_ensure_owner() {
        let owner = Identity::from_label("owner");
        let registry = new_registry(owner, Identity::from_label("token"), None);
        assert!(ensure_owner(&registry, &owner).is_ok());
        assert!(matches!(
            ensure_owner(&registry, &Identity::from_label("mallory")),
            Err(StakingError::Unauthorized(_))
        ));
    }
}
