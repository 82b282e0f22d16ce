// crates/late-economics/src/handlers/init_protocol.rs
//
// initialize-protocol: create the registry record for a token, once.

use late_core::{AccountRecord, Identity, ProtocolRegistryRecord, StakingError};

use crate::registry::new_registry;

use super::{HandlerContext, UnitOfWork};

/// Create the registry for `token`.
///
/// Anyone may call this; the existence check on the derived registry address
/// makes it succeed at most once per token.
///
/// # Errors
/// `StakingError::AlreadyInitialized` if a registry already exists. The
/// existing record is left untouched.
pub fn init_protocol(
    ctx: &HandlerContext<'_>,
    owner: Identity,
    token: Identity,
    fee_recipient: Option<Identity>,
) -> Result<ProtocolRegistryRecord, StakingError> {
    let address = ctx.registry_address(&token);
    let mut work = UnitOfWork::new(ctx.store);

    if work.exists(&address)? {
        tracing::warn!("Rejected re-initialization of protocol for token {} by {}", token, owner);
        return Err(StakingError::AlreadyInitialized(format!(
            "protocol registry for token {} already exists",
            token
        )));
    }

    let registry = new_registry(owner, token, fee_recipient);
    work.stage(address, AccountRecord::Registry(registry.clone()));
    work.commit()?;

    tracing::info!(
        "Protocol initialized for token {} (owner {}, fee recipient {})",
        token,
        registry.owner,
        registry.fee_recipient
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::Harness;

    #[test]
    fn test_init_creates_registry() {
        let h = Harness::default();
        let ctx = h.ctx();
        let owner = Identity::from_label("owner");
        let token = Identity::from_label("token");

        let registry = init_protocol(&ctx, owner, token, None).unwrap();
        assert_eq!(registry.owner, owner);
        assert_eq!(registry.token, token);
        assert_eq!(registry.fee_recipient, owner);

        let stored = h.store_registry(&ctx, &token);
        assert_eq!(stored, Some(registry));
    }

    #[test]
    fn test_reinit_rejected_and_record_unchanged() {
        let h = Harness::default();
        let ctx = h.ctx();
        let owner = Identity::from_label("owner");
        let intruder = Identity::from_label("intruder");
        let token = Identity::from_label("token");

        let original = init_protocol(&ctx, owner, token, None).unwrap();
        let err = init_protocol(&ctx, intruder, token, Some(intruder)).unwrap_err();
        assert!(matches!(err, StakingError::AlreadyInitialized(_)));

        assert_eq!(h.store_registry(&ctx, &token), Some(original));
    }

    #[test]
    fn test_registries_are_per_token() {
        let h = Harness::default();
        let ctx = h.ctx();
        let owner = Identity::from_label("owner");
        init_protocol(&ctx, owner, Identity::from_label("a"), None).unwrap();
        assert!(init_protocol(&ctx, owner, Identity::from_label("b"), None).is_ok());
    }

    impl Harness {
        fn store_registry(
            &self,
            ctx: &HandlerContext<'_>,
            token: &Identity,
        ) -> Option<ProtocolRegistryRecord> {
            UnitOfWork::new(ctx.store)
                .registry(&ctx.registry_address(token))
                .unwrap()
        }
    }
}
