// crates/late-economics/src/handlers/mod.rs
//
// Operation handlers: initialize-protocol, start-staking, deposit, withdraw.
//
// Each handler runs as one unit of work:
//   1. load records through a UnitOfWork (reads see staged writes first)
//   2. validate, settle, and apply the balance delta to the staged copies
//   3. request the token transfer
//   4. commit every staged record in one AccountStore batch
//
// Nothing reaches the store before step 4. If the commit itself fails after
// the transfer went through, the transfer is reversed before the error is
// returned. Handlers assume the caller holds the program's exclusive
// section; StakingProgram provides it.

pub mod deposit;
pub mod init_protocol;
pub mod start_staking;
pub mod withdraw;

pub use withdraw::WithdrawReceipt;

use std::collections::BTreeMap;

use late_core::{
    AccountRecord, AccountStore, Address, Identity, KeyDerivation, ParticipantLedgerEntry,
    ProtocolRegistryRecord, StakingError, StakingPoolState, TokenTransfer, ESCROW_SEED,
    PARTICIPANT_SEED, POOL_SEED, REGISTRY_SEED,
};

/// Collaborators a handler runs against.
#[derive(Clone, Copy)]
pub struct HandlerContext<'a> {
    pub store: &'a dyn AccountStore,
    pub bank: &'a dyn TokenTransfer,
    pub keys: &'a dyn KeyDerivation,
}

impl<'a> HandlerContext<'a> {
    pub fn registry_address(&self, token: &Identity) -> Address {
        self.keys.derive(REGISTRY_SEED, &[token.as_bytes()])
    }

    pub fn pool_address(&self, token: &Identity) -> Address {
        self.keys.derive(POOL_SEED, &[token.as_bytes()])
    }

    pub fn participant_address(&self, participant: &Identity, token: &Identity) -> Address {
        self.keys
            .derive(PARTICIPANT_SEED, &[participant.as_bytes(), token.as_bytes()])
    }

    /// Holder identity of the pool's escrow balance.
    pub fn escrow(&self, token: &Identity) -> Identity {
        self.keys.derive(ESCROW_SEED, &[token.as_bytes()]).into()
    }

    /// Move tokens, then commit `work`. A failed commit reverses the transfer.
    pub(crate) fn transfer_and_commit(
        &self,
        work: UnitOfWork<'_>,
        token: &Identity,
        from: &Identity,
        to: &Identity,
        amount: u64,
    ) -> Result<(), StakingError> {
        self.bank.transfer(token, from, to, amount)?;

        if let Err(e) = work.commit() {
            tracing::error!("Commit failed after transfer of {} from {}: {}", amount, from, e);
            if let Err(undo) = self.bank.transfer(token, to, from, amount) {
                tracing::error!(
                    "Compensating transfer of {} back to {} failed: {}",
                    amount,
                    from,
                    undo
                );
            }
            return Err(e);
        }
        Ok(())
    }
}

/// Staged record writes for a single operation.
pub(crate) struct UnitOfWork<'a> {
    store: &'a dyn AccountStore,
    staged: BTreeMap<Address, AccountRecord>,
}

impl<'a> UnitOfWork<'a> {
    pub(crate) fn new(store: &'a dyn AccountStore) -> Self {
        Self {
            store,
            staged: BTreeMap::new(),
        }
    }

    fn load(&self, address: &Address) -> Result<Option<AccountRecord>, StakingError> {
        match self.staged.get(address) {
            Some(record) => Ok(Some(record.clone())),
            None => self.store.load(address),
        }
    }

    pub(crate) fn exists(&self, address: &Address) -> Result<bool, StakingError> {
        Ok(self.load(address)?.is_some())
    }

    pub(crate) fn registry(
        &self,
        address: &Address,
    ) -> Result<Option<ProtocolRegistryRecord>, StakingError> {
        match self.load(address)? {
            None => Ok(None),
            Some(AccountRecord::Registry(r)) => Ok(Some(r)),
            Some(other) => Err(kind_mismatch(address, "registry", &other)),
        }
    }

    pub(crate) fn pool(&self, address: &Address) -> Result<Option<StakingPoolState>, StakingError> {
        match self.load(address)? {
            None => Ok(None),
            Some(AccountRecord::Pool(p)) => Ok(Some(p)),
            Some(other) => Err(kind_mismatch(address, "pool", &other)),
        }
    }

    pub(crate) fn participant(
        &self,
        address: &Address,
    ) -> Result<Option<ParticipantLedgerEntry>, StakingError> {
        match self.load(address)? {
            None => Ok(None),
            Some(AccountRecord::Participant(e)) => Ok(Some(e)),
            Some(other) => Err(kind_mismatch(address, "participant", &other)),
        }
    }

    pub(crate) fn stage(&mut self, address: Address, record: AccountRecord) {
        self.staged.insert(address, record);
    }

    pub(crate) fn commit(self) -> Result<(), StakingError> {
        if self.staged.is_empty() {
            return Ok(());
        }
        self.store.commit(self.staged.into_iter().collect())
    }
}

fn kind_mismatch(address: &Address, expected: &str, found: &AccountRecord) -> StakingError {
    StakingError::Internal(format!(
        "expected {} record at {}, found {}",
        expected,
        address,
        found.kind()
    ))
}

/// Load a pool that must exist.
pub(crate) fn require_pool(
    ctx: &HandlerContext<'_>,
    work: &UnitOfWork<'_>,
    token: &Identity,
) -> Result<(Address, StakingPoolState), StakingError> {
    let address = ctx.pool_address(token);
    let pool = work
        .pool(&address)?
        .ok_or_else(|| StakingError::NotFound(format!("no staking pool for token {}", token)))?;
    Ok((address, pool))
}

#[cfg(test)]
pub(crate) mod test_support {
    use late_core::Sha256Derivation;
    use late_store::MemoryStore;

    use crate::bank::TokenBank;

    use super::HandlerContext;

    /// Owned collaborators for handler tests.
    #[derive(Default)]
    pub struct Harness {
        pub store: MemoryStore,
        pub bank: TokenBank,
        pub keys: Sha256Derivation,
    }

    impl Harness {
        pub fn ctx(&self) -> HandlerContext<'_> {
            HandlerContext {
                store: &self.store,
                bank: &self.bank,
                keys: &self.keys,
            }
        }
    }
}
