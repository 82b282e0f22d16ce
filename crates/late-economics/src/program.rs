// crates/late-economics/src/program.rs
//
// StakingProgram: the single-writer entry point to the engine.
//
// On a ledger, the host serializes transactions. Off-ledger, StakingProgram
// does it: every operation and query runs under one mutex, reads the clock
// inside that section, and either commits all of its writes or none. The
// handlers underneath stay free of locking and clock concerns.

use std::sync::{Arc, Mutex, MutexGuard};

use late_core::{
    AccountRecord, AccountStore, Clock, Identity, KeyDerivation, ParticipantLedgerEntry,
    ProtocolRegistryRecord, Sha256Derivation, StakingError, StakingPoolState, TokenTransfer,
};

use crate::clock::SystemClock;
use crate::handlers::{self, HandlerContext, UnitOfWork, WithdrawReceipt};
use crate::rewards::pending_rewards;

/// Staking engine bound to its collaborators.
pub struct StakingProgram {
    store: Arc<dyn AccountStore>,
    bank: Arc<dyn TokenTransfer>,
    keys: Arc<dyn KeyDerivation>,
    clock: Arc<dyn Clock>,
    exclusive: Mutex<()>,
}

impl StakingProgram {
    /// Create a program over `store` and `bank`, using the system clock and
    /// the default SHA-256 key derivation.
    pub fn new(store: Arc<dyn AccountStore>, bank: Arc<dyn TokenTransfer>) -> Self {
        Self {
            store,
            bank,
            keys: Arc::new(Sha256Derivation::default()),
            clock: Arc::new(SystemClock),
            exclusive: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_key_derivation(mut self, keys: Arc<dyn KeyDerivation>) -> Self {
        self.keys = keys;
        self
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Create the protocol registry for `token`. See `handlers::init_protocol`.
    pub fn initialize_protocol(
        &self,
        owner: Identity,
        token: Identity,
        fee_recipient: Option<Identity>,
    ) -> Result<ProtocolRegistryRecord, StakingError> {
        let _guard = self.lock()?;
        handlers::init_protocol::init_protocol(&self.ctx(), owner, token, fee_recipient)
    }

    /// Activate and fund the pool for `token`. See `handlers::start_staking`.
    pub fn start_staking(
        &self,
        caller: Identity,
        token: Identity,
        period_end: u64,
        reward_amount: u64,
    ) -> Result<StakingPoolState, StakingError> {
        let _guard = self.lock()?;
        let now = self.clock.now();
        handlers::start_staking::start_staking(
            &self.ctx(),
            caller,
            token,
            period_end,
            reward_amount,
            now,
        )
    }

    /// Stake `amount` for `participant`. See `handlers::deposit`.
    pub fn deposit(
        &self,
        participant: Identity,
        token: Identity,
        amount: u64,
    ) -> Result<ParticipantLedgerEntry, StakingError> {
        let _guard = self.lock()?;
        let now = self.clock.now();
        handlers::deposit::deposit(&self.ctx(), participant, token, amount, now)
    }

    /// Withdraw all principal and reward for `participant`. See
    /// `handlers::withdraw`.
    pub fn withdraw(
        &self,
        participant: Identity,
        token: Identity,
    ) -> Result<WithdrawReceipt, StakingError> {
        let _guard = self.lock()?;
        let now = self.clock.now();
        handlers::withdraw::withdraw(&self.ctx(), participant, token, now)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn registry(&self, token: &Identity) -> Result<Option<ProtocolRegistryRecord>, StakingError> {
        let _guard = self.lock()?;
        let ctx = self.ctx();
        UnitOfWork::new(ctx.store).registry(&ctx.registry_address(token))
    }

    pub fn pool(&self, token: &Identity) -> Result<Option<StakingPoolState>, StakingError> {
        let _guard = self.lock()?;
        let ctx = self.ctx();
        UnitOfWork::new(ctx.store).pool(&ctx.pool_address(token))
    }

    pub fn participant(
        &self,
        participant: &Identity,
        token: &Identity,
    ) -> Result<Option<ParticipantLedgerEntry>, StakingError> {
        let _guard = self.lock()?;
        let ctx = self.ctx();
        UnitOfWork::new(ctx.store).participant(&ctx.participant_address(participant, token))
    }

    /// Every ledger entry for `token`, including emptied ones. Scans the
    /// whole store.
    pub fn participants(&self, token: &Identity) -> Result<Vec<ParticipantLedgerEntry>, StakingError> {
        let _guard = self.lock()?;
        Ok(self
            .store
            .records()?
            .into_iter()
            .filter_map(|(_, record)| match record {
                AccountRecord::Participant(entry) if entry.token == *token => Some(entry),
                _ => None,
            })
            .collect())
    }

    /// Reward `participant` would receive if they withdrew now. Zero for
    /// unknown participants.
    pub fn pending_rewards(&self, participant: &Identity, token: &Identity) -> Result<u64, StakingError> {
        let _guard = self.lock()?;
        let ctx = self.ctx();
        let work = UnitOfWork::new(ctx.store);
        let (_, pool) = handlers::require_pool(&ctx, &work, token)?;
        match work.participant(&ctx.participant_address(participant, token))? {
            Some(entry) => pending_rewards(&pool, &entry, self.clock.now()),
            None => Ok(0),
        }
    }

    /// Holder identity of the escrow for `token`.
    pub fn escrow_address(&self, token: &Identity) -> Identity {
        self.ctx().escrow(token)
    }

    pub fn escrow_balance(&self, token: &Identity) -> u64 {
        self.bank.balance(token, &self.escrow_address(token))
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    fn ctx(&self) -> HandlerContext<'_> {
        HandlerContext {
            store: self.store.as_ref(),
            bank: self.bank.as_ref(),
            keys: self.keys.as_ref(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StakingError> {
        self.exclusive
            .lock()
            .map_err(|_| StakingError::Internal("staking program lock poisoned".to_string()))
    }
}
