// crates/late-economics/src/bank.rs
//
// In-memory token bank implementing the TokenTransfer collaborator.
//
// Tracks a balance per (token, holder). Transfers are all-or-nothing: the
// source is checked and debited and the destination credited under one
// lock. Balances only enter the bank through `mint`, which stands in for the
// host ledger's token program when the engine runs standalone.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use late_core::{Identity, StakingError, TokenTransfer};

type Balances = HashMap<(Identity, Identity), u64>;

/// Balances for any number of tokens and holders.
#[derive(Debug, Default)]
pub struct TokenBank {
    balances: Mutex<Balances>,
}

impl TokenBank {
    /// Create a bank with no balances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `token` to `holder` out of thin air.
    ///
    /// # Errors
    /// Returns `StakingError::ArithmeticOverflow` if the balance would overflow.
    pub fn mint(&self, token: &Identity, holder: &Identity, amount: u64) -> Result<(), StakingError> {
        let mut balances = self.lock();
        let balance = balances.entry((*token, *holder)).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow("bank balance"))?;
        Ok(())
    }

    /// Sum of every holder's balance of `token`.
    pub fn total_supply(&self, token: &Identity) -> u128 {
        self.lock()
            .iter()
            .filter(|((t, _), _)| t == token)
            .map(|(_, &amount)| amount as u128)
            .sum()
    }

    // Every mutation is a single check-then-write, so a poisoned map is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, Balances> {
        self.balances.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenTransfer for TokenBank {
    fn balance(&self, token: &Identity, holder: &Identity) -> u64 {
        self.lock().get(&(*token, *holder)).copied().unwrap_or(0)
    }

    fn transfer(
        &self,
        token: &Identity,
        from: &Identity,
        to: &Identity,
        amount: u64,
    ) -> Result<(), StakingError> {
        let mut balances = self.lock();
        let available = balances.get(&(*token, *from)).copied().unwrap_or(0);
        if amount > available {
            return Err(StakingError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        if from == to || amount == 0 {
            return Ok(());
        }

        let destination = balances.get(&(*token, *to)).copied().unwrap_or(0);
        let credited = destination
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow("bank balance"))?;

        balances.insert((*token, *from), available - amount);
        balances.insert((*token, *to), credited);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (Identity, Identity, Identity) {
        (
            Identity::from_label("token"),
            Identity::from_label("alice"),
            Identity::from_label("bob"),
        )
    }

    #[test]
    fn test_new_bank_has_zero_balance() {
        let bank = TokenBank::new();
        let (token, alice, _) = ids();
        assert_eq!(bank.balance(&token, &alice), 0);
        assert_eq!(bank.total_supply(&token), 0);
    }

    #[test]
    fn test_mint_and_transfer() {
        let bank = TokenBank::new();
        let (token, alice, bob) = ids();
        bank.mint(&token, &alice, 100).unwrap();

        bank.transfer(&token, &alice, &bob, 40).unwrap();
        assert_eq!(bank.balance(&token, &alice), 60);
        assert_eq!(bank.balance(&token, &bob), 40);
        assert_eq!(bank.total_supply(&token), 100);
    }

    #[test]
    fn test_transfer_exact_balance() {
        let bank = TokenBank::new();
        let (token, alice, bob) = ids();
        bank.mint(&token, &alice, 100).unwrap();
        bank.transfer(&token, &alice, &bob, 100).unwrap();
        assert_eq!(bank.balance(&token, &alice), 0);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let bank = TokenBank::new();
        let (token, alice, bob) = ids();
        bank.mint(&token, &alice, 50).unwrap();

        let err = bank.transfer(&token, &alice, &bob, 100).unwrap_err();
        assert_eq!(
            err,
            StakingError::InsufficientBalance {
                requested: 100,
                available: 50
            }
        );
        // Balances should be unchanged
        assert_eq!(bank.balance(&token, &alice), 50);
        assert_eq!(bank.balance(&token, &bob), 0);
    }

    #[test]
    fn test_balances_are_per_token() {
        let bank = TokenBank::new();
        let (token, alice, bob) = ids();
        let other = Identity::from_label("other");
        bank.mint(&other, &alice, 10).unwrap();
        assert!(bank.transfer(&token, &alice, &bob, 1).is_err());
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let bank = TokenBank::new();
        let (token, alice, _) = ids();
        bank.mint(&token, &alice, 10).unwrap();
        bank.transfer(&token, &alice, &alice, 10).unwrap();
        assert_eq!(bank.balance(&token, &alice), 10);
    }

    #[test]
    fn test_mint_overflow() {
        let bank = TokenBank::new();
        let (token, alice, _) = ids();
        bank.mint(&token, &alice, u64::MAX).unwrap();
        assert!(bank.mint(&token, &alice, 1).is_err());
        assert_eq!(bank.balance(&token, &alice), u64::MAX);
    }
}
