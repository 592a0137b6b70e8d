//! Bond and prize ledger collaborator

use std::collections::HashMap;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Account identifier (32-byte address).
pub type AccountId = [u8; 32];

/// Bond and prize movements the challenge protocol may make.
///
/// The protocol invokes these only after all of its own reverting checks
/// pass, so a ledger failure indicates host-side accounting drift rather
/// than a bad submission. Implementations must keep each method atomic.
pub trait BondLedger {
    /// Bond currently free to lock for `account`.
    fn available_bond(&self, account: &AccountId) -> U256;

    /// Move `amount` of `account`'s bond from available to locked.
    fn lock_bond(&mut self, account: &AccountId, amount: U256) -> Result<(), LedgerError>;

    /// Move `amount` of `account`'s bond from locked back to available.
    fn unlock_bond(&mut self, account: &AccountId, amount: U256) -> Result<(), LedgerError>;

    /// Atomically slash `amount` of `from`'s locked bond to `recipient`.
    fn pay_bond_to(
        &mut self,
        recipient: &AccountId,
        from: &AccountId,
        amount: U256,
    ) -> Result<(), LedgerError>;

    /// Fund the prize pool.
    fn allocate_prize(&mut self, amount: U256);

    /// Pay the entire allocated prize pool out to `recipient`.
    fn reward_prize_to(&mut self, recipient: &AccountId) -> Result<(), LedgerError>;
}

/// One account's balances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub available: U256,
    pub locked: U256,
}

/// In-memory ledger.
///
/// Reference implementation for tests and off-chain use: a plain map from
/// account id to balance record plus a prize pool.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    accounts: HashMap<AccountId, BalanceRecord>,
    prize_pool: U256,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit spendable bond to an account.
    pub fn deposit(&mut self, account: &AccountId, amount: U256) {
        self.accounts.entry(*account).or_default().available += amount;
    }

    /// Balances for an account.
    pub fn balance(&self, account: &AccountId) -> BalanceRecord {
        self.accounts.get(account).copied().unwrap_or_default()
    }

    /// Currently allocated prize pool.
    pub fn prize_pool(&self) -> U256 {
        self.prize_pool
    }
}

impl BondLedger for MemoryLedger {
    fn available_bond(&self, account: &AccountId) -> U256 {
        self.balance(account).available
    }

    fn lock_bond(&mut self, account: &AccountId, amount: U256) -> Result<(), LedgerError> {
        let record = self.accounts.entry(*account).or_default();
        if record.available < amount {
            return Err(LedgerError::InsufficientAvailable {
                required: amount,
                available: record.available,
            });
        }
        record.available -= amount;
        record.locked += amount;
        Ok(())
    }

    fn unlock_bond(&mut self, account: &AccountId, amount: U256) -> Result<(), LedgerError> {
        let record = self.accounts.entry(*account).or_default();
        if record.locked < amount {
            return Err(LedgerError::InsufficientLocked {
                required: amount,
                locked: record.locked,
            });
        }
        record.locked -= amount;
        record.available += amount;
        Ok(())
    }

    fn pay_bond_to(
        &mut self,
        recipient: &AccountId,
        from: &AccountId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        {
            let record = self.accounts.entry(*from).or_default();
            if record.locked < amount {
                return Err(LedgerError::InsufficientLocked {
                    required: amount,
                    locked: record.locked,
                });
            }
            record.locked -= amount;
        }
        self.accounts.entry(*recipient).or_default().available += amount;
        Ok(())
    }

    fn allocate_prize(&mut self, amount: U256) {
        self.prize_pool += amount;
    }

    fn reward_prize_to(&mut self, recipient: &AccountId) -> Result<(), LedgerError> {
        let prize = std::mem::take(&mut self.prize_pool);
        self.accounts.entry(*recipient).or_default().available += prize;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: AccountId = [1u8; 32];
    const BOB: AccountId = [2u8; 32];

    #[test]
    fn lock_and_unlock_move_between_buckets() {
        let mut ledger = MemoryLedger::new();
        ledger.deposit(&ALICE, U256::from(100u64));

        ledger.lock_bond(&ALICE, U256::from(60u64)).unwrap();
        assert_eq!(ledger.balance(&ALICE).available, U256::from(40u64));
        assert_eq!(ledger.balance(&ALICE).locked, U256::from(60u64));

        ledger.unlock_bond(&ALICE, U256::from(60u64)).unwrap();
        assert_eq!(ledger.balance(&ALICE).available, U256::from(100u64));
        assert_eq!(ledger.balance(&ALICE).locked, U256::ZERO);
    }

    #[test]
    fn lock_requires_available_funds() {
        let mut ledger = MemoryLedger::new();
        ledger.deposit(&ALICE, U256::from(10u64));
        let outcome = ledger.lock_bond(&ALICE, U256::from(11u64));
        assert!(matches!(
            outcome,
            Err(LedgerError::InsufficientAvailable { .. })
        ));
        assert_eq!(ledger.balance(&ALICE).available, U256::from(10u64));
    }

    #[test]
    fn slash_moves_locked_bond_to_recipient() {
        let mut ledger = MemoryLedger::new();
        ledger.deposit(&ALICE, U256::from(50u64));
        ledger.lock_bond(&ALICE, U256::from(50u64)).unwrap();

        ledger
            .pay_bond_to(&BOB, &ALICE, U256::from(50u64))
            .unwrap();
        assert_eq!(ledger.balance(&ALICE).locked, U256::ZERO);
        assert_eq!(ledger.balance(&BOB).available, U256::from(50u64));
    }

    #[test]
    fn prize_pool_pays_out_in_full() {
        let mut ledger = MemoryLedger::new();
        ledger.allocate_prize(U256::from(1_000u64));
        assert_eq!(ledger.prize_pool(), U256::from(1_000u64));

        ledger.reward_prize_to(&BOB).unwrap();
        assert_eq!(ledger.prize_pool(), U256::ZERO);
        assert_eq!(ledger.balance(&BOB).available, U256::from(1_000u64));
    }
}
