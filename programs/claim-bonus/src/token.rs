//! The fungible token ledger the distributor pays out of.
//!
//! Balances, transfers and minting live outside the claim core; the core only
//! talks to them through [TokenLedger]. [InMemoryTokenLedger] is a complete
//! implementation used by the CLI's local state file, the API and tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient funds: {owner} holds {balance}, needs {amount}")]
    InsufficientFunds {
        owner: Pubkey,
        balance: u64,
        amount: u64,
    },
    #[error("Arithmetic Error (overflow/underflow)")]
    Overflow,
    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

pub trait TokenLedger {
    /// Address of this ledger, fixed in the distributor at construction.
    fn id(&self) -> Pubkey;

    fn balance_of(&self, owner: &Pubkey) -> u64;

    /// Moves `amount` from `from` to `to`. Either both balances change or
    /// neither does.
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), TokenError>;

    fn mint(&mut self, to: &Pubkey, amount: u64) -> Result<(), TokenError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryTokenLedger {
    id: Pubkey,
    balances: BTreeMap<Pubkey, u64>,
    total_supply: u64,
}

impl InMemoryTokenLedger {
    pub fn new(id: Pubkey) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Owners with a non-zero balance.
    pub fn holders(&self) -> impl Iterator<Item = (&Pubkey, &u64)> {
        self.balances.iter().filter(|(_, balance)| **balance > 0)
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn id(&self) -> Pubkey {
        self.id
    }

    fn balance_of(&self, owner: &Pubkey) -> u64 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), TokenError> {
        let from_balance = self.balance_of(from);
        let new_from_balance =
            from_balance
                .checked_sub(amount)
                .ok_or(TokenError::InsufficientFunds {
                    owner: *from,
                    balance: from_balance,
                    amount,
                })?;
        if from == to {
            return Ok(());
        }
        let new_to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.insert(*from, new_from_balance);
        self.balances.insert(*to, new_to_balance);
        Ok(())
    }

    fn mint(&mut self, to: &Pubkey, amount: u64) -> Result<(), TokenError> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.total_supply = total_supply;
        self.balances.insert(*to, new_balance);
        Ok(())
    }
}
