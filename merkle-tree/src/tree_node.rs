use std::str::FromStr;

use bonus_merkle_verify::hash_leaf;
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{csv_entry::CsvEntry, error::MerkleTreeError};

pub const MINT_DECIMALS: u32 = 9;

/// Represents the claim information for an account.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Pubkey of the claimant; will be responsible for signing the claim
    pub claimant: Pubkey,
    /// Amount that claimant can claim
    pub amount: u64,
    /// Claimant's proof of inclusion in the Merkle Tree
    pub proof: Option<Vec<[u8; 32]>>,
}

impl TreeNode {
    pub fn hash(&self) -> [u8; 32] {
        hash_leaf(&self.claimant, self.amount)
    }

    /// Return amount for this claimant
    pub fn amount(&self) -> u64 {
        self.amount
    }
}

/// Converts a ui amount to a token amount (with decimals)
pub fn ui_amount_to_token_amount(amount: u64) -> Option<u64> {
    10u64
        .checked_pow(MINT_DECIMALS)
        .and_then(|factor| amount.checked_mul(factor))
}

impl TryFrom<CsvEntry> for TreeNode {
    type Error = MerkleTreeError;

    fn try_from(entry: CsvEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            claimant: Pubkey::from_str(entry.pubkey.as_str())?,
            amount: ui_amount_to_token_amount(entry.amount)
                .ok_or(MerkleTreeError::ArithmeticError)?,
            proof: None,
        })
    }
}
