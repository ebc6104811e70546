use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{
    error::{ClaimBonusError, Result},
    state::claim_status::ClaimStatus,
    token::TokenLedger,
};

/// State for the distributor which pays out bonus tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimBonus {
    /// Admin wallet
    pub(crate) admin: Pubkey,
    /// Token ledger the bonus is paid from.
    pub(crate) token_ledger: Pubkey,
    /// Account on the token ledger holding the undistributed tokens.
    pub(crate) vault: Pubkey,
    /// The 256-bit merkle root.
    pub(crate) root: [u8; 32],
    /// Number of times the root has been replaced.
    pub(crate) root_epoch: u64,
    /// Claimants that have claimed, keyed by claimant.
    pub(crate) claim_statuses: BTreeMap<Pubkey, ClaimStatus>,
    /// Total amount of tokens that have been claimed.
    pub(crate) total_amount_claimed: u64,
    /// Number of nodes that have been claimed.
    pub(crate) num_nodes_claimed: u64,
}

impl ClaimBonus {
    pub fn admin(&self) -> Pubkey {
        self.admin
    }

    pub fn token_ledger(&self) -> Pubkey {
        self.token_ledger
    }

    pub fn vault(&self) -> Pubkey {
        self.vault
    }

    pub fn root(&self) -> [u8; 32] {
        self.root
    }

    pub fn root_epoch(&self) -> u64 {
        self.root_epoch
    }

    pub fn is_claimed(&self, claimant: &Pubkey) -> bool {
        self.claim_statuses.contains_key(claimant)
    }

    pub fn claim_status(&self, claimant: &Pubkey) -> Option<&ClaimStatus> {
        self.claim_statuses.get(claimant)
    }

    pub fn claim_statuses(&self) -> impl Iterator<Item = &ClaimStatus> {
        self.claim_statuses.values()
    }

    pub fn total_amount_claimed(&self) -> u64 {
        self.total_amount_claimed
    }

    pub fn num_nodes_claimed(&self) -> u64 {
        self.num_nodes_claimed
    }

    pub(crate) fn require_admin(&self, signer: &Pubkey) -> Result<()> {
        if *signer != self.admin {
            return Err(ClaimBonusError::Unauthorized);
        }
        Ok(())
    }

    pub(crate) fn require_token_ledger<L: TokenLedger + ?Sized>(&self, ledger: &L) -> Result<()> {
        let id = ledger.id();
        if id != self.token_ledger {
            return Err(ClaimBonusError::WrongTokenLedger(id));
        }
        Ok(())
    }
}
