//! Distributes a fixed bonus token allocation via a committed [Merkle root](https://en.wikipedia.org/wiki/Merkle_tree).
//!
//! # Rationale
//!
//! Storing every recipient and amount in the distributor is expensive. Instead the admin
//! commits a single 256-bit root computed off-chain over all `(claimant, amount)` pairs
//! (see the `bonus-merkle-tree` crate). Each claimant later submits their amount together
//! with a proof of inclusion; the distributor recomputes the root, and on a match records
//! the claim and pays the amount out of its vault.
//!
//! # Execution model
//!
//! Every operation takes `&mut self` and runs to completion before returning, so a claim's
//! check, record and transfer cannot interleave with any other operation on the same
//! distributor. The caller's identity is always passed in explicitly; nothing here infers
//! who is calling. A failed operation leaves the distributor unchanged.

use solana_program::pubkey::Pubkey;

pub use crate::{
    error::{ClaimBonusError, Result},
    state::{
        claim_bonus::ClaimBonus,
        claim_status::ClaimStatus,
        claimed_event::{ClaimedEvent, RootUpdatedEvent, WithdrawnEvent},
    },
    token::{InMemoryTokenLedger, TokenError, TokenLedger},
};
use crate::instructions::*;

pub mod error;
pub mod instructions;
pub mod state;
pub mod token;

impl ClaimBonus {
    /// Creates a distributor paying out of `vault` on `token_ledger`, trusting `root`.
    pub fn new(admin: Pubkey, token_ledger: Pubkey, vault: Pubkey, root: [u8; 32]) -> Self {
        handle_new_distributor(admin, token_ledger, vault, root)
    }

    /// Claims `amount` for `claimant`, who must be the signer of the request.
    pub fn claim_bonus<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        claimant: &Pubkey,
        amount: u64,
        proof: &[[u8; 32]],
    ) -> Result<ClaimedEvent> {
        handle_claim_bonus(self, ledger, claimant, amount, proof)
    }

    pub fn update_root(&mut self, signer: &Pubkey, new_root: [u8; 32]) -> Result<RootUpdatedEvent> {
        handle_update_root(self, signer, new_root)
    }

    pub fn withdraw_tokens<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        signer: &Pubkey,
    ) -> Result<WithdrawnEvent> {
        handle_withdraw_tokens(self, ledger, signer)
    }

    pub fn set_admin(&mut self, signer: &Pubkey, new_admin: Pubkey) -> Result<()> {
        handle_set_admin(self, signer, new_admin)
    }

    pub fn close_claim_status(&mut self, signer: &Pubkey, claimant: &Pubkey) -> Result<ClaimStatus> {
        handle_close_claim_status(self, signer, claimant)
    }
}
