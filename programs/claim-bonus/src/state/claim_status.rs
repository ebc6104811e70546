use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

/// Holds whether or not a claimant has claimed tokens.
/// Present in the distributor only once the claim has been honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimStatus {
    /// Authority that claimed the tokens.
    pub claimant: Pubkey,
    /// Amount transferred to the claimant
    pub amount: u64,
    /// Root epoch the claim was verified in
    pub root_epoch: u64,
    /// Root the proof was verified against
    pub root: [u8; 32],
}
