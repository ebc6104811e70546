use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

/// Emitted when tokens are claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedEvent {
    /// User that claimed.
    pub claimant: Pubkey,
    /// Amount of tokens distributed.
    pub amount: u64,
    /// Root epoch the claim was verified in.
    pub root_epoch: u64,
}

/// Emitted when the admin replaces the merkle root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootUpdatedEvent {
    pub previous_root: [u8; 32],
    pub new_root: [u8; 32],
    /// Epoch that starts with `new_root`.
    pub root_epoch: u64,
}

/// Emitted when the admin sweeps the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawnEvent {
    pub receiver: Pubkey,
    pub amount: u64,
}
