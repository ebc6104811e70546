use solana_program::pubkey::Pubkey;
use tracing::info;

use crate::{
    error::{ClaimBonusError, Result},
    state::{claim_bonus::ClaimBonus, claimed_event::RootUpdatedEvent},
};

/// Replaces the merkle root. Takes effect for the next claim.
/// Existing claim statuses are kept: a claimant who claimed under an earlier
/// root stays claimed until the admin closes their claim status.
/// CHECK:
///     1. The signer is the admin
pub fn handle_update_root(
    distributor: &mut ClaimBonus,
    signer: &Pubkey,
    new_root: [u8; 32],
) -> Result<RootUpdatedEvent> {
    distributor.require_admin(signer)?;

    let root_epoch = distributor
        .root_epoch
        .checked_add(1)
        .ok_or(ClaimBonusError::ArithmeticError)?;
    let previous_root = distributor.root;

    distributor.root = new_root;
    distributor.root_epoch = root_epoch;

    info!(
        previous_root = ?previous_root,
        new_root = ?new_root,
        root_epoch,
        "updated merkle root"
    );

    Ok(RootUpdatedEvent {
        previous_root,
        new_root,
        root_epoch,
    })
}
