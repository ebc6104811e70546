use solana_program::pubkey::Pubkey;
use tracing::info;

use crate::{
    error::{ClaimBonusError, Result},
    state::{claim_bonus::ClaimBonus, claim_status::ClaimStatus},
};

/// Removes a claimant's claim status so they can claim again, typically
/// against a root that re-issues them a bonus. Claimed totals are cumulative
/// and are not reduced.
/// CHECK:
///     1. The signer is the admin
///     2. The claimant has a claim status
pub fn handle_close_claim_status(
    distributor: &mut ClaimBonus,
    signer: &Pubkey,
    claimant: &Pubkey,
) -> Result<ClaimStatus> {
    distributor.require_admin(signer)?;

    let claim_status = distributor
        .claim_statuses
        .remove(claimant)
        .ok_or(ClaimBonusError::ClaimStatusNotFound(*claimant))?;

    info!(%claimant, root_epoch = claim_status.root_epoch, "closed claim status");

    Ok(claim_status)
}
