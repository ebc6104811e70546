use solana_program::pubkey::Pubkey;
use tracing::info;

use crate::{
    error::{ClaimBonusError, Result},
    state::claim_bonus::ClaimBonus,
};

/// Sets new admin account
/// CHECK:
///     1. The signer is the current admin
///     2. The new admin is not the same as the old one
pub fn handle_set_admin(
    distributor: &mut ClaimBonus,
    signer: &Pubkey,
    new_admin: Pubkey,
) -> Result<()> {
    distributor.require_admin(signer)?;

    if distributor.admin == new_admin {
        return Err(ClaimBonusError::SameAdmin);
    }

    distributor.admin = new_admin;

    info!("set new admin to {}", new_admin);

    Ok(())
}
