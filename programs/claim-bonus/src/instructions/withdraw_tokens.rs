use solana_program::pubkey::Pubkey;
use tracing::info;

use crate::{
    error::{ClaimBonusError, Result},
    state::{claim_bonus::ClaimBonus, claimed_event::WithdrawnEvent},
    token::TokenLedger,
};

/// Sweeps the entire vault balance to the admin. Can be called at any time,
/// including while claims are still open.
/// CHECK:
///     1. The signer is the admin
///     2. The ledger is the distributor's token ledger
pub fn handle_withdraw_tokens<L: TokenLedger + ?Sized>(
    distributor: &mut ClaimBonus,
    ledger: &mut L,
    signer: &Pubkey,
) -> Result<WithdrawnEvent> {
    distributor.require_admin(signer)?;
    distributor.require_token_ledger(ledger)?;

    let amount = ledger.balance_of(&distributor.vault);
    ledger
        .transfer(&distributor.vault, &distributor.admin, amount)
        .map_err(ClaimBonusError::TransferFailed)?;

    info!(receiver = %distributor.admin, amount, "withdrew vault balance");

    Ok(WithdrawnEvent {
        receiver: distributor.admin,
        amount,
    })
}
