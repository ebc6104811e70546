use bonus_merkle_verify::verify_claim;
use solana_program::pubkey::Pubkey;
use tracing::{info, warn};

use crate::{
    error::{ClaimBonusError, Result},
    state::{claim_bonus::ClaimBonus, claim_status::ClaimStatus, claimed_event::ClaimedEvent},
    token::TokenLedger,
};

/// Claims the bonus committed to `claimant` in the current root.
/// 1. Records a [ClaimStatus] for the claimant
/// 2. Increments num_nodes_claimed by 1 and total_amount_claimed by `amount`
/// 3. Transfers `amount` from the vault to the claimant
/// CHECK:
///     1. The ledger is the distributor's token ledger
///     2. The claimant is not the vault itself
///     3. The claimant has not claimed yet
///     4. The merkle proof is valid for (claimant, amount) against the current root
///
/// State is written before the transfer. If the transfer fails every write is
/// undone, so a failed claim leaves the distributor exactly as it was.
pub fn handle_claim_bonus<L: TokenLedger + ?Sized>(
    distributor: &mut ClaimBonus,
    ledger: &mut L,
    claimant: &Pubkey,
    amount: u64,
    proof: &[[u8; 32]],
) -> Result<ClaimedEvent> {
    distributor.require_token_ledger(ledger)?;

    // a vault to vault transfer moves nothing but would still be recorded
    if *claimant == distributor.vault {
        warn!(%claimant, "rejected claim: claimant is the vault");
        return Err(ClaimBonusError::ClaimantIsVault(*claimant));
    }

    if distributor.is_claimed(claimant) {
        warn!(%claimant, "rejected claim: already claimed");
        return Err(ClaimBonusError::AlreadyClaimed);
    }

    if !verify_claim(claimant, amount, proof, distributor.root) {
        warn!(%claimant, amount, "rejected claim: invalid proof");
        return Err(ClaimBonusError::InvalidProof);
    }

    let previous_total_amount_claimed = distributor.total_amount_claimed;
    let previous_num_nodes_claimed = distributor.num_nodes_claimed;

    let total_amount_claimed = previous_total_amount_claimed
        .checked_add(amount)
        .ok_or(ClaimBonusError::ArithmeticError)?;
    let num_nodes_claimed = previous_num_nodes_claimed
        .checked_add(1)
        .ok_or(ClaimBonusError::ArithmeticError)?;

    distributor.claim_statuses.insert(
        *claimant,
        ClaimStatus {
            claimant: *claimant,
            amount,
            root_epoch: distributor.root_epoch,
            root: distributor.root,
        },
    );
    distributor.total_amount_claimed = total_amount_claimed;
    distributor.num_nodes_claimed = num_nodes_claimed;

    if let Err(e) = ledger.transfer(&distributor.vault, claimant, amount) {
        distributor.claim_statuses.remove(claimant);
        distributor.total_amount_claimed = previous_total_amount_claimed;
        distributor.num_nodes_claimed = previous_num_nodes_claimed;

        warn!(%claimant, amount, error = %e, "rejected claim: transfer failed, rolled back");
        return Err(ClaimBonusError::TransferFailed(e));
    }

    info!(
        %claimant,
        amount,
        root_epoch = distributor.root_epoch,
        total_amount_claimed = distributor.total_amount_claimed,
        "claimed bonus"
    );

    Ok(ClaimedEvent {
        claimant: *claimant,
        amount,
        root_epoch: distributor.root_epoch,
    })
}
