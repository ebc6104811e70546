use std::collections::BTreeMap;

use solana_program::pubkey::Pubkey;
use tracing::info;

use crate::state::claim_bonus::ClaimBonus;

/// Creates a new [ClaimBonus].
/// After creating this [ClaimBonus], the vault should be funded with
/// at least the tree's max_total_claim tokens.
pub fn handle_new_distributor(
    admin: Pubkey,
    token_ledger: Pubkey,
    vault: Pubkey,
    root: [u8; 32],
) -> ClaimBonus {
    let distributor = ClaimBonus {
        admin,
        token_ledger,
        vault,
        root,
        root_epoch: 0,
        claim_statuses: BTreeMap::new(),
        total_amount_claimed: 0,
        num_nodes_claimed: 0,
    };

    info!(
        admin = %distributor.admin,
        token_ledger = %distributor.token_ledger,
        vault = %distributor.vault,
        root = ?distributor.root,
        "new distributor created"
    );

    distributor
}
