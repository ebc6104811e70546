use tracing::info;

use crate::*;

pub fn process_new_distributor(
    args: &Args,
    new_distributor_args: &NewDistributorArgs,
) -> Result<()> {
    let admin = args.signer()?;
    let merkle_tree = AirdropMerkleTree::new_from_file(&new_distributor_args.merkle_tree_path)?;

    let mut ledger = InMemoryTokenLedger::new(
        new_distributor_args
            .token_ledger
            .unwrap_or_else(random_pubkey),
    );
    let vault = new_distributor_args.vault.unwrap_or_else(random_pubkey);
    if merkle_tree.get_node(&vault).is_ok() {
        bail!("vault {vault} is a claimant in the merkle tree");
    }
    let distributor = ClaimBonus::new(admin, ledger.id(), vault, merkle_tree.merkle_root);

    if new_distributor_args.fund {
        ledger.mint(&vault, merkle_tree.max_total_claim)?;
        info!(amount = merkle_tree.max_total_claim, "funded vault");
    }

    LocalState {
        distributor,
        ledger,
    }
    .create(&args.state_path)?;

    println!(
        "created distributor admin {} vault {} root {}",
        admin,
        vault,
        hex::encode(merkle_tree.merkle_root)
    );
    Ok(())
}
