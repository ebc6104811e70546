use tracing::{info, warn};

use crate::*;

pub fn process_verify(args: &Args, verify_args: &VerifyArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_file(&verify_args.merkle_tree_path)?;
    merkle_tree.verify_proof()?;
    info!(
        nodes = merkle_tree.max_num_nodes,
        "every stored proof verifies"
    );

    if !args.state_path.exists() {
        println!(
            "merkle tree {} is valid, no distributor state to compare",
            hex::encode(merkle_tree.merkle_root)
        );
        return Ok(());
    }

    let state = LocalState::load(&args.state_path)?;
    let distributor = &state.distributor;
    if distributor.root() != merkle_tree.merkle_root {
        bail!(
            "distributor root {} does not match merkle tree root {}",
            hex::encode(distributor.root()),
            hex::encode(merkle_tree.merkle_root)
        );
    }

    let outstanding = merkle_tree
        .tree_nodes
        .iter()
        .filter(|node| !distributor.is_claimed(&node.claimant))
        .try_fold(0u64, |sum, node| sum.checked_add(node.amount))
        .context("outstanding claim total overflows u64")?;
    let vault_balance = state.ledger.balance_of(&distributor.vault());
    if vault_balance < outstanding {
        warn!(
            vault_balance,
            outstanding, "vault cannot cover every outstanding claim"
        );
    }

    println!(
        "done verify merkle tree {} epoch {}",
        hex::encode(merkle_tree.merkle_root),
        distributor.root_epoch()
    );
    Ok(())
}
