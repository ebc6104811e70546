use crate::*;

pub fn process_claim(args: &Args, claim_args: &ClaimArgs) -> Result<()> {
    let claimant = args.signer()?;
    let merkle_tree = AirdropMerkleTree::new_from_file(&claim_args.merkle_tree_path)?;
    let node = merkle_tree.get_node(&claimant)?;
    let proof = node
        .proof
        .as_ref()
        .with_context(|| format!("no proof stored for {claimant}"))?;

    let mut state = LocalState::load(&args.state_path)?;
    let event = state
        .distributor
        .claim_bonus(&mut state.ledger, &claimant, node.amount, proof)?;
    state.save(&args.state_path)?;

    println!(
        "{} claimed {} in root epoch {}",
        event.claimant, event.amount, event.root_epoch
    );
    Ok(())
}
