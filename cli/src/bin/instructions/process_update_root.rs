use crate::*;

pub fn process_update_root(args: &Args, update_root_args: &UpdateRootArgs) -> Result<()> {
    let signer = args.signer()?;
    let merkle_tree = AirdropMerkleTree::new_from_file(&update_root_args.merkle_tree_path)?;

    let mut state = LocalState::load(&args.state_path)?;
    let event = state
        .distributor
        .update_root(&signer, merkle_tree.merkle_root)?;
    state.save(&args.state_path)?;

    println!(
        "root {} -> {} epoch {}",
        hex::encode(event.previous_root),
        hex::encode(event.new_root),
        event.root_epoch
    );
    Ok(())
}
