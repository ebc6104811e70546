use tracing::info;

use crate::*;

pub fn process_create_merkle_tree(merkle_tree_args: &CreateMerkleTreeArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_csv(&merkle_tree_args.csv_path)?;
    merkle_tree.write_to_file(&merkle_tree_args.merkle_tree_path)?;

    info!(
        path = %merkle_tree_args.merkle_tree_path.display(),
        "wrote merkle tree"
    );
    println!(
        "merkle root {} nodes {} max total claim {}",
        hex::encode(merkle_tree.merkle_root),
        merkle_tree.max_num_nodes,
        merkle_tree.max_total_claim
    );
    Ok(())
}
