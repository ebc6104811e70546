use serde_json::json;

use crate::*;

pub fn process_get_proof(get_proof_args: &GetProofArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_file(&get_proof_args.merkle_tree_path)?;
    let node = merkle_tree.get_node(&get_proof_args.claimant)?;
    let proof = node
        .proof
        .as_ref()
        .with_context(|| format!("no proof stored for {}", node.claimant))?;

    let output = json!({
        "claimant": node.claimant.to_string(),
        "amount": node.amount,
        "proof": proof.iter().map(hex::encode).collect::<Vec<_>>(),
        "merkle_root": hex::encode(merkle_tree.merkle_root),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
