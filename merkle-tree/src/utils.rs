use crate::{error::MerkleTreeError, merkle_tree::MerkleTree, tree_node::TreeNode};

/// Proof of inclusion for `leaf`, ordered from the leaf towards the root.
pub fn get_proof(merkle_tree: &MerkleTree, leaf: &[u8; 32]) -> Result<Vec<[u8; 32]>, MerkleTreeError> {
    merkle_tree
        .leaf_index(leaf)
        .and_then(|index| merkle_tree.find_path(index))
        .ok_or_else(|| MerkleTreeError::LeafNotFound(hex::encode(leaf)))
}

/// Given a set of tree nodes, get the max total claim amount.
pub fn get_max_total_claim(nodes: &[TreeNode]) -> Result<u64, MerkleTreeError> {
    nodes
        .iter()
        .try_fold(0, |acc: u64, n| acc.checked_add(n.amount()))
        .ok_or(MerkleTreeError::ArithmeticError)
}
