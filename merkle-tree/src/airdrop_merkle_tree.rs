use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{BufReader, Write},
    path::Path,
    result,
};

use bonus_merkle_verify::verify;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use tracing::{info, warn};

use crate::{
    csv_entry::CsvEntry,
    error::{MerkleTreeError, MerkleTreeError::MerkleValidationError},
    merkle_tree::MerkleTree,
    tree_node::TreeNode,
    utils::{get_max_total_claim, get_proof},
};

/// Merkle Tree which will be used to distribute tokens to claimants.
/// Contains all the information necessary to verify claims against the Merkle Tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirdropMerkleTree {
    /// The merkle root, which is committed to the claim program
    pub merkle_root: [u8; 32],
    pub max_num_nodes: u64,
    pub max_total_claim: u64,
    pub tree_nodes: Vec<TreeNode>,
}

pub type Result<T> = result::Result<T, MerkleTreeError>;

impl AirdropMerkleTree {
    pub fn new(tree_nodes: Vec<TreeNode>) -> Result<Self> {
        // Combine tree nodes with the same claimant, while retaining original order
        let mut tree_nodes_map: IndexMap<Pubkey, TreeNode> = IndexMap::new();
        for tree_node in tree_nodes {
            match tree_nodes_map.get_mut(&tree_node.claimant) {
                Some(n) => {
                    warn!("duplicate claimant {} found, combining", n.claimant);
                    n.amount = n
                        .amount
                        .checked_add(tree_node.amount)
                        .ok_or(MerkleTreeError::ArithmeticError)?;
                }
                None => {
                    tree_nodes_map.insert(tree_node.claimant, tree_node);
                }
            }
        }

        // Convert IndexMap back to Vec while preserving the order
        let mut tree_nodes: Vec<TreeNode> = tree_nodes_map.into_values().collect();

        let hashed_nodes = tree_nodes.iter().map(TreeNode::hash).collect::<Vec<_>>();

        let tree = MerkleTree::new(&hashed_nodes[..])?;

        for (tree_node, leaf) in tree_nodes.iter_mut().zip(hashed_nodes.iter()) {
            tree_node.proof = Some(get_proof(&tree, leaf)?);
        }

        let max_total_claim = get_max_total_claim(&tree_nodes)?;
        let tree = AirdropMerkleTree {
            merkle_root: *tree.get_root().ok_or(MerkleTreeError::MerkleRootError)?,
            max_num_nodes: tree_nodes.len() as u64,
            max_total_claim,
            tree_nodes,
        };

        info!(
            "created merkle tree with {} nodes and max total claim of {}",
            tree.max_num_nodes, tree.max_total_claim
        );
        tree.validate()?;
        Ok(tree)
    }

    pub fn new_from_entries(entries: Vec<CsvEntry>) -> Result<Self> {
        let tree_nodes = entries
            .into_iter()
            .map(TreeNode::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::new(tree_nodes)
    }

    /// Load a merkle tree from a csv path
    pub fn new_from_csv(path: &Path) -> Result<Self> {
        let csv_entries = CsvEntry::new_from_file(path)?;
        Self::new_from_entries(csv_entries)
    }

    /// Load a serialized merkle tree from file path
    pub fn new_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let tree: AirdropMerkleTree = serde_json::from_reader(reader)?;

        Ok(tree)
    }

    /// Write a merkle tree to a filepath
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self)?;
        let mut file = File::create(path)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }

    pub fn get_node(&self, claimant: &Pubkey) -> Result<&TreeNode> {
        self.tree_nodes
            .iter()
            .find(|n| n.claimant == *claimant)
            .ok_or_else(|| MerkleTreeError::ClaimantNotFound(claimant.to_string()))
    }

    fn validate(&self) -> Result<()> {
        // The Merkle tree can be at most height 32, implying a max node count of 2^32 - 1
        if self.max_num_nodes > 2u64.pow(32) - 1 {
            return Err(MerkleValidationError(format!(
                "Max num nodes {} is greater than 2^32 - 1",
                self.max_num_nodes
            )));
        }

        // validate that the length is equal to the max_num_nodes
        if self.tree_nodes.len() != self.max_num_nodes as usize {
            return Err(MerkleValidationError(format!(
                "Tree nodes length {} does not match max_num_nodes {}",
                self.tree_nodes.len(),
                self.max_num_nodes
            )));
        }

        // validate that there are no duplicate claimants
        let unique_nodes: HashSet<_> = self.tree_nodes.iter().map(|n| n.claimant).collect();

        if unique_nodes.len() != self.tree_nodes.len() {
            return Err(MerkleValidationError(
                "Duplicate claimants found".to_string(),
            ));
        }

        // validate that sum is equal to max_total_claim
        let sum = get_max_total_claim(&self.tree_nodes)?;

        if sum != self.max_total_claim {
            return Err(MerkleValidationError(format!(
                "Tree nodes sum {} does not match max_total_claim {}",
                sum, self.max_total_claim
            )));
        }

        if self.verify_proof().is_err() {
            return Err(MerkleValidationError(
                "Merkle root is invalid given nodes".to_string(),
            ));
        }

        Ok(())
    }

    /// verify that the leaves of the merkle tree match the nodes, and that every
    /// stored proof leads back to the root
    pub fn verify_proof(&self) -> Result<()> {
        let root = self.merkle_root;

        // Recreate root given nodes
        let hashed_nodes: Vec<[u8; 32]> = self.tree_nodes.iter().map(TreeNode::hash).collect();
        let mk = MerkleTree::new(&hashed_nodes[..])?;

        let rebuilt_root = mk
            .get_root()
            .ok_or(MerkleValidationError("invalid merkle proof".to_string()))?;
        if *rebuilt_root != root {
            return Err(MerkleValidationError(
                "merkle root does not match tree nodes".to_string(),
            ));
        }

        // Verify each node against the root
        for (node, leaf) in self.tree_nodes.iter().zip(hashed_nodes.iter()) {
            let proof = node
                .proof
                .as_ref()
                .ok_or_else(|| MerkleValidationError(format!("missing proof for {}", node.claimant)))?;

            if !verify(proof, root, *leaf) {
                return Err(MerkleValidationError("invalid merkle proof".to_string()));
            }
        }

        Ok(())
    }

    // Converts Merkle Tree to a map for faster key access
    pub fn convert_to_hashmap(&self) -> HashMap<Pubkey, TreeNode> {
        self.tree_nodes
            .iter()
            .map(|n| (n.claimant, n.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use bonus_merkle_verify::verify_claim;
    use proptest::prelude::*;
    use rand::seq::SliceRandom;
    use solana_program::{pubkey, pubkey::Pubkey};

    use super::*;

    fn new_test_tree_nodes(num_nodes: u64) -> Vec<TreeNode> {
        fn rand_balance() -> u64 {
            rand::random::<u64>() % 100 * u64::pow(10, 9)
        }

        (0..num_nodes)
            .map(|_| TreeNode {
                claimant: Pubkey::new_unique(),
                proof: None,
                amount: rand_balance(),
            })
            .collect()
    }

    fn node(claimant: Pubkey, amount: u64) -> TreeNode {
        TreeNode {
            claimant,
            amount,
            proof: None,
        }
    }

    #[test]
    fn test_verify_new_merkle_tree() {
        let tree_nodes = vec![node(Pubkey::default(), 2)];
        let merkle_tree = AirdropMerkleTree::new(tree_nodes).unwrap();
        assert!(merkle_tree.verify_proof().is_ok(), "verify failed");

        // a single leaf tree commits to the leaf itself
        assert_eq!(
            merkle_tree.merkle_root,
            bonus_merkle_verify::hash_leaf(&Pubkey::default(), 2)
        );
        assert_eq!(merkle_tree.tree_nodes[0].proof, Some(vec![]));
    }

    #[test]
    fn test_empty_merkle_tree() {
        assert!(matches!(
            AirdropMerkleTree::new(vec![]),
            Err(MerkleTreeError::EmptyTree)
        ));
    }

    #[test]
    fn test_write_tree_to_file_and_read_back() {
        // create a merkle root from 3 tree nodes and write it to file, then read it
        let tree_nodes = vec![
            node(
                pubkey!("FLYqJsmJ5AGMxMxK3Qy1rSen4ES2dqqo6h51W3C1tYS"),
                100 * u64::pow(10, 9),
            ),
            node(
                pubkey!("EDGARWktv3nDxRYjufjdbZmryqGXceaFPoPpbUzdpqED"),
                100 * u64::pow(10, 9),
            ),
            node(
                pubkey!("EDGARWktv3nDxRYjufjdbZmryqGXceaFPoPpbUzdpqEH"),
                100 * u64::pow(10, 9),
            ),
        ];

        let written = AirdropMerkleTree::new(tree_nodes).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merkle_tree.json");

        written.write_to_file(&path).unwrap();
        let read_back = AirdropMerkleTree::new_from_file(&path).unwrap();

        assert_eq!(read_back.tree_nodes.len(), 3);
        assert_eq!(read_back.merkle_root, written.merkle_root);
        assert!(read_back.verify_proof().is_ok());
    }

    #[test]
    fn test_new_from_csv() {
        let tree =
            AirdropMerkleTree::new_from_csv(Path::new("./test_fixtures/test_csv.csv")).unwrap();

        assert_eq!(tree.max_num_nodes, 3);
        assert_eq!(tree.max_total_claim, 1004 * u64::pow(10, 9));
        let found = tree
            .get_node(&pubkey!("EDGARWktv3nDxRYjufjdbZmryqGXceaFPoPpbUzdpqED"))
            .unwrap();
        assert_eq!(found.amount, 2 * u64::pow(10, 9));
    }

    #[test]
    fn test_get_node_missing_claimant() {
        let tree = AirdropMerkleTree::new(new_test_tree_nodes(4)).unwrap();
        assert!(matches!(
            tree.get_node(&Pubkey::new_unique()),
            Err(MerkleTreeError::ClaimantNotFound(_))
        ));
    }

    #[test]
    fn test_large_merkle_tree_proofs() {
        let tree = AirdropMerkleTree::new(new_test_tree_nodes(100)).unwrap();
        for n in tree.tree_nodes.iter() {
            assert!(verify_claim(
                &n.claimant,
                n.amount,
                n.proof.as_ref().unwrap(),
                tree.merkle_root
            ));
            // depth of a 100 leaf tree is 7
            assert!(n.proof.as_ref().unwrap().len() <= 7);
        }
    }

    #[test]
    fn test_tampered_amount_fails() {
        let tree = AirdropMerkleTree::new(new_test_tree_nodes(5)).unwrap();
        let n = &tree.tree_nodes[0];
        assert!(!verify_claim(
            &n.claimant,
            n.amount + 1,
            n.proof.as_ref().unwrap(),
            tree.merkle_root
        ));
    }

    #[test]
    fn test_tampered_stored_proof_fails_validation() {
        let mut tree = AirdropMerkleTree::new(new_test_tree_nodes(4)).unwrap();
        tree.tree_nodes[1].proof = Some(vec![[0u8; 32]]);
        assert!(tree.verify_proof().is_err());
    }

    // Test creating a merkle tree from Tree Nodes, where claimants are not unique
    #[test]
    fn test_new_merkle_tree_duplicate_claimants() {
        let duplicate_pubkey = Pubkey::new_unique();
        let tree_nodes = vec![
            node(duplicate_pubkey, 10),
            node(duplicate_pubkey, 1),
            node(Pubkey::new_unique(), 0),
        ];

        let tree = AirdropMerkleTree::new(tree_nodes).unwrap();
        // Assert that the merkle distributor correctly combines the two tree nodes
        assert_eq!(tree.tree_nodes.len(), 2);
        assert_eq!(tree.tree_nodes[0].claimant, duplicate_pubkey);
        assert_eq!(tree.tree_nodes[0].amount, 11);
        assert_eq!(tree.max_total_claim, 11);
    }

    #[test]
    fn test_duplicate_claimants_overflow() {
        let duplicate_pubkey = Pubkey::new_unique();
        let tree_nodes = vec![node(duplicate_pubkey, u64::MAX), node(duplicate_pubkey, 1)];

        assert!(matches!(
            AirdropMerkleTree::new(tree_nodes),
            Err(MerkleTreeError::ArithmeticError)
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn proptest_root_is_order_independent(num_nodes in 1u64..40, seed in any::<u64>()) {
            use rand::{rngs::StdRng, SeedableRng};

            let tree_nodes = new_test_tree_nodes(num_nodes);
            let mut shuffled = tree_nodes.clone();
            shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

            let tree = AirdropMerkleTree::new(tree_nodes).unwrap();
            let shuffled_tree = AirdropMerkleTree::new(shuffled).unwrap();

            prop_assert_eq!(tree.merkle_root, shuffled_tree.merkle_root);
        }

        #[test]
        fn proptest_every_member_verifies(amounts in proptest::collection::vec(any::<u64>(), 1..40)) {
            let tree_nodes: Vec<TreeNode> = amounts
                .iter()
                .map(|amount| node(Pubkey::new_unique(), *amount % (u64::MAX / 64)))
                .collect();
            let tree = AirdropMerkleTree::new(tree_nodes).unwrap();

            for n in tree.tree_nodes.iter() {
                prop_assert!(verify_claim(
                    &n.claimant,
                    n.amount,
                    n.proof.as_ref().unwrap(),
                    tree.merkle_root
                ));
            }
            // an identity outside the set cannot prove membership
            let outsider = Pubkey::new_unique();
            prop_assert!(!verify_claim(
                &outsider,
                tree.tree_nodes[0].amount,
                tree.tree_nodes[0].proof.as_ref().unwrap(),
                tree.merkle_root
            ));
        }
    }
}
