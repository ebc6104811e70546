//! Sorted-pair binary Merkle tree.
//!
//! Leaves are sorted ascending before the first level is built and every
//! parent is `keccak(min(a, b) || max(a, b))`, so the root only depends on the
//! set of leaves and never on the order they were supplied in. When a level
//! has an odd number of nodes the last one is promoted to the next level
//! unchanged; it is not duplicated.

use bonus_merkle_verify::hash_pair;

use crate::error::MerkleTreeError;

pub type Result<T> = std::result::Result<T, MerkleTreeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// `levels[0]` holds the sorted leaves, the last level holds the root.
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    pub fn new(leaves: &[[u8; 32]]) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleTreeError::EmptyTree);
        }

        let mut level = leaves.to_vec();
        level.sort_unstable();

        let mut levels = vec![level];
        while levels[levels.len() - 1].len() > 1 {
            let next = levels[levels.len() - 1]
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [promoted] => *promoted,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            levels.push(next);
        }

        Ok(Self { levels })
    }

    pub fn get_root(&self) -> Option<&[u8; 32]> {
        self.levels.last().and_then(|level| level.first())
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Position of `leaf` in the sorted leaf level.
    pub fn leaf_index(&self, leaf: &[u8; 32]) -> Option<usize> {
        self.levels[0].binary_search(leaf).ok()
    }

    /// Sibling hashes from the leaf at `index` up to the root. Levels where
    /// the node was promoted contribute nothing.
    pub fn find_path(&self, index: usize) -> Option<Vec<[u8; 32]>> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut path = Vec::with_capacity(self.depth());
        let mut index = index;
        for level in &self.levels[..self.depth()] {
            let sibling = index ^ 1;
            if let Some(hash) = level.get(sibling) {
                path.push(*hash);
            }
            index /= 2;
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use bonus_merkle_verify::verify;

    use super::*;

    fn leaves(n: u8) -> Vec<[u8; 32]> {
        (0..n).map(|i| [i.wrapping_mul(37); 32]).collect()
    }

    #[test]
    fn test_empty_tree_is_rejected() {
        assert!(matches!(
            MerkleTree::new(&[]),
            Err(MerkleTreeError::EmptyTree)
        ));
    }

    #[test]
    fn test_single_leaf_root_is_leaf() {
        let leaf = [9u8; 32];
        let tree = MerkleTree::new(&[leaf]).unwrap();

        assert_eq!(tree.get_root(), Some(&leaf));
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.find_path(0), Some(vec![]));
    }

    #[test]
    fn test_odd_node_is_promoted() {
        let mut three = leaves(3);
        three.sort_unstable();
        let tree = MerkleTree::new(&three).unwrap();

        let expected = hash_pair(&hash_pair(&three[0], &three[1]), &three[2]);
        assert_eq!(tree.get_root(), Some(&expected));

        // the promoted leaf only has a sibling at the top level
        assert_eq!(tree.find_path(2), Some(vec![hash_pair(&three[0], &three[1])]));
    }

    #[test]
    fn test_every_path_verifies() {
        for n in 1..=17u8 {
            let tree = MerkleTree::new(&leaves(n)).unwrap();
            let root = *tree.get_root().unwrap();
            for leaf in leaves(n) {
                let index = tree.leaf_index(&leaf).unwrap();
                let path = tree.find_path(index).unwrap();
                assert!(verify(&path, root, leaf), "n={n} leaf={leaf:?}");
            }
        }
    }

    #[test]
    fn test_find_path_out_of_range() {
        let tree = MerkleTree::new(&leaves(4)).unwrap();
        assert_eq!(tree.find_path(4), None);
    }
}
