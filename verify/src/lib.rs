use solana_program::{keccak::hashv, pubkey::Pubkey};

/// Width in bytes of one encoded leaf: a 32-byte claimant followed by a
/// 32-byte big-endian amount word.
pub const LEAF_LEN: usize = 64;

/// Canonically encodes `(claimant, amount)` into the fixed-width leaf input.
///
/// The amount occupies the low 8 bytes of a big-endian 32-byte word so the
/// layout matches an ABI encoded `(address, uint256)` pair.
pub fn encode_leaf(claimant: &Pubkey, amount: u64) -> [u8; LEAF_LEN] {
    let mut encoded = [0u8; LEAF_LEN];
    encoded[..32].copy_from_slice(claimant.as_ref());
    encoded[LEAF_LEN - 8..].copy_from_slice(&amount.to_be_bytes());
    encoded
}

/// Leaf node of the claim tree, `keccak(encode_leaf(claimant, amount))`.
pub fn hash_leaf(claimant: &Pubkey, amount: u64) -> [u8; 32] {
    hashv(&[&encode_leaf(claimant, amount)]).to_bytes()
}

/// Combines two child hashes into their parent. The smaller hash always goes
/// first, so the result does not depend on which side each child sits on.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hashv(&[a, b]).to_bytes()
    } else {
        hashv(&[b, a]).to_bytes()
    }
}

/// This function deals with verification of Merkle trees (hash trees).
/// Modelled on OpenZeppelin's `MerkleProof.verify`.
/// Returns true if a `leaf` can be proved to be a part of a Merkle tree
/// defined by `root`. For this, a `proof` must be provided, containing
/// sibling hashes on the branch from the leaf to the root of the tree. Each
/// pair of pre-images is assumed to be sorted.
pub fn verify(proof: &[[u8; 32]], root: [u8; 32], leaf: [u8; 32]) -> bool {
    let computed_hash = proof
        .iter()
        .fold(leaf, |computed_hash, proof_element| {
            hash_pair(&computed_hash, proof_element)
        });
    hashes_equal(&computed_hash, &root)
}

/// Recomputes the leaf for `(claimant, amount)` and checks it against `root`.
pub fn verify_claim(claimant: &Pubkey, amount: u64, proof: &[[u8; 32]], root: [u8; 32]) -> bool {
    verify(proof, root, hash_leaf(claimant, amount))
}

// No early exit: every byte is compared regardless of where a mismatch is.
fn hashes_equal(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_encode_leaf_layout() {
        let claimant = Pubkey::new_from_array([7u8; 32]);
        let encoded = encode_leaf(&claimant, 0x0102_0304_0506_0708);

        assert_eq!(&encoded[..32], &[7u8; 32]);
        assert_eq!(&encoded[32..56], &[0u8; 24]);
        assert_eq!(&encoded[56..], &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_encode_leaf_distinguishes_amounts() {
        let claimant = Pubkey::new_unique();
        assert_ne!(encode_leaf(&claimant, 2), encode_leaf(&claimant, 3));
        assert_ne!(hash_leaf(&claimant, 2), hash_leaf(&claimant, 3));
    }

    #[test]
    fn test_single_leaf_tree_has_empty_proof() {
        let claimant = Pubkey::new_unique();
        let root = hash_leaf(&claimant, 2);

        assert!(verify_claim(&claimant, 2, &[], root));
        assert!(!verify_claim(&claimant, 3, &[], root));
    }

    #[test]
    fn test_two_leaf_tree() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let alice_leaf = hash_leaf(&alice, 10);
        let bob_leaf = hash_leaf(&bob, 20);
        let root = hash_pair(&alice_leaf, &bob_leaf);

        assert!(verify_claim(&alice, 10, &[bob_leaf], root));
        assert!(verify_claim(&bob, 20, &[alice_leaf], root));
        assert!(!verify_claim(&alice, 20, &[bob_leaf], root));
        assert!(!verify_claim(&alice, 10, &[alice_leaf], root));
    }

    #[test]
    fn test_proof_order_matters() {
        let leaves: Vec<[u8; 32]> = (0..3u64)
            .map(|i| hash_leaf(&Pubkey::new_unique(), i))
            .collect();
        let inner = hash_pair(&leaves[0], &leaves[1]);
        let root = hash_pair(&inner, &leaves[2]);

        assert!(verify(&[leaves[1], leaves[2]], root, leaves[0]));
        assert!(!verify(&[leaves[2], leaves[1]], root, leaves[0]));
    }

    proptest! {
        #[test]
        fn proptest_hash_pair_is_order_independent(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            prop_assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
        }

        #[test]
        fn proptest_tampered_sibling_fails(
            amount in any::<u64>(),
            sibling in any::<[u8; 32]>(),
            flip in 0usize..32,
        ) {
            let claimant = Pubkey::new_unique();
            let leaf = hash_leaf(&claimant, amount);
            let root = hash_pair(&leaf, &sibling);

            let mut tampered = sibling;
            tampered[flip] ^= 0x01;

            prop_assert!(verify_claim(&claimant, amount, &[sibling], root));
            prop_assert!(!verify_claim(&claimant, amount, &[tampered], root));
        }
    }
}
