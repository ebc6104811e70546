use bonus_merkle_verify::verify_claim;

use crate::*;

/// Stateless check of a single proof, the same one the distributor runs on claim.
pub fn process_verify_proof(verify_proof_args: &VerifyProofArgs) -> Result<()> {
    let root = parse_hash(&verify_proof_args.root)?;
    let proof = verify_proof_args
        .proof
        .iter()
        .map(|hash| parse_hash(hash))
        .collect::<Result<Vec<_>>>()?;

    if !verify_claim(
        &verify_proof_args.claimant,
        verify_proof_args.amount,
        &proof,
        root,
    ) {
        bail!(
            "proof does not verify {} for {}",
            verify_proof_args.claimant,
            verify_proof_args.amount
        );
    }
    println!("proof is valid");
    Ok(())
}
