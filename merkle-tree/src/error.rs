use solana_program::pubkey::ParsePubkeyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MerkleTreeError {
    #[error("Merkle Tree Validation Error: {0}")]
    MerkleValidationError(String),
    #[error("Merkle Root Error")]
    MerkleRootError,
    #[error("Cannot build a merkle tree without any leaves")]
    EmptyTree,
    #[error("Leaf {0} is not part of the merkle tree")]
    LeafNotFound(String),
    #[error("Claimant {0} not found in merkle tree")]
    ClaimantNotFound(String),
    #[error("Arithmetic Error (overflow/underflow)")]
    ArithmeticError,
    #[error("Parse Pubkey Error: {0}")]
    ParsePubkeyError(#[from] ParsePubkeyError),
    #[error("io Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Csv Error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Serde Error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
