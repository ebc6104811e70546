use solana_program::pubkey::Pubkey;
use thiserror::Error;

use crate::token::TokenError;

pub type Result<T> = std::result::Result<T, ClaimBonusError>;

/// Error codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimBonusError {
    #[error("Invalid Merkle proof.")]
    InvalidProof,
    #[error("Bonus already claimed")]
    AlreadyClaimed,
    #[error("Account is not authorized to execute this instruction")]
    Unauthorized,
    #[error("Token transfer failed: {0}")]
    TransferFailed(#[source] TokenError),
    #[error("Token ledger {0} does not match the distributor's token ledger")]
    WrongTokenLedger(Pubkey),
    #[error("New and old admin are identical")]
    SameAdmin,
    #[error("No claim status recorded for {0}")]
    ClaimStatusNotFound(Pubkey),
    #[error("Claimant {0} is the distributor vault")]
    ClaimantIsVault(Pubkey),
    #[error("Arithmetic Error (overflow/underflow)")]
    ArithmeticError,
}
