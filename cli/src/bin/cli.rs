extern crate bonus_merkle_tree;
extern crate claim_bonus;

mod instructions;
mod local_state;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use bonus_merkle_tree::{airdrop_merkle_tree::AirdropMerkleTree, csv_entry::CsvEntry};
use claim_bonus::{ClaimBonus, InMemoryTokenLedger, TokenLedger};
use clap::{Parser, Subcommand};
use instructions::*;
use local_state::LocalState;
use solana_program::pubkey::Pubkey;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,

    /// Local distributor state file
    #[clap(long, env, default_value = "claim_bonus_state.bin")]
    pub state_path: PathBuf,

    /// Pubkey of the principal issuing the command
    #[clap(long, env)]
    pub signer: Option<Pubkey>,
}

impl Args {
    fn signer(&self) -> Result<Pubkey> {
        self.signer
            .ok_or_else(|| anyhow!("--signer is required for {:?}", self.command))
    }
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a Merkle tree, given a CSV of recipients
    CreateMerkleTree(CreateMerkleTreeArgs),
    CreateDummyCsv(CreateDummyCsv),
    /// Print a claimant's amount and proof from a merkle tree file
    GetProof(GetProofArgs),
    /// Check a proof against a root without any state
    VerifyProof(VerifyProofArgs),
    /// Validate a merkle tree file and compare it with the local distributor
    Verify(VerifyArgs),
    /// Create a new distributor in the local state file, signer becomes admin
    NewDistributor(NewDistributorArgs),
    /// Mint tokens into the distributor vault
    Fund(FundArgs),
    /// Claim the signer's bonus
    Claim(ClaimArgs),
    /// Replace the merkle root with the root of a tree file
    UpdateRoot(UpdateRootArgs),
    /// Sweep the vault to the admin
    Withdraw,
    SetAdmin(SetAdminArgs),
    /// Re-open a claimant so they can claim again
    CloseClaimStatus(CloseClaimStatusArgs),
    /// Show the distributor, or one claimant's status
    Status(StatusArgs),
}

#[derive(Parser, Debug)]
pub struct CreateMerkleTreeArgs {
    /// CSV path
    #[clap(long, env)]
    pub csv_path: PathBuf,

    /// Merkle tree out path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct CreateDummyCsv {
    /// CSV path
    #[clap(long, env)]
    pub csv_path: PathBuf,
    #[clap(long, env)]
    pub num_records: u64,
    /// ui amount per record
    #[clap(long, env)]
    pub amount: u64,
}

#[derive(Parser, Debug)]
pub struct GetProofArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,
    #[clap(long, env)]
    pub claimant: Pubkey,
}

#[derive(Parser, Debug)]
pub struct VerifyProofArgs {
    /// Hex encoded merkle root
    #[clap(long, env)]
    pub root: String,
    #[clap(long, env)]
    pub claimant: Pubkey,
    /// Token amount (with decimals)
    #[clap(long, env)]
    pub amount: u64,
    /// Hex encoded sibling hashes, leaf first
    #[clap(long, env, value_delimiter = ',')]
    pub proof: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct NewDistributorArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    /// Token ledger address, random if omitted
    #[clap(long, env)]
    pub token_ledger: Option<Pubkey>,

    /// Vault address, random if omitted
    #[clap(long, env)]
    pub vault: Option<Pubkey>,

    /// Mint max_total_claim into the vault right away
    #[clap(long, env)]
    pub fund: bool,
}

#[derive(Parser, Debug)]
pub struct FundArgs {
    /// Token amount (with decimals)
    #[clap(long, env)]
    pub amount: u64,
}

#[derive(Parser, Debug)]
pub struct ClaimArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct UpdateRootArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct SetAdminArgs {
    #[clap(long, env)]
    pub new_admin: Pubkey,
}

#[derive(Parser, Debug)]
pub struct CloseClaimStatusArgs {
    #[clap(long, env)]
    pub claimant: Pubkey,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    #[clap(long, env)]
    pub claimant: Option<Pubkey>,
}

/// Fresh address for accounts the operator did not name.
pub fn random_pubkey() -> Pubkey {
    Pubkey::new_from_array(rand::random())
}

/// Parses a 32 byte hash given as hex, with or without a `0x` prefix.
pub fn parse_hash(value: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(value.trim_start_matches("0x"))
        .with_context(|| format!("invalid hex hash {value}"))?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| anyhow!("hash must be 32 bytes, got {}", bytes.len()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match &args.command {
        Commands::CreateMerkleTree(merkle_tree_args) => {
            process_create_merkle_tree(merkle_tree_args)
        }
        Commands::CreateDummyCsv(dummy_csv_args) => process_create_dummy_csv(dummy_csv_args),
        Commands::GetProof(get_proof_args) => process_get_proof(get_proof_args),
        Commands::VerifyProof(verify_proof_args) => process_verify_proof(verify_proof_args),
        Commands::Verify(verify_args) => process_verify(&args, verify_args),
        Commands::NewDistributor(new_distributor_args) => {
            process_new_distributor(&args, new_distributor_args)
        }
        Commands::Fund(fund_args) => process_fund(&args, fund_args),
        Commands::Claim(claim_args) => process_claim(&args, claim_args),
        Commands::UpdateRoot(update_root_args) => process_update_root(&args, update_root_args),
        Commands::Withdraw => process_withdraw(&args),
        Commands::SetAdmin(set_admin_args) => process_set_admin(&args, set_admin_args),
        Commands::CloseClaimStatus(close_claim_status_args) => {
            process_close_claim_status(&args, close_claim_status_args)
        }
        Commands::Status(status_args) => process_status(&args, status_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hash() {
        let hash = [0xabu8; 32];
        assert_eq!(parse_hash(&hex::encode(hash)).unwrap(), hash);
        assert_eq!(
            parse_hash(&format!("0x{}", hex::encode(hash))).unwrap(),
            hash
        );
        assert!(parse_hash("0x1234").is_err());
        assert!(parse_hash("zz").is_err());
    }

    #[test]
    fn test_args_parse() {
        let signer = Pubkey::new_unique();
        let args = Args::try_parse_from([
            "cli",
            "--signer",
            &signer.to_string(),
            "--state-path",
            "/tmp/state.bin",
            "claim",
            "--merkle-tree-path",
            "/tmp/tree.json",
        ])
        .unwrap();

        assert_eq!(args.signer().unwrap(), signer);
        assert!(matches!(args.command, Commands::Claim(_)));
    }

    #[test]
    fn test_random_pubkey_is_not_sequential() {
        let first = random_pubkey();
        let second = random_pubkey();
        assert_ne!(first, second);
        assert_ne!(first, Pubkey::default());
    }

    #[test]
    fn test_missing_signer() {
        let args = Args::try_parse_from(["cli", "withdraw"]).unwrap();
        assert!(args.signer().is_err());
    }
}
