mod error;
mod router;

use std::{fmt::Debug, net::SocketAddr, path::PathBuf, sync::Arc};

use bonus_merkle_tree::airdrop_merkle_tree::AirdropMerkleTree;
use clap::Parser;
use router::RouterState;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ApiError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Bind address for the server
    #[clap(long, env, default_value = "0.0.0.0:7001")]
    bind_addr: SocketAddr,

    /// Path of merkle tree
    #[clap(long, env)]
    merkle_tree_path: PathBuf,

    /// Distributor state file written by the cli
    #[clap(long, env)]
    state_path: Option<PathBuf>,

    /// Serve `/proof/:user_pubkey`
    #[clap(long, env)]
    enable_proof_endpoint: bool,
}

#[tokio::main]
#[instrument]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("args: {:?}", args);

    let merkle_tree = AirdropMerkleTree::new_from_file(&args.merkle_tree_path)?;
    merkle_tree.verify_proof()?;
    info!(
        "loaded merkle tree {} with {} nodes",
        hex::encode(merkle_tree.merkle_root),
        merkle_tree.max_num_nodes
    );

    let state = Arc::new(RouterState {
        merkle_root: merkle_tree.merkle_root,
        tree: merkle_tree.convert_to_hashmap(),
        state_path: args.state_path.clone(),
    });

    match router::read_distributor(&state).await {
        Ok(distributor) if distributor.distributor.root() != merkle_tree.merkle_root => warn!(
            "distributor root {} differs from served tree",
            hex::encode(distributor.distributor.root())
        ),
        Ok(distributor) => info!(
            "distributor root epoch {}",
            distributor.distributor.root_epoch()
        ),
        Err(e) => warn!("distributor state unavailable: {e}"),
    }

    let app = router::get_routes(state, args.enable_proof_endpoint);

    info!("starting server at {}", args.bind_addr);
    axum::Server::bind(&args.bind_addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}
