use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
    path::PathBuf,
    str::FromStr,
    sync::Arc,
    time::Duration,
};

use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bonus_merkle_tree::tree_node::TreeNode;
use claim_bonus::{ClaimBonus, InMemoryTokenLedger, TokenLedger};
use http::Request;
use serde_derive::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use tower::{
    buffer::BufferLayer, limit::RateLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer,
    ServiceBuilder,
};
use tower_http::{
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{debug, info, instrument, Span};

use crate::{error, error::ApiError, Result};

pub struct RouterState {
    pub merkle_root: [u8; 32],
    pub tree: HashMap<Pubkey, TreeNode>,
    /// Distributor state written by the cli, `None` when only serving the tree
    pub state_path: Option<PathBuf>,
}

impl Debug for RouterState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterState")
            .field("merkle_root", &hex::encode(self.merkle_root))
            .field("tree", &self.tree.len())
            .field("state_path", &self.state_path)
            .finish()
    }
}

/// Layout of the cli's state file.
#[derive(Deserialize)]
pub struct DistributorState {
    pub distributor: ClaimBonus,
    pub ledger: InMemoryTokenLedger,
}

#[instrument]
pub fn get_routes(state: Arc<RouterState>, enable_proof_endpoint: bool) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(error::handle_error))
        .layer(BufferLayer::new(100))
        .layer(RateLimitLayer::new(1000, Duration::from_secs(10)))
        .layer(TimeoutLayer::new(Duration::from_secs(20)))
        .layer(LoadShedLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started {} {}", request.method(), request.uri().path())
                })
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing_core::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/users", get(get_users))
        .route("/distributor", get(get_distributor))
        .route("/root", get(get_root))
        .route("/status/:user_pubkey", get(get_status));

    // proofs stay private until claiming opens
    if enable_proof_endpoint {
        router = router.route("/proof/:user_pubkey", get(get_proof));
    }

    router.layer(middleware).with_state(state)
}

/// Reads the distributor state file, if one is configured.
pub async fn read_distributor(state: &RouterState) -> Result<DistributorState> {
    let path = state
        .state_path
        .as_ref()
        .ok_or(ApiError::DistributorNotFound)?;
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::DistributorNotFound
        } else {
            ApiError::DistributorStateError(e.to_string())
        }
    })?;
    debug!("read {} bytes of distributor state", bytes.len());
    bincode::deserialize(&bytes).map_err(|e| ApiError::DistributorStateError(e.to_string()))
}

fn find_node<'a>(state: &'a RouterState, user_pubkey: &str) -> Result<(Pubkey, &'a TreeNode)> {
    let user_pubkey = Pubkey::from_str(user_pubkey)?;
    let node = state
        .tree
        .get(&user_pubkey)
        .ok_or_else(|| ApiError::UserNotFound(user_pubkey.to_string()))?;
    Ok((user_pubkey, node))
}

/// Retrieve the proof for a given user
#[instrument(ret)]
async fn get_proof(
    State(state): State<Arc<RouterState>>,
    Path(user_pubkey): Path<String>,
) -> Result<Json<Proof>> {
    let (user_pubkey, node) = find_node(&state, &user_pubkey)?;

    let proof = Proof {
        amount: node.amount(),
        proof: node
            .proof
            .to_owned()
            .ok_or_else(|| ApiError::ProofNotFound(user_pubkey.to_string()))?,
    };

    Ok(Json(proof))
}

#[instrument(ret)]
async fn get_users(State(state): State<Arc<RouterState>>) -> Result<Json<Vec<String>>> {
    let mut users: Vec<String> = state.tree.keys().map(|key| key.to_string()).collect();
    users.sort_unstable();

    Ok(Json(users))
}

#[derive(Serialize, Deserialize, Debug)]
struct Distributor {
    /// Admin wallet
    pub admin: Pubkey,
    /// Ledger of the token being distributed
    pub token_ledger: Pubkey,
    /// Token account paying out claims
    pub vault: Pubkey,
    pub vault_balance: u64,
    /// The 256-bit merkle root, hex encoded.
    pub root: String,
    /// Bumped on every root update
    pub root_epoch: u64,
    /// Total amount of tokens that have been claimed.
    pub total_amount_claimed: u64,
    /// Number of nodes that have been claimed.
    pub num_nodes_claimed: u64,
}

async fn get_distributor(State(state): State<Arc<RouterState>>) -> Result<Json<Distributor>> {
    let DistributorState {
        distributor: d,
        ledger,
    } = read_distributor(&state).await?;
    Ok(Json(Distributor {
        admin: d.admin(),
        token_ledger: d.token_ledger(),
        vault: d.vault(),
        vault_balance: ledger.balance_of(&d.vault()),
        root: hex::encode(d.root()),
        root_epoch: d.root_epoch(),
        total_amount_claimed: d.total_amount_claimed(),
        num_nodes_claimed: d.num_nodes_claimed(),
    }))
}

#[derive(Serialize, Deserialize, Debug)]
struct Root {
    /// Root of the served merkle tree, hex encoded
    pub merkle_root: String,
    /// Whether the distributor currently trusts the served tree, `None` without state
    pub active: Option<bool>,
}

#[instrument(ret)]
async fn get_root(State(state): State<Arc<RouterState>>) -> Result<Json<Root>> {
    let active = match read_distributor(&state).await {
        Ok(d) => Some(d.distributor.root() == state.merkle_root),
        Err(ApiError::DistributorNotFound) => None,
        Err(e) => return Err(e),
    };

    Ok(Json(Root {
        merkle_root: hex::encode(state.merkle_root),
        active,
    }))
}

#[instrument(ret)]
async fn get_status(
    State(state): State<Arc<RouterState>>,
    Path(user_pubkey): Path<String>,
) -> Result<Json<ClaimStatus>> {
    let (user_pubkey, node) = find_node(&state, &user_pubkey)?;
    let distributor = read_distributor(&state).await?.distributor;

    let claim_status = match distributor.claim_status(&user_pubkey) {
        Some(claimed) => ClaimStatus {
            status: Status::Claimed,
            amount: node.amount(),
            amount_claimed: claimed.amount,
            root_epoch: Some(claimed.root_epoch),
        },
        None => ClaimStatus {
            status: Status::Unclaimed,
            amount: node.amount(),
            amount_claimed: 0,
            root_epoch: None,
        },
    };

    Ok(Json(claim_status))
}

async fn root() -> impl IntoResponse {
    "Bonus Claim API"
}

#[derive(Serialize, Deserialize, Debug)]
struct Proof {
    pub amount: u64,
    pub proof: Vec<[u8; 32]>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
enum Status {
    Unclaimed,
    Claimed,
}

#[derive(Serialize, Deserialize, Debug)]
struct ClaimStatus {
    pub status: Status,
    /// Allocation in the served tree
    pub amount: u64,
    pub amount_claimed: u64,
    /// Epoch of the root the claim was made against
    pub root_epoch: Option<u64>,
}
