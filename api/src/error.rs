use std::convert::Infallible;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use bonus_merkle_tree::error::MerkleTreeError;
use serde_derive::{Deserialize, Serialize};
use serde_json::json;
use solana_program::pubkey::ParsePubkeyError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Merkle Tree Validation Error: {0}")]
    MerkleTreeError(#[from] MerkleTreeError),

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Proof not found for user {0}")]
    ProofNotFound(String),

    #[error("Parse Pubkey Error")]
    ParsePubkeyError(#[from] ParsePubkeyError),

    #[error("Distributor state not configured")]
    DistributorNotFound,

    #[error("Distributor state error: {0}")]
    DistributorStateError(String),

    #[error("Internal Error")]
    InternalError,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Error {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::MerkleTreeError(e) => {
                error!("Merkle Tree Error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            ApiError::UserNotFound(s) => {
                warn!("User {s} not found");
                (StatusCode::NOT_FOUND, "User not found")
            }
            ApiError::ProofNotFound(u) => {
                error!("Proof not found for user {u}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Proof not found")
            }
            ApiError::ParsePubkeyError(e) => {
                warn!("Parse pubkey error: {e}");
                (StatusCode::BAD_REQUEST, "Pubkey parse error")
            }
            ApiError::DistributorNotFound => (StatusCode::NOT_FOUND, "Distributor not found"),
            ApiError::DistributorStateError(e) => {
                error!("Distributor state error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            ApiError::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };
        (
            status,
            Json(Error {
                error: error_message.to_string(),
            }),
        )
            .into_response()
    }
}

pub async fn handle_error(error: BoxError) -> Result<impl IntoResponse, Infallible> {
    if error.is::<tower::timeout::error::Elapsed>() {
        return Ok((
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({
                "code" : 408,
                "error" : "Request Timeout",
            })),
        ));
    };
    if error.is::<tower::load_shed::error::Overloaded>() {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "code" : 503,
                "error" : "Service Unavailable",
            })),
        ));
    }

    error!("unhandled middleware error: {error}");
    Ok((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "code" : 500,
            "error" : "Internal Server Error",
        })),
    ))
}
