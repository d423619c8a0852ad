//! HTTP handlers for the wallet and explorer endpoints.
//!
//! The handlers are a thin translation layer: request types map onto
//! [`WalletService`] / [`Ledger`] calls and errors map onto status codes.
//! No chain logic lives here.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ferrochain_core::{seed_from_passphrase, FeeHint, SignedTx, Tx};
use ferrochain_ledger::{Ledger, LedgerError};
use ferrochain_storage::SnapshotStore;
use ferrochain_wallet::{AdapterError, WalletService};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const DEFAULT_BLOCK_LIMIT: u64 = 50;
const DEFAULT_TX_LIMIT: u64 = 100;
const MAX_LIST_LIMIT: u64 = 500;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WalletService>,
    pub ledger: Arc<Ledger>,
    pub store: Option<Arc<dyn SnapshotStore>>,
}

impl AppState {
    /// Best-effort persistence after a mutating request. A failed save is
    /// logged and otherwise ignored; the in-memory ledger stays live.
    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.ledger.snapshot()) {
                tracing::warn!("snapshot save failed: {e}");
            }
        }
    }
}

pub enum ApiError {
    Adapter(AdapterError),
    BadRequest(String),
}

impl From<AdapterError> for ApiError {
    fn from(e: AdapterError) -> Self {
        Self::Adapter(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Adapter(e) => {
                let status = match &e {
                    AdapterError::UnknownChain(_)
                    | AdapterError::TxNotFound(_)
                    | AdapterError::Ledger(LedgerError::BlockNotFound(_)) => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, e.to_string())
            }
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Deserialize, Default)]
pub struct ChainQuery {
    #[serde(default)]
    chain: String,
}

#[derive(Deserialize)]
pub struct LimitQuery {
    limit: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewKeyReq {
    #[serde(default)]
    mode: KeyMode,
    #[serde(default)]
    seed: String,
    #[serde(default)]
    passphrase: String,
}

#[derive(Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    #[default]
    Random,
    Seed,
    Passphrase,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTxReq {
    from: String,
    to: String,
    amount: u64,
    #[serde(default)]
    max_fee_per_gas: u64,
    #[serde(default)]
    max_priority_fee: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTxReq {
    private_key: String,
    tx: Tx,
}

#[derive(Deserialize)]
pub struct FaucetReq {
    address: String,
    amount: u64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/chains", get(chains))
        .route("/v1/keys/new", post(new_key))
        .route("/v1/balance/:address", get(balance))
        .route("/v1/tx/build", post(build_tx))
        .route("/v1/tx/sign", post(sign_tx))
        .route("/v1/tx/broadcast", post(broadcast))
        .route("/v1/tx/:id", get(tx_status))
        .route("/v1/blocks", get(blocks))
        .route("/v1/transactions", get(transactions))
        .route("/v1/faucet", post(faucet))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "consensus": state.ledger.engine_name(),
        "height": state.ledger.height(),
    }))
}

async fn chains(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "chains": state.service.chains(),
        "default": state.service.default_chain(),
    }))
}

async fn new_key(
    State(state): State<AppState>,
    Query(q): Query<ChainQuery>,
    Json(req): Json<NewKeyReq>,
) -> ApiResult<Json<ferrochain_core::KeyMaterial>> {
    let adapter = state.service.adapter_for(&q.chain)?;

    let seed = match req.mode {
        KeyMode::Random => Vec::new(),
        KeyMode::Seed => {
            let s = req.seed.strip_prefix("0x").unwrap_or(&req.seed);
            hex::decode(s).map_err(|_| ApiError::BadRequest("seed must be hex".into()))?
        }
        KeyMode::Passphrase => {
            if req.passphrase.is_empty() {
                return Err(ApiError::BadRequest("passphrase must not be empty".into()));
            }
            seed_from_passphrase(&req.passphrase)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?
        }
    };

    let material = adapter.new_key(&seed)?;
    state.persist();
    Ok(Json(material))
}

async fn balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(q): Query<ChainQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let adapter = state.service.adapter_for(&q.chain)?;
    let normalized = adapter.parse_address(&address)?;
    let balance = adapter.balance(&normalized)?;
    Ok(Json(json!({ "address": normalized, "balance": balance })))
}

async fn build_tx(
    State(state): State<AppState>,
    Query(q): Query<ChainQuery>,
    Json(req): Json<BuildTxReq>,
) -> ApiResult<Json<Tx>> {
    let adapter = state.service.adapter_for(&q.chain)?;
    let hint = FeeHint {
        max_fee_per_gas: req.max_fee_per_gas,
        max_priority_fee: req.max_priority_fee,
    };
    let tx = adapter.build_tx(&req.from, &req.to, req.amount, hint)?;
    Ok(Json(tx))
}

async fn sign_tx(
    State(state): State<AppState>,
    Query(q): Query<ChainQuery>,
    Json(req): Json<SignTxReq>,
) -> ApiResult<Json<SignedTx>> {
    let adapter = state.service.adapter_for(&q.chain)?;
    let signed = adapter.sign_tx(&req.private_key, &req.tx)?;
    Ok(Json(signed))
}

async fn broadcast(
    State(state): State<AppState>,
    Query(q): Query<ChainQuery>,
    Json(signed): Json<SignedTx>,
) -> ApiResult<Json<serde_json::Value>> {
    let adapter = state.service.adapter_for(&q.chain)?;
    let id = adapter.broadcast(&signed)?;
    state.persist();
    Ok(Json(json!({ "txId": id })))
}

async fn tx_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(q): Query<ChainQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let adapter = state.service.adapter_for(&q.chain)?;
    let status = adapter.tx_status(&id)?;
    Ok(Json(json!({ "id": id, "status": status.to_string() })))
}

async fn blocks(
    State(state): State<AppState>,
    Query(q): Query<LimitQuery>,
) -> Json<Vec<ferrochain_core::Block>> {
    Json(state.ledger.list_blocks(clamp_limit(q.limit, DEFAULT_BLOCK_LIMIT)))
}

async fn transactions(
    State(state): State<AppState>,
    Query(q): Query<LimitQuery>,
) -> Json<Vec<ferrochain_core::RecordedTransaction>> {
    Json(
        state
            .ledger
            .list_transactions(clamp_limit(q.limit, DEFAULT_TX_LIMIT)),
    )
}

async fn faucet(
    State(state): State<AppState>,
    Json(req): Json<FaucetReq>,
) -> ApiResult<Json<serde_json::Value>> {
    let adapter = state.service.adapter_for("")?;
    let normalized = adapter.parse_address(&req.address)?;
    let address = ferrochain_core::Address::from_hex(&normalized)
        .map_err(|_| ApiError::BadRequest("invalid address".into()))?;

    state.ledger.credit(&address, req.amount);
    state.persist();
    Ok(Json(json!({
        "address": normalized,
        "balance": state.ledger.get_balance(&address),
    })))
}

/// Missing or zero limits fall back to the default; anything above the cap
/// is clamped so a single request cannot dump the whole chain.
fn clamp_limit(requested: Option<u64>, default: u64) -> u64 {
    match requested {
        None | Some(0) => default,
        Some(n) => n.min(MAX_LIST_LIMIT),
    }
}
