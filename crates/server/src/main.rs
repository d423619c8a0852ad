//! ferrochaind entry point.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ferrochain_consensus::{Engine, FixedStake};
use ferrochain_ledger::{Ledger, LedgerSnapshot};
use ferrochain_storage::{SledStore, SnapshotStore};
use ferrochain_wallet::{ChainAdapter, Registry, SimulatedAdapter, WalletService};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

mod handlers;

use handlers::AppState;

#[derive(Parser)]
#[command(name = "ferrochaind")]
#[command(about = "Demo wallet service over a simulated chain", long_about = None)]
struct Args {
    /// Listen address.
    #[arg(long, env = "FERROCHAIN_ADDR", default_value = "127.0.0.1:8080")]
    addr: String,

    /// Default chain for requests that do not name one.
    #[arg(long, env = "FERROCHAIN_CHAIN", default_value = "ferrochain")]
    chain: String,

    /// Consensus engine for the simulated chain.
    #[arg(long, env = "FERROCHAIN_CONSENSUS", value_enum, default_value_t = ConsensusKind::Pow)]
    consensus: ConsensusKind,

    /// Proof-of-work difficulty in leading zero bits.
    #[arg(long, env = "FERROCHAIN_DIFFICULTY", default_value_t = 8)]
    difficulty: u32,

    /// Fixed total stake for proof-of-stake.
    #[arg(long, env = "FERROCHAIN_STAKE", default_value_t = 100)]
    stake: u64,

    /// Snapshot directory; state is in-memory only when unset.
    #[arg(long, env = "FERROCHAIN_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy)]
enum ConsensusKind {
    Pow,
    Pos,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let engine = match args.consensus {
        ConsensusKind::Pow => Engine::proof_of_work(args.difficulty),
        ConsensusKind::Pos => Engine::proof_of_stake(Arc::new(FixedStake(args.stake))),
    };

    let store: Option<Arc<dyn SnapshotStore>> = match &args.data_dir {
        Some(dir) => {
            let store = SledStore::open(dir)
                .with_context(|| format!("opening snapshot store at {}", dir.display()))?;
            Some(Arc::new(store))
        }
        None => None,
    };

    let snapshot = match &store {
        Some(store) => store
            .load()
            .context("loading ledger snapshot")?
            .unwrap_or_default(),
        None => LedgerSnapshot::default(),
    };

    let ledger = Arc::new(Ledger::restore(engine, snapshot));
    tracing::info!(
        consensus = ledger.engine_name(),
        height = ledger.height(),
        "ledger ready"
    );

    let adapter: Arc<dyn ChainAdapter> = Arc::new(SimulatedAdapter::new(ledger.clone()));
    let registry = Registry::new(vec![adapter]);
    let service = Arc::new(WalletService::new(registry, args.chain));

    let state = AppState {
        service,
        ledger,
        store,
    };
    let app = handlers::router(state).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("binding {}", args.addr))?;
    tracing::info!("listening on {}", args.addr);
    axum::serve(listener, app).await?;

    Ok(())
}
