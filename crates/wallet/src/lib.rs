//! Chain adapters and wallet dispatch for ferrochain.
//!
//! Every backend chain sits behind the [`ChainAdapter`] capability set:
//! `network`, `new_key`, `parse_address`, `balance`, `build_tx`, `sign_tx`,
//! `broadcast`, `tx_status`. The [`Registry`] maps network identifiers to
//! adapter instances and is immutable after startup; [`WalletService`] is
//! the entry point the transport layer calls.

pub mod adapter;
pub mod registry;
pub mod service;
pub mod simulated;

pub use adapter::{AdapterError, ChainAdapter};
pub use registry::Registry;
pub use service::WalletService;
pub use simulated::SimulatedAdapter;
