//! The simulated ledger: an in-memory, single-node chain state machine.
//!
//! One reader/writer lock protects the block list, per-address balances and
//! nonces, and the append-only transaction log. `submit_tx` is the central
//! all-or-nothing state transition; it calls the consensus engine to seal
//! each new block synchronously, so every recorded transaction is already
//! mined.

pub mod ledger;
pub mod snapshot;

pub use ledger::{Ledger, LedgerError};
pub use snapshot::LedgerSnapshot;
