//! Wallet entry point: resolves a chain parameter to an adapter.

use crate::adapter::{AdapterError, ChainAdapter, Result};
use crate::registry::Registry;
use std::sync::Arc;

/// Dispatches wallet operations to the adapter for the requested chain.
/// An empty chain parameter selects the configured default.
pub struct WalletService {
    registry: Registry,
    default_chain: String,
}

impl WalletService {
    pub fn new(registry: Registry, default_chain: impl Into<String>) -> Self {
        Self {
            registry,
            default_chain: default_chain.into(),
        }
    }

    pub fn adapter_for(&self, chain: &str) -> Result<Arc<dyn ChainAdapter>> {
        let chain = if chain.is_empty() {
            &self.default_chain
        } else {
            chain
        };
        self.registry
            .get(chain)
            .ok_or_else(|| AdapterError::UnknownChain(chain.to_string()))
    }

    pub fn chains(&self) -> Vec<String> {
        self.registry.networks()
    }

    pub fn default_chain(&self) -> &str {
        &self.default_chain
    }
}
