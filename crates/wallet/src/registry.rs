//! Adapter registry, keyed by network identifier.

use crate::adapter::ChainAdapter;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable map from network identifier to adapter. Built once at startup;
/// later registrations would race with in-flight requests, so there is no
/// mutation API.
pub struct Registry {
    adapters: HashMap<String, Arc<dyn ChainAdapter>>,
}

impl Registry {
    pub fn new(adapters: Vec<Arc<dyn ChainAdapter>>) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.network().to_string(), adapter))
            .collect();
        Self { adapters }
    }

    pub fn get(&self, network: &str) -> Option<Arc<dyn ChainAdapter>> {
        self.adapters.get(network).cloned()
    }

    /// Registered network identifiers, sorted for stable output.
    pub fn networks(&self) -> Vec<String> {
        let mut networks: Vec<String> = self.adapters.keys().cloned().collect();
        networks.sort();
        networks
    }
}
