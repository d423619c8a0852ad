//! Adapter for the built-in simulated chain.

use crate::adapter::{AdapterError, ChainAdapter, Result};
use ferrochain_core::{
    hash, random_seed, Address, FeeHint, KeyMaterial, Keypair, SignedTx, Tx, TxStatus,
};
use ferrochain_ledger::Ledger;
use std::sync::Arc;

const NETWORK: &str = "ferrochain";

/// Demo funds granted to every freshly derived address.
const NEW_KEY_GRANT: u64 = 100;

/// The simulated chain behind the uniform adapter interface.
///
/// `sign_tx` is a content hash over the canonical encoding, not a real
/// signature; it exists to produce a stable transaction identifier and an
/// opaque raw payload that `broadcast` can decode and resubmit.
pub struct SimulatedAdapter {
    ledger: Arc<Ledger>,
}

impl SimulatedAdapter {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    fn decode_address(&self, address: &str) -> Result<Address> {
        let normalized = self.parse_address(address)?;
        Address::from_hex(&normalized).map_err(|_| AdapterError::InvalidAddress { chain: NETWORK })
    }
}

impl ChainAdapter for SimulatedAdapter {
    fn network(&self) -> &'static str {
        NETWORK
    }

    fn new_key(&self, seed: &[u8]) -> Result<KeyMaterial> {
        let keypair = if seed.is_empty() {
            Keypair::from_seed(&random_seed())
        } else {
            Keypair::from_seed(seed)
        };

        self.ledger.credit(&keypair.address(), NEW_KEY_GRANT);
        Ok(keypair.material())
    }

    /// Accepts 20- or 32-byte addresses as hex, with or without the `0x`
    /// prefix; returns the normalized `0x` form.
    fn parse_address(&self, address: &str) -> Result<String> {
        let trimmed = address.trim();
        let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        if stripped.len() != 40 && stripped.len() != 64 {
            return Err(AdapterError::InvalidAddress { chain: NETWORK });
        }

        let bytes =
            hex::decode(stripped).map_err(|_| AdapterError::InvalidAddress { chain: NETWORK })?;
        Ok(Address::from_bytes(bytes).to_hex())
    }

    fn balance(&self, address: &str) -> Result<u64> {
        let address = self.decode_address(address)?;
        Ok(self.ledger.get_balance(&address))
    }

    fn build_tx(&self, from: &str, to: &str, amount: u64, fee_hint: FeeHint) -> Result<Tx> {
        let from = self.decode_address(from)?;
        let to = self.decode_address(to)?;

        let fee = if fee_hint.max_fee_per_gas == 0 {
            1
        } else {
            fee_hint.max_fee_per_gas
        };

        Ok(Tx {
            nonce: self.ledger.current_nonce(&from),
            from,
            to,
            amount,
            fee,
            data: Vec::new(),
        })
    }

    fn sign_tx(&self, _private_key: &str, tx: &Tx) -> Result<SignedTx> {
        let raw = serde_json::to_vec(tx)
            .map_err(|e| AdapterError::MalformedPayload(e.to_string()))?;

        Ok(SignedTx {
            tx_id: hash(&raw).to_hex(),
            raw_hex: hex::encode(raw),
        })
    }

    fn broadcast(&self, signed: &SignedTx) -> Result<String> {
        let raw = signed.raw_hex.strip_prefix("0x").unwrap_or(&signed.raw_hex);
        let bytes =
            hex::decode(raw).map_err(|e| AdapterError::MalformedPayload(e.to_string()))?;
        let tx: Tx = serde_json::from_slice(&bytes)
            .map_err(|e| AdapterError::MalformedPayload(e.to_string()))?;

        let recorded = self.ledger.submit_tx(&tx)?;
        Ok(recorded.hash.to_hex())
    }

    fn tx_status(&self, id: &str) -> Result<TxStatus> {
        let hash = ferrochain_core::Hash::from_hex(id)
            .map_err(|_| AdapterError::TxNotFound(id.to_string()))?;

        self.ledger
            .find_transaction(&hash)
            .map(|tx| tx.status)
            .ok_or_else(|| AdapterError::TxNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrochain_consensus::Engine;
    use ferrochain_ledger::LedgerError;

    fn adapter() -> SimulatedAdapter {
        SimulatedAdapter::new(Arc::new(Ledger::new(Engine::proof_of_work(4))))
    }

    #[test]
    fn test_new_key_grants_demo_funds() {
        let adapter = adapter();
        let material = adapter.new_key(b"deterministic seed").unwrap();
        assert_eq!(adapter.balance(&material.address).unwrap(), 100);
    }

    #[test]
    fn test_new_key_deterministic_for_seed() {
        let adapter = adapter();
        let a = adapter.new_key(b"same seed").unwrap();
        let b = adapter.new_key(b"same seed").unwrap();
        assert_eq!(a.address, b.address);
        assert_eq!(a.private_key, b.private_key);
    }

    #[test]
    fn test_new_key_empty_seed_is_random() {
        let adapter = adapter();
        let a = adapter.new_key(&[]).unwrap();
        let b = adapter.new_key(&[]).unwrap();
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn test_parse_address() {
        let adapter = adapter();

        let twenty = hex::encode([0xAB; 20]);
        let parsed = adapter.parse_address(&twenty).unwrap();
        assert_eq!(parsed, format!("0x{twenty}"));

        let thirty_two = format!("0x{}", hex::encode([0xCD; 32]));
        assert_eq!(adapter.parse_address(&thirty_two).unwrap(), thirty_two);

        assert!(matches!(
            adapter.parse_address("abc"),
            Err(AdapterError::InvalidAddress { .. })
        ));
        assert!(matches!(
            adapter.parse_address(&"zz".repeat(20)),
            Err(AdapterError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_build_tx_fills_nonce_and_default_fee() {
        let adapter = adapter();
        let from = adapter.new_key(b"sender").unwrap();
        let to = adapter.new_key(b"recipient").unwrap();

        let tx = adapter
            .build_tx(&from.address, &to.address, 30, FeeHint::default())
            .unwrap();
        assert_eq!(tx.fee, 1);
        assert_eq!(tx.nonce, 0);
        assert_eq!(tx.amount, 30);

        let hinted = adapter
            .build_tx(
                &from.address,
                &to.address,
                30,
                FeeHint {
                    max_fee_per_gas: 5,
                    max_priority_fee: 0,
                },
            )
            .unwrap();
        assert_eq!(hinted.fee, 5);
    }

    #[test]
    fn test_build_sign_broadcast_lifecycle() {
        let adapter = adapter();
        let from = adapter.new_key(b"sender").unwrap();
        let to = adapter.new_key(b"recipient").unwrap();

        let tx = adapter
            .build_tx(&from.address, &to.address, 30, FeeHint::default())
            .unwrap();
        let signed = adapter.sign_tx(&from.private_key, &tx).unwrap();
        assert!(signed.tx_id.starts_with("0x"));
        assert!(!signed.raw_hex.is_empty());

        let id = adapter.broadcast(&signed).unwrap();
        assert_eq!(adapter.balance(&from.address).unwrap(), 69);
        assert_eq!(adapter.balance(&to.address).unwrap(), 130);
        assert_eq!(adapter.tx_status(&id).unwrap(), TxStatus::Mined);
    }

    #[test]
    fn test_rebroadcast_rejected_with_stale_nonce() {
        let adapter = adapter();
        let from = adapter.new_key(b"sender").unwrap();
        let to = adapter.new_key(b"recipient").unwrap();

        let tx = adapter
            .build_tx(&from.address, &to.address, 30, FeeHint::default())
            .unwrap();
        let signed = adapter.sign_tx(&from.private_key, &tx).unwrap();

        adapter.broadcast(&signed).unwrap();
        let err = adapter.broadcast(&signed).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::Ledger(LedgerError::InvalidNonce)
        ));
        assert_eq!(adapter.balance(&from.address).unwrap(), 69);
    }

    #[test]
    fn test_broadcast_malformed_payload() {
        let adapter = adapter();
        let from = adapter.new_key(b"sender").unwrap();

        let garbage = SignedTx {
            raw_hex: "not hex".into(),
            tx_id: "0x00".into(),
        };
        assert!(matches!(
            adapter.broadcast(&garbage),
            Err(AdapterError::MalformedPayload(_))
        ));

        let not_a_tx = SignedTx {
            raw_hex: hex::encode(b"{\"oops\": true}"),
            tx_id: "0x00".into(),
        };
        assert!(matches!(
            adapter.broadcast(&not_a_tx),
            Err(AdapterError::MalformedPayload(_))
        ));

        // no state change from either failure
        assert_eq!(adapter.balance(&from.address).unwrap(), 100);
        assert_eq!(adapter.ledger().height(), 0);
    }

    #[test]
    fn test_tx_status_unknown_id() {
        let adapter = adapter();
        let unknown = hash(b"never submitted").to_hex();
        assert!(matches!(
            adapter.tx_status(&unknown),
            Err(AdapterError::TxNotFound(_))
        ));
    }
}
