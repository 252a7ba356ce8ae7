//! HTTP gateway content store.
//!
//! Retrieval goes through a public gateway (pointer scheme mapped onto a
//! path); uploads go to a configured pinning endpoint that answers with
//! `{ "cid": "…" }`. Without a pin endpoint the store is read-only, which
//! is the common deployment for verifiers.

use async_trait::async_trait;
use serde::Deserialize;

use proofvault_core::metadata::MetadataRecord;
use proofvault_core::{VaultError, VaultResult};

use crate::config::EngineConfig;
use crate::store::{ContentStore, MetadataPointer};

pub struct HttpGatewayStore {
    client: reqwest::Client,
    gateway_base: String,
    pin_endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    cid: String,
}

impl HttpGatewayStore {
    pub fn new(config: &EngineConfig) -> VaultResult<Self> {
        crate::config::validate_config(config)?;
        Ok(HttpGatewayStore {
            client: reqwest::Client::new(),
            gateway_base: config.gateway_base.clone(),
            pin_endpoint: config.pin_endpoint.clone(),
        })
    }
}

#[async_trait]
impl ContentStore for HttpGatewayStore {
    async fn put(&self, record: &MetadataRecord) -> VaultResult<MetadataPointer> {
        let endpoint = self.pin_endpoint.as_ref().ok_or_else(|| {
            VaultError::publish_unavailable("no pin endpoint configured; store is read-only")
        })?;

        let resp = self
            .client
            .post(endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| VaultError::publish_unavailable(format!("pin request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(VaultError::publish_unavailable(format!(
                "pin endpoint returned {status}"
            )));
        }

        let pin: PinResponse = resp
            .json()
            .await
            .map_err(|e| VaultError::publish_unavailable(format!("invalid pin response: {e}")))?;

        let cid = pin.cid.trim_start_matches("ipfs://").to_string();
        Ok(MetadataPointer::new(format!("ipfs://{cid}")))
    }

    async fn get(&self, pointer: &MetadataPointer) -> VaultResult<MetadataRecord> {
        let url = pointer.gateway_url(&self.gateway_base);
        tracing::debug!(%url, "fetching metadata record");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VaultError::metadata_unavailable(format!("gateway fetch failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(VaultError::metadata_unavailable(format!(
                "gateway returned {status} for {pointer}"
            )));
        }

        resp.json::<MetadataRecord>()
            .await
            .map_err(|e| VaultError::metadata_unavailable(format!("invalid record json: {e}")))
    }
}
