//! Engine configuration.
//!
//! All configuration is explicit; the engine reads no environment
//! variables. Defaults match the original deployment: a public IPFS
//! gateway and no finalization deadline.

use std::time::Duration;

#[cfg(feature = "http")]
use proofvault_core::{VaultError, VaultResult};

pub const DEFAULT_GATEWAY_BASE: &str = "https://ipfs.io";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL for mapping metadata pointers onto HTTP fetches.
    pub gateway_base: String,

    /// Endpoint accepting record uploads (pinning service). `None` means
    /// the HTTP store is read-only.
    pub pin_endpoint: Option<String>,

    /// Bound on ledger finalization. `None` waits indefinitely.
    pub confirmation_deadline: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            gateway_base: DEFAULT_GATEWAY_BASE.to_string(),
            pin_endpoint: None,
            confirmation_deadline: None,
        }
    }
}

#[cfg(feature = "http")]
pub fn validate_config(cfg: &EngineConfig) -> VaultResult<()> {
    url::Url::parse(&cfg.gateway_base)
        .map_err(|e| VaultError::serialization(format!("invalid gateway base: {e}")))?;
    if let Some(pin) = &cfg.pin_endpoint {
        url::Url::parse(pin)
            .map_err(|e| VaultError::serialization(format!("invalid pin endpoint: {e}")))?;
    }
    if let Some(deadline) = cfg.confirmation_deadline {
        if deadline.is_zero() {
            return Err(VaultError::serialization(
                "confirmation deadline must be non-zero when set",
            ));
        }
    }
    Ok(())
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        validate_config(&EngineConfig::default()).unwrap();
    }

    #[test]
    fn bad_gateway_detected() {
        let cfg = EngineConfig {
            gateway_base: "not a url".into(),
            ..Default::default()
        };
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn zero_deadline_detected() {
        let cfg = EngineConfig {
            confirmation_deadline: Some(Duration::ZERO),
            ..Default::default()
        };
        assert!(validate_config(&cfg).is_err());
    }
}
