//! Client configuration
//!
//! Holds the zone and the two timing knobs every wait is derived from. The
//! configuration is an explicit value handed to the client; there is no
//! process-wide default that can be mutated.

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Operation timeout used when none is configured
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(180);

const ENV_ZONE: &str = "NIMBUSFLOW_ZONE";
const ENV_OPERATION_TIMEOUT: &str = "NIMBUSFLOW_OPERATION_TIMEOUT_SECS";
const ENV_WAIT_INTERVAL: &str = "NIMBUSFLOW_WAIT_INTERVAL_MS";

/// Client-wide settings
///
/// Durations are kept at full precision. On the wire they are whole seconds
/// (`operation_timeout_secs`) and whole milliseconds (`wait_interval_ms`);
/// encoding rounds up so a positive duration never becomes zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Provider zone, e.g. "pek3a"
    pub zone: String,

    /// Upper bound for each individual wait stage
    #[serde(
        rename = "operation_timeout_secs",
        with = "whole_secs",
        default = "default_operation_timeout"
    )]
    operation_timeout: Duration,

    /// Spacing between two polls. No default.
    #[serde(rename = "wait_interval_ms", with = "whole_millis")]
    wait_interval: Duration,
}

fn default_operation_timeout() -> Duration {
    DEFAULT_OPERATION_TIMEOUT
}

mod whole_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        let secs = d.as_nanos().div_ceil(1_000_000_000);
        s.serialize_u64(u64::try_from(secs).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

mod whole_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        let millis = d.as_nanos().div_ceil(1_000_000);
        s.serialize_u64(u64::try_from(millis).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

impl ClientConfig {
    pub fn new(zone: impl Into<String>, wait_interval: Duration) -> Self {
        Self {
            zone: zone.into(),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            wait_interval,
        }
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    pub fn wait_interval(&self) -> Duration {
        self.wait_interval
    }

    /// Parse a JSON configuration document and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `NIMBUSFLOW_ZONE`, `NIMBUSFLOW_OPERATION_TIMEOUT_SECS` (optional)
    /// and `NIMBUSFLOW_WAIT_INTERVAL_MS`
    pub fn from_env() -> Result<Self> {
        let zone = std::env::var(ENV_ZONE)
            .map_err(|_| CloudError::InvalidConfig(format!("{ENV_ZONE} is not set")))?;

        let operation_timeout = match std::env::var(ENV_OPERATION_TIMEOUT) {
            Ok(raw) => Duration::from_secs(parse_u64(ENV_OPERATION_TIMEOUT, &raw)?),
            Err(_) => DEFAULT_OPERATION_TIMEOUT,
        };

        let wait_interval = std::env::var(ENV_WAIT_INTERVAL)
            .map_err(|_| CloudError::InvalidConfig(format!("{ENV_WAIT_INTERVAL} is not set")))
            .and_then(|raw| parse_u64(ENV_WAIT_INTERVAL, &raw))
            .map(Duration::from_millis)?;

        let config = Self {
            zone,
            operation_timeout,
            wait_interval,
        };
        config.validate()?;

        tracing::debug!(
            zone = %config.zone,
            timeout = ?config.operation_timeout,
            interval = ?config.wait_interval,
            "Loaded client config from environment"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.zone.trim().is_empty() {
            return Err(CloudError::InvalidConfig("zone must not be empty".into()));
        }
        if self.operation_timeout.is_zero() {
            return Err(CloudError::InvalidConfig(
                "operation timeout must be positive".into(),
            ));
        }
        if self.wait_interval.is_zero() {
            return Err(CloudError::InvalidConfig(
                "wait interval must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn parse_u64(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| CloudError::InvalidConfig(format!("{name} is not a number: {raw}")))
}
