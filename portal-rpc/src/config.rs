use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Where the backend lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL; the operation name is appended as the last path segment.
    pub endpoint: String,

    /// Per-request timeout. Unset means whatever the HTTP client does by
    /// default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ClientConfig {
    pub fn new<S: Into<String>>(endpoint: S) -> ClientConfig {
        ClientConfig {
            endpoint: endpoint.into(),
            timeout_ms: None,
        }
    }

    pub fn with_timeout_ms(mut self, ms: u64) -> ClientConfig {
        self.timeout_ms = Some(ms);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// The `portal.toml` file read by the command line tools.
///
/// ```toml
/// [rpc]
/// endpoint = "http://localhost:3000/api/rpc"
/// timeout_ms = 5000
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalToml {
    pub rpc: ClientConfig,
}

impl PortalToml {
    pub fn parse(s: &str) -> Result<PortalToml> {
        let cf: PortalToml = toml::from_str(s)?;
        if cf.rpc.endpoint.trim().is_empty() {
            return Err(Error::Config("rpc.endpoint must not be empty".to_owned()));
        }
        Ok(cf)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<PortalToml> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)?;
        log::debug!("loaded config from {}", path.display());
        PortalToml::parse(&s)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
