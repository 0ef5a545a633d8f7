use std::time::Duration;

use crate::cipher::BLOCK_SIZE;
use crate::config::config as global_config;
use crate::error::GreeError;

const DEFAULT_HOST: &str = "255.255.255.255";
const DEFAULT_PORT: u16 = 7000;

/// Identity of one AC unit: normalized MAC, network location, per-device
/// cipher key and the receive timeout for exchanges with it.
///
/// Built once at session construction and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct DeviceIdentity {
    mac: String,
    host: String,
    port: u16,
    key: [u8; BLOCK_SIZE],
    timeout: Duration,
}

impl DeviceIdentity {
    /// Create an identity for a bound device. The MAC is normalized (`:` and
    /// `-` separators stripped, hex digits lowercased) so it can be used
    /// directly as the `tcid`/`mac` wire field.
    ///
    /// # Errors
    ///
    /// Returns `GreeError::InvalidKey` unless `key` is exactly 16 bytes.
    pub fn new(mac: &str, key: &[u8]) -> Result<Self, GreeError> {
        if key.len() != BLOCK_SIZE {
            return Err(GreeError::InvalidKey(key.len()));
        }
        let mut key_bytes = [0u8; BLOCK_SIZE];
        key_bytes.copy_from_slice(key);
        Ok(Self {
            mac: normalize_mac(mac),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            key: key_bytes,
            timeout: Duration::from_secs(global_config().gree_recv_timeout_secs),
        })
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn mac(&self) -> &str {
        &self.mac
    }

    /// UDP target as "host:port".
    #[must_use]
    pub fn addr(&self) -> String {
        format!(
            "{self_host}:{self_port}",
            self_host = self.host,
            self_port = self.port
        )
    }

    #[must_use]
    pub const fn key(&self) -> &[u8; BLOCK_SIZE] {
        &self.key
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Strip `:`/`-` separators and lowercase the hex digits.
#[must_use]
pub fn normalize_mac(mac: &str) -> String {
    mac.chars()
        .filter(|c| *c != ':' && *c != '-')
        .collect::<String>()
        .to_ascii_lowercase()
}
