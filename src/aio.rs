//! Async facade over the blocking client.
//!
//! The core contract stays synchronous: each operation is one blocking
//! round trip serialized by the client's internal lock. This wrapper only
//! moves that round trip onto tokio's blocking pool so async callers do not
//! stall an executor thread.

use std::collections::HashMap;
use std::sync::Arc;

use crate::client::GreeClient;
use crate::endpoint::DeviceIdentity;
use crate::error::GreeError;
use crate::settings::CommandConfig;

#[derive(Clone)]
pub struct AsyncGreeClient {
    inner: Arc<GreeClient>,
}

impl AsyncGreeClient {
    /// # Errors
    ///
    /// Same as [`GreeClient::new`].
    pub fn new(identity: DeviceIdentity) -> Result<Self, GreeError> {
        Ok(Self {
            inner: Arc::new(GreeClient::new(identity)?),
        })
    }

    /// Wrap an already-constructed blocking client.
    #[must_use]
    pub fn from_blocking(client: GreeClient) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }

    /// See [`GreeClient::update_status`].
    pub async fn update_status(&self) -> Result<bool, GreeError> {
        let client = Arc::clone(&self.inner);
        run_blocking(move || client.update_status()).await
    }

    /// See [`GreeClient::send_command`].
    pub async fn send_command(&self, config: CommandConfig) -> Result<bool, GreeError> {
        let client = Arc::clone(&self.inner);
        run_blocking(move || client.send_command(&config)).await
    }

    /// See [`GreeClient::status`].
    pub async fn status(&self) -> Result<HashMap<String, i64>, GreeError> {
        let client = Arc::clone(&self.inner);
        run_blocking(move || client.status()).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, GreeError>
where
    F: FnOnce() -> Result<T, GreeError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| GreeError::Io(std::io::Error::other(e)))?
}
