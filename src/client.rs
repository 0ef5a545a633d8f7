use std::collections::HashMap;
use std::net::UdpSocket;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::cipher::AesCipher;
use crate::endpoint::DeviceIdentity;
use crate::error::GreeError;
use crate::packet::{self, RESULT_OK};
use crate::settings::CommandConfig;
use crate::transport;

type StatusMap = HashMap<String, i64>;

/// Blocking session with one AC unit.
///
/// `GreeClient` owns the UDP socket and the last status snapshot received
/// from the device. Exactly one request/response exchange is in flight at a
/// time: an internal lock is held across the send+receive pair, so
/// concurrent callers queue and run serially. There is no retrying and no
/// pipelining; each call blocks for the full round trip, bounded by the
/// identity's receive timeout.
pub struct GreeClient {
    identity: DeviceIdentity,
    cipher: AesCipher,
    socket: UdpSocket,
    io_lock: Mutex<()>,
    status: Mutex<Option<StatusMap>>,
}

impl GreeClient {
    /// Build the per-device cipher and bind the socket.
    ///
    /// # Errors
    ///
    /// Returns `Err(GreeError::Io)` when socket setup fails. The key length
    /// was already validated by `DeviceIdentity`.
    pub fn new(identity: DeviceIdentity) -> Result<Self, GreeError> {
        let cipher = AesCipher::new(identity.key())?;
        let socket = transport::bind_udp(identity.timeout())?;
        Ok(Self {
            identity,
            cipher,
            socket,
            io_lock: Mutex::new(()),
            status: Mutex::new(None),
        })
    }

    #[must_use]
    pub const fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Query the device and replace the cached status snapshot.
    ///
    /// Returns `Ok(false)` when the socket reported zero bytes sent; no
    /// response is awaited in that case and the cache is left as-is.
    ///
    /// # Errors
    ///
    /// `GreeError::Timeout` when no response arrives in time,
    /// `GreeError::InvalidResponse` when the response cannot be peeled down
    /// to a cols/dat status payload.
    pub fn update_status(&self) -> Result<bool, GreeError> {
        let query = packet::build_status_query(&self.identity, &self.cipher)?;
        let Some(raw) = self.exchange(&query)? else {
            return Ok(false);
        };
        let inner = packet::parse_envelope(&raw, &self.cipher)?;
        let status = packet::status_map(&inner)?;
        *self.lock_status() = Some(status);
        Ok(true)
    }

    /// Send the command built from `config` and check the device's answer.
    ///
    /// `Ok(true)` means the device acknowledged with result code 200. The
    /// cached status is NOT refreshed on success; call [`Self::update_status`]
    /// to observe the effect. Returns `Ok(false)` when the socket reported
    /// zero bytes sent.
    ///
    /// # Errors
    ///
    /// `GreeError::UnexpectedResponse` when the device answers with a result
    /// code other than 200; `Timeout`/`InvalidResponse` as for
    /// [`Self::update_status`].
    pub fn send_command(&self, config: &CommandConfig) -> Result<bool, GreeError> {
        let command = packet::build_command(&self.identity, &self.cipher, config)?;
        let Some(raw) = self.exchange(&command)? else {
            return Ok(false);
        };
        let inner = packet::parse_envelope(&raw, &self.cipher)?;
        let code = packet::result_code(&inner)?;
        if code != RESULT_OK {
            return Err(GreeError::UnexpectedResponse {
                received: code,
                expected: RESULT_OK,
            });
        }
        Ok(true)
    }

    /// Last known status snapshot, lazily populated: the first access (or
    /// any access after the cache was never filled) performs a synchronous
    /// [`Self::update_status`]. Later accesses return the cached copy without
    /// touching the network.
    ///
    /// # Errors
    ///
    /// Propagates any [`Self::update_status`] error; also fails with
    /// `InvalidResponse` when the refresh reported a send failure and thus
    /// produced no data.
    pub fn status(&self) -> Result<StatusMap, GreeError> {
        let cached = self.lock_status().clone();
        if let Some(status) = cached {
            return Ok(status);
        }
        self.update_status()?;
        self.lock_status().clone().ok_or_else(|| {
            GreeError::InvalidResponse("status refresh produced no data".to_string())
        })
    }

    // Send + receive under one lock so a second caller's send cannot
    // interleave with a pending receive on the shared socket. Returns None
    // when zero bytes were sent.
    fn exchange(&self, payload: &[u8]) -> Result<Option<Vec<u8>>, GreeError> {
        let _guard = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let sent = transport::send_packet(&self.socket, &self.identity.addr(), payload)?;
        if sent == 0 {
            return Ok(None);
        }
        Ok(Some(transport::recv_packet(&self.socket)?))
    }

    fn lock_status(&self) -> MutexGuard<'_, Option<StatusMap>> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
