//! Envelope construction and parsing.
//!
//! Every packet exchanged with a device is an outer JSON envelope whose
//! `pack` field carries base64(AES-ECB(JSON inner payload)). This module
//! builds the two outbound shapes (status query and command) and peels
//! responses back down to the inner payload; interpreting that payload
//! (status columns vs. result code) is done by the helpers at the bottom.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::cipher::AesCipher;
use crate::endpoint::DeviceIdentity;
use crate::error::GreeError;
use crate::settings::CommandConfig;

/// Fixed, ordered column list sent with every status query.
pub const STATUS_COLUMNS: [&str; 18] = [
    "Pow",
    "Mod",
    "SetTem",
    "WdSpd",
    "Air",
    "Blo",
    "Health",
    "SwhSlp",
    "Lig",
    "SwingLfRig",
    "SwUpDn",
    "Quiet",
    "Tur",
    "StHt",
    "TemUn",
    "HeatCoolType",
    "TemRec",
    "SvSt",
];

/// Unencrypted discovery broadcast body. The scan/bind handshake that yields
/// a per-device key is outside this crate; the constant lives here because
/// it is part of the wire protocol.
pub const SCAN_PACKET: &[u8] = br#"{"t": "scan"}"#;

/// Result code a device reports for an accepted command.
pub const RESULT_OK: i64 = 200;

const CID_APP: &str = "app";
const ENVELOPE_TYPE: &str = "pack";

/// Outer wire packet: everything the device reads before touching the cipher.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub cid: String,
    pub i: i64,
    pub pack: String,
    pub t: String,
    pub tcid: String,
    pub uid: i64,
}

#[derive(Serialize)]
struct StatusRequest<'a> {
    cols: &'a [&'a str],
    mac: &'a str,
    t: &'static str,
}

#[derive(Serialize)]
struct CommandRequest {
    opt: Vec<&'static str>,
    p: Vec<i64>,
    t: &'static str,
}

/// Build the status-query envelope for `identity`, serialized to bytes.
///
/// # Errors
///
/// Only JSON serialization failures, surfaced as `GreeError::Io`.
pub fn build_status_query(
    identity: &DeviceIdentity,
    cipher: &AesCipher,
) -> Result<Vec<u8>, GreeError> {
    let inner = StatusRequest {
        cols: &STATUS_COLUMNS,
        mac: identity.mac(),
        t: "status",
    };
    seal(identity, cipher, &inner)
}

/// Build a command envelope carrying `config`'s fields as parallel `opt`/`p`
/// arrays, in the config's insertion order.
///
/// # Errors
///
/// Only JSON serialization failures, surfaced as `GreeError::Io`.
pub fn build_command(
    identity: &DeviceIdentity,
    cipher: &AesCipher,
    config: &CommandConfig,
) -> Result<Vec<u8>, GreeError> {
    let inner = CommandRequest {
        opt: config.field_names(),
        p: config.field_values(),
        t: "cmd",
    };
    seal(identity, cipher, &inner)
}

// Encrypt + base64 the inner payload and wrap it in the outer envelope.
fn seal<T: Serialize>(
    identity: &DeviceIdentity,
    cipher: &AesCipher,
    inner: &T,
) -> Result<Vec<u8>, GreeError> {
    let plain = serde_json::to_vec(inner).map_err(std::io::Error::from)?;
    let envelope = Envelope {
        cid: CID_APP.to_string(),
        i: 0,
        pack: BASE64.encode(cipher.encrypt(&plain)),
        t: ENVELOPE_TYPE.to_string(),
        tcid: identity.mac().to_string(),
        uid: 0,
    };
    Ok(serde_json::to_vec(&envelope).map_err(std::io::Error::from)?)
}

/// Parse an incoming envelope and return the decrypted inner payload.
///
/// # Errors
///
/// Returns `GreeError::InvalidResponse` when the outer bytes are not JSON,
/// the `pack` field is missing or not base64, the pack does not decrypt
/// under `cipher`, or the decrypted bytes are not JSON.
pub fn parse_envelope(raw: &[u8], cipher: &AesCipher) -> Result<JsonValue, GreeError> {
    let outer: JsonValue = serde_json::from_slice(raw)
        .map_err(|e| GreeError::InvalidResponse(format!("envelope is not valid JSON: {e}")))?;
    let pack = outer
        .get("pack")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| GreeError::InvalidResponse("envelope has no 'pack' field".to_string()))?;
    let sealed = BASE64
        .decode(pack)
        .map_err(|e| GreeError::InvalidResponse(format!("'pack' is not valid base64: {e}")))?;
    let plain = cipher
        .decrypt(&sealed)
        .map_err(|e| GreeError::InvalidResponse(format!("'pack' did not decrypt cleanly: {e}")))?;
    serde_json::from_slice(&plain)
        .map_err(|e| GreeError::InvalidResponse(format!("decrypted pack is not valid JSON: {e}")))
}

/// Zip the `cols`/`dat` parallel arrays of a status response into a map.
///
/// # Errors
///
/// Returns `GreeError::InvalidResponse` when either array is missing, their
/// lengths differ, a column name is not a string, or a value is not an
/// integer.
pub fn status_map(inner: &JsonValue) -> Result<HashMap<String, i64>, GreeError> {
    let cols = inner
        .get("cols")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| GreeError::InvalidResponse("status pack has no 'cols' array".to_string()))?;
    let dat = inner
        .get("dat")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| GreeError::InvalidResponse("status pack has no 'dat' array".to_string()))?;
    if cols.len() != dat.len() {
        return Err(GreeError::InvalidResponse(format!(
            "cols/dat length mismatch: {} vs {}",
            cols.len(),
            dat.len()
        )));
    }
    let mut map = HashMap::with_capacity(cols.len());
    for (col, value) in cols.iter().zip(dat) {
        let name = col.as_str().ok_or_else(|| {
            GreeError::InvalidResponse(format!("non-string column name: {col}"))
        })?;
        let value = value.as_i64().ok_or_else(|| {
            GreeError::InvalidResponse(format!("non-integer value for {name}: {value}"))
        })?;
        map.insert(name.to_string(), value);
    }
    Ok(map)
}

/// Result code (`r`) of a command response.
///
/// # Errors
///
/// Returns `GreeError::InvalidResponse` when `r` is absent or not an integer.
pub fn result_code(inner: &JsonValue) -> Result<i64, GreeError> {
    inner
        .get("r")
        .and_then(JsonValue::as_i64)
        .ok_or_else(|| GreeError::InvalidResponse("command pack has no integer 'r' field".to_string()))
}
