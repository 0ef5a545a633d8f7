//! In-process UDP mock device used by the integration tests.

#![allow(dead_code)]

use std::net::{SocketAddr, UdpSocket};
use std::thread;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use gree_ac::cipher::AesCipher;
use gree_ac::{DeviceIdentity, GreeClient};
use serde_json::{json, Value};

pub const TEST_KEY: &[u8; 16] = b"0123456789abcdef";
pub const TEST_MAC: &str = "50:2c:c6:aa:bb:cc";

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrap `inner` the way a real device does: encrypt under `TEST_KEY`,
/// base64, embed in an outer envelope.
pub fn envelope_with(inner: &Value) -> Vec<u8> {
    let cipher = AesCipher::new(TEST_KEY).expect("test key");
    let plain = serde_json::to_vec(inner).expect("inner JSON");
    let pack = BASE64.encode(cipher.encrypt(&plain));
    serde_json::to_vec(&json!({
        "t": "pack",
        "i": 0,
        "uid": 0,
        "cid": "502cc6aabbcc",
        "tcid": "app",
        "pack": pack,
    }))
    .expect("envelope JSON")
}

/// Spawn a mock device that answers successive datagrams with the given raw
/// responses, then exits.
pub fn spawn_raw_device(responses: Vec<Vec<u8>>) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("bind mock device");
    let addr = socket.local_addr().expect("mock device addr");
    thread::spawn(move || {
        let mut buf = [0u8; 65535];
        for response in responses {
            let Ok((_, src)) = socket.recv_from(&mut buf) else {
                return;
            };
            let _ = socket.send_to(&response, src);
        }
    });
    addr
}

/// One-shot device answering with a sealed `inner` payload.
pub fn spawn_device(inner: &Value) -> SocketAddr {
    spawn_raw_device(vec![envelope_with(inner)])
}

/// Client pointed at the mock device with a short receive timeout.
pub fn client_for(addr: SocketAddr) -> GreeClient {
    let identity = DeviceIdentity::new(TEST_MAC, TEST_KEY)
        .expect("identity")
        .with_host("127.0.0.1")
        .with_port(addr.port())
        .with_timeout(Duration::from_secs(2));
    GreeClient::new(identity).expect("client")
}
