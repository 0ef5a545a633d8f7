//! Blocking UDP send/receive for a single request/response exchange.

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};

use crate::config::config as global_config;
use crate::error::GreeError;

const RECV_BUF_SIZE: usize = 65535;

/// Bind an ephemeral IPv4 datagram socket set up for talking to AC units:
/// SO_REUSEADDR and SO_BROADCAST enabled (the default target is the
/// broadcast address), receives bounded by `timeout`.
///
/// # Errors
///
/// Returns `Err(GreeError::Io)` when socket creation, option setup, or bind
/// fails.
pub fn bind_udp(timeout: Duration) -> Result<UdpSocket, GreeError> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_broadcast(true)?;
    socket.bind(&SocketAddr::from(([0, 0, 0, 0], 0)).into())?;
    let socket: UdpSocket = socket.into();
    socket.set_read_timeout(Some(timeout))?;
    Ok(socket)
}

/// Send one packet to `addr`; returns the number of bytes handed to the
/// socket.
///
/// # Errors
///
/// Returns `Err(GreeError::Io)` when the send fails.
pub fn send_packet(socket: &UdpSocket, addr: &str, payload: &[u8]) -> Result<usize, GreeError> {
    if global_config().log_gree_payloads {
        log::debug!("[gree send] {}", String::from_utf8_lossy(payload));
    }
    match socket.send_to(payload, addr) {
        Ok(n) => Ok(n),
        Err(e) => {
            if global_config().gree_dump_on_error {
                log::error!(
                    "[gree send] failed addr={} payload={} err={}",
                    addr,
                    String::from_utf8_lossy(payload),
                    e
                );
            }
            Err(e.into())
        }
    }
}

/// Receive a single datagram.
///
/// # Errors
///
/// Returns `GreeError::Timeout` when no datagram arrives within the socket's
/// read timeout, `GreeError::Io` for other receive failures.
pub fn recv_packet(socket: &UdpSocket) -> Result<Vec<u8>, GreeError> {
    let mut buf = vec![0u8; RECV_BUF_SIZE];
    match socket.recv_from(&mut buf) {
        Ok((n, _src)) => {
            buf.truncate(n);
            if global_config().log_gree_payloads {
                log::debug!("[gree recv] {}", String::from_utf8_lossy(&buf));
            }
            Ok(buf)
        }
        Err(e)
            if matches!(
                e.kind(),
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
            ) =>
        {
            Err(GreeError::Timeout)
        }
        Err(e) => {
            if global_config().gree_dump_on_error {
                log::error!("[gree recv] error: {e}");
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_send_and_recv() {
        let peer = UdpSocket::bind("127.0.0.1:0").expect("peer bind");
        let peer_addr = peer.local_addr().expect("peer addr");

        let socket = bind_udp(Duration::from_millis(500)).expect("bind");
        let sent = send_packet(&socket, &peer_addr.to_string(), b"ping").expect("send");
        assert_eq!(sent, 4);

        let mut buf = [0u8; 16];
        let (n, src) = peer.recv_from(&mut buf).expect("peer recv");
        assert_eq!(&buf[..n], b"ping");
        peer.send_to(b"pong", src).expect("peer send");

        assert_eq!(recv_packet(&socket).expect("recv"), b"pong");
    }

    #[test]
    fn recv_times_out_without_a_response() {
        let socket = bind_udp(Duration::from_millis(100)).expect("bind");
        assert!(matches!(recv_packet(&socket), Err(GreeError::Timeout)));
    }
}
