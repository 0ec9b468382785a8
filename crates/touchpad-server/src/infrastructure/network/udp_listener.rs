//! Blocking UDP receive loop for command datagrams.
//!
//! The listener runs on a dedicated thread to avoid blocking the Tokio runtime
//! with synchronous socket I/O.  Each datagram is decoded as (lossy) UTF-8 and
//! sent to the application as a [`ReceivedDatagram`].
//!
//! # Read timeout
//!
//! The socket is configured with a 500 ms read timeout.  `recv_from` therefore
//! blocks for at most 500 ms before returning a timeout error; on each timeout
//! the `running` flag is checked so shutdown is observed promptly.
//!
//! # Back-pressure
//!
//! The channel is bounded.  If the dispatcher falls behind, the receive thread
//! blocks on `blocking_send` and the OS socket buffer absorbs the burst; past
//! that the kernel drops datagrams, which is acceptable for a best-effort
//! touchpad stream.

use std::net::{SocketAddr, UdpSocket};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// UDP port the phone app sends to by default.
pub const DEFAULT_PORT: u16 = 42069;

/// Receive buffer size; longer datagrams are truncated by the OS.
pub const DEFAULT_MAX_DATAGRAM_SIZE: usize = 1024;

const READ_TIMEOUT: Duration = Duration::from_millis(500);
const CHANNEL_CAPACITY: usize = 64;

/// Error type for the command transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The UDP socket could not be bound.
    #[error("failed to bind command socket on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// Socket options could not be applied.
    #[error("failed to configure command socket: {0}")]
    Configure(#[source] std::io::Error),
    /// The receive thread could not be started.
    #[error("failed to spawn receive thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// One received command datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedDatagram {
    /// The payload decoded as UTF-8; invalid sequences become U+FFFD.
    pub text: String,
    /// The address the datagram came from.
    pub source: SocketAddr,
}

/// Binds the command socket on `addr` and applies the read timeout.
///
/// # Errors
///
/// Returns [`TransportError::BindFailed`] if the address is in use or not
/// available, and [`TransportError::Configure`] if the timeout cannot be set.
pub fn bind_command_socket(addr: SocketAddr) -> Result<UdpSocket, TransportError> {
    let socket =
        UdpSocket::bind(addr).map_err(|source| TransportError::BindFailed { addr, source })?;
    socket
        .set_read_timeout(Some(READ_TIMEOUT))
        .map_err(TransportError::Configure)?;
    Ok(socket)
}

/// Spawns the receive thread for an already-bound `socket`.
///
/// Returns a receiver from which the application reads datagrams.  The thread
/// exits, closing the channel, when `running` is cleared or the receiver is
/// dropped.
///
/// # Errors
///
/// Returns [`TransportError::Spawn`] if the OS refuses to create the thread.
pub fn start_command_listener(
    socket: UdpSocket,
    max_datagram_size: usize,
    running: Arc<AtomicBool>,
) -> Result<mpsc::Receiver<ReceivedDatagram>, TransportError> {
    let local_addr = socket.local_addr().map_err(TransportError::Configure)?;
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    std::thread::Builder::new()
        .name("touchpad-udp".to_string())
        .spawn(move || receive_loop(socket, max_datagram_size.max(1), tx, running))
        .map_err(TransportError::Spawn)?;

    info!("listening for commands on UDP {local_addr}");
    Ok(rx)
}

/// The main receive loop executed on the listener thread.
fn receive_loop(
    socket: UdpSocket,
    max_datagram_size: usize,
    tx: mpsc::Sender<ReceivedDatagram>,
    running: Arc<AtomicBool>,
) {
    let mut buf = vec![0u8; max_datagram_size];

    while running.load(Ordering::Relaxed) {
        let (len, source) = match socket.recv_from(&mut buf) {
            Ok(pair) => pair,
            Err(e) if is_timeout_error(&e) => continue,
            Err(e) => {
                error!("command socket recv error: {e}");
                continue;
            }
        };

        let text = String::from_utf8_lossy(&buf[..len]).into_owned();
        debug!("{len} byte datagram from {source}");

        if tx.blocking_send(ReceivedDatagram { text, source }).is_err() {
            // Receiver dropped – application is shutting down.
            break;
        }
    }

    info!("command listener stopped");
}

/// Returns `true` for OS timeout / would-block errors that should be retried.
fn is_timeout_error(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const RECV_DEADLINE: Duration = Duration::from_secs(3);

    fn loopback_any_port() -> SocketAddr {
        "127.0.0.1:0".parse().unwrap()
    }

    #[test]
    fn test_is_timeout_error_recognises_timed_out() {
        let e = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        assert!(is_timeout_error(&e));
    }

    #[test]
    fn test_is_timeout_error_recognises_would_block() {
        let e = std::io::Error::new(std::io::ErrorKind::WouldBlock, "would block");
        assert!(is_timeout_error(&e));
    }

    #[test]
    fn test_is_timeout_error_returns_false_for_other_errors() {
        let e = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(!is_timeout_error(&e));
    }

    #[test]
    fn test_bind_command_socket_fails_when_address_in_use() {
        // Arrange
        let first = bind_command_socket(loopback_any_port()).expect("first bind");
        let taken = first.local_addr().unwrap();

        // Act
        let result = bind_command_socket(taken);

        // Assert
        match result {
            Err(TransportError::BindFailed { addr, .. }) => assert_eq!(addr, taken),
            other => panic!("expected BindFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_listener_forwards_datagram_text_and_source() {
        // Arrange
        let socket = bind_command_socket(loopback_any_port()).expect("bind");
        let server_addr = socket.local_addr().unwrap();
        let running = Arc::new(AtomicBool::new(true));
        let mut rx = start_command_listener(socket, DEFAULT_MAX_DATAGRAM_SIZE, Arc::clone(&running))
            .expect("start");
        let phone = UdpSocket::bind(loopback_any_port()).expect("phone bind");

        // Act
        phone.send_to(b"drag 4,-2", server_addr).expect("send");
        let received = tokio::time::timeout(RECV_DEADLINE, rx.recv())
            .await
            .expect("datagram within deadline")
            .expect("channel open");

        // Assert
        assert_eq!(received.text, "drag 4,-2");
        assert_eq!(received.source, phone.local_addr().unwrap());

        running.store(false, Ordering::Relaxed);
    }

    #[tokio::test]
    async fn test_listener_preserves_arrival_order() {
        // Arrange
        let socket = bind_command_socket(loopback_any_port()).expect("bind");
        let server_addr = socket.local_addr().unwrap();
        let running = Arc::new(AtomicBool::new(true));
        let mut rx = start_command_listener(socket, DEFAULT_MAX_DATAGRAM_SIZE, Arc::clone(&running))
            .expect("start");
        let phone = UdpSocket::bind(loopback_any_port()).expect("phone bind");

        // Act
        for line in ["mouse_down", "drag 1,0", "mouse_up"] {
            phone.send_to(line.as_bytes(), server_addr).expect("send");
        }
        let mut texts = Vec::new();
        for _ in 0..3 {
            let d = tokio::time::timeout(RECV_DEADLINE, rx.recv())
                .await
                .expect("datagram within deadline")
                .expect("channel open");
            texts.push(d.text);
        }

        // Assert
        assert_eq!(texts, vec!["mouse_down", "drag 1,0", "mouse_up"]);

        running.store(false, Ordering::Relaxed);
    }

    #[tokio::test]
    async fn test_listener_decodes_invalid_utf8_lossily() {
        // Arrange
        let socket = bind_command_socket(loopback_any_port()).expect("bind");
        let server_addr = socket.local_addr().unwrap();
        let running = Arc::new(AtomicBool::new(true));
        let mut rx = start_command_listener(socket, DEFAULT_MAX_DATAGRAM_SIZE, Arc::clone(&running))
            .expect("start");
        let phone = UdpSocket::bind(loopback_any_port()).expect("phone bind");

        // Act
        phone.send_to(b"left_click\xFF", server_addr).expect("send");
        let received = tokio::time::timeout(RECV_DEADLINE, rx.recv())
            .await
            .expect("datagram within deadline")
            .expect("channel open");

        // Assert
        assert_eq!(received.text, "left_click\u{FFFD}");

        running.store(false, Ordering::Relaxed);
    }

    #[tokio::test]
    async fn test_clearing_running_flag_closes_channel() {
        // Arrange
        let socket = bind_command_socket(loopback_any_port()).expect("bind");
        let running = Arc::new(AtomicBool::new(true));
        let mut rx = start_command_listener(socket, DEFAULT_MAX_DATAGRAM_SIZE, Arc::clone(&running))
            .expect("start");

        // Act
        running.store(false, Ordering::Relaxed);
        let next = tokio::time::timeout(RECV_DEADLINE, rx.recv())
            .await
            .expect("thread must exit within one read timeout");

        // Assert
        assert!(next.is_none());
    }
}
