//! Network infrastructure for the server.
//!
//! The phone sends one UTF-8 command per UDP datagram and expects no reply.
//! [`udp_listener`] binds the socket, receives datagrams on a dedicated
//! thread, and forwards their text to the async runtime over an `mpsc`
//! channel so that commands are processed strictly in arrival order.

pub mod udp_listener;

pub use udp_listener::{
    bind_command_socket, start_command_listener, ReceivedDatagram, TransportError,
    DEFAULT_MAX_DATAGRAM_SIZE, DEFAULT_PORT,
};
