//! Text command protocol.
//!
//! Each UDP datagram carries one UTF-8 line such as `drag 12,-4` or
//! `ctrl_tab`.  [`verb`] holds the fixed verb table and [`command`] turns a
//! line into a typed [`Command`](command::Command).

pub mod command;
pub mod verb;
