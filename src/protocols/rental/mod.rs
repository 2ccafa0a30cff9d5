//! Rental protocol implementation.
//!
//! A stateful line protocol with an authentication handshake, mode
//! switching, and explicit termination:
//!
//! ```text
//! Request:  HELO <hostname>     (hostname = server's configured hostname)
//! Response: HELO <peer-ip> (TCP)
//!
//! Request:  BROWSE | RENT | MYGAMES     (authenticated only)
//! Response: 210/220/230 Switched to ... Mode
//!
//! Request:  BYE
//! Response: 200 BYE, then the connection closes
//! ```
//!
//! Everything else, including mode commands before the handshake and a
//! repeated handshake, is answered with `400 BAD REQUEST`. Input is
//! normalized (trailing whitespace/control stripped, uppercased) before
//! dispatch, so commands are case-insensitive on the wire.

pub mod handler;
pub mod parser;
pub mod session;

pub use handler::handle_connection;
