//! Echo protocol implementation.
//!
//! A stateless line transform: each input line comes back in alternating
//! case, letters upper/lower in turn and everything else copied through.
//!
//! ```text
//! Request:  hello world
//! Response: HeLlO wOrLd
//! ```
//!
//! Lines are processed independently of history; there is no handshake and
//! no termination command. The session ends when the peer closes.

pub mod handler;
pub mod transform;

pub use handler::handle_connection;
