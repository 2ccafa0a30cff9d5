//! rent-a-game: a small game rental service spoken over a line protocol.
//!
//! The server accepts TCP connections and serves one of two protocols:
//! - `rental`: a handshake-gated command session (HELO, BROWSE, RENT,
//!   MYGAMES, BYE)
//! - `echo`: a stateless alternating-case line transform
//!
//! Features:
//! - One detached session task per connection; the accept loop never waits
//!   on a handler
//! - Concurrent connections capped with a semaphore
//! - Bounded line reading with reject-on-overflow
//! - Configuration via `KEY=value` files and CLI arguments

pub mod config;
pub mod line;
pub mod protocols;
pub mod server;
