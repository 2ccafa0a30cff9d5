//! Protocol implementations.
//!
//! Each protocol pairs a pure processing core with an async connection
//! handler spawned by the listener:
//! - `rental`: stateful handshake/mode/BYE command session
//! - `echo`: stateless alternating-case line transform

pub mod echo;
pub mod rental;
