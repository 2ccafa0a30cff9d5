//! Rental session state machine.
//!
//! Pure transition logic: one input line plus the current state produce a
//! reply and the next state. No I/O happens here; the handler owns the
//! socket and this module owns the rules.

use crate::protocols::rental::parser::{normalize, response, Command};

/// Coarse authentication state of a session. Starts `Unauthenticated`,
/// advances only via a successful handshake, never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unauthenticated,
    Authenticated,
}

/// Active command sub-context once authenticated. Exactly one mode is
/// active at a time; mode commands overwrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    None,
    Browse,
    Rent,
    MyGames,
}

/// Per-connection session state, owned exclusively by the session's
/// handler task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub mode: Mode,
}

/// What the handler should do after sending the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Close,
}

/// One step of the state machine: the reply to send and the follow-up
/// action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub reply: String,
    pub action: Action,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Unauthenticated,
            mode: Mode::None,
        }
    }

    /// Process one raw input line.
    ///
    /// `hostname` is the server's own configured hostname: the handshake
    /// argument is compared against it (not against anything about the
    /// client), while the success reply echoes the peer's address. The
    /// asymmetry is the protocol's.
    pub fn step(&mut self, line: &str, hostname: &str, peer: &str) -> Step {
        let command = Command::parse(&normalize(line));

        // BYE is terminal from any phase and any mode.
        if command == Command::Bye {
            return Step {
                reply: response::bye().to_string(),
                action: Action::Close,
            };
        }

        let reply = match (self.phase, command) {
            (Phase::Unauthenticated, Command::Helo(arg)) if arg == hostname => {
                self.phase = Phase::Authenticated;
                self.mode = Mode::None;
                response::helo(peer)
            }
            (Phase::Authenticated, Command::Browse) => {
                self.mode = Mode::Browse;
                response::browse().to_string()
            }
            (Phase::Authenticated, Command::Rent) => {
                self.mode = Mode::Rent;
                response::rent().to_string()
            }
            (Phase::Authenticated, Command::MyGames) => {
                self.mode = Mode::MyGames;
                response::mygames().to_string()
            }
            // Everything else: unknown commands, mode commands before the
            // handshake, a repeated or wrong-argument HELO. State unchanged.
            _ => response::bad_request().to_string(),
        };

        Step {
            reply,
            action: Action::Continue,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
