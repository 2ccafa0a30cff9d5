//! Rental protocol handler: the per-connection session engine.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::line::{LineReader, ReadLine};
use crate::protocols::rental::parser::response;
use crate::protocols::rental::session::{Action, SessionState};
use crate::server::peer_ip;

/// Handle one rental session: read lines, feed them through the state
/// machine, write replies, close on `BYE` or peer close.
///
/// Errors returned here end only this session; the caller logs them and
/// the listener keeps running.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    hostname: Arc<str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let peer = peer_ip(&addr);
    let (reader, mut writer) = stream.into_split();
    let mut lines = LineReader::new(reader);
    let mut state = SessionState::new();

    loop {
        match lines.next_line().await? {
            ReadLine::Eof => {
                debug!(peer = %peer, "Client disconnected");
                break;
            }
            ReadLine::TooLong => {
                warn!(peer = %peer, "Rejected oversized line");
                writer.write_all(response::bad_request().as_bytes()).await?;
            }
            ReadLine::Line(line) => {
                let step = state.step(&line, &hostname, &peer);
                writer.write_all(step.reply.as_bytes()).await?;
                if step.action == Action::Close {
                    debug!(peer = %peer, "Session ended with BYE");
                    break;
                }
            }
        }
    }

    Ok(())
}
