//! Echo protocol handler.

use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::line::{LineReader, ReadLine};
use crate::protocols::echo::transform::transform;
use crate::server::peer_ip;

/// Handle one echo session: transform each line and send it back. There is
/// no termination command; the session ends when the peer closes.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let peer = peer_ip(&addr);
    let (reader, mut writer) = stream.into_split();
    let mut lines = LineReader::new(reader);

    loop {
        match lines.next_line().await? {
            ReadLine::Eof => {
                debug!(peer = %peer, "Client disconnected");
                break;
            }
            ReadLine::TooLong => {
                warn!(peer = %peer, "Rejected oversized line");
                writer.write_all(b"ERROR line too long\r\n").await?;
            }
            ReadLine::Line(line) => {
                let mut reply = transform(&line);
                reply.push_str("\r\n");
                writer.write_all(reply.as_bytes()).await?;
            }
        }
    }

    Ok(())
}
