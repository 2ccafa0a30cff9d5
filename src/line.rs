//! Bounded line reading over an async byte stream.
//!
//! Both protocol handlers and the client read one newline-delimited line at
//! a time through [`LineReader`]. Lines are capped at [`MAX_LINE_LENGTH`]
//! bytes; an oversized line is reported (never silently truncated) and the
//! reader resynchronizes on the next line boundary.

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Maximum accepted line length in bytes, excluding the terminator.
pub const MAX_LINE_LENGTH: usize = 1024;

/// Read buffer capacity.
const BUFFER_SIZE: usize = 4096;

/// One result of [`LineReader::next_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    /// A complete line with the terminator (`\n`, optionally preceded by
    /// `\r`) removed. Decoded lossily as UTF-8; the protocols are plain
    /// ASCII, so invalid bytes fall through to the normal rejection path.
    Line(String),
    /// The line exceeded the maximum length. Input through the end of the
    /// oversized line has been discarded and the reader is resynchronized
    /// on the next line boundary.
    TooLong,
    /// The peer closed the connection.
    Eof,
}

/// Buffered line reader over any [`AsyncRead`].
pub struct LineReader<R> {
    inner: R,
    buffer: BytesMut,
    max_line: usize,
    eof: bool,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_max(inner, MAX_LINE_LENGTH)
    }

    pub fn with_max(inner: R, max_line: usize) -> Self {
        Self {
            inner,
            buffer: BytesMut::with_capacity(BUFFER_SIZE),
            max_line,
            eof: false,
        }
    }

    /// Read the next line. A non-empty unterminated tail before EOF is
    /// yielded as a final `Line`; after that, `Eof`.
    pub async fn next_line(&mut self) -> std::io::Result<ReadLine> {
        loop {
            if let Some(pos) = find_newline(&self.buffer) {
                let mut line = self.buffer.split_to(pos + 1);
                line.truncate(pos);
                if line.ends_with(b"\r") {
                    line.truncate(pos - 1);
                }
                if line.len() > self.max_line {
                    return Ok(ReadLine::TooLong);
                }
                return Ok(ReadLine::Line(decode(&line)));
            }

            if self.eof {
                if self.buffer.is_empty() {
                    return Ok(ReadLine::Eof);
                }
                let line = self.buffer.split();
                if line.len() > self.max_line {
                    return Ok(ReadLine::TooLong);
                }
                return Ok(ReadLine::Line(decode(&line)));
            }

            if self.buffer.len() > self.max_line {
                return self.discard_oversized().await;
            }

            let n = self.inner.read_buf(&mut self.buffer).await?;
            if n == 0 {
                self.eof = true;
            }
        }
    }

    /// An over-long line is still arriving: drop input until the next line
    /// boundary (or EOF), then report it.
    async fn discard_oversized(&mut self) -> std::io::Result<ReadLine> {
        loop {
            if let Some(pos) = find_newline(&self.buffer) {
                self.buffer.advance(pos + 1);
                return Ok(ReadLine::TooLong);
            }
            self.buffer.clear();

            if self.eof {
                return Ok(ReadLine::TooLong);
            }
            let n = self.inner.read_buf(&mut self.buffer).await?;
            if n == 0 {
                self.eof = true;
            }
        }
    }
}

fn find_newline(buffer: &[u8]) -> Option<usize> {
    buffer.iter().position(|&b| b == b'\n')
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
