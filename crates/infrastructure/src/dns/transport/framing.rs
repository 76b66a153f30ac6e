//! DNS over TCP framing (RFC 1035 §4.2.2)
//!
//! Every message on the stream is preceded by a 2-byte big-endian length.
//! Reads accumulate partial deliveries until exactly that many bytes arrived.

use super::is_timeout;
use nsquery_domain::TransportError;
use std::io::{self, Read, Write};
use std::net::SocketAddr;
use thiserror::Error;

const LENGTH_PREFIX_SIZE: usize = 2;

#[derive(Debug, Error)]
pub enum FramingError {
    #[error("message of {0} bytes does not fit a 16-bit length prefix")]
    TooLarge(usize),

    #[error("wrote {sent} of {expected} bytes")]
    ShortWrite { sent: usize, expected: usize },

    #[error("timed out after {received} of {expected} bytes")]
    Timeout { received: usize, expected: usize },

    #[error("peer closed the stream after {received} of {expected} bytes")]
    Closed { received: usize, expected: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FramingError {
    pub fn into_transport_error(self, server: SocketAddr) -> TransportError {
        match self {
            FramingError::ShortWrite { sent, expected } => TransportError::ShortWrite {
                server,
                sent,
                expected,
            },
            FramingError::Timeout { .. } => TransportError::Timeout { server },
            other => TransportError::IoError {
                server,
                reason: other.to_string(),
            },
        }
    }
}

/// Prepends the length prefix to a message.
pub fn frame_message(message: &[u8]) -> Result<Vec<u8>, FramingError> {
    let length =
        u16::try_from(message.len()).map_err(|_| FramingError::TooLarge(message.len()))?;

    let mut framed = Vec::with_capacity(LENGTH_PREFIX_SIZE + message.len());
    framed.extend_from_slice(&length.to_be_bytes());
    framed.extend_from_slice(message);
    Ok(framed)
}

/// Writes prefix and message in a single write. Returns the bytes written,
/// prefix included.
pub fn write_with_length_prefix<W>(stream: &mut W, message: &[u8]) -> Result<usize, FramingError>
where
    W: Write,
{
    let framed = frame_message(message)?;

    let sent = loop {
        match stream.write(&framed) {
            Ok(sent) => break sent,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if is_timeout(&e) => {
                return Err(FramingError::Timeout {
                    received: 0,
                    expected: framed.len(),
                })
            }
            Err(e) => return Err(FramingError::Io(e)),
        }
    };

    if sent != framed.len() {
        return Err(FramingError::ShortWrite {
            sent,
            expected: framed.len(),
        });
    }

    stream.flush()?;
    Ok(sent)
}

/// Fills `buf` completely, however the peer splits the bytes.
pub fn fill_exact<R>(stream: &mut R, buf: &mut [u8]) -> Result<(), FramingError>
where
    R: Read,
{
    let expected = buf.len();
    let mut received = 0;

    while received < expected {
        match stream.read(&mut buf[received..]) {
            Ok(0) => return Err(FramingError::Closed { received, expected }),
            Ok(n) => received += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if is_timeout(&e) => return Err(FramingError::Timeout { received, expected }),
            Err(e) => return Err(FramingError::Io(e)),
        }
    }

    Ok(())
}

/// Reads exactly `len` bytes into a new buffer.
pub fn read_exact_accumulating<R>(stream: &mut R, len: usize) -> Result<Vec<u8>, FramingError>
where
    R: Read,
{
    let mut buf = vec![0u8; len];
    fill_exact(stream, &mut buf)?;
    Ok(buf)
}

/// Reads one length-prefixed message and returns its body.
pub fn read_with_length_prefix<R>(stream: &mut R) -> Result<Vec<u8>, FramingError>
where
    R: Read,
{
    let mut len_buf = [0u8; LENGTH_PREFIX_SIZE];
    fill_exact(stream, &mut len_buf)?;

    let response_len = u16::from_be_bytes(len_buf) as usize;
    read_exact_accumulating(stream, response_len)
}
