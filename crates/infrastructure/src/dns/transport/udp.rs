//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing), one message per datagram.
//! The socket is connected to the nameserver, so datagrams from any other
//! source never reach `recv`. A reply larger than the configured limit is an
//! error, never a truncated reply.

use super::{is_timeout, socket};
use nsquery_application::ports::{DnsTransport, TransportTimeouts};
use nsquery_domain::{RawReply, TransportError, TransportProtocol, MAX_MESSAGE_SIZE};
use std::io;
use std::net::SocketAddr;
use tracing::{debug, warn};

/// DNS over UDP transport
pub struct UdpTransport {
    max_message_size: usize,
}

impl UdpTransport {
    pub fn new() -> Self {
        Self {
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }

    pub fn with_max_message_size(max_message_size: usize) -> Self {
        Self {
            max_message_size: max_message_size.clamp(1, MAX_MESSAGE_SIZE),
        }
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsTransport for UdpTransport {
    fn send(
        &self,
        message_bytes: &[u8],
        destination: SocketAddr,
        timeouts: TransportTimeouts,
    ) -> Result<RawReply, TransportError> {
        let socket = socket::open_udp(destination, timeouts.io)?;

        let bytes_sent = socket.send(message_bytes).map_err(|e| TransportError::IoError {
            server: destination,
            reason: format!("Failed to send UDP query: {}", e),
        })?;

        if bytes_sent != message_bytes.len() {
            return Err(TransportError::ShortWrite {
                server: destination,
                sent: bytes_sent,
                expected: message_bytes.len(),
            });
        }

        debug!(server = %destination, bytes_sent, "UDP query sent");

        // One spare byte tells an oversized datagram apart from one that fits exactly.
        let mut recv_buf = vec![0u8; self.max_message_size + 1];

        let bytes_received = loop {
            match socket.recv(&mut recv_buf) {
                Ok(received) => break received,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if is_timeout(&e) => {
                    debug!(server = %destination, "UDP receive timed out");
                    return Err(TransportError::Timeout {
                        server: destination,
                    });
                }
                Err(e) => {
                    return Err(TransportError::IoError {
                        server: destination,
                        reason: format!("Failed to receive UDP response: {}", e),
                    })
                }
            }
        };

        if bytes_received > self.max_message_size {
            warn!(
                server = %destination,
                limit = self.max_message_size,
                "UDP response exceeds the receive limit"
            );
            return Err(TransportError::IoError {
                server: destination,
                reason: format!("UDP response larger than {} bytes", self.max_message_size),
            });
        }

        debug!(server = %destination, bytes_received, "UDP response received");

        Ok(RawReply::from_buffer(recv_buf, bytes_received))
    }

    fn protocol(&self) -> TransportProtocol {
        TransportProtocol::Udp
    }
}
