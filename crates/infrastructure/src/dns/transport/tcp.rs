use super::framing::{read_with_length_prefix, write_with_length_prefix};
use super::socket;
use nsquery_application::ports::{DnsTransport, TransportTimeouts};
use nsquery_domain::{RawReply, TransportError, TransportProtocol};
use std::net::SocketAddr;
use tracing::debug;

/// DNS over TCP transport. One connection per query, closed once the reply
/// has been read.
#[derive(Default)]
pub struct TcpTransport;

impl TcpTransport {
    pub fn new() -> Self {
        Self
    }
}

impl DnsTransport for TcpTransport {
    fn send(
        &self,
        message_bytes: &[u8],
        destination: SocketAddr,
        timeouts: TransportTimeouts,
    ) -> Result<RawReply, TransportError> {
        let mut stream = socket::connect_tcp(destination, timeouts.connect, timeouts.io)?;

        let bytes_sent = write_with_length_prefix(&mut *stream, message_bytes)
            .map_err(|e| e.into_transport_error(destination))?;

        debug!(
            server = %destination,
            message_len = message_bytes.len(),
            bytes_sent,
            "TCP query sent"
        );

        let response_bytes = read_with_length_prefix(&mut *stream)
            .map_err(|e| e.into_transport_error(destination))?;

        debug!(
            server = %destination,
            response_len = response_bytes.len(),
            "TCP response received"
        );

        Ok(RawReply::from_vec(response_bytes))
    }

    fn protocol(&self) -> TransportProtocol {
        TransportProtocol::Tcp
    }
}
