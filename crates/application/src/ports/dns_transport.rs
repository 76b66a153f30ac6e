use nsquery_domain::{RawReply, ResolverConfig, TransportError, TransportProtocol};
use std::net::SocketAddr;
use std::time::Duration;

/// Deadlines for one attempt.
///
/// `io` bounds every blocking send/receive. `connect` bounds stream connection
/// setup and is ignored by datagram transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportTimeouts {
    pub io: Duration,
    pub connect: Duration,
}

impl TransportTimeouts {
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            io: timeout,
            connect: timeout,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            io: config.timeout(),
            connect: config.connect_timeout(),
        }
    }
}

/// Delivers one serialized query to one nameserver and returns the raw reply.
///
/// Implementations open a socket per call and must close it before returning,
/// whatever the outcome.
pub trait DnsTransport: Send + Sync {
    fn send(
        &self,
        message_bytes: &[u8],
        destination: SocketAddr,
        timeouts: TransportTimeouts,
    ) -> Result<RawReply, TransportError>;

    fn protocol(&self) -> TransportProtocol;
}
