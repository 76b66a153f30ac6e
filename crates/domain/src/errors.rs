use std::net::SocketAddr;
use thiserror::Error;

/// Failure of a single nameserver attempt. Recoverable: the orchestrator may move on
/// to the next nameserver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection to {server} failed: {reason}")]
    ConnectFailed { server: SocketAddr, reason: String },

    #[error("Short write to {server}: sent {sent} of {expected} bytes")]
    ShortWrite {
        server: SocketAddr,
        sent: usize,
        expected: usize,
    },

    #[error("Timeout waiting for {server}")]
    Timeout { server: SocketAddr },

    #[error("I/O error with {server}: {reason}")]
    IoError { server: SocketAddr, reason: String },
}

impl TransportError {
    pub fn server(&self) -> SocketAddr {
        match self {
            Self::ConnectFailed { server, .. }
            | Self::ShortWrite { server, .. }
            | Self::Timeout { server }
            | Self::IoError { server, .. } => *server,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::ConnectFailed { .. } => "connect_failed",
            Self::ShortWrite { .. } => "short_write",
            Self::Timeout { .. } => "timeout",
            Self::IoError { .. } => "io_error",
        }
    }
}

/// The wire decoder rejected the reply bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to decode DNS reply: {0}")]
pub struct DecodeError(pub String);

impl DecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Terminal outcome of a send that produced no reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("No nameservers available for the configured address family")]
    NoNameserversAvailable,

    #[error("All {attempted} nameserver attempt(s) failed, last error: {last_error}")]
    AllAttemptsFailed {
        attempted: usize,
        last_error: TransportError,
    },

    #[error("Reply from {server} could not be decoded: {source}")]
    DecodeFailed {
        server: SocketAddr,
        #[source]
        source: DecodeError,
    },
}
