pub mod framing;
pub mod socket;
pub mod tcp;
pub mod udp;

use nsquery_application::ports::DnsTransport;
use nsquery_domain::TransportProtocol;
use std::io;
use std::sync::Arc;
use std::time::Duration;

pub use framing::{
    read_exact_accumulating, read_with_length_prefix, write_with_length_prefix, FramingError,
};
pub use tcp::TcpTransport;
pub use udp::UdpTransport;

/// Smallest deadline handed to a socket. A zero timeout would disable the
/// deadline entirely at the OS level.
const MIN_SOCKET_TIMEOUT: Duration = Duration::from_millis(1);

pub fn create_transport(protocol: TransportProtocol) -> Arc<dyn DnsTransport> {
    match protocol {
        TransportProtocol::Udp => Arc::new(UdpTransport::new()),
        TransportProtocol::Tcp => Arc::new(TcpTransport::new()),
    }
}

/// A blocking call hit its socket deadline. Unix reports `WouldBlock`,
/// Windows reports `TimedOut`.
pub(crate) fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

pub(crate) fn socket_timeout(timeout: Duration) -> Duration {
    timeout.max(MIN_SOCKET_TIMEOUT)
}
