use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Well-known DNS port (RFC 1035 §4.2).
pub const DEFAULT_DNS_PORT: u16 = 53;

/// Largest DNS message either transport can carry. Bounded by the 16-bit TCP
/// length prefix and used as the UDP receive buffer size.
pub const MAX_MESSAGE_SIZE: usize = 65535;

/// Transport used to reach a nameserver.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportProtocol {
    #[default]
    Udp,
    #[serde(alias = "vc")]
    Tcp,
}

impl TransportProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "UDP",
            Self::Tcp => "TCP",
        }
    }
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IP family of a nameserver address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }

    pub fn of_socket(addr: &SocketAddr) -> Self {
        Self::of(&addr.ip())
    }

    /// Wildcard address of this family with an OS-assigned port.
    pub fn unspecified_bind_addr(&self) -> SocketAddr {
        match self {
            Self::V4 => SocketAddr::from(([0, 0, 0, 0], 0)),
            Self::V6 => SocketAddr::from(([0u16; 8], 0)),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => f.write_str("IPv4"),
            Self::V6 => f.write_str("IPv6"),
        }
    }
}
