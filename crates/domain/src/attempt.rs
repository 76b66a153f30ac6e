use crate::dns_protocol::{AddressFamily, TransportProtocol};
use chrono::{DateTime, Local};
use std::net::SocketAddr;
use std::time::Instant;

/// One try against one nameserver. Lives for a single loop iteration.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub target: SocketAddr,
    pub family: AddressFamily,
    pub protocol: TransportProtocol,
    started: Instant,
    started_at: DateTime<Local>,
}

impl Attempt {
    pub fn start(target: SocketAddr, protocol: TransportProtocol) -> Self {
        Self {
            target,
            family: AddressFamily::of_socket(&target),
            protocol,
            started: Instant::now(),
            started_at: Local::now(),
        }
    }

    /// Whole milliseconds since the attempt started.
    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }
}
