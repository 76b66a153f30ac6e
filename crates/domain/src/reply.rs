use crate::dns_protocol::TransportProtocol;
use chrono::{DateTime, Local};
use std::net::IpAddr;

/// A decoded reply plus where, when and how fast it arrived.
///
/// The annotations are advisory. `tsig_verified` is `None` when the query was not
/// signed; strict callers should reject `Some(false)` themselves.
#[derive(Debug, Clone)]
pub struct Reply<M> {
    pub message: M,
    pub query_time_ms: u64,
    pub answer_from: IpAddr,
    pub when: DateTime<Local>,
    pub protocol: TransportProtocol,
    pub size: usize,
    pub tsig_verified: Option<bool>,
}

impl<M> Reply<M> {
    /// Capture time in the classic `ctime` layout, e.g. `Sat Oct 17 09:41:02 2026`.
    pub fn when_display(&self) -> String {
        self.when.format("%a %b %e %H:%M:%S %Y").to_string()
    }

    pub fn tsig_failed(&self) -> bool {
        self.tsig_verified == Some(false)
    }

    pub fn into_message(self) -> M {
        self.message
    }
}
