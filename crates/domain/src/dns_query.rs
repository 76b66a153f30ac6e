use std::sync::Arc;

/// The parts of a query's TSIG resource record needed to check the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsigRecord {
    /// Algorithm name as it appears in the record (e.g. `hmac-sha256.`).
    pub algorithm: Arc<str>,

    /// MAC field of the signed query.
    pub mac: Vec<u8>,
}

impl TsigRecord {
    pub fn new(algorithm: impl Into<Arc<str>>, mac: Vec<u8>) -> Self {
        Self {
            algorithm: algorithm.into(),
            mac,
        }
    }
}

/// A query already serialized to wire format.
///
/// The bytes are never modified while a send is in flight. When the query was
/// signed, `tsig` carries the record the reply will be checked against.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    wire: Arc<[u8]>,
    tsig: Option<TsigRecord>,
}

impl DnsQuery {
    pub fn new(wire: impl Into<Arc<[u8]>>) -> Self {
        Self {
            wire: wire.into(),
            tsig: None,
        }
    }

    pub fn with_tsig(mut self, record: TsigRecord) -> Self {
        self.tsig = Some(record);
        self
    }

    pub fn wire(&self) -> &[u8] {
        &self.wire
    }

    pub fn len(&self) -> usize {
        self.wire.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wire.is_empty()
    }

    pub fn tsig(&self) -> Option<&TsigRecord> {
        self.tsig.as_ref()
    }

    /// Message ID from the header, if the buffer is long enough to have one.
    pub fn id(&self) -> Option<u16> {
        match self.wire.get(..2) {
            Some(&[hi, lo]) => Some(u16::from_be_bytes([hi, lo])),
            _ => None,
        }
    }
}
