//! DNS Message Builder
//!
//! Constructs query messages in wire format using `hickory-proto`, ready to be
//! handed to the transport core as a `DnsQuery`.

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use nsquery_domain::DnsQuery;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryBuildError {
    #[error("Invalid domain '{domain}': {reason}")]
    InvalidName { domain: String, reason: String },

    #[error("Failed to serialize DNS message: {0}")]
    Serialize(String),
}

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query with a random ID and a single question.
    pub fn build_query(domain: &str, record_type: RecordType) -> Result<DnsQuery, QueryBuildError> {
        Self::build_query_with_id(fastrand::u16(..), domain, record_type, true)
    }

    pub fn build_query_with_id(
        id: u16,
        domain: &str,
        record_type: RecordType,
        recursion_desired: bool,
    ) -> Result<DnsQuery, QueryBuildError> {
        let name = Name::from_str(domain).map_err(|e| QueryBuildError::InvalidName {
            domain: domain.to_string(),
            reason: e.to_string(),
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(record_type);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(recursion_desired);
        message.add_query(query);

        Ok(DnsQuery::new(Self::serialize_message(&message)?))
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, QueryBuildError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| QueryBuildError::Serialize(e.to_string()))?;

        Ok(buf)
    }
}
