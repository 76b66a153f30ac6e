//! nsquery Domain Layer
pub mod attempt;
pub mod config;
pub mod dns_protocol;
pub mod dns_query;
pub mod errors;
pub mod raw_reply;
pub mod reply;

pub use attempt::Attempt;
pub use config::{
    CliOverrides, Config, ConfigError, IpPreference, LoggingConfig, ResolverConfig,
    TsigCredentials,
};
pub use dns_protocol::{AddressFamily, TransportProtocol, DEFAULT_DNS_PORT, MAX_MESSAGE_SIZE};
pub use dns_query::{DnsQuery, TsigRecord};
pub use errors::{DecodeError, TransportError, TransportFailure};
pub use raw_reply::RawReply;
pub use reply::Reply;
