use super::errors::ConfigError;
use crate::dns_protocol::{AddressFamily, TransportProtocol, DEFAULT_DNS_PORT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Which nameserver address families the resolver may use.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IpPreference {
    #[default]
    Any,
    #[serde(alias = "ipv4", alias = "inet")]
    V4Only,
    #[serde(alias = "ipv6", alias = "inet6")]
    V6Only,
}

impl IpPreference {
    pub fn admits(&self, family: AddressFamily) -> bool {
        match self {
            Self::Any => true,
            Self::V4Only => family == AddressFamily::V4,
            Self::V6Only => family == AddressFamily::V6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::V4Only => "v4_only",
            Self::V6Only => "v6_only",
        }
    }
}

/// TSIG key used to verify signed replies.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TsigCredentials {
    pub key_name: String,

    /// Key material as configured (base64 encoded secret).
    pub secret: String,
}

impl TsigCredentials {
    pub fn new(key_name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for TsigCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TsigCredentials")
            .field("key_name", &self.key_name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Everything the transport core needs to know about where and how to send a query.
///
/// Nameservers are tried in list order. The timeout bounds each blocking socket
/// call of an attempt, not the whole send.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResolverConfig {
    #[serde(default)]
    pub nameservers: Vec<IpAddr>,

    #[serde(default)]
    pub ip_preference: IpPreference,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub transport: TransportProtocol,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Separate bound for TCP connection setup. Falls back to `timeout_ms`.
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,

    /// Stop at the first transport failure instead of trying the next nameserver.
    #[serde(default)]
    pub fail_fast: bool,

    #[serde(default)]
    pub tsig: Option<TsigCredentials>,
}

impl ResolverConfig {
    pub fn new(nameservers: Vec<IpAddr>) -> Self {
        Self {
            nameservers,
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_transport(mut self, transport: TransportProtocol) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_ip_preference(mut self, preference: IpPreference) -> Self {
        self.ip_preference = preference;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_tsig(mut self, credentials: TsigCredentials) -> Self {
        self.tsig = Some(credentials);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.timeout())
    }

    /// Destination for a nameserver on the configured port.
    pub fn socket_addr(&self, nameserver: IpAddr) -> SocketAddr {
        SocketAddr::new(nameserver, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation(
                "Resolver port cannot be 0".to_string(),
            ));
        }

        if self.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Resolver timeout must be greater than 0 ms".to_string(),
            ));
        }

        if self.connect_timeout_ms == Some(0) {
            return Err(ConfigError::Validation(
                "Connect timeout must be greater than 0 ms".to_string(),
            ));
        }

        if let Some(tsig) = &self.tsig {
            if tsig.key_name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "TSIG key name cannot be empty".to_string(),
                ));
            }
            if tsig.secret.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "TSIG key '{}' has no secret",
                    tsig.key_name
                )));
            }
        }

        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            ip_preference: IpPreference::default(),
            port: default_port(),
            transport: TransportProtocol::default(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: None,
            fail_fast: false,
            tsig: None,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_DNS_PORT
}

fn default_timeout_ms() -> u64 {
    5000
}
