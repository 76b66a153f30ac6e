use std::fmt;
use std::net::IpAddr;

/// Warning raised while sending a query. Never changes the send result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// The reply was returned, but its TSIG MAC did not verify.
    TsigVerificationFailed {
        server: IpAddr,
        key_name: Option<String>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TsigVerificationFailed {
                server,
                key_name: Some(key),
            } => write!(
                f,
                "TSIG verification of answer from {} failed (key {})",
                server, key
            ),
            Diagnostic::TsigVerificationFailed {
                server,
                key_name: None,
            } => write!(
                f,
                "TSIG verification of answer from {} failed (no key configured)",
                server
            ),
        }
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}
