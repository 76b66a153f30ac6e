mod diagnostic_sink;
mod dns_transport;
mod tsig_verifier;
mod wire_decoder;

pub use diagnostic_sink::{Diagnostic, DiagnosticSink};
pub use dns_transport::{DnsTransport, TransportTimeouts};
pub use tsig_verifier::TsigVerifier;
pub use wire_decoder::WireDecoder;
