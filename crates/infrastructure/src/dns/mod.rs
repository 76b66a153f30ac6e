pub mod decoder;
pub mod diagnostics;
pub mod message_builder;
pub mod transport;
pub mod tsig;

pub use decoder::HickoryWireDecoder;
pub use diagnostics::{DiagnosticEmitter, TracingDiagnosticSink};
pub use message_builder::{MessageBuilder, QueryBuildError};
pub use transport::{create_transport, TcpTransport, UdpTransport};
pub use tsig::UnsupportedTsigVerifier;
