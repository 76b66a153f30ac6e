use crate::ports::{
    Diagnostic, DiagnosticSink, DnsTransport, TransportTimeouts, TsigVerifier, WireDecoder,
};
use crate::services::NameserverSelectionService;
use nsquery_domain::{
    Attempt, DnsQuery, RawReply, Reply, ResolverConfig, TransportError, TransportFailure,
    TransportProtocol,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// States of one `execute` call.
///
/// `SelectingNameserver` takes the next candidate or ends the send. An attempt
/// either decodes a reply (`Success`) or fails at the transport (`AttemptFailed`).
/// Decode errors end the send directly.
enum SendState<M> {
    SelectingNameserver,
    Attempting(Attempt),
    AttemptFailed(TransportError),
    Success(Decoded<M>),
    Terminal(Result<Reply<M>, TransportFailure>),
}

struct Decoded<M> {
    attempt: Attempt,
    raw: RawReply,
    message: M,
    query_time_ms: u64,
}

/// Sends a serialized query to the resolver's nameservers, one at a time, until one
/// of them answers.
pub struct SendQueryUseCase<M> {
    udp: Arc<dyn DnsTransport>,
    tcp: Arc<dyn DnsTransport>,
    decoder: Arc<dyn WireDecoder<Message = M>>,
    verifier: Arc<dyn TsigVerifier<M>>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<M> SendQueryUseCase<M> {
    pub fn new(
        udp: Arc<dyn DnsTransport>,
        tcp: Arc<dyn DnsTransport>,
        decoder: Arc<dyn WireDecoder<Message = M>>,
        verifier: Arc<dyn TsigVerifier<M>>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            udp,
            tcp,
            decoder,
            verifier,
            diagnostics,
        }
    }

    /// Returns the first decodable reply.
    ///
    /// Transport errors move on to the next candidate unless `fail_fast` is set.
    /// A reply that does not decode stops the send: another nameserver is not
    /// expected to fix a malformed answer.
    pub fn execute(
        &self,
        config: &ResolverConfig,
        query: &DnsQuery,
    ) -> Result<Reply<M>, TransportFailure> {
        let candidates = NameserverSelectionService::candidates(config);
        let timeouts = TransportTimeouts::from_config(config);
        let mut cursor = candidates.iter().copied().peekable();
        let mut attempted = 0usize;

        debug!(
            candidates = candidates.len(),
            configured = config.nameservers.len(),
            transport = %config.transport,
            fail_fast = config.fail_fast,
            query_len = query.len(),
            "Sending query"
        );

        let mut state = SendState::SelectingNameserver;
        loop {
            state = match state {
                SendState::SelectingNameserver => match cursor.next() {
                    Some(target) => SendState::Attempting(Attempt::start(target, config.transport)),
                    None => SendState::Terminal(Err(TransportFailure::NoNameserversAvailable)),
                },

                SendState::Attempting(attempt) => {
                    attempted += 1;
                    self.attempt(attempt, query, timeouts)
                }

                SendState::AttemptFailed(error) => {
                    warn!(
                        server = %error.server(),
                        error = %error,
                        kind = error.kind_name(),
                        attempt = attempted,
                        "Nameserver attempt failed"
                    );

                    if config.fail_fast || cursor.peek().is_none() {
                        SendState::Terminal(Err(TransportFailure::AllAttemptsFailed {
                            attempted,
                            last_error: error,
                        }))
                    } else {
                        SendState::SelectingNameserver
                    }
                }

                SendState::Success(decoded) => {
                    SendState::Terminal(Ok(self.finish(config, query, decoded)))
                }

                SendState::Terminal(result) => return result,
            };
        }
    }

    fn transport_for(&self, protocol: TransportProtocol) -> &dyn DnsTransport {
        match protocol {
            TransportProtocol::Udp => self.udp.as_ref(),
            TransportProtocol::Tcp => self.tcp.as_ref(),
        }
    }

    fn attempt(
        &self,
        attempt: Attempt,
        query: &DnsQuery,
        timeouts: TransportTimeouts,
    ) -> SendState<M> {
        debug!(
            server = %attempt.target,
            family = %attempt.family,
            protocol = %attempt.protocol,
            "Attempting nameserver"
        );

        let transport = self.transport_for(attempt.protocol);
        let raw = match transport.send(query.wire(), attempt.target, timeouts) {
            Ok(raw) => raw,
            Err(error) => return SendState::AttemptFailed(error),
        };
        let query_time_ms = attempt.elapsed_ms();

        match self.decoder.decode(raw.as_bytes()) {
            Ok(message) => SendState::Success(Decoded {
                attempt,
                raw,
                message,
                query_time_ms,
            }),
            Err(source) => {
                warn!(server = %attempt.target, error = %source, "Reply could not be decoded");
                SendState::Terminal(Err(TransportFailure::DecodeFailed {
                    server: attempt.target,
                    source,
                }))
            }
        }
    }

    fn finish(&self, config: &ResolverConfig, query: &DnsQuery, decoded: Decoded<M>) -> Reply<M> {
        let Decoded {
            attempt,
            raw,
            message,
            query_time_ms,
        } = decoded;

        let tsig_verified = self.verify_integrity(config, query, &message, &raw, attempt.target);

        debug!(
            server = %attempt.target,
            query_time_ms,
            size = raw.len(),
            tsig_verified = ?tsig_verified,
            "Reply received"
        );

        Reply {
            message,
            query_time_ms,
            answer_from: attempt.target.ip(),
            when: attempt.started_at(),
            protocol: attempt.protocol,
            size: raw.len(),
            tsig_verified,
        }
    }

    /// Runs the TSIG check when the query was signed. A failed check is reported
    /// through the diagnostic sink and otherwise ignored.
    fn verify_integrity(
        &self,
        config: &ResolverConfig,
        query: &DnsQuery,
        message: &M,
        raw: &RawReply,
        server: SocketAddr,
    ) -> Option<bool> {
        let record = query.tsig()?;
        debug!(
            server = %server,
            algorithm = %record.algorithm,
            key_configured = config.tsig.is_some(),
            "Verifying TSIG on reply"
        );

        let verified = match &config.tsig {
            Some(credentials) => self.verifier.verify(
                message,
                raw.as_bytes(),
                &credentials.key_name,
                &credentials.secret,
                &record.mac,
            ),
            None => false,
        };

        if !verified {
            self.diagnostics.emit(Diagnostic::TsigVerificationFailed {
                server: server.ip(),
                key_name: config.tsig.as_ref().map(|c| c.key_name.clone()),
            });
        }

        Some(verified)
    }
}
