#![allow(dead_code)]

use nsquery_application::ports::{
    Diagnostic, DiagnosticSink, DnsTransport, TransportTimeouts, TsigVerifier, WireDecoder,
};
use nsquery_domain::{DecodeError, RawReply, TransportError, TransportProtocol};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

/// What a scripted nameserver does when contacted.
#[derive(Clone)]
pub enum ScriptedOutcome {
    Reply(Vec<u8>),
    Fail(FailureKind),
}

#[derive(Clone, Copy)]
pub enum FailureKind {
    Timeout,
    ConnectFailed,
    ShortWrite,
    Io,
}

impl FailureKind {
    fn into_error(self, server: SocketAddr) -> TransportError {
        match self {
            FailureKind::Timeout => TransportError::Timeout { server },
            FailureKind::ConnectFailed => TransportError::ConnectFailed {
                server,
                reason: "connection refused".to_string(),
            },
            FailureKind::ShortWrite => TransportError::ShortWrite {
                server,
                sent: 1,
                expected: 2,
            },
            FailureKind::Io => TransportError::IoError {
                server,
                reason: "connection reset".to_string(),
            },
        }
    }
}

struct Script {
    outcomes: VecDeque<ScriptedOutcome>,
    delay: Duration,
}

/// Transport that answers from a per-server script and records every call.
/// Unscripted servers time out.
pub struct MockTransport {
    protocol: TransportProtocol,
    scripts: Mutex<HashMap<SocketAddr, Script>>,
    calls: Mutex<Vec<SocketAddr>>,
    timeouts_seen: Mutex<Vec<TransportTimeouts>>,
    payloads_seen: Mutex<Vec<Vec<u8>>>,
}

impl MockTransport {
    pub fn new(protocol: TransportProtocol) -> Self {
        Self {
            protocol,
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            timeouts_seen: Mutex::new(Vec::new()),
            payloads_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn udp() -> Self {
        Self::new(TransportProtocol::Udp)
    }

    pub fn tcp() -> Self {
        Self::new(TransportProtocol::Tcp)
    }

    pub fn script(&self, server: SocketAddr, outcome: ScriptedOutcome) {
        self.script_with_delay(server, outcome, Duration::ZERO);
    }

    pub fn script_with_delay(&self, server: SocketAddr, outcome: ScriptedOutcome, delay: Duration) {
        let mut scripts = self.scripts.lock().unwrap();
        let script = scripts.entry(server).or_insert_with(|| Script {
            outcomes: VecDeque::new(),
            delay,
        });
        script.delay = delay;
        script.outcomes.push_back(outcome);
    }

    pub fn calls(&self) -> Vec<SocketAddr> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn timeouts_seen(&self) -> Vec<TransportTimeouts> {
        self.timeouts_seen.lock().unwrap().clone()
    }

    pub fn payloads_seen(&self) -> Vec<Vec<u8>> {
        self.payloads_seen.lock().unwrap().clone()
    }
}

impl DnsTransport for MockTransport {
    fn send(
        &self,
        message_bytes: &[u8],
        destination: SocketAddr,
        timeouts: TransportTimeouts,
    ) -> Result<RawReply, TransportError> {
        self.calls.lock().unwrap().push(destination);
        self.timeouts_seen.lock().unwrap().push(timeouts);
        self.payloads_seen
            .lock()
            .unwrap()
            .push(message_bytes.to_vec());

        let (outcome, delay) = {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.get_mut(&destination) {
                Some(script) => (script.outcomes.pop_front(), script.delay),
                None => (None, Duration::ZERO),
            }
        };

        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        match outcome {
            Some(ScriptedOutcome::Reply(bytes)) => Ok(RawReply::from_vec(bytes)),
            Some(ScriptedOutcome::Fail(kind)) => Err(kind.into_error(destination)),
            None => Err(TransportError::Timeout {
                server: destination,
            }),
        }
    }

    fn protocol(&self) -> TransportProtocol {
        self.protocol
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMessage {
    pub id: u16,
    pub body: Vec<u8>,
}

/// Accepts anything with a 2-byte ID; replies starting with 0xFF 0xFF are malformed.
pub struct MockDecoder {
    inputs: Mutex<Vec<Vec<u8>>>,
}

impl MockDecoder {
    pub fn new() -> Self {
        Self {
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn inputs(&self) -> Vec<Vec<u8>> {
        self.inputs.lock().unwrap().clone()
    }
}

impl WireDecoder for MockDecoder {
    type Message = MockMessage;

    fn decode(&self, wire: &[u8]) -> Result<MockMessage, DecodeError> {
        self.inputs.lock().unwrap().push(wire.to_vec());

        match wire {
            [0xFF, 0xFF, ..] => Err(DecodeError::new("malformed header")),
            [hi, lo, rest @ ..] => Ok(MockMessage {
                id: u16::from_be_bytes([*hi, *lo]),
                body: rest.to_vec(),
            }),
            _ => Err(DecodeError::new("message shorter than ID")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCall {
    pub reply_id: u16,
    pub raw_reply: Vec<u8>,
    pub key_name: String,
    pub key_material: String,
    pub expected_mac: Vec<u8>,
}

pub struct MockVerifier {
    result: bool,
    calls: Mutex<Vec<VerifyCall>>,
}

impl MockVerifier {
    pub fn accepting() -> Self {
        Self {
            result: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            result: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<VerifyCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl TsigVerifier<MockMessage> for MockVerifier {
    fn verify(
        &self,
        reply: &MockMessage,
        raw_reply: &[u8],
        key_name: &str,
        key_material: &str,
        expected_mac: &[u8],
    ) -> bool {
        self.calls.lock().unwrap().push(VerifyCall {
            reply_id: reply.id,
            raw_reply: raw_reply.to_vec(),
            key_name: key_name.to_string(),
            key_material: key_material.to_string(),
            expected_mac: expected_mac.to_vec(),
        });
        self.result
    }
}

pub struct RecordingDiagnostics {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        self.events.lock().unwrap().push(diagnostic);
    }
}
