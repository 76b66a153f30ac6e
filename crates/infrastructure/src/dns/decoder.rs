use hickory_proto::op::Message;
use nsquery_application::ports::WireDecoder;
use nsquery_domain::DecodeError;
use tracing::debug;

/// Decodes replies into `hickory_proto` messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryWireDecoder;

impl HickoryWireDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl WireDecoder for HickoryWireDecoder {
    type Message = Message;

    fn decode(&self, wire: &[u8]) -> Result<Message, DecodeError> {
        let message = Message::from_vec(wire)
            .map_err(|e| DecodeError::new(format!("Failed to parse DNS response: {}", e)))?;

        debug!(
            id = message.id(),
            rcode = ?message.response_code(),
            answers = message.answers().len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(message)
    }
}
