use nsquery_domain::DecodeError;

/// Turns reply bytes into a structured message.
pub trait WireDecoder: Send + Sync {
    type Message;

    fn decode(&self, wire: &[u8]) -> Result<Self::Message, DecodeError>;
}
