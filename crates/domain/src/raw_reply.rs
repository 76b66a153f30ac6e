/// Undecoded reply bytes from one transport attempt.
///
/// The buffer holds exactly the bytes received; spare receive capacity is
/// dropped before a `RawReply` is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    bytes: Vec<u8>,
}

impl RawReply {
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Keeps the first `len` bytes of a receive buffer and releases the rest.
    pub fn from_buffer(mut buffer: Vec<u8>, len: usize) -> Self {
        buffer.truncate(len);
        buffer.shrink_to_fit();
        Self { bytes: buffer }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
