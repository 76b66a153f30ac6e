/// Checks the TSIG MAC of a reply against the key and the MAC of the signed query.
///
/// The MAC algorithm lives behind this trait; the transport core only decides
/// when to call it and what to do with the answer.
pub trait TsigVerifier<M>: Send + Sync {
    fn verify(
        &self,
        reply: &M,
        raw_reply: &[u8],
        key_name: &str,
        key_material: &str,
        expected_mac: &[u8],
    ) -> bool;
}
