use nsquery_application::ports::TsigVerifier;
use tracing::debug;

/// Verifier used when no TSIG MAC implementation is wired in. Every signed reply
/// is reported as unverified, so the failure surfaces as a diagnostic instead of
/// passing silently.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedTsigVerifier;

impl<M> TsigVerifier<M> for UnsupportedTsigVerifier {
    fn verify(
        &self,
        _reply: &M,
        raw_reply: &[u8],
        key_name: &str,
        _key_material: &str,
        expected_mac: &[u8],
    ) -> bool {
        debug!(
            key_name,
            reply_len = raw_reply.len(),
            mac_len = expected_mac.len(),
            "No TSIG verifier available"
        );
        false
    }
}
