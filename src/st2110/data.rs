//! The data media specialization: preserves `fmtp` opaquely.

/// Extracts the raw `fmtp` config for a data media block, if one exists.
/// No domain validation is performed beyond generic SDP grammar.
pub fn type_data(fmtp: Option<&crate::attributes::Fmtp>) -> Option<String> {
    fmtp.map(|f| f.config.clone())
}
