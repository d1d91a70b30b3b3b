/// Options for how records are protected.
///
/// These mirror what a peer may negotiate through extensions, or what a
/// test may want to vary, and apply to every cipher built with them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordConfig {
    /// Use encrypt-then-MAC (RFC 7366) for CBC suites, instead of the
    /// default MAC-then-encrypt.
    pub encrypt_then_mac: bool,

    /// Extra padding bytes to add to each record.
    ///
    /// For CBC suites this goes on top of the padding needed to reach a
    /// block boundary, up to 256 bytes; it should be a multiple of the
    /// block length.  For TLS 1.3 AEAD records this is the number of zero
    /// bytes after the inner content type, up to 65535.
    pub additional_padding: usize,
}
