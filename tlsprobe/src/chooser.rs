use crate::crypto::CipherSuite;
use crate::enums::{ConnectionEnd, ProtocolVersion};

/// Provides the negotiated parameters a record cipher is built for.
///
/// A handshake driver implements this over whatever session state it
/// keeps, possibly falling back to configured defaults when nothing was
/// negotiated yet.
pub trait Chooser {
    /// The cipher suite records are protected with.
    fn selected_cipher_suite(&self) -> CipherSuite;

    /// The protocol version records are protected under.
    fn selected_protocol_version(&self) -> ProtocolVersion;

    /// Which side of the connection we are.
    fn connection_end(&self) -> ConnectionEnd;
}

/// A fixed set of negotiated parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Negotiated {
    /// The selected cipher suite.
    pub cipher_suite: CipherSuite,
    /// The selected protocol version.
    pub protocol_version: ProtocolVersion,
    /// Our side of the connection.
    pub connection_end: ConnectionEnd,
}

impl Chooser for Negotiated {
    fn selected_cipher_suite(&self) -> CipherSuite {
        self.cipher_suite
    }

    fn selected_protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    fn connection_end(&self) -> ConnectionEnd {
        self.connection_end
    }
}
