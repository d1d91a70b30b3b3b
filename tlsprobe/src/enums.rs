use crate::msgs::{Codec, Reader};

enum_builder! {
    /// The `ContentType` TLS protocol enum.  Values in this enum are taken
    /// from the various RFCs covering TLS, and are listed by IANA.
    /// The `Unknown` item is used when processing unrecognised ordinals.
    #[repr(u8)]
    pub enum ContentType {
        ChangeCipherSpec => 0x14,
        Alert => 0x15,
        Handshake => 0x16,
        ApplicationData => 0x17,
        Heartbeat => 0x18,
    }
}

enum_builder! {
    /// The `ProtocolVersion` TLS protocol enum.  Values in this enum are taken
    /// from the various RFCs covering TLS, and are listed by IANA.
    /// The `Unknown` item is used when processing unrecognised ordinals.
    #[repr(u16)]
    pub enum ProtocolVersion {
        SSLv2 => 0x0002,
        SSLv3 => 0x0300,
        TLSv1_0 => 0x0301,
        TLSv1_1 => 0x0302,
        TLSv1_2 => 0x0303,
        TLSv1_3 => 0x0304,
        DTLSv1_0 => 0xFEFF,
        DTLSv1_2 => 0xFEFD,
        DTLSv1_3 => 0xFEFC,
    }
}

impl ProtocolVersion {
    /// SSLv2 or SSLv3.  Both use the SSLv3 MAC and metadata layout.
    pub fn is_ssl(self) -> bool {
        matches!(self, Self::SSLv2 | Self::SSLv3)
    }

    /// TLS 1.3 or DTLS 1.3.
    pub fn is_tls13(self) -> bool {
        matches!(self, Self::TLSv1_3 | Self::DTLSv1_3)
    }

    /// Any DTLS version.
    pub fn is_dtls(self) -> bool {
        matches!(self, Self::DTLSv1_0 | Self::DTLSv1_2 | Self::DTLSv1_3)
    }

    /// Whether CBC records carry a per-record explicit IV.
    ///
    /// SSLv3 and TLS 1.0 chain the IV from the previous record instead.
    pub fn uses_explicit_iv(self) -> bool {
        !matches!(self, Self::SSLv2 | Self::SSLv3 | Self::TLSv1_0)
    }
}

/// Which side of a connection we are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionEnd {
    /// The client side.
    Client,
    /// The server side.
    Server,
}

impl ConnectionEnd {
    /// The other side.
    pub fn peer(self) -> Self {
        match self {
            Self::Client => Self::Server,
            Self::Server => Self::Client,
        }
    }
}
