use crate::enums::{ContentType, ProtocolVersion};
use crate::msgs::{put_u16, put_u64};

/// The bytes bound into a record's MAC, or used as its AEAD associated data.
///
/// `negotiated` selects the layout; `record_version` is the version in the
/// record header.  `len` is the number of bytes the MAC covers, or for
/// TLS 1.3 the record length.
///
/// | negotiated          | layout                                         |
/// |---------------------|------------------------------------------------|
/// | SSLv2, SSLv3        | seq(8) type(1) len(2)                          |
/// | TLS 1.0 - 1.2       | seq(8) type(1) version(2) len(2)               |
/// | DTLS 1.0, 1.2       | epoch(2) seq(6) type(1) version(2) len(2)      |
/// | TLS 1.3, DTLS 1.3   | type(1) version(2) len(2)                      |
///
/// SSLv2 never had these records; it gets the SSLv3 layout.  `len` is
/// truncated to 16 bits.
pub fn make_metadata(
    negotiated: ProtocolVersion,
    content_type: ContentType,
    record_version: ProtocolVersion,
    epoch: u16,
    seq: u64,
    len: usize,
) -> Vec<u8> {
    let typ = u8::from(content_type);
    let len = len as u16;

    if negotiated.is_tls13() {
        let mut out = [0u8; TLS13_METADATA_LEN];
        out[0] = typ;
        put_u16(u16::from(record_version), &mut out[1..3]);
        put_u16(len, &mut out[3..5]);
        return out.to_vec();
    }

    if negotiated.is_ssl() {
        let mut out = [0u8; SSL_METADATA_LEN];
        put_u64(seq, &mut out[..8]);
        out[8] = typ;
        put_u16(len, &mut out[9..11]);
        return out.to_vec();
    }

    let mut out = [0u8; TLS12_METADATA_LEN];
    match negotiated.is_dtls() {
        true => {
            put_u16(epoch, &mut out[..2]);
            out[2..8].copy_from_slice(&seq.to_be_bytes()[2..]);
        }
        false => put_u64(seq, &mut out[..8]),
    }
    out[8] = typ;
    put_u16(u16::from(record_version), &mut out[9..11]);
    put_u16(len, &mut out[11..13]);
    out.to_vec()
}

const SSL_METADATA_LEN: usize = 8 + 1 + 2;
const TLS12_METADATA_LEN: usize = 8 + 1 + 2 + 2;
const TLS13_METADATA_LEN: usize = 1 + 2 + 2;
