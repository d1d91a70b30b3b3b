use crate::enums::ProtocolVersion;
use crate::error::Error;
use crate::crypto::mac::MacAlgorithm;
use crate::msgs::{Codec, Reader};

enum_builder! {
    /// The `CipherSuite` TLS protocol enum.  Values in this enum are taken
    /// from the various RFCs covering TLS, and are listed by IANA.
    /// The `Unknown` item is used when processing unrecognised ordinals.
    ///
    /// Only suites whose bulk cipher and MAC we implement are listed.
    #[repr(u16)]
    pub enum CipherSuite {
        TLS_NULL_WITH_NULL_NULL => 0x0000,
        TLS_RSA_WITH_NULL_MD5 => 0x0001,
        TLS_RSA_WITH_NULL_SHA => 0x0002,
        TLS_RSA_EXPORT_WITH_RC4_40_MD5 => 0x0003,
        TLS_RSA_WITH_RC4_128_MD5 => 0x0004,
        TLS_RSA_WITH_RC4_128_SHA => 0x0005,
        TLS_RSA_WITH_DES_CBC_SHA => 0x0009,
        TLS_RSA_WITH_3DES_EDE_CBC_SHA => 0x000a,
        TLS_DH_DSS_WITH_DES_CBC_SHA => 0x000c,
        TLS_DH_DSS_WITH_3DES_EDE_CBC_SHA => 0x000d,
        TLS_DH_RSA_WITH_DES_CBC_SHA => 0x000f,
        TLS_DH_RSA_WITH_3DES_EDE_CBC_SHA => 0x0010,
        TLS_DHE_DSS_WITH_DES_CBC_SHA => 0x0012,
        TLS_DHE_DSS_WITH_3DES_EDE_CBC_SHA => 0x0013,
        TLS_DHE_RSA_WITH_DES_CBC_SHA => 0x0015,
        TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA => 0x0016,
        TLS_DH_anon_EXPORT_WITH_RC4_40_MD5 => 0x0017,
        TLS_DH_anon_WITH_RC4_128_MD5 => 0x0018,
        TLS_DH_anon_WITH_DES_CBC_SHA => 0x001a,
        TLS_DH_anon_WITH_3DES_EDE_CBC_SHA => 0x001b,
        TLS_PSK_WITH_NULL_SHA => 0x002c,
        TLS_DHE_PSK_WITH_NULL_SHA => 0x002d,
        TLS_RSA_PSK_WITH_NULL_SHA => 0x002e,
        TLS_RSA_WITH_AES_128_CBC_SHA => 0x002f,
        TLS_DH_DSS_WITH_AES_128_CBC_SHA => 0x0030,
        TLS_DH_RSA_WITH_AES_128_CBC_SHA => 0x0031,
        TLS_DHE_DSS_WITH_AES_128_CBC_SHA => 0x0032,
        TLS_DHE_RSA_WITH_AES_128_CBC_SHA => 0x0033,
        TLS_DH_anon_WITH_AES_128_CBC_SHA => 0x0034,
        TLS_RSA_WITH_AES_256_CBC_SHA => 0x0035,
        TLS_DH_DSS_WITH_AES_256_CBC_SHA => 0x0036,
        TLS_DH_RSA_WITH_AES_256_CBC_SHA => 0x0037,
        TLS_DHE_DSS_WITH_AES_256_CBC_SHA => 0x0038,
        TLS_DHE_RSA_WITH_AES_256_CBC_SHA => 0x0039,
        TLS_DH_anon_WITH_AES_256_CBC_SHA => 0x003a,
        TLS_RSA_WITH_NULL_SHA256 => 0x003b,
        TLS_RSA_WITH_AES_128_CBC_SHA256 => 0x003c,
        TLS_RSA_WITH_AES_256_CBC_SHA256 => 0x003d,
        TLS_DH_DSS_WITH_AES_128_CBC_SHA256 => 0x003e,
        TLS_DH_RSA_WITH_AES_128_CBC_SHA256 => 0x003f,
        TLS_DHE_DSS_WITH_AES_128_CBC_SHA256 => 0x0040,
        TLS_RSA_EXPORT1024_WITH_RC4_56_MD5 => 0x0060,
        TLS_RSA_EXPORT1024_WITH_DES_CBC_SHA => 0x0062,
        TLS_DHE_DSS_EXPORT1024_WITH_DES_CBC_SHA => 0x0063,
        TLS_RSA_EXPORT1024_WITH_RC4_56_SHA => 0x0064,
        TLS_DHE_DSS_EXPORT1024_WITH_RC4_56_SHA => 0x0065,
        TLS_DHE_DSS_WITH_RC4_128_SHA => 0x0066,
        TLS_DHE_RSA_WITH_AES_128_CBC_SHA256 => 0x0067,
        TLS_DH_DSS_WITH_AES_256_CBC_SHA256 => 0x0068,
        TLS_DH_RSA_WITH_AES_256_CBC_SHA256 => 0x0069,
        TLS_DHE_DSS_WITH_AES_256_CBC_SHA256 => 0x006a,
        TLS_DHE_RSA_WITH_AES_256_CBC_SHA256 => 0x006b,
        TLS_DH_anon_WITH_AES_128_CBC_SHA256 => 0x006c,
        TLS_DH_anon_WITH_AES_256_CBC_SHA256 => 0x006d,
        TLS_PSK_WITH_RC4_128_SHA => 0x008a,
        TLS_PSK_WITH_3DES_EDE_CBC_SHA => 0x008b,
        TLS_PSK_WITH_AES_128_CBC_SHA => 0x008c,
        TLS_PSK_WITH_AES_256_CBC_SHA => 0x008d,
        TLS_DHE_PSK_WITH_RC4_128_SHA => 0x008e,
        TLS_DHE_PSK_WITH_3DES_EDE_CBC_SHA => 0x008f,
        TLS_DHE_PSK_WITH_AES_128_CBC_SHA => 0x0090,
        TLS_DHE_PSK_WITH_AES_256_CBC_SHA => 0x0091,
        TLS_RSA_PSK_WITH_RC4_128_SHA => 0x0092,
        TLS_RSA_PSK_WITH_3DES_EDE_CBC_SHA => 0x0093,
        TLS_RSA_PSK_WITH_AES_128_CBC_SHA => 0x0094,
        TLS_RSA_PSK_WITH_AES_256_CBC_SHA => 0x0095,
        TLS_RSA_WITH_AES_128_GCM_SHA256 => 0x009c,
        TLS_RSA_WITH_AES_256_GCM_SHA384 => 0x009d,
        TLS_DHE_RSA_WITH_AES_128_GCM_SHA256 => 0x009e,
        TLS_DHE_RSA_WITH_AES_256_GCM_SHA384 => 0x009f,
        TLS_DH_RSA_WITH_AES_128_GCM_SHA256 => 0x00a0,
        TLS_DH_RSA_WITH_AES_256_GCM_SHA384 => 0x00a1,
        TLS_DHE_DSS_WITH_AES_128_GCM_SHA256 => 0x00a2,
        TLS_DHE_DSS_WITH_AES_256_GCM_SHA384 => 0x00a3,
        TLS_DH_DSS_WITH_AES_128_GCM_SHA256 => 0x00a4,
        TLS_DH_DSS_WITH_AES_256_GCM_SHA384 => 0x00a5,
        TLS_DH_anon_WITH_AES_128_GCM_SHA256 => 0x00a6,
        TLS_DH_anon_WITH_AES_256_GCM_SHA384 => 0x00a7,
        TLS_PSK_WITH_AES_128_GCM_SHA256 => 0x00a8,
        TLS_PSK_WITH_AES_256_GCM_SHA384 => 0x00a9,
        TLS_DHE_PSK_WITH_AES_128_GCM_SHA256 => 0x00aa,
        TLS_DHE_PSK_WITH_AES_256_GCM_SHA384 => 0x00ab,
        TLS_RSA_PSK_WITH_AES_128_GCM_SHA256 => 0x00ac,
        TLS_RSA_PSK_WITH_AES_256_GCM_SHA384 => 0x00ad,
        TLS_PSK_WITH_AES_128_CBC_SHA256 => 0x00ae,
        TLS_PSK_WITH_AES_256_CBC_SHA384 => 0x00af,
        TLS_PSK_WITH_NULL_SHA256 => 0x00b0,
        TLS_PSK_WITH_NULL_SHA384 => 0x00b1,
        TLS_DHE_PSK_WITH_AES_128_CBC_SHA256 => 0x00b2,
        TLS_DHE_PSK_WITH_AES_256_CBC_SHA384 => 0x00b3,
        TLS_DHE_PSK_WITH_NULL_SHA256 => 0x00b4,
        TLS_DHE_PSK_WITH_NULL_SHA384 => 0x00b5,
        TLS_RSA_PSK_WITH_AES_128_CBC_SHA256 => 0x00b6,
        TLS_RSA_PSK_WITH_AES_256_CBC_SHA384 => 0x00b7,
        TLS_RSA_PSK_WITH_NULL_SHA256 => 0x00b8,
        TLS_RSA_PSK_WITH_NULL_SHA384 => 0x00b9,
        TLS_EMPTY_RENEGOTIATION_INFO_SCSV => 0x00ff,
        TLS13_AES_128_GCM_SHA256 => 0x1301,
        TLS13_AES_256_GCM_SHA384 => 0x1302,
        TLS13_CHACHA20_POLY1305_SHA256 => 0x1303,
        TLS13_AES_128_CCM_SHA256 => 0x1304,
        TLS13_AES_128_CCM_8_SHA256 => 0x1305,
        TLS_CECPQ1_RSA_WITH_CHACHA20_POLY1305_SHA256 => 0x16b7,
        TLS_CECPQ1_ECDSA_WITH_CHACHA20_POLY1305_SHA256 => 0x16b8,
        TLS_CECPQ1_RSA_WITH_AES_256_GCM_SHA384 => 0x16b9,
        TLS_CECPQ1_ECDSA_WITH_AES_256_GCM_SHA384 => 0x16ba,
        TLS_FALLBACK_SCSV => 0x5600,
        TLS_ECDH_ECDSA_WITH_NULL_SHA => 0xc001,
        TLS_ECDH_ECDSA_WITH_RC4_128_SHA => 0xc002,
        TLS_ECDH_ECDSA_WITH_3DES_EDE_CBC_SHA => 0xc003,
        TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA => 0xc004,
        TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA => 0xc005,
        TLS_ECDHE_ECDSA_WITH_NULL_SHA => 0xc006,
        TLS_ECDHE_ECDSA_WITH_RC4_128_SHA => 0xc007,
        TLS_ECDHE_ECDSA_WITH_3DES_EDE_CBC_SHA => 0xc008,
        TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA => 0xc009,
        TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA => 0xc00a,
        TLS_ECDH_RSA_WITH_NULL_SHA => 0xc00b,
        TLS_ECDH_RSA_WITH_RC4_128_SHA => 0xc00c,
        TLS_ECDH_RSA_WITH_3DES_EDE_CBC_SHA => 0xc00d,
        TLS_ECDH_RSA_WITH_AES_128_CBC_SHA => 0xc00e,
        TLS_ECDH_RSA_WITH_AES_256_CBC_SHA => 0xc00f,
        TLS_ECDHE_RSA_WITH_NULL_SHA => 0xc010,
        TLS_ECDHE_RSA_WITH_RC4_128_SHA => 0xc011,
        TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA => 0xc012,
        TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA => 0xc013,
        TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA => 0xc014,
        TLS_ECDH_anon_WITH_NULL_SHA => 0xc015,
        TLS_ECDH_anon_WITH_RC4_128_SHA => 0xc016,
        TLS_ECDH_anon_WITH_3DES_EDE_CBC_SHA => 0xc017,
        TLS_ECDH_anon_WITH_AES_128_CBC_SHA => 0xc018,
        TLS_ECDH_anon_WITH_AES_256_CBC_SHA => 0xc019,
        TLS_SRP_SHA_WITH_3DES_EDE_CBC_SHA => 0xc01a,
        TLS_SRP_SHA_RSA_WITH_3DES_EDE_CBC_SHA => 0xc01b,
        TLS_SRP_SHA_DSS_WITH_3DES_EDE_CBC_SHA => 0xc01c,
        TLS_SRP_SHA_WITH_AES_128_CBC_SHA => 0xc01d,
        TLS_SRP_SHA_RSA_WITH_AES_128_CBC_SHA => 0xc01e,
        TLS_SRP_SHA_DSS_WITH_AES_128_CBC_SHA => 0xc01f,
        TLS_SRP_SHA_WITH_AES_256_CBC_SHA => 0xc020,
        TLS_SRP_SHA_RSA_WITH_AES_256_CBC_SHA => 0xc021,
        TLS_SRP_SHA_DSS_WITH_AES_256_CBC_SHA => 0xc022,
        TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256 => 0xc023,
        TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384 => 0xc024,
        TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA256 => 0xc025,
        TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA384 => 0xc026,
        TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256 => 0xc027,
        TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384 => 0xc028,
        TLS_ECDH_RSA_WITH_AES_128_CBC_SHA256 => 0xc029,
        TLS_ECDH_RSA_WITH_AES_256_CBC_SHA384 => 0xc02a,
        TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 => 0xc02b,
        TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384 => 0xc02c,
        TLS_ECDH_ECDSA_WITH_AES_128_GCM_SHA256 => 0xc02d,
        TLS_ECDH_ECDSA_WITH_AES_256_GCM_SHA384 => 0xc02e,
        TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256 => 0xc02f,
        TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384 => 0xc030,
        TLS_ECDH_RSA_WITH_AES_128_GCM_SHA256 => 0xc031,
        TLS_ECDH_RSA_WITH_AES_256_GCM_SHA384 => 0xc032,
        TLS_ECDHE_PSK_WITH_RC4_128_SHA => 0xc033,
        TLS_ECDHE_PSK_WITH_3DES_EDE_CBC_SHA => 0xc034,
        TLS_ECDHE_PSK_WITH_AES_128_CBC_SHA => 0xc035,
        TLS_ECDHE_PSK_WITH_AES_256_CBC_SHA => 0xc036,
        TLS_ECDHE_PSK_WITH_AES_128_CBC_SHA256 => 0xc037,
        TLS_ECDHE_PSK_WITH_AES_256_CBC_SHA384 => 0xc038,
        TLS_ECDHE_PSK_WITH_NULL_SHA => 0xc039,
        TLS_ECDHE_PSK_WITH_NULL_SHA256 => 0xc03a,
        TLS_ECDHE_PSK_WITH_NULL_SHA384 => 0xc03b,
        TLS_RSA_WITH_AES_128_CCM => 0xc09c,
        TLS_RSA_WITH_AES_256_CCM => 0xc09d,
        TLS_DHE_RSA_WITH_AES_128_CCM => 0xc09e,
        TLS_DHE_RSA_WITH_AES_256_CCM => 0xc09f,
        TLS_RSA_WITH_AES_128_CCM_8 => 0xc0a0,
        TLS_RSA_WITH_AES_256_CCM_8 => 0xc0a1,
        TLS_DHE_RSA_WITH_AES_128_CCM_8 => 0xc0a2,
        TLS_DHE_RSA_WITH_AES_256_CCM_8 => 0xc0a3,
        TLS_PSK_WITH_AES_128_CCM => 0xc0a4,
        TLS_PSK_WITH_AES_256_CCM => 0xc0a5,
        TLS_DHE_PSK_WITH_AES_128_CCM => 0xc0a6,
        TLS_DHE_PSK_WITH_AES_256_CCM => 0xc0a7,
        TLS_PSK_WITH_AES_128_CCM_8 => 0xc0a8,
        TLS_PSK_WITH_AES_256_CCM_8 => 0xc0a9,
        TLS_PSK_DHE_WITH_AES_128_CCM_8 => 0xc0aa,
        TLS_PSK_DHE_WITH_AES_256_CCM_8 => 0xc0ab,
        TLS_ECDHE_ECDSA_WITH_AES_128_CCM => 0xc0ac,
        TLS_ECDHE_ECDSA_WITH_AES_256_CCM => 0xc0ad,
        TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8 => 0xc0ae,
        TLS_ECDHE_ECDSA_WITH_AES_256_CCM_8 => 0xc0af,
        TLS_ECCPWD_WITH_AES_128_GCM_SHA256 => 0xc0b0,
        TLS_ECCPWD_WITH_AES_256_GCM_SHA384 => 0xc0b1,
        TLS_ECCPWD_WITH_AES_128_CCM_SHA256 => 0xc0b2,
        TLS_ECCPWD_WITH_AES_256_CCM_SHA384 => 0xc0b3,
        TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256 => 0xcca8,
        TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256 => 0xcca9,
        TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256 => 0xccaa,
        TLS_PSK_WITH_CHACHA20_POLY1305_SHA256 => 0xccab,
        TLS_ECDHE_PSK_WITH_CHACHA20_POLY1305_SHA256 => 0xccac,
        TLS_DHE_PSK_WITH_CHACHA20_POLY1305_SHA256 => 0xccad,
        TLS_RSA_PSK_WITH_CHACHA20_POLY1305_SHA256 => 0xccae,
    }
}

/// How a cipher suite protects records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherCategory {
    /// No protection at all.
    Null,
    /// A stream cipher followed by a MAC.
    Stream,
    /// A CBC block cipher with MAC and padding.
    Block,
    /// An AEAD.
    Aead,
}

/// The bulk encryption algorithm of a suite.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkAlgorithm {
    /// Identity: the `NULL` of `TLS_RSA_WITH_NULL_SHA` and friends.
    Null,
    Rc4_40,
    Rc4_56,
    Rc4_128,
    DesCbc,
    TripleDesEdeCbc,
    Aes128Cbc,
    Aes256Cbc,
    Aes128Gcm,
    Aes256Gcm,
    /// AES-CCM with a 16-byte tag.
    Aes128Ccm,
    Aes256Ccm,
    /// AES-CCM with an 8-byte tag.
    Aes128Ccm8,
    Aes256Ccm8,
    ChaCha20Poly1305,
}

impl BulkAlgorithm {
    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            Self::Null => 0,
            Self::Rc4_40 => 5,
            Self::Rc4_56 => 7,
            Self::DesCbc => 8,
            Self::Rc4_128
            | Self::Aes128Cbc
            | Self::Aes128Gcm
            | Self::Aes128Ccm
            | Self::Aes128Ccm8 => 16,
            Self::TripleDesEdeCbc => 24,
            Self::Aes256Cbc
            | Self::Aes256Gcm
            | Self::Aes256Ccm
            | Self::Aes256Ccm8
            | Self::ChaCha20Poly1305 => 32,
        }
    }

    /// Block length for CBC ciphers; zero otherwise.
    pub fn block_len(self) -> usize {
        match self {
            Self::DesCbc | Self::TripleDesEdeCbc => 8,
            Self::Aes128Cbc | Self::Aes256Cbc => 16,
            _ => 0,
        }
    }

    /// AEAD tag length; zero for other ciphers.
    pub fn tag_len(self) -> usize {
        match self {
            Self::Aes128Ccm8 | Self::Aes256Ccm8 => 8,
            Self::Aes128Gcm | Self::Aes256Gcm | Self::Aes128Ccm | Self::Aes256Ccm => 16,
            Self::ChaCha20Poly1305 => 16,
            _ => 0,
        }
    }

    fn category(self) -> CipherCategory {
        match self {
            Self::Null | Self::Rc4_40 | Self::Rc4_56 | Self::Rc4_128 => CipherCategory::Stream,
            Self::DesCbc | Self::TripleDesEdeCbc | Self::Aes128Cbc | Self::Aes256Cbc => {
                CipherCategory::Block
            }
            Self::Aes128Gcm
            | Self::Aes256Gcm
            | Self::Aes128Ccm
            | Self::Aes256Ccm
            | Self::Aes128Ccm8
            | Self::Aes256Ccm8
            | Self::ChaCha20Poly1305 => CipherCategory::Aead,
        }
    }
}

/// The hash named in a suite, which selects the MAC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SuiteHash {
    None,
    Md5,
    Sha1,
    Sha256,
    Sha384,
}

/// Everything the record layer needs to know about a cipher suite under a
/// given protocol version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuiteParams {
    /// The suite this describes.
    pub suite: CipherSuite,
    /// The version this describes the suite under.
    pub version: ProtocolVersion,
    /// How records are protected.
    pub category: CipherCategory,
    /// The bulk cipher.
    pub bulk: BulkAlgorithm,
    /// Bulk cipher key length in bytes.
    pub key_len: usize,
    /// Length of the IV taken from the key material: the first CBC IV for
    /// chained-IV versions, or the fixed part of an AEAD nonce.
    pub fixed_iv_len: usize,
    /// Length of the per-record IV or nonce carried in each record.
    pub record_iv_len: usize,
    /// CBC block length, zero for other categories.
    pub block_len: usize,
    /// The record MAC.
    pub mac: MacAlgorithm,
    /// Length of the MAC appended to each record; zero for AEADs.
    pub mac_len: usize,
    /// Length of the AEAD tag appended to each record; zero otherwise.
    pub tag_len: usize,
}

impl SuiteParams {
    /// Describe `suite` under `version`.
    ///
    /// Combinations that no TLS version permits still resolve: RC4 under
    /// TLS 1.3 is a stream suite with an HMAC, a TLS 1.3 suite under
    /// TLS 1.2 is an AEAD with TLS 1.2 nonces.  Only code points absent
    /// from [`CipherSuite`] are an error.
    pub fn resolve(suite: CipherSuite, version: ProtocolVersion) -> Result<Self, Error> {
        use BulkAlgorithm::*;
        use CipherSuite::*;

        let (bulk, hash) = match suite {
            TLS_NULL_WITH_NULL_NULL
            | TLS_EMPTY_RENEGOTIATION_INFO_SCSV
            | TLS_FALLBACK_SCSV => return Ok(Self::null(suite, version)),

            TLS_RSA_WITH_NULL_MD5 => (Null, SuiteHash::Md5),
            TLS_RSA_WITH_NULL_SHA
            | TLS_PSK_WITH_NULL_SHA
            | TLS_DHE_PSK_WITH_NULL_SHA
            | TLS_RSA_PSK_WITH_NULL_SHA
            | TLS_ECDH_ECDSA_WITH_NULL_SHA
            | TLS_ECDHE_ECDSA_WITH_NULL_SHA
            | TLS_ECDH_RSA_WITH_NULL_SHA
            | TLS_ECDHE_RSA_WITH_NULL_SHA
            | TLS_ECDH_anon_WITH_NULL_SHA
            | TLS_ECDHE_PSK_WITH_NULL_SHA => (Null, SuiteHash::Sha1),
            TLS_RSA_WITH_NULL_SHA256
            | TLS_PSK_WITH_NULL_SHA256
            | TLS_DHE_PSK_WITH_NULL_SHA256
            | TLS_RSA_PSK_WITH_NULL_SHA256
            | TLS_ECDHE_PSK_WITH_NULL_SHA256 => (Null, SuiteHash::Sha256),
            TLS_PSK_WITH_NULL_SHA384
            | TLS_DHE_PSK_WITH_NULL_SHA384
            | TLS_RSA_PSK_WITH_NULL_SHA384
            | TLS_ECDHE_PSK_WITH_NULL_SHA384 => (Null, SuiteHash::Sha384),

            TLS_RSA_EXPORT_WITH_RC4_40_MD5 | TLS_DH_anon_EXPORT_WITH_RC4_40_MD5 => {
                (Rc4_40, SuiteHash::Md5)
            }
            TLS_RSA_EXPORT1024_WITH_RC4_56_MD5 => (Rc4_56, SuiteHash::Md5),
            TLS_RSA_EXPORT1024_WITH_RC4_56_SHA | TLS_DHE_DSS_EXPORT1024_WITH_RC4_56_SHA => {
                (Rc4_56, SuiteHash::Sha1)
            }
            TLS_RSA_WITH_RC4_128_MD5 | TLS_DH_anon_WITH_RC4_128_MD5 => {
                (Rc4_128, SuiteHash::Md5)
            }
            TLS_RSA_WITH_RC4_128_SHA
            | TLS_DHE_DSS_WITH_RC4_128_SHA
            | TLS_PSK_WITH_RC4_128_SHA
            | TLS_DHE_PSK_WITH_RC4_128_SHA
            | TLS_RSA_PSK_WITH_RC4_128_SHA
            | TLS_ECDH_ECDSA_WITH_RC4_128_SHA
            | TLS_ECDHE_ECDSA_WITH_RC4_128_SHA
            | TLS_ECDH_RSA_WITH_RC4_128_SHA
            | TLS_ECDHE_RSA_WITH_RC4_128_SHA
            | TLS_ECDH_anon_WITH_RC4_128_SHA
            | TLS_ECDHE_PSK_WITH_RC4_128_SHA => (Rc4_128, SuiteHash::Sha1),

            TLS_RSA_WITH_DES_CBC_SHA
            | TLS_DH_DSS_WITH_DES_CBC_SHA
            | TLS_DH_RSA_WITH_DES_CBC_SHA
            | TLS_DHE_DSS_WITH_DES_CBC_SHA
            | TLS_DHE_RSA_WITH_DES_CBC_SHA
            | TLS_DH_anon_WITH_DES_CBC_SHA
            | TLS_RSA_EXPORT1024_WITH_DES_CBC_SHA
            | TLS_DHE_DSS_EXPORT1024_WITH_DES_CBC_SHA => (DesCbc, SuiteHash::Sha1),
            TLS_RSA_WITH_3DES_EDE_CBC_SHA
            | TLS_DH_DSS_WITH_3DES_EDE_CBC_SHA
            | TLS_DH_RSA_WITH_3DES_EDE_CBC_SHA
            | TLS_DHE_DSS_WITH_3DES_EDE_CBC_SHA
            | TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA
            | TLS_DH_anon_WITH_3DES_EDE_CBC_SHA
            | TLS_PSK_WITH_3DES_EDE_CBC_SHA
            | TLS_DHE_PSK_WITH_3DES_EDE_CBC_SHA
            | TLS_RSA_PSK_WITH_3DES_EDE_CBC_SHA
            | TLS_ECDH_ECDSA_WITH_3DES_EDE_CBC_SHA
            | TLS_ECDHE_ECDSA_WITH_3DES_EDE_CBC_SHA
            | TLS_ECDH_RSA_WITH_3DES_EDE_CBC_SHA
            | TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA
            | TLS_ECDH_anon_WITH_3DES_EDE_CBC_SHA
            | TLS_SRP_SHA_WITH_3DES_EDE_CBC_SHA
            | TLS_SRP_SHA_RSA_WITH_3DES_EDE_CBC_SHA
            | TLS_SRP_SHA_DSS_WITH_3DES_EDE_CBC_SHA
            | TLS_ECDHE_PSK_WITH_3DES_EDE_CBC_SHA => (TripleDesEdeCbc, SuiteHash::Sha1),

            TLS_RSA_WITH_AES_128_CBC_SHA
            | TLS_DH_DSS_WITH_AES_128_CBC_SHA
            | TLS_DH_RSA_WITH_AES_128_CBC_SHA
            | TLS_DHE_DSS_WITH_AES_128_CBC_SHA
            | TLS_DHE_RSA_WITH_AES_128_CBC_SHA
            | TLS_DH_anon_WITH_AES_128_CBC_SHA
            | TLS_PSK_WITH_AES_128_CBC_SHA
            | TLS_DHE_PSK_WITH_AES_128_CBC_SHA
            | TLS_RSA_PSK_WITH_AES_128_CBC_SHA
            | TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA
            | TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA
            | TLS_ECDH_RSA_WITH_AES_128_CBC_SHA
            | TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA
            | TLS_ECDH_anon_WITH_AES_128_CBC_SHA
            | TLS_SRP_SHA_WITH_AES_128_CBC_SHA
            | TLS_SRP_SHA_RSA_WITH_AES_128_CBC_SHA
            | TLS_SRP_SHA_DSS_WITH_AES_128_CBC_SHA
            | TLS_ECDHE_PSK_WITH_AES_128_CBC_SHA => (Aes128Cbc, SuiteHash::Sha1),
            TLS_RSA_WITH_AES_256_CBC_SHA
            | TLS_DH_DSS_WITH_AES_256_CBC_SHA
            | TLS_DH_RSA_WITH_AES_256_CBC_SHA
            | TLS_DHE_DSS_WITH_AES_256_CBC_SHA
            | TLS_DHE_RSA_WITH_AES_256_CBC_SHA
            | TLS_DH_anon_WITH_AES_256_CBC_SHA
            | TLS_PSK_WITH_AES_256_CBC_SHA
            | TLS_DHE_PSK_WITH_AES_256_CBC_SHA
            | TLS_RSA_PSK_WITH_AES_256_CBC_SHA
            | TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA
            | TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA
            | TLS_ECDH_RSA_WITH_AES_256_CBC_SHA
            | TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA
            | TLS_ECDH_anon_WITH_AES_256_CBC_SHA
            | TLS_SRP_SHA_WITH_AES_256_CBC_SHA
            | TLS_SRP_SHA_RSA_WITH_AES_256_CBC_SHA
            | TLS_SRP_SHA_DSS_WITH_AES_256_CBC_SHA
            | TLS_ECDHE_PSK_WITH_AES_256_CBC_SHA => (Aes256Cbc, SuiteHash::Sha1),
            TLS_RSA_WITH_AES_128_CBC_SHA256
            | TLS_DH_DSS_WITH_AES_128_CBC_SHA256
            | TLS_DH_RSA_WITH_AES_128_CBC_SHA256
            | TLS_DHE_DSS_WITH_AES_128_CBC_SHA256
            | TLS_DHE_RSA_WITH_AES_128_CBC_SHA256
            | TLS_DH_anon_WITH_AES_128_CBC_SHA256
            | TLS_PSK_WITH_AES_128_CBC_SHA256
            | TLS_DHE_PSK_WITH_AES_128_CBC_SHA256
            | TLS_RSA_PSK_WITH_AES_128_CBC_SHA256
            | TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA256
            | TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256
            | TLS_ECDH_RSA_WITH_AES_128_CBC_SHA256
            | TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256
            | TLS_ECDHE_PSK_WITH_AES_128_CBC_SHA256 => (Aes128Cbc, SuiteHash::Sha256),
            TLS_RSA_WITH_AES_256_CBC_SHA256
            | TLS_DH_DSS_WITH_AES_256_CBC_SHA256
            | TLS_DH_RSA_WITH_AES_256_CBC_SHA256
            | TLS_DHE_DSS_WITH_AES_256_CBC_SHA256
            | TLS_DHE_RSA_WITH_AES_256_CBC_SHA256
            | TLS_DH_anon_WITH_AES_256_CBC_SHA256 => (Aes256Cbc, SuiteHash::Sha256),
            TLS_PSK_WITH_AES_256_CBC_SHA384
            | TLS_DHE_PSK_WITH_AES_256_CBC_SHA384
            | TLS_RSA_PSK_WITH_AES_256_CBC_SHA384
            | TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA384
            | TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384
            | TLS_ECDH_RSA_WITH_AES_256_CBC_SHA384
            | TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384
            | TLS_ECDHE_PSK_WITH_AES_256_CBC_SHA384 => (Aes256Cbc, SuiteHash::Sha384),

            TLS_RSA_WITH_AES_128_GCM_SHA256
            | TLS_DHE_RSA_WITH_AES_128_GCM_SHA256
            | TLS_DH_RSA_WITH_AES_128_GCM_SHA256
            | TLS_DHE_DSS_WITH_AES_128_GCM_SHA256
            | TLS_DH_DSS_WITH_AES_128_GCM_SHA256
            | TLS_DH_anon_WITH_AES_128_GCM_SHA256
            | TLS_PSK_WITH_AES_128_GCM_SHA256
            | TLS_DHE_PSK_WITH_AES_128_GCM_SHA256
            | TLS_RSA_PSK_WITH_AES_128_GCM_SHA256
            | TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256
            | TLS_ECDH_ECDSA_WITH_AES_128_GCM_SHA256
            | TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256
            | TLS_ECDH_RSA_WITH_AES_128_GCM_SHA256
            | TLS_ECCPWD_WITH_AES_128_GCM_SHA256
            | TLS13_AES_128_GCM_SHA256 => (Aes128Gcm, SuiteHash::None),
            TLS_RSA_WITH_AES_256_GCM_SHA384
            | TLS_DHE_RSA_WITH_AES_256_GCM_SHA384
            | TLS_DH_RSA_WITH_AES_256_GCM_SHA384
            | TLS_DHE_DSS_WITH_AES_256_GCM_SHA384
            | TLS_DH_DSS_WITH_AES_256_GCM_SHA384
            | TLS_DH_anon_WITH_AES_256_GCM_SHA384
            | TLS_PSK_WITH_AES_256_GCM_SHA384
            | TLS_DHE_PSK_WITH_AES_256_GCM_SHA384
            | TLS_RSA_PSK_WITH_AES_256_GCM_SHA384
            | TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384
            | TLS_ECDH_ECDSA_WITH_AES_256_GCM_SHA384
            | TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384
            | TLS_ECDH_RSA_WITH_AES_256_GCM_SHA384
            | TLS_ECCPWD_WITH_AES_256_GCM_SHA384
            | TLS_CECPQ1_RSA_WITH_AES_256_GCM_SHA384
            | TLS_CECPQ1_ECDSA_WITH_AES_256_GCM_SHA384
            | TLS13_AES_256_GCM_SHA384 => (Aes256Gcm, SuiteHash::None),

            TLS_RSA_WITH_AES_128_CCM
            | TLS_DHE_RSA_WITH_AES_128_CCM
            | TLS_PSK_WITH_AES_128_CCM
            | TLS_DHE_PSK_WITH_AES_128_CCM
            | TLS_ECDHE_ECDSA_WITH_AES_128_CCM
            | TLS_ECCPWD_WITH_AES_128_CCM_SHA256
            | TLS13_AES_128_CCM_SHA256 => (Aes128Ccm, SuiteHash::None),
            TLS_RSA_WITH_AES_256_CCM
            | TLS_DHE_RSA_WITH_AES_256_CCM
            | TLS_PSK_WITH_AES_256_CCM
            | TLS_DHE_PSK_WITH_AES_256_CCM
            | TLS_ECDHE_ECDSA_WITH_AES_256_CCM
            | TLS_ECCPWD_WITH_AES_256_CCM_SHA384 => (Aes256Ccm, SuiteHash::None),
            TLS_RSA_WITH_AES_128_CCM_8
            | TLS_DHE_RSA_WITH_AES_128_CCM_8
            | TLS_PSK_WITH_AES_128_CCM_8
            | TLS_PSK_DHE_WITH_AES_128_CCM_8
            | TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8
            | TLS13_AES_128_CCM_8_SHA256 => (Aes128Ccm8, SuiteHash::None),
            TLS_RSA_WITH_AES_256_CCM_8
            | TLS_DHE_RSA_WITH_AES_256_CCM_8
            | TLS_PSK_WITH_AES_256_CCM_8
            | TLS_PSK_DHE_WITH_AES_256_CCM_8
            | TLS_ECDHE_ECDSA_WITH_AES_256_CCM_8 => (Aes256Ccm8, SuiteHash::None),

            TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256
            | TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256
            | TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256
            | TLS_PSK_WITH_CHACHA20_POLY1305_SHA256
            | TLS_ECDHE_PSK_WITH_CHACHA20_POLY1305_SHA256
            | TLS_DHE_PSK_WITH_CHACHA20_POLY1305_SHA256
            | TLS_RSA_PSK_WITH_CHACHA20_POLY1305_SHA256
            | TLS_CECPQ1_RSA_WITH_CHACHA20_POLY1305_SHA256
            | TLS_CECPQ1_ECDSA_WITH_CHACHA20_POLY1305_SHA256
            | TLS13_CHACHA20_POLY1305_SHA256 => (ChaCha20Poly1305, SuiteHash::None),

            CipherSuite::Unknown(_) => return Err(Error::UnknownCipherSuite(suite)),
        };

        let category = bulk.category();
        let mac = match category {
            CipherCategory::Aead => MacAlgorithm::Null,
            _ => mac_for(hash, version),
        };

        // RFC 7905 ChaCha20-Poly1305 nonces are implicit even before TLS 1.3
        let (fixed_iv_len, record_iv_len) = match (category, bulk) {
            (CipherCategory::Block, _) if version.uses_explicit_iv() => (0, bulk.block_len()),
            (CipherCategory::Block, _) => (bulk.block_len(), 0),
            (CipherCategory::Aead, _) if version.is_tls13() => (12, 0),
            (CipherCategory::Aead, ChaCha20Poly1305) => (12, 0),
            (CipherCategory::Aead, _) => (4, 8),
            _ => (0, 0),
        };

        Ok(Self {
            suite,
            version,
            category,
            bulk,
            key_len: bulk.key_len(),
            fixed_iv_len,
            record_iv_len,
            block_len: bulk.block_len(),
            mac,
            mac_len: mac.output_len(),
            tag_len: bulk.tag_len(),
        })
    }

    pub(crate) fn null(suite: CipherSuite, version: ProtocolVersion) -> Self {
        Self {
            suite,
            version,
            category: CipherCategory::Null,
            bulk: BulkAlgorithm::Null,
            key_len: 0,
            fixed_iv_len: 0,
            record_iv_len: 0,
            block_len: 0,
            mac: MacAlgorithm::Null,
            mac_len: 0,
            tag_len: 0,
        }
    }
}

fn mac_for(hash: SuiteHash, version: ProtocolVersion) -> MacAlgorithm {
    match (hash, version.is_ssl()) {
        (SuiteHash::None, _) => MacAlgorithm::Null,
        (SuiteHash::Md5, true) => MacAlgorithm::SslMd5,
        (SuiteHash::Sha1, true) => MacAlgorithm::SslSha1,
        (SuiteHash::Md5, false) => MacAlgorithm::HmacMd5,
        (SuiteHash::Sha1, false) => MacAlgorithm::HmacSha1,
        (SuiteHash::Sha256, _) => MacAlgorithm::HmacSha256,
        (SuiteHash::Sha384, _) => MacAlgorithm::HmacSha384,
    }
}
