use core::fmt;
use std::error::Error as StdError;

use crate::crypto::CipherSuite;

/// tlsprobe reports configuration and misuse errors using this type.
///
/// Failed integrity checks are not errors: they are reported through
/// the `mac_ok` flag of a decrypted record and the validity flags of its
/// [`ComputationTrace`](crate::ComputationTrace).
#[non_exhaustive]
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// The cipher suite code point is not one we know how to protect
    /// records with.
    UnknownCipherSuite(CipherSuite),

    /// Key material needed by the cipher suite was empty.
    MissingKeyMaterial(&'static str),

    /// A key, IV or MAC secret has a length the primitive cannot accept.
    InvalidKeyLength {
        /// Which value was wrong
        what: &'static str,
        /// The length we were given
        actual: usize,
    },

    /// An AEAD nonce (possibly overridden) has the wrong length.
    InvalidNonceLength {
        /// The length the algorithm needs
        expected: usize,
        /// The length we were given
        actual: usize,
    },

    /// No cipher is registered for this epoch.
    UnknownEpoch(u16),

    /// All 65536 epochs have been used.
    EpochsExhausted,

    /// A record fragment is larger than its 16-bit length field can carry.
    PayloadTooLarge(usize),

    /// Record framing could not be decoded.
    InvalidMessage(InvalidMessage),
}

/// A corrupt TLS record header or fragment.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidMessage {
    /// Message is shorter than the expected length
    MessageTooShort,
    /// Missing data for the named value
    MissingData(&'static str),
    /// Trailing data found for the named value
    TrailingData(&'static str),
}

impl From<InvalidMessage> for Error {
    #[inline]
    fn from(e: InvalidMessage) -> Self {
        Self::InvalidMessage(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UnknownCipherSuite(ref suite) => {
                write!(f, "unknown cipher suite {:?}", suite)
            }
            Self::MissingKeyMaterial(what) => write!(f, "missing key material: {}", what),
            Self::InvalidKeyLength { what, actual } => {
                write!(f, "invalid {} length {}", what, actual)
            }
            Self::InvalidNonceLength { expected, actual } => write!(
                f,
                "invalid nonce length {} (expected {})",
                actual, expected
            ),
            Self::UnknownEpoch(epoch) => write!(f, "no cipher for epoch {}", epoch),
            Self::EpochsExhausted => write!(f, "no epochs left"),
            Self::PayloadTooLarge(len) => {
                write!(f, "payload of {} bytes does not fit a record", len)
            }
            Self::InvalidMessage(ref typ) => {
                write!(f, "received corrupt message of type {:?}", typ)
            }
        }
    }
}

impl StdError for Error {}
