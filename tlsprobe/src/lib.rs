//! # tlsprobe - a record protection layer for TLS testing
//!
//! tlsprobe turns logical TLS records (a content type and a payload) into
//! protected wire bytes and back again, for every protocol version from
//! SSLv2 up to TLS 1.3 and every cipher category: null, stream, CBC block
//! and AEAD.
//!
//! Unlike a TLS library meant for production traffic, tlsprobe is built to
//! *probe* other implementations.  That has some consequences:
//!
//! - Every intermediate value of the record pipeline (keys, authenticated
//!   metadata, MAC, padding, IVs, nonces, plaintext, ciphertext, tags) is
//!   recorded in a per-record [`ComputationTrace`] and can be overridden
//!   before the pipeline runs.  An override is used in place of the computed
//!   value, and later stages are computed from it.
//! - Protocol-invalid combinations, such as RC4 under TLS 1.3, are accepted
//!   and produce deterministic output instead of an error.
//! - Failed MAC, padding or AEAD tag checks are reported as flags on the
//!   decrypted record, never as errors, so a session can carry on after a
//!   deliberately broken record.
//!
//! Errors are reserved for genuine misuse: unknown cipher suite code points,
//! missing key material, keys or nonces of a length the primitive cannot
//! accept, and unknown epochs.
//!
//! ## Getting started
//!
//! ```
//! use tlsprobe::{ConnectionEnd, ContentType, ProtocolVersion, Record, RecordConfig};
//! use tlsprobe::crypto::{CipherSuite, DirectionKeys, KeyMaterial};
//! use tlsprobe::crypto::cipher::RecordCipher;
//!
//! let keys = KeyMaterial::new(
//!     DirectionKeys::new(vec![0xde; 16], vec![], vec![0xad; 20]),
//!     DirectionKeys::new(vec![0xbe; 16], vec![], vec![0xef; 20]),
//! );
//!
//! let mut client = RecordCipher::new(
//!     CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
//!     ProtocolVersion::TLSv1_2,
//!     ConnectionEnd::Client,
//!     keys.clone(),
//!     &RecordConfig::default(),
//! )
//! .unwrap();
//! let mut server = RecordCipher::new(
//!     CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
//!     ProtocolVersion::TLSv1_2,
//!     ConnectionEnd::Server,
//!     keys,
//!     &RecordConfig::default(),
//! )
//! .unwrap();
//!
//! let mut record = Record::new(
//!     ContentType::ApplicationData,
//!     ProtocolVersion::TLSv1_2,
//!     b"hello".to_vec(),
//! );
//! client.encrypt(&mut record).unwrap();
//!
//! let mut received = Record::from_fragment(
//!     ContentType::ApplicationData,
//!     ProtocolVersion::TLSv1_2,
//!     record.fragment.clone(),
//! );
//! let decrypted = server.decrypt(&mut received).unwrap();
//! assert!(decrypted.mac_ok);
//! assert_eq!(decrypted.cleartext, b"hello");
//! ```
//!
//! ## Crate features
//!
//! - `logging` (enabled by default): makes the crate log through the `log`
//!   crate.  Records are logged at `trace` level, cipher activation and
//!   epoch changes at `debug`, local recovery from malformed input at `warn`.

// Require docs for public APIs, deny unsafe code, etc.
#![forbid(unsafe_code, unused_must_use)]
#![deny(clippy::clone_on_ref_ptr, trivial_casts)]
#![warn(
    missing_docs,
    unreachable_pub,
    unused_import_braces,
    unused_extern_crates
)]
// Relax these clippy lints:
// - too_many_arguments: some things just need a lot of state, wrapping it
//   doesn't necessarily make it easier to follow what's going on
// - single_component_path_imports: our top-level `use log` import causes
//   a false positive, https://github.com/rust-lang/rust-clippy/issues/5210
// - new_without_default: for internal constructors, the indirection is not
//   helpful
#![allow(
    clippy::too_many_arguments,
    clippy::single_component_path_imports,
    clippy::new_without_default
)]

// log for logging (optional).
#[cfg(feature = "logging")]
use log;

#[cfg(not(feature = "logging"))]
#[macro_use]
mod log {
    macro_rules! trace    ( ($($tt:tt)*) => {{}} );
    macro_rules! debug    ( ($($tt:tt)*) => {{}} );
    macro_rules! warn     ( ($($tt:tt)*) => {{}} );
}

#[macro_use]
mod msgs;
mod chooser;
mod config;
mod enums;
mod error;
mod record;
mod record_layer;
mod trace;

/// Cipher suites, key material and the record ciphers themselves.
pub mod crypto;

pub use crate::chooser::{Chooser, Negotiated};
pub use crate::config::RecordConfig;
pub use crate::enums::{ConnectionEnd, ContentType, ProtocolVersion};
pub use crate::error::{Error, InvalidMessage};
pub use crate::msgs::{Codec, Reader};
pub use crate::record::{Record, MAX_FRAGMENT_LEN};
pub use crate::record_layer::RecordLayer;
pub use crate::trace::{ComputationTrace, Provenance, Traced};
