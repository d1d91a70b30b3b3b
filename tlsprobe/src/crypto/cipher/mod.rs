//! Record protection: the [`RecordCipher`] enum and its variants.
//!
//! A `RecordCipher` is one direction-pair of record protection for one
//! epoch.  It owns its key material and the read and write sequence
//! counters, plus whatever state its cipher category needs across records:
//! keystream position for stream ciphers, the chained IV for SSLv3 and
//! TLS 1.0 CBC.  A new epoch always gets a new `RecordCipher`.

use rand_core::RngCore;

use crate::chooser::Chooser;
use crate::config::RecordConfig;
use crate::crypto::key::KeyMaterial;
use crate::crypto::suites::{CipherCategory, CipherSuite, SuiteParams};
use crate::enums::{ConnectionEnd, ProtocolVersion};
use crate::error::Error;
#[cfg(feature = "logging")]
use crate::log::{debug, trace, warn};
use crate::msgs::u48;
use crate::record::Record;

mod aad;
pub use aad::make_metadata;

mod aead;
mod block;
mod null;
mod stream;

pub use aead::AeadCipher;
pub use block::BlockCipher;
pub use null::NullCipher;
pub use stream::StreamCipher;

/// The outcome of decrypting one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decrypted {
    /// The recovered payload.  When integrity checks fail this is a best
    /// effort, possibly empty.
    pub cleartext: Vec<u8>,
    /// Whether the MAC (and CBC padding) or AEAD tag verified.
    pub mac_ok: bool,
}

/// Record protection for one epoch.
///
/// Dispatches to the variant for the cipher suite's category.
#[allow(clippy::large_enum_variant)]
pub enum RecordCipher {
    /// No protection; epoch 0.
    Null(NullCipher),
    /// RC4 (or a `NULL` bulk cipher) with a MAC.
    Stream(StreamCipher),
    /// CBC with MAC and padding.
    Block(BlockCipher),
    /// AES-GCM or ChaCha20-Poly1305.
    Aead(AeadCipher),
}

impl RecordCipher {
    /// Make a cipher for `suite` under `version`, as `end`.
    pub fn new(
        suite: CipherSuite,
        version: ProtocolVersion,
        end: ConnectionEnd,
        keys: KeyMaterial,
        config: &RecordConfig,
    ) -> Result<Self, Error> {
        Self::from_params(SuiteParams::resolve(suite, version)?, end, keys, config)
    }

    /// Make a cipher for the parameters `chooser` negotiated.
    pub fn from_chooser(
        chooser: &dyn Chooser,
        keys: KeyMaterial,
        config: &RecordConfig,
    ) -> Result<Self, Error> {
        Self::new(
            chooser.selected_cipher_suite(),
            chooser.selected_protocol_version(),
            chooser.connection_end(),
            keys,
            config,
        )
    }

    /// Make a cipher for already-resolved suite parameters.
    pub fn from_params(
        params: SuiteParams,
        end: ConnectionEnd,
        keys: KeyMaterial,
        config: &RecordConfig,
    ) -> Result<Self, Error> {
        keys.check_present(&params)?;
        debug!(
            "{:?} cipher for {:?} as {:?} under {:?}",
            params.category, params.suite, end, params.version
        );

        let state = CipherState::new(params, end, keys);
        Ok(match params.category {
            CipherCategory::Null => Self::Null(NullCipher::new(state)),
            CipherCategory::Stream => Self::Stream(StreamCipher::new(state)?),
            CipherCategory::Block => Self::Block(BlockCipher::new(state, config)?),
            CipherCategory::Aead => Self::Aead(AeadCipher::new(state, config)?),
        })
    }

    /// The cipher in force before any key activation.
    pub fn null(version: ProtocolVersion, end: ConnectionEnd) -> Self {
        Self::Null(NullCipher::new(CipherState::new(
            SuiteParams::null(CipherSuite::TLS_NULL_WITH_NULL_NULL, version),
            end,
            KeyMaterial::default(),
        )))
    }

    /// Protect `record.cleartext` into `record.fragment`.
    ///
    /// Advances the write sequence counter on success.  Integrity problems
    /// never make this fail; errors mean key material or an overridden
    /// value cannot be used by the primitive at all.  After an error only
    /// the record's trace differs from what was passed in.
    pub fn encrypt(&mut self, record: &mut Record) -> Result<(), Error> {
        let requested_seq = record.sequence_number;
        record.trace.reset_computed();
        trace!(
            "encrypting {:?} record of {} bytes with write seq {}",
            record.content_type,
            record.cleartext.len(),
            record
                .sequence_number
                .unwrap_or(self.state().write_seq.get())
        );
        let result = match self {
            Self::Null(c) => c.encrypt(record),
            Self::Stream(c) => c.encrypt(record),
            Self::Block(c) => c.encrypt(record),
            Self::Aead(c) => c.encrypt(record),
        };
        if result.is_err() {
            record.sequence_number = requested_seq;
        }
        result
    }

    /// Unprotect `record.fragment` into `record.cleartext`.
    ///
    /// Advances the read sequence counter on success.  A bad MAC, padding
    /// or tag is reported in [`Decrypted::mac_ok`] and the record's trace.
    pub fn decrypt(&mut self, record: &mut Record) -> Result<Decrypted, Error> {
        record.trace.reset_computed();
        trace!(
            "decrypting {:?} record of {} bytes with read seq {}",
            record.content_type,
            record.fragment.len(),
            record
                .sequence_number
                .unwrap_or(self.state().read_seq.get())
        );
        match self {
            Self::Null(c) => c.decrypt(record),
            Self::Stream(c) => c.decrypt(record),
            Self::Block(c) => c.decrypt(record),
            Self::Aead(c) => c.decrypt(record),
        }
    }

    /// MAC `data` with `sender`'s write MAC secret, without any metadata.
    pub fn compute_mac(&self, data: &[u8], sender: ConnectionEnd) -> Result<Vec<u8>, Error> {
        let state = self.state();
        state
            .params
            .mac
            .sign(state.keys.keys_of(sender).mac_secret(), data)
    }

    /// Use `rng` for explicit CBC IVs.  Other ciphers have no use for it.
    pub fn set_iv_source(&mut self, rng: Box<dyn RngCore + Send>) {
        if let Self::Block(c) = self {
            c.set_iv_source(rng);
        }
    }

    /// The resolved suite parameters.
    pub fn params(&self) -> &SuiteParams {
        &self.state().params
    }

    /// The cipher category.
    pub fn category(&self) -> CipherCategory {
        self.state().params.category
    }

    /// The protocol version records are protected for.
    pub fn version(&self) -> ProtocolVersion {
        self.state().params.version
    }

    /// Our side of the connection.
    pub fn connection_end(&self) -> ConnectionEnd {
        self.state().end
    }

    /// The keys this cipher was made with.
    pub fn key_material(&self) -> &KeyMaterial {
        &self.state().keys
    }

    /// The epoch this cipher protects.
    pub fn epoch(&self) -> u16 {
        self.state().epoch
    }

    pub(crate) fn set_epoch(&mut self, epoch: u16) {
        self.state_mut().epoch = epoch;
    }

    /// The sequence number the next encrypted record gets.
    pub fn write_sequence_number(&self) -> u64 {
        self.state().write_seq.get()
    }

    /// Set the sequence number the next encrypted record gets.
    pub fn set_write_sequence_number(&mut self, seq: u64) {
        self.state_mut().write_seq.set(seq);
    }

    /// The sequence number the next decrypted record gets.
    pub fn read_sequence_number(&self) -> u64 {
        self.state().read_seq.get()
    }

    /// Set the sequence number the next decrypted record gets.
    pub fn set_read_sequence_number(&mut self, seq: u64) {
        self.state_mut().read_seq.set(seq);
    }

    fn state(&self) -> &CipherState {
        match self {
            Self::Null(c) => &c.state,
            Self::Stream(c) => &c.state,
            Self::Block(c) => &c.state,
            Self::Aead(c) => &c.state,
        }
    }

    fn state_mut(&mut self) -> &mut CipherState {
        match self {
            Self::Null(c) => &mut c.state,
            Self::Stream(c) => &mut c.state,
            Self::Block(c) => &mut c.state,
            Self::Aead(c) => &mut c.state,
        }
    }
}

/// A per-direction record counter.
///
/// DTLS carries 48-bit sequence numbers, everything else 64-bit ones.
/// Counting past the top wraps to zero.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SequenceNumber {
    next: u64,
    max: u64,
}

impl SequenceNumber {
    fn new(version: ProtocolVersion) -> Self {
        Self {
            next: 0,
            max: match version.is_dtls() {
                true => u48::MAX,
                false => u64::MAX,
            },
        }
    }

    pub(crate) fn get(&self) -> u64 {
        self.next
    }

    fn set(&mut self, seq: u64) {
        self.next = seq & self.max;
    }

    fn advance(&mut self) {
        if self.next == self.max {
            warn!("sequence number wrapped");
            self.next = 0;
        } else {
            self.next += 1;
        }
    }
}

/// What every cipher variant holds.
pub(crate) struct CipherState {
    pub(crate) params: SuiteParams,
    pub(crate) end: ConnectionEnd,
    pub(crate) keys: KeyMaterial,
    pub(crate) epoch: u16,
    pub(crate) write_seq: SequenceNumber,
    pub(crate) read_seq: SequenceNumber,
}

impl CipherState {
    pub(crate) fn new(params: SuiteParams, end: ConnectionEnd, keys: KeyMaterial) -> Self {
        Self {
            params,
            end,
            keys,
            epoch: 0,
            write_seq: SequenceNumber::new(params.version),
            read_seq: SequenceNumber::new(params.version),
        }
    }

    /// The sequence number `record` is written with, noted in the record.
    pub(crate) fn write_seq_for(&self, record: &mut Record) -> u64 {
        let seq = record
            .sequence_number
            .unwrap_or(self.write_seq.get());
        record.sequence_number = Some(seq);
        seq
    }

    /// The sequence number `record` is read with, noted in the record.
    pub(crate) fn read_seq_for(&self, record: &mut Record) -> u64 {
        let seq = record
            .sequence_number
            .unwrap_or(self.read_seq.get());
        record.sequence_number = Some(seq);
        seq
    }

    pub(crate) fn wrote(&mut self) {
        self.write_seq.advance();
    }

    pub(crate) fn read(&mut self) {
        self.read_seq.advance();
    }

    /// The authenticated metadata for `record`, MACing `len` bytes.
    pub(crate) fn metadata(&self, record: &Record, seq: u64, len: usize) -> Vec<u8> {
        make_metadata(
            self.params.version,
            record.content_type,
            record.version,
            record.epoch.unwrap_or(self.epoch),
            seq,
            len,
        )
    }

    /// Finish a decryption whose input was too malformed to check.
    ///
    /// `cleartext` becomes the record's payload and every check that did
    /// not get to run is marked failed.
    pub(crate) fn give_up(&mut self, record: &mut Record, cleartext: Vec<u8>, why: &str) -> Decrypted {
        warn!(
            "{:?} record with seq {:?} not checked: {}",
            record.content_type, record.sequence_number, why
        );
        record.cleartext = cleartext;
        let trace = &mut record.trace;
        match self.params.category {
            CipherCategory::Aead => trace.tag_valid = Some(false),
            CipherCategory::Block => {
                trace.mac_valid = Some(false);
                if trace.padding_valid.is_none() {
                    trace.padding_valid = Some(false);
                }
            }
            _ => trace.mac_valid = Some(false),
        }
        self.read();
        Decrypted {
            cleartext: record.cleartext.clone(),
            mac_ok: false,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::crypto::key::DirectionKeys;
    use crate::enums::ContentType;

    /// Both directions use the same keys, so a client and a server cipher
    /// made from these can talk to each other either way.
    pub(crate) fn symmetric_keys(key: &[u8], iv: &[u8], mac_secret: &[u8]) -> KeyMaterial {
        KeyMaterial::new(
            DirectionKeys::new(key.to_vec(), iv.to_vec(), mac_secret.to_vec()),
            DirectionKeys::new(key.to_vec(), iv.to_vec(), mac_secret.to_vec()),
        )
    }

    /// An RNG producing a fixed byte over and over.
    pub(crate) struct FixedRng(pub(crate) u8);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            u32::from_be_bytes([self.0; 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_be_bytes([self.0; 8])
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn sequence_numbers_wrap_within_width() {
        let mut tls = SequenceNumber::new(ProtocolVersion::TLSv1_2);
        tls.set(u64::MAX);
        tls.advance();
        assert_eq!(tls.get(), 0);

        let mut dtls = SequenceNumber::new(ProtocolVersion::DTLSv1_2);
        dtls.set(u64::MAX);
        assert_eq!(dtls.get(), u48::MAX);
        dtls.advance();
        assert_eq!(dtls.get(), 0);
    }

    #[test]
    fn explicit_sequence_number_still_advances_counter() {
        let mut cipher = RecordCipher::null(ProtocolVersion::TLSv1_2, ConnectionEnd::Client);
        let mut record = Record::new(ContentType::Handshake, ProtocolVersion::TLSv1_2, vec![1])
            .with_sequence_number(77);
        cipher.encrypt(&mut record).unwrap();
        assert_eq!(record.sequence_number, Some(77));
        assert_eq!(cipher.write_sequence_number(), 1);

        let mut next = Record::new(ContentType::Handshake, ProtocolVersion::TLSv1_2, vec![1]);
        cipher.encrypt(&mut next).unwrap();
        assert_eq!(next.sequence_number, Some(1));
        assert_eq!(cipher.write_sequence_number(), 2);
        assert_eq!(cipher.read_sequence_number(), 0);
    }

    #[test]
    fn counters_can_be_set() {
        let mut cipher = RecordCipher::null(ProtocolVersion::TLSv1_2, ConnectionEnd::Server);
        cipher.set_write_sequence_number(10);
        cipher.set_read_sequence_number(20);
        let mut record = Record::new(ContentType::Alert, ProtocolVersion::TLSv1_2, vec![2, 0]);
        cipher.encrypt(&mut record).unwrap();
        assert_eq!(record.sequence_number, Some(10));
        let mut received = Record::from_fragment(ContentType::Alert, ProtocolVersion::TLSv1_2, vec![2, 0]);
        cipher.decrypt(&mut received).unwrap();
        assert_eq!(received.sequence_number, Some(20));
        assert_eq!(cipher.read_sequence_number(), 21);
    }

    #[test]
    fn unknown_suite_is_an_error() {
        let err = RecordCipher::new(
            CipherSuite::Unknown(0x0a0a),
            ProtocolVersion::TLSv1_2,
            ConnectionEnd::Client,
            KeyMaterial::default(),
            &RecordConfig::default(),
        )
        .err();
        assert_eq!(err, Some(Error::UnknownCipherSuite(CipherSuite::Unknown(0x0a0a))));
    }

    #[test]
    fn missing_keys_are_an_error() {
        let err = RecordCipher::new(
            CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
            ProtocolVersion::TLSv1_2,
            ConnectionEnd::Client,
            KeyMaterial::default(),
            &RecordConfig::default(),
        )
        .err();
        assert_eq!(err, Some(Error::MissingKeyMaterial("client write key")));
    }

    #[test]
    fn ciphers_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<RecordCipher>();
    }
}
