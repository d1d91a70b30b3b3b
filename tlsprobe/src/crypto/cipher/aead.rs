use aes_gcm::aead::generic_array::typenum::Unsigned;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm};
use ccm::consts::{U12, U16, U8};
use ccm::Ccm;
use chacha20poly1305::ChaCha20Poly1305;

use super::{make_metadata, CipherState, Decrypted};
use crate::config::RecordConfig;
use crate::crypto::suites::BulkAlgorithm;
use crate::enums::ContentType;
use crate::error::Error;
#[cfg(feature = "logging")]
use crate::log::{trace, warn};
use crate::msgs::u48;
use crate::record::Record;

/// Largest zero padding we add to a TLS 1.3 inner plaintext.
const MAX_TLS13_PADDING: usize = 0xffff;

/// AES-GCM, AES-CCM or ChaCha20-Poly1305.
///
/// TLS 1.3 records wrap the cleartext, its real content type and any
/// padding into the AEAD plaintext and go out as application data.
/// TLS 1.2 AES-GCM and AES-CCM records carry an explicit nonce (the
/// sequence number) in front of the ciphertext; ChaCha20-Poly1305 records
/// do not.  CCM_8 suites use an 8-byte tag, every other AEAD a 16-byte one.
pub struct AeadCipher {
    pub(crate) state: CipherState,
    algorithm: AeadAlgorithm,
    additional_padding: usize,
}

impl AeadCipher {
    pub(crate) fn new(state: CipherState, config: &RecordConfig) -> Result<Self, Error> {
        let algorithm = AeadAlgorithm::new(state.params.bulk)
            .ok_or(Error::UnknownCipherSuite(state.params.suite))?;

        for end in [state.end, state.end.peer()] {
            let keys = state.keys.write_keys(end);
            if keys.key().len() != state.params.key_len {
                return Err(Error::InvalidKeyLength {
                    what: "AEAD key",
                    actual: keys.key().len(),
                });
            }
            if keys.iv().len() != state.params.fixed_iv_len {
                return Err(Error::InvalidKeyLength {
                    what: "AEAD IV",
                    actual: keys.iv().len(),
                });
            }
        }

        Ok(Self {
            state,
            algorithm,
            additional_padding: config.additional_padding,
        })
    }

    fn is_tls13(&self) -> bool {
        self.state.params.version.is_tls13()
    }

    /// The counter that goes into the nonce.  DTLS puts the epoch in the
    /// top 16 bits.
    fn nonce_sequence(&self, record: &Record, seq: u64) -> u64 {
        match self.state.params.version.is_dtls() && !self.is_tls13() {
            true => {
                let epoch = record.epoch.unwrap_or(self.state.epoch);
                (u64::from(epoch) << 48) | (seq & u48::MAX)
            }
            false => seq,
        }
    }

    /// The explicit nonce, or nothing when this suite and version has none.
    fn explicit_nonce(&self, record: &mut Record, nonce_seq: u64) -> Vec<u8> {
        match self.state.params.record_iv_len {
            0 => Vec::new(),
            len => {
                let bytes = nonce_seq.to_be_bytes();
                let explicit = bytes[bytes.len().saturating_sub(len)..].to_vec();
                record.trace.explicit_nonce.record(explicit)
            }
        }
    }

    fn nonce(&self, record: &mut Record, salt: &[u8], explicit: &[u8], nonce_seq: u64) -> Vec<u8> {
        let nonce = match self.state.params.record_iv_len {
            0 => xor_nonce(salt, nonce_seq),
            _ => [salt, explicit].concat(),
        };
        record.trace.aead_nonce.record(nonce)
    }

    /// The record is left untouched, apart from its trace, unless sealing
    /// succeeds: a TLS 1.3 record keeps its real content type until then.
    pub(crate) fn encrypt(&mut self, record: &mut Record) -> Result<(), Error> {
        let seq = self.state.write_seq_for(record);
        let tag_len = self.state.params.tag_len;
        let keys = self.state.keys.write_keys(self.state.end);
        let key = record.trace.cipher_key.record(keys.key().to_vec());
        let salt = record.trace.aead_salt.record(keys.iv().to_vec());

        let plain = match self.is_tls13() {
            true => {
                let additional = self.additional_padding.min(MAX_TLS13_PADDING);
                if additional < self.additional_padding {
                    warn!(
                        "additional padding of {} clamped to {}",
                        self.additional_padding, additional
                    );
                }
                let additional = record
                    .trace
                    .additional_padding_length
                    .record(additional);
                let padding = record
                    .trace
                    .padding
                    .record(vec![0u8; additional]);
                let mut inner = record.cleartext.clone();
                inner.push(u8::from(record.content_type));
                inner.extend_from_slice(&padding);
                record.trace.plain_record_bytes.record(inner)
            }
            false => record
                .trace
                .plain_record_bytes
                .record(record.cleartext.clone()),
        };

        let nonce_seq = self.nonce_sequence(record, seq);
        let explicit = self.explicit_nonce(record, nonce_seq);
        let nonce = self.nonce(record, &salt, &explicit, nonce_seq);

        let (outer_type, aad_len) = match self.is_tls13() {
            true => (ContentType::ApplicationData, plain.len() + tag_len),
            false => (record.content_type, plain.len()),
        };
        let aad = make_metadata(
            self.state.params.version,
            outer_type,
            record.version,
            record.epoch.unwrap_or(self.state.epoch),
            seq,
            aad_len,
        );
        let aad = record
            .trace
            .authenticated_metadata
            .record(aad);

        let sealed = self
            .algorithm
            .seal(&key, &nonce, &aad, &plain)?;
        let (ciphertext, tag) = sealed.split_at(sealed.len() - tag_len);
        record
            .trace
            .authenticated_non_metadata
            .record(ciphertext.to_vec());
        let ciphertext = record
            .trace
            .ciphertext
            .record(ciphertext.to_vec());
        let tag = record
            .trace
            .authentication_tag
            .record(tag.to_vec());

        record.content_type = outer_type;
        record.fragment = [explicit, ciphertext, tag].concat();
        record.length = Some(record.fragment.len());
        self.state.wrote();
        Ok(())
    }

    pub(crate) fn decrypt(&mut self, record: &mut Record) -> Result<Decrypted, Error> {
        let seq = self.state.read_seq_for(record);
        let keys = self.state.keys.read_keys(self.state.end);
        let key = record.trace.cipher_key.record(keys.key().to_vec());
        let salt = record.trace.aead_salt.record(keys.iv().to_vec());
        let length = *record
            .length
            .get_or_insert(record.fragment.len());

        let explicit_len = self.state.params.record_iv_len;
        let tag_len = self.state.params.tag_len;
        if record.fragment.len() < explicit_len + tag_len {
            return Ok(self
                .state
                .give_up(record, Vec::new(), "too short for its nonce and tag"));
        }

        let fragment = record.fragment.clone();
        let (explicit, rest) = fragment.split_at(explicit_len);
        let (ciphertext, tag) = rest.split_at(rest.len() - tag_len);
        let explicit = match explicit_len {
            0 => Vec::new(),
            _ => record
                .trace
                .explicit_nonce
                .record(explicit.to_vec()),
        };
        let nonce_seq = self.nonce_sequence(record, seq);
        let nonce = self.nonce(record, &salt, &explicit, nonce_seq);

        let ciphertext = record
            .trace
            .ciphertext
            .record(ciphertext.to_vec());
        record
            .trace
            .authenticated_non_metadata
            .record(ciphertext.clone());
        let tag = record
            .trace
            .authentication_tag
            .record(tag.to_vec());

        let aad_len = match self.is_tls13() {
            true => length,
            false => ciphertext.len(),
        };
        let aad = self.state.metadata(record, seq, aad_len);
        let aad = record
            .trace
            .authenticated_metadata
            .record(aad);

        let Some(plain) = self
            .algorithm
            .open(&key, &nonce, &aad, &[ciphertext, tag].concat())?
        else {
            warn!("bad tag on {:?} record with seq {}", record.content_type, seq);
            record.trace.tag_valid = Some(false);
            record.cleartext = Vec::new();
            self.state.read();
            return Ok(Decrypted {
                cleartext: Vec::new(),
                mac_ok: false,
            });
        };
        record.trace.tag_valid = Some(true);
        let plain = record.trace.plain_record_bytes.record(plain);

        record.cleartext = match self.is_tls13() {
            true => match plain.iter().rposition(|&b| b != 0) {
                Some(type_at) => {
                    record.content_type = ContentType::from(plain[type_at]);
                    record
                        .trace
                        .padding
                        .record(plain[type_at + 1..].to_vec());
                    plain[..type_at].to_vec()
                }
                None => {
                    trace!("inner plaintext is all zeros");
                    plain
                }
            },
            false => plain,
        };
        self.state.read();

        Ok(Decrypted {
            cleartext: record.cleartext.clone(),
            mac_ok: true,
        })
    }
}

/// `iv` XOR (0^4 || seq), always 12 bytes long.
fn xor_nonce(iv: &[u8], seq: u64) -> Vec<u8> {
    let mut nonce = [0u8; 12];
    nonce[4..].copy_from_slice(&seq.to_be_bytes());
    nonce
        .iter_mut()
        .zip(iv)
        .for_each(|(n, iv)| *n ^= iv);
    nonce.to_vec()
}

// TLS uses 12-byte CCM nonces (RFC 6655)
type Aes128Ccm = Ccm<aes::Aes128, U16, U12>;
type Aes256Ccm = Ccm<aes::Aes256, U16, U12>;
type Aes128Ccm8 = Ccm<aes::Aes128, U8, U12>;
type Aes256Ccm8 = Ccm<aes::Aes256, U8, U12>;

#[derive(Clone, Copy, Debug)]
enum AeadAlgorithm {
    Aes128Gcm,
    Aes256Gcm,
    Aes128Ccm,
    Aes256Ccm,
    Aes128Ccm8,
    Aes256Ccm8,
    ChaCha20Poly1305,
}

impl AeadAlgorithm {
    fn new(bulk: BulkAlgorithm) -> Option<Self> {
        match bulk {
            BulkAlgorithm::Aes128Gcm => Some(Self::Aes128Gcm),
            BulkAlgorithm::Aes256Gcm => Some(Self::Aes256Gcm),
            BulkAlgorithm::Aes128Ccm => Some(Self::Aes128Ccm),
            BulkAlgorithm::Aes256Ccm => Some(Self::Aes256Ccm),
            BulkAlgorithm::Aes128Ccm8 => Some(Self::Aes128Ccm8),
            BulkAlgorithm::Aes256Ccm8 => Some(Self::Aes256Ccm8),
            BulkAlgorithm::ChaCha20Poly1305 => Some(Self::ChaCha20Poly1305),
            _ => None,
        }
    }

    /// Returns ciphertext || tag.
    fn seal(self, key: &[u8], nonce: &[u8], aad: &[u8], plain: &[u8]) -> Result<Vec<u8>, Error> {
        match self {
            Self::Aes128Gcm => seal_with::<Aes128Gcm>(key, nonce, aad, plain),
            Self::Aes256Gcm => seal_with::<Aes256Gcm>(key, nonce, aad, plain),
            Self::Aes128Ccm => seal_with::<Aes128Ccm>(key, nonce, aad, plain),
            Self::Aes256Ccm => seal_with::<Aes256Ccm>(key, nonce, aad, plain),
            Self::Aes128Ccm8 => seal_with::<Aes128Ccm8>(key, nonce, aad, plain),
            Self::Aes256Ccm8 => seal_with::<Aes256Ccm8>(key, nonce, aad, plain),
            Self::ChaCha20Poly1305 => seal_with::<ChaCha20Poly1305>(key, nonce, aad, plain),
        }
    }

    /// `Ok(None)` when the tag does not verify.
    fn open(
        self,
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        sealed: &[u8],
    ) -> Result<Option<Vec<u8>>, Error> {
        match self {
            Self::Aes128Gcm => open_with::<Aes128Gcm>(key, nonce, aad, sealed),
            Self::Aes256Gcm => open_with::<Aes256Gcm>(key, nonce, aad, sealed),
            Self::Aes128Ccm => open_with::<Aes128Ccm>(key, nonce, aad, sealed),
            Self::Aes256Ccm => open_with::<Aes256Ccm>(key, nonce, aad, sealed),
            Self::Aes128Ccm8 => open_with::<Aes128Ccm8>(key, nonce, aad, sealed),
            Self::Aes256Ccm8 => open_with::<Aes256Ccm8>(key, nonce, aad, sealed),
            Self::ChaCha20Poly1305 => open_with::<ChaCha20Poly1305>(key, nonce, aad, sealed),
        }
    }
}

fn aead_for<A: KeyInit + AeadCore>(key: &[u8], nonce: &[u8]) -> Result<A, Error> {
    let expected = <<A as AeadCore>::NonceSize as Unsigned>::USIZE;
    if nonce.len() != expected {
        return Err(Error::InvalidNonceLength {
            expected,
            actual: nonce.len(),
        });
    }
    A::new_from_slice(key).map_err(|_| Error::InvalidKeyLength {
        what: "AEAD key",
        actual: key.len(),
    })
}

fn seal_with<A: Aead + KeyInit>(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plain: &[u8],
) -> Result<Vec<u8>, Error> {
    aead_for::<A>(key, nonce)?
        .encrypt(Nonce::<A>::from_slice(nonce), Payload { msg: plain, aad })
        .map_err(|_| Error::PayloadTooLarge(plain.len()))
}

fn open_with<A: Aead + KeyInit>(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    sealed: &[u8],
) -> Result<Option<Vec<u8>>, Error> {
    Ok(aead_for::<A>(key, nonce)?
        .decrypt(Nonce::<A>::from_slice(nonce), Payload { msg: sealed, aad })
        .ok())
}
