use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{self, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand_core::{OsRng, RngCore};
use subtle::ConstantTimeEq;

use super::{CipherState, Decrypted};
use crate::config::RecordConfig;
use crate::crypto::suites::BulkAlgorithm;
use crate::enums::ProtocolVersion;
use crate::error::Error;
#[cfg(feature = "logging")]
use crate::log::{trace, warn};
use crate::record::Record;

/// Largest additional padding we add.  The padding length byte cannot
/// describe more.
const MAX_ADDITIONAL_PADDING: usize = 256;

/// A CBC block cipher with MAC and padding.
///
/// Under SSLv3 and TLS 1.0 the IV of each record is the last ciphertext
/// block of the previous one in the same direction, starting with the IV
/// from the key material.  Later versions send a fresh random IV in front
/// of each record.
pub struct BlockCipher {
    pub(crate) state: CipherState,
    algorithm: CbcAlgorithm,
    explicit_iv: bool,
    encrypt_then_mac: bool,
    additional_padding: usize,
    write_iv: Vec<u8>,
    read_iv: Vec<u8>,
    rng: Box<dyn RngCore + Send>,
}

impl BlockCipher {
    pub(crate) fn new(state: CipherState, config: &RecordConfig) -> Result<Self, Error> {
        let algorithm = CbcAlgorithm::new(state.params.bulk)
            .ok_or(Error::UnknownCipherSuite(state.params.suite))?;
        let explicit_iv = state.params.version.uses_explicit_iv();

        for end in [state.end, state.end.peer()] {
            let keys = state.keys.write_keys(end);
            if keys.key().len() != state.params.key_len {
                return Err(Error::InvalidKeyLength {
                    what: "CBC key",
                    actual: keys.key().len(),
                });
            }
            if !explicit_iv && keys.iv().len() != state.params.block_len {
                return Err(Error::InvalidKeyLength {
                    what: "CBC IV",
                    actual: keys.iv().len(),
                });
            }
        }

        let (write_iv, read_iv) = match explicit_iv {
            true => (Vec::new(), Vec::new()),
            false => (
                state.keys.write_keys(state.end).iv().to_vec(),
                state.keys.read_keys(state.end).iv().to_vec(),
            ),
        };

        Ok(Self {
            state,
            algorithm,
            explicit_iv,
            encrypt_then_mac: config.encrypt_then_mac,
            additional_padding: config.additional_padding,
            write_iv,
            read_iv,
            rng: Box::new(OsRng),
        })
    }

    pub(crate) fn set_iv_source(&mut self, rng: Box<dyn RngCore + Send>) {
        self.rng = rng;
    }

    pub(crate) fn encrypt(&mut self, record: &mut Record) -> Result<(), Error> {
        let seq = self.state.write_seq_for(record);
        let block_len = self.state.params.block_len;
        let keys = self.state.keys.write_keys(self.state.end);
        let key = record.trace.cipher_key.record(keys.key().to_vec());
        let mac_key = record
            .trace
            .mac_key
            .record(keys.mac_secret().to_vec());

        let iv = match self.explicit_iv {
            true => {
                let mut iv = vec![0u8; block_len];
                self.rng.fill_bytes(&mut iv);
                iv
            }
            false => self.write_iv.clone(),
        };
        let iv = record.trace.cbc_iv.record(iv);

        let additional = self.additional_padding.min(MAX_ADDITIONAL_PADDING);
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
        if additional % block_len != 0 {
            warn!("additional padding of {} is not a whole number of blocks", additional);
        }

        let (ciphertext, fragment) = match self.encrypt_then_mac {
            false => {
                let non_metadata = record
                    .trace
                    .authenticated_non_metadata
                    .record(record.cleartext.clone());
                // TLS 1.3 covers the length of the fragment as framed
                let metadata_len = match self.state.params.version.is_tls13() {
                    true => {
                        let iv_len = match self.explicit_iv {
                            true => iv.len(),
                            false => 0,
                        };
                        let body = non_metadata.len() + self.state.params.mac_len;
                        iv_len + body + padding_len(block_len, body, additional)
                    }
                    false => non_metadata.len(),
                };
                let metadata = self
                    .state
                    .metadata(record, seq, metadata_len);
                let metadata = record
                    .trace
                    .authenticated_metadata
                    .record(metadata);
                let mac = self
                    .state
                    .params
                    .mac
                    .sign(&mac_key, &[metadata, non_metadata].concat())?;
                let mac = record.trace.mac.record(mac);

                let padding = record.trace.padding.record(padding(
                    block_len,
                    record.cleartext.len() + mac.len(),
                    additional,
                ));
                let plain = record
                    .trace
                    .plain_record_bytes
                    .record([record.cleartext.as_slice(), &mac, &padding].concat());

                let ciphertext = self
                    .algorithm
                    .encrypt(&key, &iv, expand_to_block_len(plain, block_len))?;
                let ciphertext = record.trace.ciphertext.record(ciphertext);
                let fragment = match self.explicit_iv {
                    true => [iv.as_slice(), &ciphertext].concat(),
                    false => ciphertext.clone(),
                };
                (ciphertext, fragment)
            }
            true => {
                let padding = record.trace.padding.record(padding(
                    block_len,
                    record.cleartext.len(),
                    additional,
                ));
                let plain = record
                    .trace
                    .plain_record_bytes
                    .record([record.cleartext.as_slice(), &padding].concat());

                let ciphertext = self
                    .algorithm
                    .encrypt(&key, &iv, expand_to_block_len(plain, block_len))?;
                let ciphertext = record.trace.ciphertext.record(ciphertext);

                let non_metadata = match self.explicit_iv {
                    true => [iv.as_slice(), &ciphertext].concat(),
                    false => ciphertext.clone(),
                };
                let non_metadata = record
                    .trace
                    .authenticated_non_metadata
                    .record(non_metadata);
                let metadata_len = match self.state.params.version.is_tls13() {
                    true => non_metadata.len() + self.state.params.mac_len,
                    false => non_metadata.len(),
                };
                let metadata = self
                    .state
                    .metadata(record, seq, metadata_len);
                let metadata = record
                    .trace
                    .authenticated_metadata
                    .record(metadata);
                let mac = self
                    .state
                    .params
                    .mac
                    .sign(&mac_key, &[metadata, non_metadata].concat())?;
                let mac = record.trace.mac.record(mac);
                let fragment = match self.explicit_iv {
                    true => [iv.as_slice(), &ciphertext, &mac].concat(),
                    false => [ciphertext.as_slice(), &mac].concat(),
                };
                (ciphertext, fragment)
            }
        };

        if !self.explicit_iv {
            chain(&mut self.write_iv, &ciphertext, block_len);
        }
        record.fragment = fragment;
        record.length = Some(record.fragment.len());
        self.state.wrote();
        Ok(())
    }

    pub(crate) fn decrypt(&mut self, record: &mut Record) -> Result<Decrypted, Error> {
        let seq = self.state.read_seq_for(record);
        let block_len = self.state.params.block_len;
        let mac_len = self.state.params.mac_len;
        let keys = self.state.keys.read_keys(self.state.end);
        let key = record.trace.cipher_key.record(keys.key().to_vec());
        let mac_key = record
            .trace
            .mac_key
            .record(keys.mac_secret().to_vec());
        let length = *record
            .length
            .get_or_insert(record.fragment.len());

        let fragment = record.fragment.clone();
        let iv_len = match self.explicit_iv {
            true => block_len,
            false => 0,
        };
        let trailer_len = match self.encrypt_then_mac {
            true => mac_len,
            false => 0,
        };
        if fragment.len() < iv_len + trailer_len {
            return Ok(self
                .state
                .give_up(record, fragment, "too short for its IV and MAC"));
        }

        let (explicit_iv, rest) = fragment.split_at(iv_len);
        let (ciphertext, trailing_mac) = rest.split_at(rest.len() - trailer_len);
        let iv = match self.explicit_iv {
            true => explicit_iv.to_vec(),
            false => self.read_iv.clone(),
        };
        let iv = record.trace.cbc_iv.record(iv);
        let ciphertext = record
            .trace
            .ciphertext
            .record(ciphertext.to_vec());
        if ciphertext.is_empty() || ciphertext.len() % block_len != 0 {
            return Ok(self
                .state
                .give_up(record, fragment, "not a whole number of blocks"));
        }

        let plain = self
            .algorithm
            .decrypt(&key, &iv, ciphertext.clone())?;
        if !self.explicit_iv {
            chain(&mut self.read_iv, &ciphertext, block_len);
        }
        let plain = record.trace.plain_record_bytes.record(plain);

        let Some(&last) = plain.last() else {
            return Ok(self
                .state
                .give_up(record, plain, "empty plaintext"));
        };
        let Some(unpadded_len) = plain.len().checked_sub(usize::from(last) + 1) else {
            return Ok(self
                .state
                .give_up(record, plain, "padding longer than the record"));
        };
        let padding = record
            .trace
            .padding
            .record(plain[unpadded_len..].to_vec());
        let padding_ok = padding_valid(self.state.params.version, &padding);
        record.trace.padding_valid = Some(padding_ok);
        if !padding_ok {
            warn!("bad padding on {:?} record with seq {}", record.content_type, seq);
        }

        let (cleartext, received_mac, non_metadata) = match self.encrypt_then_mac {
            false => {
                let Some(clean_len) = unpadded_len.checked_sub(mac_len) else {
                    return Ok(self
                        .state
                        .give_up(record, plain, "no room for the MAC"));
                };
                let cleartext = plain[..clean_len].to_vec();
                let received_mac = plain[clean_len..unpadded_len].to_vec();
                (cleartext.clone(), received_mac, cleartext)
            }
            true => {
                let non_metadata = match self.explicit_iv {
                    true => [iv.as_slice(), &ciphertext].concat(),
                    false => ciphertext,
                };
                (plain[..unpadded_len].to_vec(), trailing_mac.to_vec(), non_metadata)
            }
        };

        let received_mac = record.trace.mac.record(received_mac);
        let non_metadata = record
            .trace
            .authenticated_non_metadata
            .record(non_metadata);
        let metadata_len = match self.state.params.version.is_tls13() {
            true => length,
            false => non_metadata.len(),
        };
        let metadata = self
            .state
            .metadata(record, seq, metadata_len);
        let metadata = record
            .trace
            .authenticated_metadata
            .record(metadata);
        let expected = self
            .state
            .params
            .mac
            .sign(&mac_key, &[metadata, non_metadata].concat())?;
        let mac_ok = bool::from(expected.ct_eq(&received_mac));
        if !mac_ok {
            warn!("bad MAC on {:?} record with seq {}", record.content_type, seq);
        }
        record.trace.mac_valid = Some(mac_ok);
        record.cleartext = cleartext;
        self.state.read();

        Ok(Decrypted {
            cleartext: record.cleartext.clone(),
            mac_ok: mac_ok && padding_ok,
        })
    }
}

/// `n` bytes of value `n - 1`, where `n` fills `len` up to the next block
/// boundary plus `additional` bytes.
fn padding(block_len: usize, len: usize, additional: usize) -> Vec<u8> {
    let n = padding_len(block_len, len, additional);
    vec![(n - 1) as u8; n]
}

fn padding_len(block_len: usize, len: usize, additional: usize) -> usize {
    block_len - len % block_len + additional
}

/// SSLv3 leaves padding content unspecified, so only its length is checked.
fn padding_valid(version: ProtocolVersion, padding: &[u8]) -> bool {
    let Some(&last) = padding.last() else {
        return false;
    };
    match version.is_ssl() {
        true => padding.len() == usize::from(last) + 1,
        false => padding
            .iter()
            .all(|&b| usize::from(b) == padding.len() - 1),
    }
}

/// Zero-extend `plain` to a whole number of blocks.  Only an overridden
/// plaintext or padding can leave it short.
fn expand_to_block_len(mut plain: Vec<u8>, block_len: usize) -> Vec<u8> {
    let rem = plain.len() % block_len;
    if rem != 0 {
        trace!("zero-extending {} byte plaintext to block length", plain.len());
        plain.resize(plain.len() + block_len - rem, 0);
    }
    plain
}

/// The next implicit IV is the last ciphertext block.
fn chain(iv: &mut Vec<u8>, ciphertext: &[u8], block_len: usize) {
    if let Some(start) = ciphertext.len().checked_sub(block_len) {
        *iv = ciphertext[start..].to_vec();
    }
}

#[derive(Clone, Copy, Debug)]
enum CbcAlgorithm {
    Des,
    TripleDes,
    Aes128,
    Aes256,
}

impl CbcAlgorithm {
    fn new(bulk: BulkAlgorithm) -> Option<Self> {
        match bulk {
            BulkAlgorithm::DesCbc => Some(Self::Des),
            BulkAlgorithm::TripleDesEdeCbc => Some(Self::TripleDes),
            BulkAlgorithm::Aes128Cbc => Some(Self::Aes128),
            BulkAlgorithm::Aes256Cbc => Some(Self::Aes256),
            _ => None,
        }
    }

    fn encrypt(self, key: &[u8], iv: &[u8], data: Vec<u8>) -> Result<Vec<u8>, Error> {
        match self {
            Self::Des => cbc_encrypt::<des::Des>(key, iv, data),
            Self::TripleDes => cbc_encrypt::<des::TdesEde3>(key, iv, data),
            Self::Aes128 => cbc_encrypt::<aes::Aes128>(key, iv, data),
            Self::Aes256 => cbc_encrypt::<aes::Aes256>(key, iv, data),
        }
    }

    fn decrypt(self, key: &[u8], iv: &[u8], data: Vec<u8>) -> Result<Vec<u8>, Error> {
        match self {
            Self::Des => cbc_decrypt::<des::Des>(key, iv, data),
            Self::TripleDes => cbc_decrypt::<des::TdesEde3>(key, iv, data),
            Self::Aes128 => cbc_decrypt::<aes::Aes128>(key, iv, data),
            Self::Aes256 => cbc_decrypt::<aes::Aes256>(key, iv, data),
        }
    }
}

fn check_cbc_lengths<C: cipher::BlockCipher + cipher::KeyInit>(
    key: &[u8],
    iv: &[u8],
) -> Result<(), Error> {
    if iv.len() != C::block_size() {
        return Err(Error::InvalidKeyLength {
            what: "CBC IV",
            actual: iv.len(),
        });
    }
    if key.len() != C::key_size() {
        return Err(Error::InvalidKeyLength {
            what: "CBC key",
            actual: key.len(),
        });
    }
    Ok(())
}

/// `data` must be a whole number of blocks.
fn cbc_encrypt<C>(key: &[u8], iv: &[u8], mut data: Vec<u8>) -> Result<Vec<u8>, Error>
where
    C: cipher::BlockCipher + BlockEncryptMut + cipher::KeyInit,
{
    check_cbc_lengths::<C>(key, iv)?;
    let mut cbc = cbc::Encryptor::<C>::new_from_slices(key, iv).map_err(|_| {
        Error::InvalidKeyLength {
            what: "CBC key",
            actual: key.len(),
        }
    })?;
    for block in data.chunks_exact_mut(C::block_size()) {
        cbc.encrypt_block_mut(GenericArray::from_mut_slice(block));
    }
    Ok(data)
}

/// `data` must be a whole number of blocks.
fn cbc_decrypt<C>(key: &[u8], iv: &[u8], mut data: Vec<u8>) -> Result<Vec<u8>, Error>
where
    C: cipher::BlockCipher + BlockDecryptMut + cipher::KeyInit,
{
    check_cbc_lengths::<C>(key, iv)?;
    let mut cbc = cbc::Decryptor::<C>::new_from_slices(key, iv).map_err(|_| {
        Error::InvalidKeyLength {
            what: "CBC key",
            actual: key.len(),
        }
    })?;
    for block in data.chunks_exact_mut(C::block_size()) {
        cbc.decrypt_block_mut(GenericArray::from_mut_slice(block));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::cipher::tests::{symmetric_keys, FixedRng};
    use crate::crypto::cipher::RecordCipher;
    use crate::crypto::suites::CipherSuite;
    use crate::enums::{ConnectionEnd, ContentType};

    const CLEARTEXT: &[u8] = b"GET / HTTP/1.1\r\n";

    fn key() -> Vec<u8> {
        (0x00..0x10).collect()
    }

    fn explicit_iv() -> Vec<u8> {
        (0xa0..0xb0).collect()
    }

    fn implicit_iv() -> Vec<u8> {
        (0xf0..=0xff).collect()
    }

    fn aes128(version: ProtocolVersion, end: ConnectionEnd, config: &RecordConfig) -> RecordCipher {
        let mut cipher = RecordCipher::new(
            CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
            version,
            end,
            symmetric_keys(&key(), &implicit_iv(), &[0x11; 20]),
            config,
        )
        .unwrap();
        cipher.set_iv_source(Box::new(FixedRng(0x5a)));
        cipher
    }

    fn request(version: ProtocolVersion) -> Record {
        Record::new(ContentType::ApplicationData, version, CLEARTEXT.to_vec())
    }

    fn received(version: ProtocolVersion, fragment: &str) -> Record {
        Record::from_fragment(
            ContentType::ApplicationData,
            version,
            hex::decode(fragment).unwrap(),
        )
    }

    const TLS12_MTE: &str = "a0a1a2a3a4a5a6a7a8a9aaabacadaeaf21eb7791975dc3a22d7ef95758e9363a\
                             0cec376dfb641f2c256b70f4ba8994a0539182cace8abbcf3e7aa2f5dbdeeccc";
    const TLS12_ETM: &str = "a0a1a2a3a4a5a6a7a8a9aaabacadaeaf21eb7791975dc3a22d7ef95758e9363a\
                             c3cd8c0770fbef9e7a913e0a9035a760f6b5df7e80ccf0585de085093d32af45\
                             d73ba12d";

    #[test]
    fn explicit_iv_mac_then_encrypt() {
        let mut cipher = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Client, &RecordConfig::default());
        let mut record = request(ProtocolVersion::TLSv1_2);
        record.trace.cbc_iv.set_override(explicit_iv());
        cipher.encrypt(&mut record).unwrap();

        assert_eq!(
            hex::encode(record.trace.mac.resolve().unwrap()),
            "485dcfc87d642fda40f2f7f6c9c9794097ae2677"
        );
        assert_eq!(
            hex::encode(record.trace.authenticated_metadata.resolve().unwrap()),
            "00000000000000001703030010"
        );
        assert_eq!(record.trace.padding.resolve(), Some(&vec![0x0b; 12]));
        assert_eq!(record.trace.cbc_iv.computed(), Some(&vec![0x5a; 16]));
        assert_eq!(hex::encode(&record.fragment), TLS12_MTE);
        assert_eq!(record.length, Some(64));
    }

    #[test]
    fn explicit_iv_comes_from_iv_source() {
        let mut cipher = aes128(ProtocolVersion::TLSv1_1, ConnectionEnd::Client, &RecordConfig::default());
        let mut record = request(ProtocolVersion::TLSv1_1);
        cipher.encrypt(&mut record).unwrap();
        assert_eq!(&record.fragment[..16], &[0x5a; 16]);
        assert_eq!(record.fragment.len(), 64);
    }

    #[test]
    fn explicit_iv_round_trip() {
        let config = RecordConfig::default();
        let mut client = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Client, &config);
        let mut server = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Server, &config);

        for payload in [&b""[..], b"x", CLEARTEXT, &[7u8; 100]] {
            let mut record = Record::new(ContentType::ApplicationData, ProtocolVersion::TLSv1_2, payload.to_vec());
            client.encrypt(&mut record).unwrap();
            let mut wire =
                Record::from_fragment(ContentType::ApplicationData, ProtocolVersion::TLSv1_2, record.fragment);
            let decrypted = server.decrypt(&mut wire).unwrap();
            assert!(decrypted.mac_ok);
            assert_eq!(decrypted.cleartext, payload);
            assert_eq!(wire.trace.padding_valid, Some(true));
            assert_eq!(wire.trace.mac_valid, Some(true));
        }
    }

    #[test]
    fn decrypt_explicit_iv_vector() {
        let mut server = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Server, &RecordConfig::default());
        let mut record = received(ProtocolVersion::TLSv1_2, TLS12_MTE);
        let decrypted = server.decrypt(&mut record).unwrap();
        assert!(decrypted.mac_ok);
        assert_eq!(decrypted.cleartext, CLEARTEXT);
        assert_eq!(record.trace.cbc_iv.resolve(), Some(&explicit_iv()));
        assert_eq!(
            hex::encode(record.trace.mac.resolve().unwrap()),
            "485dcfc87d642fda40f2f7f6c9c9794097ae2677"
        );
    }

    #[test]
    fn implicit_iv_chains_across_records() {
        let config = RecordConfig::default();
        let mut client = aes128(ProtocolVersion::TLSv1_0, ConnectionEnd::Client, &config);
        let mut server = aes128(ProtocolVersion::TLSv1_0, ConnectionEnd::Server, &config);
        let expected = [
            (
                "c5297c12b19e4283b5eed24fc8c4eab1e04dbced",
                "9add75c54c284a584f55dd82168d5563498d20305c74f37fcbc6037bab808ae1\
                 dfd8f339889711fbad014590de92f350",
            ),
            (
                "9a3fc8b4e6f78d96a4df5f4652d1f2005d239461",
                "bfc1fc4273ab0c61cc6d32382fa7126d563d11b4d5a758060dd6aba5285d824b\
                 f2b29349957a5986a7548a13e4ef9302",
            ),
        ];

        for (mac, fragment) in expected {
            let mut record = request(ProtocolVersion::TLSv1_0);
            client.encrypt(&mut record).unwrap();
            assert_eq!(hex::encode(record.trace.mac.resolve().unwrap()), mac);
            assert_eq!(hex::encode(&record.fragment), fragment);

            let mut wire = received(ProtocolVersion::TLSv1_0, fragment);
            let decrypted = server.decrypt(&mut wire).unwrap();
            assert!(decrypted.mac_ok);
            assert_eq!(decrypted.cleartext, CLEARTEXT);
        }
    }

    #[test]
    fn first_implicit_iv_is_from_key_material() {
        let mut client = aes128(ProtocolVersion::TLSv1_0, ConnectionEnd::Client, &RecordConfig::default());
        let mut record = request(ProtocolVersion::TLSv1_0);
        client.encrypt(&mut record).unwrap();
        assert_eq!(record.trace.cbc_iv.resolve(), Some(&implicit_iv()));

        let mut next = request(ProtocolVersion::TLSv1_0);
        client.encrypt(&mut next).unwrap();
        assert_eq!(
            next.trace.cbc_iv.resolve().map(Vec::as_slice),
            Some(&record.fragment[record.fragment.len() - 16..])
        );
    }

    #[test]
    fn encrypt_then_mac() {
        let config = RecordConfig {
            encrypt_then_mac: true,
            ..RecordConfig::default()
        };
        let mut client = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Client, &config);
        let mut record = request(ProtocolVersion::TLSv1_2);
        record.trace.cbc_iv.set_override(explicit_iv());
        client.encrypt(&mut record).unwrap();
        assert_eq!(
            hex::encode(record.trace.authenticated_metadata.resolve().unwrap()),
            "00000000000000001703030030"
        );
        assert_eq!(record.trace.padding.resolve(), Some(&vec![0x0f; 16]));
        assert_eq!(hex::encode(&record.fragment), TLS12_ETM);

        let mut server = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Server, &config);
        let mut wire = received(ProtocolVersion::TLSv1_2, TLS12_ETM);
        let decrypted = server.decrypt(&mut wire).unwrap();
        assert!(decrypted.mac_ok);
        assert_eq!(decrypted.cleartext, CLEARTEXT);
        assert_eq!(
            wire.trace.authenticated_non_metadata.resolve().map(Vec::len),
            Some(48)
        );
    }

    #[test]
    fn tls13_metadata_carries_the_record_length() {
        for (encrypt_then_mac, metadata) in [(false, "1703040040"), (true, "1703040044")] {
            let config = RecordConfig {
                encrypt_then_mac,
                ..RecordConfig::default()
            };
            let mut client = aes128(ProtocolVersion::TLSv1_3, ConnectionEnd::Client, &config);
            let mut record = request(ProtocolVersion::TLSv1_3);
            client.encrypt(&mut record).unwrap();
            assert_eq!(
                hex::encode(record.trace.authenticated_metadata.resolve().unwrap()),
                metadata
            );
            assert_eq!(record.length, Some(record.fragment.len()));

            let mut server = aes128(ProtocolVersion::TLSv1_3, ConnectionEnd::Server, &config);
            let mut wire =
                Record::from_fragment(ContentType::ApplicationData, ProtocolVersion::TLSv1_3, record.fragment);
            let decrypted = server.decrypt(&mut wire).unwrap();
            assert!(decrypted.mac_ok);
            assert_eq!(decrypted.cleartext, CLEARTEXT);
            assert_eq!(
                wire.trace.authenticated_metadata.resolve().map(hex::encode),
                Some(metadata.to_string())
            );
        }
    }

    #[test]
    fn sslv3_mac_and_padding() {
        let mut client = aes128(ProtocolVersion::SSLv3, ConnectionEnd::Client, &RecordConfig::default());
        let mut record = request(ProtocolVersion::SSLv3);
        client.encrypt(&mut record).unwrap();
        assert_eq!(
            hex::encode(record.trace.mac.resolve().unwrap()),
            "6850ee6b6f7fe6d9f28935b1988eae0756f36311"
        );
        assert_eq!(
            hex::encode(&record.fragment),
            "9add75c54c284a584f55dd82168d55632a4086f335839e1cd70fca23f9ae2782\
             362a7c3f33e42ff42403391e08a465ad"
        );

        let mut server = aes128(ProtocolVersion::SSLv3, ConnectionEnd::Server, &RecordConfig::default());
        let mut wire = Record::from_fragment(ContentType::ApplicationData, ProtocolVersion::SSLv3, record.fragment);
        assert!(server.decrypt(&mut wire).unwrap().mac_ok);
    }

    #[test]
    fn additional_padding() {
        let config = RecordConfig {
            additional_padding: 16,
            ..RecordConfig::default()
        };
        let mut client = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Client, &config);
        let mut record = request(ProtocolVersion::TLSv1_2);
        client.encrypt(&mut record).unwrap();
        assert_eq!(record.trace.additional_padding_length.resolve(), Some(&16));
        assert_eq!(record.trace.padding.resolve(), Some(&vec![0x1b; 28]));
        assert_eq!(record.fragment.len(), 80);

        let mut server = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Server, &config);
        let mut wire =
            Record::from_fragment(ContentType::ApplicationData, ProtocolVersion::TLSv1_2, record.fragment);
        let decrypted = server.decrypt(&mut wire).unwrap();
        assert!(decrypted.mac_ok);
        assert_eq!(decrypted.cleartext, CLEARTEXT);
    }

    #[test]
    fn additional_padding_is_clamped() {
        let config = RecordConfig {
            additional_padding: 1000,
            ..RecordConfig::default()
        };
        let mut client = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Client, &config);
        let mut record = request(ProtocolVersion::TLSv1_2);
        client.encrypt(&mut record).unwrap();
        assert_eq!(record.trace.additional_padding_length.resolve(), Some(&256));
    }

    #[test]
    fn bad_padding_is_flagged() {
        let config = RecordConfig::default();
        let mut client = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Client, &config);
        let mut record = request(ProtocolVersion::TLSv1_2);
        let mut padding = vec![0x0b; 12];
        padding[0] = 0x00;
        record.trace.padding.set_override(padding);
        client.encrypt(&mut record).unwrap();

        let mut server = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Server, &config);
        let mut wire =
            Record::from_fragment(ContentType::ApplicationData, ProtocolVersion::TLSv1_2, record.fragment);
        let decrypted = server.decrypt(&mut wire).unwrap();
        assert!(!decrypted.mac_ok);
        assert_eq!(wire.trace.padding_valid, Some(false));
        assert_eq!(wire.trace.mac_valid, Some(true));
        assert_eq!(decrypted.cleartext, CLEARTEXT);
        assert!(!wire.trace.is_authentic());
    }

    #[test]
    fn ssl_padding_content_is_not_checked() {
        assert!(padding_valid(ProtocolVersion::SSLv3, &[1, 2, 3, 3]));
        assert!(!padding_valid(ProtocolVersion::TLSv1_0, &[1, 2, 3, 3]));
        assert!(padding_valid(ProtocolVersion::TLSv1_0, &[3, 3, 3, 3]));
        assert!(!padding_valid(ProtocolVersion::SSLv3, &[1, 2, 3, 4]));
        assert!(!padding_valid(ProtocolVersion::TLSv1_2, &[]));
    }

    #[test]
    fn tampered_mac_is_flagged() {
        let mut fragment = hex::decode(TLS12_MTE).unwrap();
        // flipping a bit in the IV flips the same bit in the first plaintext block
        fragment[0] ^= 0x01;
        let mut server = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Server, &RecordConfig::default());
        let mut wire = Record::from_fragment(ContentType::ApplicationData, ProtocolVersion::TLSv1_2, fragment);
        let decrypted = server.decrypt(&mut wire).unwrap();
        assert!(!decrypted.mac_ok);
        assert_eq!(wire.trace.mac_valid, Some(false));
        assert_eq!(wire.trace.padding_valid, Some(true));
        assert_eq!(decrypted.cleartext[0], b'G' ^ 0x01);
    }

    #[test]
    fn malformed_fragments_recover() {
        let mut server = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Server, &RecordConfig::default());
        for fragment in [vec![0u8; 5], vec![0u8; 16], vec![0u8; 16 + 17]] {
            let mut wire =
                Record::from_fragment(ContentType::ApplicationData, ProtocolVersion::TLSv1_2, fragment.clone());
            let decrypted = server.decrypt(&mut wire).unwrap();
            assert!(!decrypted.mac_ok);
            assert_eq!(decrypted.cleartext, fragment);
            assert_eq!(wire.trace.mac_valid, Some(false));
            assert_eq!(wire.trace.padding_valid, Some(false));
        }
        assert_eq!(server.read_sequence_number(), 3);
    }

    #[test]
    fn padding_longer_than_record_recovers() {
        // one block whose last plaintext byte claims more padding than there is
        let mut plain = vec![0u8; 16];
        plain[15] = 0xff;
        let ciphertext = cbc_encrypt::<aes::Aes128>(&key(), &explicit_iv(), plain.clone()).unwrap();
        let mut server = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Server, &RecordConfig::default());
        let mut wire = Record::from_fragment(
            ContentType::ApplicationData,
            ProtocolVersion::TLSv1_2,
            [explicit_iv(), ciphertext].concat(),
        );
        let decrypted = server.decrypt(&mut wire).unwrap();
        assert!(!decrypted.mac_ok);
        assert_eq!(decrypted.cleartext, plain);
    }

    #[test]
    fn des_and_triple_des() {
        let cases = [
            (CipherSuite::TLS_RSA_WITH_DES_CBC_SHA, ProtocolVersion::TLSv1_0, 8),
            (CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA, ProtocolVersion::TLSv1_2, 24),
            (CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA256, ProtocolVersion::TLSv1_2, 32),
        ];
        for (suite, version, key_len) in cases {
            let block_len = match key_len {
                32 => 16,
                _ => 8,
            };
            let mac_len = match suite {
                CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA256 => 32,
                _ => 20,
            };
            let keys = symmetric_keys(&vec![0x33; key_len], &vec![0x44; block_len], &vec![0x55; mac_len]);
            let config = RecordConfig::default();
            let mut client = RecordCipher::new(suite, version, ConnectionEnd::Client, keys.clone(), &config).unwrap();
            let mut server = RecordCipher::new(suite, version, ConnectionEnd::Server, keys, &config).unwrap();

            let mut record = request(version);
            client.encrypt(&mut record).unwrap();
            assert_eq!(record.trace.ciphertext.resolve().unwrap().len() % block_len, 0);
            let mut wire = Record::from_fragment(ContentType::ApplicationData, version, record.fragment);
            let decrypted = server.decrypt(&mut wire).unwrap();
            assert!(decrypted.mac_ok, "{:?}", suite);
            assert_eq!(decrypted.cleartext, CLEARTEXT);
        }
    }

    #[test]
    fn wrong_key_length_is_an_error() {
        let err = RecordCipher::new(
            CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
            ProtocolVersion::TLSv1_2,
            ConnectionEnd::Client,
            symmetric_keys(&[1; 15], &[], &[1; 20]),
            &RecordConfig::default(),
        )
        .err();
        assert_eq!(
            err,
            Some(Error::InvalidKeyLength {
                what: "CBC key",
                actual: 15
            })
        );

        let mut client = aes128(ProtocolVersion::TLSv1_2, ConnectionEnd::Client, &RecordConfig::default());
        let mut record = request(ProtocolVersion::TLSv1_2);
        record.trace.cbc_iv.set_override(vec![0; 8]);
        assert_eq!(
            client.encrypt(&mut record),
            Err(Error::InvalidKeyLength {
                what: "CBC IV",
                actual: 8
            })
        );
        assert_eq!(client.write_sequence_number(), 0);
    }
}
