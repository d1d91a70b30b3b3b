use rc4::consts::{U16, U32, U5, U7};
use rc4::{KeyInit, Rc4, StreamCipher as _};
use subtle::ConstantTimeEq;

use super::{CipherState, Decrypted};
use crate::crypto::suites::BulkAlgorithm;
use crate::error::Error;
#[cfg(feature = "logging")]
use crate::log::{trace, warn};
use crate::record::Record;

/// A running keystream.
///
/// RC4 key lengths are fixed at the type level, so each supported key
/// length is its own variant.
enum Keystream {
    /// The `NULL` bulk cipher of `WITH_NULL_<hash>` suites.
    Identity,
    Rc4_40(Rc4<U5>),
    Rc4_56(Rc4<U7>),
    Rc4_128(Rc4<U16>),
    Rc4_256(Rc4<U32>),
}

impl Keystream {
    fn new(bulk: BulkAlgorithm, key: &[u8]) -> Result<Self, Error> {
        if bulk == BulkAlgorithm::Null {
            return Ok(Self::Identity);
        }

        let bad_key = |_| Error::InvalidKeyLength {
            what: "RC4 key",
            actual: key.len(),
        };
        Ok(match key.len() {
            5 => Self::Rc4_40(Rc4::new_from_slice(key).map_err(bad_key)?),
            7 => Self::Rc4_56(Rc4::new_from_slice(key).map_err(bad_key)?),
            16 => Self::Rc4_128(Rc4::new_from_slice(key).map_err(bad_key)?),
            32 => Self::Rc4_256(Rc4::new_from_slice(key).map_err(bad_key)?),
            _ => {
                return Err(Error::InvalidKeyLength {
                    what: "RC4 key",
                    actual: key.len(),
                })
            }
        })
    }

    fn apply(&mut self, data: &mut [u8]) {
        match self {
            Self::Identity => {}
            Self::Rc4_40(rc4) => rc4.apply_keystream(data),
            Self::Rc4_56(rc4) => rc4.apply_keystream(data),
            Self::Rc4_128(rc4) => rc4.apply_keystream(data),
            Self::Rc4_256(rc4) => rc4.apply_keystream(data),
        }
    }
}

/// A stream cipher with a MAC: RC4, or the `NULL` cipher of suites that
/// still MAC their records.
///
/// Each direction's keystream is set up once and keeps running across
/// records.  Only a new epoch, which means a new `StreamCipher`, starts a
/// keystream afresh.
pub struct StreamCipher {
    pub(crate) state: CipherState,
    encrypt: Keystream,
    decrypt: Keystream,
}

impl StreamCipher {
    pub(crate) fn new(state: CipherState) -> Result<Self, Error> {
        let bulk = state.params.bulk;
        let encrypt = Keystream::new(bulk, state.keys.write_keys(state.end).key())?;
        let decrypt = Keystream::new(bulk, state.keys.read_keys(state.end).key())?;
        Ok(Self {
            state,
            encrypt,
            decrypt,
        })
    }

    /// plain = cleartext || MAC(metadata || cleartext); fragment = keystream(plain)
    pub(crate) fn encrypt(&mut self, record: &mut Record) -> Result<(), Error> {
        let seq = self.state.write_seq_for(record);
        let keys = self.state.keys.write_keys(self.state.end);
        let key = record.trace.cipher_key.record(keys.key().to_vec());
        let mac_key = record
            .trace
            .mac_key
            .record(keys.mac_secret().to_vec());
        let uses_epoch_key = key == keys.key();

        let non_metadata = record
            .trace
            .authenticated_non_metadata
            .record(record.cleartext.clone());
        let metadata_len = match self.state.params.version.is_tls13() {
            true => non_metadata.len() + self.state.params.mac_len,
            false => non_metadata.len(),
        };
        let metadata = self.state.metadata(record, seq, metadata_len);
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

        let plain = [record.cleartext.as_slice(), &mac].concat();
        let mut ciphertext = record.trace.plain_record_bytes.record(plain);
        match uses_epoch_key {
            true => self.encrypt.apply(&mut ciphertext),
            false => {
                trace!("encrypting with an overridden key");
                Keystream::new(self.state.params.bulk, &key)?.apply(&mut ciphertext)
            }
        }

        record.fragment = record.trace.ciphertext.record(ciphertext);
        record.length = Some(record.fragment.len());
        self.state.wrote();
        Ok(())
    }

    pub(crate) fn decrypt(&mut self, record: &mut Record) -> Result<Decrypted, Error> {
        let seq = self.state.read_seq_for(record);
        let keys = self.state.keys.read_keys(self.state.end);
        let key = record.trace.cipher_key.record(keys.key().to_vec());
        let mac_key = record
            .trace
            .mac_key
            .record(keys.mac_secret().to_vec());
        let uses_epoch_key = key == keys.key();
        let length = *record
            .length
            .get_or_insert(record.fragment.len());

        let mut plain = record
            .trace
            .ciphertext
            .record(record.fragment.clone());
        match uses_epoch_key {
            true => self.decrypt.apply(&mut plain),
            false => Keystream::new(self.state.params.bulk, &key)?.apply(&mut plain),
        }
        let plain = record.trace.plain_record_bytes.record(plain);

        let Some(clean_len) = plain
            .len()
            .checked_sub(self.state.params.mac_len)
        else {
            return Ok(self
                .state
                .give_up(record, plain, "shorter than its MAC"));
        };

        let (cleartext, received_mac) = plain.split_at(clean_len);
        record.cleartext = cleartext.to_vec();
        let received_mac = record
            .trace
            .mac
            .record(received_mac.to_vec());
        let non_metadata = record
            .trace
            .authenticated_non_metadata
            .record(cleartext.to_vec());
        let metadata_len = match self.state.params.version.is_tls13() {
            true => length,
            false => non_metadata.len(),
        };
        let metadata = self.state.metadata(record, seq, metadata_len);
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
        self.state.read();

        Ok(Decrypted {
            cleartext: record.cleartext.clone(),
            mac_ok,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::RecordConfig;
    use crate::crypto::cipher::tests::symmetric_keys;
    use crate::crypto::cipher::RecordCipher;
    use crate::crypto::key::{DirectionKeys, KeyMaterial};
    use crate::crypto::suites::CipherSuite;
    use crate::enums::{ConnectionEnd, ContentType, ProtocolVersion};
    use crate::error::Error;
    use crate::record::Record;
    use crate::trace::Provenance;

    const KEY: &str = "deadbeefc0fedeadbeefc0fedeadbeef";
    const MAC_SECRET: &str = "deadbeefc0fedeadbeefc0fedeadbeefc0fedead";
    const DATA: [u8; 16] = [0x01; 16];

    /// The client writes with the test key; the server's key material is
    /// all zeros and must not influence what the client sends.
    fn client_keys() -> KeyMaterial {
        KeyMaterial::new(
            DirectionKeys::new(
                hex::decode(KEY).unwrap(),
                vec![0; 8],
                hex::decode(MAC_SECRET).unwrap(),
            ),
            DirectionKeys::new(vec![0; 16], vec![0; 8], vec![0; 20]),
        )
    }

    fn cipher(suite: CipherSuite, version: ProtocolVersion, end: ConnectionEnd) -> RecordCipher {
        RecordCipher::new(suite, version, end, client_keys(), &RecordConfig::default()).unwrap()
    }

    struct Vector {
        version: ProtocolVersion,
        suite: CipherSuite,
        metadata: &'static str,
        mac: &'static str,
        ciphertext: &'static str,
    }

    const SEQ_0: &[Vector] = &[
        Vector {
            version: ProtocolVersion::SSLv2,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            metadata: "0000000000000000160010",
            mac: "618c472957c9ea333ed9437fbc24f8701801a4a9",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef704c1e230428b4e84377ab0cf1f8ac98e5d9281b5",
        },
        Vector {
            version: ProtocolVersion::SSLv3,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            metadata: "0000000000000000160010",
            mac: "618c472957c9ea333ed9437fbc24f8701801a4a9",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef704c1e230428b4e84377ab0cf1f8ac98e5d9281b5",
        },
        Vector {
            version: ProtocolVersion::TLSv1_0,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            metadata: "00000000000000001603010010",
            mac: "eaed6e296a5cdface7557c18873e42ea42c44df8",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef78fa0cb307f1e7b1beef68fa824907314075768e4",
        },
        Vector {
            version: ProtocolVersion::TLSv1_1,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            metadata: "00000000000000001603020010",
            mac: "bd1d22bbebb5b506c4ce9807f6432c7f78291d75",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef7d85087a2fef711b1cd6d6bb755ed1d813dba3869",
        },
        Vector {
            version: ProtocolVersion::TLSv1_2,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            metadata: "00000000000000001603030010",
            mac: "cc0c3e4421441b9b88bfcd06628c2db994887b78",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef7a9419b5d3406bf2c811c3eb6c1221c47d11b5e64",
        },
        Vector {
            version: ProtocolVersion::TLSv1_3,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            metadata: "1603040024",
            mac: "5496933488aeecb5af1063b930724490dc6a10e2",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef731db362d9dec4802a6b3900993dc756e99f935fe",
        },
        Vector {
            version: ProtocolVersion::SSLv2,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
            metadata: "0000000000000000160010",
            mac: "c32fa2cd251c661c8d26be230933ce2c",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef7a66207d4305ec2ab84854d93aa9dffd2",
        },
        Vector {
            version: ProtocolVersion::SSLv3,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
            metadata: "0000000000000000160010",
            mac: "c32fa2cd251c661c8d26be230933ce2c",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef7a66207d4305ec2ab84854d93aa9dffd2",
        },
        Vector {
            version: ProtocolVersion::TLSv1_0,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
            metadata: "00000000000000001603010010",
            mac: "a7ade7c77687ac136ee4a2af76713c2b",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef7c2e042de63c508a46747511fd5df0dd5",
        },
        Vector {
            version: ProtocolVersion::TLSv1_1,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
            metadata: "00000000000000001603020010",
            mac: "6f4fb670f37ce1e18038ca2d6c4e4162",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef70a021369e63e4556899b399dcfe0709c",
        },
        Vector {
            version: ProtocolVersion::TLSv1_2,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
            metadata: "00000000000000001603030010",
            mac: "bdd777a2be5c827b520f27027a1a279b",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef7d89ad2bbab1e26cc5bacd4b2d9b41665",
        },
        Vector {
            version: ProtocolVersion::TLSv1_3,
            suite: CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
            metadata: "1603040020",
            mac: "6287e1c26db9dc1c5a9d544572a729c6",
            ciphertext: "805264444f48ea5b98a0ceb3884c2ef707ca44db78fb78ab533ea7f5d1091838",
        },
    ];

    fn handshake(version: ProtocolVersion) -> Record {
        Record::new(ContentType::Handshake, version, DATA.to_vec())
    }

    #[test]
    fn encrypt_vectors() {
        for v in SEQ_0 {
            let mut cipher = cipher(v.suite, v.version, ConnectionEnd::Client);
            let mut record = handshake(v.version);
            cipher.encrypt(&mut record).unwrap();

            println!("{:?} {:?}", v.suite, v.version);
            assert_eq!(
                hex::encode(record.trace.authenticated_metadata.resolve().unwrap()),
                v.metadata
            );
            assert_eq!(hex::encode(record.trace.mac.resolve().unwrap()), v.mac);
            assert_eq!(hex::encode(&record.fragment), v.ciphertext);
            assert_eq!(record.sequence_number, Some(0));
            assert_eq!(
                record.trace.cipher_key.resolve(),
                Some(&hex::decode(KEY).unwrap())
            );
            assert_eq!(
                record.trace.mac_key.resolve(),
                Some(&hex::decode(MAC_SECRET).unwrap())
            );
            assert_eq!(
                record.trace.plain_record_bytes.resolve().unwrap().len(),
                DATA.len() + v.mac.len() / 2
            );
        }
    }

    #[test]
    fn compute_mac_matches_record_macs() {
        for v in SEQ_0 {
            let cipher = cipher(v.suite, v.version, ConnectionEnd::Server);
            let input = [hex::decode(v.metadata).unwrap(), DATA.to_vec()].concat();

            println!("{:?} {:?}", v.suite, v.version);
            assert_eq!(
                hex::encode(cipher.compute_mac(&input, ConnectionEnd::Client).unwrap()),
                v.mac
            );
            // the server's MAC secret is all zeros
            assert_ne!(
                hex::encode(cipher.compute_mac(&input, ConnectionEnd::Server).unwrap()),
                v.mac
            );
        }
    }

    #[test]
    fn decrypt_vectors() {
        for v in SEQ_0 {
            // the server reads what the client wrote
            let mut cipher = cipher(v.suite, v.version, ConnectionEnd::Server);
            let mut record = Record::from_fragment(
                ContentType::Handshake,
                v.version,
                hex::decode(v.ciphertext).unwrap(),
            );
            let decrypted = cipher.decrypt(&mut record).unwrap();

            println!("{:?} {:?}", v.suite, v.version);
            assert_eq!(decrypted.cleartext, DATA);
            assert!(decrypted.mac_ok);
            assert_eq!(record.trace.mac_valid, Some(true));
            assert_eq!(hex::encode(record.trace.mac.resolve().unwrap()), v.mac);
            assert_eq!(
                hex::encode(record.trace.authenticated_metadata.resolve().unwrap()),
                v.metadata
            );
            assert_eq!(cipher.read_sequence_number(), 1);
        }
    }

    #[test]
    fn keystream_continues_across_records() {
        let mut cipher = cipher(
            CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            ProtocolVersion::TLSv1_0,
            ConnectionEnd::Client,
        );
        let mut first = handshake(ProtocolVersion::TLSv1_0);
        cipher.encrypt(&mut first).unwrap();
        let mut second = handshake(ProtocolVersion::TLSv1_0);
        cipher.encrypt(&mut second).unwrap();

        assert_eq!(second.sequence_number, Some(1));
        assert_eq!(
            hex::encode(second.trace.authenticated_metadata.resolve().unwrap()),
            "00000000000000011603010010"
        );
        assert_eq!(
            hex::encode(second.trace.mac.resolve().unwrap()),
            "040fe0b0381877b4d448462e9b30cfb6a5b87ff6"
        );
        assert_eq!(
            hex::encode(&second.fragment),
            "265c875f34c97ea7a57406296e9c1fa0965267f4480ae834e8d6038f660e5557c64ec0f8"
        );

        // a fresh cipher at sequence 1 starts the keystream over
        let mut fresh = cipher_at(ProtocolVersion::TLSv1_0, 1);
        let mut reset = handshake(ProtocolVersion::TLSv1_0);
        fresh.encrypt(&mut reset).unwrap();
        assert_eq!(reset.trace.mac.resolve(), second.trace.mac.resolve());
        assert_ne!(reset.fragment, second.fragment);
    }

    fn cipher_at(version: ProtocolVersion, seq: u64) -> RecordCipher {
        let mut c = cipher(CipherSuite::TLS_RSA_WITH_RC4_128_SHA, version, ConnectionEnd::Client);
        c.set_write_sequence_number(seq);
        c
    }

    #[test]
    fn second_record_vectors() {
        let cases = [
            (
                ProtocolVersion::SSLv3,
                CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
                "0000000000000001160010",
                "2c023bf9e7c17717ed3a7b8362ba5a13e8222c36",
                "265c875f34c97ea7a57406296e9c1fa0be5fbcbd97d3e897d1a43e229f84c0f28bd49338",
            ),
            (
                ProtocolVersion::SSLv3,
                CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
                "0000000000000001160010",
                "c69de0303fedadcb5793ca09fca60815",
                "4492241d265c875f34c97ea7a5740629a900fe91adb02a8f27815589c0384db4",
            ),
            (
                ProtocolVersion::TLSv1_2,
                CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
                "00000000000000011603030010",
                "f8349c55095baa9e953d9cbafa4c6dce2682ebf1",
                "265c875f34c97ea7a57406296e9c1fa06a691b117949351ea9a3d91b0772f72f457454ff",
            ),
            (
                ProtocolVersion::TLSv1_3,
                CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
                "1603040024",
                "5496933488aeecb5af1063b930724490dc6a10e2",
                "265c875f34c97ea7a57406296e9c1fa0c6cb1470f8bc7335938e2618cd4cde71bf9cafec",
            ),
        ];

        for (version, suite, metadata, mac, ciphertext) in cases {
            let mut client = cipher(suite, version, ConnectionEnd::Client);
            let mut server = cipher(suite, version, ConnectionEnd::Server);
            for _ in 0..2 {
                let mut record = handshake(version);
                client.encrypt(&mut record).unwrap();
                let mut received =
                    Record::from_fragment(ContentType::Handshake, version, record.fragment.clone());
                let decrypted = server.decrypt(&mut received).unwrap();
                assert!(decrypted.mac_ok);
                assert_eq!(decrypted.cleartext, DATA);

                if record.sequence_number == Some(1) {
                    assert_eq!(
                        hex::encode(record.trace.authenticated_metadata.resolve().unwrap()),
                        metadata
                    );
                    assert_eq!(hex::encode(record.trace.mac.resolve().unwrap()), mac);
                    assert_eq!(hex::encode(&record.fragment), ciphertext);
                }
            }
        }
    }

    #[test]
    fn mac_override_is_encrypted() {
        let mut cipher = cipher(
            CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            ProtocolVersion::TLSv1_0,
            ConnectionEnd::Client,
        );
        let mut record = handshake(ProtocolVersion::TLSv1_0);
        record.trace.mac.set_override(vec![0; 20]);
        cipher.encrypt(&mut record).unwrap();

        assert_eq!(record.trace.mac.provenance(), Some(Provenance::Overridden));
        assert_eq!(
            hex::encode(record.trace.mac.computed().unwrap()),
            "eaed6e296a5cdface7557c18873e42ea42c44df8"
        );
        let plain = record.trace.plain_record_bytes.resolve().unwrap();
        assert_eq!(&plain[16..], &[0; 20]);
        // the keystream is unchanged, so the MAC part of the ciphertext is
        // the keystream itself
        let reference = hex::decode(
            "805264444f48ea5b98a0ceb3884c2ef78fa0cb307f1e7b1beef68fa824907314075768e4",
        )
        .unwrap();
        let mac: Vec<u8> = hex::decode("eaed6e296a5cdface7557c18873e42ea42c44df8").unwrap();
        let keystream: Vec<u8> = reference[16..]
            .iter()
            .zip(&mac)
            .map(|(c, m)| c ^ m)
            .collect();
        assert_eq!(&record.fragment[..16], &reference[..16]);
        assert_eq!(&record.fragment[16..], keystream.as_slice());

        // and the peer notices
        let mut server = cipher_for_server(ProtocolVersion::TLSv1_0);
        let mut received =
            Record::from_fragment(ContentType::Handshake, ProtocolVersion::TLSv1_0, record.fragment);
        let decrypted = server.decrypt(&mut received).unwrap();
        assert!(!decrypted.mac_ok);
        assert_eq!(decrypted.cleartext, DATA);
        assert_eq!(received.trace.mac_valid, Some(false));
    }

    fn cipher_for_server(version: ProtocolVersion) -> RecordCipher {
        cipher(CipherSuite::TLS_RSA_WITH_RC4_128_SHA, version, ConnectionEnd::Server)
    }

    #[test]
    fn metadata_override_changes_mac() {
        let mut cipher = cipher(
            CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            ProtocolVersion::TLSv1_0,
            ConnectionEnd::Client,
        );
        let mut record = handshake(ProtocolVersion::TLSv1_0);
        // claim TLS 1.1 in the MACed metadata
        record
            .trace
            .authenticated_metadata
            .set_override(hex::decode("00000000000000001603020010").unwrap());
        cipher.encrypt(&mut record).unwrap();
        assert_eq!(
            hex::encode(record.trace.mac.resolve().unwrap()),
            "bd1d22bbebb5b506c4ce9807f6432c7f78291d75"
        );
    }

    #[test]
    fn overridden_key_leaves_keystream_alone() {
        let mut cipher = cipher(
            CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            ProtocolVersion::TLSv1_0,
            ConnectionEnd::Client,
        );
        let mut odd = handshake(ProtocolVersion::TLSv1_0);
        odd.trace.cipher_key.set_override(vec![0x42; 16]);
        cipher.encrypt(&mut odd).unwrap();
        assert!(!odd.fragment.starts_with(&hex::decode("80526444").unwrap()));

        // the next record continues the epoch keystream from the start
        let mut next = handshake(ProtocolVersion::TLSv1_0);
        cipher.encrypt(&mut next).unwrap();
        assert_eq!(next.sequence_number, Some(1));
        assert_eq!(&next.fragment[..4], &hex::decode("80526444").unwrap()[..]);
    }

    #[test]
    fn tampered_record_flags_bad_mac() {
        let mut server = cipher_for_server(ProtocolVersion::TLSv1_2);
        let mut fragment = hex::decode(
            "805264444f48ea5b98a0ceb3884c2ef7a9419b5d3406bf2c811c3eb6c1221c47d11b5e64",
        )
        .unwrap();
        fragment[0] ^= 0x80;
        let mut record =
            Record::from_fragment(ContentType::Handshake, ProtocolVersion::TLSv1_2, fragment);
        let decrypted = server.decrypt(&mut record).unwrap();
        assert!(!decrypted.mac_ok);
        assert_eq!(decrypted.cleartext[0], 0x81);
        assert_eq!(server.read_sequence_number(), 1);
    }

    #[test]
    fn short_fragment_recovers() {
        let mut server = cipher_for_server(ProtocolVersion::TLSv1_2);
        let mut record =
            Record::from_fragment(ContentType::Handshake, ProtocolVersion::TLSv1_2, vec![1, 2, 3]);
        let decrypted = server.decrypt(&mut record).unwrap();
        assert!(!decrypted.mac_ok);
        assert_eq!(decrypted.cleartext.len(), 3);
        assert_eq!(record.trace.mac_valid, Some(false));
        assert_eq!(server.read_sequence_number(), 1);
    }

    #[test]
    fn null_bulk_cipher_still_macs() {
        let keys = symmetric_keys(&[], &[], &[0x0b; 20]);
        let mut client = RecordCipher::new(
            CipherSuite::TLS_RSA_WITH_NULL_SHA,
            ProtocolVersion::TLSv1_2,
            ConnectionEnd::Client,
            keys.clone(),
            &RecordConfig::default(),
        )
        .unwrap();
        let mut record = Record::new(ContentType::ApplicationData, ProtocolVersion::TLSv1_2, b"hi".to_vec());
        client.encrypt(&mut record).unwrap();
        assert_eq!(&record.fragment[..2], b"hi");
        assert_eq!(record.fragment.len(), 2 + 20);

        let mut server = RecordCipher::new(
            CipherSuite::TLS_RSA_WITH_NULL_SHA,
            ProtocolVersion::TLSv1_2,
            ConnectionEnd::Server,
            keys,
            &RecordConfig::default(),
        )
        .unwrap();
        let mut received =
            Record::from_fragment(ContentType::ApplicationData, ProtocolVersion::TLSv1_2, record.fragment);
        assert!(server.decrypt(&mut received).unwrap().mac_ok);
        assert_eq!(received.cleartext, b"hi");
    }

    #[test]
    fn export_key_sizes() {
        let keys = symmetric_keys(&[7; 5], &[], &[1; 16]);
        let mut c = RecordCipher::new(
            CipherSuite::TLS_RSA_EXPORT_WITH_RC4_40_MD5,
            ProtocolVersion::SSLv3,
            ConnectionEnd::Client,
            keys,
            &RecordConfig::default(),
        )
        .unwrap();
        let mut record = handshake(ProtocolVersion::SSLv3);
        c.encrypt(&mut record).unwrap();
        assert_eq!(record.fragment.len(), 16 + 16);

        let bad = RecordCipher::new(
            CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
            ProtocolVersion::TLSv1_0,
            ConnectionEnd::Client,
            symmetric_keys(&[1; 3], &[], &[1; 20]),
            &RecordConfig::default(),
        );
        assert_eq!(
            bad.err(),
            Some(Error::InvalidKeyLength {
                what: "RC4 key",
                actual: 3
            })
        );
    }
}
