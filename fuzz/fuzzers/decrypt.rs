#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate tlsprobe;

use tlsprobe::crypto::cipher::RecordCipher;
use tlsprobe::crypto::{CipherSuite, DirectionKeys, KeyMaterial, SuiteParams};
use tlsprobe::{ConnectionEnd, ContentType, ProtocolVersion, Record, RecordConfig};

const SUITES: &[CipherSuite] = &[
    CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
    CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_256_GCM_SHA384,
    CipherSuite::TLS_PSK_WITH_AES_128_CCM_8,
    CipherSuite::TLS13_CHACHA20_POLY1305_SHA256,
];

const VERSIONS: &[ProtocolVersion] = &[
    ProtocolVersion::SSLv3,
    ProtocolVersion::TLSv1_0,
    ProtocolVersion::TLSv1_2,
    ProtocolVersion::TLSv1_3,
    ProtocolVersion::DTLSv1_2,
];

// Whatever arrives, decryption must report rather than fail or panic.
fuzz_target!(|data: &[u8]| {
    let [suite, version, rest @ ..] = data else {
        return;
    };
    let suite = SUITES[usize::from(*suite) % SUITES.len()];
    let version = VERSIONS[usize::from(*version) % VERSIONS.len()];
    let params = SuiteParams::resolve(suite, version).unwrap();
    let side = || {
        DirectionKeys::new(
            vec![1; params.key_len],
            vec![2; params.fixed_iv_len],
            vec![3; params.mac.output_len()],
        )
    };
    let mut cipher = RecordCipher::from_params(
        params,
        ConnectionEnd::Server,
        KeyMaterial::new(side(), side()),
        &RecordConfig::default(),
    )
    .unwrap();

    let mut record = Record::from_fragment(ContentType::ApplicationData, version, rest.to_vec());
    let decrypted = cipher.decrypt(&mut record).unwrap();
    assert_eq!(decrypted.mac_ok, record.trace.is_authentic());
});
