use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384};

use crate::error::Error;

/// A record MAC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MacAlgorithm {
    /// No MAC: null and AEAD suites.
    Null,
    /// The SSLv3 MAC over MD5.
    SslMd5,
    /// The SSLv3 MAC over SHA-1.
    SslSha1,
    /// HMAC-MD5.
    HmacMd5,
    /// HMAC-SHA1.
    HmacSha1,
    /// HMAC-SHA256.
    HmacSha256,
    /// HMAC-SHA384.
    HmacSha384,
}

impl MacAlgorithm {
    /// Length of the MAC in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Null => 0,
            Self::SslMd5 | Self::HmacMd5 => 16,
            Self::SslSha1 | Self::HmacSha1 => 20,
            Self::HmacSha256 => 32,
            Self::HmacSha384 => 48,
        }
    }

    /// MAC `input` under `secret`.
    pub fn sign(self, secret: &[u8], input: &[u8]) -> Result<Vec<u8>, Error> {
        match self {
            Self::Null => Ok(Vec::new()),
            Self::SslMd5 => Ok(ssl3_mac::<Md5>(secret, SSL3_MD5_PAD_LEN, input)),
            Self::SslSha1 => Ok(ssl3_mac::<Sha1>(secret, SSL3_SHA_PAD_LEN, input)),
            Self::HmacMd5 => hmac_sign::<Hmac<Md5>>(secret, input),
            Self::HmacSha1 => hmac_sign::<Hmac<Sha1>>(secret, input),
            Self::HmacSha256 => hmac_sign::<Hmac<Sha256>>(secret, input),
            Self::HmacSha384 => hmac_sign::<Hmac<Sha384>>(secret, input),
        }
    }
}

const SSL3_PAD1: u8 = 0x36;
const SSL3_PAD2: u8 = 0x5c;
const SSL3_MD5_PAD_LEN: usize = 48;
const SSL3_SHA_PAD_LEN: usize = 40;

/// hash(secret || pad2 || hash(secret || pad1 || input))
///
/// The sequence number, type and length are part of `input`.
fn ssl3_mac<D: Digest>(secret: &[u8], pad_len: usize, input: &[u8]) -> Vec<u8> {
    let inner = D::new()
        .chain_update(secret)
        .chain_update(&[SSL3_PAD1; SSL3_MD5_PAD_LEN][..pad_len])
        .chain_update(input)
        .finalize();
    D::new()
        .chain_update(secret)
        .chain_update(&[SSL3_PAD2; SSL3_MD5_PAD_LEN][..pad_len])
        .chain_update(inner)
        .finalize()
        .to_vec()
}

fn hmac_sign<M: Mac + KeyInit>(secret: &[u8], input: &[u8]) -> Result<Vec<u8>, Error> {
    let mut mac = <M as KeyInit>::new_from_slice(secret).map_err(|_| Error::InvalidKeyLength {
        what: "MAC secret",
        actual: secret.len(),
    })?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}
