use core::fmt;

use zeroize::Zeroize;

use crate::enums::ConnectionEnd;
use crate::error::Error;
use crate::crypto::suites::{CipherCategory, SuiteParams};

/// The write key, IV and MAC secret of one side of a connection.
#[derive(Clone, Default)]
pub struct DirectionKeys {
    key: Vec<u8>,
    iv: Vec<u8>,
    mac_secret: Vec<u8>,
}

impl DirectionKeys {
    /// Collect already-derived keys.  Leave a value empty when the
    /// cipher suite has no use for it.
    pub fn new(key: Vec<u8>, iv: Vec<u8>, mac_secret: Vec<u8>) -> Self {
        Self {
            key,
            iv,
            mac_secret,
        }
    }

    /// The bulk cipher key.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The IV: first CBC IV, or fixed AEAD IV.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// The MAC secret.
    pub fn mac_secret(&self) -> &[u8] {
        &self.mac_secret
    }
}

impl Drop for DirectionKeys {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
        self.mac_secret.zeroize();
    }
}

impl fmt::Debug for DirectionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionKeys")
            .field("key_len", &self.key.len())
            .field("iv_len", &self.iv.len())
            .field("mac_secret_len", &self.mac_secret.len())
            .finish()
    }
}

/// Keys for both directions of one cipher activation.
///
/// This is immutable: a new key activation makes a new `KeyMaterial`.
#[derive(Clone, Debug, Default)]
pub struct KeyMaterial {
    client: DirectionKeys,
    server: DirectionKeys,
}

impl KeyMaterial {
    /// Key material from the client's and the server's write keys.
    pub fn new(client: DirectionKeys, server: DirectionKeys) -> Self {
        Self { client, server }
    }

    /// The keys `end` writes with.
    pub fn keys_of(&self, end: ConnectionEnd) -> &DirectionKeys {
        match end {
            ConnectionEnd::Client => &self.client,
            ConnectionEnd::Server => &self.server,
        }
    }

    /// The keys we write with, when we are `local`.
    pub fn write_keys(&self, local: ConnectionEnd) -> &DirectionKeys {
        self.keys_of(local)
    }

    /// The keys our peer writes with, when we are `local`.
    pub fn read_keys(&self, local: ConnectionEnd) -> &DirectionKeys {
        self.keys_of(local.peer())
    }

    /// Check both directions carry every value `params` needs.
    ///
    /// Lengths are not checked here: a key of the wrong length is only an
    /// error once a primitive refuses it.
    pub(crate) fn check_present(&self, params: &SuiteParams) -> Result<(), Error> {
        let sides = [
            (&self.client, ["client write key", "client write IV", "client write MAC secret"]),
            (&self.server, ["server write key", "server write IV", "server write MAC secret"]),
        ];
        let needs_mac = params.category != CipherCategory::Aead && params.mac_len > 0;

        for (keys, [key, iv, mac_secret]) in sides {
            if params.key_len > 0 && keys.key.is_empty() {
                return Err(Error::MissingKeyMaterial(key));
            }
            if params.fixed_iv_len > 0 && keys.iv.is_empty() {
                return Err(Error::MissingKeyMaterial(iv));
            }
            if needs_mac && keys.mac_secret.is_empty() {
                return Err(Error::MissingKeyMaterial(mac_secret));
            }
        }
        Ok(())
    }
}
