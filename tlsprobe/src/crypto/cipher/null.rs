use super::{CipherState, Decrypted};
use crate::error::Error;
use crate::record::Record;

/// The identity transform used before any cipher spec is in force.
///
/// No keys, no MAC, no metadata.  The plaintext and ciphertext are still
/// traced, so overriding `ciphertext` changes what goes on the wire.
pub struct NullCipher {
    pub(crate) state: CipherState,
}

impl NullCipher {
    pub(crate) fn new(state: CipherState) -> Self {
        Self { state }
    }

    pub(crate) fn encrypt(&mut self, record: &mut Record) -> Result<(), Error> {
        self.state.write_seq_for(record);
        let plain = record
            .trace
            .plain_record_bytes
            .record(record.cleartext.clone());
        record.fragment = record.trace.ciphertext.record(plain);
        record.length = Some(record.fragment.len());
        self.state.wrote();
        Ok(())
    }

    pub(crate) fn decrypt(&mut self, record: &mut Record) -> Result<Decrypted, Error> {
        self.state.read_seq_for(record);
        let ciphertext = record
            .trace
            .ciphertext
            .record(record.fragment.clone());
        record.cleartext = record.trace.plain_record_bytes.record(ciphertext);
        self.state.read();
        Ok(Decrypted {
            cleartext: record.cleartext.clone(),
            mac_ok: true,
        })
    }
}
