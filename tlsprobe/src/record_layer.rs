use crate::chooser::Chooser;
use crate::config::RecordConfig;
use crate::crypto::cipher::{Decrypted, RecordCipher};
use crate::crypto::KeyMaterial;
use crate::enums::{ConnectionEnd, ProtocolVersion};
use crate::error::Error;
#[cfg(feature = "logging")]
use crate::log::debug;
use crate::record::Record;

/// Record layer that tracks the ciphers of every epoch, in each direction.
///
/// Epoch 0 is the null cipher.  Each new cipher gets the next epoch
/// number in its direction, and is not used until that epoch is started.
/// Ciphers of earlier epochs stay available, so records can still be
/// protected or read under a stale epoch by setting [`Record::epoch`].
pub struct RecordLayer {
    encrypters: Vec<RecordCipher>,
    decrypters: Vec<RecordCipher>,
    write_epoch: u16,
    read_epoch: u16,
}

impl RecordLayer {
    /// A record layer with only the null cipher of epoch 0.
    pub fn new(version: ProtocolVersion, end: ConnectionEnd) -> Self {
        Self {
            encrypters: vec![RecordCipher::null(version, end)],
            decrypters: vec![RecordCipher::null(version, end)],
            write_epoch: 0,
            read_epoch: 0,
        }
    }

    /// Protect `record` under its own epoch, or the active write epoch.
    ///
    /// The epoch used is written back into `record.epoch`.
    pub fn encrypt(&mut self, record: &mut Record) -> Result<(), Error> {
        let epoch = record.epoch.unwrap_or(self.write_epoch);
        let cipher = cipher_of(&mut self.encrypters, epoch)?;
        record.epoch = Some(epoch);
        cipher.encrypt(record)
    }

    /// Unprotect `record` under its own epoch, or the active read epoch.
    ///
    /// The epoch used is written back into `record.epoch`.
    pub fn decrypt(&mut self, record: &mut Record) -> Result<Decrypted, Error> {
        let epoch = record.epoch.unwrap_or(self.read_epoch);
        let cipher = cipher_of(&mut self.decrypters, epoch)?;
        record.epoch = Some(epoch);
        cipher.decrypt(record)
    }

    /// Register `cipher` for encryption under the next epoch, returning
    /// that epoch.  It is not used until you call `start_encrypting`.
    pub fn push_encrypter(&mut self, cipher: RecordCipher) -> Result<u16, Error> {
        let epoch = push(&mut self.encrypters, cipher)?;
        debug!("prepared write epoch {}", epoch);
        Ok(epoch)
    }

    /// Register `cipher` for decryption under the next epoch, returning
    /// that epoch.  It is not used until you call `start_decrypting`.
    pub fn push_decrypter(&mut self, cipher: RecordCipher) -> Result<u16, Error> {
        let epoch = push(&mut self.decrypters, cipher)?;
        debug!("prepared read epoch {}", epoch);
        Ok(epoch)
    }

    /// Protect outgoing records under `epoch` from now on.
    pub fn start_encrypting(&mut self, epoch: u16) -> Result<(), Error> {
        cipher_of(&mut self.encrypters, epoch)?;
        debug!("write epoch {} -> {}", self.write_epoch, epoch);
        self.write_epoch = epoch;
        Ok(())
    }

    /// Read incoming records under `epoch` from now on.
    pub fn start_decrypting(&mut self, epoch: u16) -> Result<(), Error> {
        cipher_of(&mut self.decrypters, epoch)?;
        debug!("read epoch {} -> {}", self.read_epoch, epoch);
        self.read_epoch = epoch;
        Ok(())
    }

    /// Build ciphers for the parameters `chooser` negotiated, in both
    /// directions, and start using them.
    ///
    /// On error neither direction changes.
    pub fn activate(
        &mut self,
        chooser: &dyn Chooser,
        keys: KeyMaterial,
        config: &RecordConfig,
    ) -> Result<(), Error> {
        let mut encrypter = RecordCipher::from_chooser(chooser, keys.clone(), config)?;
        let mut decrypter = RecordCipher::from_chooser(chooser, keys, config)?;
        let write_epoch = next_epoch(&self.encrypters)?;
        let read_epoch = next_epoch(&self.decrypters)?;

        encrypter.set_epoch(write_epoch);
        decrypter.set_epoch(read_epoch);
        self.encrypters.push(encrypter);
        self.decrypters.push(decrypter);
        debug!(
            "write epoch {} -> {}, read epoch {} -> {}",
            self.write_epoch, write_epoch, self.read_epoch, read_epoch
        );
        self.write_epoch = write_epoch;
        self.read_epoch = read_epoch;
        Ok(())
    }

    /// The epoch outgoing records are protected under.
    pub fn write_epoch(&self) -> u16 {
        self.write_epoch
    }

    /// The epoch incoming records are read under.
    pub fn read_epoch(&self) -> u16 {
        self.read_epoch
    }

    /// The encrypter of `epoch`.
    pub fn encrypter(&self, epoch: u16) -> Option<&RecordCipher> {
        self.encrypters.get(usize::from(epoch))
    }

    /// The encrypter of `epoch`, for adjusting its state.
    pub fn encrypter_mut(&mut self, epoch: u16) -> Option<&mut RecordCipher> {
        self.encrypters.get_mut(usize::from(epoch))
    }

    /// The decrypter of `epoch`.
    pub fn decrypter(&self, epoch: u16) -> Option<&RecordCipher> {
        self.decrypters.get(usize::from(epoch))
    }

    /// The decrypter of `epoch`, for adjusting its state.
    pub fn decrypter_mut(&mut self, epoch: u16) -> Option<&mut RecordCipher> {
        self.decrypters.get_mut(usize::from(epoch))
    }

    /// The next write sequence number of `epoch`.
    pub fn write_sequence_number(&self, epoch: u16) -> Result<u64, Error> {
        self.encrypter(epoch)
            .map(RecordCipher::write_sequence_number)
            .ok_or(Error::UnknownEpoch(epoch))
    }

    /// Set the next write sequence number of `epoch`.
    pub fn set_write_sequence_number(&mut self, epoch: u16, seq: u64) -> Result<(), Error> {
        cipher_of(&mut self.encrypters, epoch)?.set_write_sequence_number(seq);
        Ok(())
    }

    /// The next read sequence number of `epoch`.
    pub fn read_sequence_number(&self, epoch: u16) -> Result<u64, Error> {
        self.decrypter(epoch)
            .map(RecordCipher::read_sequence_number)
            .ok_or(Error::UnknownEpoch(epoch))
    }

    /// Set the next read sequence number of `epoch`.
    pub fn set_read_sequence_number(&mut self, epoch: u16, seq: u64) -> Result<(), Error> {
        cipher_of(&mut self.decrypters, epoch)?.set_read_sequence_number(seq);
        Ok(())
    }
}

fn cipher_of(ciphers: &mut [RecordCipher], epoch: u16) -> Result<&mut RecordCipher, Error> {
    ciphers
        .get_mut(usize::from(epoch))
        .ok_or(Error::UnknownEpoch(epoch))
}

fn next_epoch(ciphers: &[RecordCipher]) -> Result<u16, Error> {
    u16::try_from(ciphers.len()).map_err(|_| Error::EpochsExhausted)
}

fn push(ciphers: &mut Vec<RecordCipher>, mut cipher: RecordCipher) -> Result<u16, Error> {
    let epoch = next_epoch(ciphers)?;
    cipher.set_epoch(epoch);
    ciphers.push(cipher);
    Ok(epoch)
}
