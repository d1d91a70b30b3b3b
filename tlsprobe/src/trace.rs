use core::fmt;

use crate::msgs::hex;

/// Where the authoritative value of a [`Traced`] field came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    /// The record pipeline computed it.
    Computed,
    /// A caller set it before the pipeline ran.
    Overridden,
}

/// One overridable intermediate value of the record pipeline.
///
/// The pipeline stores what it computed; a caller may additionally set an
/// override before the pipeline runs.  [`Traced::resolve`] yields the
/// override when there is one, and that is the value every later pipeline
/// stage consumes.
#[derive(Clone, PartialEq, Eq)]
pub struct Traced<T> {
    computed: Option<T>,
    override_: Option<T>,
}

impl<T> Traced<T> {
    /// Nothing computed, nothing overridden.
    pub const fn new() -> Self {
        Self {
            computed: None,
            override_: None,
        }
    }

    /// Use `value` instead of whatever the pipeline computes.
    pub fn set_override(&mut self, value: T) {
        self.override_ = Some(value);
    }

    /// Drop any override, returning it.
    pub fn clear_override(&mut self) -> Option<T> {
        self.override_.take()
    }

    /// The authoritative value: the override if set, else the computed value.
    pub fn resolve(&self) -> Option<&T> {
        self.override_
            .as_ref()
            .or(self.computed.as_ref())
    }

    /// Forget the computed value, keeping any override.
    pub(crate) fn reset(&mut self) {
        self.computed = None;
    }

    /// What the pipeline computed, regardless of any override.
    pub fn computed(&self) -> Option<&T> {
        self.computed.as_ref()
    }

    /// The override, if any.
    pub fn overridden(&self) -> Option<&T> {
        self.override_.as_ref()
    }

    /// Where [`Traced::resolve`]'s value comes from, or `None` when there is
    /// no value at all.
    pub fn provenance(&self) -> Option<Provenance> {
        match (&self.override_, &self.computed) {
            (Some(_), _) => Some(Provenance::Overridden),
            (None, Some(_)) => Some(Provenance::Computed),
            (None, None) => None,
        }
    }
}

impl<T: Clone> Traced<T> {
    /// Store a freshly computed value and return the authoritative one.
    pub(crate) fn record(&mut self, computed: T) -> T {
        let value = match &self.override_ {
            Some(value) => value.clone(),
            None => computed.clone(),
        };
        self.computed = Some(computed);
        value
    }
}

impl<T> Default for Traced<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Traced<Vec<u8>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.resolve(), self.provenance()) {
            (Some(value), Some(Provenance::Overridden)) => {
                f.write_str("overridden(")?;
                hex(f, value)?;
                f.write_str(")")
            }
            (Some(value), _) => hex(f, value),
            (None, _) => f.write_str("-"),
        }
    }
}

impl fmt::Debug for Traced<usize> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.resolve(), self.provenance()) {
            (Some(value), Some(Provenance::Overridden)) => write!(f, "overridden({})", value),
            (Some(value), _) => write!(f, "{}", value),
            (None, _) => f.write_str("-"),
        }
    }
}

/// Every intermediate value of protecting or unprotecting one record.
///
/// A fresh trace is empty.  Set overrides on its fields before handing the
/// record to a cipher to inject faults; read the fields afterwards to see
/// what was computed and used.  Fields that do not apply to the cipher in
/// use stay empty.
#[derive(Clone, Debug, Default)]
pub struct ComputationTrace {
    /// Key given to the bulk cipher.
    pub cipher_key: Traced<Vec<u8>>,
    /// MAC secret (stream and block ciphers).
    pub mac_key: Traced<Vec<u8>>,
    /// Version-specific metadata that is MACed, or the AEAD associated data.
    pub authenticated_metadata: Traced<Vec<u8>>,
    /// The MACed payload: the cleartext, or (IV and) ciphertext under
    /// encrypt-then-MAC, or the AEAD ciphertext.
    pub authenticated_non_metadata: Traced<Vec<u8>>,
    /// The MAC.  On decryption this is the MAC received in the record.
    pub mac: Traced<Vec<u8>>,
    /// CBC padding, or TLS 1.3 zero padding.
    pub padding: Traced<Vec<u8>>,
    /// Extra padding bytes beyond the minimum.
    pub additional_padding_length: Traced<usize>,
    /// The bytes fed to (or produced by) the bulk cipher.
    pub plain_record_bytes: Traced<Vec<u8>>,
    /// The CBC IV of this record.
    pub cbc_iv: Traced<Vec<u8>>,
    /// The implicit part of the AEAD nonce.
    pub aead_salt: Traced<Vec<u8>>,
    /// The explicit nonce carried in the record (TLS 1.2 GCM).
    pub explicit_nonce: Traced<Vec<u8>>,
    /// The nonce given to the AEAD.
    pub aead_nonce: Traced<Vec<u8>>,
    /// The AEAD authentication tag.
    pub authentication_tag: Traced<Vec<u8>>,
    /// Output of the bulk cipher, without explicit IVs, nonces, tags or
    /// encrypt-then-MAC MACs.
    pub ciphertext: Traced<Vec<u8>>,

    /// Whether the MAC matched.  `None` when no MAC was checked.
    pub mac_valid: Option<bool>,
    /// Whether the CBC padding was well formed.
    pub padding_valid: Option<bool>,
    /// Whether the AEAD tag verified.
    pub tag_valid: Option<bool>,
}

impl ComputationTrace {
    /// An empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear computed values and flags before a new pipeline run.
    /// Overrides survive.
    pub(crate) fn reset_computed(&mut self) {
        for field in [
            &mut self.cipher_key,
            &mut self.mac_key,
            &mut self.authenticated_metadata,
            &mut self.authenticated_non_metadata,
            &mut self.mac,
            &mut self.padding,
            &mut self.plain_record_bytes,
            &mut self.cbc_iv,
            &mut self.aead_salt,
            &mut self.explicit_nonce,
            &mut self.aead_nonce,
            &mut self.authentication_tag,
            &mut self.ciphertext,
        ] {
            field.reset();
        }
        self.additional_padding_length.reset();
        self.mac_valid = None;
        self.padding_valid = None;
        self.tag_valid = None;
    }

    /// Whether every integrity check that ran passed.
    pub fn is_authentic(&self) -> bool {
        [self.mac_valid, self.padding_valid, self.tag_valid]
            .into_iter()
            .all(|v| v != Some(false))
    }
}
