use core::fmt;

use crate::enums::{ContentType, ProtocolVersion};
use crate::error::{Error, InvalidMessage};
use crate::msgs::{hex, u48, Codec, Reader};
use crate::trace::ComputationTrace;

/// The largest fragment a record header's 16-bit length can describe.
pub const MAX_FRAGMENT_LEN: usize = 0xffff;

const TLS_HEADER_LEN: usize = 1 + 2 + 2;
const DTLS_HEADER_LEN: usize = 1 + 2 + 2 + 6 + 2;

/// One TLS record, before or after protection.
///
/// To send, build it with [`Record::new`] and hand it to a cipher's
/// `encrypt`, which fills `fragment`.  To receive, build it with
/// [`Record::from_fragment`] (or [`Record::read`]) and hand it to
/// `decrypt`, which fills `cleartext`.  Either way `trace` holds every
/// intermediate value afterwards.
#[derive(Clone)]
pub struct Record {
    /// Content type in the record header.  TLS 1.3 AEAD protection
    /// replaces it with `ApplicationData` and restores it on decryption.
    pub content_type: ContentType,
    /// Version in the record header.
    pub version: ProtocolVersion,
    /// Epoch to protect this record under.  `None` means the currently
    /// active epoch; set to address an older epoch.
    pub epoch: Option<u16>,
    /// Sequence number to use.  `None` means the cipher's counter; the
    /// number actually used is written back here.
    pub sequence_number: Option<u64>,
    /// Length in the record header.  Filled in by encryption; when
    /// decrypting, `None` means the fragment length.
    pub length: Option<usize>,
    /// The unprotected payload.
    pub cleartext: Vec<u8>,
    /// The protected payload as carried on the wire.
    pub fragment: Vec<u8>,
    /// Intermediate values of the last encryption or decryption.
    pub trace: ComputationTrace,
}

impl Record {
    /// A record to be sent carrying `cleartext`.
    pub fn new(content_type: ContentType, version: ProtocolVersion, cleartext: Vec<u8>) -> Self {
        Self {
            content_type,
            version,
            epoch: None,
            sequence_number: None,
            length: None,
            cleartext,
            fragment: Vec::new(),
            trace: ComputationTrace::new(),
        }
    }

    /// A received record carrying the protected `fragment`.
    pub fn from_fragment(
        content_type: ContentType,
        version: ProtocolVersion,
        fragment: Vec<u8>,
    ) -> Self {
        Self {
            fragment,
            ..Self::new(content_type, version, Vec::new())
        }
    }

    /// Use sequence number `seq` instead of the cipher's counter.
    pub fn with_sequence_number(mut self, seq: u64) -> Self {
        self.sequence_number = Some(seq);
        self
    }

    /// Protect under `epoch` instead of the active one.
    pub fn with_epoch(mut self, epoch: u16) -> Self {
        self.epoch = Some(epoch);
        self
    }

    /// Frame the record: content type, version, (for DTLS: epoch and
    /// 48-bit sequence number,) length, fragment.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let length = self.length.unwrap_or(self.fragment.len());
        if length > MAX_FRAGMENT_LEN || self.fragment.len() > MAX_FRAGMENT_LEN {
            return Err(Error::PayloadTooLarge(length.max(self.fragment.len())));
        }

        let mut out = Vec::with_capacity(DTLS_HEADER_LEN + self.fragment.len());
        self.content_type.encode(&mut out);
        self.version.encode(&mut out);
        if self.version.is_dtls() {
            self.epoch.unwrap_or(0).encode(&mut out);
            u48(self.sequence_number.unwrap_or(0) & u48::MAX).encode(&mut out);
        }
        (length as u16).encode(&mut out);
        out.extend_from_slice(&self.fragment);
        Ok(out)
    }

    /// Read one framed record.  DTLS framing is used when the header's
    /// version is a DTLS version.
    pub fn read(r: &mut Reader<'_>) -> Result<Self, InvalidMessage> {
        let content_type = ContentType::read(r)?;
        let version = ProtocolVersion::read(r)?;
        let (epoch, sequence_number) = match version.is_dtls() {
            true => (Some(u16::read(r)?), Some(u48::read(r)?.0)),
            false => (None, None),
        };
        let length = usize::from(u16::read(r)?);
        let fragment = r.sub(length)?.rest();

        Ok(Self {
            epoch,
            sequence_number,
            length: Some(length),
            ..Self::from_fragment(content_type, version, fragment.to_vec())
        })
    }

    /// Read a buffer that must hold exactly one record, such as a single
    /// DTLS datagram.
    pub fn read_exact(bytes: &[u8]) -> Result<Self, InvalidMessage> {
        let mut r = Reader::init(bytes);
        let record = Self::read(&mut r)?;
        r.expect_empty("Record")?;
        Ok(record)
    }

    /// Read every record in `bytes`, which must hold whole records only.
    pub fn read_all(bytes: &[u8]) -> Result<Vec<Self>, InvalidMessage> {
        let mut r = Reader::init(bytes);
        let mut records = Vec::new();
        while r.any_left() {
            records.push(Self::read(&mut r)?);
        }
        Ok(records)
    }

    /// Length of the header [`Record::encode`] emits for this record.
    pub fn header_len(&self) -> usize {
        match self.version.is_dtls() {
            true => DTLS_HEADER_LEN,
            false => TLS_HEADER_LEN,
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Hex<'a>(&'a [u8]);
        impl fmt::Debug for Hex<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                hex(f, self.0)
            }
        }

        f.debug_struct("Record")
            .field("content_type", &self.content_type)
            .field("version", &self.version)
            .field("epoch", &self.epoch)
            .field("sequence_number", &self.sequence_number)
            .field("length", &self.length)
            .field("cleartext", &Hex(&self.cleartext))
            .field("fragment", &Hex(&self.fragment))
            .field("trace", &self.trace)
            .finish()
    }
}
