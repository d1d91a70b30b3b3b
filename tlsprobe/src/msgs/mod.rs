//! Byte-level encoding helpers shared by the record framing and the
//! authenticated data builder.

#[macro_use]
mod macros;

mod base;
pub(crate) use base::hex;

mod codec;
pub(crate) use codec::{put_u16, put_u64, u48};
pub use codec::{Codec, Reader};
