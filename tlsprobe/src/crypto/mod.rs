/// Record ciphers for each cipher category.
pub mod cipher;

mod key;
mod mac;
mod suites;

pub use key::{DirectionKeys, KeyMaterial};
pub use mac::MacAlgorithm;
pub use suites::{BulkAlgorithm, CipherCategory, CipherSuite, SuiteParams};
