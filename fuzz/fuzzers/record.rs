#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate tlsprobe;

use tlsprobe::{Reader, Record};

fuzz_target!(|data: &[u8]| {
    let mut rdr = Reader::init(data);
    if let Ok(record) = Record::read(&mut rdr) {
        let enc = record.encode().unwrap();
        assert_eq!(enc, data[..rdr.used()]);
    }
});
