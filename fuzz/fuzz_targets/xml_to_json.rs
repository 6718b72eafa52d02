#![no_main]
use libfuzzer_sys::fuzz_target;
use xml2json::{decode_document, encode_document, xml_to_json};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(value) = xml_to_json(s) {
            // Encoder output must always decode, and re-encode to itself
            let element = decode_document(&value).expect("encoder output should decode");
            assert_eq!(encode_document(&element), value);
        }
    }
});
