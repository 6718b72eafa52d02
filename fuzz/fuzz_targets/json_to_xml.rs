#![no_main]
use libfuzzer_sys::fuzz_target;
use xml2json::{json_to_xml, xml_to_json};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(xml) = json_to_xml(s) {
            // Serializer output must always be well-formed
            let _ = xml_to_json(&xml).expect("serializer output should parse");
        }
    }
});
