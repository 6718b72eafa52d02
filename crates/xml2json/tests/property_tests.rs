//! Property-based tests for the XML <-> JSON mapping
//!
//! These tests use proptest to verify:
//! 1. Encoding is stable: encode(decode(encode(e))) == encode(e)
//! 2. The text pipelines agree: XML written from a tree converts to the same
//!    JSON before and after a trip through json2xml
//! 3. Arbitrary input never panics either pipeline

use indexmap::IndexMap;
use proptest::prelude::*;
use xml2json::text::{normalize, TextMode};
use xml2json::{
    decode_document, encode_document, json_to_xml, xml, xml_to_json_string, Element, Result,
};

fn check<T>(result: Result<T>) -> std::result::Result<T, TestCaseError> {
    result.map_err(|err| TestCaseError::fail(err.to_string()))
}

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,3}"
}

fn arb_text() -> impl Strategy<Value = Option<String>> {
    // Printable text including markup characters, normalised the way the
    // parser would store it
    "[ -~é]{0,12}".prop_map(|raw| normalize(&raw, TextMode::Trim))
}

fn arb_attributes() -> impl Strategy<Value = IndexMap<String, String>> {
    prop::collection::vec((arb_name(), "[ -~]{0,8}"), 0..3)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn arb_element() -> impl Strategy<Value = Element> {
    let leaf = (arb_name(), arb_attributes(), arb_text()).prop_map(|(tag, attributes, text)| {
        Element {
            tag,
            attributes,
            text,
            children: Vec::new(),
        }
    });

    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            arb_name(),
            arb_attributes(),
            arb_text(),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(tag, attributes, text, children)| Element {
                tag,
                attributes,
                text,
                children,
            })
    })
}

proptest! {
    /// Decoding encoder output and encoding again gives the same value
    #[test]
    fn encoding_is_stable(element in arb_element()) {
        let encoded = encode_document(&element);
        let decoded = check(decode_document(&encoded))?;
        prop_assert_eq!(encode_document(&decoded), encoded);
    }

    /// XML text -> JSON text -> XML text -> JSON text reproduces the first JSON
    #[test]
    fn text_pipelines_agree(element in arb_element()) {
        let xml_text = xml::to_string(&element);
        let json = check(xml_to_json_string(&xml_text))?;
        let xml_again = check(json_to_xml(&json))?;
        prop_assert_eq!(check(xml_to_json_string(&xml_again))?, json);
    }

    /// Serialising a tree and parsing it back gives the same tree
    #[test]
    fn xml_writer_round_trips(element in arb_element()) {
        let parsed = check(xml::from_str(&xml::to_string(&element)))?;
        prop_assert_eq!(parsed, element);
    }

    /// Any input either converts or fails with an error
    #[test]
    fn arbitrary_input_never_panics(s in "\\PC{0,64}") {
        let _ = xml_to_json_string(&s);
        let _ = json_to_xml(&s);
    }

    /// Structured-looking JSON never panics the decoder
    #[test]
    fn json_shapes_never_panic(s in r#"\{"[a-z@#]{1,3}":(null|"[a-z]{0,3}"|\[("[a-z]"|null|\{\})?\]|\{("[@#a-z]{1,3}":"x")?\})\}"#) {
        let _ = json_to_xml(&s);
    }
}
