//! Conversion pipelines between XML and JSON text

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::decode::decode_document;
use crate::encode::encode_document;
use crate::error::Result;
use crate::value::Value;
use crate::{json, xml};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    XmlToJson,
    JsonToXml,
}

impl Direction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::XmlToJson => "xml2json",
            Self::JsonToXml => "json2xml",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml2json" => Ok(Self::XmlToJson),
            "json2xml" => Ok(Self::JsonToXml),
            other => Err(format!(
                "unknown conversion type '{other}', expected xml2json or json2xml"
            )),
        }
    }
}

/// Options for both pipelines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// XML parser limits and text mode. JSON strings are always decoded as
    /// written.
    pub xml: xml::Config,
    /// JSON parser limits
    pub json: json::Config,
    pub json_output: json::WriterOptions,
    pub xml_output: xml::WriterOptions,
}

/// Parse XML text and encode it as a JSON value
pub fn xml_to_json(input: &str) -> Result<Value> {
    xml_to_json_with_options(input, &ConvertOptions::default())
}

#[instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn xml_to_json_with_options(input: &str, options: &ConvertOptions) -> Result<Value> {
    let root = xml::from_str_with_config(input, options.xml)?;
    debug!(root = %root.tag, children = root.children.len(), "parsed xml document");
    Ok(encode_document(&root))
}

/// Parse XML text and render the encoded value as JSON text
pub fn xml_to_json_string(input: &str) -> Result<String> {
    xml_to_json_string_with_options(input, &ConvertOptions::default())
}

pub fn xml_to_json_string_with_options(input: &str, options: &ConvertOptions) -> Result<String> {
    let value = xml_to_json_with_options(input, options)?;
    Ok(json::to_string_with_options(&value, options.json_output))
}

/// Parse JSON text, decode it into an element tree and render it as XML
pub fn json_to_xml(input: &str) -> Result<String> {
    json_to_xml_with_options(input, &ConvertOptions::default())
}

#[instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn json_to_xml_with_options(input: &str, options: &ConvertOptions) -> Result<String> {
    let value = json::from_str_with_config(input, options.json)?;
    debug!(kind = value.type_name(), "parsed json document");
    let root = decode_document(&value)?;
    debug!(root = %root.tag, children = root.children.len(), "decoded element tree");
    Ok(xml::to_string_with_options(&root, options.xml_output))
}

/// Convert text in the given direction
pub fn convert(input: &str, direction: Direction) -> Result<String> {
    convert_with_options(input, direction, &ConvertOptions::default())
}

/// Convert text in the given direction with options
pub fn convert_with_options(
    input: &str,
    direction: Direction,
    options: &ConvertOptions,
) -> Result<String> {
    match direction {
        Direction::XmlToJson => xml_to_json_string_with_options(input, options),
        Direction::JsonToXml => json_to_xml_with_options(input, options),
    }
}
