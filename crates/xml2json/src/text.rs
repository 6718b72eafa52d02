//! Text normalisation shared by the XML parser and the JSON decoder

/// How direct text content is cleaned up before it lands in an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextMode {
    /// Strip leading and trailing XML whitespace
    #[default]
    Trim,
    /// Keep surrounding whitespace; only whitespace-only text is dropped
    Preserve,
}

/// XML whitespace: space, tab, carriage return, line feed
pub const fn is_xml_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

/// Characters allowed anywhere in an XML 1.0 document, literal or referenced
pub const fn is_xml_char(ch: char) -> bool {
    matches!(ch,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Normalise raw text content. Whitespace-only (or empty) text is absent in
/// both modes.
pub fn normalize(raw: &str, mode: TextMode) -> Option<String> {
    let trimmed = raw.trim_matches(is_xml_whitespace);
    if trimmed.is_empty() {
        return None;
    }
    match mode {
        TextMode::Trim => Some(trimmed.to_string()),
        TextMode::Preserve => Some(raw.to_string()),
    }
}
