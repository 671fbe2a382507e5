//! Text preparation for the standard Type1 fonts
//!
//! The standard 14 fonts are addressed through WinAnsiEncoding, one byte per
//! glyph. Anything outside that code page cannot be shown and is reported
//! back to the caller instead of being silently dropped.

/// Map a character to its WinAnsiEncoding byte
pub fn winansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

/// Encode a line of text, returning the first unencodable character on failure
pub fn encode_winansi(text: &str) -> Result<Vec<u8>, char> {
    text.chars()
        .map(|ch| winansi_byte(ch).ok_or(ch))
        .collect()
}

/// Split a display value into visual lines and neutralize control characters.
///
/// Line breaks (`\r\n`, `\r`, `\n`, U+2028, U+2029) start a new line inside
/// the cell, tabs become four spaces, and any other control character is
/// shown as a `\u{..}` escape so it cannot disturb the layout.
pub fn contain_text(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split(['\n', '\r', '\u{2028}', '\u{2029}'])
        .map(|line| {
            let mut out = String::with_capacity(line.len());
            for ch in line.chars() {
                match ch {
                    '\t' => out.push_str("    "),
                    c if c.is_control() => out.push_str(&format!("\\u{{{:02X}}}", c as u32)),
                    c => out.push(c),
                }
            }
            out
        })
        .collect()
}
