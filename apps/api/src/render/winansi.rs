//! Unicode → WinAnsiEncoding for the base-14 fonts.

/// Characters in 0x80..=0x9F that WinAnsi maps away from Latin-1.
const CP1252_HIGH: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

const REPLACEMENT: u8 = b'?';

pub fn encode_char(c: char) -> u8 {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => code as u8,
        _ => CP1252_HIGH
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, b)| *b)
            .unwrap_or(REPLACEMENT),
    }
}

/// Encodes a string; unmappable characters become `?`.
pub fn encode(s: &str) -> Vec<u8> {
    s.chars().map(encode_char).collect()
}

pub fn decode_byte(b: u8) -> char {
    match b {
        0x20..=0x7E | 0xA0..=0xFF => char::from(b),
        _ => CP1252_HIGH
            .iter()
            .find(|(_, code)| *code == b)
            .map(|(ch, _)| *ch)
            .unwrap_or(char::from(REPLACEMENT)),
    }
}

/// The text a reader sees once `s` has gone through the encoding. Whitespace is
/// kept as is; line breaking never writes it to the page.
pub fn as_drawn(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_whitespace() { c } else { decode_byte(encode_char(c)) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode("Rust 2024"), b"Rust 2024".to_vec());
    }

    #[test]
    fn test_swedish_letters_are_latin1() {
        assert_eq!(encode("åäöÅÄÖé"), vec![0xE5, 0xE4, 0xF6, 0xC5, 0xC4, 0xD6, 0xE9]);
    }

    #[test]
    fn test_typographic_punctuation() {
        assert_eq!(encode("—"), vec![0x97]);
        assert_eq!(encode("–•…€"), vec![0x96, 0x95, 0x85, 0x80]);
        assert_eq!(encode("“”"), vec![0x93, 0x94]);
    }

    #[test]
    fn test_as_drawn_keeps_what_the_encoding_can_carry() {
        assert_eq!(as_drawn("Göteborg – “CV” €"), "Göteborg – “CV” €");
        assert_eq!(as_drawn("Łódź\nInżynier"), "?ód?\nIn?ynier");
    }

    #[test]
    fn test_unmappable_becomes_question_mark() {
        assert_eq!(encode("漢"), vec![b'?']);
        assert_eq!(encode("\u{7}"), vec![b'?']);
    }
}
