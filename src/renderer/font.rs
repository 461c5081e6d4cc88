//! Built-in 5x7 bitmap font
//!
//! Uppercase only; lowercase letters draw with the uppercase glyph. Each row
//! is five bits, most significant bit on the left.

pub const GLYPH_COLS: u32 = 5;
pub const GLYPH_ROWS: u32 = 7;
/// Horizontal advance in dots, one column of spacing
pub const ADVANCE: u32 = GLYPH_COLS + 1;

type Glyph = [u8; GLYPH_ROWS as usize];

#[rustfmt::skip]
const LETTERS: [Glyph; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

#[rustfmt::skip]
const DIGITS: [Glyph; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

#[rustfmt::skip]
fn punctuation(c: char) -> Option<Glyph> {
    let g = match c {
        ' ' => [0; 7],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        _ => return None,
    };
    Some(g)
}

/// Bitmap for `c`, if the font has one
pub fn glyph(c: char) -> Option<Glyph> {
    let c = c.to_ascii_uppercase();
    match c {
        'A'..='Z' => Some(LETTERS[(c as u8 - b'A') as usize]),
        '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
        _ => punctuation(c),
    }
}

/// Lit dots of `text` as (column, row) in dot units from the text origin.
///
/// Characters without a glyph still take up their advance.
pub fn dots(text: &str) -> impl Iterator<Item = (u32, u32)> + '_ {
    text.chars().enumerate().flat_map(|(i, c)| {
        let origin = i as u32 * ADVANCE;
        let rows = glyph(c).unwrap_or([0; GLYPH_ROWS as usize]);
        (0..GLYPH_ROWS).flat_map(move |row| {
            let bits = rows[row as usize];
            (0..GLYPH_COLS)
                .filter(move |col| bits & (1 << (GLYPH_COLS - 1 - col)) != 0)
                .map(move |col| (origin + col, row))
        })
    })
}

/// Width in pixels of `text` drawn with glyph height `size`
pub fn text_width(text: &str, size: f32) -> f32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0.0;
    }
    let dot = size / GLYPH_ROWS as f32;
    (n * ADVANCE - 1) as f32 * dot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_ui_string_has_glyphs() {
        for text in [
            "Sin",
            "0123456789",
            "Launch Options",
            "Close launcher on launch",
            "Launch Game",
            "Fullscreen",
            "Windowed (640x480)",
        ] {
            for c in text.chars() {
                assert!(glyph(c).is_some(), "missing glyph {c:?} in {text:?}");
            }
        }
    }

    #[test]
    fn test_lowercase_uses_uppercase_glyph() {
        assert_eq!(glyph('s'), glyph('S'));
        assert!(glyph('~').is_none());
    }

    #[test]
    fn test_dots_of_one() {
        let d: Vec<_> = dots("1").collect();
        // Top row of '1' is a single centre dot
        assert_eq!(d[0], (2, 0));
        // Bottom row is three wide
        assert_eq!(d.iter().filter(|&&(_, row)| row == 6).count(), 3);
    }

    #[test]
    fn test_dots_advance_per_char() {
        let minus: Vec<_> = dots("--").collect();
        assert_eq!(minus.len(), 10);
        assert!(minus.contains(&(0, 3)));
        assert!(minus.contains(&(6, 3)));
        assert!(!minus.contains(&(5, 3)));
    }

    #[test]
    fn test_space_is_blank() {
        assert_eq!(dots(" ").count(), 0);
        assert_eq!(dots("~").count(), 0);
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 14.0), 0.0);
        // One glyph is five dots wide
        assert_eq!(text_width("A", 14.0), 10.0);
        assert_eq!(text_width("AB", 7.0), 11.0);
    }
}
