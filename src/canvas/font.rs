/// Width (in pixels) of a single glyph.
pub const GLYPH_WIDTH: usize = 4;
/// Height (in pixels) of a single glyph.
pub const GLYPH_HEIGHT: usize = 5;
/// Horizontal distance between the start of two glyphs.
pub const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

/// Raw data for the 4x5 font atlas.
///
/// Each row is one byte with the pixels in the high nibble, the same layout
/// as the classic Chip8 hex font.
#[rustfmt::skip]
const FONT_ATLAS: [(char, [u8; GLYPH_HEIGHT]); 44] = [
    ('0', [0xF0, 0x90, 0x90, 0x90, 0xF0]),
    ('1', [0x20, 0x60, 0x20, 0x20, 0x70]),
    ('2', [0xF0, 0x10, 0xF0, 0x80, 0xF0]),
    ('3', [0xF0, 0x10, 0xF0, 0x10, 0xF0]),
    ('4', [0x90, 0x90, 0xF0, 0x10, 0x10]),
    ('5', [0xF0, 0x80, 0xF0, 0x10, 0xF0]),
    ('6', [0xF0, 0x80, 0xF0, 0x90, 0xF0]),
    ('7', [0xF0, 0x10, 0x20, 0x40, 0x40]),
    ('8', [0xF0, 0x90, 0xF0, 0x90, 0xF0]),
    ('9', [0xF0, 0x90, 0xF0, 0x10, 0xF0]),
    ('A', [0xF0, 0x90, 0xF0, 0x90, 0x90]),
    ('B', [0xE0, 0x90, 0xE0, 0x90, 0xE0]),
    ('C', [0xF0, 0x80, 0x80, 0x80, 0xF0]),
    ('D', [0xE0, 0x90, 0x90, 0x90, 0xE0]),
    ('E', [0xF0, 0x80, 0xF0, 0x80, 0xF0]),
    ('F', [0xF0, 0x80, 0xF0, 0x80, 0x80]),
    ('G', [0xF0, 0x80, 0xB0, 0x90, 0xF0]),
    ('H', [0x90, 0x90, 0xF0, 0x90, 0x90]),
    ('I', [0xE0, 0x40, 0x40, 0x40, 0xE0]),
    ('J', [0x10, 0x10, 0x10, 0x90, 0xF0]),
    ('K', [0x90, 0xA0, 0xC0, 0xA0, 0x90]),
    ('L', [0x80, 0x80, 0x80, 0x80, 0xF0]),
    ('M', [0x90, 0xF0, 0xF0, 0x90, 0x90]),
    ('N', [0x90, 0xD0, 0xB0, 0x90, 0x90]),
    ('O', [0x60, 0x90, 0x90, 0x90, 0x60]),
    ('P', [0xF0, 0x90, 0xF0, 0x80, 0x80]),
    ('Q', [0x60, 0x90, 0x90, 0xB0, 0x70]),
    ('R', [0xE0, 0x90, 0xE0, 0xA0, 0x90]),
    ('S', [0x70, 0x80, 0x60, 0x10, 0xE0]),
    ('T', [0xE0, 0x40, 0x40, 0x40, 0x40]),
    ('U', [0x90, 0x90, 0x90, 0x90, 0xF0]),
    ('V', [0x90, 0x90, 0x90, 0x60, 0x60]),
    ('W', [0x90, 0x90, 0xF0, 0xF0, 0x90]),
    ('X', [0x90, 0x90, 0x60, 0x90, 0x90]),
    ('Y', [0xA0, 0xA0, 0x40, 0x40, 0x40]),
    ('Z', [0xF0, 0x10, 0x60, 0x80, 0xF0]),
    (':', [0x00, 0x40, 0x00, 0x40, 0x00]),
    ('+', [0x00, 0x40, 0xE0, 0x40, 0x00]),
    ('-', [0x00, 0x00, 0xE0, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x40]),
    (',', [0x00, 0x00, 0x00, 0x40, 0x80]),
    ('\'', [0x40, 0x40, 0x00, 0x00, 0x00]),
    ('!', [0x40, 0x40, 0x40, 0x00, 0x40]),
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00]),
];

/// Look up the sprite rows for a character.
///
/// Lowercase letters share the uppercase glyphs.
pub fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let c = c.to_ascii_uppercase();
    FONT_ATLAS
        .iter()
        .find(|(key, _)| *key == c)
        .map(|(_, rows)| *rows)
}

/// Width (in pixels) of a line of text at scale 1.
pub fn text_width(text: &str) -> usize {
    let count = text.chars().count();
    if count == 0 {
        0
    } else {
        count * GLYPH_ADVANCE - 1
    }
}
