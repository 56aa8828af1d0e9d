//! 3x5 bitmap font for the HUD readouts.
//!
//! Each glyph is five rows of three bits, MSB (0b100) = left column. Only the
//! characters the instruments print are present; anything else renders blank.

pub const GLYPH_W: u16 = 3;
pub const GLYPH_H: u16 = 5;
/// Horizontal advance per character, including one column of spacing.
pub const ADVANCE: u16 = GLYPH_W + 1;

#[rustfmt::skip]
pub fn glyph(ch: char) -> Option<[u8; 5]> {
    let rows = match ch {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '°' => [0b010, 0b101, 0b010, 0b000, 0b000],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        ' ' => [0; 5],
        _ => return None,
    };
    Some(rows)
}

/// Width in unscaled pixels of `text` once rendered.
pub fn text_width(text: &str) -> u16 {
    let n = text.chars().count() as u16;
    if n == 0 {
        0
    } else {
        n * ADVANCE - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_readout_character_has_a_glyph() {
        for ch in "ALT: -0123456789.V/S HDG°".chars() {
            assert!(glyph(ch).is_some(), "missing glyph for {ch:?}");
        }
    }

    #[test]
    fn width_excludes_trailing_spacing() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("0"), 3);
        assert_eq!(text_width("0°"), 7);
    }
}
