//! Glyph widths for the standard Type1 fonts, in 1/1000 em

use crate::config::FontFamily;

/// Helvetica widths for 0x20..=0x7E
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold widths for 0x20..=0x7E
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Helvetica widths for 0x80..=0xFF. Unassigned WinAnsi codes show a bullet.
const HELVETICA_UPPER: [u16; 128] = [
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350, // 0x80
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

/// Helvetica-Bold widths for 0x80..=0xFF
const HELVETICA_BOLD_UPPER: [u16; 128] = [
    556, 350, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350, // 0x80
    350, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 350, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // 0xF0
];

/// Width for bytes the encoder never emits (C0 controls, DEL)
const HELVETICA_CONTROL: u16 = 350;
const COURIER: u16 = 600;

/// Width measurement for one font face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    family: FontFamily,
    bold: bool,
}

impl FontMetrics {
    pub fn new(family: FontFamily, bold: bool) -> Self {
        Self { family, bold }
    }

    /// Advance width of one WinAnsi byte, in 1/1000 em
    pub fn glyph_width(&self, byte: u8) -> u16 {
        match self.family {
            FontFamily::Courier => COURIER,
            FontFamily::Helvetica => {
                let (lower, upper) = if self.bold {
                    (&HELVETICA_BOLD, &HELVETICA_BOLD_UPPER)
                } else {
                    (&HELVETICA, &HELVETICA_UPPER)
                };
                match byte {
                    0x20..=0x7E => lower[(byte - 0x20) as usize],
                    0x80..=0xFF => upper[(byte - 0x80) as usize],
                    _ => HELVETICA_CONTROL,
                }
            }
        }
    }

    /// Width of an encoded string at `size` points
    pub fn text_width(&self, text: &[u8], size: f32) -> f32 {
        let units: u32 = text.iter().map(|b| self.glyph_width(*b) as u32).sum();
        units as f32 * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_widths() {
        let regular = FontMetrics::new(FontFamily::Helvetica, false);
        assert_eq!(regular.glyph_width(b' '), 278);
        assert_eq!(regular.glyph_width(b'W'), 944);
        assert_eq!(regular.glyph_width(b'i'), 222);
        assert_eq!(regular.glyph_width(b'~'), 584);

        let bold = FontMetrics::new(FontFamily::Helvetica, true);
        assert_eq!(bold.glyph_width(b'i'), 278);
        assert_eq!(bold.glyph_width(b'@'), 975);
    }

    #[test]
    fn test_helvetica_upper_half_widths() {
        let regular = FontMetrics::new(FontFamily::Helvetica, false);
        assert_eq!(regular.glyph_width(0x97), 1000); // em dash
        assert_eq!(regular.glyph_width(0x96), 556); // en dash
        assert_eq!(regular.glyph_width(0x85), 1000); // ellipsis
        assert_eq!(regular.glyph_width(0x89), 1000); // per mille
        assert_eq!(regular.glyph_width(0x99), 1000); // trademark
        assert_eq!(regular.glyph_width(0x8C), 1000); // OE
        assert_eq!(regular.glyph_width(0xC6), 1000); // AE
        assert_eq!(regular.glyph_width(0xA0), 278); // no-break space
        assert_eq!(regular.glyph_width(0xE7), 500); // ccedilla
        assert_eq!(regular.glyph_width(0xFF), 500); // ydieresis

        let bold = FontMetrics::new(FontFamily::Helvetica, true);
        assert_eq!(bold.glyph_width(0x97), 1000);
        assert_eq!(bold.glyph_width(0x84), 500); // quotedblbase
        assert_eq!(bold.glyph_width(0xE7), 556);
        assert_eq!(bold.glyph_width(0xF6), 611); // odieresis
    }

    #[test]
    fn test_courier_is_monospace() {
        let courier = FontMetrics::new(FontFamily::Courier, true);
        assert_eq!(courier.text_width(b"iiii", 10.0), courier.text_width(b"WWWW", 10.0));
        assert_eq!(courier.text_width(b"abc", 10.0), 18.0);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let m = FontMetrics::new(FontFamily::Helvetica, false);
        let w10 = m.text_width(b"Email", 10.0);
        let w20 = m.text_width(b"Email", 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-4);
    }
}
