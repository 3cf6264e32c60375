//! Static font metrics for the CV text face (Inter).
//!
//! Character widths are in em units (relative to font size), covering ASCII
//! 0x20..=0x7E (95 printable characters). Non-ASCII characters fall back to
//! the table average; the CV content hits this with accented names and
//! place names often enough that the average matters more than any single
//! glyph. Index = (char as usize) - 32.
//!
//! This is an approximation of real glyph metrics. It is good enough to
//! predict word-wrap line counts within one line, and the paginator's
//! budget scaling absorbs the residual error.
#![allow(dead_code)]

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units, covering
/// 0x20 (space) through 0x7E (~).
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for codepoints above 0x7E.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Measures the rendered width of a string in pixels at a font size.
    pub fn measure_px(&self, s: &str, font_size_px: f32) -> f32 {
        self.measure_em(s) * font_size_px
    }

    /// Estimates how many printed lines the string occupies when
    /// word-wrapped into `max_width_px` at `font_size_px`, using greedy
    /// word wrap. An empty or whitespace-only string occupies zero lines.
    pub fn estimated_lines(&self, s: &str, max_width_px: f32, font_size_px: f32) -> u32 {
        let words: Vec<&str> = s.split_whitespace().collect();
        if words.is_empty() {
            return 0;
        }
        let max_width_em = max_width_px / font_size_px;
        let mut line_count = 1u32;
        let mut current_width = 0.0_f32;
        let mut first = true;

        for word in &words {
            let word_w = self.measure_em(word);
            let space_w = if first { 0.0 } else { self.space_width };

            if !first && current_width + space_w + word_w > max_width_em {
                line_count += 1;
                current_width = word_w;
                // first stays false; the next word on the new line gets a space
            } else {
                current_width += space_w + word_w;
                first = false;
            }
        }
        line_count
    }
}

/// Inter, the document's text face.
static INTER_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
    space_width: 0.25,
};

/// Returns the metric table for the document's text face.
pub fn text_metrics() -> &'static FontMetricTable {
    &INTER_TABLE
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
