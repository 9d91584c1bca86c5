/// One unit of an animated heading.
///
/// Spaces stay literal so word spacing is not affected by per-character
/// styling; every other character is wrapped and keeps its position in the
/// source text so a stylesheet can stagger the animation on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Space,
    Char { index: usize, ch: char },
}

impl Glyph {
    #[inline]
    pub fn ch(&self) -> char {
        match self {
            Glyph::Space => ' ',
            Glyph::Char { ch, .. } => *ch,
        }
    }

    #[inline]
    pub fn index(&self) -> Option<usize> {
        match self {
            Glyph::Space => None,
            Glyph::Char { index, .. } => Some(*index),
        }
    }
}

/// Split heading text into glyphs, one per character.
///
/// Indices count every character, spaces included, so the wrapped glyphs of
/// `"ab cd"` carry 0, 1, 3 and 4.
pub fn glyphs(text: &str) -> Vec<Glyph> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            if ch == ' ' {
                Glyph::Space
            } else {
                Glyph::Char { index, ch }
            }
        })
        .collect()
}

/// Value of the inline `style` attribute carried by a wrapped glyph.
#[inline]
pub fn glyph_style(index: usize) -> String {
    format!("--i:{}", index)
}

/// Text obtained by reading the glyphs back in order.
pub fn glyph_text(glyphs: &[Glyph]) -> String {
    glyphs.iter().map(Glyph::ch).collect()
}
