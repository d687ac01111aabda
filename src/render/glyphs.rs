//! Cell glyphs for the three drawing styles.
//!
//! Every glyph covers two terminal columns so grid cells come out roughly
//! square.

use clap::ValueEnum;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};

/// Drawing style picked on the command line or in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GlyphStyle {
    /// Box-drawing border and geometric shapes
    #[default]
    Unicode,
    /// Plain 7-bit characters only
    Ascii,
    /// Emoji cells, needs a font with color emoji
    Emoji,
}

/// What to draw for each kind of cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSet {
    pub head: &'static str,
    pub body: &'static str,
    pub food: &'static str,
    pub empty: &'static str,
    pub border: border::Set,
}

const ASCII_BORDER: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

impl GlyphStyle {
    pub fn glyphs(self) -> GlyphSet {
        match self {
            GlyphStyle::Unicode => GlyphSet {
                head: "■ ",
                body: "□ ",
                food: "● ",
                empty: "· ",
                border: border::THICK,
            },
            GlyphStyle::Ascii => GlyphSet {
                head: "O ",
                body: "o ",
                food: "* ",
                empty: "  ",
                border: ASCII_BORDER,
            },
            GlyphStyle::Emoji => GlyphSet {
                head: "🐍",
                body: "🟩",
                food: "🍎",
                empty: "  ",
                border: border::DOUBLE,
            },
        }
    }
}
