//! Curated five-color palettes and round-robin color assignment.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::random;

/// Bundled palettes, five hex colors each: the leading entries of the
/// `nice-color-palettes` collection (top-rated COLOURlovers palettes), in its order.
pub const PALETTES: &[[&str; 5]] = &[
    ["#69d2e7", "#a7dbd8", "#e0e4cc", "#f38630", "#fa6900"],
    ["#fe4365", "#fc9d9a", "#f9cdad", "#c8c8a9", "#83af9b"],
    ["#ecd078", "#d95b43", "#c02942", "#542437", "#53777a"],
    ["#556270", "#4ecdc4", "#c7f464", "#ff6b6b", "#c44d58"],
    ["#774f38", "#e08e79", "#f1d4af", "#ece5ce", "#c5e0dc"],
    ["#e8ddcb", "#cdb380", "#036564", "#033649", "#031634"],
    ["#490a3d", "#bd1550", "#e97f02", "#f8ca00", "#8a9b0f"],
    ["#594f4f", "#547980", "#45ada8", "#9de0ad", "#e5fcc2"],
    ["#00a0b0", "#6a4a3c", "#cc333f", "#eb6841", "#edc951"],
    ["#e94e77", "#d68189", "#c6a49a", "#c6e5d9", "#f4ead5"],
    ["#3fb8af", "#7fc7af", "#dad8a7", "#ff9e9d", "#ff3d7f"],
    ["#d9ceb2", "#948c75", "#d5ded9", "#7a6a53", "#99b2b7"],
    ["#ffffff", "#cbe86b", "#f2e9e1", "#1c140d", "#cbe86b"],
    ["#efffcd", "#dce9be", "#555152", "#2e2633", "#99173c"],
    ["#343838", "#005f6b", "#008c9e", "#00b4cc", "#00dffc"],
    ["#413e4a", "#73626e", "#b38184", "#f0b49e", "#f7e4be"],
];

/// An ordered list of hex colors for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Build a palette from hex colors. Rejects an empty list.
    pub fn new(colors: Vec<String>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidConfig("palette must contain colors".into()));
        }
        Ok(Self { colors })
    }

    /// Pick one of the bundled palettes and shuffle its colors.
    pub fn pick_shuffled(rng: &mut dyn RngCore) -> Self {
        let picked = random::pick(rng, PALETTES).unwrap_or(&PALETTES[0]);
        let mut colors: Vec<String> = picked.iter().map(|c| c.to_string()).collect();
        random::shuffle(rng, &mut colors);
        Self { colors }
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Position of the last color handed out.
///
/// Advancing happens before reading, so a fresh cursor yields index 1 first and
/// wraps back to 0 after the last color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaletteCursor(usize);

impl PaletteCursor {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// Return the next color and the advanced cursor.
    pub fn advance(self, palette: &Palette) -> (&str, PaletteCursor) {
        let mut idx = self.0 + 1;
        if idx >= palette.len() {
            idx = 0;
        }
        (palette.colors[idx].as_str(), PaletteCursor(idx))
    }
}
