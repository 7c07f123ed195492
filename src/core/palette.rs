//! Rank → color resolution
//!
//! A palette is an explicit, ordered color table indexed by rank. Looking up
//! a rank the table does not cover is an error: substituting a color would
//! misattribute a worker's data.

use std::fmt;

use super::records::Rank;
use crate::error::{Result, VisError};

/// 8-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parse a color name.
    ///
    /// Accepts the single-letter codes `r g b c m y k w`, their long names
    /// (`red`, `cyan`, ...) and `#rrggbb` hex.
    pub fn from_name(name: &str) -> Result<Self> {
        let name = name.trim();
        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| VisError::UnknownColor(name.to_string()));
        }

        let color = match name.to_ascii_lowercase().as_str() {
            "r" | "red" => Color::from_rgb(255, 0, 0),
            "g" | "green" => Color::from_rgb(0, 128, 0),
            "b" | "blue" => Color::from_rgb(0, 0, 255),
            "c" | "cyan" => Color::from_rgb(0, 191, 191),
            "m" | "magenta" => Color::from_rgb(191, 0, 191),
            "y" | "yellow" => Color::from_rgb(191, 191, 0),
            "k" | "black" => Color::from_rgb(0, 0, 0),
            "w" | "white" => Color::from_rgb(255, 255, 255),
            _ => return Err(VisError::UnknownColor(name.to_string())),
        };
        Ok(color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Color names of the default 4-rank palette
pub const DEFAULT_PALETTE: &[&str] = &["r", "g", "b", "c"];

/// Ordered rank → color table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::from_rgb(255, 0, 0),
                Color::from_rgb(0, 128, 0),
                Color::from_rgb(0, 0, 255),
                Color::from_rgb(0, 191, 191),
            ],
        }
    }
}

impl Palette {
    /// Build a palette from an explicit color list. Must not be empty.
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(VisError::Config("palette must contain at least one color".into()));
        }
        Ok(Self { colors })
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let colors = names
            .iter()
            .map(|name| Color::from_name(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Color for `rank`, or `RankOutOfRange`
    pub fn color(&self, rank: Rank) -> Result<Color> {
        self.colors
            .get(rank)
            .copied()
            .ok_or(VisError::RankOutOfRange {
                rank,
                len: self.colors.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}
