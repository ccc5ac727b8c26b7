//! Game configuration and color palette.
//!
//! Everything here is validated eagerly: a [`GameConfig`] that reaches
//! [`crate::Game::new`] is known to describe a playable grid.

use std::env;
use std::fmt;

use crate::error::ConfigError;
use crate::types::{
    BLOCK_COLOR_COUNT, DEFAULT_MATRIX_COLUMNS, DEFAULT_MATRIX_ROWS, MAX_MATRIX_COLUMNS,
    MIN_MATRIX_COLUMNS, MIN_VISIBLE_ROW_COUNT, TRANSITION_MS,
};

/// Base colors of the default palette, softened with [`Color::pastel`].
const BASE_COLORS: [&str; BLOCK_COLOR_COUNT as usize] =
    ["#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF"];

/// 24-bit block color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`
    ///
    /// ```
    /// use slide_blocks_core::Color;
    ///
    /// assert_eq!(Color::from_hex("#FF8000").unwrap(), Color::new(255, 128, 0));
    /// assert!(Color::from_hex("FF8000").is_err());
    /// assert!(Color::from_hex("#GG0000").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Blend halfway toward white
    pub fn pastel(self) -> Self {
        let soften = |c: u8| ((c as u16 + 255 + 1) / 2) as u8;
        Self::new(soften(self.r), soften(self.g), soften(self.b))
    }

    /// Scale toward black; 0 keeps the color, 1 yields black
    pub fn darken(self, factor: f32) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&factor) {
            return Err(ConfigError::InvalidFactor(factor));
        }
        let scale = |c: u8| (c as f32 * (1.0 - factor)).round() as u8;
        Ok(Self::new(scale(self.r), scale(self.g), scale(self.b)))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Default pastel palette
pub fn default_palette() -> Vec<Color> {
    BASE_COLORS
        .iter()
        .filter_map(|hex| Color::from_hex(hex).ok())
        .map(Color::pastel)
        .collect()
}

/// Session-wide grid and timing settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub matrix_columns: u8,
    pub matrix_rows: u8,
    /// Playfield rows kept populated by queued spawns
    pub min_visible_rows: u8,
    /// Duration of one shift/fall/clear transition
    pub transition_ms: u32,
    pub palette: Vec<Color>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            matrix_columns: DEFAULT_MATRIX_COLUMNS,
            matrix_rows: DEFAULT_MATRIX_ROWS,
            min_visible_rows: MIN_VISIBLE_ROW_COUNT,
            transition_ms: TRANSITION_MS,
            palette: default_palette(),
        }
    }
}

impl GameConfig {
    /// Create from environment variables, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        let config = Self {
            matrix_columns: parsed("SLIDE_BLOCKS_COLUMNS").unwrap_or(defaults.matrix_columns),
            matrix_rows: parsed("SLIDE_BLOCKS_ROWS").unwrap_or(defaults.matrix_rows),
            min_visible_rows: parsed("SLIDE_BLOCKS_MIN_ROWS").unwrap_or(defaults.min_visible_rows),
            transition_ms: parsed("SLIDE_BLOCKS_TRANSITION_MS").unwrap_or(defaults.transition_ms),
            palette: defaults.palette,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.matrix_columns < MIN_MATRIX_COLUMNS
            || self.matrix_columns as usize > MAX_MATRIX_COLUMNS
        {
            return Err(ConfigError::Columns {
                got: self.matrix_columns,
                min: MIN_MATRIX_COLUMNS,
                max: MAX_MATRIX_COLUMNS,
            });
        }
        if self.matrix_rows == 0 {
            return Err(ConfigError::Rows);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.palette.len() > u8::MAX as usize {
            return Err(ConfigError::PaletteTooLarge(self.palette.len()));
        }
        Ok(())
    }

    /// Number of palette entries, as handed to the row generator
    pub fn color_count(&self) -> u8 {
        self.palette.len().min(u8::MAX as usize) as u8
    }
}
