//! Level descriptors
//!
//! Levels differ only in theme: the path generator is the same for all of
//! them. The theme colour tints path platforms; the background colour is
//! passed through to the renderer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("unknown level '{0}'")]
    UnknownLevel(String),
    #[error("bad colour '{0}' (expected #rrggbb)")]
    BadColor(String),
}

/// 24-bit RGB colour, stored as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Neutral grey used for the spawn platform
    pub const NEUTRAL: Rgb = Rgb(0x333333);

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn parse_hex(s: &str) -> Result<Self, LevelError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(LevelError::BadColor(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Rgb)
            .map_err(|_| LevelError::BadColor(s.to_string()))
    }

    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Path platform colour
    pub theme_color: Rgb,
    /// Scene background (and fog) colour
    pub background_color: Rgb,
}

impl Level {
    pub fn new(id: &str, theme_color: Rgb, background_color: Rgb) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            theme_color,
            background_color,
        }
    }
}

/// Built-in levels, in menu order
pub fn catalog() -> Vec<Level> {
    vec![
        Level {
            id: "moscow-winter".into(),
            name: "Winter Moscow".into(),
            description: "Parkour across the snowy rooftops of the capital.".into(),
            difficulty: Difficulty::Easy,
            theme_color: Rgb(0x38bdf8),
            background_color: Rgb(0xccddff),
        },
        Level {
            id: "red-square".into(),
            name: "Red Square".into(),
            description: "The legendary obby in the heart of the city.".into(),
            difficulty: Difficulty::Medium,
            theme_color: Rgb(0xef4444),
            background_color: Rgb(0xaa4444),
        },
        Level {
            id: "cyber-russia".into(),
            name: "Cyber Russia 2077".into(),
            description: "Parkour of the future under neon lights.".into(),
            difficulty: Difficulty::Hard,
            theme_color: Rgb(0xa855f7),
            background_color: Rgb(0x050510),
        },
    ]
}

/// Look up a built-in level by id
pub fn find(id: &str) -> Result<Level, LevelError> {
    catalog()
        .into_iter()
        .find(|l| l.id == id)
        .ok_or_else(|| LevelError::UnknownLevel(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("#38bdf8"), Ok(Rgb(0x38bdf8)));
        assert_eq!(Rgb::parse_hex("a855f7"), Ok(Rgb(0xa855f7)));
        assert!(Rgb::parse_hex("#fff").is_err());
        assert!(Rgb::parse_hex("#gggggg").is_err());
        assert_eq!(Rgb(0x050510).to_hex(), "#050510");
    }

    #[test]
    fn test_catalog_lookup() {
        let ids: Vec<_> = catalog().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, ["moscow-winter", "red-square", "cyber-russia"]);

        let level = find("cyber-russia").unwrap();
        assert_eq!(level.difficulty, Difficulty::Hard);
        assert_eq!(level.background_color, Rgb(0x050510));

        assert_eq!(find("atlantis"), Err(LevelError::UnknownLevel("atlantis".into())));
    }
}
