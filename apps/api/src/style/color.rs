//! RGB color values and the seven semantic color roles.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque sRGB color. Serialized as a lowercase `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb`, `#rrggbb` (leading `#` optional). Anything else is `None`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let mut it = hex.chars().map(|c| c.to_digit(16).unwrap_or(0) as u8 * 17);
                Some(Self::rgb(it.next()?, it.next()?, it.next()?))
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels scaled to 0.0–1.0 (PDF color operands).
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::from_hex(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{raw}'")))
    }
}

/// The seven semantic roles of a `ColorScheme`.
///
/// Render trees reference colors only by role; each backend maps a role to a
/// concrete `Color` through the resolved style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Heading,
    SubHeading,
    Text,
    Background,
    Accent,
}

impl ColorRole {
    pub const ALL: [ColorRole; 7] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Heading,
        ColorRole::SubHeading,
        ColorRole::Text,
        ColorRole::Background,
        ColorRole::Accent,
    ];

    /// The document JSON key for this role.
    pub fn key(self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Heading => "heading",
            ColorRole::SubHeading => "subHeading",
            ColorRole::Text => "text",
            ColorRole::Background => "background",
            ColorRole::Accent => "accent",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.key() == key)
    }
}
