//! Color schemes and font settings, in their partial (override / template
//! default) and total (resolved) forms.

use serde::{Deserialize, Serialize};

use crate::style::color::{Color, ColorRole};

// ────────────────────────────────────────────────────────────────────────────
// Colors
// ────────────────────────────────────────────────────────────────────────────

/// A color scheme where any key may be absent.
///
/// Used for per-document overrides and for template defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialColorScheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_heading: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<Color>,
}

impl PartialColorScheme {
    pub const EMPTY: PartialColorScheme = PartialColorScheme {
        primary: None,
        secondary: None,
        heading: None,
        sub_heading: None,
        text: None,
        background: None,
        accent: None,
    };

    pub fn get(&self, role: ColorRole) -> Option<Color> {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Heading => self.heading,
            ColorRole::SubHeading => self.sub_heading,
            ColorRole::Text => self.text,
            ColorRole::Background => self.background,
            ColorRole::Accent => self.accent,
        }
    }

    pub fn set(&mut self, role: ColorRole, color: Option<Color>) {
        let slot = match role {
            ColorRole::Primary => &mut self.primary,
            ColorRole::Secondary => &mut self.secondary,
            ColorRole::Heading => &mut self.heading,
            ColorRole::SubHeading => &mut self.sub_heading,
            ColorRole::Text => &mut self.text,
            ColorRole::Background => &mut self.background,
            ColorRole::Accent => &mut self.accent,
        };
        *slot = color;
    }

    pub fn is_empty(&self) -> bool {
        ColorRole::ALL.iter().all(|role| self.get(*role).is_none())
    }
}

/// A total color scheme: every role has a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub primary: Color,
    pub secondary: Color,
    pub heading: Color,
    pub sub_heading: Color,
    pub text: Color,
    pub background: Color,
    pub accent: Color,
}

impl ColorScheme {
    pub fn get(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Heading => self.heading,
            ColorRole::SubHeading => self.sub_heading,
            ColorRole::Text => self.text,
            ColorRole::Background => self.background,
            ColorRole::Accent => self.accent,
        }
    }
}

/// Last-resort colors used when neither the document nor the template sets a key.
pub const FALLBACK_COLORS: ColorScheme = ColorScheme {
    primary: Color::rgb(0x1f, 0x29, 0x37),
    secondary: Color::rgb(0x4b, 0x55, 0x63),
    heading: Color::rgb(0x11, 0x18, 0x27),
    sub_heading: Color::rgb(0x37, 0x41, 0x51),
    text: Color::rgb(0x1f, 0x29, 0x37),
    background: Color::rgb(0xff, 0xff, 0xff),
    accent: Color::rgb(0x25, 0x63, 0xeb),
};

// ────────────────────────────────────────────────────────────────────────────
// Fonts
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    /// Multiplier applied to every base text size.
    pub fn multiplier(self) -> f32 {
        match self {
            FontSize::Small => 0.875,
            FontSize::Medium => 1.0,
            FontSize::Large => 1.125,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Some(FontSize::Small),
            "medium" => Some(FontSize::Medium),
            "large" => Some(FontSize::Large),
            _ => None,
        }
    }
}

/// Per-document font overrides. Absent keys fall through to the template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
}

/// Font defaults carried by a catalog template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFonts {
    pub heading_font: &'static str,
    pub body_font: &'static str,
    pub font_size: FontSize,
}

/// Fully resolved font settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSettings {
    pub heading_font: String,
    pub body_font: String,
    pub font_size: FontSize,
    pub size_multiplier: f32,
}

pub const FALLBACK_HEADING_FONT: &str = "Inter";
pub const FALLBACK_BODY_FONT: &str = "Inter";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_scheme_set_then_get() {
        let mut scheme = PartialColorScheme::default();
        assert!(scheme.is_empty());
        scheme.set(ColorRole::Accent, Some(Color::rgb(1, 2, 3)));
        assert_eq!(scheme.get(ColorRole::Accent), Some(Color::rgb(1, 2, 3)));
        assert_eq!(scheme.get(ColorRole::Primary), None);
        assert!(!scheme.is_empty());
    }

    #[test]
    fn test_font_size_multipliers_are_ordered() {
        assert!(FontSize::Small.multiplier() < FontSize::Medium.multiplier());
        assert!(FontSize::Medium.multiplier() < FontSize::Large.multiplier());
        assert_eq!(FontSize::Medium.multiplier(), 1.0);
    }

    #[test]
    fn test_font_size_parse_is_case_insensitive() {
        assert_eq!(FontSize::parse("LARGE"), Some(FontSize::Large));
        assert_eq!(FontSize::parse(" small "), Some(FontSize::Small));
        assert_eq!(FontSize::parse("huge"), None);
    }

    #[test]
    fn test_partial_scheme_serializes_camel_case_and_skips_missing() {
        let mut scheme = PartialColorScheme::default();
        scheme.set(ColorRole::SubHeading, Some(Color::rgb(0, 0, 0)));
        let json = serde_json::to_value(scheme).unwrap();
        assert_eq!(json, serde_json::json!({ "subHeading": "#000000" }));
    }
}
