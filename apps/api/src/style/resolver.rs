//! Style resolution: merges document overrides, template defaults and fallbacks
//! into a total color/font mapping.
//!
//! Precedence per key: document override → template default → fallback constant.
//! Total, side-effect free and independent of call order.

use serde::Serialize;

use crate::style::catalog::Template;
use crate::style::color::{Color, ColorRole};
use crate::style::scheme::{
    ColorScheme, FontOverrides, FontSettings, PartialColorScheme, FALLBACK_BODY_FONT,
    FALLBACK_COLORS, FALLBACK_HEADING_FONT,
};

/// The style every backend reads colors and fonts from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub template_id: String,
    pub colors: ColorScheme,
    pub fonts: FontSettings,
}

impl ResolvedStyle {
    pub fn color(&self, role: ColorRole) -> Color {
        self.colors.get(role)
    }

    /// Scales a base size (px) by the font-size multiplier.
    pub fn size(&self, base_px: f32) -> f32 {
        base_px * self.fonts.size_multiplier
    }
}

/// Resolves a single color key.
pub fn resolve_color(
    role: ColorRole,
    overrides: &PartialColorScheme,
    template: &Template,
) -> Color {
    overrides
        .get(role)
        .or_else(|| template.default_color_scheme.get(role))
        .unwrap_or_else(|| FALLBACK_COLORS.get(role))
}

pub fn resolve_colors(overrides: &PartialColorScheme, template: &Template) -> ColorScheme {
    let get = |role| resolve_color(role, overrides, template);
    ColorScheme {
        primary: get(ColorRole::Primary),
        secondary: get(ColorRole::Secondary),
        heading: get(ColorRole::Heading),
        sub_heading: get(ColorRole::SubHeading),
        text: get(ColorRole::Text),
        background: get(ColorRole::Background),
        accent: get(ColorRole::Accent),
    }
}

pub fn resolve_fonts(overrides: &FontOverrides, template: &Template) -> FontSettings {
    let pick = |value: &Option<String>, template_value: &str, fallback: &str| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or(Some(template_value).filter(|s| !s.is_empty()))
            .unwrap_or(fallback)
            .to_string()
    };

    let font_size = overrides
        .font_size
        .unwrap_or(template.default_font_settings.font_size);

    FontSettings {
        heading_font: pick(
            &overrides.heading_font,
            template.default_font_settings.heading_font,
            FALLBACK_HEADING_FONT,
        ),
        body_font: pick(
            &overrides.body_font,
            template.default_font_settings.body_font,
            FALLBACK_BODY_FONT,
        ),
        font_size,
        size_multiplier: font_size.multiplier(),
    }
}

pub fn resolve_style(
    colors: &PartialColorScheme,
    fonts: &FontOverrides,
    template: &Template,
) -> ResolvedStyle {
    ResolvedStyle {
        template_id: template.id.to_string(),
        colors: resolve_colors(colors, template),
        fonts: resolve_fonts(fonts, template),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::catalog::{all_templates, find_template, resolve_template};
    use crate::style::scheme::FontSize;

    #[test]
    fn test_override_beats_template_default() {
        let template = find_template("standard").unwrap();
        let mut overrides = PartialColorScheme::default();
        overrides.set(ColorRole::Heading, Some(Color::rgb(9, 9, 9)));
        let colors = resolve_colors(&overrides, template);
        assert_eq!(colors.heading, Color::rgb(9, 9, 9));
        assert_eq!(
            Some(colors.primary),
            template.default_color_scheme.primary,
            "non-overridden key should come from the template"
        );
    }

    #[test]
    fn test_missing_template_key_uses_fallback() {
        let template = find_template("minimalist").unwrap();
        assert!(template.default_color_scheme.accent.is_none());
        let colors = resolve_colors(&PartialColorScheme::default(), template);
        assert_eq!(colors.accent, FALLBACK_COLORS.accent);
        assert_eq!(colors.sub_heading, FALLBACK_COLORS.sub_heading);
    }

    #[test]
    fn test_every_role_defined_for_known_and_unknown_templates() {
        let ids: Vec<&str> = all_templates()
            .iter()
            .map(|t| t.id)
            .chain(["", "unknown", "STANDARD"])
            .collect();
        for id in ids {
            let template = resolve_template(id);
            let colors = resolve_colors(&PartialColorScheme::default(), template);
            for role in ColorRole::ALL {
                // `get` is total; the hex form must always be a full #rrggbb.
                assert_eq!(colors.get(role).to_hex().len(), 7, "{id}/{role:?}");
            }
        }
    }

    #[test]
    fn test_resolution_is_order_independent() {
        let template = find_template("creative").unwrap();
        let mut overrides = PartialColorScheme::default();
        overrides.set(ColorRole::Text, Some(Color::rgb(1, 1, 1)));
        let forward: Vec<Color> = ColorRole::ALL
            .iter()
            .map(|r| resolve_color(*r, &overrides, template))
            .collect();
        let mut backward: Vec<Color> = ColorRole::ALL
            .iter()
            .rev()
            .map(|r| resolve_color(*r, &overrides, template))
            .collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_font_overrides_and_blank_values() {
        let template = find_template("modern").unwrap();
        let overrides = FontOverrides {
            heading_font: Some("Georgia".to_string()),
            body_font: Some("   ".to_string()),
            font_size: Some(FontSize::Large),
        };
        let fonts = resolve_fonts(&overrides, template);
        assert_eq!(fonts.heading_font, "Georgia");
        assert_eq!(fonts.body_font, "Open Sans", "blank override falls through");
        assert_eq!(fonts.font_size, FontSize::Large);
        assert_eq!(fonts.size_multiplier, 1.125);
    }

    #[test]
    fn test_font_size_defaults_to_template() {
        let template = find_template("minimalist").unwrap();
        let fonts = resolve_fonts(&FontOverrides::default(), template);
        assert_eq!(fonts.font_size, FontSize::Small);
        assert_eq!(fonts.size_multiplier, 0.875);
    }

    #[test]
    fn test_resolved_style_size_scales() {
        let template = find_template("minimalist").unwrap();
        let style = resolve_style(&PartialColorScheme::default(), &FontOverrides::default(), template);
        assert!((style.size(16.0) - 14.0).abs() < 1e-5);
        assert_eq!(style.template_id, "minimalist");
    }
}
