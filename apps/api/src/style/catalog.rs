//! Static template catalog: `id → {layout program, default colors, default fonts, premium}`.
//!
//! Read-only. Template color defaults may be partial; the resolver falls through
//! to `FALLBACK_COLORS` for any key a template leaves unset.

use serde::Serialize;
use tracing::warn;

use crate::layout::LayoutProgram;
use crate::style::color::Color;
use crate::style::scheme::{FontSize, PartialColorScheme, TemplateFonts};

/// Template id used when a document's `templateId` does not resolve.
pub const DEFAULT_TEMPLATE_ID: &str = "standard";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub layout_program: LayoutProgram,
    pub default_color_scheme: PartialColorScheme,
    pub default_font_settings: TemplateFonts,
    pub is_premium: bool,
}

const fn c(hex: u32) -> Option<Color> {
    Some(Color::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8))
}

static CATALOG: [Template; 8] = [
    Template {
        id: "standard",
        name: "Standard",
        layout_program: LayoutProgram::Standard,
        default_color_scheme: PartialColorScheme {
            primary: c(0x1e40af),
            secondary: c(0x64748b),
            heading: c(0x1e3a8a),
            sub_heading: c(0x334155),
            text: c(0x1f2937),
            background: c(0xffffff),
            accent: c(0x3b82f6),
        },
        default_font_settings: TemplateFonts {
            heading_font: "Inter",
            body_font: "Inter",
            font_size: FontSize::Medium,
        },
        is_premium: false,
    },
    Template {
        id: "modern",
        name: "Modern",
        layout_program: LayoutProgram::Modern,
        default_color_scheme: PartialColorScheme {
            primary: c(0x0f766e),
            secondary: c(0x5eead4),
            heading: c(0x134e4a),
            sub_heading: c(0x115e59),
            text: c(0x1f2937),
            background: c(0xffffff),
            accent: c(0x14b8a6),
        },
        default_font_settings: TemplateFonts {
            heading_font: "Montserrat",
            body_font: "Open Sans",
            font_size: FontSize::Medium,
        },
        is_premium: false,
    },
    Template {
        id: "minimalist",
        name: "Minimalist",
        layout_program: LayoutProgram::Minimalist,
        // Accent and sub-heading intentionally fall through to the fallback scheme.
        default_color_scheme: PartialColorScheme {
            primary: c(0x111111),
            secondary: c(0x6b7280),
            heading: c(0x111111),
            sub_heading: None,
            text: c(0x374151),
            background: c(0xffffff),
            accent: None,
        },
        default_font_settings: TemplateFonts {
            heading_font: "Helvetica Neue",
            body_font: "Helvetica Neue",
            font_size: FontSize::Small,
        },
        is_premium: false,
    },
    Template {
        id: "creative",
        name: "Creative",
        layout_program: LayoutProgram::Creative,
        default_color_scheme: PartialColorScheme {
            primary: c(0x7c3aed),
            secondary: c(0xf472b6),
            heading: c(0x5b21b6),
            sub_heading: c(0x6d28d9),
            text: c(0x1f2937),
            background: c(0xfdfcff),
            accent: c(0xf59e0b),
        },
        default_font_settings: TemplateFonts {
            heading_font: "Poppins",
            body_font: "Nunito",
            font_size: FontSize::Medium,
        },
        is_premium: false,
    },
    Template {
        id: "professional",
        name: "Professional",
        layout_program: LayoutProgram::Professional,
        default_color_scheme: PartialColorScheme {
            primary: c(0x1e293b),
            secondary: c(0x475569),
            heading: c(0x0f172a),
            sub_heading: c(0x334155),
            text: c(0x1e293b),
            background: c(0xffffff),
            accent: c(0xb45309),
        },
        default_font_settings: TemplateFonts {
            heading_font: "Merriweather",
            body_font: "Source Sans Pro",
            font_size: FontSize::Medium,
        },
        is_premium: false,
    },
    Template {
        id: "executive",
        name: "Executive",
        layout_program: LayoutProgram::Professional,
        default_color_scheme: PartialColorScheme {
            primary: c(0x14213d),
            secondary: c(0x6c757d),
            heading: c(0x14213d),
            sub_heading: c(0x3d405b),
            text: c(0x212529),
            background: c(0xffffff),
            accent: c(0xc9a227),
        },
        default_font_settings: TemplateFonts {
            heading_font: "Playfair Display",
            body_font: "Lato",
            font_size: FontSize::Medium,
        },
        is_premium: true,
    },
    Template {
        id: "elegant",
        name: "Elegant",
        layout_program: LayoutProgram::Minimalist,
        default_color_scheme: PartialColorScheme {
            primary: c(0x3f3f46),
            secondary: c(0xa1a1aa),
            heading: c(0x27272a),
            sub_heading: c(0x52525b),
            text: c(0x3f3f46),
            background: c(0xfafaf9),
            accent: c(0xa16207),
        },
        default_font_settings: TemplateFonts {
            heading_font: "Cormorant Garamond",
            body_font: "Georgia",
            font_size: FontSize::Medium,
        },
        is_premium: true,
    },
    Template {
        id: "tech",
        name: "Tech",
        layout_program: LayoutProgram::Modern,
        default_color_scheme: PartialColorScheme {
            primary: c(0x0b1120),
            secondary: c(0x38bdf8),
            heading: c(0x0f172a),
            sub_heading: c(0x0369a1),
            text: c(0x1e293b),
            background: c(0xffffff),
            accent: c(0x22d3ee),
        },
        default_font_settings: TemplateFonts {
            heading_font: "JetBrains Mono",
            body_font: "Inter",
            font_size: FontSize::Small,
        },
        is_premium: true,
    },
];

/// All catalog templates, in display order.
pub fn all_templates() -> &'static [Template] {
    &CATALOG
}

/// Looks up a template by id without any fallback.
pub fn find_template(id: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.id == id)
}

/// Resolves a template id, falling back to `standard` for unknown ids.
///
/// The fallback is logged, never surfaced: documents must always render.
pub fn resolve_template(id: &str) -> &'static Template {
    match find_template(id.trim()) {
        Some(template) => template,
        None => {
            warn!(template_id = id, "Unknown template id, falling back to '{DEFAULT_TEMPLATE_ID}'");
            &CATALOG[0]
        }
    }
}
