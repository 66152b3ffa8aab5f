//! The render tree: the shared visual description produced by a layout
//! program and consumed by every backend.
//!
//! Colors appear only as `ColorRole`s. Sizes are CSS px with the font-size
//! multiplier already applied. Region geometry is expressed as fractions of the
//! page width so each backend can map it onto its own surface.

use serde::Serialize;

use crate::document::model::{FrameStyle, SectionKind};
use crate::layout::icons::Icon;
use crate::layout::LayoutProgram;
use crate::style::color::{Color, ColorRole};
use crate::style::resolver::ResolvedStyle;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTree {
    pub program: LayoutProgram,
    pub style: ResolvedStyle,
    pub page_background: ColorRole,
    /// Top-band regions first, then body regions, each in reading order.
    pub regions: Vec<Region>,
}

impl RenderTree {
    /// Every section block in emission order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionBlock> {
        self.regions
            .iter()
            .flat_map(|r| r.blocks.iter())
            .filter_map(|b| match b {
                Block::Section(s) => Some(s),
                _ => None,
            })
    }

    pub fn regions_in(&self, band: Band) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.band == band)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Regions
// ────────────────────────────────────────────────────────────────────────────

/// Vertical band a region lives in. Top regions span the page above the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Top,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionRole {
    Banner,
    Single,
    Sidebar,
    Main,
    Left,
    Right,
}

impl RegionRole {
    pub fn as_str(self) -> &'static str {
        match self {
            RegionRole::Banner => "banner",
            RegionRole::Single => "single",
            RegionRole::Sidebar => "sidebar",
            RegionRole::Main => "main",
            RegionRole::Left => "left",
            RegionRole::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub role: RegionRole,
    pub band: Band,
    /// Left edge as a fraction of page width.
    pub x: f32,
    /// Width as a fraction of page width.
    pub width: f32,
    pub min_height_px: f32,
    pub padding_px: f32,
    pub background: Option<ColorRole>,
    pub text_color: ColorRole,
    pub align: Align,
    pub blocks: Vec<Block>,
}

impl Region {
    pub fn new(role: RegionRole, band: Band, x: f32, width: f32) -> Self {
        Self {
            role,
            band,
            x,
            width,
            min_height_px: 0.0,
            padding_px: 36.0,
            background: None,
            text_color: ColorRole::Text,
            align: Align::Left,
            blocks: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: ColorRole, text_color: ColorRole) -> Self {
        self.background = Some(background);
        self.text_color = text_color;
        self
    }

    pub fn with_padding(mut self, padding_px: f32) -> Self {
        self.padding_px = padding_px;
        self
    }

    pub fn with_min_height(mut self, min_height_px: f32) -> Self {
        self.min_height_px = min_height_px;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Block {
    Decoration(Decoration),
    Header(HeaderBlock),
    Contact(ContactBlock),
    Summary(SummaryBlock),
    Section(SectionBlock),
}

/// Purely ornamental shape. Coordinates are px relative to the top-left corner
/// of the enclosing region and may extend past its edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    pub shape: Shape,
    pub color: ColorRole,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    /// Rectangle rotated by `rotation_deg` about its center.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rotation_deg: f32,
    },
    Polygon { points: Vec<(f32, f32)> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBlock {
    pub name: String,
    pub title: String,
    pub name_color: ColorRole,
    pub title_color: ColorRole,
    pub name_size_px: f32,
    pub title_size_px: f32,
    pub uppercase_name: bool,
    pub image: Option<ImageSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    pub src: String,
    pub size_px: f32,
    pub is_circle: bool,
    pub frame: Option<ImageFrame>,
    pub is_transparent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFrame {
    pub color: Color,
    pub style: FrameStyle,
    pub width_px: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Row,
    Column,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBlock {
    pub label: Option<String>,
    pub entries: Vec<ContactEntry>,
    pub flow: Flow,
    pub color: ColorRole,
    pub icon_color: ColorRole,
    pub size_px: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEntry {
    pub icon: Icon,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBlock {
    pub heading: Option<Heading>,
    pub text: String,
    pub color: ColorRole,
    pub size_px: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    pub text: String,
    pub color: ColorRole,
    pub size_px: f32,
    pub uppercase: bool,
    /// Letter spacing in em.
    pub tracking_em: f32,
    /// Rule drawn under the heading.
    pub rule: Option<ColorRole>,
}

impl Heading {
    /// The heading text as it appears on the page.
    pub fn display_text(&self) -> String {
        if self.uppercase {
            self.text.to_uppercase()
        } else {
            self.text.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBlock {
    pub section_id: String,
    pub kind: SectionKind,
    pub heading: Heading,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "entry", rename_all = "camelCase")]
pub enum Entry {
    Item(ItemEntry),
    Skill(SkillEntry),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEntry {
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub meta: String,
    pub body: String,
    pub tags: Vec<String>,
    pub title_color: ColorRole,
    pub subtitle_color: ColorRole,
    pub title_size_px: f32,
    pub body_size_px: f32,
    pub marker: Option<Marker>,
}

/// Text fields of an item, in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Title,
    Subtitle,
    Date,
    Meta,
    Body,
    Tags,
}

impl ItemField {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemField::Title => "item-title",
            ItemField::Subtitle => "item-subtitle",
            ItemField::Date => "item-date",
            ItemField::Meta => "item-meta",
            ItemField::Body => "item-body",
            ItemField::Tags => "item-tags",
        }
    }
}

pub const TAG_SEPARATOR: &str = " · ";

impl ItemEntry {
    /// Non-empty fields in reading order, trimmed. Tags are joined into one run.
    pub fn runs(&self) -> Vec<(ItemField, String)> {
        let tags = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(TAG_SEPARATOR);
        [
            (ItemField::Title, self.title.as_str()),
            (ItemField::Subtitle, self.subtitle.as_str()),
            (ItemField::Date, self.date.as_str()),
            (ItemField::Meta, self.meta.as_str()),
            (ItemField::Body, self.body.as_str()),
            (ItemField::Tags, tags.as_str()),
        ]
        .into_iter()
        .map(|(field, text)| (field, text.trim()))
        .filter(|(_, text)| !text.is_empty())
        .map(|(field, text)| (field, text.to_string()))
        .collect()
    }

    pub fn text_runs(&self) -> Vec<String> {
        self.runs().into_iter().map(|(_, text)| text).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Marker {
    TimelineDot { color: ColorRole },
}

/// How a skill's proportional fill is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillIdiom {
    Stars,
    Bars,
    Pills,
    Chips,
}

impl SkillIdiom {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillIdiom::Stars => "stars",
            SkillIdiom::Bars => "bars",
            SkillIdiom::Pills => "pills",
            SkillIdiom::Chips => "chips",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub name: String,
    pub level: u8,
    /// `level / 5`.
    pub fill: f32,
    pub idiom: SkillIdiom,
    pub fill_color: ColorRole,
    pub track_color: ColorRole,
    pub label_color: ColorRole,
    pub size_px: f32,
    pub icon: Option<Icon>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ItemEntry {
        ItemEntry {
            title: "Engineer".to_string(),
            subtitle: "  ".to_string(),
            date: "2020 — Present".to_string(),
            meta: String::new(),
            body: " Shipped things. ".to_string(),
            tags: vec!["Rust".to_string(), " ".to_string(), "axum".to_string()],
            title_color: ColorRole::Heading,
            subtitle_color: ColorRole::SubHeading,
            title_size_px: 14.0,
            body_size_px: 12.0,
            marker: None,
        }
    }

    #[test]
    fn test_runs_skip_empty_fields_in_reading_order() {
        let fields: Vec<ItemField> = item().runs().into_iter().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            vec![ItemField::Title, ItemField::Date, ItemField::Body, ItemField::Tags]
        );
    }

    #[test]
    fn test_text_runs_trim_and_join_tags() {
        assert_eq!(
            item().text_runs(),
            vec!["Engineer", "2020 — Present", "Shipped things.", "Rust · axum"]
        );
    }

    #[test]
    fn test_heading_display_text() {
        let heading = Heading {
            text: "Skills".to_string(),
            color: ColorRole::Heading,
            size_px: 16.0,
            uppercase: true,
            tracking_em: 0.2,
            rule: None,
        };
        assert_eq!(heading.display_text(), "SKILLS");
    }
}
