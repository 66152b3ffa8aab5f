//! Building blocks shared by all five layout programs.
//!
//! Rules enforced here rather than per program:
//! - sections with no items are never emitted
//! - missing item fields are empty strings
//! - skill fill is `level / 5`
//! - a start date without an end date renders as "start — <ongoing>"

use serde::{Deserialize, Serialize};

use crate::document::model::{
    CvDocument, EducationItem, ExperienceItem, PersonalInfo, ProjectItem, Section, SectionItems,
    SkillItem,
};
use crate::layout::icons::{skill_icon, Icon};
use crate::layout::tree::{
    ContactBlock, ContactEntry, Entry, Flow, Heading, HeaderBlock, ImageFrame, ImageSpec,
    ItemEntry, Marker, SectionBlock, SkillEntry, SkillIdiom, SummaryBlock,
};
use crate::style::color::{Color, ColorRole};
use crate::style::resolver::ResolvedStyle;

// ────────────────────────────────────────────────────────────────────────────
// Options
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Sv,
    En,
}

impl Locale {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sv" | "sv-se" | "swedish" => Some(Locale::Sv),
            "en" | "en-us" | "en-gb" | "english" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Sv => "sv",
            Locale::En => "en",
        }
    }

    /// Shown in place of a missing end date.
    pub fn ongoing_label(self) -> &'static str {
        match self {
            Locale::Sv => "Nuvarande",
            Locale::En => "Present",
        }
    }

    pub fn summary_label(self) -> &'static str {
        match self {
            Locale::Sv => "Profil",
            Locale::En => "Profile",
        }
    }

    pub fn contact_label(self) -> &'static str {
        match self {
            Locale::Sv => "Kontakt",
            Locale::En => "Contact",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    #[serde(default)]
    pub locale: Locale,
}

// ────────────────────────────────────────────────────────────────────────────
// Base sizes (px, before the font-size multiplier)
// ────────────────────────────────────────────────────────────────────────────

pub const NAME_PX: f32 = 30.0;
pub const TITLE_PX: f32 = 16.0;
pub const HEADING_PX: f32 = 16.0;
pub const ITEM_TITLE_PX: f32 = 13.5;
pub const BODY_PX: f32 = 11.5;
pub const SMALL_PX: f32 = 10.5;
pub const PORTRAIT_PX: f32 = 110.0;

/// Separator between start and end dates.
pub const DATE_SEPARATOR: &str = " — ";

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

/// Formats a date range.
///
/// start + end → "start — end"; start only → "start — <ongoing>";
/// end only → "end"; neither → "".
pub fn date_range(start: Option<&str>, end: Option<&str>, locale: Locale) -> String {
    match (clean(start), clean(end)) {
        (Some(start), Some(end)) => format!("{start}{DATE_SEPARATOR}{end}"),
        (Some(start), None) => format!("{start}{DATE_SEPARATOR}{}", locale.ongoing_label()),
        (None, Some(end)) => end.to_string(),
        (None, None) => String::new(),
    }
}

/// Trimmed, or `None` when blank.
fn clean(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Joins non-empty parts with `sep`.
pub fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Sections that produce output: non-empty, in document order.
pub fn visible_sections(doc: &CvDocument) -> impl Iterator<Item = &Section> {
    doc.sections.iter().filter(|s| !s.items.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Header, contact, summary
// ────────────────────────────────────────────────────────────────────────────

pub fn header(
    info: &PersonalInfo,
    style: &ResolvedStyle,
    name_color: ColorRole,
    title_color: ColorRole,
) -> HeaderBlock {
    HeaderBlock {
        name: info.full_name(),
        title: info.title.trim().to_string(),
        name_color,
        title_color,
        name_size_px: style.size(NAME_PX),
        title_size_px: style.size(TITLE_PX),
        uppercase_name: false,
        image: portrait(info, PORTRAIT_PX),
    }
}

pub fn portrait(info: &PersonalInfo, size_px: f32) -> Option<ImageSpec> {
    let image = info.profile_image.as_ref()?;
    if image.url.trim().is_empty() {
        return None;
    }
    let frame = image.show_frame.then(|| ImageFrame {
        color: Color::from_hex(&image.frame_color).unwrap_or(Color::rgb(255, 255, 255)),
        style: image.frame_style,
        width_px: image.frame_width,
    });
    Some(ImageSpec {
        src: image.url.clone(),
        size_px,
        is_circle: image.is_circle,
        frame,
        is_transparent: image.is_transparent,
    })
}

pub fn contact_entries(info: &PersonalInfo) -> Vec<ContactEntry> {
    [
        (Icon::Mail, &info.email),
        (Icon::Phone, &info.phone),
        (Icon::Location, &info.location),
        (Icon::Globe, &info.website),
        (Icon::Linkedin, &info.linkedin),
    ]
    .into_iter()
    .filter(|(_, text)| !text.trim().is_empty())
    .map(|(icon, text)| ContactEntry {
        icon,
        text: text.trim().to_string(),
    })
    .collect()
}

pub fn contact(
    info: &PersonalInfo,
    style: &ResolvedStyle,
    flow: Flow,
    color: ColorRole,
    icon_color: ColorRole,
    label: Option<String>,
) -> Option<ContactBlock> {
    let entries = contact_entries(info);
    (!entries.is_empty()).then(|| ContactBlock {
        label,
        entries,
        flow,
        color,
        icon_color,
        size_px: style.size(SMALL_PX),
    })
}

pub fn summary(
    info: &PersonalInfo,
    style: &ResolvedStyle,
    heading: Option<Heading>,
    color: ColorRole,
) -> Option<SummaryBlock> {
    let text = info.summary.trim();
    (!text.is_empty()).then(|| SummaryBlock {
        heading,
        text: text.to_string(),
        color,
        size_px: style.size(BODY_PX),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Heading look for one layout program.
#[derive(Debug, Clone, Copy)]
pub struct HeadingLook {
    pub color: ColorRole,
    pub uppercase: bool,
    pub tracking_em: f32,
    pub rule: Option<ColorRole>,
    pub scale: f32,
}

impl HeadingLook {
    pub fn plain(color: ColorRole) -> Self {
        Self {
            color,
            uppercase: false,
            tracking_em: 0.0,
            rule: None,
            scale: 1.0,
        }
    }

    pub fn heading(&self, text: &str, style: &ResolvedStyle) -> Heading {
        Heading {
            text: text.trim().to_string(),
            color: self.color,
            size_px: style.size(HEADING_PX * self.scale),
            uppercase: self.uppercase,
            tracking_em: self.tracking_em,
            rule: self.rule,
        }
    }
}

/// How items are dressed in one layout program.
#[derive(Debug, Clone, Copy)]
pub struct EntryLook {
    pub title_color: ColorRole,
    pub subtitle_color: ColorRole,
    pub skill_idiom: SkillIdiom,
    pub skill_fill: ColorRole,
    pub skill_track: ColorRole,
    pub skill_label: ColorRole,
    /// Timeline marker on experience items.
    pub timeline: Option<ColorRole>,
    /// Keyword-matched icons on skills.
    pub skill_icons: bool,
}

impl EntryLook {
    pub fn new(title_color: ColorRole, subtitle_color: ColorRole, skill_idiom: SkillIdiom) -> Self {
        Self {
            title_color,
            subtitle_color,
            skill_idiom,
            skill_fill: ColorRole::Accent,
            skill_track: ColorRole::Secondary,
            skill_label: ColorRole::Text,
            timeline: None,
            skill_icons: false,
        }
    }
}

pub fn section_block(
    section: &Section,
    heading: &HeadingLook,
    look: &EntryLook,
    style: &ResolvedStyle,
    locale: Locale,
) -> SectionBlock {
    let entries = match &section.items {
        SectionItems::Education(items) => items
            .iter()
            .map(|i| Entry::Item(education_entry(i, look, style, locale)))
            .collect(),
        SectionItems::Experience(items) => items
            .iter()
            .map(|i| Entry::Item(experience_entry(i, look, style, locale)))
            .collect(),
        SectionItems::Projects(items) => items
            .iter()
            .map(|i| Entry::Item(project_entry(i, look, style, locale)))
            .collect(),
        SectionItems::Skills(items) => items
            .iter()
            .map(|i| Entry::Skill(skill_entry(i, look, style)))
            .collect(),
    };

    SectionBlock {
        section_id: section.id.clone(),
        kind: section.kind(),
        heading: heading.heading(&section.title, style),
        entries,
    }
}

fn item_entry(look: &EntryLook, style: &ResolvedStyle) -> ItemEntry {
    ItemEntry {
        title: String::new(),
        subtitle: String::new(),
        date: String::new(),
        meta: String::new(),
        body: String::new(),
        tags: Vec::new(),
        title_color: look.title_color,
        subtitle_color: look.subtitle_color,
        title_size_px: style.size(ITEM_TITLE_PX),
        body_size_px: style.size(BODY_PX),
        marker: None,
    }
}

fn experience_entry(
    item: &ExperienceItem,
    look: &EntryLook,
    style: &ResolvedStyle,
    locale: Locale,
) -> ItemEntry {
    ItemEntry {
        title: item.position.trim().to_string(),
        subtitle: item.company.trim().to_string(),
        date: date_range(item.start_date.as_deref(), item.end_date.as_deref(), locale),
        meta: item.location.trim().to_string(),
        body: item.description.trim().to_string(),
        marker: look.timeline.map(|color| Marker::TimelineDot { color }),
        ..item_entry(look, style)
    }
}

fn education_entry(
    item: &EducationItem,
    look: &EntryLook,
    style: &ResolvedStyle,
    locale: Locale,
) -> ItemEntry {
    ItemEntry {
        title: join_non_empty([item.degree.as_str(), item.field.as_str()], ", "),
        subtitle: item.institution.trim().to_string(),
        date: date_range(item.start_date.as_deref(), item.end_date.as_deref(), locale),
        meta: item.location.trim().to_string(),
        body: item.description.trim().to_string(),
        ..item_entry(look, style)
    }
}

fn project_entry(
    item: &ProjectItem,
    look: &EntryLook,
    style: &ResolvedStyle,
    locale: Locale,
) -> ItemEntry {
    ItemEntry {
        title: item.name.trim().to_string(),
        subtitle: item.link.trim().to_string(),
        date: date_range(item.start_date.as_deref(), item.end_date.as_deref(), locale),
        body: item.description.trim().to_string(),
        tags: item.technologies.clone(),
        ..item_entry(look, style)
    }
}

fn skill_entry(item: &SkillItem, look: &EntryLook, style: &ResolvedStyle) -> SkillEntry {
    SkillEntry {
        name: item.name.trim().to_string(),
        level: item.level,
        fill: item.fill_ratio(),
        idiom: look.skill_idiom,
        fill_color: look.skill_fill,
        track_color: look.skill_track,
        label_color: look.skill_label,
        size_px: style.size(BODY_PX),
        icon: look.skill_icons.then(|| skill_icon(&item.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::ProfileImage;

    #[test]
    fn test_date_range_start_only_is_ongoing() {
        assert_eq!(date_range(Some("2020-01"), None, Locale::Sv), "2020-01 — Nuvarande");
        assert_eq!(date_range(Some("2020-01"), Some(" "), Locale::En), "2020-01 — Present");
    }

    #[test]
    fn test_date_range_variants() {
        assert_eq!(date_range(Some("2018"), Some("2020"), Locale::En), "2018 — 2020");
        assert_eq!(date_range(None, Some("2020"), Locale::En), "2020");
        assert_eq!(date_range(None, None, Locale::En), "");
    }

    #[test]
    fn test_join_non_empty_skips_blanks() {
        assert_eq!(join_non_empty(["MSc", " ", "Physics"], ", "), "MSc, Physics");
        assert_eq!(join_non_empty(["", ""], ", "), "");
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("EN"), Some(Locale::En));
        assert_eq!(Locale::parse("sv-SE"), Some(Locale::Sv));
        assert_eq!(Locale::parse("de"), None);
    }

    #[test]
    fn test_contact_entries_skip_empty_fields() {
        let info = PersonalInfo {
            email: "a@b.se".to_string(),
            website: "  ".to_string(),
            linkedin: "in/anna".to_string(),
            ..Default::default()
        };
        let icons: Vec<Icon> = contact_entries(&info).iter().map(|e| e.icon).collect();
        assert_eq!(icons, vec![Icon::Mail, Icon::Linkedin]);
    }

    #[test]
    fn test_portrait_frame_color_falls_back_to_white() {
        let mut info = PersonalInfo {
            profile_image: Some(ProfileImage {
                url: "https://cdn.example.se/a.jpg".to_string(),
                show_frame: true,
                frame_color: "#1e3a8a".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let frame = portrait(&info, 96.0).unwrap().frame.unwrap();
        assert_eq!(frame.color, Color::rgb(0x1e, 0x3a, 0x8a));

        if let Some(image) = info.profile_image.as_mut() {
            image.frame_color = "teal-ish".to_string();
        }
        let frame = portrait(&info, 96.0).unwrap().frame.unwrap();
        assert_eq!(frame.color, Color::rgb(255, 255, 255));

        if let Some(image) = info.profile_image.as_mut() {
            image.show_frame = false;
        }
        assert!(portrait(&info, 96.0).unwrap().frame.is_none());
    }
}
