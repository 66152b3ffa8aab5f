//! The canonical CV document model.
//!
//! Every string field is present after normalization (missing → empty string);
//! dates stay optional so an absent `endDate` can render as "ongoing".

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::style::catalog::DEFAULT_TEMPLATE_ID;
use crate::style::scheme::{FontOverrides, PartialColorScheme};

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl FrameStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Some(FrameStyle::Solid),
            "dashed" => Some(FrameStyle::Dashed),
            "dotted" => Some(FrameStyle::Dotted),
            "double" => Some(FrameStyle::Double),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            FrameStyle::Solid => "solid",
            FrameStyle::Dashed => "dashed",
            FrameStyle::Dotted => "dotted",
            FrameStyle::Double => "double",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImage {
    /// `data:` URL or remote `http(s)` URL.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    pub is_circle: bool,
    pub show_frame: bool,
    /// Raw `#rrggbb`; not a scheme role.
    pub frame_color: String,
    pub frame_style: FrameStyle,
    /// Frame width in px.
    pub frame_width: f32,
    pub is_transparent: bool,
}

impl Default for ProfileImage {
    fn default() -> Self {
        Self {
            url: String::new(),
            storage_path: None,
            is_circle: true,
            show_frame: false,
            frame_color: "#ffffff".to_string(),
            frame_style: FrameStyle::Solid,
            frame_width: 4.0,
            is_transparent: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<ProfileImage>,
}

impl PersonalInfo {
    /// "First Last", trimmed; empty when both parts are empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Highest skill level; levels are integers in `0..=MAX_SKILL_LEVEL`.
pub const MAX_SKILL_LEVEL: u8 = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillItem {
    pub id: String,
    pub name: String,
    pub level: u8,
    pub category: String,
}

impl SkillItem {
    /// Proportional fill, `level / 5`, in `0.0..=1.0`.
    pub fn fill_ratio(&self) -> f32 {
        self.level.min(MAX_SKILL_LEVEL) as f32 / MAX_SKILL_LEVEL as f32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Education,
    Experience,
    Skills,
    Projects,
}

impl SectionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "education" => Some(SectionKind::Education),
            "experience" => Some(SectionKind::Experience),
            "skills" => Some(SectionKind::Skills),
            "projects" => Some(SectionKind::Projects),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
        }
    }
}

/// Homogeneous item list; the variant is the section's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "items", rename_all = "lowercase")]
pub enum SectionItems {
    Education(Vec<EducationItem>),
    Experience(Vec<ExperienceItem>),
    Skills(Vec<SkillItem>),
    Projects(Vec<ProjectItem>),
}

impl SectionItems {
    pub fn empty(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Education => SectionItems::Education(Vec::new()),
            SectionKind::Experience => SectionItems::Experience(Vec::new()),
            SectionKind::Skills => SectionItems::Skills(Vec::new()),
            SectionKind::Projects => SectionItems::Projects(Vec::new()),
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            SectionItems::Education(_) => SectionKind::Education,
            SectionItems::Experience(_) => SectionKind::Experience,
            SectionItems::Skills(_) => SectionKind::Skills,
            SectionItems::Projects(_) => SectionKind::Projects,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SectionItems::Education(items) => items.len(),
            SectionItems::Experience(items) => items.len(),
            SectionItems::Skills(items) => items.len(),
            SectionItems::Projects(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `item`; false when its type differs from the list's.
    pub fn push(&mut self, item: SectionItem) -> bool {
        match (self, item) {
            (SectionItems::Education(v), SectionItem::Education(i)) => v.push(i),
            (SectionItems::Experience(v), SectionItem::Experience(i)) => v.push(i),
            (SectionItems::Skills(v), SectionItem::Skill(i)) => v.push(i),
            (SectionItems::Projects(v), SectionItem::Project(i)) => v.push(i),
            _ => return false,
        }
        true
    }
}

/// A single item of any section type, used by the item-level operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionItem {
    Education(EducationItem),
    Experience(ExperienceItem),
    Skill(SkillItem),
    Project(ProjectItem),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub items: SectionItems,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            items: SectionItems::empty(kind),
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.items.kind()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CvDocument {
    pub id: String,
    pub personal_info: PersonalInfo,
    /// Order is significant; changed only by `reorder_sections`.
    pub sections: Vec<Section>,
    /// Per-document overrides; resolution against the template happens at render time.
    pub color_scheme: PartialColorScheme,
    pub font_settings: FontOverrides,
    pub template_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CvDocument {
    /// A new, empty document on the default template.
    pub fn empty() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            personal_info: PersonalInfo::default(),
            sections: Vec::new(),
            color_scheme: PartialColorScheme::default(),
            font_settings: FontOverrides::default(),
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_trims_missing_parts() {
        let info = PersonalInfo {
            first_name: "Anna".to_string(),
            ..Default::default()
        };
        assert_eq!(info.full_name(), "Anna");
        assert_eq!(PersonalInfo::default().full_name(), "");
    }

    #[test]
    fn test_skill_fill_ratio_is_level_over_five() {
        let skill = SkillItem {
            level: 4,
            ..Default::default()
        };
        assert!((skill.fill_ratio() - 0.8).abs() < f32::EPSILON);
        let over = SkillItem {
            level: 9,
            ..Default::default()
        };
        assert_eq!(over.fill_ratio(), 1.0);
    }

    #[test]
    fn test_section_serializes_type_and_items() {
        let section = Section::new("skills-0", "Skills", SectionKind::Skills);
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["type"], "skills");
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["id"], "skills-0");
    }

    #[test]
    fn test_empty_document_uses_default_template() {
        let doc = CvDocument::empty();
        assert_eq!(doc.template_id, "standard");
        assert!(doc.sections.is_empty());
        assert_eq!(doc.created_at, doc.updated_at);
    }

    #[test]
    fn test_section_kind_parse() {
        assert_eq!(SectionKind::parse("Experience"), Some(SectionKind::Experience));
        assert_eq!(SectionKind::parse("hobbies"), None);
    }
}
