//! Tolerant normalization of a JSON-shaped document.
//!
//! Accepts legacy and partial documents (missing `colorScheme`, `fontSettings`,
//! `sections`, item fields, …). Every gap is recovered by substituting a default;
//! gaps are collected for debug logging only and never surfaced as errors.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::document::model::{
    CvDocument, EducationItem, ExperienceItem, FrameStyle, PersonalInfo, ProfileImage,
    ProjectItem, Section, SectionItem, SectionItems, SectionKind, SkillItem, MAX_SKILL_LEVEL,
};
use crate::style::catalog::{resolve_template, DEFAULT_TEMPLATE_ID};
use crate::style::color::{Color, ColorRole};
use crate::style::scheme::{FontOverrides, FontSize, PartialColorScheme};

/// Normalizes any JSON value into a complete `CvDocument`.
pub fn normalize(value: &Value) -> CvDocument {
    let (document, gaps) = normalize_with_gaps(value);
    if !gaps.is_empty() {
        debug!(gaps = gaps.len(), first = %gaps[0], "Document normalized with default substitutions");
    }
    document
}

/// Same as `normalize`, also returning the JSON paths that were defaulted.
pub fn normalize_with_gaps(value: &Value) -> (CvDocument, Vec<String>) {
    let mut n = Normalizer::default();
    let document = n.document(value);
    (document, n.gaps)
}

/// Normalizes a lone `personalInfo` object, as sent by an edit.
pub fn normalize_personal_info(value: &Value) -> PersonalInfo {
    Normalizer::default().personal_info(Some(value))
}

/// `None` for null or a blank URL.
pub fn normalize_profile_image(value: &Value) -> Option<ProfileImage> {
    Normalizer::default().profile_image(Some(value))
}

pub fn normalize_colors(value: &Value) -> PartialColorScheme {
    Normalizer::default().colors(Some(value))
}

pub fn normalize_fonts(value: &Value) -> FontOverrides {
    Normalizer::default().fonts(Some(value))
}

/// A section at position `index`. `None` when it is not an object of a known type.
pub fn normalize_section(value: &Value, index: usize) -> Option<Section> {
    Normalizer::default().section(value, index)
}

/// An item for a section of type `kind`. `None` when `value` is not an object.
pub fn normalize_item(kind: SectionKind, value: &Value, index: usize) -> Option<SectionItem> {
    let Value::Object(obj) = value else {
        return None;
    };
    Some(Normalizer::default().item(kind, obj, index, "item"))
}

#[derive(Default)]
struct Normalizer {
    gaps: Vec<String>,
}

static EMPTY: OnceLock<Map<String, Value>> = OnceLock::new();

fn empty_object() -> &'static Map<String, Value> {
    EMPTY.get_or_init(Map::new)
}

impl Normalizer {
    fn gap(&mut self, path: impl Into<String>) {
        self.gaps.push(path.into());
    }

    /// Borrows `value` as an object, recording a gap (and using `{}`) otherwise.
    fn object<'a>(&mut self, value: Option<&'a Value>, path: &str) -> &'a Map<String, Value> {
        match value {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => {
                self.gap(path);
                empty_object()
            }
            Some(_) => {
                self.gap(format!("{path} (not an object)"));
                empty_object()
            }
        }
    }

    fn text(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> String {
        match obj.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            None | Some(Value::Null) => String::new(),
            Some(_) => {
                self.gap(format!("{path}.{key}"));
                String::new()
            }
        }
    }

    fn date(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> Option<String> {
        let raw = self.text(obj, key, path);
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn flag(&mut self, obj: &Map<String, Value>, key: &str, default: bool, path: &str) -> bool {
        match obj.get(key) {
            Some(Value::Bool(b)) => *b,
            None | Some(Value::Null) => default,
            Some(_) => {
                self.gap(format!("{path}.{key}"));
                default
            }
        }
    }

    fn timestamp(&mut self, obj: &Map<String, Value>, key: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        let parsed = match obj.get(key) {
            Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            _ => None,
        };
        parsed.unwrap_or_else(|| {
            self.gap(key);
            now
        })
    }

    fn document(&mut self, value: &Value) -> CvDocument {
        let root = self.object(Some(value), "$");
        let now = Utc::now();

        let template_id = match root.get("templateId").and_then(Value::as_str) {
            Some(id) => resolve_template(id).id.to_string(),
            None => {
                self.gap("templateId");
                DEFAULT_TEMPLATE_ID.to_string()
            }
        };

        let sections = match root.get("sections") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, v)| self.section(v, i))
                .collect(),
            _ => {
                self.gap("sections");
                Vec::new()
            }
        };

        let created_at = self.timestamp(root, "createdAt", now);
        let updated_at = self.timestamp(root, "updatedAt", created_at.max(now));

        CvDocument {
            id: self.text(root, "id", "$"),
            personal_info: self.personal_info(root.get("personalInfo")),
            sections,
            color_scheme: self.colors(root.get("colorScheme")),
            font_settings: self.fonts(root.get("fontSettings")),
            template_id,
            created_at,
            updated_at,
        }
    }

    fn personal_info(&mut self, value: Option<&Value>) -> PersonalInfo {
        let path = "personalInfo";
        let obj = self.object(value, path);
        PersonalInfo {
            first_name: self.text(obj, "firstName", path),
            last_name: self.text(obj, "lastName", path),
            title: self.text(obj, "title", path),
            email: self.text(obj, "email", path),
            phone: self.text(obj, "phone", path),
            location: self.text(obj, "location", path),
            website: self.text(obj, "website", path),
            linkedin: self.text(obj, "linkedin", path),
            summary: self.text(obj, "summary", path),
            profile_image: self.profile_image(obj.get("profileImage")),
        }
    }

    fn profile_image(&mut self, value: Option<&Value>) -> Option<ProfileImage> {
        let obj = match value {
            Some(Value::Object(obj)) => obj,
            Some(Value::String(url)) if !url.trim().is_empty() => {
                return Some(ProfileImage {
                    url: url.trim().to_string(),
                    ..Default::default()
                });
            }
            _ => return None,
        };
        let path = "personalInfo.profileImage";
        let url = self.text(obj, "url", path);
        if url.trim().is_empty() {
            return None;
        }

        let defaults = ProfileImage::default();
        let frame_color = self.text(obj, "frameColor", path);
        let frame_color = match Color::from_hex(&frame_color) {
            Some(color) => color.to_hex(),
            None => defaults.frame_color.clone(),
        };
        let frame_style = match obj.get("frameStyle").and_then(Value::as_str) {
            Some(s) => FrameStyle::parse(s).unwrap_or_else(|| {
                self.gap(format!("{path}.frameStyle"));
                defaults.frame_style
            }),
            None => defaults.frame_style,
        };
        let frame_width = obj
            .get("frameWidth")
            .and_then(Value::as_f64)
            .filter(|w| w.is_finite() && *w >= 0.0)
            .map(|w| w.min(64.0) as f32)
            .unwrap_or(defaults.frame_width);
        let storage_path = self.date(obj, "storagePath", path);

        Some(ProfileImage {
            url: url.trim().to_string(),
            storage_path,
            is_circle: self.flag(obj, "isCircle", defaults.is_circle, path),
            show_frame: self.flag(obj, "showFrame", defaults.show_frame, path),
            frame_color,
            frame_style,
            frame_width,
            is_transparent: self.flag(obj, "isTransparent", defaults.is_transparent, path),
        })
    }

    fn colors(&mut self, value: Option<&Value>) -> PartialColorScheme {
        let obj = self.object(value, "colorScheme");
        let mut scheme = PartialColorScheme::default();
        for role in ColorRole::ALL {
            match obj.get(role.key()) {
                Some(Value::String(s)) if !s.trim().is_empty() => match Color::from_hex(s) {
                    Some(color) => scheme.set(role, Some(color)),
                    None => self.gap(format!("colorScheme.{} (malformed '{s}')", role.key())),
                },
                _ => {}
            }
        }
        scheme
    }

    fn fonts(&mut self, value: Option<&Value>) -> FontOverrides {
        let path = "fontSettings";
        let obj = self.object(value, path);
        let non_blank = |s: String| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        let heading_font = non_blank(self.text(obj, "headingFont", path));
        let body_font = non_blank(self.text(obj, "bodyFont", path));
        let font_size = match obj.get("fontSize").and_then(Value::as_str) {
            Some(s) => FontSize::parse(s).or_else(|| {
                self.gap(format!("{path}.fontSize"));
                None
            }),
            None => None,
        };
        FontOverrides {
            heading_font,
            body_font,
            font_size,
        }
    }

    fn section(&mut self, value: &Value, index: usize) -> Option<Section> {
        let path = format!("sections[{index}]");
        let Value::Object(obj) = value else {
            self.gap(path);
            return None;
        };
        let Some(kind) = obj.get("type").and_then(Value::as_str).and_then(SectionKind::parse)
        else {
            self.gap(format!("{path}.type"));
            return None;
        };

        let id = match self.text(obj, "id", &path) {
            id if id.trim().is_empty() => {
                self.gap(format!("{path}.id"));
                format!("{}-{index}", kind.as_str())
            }
            id => id,
        };
        let title = match self.text(obj, "title", &path) {
            t if t.trim().is_empty() => default_title(kind).to_string(),
            t => t,
        };

        let raw_items: Vec<&Map<String, Value>> = match obj.get("items") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(o) => Some(o),
                    _ => {
                        self.gap(format!("{path}.items (non-object item)"));
                        None
                    }
                })
                .collect(),
            _ => {
                self.gap(format!("{path}.items"));
                Vec::new()
            }
        };

        let mut items = SectionItems::empty(kind);
        for (i, o) in raw_items.into_iter().enumerate() {
            let item = self.item(kind, o, i, &path);
            items.push(item);
        }

        Some(Section { id, title, items })
    }

    fn item(
        &mut self,
        kind: SectionKind,
        o: &Map<String, Value>,
        index: usize,
        path: &str,
    ) -> SectionItem {
        let id = match self.text(o, "id", path) {
            id if id.trim().is_empty() => format!("{}-{index}", kind.as_str()),
            id => id,
        };
        match kind {
            SectionKind::Education => SectionItem::Education(EducationItem {
                id,
                institution: self.text(o, "institution", path),
                degree: self.text(o, "degree", path),
                field: self.text(o, "field", path),
                location: self.text(o, "location", path),
                start_date: self.date(o, "startDate", path),
                end_date: self.date(o, "endDate", path),
                description: self.text(o, "description", path),
            }),
            SectionKind::Experience => SectionItem::Experience(ExperienceItem {
                id,
                company: self.text(o, "company", path),
                position: self.text(o, "position", path),
                location: self.text(o, "location", path),
                start_date: self.date(o, "startDate", path),
                end_date: self.date(o, "endDate", path),
                description: self.text(o, "description", path),
            }),
            SectionKind::Skills => SectionItem::Skill(SkillItem {
                id,
                name: self.text(o, "name", path),
                level: self.level(o.get("level"), path),
                category: self.text(o, "category", path),
            }),
            SectionKind::Projects => SectionItem::Project(ProjectItem {
                id,
                name: self.text(o, "name", path),
                description: self.text(o, "description", path),
                technologies: self.string_list(o.get("technologies"), path),
                link: self.text(o, "link", path),
                start_date: self.date(o, "startDate", path),
                end_date: self.date(o, "endDate", path),
            }),
        }
    }

    /// Skill level: rounded and clamped to `0..=5`; anything unparseable is 0.
    fn level(&mut self, value: Option<&Value>, path: &str) -> u8 {
        let raw = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match raw.filter(|v| v.is_finite()) {
            Some(v) => v.round().clamp(0.0, MAX_SKILL_LEVEL as f64) as u8,
            None => {
                self.gap(format!("{path}.level"));
                0
            }
        }
    }

    /// Accepts either a JSON array of strings or a comma-separated string.
    fn string_list(&mut self, value: Option<&Value>, path: &str) -> Vec<String> {
        match value {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None | Some(Value::Null) => Vec::new(),
            Some(_) => {
                self.gap(format!("{path}.technologies"));
                Vec::new()
            }
        }
    }
}

pub fn default_title(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Education => "Education",
        SectionKind::Experience => "Experience",
        SectionKind::Skills => "Skills",
        SectionKind::Projects => "Projects",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_root_yields_empty_document() {
        for value in [json!(null), json!(42), json!("cv"), json!([])] {
            let doc = normalize(&value);
            assert_eq!(doc.template_id, "standard");
            assert!(doc.sections.is_empty());
            assert!(doc.color_scheme.is_empty());
        }
    }

    #[test]
    fn test_legacy_document_without_style_blocks() {
        let (doc, gaps) = normalize_with_gaps(&json!({
            "templateId": "modern",
            "personalInfo": { "firstName": "Erik", "lastName": "Lind" }
        }));
        assert_eq!(doc.template_id, "modern");
        assert_eq!(doc.personal_info.full_name(), "Erik Lind");
        assert!(doc.color_scheme.is_empty());
        assert_eq!(doc.font_settings, FontOverrides::default());
        assert!(gaps.iter().any(|g| g == "sections"));
        assert!(gaps.iter().any(|g| g == "colorScheme"));
    }

    #[test]
    fn test_unknown_template_falls_back_to_standard() {
        let doc = normalize(&json!({ "templateId": "retro-wave" }));
        assert_eq!(doc.template_id, "standard");
    }

    #[test]
    fn test_malformed_colors_are_dropped_valid_kept() {
        let (doc, gaps) = normalize_with_gaps(&json!({
            "colorScheme": { "primary": "#112233", "accent": "not-a-color", "text": "" }
        }));
        assert_eq!(doc.color_scheme.primary, Color::from_hex("#112233"));
        assert_eq!(doc.color_scheme.accent, None);
        assert_eq!(doc.color_scheme.text, None);
        assert!(gaps.iter().any(|g| g.starts_with("colorScheme.accent")));
    }

    #[test]
    fn test_skill_levels_are_rounded_and_clamped() {
        let doc = normalize(&json!({
            "sections": [{ "type": "skills", "items": [
                { "name": "Rust", "level": 4.6 },
                { "name": "Go", "level": "3" },
                { "name": "Cobol", "level": 11 },
                { "name": "Perl", "level": -2 },
                { "name": "Lua" }
            ]}]
        }));
        let SectionItems::Skills(skills) = &doc.sections[0].items else {
            panic!("expected skills section");
        };
        let levels: Vec<u8> = skills.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![5, 3, 5, 0, 0]);
    }

    #[test]
    fn test_missing_item_fields_become_empty_strings() {
        let doc = normalize(&json!({
            "sections": [{ "type": "experience", "items": [{ "startDate": "2020-01" }] }]
        }));
        let SectionItems::Experience(items) = &doc.sections[0].items else {
            panic!("expected experience section");
        };
        assert_eq!(items[0].company, "");
        assert_eq!(items[0].position, "");
        assert_eq!(items[0].start_date.as_deref(), Some("2020-01"));
        assert_eq!(items[0].end_date, None);
    }

    #[test]
    fn test_unknown_section_type_and_non_object_items_dropped() {
        let doc = normalize(&json!({
            "sections": [
                { "type": "hobbies", "items": [{ "name": "chess" }] },
                { "type": "projects", "items": ["oops", { "name": "cvrender", "technologies": "Rust, axum" }] }
            ]
        }));
        assert_eq!(doc.sections.len(), 1);
        let section = &doc.sections[0];
        assert_eq!(section.id, "projects-1");
        assert_eq!(section.title, "Projects");
        let SectionItems::Projects(items) = &section.items else {
            panic!("expected projects section");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].technologies, vec!["Rust", "axum"]);
    }

    #[test]
    fn test_section_order_is_preserved() {
        let doc = normalize(&json!({
            "sections": [
                { "id": "b", "type": "skills", "items": [] },
                { "id": "a", "type": "education", "items": [] },
                { "id": "c", "type": "experience", "items": [] }
            ]
        }));
        let ids: Vec<&str> = doc.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_profile_image_defaults_and_blank_url() {
        let doc = normalize(&json!({
            "personalInfo": { "profileImage": { "url": "data:image/png;base64,AAAA", "frameStyle": "wavy" } }
        }));
        let image = doc.personal_info.profile_image.expect("image kept");
        assert!(image.is_circle);
        assert_eq!(image.frame_style, FrameStyle::Solid);

        let doc = normalize(&json!({ "personalInfo": { "profileImage": { "url": "  " } } }));
        assert!(doc.personal_info.profile_image.is_none());
    }

    #[test]
    fn test_timestamps_parse_or_default() {
        let doc = normalize(&json!({
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": 1717200000000i64
        }));
        assert_eq!(doc.created_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(doc.updated_at.timestamp_millis(), 1_717_200_000_000);
    }
}
