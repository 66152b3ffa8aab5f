//! Atomic document operations.
//!
//! Each operation replaces exactly one field, section or item and bumps
//! `updated_at`. Operations that cannot apply (unknown section id, index out of
//! range, item type mismatch) leave the document untouched and return `false`.
//!
//! `EditOp` is the wire form of the same operations. Payloads go through the
//! tolerant normalizer, so an edit can never make a document malformed.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::document::model::{
    CvDocument, PersonalInfo, ProfileImage, Section, SectionItem, SectionItems,
};
use crate::document::normalize::{
    normalize_colors, normalize_fonts, normalize_item, normalize_personal_info,
    normalize_profile_image, normalize_section,
};
use crate::style::scheme::{FontOverrides, PartialColorScheme};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditOp {
    #[serde(rename_all = "camelCase")]
    SetPersonalInfo { personal_info: Value },
    /// `null` removes the image.
    #[serde(rename_all = "camelCase")]
    SetProfileImage { profile_image: Value },
    #[serde(rename_all = "camelCase")]
    SetTemplate { template_id: String },
    #[serde(rename_all = "camelCase")]
    SetColorScheme { color_scheme: Value },
    #[serde(rename_all = "camelCase")]
    SetFontSettings { font_settings: Value },
    AddSection { section: Value },
    ReplaceSection { section: Value },
    #[serde(rename_all = "camelCase")]
    RemoveSection { section_id: String },
    ReorderSections { from: usize, to: usize },
    #[serde(rename_all = "camelCase")]
    AddItem { section_id: String, item: Value },
    #[serde(rename_all = "camelCase")]
    ReplaceItem {
        section_id: String,
        index: usize,
        item: Value,
    },
    #[serde(rename_all = "camelCase")]
    RemoveItem { section_id: String, index: usize },
}

impl EditOp {
    pub fn name(&self) -> &'static str {
        match self {
            EditOp::SetPersonalInfo { .. } => "setPersonalInfo",
            EditOp::SetProfileImage { .. } => "setProfileImage",
            EditOp::SetTemplate { .. } => "setTemplate",
            EditOp::SetColorScheme { .. } => "setColorScheme",
            EditOp::SetFontSettings { .. } => "setFontSettings",
            EditOp::AddSection { .. } => "addSection",
            EditOp::ReplaceSection { .. } => "replaceSection",
            EditOp::RemoveSection { .. } => "removeSection",
            EditOp::ReorderSections { .. } => "reorderSections",
            EditOp::AddItem { .. } => "addItem",
            EditOp::ReplaceItem { .. } => "replaceItem",
            EditOp::RemoveItem { .. } => "removeItem",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("payload is not a valid {0}")]
    Malformed(&'static str),

    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("operation does not apply to the document")]
    Rejected,
}

impl CvDocument {
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }

    pub fn set_personal_info(&mut self, info: PersonalInfo) {
        self.personal_info = info;
        self.touch();
    }

    pub fn set_profile_image(&mut self, image: Option<ProfileImage>) {
        self.personal_info.profile_image = image;
        self.touch();
    }

    /// Stores the template id as given; unknown ids fall back at render time.
    pub fn set_template(&mut self, template_id: impl Into<String>) {
        self.template_id = template_id.into();
        self.touch();
    }

    pub fn set_color_scheme(&mut self, colors: PartialColorScheme) {
        self.color_scheme = colors;
        self.touch();
    }

    pub fn set_font_settings(&mut self, fonts: FontOverrides) {
        self.font_settings = fonts;
        self.touch();
    }

    /// Appends a section. Rejects duplicate ids.
    pub fn add_section(&mut self, section: Section) -> bool {
        if self.section(&section.id).is_some() {
            return false;
        }
        self.sections.push(section);
        self.touch();
        true
    }

    /// Replaces the section with the same id, keeping its position.
    pub fn replace_section(&mut self, section: Section) -> bool {
        match self.sections.iter_mut().find(|s| s.id == section.id) {
            Some(slot) => {
                *slot = section;
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn remove_section(&mut self, section_id: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.id != section_id);
        let removed = self.sections.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Moves the section at `from` to position `to`. The only order-changing operation.
    pub fn reorder_sections(&mut self, from: usize, to: usize) -> bool {
        if from >= self.sections.len() || to >= self.sections.len() {
            return false;
        }
        if from != to {
            let section = self.sections.remove(from);
            self.sections.insert(to, section);
        }
        self.touch();
        true
    }

    pub fn add_item(&mut self, section_id: &str, item: SectionItem) -> bool {
        self.edit_items(section_id, |items| items.push(item))
    }

    pub fn replace_item(&mut self, section_id: &str, index: usize, item: SectionItem) -> bool {
        self.edit_items(section_id, |items| set_item(items, index, item))
    }

    pub fn remove_item(&mut self, section_id: &str, index: usize) -> bool {
        self.edit_items(section_id, |items| {
            if index >= items.len() {
                return false;
            }
            match items {
                SectionItems::Education(v) => drop(v.remove(index)),
                SectionItems::Experience(v) => drop(v.remove(index)),
                SectionItems::Skills(v) => drop(v.remove(index)),
                SectionItems::Projects(v) => drop(v.remove(index)),
            }
            true
        })
    }

    /// Applies one wire operation. On error the document is unchanged.
    pub fn apply(&mut self, op: EditOp) -> Result<(), EditError> {
        let applied = match op {
            EditOp::SetPersonalInfo { personal_info } => {
                if !personal_info.is_object() {
                    return Err(EditError::Malformed("personalInfo"));
                }
                self.set_personal_info(normalize_personal_info(&personal_info));
                true
            }
            EditOp::SetProfileImage { profile_image } => {
                self.set_profile_image(normalize_profile_image(&profile_image));
                true
            }
            EditOp::SetTemplate { template_id } => {
                self.set_template(template_id);
                true
            }
            EditOp::SetColorScheme { color_scheme } => {
                if !color_scheme.is_object() {
                    return Err(EditError::Malformed("colorScheme"));
                }
                self.set_color_scheme(normalize_colors(&color_scheme));
                true
            }
            EditOp::SetFontSettings { font_settings } => {
                if !font_settings.is_object() {
                    return Err(EditError::Malformed("fontSettings"));
                }
                self.set_font_settings(normalize_fonts(&font_settings));
                true
            }
            EditOp::AddSection { section } => {
                let section = normalize_section(&section, self.sections.len())
                    .ok_or(EditError::Malformed("section"))?;
                self.add_section(section)
            }
            EditOp::ReplaceSection { section } => {
                let section = normalize_section(&section, self.sections.len())
                    .ok_or(EditError::Malformed("section"))?;
                self.replace_section(section)
            }
            EditOp::RemoveSection { section_id } => self.remove_section(&section_id),
            EditOp::ReorderSections { from, to } => self.reorder_sections(from, to),
            EditOp::AddItem { section_id, item } => {
                let section = self
                    .section(&section_id)
                    .ok_or_else(|| EditError::UnknownSection(section_id.clone()))?;
                let item = normalize_item(section.kind(), &item, section.items.len())
                    .ok_or(EditError::Malformed("item"))?;
                self.add_item(&section_id, item)
            }
            EditOp::ReplaceItem {
                section_id,
                index,
                item,
            } => {
                let section = self
                    .section(&section_id)
                    .ok_or_else(|| EditError::UnknownSection(section_id.clone()))?;
                let item = normalize_item(section.kind(), &item, index)
                    .ok_or(EditError::Malformed("item"))?;
                self.replace_item(&section_id, index, item)
            }
            EditOp::RemoveItem { section_id, index } => self.remove_item(&section_id, index),
        };
        if applied {
            Ok(())
        } else {
            Err(EditError::Rejected)
        }
    }

    fn edit_items(&mut self, section_id: &str, f: impl FnOnce(&mut SectionItems) -> bool) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) else {
            return false;
        };
        let changed = f(&mut section.items);
        if changed {
            self.touch();
        }
        changed
    }
}

fn set_item(items: &mut SectionItems, index: usize, item: SectionItem) -> bool {
    fn put<T>(v: &mut [T], index: usize, value: T) -> bool {
        match v.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    match (items, item) {
        (SectionItems::Education(v), SectionItem::Education(i)) => put(v, index, i),
        (SectionItems::Experience(v), SectionItem::Experience(i)) => put(v, index, i),
        (SectionItems::Skills(v), SectionItem::Skill(i)) => put(v, index, i),
        (SectionItems::Projects(v), SectionItem::Project(i)) => put(v, index, i),
        _ => false,
    }
}
