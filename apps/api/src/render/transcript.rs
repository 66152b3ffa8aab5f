//! What a backend actually put on its surface, reduced to the parts that must
//! agree across backends: section order, per-section text and the color
//! applied for each role.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::style::color::{Color, ColorRole};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTranscript {
    pub id: String,
    pub title: String,
    /// Text runs in emission order, whitespace-normalized.
    pub text: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub sections: Vec<SectionTranscript>,
    pub colors: BTreeMap<ColorRole, Color>,
    /// Roles that were applied with more than one value.
    pub color_conflicts: Vec<ColorRole>,
    #[serde(skip)]
    open: bool,
}

/// Collapses runs of whitespace to single spaces and trims.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Transcript {
    pub fn begin_section(&mut self, id: &str) {
        self.sections.push(SectionTranscript {
            id: id.to_string(),
            title: String::new(),
            text: Vec::new(),
        });
        self.open = true;
    }

    pub fn end_section(&mut self) {
        self.open = false;
    }

    fn current(&mut self) -> Option<&mut SectionTranscript> {
        if self.open {
            self.sections.last_mut()
        } else {
            None
        }
    }

    /// Sets the current section's title. Ignored outside a section.
    pub fn title(&mut self, title: &str) {
        if let Some(section) = self.current() {
            if section.title.is_empty() {
                section.title = normalize_whitespace(title);
            }
        }
    }

    /// Appends a text run to the current section. Ignored outside a section.
    pub fn text(&mut self, run: &str) {
        let run = normalize_whitespace(run);
        if run.is_empty() {
            return;
        }
        if let Some(section) = self.current() {
            section.text.push(run);
        }
    }

    pub fn color(&mut self, role: ColorRole, color: Color) {
        match self.colors.get(&role) {
            Some(existing) if *existing != color => {
                if !self.color_conflicts.contains(&role) {
                    self.color_conflicts.push(role);
                }
            }
            Some(_) => {}
            None => {
                self.colors.insert(role, color);
            }
        }
    }

    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    pub fn section_ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }
}
