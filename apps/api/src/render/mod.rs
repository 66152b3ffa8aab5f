// Rendering: one driver walks a render tree and feeds a small capability
// interface implemented once per backend (preview node tree, export PDF).
// Backends never look at the document or the template; everything they draw
// comes from the tree and the resolved style inside it.

pub mod assets;
pub mod conformance;
pub mod export;
pub mod handlers;
pub mod preview;
pub mod transcript;
mod winansi;

use thiserror::Error;

use crate::errors::AppError;
use crate::layout::icons::Icon;
use crate::layout::tree::{
    Band, Block, ContactBlock, Decoration, Entry, HeaderBlock, Heading, ItemEntry, Region,
    RenderTree, SectionBlock, SkillEntry, SummaryBlock,
};
use crate::style::color::ColorRole;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("image '{src}' could not be decoded: {reason}")]
    ImageDecode { src: String, reason: String },

    #[error("malformed data URL for image: {0}")]
    DataUrl(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("emission out of order: {0}")]
    Sequence(&'static str),

    #[error("render task aborted: {0}")]
    Aborted(String),
}

impl RenderError {
    pub fn into_app_error(self, backend: &'static str) -> AppError {
        AppError::RenderBackend {
            backend,
            reason: self.to_string(),
        }
    }
}

/// Capability interface every rendering backend implements.
///
/// The driver calls these in reading order: top band regions first, then body
/// regions, blocks in region order. Colors are passed as roles; backends look
/// them up in the tree's resolved style.
pub trait RenderBackend {
    type Output;

    fn begin_page(&mut self, tree: &RenderTree) -> Result<(), RenderError>;
    fn begin_region(&mut self, region: &Region) -> Result<(), RenderError>;
    fn emit_decoration(&mut self, decoration: &Decoration) -> Result<(), RenderError>;
    fn emit_header(&mut self, header: &HeaderBlock) -> Result<(), RenderError>;
    fn emit_contact(&mut self, contact: &ContactBlock) -> Result<(), RenderError>;
    fn emit_icon(&mut self, icon: Icon, color: ColorRole, size_px: f32) -> Result<(), RenderError>;
    fn emit_summary(&mut self, summary: &SummaryBlock) -> Result<(), RenderError>;
    fn begin_section(&mut self, section: &SectionBlock) -> Result<(), RenderError>;
    fn emit_heading(&mut self, heading: &Heading) -> Result<(), RenderError>;
    fn emit_section_item(&mut self, item: &ItemEntry) -> Result<(), RenderError>;
    fn emit_skill(&mut self, skill: &SkillEntry) -> Result<(), RenderError>;
    fn end_section(&mut self, section: &SectionBlock) -> Result<(), RenderError>;
    fn end_region(&mut self, region: &Region) -> Result<(), RenderError>;
    fn finish(self) -> Result<Self::Output, RenderError>;
}

/// Drives a backend over a render tree.
pub fn emit<B: RenderBackend>(tree: &RenderTree, mut backend: B) -> Result<B::Output, RenderError> {
    backend.begin_page(tree)?;
    for band in [Band::Top, Band::Body] {
        for region in tree.regions_in(band) {
            backend.begin_region(region)?;
            for block in &region.blocks {
                emit_block(&mut backend, block)?;
            }
            backend.end_region(region)?;
        }
    }
    backend.finish()
}

fn emit_block<B: RenderBackend>(backend: &mut B, block: &Block) -> Result<(), RenderError> {
    match block {
        Block::Decoration(d) => backend.emit_decoration(d),
        Block::Header(h) => backend.emit_header(h),
        Block::Contact(c) => backend.emit_contact(c),
        Block::Summary(s) => {
            if let Some(heading) = &s.heading {
                backend.emit_heading(heading)?;
            }
            backend.emit_summary(s)
        }
        Block::Section(section) => {
            backend.begin_section(section)?;
            backend.emit_heading(&section.heading)?;
            for entry in &section.entries {
                match entry {
                    Entry::Item(item) => backend.emit_section_item(item)?,
                    Entry::Skill(skill) => backend.emit_skill(skill)?,
                }
            }
            backend.end_section(section)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::full_document;
    use crate::layout::{build_render_tree, LayoutOptions};

    /// Records the call sequence.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl RenderBackend for Recorder {
        type Output = Vec<String>;

        fn begin_page(&mut self, _: &RenderTree) -> Result<(), RenderError> {
            self.calls.push("page".into());
            Ok(())
        }
        fn begin_region(&mut self, region: &Region) -> Result<(), RenderError> {
            self.calls.push(format!("region:{:?}", region.role));
            Ok(())
        }
        fn emit_decoration(&mut self, _: &Decoration) -> Result<(), RenderError> {
            self.calls.push("decoration".into());
            Ok(())
        }
        fn emit_header(&mut self, _: &HeaderBlock) -> Result<(), RenderError> {
            self.calls.push("header".into());
            Ok(())
        }
        fn emit_contact(&mut self, _: &ContactBlock) -> Result<(), RenderError> {
            self.calls.push("contact".into());
            Ok(())
        }
        fn emit_icon(&mut self, _: Icon, _: ColorRole, _: f32) -> Result<(), RenderError> {
            Ok(())
        }
        fn emit_summary(&mut self, _: &SummaryBlock) -> Result<(), RenderError> {
            self.calls.push("summary".into());
            Ok(())
        }
        fn begin_section(&mut self, s: &SectionBlock) -> Result<(), RenderError> {
            self.calls.push(format!("section:{}", s.section_id));
            Ok(())
        }
        fn emit_heading(&mut self, h: &Heading) -> Result<(), RenderError> {
            self.calls.push(format!("heading:{}", h.text));
            Ok(())
        }
        fn emit_section_item(&mut self, _: &ItemEntry) -> Result<(), RenderError> {
            self.calls.push("item".into());
            Ok(())
        }
        fn emit_skill(&mut self, s: &SkillEntry) -> Result<(), RenderError> {
            self.calls.push(format!("skill:{}", s.name));
            Ok(())
        }
        fn end_section(&mut self, _: &SectionBlock) -> Result<(), RenderError> {
            self.calls.push("/section".into());
            Ok(())
        }
        fn end_region(&mut self, _: &Region) -> Result<(), RenderError> {
            self.calls.push("/region".into());
            Ok(())
        }
        fn finish(self) -> Result<Vec<String>, RenderError> {
            Ok(self.calls)
        }
    }

    #[test]
    fn test_banner_emitted_before_body() {
        let tree = build_render_tree(&full_document("professional"), &LayoutOptions::default());
        let calls = emit(&tree, Recorder::default()).unwrap();
        assert_eq!(calls[0], "page");
        assert_eq!(calls[1], "region:Banner");
        let left = calls.iter().position(|c| c == "region:Left").unwrap();
        let right = calls.iter().position(|c| c == "region:Right").unwrap();
        assert!(left < right);
    }

    #[test]
    fn test_section_heading_precedes_entries() {
        let tree = build_render_tree(&full_document("standard"), &LayoutOptions::default());
        let calls = emit(&tree, Recorder::default()).unwrap();
        let start = calls.iter().position(|c| c == "section:skills").unwrap();
        assert_eq!(calls[start + 1], "heading:Kompetenser");
        assert_eq!(calls[start + 2], "skill:PostgreSQL");
        assert_eq!(calls[start + 3], "skill:Rust");
        assert_eq!(calls[start + 4], "/section");
    }

    #[test]
    fn test_render_error_maps_to_backend_failure() {
        let err = RenderError::Sequence("region closed twice").into_app_error("preview");
        assert!(matches!(err, AppError::RenderBackend { backend: "preview", .. }));
    }
}
