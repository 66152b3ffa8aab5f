// Layout programs: turn a normalized document plus a resolved style into a
// render tree. Every program is a pure function; backends only ever see the tree.

pub mod common;
pub mod creative;
pub mod font_metrics;
pub mod icons;
pub mod minimalist;
pub mod modern;
pub mod professional;
pub mod standard;
pub mod tree;

use serde::Serialize;

use crate::document::model::CvDocument;
use crate::style::catalog::resolve_template;
use crate::style::resolver::{resolve_style, ResolvedStyle};

pub use common::{LayoutOptions, Locale};
pub use tree::RenderTree;

/// The closed set of layout programs. Templates select one; several templates
/// may share a program and differ only in default colors and fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutProgram {
    Standard,
    Modern,
    Minimalist,
    Creative,
    Professional,
}

pub type LayoutFn = fn(&CvDocument, &ResolvedStyle, &LayoutOptions) -> RenderTree;

impl LayoutProgram {
    pub const ALL: [LayoutProgram; 5] = [
        LayoutProgram::Standard,
        LayoutProgram::Modern,
        LayoutProgram::Minimalist,
        LayoutProgram::Creative,
        LayoutProgram::Professional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutProgram::Standard => "standard",
            LayoutProgram::Modern => "modern",
            LayoutProgram::Minimalist => "minimalist",
            LayoutProgram::Creative => "creative",
            LayoutProgram::Professional => "professional",
        }
    }

    /// Exhaustive: adding a program without a layout function does not compile.
    pub fn layout_fn(self) -> LayoutFn {
        match self {
            LayoutProgram::Standard => standard::layout,
            LayoutProgram::Modern => modern::layout,
            LayoutProgram::Minimalist => minimalist::layout,
            LayoutProgram::Creative => creative::layout,
            LayoutProgram::Professional => professional::layout,
        }
    }
}

/// Resolves the document's template and style, then runs its layout program.
pub fn build_render_tree(doc: &CvDocument, opts: &LayoutOptions) -> RenderTree {
    let template = resolve_template(&doc.template_id);
    let style = resolve_style(&doc.color_scheme, &doc.font_settings, template);
    let tree = (template.layout_program.layout_fn())(doc, &style, opts);
    tracing::debug!(
        template = template.id,
        program = template.layout_program.as_str(),
        regions = tree.regions.len(),
        "Render tree built"
    );
    tree
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::json;

    use crate::document::model::CvDocument;
    use crate::document::normalize::normalize;

    /// A document with every section type populated plus one empty section.
    pub fn full_document(template_id: &str) -> CvDocument {
        normalize(&json!({
            "templateId": template_id,
            "personalInfo": {
                "firstName": "Anna",
                "lastName": "Berg",
                "title": "Backend Engineer",
                "email": "anna@example.se",
                "phone": "+46 70 123 45 67",
                "location": "Göteborg",
                "summary": "Builds reliable services."
            },
            "sections": [
                { "id": "exp", "type": "experience", "title": "Erfarenhet", "items": [
                    { "company": "Volvo", "position": "Engineer", "startDate": "2020-01" },
                    { "company": "Ericsson", "position": "Intern", "startDate": "2018-06", "endDate": "2019-08" }
                ]},
                { "id": "edu", "type": "education", "title": "Utbildning", "items": [
                    { "institution": "Chalmers", "degree": "MSc", "field": "Computer Science" }
                ]},
                { "id": "skills", "type": "skills", "title": "Kompetenser", "items": [
                    { "name": "PostgreSQL", "level": 4 },
                    { "name": "Rust", "level": 5 }
                ]},
                { "id": "proj", "type": "projects", "title": "Projekt", "items": [
                    { "name": "cvrender", "technologies": ["Rust", "axum"] }
                ]},
                { "id": "empty", "type": "projects", "title": "Tomt", "items": [] }
            ]
        }))
    }
}
