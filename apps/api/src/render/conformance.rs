//! Cross-backend conformance: both backends must agree on section order,
//! per-section text and the color applied for every role. Geometry is free to
//! differ.

use serde::Serialize;

use super::assets::ImageAssets;
use super::transcript::Transcript;
use super::{export, preview, RenderError};
use crate::layout::tree::RenderTree;
use crate::style::color::{Color, ColorRole};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Mismatch {
    #[serde(rename_all = "camelCase")]
    SectionOrder {
        preview: Vec<String>,
        export: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    SectionTitle {
        section_id: String,
        preview: String,
        export: String,
    },
    #[serde(rename_all = "camelCase")]
    SectionText {
        section_id: String,
        preview: Vec<String>,
        export: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Color {
        role: ColorRole,
        preview: Option<Color>,
        export: Option<Color>,
    },
    /// A backend applied more than one value for the same role.
    #[serde(rename_all = "camelCase")]
    ColorConflict { backend: String, role: ColorRole },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceReport {
    pub conforms: bool,
    pub mismatches: Vec<Mismatch>,
    pub preview: Transcript,
    pub export: Transcript,
    /// Export content ran past the page. Reported, not a mismatch.
    pub export_overflowed: bool,
}

/// Compares two transcripts.
pub fn compare(preview: &Transcript, export: &Transcript) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    let preview_ids = preview.section_ids();
    let export_ids = export.section_ids();
    if preview_ids != export_ids {
        mismatches.push(Mismatch::SectionOrder {
            preview: preview_ids.iter().map(|s| s.to_string()).collect(),
            export: export_ids.iter().map(|s| s.to_string()).collect(),
        });
    } else {
        for (p, e) in preview.sections.iter().zip(&export.sections) {
            if p.title != e.title {
                mismatches.push(Mismatch::SectionTitle {
                    section_id: p.id.clone(),
                    preview: p.title.clone(),
                    export: e.title.clone(),
                });
            }
            if p.text != e.text {
                mismatches.push(Mismatch::SectionText {
                    section_id: p.id.clone(),
                    preview: p.text.clone(),
                    export: e.text.clone(),
                });
            }
        }
    }

    for role in ColorRole::ALL {
        let (p, e) = (preview.colors.get(&role), export.colors.get(&role));
        if p != e {
            mismatches.push(Mismatch::Color {
                role,
                preview: p.copied(),
                export: e.copied(),
            });
        }
    }

    for (backend, transcript) in [("preview", preview), ("export", export)] {
        for role in &transcript.color_conflicts {
            mismatches.push(Mismatch::ColorConflict {
                backend: backend.to_string(),
                role: *role,
            });
        }
    }
    mismatches
}

/// Renders the tree through both backends and compares what they emitted.
pub fn check(tree: &RenderTree, assets: &ImageAssets) -> Result<ConformanceReport, RenderError> {
    let previewed = preview::render(tree)?;
    let exported = export::render(tree, assets)?;
    let mismatches = compare(&previewed.transcript, &exported.transcript);
    Ok(ConformanceReport {
        conforms: mismatches.is_empty(),
        mismatches,
        preview: previewed.transcript,
        export: exported.transcript,
        export_overflowed: exported.overflowed,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::document::normalize::normalize;
    use crate::layout::fixtures::full_document;
    use crate::layout::{build_render_tree, LayoutOptions, Locale};
    use crate::style::catalog::all_templates;

    #[test]
    fn test_every_template_conforms() {
        for template in all_templates() {
            let tree = build_render_tree(&full_document(template.id), &LayoutOptions::default());
            let report = check(&tree, &ImageAssets::new()).unwrap();
            assert!(
                report.conforms,
                "{}: {:?}",
                template.id, report.mismatches
            );
        }
    }

    #[test]
    fn test_section_titles_and_heading_color_agree() {
        for template in all_templates() {
            let tree = build_render_tree(&full_document(template.id), &LayoutOptions::default());
            let report = check(&tree, &ImageAssets::new()).unwrap();
            assert_eq!(
                report.preview.section_titles(),
                report.export.section_titles(),
                "{}",
                template.id
            );
            let heading = report.preview.colors.get(&ColorRole::Heading);
            assert!(heading.is_some(), "{}: heading color never applied", template.id);
            assert_eq!(heading, report.export.colors.get(&ColorRole::Heading));
            assert_eq!(heading.copied(), Some(tree.style.color(ColorRole::Heading)));
        }
    }

    #[test]
    fn test_overrides_and_english_locale_conform() {
        let doc = normalize(&json!({
            "templateId": "professional",
            "colorScheme": { "heading": "#112233", "accent": "#ff6600" },
            "fontSettings": { "headingFont": "Georgia", "fontSize": "large" },
            "personalInfo": { "firstName": "Erik", "lastName": "Lund" },
            "sections": [
                { "id": "exp", "type": "experience", "title": "Experience", "items": [
                    { "company": "Saab", "position": "Developer", "startDate": "2021-03",
                      "description": "Avionics tooling.\nTest rigs." }
                ]},
                { "id": "skills", "type": "skills", "title": "Skills", "items": [
                    { "name": "Kotlin", "level": 3 }
                ]}
            ]
        }));
        let opts = LayoutOptions {
            locale: Locale::En,
        };
        let report = check(&build_render_tree(&doc, &opts), &ImageAssets::new()).unwrap();
        assert!(report.conforms, "{:?}", report.mismatches);
        assert_eq!(
            report.export.colors[&ColorRole::Heading],
            Color::rgb(0x11, 0x22, 0x33)
        );
    }

    #[test]
    fn test_text_the_pdf_cannot_encode_is_a_mismatch() {
        let doc = normalize(&json!({
            "templateId": "standard",
            "sections": [
                { "id": "exp", "type": "experience", "title": "Doświadczenie", "items": [
                    { "company": "Łódź Software", "position": "Inżynier" }
                ]}
            ]
        }));
        let report = check(&build_render_tree(&doc, &LayoutOptions::default()), &ImageAssets::new())
            .unwrap();
        assert!(!report.conforms);
        assert_eq!(report.export.sections[0].title, "Do?wiadczenie");
        assert!(report.export.sections[0].text.iter().any(|t| t == "In?ynier"));
        assert!(report.mismatches.contains(&Mismatch::SectionTitle {
            section_id: "exp".to_string(),
            preview: "Doświadczenie".to_string(),
            export: "Do?wiadczenie".to_string(),
        }));
        assert!(report
            .mismatches
            .iter()
            .any(|m| matches!(m, Mismatch::SectionText { section_id, .. } if section_id == "exp")));
    }

    #[test]
    fn test_compare_reports_each_kind_of_divergence() {
        let mut preview = Transcript::default();
        preview.begin_section("exp");
        preview.title("Erfarenhet");
        preview.text("Engineer");
        preview.end_section();
        preview.color(ColorRole::Heading, Color::rgb(0, 0, 0));

        let mut export = Transcript::default();
        export.begin_section("exp");
        export.title("ERFARENHET");
        export.text("Engineer");
        export.text("Volvo");
        export.end_section();
        export.color(ColorRole::Heading, Color::rgb(1, 1, 1));
        export.color(ColorRole::Heading, Color::rgb(2, 2, 2));

        let mismatches = compare(&preview, &export);
        assert!(matches!(mismatches[0], Mismatch::SectionTitle { .. }));
        assert!(matches!(mismatches[1], Mismatch::SectionText { .. }));
        assert!(matches!(
            mismatches[2],
            Mismatch::Color {
                role: ColorRole::Heading,
                ..
            }
        ));
        assert_eq!(
            mismatches[3],
            Mismatch::ColorConflict {
                backend: "export".to_string(),
                role: ColorRole::Heading
            }
        );
    }

    #[test]
    fn test_reordered_sections_are_one_mismatch() {
        let mut a = Transcript::default();
        a.begin_section("exp");
        a.end_section();
        a.begin_section("edu");
        a.end_section();
        let mut b = Transcript::default();
        b.begin_section("edu");
        b.end_section();
        b.begin_section("exp");
        b.end_section();
        let mismatches = compare(&a, &b);
        assert_eq!(mismatches.len(), 1);
        assert!(matches!(mismatches[0], Mismatch::SectionOrder { .. }));
    }
}
