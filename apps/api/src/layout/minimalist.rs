//! Minimalist: one centered column, uppercase tracked headings, skills as pills.
//! No rules, no decorations, no portrait frame.

use crate::document::model::CvDocument;
use crate::layout::common::{
    contact, header, section_block, summary, visible_sections, EntryLook, HeadingLook,
    LayoutOptions,
};
use crate::layout::tree::{Band, Block, Flow, Region, RegionRole, RenderTree, SkillIdiom};
use crate::layout::LayoutProgram;
use crate::style::color::ColorRole;
use crate::style::resolver::ResolvedStyle;

pub fn layout(doc: &CvDocument, style: &ResolvedStyle, opts: &LayoutOptions) -> RenderTree {
    let info = &doc.personal_info;
    let mut column = Region::new(RegionRole::Single, Band::Body, 0.0, 1.0)
        .with_padding(56.0)
        .centered();

    let mut head = header(info, style, ColorRole::Heading, ColorRole::Secondary);
    head.uppercase_name = true;
    if let Some(image) = head.image.as_mut() {
        image.frame = None;
    }
    column.push(Block::Header(head));

    if let Some(c) = contact(
        info,
        style,
        Flow::Row,
        ColorRole::Secondary,
        ColorRole::Secondary,
        None,
    ) {
        column.push(Block::Contact(c));
    }
    if let Some(s) = summary(info, style, None, ColorRole::Text) {
        column.push(Block::Summary(s));
    }

    let heading = HeadingLook {
        uppercase: true,
        tracking_em: 0.2,
        scale: 0.8,
        ..HeadingLook::plain(ColorRole::Heading)
    };
    let look = EntryLook {
        skill_fill: ColorRole::Primary,
        skill_track: ColorRole::Background,
        ..EntryLook::new(ColorRole::Heading, ColorRole::Secondary, SkillIdiom::Pills)
    };

    for section in visible_sections(doc) {
        column.push(Block::Section(section_block(
            section,
            &heading,
            &look,
            style,
            opts.locale,
        )));
    }

    RenderTree {
        program: LayoutProgram::Minimalist,
        style: style.clone(),
        page_background: ColorRole::Background,
        regions: vec![column],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::full_document;
    use crate::layout::tree::{Align, Entry};
    use crate::style::catalog::resolve_template;
    use crate::style::resolver::resolve_style;

    #[test]
    fn test_centered_uppercase_headings_and_pills() {
        let doc = full_document("minimalist");
        let style =
            resolve_style(&doc.color_scheme, &doc.font_settings, resolve_template("minimalist"));
        let tree = layout(&doc, &style, &LayoutOptions::default());

        assert_eq!(tree.regions.len(), 1);
        assert_eq!(tree.regions[0].align, Align::Center);
        for section in tree.sections() {
            assert!(section.heading.uppercase);
            assert!(section.heading.rule.is_none());
        }
        let skills = tree.sections().find(|s| s.section_id == "skills").unwrap();
        let Entry::Skill(skill) = &skills.entries[0] else {
            panic!("expected skill");
        };
        assert_eq!(skill.idiom, SkillIdiom::Pills);
        assert_eq!(skills.heading.display_text(), "KOMPETENSER");
    }

    #[test]
    fn test_no_decorations() {
        let doc = full_document("minimalist");
        let style =
            resolve_style(&doc.color_scheme, &doc.font_settings, resolve_template("minimalist"));
        let tree = layout(&doc, &style, &LayoutOptions::default());
        assert!(!tree.regions[0]
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Decoration(_))));
    }
}
