//! Modern: a colored sidebar (portrait, contact, skills as bars) beside a main
//! column (header, summary, every other section).

use crate::document::model::{CvDocument, SectionKind};
use crate::layout::common::{
    contact, header, portrait, section_block, summary, visible_sections, EntryLook, HeadingLook,
    LayoutOptions, PORTRAIT_PX,
};
use crate::layout::tree::{
    Band, Block, Flow, HeaderBlock, Region, RegionRole, RenderTree, SkillIdiom,
};
use crate::layout::LayoutProgram;
use crate::style::color::ColorRole;
use crate::style::resolver::ResolvedStyle;

pub const SIDEBAR_WIDTH: f32 = 0.33;

pub fn layout(doc: &CvDocument, style: &ResolvedStyle, opts: &LayoutOptions) -> RenderTree {
    let info = &doc.personal_info;
    let locale = opts.locale;

    let mut sidebar = Region::new(RegionRole::Sidebar, Band::Body, 0.0, SIDEBAR_WIDTH)
        .with_background(ColorRole::Primary, ColorRole::Background)
        .with_padding(28.0);
    let mut main = Region::new(RegionRole::Main, Band::Body, SIDEBAR_WIDTH, 1.0 - SIDEBAR_WIDTH);

    // Portrait-only header: name and title live in the main column.
    if let Some(image) = portrait(info, PORTRAIT_PX) {
        sidebar.push(Block::Header(HeaderBlock {
            name: String::new(),
            title: String::new(),
            image: Some(image),
            ..header(info, style, ColorRole::Background, ColorRole::Background)
        }));
    }
    if let Some(c) = contact(
        info,
        style,
        Flow::Column,
        ColorRole::Background,
        ColorRole::Accent,
        Some(locale.contact_label().to_string()),
    ) {
        sidebar.push(Block::Contact(c));
    }

    main.push(Block::Header(HeaderBlock {
        image: None,
        ..header(info, style, ColorRole::Heading, ColorRole::Primary)
    }));

    let main_heading = HeadingLook {
        rule: Some(ColorRole::Accent),
        ..HeadingLook::plain(ColorRole::Heading)
    };
    let sidebar_heading = HeadingLook {
        uppercase: true,
        tracking_em: 0.08,
        scale: 0.85,
        ..HeadingLook::plain(ColorRole::Background)
    };

    if let Some(s) = summary(
        info,
        style,
        Some(main_heading.heading(locale.summary_label(), style)),
        ColorRole::Text,
    ) {
        main.push(Block::Summary(s));
    }

    let main_look = EntryLook::new(ColorRole::Heading, ColorRole::Primary, SkillIdiom::Bars);
    let sidebar_look = EntryLook {
        skill_fill: ColorRole::Accent,
        skill_track: ColorRole::Secondary,
        skill_label: ColorRole::Background,
        ..EntryLook::new(ColorRole::Background, ColorRole::Background, SkillIdiom::Bars)
    };

    for section in visible_sections(doc) {
        if section.kind() == SectionKind::Skills {
            sidebar.push(Block::Section(section_block(
                section,
                &sidebar_heading,
                &sidebar_look,
                style,
                locale,
            )));
        } else {
            main.push(Block::Section(section_block(
                section,
                &main_heading,
                &main_look,
                style,
                locale,
            )));
        }
    }

    RenderTree {
        program: LayoutProgram::Modern,
        style: style.clone(),
        page_background: ColorRole::Background,
        regions: vec![sidebar, main],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::full_document;
    use crate::style::catalog::resolve_template;
    use crate::style::resolver::resolve_style;

    fn tree() -> RenderTree {
        let doc = full_document("modern");
        let style = resolve_style(&doc.color_scheme, &doc.font_settings, resolve_template("modern"));
        layout(&doc, &style, &LayoutOptions::default())
    }

    fn section_ids(region: &Region) -> Vec<&str> {
        region
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Section(s) => Some(s.section_id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_skills_go_to_sidebar() {
        let tree = tree();
        let sidebar = &tree.regions[0];
        assert_eq!(sidebar.role, RegionRole::Sidebar);
        assert_eq!(sidebar.background, Some(ColorRole::Primary));
        assert_eq!(sidebar.text_color, ColorRole::Background);
        assert_eq!(section_ids(sidebar), vec!["skills"]);
        assert_eq!(section_ids(&tree.regions[1]), vec!["exp", "edu", "proj"]);
    }

    #[test]
    fn test_regions_cover_page_width() {
        let tree = tree();
        let total: f32 = tree.regions.iter().map(|r| r.width).sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!((tree.regions[1].x - SIDEBAR_WIDTH).abs() < 1e-6);
    }

    #[test]
    fn test_summary_heading_is_localized() {
        let tree = tree();
        let summary = tree.regions[1]
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Summary(s) => Some(s),
                _ => None,
            })
            .unwrap();
        assert_eq!(summary.heading.as_ref().unwrap().text, "Profil");
    }
}
