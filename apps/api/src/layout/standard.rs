//! Standard: one column. Header, contact row, summary, then every section in
//! document order with a rule under each heading and star-rated skills.

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
    let mut column = Region::new(RegionRole::Single, Band::Body, 0.0, 1.0).with_padding(40.0);

    column.push(Block::Header(header(
        info,
        style,
        ColorRole::Heading,
        ColorRole::SubHeading,
    )));
    if let Some(c) = contact(
        info,
        style,
        Flow::Row,
        ColorRole::Text,
        ColorRole::Primary,
        None,
    ) {
        column.push(Block::Contact(c));
    }
    if let Some(s) = summary(info, style, None, ColorRole::Text) {
        column.push(Block::Summary(s));
    }

    let heading = HeadingLook {
        rule: Some(ColorRole::Primary),
        ..HeadingLook::plain(ColorRole::Heading)
    };
    let mut look = EntryLook::new(ColorRole::Heading, ColorRole::SubHeading, SkillIdiom::Stars);
    look.skill_fill = ColorRole::Accent;

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
        program: LayoutProgram::Standard,
        style: style.clone(),
        page_background: ColorRole::Background,
        regions: vec![column],
    }
}
