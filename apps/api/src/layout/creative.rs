//! Creative: asymmetric two-column grid behind a rotated accent shape.
//!
//! The narrow left column carries the portrait, contact details, summary and
//! skills (icon-tagged chips); the wide right column carries everything else,
//! with a timeline dot on each experience item.

use crate::document::model::{CvDocument, SectionKind};
use crate::layout::common::{
    contact, header, section_block, summary, visible_sections, EntryLook, HeadingLook,
    LayoutOptions,
};
use crate::layout::tree::{
    Band, Block, Decoration, Flow, Region, RegionRole, RenderTree, Shape, SkillIdiom,
};
use crate::layout::LayoutProgram;
use crate::style::color::ColorRole;
use crate::style::resolver::ResolvedStyle;
use crate::units::page_width_px;

pub const LEFT_WIDTH: f32 = 0.38;

fn backdrop() -> Decoration {
    let page_w = page_width_px();
    Decoration {
        shape: Shape::Rect {
            x: -page_w * 0.15,
            y: -120.0,
            width: page_w * 0.7,
            height: 360.0,
            rotation_deg: -12.0,
        },
        color: ColorRole::Accent,
        opacity: 0.12,
    }
}

pub fn layout(doc: &CvDocument, style: &ResolvedStyle, opts: &LayoutOptions) -> RenderTree {
    let info = &doc.personal_info;
    let locale = opts.locale;

    let mut left = Region::new(RegionRole::Left, Band::Body, 0.0, LEFT_WIDTH).with_padding(32.0);
    let mut right =
        Region::new(RegionRole::Right, Band::Body, LEFT_WIDTH, 1.0 - LEFT_WIDTH).with_padding(32.0);

    left.push(Block::Decoration(backdrop()));
    left.push(Block::Header(header(
        info,
        style,
        ColorRole::Primary,
        ColorRole::Accent,
    )));
    if let Some(c) = contact(
        info,
        style,
        Flow::Column,
        ColorRole::Text,
        ColorRole::Accent,
        None,
    ) {
        left.push(Block::Contact(c));
    }

    let heading = HeadingLook {
        scale: 1.1,
        rule: Some(ColorRole::Accent),
        ..HeadingLook::plain(ColorRole::Primary)
    };
    if let Some(s) = summary(
        info,
        style,
        Some(heading.heading(locale.summary_label(), style)),
        ColorRole::Text,
    ) {
        left.push(Block::Summary(s));
    }

    let look = EntryLook {
        skill_fill: ColorRole::Accent,
        skill_track: ColorRole::Secondary,
        timeline: Some(ColorRole::Accent),
        skill_icons: true,
        ..EntryLook::new(ColorRole::Heading, ColorRole::Accent, SkillIdiom::Chips)
    };
    let plain = EntryLook {
        timeline: None,
        ..look
    };

    for section in visible_sections(doc) {
        match section.kind() {
            SectionKind::Skills => left.push(Block::Section(section_block(
                section, &heading, &look, style, locale,
            ))),
            SectionKind::Experience => right.push(Block::Section(section_block(
                section, &heading, &look, style, locale,
            ))),
            SectionKind::Education | SectionKind::Projects => right.push(Block::Section(
                section_block(section, &heading, &plain, style, locale),
            )),
        }
    }

    RenderTree {
        program: LayoutProgram::Creative,
        style: style.clone(),
        page_background: ColorRole::Background,
        regions: vec![left, right],
    }
}
