//! Professional: full-width banner with a diagonal accent shape, then a 1/3–2/3
//! body split. Summary and skills on the left, experience, education and
//! projects on the right.

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

pub const BANNER_MIN_HEIGHT_PX: f32 = 180.0;
pub const LEFT_WIDTH: f32 = 1.0 / 3.0;

fn diagonal(height: f32) -> Decoration {
    let page_w = page_width_px();
    Decoration {
        shape: Shape::Polygon {
            points: vec![
                (page_w * 0.62, 0.0),
                (page_w, 0.0),
                (page_w, height),
                (page_w * 0.78, height),
            ],
        },
        color: ColorRole::Accent,
        opacity: 0.85,
    }
}

pub fn layout(doc: &CvDocument, style: &ResolvedStyle, opts: &LayoutOptions) -> RenderTree {
    let info = &doc.personal_info;
    let locale = opts.locale;

    let mut banner = Region::new(RegionRole::Banner, Band::Top, 0.0, 1.0)
        .with_background(ColorRole::Primary, ColorRole::Background)
        .with_min_height(BANNER_MIN_HEIGHT_PX);
    banner.push(Block::Decoration(diagonal(BANNER_MIN_HEIGHT_PX)));
    let mut head = header(info, style, ColorRole::Background, ColorRole::Background);
    head.uppercase_name = true;
    banner.push(Block::Header(head));
    if let Some(c) = contact(
        info,
        style,
        Flow::Row,
        ColorRole::Background,
        ColorRole::Accent,
        None,
    ) {
        banner.push(Block::Contact(c));
    }

    let mut left = Region::new(RegionRole::Left, Band::Body, 0.0, LEFT_WIDTH)
        .with_background(ColorRole::Secondary, ColorRole::Background)
        .with_padding(28.0);
    let mut right = Region::new(RegionRole::Right, Band::Body, LEFT_WIDTH, 1.0 - LEFT_WIDTH);

    let heading = HeadingLook {
        uppercase: true,
        tracking_em: 0.05,
        rule: Some(ColorRole::Primary),
        ..HeadingLook::plain(ColorRole::Primary)
    };
    // The sidebar sits on Secondary, so everything in it is drawn light.
    let side_heading = HeadingLook {
        color: ColorRole::Background,
        rule: Some(ColorRole::Accent),
        ..heading
    };
    if let Some(s) = summary(
        info,
        style,
        Some(side_heading.heading(locale.summary_label(), style)),
        ColorRole::Background,
    ) {
        left.push(Block::Summary(s));
    }

    let look = EntryLook::new(ColorRole::Heading, ColorRole::Primary, SkillIdiom::Bars);
    let side_look = EntryLook {
        skill_fill: ColorRole::Accent,
        skill_track: ColorRole::Background,
        skill_label: ColorRole::Background,
        ..EntryLook::new(ColorRole::Background, ColorRole::Background, SkillIdiom::Bars)
    };

    for section in visible_sections(doc) {
        let (column, heading, look) = match section.kind() {
            SectionKind::Skills => (&mut left, &side_heading, &side_look),
            SectionKind::Experience | SectionKind::Education | SectionKind::Projects => {
                (&mut right, &heading, &look)
            }
        };
        column.push(Block::Section(section_block(section, heading, look, style, locale)));
    }

    RenderTree {
        program: LayoutProgram::Professional,
        style: style.clone(),
        page_background: ColorRole::Background,
        regions: vec![banner, left, right],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::full_document;
    use crate::style::catalog::resolve_template;
    use crate::style::resolver::resolve_style;

    fn tree() -> RenderTree {
        let doc = full_document("professional");
        let style =
            resolve_style(&doc.color_scheme, &doc.font_settings, resolve_template("professional"));
        layout(&doc, &style, &LayoutOptions::default())
    }

    #[test]
    fn test_banner_in_top_band_with_diagonal() {
        let tree = tree();
        let banners: Vec<_> = tree.regions_in(Band::Top).collect();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].background, Some(ColorRole::Primary));
        assert!(banners[0].min_height_px >= BANNER_MIN_HEIGHT_PX);
        let Block::Decoration(deco) = &banners[0].blocks[0] else {
            panic!("expected diagonal first");
        };
        assert_eq!(deco.color, ColorRole::Accent);
        assert!(matches!(&deco.shape, Shape::Polygon { points } if points.len() == 4));
    }

    #[test]
    fn test_body_split_one_third_two_thirds() {
        let tree = tree();
        let body: Vec<_> = tree.regions_in(Band::Body).collect();
        assert_eq!(body.len(), 2);
        assert!((body[0].width - 1.0 / 3.0).abs() < 1e-6);
        assert!((body[1].width - 2.0 / 3.0).abs() < 1e-6);

        let ids = |r: &Region| -> Vec<String> {
            r.blocks
                .iter()
                .filter_map(|b| match b {
                    Block::Section(s) => Some(s.section_id.clone()),
                    _ => None,
                })
                .collect()
        };
        assert_eq!(ids(body[0]), vec!["skills"]);
        assert_eq!(ids(body[1]), vec!["exp", "edu", "proj"]);
        assert!(matches!(body[0].blocks[0], Block::Summary(_)));
    }

    #[test]
    fn test_sidebar_content_is_light_on_secondary() {
        let tree = tree();
        let left = tree.regions_in(Band::Body).next().unwrap();
        assert_eq!(left.background, Some(ColorRole::Secondary));
        assert_eq!(left.text_color, ColorRole::Background);
        assert_ne!(
            tree.style.color(left.text_color),
            tree.style.color(ColorRole::Secondary)
        );

        for block in &left.blocks {
            match block {
                Block::Summary(s) => {
                    assert_eq!(s.color, ColorRole::Background);
                    assert_eq!(s.heading.as_ref().unwrap().color, ColorRole::Background);
                }
                Block::Section(s) => {
                    assert_eq!(s.heading.color, ColorRole::Background);
                    assert_eq!(s.heading.rule, Some(ColorRole::Accent));
                }
                _ => {}
            }
        }
    }
}
