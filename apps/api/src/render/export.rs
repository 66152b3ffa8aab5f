//! Export backend: paginated A4 PDF.
//!
//! Emission happens in two passes. While the driver walks the tree, each region
//! lays its blocks out top to bottom into a display list in CSS px (origin at
//! the page's top-left corner, y down). `finish` then converts the display list
//! into a single PDF content stream, flipping y and scaling px to pt.
//!
//! Text uses the base-14 fonts in WinAnsiEncoding; the font class comes from
//! the resolved family name. Icons are drawn from the vector glyph table, so
//! the exported file is self-contained.

use std::collections::HashMap;
use std::io::Write as _;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::imageops;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use serde::Serialize;
use tracing::{debug, warn};

use super::assets::ImageAssets;
use super::transcript::Transcript;
use super::{emit, winansi, RenderBackend, RenderError};
use crate::document::model::FrameStyle;
use crate::layout::common::SMALL_PX;
use crate::layout::font_metrics::{get_metrics, FontClass};
use crate::layout::icons::{glyphs, star_points, Glyph, Icon, GLYPH_BOX};
use crate::layout::tree::{
    Align, Band, Block, ContactBlock, Decoration, Flow, HeaderBlock, Heading, ImageSpec,
    ItemEntry, ItemField, Marker, Region, RenderTree, SectionBlock, Shape, SkillEntry,
    SkillIdiom, SummaryBlock,
};
use crate::style::color::{Color, ColorRole};
use crate::style::resolver::ResolvedStyle;
use crate::units::{page_height_px, page_width_px, px_to_pt};

const CREATOR: &str = "cvrender";

/// Baseline offset from the top of a line box, in em.
const ASCENT: f32 = 0.8;

/// Control-point factor for approximating a quarter circle with a cubic.
const KAPPA: f32 = 0.552_284_8;

/// Image pixels embedded per layout pixel of a portrait.
const IMAGE_PX_PER_PX: f32 = 2.0;
const STAR_GAP_PX: f32 = 2.0;
const BAR_HEIGHT_PX: f32 = 5.0;
const PILL_HEIGHT_PX: f32 = 8.0;
const PILL_WIDTH_PX: f32 = 120.0;
const CHIP_METER_PX: f32 = 24.0;
const MARKER_RADIUS_PX: f32 = 4.5;
const MARKER_INDENT_PX: f32 = 18.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    #[serde(skip)]
    pub pdf: Vec<u8>,
    /// Content ran past the bottom of the single page.
    pub overflowed: bool,
    pub content_height_px: f32,
    pub transcript: Transcript,
}

/// Renders the tree to PDF bytes. `assets` holds decoded portraits keyed by
/// source; a portrait missing from it is left out of the page.
pub fn render(tree: &RenderTree, assets: &ImageAssets) -> Result<ExportArtifact, RenderError> {
    emit(tree, ExportBackend::new(assets))
}

// ────────────────────────────────────────────────────────────────────────────
// Display list
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Polygon {
        points: Vec<(f32, f32)>,
        color: Color,
        alpha: f32,
    },
    Stroke {
        points: Vec<(f32, f32)>,
        closed: bool,
        width: f32,
        dash: Option<(f32, f32)>,
        color: Color,
    },
    Disc {
        cx: f32,
        cy: f32,
        r: f32,
        color: Color,
    },
    Ring {
        cx: f32,
        cy: f32,
        r: f32,
        width: f32,
        dash: Option<(f32, f32)>,
        color: Color,
    },
    Text {
        x: f32,
        baseline: f32,
        size: f32,
        font: usize,
        tracking: f32,
        color: Color,
        bytes: Vec<u8>,
    },
    Image {
        index: usize,
        x: f32,
        y: f32,
        size: f32,
        circle: bool,
    },
    /// Draws `ops` clipped to a rectangle.
    Clip {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        ops: Vec<Op>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FontKey {
    class: FontClass,
    bold: bool,
}

struct TextRun {
    font: FontKey,
    size: f32,
    color: Color,
    tracking_em: f32,
    leading: f32,
    indent: f32,
}

struct EmbeddedImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
struct ChipRow {
    x: f32,
    y: f32,
    height: f32,
}

/// Layout state of the region being emitted.
struct Frame {
    band: Band,
    x: f32,
    width: f32,
    top: f32,
    cursor: f32,
    padding: f32,
    min_height: f32,
    align: Align,
    text_color: Color,
    background: Option<Color>,
    chips: Option<ChipRow>,
    ops: Vec<Op>,
}

impl Frame {
    fn inner_x(&self) -> f32 {
        self.x + self.padding
    }

    fn inner_width(&self) -> f32 {
        (self.width - 2.0 * self.padding).max(1.0)
    }

    fn inner_right(&self) -> f32 {
        self.inner_x() + self.inner_width()
    }

    /// Left edge of a line of `width` px under the region's alignment.
    fn line_x(&self, indent: f32, width: f32) -> f32 {
        match self.align {
            Align::Left => self.inner_x() + indent,
            Align::Center => {
                self.inner_x() + indent + ((self.inner_width() - indent - width) / 2.0).max(0.0)
            }
        }
    }

    fn flush_chips(&mut self) {
        if let Some(row) = self.chips.take() {
            self.cursor = row.y + row.height + 6.0;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend
// ────────────────────────────────────────────────────────────────────────────

pub struct ExportBackend<'a> {
    assets: &'a ImageAssets,
    style: Option<ResolvedStyle>,
    title: String,
    page_width: f32,
    page_height: f32,
    ops: Vec<Op>,
    frame: Option<Frame>,
    /// Bottom edge of the top band; body regions start here.
    top_bottom: f32,
    content_bottom: f32,
    /// Top-left corner for the next `emit_icon`.
    pen: (f32, f32),
    fonts: Vec<FontKey>,
    alphas: Vec<u16>,
    images: Vec<EmbeddedImage>,
    image_index: HashMap<String, usize>,
    transcript: Transcript,
}

impl<'a> ExportBackend<'a> {
    pub fn new(assets: &'a ImageAssets) -> Self {
        Self {
            assets,
            style: None,
            title: String::new(),
            page_width: page_width_px(),
            page_height: page_height_px(),
            ops: Vec::new(),
            frame: None,
            top_bottom: 0.0,
            content_bottom: 0.0,
            pen: (0.0, 0.0),
            fonts: Vec::new(),
            alphas: Vec::new(),
            images: Vec::new(),
            image_index: HashMap::new(),
            transcript: Transcript::default(),
        }
    }

    fn style(&self) -> Result<&ResolvedStyle, RenderError> {
        self.style
            .as_ref()
            .ok_or(RenderError::Sequence("emission before begin_page"))
    }

    fn frame(&mut self) -> Result<&mut Frame, RenderError> {
        self.frame
            .as_mut()
            .ok_or(RenderError::Sequence("block emitted outside a region"))
    }

    /// Looks a role up and records it as applied.
    fn paint(&mut self, role: ColorRole) -> Result<Color, RenderError> {
        let color = self.style()?.color(role);
        self.transcript.color(role, color);
        Ok(color)
    }

    fn heading_font(&self) -> Result<FontKey, RenderError> {
        Ok(FontKey {
            class: FontClass::classify(&self.style()?.fonts.heading_font),
            bold: true,
        })
    }

    fn body_font(&self, bold: bool) -> Result<FontKey, RenderError> {
        Ok(FontKey {
            class: FontClass::classify(&self.style()?.fonts.body_font),
            bold,
        })
    }

    fn font_index(&mut self, key: FontKey) -> usize {
        match self.fonts.iter().position(|k| *k == key) {
            Some(i) => i,
            None => {
                self.fonts.push(key);
                self.fonts.len() - 1
            }
        }
    }

    fn alpha_index(&mut self, alpha: f32) -> usize {
        let key = (alpha.clamp(0.0, 1.0) * 100.0).round() as u16;
        match self.alphas.iter().position(|a| *a == key) {
            Some(i) => i,
            None => {
                self.alphas.push(key);
                self.alphas.len() - 1
            }
        }
    }

    fn push(&mut self, op: Op) -> Result<(), RenderError> {
        if let Op::Rect { alpha, .. } | Op::Polygon { alpha, .. } = &op {
            if *alpha < 1.0 {
                self.alpha_index(*alpha);
            }
        }
        self.frame()?.ops.push(op);
        Ok(())
    }

    fn text_width(font: FontKey, text: &str, size: f32, tracking_em: f32) -> f32 {
        get_metrics(font.class, font.bold).measure(text, size)
            + tracking_em * size * text.chars().count() as f32
    }

    /// Wraps `text` to the region width and advances the cursor. Returns the
    /// top of the first line.
    fn draw_text(&mut self, text: &str, run: TextRun) -> Result<f32, RenderError> {
        let font = self.font_index(run.font);
        let metrics = get_metrics(run.font.class, run.font.bold);
        let frame = self.frame()?;
        let tracking = run.tracking_em * run.size;
        let max_width = (frame.inner_width() - run.indent).max(run.size);
        let top = frame.cursor;
        for paragraph in text.lines() {
            for line in metrics.wrap(paragraph, max_width / run.size) {
                let width = metrics.measure(&line, run.size) + tracking * line.chars().count() as f32;
                let x = frame.line_x(run.indent, width);
                frame.ops.push(Op::Text {
                    x,
                    baseline: frame.cursor + run.size * ASCENT,
                    size: run.size,
                    font,
                    tracking,
                    color: run.color,
                    bytes: winansi::encode(&line),
                });
                frame.cursor += run.size * run.leading;
            }
        }
        Ok(top)
    }

    /// Places a single line at an explicit position without moving the cursor.
    fn place_text(
        &mut self,
        text: &str,
        font: FontKey,
        size: f32,
        color: Color,
        at: (f32, f32),
    ) -> Result<(), RenderError> {
        let font = self.font_index(font);
        self.push(Op::Text {
            x: at.0,
            baseline: at.1 + size * ASCENT,
            size,
            font,
            tracking: 0.0,
            color,
            bytes: winansi::encode(text),
        })
    }

    fn advance(&mut self, px: f32) -> Result<(), RenderError> {
        self.frame()?.cursor += px;
        Ok(())
    }

    fn register_image(&mut self, src: &str, size_px: f32) -> Option<usize> {
        if let Some(i) = self.image_index.get(src) {
            return Some(*i);
        }
        let decoded = self.assets.get(src)?;
        // Center-crop to a square, like `object-fit: cover` on a square box.
        let (w, h) = decoded.dimensions();
        let crop = w.min(h);
        if crop == 0 {
            return None;
        }
        let mut square =
            imageops::crop_imm(decoded, (w - crop) / 2, (h - crop) / 2, crop, crop).to_image();
        let target = (size_px * IMAGE_PX_PER_PX).ceil().max(1.0) as u32;
        if crop > target {
            square = imageops::resize(&square, target, target, imageops::FilterType::Triangle);
        }
        let side = square.width();
        let mut rgb = Vec::with_capacity((side * side * 3) as usize);
        let mut alpha = Vec::with_capacity((side * side) as usize);
        for pixel in square.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            alpha.push(pixel.0[3]);
        }
        self.images.push(EmbeddedImage {
            width: side,
            height: side,
            rgb,
            alpha,
        });
        let index = self.images.len() - 1;
        self.image_index.insert(src.to_string(), index);
        Some(index)
    }

    fn draw_portrait(&mut self, image: &ImageSpec) -> Result<(), RenderError> {
        let Some(index) = self.register_image(&image.src, image.size_px) else {
            debug!("Portrait not in resolved assets, skipped");
            return Ok(());
        };
        let frame = self.frame()?;
        let size = image.size_px;
        let x = frame.line_x(0.0, size);
        let y = frame.cursor;
        frame.ops.push(Op::Image {
            index,
            x,
            y,
            size,
            circle: image.is_circle,
        });
        if let Some(border) = &image.frame {
            let w = border.width_px;
            let dash = match border.style {
                FrameStyle::Solid | FrameStyle::Double => None,
                FrameStyle::Dashed => Some((3.0 * w, 2.0 * w)),
                FrameStyle::Dotted => Some((w, w)),
            };
            if image.is_circle {
                frame.ops.push(Op::Ring {
                    cx: x + size / 2.0,
                    cy: y + size / 2.0,
                    r: (size - w) / 2.0,
                    width: w,
                    dash,
                    color: border.color,
                });
            } else {
                let (l, t, r, b) = (x + w / 2.0, y + w / 2.0, x + size - w / 2.0, y + size - w / 2.0);
                frame.ops.push(Op::Stroke {
                    points: vec![(l, t), (r, t), (r, b), (l, b)],
                    closed: true,
                    width: w,
                    dash,
                    color: border.color,
                });
            }
        }
        frame.cursor += size + 8.0;
        Ok(())
    }

    fn star_row(&self, x: f32, y: f32, size: f32, color: Color) -> Vec<Op> {
        let scale = size / GLYPH_BOX;
        (0..5)
            .map(|i| {
                let left = x + i as f32 * (size + STAR_GAP_PX);
                Op::Polygon {
                    points: star_points()
                        .iter()
                        .map(|(px, py)| (left + px * scale, y + py * scale))
                        .collect(),
                    color,
                    alpha: 1.0,
                }
            })
            .collect()
    }

    fn draw_meter(
        &mut self,
        skill: &SkillEntry,
        fill: Color,
        track: Color,
        at: (f32, f32),
        width: f32,
        height: f32,
    ) -> Result<(), RenderError> {
        let radius = height / 2.0;
        self.push(Op::Rect {
            x: at.0,
            y: at.1,
            w: width,
            h: height,
            radius,
            color: track,
            alpha: 1.0,
        })?;
        if skill.fill > 0.0 {
            self.push(Op::Rect {
                x: at.0,
                y: at.1,
                w: width * skill.fill.clamp(0.0, 1.0),
                h: height,
                radius,
                color: fill,
                alpha: 1.0,
            })?;
        }
        Ok(())
    }

    fn emit_chip(
        &mut self,
        skill: &SkillEntry,
        fill: Color,
        track: Color,
        label: Color,
    ) -> Result<(), RenderError> {
        let font = self.body_font(false)?;
        let size = skill.size_px;
        let icon_w = if skill.icon.is_some() { size + 4.0 } else { 0.0 };
        let name_w = Self::text_width(font, &skill.name, size, 0.0);
        let width = 10.0 + icon_w + name_w + 6.0 + CHIP_METER_PX + 10.0;
        let height = size * 1.9;

        let frame = self.frame()?;
        let mut row = frame.chips.unwrap_or(ChipRow {
            x: frame.inner_x(),
            y: frame.cursor,
            height,
        });
        if row.x > frame.inner_x() && row.x + width > frame.inner_right() {
            row = ChipRow {
                x: frame.inner_x(),
                y: row.y + row.height + 6.0,
                height,
            };
        }
        row.height = row.height.max(height);
        frame.chips = Some(ChipRow {
            x: row.x + width + 6.0,
            ..row
        });

        let (x, y) = (row.x, row.y);
        self.push(Op::Rect {
            x,
            y,
            w: width,
            h: height,
            radius: height / 2.0,
            color: fill,
            alpha: 0.08,
        })?;
        let mut pen_x = x + 10.0;
        let text_y = y + (height - size) / 2.0;
        if let Some(icon) = skill.icon {
            self.pen = (pen_x, text_y);
            self.emit_icon(icon, skill.fill_color, size)?;
            pen_x += icon_w;
        }
        self.place_text(&skill.name, font, size, label, (pen_x, text_y))?;
        pen_x += name_w + 6.0;
        self.draw_meter(
            skill,
            fill,
            track,
            (pen_x, y + height / 2.0 - 2.0),
            CHIP_METER_PX,
            4.0,
        )
    }
}

impl RenderBackend for ExportBackend<'_> {
    type Output = ExportArtifact;

    fn begin_page(&mut self, tree: &RenderTree) -> Result<(), RenderError> {
        self.style = Some(tree.style.clone());
        self.title = tree
            .regions
            .iter()
            .flat_map(|r| r.blocks.iter())
            .find_map(|b| match b {
                Block::Header(h) if !h.name.trim().is_empty() => Some(h.name.trim().to_string()),
                _ => None,
            })
            .unwrap_or_default();
        let background = self.paint(tree.page_background)?;
        self.ops.push(Op::Rect {
            x: 0.0,
            y: 0.0,
            w: self.page_width,
            h: self.page_height,
            radius: 0.0,
            color: background,
            alpha: 1.0,
        });
        Ok(())
    }

    fn begin_region(&mut self, region: &Region) -> Result<(), RenderError> {
        if self.frame.is_some() {
            return Err(RenderError::Sequence("region opened inside a region"));
        }
        let background = region.background.map(|bg| self.paint(bg)).transpose()?;
        let text_color = self.paint(region.text_color)?;
        let top = match region.band {
            Band::Top => 0.0,
            Band::Body => self.top_bottom,
        };
        self.frame = Some(Frame {
            band: region.band,
            x: region.x * self.page_width,
            width: region.width * self.page_width,
            top,
            cursor: top + region.padding_px,
            padding: region.padding_px,
            min_height: region.min_height_px,
            align: region.align,
            text_color,
            background,
            chips: None,
            ops: Vec::new(),
        });
        Ok(())
    }

    fn emit_decoration(&mut self, decoration: &Decoration) -> Result<(), RenderError> {
        let color = self.paint(decoration.color)?;
        let frame = self.frame()?;
        let (ox, oy) = (frame.x, frame.top);
        let points = match &decoration.shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
                rotation_deg,
            } => {
                let (cx, cy) = (ox + x + width / 2.0, oy + y + height / 2.0);
                let (sin, cos) = rotation_deg.to_radians().sin_cos();
                [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
                    .iter()
                    .map(|(sx, sy)| {
                        let (dx, dy) = (sx * width / 2.0, sy * height / 2.0);
                        (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
                    })
                    .collect()
            }
            Shape::Polygon { points } => points.iter().map(|(x, y)| (ox + x, oy + y)).collect(),
        };
        self.push(Op::Polygon {
            points,
            color,
            alpha: decoration.opacity,
        })
    }

    fn emit_header(&mut self, header: &HeaderBlock) -> Result<(), RenderError> {
        if let Some(image) = &header.image {
            self.draw_portrait(image)?;
        }
        if !header.name.is_empty() {
            let color = self.paint(header.name_color)?;
            let (name, tracking_em) = if header.uppercase_name {
                (header.name.to_uppercase(), 0.04)
            } else {
                (header.name.clone(), 0.0)
            };
            let font = self.heading_font()?;
            self.draw_text(
                &name,
                TextRun {
                    font,
                    size: header.name_size_px,
                    color,
                    tracking_em,
                    leading: 1.2,
                    indent: 0.0,
                },
            )?;
            self.advance(4.0)?;
        }
        if !header.title.is_empty() {
            let color = self.paint(header.title_color)?;
            let font = self.body_font(false)?;
            self.draw_text(
                &header.title,
                TextRun {
                    font,
                    size: header.title_size_px,
                    color,
                    tracking_em: 0.0,
                    leading: 1.3,
                    indent: 0.0,
                },
            )?;
        }
        self.advance(12.0)
    }

    fn emit_contact(&mut self, contact: &ContactBlock) -> Result<(), RenderError> {
        let size = contact.size_px;
        if let Some(label) = &contact.label {
            let color = self.paint(contact.color)?;
            let font = self.heading_font()?;
            self.draw_text(
                label,
                TextRun {
                    font,
                    size: size * 1.1,
                    color,
                    tracking_em: 0.0,
                    leading: 1.6,
                    indent: 0.0,
                },
            )?;
        }
        let color = self.paint(contact.color)?;
        let font = self.body_font(false)?;
        let entry_width =
            |text: &str| size + 6.0 + Self::text_width(font, text, size, 0.0);

        // Entries packed into lines; a column is one entry per line.
        let (inner_width, align) = {
            let frame = self.frame()?;
            (frame.inner_width(), frame.align)
        };
        let mut lines: Vec<Vec<(usize, f32)>> = Vec::new();
        let mut used = 0.0;
        for (i, entry) in contact.entries.iter().enumerate() {
            let w = entry_width(&entry.text);
            match lines.last_mut() {
                Some(line) if contact.flow == Flow::Row && used + 16.0 + w <= inner_width => {
                    line.push((i, w));
                    used += 16.0 + w;
                }
                _ => {
                    lines.push(vec![(i, w)]);
                    used = w;
                }
            }
        }

        for line in lines {
            let total = line.iter().map(|(_, w)| w).sum::<f32>() + 16.0 * (line.len() as f32 - 1.0);
            let (mut x, y) = {
                let frame = self.frame()?;
                let x = match align {
                    Align::Left => frame.inner_x(),
                    Align::Center => frame.line_x(0.0, total),
                };
                (x, frame.cursor)
            };
            for (i, w) in line {
                let entry = &contact.entries[i];
                self.pen = (x, y);
                self.emit_icon(entry.icon, contact.icon_color, size)?;
                self.place_text(&entry.text, font, size, color, (x + size + 6.0, y))?;
                x += w + 16.0;
            }
            self.advance(size * 1.7)?;
        }
        self.advance(10.0)
    }

    fn emit_icon(&mut self, icon: Icon, color: ColorRole, size_px: f32) -> Result<(), RenderError> {
        let color = self.paint(color)?;
        let scale = size_px / GLYPH_BOX;
        let (x, y) = self.pen;
        let map = |points: &[(f32, f32)]| -> Vec<(f32, f32)> {
            points
                .iter()
                .map(|(px, py)| (x + px * scale, y + py * scale))
                .collect()
        };
        for glyph in glyphs(icon) {
            let op = match *glyph {
                Glyph::Fill(points) => Op::Polygon {
                    points: map(points),
                    color,
                    alpha: 1.0,
                },
                Glyph::Stroke {
                    points,
                    width,
                    closed,
                } => Op::Stroke {
                    points: map(points),
                    closed,
                    width: width * scale,
                    dash: None,
                    color,
                },
                Glyph::Disc { cx, cy, r } => Op::Disc {
                    cx: x + cx * scale,
                    cy: y + cy * scale,
                    r: r * scale,
                    color,
                },
                Glyph::Ring { cx, cy, r, width } => Op::Ring {
                    cx: x + cx * scale,
                    cy: y + cy * scale,
                    r: r * scale,
                    width: width * scale,
                    dash: None,
                    color,
                },
            };
            self.push(op)?;
        }
        Ok(())
    }

    fn emit_summary(&mut self, summary: &SummaryBlock) -> Result<(), RenderError> {
        let color = self.paint(summary.color)?;
        let font = self.body_font(false)?;
        self.draw_text(
            &summary.text,
            TextRun {
                font,
                size: summary.size_px,
                color,
                tracking_em: 0.0,
                leading: 1.5,
                indent: 0.0,
            },
        )?;
        self.advance(14.0)
    }

    fn begin_section(&mut self, section: &SectionBlock) -> Result<(), RenderError> {
        self.transcript.begin_section(&section.section_id);
        self.frame()?.flush_chips();
        Ok(())
    }

    fn emit_heading(&mut self, heading: &Heading) -> Result<(), RenderError> {
        let text = heading.display_text();
        self.transcript.title(&winansi::as_drawn(&text));
        let color = self.paint(heading.color)?;
        let font = self.heading_font()?;
        self.draw_text(
            &text,
            TextRun {
                font,
                size: heading.size_px,
                color,
                tracking_em: heading.tracking_em,
                leading: 1.3,
                indent: 0.0,
            },
        )?;
        if let Some(rule) = heading.rule {
            let color = self.paint(rule)?;
            let frame = self.frame()?;
            let (x, y, w) = (frame.inner_x(), frame.cursor, frame.inner_width());
            self.push(Op::Rect {
                x,
                y,
                w,
                h: 2.0,
                radius: 0.0,
                color,
                alpha: 1.0,
            })?;
            self.advance(10.0)
        } else {
            self.advance(6.0)
        }
    }

    fn emit_section_item(&mut self, item: &ItemEntry) -> Result<(), RenderError> {
        self.frame()?.flush_chips();
        let mut indent = 0.0;
        if let Some(Marker::TimelineDot { color }) = item.marker {
            let color = self.paint(color)?;
            let frame = self.frame()?;
            let (cx, cy) = (
                frame.inner_x() + MARKER_RADIUS_PX,
                frame.cursor + item.title_size_px / 2.0,
            );
            self.push(Op::Disc {
                cx,
                cy,
                r: MARKER_RADIUS_PX,
                color,
            })?;
            indent = MARKER_INDENT_PX;
        }

        let small = self.style()?.size(SMALL_PX);
        let body_font = self.body_font(false)?;
        let text_color = self.frame()?.text_color;
        let mut title_line: Option<(f32, f32)> = None;
        for (field, text) in item.runs() {
            self.transcript.text(&winansi::as_drawn(&text));
            match field {
                ItemField::Title => {
                    let color = self.paint(item.title_color)?;
                    let font = self.heading_font()?;
                    let top = self.draw_text(
                        &text,
                        TextRun {
                            font,
                            size: item.title_size_px,
                            color,
                            tracking_em: 0.0,
                            leading: 1.3,
                            indent,
                        },
                    )?;
                    title_line = Some((top, Self::text_width(font, &text, item.title_size_px, 0.0)));
                }
                ItemField::Subtitle => {
                    let color = self.paint(item.subtitle_color)?;
                    self.draw_text(
                        &text,
                        TextRun {
                            font: body_font,
                            size: item.body_size_px,
                            color,
                            tracking_em: 0.0,
                            leading: 1.4,
                            indent,
                        },
                    )?;
                }
                ItemField::Date => {
                    // Dates sit right-aligned on the title line when there is room.
                    let width = Self::text_width(body_font, &text, small, 0.0);
                    let frame = self.frame()?;
                    let fits = frame.align == Align::Left
                        && title_line.is_some_and(|(_, title_w)| {
                            indent + title_w + 12.0 + width <= frame.inner_width()
                        });
                    match title_line {
                        Some((top, _)) if fits => {
                            let at = (frame.inner_right() - width, top + 1.0);
                            self.place_text(&text, body_font, small, text_color, at)?;
                        }
                        _ => {
                            self.draw_text(
                                &text,
                                TextRun {
                                    font: body_font,
                                    size: small,
                                    color: text_color,
                                    tracking_em: 0.0,
                                    leading: 1.4,
                                    indent,
                                },
                            )?;
                        }
                    }
                }
                ItemField::Meta | ItemField::Tags => {
                    self.draw_text(
                        &text,
                        TextRun {
                            font: body_font,
                            size: small,
                            color: text_color,
                            tracking_em: 0.0,
                            leading: 1.4,
                            indent,
                        },
                    )?;
                }
                ItemField::Body => {
                    self.advance(3.0)?;
                    self.draw_text(
                        &text,
                        TextRun {
                            font: body_font,
                            size: item.body_size_px,
                            color: text_color,
                            tracking_em: 0.0,
                            leading: 1.45,
                            indent,
                        },
                    )?;
                }
            }
        }
        self.advance(10.0)
    }

    fn emit_skill(&mut self, skill: &SkillEntry) -> Result<(), RenderError> {
        self.transcript.text(&winansi::as_drawn(&skill.name));
        let fill = self.paint(skill.fill_color)?;
        let track = self.paint(skill.track_color)?;
        let label = self.paint(skill.label_color)?;
        if skill.idiom == SkillIdiom::Chips {
            return self.emit_chip(skill, fill, track, label);
        }

        self.frame()?.flush_chips();
        let size = skill.size_px;
        let font = self.body_font(false)?;
        let icon_w = if skill.icon.is_some() { size + 6.0 } else { 0.0 };
        let name_w = Self::text_width(font, &skill.name, size, 0.0);
        let (inner_x, inner_width, align, y) = {
            let frame = self.frame()?;
            (frame.inner_x(), frame.inner_width(), frame.align, frame.cursor)
        };
        let name_x = match align {
            Align::Left => inner_x,
            Align::Center => inner_x + ((inner_width - icon_w - name_w) / 2.0).max(0.0),
        };
        if let Some(icon) = skill.icon {
            self.pen = (name_x, y);
            self.emit_icon(icon, skill.fill_color, size)?;
        }
        self.place_text(&skill.name, font, size, label, (name_x + icon_w, y))?;

        match skill.idiom {
            SkillIdiom::Stars => {
                let stars_w = 5.0 * size + 4.0 * STAR_GAP_PX;
                let (x, star_y) = match align {
                    Align::Left => (inner_x + inner_width - stars_w, y),
                    Align::Center => (inner_x + (inner_width - stars_w) / 2.0, y + size * 1.4),
                };
                for op in self.star_row(x, star_y, size, track) {
                    self.push(op)?;
                }
                let filled = self.star_row(x, star_y, size, fill);
                self.push(Op::Clip {
                    x,
                    y: star_y,
                    w: stars_w * skill.fill.clamp(0.0, 1.0),
                    h: size,
                    ops: filled,
                })?;
                let advance = if align == Align::Center { size * 3.0 } else { size * 1.6 };
                self.advance(advance)
            }
            SkillIdiom::Bars => {
                let at = (inner_x, y + size * 1.4);
                self.draw_meter(skill, fill, track, at, inner_width, BAR_HEIGHT_PX)?;
                self.advance(size * 1.4 + BAR_HEIGHT_PX + 8.0)
            }
            SkillIdiom::Pills => {
                let w = PILL_WIDTH_PX.min(inner_width);
                let x = match align {
                    Align::Left => inner_x,
                    Align::Center => inner_x + (inner_width - w) / 2.0,
                };
                self.draw_meter(skill, fill, track, (x, y + size * 1.4), w, PILL_HEIGHT_PX)?;
                self.advance(size * 1.4 + PILL_HEIGHT_PX + 8.0)
            }
            SkillIdiom::Chips => Ok(()),
        }
    }

    fn end_section(&mut self, _section: &SectionBlock) -> Result<(), RenderError> {
        self.transcript.end_section();
        let frame = self.frame()?;
        frame.flush_chips();
        frame.cursor += 8.0;
        Ok(())
    }

    fn end_region(&mut self, _region: &Region) -> Result<(), RenderError> {
        let mut frame = self
            .frame
            .take()
            .ok_or(RenderError::Sequence("region closed twice"))?;
        frame.flush_chips();
        let content_end = frame.cursor + frame.padding;
        let bottom = content_end.max(frame.top + frame.min_height);
        self.content_bottom = self.content_bottom.max(content_end);

        let background_bottom = match frame.band {
            Band::Top => {
                self.top_bottom = self.top_bottom.max(bottom);
                bottom
            }
            // Body columns run to the foot of the page.
            Band::Body => bottom.max(self.page_height),
        };
        if let Some(color) = frame.background {
            self.ops.push(Op::Rect {
                x: frame.x,
                y: frame.top,
                w: frame.width,
                h: background_bottom - frame.top,
                radius: 0.0,
                color,
                alpha: 1.0,
            });
        }
        self.ops.append(&mut frame.ops);
        Ok(())
    }

    fn finish(self) -> Result<ExportArtifact, RenderError> {
        if self.frame.is_some() {
            return Err(RenderError::Sequence("region left open"));
        }
        let overflowed = self.content_bottom > self.page_height;
        if overflowed {
            warn!(
                content_px = self.content_bottom,
                page_px = self.page_height,
                "Export content overflows the page"
            );
        }
        let pdf = write_pdf(&self)?;
        debug!(bytes = pdf.len(), fonts = self.fonts.len(), images = self.images.len(), "PDF written");
        Ok(ExportArtifact {
            pdf,
            overflowed,
            content_height_px: self.content_bottom,
            transcript: self.transcript,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PDF serialization
// ────────────────────────────────────────────────────────────────────────────

struct Resources {
    fonts: Vec<String>,
    states: Vec<String>,
    alphas: Vec<u16>,
    images: Vec<String>,
}

impl Resources {
    fn state_for(&self, alpha: f32) -> Option<&str> {
        let key = (alpha.clamp(0.0, 1.0) * 100.0).round() as u16;
        if key >= 100 {
            return None;
        }
        self.alphas
            .iter()
            .position(|a| *a == key)
            .map(|i| self.states[i].as_str())
    }
}

fn compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| RenderError::Encode(e.to_string()))
}

fn write_pdf(backend: &ExportBackend<'_>) -> Result<Vec<u8>, RenderError> {
    let mut next = 1;
    let mut alloc = || {
        let r = Ref::new(next);
        next += 1;
        r
    };
    let catalog_id = alloc();
    let page_tree_id = alloc();
    let page_id = alloc();
    let content_id = alloc();
    let info_id = alloc();
    let font_ids: Vec<Ref> = backend.fonts.iter().map(|_| alloc()).collect();
    let state_ids: Vec<Ref> = backend.alphas.iter().map(|_| alloc()).collect();
    let image_ids: Vec<(Ref, Ref)> = backend.images.iter().map(|_| (alloc(), alloc())).collect();

    let resources = Resources {
        fonts: (0..font_ids.len()).map(|i| format!("F{i}")).collect(),
        states: (0..state_ids.len()).map(|i| format!("GS{i}")).collect(),
        alphas: backend.alphas.clone(),
        images: (0..image_ids.len()).map(|i| format!("Im{i}")).collect(),
    };

    let width_pt = px_to_pt(backend.page_width);
    let height_pt = px_to_pt(backend.page_height);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, width_pt, height_pt));
    page.parent(page_tree_id);
    page.contents(content_id);
    {
        let mut res = page.resources();
        if !font_ids.is_empty() {
            let mut fonts = res.fonts();
            for (name, id) in resources.fonts.iter().zip(&font_ids) {
                fonts.pair(Name(name.as_bytes()), *id);
            }
        }
        if !state_ids.is_empty() {
            let mut states = res.ext_g_states();
            for (name, id) in resources.states.iter().zip(&state_ids) {
                states.pair(Name(name.as_bytes()), *id);
            }
        }
        if !image_ids.is_empty() {
            let mut objects = res.x_objects();
            for (name, (id, _)) in resources.images.iter().zip(&image_ids) {
                objects.pair(Name(name.as_bytes()), *id);
            }
        }
    }
    page.finish();

    for (key, id) in backend.fonts.iter().zip(&font_ids) {
        pdf.type1_font(*id)
            .base_font(Name(get_metrics(key.class, key.bold).base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
    for (alpha, id) in backend.alphas.iter().zip(&state_ids) {
        let a = *alpha as f32 / 100.0;
        pdf.ext_graphics(*id).non_stroking_alpha(a).stroking_alpha(a);
    }
    for (image, (id, mask_id)) in backend.images.iter().zip(&image_ids) {
        let rgb = compress(&image.rgb)?;
        let alpha = compress(&image.alpha)?;
        let mut xobject = pdf.image_xobject(*id, &rgb);
        xobject.filter(Filter::FlateDecode);
        xobject.width(image.width as i32);
        xobject.height(image.height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        xobject.s_mask(*mask_id);
        xobject.finish();

        let mut mask = pdf.image_xobject(*mask_id, &alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(image.width as i32);
        mask.height(image.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask.finish();
    }

    let mut content = Content::new();
    let page = PageSpace { height_pt };
    for op in &backend.ops {
        write_op(&mut content, op, &resources, &page);
    }
    pdf.stream(content_id, &content.finish());

    let title = if backend.title.is_empty() { "CV" } else { backend.title.as_str() };
    pdf.document_info(info_id)
        .title(TextStr(title))
        .creator(TextStr(CREATOR));

    Ok(pdf.finish())
}

/// px (y down) → pt (y up).
struct PageSpace {
    height_pt: f32,
}

impl PageSpace {
    fn x(&self, px: f32) -> f32 {
        px_to_pt(px)
    }

    fn y(&self, px: f32) -> f32 {
        self.height_pt - px_to_pt(px)
    }
}

fn set_fill(content: &mut Content, color: Color) {
    let (r, g, b) = color.to_unit();
    content.set_fill_rgb(r, g, b);
}

fn set_stroke(content: &mut Content, color: Color) {
    let (r, g, b) = color.to_unit();
    content.set_stroke_rgb(r, g, b);
}

/// Circle path in pt.
fn circle(content: &mut Content, cx: f32, cy: f32, r: f32) {
    let k = KAPPA * r;
    content.move_to(cx + r, cy);
    content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    content.close_path();
}

/// Rectangle path in pt with `(x, y)` at the bottom-left corner.
fn rounded_rect(content: &mut Content, x: f32, y: f32, w: f32, h: f32, radius: f32) {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    if r <= 0.0 {
        content.rect(x, y, w, h);
        return;
    }
    let k = KAPPA * r;
    content.move_to(x + r, y);
    content.line_to(x + w - r, y);
    content.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    content.line_to(x + w, y + h - r);
    content.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    content.line_to(x + r, y + h);
    content.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    content.line_to(x, y + r);
    content.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    content.close_path();
}

fn polyline(content: &mut Content, points: &[(f32, f32)], page: &PageSpace) -> bool {
    let Some(((x0, y0), rest)) = points.split_first() else {
        return false;
    };
    content.move_to(page.x(*x0), page.y(*y0));
    for (x, y) in rest {
        content.line_to(page.x(*x), page.y(*y));
    }
    true
}

fn set_dash(content: &mut Content, dash: Option<(f32, f32)>) {
    if let Some((on, off)) = dash {
        content.set_dash_pattern([px_to_pt(on), px_to_pt(off)], 0.0);
    }
}

fn write_op(content: &mut Content, op: &Op, res: &Resources, page: &PageSpace) {
    match op {
        Op::Rect {
            x,
            y,
            w,
            h,
            radius,
            color,
            alpha,
        } => {
            let state = res.state_for(*alpha);
            content.save_state();
            if let Some(name) = state {
                content.set_parameters(Name(name.as_bytes()));
            }
            set_fill(content, *color);
            rounded_rect(
                content,
                page.x(*x),
                page.y(y + h),
                px_to_pt(*w),
                px_to_pt(*h),
                px_to_pt(*radius),
            );
            content.fill_nonzero();
            content.restore_state();
        }
        Op::Polygon {
            points,
            color,
            alpha,
        } => {
            content.save_state();
            if let Some(name) = res.state_for(*alpha) {
                content.set_parameters(Name(name.as_bytes()));
            }
            set_fill(content, *color);
            if polyline(content, points, page) {
                content.close_path();
                content.fill_nonzero();
            }
            content.restore_state();
        }
        Op::Stroke {
            points,
            closed,
            width,
            dash,
            color,
        } => {
            content.save_state();
            set_stroke(content, *color);
            content.set_line_width(px_to_pt(*width));
            set_dash(content, *dash);
            if polyline(content, points, page) {
                if *closed {
                    content.close_and_stroke();
                } else {
                    content.stroke();
                }
            }
            content.restore_state();
        }
        Op::Disc { cx, cy, r, color } => {
            content.save_state();
            set_fill(content, *color);
            circle(content, page.x(*cx), page.y(*cy), px_to_pt(*r));
            content.fill_nonzero();
            content.restore_state();
        }
        Op::Ring {
            cx,
            cy,
            r,
            width,
            dash,
            color,
        } => {
            content.save_state();
            set_stroke(content, *color);
            content.set_line_width(px_to_pt(*width));
            set_dash(content, *dash);
            circle(content, page.x(*cx), page.y(*cy), px_to_pt(*r));
            content.stroke();
            content.restore_state();
        }
        Op::Text {
            x,
            baseline,
            size,
            font,
            tracking,
            color,
            bytes,
        } => {
            let Some(name) = res.fonts.get(*font) else {
                return;
            };
            set_fill(content, *color);
            content.begin_text();
            content.set_font(Name(name.as_bytes()), px_to_pt(*size));
            content.set_char_spacing(px_to_pt(*tracking));
            content.next_line(page.x(*x), page.y(*baseline));
            content.show(Str(bytes));
            content.end_text();
        }
        Op::Image {
            index,
            x,
            y,
            size,
            circle: round,
        } => {
            let Some(name) = res.images.get(*index) else {
                return;
            };
            let (left, bottom, side) = (page.x(*x), page.y(y + size), px_to_pt(*size));
            content.save_state();
            if *round {
                circle(content, left + side / 2.0, bottom + side / 2.0, side / 2.0);
            } else {
                rounded_rect(content, left, bottom, side, side, px_to_pt(8.0));
            }
            content.clip_nonzero();
            content.end_path();
            content.transform([side, 0.0, 0.0, side, left, bottom]);
            content.x_object(Name(name.as_bytes()));
            content.restore_state();
        }
        Op::Clip { x, y, w, h, ops } => {
            content.save_state();
            content.rect(page.x(*x), page.y(y + h), px_to_pt(*w), px_to_pt(*h));
            content.clip_nonzero();
            content.end_path();
            for inner in ops {
                write_op(content, inner, res, page);
            }
            content.restore_state();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::ProfileImage;
    use crate::document::normalize::normalize;
    use crate::layout::fixtures::full_document;
    use crate::layout::{build_render_tree, LayoutOptions, LayoutProgram};
    use crate::render::assets::tests::png_data_url;
    use crate::render::assets::{decode_data_url, decode_images};
    use crate::render::preview;

    fn export(template: &str) -> ExportArtifact {
        let tree = build_render_tree(&full_document(template), &LayoutOptions::default());
        render(&tree, &ImageAssets::new()).expect("export renders")
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_output_is_a_pdf_with_base14_fonts() {
        let artifact = export("standard");
        assert!(artifact.pdf.starts_with(b"%PDF-"));
        assert!(contains(&artifact.pdf, b"/WinAnsiEncoding"));
        assert!(contains(&artifact.pdf, b"/Helvetica-Bold"));
        assert!(!artifact.overflowed);
    }

    #[test]
    fn test_content_stream_carries_heading_text() {
        let artifact = export("standard");
        assert!(contains(&artifact.pdf, b"(Kompetenser)"));
    }

    #[test]
    fn test_document_info_is_written() {
        let artifact = export("modern");
        assert!(contains(&artifact.pdf, b"/Title"));
        assert!(contains(&artifact.pdf, b"(cvrender)"));
        assert!(contains(&artifact.pdf, b"(Anna Berg)"));
    }

    #[test]
    fn test_serif_template_uses_times() {
        let mut doc = full_document("standard");
        doc.font_settings.heading_font = Some("Playfair Display".to_string());
        let tree = build_render_tree(&doc, &LayoutOptions::default());
        let artifact = render(&tree, &ImageAssets::new()).unwrap();
        assert!(contains(&artifact.pdf, b"/Times-Bold"));
    }

    #[test]
    fn test_transcript_matches_preview_for_every_program() {
        for program in LayoutProgram::ALL {
            let tree = build_render_tree(&full_document(program.as_str()), &LayoutOptions::default());
            let exported = render(&tree, &ImageAssets::new()).unwrap().transcript;
            let previewed = preview::render(&tree).unwrap().transcript;
            assert_eq!(exported.sections, previewed.sections, "{program:?}");
            assert_eq!(exported.colors, previewed.colors, "{program:?}");
            assert!(exported.color_conflicts.is_empty());
        }
    }

    #[test]
    fn test_decoration_opacity_becomes_ext_gstate() {
        let artifact = export("creative");
        assert!(contains(&artifact.pdf, b"/ExtGState"));
        assert!(contains(&artifact.pdf, b"/ca 0.12"));
    }

    #[test]
    fn test_portrait_is_embedded_with_soft_mask() {
        let src = png_data_url(6, 4, [200, 40, 40, 128]);
        let mut doc = full_document("standard");
        doc.personal_info.profile_image = Some(ProfileImage {
            url: src.clone(),
            ..Default::default()
        });
        let tree = build_render_tree(&doc, &LayoutOptions::default());
        let raw = HashMap::from([(src.clone(), decode_data_url(&src).unwrap())]);
        let assets = decode_images(raw, 1_000_000).unwrap();
        let artifact = render(&tree, &assets).unwrap();
        assert!(contains(&artifact.pdf, b"/SMask"));
        assert!(contains(&artifact.pdf, b"/Im0 Do"));
    }

    #[test]
    fn test_large_portrait_is_downscaled_to_drawn_size() {
        let src = png_data_url(1200, 900, [40, 90, 160, 255]);
        let mut doc = full_document("standard");
        doc.personal_info.profile_image = Some(ProfileImage {
            url: src.clone(),
            ..Default::default()
        });
        let tree = build_render_tree(&doc, &LayoutOptions::default());
        let size_px = tree
            .regions
            .iter()
            .flat_map(|r| r.blocks.iter())
            .find_map(|b| match b {
                Block::Header(h) => h.image.as_ref().map(|i| i.size_px),
                _ => None,
            })
            .unwrap();
        let raw = HashMap::from([(src.clone(), decode_data_url(&src).unwrap())]);
        let assets = decode_images(raw, 16_000_000).unwrap();
        let artifact = render(&tree, &assets).unwrap();

        let side = (size_px * IMAGE_PX_PER_PX).ceil() as u32;
        assert!(side < 900);
        assert!(contains(&artifact.pdf, format!("/Width {side}").as_bytes()));
        assert!(contains(&artifact.pdf, format!("/Height {side}").as_bytes()));
        assert!(!contains(&artifact.pdf, b"/Width 900"));
    }

    #[test]
    fn test_missing_portrait_is_left_out() {
        let mut doc = full_document("standard");
        doc.personal_info.profile_image = Some(ProfileImage {
            url: "https://cdn.example.se/anna.jpg".to_string(),
            ..Default::default()
        });
        let tree = build_render_tree(&doc, &LayoutOptions::default());
        let artifact = render(&tree, &ImageAssets::new()).unwrap();
        assert!(!contains(&artifact.pdf, b"/XObject"));
    }

    #[test]
    fn test_long_document_overflows() {
        let items: Vec<serde_json::Value> = (0..40)
            .map(|i| {
                serde_json::json!({
                    "id": format!("e{i}"),
                    "position": "Engineer",
                    "company": format!("Company {i}"),
                    "startDate": "2019-01",
                    "endDate": "2020-01",
                    "description": "Built and operated services. ".repeat(6),
                })
            })
            .collect();
        let doc = normalize(&serde_json::json!({
            "templateId": "standard",
            "personalInfo": { "firstName": "Anna", "lastName": "Berg" },
            "sections": [{ "id": "exp", "type": "experience", "title": "Erfarenhet", "items": items }],
        }));
        let tree = build_render_tree(&doc, &LayoutOptions::default());
        let artifact = render(&tree, &ImageAssets::new()).unwrap();
        assert!(artifact.overflowed);
        assert!(artifact.content_height_px > page_height_px());
    }

    #[test]
    fn test_item_text_recorded_at_draw_time() {
        let artifact = export("standard");
        let exp = &artifact.transcript.sections[0];
        assert_eq!(exp.id, "exp");
        assert_eq!(exp.title, "Erfarenhet");
        assert_eq!(exp.text[0], "Engineer");
        assert_eq!(exp.text[1], "Volvo");
    }
}
