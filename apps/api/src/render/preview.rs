//! Preview backend: emits a reflowable node tree (boxes, text, images) with
//! inline styles, plus its HTML serialisation.
//!
//! Every colored node carries `data-color-role` (for its `color`) or
//! `data-fill-role` (for its `background-color`), and every section carries
//! `data-section`, so the transcript is read back from the emitted tree rather
//! than recorded on the side.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::layout::common::SMALL_PX;
use crate::layout::font_metrics::FontClass;
use crate::layout::icons::Icon;
use crate::layout::tree::{
    Align, Band, ContactBlock, Decoration, Flow, HeaderBlock, Heading, ItemEntry, ItemField,
    Marker, Region, RenderTree, SectionBlock, Shape, SkillEntry, SkillIdiom, SummaryBlock,
};
use crate::render::transcript::Transcript;
use crate::render::{emit, RenderBackend, RenderError};
use crate::style::color::{Color, ColorRole};
use crate::style::resolver::ResolvedStyle;
use crate::units::{page_height_px, page_width_px};

// ────────────────────────────────────────────────────────────────────────────
// Node tree
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewNode {
    pub tag: &'static str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PreviewNode>,
}

const VOID_TAGS: [&str; 1] = ["img"];

impl PreviewNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            style: BTreeMap::new(),
            attrs: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn css(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.style.insert(key, value.into());
        self
    }

    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.insert(key, value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: PreviewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr_value(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Depth-first search for nodes matching `pred`.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&PreviewNode) -> bool) -> Vec<&'a PreviewNode> {
        let mut found = Vec::new();
        self.collect(pred, &mut found);
        found
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&PreviewNode) -> bool, out: &mut Vec<&'a PreviewNode>) {
        if pred(self) {
            out.push(self);
        }
        for child in &self.children {
            child.collect(pred, out);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.style.is_empty() {
            let css = self
                .style
                .iter()
                .map(|(k, v)| format!("{k}:{v}"))
                .collect::<Vec<_>>()
                .join(";");
            out.push_str(" style=\"");
            out.push_str(&escape(&css));
            out.push('"');
        }
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn px(v: f32) -> String {
    format!("{}px", (v * 100.0).round() / 100.0)
}

fn pct(fraction: f32) -> String {
    format!("{}%", (fraction * 10000.0).round() / 100.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Reading the tree back
// ────────────────────────────────────────────────────────────────────────────

const TEXT_ROLES: [&str; 7] = [
    "item-title",
    "item-subtitle",
    "item-date",
    "item-meta",
    "item-body",
    "item-tags",
    "skill-name",
];

/// Reads the transcript back from an emitted node tree.
pub fn read_transcript(root: &PreviewNode) -> Transcript {
    let mut transcript = Transcript::default();
    read_node(root, &mut transcript);
    transcript
}

fn read_node(node: &PreviewNode, t: &mut Transcript) {
    let role_color = |attr: &str, prop: &str| {
        let role = node.attr_value(attr).and_then(ColorRole::from_key)?;
        let color = node.style.get(prop).and_then(|v| Color::from_hex(v))?;
        Some((role, color))
    };
    if let Some((role, color)) = role_color("data-color-role", "color") {
        t.color(role, color);
    }
    if let Some((role, color)) = role_color("data-fill-role", "background-color") {
        t.color(role, color);
    }

    let section = node.attr_value("data-section");
    if let Some(id) = section {
        t.begin_section(id);
    }
    if let (Some(text), Some(role)) = (&node.text, node.attr_value("data-role")) {
        let shown = match node.style.get("text-transform").map(String::as_str) {
            Some("uppercase") => text.to_uppercase(),
            _ => text.clone(),
        };
        if role == "heading" {
            t.title(&shown);
        } else if TEXT_ROLES.contains(&role) {
            t.text(&shown);
        }
    }
    for child in &node.children {
        read_node(child, t);
    }
    if section.is_some() {
        t.end_section();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOutput {
    pub root: PreviewNode,
    pub html: String,
    pub transcript: Transcript,
}

pub fn render(tree: &RenderTree) -> Result<PreviewOutput, RenderError> {
    emit(tree, PreviewBackend::default())
}

#[derive(Default)]
pub struct PreviewBackend {
    style: Option<ResolvedStyle>,
    stack: Vec<PreviewNode>,
    body_open: bool,
    align: Option<Align>,
}

fn generic_family(class: FontClass) -> &'static str {
    match class {
        FontClass::Sans => "sans-serif",
        FontClass::Serif => "serif",
        FontClass::Mono => "monospace",
    }
}

/// A user-supplied family name followed by its generic fallback. The name is
/// always a quoted CSS string, so it cannot end the declaration.
fn font_stack(name: &str) -> String {
    format!("{}, {}", css_string(name), generic_family(FontClass::classify(name)))
}

fn css_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.trim().chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl PreviewBackend {
    fn style(&self) -> Result<&ResolvedStyle, RenderError> {
        self.style
            .as_ref()
            .ok_or(RenderError::Sequence("emission before begin_page"))
    }

    fn hex(&self, role: ColorRole) -> Result<String, RenderError> {
        Ok(self.style()?.color(role).to_hex())
    }

    fn heading_font(&self) -> Result<String, RenderError> {
        Ok(font_stack(&self.style()?.fonts.heading_font))
    }

    /// Sets `color` and tags the node with its role.
    fn colored(&self, node: PreviewNode, role: ColorRole) -> Result<PreviewNode, RenderError> {
        Ok(node
            .attr("data-color-role", role.key())
            .css("color", self.hex(role)?))
    }

    /// Sets `background-color` and tags the node with its role.
    fn filled(&self, node: PreviewNode, role: ColorRole) -> Result<PreviewNode, RenderError> {
        Ok(node
            .attr("data-fill-role", role.key())
            .css("background-color", self.hex(role)?))
    }

    fn push(&mut self, node: PreviewNode) -> Result<(), RenderError> {
        self.stack
            .last_mut()
            .ok_or(RenderError::Sequence("no open node"))?
            .children
            .push(node);
        Ok(())
    }

    fn open(&mut self, node: PreviewNode) {
        self.stack.push(node);
    }

    fn close(&mut self) -> Result<(), RenderError> {
        if self.stack.len() < 2 {
            return Err(RenderError::Sequence("closing the page node"));
        }
        let node = self.stack.pop().ok_or(RenderError::Sequence("no open node"))?;
        self.push(node)
    }

    fn block(&self, tag: &'static str, role: &'static str) -> PreviewNode {
        PreviewNode::new(tag)
            .attr("data-role", role)
            .css("position", "relative")
            .css("z-index", "1")
    }

    fn centered(&self) -> bool {
        self.align == Some(Align::Center)
    }

    fn meter(&self, skill: &SkillEntry) -> Result<PreviewNode, RenderError> {
        let fill = pct(skill.fill);
        let node = match skill.idiom {
            SkillIdiom::Stars => {
                let stars = |n: PreviewNode| {
                    (0..5).fold(n, |n, _| {
                        n.child(PreviewNode::new("i").attr("class", "fa-solid fa-star"))
                    })
                };
                let overlay = self.colored(
                    PreviewNode::new("span")
                        .attr("data-role", "skill-fill")
                        .css("position", "absolute")
                        .css("left", "0")
                        .css("top", "0")
                        .css("width", fill)
                        .css("overflow", "hidden")
                        .css("white-space", "nowrap"),
                    skill.fill_color,
                )?;
                self.colored(
                    stars(PreviewNode::new("span"))
                        .attr("data-role", "skill-meter")
                        .css("position", "relative")
                        .css("display", "inline-block")
                        .css("white-space", "nowrap")
                        .css("font-size", px(skill.size_px)),
                    skill.track_color,
                )?
                .child(stars(overlay))
            }
            SkillIdiom::Bars | SkillIdiom::Pills | SkillIdiom::Chips => {
                let (height, width, radius) = match skill.idiom {
                    SkillIdiom::Bars => (6.0, "100%".to_string(), 3.0),
                    SkillIdiom::Pills => (10.0, "100%".to_string(), 999.0),
                    _ => (4.0, px(32.0), 2.0),
                };
                let inner = self.filled(
                    PreviewNode::new("span")
                        .attr("data-role", "skill-fill")
                        .css("display", "block")
                        .css("height", "100%")
                        .css("width", fill)
                        .css("border-radius", px(radius)),
                    skill.fill_color,
                )?;
                let mut track = PreviewNode::new("span")
                    .attr("data-role", "skill-meter")
                    .css("display", "block")
                    .css("height", px(height))
                    .css("width", width)
                    .css("border-radius", px(radius));
                if skill.idiom == SkillIdiom::Pills {
                    track = track.css("max-width", px(160.0));
                    if self.centered() {
                        track = track.css("margin", "4px auto 0");
                    }
                }
                self.filled(track, skill.track_color)?.child(inner)
            }
        };
        Ok(node)
    }
}

impl RenderBackend for PreviewBackend {
    type Output = PreviewOutput;

    fn begin_page(&mut self, tree: &RenderTree) -> Result<(), RenderError> {
        let style = tree.style.clone();
        let root = PreviewNode::new("div")
            .attr("class", "cv-page")
            .attr("data-template", style.template_id.clone())
            .attr("data-program", tree.program.as_str())
            .css("position", "relative")
            .css("display", "flex")
            .css("flex-direction", "column")
            .css("box-sizing", "border-box")
            .css("overflow", "hidden")
            .css("width", px(page_width_px()))
            .css("min-height", px(page_height_px()))
            .css("font-family", font_stack(&style.fonts.body_font))
            .css("font-size", px(style.size(crate::layout::common::BODY_PX)));
        self.style = Some(style);
        let root = self.filled(root, tree.page_background)?;
        self.stack = vec![root];
        Ok(())
    }

    fn begin_region(&mut self, region: &Region) -> Result<(), RenderError> {
        if region.band == Band::Body && !self.body_open {
            self.open(
                PreviewNode::new("div")
                    .attr("data-role", "body")
                    .css("display", "flex")
                    .css("flex", "1")
                    .css("align-items", "stretch"),
            );
            self.body_open = true;
        }

        let mut node = PreviewNode::new("div")
            .attr("data-role", region.role.as_str())
            .css("position", "relative")
            .css("isolation", "isolate")
            .css("box-sizing", "border-box")
            .css("padding", px(region.padding_px));
        node = match region.band {
            Band::Top => node.css("width", "100%"),
            Band::Body => node.css("flex", format!("0 0 {}", pct(region.width))),
        };
        if region.min_height_px > 0.0 {
            node = node.css("min-height", px(region.min_height_px));
        }
        if region.align == Align::Center {
            node = node.css("text-align", "center");
        }
        if let Some(bg) = region.background {
            node = self.filled(node, bg)?;
        }
        let node = self.colored(node, region.text_color)?;
        self.align = Some(region.align);
        self.open(node);
        Ok(())
    }

    fn emit_decoration(&mut self, decoration: &Decoration) -> Result<(), RenderError> {
        let base = PreviewNode::new("div")
            .attr("data-role", "decoration")
            .attr("aria-hidden", "true")
            .css("position", "absolute")
            .css("z-index", "0")
            .css("pointer-events", "none")
            .css("opacity", decoration.opacity.to_string());
        let node = match &decoration.shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
                rotation_deg,
            } => base
                .css("left", px(*x))
                .css("top", px(*y))
                .css("width", px(*width))
                .css("height", px(*height))
                .css("transform", format!("rotate({rotation_deg}deg)"))
                .css("transform-origin", "center"),
            Shape::Polygon { points } => {
                let min_x = points.iter().map(|p| p.0).fold(f32::INFINITY, f32::min);
                let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
                let max_x = points.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max);
                let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);
                if points.is_empty() {
                    return Ok(());
                }
                let clip = points
                    .iter()
                    .map(|(x, y)| format!("{} {}", px(x - min_x), px(y - min_y)))
                    .collect::<Vec<_>>()
                    .join(", ");
                base.css("left", px(min_x))
                    .css("top", px(min_y))
                    .css("width", px(max_x - min_x))
                    .css("height", px(max_y - min_y))
                    .css("clip-path", format!("polygon({clip})"))
            }
        };
        let node = self.filled(node, decoration.color)?;
        self.push(node)
    }

    fn emit_header(&mut self, header: &HeaderBlock) -> Result<(), RenderError> {
        let mut node = self
            .block("header", "header")
            .css("display", "flex")
            .css("flex-direction", "column")
            .css("gap", "4px")
            .css("margin-bottom", "12px");
        if self.centered() {
            node = node.css("align-items", "center");
        }

        if let Some(image) = &header.image {
            let mut img = PreviewNode::new("img")
                .attr("src", image.src.clone())
                .attr("alt", "")
                .attr("data-role", "portrait")
                .css("width", px(image.size_px))
                .css("height", px(image.size_px))
                .css("object-fit", "cover")
                .css(
                    "border-radius",
                    if image.is_circle { "50%" } else { "8px" },
                )
                .css("margin-bottom", "8px");
            if let Some(frame) = &image.frame {
                img = img.css(
                    "border",
                    format!(
                        "{} {} {}",
                        px(frame.width_px),
                        frame.style.as_css(),
                        frame.color.to_hex()
                    ),
                );
            }
            if image.is_transparent {
                img = img.attr("data-transparent", "true");
            }
            node = node.child(img);
        }

        if !header.name.is_empty() {
            let mut name = PreviewNode::new("h1")
                .attr("data-role", "name")
                .css("margin", "0")
                .css("font-family", self.heading_font()?)
                .css("font-size", px(header.name_size_px))
                .css("font-weight", "700")
                .with_text(header.name.clone());
            if header.uppercase_name {
                name = name
                    .css("text-transform", "uppercase")
                    .css("letter-spacing", "0.04em");
            }
            node = node.child(self.colored(name, header.name_color)?);
        }
        if !header.title.is_empty() {
            let title = PreviewNode::new("p")
                .attr("data-role", "title")
                .css("margin", "0")
                .css("font-size", px(header.title_size_px))
                .with_text(header.title.clone());
            node = node.child(self.colored(title, header.title_color)?);
        }
        self.push(node)
    }

    fn emit_contact(&mut self, contact: &ContactBlock) -> Result<(), RenderError> {
        let mut node = self
            .block("div", "contact")
            .css("display", "flex")
            .css("flex-wrap", "wrap")
            .css("gap", if contact.flow == Flow::Row { "6px 16px" } else { "6px" })
            .css("margin-bottom", "14px")
            .css("font-size", px(contact.size_px));
        node = match contact.flow {
            Flow::Row => node.css("flex-direction", "row"),
            Flow::Column => node.css("flex-direction", "column"),
        };
        if self.centered() {
            node = node.css("justify-content", "center");
        }
        self.open(node);

        if let Some(label) = &contact.label {
            let label = PreviewNode::new("div")
                .attr("data-role", "contact-label")
                .css("font-weight", "600")
                .css("font-family", self.heading_font()?)
                .with_text(label.clone());
            self.push(self.colored(label, contact.color)?)?;
        }
        for entry in &contact.entries {
            self.open(
                PreviewNode::new("span")
                    .attr("data-role", "contact-entry")
                    .css("display", "inline-flex")
                    .css("align-items", "center")
                    .css("gap", "6px"),
            );
            self.emit_icon(entry.icon, contact.icon_color, contact.size_px)?;
            let text = PreviewNode::new("span").with_text(entry.text.clone());
            self.push(self.colored(text, contact.color)?)?;
            self.close()?;
        }
        self.close()
    }

    fn emit_icon(&mut self, icon: Icon, color: ColorRole, size_px: f32) -> Result<(), RenderError> {
        let family = if icon == Icon::Linkedin {
            "fa-brands"
        } else {
            "fa-solid"
        };
        let node = PreviewNode::new("i")
            .attr("class", format!("{family} {}", icon.font_class()))
            .attr("aria-hidden", "true")
            .css("font-size", px(size_px));
        let node = self.colored(node, color)?;
        self.push(node)
    }

    fn emit_summary(&mut self, summary: &SummaryBlock) -> Result<(), RenderError> {
        let text = PreviewNode::new("p")
            .attr("data-role", "summary")
            .css("position", "relative")
            .css("z-index", "1")
            .css("margin", "0 0 14px")
            .css("line-height", "1.5")
            .css("font-size", px(summary.size_px))
            .with_text(summary.text.clone());
        let text = self.colored(text, summary.color)?;
        self.push(text)
    }

    fn begin_section(&mut self, section: &SectionBlock) -> Result<(), RenderError> {
        let node = self
            .block("section", "section")
            .attr("data-section", section.section_id.clone())
            .attr("data-section-type", section.kind.as_str())
            .css("margin-bottom", "16px");
        self.open(node);
        Ok(())
    }

    fn emit_heading(&mut self, heading: &Heading) -> Result<(), RenderError> {
        let mut node = PreviewNode::new("h2")
            .attr("data-role", "heading")
            .css("position", "relative")
            .css("z-index", "1")
            .css("margin", "0 0 8px")
            .css("font-family", self.heading_font()?)
            .css("font-size", px(heading.size_px))
            .css("font-weight", "700")
            .with_text(heading.text.clone());
        if heading.uppercase {
            node = node.css("text-transform", "uppercase");
        }
        if heading.tracking_em > 0.0 {
            node = node.css("letter-spacing", format!("{}em", heading.tracking_em));
        }
        let node = self.colored(node, heading.color)?;
        self.push(node)?;

        if let Some(rule) = heading.rule {
            let line = PreviewNode::new("div")
                .attr("data-role", "rule")
                .css("height", "2px")
                .css("margin", "-4px 0 10px");
            let line = self.filled(line, rule)?;
            self.push(line)?;
        }
        Ok(())
    }

    fn emit_section_item(&mut self, item: &ItemEntry) -> Result<(), RenderError> {
        let mut node = PreviewNode::new("div")
            .attr("data-role", "item")
            .css("position", "relative")
            .css("margin-bottom", "10px");
        if let Some(Marker::TimelineDot { color }) = item.marker {
            let dot = PreviewNode::new("span")
                .attr("data-role", "marker")
                .css("position", "absolute")
                .css("left", "0")
                .css("top", "5px")
                .css("width", "9px")
                .css("height", "9px")
                .css("border-radius", "50%");
            node = node.css("padding-left", "18px").child(self.filled(dot, color)?);
        }

        for (field, text) in item.runs() {
            let child = match field {
                ItemField::Title => self.colored(
                    PreviewNode::new("div")
                        .css("font-family", self.heading_font()?)
                        .css("font-size", px(item.title_size_px))
                        .css("font-weight", "600"),
                    item.title_color,
                )?,
                ItemField::Subtitle => self.colored(
                    PreviewNode::new("div").css("font-size", px(item.body_size_px)),
                    item.subtitle_color,
                )?,
                ItemField::Date | ItemField::Meta => PreviewNode::new("div")
                    .css("font-size", px(self.style()?.size(SMALL_PX)))
                    .css("opacity", "0.8"),
                ItemField::Body => PreviewNode::new("p")
                    .css("margin", "4px 0 0")
                    .css("white-space", "pre-line")
                    .css("font-size", px(item.body_size_px)),
                ItemField::Tags => PreviewNode::new("div")
                    .css("margin-top", "2px")
                    .css("font-size", px(self.style()?.size(SMALL_PX))),
            };
            node = node.child(child.attr("data-role", field.as_str()).with_text(text));
        }
        self.push(node)
    }

    fn emit_skill(&mut self, skill: &SkillEntry) -> Result<(), RenderError> {
        let mut node = PreviewNode::new("div")
            .attr("data-role", "skill")
            .attr("data-idiom", skill.idiom.as_str())
            .attr("data-level", skill.level.to_string())
            .css("font-size", px(skill.size_px));
        node = match skill.idiom {
            SkillIdiom::Chips => node
                .css("display", "inline-flex")
                .css("align-items", "center")
                .css("gap", "6px")
                .css("padding", "4px 10px")
                .css("margin", "0 6px 6px 0")
                .css("border-radius", "999px")
                .css(
                    "border",
                    format!("1px solid {}", self.hex(skill.fill_color)?),
                ),
            SkillIdiom::Stars => node
                .css("display", "flex")
                .css("justify-content", "space-between")
                .css("align-items", "center")
                .css("margin-bottom", "6px"),
            SkillIdiom::Bars | SkillIdiom::Pills => node.css("margin-bottom", "8px"),
        };
        self.open(node);
        if let Some(icon) = skill.icon {
            self.emit_icon(icon, skill.fill_color, skill.size_px)?;
        }
        let name = PreviewNode::new("span")
            .attr("data-role", "skill-name")
            .with_text(skill.name.clone());
        self.push(self.colored(name, skill.label_color)?)?;
        let meter = self.meter(skill)?;
        self.push(meter)?;
        self.close()
    }

    fn end_section(&mut self, _section: &SectionBlock) -> Result<(), RenderError> {
        self.close()
    }

    fn end_region(&mut self, _region: &Region) -> Result<(), RenderError> {
        self.align = None;
        self.close()
    }

    fn finish(mut self) -> Result<PreviewOutput, RenderError> {
        if self.body_open {
            self.close()?;
        }
        if self.stack.len() != 1 {
            return Err(RenderError::Sequence("unbalanced preview nodes"));
        }
        let root = self
            .stack
            .pop()
            .ok_or(RenderError::Sequence("emission before begin_page"))?;
        let transcript = read_transcript(&root);
        let html = root.to_html();
        Ok(PreviewOutput {
            root,
            html,
            transcript,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::full_document;
    use crate::layout::{build_render_tree, LayoutOptions};

    fn preview(template: &str) -> PreviewOutput {
        let tree = build_render_tree(&full_document(template), &LayoutOptions::default());
        render(&tree).expect("preview renders")
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_html_escapes_user_text() {
        let mut doc = full_document("standard");
        doc.personal_info.first_name = "<script>".to_string();
        let tree = build_render_tree(&doc, &LayoutOptions::default());
        let out = render(&tree).unwrap();
        assert!(!out.html.contains("<script>"));
        assert!(out.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_font_names_stay_inside_a_css_string() {
        assert_eq!(font_stack("Georgia"), "\"Georgia\", serif");
        assert_eq!(
            font_stack("Lato\"; background:url(//x.se/a.png); x:\\"),
            "\"Lato\\\"; background:url(//x.se/a.png); x:\\\\\", sans-serif"
        );
        assert_eq!(font_stack("Inter\n}"), "\"Inter }\", sans-serif");
    }

    #[test]
    fn test_body_font_is_quoted_on_the_page_root() {
        let mut doc = full_document("standard");
        doc.font_settings.body_font = Some("Roboto Mono".to_string());
        let out = render(&build_render_tree(&doc, &LayoutOptions::default())).unwrap();
        assert_eq!(out.root.style["font-family"], "\"Roboto Mono\", monospace");
    }

    #[test]
    fn test_img_is_void() {
        let html = PreviewNode::new("div")
            .child(PreviewNode::new("img").attr("src", "a.png"))
            .to_html();
        assert_eq!(html, "<div><img src=\"a.png\"></div>");
    }

    #[test]
    fn test_sections_carry_data_section_in_order() {
        let out = preview("standard");
        let ids: Vec<_> = out
            .root
            .find_all(&|n| n.attr_value("data-section").is_some())
            .into_iter()
            .filter_map(|n| n.attr_value("data-section"))
            .collect();
        assert_eq!(ids, vec!["exp", "edu", "skills", "proj"]);
        assert_eq!(
            out.transcript.section_titles(),
            vec!["Erfarenhet", "Utbildning", "Kompetenser", "Projekt"]
        );
    }

    #[test]
    fn test_uppercase_headings_read_back_as_displayed() {
        let out = preview("minimalist");
        assert_eq!(out.transcript.sections[0].title, "ERFARENHET");
    }

    #[test]
    fn test_colors_read_back_from_nodes() {
        let tree = build_render_tree(&full_document("modern"), &LayoutOptions::default());
        let out = render(&tree).unwrap();
        assert_eq!(
            out.transcript.colors[&ColorRole::Heading],
            tree.style.color(ColorRole::Heading)
        );
        assert_eq!(
            out.transcript.colors[&ColorRole::Primary],
            tree.style.color(ColorRole::Primary)
        );
        assert!(out.transcript.color_conflicts.is_empty());
    }

    #[test]
    fn test_skill_meter_width_is_fill() {
        let out = preview("modern");
        let fills = out
            .root
            .find_all(&|n| n.attr_value("data-role") == Some("skill-fill"));
        let widths: Vec<_> = fills.iter().map(|n| n.style["width"].as_str()).collect();
        assert_eq!(widths, vec!["80%", "100%"]);
    }

    #[test]
    fn test_item_text_in_reading_order() {
        let out = preview("standard");
        let exp = &out.transcript.sections[0];
        assert_eq!(
            exp.text,
            vec![
                "Engineer",
                "Volvo",
                "2020-01 — Nuvarande",
                "Intern",
                "Ericsson",
                "2018-06 — 2019-08"
            ]
        );
    }
}
