//! Viewport fit: the on-screen scale of a fixed A4 page inside a container
//! of variable width.
//!
//! Everything here is a pure function of explicit inputs. View state lives in
//! `RenderContext`, which is passed in and returned by value.

use serde::{Deserialize, Serialize};

use crate::units::page_width_px;

/// Viewports at or below this width (px) are mobile.
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;
pub const DESKTOP_CAP_PX: f32 = 800.0;
pub const DESKTOP_MARGIN: f32 = 0.98;
pub const MOBILE_MARGIN: f32 = 0.95;
pub const MAX_ZOOM: f32 = 1.5;
pub const MIN_ZOOM: f32 = 0.3;
pub const EDITOR_SCALE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn from_viewport(viewport_width: f32) -> Self {
        if viewport_width <= MOBILE_BREAKPOINT_PX {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    fn margin(self) -> f32 {
        match self {
            DeviceClass::Desktop => DESKTOP_MARGIN,
            DeviceClass::Mobile => MOBILE_MARGIN,
        }
    }

    pub fn zoom_step(self) -> f32 {
        match self {
            DeviceClass::Desktop => 0.1,
            DeviceClass::Mobile => 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Editor,
    Preview,
    Fullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomStep {
    In,
    Out,
    Reset,
}

fn sanitize(width: f32) -> f32 {
    if width.is_finite() {
        width.max(0.0)
    } else {
        0.0
    }
}

/// Upper zoom bound for a container.
pub fn context_max_zoom(container_width: f32, mode: Mode) -> f32 {
    match mode {
        Mode::Editor => EDITOR_SCALE,
        Mode::Preview | Mode::Fullscreen => {
            MAX_ZOOM.min(sanitize(container_width) * MOBILE_MARGIN / page_width_px())
        }
    }
}

/// Scale at which the page fits the container.
pub fn fit_scale(container_width: f32, mode: Mode, device: DeviceClass) -> f32 {
    if mode == Mode::Editor {
        return EDITOR_SCALE;
    }
    let width = sanitize(container_width);
    let capped = match device {
        DeviceClass::Desktop => width.min(DESKTOP_CAP_PX),
        DeviceClass::Mobile => width,
    };
    let desired = capped * device.margin() / page_width_px();
    desired.min(context_max_zoom(width, mode))
}

/// Clamps to `[MIN_ZOOM, max]`. When the container is so narrow that `max`
/// falls below the floor, `max` wins.
fn clamp_zoom(scale: f32, max: f32) -> f32 {
    scale.max(MIN_ZOOM.min(max)).min(max)
}

/// Applies a manual zoom step to `scale`.
pub fn zoom(scale: f32, step: ZoomStep, container_width: f32, mode: Mode, device: DeviceClass) -> f32 {
    let max = context_max_zoom(container_width, mode);
    match step {
        ZoomStep::In => clamp_zoom(scale + device.zoom_step(), max),
        ZoomStep::Out => clamp_zoom(scale - device.zoom_step(), max),
        ZoomStep::Reset => fit_scale(container_width, mode, device),
    }
}

/// Transient view parameters for one preview surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    pub mode: Mode,
    pub device: DeviceClass,
    pub container_width: f32,
    pub viewport_width: f32,
    pub scale: f32,
    pub max_zoom: f32,
    pub active_section: Option<String>,
}

impl RenderContext {
    pub fn new(mode: Mode, container_width: f32, viewport_width: f32) -> Self {
        let device = DeviceClass::from_viewport(viewport_width);
        Self {
            mode,
            device,
            container_width,
            viewport_width,
            scale: fit_scale(container_width, mode, device),
            max_zoom: context_max_zoom(container_width, mode),
            active_section: None,
        }
    }

    /// New container/viewport size. Scale is refitted; manual zoom is dropped.
    pub fn resized(self, container_width: f32, viewport_width: f32) -> Self {
        Self {
            active_section: self.active_section,
            ..Self::new(self.mode, container_width, viewport_width)
        }
    }

    pub fn with_mode(self, mode: Mode) -> Self {
        Self {
            active_section: self.active_section,
            ..Self::new(mode, self.container_width, self.viewport_width)
        }
    }

    pub fn zoomed(self, step: ZoomStep) -> Self {
        Self {
            scale: zoom(
                self.scale,
                step,
                self.container_width,
                self.mode,
                self.device,
            ),
            ..self
        }
    }

    pub fn with_active_section(self, section_id: Option<String>) -> Self {
        Self {
            active_section: section_id,
            ..self
        }
    }
}
