//! The image canvas: buffer, display levels, fitted bitmap and transform.

use std::sync::Arc;

use image::imageops::{self, FilterType};
use tracing::{debug, trace};

use crate::buffer::ImageBuffer;
use crate::events::{EventSender, UiEvent};
use crate::geometry::{Point, RectF, Size, Vector};
use crate::processing::layout::fit_within;
use crate::processing::levels::{self, DisplayBitmap, DisplayRange};
use crate::view::transform::ViewTransform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSettings {
    /// Share of the viewport the fitted bitmap may occupy.
    pub fit_fraction: f64,
    /// Scale multiplier per wheel step.
    pub zoom_factor: f64,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            fit_fraction: 0.95,
            zoom_factor: 1.2,
        }
    }
}

pub struct RenderSurface {
    settings: SurfaceSettings,
    buffer: Option<Arc<ImageBuffer>>,
    levels: DisplayRange,
    display: Option<DisplayBitmap>,
    transform: ViewTransform,
    viewport: Size,
    events: EventSender,
}

impl RenderSurface {
    pub fn new(settings: SurfaceSettings, events: EventSender) -> Self {
        Self {
            settings,
            buffer: None,
            levels: DisplayRange::new(0.0, 255.0),
            display: None,
            transform: ViewTransform::IDENTITY,
            viewport: Size::default(),
            events,
        }
    }

    /// Replace the image. The display range resets to the buffer's own
    /// min/max; the transform is kept.
    pub fn set_buffer(&mut self, buffer: Arc<ImageBuffer>) {
        if let Some((low, high)) = buffer.value_range() {
            self.levels = DisplayRange::new(low, high);
        }
        debug!(
            width = buffer.width(),
            height = buffer.height(),
            low = self.levels.low,
            high = self.levels.high,
            "surface buffer replaced"
        );
        self.buffer = Some(buffer);
        self.rerender();
    }

    pub fn set_levels(&mut self, low: f64, high: f64) {
        if self.buffer.is_none() {
            return;
        }
        let next = DisplayRange::new(low, high);
        if next == self.levels && self.display.is_some() {
            return;
        }
        self.levels = next;
        self.rerender();
    }

    /// Normalize with the current levels and fit the result into the viewport.
    pub fn rerender(&mut self) {
        let Some(buffer) = self.buffer.as_ref() else {
            return;
        };
        let bitmap = levels::normalize(buffer, self.levels.low, self.levels.high);
        if self.viewport.is_empty() {
            self.display = Some(bitmap);
            return;
        }
        let target = fit_within(
            self.viewport,
            Size::new(bitmap.width, bitmap.height),
            self.settings.fit_fraction,
        );
        let display = if target.width == bitmap.width && target.height == bitmap.height {
            bitmap
        } else {
            let gray = bitmap.to_gray_image();
            DisplayBitmap::from_gray_image(imageops::resize(
                &gray,
                target.width,
                target.height,
                FilterType::Triangle,
            ))
        };
        let (width, height) = (display.width, display.height);
        trace!(width, height, "surface rerendered");
        self.display = Some(display);
    }

    /// Viewport-centred wheel zoom. Positive deltas zoom in.
    pub fn apply_zoom(&mut self, delta: f64) {
        if self.buffer.is_none() || delta == 0.0 || !delta.is_finite() {
            return;
        }
        let factor = if delta > 0.0 {
            self.settings.zoom_factor
        } else {
            1.0 / self.settings.zoom_factor
        };
        self.transform.zoom_by(factor);
        self.emit_transform();
        let _ = self.events.send(UiEvent::ZoomChanged { delta });
    }

    /// Pan by a viewport pixel delta.
    pub fn apply_pan(&mut self, delta: Vector) {
        if self.buffer.is_none() {
            return;
        }
        self.transform.pan_by(delta, self.scene_size());
        self.emit_transform();
    }

    pub fn set_scale(&mut self, scale: f64) {
        if self.buffer.is_none() {
            return;
        }
        let before = self.transform.scale;
        self.transform.set_scale(scale);
        if self.transform.scale != before {
            self.emit_transform();
        }
    }

    pub fn reset_transform(&mut self) {
        if self.buffer.is_none() {
            return;
        }
        self.transform = ViewTransform::IDENTITY;
        self.emit_transform();
    }

    /// Record the new viewport size and refit the bitmap.
    pub fn set_viewport(&mut self, size: Size) {
        if size == self.viewport {
            return;
        }
        self.viewport = size;
        self.rerender();
    }

    pub fn visible_scene_rect(&self) -> Option<RectF> {
        self.display
            .as_ref()
            .map(|_| self.transform.visible_rect(self.scene_size(), self.viewport))
    }

    pub fn scene_to_view(&self, p: Point) -> Point {
        self.transform.scene_to_view(p, self.scene_size(), self.viewport)
    }

    pub fn view_to_scene(&self, p: Point) -> Point {
        self.transform.view_to_scene(p, self.scene_size(), self.viewport)
    }

    /// Size of the fitted bitmap, which is the scene the transform acts on.
    pub fn scene_size(&self) -> Size {
        self.display
            .as_ref()
            .map(|d| Size::new(d.width, d.height))
            .unwrap_or_default()
    }

    pub fn buffer(&self) -> Option<&Arc<ImageBuffer>> {
        self.buffer.as_ref()
    }

    pub fn display(&self) -> Option<&DisplayBitmap> {
        self.display.as_ref()
    }

    pub fn levels(&self) -> DisplayRange {
        self.levels
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn settings(&self) -> SurfaceSettings {
        self.settings
    }

    fn emit_transform(&self) {
        let _ = self.events.send(UiEvent::TransformChanged {
            scale: self.transform.scale,
            pan: self.transform.pan,
        });
    }
}
