//! Overview of the whole image with the visible region outlined and a
//! vertical zoom slider next to it.

use image::GrayImage;
use image::imageops;

use crate::geometry::{RectF, Size};
use crate::processing::layout::resize_to_contain;
use crate::processing::levels::DisplayBitmap;
use crate::view::surface::RenderSurface;

pub const SLIDER_MIN: i32 = 0;
pub const SLIDER_MAX: i32 = 200;

/// Slider position for an absolute scale.
pub fn scale_to_slider(scale: f64) -> i32 {
    ((scale * 100.0).round() as i32).clamp(SLIDER_MIN, SLIDER_MAX)
}

/// Absolute scale for a slider position; zero maps to the smallest step.
pub fn slider_to_scale(value: i32) -> f64 {
    f64::from(value.clamp(SLIDER_MIN, SLIDER_MAX).max(1)) / 100.0
}

pub struct ZoomMinimap {
    max_side: u32,
    thumbnail: Option<GrayImage>,
    overlay: Option<RectF>,
    slider: i32,
}

impl ZoomMinimap {
    pub fn new(max_side: u32) -> Self {
        Self {
            max_side: max_side.max(1),
            thumbnail: None,
            overlay: None,
            slider: 100,
        }
    }

    /// Rebuild the thumbnail. Images already smaller than the thumbnail
    /// box are kept at their own size.
    pub fn set_image(&mut self, bitmap: &DisplayBitmap) {
        let gray = bitmap.to_gray_image();
        let (w, h) = gray.dimensions();
        let thumb = if w <= self.max_side && h <= self.max_side {
            gray
        } else {
            let (tw, th) = resize_to_contain(self.max_side, self.max_side, w, h);
            imageops::thumbnail(&gray, tw, th)
        };
        self.thumbnail = Some(thumb);
    }

    /// Map the surface's visible scene rect into thumbnail pixels.
    pub fn update_overlay(&mut self, visible: RectF, scene: Size) {
        let Some(thumb) = self.thumbnail.as_ref() else {
            self.overlay = None;
            return;
        };
        if scene.is_empty() {
            self.overlay = None;
            return;
        }
        let sx = thumb.width() as f64 / scene.width as f64;
        let sy = thumb.height() as f64 / scene.height as f64;
        self.overlay = Some(RectF::new(
            visible.x * sx,
            visible.y * sy,
            visible.width * sx,
            visible.height * sy,
        ));
    }

    pub fn sync_slider(&mut self, scale: f64) {
        self.slider = scale_to_slider(scale);
    }

    /// Move the slider and return the scale the canvas should adopt.
    pub fn set_slider(&mut self, value: i32) -> f64 {
        self.slider = value.clamp(SLIDER_MIN, SLIDER_MAX);
        slider_to_scale(self.slider)
    }

    /// Pull thumbnail, overlay and slider from the canvas.
    pub fn refresh(&mut self, surface: &RenderSurface) {
        match surface.display() {
            Some(bitmap) => self.set_image(bitmap),
            None => {
                self.thumbnail = None;
                self.overlay = None;
                return;
            }
        }
        if let Some(visible) = surface.visible_scene_rect() {
            self.update_overlay(visible, surface.scene_size());
        }
        self.sync_slider(surface.transform().scale);
    }

    pub fn thumbnail(&self) -> Option<&GrayImage> {
        self.thumbnail.as_ref()
    }

    pub fn overlay(&self) -> Option<RectF> {
        self.overlay
    }

    pub fn slider(&self) -> i32 {
        self.slider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap(w: u32, h: u32) -> DisplayBitmap {
        DisplayBitmap {
            width: w,
            height: h,
            depth: 1,
            pixels: vec![200; (w * h) as usize],
        }
    }

    #[test]
    fn slider_maps_to_scale() {
        assert_eq!(slider_to_scale(100), 1.0);
        assert_eq!(slider_to_scale(0), 0.01);
        assert_eq!(slider_to_scale(500), 2.0);
        assert_eq!(scale_to_slider(1.44), 144);
        assert_eq!(scale_to_slider(9.0), SLIDER_MAX);
    }

    #[test]
    fn thumbnail_longest_side_is_bounded() {
        let mut m = ZoomMinimap::new(100);
        m.set_image(&bitmap(400, 200));
        let t = m.thumbnail().unwrap();
        assert_eq!(t.dimensions(), (100, 50));
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let mut m = ZoomMinimap::new(100);
        m.set_image(&bitmap(30, 20));
        assert_eq!(m.thumbnail().unwrap().dimensions(), (30, 20));
    }

    #[test]
    fn overlay_is_scaled_into_thumbnail() {
        let mut m = ZoomMinimap::new(100);
        m.set_image(&bitmap(400, 200));
        m.update_overlay(RectF::new(100.0, 50.0, 200.0, 100.0), Size::new(400, 200));
        assert_eq!(m.overlay(), Some(RectF::new(25.0, 12.5, 50.0, 25.0)));
    }

    #[test]
    fn overlay_needs_a_thumbnail() {
        let mut m = ZoomMinimap::new(100);
        m.update_overlay(RectF::new(0.0, 0.0, 1.0, 1.0), Size::new(10, 10));
        assert_eq!(m.overlay(), None);
    }

    #[test]
    fn set_slider_clamps() {
        let mut m = ZoomMinimap::new(100);
        assert_eq!(m.set_slider(-20), 0.01);
        assert_eq!(m.slider(), 0);
        m.sync_slider(1.2);
        assert_eq!(m.slider(), 120);
    }
}
