use crate::geometry::{Point, Rect};
use crate::processing::layout::center_offset;
use crate::view::minimap::{SLIDER_MAX, SLIDER_MIN, ZoomMinimap};

/// Width of the vertical zoom slider strip.
pub const SLIDER_STRIP: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLayout {
    pub overview: Rect,
    pub slider: Rect,
}

impl ZoomLayout {
    pub fn new(area: Rect) -> Self {
        let strip = SLIDER_STRIP.min(area.width);
        let overview = Rect::new(area.x, area.y, area.width - strip, area.height);
        let slider = Rect::new(overview.right(), area.y, strip, area.height);
        Self { overview, slider }
    }
}

pub struct ZoomPanel {
    minimap: ZoomMinimap,
    dragging: bool,
}

impl ZoomPanel {
    pub fn new(minimap: ZoomMinimap) -> Self {
        Self {
            minimap,
            dragging: false,
        }
    }

    pub fn minimap(&self) -> &ZoomMinimap {
        &self.minimap
    }

    pub fn minimap_mut(&mut self) -> &mut ZoomMinimap {
        &mut self.minimap
    }

    /// Top-left corner of the thumbnail, centred in the overview area.
    pub fn thumbnail_origin(&self, layout: &ZoomLayout) -> (i32, i32) {
        let (w, h) = self
            .minimap
            .thumbnail()
            .map(|t| t.dimensions())
            .unwrap_or((0, 0));
        let (ox, oy) = center_offset(w, h, layout.overview.width, layout.overview.height);
        (layout.overview.x + ox as i32, layout.overview.y + oy as i32)
    }

    /// Vertical pixel position of the slider handle; the maximum is at the top.
    pub fn handle_y(&self, layout: &ZoomLayout) -> f64 {
        let track = layout.slider;
        let fraction = f64::from(self.minimap.slider() - SLIDER_MIN) / f64::from(SLIDER_MAX - SLIDER_MIN);
        f64::from(track.bottom()) - fraction * f64::from(track.height)
    }

    fn slider_value_at(layout: &ZoomLayout, y: f64) -> i32 {
        let track = layout.slider;
        if track.height == 0 {
            return SLIDER_MIN;
        }
        let fraction = ((f64::from(track.bottom()) - y) / f64::from(track.height)).clamp(0.0, 1.0);
        SLIDER_MIN + (fraction * f64::from(SLIDER_MAX - SLIDER_MIN)).round() as i32
    }

    /// Press on the slider strip; returns the scale the canvas should adopt.
    pub fn press(&mut self, area: Rect, p: Point) -> Option<f64> {
        let layout = ZoomLayout::new(area);
        if !layout.slider.contains(p) {
            return None;
        }
        self.dragging = true;
        Some(self.minimap.set_slider(Self::slider_value_at(&layout, p.y)))
    }

    pub fn drag_to(&mut self, area: Rect, p: Point) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        let layout = ZoomLayout::new(area);
        Some(self.minimap.set_slider(Self::slider_value_at(&layout, p.y)))
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect::new(10, 10, 124, 200);

    #[test]
    fn slider_strip_sits_on_the_right() {
        let l = ZoomLayout::new(AREA);
        assert_eq!(l.overview, Rect::new(10, 10, 100, 200));
        assert_eq!(l.slider, Rect::new(110, 10, 24, 200));
    }

    #[test]
    fn pressing_the_strip_sets_scale() {
        let mut panel = ZoomPanel::new(ZoomMinimap::new(100));
        assert_eq!(panel.press(AREA, Point::new(50.0, 50.0)), None);
        // halfway down the track is slider value 100
        assert_eq!(panel.press(AREA, Point::new(120.0, 110.0)), Some(1.0));
        assert_eq!(panel.drag_to(AREA, Point::new(120.0, 10.0)), Some(2.0));
        assert_eq!(panel.drag_to(AREA, Point::new(120.0, 400.0)), Some(0.01));
        panel.release();
        assert_eq!(panel.drag_to(AREA, Point::new(120.0, 110.0)), None);
    }

    #[test]
    fn handle_tracks_slider_value() {
        let mut panel = ZoomPanel::new(ZoomMinimap::new(100));
        let l = ZoomLayout::new(AREA);
        assert_eq!(panel.handle_y(&l), 110.0);
        panel.minimap_mut().sync_slider(2.0);
        assert_eq!(panel.handle_y(&l), 10.0);
    }
}
