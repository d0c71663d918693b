//! Histogram widget: bar plot, two-handle range slider, log toggles and a
//! bin-count entry laid out inside one workspace cell block.

use tracing::warn;

use crate::error::Error;
use crate::geometry::{Point, Rect};
use crate::processing::histogram::HistogramModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderHandle {
    Low,
    High,
}

/// Sub-regions of the widget, proportional to its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramLayout {
    pub plot: Rect,
    pub slider: Rect,
    pub log_x: Rect,
    pub log_y: Rect,
    pub bins: Rect,
}

impl HistogramLayout {
    pub fn new(area: Rect) -> Self {
        let part = |x: f64, y: f64, w: f64, h: f64| {
            let (aw, ah) = (f64::from(area.width), f64::from(area.height));
            Rect::new(
                area.x + (x * aw).round() as i32,
                area.y + (y * ah).round() as i32,
                (w * aw).round() as u32,
                (h * ah).round() as u32,
            )
        };
        Self {
            plot: part(0.05, 0.01, 0.9, 0.55),
            slider: part(0.05, 0.58, 0.9, 0.2),
            log_x: part(0.05, 0.8, 0.25, 0.18),
            log_y: part(0.30, 0.8, 0.25, 0.18),
            bins: part(0.6, 0.8, 0.35, 0.18),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert(String),
    Backspace,
    Clear,
}

pub struct HistogramPanel {
    model: HistogramModel,
    bin_text: String,
    entry_focused: bool,
    dragging: Option<SliderHandle>,
}

impl HistogramPanel {
    pub fn new(model: HistogramModel) -> Self {
        let bin_text = model.bin_count().to_string();
        Self {
            model,
            bin_text,
            entry_focused: false,
            dragging: None,
        }
    }

    pub fn model(&self) -> &HistogramModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut HistogramModel {
        &mut self.model
    }

    pub fn bin_text(&self) -> &str {
        &self.bin_text
    }

    pub fn entry_focused(&self) -> bool {
        self.entry_focused
    }

    pub fn unfocus(&mut self) {
        self.entry_focused = false;
    }

    pub fn dragging(&self) -> Option<SliderHandle> {
        self.dragging
    }

    /// Horizontal pixel position of a value on the slider track.
    pub fn handle_x(&self, layout: &HistogramLayout, value: f64) -> f64 {
        let track = layout.slider;
        f64::from(track.x) + self.model.slider().fraction_of(value) * f64::from(track.width)
    }

    fn value_at_x(&self, layout: &HistogramLayout, x: f64) -> f64 {
        let track = layout.slider;
        if track.width == 0 {
            return self.model.slider().minimum;
        }
        let fraction = (x - f64::from(track.x)) / f64::from(track.width);
        self.model.slider().value_at(fraction)
    }

    /// Returns whether the press landed on one of the panel's controls.
    pub fn press(&mut self, area: Rect, p: Point) -> bool {
        let layout = HistogramLayout::new(area);
        if layout.bins.contains(p) {
            self.entry_focused = true;
            return true;
        }
        self.entry_focused = false;
        if layout.log_x.contains(p) {
            let enabled = !self.model.log_x();
            self.model.set_log_x(enabled);
            return true;
        }
        if layout.log_y.contains(p) {
            let enabled = !self.model.log_y();
            self.model.set_log_y(enabled);
            return true;
        }
        if layout.slider.contains(p) {
            let slider = *self.model.slider();
            let to_low = (p.x - self.handle_x(&layout, slider.low)).abs();
            let to_high = (p.x - self.handle_x(&layout, slider.high)).abs();
            let handle = if to_low <= to_high {
                SliderHandle::Low
            } else {
                SliderHandle::High
            };
            self.dragging = Some(handle);
            self.drag_to(area, p);
            return true;
        }
        false
    }

    /// Move the active slider handle; a handle cannot cross the other one.
    pub fn drag_to(&mut self, area: Rect, p: Point) {
        let Some(handle) = self.dragging else {
            return;
        };
        let layout = HistogramLayout::new(area);
        let value = self.value_at_x(&layout, p.x);
        let slider = *self.model.slider();
        match handle {
            SliderHandle::Low => self.model.set_thresholds(value.min(slider.high), slider.high),
            SliderHandle::High => self.model.set_thresholds(slider.low, value.max(slider.low)),
        }
    }

    pub fn release(&mut self) {
        self.dragging = None;
    }

    /// Apply an edit to the bin entry. The count is re-parsed after every
    /// edit; a rejected text stays visible while the old count stays in use.
    pub fn edit_bins(&mut self, edit: TextEdit) -> Result<(), Error> {
        match edit {
            TextEdit::Insert(text) => self.bin_text.push_str(&text),
            TextEdit::Backspace => {
                self.bin_text.pop();
            }
            TextEdit::Clear => self.bin_text.clear(),
        }
        self.model.set_bin_count_text(&self.bin_text).inspect_err(|err| {
            warn!(error = %err, "bin count rejected");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_channel;

    fn panel() -> HistogramPanel {
        let (tx, _rx) = event_channel();
        let mut model = HistogramModel::new(50, false, false, tx);
        model.set_data((0..=255).map(f64::from));
        HistogramPanel::new(model)
    }

    const AREA: Rect = Rect::new(0, 0, 400, 200);

    #[test]
    fn layout_matches_proportions() {
        let l = HistogramLayout::new(AREA);
        assert_eq!(l.plot, Rect::new(20, 2, 360, 110));
        assert_eq!(l.slider, Rect::new(20, 116, 360, 40));
        assert_eq!(l.log_y, Rect::new(120, 160, 100, 36));
        assert_eq!(l.bins, Rect::new(240, 160, 140, 36));
    }

    #[test]
    fn log_boxes_toggle() {
        let mut p = panel();
        assert!(p.press(AREA, Point::new(30.0, 170.0)));
        assert!(p.model().log_x());
        assert!(p.press(AREA, Point::new(130.0, 170.0)));
        assert!(p.model().log_y());
        assert!(p.press(AREA, Point::new(30.0, 170.0)));
        assert!(!p.model().log_x());
    }

    #[test]
    fn dragging_low_handle_moves_low_threshold() {
        let mut p = panel();
        let l = HistogramLayout::new(AREA);
        let low_x = p.handle_x(&l, p.model().slider().low);
        assert!(p.press(AREA, Point::new(low_x + 1.0, 130.0)));
        assert_eq!(p.dragging(), Some(SliderHandle::Low));
        p.drag_to(AREA, Point::new(200.0, 130.0));
        let s = *p.model().slider();
        assert!(s.low > 100.0 && s.low < 160.0);
        assert_eq!(s.high, 255.0);
        p.drag_to(AREA, Point::new(1000.0, 130.0));
        assert_eq!(p.model().slider().low, 255.0);
        p.release();
        assert_eq!(p.dragging(), None);
    }

    #[test]
    fn bin_entry_keeps_previous_count_on_bad_text() {
        let mut p = panel();
        assert!(p.press(AREA, Point::new(300.0, 170.0)));
        assert!(p.entry_focused());
        p.edit_bins(TextEdit::Clear).unwrap_err();
        p.edit_bins(TextEdit::Insert("2".into())).unwrap();
        assert_eq!(p.model().bin_count(), 2);
        assert!(p.edit_bins(TextEdit::Insert("x".into())).is_err());
        assert_eq!(p.bin_text(), "2x");
        assert_eq!(p.model().bin_count(), 2);
        p.edit_bins(TextEdit::Backspace).unwrap();
        assert_eq!(p.model().bins().counts.len(), 2);
    }

    #[test]
    fn press_outside_controls_is_not_consumed() {
        let mut p = panel();
        p.press(AREA, Point::new(300.0, 170.0));
        assert!(!p.press(AREA, Point::new(200.0, 50.0)));
        assert!(!p.entry_focused());
    }
}
