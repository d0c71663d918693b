//! Splits the frameless window into its fixed regions.

use crate::config::Configuration;
use crate::geometry::{Rect, Size};

pub const TITLE_BAR_HEIGHT: u32 = 28;
pub const STATUS_BAR_HEIGHT: u32 = 22;
pub const TOOLBAR_WIDTH: u32 = 52;
const MENU_BUTTON_WIDTH: u32 = 56;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub window: Rect,
    pub title_bar: Rect,
    pub menu_button: Rect,
    pub close_button: Rect,
    /// Area showing the image.
    pub canvas: Rect,
    pub workspace: Rect,
    pub toolbar: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    /// Layout for a window of `size`. The grip band stays outside every
    /// region so resize hit-testing always wins along the border.
    pub fn compute(size: Size, cfg: &Configuration) -> Self {
        let window = Rect::from_size(size);
        let g = cfg.window.grip_size as i32;
        let inner = window.inset(g, g, g, g);

        let title_bar = Rect::new(inner.x, inner.y, inner.width, TITLE_BAR_HEIGHT.min(inner.height));
        let menu_button = Rect::new(title_bar.x, title_bar.y, MENU_BUTTON_WIDTH.min(title_bar.width), title_bar.height);
        let close_w = title_bar.height.min(title_bar.width);
        let close_button = Rect::new(title_bar.right() - close_w as i32, title_bar.y, close_w, title_bar.height);

        let body = inner.inset(0, title_bar.height as i32, 0, STATUS_BAR_HEIGHT as i32);
        let status_bar = Rect::new(
            inner.x,
            body.bottom(),
            inner.width,
            (inner.bottom() - body.bottom()).max(0) as u32,
        );

        let toolbar_w = TOOLBAR_WIDTH.min(body.width);
        let toolbar = Rect::new(body.right() - toolbar_w as i32, body.y, toolbar_w, body.height);

        let workspace_w = ((f64::from(size.width) * cfg.workspace.width_fraction).round() as u32)
            .min(body.width - toolbar_w);
        let workspace = Rect::new(toolbar.x - workspace_w as i32, body.y, workspace_w, body.height);
        let canvas = Rect::new(body.x, body.y, (workspace.x - body.x).max(0) as u32, body.height);

        Self {
            window,
            title_bar,
            menu_button,
            close_button,
            canvas,
            workspace,
            toolbar,
            status_bar,
        }
    }

    /// Rects inside the title bar that must not start a window move.
    pub fn interactive_title_regions(&self) -> Vec<Rect> {
        vec![self.menu_button, self.close_button]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_splits_in_order() {
        let cfg = Configuration::default();
        let l = AppLayout::compute(Size::new(1000, 600), &cfg);
        assert_eq!(l.title_bar, Rect::new(8, 8, 984, 28));
        assert_eq!(l.status_bar, Rect::new(8, 570, 984, 22));
        assert_eq!(l.toolbar, Rect::new(940, 36, 52, 534));
        assert_eq!(l.workspace, Rect::new(440, 36, 500, 534));
        assert_eq!(l.canvas, Rect::new(8, 36, 432, 534));
        assert_eq!(l.close_button.right(), l.title_bar.right());
    }

    #[test]
    fn tiny_window_does_not_underflow() {
        let cfg = Configuration::default();
        let l = AppLayout::compute(Size::new(20, 20), &cfg);
        assert_eq!(l.canvas.width, 0);
        assert!(l.workspace.width <= 4);
    }
}
