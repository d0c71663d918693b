use tracing::trace;

use crate::geometry::{Point, Rect, Size};
use crate::view::interaction::{Buttons, PointerButton, PointerEvents};
use crate::window::grips::{CURSOR_MARGIN, CursorShape, Grip, GripLayout, cursor_for};

/// What the window should do in response to pointer input on its frame.
/// The OS-level move and resize are carried out by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeAction {
    BeginMove,
    BeginResize(Grip),
    SetCursor(CursorShape),
}

/// Frame behaviour of an undecorated window: grips resize, background drags move.
#[derive(Debug, Clone)]
pub struct WindowChrome {
    grips: GripLayout,
    interactive: Vec<Rect>,
    cursor: CursorShape,
}

impl WindowChrome {
    pub fn new(size: Size, grip_size: u32) -> Self {
        Self {
            grips: GripLayout::new(size, grip_size),
            interactive: Vec::new(),
            cursor: CursorShape::Arrow,
        }
    }

    /// Recompute the grips for a new window size.
    pub fn resize(&mut self, size: Size) {
        self.grips = GripLayout::new(size, self.grips.grip_size());
    }

    pub fn set_grip_size(&mut self, grip_size: u32) {
        if grip_size == self.grips.grip_size() {
            return;
        }
        self.grips = GripLayout::new(self.grips.window(), grip_size);
    }

    /// Regions owned by child widgets; presses there never move the window.
    pub fn set_interactive_regions(&mut self, regions: Vec<Rect>) {
        self.interactive = regions;
    }

    pub fn grips(&self) -> &GripLayout {
        &self.grips
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    fn over_child(&self, p: Point) -> bool {
        self.interactive.iter().any(|r| r.contains(p))
    }
}

impl PointerEvents for WindowChrome {
    type Action = ChromeAction;

    fn on_pointer_down(&mut self, button: PointerButton, pos: Point) -> Option<ChromeAction> {
        if button != PointerButton::Left {
            return None;
        }
        if let Some(grip) = self.grips.hit_test(pos) {
            trace!(?grip, "resize grip pressed");
            return Some(ChromeAction::BeginResize(grip));
        }
        (!self.over_child(pos)).then_some(ChromeAction::BeginMove)
    }

    fn on_pointer_move(&mut self, pos: Point, _buttons: Buttons) -> Option<ChromeAction> {
        let shape = cursor_for(pos, self.grips.window(), CURSOR_MARGIN);
        if shape == self.cursor {
            return None;
        }
        self.cursor = shape;
        Some(ChromeAction::SetCursor(shape))
    }

    fn on_pointer_up(&mut self, _button: PointerButton, _pos: Point) -> Option<ChromeAction> {
        None
    }

    fn on_resize(&mut self, size: Size) -> Option<ChromeAction> {
        self.resize(size);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome() -> WindowChrome {
        let mut c = WindowChrome::new(Size::new(400, 300), 8);
        c.set_interactive_regions(vec![Rect::new(50, 50, 100, 100)]);
        c
    }

    #[test]
    fn grip_press_begins_resize() {
        let mut c = chrome();
        assert_eq!(
            c.on_pointer_down(PointerButton::Left, Point::new(399.0, 299.0)),
            Some(ChromeAction::BeginResize(Grip::BottomRight))
        );
    }

    #[test]
    fn background_press_begins_move() {
        let mut c = chrome();
        assert_eq!(
            c.on_pointer_down(PointerButton::Left, Point::new(300.0, 20.0)),
            Some(ChromeAction::BeginMove)
        );
    }

    #[test]
    fn child_press_is_left_alone() {
        let mut c = chrome();
        assert_eq!(c.on_pointer_down(PointerButton::Left, Point::new(60.0, 60.0)), None);
        assert_eq!(c.on_pointer_down(PointerButton::Right, Point::new(300.0, 20.0)), None);
    }

    #[test]
    fn cursor_updates_only_on_change() {
        let mut c = chrome();
        assert_eq!(c.on_pointer_move(Point::new(200.0, 150.0), Buttons::NONE), None);
        assert_eq!(
            c.on_pointer_move(Point::new(1.0, 150.0), Buttons::NONE),
            Some(ChromeAction::SetCursor(CursorShape::ResizeHorizontal))
        );
        assert_eq!(c.on_pointer_move(Point::new(2.0, 150.0), Buttons::NONE), None);
        assert_eq!(
            c.on_pointer_move(Point::new(200.0, 150.0), Buttons::NONE),
            Some(ChromeAction::SetCursor(CursorShape::Arrow))
        );
    }

    #[test]
    fn resize_relayouts_grips() {
        let mut c = chrome();
        c.on_resize(Size::new(800, 600));
        assert_eq!(
            c.grips().hit_test(Point::new(799.0, 599.0)),
            Some(Grip::BottomRight)
        );
        c.set_grip_size(1);
        assert_eq!(c.grips().grip_size(), 2);
    }
}
