//! Pointer input translated into canvas actions.

use crate::geometry::{Point, Size, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Buttons held during a pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl Buttons {
    pub const NONE: Self = Self {
        left: false,
        right: false,
        middle: false,
    };

    pub const LEFT: Self = Self {
        left: true,
        right: false,
        middle: false,
    };

    pub fn set(&mut self, button: PointerButton, pressed: bool) {
        match button {
            PointerButton::Left => self.left = pressed,
            PointerButton::Right => self.right = pressed,
            PointerButton::Middle => self.middle = pressed,
        }
    }

    pub const fn only_left(&self) -> bool {
        self.left && !self.right && !self.middle
    }
}

/// Window-agnostic pointer sink. Each handler may answer with an action for
/// the owner to carry out.
pub trait PointerEvents {
    type Action;

    fn on_pointer_down(&mut self, button: PointerButton, pos: Point) -> Option<Self::Action>;

    fn on_pointer_move(&mut self, pos: Point, buttons: Buttons) -> Option<Self::Action>;

    fn on_pointer_up(&mut self, button: PointerButton, pos: Point) -> Option<Self::Action>;

    fn on_wheel(&mut self, _delta: f64) -> Option<Self::Action> {
        None
    }

    fn on_resize(&mut self, _size: Size) -> Option<Self::Action> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewAction {
    Pan(Vector),
    Zoom(f64),
    Rerender(Size),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Panning {
        last: Point,
    },
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: DragState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, DragState::Panning { .. })
    }
}

impl PointerEvents for InteractionController {
    type Action = ViewAction;

    fn on_pointer_down(&mut self, button: PointerButton, pos: Point) -> Option<ViewAction> {
        if button == PointerButton::Left {
            self.state = DragState::Panning { last: pos };
        }
        None
    }

    fn on_pointer_move(&mut self, pos: Point, buttons: Buttons) -> Option<ViewAction> {
        let DragState::Panning { last } = self.state else {
            return None;
        };
        if !buttons.only_left() {
            return None;
        }
        self.state = DragState::Panning { last: pos };
        let delta = pos - last;
        (delta != Vector::ZERO).then_some(ViewAction::Pan(delta))
    }

    fn on_pointer_up(&mut self, button: PointerButton, _pos: Point) -> Option<ViewAction> {
        if button == PointerButton::Left {
            self.state = DragState::Idle;
        }
        None
    }

    fn on_wheel(&mut self, delta: f64) -> Option<ViewAction> {
        (delta != 0.0).then_some(ViewAction::Zoom(delta))
    }

    fn on_resize(&mut self, size: Size) -> Option<ViewAction> {
        Some(ViewAction::Rerender(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_yields_incremental_deltas() {
        let mut c = InteractionController::new();
        assert_eq!(c.on_pointer_down(PointerButton::Left, Point::new(10.0, 10.0)), None);
        assert_eq!(
            c.on_pointer_move(Point::new(15.0, 12.0), Buttons::LEFT),
            Some(ViewAction::Pan(Vector::new(5.0, 2.0)))
        );
        assert_eq!(
            c.on_pointer_move(Point::new(16.0, 12.0), Buttons::LEFT),
            Some(ViewAction::Pan(Vector::new(1.0, 0.0)))
        );
        c.on_pointer_up(PointerButton::Left, Point::new(16.0, 12.0));
        assert!(!c.is_panning());
        assert_eq!(c.on_pointer_move(Point::new(30.0, 30.0), Buttons::NONE), None);
    }

    #[test]
    fn move_without_press_does_nothing() {
        let mut c = InteractionController::new();
        assert_eq!(c.on_pointer_move(Point::new(5.0, 5.0), Buttons::LEFT), None);
    }

    #[test]
    fn extra_buttons_suppress_panning() {
        let mut c = InteractionController::new();
        c.on_pointer_down(PointerButton::Left, Point::default());
        let both = Buttons {
            left: true,
            right: true,
            middle: false,
        };
        assert_eq!(c.on_pointer_move(Point::new(4.0, 4.0), both), None);
    }

    #[test]
    fn right_button_does_not_start_pan() {
        let mut c = InteractionController::new();
        c.on_pointer_down(PointerButton::Right, Point::default());
        assert!(!c.is_panning());
    }

    #[test]
    fn wheel_zooms_regardless_of_buttons() {
        let mut c = InteractionController::new();
        c.on_pointer_down(PointerButton::Left, Point::default());
        assert_eq!(c.on_wheel(-3.0), Some(ViewAction::Zoom(-3.0)));
        assert_eq!(c.on_wheel(0.0), None);
    }

    #[test]
    fn resize_requests_rerender() {
        let mut c = InteractionController::new();
        assert_eq!(
            c.on_resize(Size::new(640, 480)),
            Some(ViewAction::Rerender(Size::new(640, 480)))
        );
    }
}
