//! Vertical tool strip. Clicking a tool publishes `ToolSelected`; dragging a
//! tool out of the strip yields a drop for the workspace to handle.

use tracing::debug;

use crate::events::{EventSender, ToolKind, UiEvent};
use crate::geometry::{Point, Rect};
use crate::view::interaction::{Buttons, PointerButton, PointerEvents};

pub const BUTTON_SIZE: u32 = 40;
pub const BUTTON_SPACING: u32 = 6;
/// Pointer travel that turns a press into a drag.
pub const DRAG_THRESHOLD: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolDrop {
    pub tool: ToolKind,
    pub at: Point,
}

pub struct Toolbar {
    area: Rect,
    tools: Vec<ToolKind>,
    pressed: Option<(ToolKind, Point)>,
    dragging: Option<(ToolKind, Point)>,
    events: EventSender,
}

impl Toolbar {
    pub fn new(events: EventSender) -> Self {
        Self {
            area: Rect::default(),
            tools: ToolKind::ALL.to_vec(),
            pressed: None,
            dragging: None,
            events,
        }
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn tools(&self) -> &[ToolKind] {
        &self.tools
    }

    pub fn button_rect(&self, index: usize) -> Rect {
        let size = BUTTON_SIZE.min(self.area.width);
        let x = self.area.x + (self.area.width.saturating_sub(size) / 2) as i32;
        let y = self.area.y + (BUTTON_SPACING + index as u32 * (size + BUTTON_SPACING)) as i32;
        Rect::new(x, y, size, size)
    }

    pub fn tool_at(&self, p: Point) -> Option<ToolKind> {
        self.tools
            .iter()
            .enumerate()
            .find(|(i, _)| self.button_rect(*i).contains(p))
            .map(|(_, tool)| *tool)
    }

    /// Tool being dragged and the current pointer position, for the drag preview.
    pub fn drag_preview(&self) -> Option<(ToolKind, Point)> {
        self.dragging
    }

    pub fn pressed_tool(&self) -> Option<ToolKind> {
        self.pressed.map(|(tool, _)| tool)
    }
}

impl PointerEvents for Toolbar {
    type Action = ToolDrop;

    fn on_pointer_down(&mut self, button: PointerButton, pos: Point) -> Option<ToolDrop> {
        if button == PointerButton::Left {
            self.pressed = self.tool_at(pos).map(|tool| (tool, pos));
        }
        None
    }

    fn on_pointer_move(&mut self, pos: Point, _buttons: Buttons) -> Option<ToolDrop> {
        if let Some((tool, _)) = self.dragging {
            self.dragging = Some((tool, pos));
            return None;
        }
        if let Some((tool, origin)) = self.pressed {
            let moved = pos - origin;
            if moved.dx.hypot(moved.dy) > DRAG_THRESHOLD {
                debug!(?tool, "tool drag started");
                self.dragging = Some((tool, pos));
            }
        }
        None
    }

    fn on_pointer_up(&mut self, button: PointerButton, pos: Point) -> Option<ToolDrop> {
        if button != PointerButton::Left {
            return None;
        }
        let pressed = self.pressed.take();
        if let Some((tool, _)) = self.dragging.take() {
            return (!self.area.contains(pos)).then_some(ToolDrop { tool, at: pos });
        }
        if let Some((tool, _)) = pressed
            && self.tool_at(pos) == Some(tool)
        {
            let _ = self.events.send(UiEvent::ToolSelected(tool));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventReceiver, event_channel};

    fn toolbar() -> (Toolbar, EventReceiver) {
        let (tx, rx) = event_channel();
        let mut bar = Toolbar::new(tx);
        bar.set_area(Rect::new(900, 0, 52, 400));
        (bar, rx)
    }

    #[test]
    fn buttons_stack_vertically() {
        let (bar, _rx) = toolbar();
        assert_eq!(bar.button_rect(0), Rect::new(906, 6, 40, 40));
        assert_eq!(bar.button_rect(1), Rect::new(906, 52, 40, 40));
        assert_eq!(bar.tool_at(Point::new(920.0, 60.0)), Some(ToolKind::Histogram));
        assert_eq!(bar.tool_at(Point::new(920.0, 300.0)), None);
    }

    #[test]
    fn click_publishes_tool_selected() {
        let (mut bar, rx) = toolbar();
        let p = Point::new(920.0, 20.0);
        bar.on_pointer_down(PointerButton::Left, p);
        assert_eq!(bar.on_pointer_up(PointerButton::Left, p), None);
        assert!(matches!(
            rx.try_recv(),
            Ok(UiEvent::ToolSelected(ToolKind::ImageOpen))
        ));
    }

    #[test]
    fn drag_out_of_strip_drops_tool() {
        let (mut bar, rx) = toolbar();
        bar.on_pointer_down(PointerButton::Left, Point::new(920.0, 110.0));
        bar.on_pointer_move(Point::new(910.0, 110.0), Buttons::LEFT);
        assert_eq!(bar.drag_preview().map(|(t, _)| t), Some(ToolKind::ZoomView));
        bar.on_pointer_move(Point::new(400.0, 200.0), Buttons::LEFT);
        let drop = bar.on_pointer_up(PointerButton::Left, Point::new(400.0, 200.0));
        assert_eq!(
            drop,
            Some(ToolDrop {
                tool: ToolKind::ZoomView,
                at: Point::new(400.0, 200.0)
            })
        );
        assert!(rx.try_recv().is_err());
        assert!(bar.drag_preview().is_none());
    }

    #[test]
    fn drag_released_inside_strip_is_cancelled() {
        let (mut bar, rx) = toolbar();
        bar.on_pointer_down(PointerButton::Left, Point::new(920.0, 20.0));
        bar.on_pointer_move(Point::new(920.0, 80.0), Buttons::LEFT);
        assert_eq!(bar.on_pointer_up(PointerButton::Left, Point::new(920.0, 80.0)), None);
        assert!(rx.try_recv().is_err());
    }
}
