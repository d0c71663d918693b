//! Resize grips for the frameless window.

use crate::geometry::{Point, Rect, Size};

pub const MIN_GRIP_SIZE: u32 = 2;
pub const DEFAULT_GRIP_SIZE: u32 = 8;
/// Distance from the window edge within which the resize cursor is shown.
pub const CURSOR_MARGIN: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grip {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Grip {
    pub const fn cursor(self) -> CursorShape {
        match self {
            Self::Left | Self::Right => CursorShape::ResizeHorizontal,
            Self::Top | Self::Bottom => CursorShape::ResizeVertical,
            Self::TopLeft | Self::BottomRight => CursorShape::ResizeDiagonalNwSe,
            Self::TopRight | Self::BottomLeft => CursorShape::ResizeDiagonalNeSw,
        }
    }

    const fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    const fn moves_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    const fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    const fn moves_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    fn from_edges(left: bool, right: bool, top: bool, bottom: bool) -> Option<Self> {
        match (left, right, top, bottom) {
            (true, _, true, _) => Some(Self::TopLeft),
            (_, true, true, _) => Some(Self::TopRight),
            (true, _, _, true) => Some(Self::BottomLeft),
            (_, true, _, true) => Some(Self::BottomRight),
            (true, _, _, _) => Some(Self::Left),
            (_, true, _, _) => Some(Self::Right),
            (_, _, true, _) => Some(Self::Top),
            (_, _, _, true) => Some(Self::Bottom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Arrow,
    ResizeHorizontal,
    ResizeVertical,
    ResizeDiagonalNwSe,
    ResizeDiagonalNeSw,
}

/// Hit regions of the eight grips for one window size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GripLayout {
    grip_size: u32,
    window: Size,
    corners: [(Grip, Rect); 4],
    edges: [(Grip, Rect); 4],
}

impl GripLayout {
    /// Lay the grips out around the inner rect, the window rect inset by
    /// `grip_size` (at least [`MIN_GRIP_SIZE`]) on every side.
    pub fn new(window: Size, grip_size: u32) -> Self {
        let g = grip_size.max(MIN_GRIP_SIZE);
        let outer = Rect::from_size(window);
        let gi = g as i32;
        let inner = outer.inset(gi, gi, gi, gi);
        let (w, h) = (window.width as i32, window.height as i32);

        let corners = [
            (Grip::TopLeft, Rect::from_corners((0, 0), (inner.x, inner.y))),
            (Grip::TopRight, Rect::from_corners((w, 0), (inner.right(), inner.y))),
            (Grip::BottomRight, Rect::from_corners((inner.right(), inner.bottom()), (w, h))),
            (Grip::BottomLeft, Rect::from_corners((0, h), (inner.x, inner.bottom()))),
        ];
        let edges = [
            (Grip::Left, Rect::new(0, inner.y, g, inner.height)),
            (Grip::Top, Rect::new(inner.x, 0, inner.width, g)),
            (Grip::Right, Rect::new(inner.right(), inner.y, g, inner.height)),
            (Grip::Bottom, Rect::new(inner.x, inner.bottom(), inner.width, g)),
        ];
        Self {
            grip_size: g,
            window,
            corners,
            edges,
        }
    }

    pub fn grip_size(&self) -> u32 {
        self.grip_size
    }

    pub fn window(&self) -> Size {
        self.window
    }

    pub fn rect(&self, grip: Grip) -> Rect {
        self.corners
            .iter()
            .chain(self.edges.iter())
            .find(|(g, _)| *g == grip)
            .map(|(_, r)| *r)
            .unwrap_or_default()
    }

    /// Grip under `p`; corners win over edges where they overlap.
    pub fn hit_test(&self, p: Point) -> Option<Grip> {
        self.corners
            .iter()
            .chain(self.edges.iter())
            .find(|(_, r)| r.contains(p))
            .map(|(g, _)| *g)
    }
}

/// Resize cursor near any window edge, arrow elsewhere.
pub fn cursor_for(p: Point, window: Size, margin: u32) -> CursorShape {
    let m = f64::from(margin);
    let (w, h) = (f64::from(window.width), f64::from(window.height));
    let inside = p.x >= 0.0 && p.y >= 0.0 && p.x < w && p.y < h;
    if !inside {
        return CursorShape::Arrow;
    }
    Grip::from_edges(p.x < m, p.x >= w - m, p.y < m, p.y >= h - m)
        .map_or(CursorShape::Arrow, Grip::cursor)
}

/// Geometry after dragging `grip` by `(dx, dy)`. The edge opposite the grip
/// stays put and the result never shrinks below `min_size`.
pub fn resize_rect(rect: Rect, grip: Grip, dx: i32, dy: i32, min_size: Size) -> Rect {
    let (mut left, mut top, mut right, mut bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
    let min_w = min_size.width as i32;
    let min_h = min_size.height as i32;

    if grip.moves_left() {
        left = (left + dx).min(right - min_w);
    }
    if grip.moves_right() {
        right = (right + dx).max(left + min_w);
    }
    if grip.moves_top() {
        top = (top + dy).min(bottom - min_h);
    }
    if grip.moves_bottom() {
        bottom = (bottom + dy).max(top + min_h);
    }
    Rect::new(left, top, (right - left) as u32, (bottom - top) as u32)
}
