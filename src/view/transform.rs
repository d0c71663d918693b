use crate::geometry::{Point, RectF, Size, Vector};

pub const MIN_SCALE: f64 = 1e-3;
pub const MAX_SCALE: f64 = 1e3;

/// Cumulative zoom and pan of the canvas.
///
/// `pan` is the scene-space offset of the viewport centre from the scene
/// centre, so zooming about the viewport centre leaves it untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub pan: Vector,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        pan: Vector::ZERO,
    };

    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.set_scale(self.scale * factor);
        }
    }

    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    /// Move the view by a viewport pixel delta: dragging right reveals the
    /// left of the scene. The centre is clamped inside the scene.
    pub fn pan_by(&mut self, delta: Vector, scene: Size) {
        let half_w = scene.width as f64 / 2.0;
        let half_h = scene.height as f64 / 2.0;
        self.pan.dx = (self.pan.dx - delta.dx / self.scale).clamp(-half_w, half_w);
        self.pan.dy = (self.pan.dy - delta.dy / self.scale).clamp(-half_h, half_h);
    }

    fn scene_center(&self, scene: Size) -> Point {
        Point::new(
            scene.width as f64 / 2.0 + self.pan.dx,
            scene.height as f64 / 2.0 + self.pan.dy,
        )
    }

    pub fn scene_to_view(&self, p: Point, scene: Size, viewport: Size) -> Point {
        let c = self.scene_center(scene);
        Point::new(
            viewport.width as f64 / 2.0 + (p.x - c.x) * self.scale,
            viewport.height as f64 / 2.0 + (p.y - c.y) * self.scale,
        )
    }

    pub fn view_to_scene(&self, p: Point, scene: Size, viewport: Size) -> Point {
        let c = self.scene_center(scene);
        Point::new(
            c.x + (p.x - viewport.width as f64 / 2.0) / self.scale,
            c.y + (p.y - viewport.height as f64 / 2.0) / self.scale,
        )
    }

    /// Scene region currently covered by the viewport. May extend past the
    /// scene when zoomed out.
    pub fn visible_rect(&self, scene: Size, viewport: Size) -> RectF {
        let c = self.scene_center(scene);
        let w = viewport.width as f64 / self.scale;
        let h = viewport.height as f64 / self.scale;
        RectF::new(c.x - w / 2.0, c.y - h / 2.0, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_in_then_out_restores_scale() {
        let mut t = ViewTransform::IDENTITY;
        t.zoom_by(1.2);
        t.zoom_by(1.0 / 1.2);
        assert!((t.scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn scale_is_clamped() {
        let mut t = ViewTransform::IDENTITY;
        t.set_scale(0.0);
        assert_eq!(t.scale, MIN_SCALE);
        t.set_scale(f64::INFINITY);
        assert_eq!(t.scale, MIN_SCALE);
        t.set_scale(5e6);
        assert_eq!(t.scale, MAX_SCALE);
    }

    #[test]
    fn mapping_round_trips() {
        let mut t = ViewTransform::IDENTITY;
        t.set_scale(2.5);
        t.pan_by(Vector::new(30.0, -12.0), Size::new(400, 300));
        let scene = Size::new(400, 300);
        let viewport = Size::new(640, 480);
        let p = Point::new(123.0, 77.0);
        let back = t.view_to_scene(t.scene_to_view(p, scene, viewport), scene, viewport);
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn identity_centres_scene_in_viewport() {
        let t = ViewTransform::IDENTITY;
        let v = t.scene_to_view(Point::new(50.0, 25.0), Size::new(100, 50), Size::new(200, 100));
        assert_eq!(v, Point::new(100.0, 50.0));
    }

    #[test]
    fn pan_moves_opposite_to_drag_and_clamps() {
        let scene = Size::new(100, 100);
        let mut t = ViewTransform::IDENTITY;
        t.set_scale(2.0);
        t.pan_by(Vector::new(10.0, 0.0), scene);
        assert_eq!(t.pan, Vector::new(-5.0, 0.0));
        t.pan_by(Vector::new(-1000.0, 1000.0), scene);
        assert_eq!(t.pan, Vector::new(50.0, -50.0));
    }

    #[test]
    fn visible_rect_shrinks_when_zoomed() {
        let mut t = ViewTransform::IDENTITY;
        t.set_scale(2.0);
        let r = t.visible_rect(Size::new(100, 100), Size::new(100, 100));
        assert_eq!(r, RectF::new(25.0, 25.0, 50.0, 50.0));
    }
}
