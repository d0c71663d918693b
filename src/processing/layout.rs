use crate::geometry::Size;

/// Largest size with the source aspect ratio that fits inside the canvas.
/// Never returns a zero dimension.
pub fn resize_to_contain(canvas_w: u32, canvas_h: u32, src_w: u32, src_h: u32) -> (u32, u32) {
    let iw = src_w.max(1) as f64;
    let ih = src_h.max(1) as f64;
    let cw = canvas_w.max(1) as f64;
    let ch = canvas_h.max(1) as f64;
    let scale = (cw / iw).min(ch / ih).max(0.0);
    let scale = if scale.is_finite() { scale } else { 1.0 };
    // Truncate like an integer pixmap scale so the result never exceeds the canvas.
    let w = (iw * scale).floor().clamp(1.0, cw);
    let h = (ih * scale).floor().clamp(1.0, ch);
    (w as u32, h as u32)
}

/// Target size for the displayed bitmap: `fraction` of the viewport, aspect kept.
pub fn fit_within(viewport: Size, image: Size, fraction: f64) -> Size {
    let fraction = fraction.clamp(0.01, 1.0);
    let box_w = (viewport.width as f64 * fraction) as u32;
    let box_h = (viewport.height as f64 * fraction) as u32;
    let (w, h) = resize_to_contain(box_w, box_h, image.width, image.height);
    Size::new(w, h)
}

pub fn center_offset(inner_w: u32, inner_h: u32, outer_w: u32, outer_h: u32) -> (u32, u32) {
    let ox = outer_w.saturating_sub(inner_w) / 2;
    let oy = outer_h.saturating_sub(inner_h) / 2;
    (ox, oy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_in_landscape_viewport() {
        let out = fit_within(Size::new(400, 200), Size::new(100, 100), 0.95);
        assert_eq!(out, Size::new(190, 190));
    }

    #[test]
    fn wide_image_limited_by_width() {
        let out = fit_within(Size::new(300, 300), Size::new(1000, 500), 1.0);
        assert_eq!(out, Size::new(300, 150));
    }

    #[test]
    fn small_images_are_upscaled_to_fill() {
        assert_eq!(resize_to_contain(100, 100, 10, 5), (100, 50));
    }

    #[test]
    fn degenerate_inputs_stay_positive() {
        assert_eq!(resize_to_contain(0, 0, 0, 0), (1, 1));
    }

    #[test]
    fn centers_with_saturation() {
        assert_eq!(center_offset(50, 20, 100, 100), (25, 40));
        assert_eq!(center_offset(200, 20, 100, 100), (0, 40));
    }
}
