//! Software painting onto the window-sized RGBA frame.

use image::{GrayImage, Rgba, RgbaImage};

use crate::geometry::{Rect, RectF};

pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let (w, h) = (width.max(1), height.max(1));
        if self.img.dimensions() != (w, h) {
            self.img = RgbaImage::new(w, h);
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.img.width(), self.img.height())
    }

    pub fn clear(&mut self, color: Rgba<u8>) {
        for px in self.img.pixels_mut() {
            *px = color;
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let alpha = u32::from(color[3]);
        let dst = self.img.get_pixel_mut(x, y);
        if alpha == 255 {
            *dst = color;
            return;
        }
        for c in 0..3 {
            let src = u32::from(color[c]);
            let under = u32::from(dst[c]);
            dst[c] = ((src * alpha + under * (255 - alpha) + 127) / 255) as u8;
        }
        dst[3] = 255;
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        let Some(r) = rect.intersect(&self.bounds()) else {
            return;
        };
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                self.blend(x as u32, y as u32, color);
            }
        }
    }

    /// Fill a fractional rect; edges are snapped outward to whole pixels.
    pub fn fill_rect_f(&mut self, rect: RectF, color: Rgba<u8>) {
        let x0 = rect.x.floor() as i32;
        let y0 = rect.y.floor() as i32;
        let x1 = rect.right().ceil() as i32;
        let y1 = rect.bottom().ceil() as i32;
        if x1 > x0 && y1 > y0 {
            self.fill_rect(Rect::from_corners((x0, y0), (x1, y1)), color);
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Rgba<u8>, thickness: u32) {
        let t = thickness.min(rect.width).min(rect.height);
        if t == 0 {
            return;
        }
        let ti = t as i32;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - ti, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y + ti, t, rect.height - 2 * t), color);
        self.fill_rect(
            Rect::new(rect.right() - ti, rect.y + ti, t, rect.height - 2 * t),
            color,
        );
    }

    pub fn stroke_rect_f(&mut self, rect: RectF, color: Rgba<u8>, thickness: u32) {
        let x0 = rect.x.round() as i32;
        let y0 = rect.y.round() as i32;
        let x1 = rect.right().round() as i32;
        let y1 = rect.bottom().round() as i32;
        self.stroke_rect(Rect::from_corners((x0, y0), (x1.max(x0 + 1), y1.max(y0 + 1))), color, thickness);
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba<u8>) {
        let r2 = radius * radius;
        let bounds = Rect::from_corners(
            ((cx - radius).floor() as i32, (cy - radius).floor() as i32),
            ((cx + radius).ceil() as i32 + 1, (cy + radius).ceil() as i32 + 1),
        );
        let Some(r) = bounds.intersect(&self.bounds()) else {
            return;
        };
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                let dx = f64::from(x) + 0.5 - cx;
                let dy = f64::from(y) + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x as u32, y as u32, color);
                }
            }
        }
    }

    /// Straight line of `thickness`, drawn as stamped squares.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba<u8>, thickness: u32) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
        let half = f64::from(thickness) / 2.0;
        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            let (x, y) = (from.0 + dx * t, from.1 + dy * t);
            self.fill_rect_f(RectF::new(x - half, y - half, f64::from(thickness), f64::from(thickness)), color);
        }
    }

    pub fn blit_gray(&mut self, src: &GrayImage, x: i32, y: i32) {
        let target = Rect::new(x, y, src.width(), src.height());
        let Some(r) = target.intersect(&self.bounds()) else {
            return;
        };
        for py in r.y..r.bottom() {
            for px in r.x..r.right() {
                let v = src.get_pixel((px - x) as u32, (py - y) as u32)[0];
                self.img.put_pixel(px as u32, py as u32, Rgba([v, v, v, 255]));
            }
        }
    }

    /// Alpha-blend an RGBA image with its top-left corner at `(x, y)`.
    pub fn blit_rgba(&mut self, src: &RgbaImage, x: i32, y: i32) {
        let target = Rect::new(x, y, src.width(), src.height());
        let Some(r) = target.intersect(&self.bounds()) else {
            return;
        };
        for py in r.y..r.bottom() {
            for px in r.x..r.right() {
                let c = *src.get_pixel((px - x) as u32, (py - y) as u32);
                if c[3] > 0 {
                    self.blend(px as u32, py as u32, c);
                }
            }
        }
    }

    /// Fill `rect` pixel by pixel from `shade`; `None` leaves the pixel as is.
    pub fn fill_with<F>(&mut self, rect: Rect, mut shade: F)
    where
        F: FnMut(i32, i32) -> Option<Rgba<u8>>,
    {
        let Some(r) = rect.intersect(&self.bounds()) else {
            return;
        };
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                if let Some(c) = shade(x, y) {
                    self.img.put_pixel(x as u32, y as u32, c);
                }
            }
        }
    }
}
