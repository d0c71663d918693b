//! Level normalization: map a `[low, high]` sample window onto `0..=255`.

use tracing::warn;

use crate::buffer::ImageBuffer;
use crate::error::Error;

/// Output value used for every pixel when the display range is degenerate.
pub const DEGENERATE_FILL: u8 = 128;

/// The sample window mapped to full display brightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    pub low: f64,
    pub high: f64,
}

impl DisplayRange {
    /// Builds a range, swapping the bounds if they arrive inverted.
    pub fn new(low: f64, high: f64) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }
}

/// 8-bit displayable pixels with the same shape as the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBitmap {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub pixels: Vec<u8>,
}

impl DisplayBitmap {
    /// RGB value at `(x, y)`; single channel bitmaps are expanded to gray.
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * self.depth as usize;
        if self.depth >= 3 {
            [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
        } else {
            let v = self.pixels[idx];
            [v, v, v]
        }
    }

    /// First channel as an `image` gray buffer, for resampling.
    pub fn to_gray_image(&self) -> image::GrayImage {
        let depth = self.depth.max(1) as usize;
        let luma: Vec<u8> = self.pixels.iter().step_by(depth).copied().collect();
        image::GrayImage::from_raw(self.width, self.height, luma)
            .unwrap_or_else(|| image::GrayImage::new(self.width, self.height))
    }

    pub fn from_gray_image(img: image::GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            depth: 1,
            pixels: img.into_raw(),
        }
    }
}

/// Rejects windows that would divide by zero or produce NaN.
///
/// # Errors
/// Returns [`Error::DegenerateRange`] unless both bounds are finite and `low < high`.
pub fn check_range(low: f64, high: f64) -> Result<(), Error> {
    if low.is_finite() && high.is_finite() && high > low {
        Ok(())
    } else {
        Err(Error::DegenerateRange { low, high })
    }
}

/// Maps a single sample; values are clipped to the window first.
#[inline]
pub fn normalize_sample(value: f64, low: f64, high: f64) -> u8 {
    let clipped = value.clamp(low, high);
    // `as u8` truncates toward zero and saturates.
    ((clipped - low) / (high - low) * 255.0) as u8
}

/// Clip to `[low, high]` and stretch linearly onto `0..=255`.
///
/// A degenerate window never panics: it yields a flat [`DEGENERATE_FILL`]
/// bitmap of the same shape.
pub fn normalize(buffer: &ImageBuffer, low: f64, high: f64) -> DisplayBitmap {
    let pixels = match check_range(low, high) {
        Ok(()) => buffer
            .samples()
            .iter_f64()
            .map(|v| normalize_sample(v, low, high))
            .collect(),
        Err(err) => {
            warn!(error = %err, "normalizing with a flat fallback");
            vec![DEGENERATE_FILL; buffer.samples().len()]
        }
    };
    DisplayBitmap {
        width: buffer.width(),
        height: buffer.height(),
        depth: buffer.depth(),
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Samples;

    fn ramp() -> ImageBuffer {
        ImageBuffer::gray8(256, 1, (0..=255).collect()).unwrap()
    }

    #[test]
    fn full_range_is_identity() {
        let out = normalize(&ramp(), 0.0, 255.0);
        let expected: Vec<u8> = (0..=255).collect();
        assert_eq!(out.pixels, expected);
    }

    #[test]
    fn output_is_monotonic_inside_window() {
        let out = normalize(&ramp(), 40.0, 90.0);
        for pair in out.pixels.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(out.pixels[0], 0);
        assert_eq!(out.pixels[40], 0);
        assert_eq!(out.pixels[90], 255);
        assert_eq!(out.pixels[255], 255);
    }

    #[test]
    fn truncates_rather_than_rounds() {
        // (1 - 0) / 2 * 255 = 127.5
        assert_eq!(normalize_sample(1.0, 0.0, 2.0), 127);
    }

    #[test]
    fn equal_bounds_fall_back_to_mid_gray() {
        for v in [0.0, 17.0, 255.0] {
            let out = normalize(&ramp(), v, v);
            assert_eq!(out.pixels.len(), 256);
            assert!(out.pixels.iter().all(|&p| p == DEGENERATE_FILL));
        }
    }

    #[test]
    fn check_range_flags_degenerate_windows() {
        assert!(check_range(0.0, 1.0).is_ok());
        assert!(matches!(
            check_range(3.0, 3.0),
            Err(Error::DegenerateRange { .. })
        ));
        assert!(check_range(5.0, 1.0).is_err());
        assert!(check_range(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn sixteen_bit_samples_map_to_bytes() {
        let buf = ImageBuffer::new(3, 1, 1, Samples::U16(vec![0, 32768, 65535])).unwrap();
        let out = normalize(&buf, 0.0, 65535.0);
        assert_eq!(out.pixels, vec![0, 127, 255]);
    }

    #[test]
    fn display_range_orders_bounds() {
        let r = DisplayRange::new(9.0, 2.0);
        assert_eq!((r.low, r.high), (2.0, 9.0));
        assert_eq!(r.span(), 7.0);
    }

    #[test]
    fn gray_image_conversion_keeps_first_channel() {
        let bmp = DisplayBitmap {
            width: 2,
            height: 1,
            depth: 3,
            pixels: vec![10, 20, 30, 40, 50, 60],
        };
        assert_eq!(bmp.to_gray_image().into_raw(), vec![10, 40]);
        assert_eq!(bmp.rgb_at(1, 0), [40, 50, 60]);
    }
}
