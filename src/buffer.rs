//! Decoded pixel samples plus the shape metadata needed to display them.

use crate::error::Error;

/// Storage width of a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    U8,
    U16,
}

impl SampleType {
    /// Bytes per sample.
    #[must_use]
    pub const fn byte_width(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
}

impl Samples {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn sample_type(&self) -> SampleType {
        match self {
            Self::U8(_) => SampleType::U8,
            Self::U16(_) => SampleType::U16,
        }
    }

    /// Iterate every sample widened to `f64`.
    pub fn iter_f64(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            Self::U8(v) => Box::new(v.iter().map(|&s| f64::from(s))),
            Self::U16(v) => Box::new(v.iter().map(|&s| f64::from(s))),
        }
    }
}

/// An immutable, fully decoded image. A new load replaces the whole buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    depth: u32,
    samples: Samples,
}

impl ImageBuffer {
    /// Wrap a sample array with its shape.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] unless `width * height * depth == samples.len()`.
    pub fn new(width: u32, height: u32, depth: u32, samples: Samples) -> Result<Self, Error> {
        let expected = width as usize * height as usize * depth as usize;
        if depth == 0 || expected != samples.len() {
            return Err(Error::ShapeMismatch {
                width,
                height,
                depth,
                len: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            samples,
        })
    }

    /// Single-channel 8-bit buffer, the shape produced by the raster decoder.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if `pixels` does not hold `width * height` bytes.
    pub fn gray8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, Error> {
        Self::new(width, height, 1, Samples::U8(pixels))
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub const fn dtype(&self) -> SampleType {
        self.samples.sample_type()
    }

    #[must_use]
    pub const fn samples(&self) -> &Samples {
        &self.samples
    }

    /// Smallest and largest sample, `None` for an empty image.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.samples.iter_f64().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
