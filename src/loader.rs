//! File path → [`ImageBuffer`] decoding.
//!
//! The decode strategy is picked from the file extension. Raster formats go
//! through the `image` crate and are reduced to 8-bit luma; HDF5 and FITS are
//! recognised so the open dialog can offer them, but decoding them is not
//! implemented and is reported as [`Error::UnsupportedFormat`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::GrayImage;
use tracing::{debug, info};

use crate::buffer::ImageBuffer;
use crate::error::Error;

/// Filters offered by the open dialog, in display order.
pub const OPEN_DIALOG_FILTERS: &[(&str, &[&str])] = &[
    ("Image Files", &["png", "jpg", "jpeg", "bmp", "tiff"]),
    ("HDF5 Files", &["hdf5", "h5"]),
    ("Fits Files", &["fits"]),
    ("All Files", &["*"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Raster,
    Hdf5,
    Fits,
}

impl SourceFormat {
    /// Pick a decode strategy from the path's extension (case-insensitive).
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedFormat`] for a missing or unknown extension.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| Error::UnsupportedFormat(format!("{} has no extension", path.display())))?;
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "bmp" | "tiff" => Ok(Self::Raster),
            "hdf5" | "h5" => Ok(Self::Hdf5),
            "fits" => Ok(Self::Fits),
            other => Err(Error::UnsupportedFormat(format!(".{other}"))),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Raster => "raster",
            Self::Hdf5 => "HDF5",
            Self::Fits => "FITS",
        }
    }
}

/// Decode `path` into a single-channel 8-bit buffer.
///
/// Callers keep whatever they displayed before when this fails.
///
/// # Errors
/// - [`Error::UnsupportedFormat`] for unknown extensions and for HDF5/FITS.
/// - [`Error::UnreadableFile`] when the file is missing or cannot be decoded.
pub fn load_image(path: &Path) -> Result<ImageBuffer, Error> {
    let format = SourceFormat::from_path(path)?;
    match format {
        SourceFormat::Raster => {
            let img = decode_luma8_apply_exif(path).map_err(|source| Error::UnreadableFile {
                path: path.to_path_buf(),
                source,
            })?;
            let (width, height) = img.dimensions();
            info!(path = %path.display(), width, height, "image decoded");
            ImageBuffer::gray8(width, height, img.into_raw())
        }
        SourceFormat::Hdf5 | SourceFormat::Fits => {
            if !path.exists() {
                return Err(Error::UnreadableFile {
                    path: path.to_path_buf(),
                    source: image::ImageError::IoError(std::io::Error::from(
                        std::io::ErrorKind::NotFound,
                    )),
                });
            }
            Err(Error::UnsupportedFormat(format!(
                "{} decoding is not implemented",
                format.name()
            )))
        }
    }
}

// Decodes to luma8 and applies the EXIF orientation when the container has one.
fn decode_luma8_apply_exif(path: &Path) -> Result<GrayImage, image::ImageError> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;

    let mut img = img.to_luma8();

    let orientation: u16 = read_orientation(path).unwrap_or(1);
    match orientation {
        1 => {}
        2 => img = image::imageops::flip_horizontal(&img),
        3 => img = image::imageops::rotate180(&img),
        4 => img = image::imageops::flip_vertical(&img),
        5 => {
            img = image::imageops::rotate90(&img);
            img = image::imageops::flip_horizontal(&img);
        }
        6 => img = image::imageops::rotate90(&img),
        7 => {
            img = image::imageops::rotate270(&img);
            img = image::imageops::flip_horizontal(&img);
        }
        8 => img = image::imageops::rotate270(&img),
        _ => {}
    }

    Ok(img)
}

fn read_orientation(path: &Path) -> Option<u16> {
    let file = File::open(path).ok()?;
    let mut buf = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut buf).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    let o = field.value.get_uint(0)? as u16;
    debug!("exif orientation {} for {}", o, path.display());
    Some(o)
}
