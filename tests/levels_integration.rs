//! Decode a file, histogram it and feed the thresholds back into the
//! canvas the way the window does.

use std::sync::Arc;

use image::{GrayImage, Luma};
use image_mage::events::{UiEvent, event_channel};
use image_mage::geometry::Size;
use image_mage::loader::load_image;
use image_mage::processing::histogram::HistogramModel;
use image_mage::view::surface::{RenderSurface, SurfaceSettings};

fn write_png(dir: &tempfile::TempDir, name: &str, img: &GrayImage) -> std::path::PathBuf {
    let path = dir.path().join(name);
    img.save(&path).unwrap();
    path
}

#[test]
fn uniform_ramp_histogram() {
    let dir = tempfile::tempdir().unwrap();
    // 100x100 with every value 0..=255 present
    let img = GrayImage::from_fn(100, 100, |x, y| Luma([((y * 100 + x) % 256) as u8]));
    let path = write_png(&dir, "ramp.png", &img);

    let buffer = load_image(&path).unwrap();
    let (tx, rx) = event_channel();
    let mut model = HistogramModel::new(50, false, false, tx);
    model.set_image(&buffer);

    let stats = model.stats();
    assert_eq!((stats.min, stats.max, stats.range), (0.0, 255.0, 255.0));
    assert_eq!(model.tolerance(), 5.0);
    let slider = model.slider();
    assert_eq!((slider.minimum, slider.maximum), (-5.0, 260.0));
    assert_eq!((slider.low, slider.high), (0.0, 255.0));

    let bins = model.bins();
    assert_eq!(bins.counts.len(), 50);
    assert_eq!(bins.counts.iter().sum::<u64>(), 10_000);

    match rx.try_recv() {
        Ok(UiEvent::ThresholdsChanged { low, high }) => assert_eq!((low, high), (0.0, 255.0)),
        other => panic!("expected thresholds, got {other:?}"),
    }
}

#[test]
fn thresholds_drive_the_display() {
    let dir = tempfile::tempdir().unwrap();
    let img = GrayImage::from_fn(4, 1, |x, _| Luma([[0u8, 100, 200, 255][x as usize]]));
    let path = write_png(&dir, "steps.png", &img);
    let buffer = Arc::new(load_image(&path).unwrap());

    let (tx, rx) = event_channel();
    let mut surface = RenderSurface::new(SurfaceSettings::default(), tx.clone());
    surface.set_viewport(Size::new(400, 100));
    surface.set_buffer(buffer.clone());

    let mut model = HistogramModel::new(10, false, false, tx);
    model.set_image(&buffer);
    model.set_thresholds(100.0, 200.0);

    for event in rx.try_iter() {
        if let UiEvent::ThresholdsChanged { low, high } = event {
            surface.set_levels(low, high);
        }
    }
    let levels = surface.levels();
    assert_eq!((levels.low, levels.high), (100.0, 200.0));
    let display = surface.display().unwrap();
    assert_eq!(display.rgb_at(0, 0), [0; 3]);
    assert_eq!(display.width, 380);
    assert_eq!(display.rgb_at(display.width - 1, 0), [255; 3]);
}

#[test]
fn unsupported_extension_is_reported() {
    let err = load_image(std::path::Path::new("notes.txt")).unwrap_err();
    assert!(err.to_string().contains("txt"), "{err}");
}
