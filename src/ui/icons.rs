use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::{debug, warn};

use crate::events::ToolKind;

/// Toolbar icons, decoded once and scaled to the button size. Missing icons
/// are drawn as their label initial instead.
#[derive(Debug, Default)]
pub struct ToolIcons {
    icons: HashMap<ToolKind, RgbaImage>,
}

impl ToolIcons {
    pub fn load(dir: &Path, side: u32) -> Self {
        let mut icons = HashMap::new();
        for tool in ToolKind::ALL {
            let path = dir.join(tool.icon_file());
            match image::open(&path) {
                Ok(img) => {
                    let rgba = img.to_rgba8();
                    let scaled = if rgba.width() > side || rgba.height() > side {
                        imageops::resize(&rgba, side, side, FilterType::Triangle)
                    } else {
                        rgba
                    };
                    debug!(path = %path.display(), "loaded tool icon");
                    icons.insert(tool, scaled);
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "tool icon unavailable; using label");
                }
            }
        }
        Self { icons }
    }

    pub fn get(&self, tool: ToolKind) -> Option<&RgbaImage> {
        self.icons.get(&tool)
    }
}

/// Single-letter stand-in for a missing icon.
pub fn fallback_glyph(tool: ToolKind) -> String {
    tool.label().chars().next().map(String::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let icons = ToolIcons::load(&dir.path().join("absent"), 32);
        assert!(icons.get(ToolKind::Histogram).is_none());
        assert_eq!(fallback_glyph(ToolKind::ZoomView), "Z");
    }

    #[test]
    fn large_icons_are_downscaled() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::new(64, 64)
            .save(dir.path().join(ToolKind::Histogram.icon_file()))
            .unwrap();
        let icons = ToolIcons::load(dir.path(), 32);
        assert_eq!(icons.get(ToolKind::Histogram).unwrap().dimensions(), (32, 32));
    }
}
