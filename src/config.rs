use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, ensure};
use palette::Srgb;
use serde::Deserialize;

use crate::geometry::Size;
use crate::processing::histogram::{DEFAULT_BIN_COUNT, MAX_BIN_COUNT};
use crate::view::surface::SurfaceSettings;
use crate::window::grips::{DEFAULT_GRIP_SIZE, MIN_GRIP_SIZE};
use crate::workspace::grid::{DEFAULT_COLUMNS, DEFAULT_ROWS};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    pub window: WindowOptions,
    pub viewer: ViewerOptions,
    pub histogram: HistogramOptions,
    pub workspace: WorkspaceOptions,
    pub minimap: MinimapOptions,
    pub theme: ThemeOptions,
    pub assets: AssetOptions,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        self.window.validate()?;
        self.viewer.validate()?;
        self.histogram.validate()?;
        self.workspace.validate()?;
        self.minimap.validate()?;
        self.theme.validate().context("invalid theme")?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Initial outer position; left to the window manager when unset.
    pub position: Option<[i32; 2]>,
    /// Thickness of the resize grips in physical pixels, at least 2.
    pub grip_size: u32,
    pub min_width: u32,
    pub min_height: u32,
}

impl WindowOptions {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "window width and height must be greater than zero"
        );
        ensure!(
            self.grip_size >= MIN_GRIP_SIZE,
            "window.grip-size must be at least {MIN_GRIP_SIZE}"
        );
        ensure!(
            self.min_width <= self.width && self.min_height <= self.height,
            "window.min-width/min-height must not exceed the initial size"
        );
        Ok(())
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "IMage".to_string(),
            width: 1000,
            height: 600,
            position: Some([100, 100]),
            grip_size: DEFAULT_GRIP_SIZE,
            min_width: 480,
            min_height: 320,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ViewerOptions {
    /// Share of the canvas the fitted image may occupy.
    pub fit_fraction: f64,
    /// Scale multiplier applied per wheel step.
    pub zoom_factor: f64,
}

impl ViewerOptions {
    pub fn surface_settings(&self) -> SurfaceSettings {
        SurfaceSettings {
            fit_fraction: self.fit_fraction,
            zoom_factor: self.zoom_factor,
        }
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.fit_fraction > 0.0 && self.fit_fraction <= 1.0,
            "viewer.fit-fraction must be in (0, 1]"
        );
        ensure!(self.zoom_factor > 1.0, "viewer.zoom-factor must be greater than 1");
        Ok(())
    }
}

impl Default for ViewerOptions {
    fn default() -> Self {
        let settings = SurfaceSettings::default();
        Self {
            fit_fraction: settings.fit_fraction,
            zoom_factor: settings.zoom_factor,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HistogramOptions {
    pub bins: usize,
    pub log_x: bool,
    pub log_y: bool,
    /// Number of random samples shown before an image is loaded.
    pub preview_samples: usize,
    /// Fixed seed for the preview distribution.
    pub preview_seed: Option<u64>,
    pub width: u32,
    pub height: u32,
}

impl HistogramOptions {
    fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_BIN_COUNT).contains(&self.bins),
            "histogram.bins must be between 1 and {MAX_BIN_COUNT}"
        );
        ensure!(
            self.width > 0 && self.height > 0,
            "histogram width and height must be greater than zero"
        );
        Ok(())
    }
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BIN_COUNT,
            log_x: false,
            log_y: false,
            preview_samples: 100,
            preview_seed: None,
            width: 350,
            height: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WorkspaceOptions {
    pub columns: u32,
    pub rows: u32,
    /// Share of the window width given to the workspace.
    pub width_fraction: f64,
    pub placeholder_width: u32,
    pub placeholder_height: u32,
    /// Widgets placed on the workspace at startup, by name
    /// (`histogram`, `zoom-view`; anything else becomes a placeholder).
    pub startup_widgets: Vec<String>,
}

impl WorkspaceOptions {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.columns > 0 && self.rows > 0,
            "workspace columns and rows must be greater than zero"
        );
        ensure!(
            self.width_fraction > 0.0 && self.width_fraction < 1.0,
            "workspace.width-fraction must be in (0, 1)"
        );
        Ok(())
    }
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            width_fraction: 0.5,
            placeholder_width: 160,
            placeholder_height: 60,
            startup_widgets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MinimapOptions {
    /// Longest side of the overview thumbnail.
    pub thumbnail_size: u32,
    pub width: u32,
    pub height: u32,
}

impl MinimapOptions {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.thumbnail_size > 0,
            "minimap.thumbnail-size must be greater than zero"
        );
        Ok(())
    }
}

impl Default for MinimapOptions {
    fn default() -> Self {
        Self {
            thumbnail_size: 100,
            width: 160,
            height: 130,
        }
    }
}

/// Colours are `#rgb` or `#rrggbb` hex strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ThemeOptions {
    pub background: String,
    pub panel: String,
    pub foreground: String,
    pub muted: String,
    pub accent: String,
    pub overlay: String,
    pub font: Option<String>,
    pub font_size: f32,
}

impl ThemeOptions {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("background", &self.background),
            ("panel", &self.panel),
            ("foreground", &self.foreground),
            ("muted", &self.muted),
            ("accent", &self.accent),
            ("overlay", &self.overlay),
        ] {
            ensure!(
                Srgb::<u8>::from_str(value.trim()).is_ok(),
                "theme.{name} is not a hex colour: {value:?}"
            );
        }
        ensure!(self.font_size > 0.0, "theme.font-size must be positive");
        Ok(())
    }
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            background: "#1b1d23".to_string(),
            panel: "#262a33".to_string(),
            foreground: "#e6e8ee".to_string(),
            muted: "#7d8594".to_string(),
            accent: "#4f8cc9".to_string(),
            overlay: "#ff0000".to_string(),
            font: None,
            font_size: 14.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AssetOptions {
    /// Directory holding the toolbar icons, looked up by file name.
    pub icons_dir: PathBuf,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            icons_dir: PathBuf::from("assets/icons"),
        }
    }
}
