use std::str::FromStr;

use image::Rgba;
use palette::{Srgb, Srgba};
use tracing::warn;

use crate::config::{Configuration, ThemeOptions};

/// Colours and font resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Rgba<u8>,
    pub panel: Rgba<u8>,
    pub foreground: Rgba<u8>,
    pub muted: Rgba<u8>,
    pub accent: Rgba<u8>,
    pub overlay: Rgba<u8>,
    pub font: Option<String>,
    pub font_size: f32,
}

impl Theme {
    pub fn resolve(cfg: &Configuration) -> Self {
        let opts = &cfg.theme;
        let defaults = ThemeOptions::default();
        let pick = |value: &str, fallback: &str| {
            parse_hex_color(value).unwrap_or_else(|| {
                warn!(value, "theme colour invalid; using default");
                parse_hex_color(fallback).unwrap_or(Rgba([0, 0, 0, 255]))
            })
        };
        Self {
            background: pick(&opts.background, &defaults.background),
            panel: pick(&opts.panel, &defaults.panel),
            foreground: pick(&opts.foreground, &defaults.foreground),
            muted: pick(&opts.muted, &defaults.muted),
            accent: pick(&opts.accent, &defaults.accent),
            overlay: pick(&opts.overlay, &defaults.overlay),
            font: opts.font.clone(),
            font_size: opts.font_size,
        }
    }

    pub fn text_color(color: Rgba<u8>) -> glyphon::Color {
        glyphon::Color::rgba(color[0], color[1], color[2], color[3])
    }
}

/// `#rgb`, `#rrggbb` or the same with an alpha digit pair.
pub fn parse_hex_color(input: &str) -> Option<Rgba<u8>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(rgba) = Srgba::<u8>::from_str(trimmed) {
        return Some(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha]));
    }
    let rgb = Srgb::<u8>::from_str(trimmed).ok()?;
    Some(Rgba([rgb.red, rgb.green, rgb.blue, 255]))
}

/// Alpha-scaled copy of a colour.
pub fn with_alpha(color: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], alpha])
}
