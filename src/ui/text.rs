//! Text overlay drawn with glyphon on top of the composed frame.

use std::path::PathBuf;

use fontdb::{Database, Family, Query};
use glyphon::cosmic_text::Align;
use glyphon::{
    Attrs, Buffer, Cache, FamilyOwned, FontSystem, Metrics, Resolution, Shaping, SwashCache,
    TextArea, TextAtlas, TextBounds, TextRenderer, Viewport, Wrap,
};
use image::Rgba;
use tracing::warn;

use crate::geometry::{Rect, Size};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// One line of text, vertically centred inside `bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub bounds: Rect,
    pub color: Rgba<u8>,
    pub size: f32,
    pub align: LabelAlign,
}

impl Label {
    pub fn new(text: impl Into<String>, bounds: Rect, color: Rgba<u8>, size: f32) -> Self {
        Self {
            text: text.into(),
            bounds,
            color,
            size,
            align: LabelAlign::Left,
        }
    }

    pub fn aligned(mut self, align: LabelAlign) -> Self {
        self.align = align;
        self
    }

    fn line_height(&self) -> f32 {
        self.size * 1.2
    }

    fn top(&self) -> f32 {
        self.bounds.y as f32 + (self.bounds.height as f32 - self.line_height()).max(0.0) / 2.0
    }
}

pub struct TextLayer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    renderer: TextRenderer,
    family: FamilyOwned,
    buffers: Vec<Buffer>,
}

impl TextLayer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        font: Option<&str>,
    ) -> Self {
        let mut font_system = FontSystem::new();
        initialize_font_database(font_system.db_mut());
        let family = resolve_font_family(&font_system, font);

        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        let renderer = TextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache: SwashCache::new(),
            viewport,
            atlas,
            renderer,
            family,
            buffers: Vec::new(),
        }
    }

    /// Shape and upload this frame's labels.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, size: Size, labels: &[Label]) {
        self.viewport.update(
            queue,
            Resolution {
                width: size.width,
                height: size.height,
            },
        );

        self.buffers.clear();
        for label in labels {
            let metrics = Metrics::new(label.size, label.line_height());
            let mut buffer = Buffer::new(&mut self.font_system, metrics);
            buffer.set_wrap(&mut self.font_system, Wrap::None);
            buffer.set_size(
                &mut self.font_system,
                Some(label.bounds.width as f32),
                Some(label.bounds.height.max(1) as f32),
            );
            let attrs = Attrs::new().family(self.family.as_family());
            buffer.set_text(&mut self.font_system, &label.text, &attrs, Shaping::Advanced, None);
            let align = match label.align {
                LabelAlign::Left => Align::Left,
                LabelAlign::Center => Align::Center,
                LabelAlign::Right => Align::Right,
            };
            for line in &mut buffer.lines {
                line.set_align(Some(align));
            }
            buffer.shape_until_scroll(&mut self.font_system, false);
            self.buffers.push(buffer);
        }

        let areas: Vec<TextArea<'_>> = labels
            .iter()
            .zip(self.buffers.iter())
            .map(|(label, buffer)| TextArea {
                buffer,
                left: label.bounds.x as f32,
                top: label.top(),
                scale: 1.0,
                bounds: TextBounds {
                    left: label.bounds.x,
                    top: label.bounds.y,
                    right: label.bounds.right(),
                    bottom: label.bounds.bottom(),
                },
                default_color: Theme::text_color(label.color),
                custom_glyphs: &[],
            })
            .collect();

        if let Err(err) = self.renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        ) {
            warn!(error = %err, "text prepare failed");
        }
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if let Err(err) = self.renderer.render(&self.atlas, &self.viewport, pass) {
            warn!(error = %err, "text render failed");
        }
    }

    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}

fn initialize_font_database(db: &mut Database) {
    db.load_system_fonts();
    let bundled_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if bundled_path.exists() {
        db.load_fonts_dir(&bundled_path);
    }
}

fn resolve_font_family(font_system: &FontSystem, requested: Option<&str>) -> FamilyOwned {
    let db = font_system.db();
    if let Some(name) = requested.map(str::trim).filter(|s| !s.is_empty()) {
        if font_available(db, name) {
            return FamilyOwned::Name(name.into());
        }
        warn!(font = %name, "configured font not installed");
    }

    if font_available(db, "DejaVu Sans") {
        FamilyOwned::Name("DejaVu Sans".into())
    } else {
        FamilyOwned::SansSerif
    }
}

fn font_available(db: &Database, name: &str) -> bool {
    let query = Query {
        families: &[Family::Name(name)],
        ..Default::default()
    };
    db.query(&query).is_some()
}
