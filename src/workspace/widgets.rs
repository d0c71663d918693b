//! Widget descriptors and the factory that instantiates them.

use std::sync::Arc;

use tracing::debug;

use crate::buffer::ImageBuffer;
use crate::config::Configuration;
use crate::events::{EventSender, ToolKind};
use crate::geometry::Size;
use crate::processing::histogram::HistogramModel;
use crate::view::minimap::ZoomMinimap;
use crate::view::surface::RenderSurface;
use crate::workspace::histogram_panel::HistogramPanel;
use crate::workspace::zoom_panel::ZoomPanel;

/// A widget kind plus the parameters needed to build it. Toolbar drags carry
/// one of these until the drop point is known.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetDescriptor {
    Histogram {
        bin_count: usize,
        log_x: bool,
        log_y: bool,
        preview_samples: usize,
        preview_seed: Option<u64>,
        size: Size,
    },
    ZoomView {
        thumbnail_size: u32,
        size: Size,
    },
    Placeholder {
        label: String,
        size: Size,
    },
}

impl WidgetDescriptor {
    /// Descriptor for a toolbar tool. Tools that act instead of adding a
    /// widget (opening a file) have none.
    pub fn for_tool(tool: ToolKind, cfg: &Configuration) -> Option<Self> {
        match tool {
            ToolKind::ImageOpen => None,
            ToolKind::Histogram => Some(Self::Histogram {
                bin_count: cfg.histogram.bins,
                log_x: cfg.histogram.log_x,
                log_y: cfg.histogram.log_y,
                preview_samples: cfg.histogram.preview_samples,
                preview_seed: cfg.histogram.preview_seed,
                size: Size::new(cfg.histogram.width, cfg.histogram.height),
            }),
            ToolKind::ZoomView => Some(Self::ZoomView {
                thumbnail_size: cfg.minimap.thumbnail_size,
                size: Size::new(cfg.minimap.width, cfg.minimap.height),
            }),
        }
    }

    /// Descriptor for a widget named in the configuration. Unknown names
    /// become a labelled placeholder.
    pub fn from_name(name: &str, cfg: &Configuration) -> Self {
        let tool = match name.trim() {
            "histogram" => Some(ToolKind::Histogram),
            "zoom-view" | "zoom" => Some(ToolKind::ZoomView),
            _ => None,
        };
        tool.and_then(|tool| Self::for_tool(tool, cfg))
            .unwrap_or_else(|| Self::Placeholder {
                label: format!("Placeholder Widget ({})", name.trim()),
                size: Size::new(cfg.workspace.placeholder_width, cfg.workspace.placeholder_height),
            })
    }

    pub fn size(&self) -> Size {
        match self {
            Self::Histogram { size, .. } | Self::ZoomView { size, .. } | Self::Placeholder { size, .. } => *size,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Histogram { .. } => "histogram",
            Self::ZoomView { .. } => "zoom-view",
            Self::Placeholder { .. } => "placeholder",
        }
    }
}

/// What a new widget may need from the rest of the window.
pub struct WidgetContext<'a> {
    pub events: &'a EventSender,
    pub image: Option<&'a Arc<ImageBuffer>>,
    pub surface: &'a RenderSurface,
}

pub enum WorkspaceWidget {
    Histogram(HistogramPanel),
    ZoomView(ZoomPanel),
    Placeholder(String),
}

impl WorkspaceWidget {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Histogram(_) => "histogram",
            Self::ZoomView(_) => "zoom-view",
            Self::Placeholder(_) => "placeholder",
        }
    }

    pub fn as_histogram_mut(&mut self) -> Option<&mut HistogramPanel> {
        match self {
            Self::Histogram(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn as_zoom_mut(&mut self) -> Option<&mut ZoomPanel> {
        match self {
            Self::ZoomView(panel) => Some(panel),
            _ => None,
        }
    }
}

/// Instantiate the widget a descriptor names. A histogram starts on the
/// loaded image when there is one and on the random preview otherwise.
pub fn build_widget(descriptor: &WidgetDescriptor, ctx: &WidgetContext<'_>) -> WorkspaceWidget {
    debug!(kind = descriptor.kind_name(), "building workspace widget");
    match descriptor {
        WidgetDescriptor::Histogram {
            bin_count,
            log_x,
            log_y,
            preview_samples,
            preview_seed,
            ..
        } => {
            let model = match ctx.image {
                Some(image) => {
                    let mut model = HistogramModel::new(*bin_count, *log_x, *log_y, ctx.events.clone());
                    model.set_image(image);
                    model
                }
                None => {
                    let mut model = HistogramModel::preview(
                        *preview_samples,
                        *preview_seed,
                        *bin_count,
                        ctx.events.clone(),
                    );
                    if *log_x {
                        model.set_log_x(true);
                    }
                    if *log_y {
                        model.set_log_y(true);
                    }
                    model
                }
            };
            WorkspaceWidget::Histogram(HistogramPanel::new(model))
        }
        WidgetDescriptor::ZoomView { thumbnail_size, .. } => {
            let mut minimap = ZoomMinimap::new(*thumbnail_size);
            minimap.refresh(ctx.surface);
            WorkspaceWidget::ZoomView(ZoomPanel::new(minimap))
        }
        WidgetDescriptor::Placeholder { label, .. } => WorkspaceWidget::Placeholder(label.clone()),
    }
}
