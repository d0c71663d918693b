use std::path::PathBuf;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::buffer::ImageBuffer;
use crate::geometry::Vector;

/// Outbound notifications from the viewer components. Every component gets a
/// clone of the same sender; the application drains the receiver once per
/// event-loop turn.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Histogram thresholds (re)published. Sent on every bin rebuild even
    /// when the values did not move, so consumers must treat it as idempotent.
    ThresholdsChanged { low: f64, high: f64 },
    /// The canvas scale or pan changed.
    TransformChanged { scale: f64, pan: Vector },
    /// A wheel zoom was applied; `delta` is the raw wheel delta.
    ZoomChanged { delta: f64 },
    /// A new image replaced the previous one.
    ImageOpened {
        path: PathBuf,
        buffer: Arc<ImageBuffer>,
    },
    /// A toolbar tool was activated.
    ToolSelected(ToolKind),
    /// Something the user should see in the status line.
    Status(StatusMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    ImageOpen,
    Histogram,
    ZoomView,
}

impl ToolKind {
    pub const ALL: [Self; 3] = [Self::ImageOpen, Self::Histogram, Self::ZoomView];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ImageOpen => "Open Image File",
            Self::Histogram => "Histogram",
            Self::ZoomView => "Zoom",
        }
    }

    pub const fn icon_file(self) -> &'static str {
        match self {
            Self::ImageOpen => "image.png",
            Self::Histogram => "histogram.png",
            Self::ZoomView => "magnifying-glass.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

pub type EventSender = Sender<UiEvent>;
pub type EventReceiver = Receiver<UiEvent>;

/// Single outbound channel shared by all components of one window.
pub fn event_channel() -> (EventSender, EventReceiver) {
    crossbeam_channel::unbounded()
}
