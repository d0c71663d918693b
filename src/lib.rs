pub mod buffer;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod loader;
pub mod processing {
    pub mod histogram;
    pub mod layout;
    pub mod levels;
}
pub mod view {
    pub mod interaction;
    pub mod minimap;
    pub mod surface;
    pub mod transform;
}
pub mod window {
    pub mod chrome;
    pub mod grips;
}
pub mod workspace {
    pub mod board;
    pub mod grid;
    pub mod histogram_panel;
    pub mod toolbar;
    pub mod widgets;
    pub mod zoom_panel;
}
pub mod ui {
    pub mod app;
    pub mod canvas;
    pub mod compose;
    pub mod gpu;
    pub mod icons;
    pub mod layout;
    pub mod menu;
    pub mod text;
    pub mod theme;
}

pub use ui::app::run;
