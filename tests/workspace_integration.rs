use image_mage::config::Configuration;
use image_mage::events::{ToolKind, UiEvent, event_channel};
use image_mage::geometry::{Point, Rect};
use image_mage::view::interaction::{Buttons, PointerButton, PointerEvents};
use image_mage::view::surface::RenderSurface;
use image_mage::workspace::board::Workspace;
use image_mage::workspace::toolbar::Toolbar;
use image_mage::workspace::widgets::{WidgetContext, WidgetDescriptor};

#[test]
fn dragging_tools_onto_the_workspace() {
    let cfg = Configuration::default();
    let (tx, rx) = event_channel();
    let surface = RenderSurface::new(cfg.viewer.surface_settings(), tx.clone());
    let mut workspace = Workspace::new(Rect::new(440, 36, 500, 534), &cfg.workspace);
    let mut toolbar = Toolbar::new(tx.clone());
    toolbar.set_area(Rect::new(940, 36, 52, 534));

    for (tool, target) in [
        (ToolKind::Histogram, Point::new(600.0, 100.0)),
        (ToolKind::ZoomView, Point::new(445.0, 40.0)),
    ] {
        let index = toolbar.tools().iter().position(|t| *t == tool).unwrap();
        let start = toolbar.button_rect(index).center();
        toolbar.on_pointer_down(PointerButton::Left, start);
        toolbar.on_pointer_move(target, Buttons::LEFT);
        let drop = toolbar.on_pointer_up(PointerButton::Left, target).unwrap();
        assert!(workspace.area().contains(drop.at));
        let descriptor = WidgetDescriptor::for_tool(drop.tool, &cfg).unwrap();
        let ctx = WidgetContext {
            events: &tx,
            image: None,
            surface: &surface,
        };
        workspace.drop_widget(&descriptor, drop.at, &ctx);
    }

    // the zoom view was dropped on the first cell, ahead of the histogram
    let kinds: Vec<_> = workspace.widgets().map(|(_, w)| w.kind_name()).collect();
    assert_eq!(kinds, vec!["zoom-view", "histogram"]);
    assert!(
        rx.try_iter()
            .all(|e| !matches!(e, UiEvent::ToolSelected(_)))
    );
}

#[test]
fn widgets_never_overflow_the_grid_width() {
    let cfg = Configuration::default();
    let (tx, _rx) = event_channel();
    let surface = RenderSurface::new(cfg.viewer.surface_settings(), tx.clone());
    let area = Rect::new(0, 0, 500, 600);
    let mut workspace = Workspace::new(area, &cfg.workspace);
    let ctx = WidgetContext {
        events: &tx,
        image: None,
        surface: &surface,
    };
    for _ in 0..4 {
        workspace.add(&WidgetDescriptor::for_tool(ToolKind::Histogram, &cfg).unwrap(), &ctx);
    }
    for (rect, _) in workspace.widgets() {
        assert!(rect.right() <= area.right(), "{rect:?} overflows");
    }
    let tops: Vec<_> = workspace.widgets().map(|(r, _)| r.y).collect();
    assert!(tops.windows(2).all(|w| w[0] < w[1]), "{tops:?}");
}
