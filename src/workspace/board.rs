//! The workspace: a grid of tool widgets beside the image canvas.

use std::sync::Arc;

use tracing::{debug, info};

use crate::buffer::ImageBuffer;
use crate::config::WorkspaceOptions;
use crate::error::Error;
use crate::geometry::{Point, Rect};
use crate::view::interaction::{Buttons, PointerButton, PointerEvents};
use crate::view::surface::RenderSurface;
use crate::workspace::grid::{WidgetGridCell, WorkspaceGrid};
use crate::workspace::histogram_panel::TextEdit;
use crate::workspace::widgets::{WidgetContext, WidgetDescriptor, WorkspaceWidget, build_widget};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkspaceAction {
    /// A zoom widget's slider asks for an absolute canvas scale.
    SetScale(f64),
}

pub struct Workspace {
    area: Rect,
    grid: WorkspaceGrid<WorkspaceWidget>,
    active: Option<usize>,
}

impl Workspace {
    pub fn new(area: Rect, opts: &WorkspaceOptions) -> Self {
        Self {
            area,
            grid: WorkspaceGrid::new(area.size(), opts.columns, opts.rows),
            active: None,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Move/resize the workspace. The grid is rebuilt from scratch.
    pub fn set_area(&mut self, area: Rect) {
        let resized = area.size() != self.area.size();
        self.area = area;
        if resized {
            self.grid.resize(area.size());
        }
    }

    pub fn add(&mut self, descriptor: &WidgetDescriptor, ctx: &WidgetContext<'_>) -> WidgetGridCell {
        let widget = build_widget(descriptor, ctx);
        let cell = self.grid.place(widget, descriptor.size());
        info!(kind = descriptor.kind_name(), ?cell, "widget added to workspace");
        cell
    }

    /// Insert a widget dropped at `at` (window coordinates).
    pub fn drop_widget(&mut self, descriptor: &WidgetDescriptor, at: Point, ctx: &WidgetContext<'_>) -> usize {
        let index = self.grid.drop_index(self.to_local(at));
        let widget = build_widget(descriptor, ctx);
        self.grid.insert(index, widget, descriptor.size());
        info!(kind = descriptor.kind_name(), index, "widget dropped on workspace");
        index
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Widgets with their rects in window coordinates.
    pub fn widgets(&self) -> impl Iterator<Item = (Rect, &WorkspaceWidget)> {
        self.grid
            .items()
            .iter()
            .map(|item| (self.to_window(self.grid.cell_rect(item.cell)), &item.widget))
    }

    pub fn widget_rect(&self, index: usize) -> Option<Rect> {
        self.grid
            .items()
            .get(index)
            .map(|item| self.to_window(self.grid.cell_rect(item.cell)))
    }

    pub fn grid(&self) -> &WorkspaceGrid<WorkspaceWidget> {
        &self.grid
    }

    /// Feed a newly opened image to every histogram.
    pub fn image_opened(&mut self, buffer: &Arc<ImageBuffer>) {
        for item in self.grid.items_mut() {
            if let Some(panel) = item.widget.as_histogram_mut() {
                panel.model_mut().set_image(buffer);
            }
        }
    }

    /// Refresh every zoom widget from the canvas.
    pub fn sync_view(&mut self, surface: &RenderSurface) {
        for item in self.grid.items_mut() {
            if let Some(panel) = item.widget.as_zoom_mut() {
                panel.minimap_mut().refresh(surface);
            }
        }
    }

    /// Route a key edit to the histogram whose bin entry has focus.
    /// `None` when no entry is focused.
    pub fn edit_bins(&mut self, edit: TextEdit) -> Option<Result<(), Error>> {
        self.grid
            .items_mut()
            .iter_mut()
            .filter_map(|item| item.widget.as_histogram_mut())
            .find(|panel| panel.entry_focused())
            .map(|panel| panel.edit_bins(edit))
    }

    pub fn has_focused_entry(&self) -> bool {
        self.grid
            .items()
            .iter()
            .any(|item| matches!(&item.widget, WorkspaceWidget::Histogram(p) if p.entry_focused()))
    }

    pub fn unfocus(&mut self) {
        for item in self.grid.items_mut() {
            if let Some(panel) = item.widget.as_histogram_mut() {
                panel.unfocus();
            }
        }
    }

    fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - f64::from(self.area.x), p.y - f64::from(self.area.y))
    }

    fn to_window(&self, r: Rect) -> Rect {
        Rect::new(r.x + self.area.x, r.y + self.area.y, r.width, r.height)
    }
}

impl PointerEvents for Workspace {
    type Action = WorkspaceAction;

    fn on_pointer_down(&mut self, button: PointerButton, pos: Point) -> Option<WorkspaceAction> {
        if button != PointerButton::Left {
            return None;
        }
        self.unfocus();
        let index = self.grid.hit_test(self.to_local(pos))?;
        let rect = self.widget_rect(index)?;
        self.active = Some(index);
        debug!(index, "workspace widget pressed");
        match &mut self.grid.items_mut()[index].widget {
            WorkspaceWidget::Histogram(panel) => {
                panel.press(rect, pos);
                None
            }
            WorkspaceWidget::ZoomView(panel) => panel.press(rect, pos).map(WorkspaceAction::SetScale),
            WorkspaceWidget::Placeholder(_) => None,
        }
    }

    fn on_pointer_move(&mut self, pos: Point, buttons: Buttons) -> Option<WorkspaceAction> {
        if !buttons.left {
            return None;
        }
        let index = self.active?;
        let rect = self.widget_rect(index)?;
        match &mut self.grid.items_mut()[index].widget {
            WorkspaceWidget::Histogram(panel) => {
                panel.drag_to(rect, pos);
                None
            }
            WorkspaceWidget::ZoomView(panel) => panel.drag_to(rect, pos).map(WorkspaceAction::SetScale),
            WorkspaceWidget::Placeholder(_) => None,
        }
    }

    fn on_pointer_up(&mut self, button: PointerButton, _pos: Point) -> Option<WorkspaceAction> {
        if button != PointerButton::Left {
            return None;
        }
        if let Some(index) = self.active.take()
            && let Some(item) = self.grid.items_mut().get_mut(index)
        {
            match &mut item.widget {
                WorkspaceWidget::Histogram(panel) => panel.release(),
                WorkspaceWidget::ZoomView(panel) => panel.release(),
                WorkspaceWidget::Placeholder(_) => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::events::{EventSender, ToolKind, event_channel};
    use crate::geometry::Size;
    use crate::view::surface::SurfaceSettings;

    fn setup() -> (Workspace, RenderSurface, EventSender, Configuration) {
        let (tx, _rx) = event_channel();
        let cfg = Configuration::default();
        let ws = Workspace::new(Rect::new(500, 20, 500, 560), &cfg.workspace);
        let surface = RenderSurface::new(SurfaceSettings::default(), tx.clone());
        (ws, surface, tx, cfg)
    }

    #[test]
    fn dropped_widgets_are_inserted_in_reading_order() {
        let (mut ws, surface, tx, cfg) = setup();
        let ctx = WidgetContext {
            events: &tx,
            image: None,
            surface: &surface,
        };
        let zoom = WidgetDescriptor::for_tool(ToolKind::ZoomView, &cfg).unwrap();
        let hist = WidgetDescriptor::for_tool(ToolKind::Histogram, &cfg).unwrap();
        ws.add(&zoom, &ctx);
        let index = ws.drop_widget(&hist, Point::new(505.0, 25.0), &ctx);
        assert_eq!(index, 0);
        let kinds: Vec<_> = ws.widgets().map(|(_, w)| w.kind_name()).collect();
        assert_eq!(kinds, vec!["histogram", "zoom-view"]);
        let (first, _) = ws.widgets().next().unwrap();
        assert_eq!((first.x, first.y), (500, 20));
    }

    #[test]
    fn opened_image_reaches_histograms() {
        let (mut ws, surface, tx, cfg) = setup();
        let ctx = WidgetContext {
            events: &tx,
            image: None,
            surface: &surface,
        };
        ws.add(&WidgetDescriptor::for_tool(ToolKind::Histogram, &cfg).unwrap(), &ctx);
        let image = Arc::new(ImageBuffer::gray8(2, 1, vec![10, 20]).unwrap());
        ws.image_opened(&image);
        let (_, widget) = ws.widgets().next().unwrap();
        let WorkspaceWidget::Histogram(panel) = widget else {
            panic!("expected histogram");
        };
        assert_eq!(panel.model().stats().max, 20.0);
    }

    #[test]
    fn zoom_slider_press_requests_scale() {
        let (mut ws, surface, tx, cfg) = setup();
        let ctx = WidgetContext {
            events: &tx,
            image: None,
            surface: &surface,
        };
        ws.add(&WidgetDescriptor::for_tool(ToolKind::ZoomView, &cfg).unwrap(), &ctx);
        let rect = ws.widget_rect(0).unwrap();
        let top = Point::new(f64::from(rect.right()) - 2.0, f64::from(rect.y));
        assert_eq!(
            ws.on_pointer_down(PointerButton::Left, top),
            Some(WorkspaceAction::SetScale(2.0))
        );
        ws.on_pointer_up(PointerButton::Left, top);
    }

    #[test]
    fn key_edits_need_a_focused_entry() {
        let (mut ws, surface, tx, cfg) = setup();
        let ctx = WidgetContext {
            events: &tx,
            image: None,
            surface: &surface,
        };
        ws.add(&WidgetDescriptor::for_tool(ToolKind::Histogram, &cfg).unwrap(), &ctx);
        assert!(ws.edit_bins(TextEdit::Backspace).is_none());
        let rect = ws.widget_rect(0).unwrap();
        let entry = Point::new(
            f64::from(rect.x) + f64::from(rect.width) * 0.8,
            f64::from(rect.y) + f64::from(rect.height) * 0.9,
        );
        ws.on_pointer_down(PointerButton::Left, entry);
        assert!(ws.has_focused_entry());
        assert!(matches!(ws.edit_bins(TextEdit::Backspace), Some(Ok(()))));
        ws.unfocus();
        assert!(!ws.has_focused_entry());
    }

    #[test]
    fn resizing_rebuilds_grid() {
        let (mut ws, _surface, _tx, _cfg) = setup();
        ws.set_area(Rect::new(400, 20, 600, 560));
        assert_eq!(ws.grid().size(), Size::new(600, 560));
        assert_eq!(ws.grid().columns(), 120);
    }
}
