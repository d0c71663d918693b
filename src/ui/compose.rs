//! Paints one frame of the window into the software canvas and collects the
//! text labels the glyphon layer draws on top.

use image::Rgba;

use crate::events::{StatusLevel, StatusMessage, ToolKind};
use crate::geometry::{Point, Rect, RectF};
use crate::ui::canvas::Canvas;
use crate::ui::icons::{ToolIcons, fallback_glyph};
use crate::ui::layout::AppLayout;
use crate::ui::menu::{FileMenu, MenuEntry};
use crate::ui::text::{Label, LabelAlign};
use crate::ui::theme::{Theme, with_alpha};
use crate::view::surface::RenderSurface;
use crate::workspace::board::Workspace;
use crate::workspace::histogram_panel::{HistogramLayout, HistogramPanel};
use crate::workspace::toolbar::{BUTTON_SIZE, Toolbar};
use crate::workspace::widgets::WorkspaceWidget;
use crate::workspace::zoom_panel::{ZoomLayout, ZoomPanel};

/// Everything a frame is painted from.
pub struct FrameView<'a> {
    pub layout: &'a AppLayout,
    pub theme: &'a Theme,
    pub title: &'a str,
    pub surface: &'a RenderSurface,
    pub workspace: &'a Workspace,
    pub toolbar: &'a Toolbar,
    pub menu: &'a FileMenu,
    pub icons: &'a ToolIcons,
    pub status: Option<&'a StatusMessage>,
}

pub fn compose(canvas: &mut Canvas, view: &FrameView<'_>) -> Vec<Label> {
    let theme = view.theme;
    let mut labels = Vec::new();

    canvas.clear(theme.background);
    draw_image(canvas, &mut labels, view);
    draw_workspace(canvas, &mut labels, view);
    draw_toolbar(canvas, &mut labels, view);
    draw_title_bar(canvas, &mut labels, view);
    draw_status_bar(canvas, &mut labels, view);
    canvas.stroke_rect(view.layout.window, theme.muted, 1);

    if let Some((tool, at)) = view.toolbar.drag_preview() {
        let half = (BUTTON_SIZE / 2) as i32;
        let r = Rect::new(at.x as i32 - half, at.y as i32 - half, BUTTON_SIZE, BUTTON_SIZE);
        canvas.fill_rect(r, with_alpha(theme.accent, 96));
        draw_tool_icon(canvas, &mut labels, view.icons, tool, r, theme);
    }

    if view.menu.is_open() {
        let popup = view.menu.popup_rect();
        labels.retain(|l| l.bounds.intersect(&popup).is_none());
        draw_menu(canvas, &mut labels, view.menu, theme);
    }
    labels
}

fn draw_image(canvas: &mut Canvas, labels: &mut Vec<Label>, view: &FrameView<'_>) {
    let area = view.layout.canvas;
    let surface = view.surface;
    let Some(display) = surface.display() else {
        labels.push(
            Label::new("Open an image (Ctrl+O)", area, view.theme.muted, view.theme.font_size)
                .aligned(LabelAlign::Center),
        );
        return;
    };
    canvas.fill_with(area, |x, y| {
        let local = Point::new(f64::from(x - area.x) + 0.5, f64::from(y - area.y) + 0.5);
        let s = surface.view_to_scene(local);
        if s.x < 0.0 || s.y < 0.0 {
            return None;
        }
        let (sx, sy) = (s.x as u32, s.y as u32);
        (sx < display.width && sy < display.height).then(|| {
            let [r, g, b] = display.rgb_at(sx, sy);
            Rgba([r, g, b, 255])
        })
    });
}

fn draw_workspace(canvas: &mut Canvas, labels: &mut Vec<Label>, view: &FrameView<'_>) {
    let theme = view.theme;
    let area = view.layout.workspace;
    canvas.fill_rect(area, with_alpha(theme.panel, 128));
    if view.workspace.is_empty() {
        labels.push(
            Label::new("Drag a tool here", area, theme.muted, theme.font_size).aligned(LabelAlign::Center),
        );
    }
    for (rect, widget) in view.workspace.widgets() {
        canvas.fill_rect(rect, theme.panel);
        canvas.stroke_rect(rect, theme.muted, 1);
        match widget {
            WorkspaceWidget::Histogram(panel) => draw_histogram(canvas, labels, rect, panel, theme),
            WorkspaceWidget::ZoomView(panel) => draw_zoom(canvas, labels, rect, panel, theme),
            WorkspaceWidget::Placeholder(text) => labels.push(
                Label::new(text.clone(), rect, theme.foreground, theme.font_size).aligned(LabelAlign::Center),
            ),
        }
    }
}

fn draw_histogram(canvas: &mut Canvas, labels: &mut Vec<Label>, rect: Rect, panel: &HistogramPanel, theme: &Theme) {
    let layout = HistogramLayout::new(rect);
    let model = panel.model();
    let small = theme.font_size * 0.85;

    let plot = layout.plot;
    canvas.fill_rect(plot, theme.background);
    let bins = model.bins();
    let heights = bins.bar_heights();
    let top = heights.iter().copied().fold(0.0_f64, f64::max);
    if let (Some(&first), Some(&last)) = (bins.edges.first(), bins.edges.last())
        && top > 0.0
    {
        let axis = |v: f64| {
            if bins.log_x {
                v.max(f64::MIN_POSITIVE).log10()
            } else {
                v
            }
        };
        let (a0, a1) = (axis(first), axis(last));
        let span = a1 - a0;
        let thresholds = model.thresholds();
        if span > 0.0 {
            let (px, pw) = (f64::from(plot.x), f64::from(plot.width));
            let ph = f64::from(plot.height).max(2.0) - 2.0;
            for (i, h) in heights.iter().enumerate() {
                let (lo, hi) = (bins.edges[i], bins.edges[i + 1]);
                let x0 = px + (axis(lo) - a0) / span * pw;
                let x1 = px + (axis(hi) - a0) / span * pw;
                let bar = h / top * ph;
                let center = (lo + hi) / 2.0;
                let color = if center >= thresholds.low && center <= thresholds.high {
                    theme.accent
                } else {
                    theme.muted
                };
                canvas.fill_rect_f(
                    RectF::new(x0, f64::from(plot.bottom()) - 1.0 - bar, (x1 - x0 - 1.0).max(1.0), bar),
                    color,
                );
            }
        }
    }
    canvas.stroke_rect(plot, theme.muted, 1);

    let track = layout.slider;
    let mid = f64::from(track.y) + f64::from(track.height) / 3.0;
    canvas.fill_rect_f(RectF::new(f64::from(track.x), mid - 2.0, f64::from(track.width), 4.0), theme.muted);
    let slider = *model.slider();
    let (lo_x, hi_x) = (panel.handle_x(&layout, slider.low), panel.handle_x(&layout, slider.high));
    canvas.fill_rect_f(RectF::new(lo_x, mid - 2.0, hi_x - lo_x, 4.0), theme.accent);
    let radius = (f64::from(track.height) / 5.0).clamp(3.0, 8.0);
    canvas.fill_circle(lo_x, mid, radius, theme.foreground);
    canvas.fill_circle(hi_x, mid, radius, theme.foreground);
    let value_row = Rect::new(
        track.x,
        (mid + radius) as i32,
        track.width,
        (track.bottom() - (mid + radius) as i32).max(0) as u32,
    );
    labels.push(Label::new(format_value(slider.low), value_row, theme.muted, small));
    labels.push(Label::new(format_value(slider.high), value_row, theme.muted, small).aligned(LabelAlign::Right));

    draw_checkbox(canvas, labels, layout.log_x, model.log_x(), "log(x)", theme);
    draw_checkbox(canvas, labels, layout.log_y, model.log_y(), "log(y)", theme);

    let bins_rect = layout.bins;
    let caption_w = (f64::from(bins_rect.width) * 0.4).round() as u32;
    labels.push(Label::new(
        "bins:",
        Rect::new(bins_rect.x, bins_rect.y, caption_w, bins_rect.height),
        theme.foreground,
        theme.font_size,
    ));
    let entry = Rect::new(
        bins_rect.x + caption_w as i32,
        bins_rect.y,
        bins_rect.width - caption_w,
        bins_rect.height,
    );
    canvas.fill_rect(entry, theme.background);
    let border = if panel.entry_focused() {
        theme.accent
    } else {
        theme.muted
    };
    canvas.stroke_rect(entry, border, 1);
    // Text that does not match the active count was rejected.
    let text_color = if panel.bin_text() == model.bin_count().to_string() {
        theme.foreground
    } else {
        theme.overlay
    };
    labels.push(Label::new(panel.bin_text(), entry.inset(4, 0, 4, 0), text_color, theme.font_size));
}

fn draw_checkbox(canvas: &mut Canvas, labels: &mut Vec<Label>, rect: Rect, checked: bool, text: &str, theme: &Theme) {
    let side = rect.height.min(14).min(rect.width);
    let bx = Rect::new(rect.x, rect.y + ((rect.height - side) / 2) as i32, side, side);
    canvas.fill_rect(bx, theme.background);
    canvas.stroke_rect(bx, theme.foreground, 1);
    if checked {
        canvas.fill_rect(bx.inset(3, 3, 3, 3), theme.accent);
    }
    let text_x = bx.right() + 6;
    labels.push(Label::new(
        text,
        Rect::new(text_x, rect.y, (rect.right() - text_x).max(0) as u32, rect.height),
        theme.foreground,
        theme.font_size,
    ));
}

fn draw_zoom(canvas: &mut Canvas, labels: &mut Vec<Label>, rect: Rect, panel: &ZoomPanel, theme: &Theme) {
    let layout = ZoomLayout::new(rect.inset(4, 4, 4, 4));
    let minimap = panel.minimap();
    canvas.fill_rect(layout.overview, theme.background);
    match minimap.thumbnail() {
        Some(thumb) => {
            let (ox, oy) = panel.thumbnail_origin(&layout);
            canvas.blit_gray(thumb, ox, oy);
            if let Some(overlay) = minimap.overlay() {
                let bounds = RectF::new(
                    f64::from(ox),
                    f64::from(oy),
                    f64::from(thumb.width()),
                    f64::from(thumb.height()),
                );
                let shifted = RectF::new(f64::from(ox) + overlay.x, f64::from(oy) + overlay.y, overlay.width, overlay.height);
                if let Some(visible) = clip(shifted, bounds) {
                    canvas.stroke_rect_f(visible, theme.overlay, 2);
                }
            }
        }
        None => labels.push(
            Label::new("No image", layout.overview, theme.muted, theme.font_size).aligned(LabelAlign::Center),
        ),
    }

    let track = layout.slider;
    let cx = f64::from(track.x) + f64::from(track.width) / 2.0;
    canvas.fill_rect_f(RectF::new(cx - 1.5, f64::from(track.y), 3.0, f64::from(track.height)), theme.muted);
    let hy = panel.handle_y(&layout);
    let handle_color = if panel.dragging() {
        theme.accent
    } else {
        theme.foreground
    };
    canvas.fill_rect_f(
        RectF::new(f64::from(track.x) + 3.0, hy - 3.0, f64::from(track.width) - 6.0, 6.0),
        handle_color,
    );
    let caption = Rect::new(
        layout.overview.x,
        layout.overview.bottom() - 18,
        layout.overview.width,
        18,
    );
    labels.push(
        Label::new(format!("{}%", minimap.slider()), caption, theme.muted, theme.font_size * 0.85)
            .aligned(LabelAlign::Right),
    );
}

fn draw_toolbar(canvas: &mut Canvas, labels: &mut Vec<Label>, view: &FrameView<'_>) {
    let theme = view.theme;
    canvas.fill_rect(view.layout.toolbar, theme.panel);
    for (i, &tool) in view.toolbar.tools().iter().enumerate() {
        let r = view.toolbar.button_rect(i);
        let fill = if view.toolbar.pressed_tool() == Some(tool) {
            with_alpha(theme.accent, 160)
        } else {
            theme.background
        };
        canvas.fill_rect(r, fill);
        canvas.stroke_rect(r, theme.muted, 1);
        draw_tool_icon(canvas, labels, view.icons, tool, r, theme);
    }
}

fn draw_tool_icon(canvas: &mut Canvas, labels: &mut Vec<Label>, icons: &ToolIcons, tool: ToolKind, r: Rect, theme: &Theme) {
    match icons.get(tool) {
        Some(icon) => {
            let x = r.x + (r.width.saturating_sub(icon.width()) / 2) as i32;
            let y = r.y + (r.height.saturating_sub(icon.height()) / 2) as i32;
            canvas.blit_rgba(icon, x, y);
        }
        None => labels.push(
            Label::new(fallback_glyph(tool), r, theme.foreground, theme.font_size * 1.3).aligned(LabelAlign::Center),
        ),
    }
}

fn draw_title_bar(canvas: &mut Canvas, labels: &mut Vec<Label>, view: &FrameView<'_>) {
    let theme = view.theme;
    let layout = view.layout;
    canvas.fill_rect(layout.title_bar, theme.panel);
    if view.menu.is_open() {
        canvas.fill_rect(layout.menu_button, with_alpha(theme.accent, 160));
    }
    labels.push(
        Label::new("File", layout.menu_button, theme.foreground, theme.font_size).aligned(LabelAlign::Center),
    );
    labels.push(
        Label::new(view.title, layout.title_bar, theme.foreground, theme.font_size).aligned(LabelAlign::Center),
    );

    let close = layout.close_button.inset(9, 9, 9, 9);
    let (l, t) = (f64::from(close.x), f64::from(close.y));
    let (r, b) = (f64::from(close.right()), f64::from(close.bottom()));
    canvas.line((l, t), (r, b), theme.foreground, 2);
    canvas.line((l, b), (r, t), theme.foreground, 2);
}

fn draw_status_bar(canvas: &mut Canvas, labels: &mut Vec<Label>, view: &FrameView<'_>) {
    let theme = view.theme;
    let bar = view.layout.status_bar;
    canvas.fill_rect(bar, theme.panel);
    let text_area = bar.inset(6, 0, 6, 0);
    if let Some(status) = view.status {
        let color = match status.level {
            StatusLevel::Info => theme.foreground,
            StatusLevel::Warning => theme.accent,
            StatusLevel::Error => theme.overlay,
        };
        labels.push(Label::new(status.text.clone(), text_area, color, theme.font_size * 0.9));
    }
    if view.surface.display().is_some() {
        let levels = view.surface.levels();
        let summary = format!(
            "zoom {:.0}%   levels {} - {}",
            view.surface.transform().scale * 100.0,
            format_value(levels.low),
            format_value(levels.high)
        );
        labels.push(Label::new(summary, text_area, theme.muted, theme.font_size * 0.9).aligned(LabelAlign::Right));
    }
}

fn draw_menu(canvas: &mut Canvas, labels: &mut Vec<Label>, menu: &FileMenu, theme: &Theme) {
    let popup = menu.popup_rect();
    canvas.fill_rect(popup, theme.panel);
    canvas.stroke_rect(popup, theme.muted, 1);
    for (i, entry) in menu.entries().iter().enumerate() {
        let r = menu.entry_rect(i);
        match entry {
            MenuEntry::Item { label, shortcut, .. } => {
                if menu.hovered() == Some(i) {
                    canvas.fill_rect(r.inset(1, 0, 1, 0), with_alpha(theme.accent, 160));
                }
                let inner = r.inset(10, 0, 10, 0);
                labels.push(Label::new(*label, inner, theme.foreground, theme.font_size));
                if let Some(keys) = shortcut {
                    labels.push(Label::new(*keys, inner, theme.muted, theme.font_size).aligned(LabelAlign::Right));
                }
            }
            MenuEntry::Separator => {
                let y = r.y + (r.height / 2) as i32;
                canvas.fill_rect(Rect::new(r.x + 6, y, r.width.saturating_sub(12), 1), theme.muted);
            }
        }
    }
}

fn clip(r: RectF, bounds: RectF) -> Option<RectF> {
    let x0 = r.x.max(bounds.x);
    let y0 = r.y.max(bounds.y);
    let x1 = r.right().min(bounds.right());
    let y1 = r.bottom().min(bounds.bottom());
    (x1 > x0 && y1 > y0).then(|| RectF::new(x0, y0, x1 - x0, y1 - y0))
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
