//! The desktop application: a frameless winit window whose content is
//! composed on the CPU and presented through wgpu.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};
use wgpu::{self, SurfaceError};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::{CursorIcon, ResizeDirection, Window, WindowAttributes, WindowId};

use crate::config::Configuration;
use crate::events::{EventReceiver, EventSender, StatusLevel, StatusMessage, ToolKind, UiEvent, event_channel};
use crate::geometry::{Point, Rect, Size};
use crate::loader::{OPEN_DIALOG_FILTERS, load_image};
use crate::ui::canvas::Canvas;
use crate::ui::compose::{FrameView, compose};
use crate::ui::gpu::FramePipeline;
use crate::ui::icons::ToolIcons;
use crate::ui::layout::AppLayout;
use crate::ui::menu::{FileMenu, MenuAction, MenuPress};
use crate::ui::text::TextLayer;
use crate::ui::theme::Theme;
use crate::view::interaction::{Buttons, InteractionController, PointerButton, PointerEvents, ViewAction};
use crate::view::surface::RenderSurface;
use crate::window::chrome::{ChromeAction, WindowChrome};
use crate::window::grips::{CursorShape, Grip};
use crate::workspace::board::{Workspace, WorkspaceAction};
use crate::workspace::histogram_panel::TextEdit;
use crate::workspace::toolbar::{BUTTON_SIZE, ToolDrop, Toolbar};
use crate::workspace::widgets::{WidgetContext, WidgetDescriptor};

/// Component that received the last press and gets the moves and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerTarget {
    Toolbar,
    Workspace,
    Canvas,
}

struct Gpu {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,
    frame: FramePipeline,
    text: TextLayer,
}

struct ImageApp {
    cfg: Configuration,
    initial_image: Option<PathBuf>,
    events: EventSender,
    inbox: EventReceiver,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    theme: Theme,
    layout: AppLayout,
    canvas: Canvas,
    surface: RenderSurface,
    interaction: InteractionController,
    chrome: WindowChrome,
    toolbar: Toolbar,
    workspace: Workspace,
    menu: FileMenu,
    icons: ToolIcons,
    status: Option<StatusMessage>,
    cursor: Point,
    buttons: Buttons,
    modifiers: ModifiersState,
    capture: Option<PointerTarget>,
    pending_redraw: bool,
}

impl ImageApp {
    fn new(cfg: Configuration, initial_image: Option<PathBuf>) -> Self {
        let (events, inbox) = event_channel();
        let size = cfg.window.size();
        let layout = AppLayout::compute(size, &cfg);

        let mut surface = RenderSurface::new(cfg.viewer.surface_settings(), events.clone());
        surface.set_viewport(layout.canvas.size());
        let mut chrome = WindowChrome::new(size, cfg.window.grip_size);
        chrome.set_interactive_regions(interactive_regions(&layout));
        let mut toolbar = Toolbar::new(events.clone());
        toolbar.set_area(layout.toolbar);
        let mut menu = FileMenu::default();
        menu.set_anchor(layout.menu_button);

        let mut workspace = Workspace::new(layout.workspace, &cfg.workspace);
        for name in &cfg.workspace.startup_widgets {
            let descriptor = WidgetDescriptor::from_name(name, &cfg);
            let ctx = WidgetContext {
                events: &events,
                image: None,
                surface: &surface,
            };
            workspace.add(&descriptor, &ctx);
        }

        Self {
            theme: Theme::resolve(&cfg),
            icons: ToolIcons::load(&cfg.assets.icons_dir, BUTTON_SIZE - 8),
            canvas: Canvas::new(size.width, size.height),
            initial_image,
            events,
            inbox,
            window: None,
            gpu: None,
            layout,
            surface,
            interaction: InteractionController::new(),
            chrome,
            toolbar,
            workspace,
            menu,
            status: None,
            cursor: Point::default(),
            buttons: Buttons::NONE,
            modifiers: ModifiersState::empty(),
            capture: None,
            pending_redraw: false,
            cfg,
        }
    }

    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) -> Option<Arc<Window>> {
        if let Some(window) = self.window.as_ref() {
            return Some(window.clone());
        }

        let opts = &self.cfg.window;
        let min = opts.min_size();
        let mut attrs = WindowAttributes::default()
            .with_title(opts.title.clone())
            .with_decorations(false)
            .with_inner_size(PhysicalSize::new(opts.width, opts.height))
            .with_min_inner_size(PhysicalSize::new(min.width, min.height));
        if let Some([x, y]) = opts.position {
            attrs = attrs.with_position(PhysicalPosition::new(x, y));
        }
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                self.window = Some(window.clone());
                Some(window)
            }
            Err(err) => {
                error!(error = %err, "failed to create window");
                None
            }
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> Result<()> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("failed to acquire GPU adapter")?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|fmt| fmt.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("surface reports no texture formats")?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("image-mage-device"),
            required_features: wgpu::Features::empty(),
            required_limits: adapter.limits(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
        }))
        .context("failed to acquire GPU device")?;

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        info!(
            width = config.width,
            height = config.height,
            format = ?config.format,
            "window surface configured",
        );

        let frame = FramePipeline::new(&device, format);
        let text = TextLayer::new(&device, &queue, format, self.theme.font.as_deref());
        self.gpu = Some(Gpu {
            surface,
            config,
            device,
            queue,
            frame,
            text,
        });
        self.relayout(Size::new(size.width, size.height));
        Ok(())
    }

    fn handle_resize(&mut self, new_size: PhysicalSize<u32>) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.config.width = new_size.width.max(1);
            gpu.config.height = new_size.height.max(1);
            gpu.surface.configure(&gpu.device, &gpu.config);
            debug!(
                width = gpu.config.width,
                height = gpu.config.height,
                "window surface resized",
            );
        }
        self.relayout(Size::new(new_size.width, new_size.height));
        self.request_redraw();
    }

    /// Recompute every region for a new window size.
    fn relayout(&mut self, size: Size) {
        if size.is_empty() {
            return;
        }
        self.layout = AppLayout::compute(size, &self.cfg);
        self.canvas.resize(size.width, size.height);
        self.chrome.resize(size);
        self.chrome.set_interactive_regions(interactive_regions(&self.layout));
        self.toolbar.set_area(self.layout.toolbar);
        self.workspace.set_area(self.layout.workspace);
        self.menu.set_anchor(self.layout.menu_button);
        if let Some(ViewAction::Rerender(viewport)) = self.interaction.on_resize(self.layout.canvas.size()) {
            self.surface.set_viewport(viewport);
        }
        self.workspace.sync_view(&self.surface);
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Outdated) | Err(SurfaceError::Lost) => {
                info!("window surface lost; reconfiguring");
                self.handle_resize(window.inner_size());
                return;
            }
            Err(SurfaceError::OutOfMemory) => {
                error!("window surface out of memory; exiting event loop");
                event_loop.exit();
                return;
            }
            Err(SurfaceError::Timeout) => {
                warn!("window surface acquisition timed out");
                return;
            }
            Err(SurfaceError::Other) => {
                warn!("window surface reported an unknown error; retrying");
                self.handle_resize(window.inner_size());
                return;
            }
        };

        let view = FrameView {
            layout: &self.layout,
            theme: &self.theme,
            title: &self.cfg.window.title,
            surface: &self.surface,
            workspace: &self.workspace,
            toolbar: &self.toolbar,
            menu: &self.menu,
            icons: &self.icons,
            status: self.status.as_ref(),
        };
        let labels = compose(&mut self.canvas, &view);
        gpu.frame.upload(&gpu.device, &gpu.queue, self.canvas.image());
        gpu.text.prepare(
            &gpu.device,
            &gpu.queue,
            Size::new(gpu.config.width, gpu.config.height),
            &labels,
        );

        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("image-mage-encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });
            gpu.frame.draw(&mut pass);
            gpu.text.render(&mut pass);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        gpu.text.trim();
        self.pending_redraw = false;
    }

    fn request_redraw(&mut self) {
        self.pending_redraw = true;
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn set_status(&mut self, message: StatusMessage) {
        match message.level {
            StatusLevel::Info => info!(status = %message.text),
            StatusLevel::Warning => warn!(status = %message.text),
            StatusLevel::Error => error!(status = %message.text),
        }
        self.status = Some(message);
    }

    fn show_open_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().set_title(ToolKind::ImageOpen.label());
        for (name, extensions) in OPEN_DIALOG_FILTERS {
            dialog = dialog.add_filter(*name, *extensions);
        }
        match dialog.pick_file() {
            Some(path) => self.open_path(&path),
            None => debug!("open dialog cancelled"),
        }
    }

    /// Load `path`; a failure leaves the current image in place.
    fn open_path(&mut self, path: &Path) {
        match load_image(path) {
            Ok(buffer) => {
                let _ = self.events.send(UiEvent::ImageOpened {
                    path: path.to_path_buf(),
                    buffer: Arc::new(buffer),
                });
            }
            Err(err) => {
                let _ = self
                    .events
                    .send(UiEvent::Status(StatusMessage::error(format!("Could not open image: {err}"))));
            }
        }
    }

    fn add_tool_widget(&mut self, tool: ToolKind) {
        let Some(descriptor) = WidgetDescriptor::for_tool(tool, &self.cfg) else {
            self.show_open_dialog();
            return;
        };
        let ctx = WidgetContext {
            events: &self.events,
            image: self.surface.buffer(),
            surface: &self.surface,
        };
        self.workspace.add(&descriptor, &ctx);
    }

    fn handle_drop(&mut self, drop: ToolDrop) {
        if !self.workspace.area().contains(drop.at) {
            debug!(tool = ?drop.tool, "tool dropped outside the workspace");
            return;
        }
        let Some(descriptor) = WidgetDescriptor::for_tool(drop.tool, &self.cfg) else {
            self.show_open_dialog();
            return;
        };
        let ctx = WidgetContext {
            events: &self.events,
            image: self.surface.buffer(),
            surface: &self.surface,
        };
        self.workspace.drop_widget(&descriptor, drop.at, &ctx);
    }

    /// Apply everything the components published since the last turn.
    fn drain_events(&mut self) -> bool {
        let mut handled = false;
        while let Ok(event) = self.inbox.try_recv() {
            handled = true;
            match event {
                UiEvent::ThresholdsChanged { low, high } => self.surface.set_levels(low, high),
                UiEvent::TransformChanged { .. } | UiEvent::ZoomChanged { .. } => {
                    self.workspace.sync_view(&self.surface);
                }
                UiEvent::ImageOpened { path, buffer } => {
                    self.surface.set_buffer(buffer.clone());
                    self.workspace.image_opened(&buffer);
                    self.workspace.sync_view(&self.surface);
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    self.set_status(StatusMessage::info(format!(
                        "{name}  {}x{}",
                        buffer.width(),
                        buffer.height()
                    )));
                }
                UiEvent::ToolSelected(tool) => self.add_tool_widget(tool),
                UiEvent::Status(message) => self.set_status(message),
            }
        }
        handled
    }

    fn begin_chrome_action(&mut self, action: ChromeAction) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let result = match action {
            ChromeAction::BeginMove => window.drag_window(),
            ChromeAction::BeginResize(grip) => window.drag_resize_window(resize_direction(grip)),
            ChromeAction::SetCursor(shape) => {
                window.set_cursor(cursor_icon(shape));
                Ok(())
            }
        };
        if let Err(err) = result {
            warn!(error = %err, ?action, "window manager refused the request");
        }
    }

    fn on_menu_action(&mut self, event_loop: &ActiveEventLoop, action: MenuAction) {
        match action {
            MenuAction::Open => self.show_open_dialog(),
            MenuAction::Close => {
                info!("close chosen from the file menu");
                event_loop.exit();
            }
        }
    }

    fn canvas_local(&self, p: Point) -> Point {
        let origin = self.layout.canvas;
        Point::new(p.x - f64::from(origin.x), p.y - f64::from(origin.y))
    }

    fn pointer_down(&mut self, event_loop: &ActiveEventLoop, button: PointerButton) {
        let p = self.cursor;
        if button != PointerButton::Left {
            if self.capture == Some(PointerTarget::Canvas) || self.layout.canvas.contains(p) {
                self.interaction.on_pointer_down(button, self.canvas_local(p));
            }
            return;
        }

        if self.menu.is_open() {
            match self.menu.press(p) {
                MenuPress::Chosen(action) => self.on_menu_action(event_loop, action),
                MenuPress::Dismissed | MenuPress::Ignored => {}
            }
            return;
        }
        if self.chrome.grips().hit_test(p).is_some() {
            if let Some(action) = self.chrome.on_pointer_down(button, p) {
                self.begin_chrome_action(action);
            }
            return;
        }
        if self.layout.menu_button.contains(p) {
            self.menu.toggle();
            return;
        }
        if self.layout.close_button.contains(p) {
            info!("close button pressed");
            event_loop.exit();
            return;
        }

        if !self.layout.workspace.contains(p) {
            self.workspace.unfocus();
        }
        if self.layout.toolbar.contains(p) {
            self.toolbar.on_pointer_down(button, p);
            self.capture = Some(PointerTarget::Toolbar);
        } else if self.layout.workspace.contains(p) {
            if let Some(WorkspaceAction::SetScale(scale)) = self.workspace.on_pointer_down(button, p) {
                self.surface.set_scale(scale);
            }
            self.capture = Some(PointerTarget::Workspace);
        } else if self.layout.canvas.contains(p) {
            self.interaction.on_pointer_down(button, self.canvas_local(p));
            self.capture = Some(PointerTarget::Canvas);
        } else if let Some(action) = self.chrome.on_pointer_down(button, p) {
            self.begin_chrome_action(action);
        }
    }

    /// Returns whether the frame needs repainting.
    fn pointer_moved(&mut self, p: Point) -> bool {
        self.cursor = p;
        let mut dirty = false;
        if self.menu.is_open() {
            dirty |= self.menu.hover(p);
        }
        if let Some(action) = self.chrome.on_pointer_move(p, self.buttons) {
            self.begin_chrome_action(action);
        }
        match self.capture {
            Some(PointerTarget::Toolbar) => {
                self.toolbar.on_pointer_move(p, self.buttons);
                dirty |= self.toolbar.drag_preview().is_some();
            }
            Some(PointerTarget::Workspace) => {
                if let Some(WorkspaceAction::SetScale(scale)) = self.workspace.on_pointer_move(p, self.buttons) {
                    self.surface.set_scale(scale);
                }
                dirty = true;
            }
            Some(PointerTarget::Canvas) => {
                let local = self.canvas_local(p);
                if let Some(ViewAction::Pan(delta)) = self.interaction.on_pointer_move(local, self.buttons) {
                    self.surface.apply_pan(delta);
                    dirty = true;
                }
            }
            None => {}
        }
        dirty
    }

    fn pointer_up(&mut self, button: PointerButton) {
        let p = self.cursor;
        if button != PointerButton::Left {
            self.interaction.on_pointer_up(button, self.canvas_local(p));
            return;
        }
        match self.capture.take() {
            Some(PointerTarget::Toolbar) => {
                if let Some(drop) = self.toolbar.on_pointer_up(button, p) {
                    self.handle_drop(drop);
                }
            }
            Some(PointerTarget::Workspace) => {
                self.workspace.on_pointer_up(button, p);
            }
            Some(PointerTarget::Canvas) => {
                self.interaction.on_pointer_up(button, self.canvas_local(p));
            }
            None => {}
        }
    }

    fn wheel(&mut self, delta: MouseScrollDelta) {
        if !self.layout.canvas.contains(self.cursor) {
            return;
        }
        let steps = match delta {
            MouseScrollDelta::LineDelta(_, y) => f64::from(y),
            MouseScrollDelta::PixelDelta(pos) => pos.y,
        };
        if let Some(ViewAction::Zoom(d)) = self.interaction.on_wheel(steps) {
            self.surface.apply_zoom(d);
        }
    }

    fn key_pressed(&mut self, event: &KeyEvent) {
        let ctrl = self.modifiers.control_key();
        match &event.logical_key {
            Key::Character(s) if ctrl && s.eq_ignore_ascii_case("o") => self.show_open_dialog(),
            Key::Character(s) if ctrl && s.as_str() == "0" => self.surface.reset_transform(),
            Key::Named(NamedKey::Escape) => {
                if self.menu.is_open() {
                    self.menu.close();
                } else {
                    self.workspace.unfocus();
                }
            }
            Key::Named(NamedKey::Backspace) => self.edit_bins(TextEdit::Backspace),
            Key::Named(NamedKey::Delete) => self.edit_bins(TextEdit::Clear),
            Key::Character(s) if !ctrl => self.edit_bins(TextEdit::Insert(s.to_string())),
            _ => {}
        }
    }

    fn edit_bins(&mut self, edit: TextEdit) {
        if let Some(Err(err)) = self.workspace.edit_bins(edit) {
            self.set_status(StatusMessage::warning(err.to_string()));
        }
    }
}

impl ApplicationHandler for ImageApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.ensure_window(event_loop) else {
            event_loop.exit();
            return;
        };

        if self.gpu.is_none() {
            if let Err(err) = self.init_gpu(window) {
                error!(error = ?err, "failed to initialize GPU state");
                event_loop.exit();
                return;
            }
            if let Some(path) = self.initial_image.take() {
                self.open_path(&path);
            }
        }

        self.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("window close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => self.handle_resize(new_size),
            WindowEvent::ScaleFactorChanged {
                mut inner_size_writer,
                ..
            } => {
                let size = window.inner_size();
                let _ = inner_size_writer.request_inner_size(size);
                self.handle_resize(size);
            }
            WindowEvent::RedrawRequested => self.draw(event_loop),
            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers.state(),
            WindowEvent::CursorMoved { position, .. } => {
                if self.pointer_moved(Point::new(position.x, position.y)) {
                    self.request_redraw();
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.begin_chrome_action(ChromeAction::SetCursor(CursorShape::Arrow));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = pointer_button(button) else {
                    return;
                };
                let pressed = state == ElementState::Pressed;
                self.buttons.set(button, pressed);
                if pressed {
                    self.pointer_down(event_loop, button);
                } else {
                    self.pointer_up(button);
                }
                self.request_redraw();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.wheel(delta);
                self.request_redraw();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                self.key_pressed(&event);
                self.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.drain_events() {
            self.request_redraw();
        }
        if self.pending_redraw
            && let Some(window) = self.window.as_ref()
        {
            window.request_redraw();
        }
    }
}

fn interactive_regions(layout: &AppLayout) -> Vec<Rect> {
    let mut regions = layout.interactive_title_regions();
    regions.extend([layout.canvas, layout.workspace, layout.toolbar]);
    regions
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Left),
        MouseButton::Right => Some(PointerButton::Right),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn cursor_icon(shape: CursorShape) -> CursorIcon {
    match shape {
        CursorShape::Arrow => CursorIcon::Default,
        CursorShape::ResizeHorizontal => CursorIcon::EwResize,
        CursorShape::ResizeVertical => CursorIcon::NsResize,
        CursorShape::ResizeDiagonalNwSe => CursorIcon::NwseResize,
        CursorShape::ResizeDiagonalNeSw => CursorIcon::NeswResize,
    }
}

fn resize_direction(grip: Grip) -> ResizeDirection {
    match grip {
        Grip::TopLeft => ResizeDirection::NorthWest,
        Grip::Top => ResizeDirection::North,
        Grip::TopRight => ResizeDirection::NorthEast,
        Grip::Right => ResizeDirection::East,
        Grip::BottomRight => ResizeDirection::SouthEast,
        Grip::Bottom => ResizeDirection::South,
        Grip::BottomLeft => ResizeDirection::SouthWest,
        Grip::Left => ResizeDirection::West,
    }
}

/// Open the viewer window and block until it is closed.
pub fn run(cfg: Configuration, initial_image: Option<PathBuf>) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to build event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = ImageApp::new(cfg, initial_image);
    event_loop.run_app(&mut app).context("event loop failed")
}
