//! EasyTerm window
//!
//! `eframe` application hosting one session: header bar on top, terminal
//! view below, copy/paste context menu on the terminal.

pub mod context;
pub mod header;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use arboard::Clipboard;
use eframe::egui::{self, FontId, Rect, Sense, Vec2};

pub use context::{ApplicationContext, LaunchMode};
pub use header::HeaderState;

use crate::config::Palette;
use crate::models::SessionState;
use crate::pty::RepaintNotifier;
use crate::session::{SessionHost, TitleSurface};
use crate::terminal::input::encode_event;
use crate::terminal::render::screen_to_layout_job;

/// Font size of the terminal grid
pub const TERMINAL_FONT_SIZE: f32 = 13.0;

/// Half period of the cursor blink, in seconds
pub const CURSOR_BLINK_INTERVAL: f64 = 0.5;

/// Final session state, written when the window closes
pub type SharedOutcome = Arc<Mutex<Option<SessionState>>>;

enum MenuAction {
    Copy,
    Paste,
}

/// The application window
pub struct EasyTermApp {
    context: ApplicationContext,
    header: HeaderState,
    palette: Palette,
    font_id: FontId,
    clipboard: Option<Clipboard>,
    outcome: SharedOutcome,
    /// Time of the last forwarded keystroke; restarts the blink
    last_input_at: f64,
    /// Mouse pointer hidden while typing until it moves again
    pointer_hidden: bool,
}

/// Whether a blinking cursor is lit `elapsed` seconds after the last
/// keystroke, and how long until it toggles
pub fn cursor_blink_phase(elapsed: f64) -> (bool, f64) {
    let elapsed = elapsed.max(0.0);
    let half_periods = (elapsed / CURSOR_BLINK_INTERVAL).floor();
    let visible = (half_periods as u64) % 2 == 0;
    let until_toggle = (half_periods + 1.0) * CURSOR_BLINK_INTERVAL - elapsed;
    (visible, until_toggle)
}

impl EasyTermApp {
    /// Apply the theme and activate the session
    pub fn new(cc: &eframe::CreationContext<'_>, context: ApplicationContext, outcome: SharedOutcome) -> Self {
        let dark = context.config().dark_theme;
        cc.egui_ctx.set_visuals(if dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                warn!("Clipboard unavailable: {}", e);
                None
            }
        };

        let repaint_ctx = cc.egui_ctx.clone();
        let notifier: RepaintNotifier = Arc::new(move || repaint_ctx.request_repaint());

        let mut app = Self {
            palette: context.config().colors(),
            context,
            header: HeaderState::default(),
            font_id: FontId::monospace(TERMINAL_FONT_SIZE),
            clipboard,
            outcome,
            last_input_at: 0.0,
            pointer_hidden: false,
        };
        if let Err(e) = app.context.activate(Some(notifier)) {
            error!("Failed to start session: {}", e);
            app.header.show_notice(&e.to_string());
        }
        app
    }

    /// Forward keyboard events; returns true when anything was sent
    fn handle_keyboard(host: &SessionHost, ctx: &egui::Context) -> bool {
        let events = ctx.input(|i| i.events.clone());
        let has_copy = events.iter().any(|e| matches!(e, egui::Event::Copy));
        let has_cut = events.iter().any(|e| matches!(e, egui::Event::Cut));
        let has_paste = events.iter().any(|e| matches!(e, egui::Event::Paste(_)));
        let app_cursor = host.surface().application_cursor();
        let mut typed = false;

        for event in &events {
            match event {
                // platform shortcuts arrive as Copy/Cut/Paste instead of Ctrl+C/X/V
                egui::Event::Copy => {
                    host.send_input(&[0x03]);
                    typed = true;
                }
                egui::Event::Cut => {
                    host.send_input(&[0x18]);
                    typed = true;
                }
                egui::Event::Paste(text) => {
                    host.paste(text);
                    typed = true;
                }
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } if modifiers.ctrl
                    && ((*key == egui::Key::C && has_copy)
                        || (*key == egui::Key::X && has_cut)
                        || (*key == egui::Key::V && has_paste)) => {}
                other => {
                    if let Some(bytes) = encode_event(other, app_cursor) {
                        host.send_input(&bytes);
                        typed = true;
                    }
                }
            }
        }
        typed
    }

    fn show_terminal(&mut self, ui: &mut egui::Ui) {
        let Some(host) = self.context.host_mut() else {
            return;
        };

        let glyph_width = ui.fonts(|f| f.glyph_width(&self.font_id, 'M')).max(1.0);
        let row_height = ui.fonts(|f| f.row_height(&self.font_id)).max(1.0);
        let available = ui.available_size();
        let rows = (available.y / row_height).floor().clamp(1.0, u16::MAX as f32) as u16;
        let cols = (available.x / glyph_width).floor().clamp(1.0, u16::MAX as f32) as u16;
        host.resize(rows, cols);

        let (rect, response) = ui.allocate_exact_size(available, Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.palette.background);

        let screen = host.surface().screen();
        let job = screen_to_layout_job(screen, self.font_id.clone(), &self.palette);
        let galley = ui.fonts(|f| f.layout_job(job));
        painter.galley(rect.min, galley, self.palette.foreground);

        let cursor_shown = !screen.hide_cursor() && host.surface().scrollback_offset() == 0;
        let (lit, until_toggle) = cursor_blink_phase(ui.input(|i| i.time) - self.last_input_at);
        if cursor_shown {
            ui.ctx()
                .request_repaint_after(Duration::from_secs_f64(until_toggle.max(0.01)));
        }
        if cursor_shown && lit {
            let (row, col) = screen.cursor_position();
            let cursor = Rect::from_min_size(
                rect.min + Vec2::new(col as f32 * glyph_width, row as f32 * row_height),
                Vec2::new(glyph_width, row_height),
            );
            painter.rect_filled(cursor, 0.0, self.palette.foreground.gamma_multiply(0.6));
        }

        if ui.input(|i| i.pointer.delta() != Vec2::ZERO) {
            self.pointer_hidden = false;
        }
        if self.pointer_hidden && response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::None);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            let lines = (scroll / row_height).round() as isize;
            if lines != 0 {
                host.scroll(lines);
            }
        }

        let mut menu_action = None;
        response.context_menu(|ui| {
            if ui.button("Copy").clicked() {
                menu_action = Some(MenuAction::Copy);
                ui.close_menu();
            }
            if ui.button("Paste").clicked() {
                menu_action = Some(MenuAction::Paste);
                ui.close_menu();
            }
        });

        match menu_action {
            Some(MenuAction::Copy) => self.copy_screen(),
            Some(MenuAction::Paste) => self.paste_clipboard(),
            None => {}
        }
    }

    fn copy_screen(&mut self) {
        let Some(host) = self.context.host() else {
            return;
        };
        let text = host.surface().contents();
        let trimmed = text.trim_end();
        match self.clipboard.as_mut() {
            Some(clipboard) => {
                if let Err(e) = clipboard.set_text(trimmed.to_string()) {
                    warn!("Copy to clipboard failed: {}", e);
                }
            }
            None => warn!("Copy requested but no clipboard is available"),
        }
    }

    fn paste_clipboard(&mut self) {
        let text = match self.clipboard.as_mut().map(|c| c.get_text()) {
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                warn!("Paste from clipboard failed: {}", e);
                return;
            }
            None => return,
        };
        if let Some(host) = self.context.host() {
            host.paste(&text);
        }
    }
}

impl eframe::App for EasyTermApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(host) = self.context.host_mut() {
            host.poll(&mut self.header);
        }
        if let Some(title) = self.header.take_window_title_update() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }

        let mut clicked = None;
        egui::TopBottomPanel::top("easyterm_header").show(ctx, |ui| {
            let triggers = self.context.host().map(|h| h.triggers()).unwrap_or_default();
            clicked = self.header.show(ui, triggers);
        });
        if let (Some(index), Some(host)) = (clicked, self.context.host()) {
            if let Some(trigger) = host.triggers().get(index) {
                trigger.activate();
            }
        }

        if let Some(host) = self.context.host() {
            if Self::handle_keyboard(host, ctx) {
                self.last_input_at = ctx.input(|i| i.time);
                self.pointer_hidden = true;
            }
        }

        let background = self.palette.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(background).inner_margin(egui::Margin::same(4)))
            .show(ctx, |ui| self.show_terminal(ui));
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        self.palette.background.to_normalized_gamma_f32()
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("EasyTerm window closing");
        let state = self.context.shutdown();
        match self.outcome.lock() {
            Ok(mut outcome) => *outcome = state,
            Err(e) => warn!("Could not record session outcome: {}", e),
        }
    }
}
