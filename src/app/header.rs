//! Header bar
//!
//! Action buttons on the left, the session title and any runtime notice
//! after them.

use eframe::egui;

use crate::config::DEFAULT_TITLE;
use crate::dispatch::ActionTrigger;
use crate::session::TitleSurface;

/// Title and notice shown in the header, fed by the session host
#[derive(Debug, Clone)]
pub struct HeaderState {
    pub title: String,
    pub notice: Option<String>,
    /// Last title pushed to the OS window
    window_title: Option<String>,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            notice: None,
            window_title: None,
        }
    }
}

impl TitleSurface for HeaderState {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn show_notice(&mut self, notice: &str) {
        self.notice = Some(notice.to_string());
    }
}

impl HeaderState {
    /// The title, if it differs from what the OS window currently shows
    pub fn take_window_title_update(&mut self) -> Option<String> {
        if self.window_title.as_deref() == Some(self.title.as_str()) {
            return None;
        }
        self.window_title = Some(self.title.clone());
        Some(self.title.clone())
    }

    /// Draw the header; returns the index of the clicked action, if any
    pub fn show(&mut self, ui: &mut egui::Ui, triggers: &[ActionTrigger]) -> Option<usize> {
        let mut clicked = None;
        ui.horizontal(|ui| {
            for (index, trigger) in triggers.iter().enumerate() {
                let action = trigger.action();
                let text: &str = match icon_glyph(&action.icon) {
                    Some(glyph) => glyph,
                    None => action.label(),
                };
                let mut button = ui.button(text);
                if !action.tooltip.is_empty() {
                    button = button.on_hover_text(&action.tooltip);
                }
                if button.clicked() {
                    clicked = Some(index);
                }
            }
            if !triggers.is_empty() {
                ui.separator();
            }

            ui.strong(&self.title);

            let mut dismiss = false;
            if let Some(notice) = &self.notice {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                        dismiss = true;
                    }
                    ui.colored_label(ui.visuals().warn_fg_color, notice);
                });
            }
            if dismiss {
                self.notice = None;
            }
        });
        clicked
    }
}

/// Glyph for a freedesktop icon name, when the default fonts can draw one
pub fn icon_glyph(icon: &str) -> Option<&'static str> {
    let glyph = match icon.trim_end_matches("-symbolic") {
        "emblem-favorite" | "starred" => "★",
        "utilities-terminal" | "terminal" => ">_",
        "edit-copy" => "🗐",
        "edit-paste" => "📋",
        "edit-clear" | "edit-clear-all" => "⌫",
        "view-refresh" | "reload" => "🔄",
        "media-playback-start" | "system-run" => "▶",
        "media-playback-stop" | "process-stop" => "⏹",
        "folder" | "folder-open" | "document-open" => "📂",
        "go-home" | "user-home" => "🏠",
        "help-about" | "dialog-information" => "ℹ",
        "dialog-warning" => "⚠",
        "preferences-system" | "emblem-system" => "⚙",
        "system-search" | "edit-find" => "🔍",
        "application-exit" | "window-close" => "✖",
        _ => return None,
    };
    Some(glyph)
}
