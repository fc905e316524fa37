//! Screen to egui text layout
//!
//! Converts the `vt100` grid into a single [`LayoutJob`], merging runs of
//! cells that share a style. Default colors come from the session palette.

use eframe::egui::text::LayoutJob;
use eframe::egui::{Color32, FontId, Stroke, TextFormat};

use crate::config::Palette;

/// Standard xterm colors 0-15
const ANSI_16: [Color32; 16] = [
    Color32::from_rgb(0, 0, 0),
    Color32::from_rgb(205, 0, 0),
    Color32::from_rgb(0, 205, 0),
    Color32::from_rgb(205, 205, 0),
    Color32::from_rgb(0, 0, 238),
    Color32::from_rgb(205, 0, 205),
    Color32::from_rgb(0, 205, 205),
    Color32::from_rgb(229, 229, 229),
    Color32::from_rgb(127, 127, 127),
    Color32::from_rgb(255, 0, 0),
    Color32::from_rgb(0, 255, 0),
    Color32::from_rgb(255, 255, 0),
    Color32::from_rgb(92, 92, 255),
    Color32::from_rgb(255, 0, 255),
    Color32::from_rgb(0, 255, 255),
    Color32::from_rgb(255, 255, 255),
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct CellStyle {
    fg: Color32,
    bg: Color32,
    italic: bool,
    underline: bool,
}

impl CellStyle {
    fn text_format(&self, font_id: FontId) -> TextFormat {
        TextFormat {
            font_id,
            color: self.fg,
            background: self.bg,
            italics: self.italic,
            underline: if self.underline {
                Stroke::new(1.0, self.fg)
            } else {
                Stroke::NONE
            },
            ..Default::default()
        }
    }
}

/// Map a vt100 color onto the palette
pub fn color_to_color32(color: vt100::Color, default: Color32) -> Color32 {
    match color {
        vt100::Color::Default => default,
        vt100::Color::Rgb(r, g, b) => Color32::from_rgb(r, g, b),
        vt100::Color::Idx(i) => xterm_256_color(i),
    }
}

fn cell_style(cell: &vt100::Cell, palette: &Palette) -> CellStyle {
    let mut fg = color_to_color32(cell.fgcolor(), palette.foreground);
    let mut bg = color_to_color32(cell.bgcolor(), palette.background);

    // bold brightens the first eight colors
    if cell.bold() {
        if let vt100::Color::Idx(i) = cell.fgcolor() {
            if i < 8 {
                fg = xterm_256_color(i + 8);
            }
        }
    }
    if cell.inverse() {
        std::mem::swap(&mut fg, &mut bg);
    }

    CellStyle {
        fg,
        bg,
        italic: cell.italic(),
        underline: cell.underline(),
    }
}

/// Lay out the whole visible screen
pub fn screen_to_layout_job(screen: &vt100::Screen, font_id: FontId, palette: &Palette) -> LayoutJob {
    let (rows, cols) = screen.size();
    let mut job = LayoutJob::default();
    job.wrap.max_width = f32::INFINITY;

    let mut current: Option<CellStyle> = None;
    let mut run = String::new();

    for row in 0..rows {
        for col in 0..cols {
            let Some(cell) = screen.cell(row, col) else {
                continue;
            };

            let style = cell_style(cell, palette);
            if current != Some(style) {
                if let Some(previous) = current {
                    if !run.is_empty() {
                        job.append(&run, 0.0, previous.text_format(font_id.clone()));
                        run.clear();
                    }
                }
                current = Some(style);
            }

            if cell.has_contents() && !cell.is_wide_continuation() {
                run.push_str(&cell.contents());
            } else if !cell.is_wide_continuation() {
                run.push(' ');
            }
        }
        if row + 1 < rows {
            run.push('\n');
        }
    }

    if let Some(style) = current {
        if !run.is_empty() {
            job.append(&run, 0.0, style.text_format(font_id));
        }
    }
    job
}

/// xterm 256-color table
pub fn xterm_256_color(idx: u8) -> Color32 {
    match idx {
        0..=15 => ANSI_16[idx as usize],
        16..=231 => {
            let i = idx - 16;
            let level = |v: u8| -> u8 {
                if v == 0 {
                    0
                } else {
                    55 + v * 40
                }
            };
            Color32::from_rgb(level(i / 36), level((i % 36) / 6), level(i % 6))
        }
        232..=255 => {
            let v = 8 + (idx - 232) * 10;
            Color32::from_rgb(v, v, v)
        }
    }
}
