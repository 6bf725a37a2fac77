//! Dialogue box and event log drawn over the world.

use app::dialogue_text::{LineStyle, dialogue_lines, fit_lines};
use app::session::AppSession;
use macroquad::prelude::{
    Color, LIGHTGRAY, WHITE, YELLOW, draw_rectangle, draw_rectangle_lines, draw_text,
    screen_height, screen_width,
};
use overworld::DialogueState;

const BOX_FILL: Color = Color { r: 0.05, g: 0.05, b: 0.1, a: 0.9 };
const BOX_BORDER: Color = Color { r: 0.8, g: 0.8, b: 0.9, a: 1.0 };
const BOX_MARGIN: f32 = 16.0;
const BOX_HEIGHT: f32 = 150.0;
const PAD_X: f32 = 14.0;
const PAD_Y: f32 = 24.0;
const LINE_HEIGHT: f32 = 20.0;
const FONT_SIZE: f32 = 18.0;
// Rough glyph width of the default font at FONT_SIZE.
const GLYPH_WIDTH: f32 = 8.5;

pub fn draw_overlay(session: &AppSession, ui_scale: f32) {
    draw_event_log(session, ui_scale);
    draw_dialogue(session.game().dialogue(), ui_scale);
}

fn draw_dialogue(state: &DialogueState, ui_scale: f32) {
    let Some(dialogue) = &state.dialogue else {
        return;
    };
    if !state.is_visible() {
        let hint = format!("[Space] {}", dialogue.title);
        let y = screen_height() - scaled(BOX_MARGIN, ui_scale);
        draw_text(&hint, scaled(BOX_MARGIN, ui_scale), y, scaled(FONT_SIZE, ui_scale), YELLOW);
        return;
    }

    let margin = scaled(BOX_MARGIN, ui_scale);
    let height = scaled(BOX_HEIGHT, ui_scale);
    let (x, y) = (margin, screen_height() - height - margin);
    let width = screen_width() - 2.0 * margin;
    draw_rectangle(x, y, width, height, BOX_FILL);
    draw_rectangle_lines(x, y, width, height, 2.0, BOX_BORDER);

    let line_step = scaled(LINE_HEIGHT, ui_scale);
    let pad_y = scaled(PAD_Y, ui_scale);
    let text_width = width - 2.0 * scaled(PAD_X, ui_scale);
    let max_chars = (text_width / scaled(GLYPH_WIDTH, ui_scale)) as usize;
    let max_lines = ((height - pad_y) / line_step).floor().max(0.0) as usize + 1;
    let lines = fit_lines(&dialogue_lines(dialogue, max_chars.max(1)), max_lines);

    let text_x = x + scaled(PAD_X, ui_scale);
    for (index, line) in lines.iter().enumerate() {
        let color = match line.style {
            LineStyle::Title => YELLOW,
            LineStyle::Heading => WHITE,
            LineStyle::Body | LineStyle::Bullet => LIGHTGRAY,
        };
        let text_y = y + pad_y + index as f32 * line_step;
        draw_text(&line.text, text_x, text_y, scaled(FONT_SIZE, ui_scale), color);
    }
}

fn draw_event_log(session: &AppSession, ui_scale: f32) {
    let x = scaled(BOX_MARGIN, ui_scale);
    let step = scaled(LINE_HEIGHT, ui_scale);
    for (index, line) in session.event_lines().enumerate() {
        let y = scaled(PAD_Y, ui_scale) + index as f32 * step;
        draw_text(line, x, y, scaled(16.0, ui_scale), LIGHTGRAY);
    }
}

fn scaled(value: f32, ui_scale: f32) -> f32 {
    value * ui_scale
}
