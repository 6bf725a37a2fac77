//! Window configuration for the desktop app.

use app::APP_NAME;
use macroquad::window::Conf;

// Map offsets in the shipped world are authored against this canvas.
const WINDOW_WIDTH: i32 = 960;
const WINDOW_HEIGHT: i32 = 540;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}
