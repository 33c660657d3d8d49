use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, history_display::*, key_binding_display::*, session_stats_display::*,
};

mod board_display;
mod history_display;
mod key_binding_display;
mod session_stats_display;

pub mod color {
    use ratatui::style::Color;

    pub const LIGHT_SQUARE: Color = Color::Rgb(240, 217, 181);
    pub const DARK_SQUARE: Color = Color::Rgb(181, 136, 99);
    pub const CURSOR: Color = Color::Rgb(80, 160, 220);
    pub const SELECTED: Color = Color::Rgb(230, 200, 60);
    pub const HINT: Color = Color::Rgb(110, 190, 90);
    pub const LAST_MOVE: Color = Color::Rgb(205, 170, 120);
    pub const WHITE_PIECE: Color = Color::Rgb(255, 255, 255);
    pub const BLACK_PIECE: Color = Color::Rgb(0, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const GREEN: Color = Color::Rgb(0, 200, 0);
    pub const RED: Color = Color::Rgb(220, 50, 50);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const LABEL: Style = fg_bg(color::GRAY, color::BLACK);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
