pub mod layout;
mod menu;
mod quiz;
mod summary;

use crate::models::AppState;
use crate::session::App;
use crate::utils::truncate_string;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
};

pub use layout::{calculate_quiz_chunks, calculate_screen_chunks};
pub use menu::{draw_load_error, draw_loading, draw_menu};
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use summary::draw_summary;

pub(crate) fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(label),
    ]
}

/// Cuts `text` to the inner width of a bordered block drawn in `area`.
pub(crate) fn fit_to_block(text: &str, area: Rect) -> String {
    truncate_string(text, area.width.saturating_sub(2) as usize)
}

pub fn draw(f: &mut Frame, app: &App) {
    match &app.state {
        AppState::Loading => draw_loading(f, app),
        AppState::LoadError(error) => draw_load_error(f, app, error),
        AppState::Menu => draw_menu(f, app),
        AppState::Quiz => draw_quiz(f, app),
        AppState::QuizQuitConfirm => draw_quit_confirmation(f, app),
        AppState::Summary => draw_summary(f, app),
    }
}
