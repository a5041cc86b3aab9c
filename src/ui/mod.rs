pub mod layout;
mod menu;
mod prompt;
mod quiz;
mod summary;

pub use layout::calculate_quiz_chunks;
pub use menu::{draw_load_failed, draw_menu, MenuPanel};
pub use prompt::draw_prompt;
pub use quiz::draw_quiz;
pub use summary::draw_finish;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Scale an RGB colour towards black by `opacity` (clamped to `0.0..=1.0`).
pub fn fade(rgb: (u8, u8, u8), opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * opacity).round() as u8;
    Color::Rgb(scale(rgb.0), scale(rgb.1), scale(rgb.2))
}

pub(crate) fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}
