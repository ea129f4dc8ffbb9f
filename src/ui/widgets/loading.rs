use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::StatefulWidget,
};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState, WhichUse};

/// Spinner plus a one-line message, animated by the app tick.
pub fn render_loading(message: &str, state: &mut ThrobberState, area: Rect, buf: &mut Buffer) {
    let throbber = Throbber::default()
        .label(message.to_string())
        .style(Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD))
        .throbber_style(Style::default().fg(Color::LightBlue))
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);

    StatefulWidget::render(throbber, area, buf, state);
}
