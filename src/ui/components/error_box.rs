use ratatui::{
    layout::Alignment,
    prelude::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::UiComponent;

impl UiComponent {
    pub fn error_box(message: &str) -> Paragraph<'_> {
        Paragraph::new(message)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
            )
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
    }
}
