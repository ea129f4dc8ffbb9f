use ratatui::{
    layout::Alignment,
    prelude::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use super::UiComponent;

impl UiComponent {
    pub fn status(status: &str) -> Paragraph<'_> {
        Paragraph::new(status)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .title(" Status ")
            )
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
    }
}
