use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

use crate::markdown::render_markdown;
use crate::util::string::StringUtils;

/// Markdown body in a bordered, scrollable pane. The title carries the
/// source line count.
pub fn render_document(title: &str, source: &str, scroll: u16, area: Rect, buf: &mut Buffer) {
    let text = render_markdown(source);
    let line_count = StringUtils::maybe_pluralize_count(source.lines().count(), ("line", "lines"));

    Paragraph::new(text)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .title_bottom(format!(" {} ", line_count))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .render(area, buf);
}
