use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::app::{App, Focus};
use crate::catalog::ModuleType;
use crate::ui::style::{MUTED, focus_border, module_color};

fn entry_label(module: ModuleType) -> (&'static str, &'static str) {
    match module {
        ModuleType::Home => ("⌂", "首页概览"),
        ModuleType::Practice => ("</>", "AI 代码解析"),
        other => other
            .descriptor()
            .map(|d| (d.icon, d.title))
            .unwrap_or(("·", other.as_str())),
    }
}

fn group_header(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(MUTED).add_modifier(Modifier::BOLD),
    ))
}

pub fn render_sidebar(app: &App, area: Rect, buf: &mut Buffer) {
    let is_focused = app.focus == Focus::Sidebar;
    let mut lines = vec![
        Line::from(Span::styled(" AI Master", Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(" INTERACTIVE LEARNING HUB", Style::default().fg(MUTED))),
        Line::from(""),
    ];

    for (index, module) in ModuleType::ALL.iter().enumerate() {
        match module {
            ModuleType::Python => {
                lines.push(Line::from(""));
                lines.push(group_header("学习模块"));
            }
            ModuleType::Practice => {
                lines.push(Line::from(""));
                lines.push(group_header("实践工具"));
            }
            _ => {}
        }

        let (icon, title) = entry_label(*module);
        let is_active = app.session.module == *module;
        let is_cursor = is_focused && app.sidebar_cursor == index;

        let marker = if is_cursor { "▶" } else { " " };
        let style = if is_active {
            Style::default().fg(Color::Black).bg(module_color(*module)).bold()
        } else if is_cursor {
            Style::default().fg(Color::White).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        lines.push(Line::from(vec![
            Span::raw(format!("{} ", marker)),
            Span::styled(format!("[{}] {} {}", index, icon, title), style),
        ]));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(focus_border(is_focused)),
        )
        .render(area, buf);
}
