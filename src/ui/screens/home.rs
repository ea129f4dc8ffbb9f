use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget, Wrap},
};

use crate::app::{App, Focus};
use crate::catalog::ModuleType;
use crate::ui::style::{dim_unless_focused, module_color};

const CARD_BLURB: &str = "点击进入模块，开始探索核心知识点与交互式图表。";

pub fn render_home(app: &App, area: Rect, buf: &mut Buffer) {
    let [hero_area, cards_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(8)]).areas(area);

    let hero = vec![
        Line::from(""),
        Line::from(Span::styled("掌握人工智能的", Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(
            "终极学习路径",
            Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "从 Python 基础到深度强化学习。融合交互式可视化与 AI 辅助代码解析，让复杂的概念触手可及。",
            Style::default().fg(Color::Gray),
        )),
    ];
    Paragraph::new(hero)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(hero_area, buf);

    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(cards_area);
    let rows = [top, bottom].map(|row| {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas::<2>(row)
    });
    let cells = rows.iter().flatten();

    let content_focused = app.focus == Focus::Content;
    for (index, (module, cell)) in ModuleType::HOME_CARDS.iter().zip(cells).enumerate() {
        let is_selected = content_focused && app.item_cursor == index;
        render_card(*module, is_selected, content_focused, *cell, buf);
    }
}

fn render_card(module: ModuleType, is_selected: bool, content_focused: bool, area: Rect, buf: &mut Buffer) {
    let Some(descriptor) = module.descriptor() else {
        return;
    };
    let color = module_color(module);

    let border_style = if is_selected {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}", descriptor.icon, descriptor.title),
            dim_unless_focused(content_focused, Style::default().fg(color)),
        )),
        Line::from(""),
        Line::from(Span::styled(CARD_BLURB, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled("开始学习 →", Style::default().fg(color))),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title(format!(" [{}] ", module.index()))
                .padding(Padding::symmetric(2, 1)),
        )
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
