use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::app::{App, Focus};
use crate::catalog::ModuleType;
use crate::ui::components::UiComponent;
use crate::ui::style::{focus_border, module_color};
use crate::ui::widgets::{document::render_document, lab_chart::render_lab_chart, loading::render_loading};
use crate::visualizer::Lab;

const LOADING_TEXT: &str = "AI 教授正在为您撰写详细教程...";
const PICK_TOPIC_TEXT: &str = "请在左侧选择一个知识点开始学习";

pub fn render_module(app: &mut App, module: ModuleType, area: Rect, buf: &mut Buffer) {
    let [list_area, content_area] =
        Layout::horizontal([Constraint::Length(36), Constraint::Min(20)]).areas(area);

    render_topic_list(app, module, list_area, buf);

    let Some(topic) = app.session.active_topic else {
        UiComponent::empty_message(PICK_TOPIC_TEXT, Some(Color::DarkGray)).render(content_area, buf);
        return;
    };

    let lab = Lab::for_module(module);
    let [header_area, lab_area, body_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(if lab.is_some() { 14 } else { 0 }),
        Constraint::Min(3),
    ])
    .areas(content_area);

    let color = module_color(module);
    let mut header = vec![
        Line::from(Span::styled(topic.title, Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(topic.description, Style::default().fg(Color::Gray))),
    ];
    if app.can_download() {
        header.push(Line::from(Span::styled("[d] 下载笔记", Style::default().fg(color))));
    }
    Paragraph::new(header)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray)))
        .render(header_area, buf);

    if let Some(lab) = lab {
        render_lab_chart(&app.visualizer, lab, color, lab_area, buf);
    }

    if app.session.is_loading {
        let [spinner_area, _] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(body_area);
        render_loading(LOADING_TEXT, &mut app.throbber, spinner_area, buf);
    } else {
        render_document(topic.title, &app.session.content, app.content_scroll, body_area, buf);
    }
}

fn render_topic_list(app: &App, module: ModuleType, area: Rect, buf: &mut Buffer) {
    let is_focused = app.focus == Focus::Content;
    let color = module_color(module);
    let title = module.descriptor().map(|d| d.title).unwrap_or(module.as_str());

    let mut lines = Vec::new();
    for (index, topic) in module.topics().iter().enumerate() {
        let is_active = app.session.active_topic.map(|t| t.id) == Some(topic.id);
        let is_cursor = is_focused && app.item_cursor == index;

        let title_style = if is_active {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if is_cursor { "▶ " } else { "  " };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(topic.title, title_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", topic.description),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(focus_border(is_focused)),
        )
        .wrap(Wrap { trim: false })
        .render(area, buf);
}
