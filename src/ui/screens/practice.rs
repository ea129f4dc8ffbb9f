use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::ui::components::UiComponent;
use crate::ui::widgets::{document::render_document, loading::render_loading};

const ANALYZING_TEXT: &str = "AI 正在思考并分析你的代码逻辑...";

pub fn render_practice(app: &mut App, area: Rect, buf: &mut Buffer) {
    let [header_area, input_area, status_area, body_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
    ])
    .areas(area);

    Paragraph::new(vec![
        Line::from(Span::styled("AI 代码解析实验室", Style::default().fg(Color::LightBlue).bold())),
        Line::from(Span::styled(
            "上传你的 Python 代码，AI 专家将为你进行深度解读、逻辑分析与优化建议。",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray)))
    .wrap(Wrap { trim: true })
    .render(header_area, buf);

    render_path_input(app, input_area, buf);

    let practice = &app.session.practice;
    if let Some(error) = &practice.error {
        UiComponent::error_box(error).render(status_area, buf);
    } else if let Some(file_name) = &practice.file_name {
        if !practice.is_analyzing && practice.analysis.is_empty() {
            Paragraph::new(Line::from(vec![
                Span::styled("✔ ", Style::default().fg(Color::Green)),
                Span::raw("已选择: "),
                Span::styled(file_name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(". 正在准备分析..."),
            ]))
            .render(status_area, buf);
        }
    }

    if practice.is_analyzing {
        let [spinner_area, _] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(body_area);
        render_loading(ANALYZING_TEXT, &mut app.throbber, spinner_area, buf);
    } else if !practice.analysis.is_empty() {
        let [title_area, doc_area] = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(body_area);
        let mut title = vec![Span::styled("分析报告", Style::default().fg(Color::White).bold())];
        if app.can_download() {
            title.push(Span::styled("   [d] 保存报告", Style::default().fg(Color::LightBlue)));
        }
        Paragraph::new(Line::from(title)).render(title_area, buf);

        let doc_title = practice.file_name.as_deref().unwrap_or("analysis");
        render_document(doc_title, &practice.analysis, app.content_scroll, doc_area, buf);
    }
}

fn render_path_input(app: &App, area: Rect, buf: &mut Buffer) {
    let (text, style) = if app.is_editing_path {
        (format!("{}▏", app.path_input), Style::default().fg(Color::White))
    } else if app.path_input.is_empty() {
        ("按 u 输入 Python 文件路径 (支持 .py, .txt 格式)".to_string(), Style::default().fg(Color::DarkGray).italic())
    } else {
        (app.path_input.clone(), Style::default().fg(Color::Gray))
    };

    let border = if app.is_editing_path { Color::LightBlue } else { Color::DarkGray };

    Paragraph::new(text)
        .style(style)
        .block(
            Block::default()
                .title(" 点击上传 Python 文件 ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        )
        .render(area, buf);
}
