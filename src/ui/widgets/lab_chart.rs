use ratatui::prelude::*;
use ratatui::buffer::Buffer;
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget};

use crate::visualizer::{Lab, LinearParams, SineParams, Visualizer};

fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    vec![
        format!("{:.0}", bounds[0]),
        format!("{:.0}", (bounds[0] + bounds[1]) / 2.0),
        format!("{:.0}", bounds[1]),
    ]
}

/// Formula and slider readout, the focused slider highlighted.
fn slider_line(viz: &Visualizer, lab: Lab, color: Color) -> Line<'static> {
    let values = viz.values(lab);
    let mut spans = vec![
        Span::styled(viz.formula(lab), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
    ];

    for (index, (spec, value)) in lab.sliders().iter().zip(values).enumerate() {
        let is_focused = index == viz.focused_slider;
        let style = if is_focused {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_focused { "◀ ▶" } else { "   " };
        spans.push(Span::styled(
            format!("{}: {} [{} .. {}] {}", spec.label, value, spec.min, spec.max, marker),
            style,
        ));
        spans.push(Span::raw("   "));
    }

    Line::from(spans)
}

pub fn render_lab_chart(viz: &Visualizer, lab: Lab, color: Color, area: Rect, buf: &mut Buffer) {
    let (x_bounds, y_bounds) = match lab {
        Lab::Linear => (LinearParams::X_DOMAIN, LinearParams::Y_BOUNDS),
        Lab::Sine => (SineParams::X_DOMAIN, SineParams::Y_BOUNDS),
    };

    let block = Block::default()
        .title(format!(" {} ", lab.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(inner);

    Paragraph::new(slider_line(viz, lab, color)).render(chunks[0], buf);

    // Points outside the y bounds are clipped by the chart.
    let data_points = viz.sample(lab);
    let formula = viz.formula(lab);
    let datasets = vec![
        Dataset::default()
            .name(formula)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&data_points),
    ];

    let x_axis = Axis::default()
        .title("x")
        .style(Style::default().fg(Color::Gray))
        .labels(axis_labels(x_bounds))
        .bounds(x_bounds);

    let y_axis = Axis::default()
        .title("y")
        .style(Style::default().fg(Color::Gray))
        .labels(axis_labels(y_bounds))
        .bounds(y_bounds);

    Chart::new(datasets)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(Some(ratatui::widgets::LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Percentage(100), Constraint::Percentage(100)))
        .render(chunks[1], buf);
}
