pub mod components;
pub mod screens;
pub mod style;
pub mod widgets;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use crate::app::App;
use crate::session::View;
use crate::ui::components::UiComponent;

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [body, footer] = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(area);
        let [sidebar, main] = Layout::horizontal([Constraint::Length(30), Constraint::Min(1)]).areas(body);

        widgets::sidebar::render_sidebar(self, sidebar, buf);

        match self.session.view {
            View::Home => screens::home::render_home(self, main, buf),
            View::Module(module) => screens::module::render_module(self, module, main, buf),
            View::Practice => screens::practice::render_practice(self, main, buf),
        }

        render_footer(self, footer, buf);
    }
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    if let Some(status) = &app.status {
        UiComponent::status(status).render(area, buf);
        return;
    }

    let help = if app.is_editing_path {
        "Type a path · Enter: analyze · Esc: cancel"
    } else {
        match app.session.view {
            View::Home => "0-6: jump · Tab: focus · ↑↓: move · Enter: open · q: quit",
            View::Module(_) => {
                "↑↓: topic · Enter: learn · ←→: slider · s: next slider · PgUp/PgDn: scroll · d: download · q: quit"
            }
            View::Practice => "u: choose file · PgUp/PgDn: scroll · d: save report · Tab: focus · q: quit",
        }
    };
    UiComponent::help(help).render(area, buf);
}
