mod chart;
mod layout;
mod practice;

use crate::tui::app::{AppState, Scene};
use ratatui::prelude::*;
use ratatui::widgets::*;

use layout::{centered_rect, inner};

pub fn draw(f: &mut Frame, app: &AppState) {
    match app.scene {
        Scene::Chart => chart::draw_chart(f, app),
        Scene::Practice => practice::draw_practice(f, app),
    }
    if app.help_open() {
        draw_help(f);
    }
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Chart:", bold)),
        Line::from("- Arrows / h j k l: move on the grid"),
        Line::from("- Space / Enter: toggle hand"),
        Line::from("- C: clear chart"),
        Line::from("- A: next action (RFI, Call, 3bet)"),
        Line::from("- Tab: next hero position"),
        Line::from("- V: next villain position"),
        Line::from("- E: edit as text (AA, AKs, A5s-A2s)"),
        Line::from("- P: practice RFI ranges"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from(Span::styled("Practice:", bold)),
        Line::from("- F: fold"),
        Line::from("- R: raise (retry after a mistake)"),
        Line::from("- N: next hand"),
        Line::from("- Esc: back to the chart"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
