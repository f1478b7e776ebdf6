use crate::hand::{catalog, HandLabel, GRID_WIDTH};
use crate::range::{ActionKind, ActionSet};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

/// Characters per grid cell, including the gap.
const CELL_WIDTH: u16 = 5;

pub(super) fn draw_chart(f: &mut Frame, app: &AppState) {
    let grid_height = GRID_WIDTH as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),           // header
            Constraint::Length(grid_height), // grid
            Constraint::Min(3),              // range text
            Constraint::Length(3),           // status
        ])
        .split(f.area());

    let ctx = app.context();
    let villain = if app.action.is_villain_relative() {
        format!("   Villain: {}", app.villain)
    } else {
        String::new()
    };
    let header_lines = vec![
        Line::from(format!("Action: {}   Hero: {}{villain}", app.action, app.hero)),
        Line::from(vec![
            Span::raw(format!("{}: ", app.action.describe())),
            Span::styled(
                format!("{}%", app.percentage_label()),
                Style::default().fg(action_color(app.action)).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   Cursor: {}", app.cursor_label())),
        ]),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title(format!("range-trainer · {ctx}")).borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    draw_grid(f, chunks[1], app);

    let text = app.range_text();
    let body = if text.is_empty() {
        Line::from(Span::styled("(empty)", Style::default().add_modifier(Modifier::DIM)))
    } else {
        Line::from(text)
    };
    let range_para = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Range").borders(Borders::ALL));
    f.render_widget(range_para, chunks[2]);

    let status = match app.notice() {
        Some(notice) => Line::from(Span::styled(notice, Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(
            "Space toggle • E edit • A action • Tab hero • V villain • C clear • P practice • ? help",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    let status_para =
        Paragraph::new(status).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status_para, chunks[3]);

    if app.editor_active() {
        draw_editor(f, app);
    }
}

fn draw_grid(f: &mut Frame, area: Rect, app: &AppState) {
    let slot = app.slot();
    let block = Block::default().title("Chart").borders(Borders::ALL);
    let labels: Vec<HandLabel> = catalog().collect();
    let lines: Vec<Line> = labels
        .chunks(GRID_WIDTH)
        .enumerate()
        .map(|(row, hands)| {
            let spans = hands
                .iter()
                .enumerate()
                .map(|(col, hand)| {
                    let index = row * GRID_WIDTH + col;
                    let style = cell_style(slot.tags(*hand), app.action, index == app.cursor);
                    let text = format!("{:<width$}", hand.to_string(), width = CELL_WIDTH as usize);
                    Span::styled(text, style)
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect();
    let grid_width = GRID_WIDTH as u16 * CELL_WIDTH;
    let grid_area = inner(area);
    let grid_area = Rect { width: grid_area.width.min(grid_width), ..grid_area };
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), grid_area);
}

fn cell_style(tags: ActionSet, shown: ActionKind, cursor: bool) -> Style {
    let mut style = if tags.contains(shown) {
        Style::default().fg(Color::Black).bg(action_color(shown))
    } else if !tags.is_empty() {
        // tagged for another action only
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    if cursor {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    style
}

fn action_color(action: ActionKind) -> Color {
    match action {
        ActionKind::Rfi => Color::Green,
        ActionKind::Call => Color::Cyan,
        ActionKind::ThreeBet => Color::Magenta,
    }
}

fn draw_editor(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 30, f.area());
    let block = Block::default().title(format!("Edit {}", app.context())).borders(Borders::ALL);
    let current = app.editor_text().unwrap_or("");
    let lines = vec![
        Line::from(format!("{current}_")),
        Line::from(""),
        Line::from(Span::styled(
            "Hands or ranges, comma separated (AA, AKs, JJ-99, A5s-A2s)",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            "Enter apply • Esc cancel",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
