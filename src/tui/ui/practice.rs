use crate::cards::Card;
use crate::drill::{Cue, Decision, Drill, Feedback, Phase};
use crate::range::notation::format_labels;
use crate::range::Position;
use crate::table::{DealState, Seat};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

/// Seats drawn on the top row, left to right; the rest go on the bottom row, right to left.
const TOP_ROW: [usize; 3] = [0, 1, 2];
const BOTTOM_ROW: [usize; 3] = [5, 4, 3];

pub(super) fn draw_practice(f: &mut Frame, app: &AppState) {
    let Some(drill) = app.drill() else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(8),    // seats
            Constraint::Length(4), // status
        ])
        .split(f.area());

    let score = drill.score();
    let trained: Vec<&str> =
        drill.plan().trained_positions().into_iter().map(Position::label).collect();
    let pot = drill.deal().map(DealState::pot).unwrap_or(0.0);
    let header_lines = vec![
        Line::from(format!("Practising {} at {}", drill.plan().action(), trained.join(", "))),
        Line::from(format!(
            "Pot: {pot} BB   Correct: {}   Mistakes: {}",
            score.correct, score.incorrect
        )),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("range-trainer").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    if let Some(deal) = drill.deal() {
        draw_seats(f, chunks[1], deal);
    }

    let status_area = chunks[2];
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), status_area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner(status_area));
    let mut left = vec![Line::from(phase_line(drill))];
    if let Some(cue) = app.last_cue() {
        left.push(Line::from(Span::styled(
            cue_text(cue),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    let active = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);
    let can_act = drill.awaiting_decision();
    let keys = Line::from(vec![
        Span::styled("F fold", if can_act { active } else { dim }),
        Span::raw(" • "),
        Span::styled("R raise", if can_act { active } else { dim }),
        Span::raw(" • N next • Esc chart • ? help"),
    ]);
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(vec![Line::from(""), keys]).alignment(Alignment::Right),
        cols[1],
    );

    if let Some(fb) = drill.feedback() {
        draw_feedback(f, fb);
    }
}

fn draw_seats(f: &mut Frame, area: Rect, deal: &DealState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    for (row, seats) in [TOP_ROW, BOTTOM_ROW].iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(rows[row]);
        for (col, index) in seats.iter().enumerate() {
            if let Some(seat) = Seat::new(*index) {
                draw_seat(f, cols[col], deal, seat);
            }
        }
    }
}

fn draw_seat(f: &mut Frame, area: Rect, deal: &DealState, seat: Seat) {
    let mut title = seat.to_string();
    if seat.is_observer() {
        title.push_str(" [You]");
    }
    if deal.dealer_visible() {
        title.push_str(&format!(" [{}]", deal.position_of(seat)));
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if deal.is_folded(seat) {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else if deal.current() == Some(seat) {
        block = block.border_style(Style::default().fg(Color::Yellow));
    } else if seat.is_observer() {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }
    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut lines = Vec::with_capacity(3);
    lines.push(match deal.bet(seat) {
        Some(bet) => Line::from(format!("Bet: {bet} BB")),
        None => Line::from(vec![Span::raw("Bet: "), Span::styled("--", dim)]),
    });
    if deal.is_folded(seat) {
        lines.push(Line::from(Span::styled("Folded", dim)));
    } else if deal.current() == Some(seat) {
        lines.push(Line::from(Span::styled("Acting", Style::default().fg(Color::Yellow))));
    }
    if seat.is_observer() {
        let cards = match deal.hole() {
            Some(hole) if deal.cards_revealed() => {
                let [a, b] = hole.as_array();
                let mut spans = card_spans(a);
                spans.push(Span::raw(" "));
                spans.extend(card_spans(b));
                spans.push(Span::raw(format!("  ({})", hole.label())));
                Line::from(spans)
            }
            Some(_) => Line::from("[??] [??]"),
            None => Line::from(Span::styled("no cards", dim)),
        };
        lines.push(cards);
    }
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn card_spans(card: Card) -> Vec<Span<'static>> {
    let color = if card.suit().is_red() { Color::Red } else { Color::White };
    let text = format!("{}{}", card.rank().to_char(), card.suit().symbol());
    vec![Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))]
}

fn phase_line(drill: &Drill) -> String {
    match drill.phase() {
        Phase::Idle => "Shuffling…".to_string(),
        Phase::DealerAssigned => "Dealer assigned, posting blinds".to_string(),
        Phase::BlindsPosted => "Blinds posted".to_string(),
        Phase::AutoFold(seat) => format!("{seat} folds"),
        Phase::ObserverTurn => match drill.deal() {
            Some(deal) => format!("Your action at {}: fold or raise?", deal.observer_position()),
            None => "Your action".to_string(),
        },
        Phase::Deciding(decision) => format!("You {decision}…"),
        Phase::Correct => "Correct!".to_string(),
        Phase::Feedback(_) => "Wrong decision".to_string(),
        Phase::Abandoned => "Practice over".to_string(),
    }
}

fn cue_text(cue: Cue) -> &'static str {
    match cue {
        Cue::DealerAssigned => "♪ dealer",
        Cue::BetPlaced => "♪ chips",
        Cue::Fold => "♪ fold",
        Cue::CardsRevealed => "♪ cards",
    }
}

fn draw_feedback(f: &mut Frame, fb: &Feedback) {
    let area = centered_rect(70, 50, f.area());
    let block = Block::default()
        .title("Mistake")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let should = match fb.decision {
        Decision::Fold => "raise",
        Decision::Raise => "fold",
    };
    let range = if fb.range.is_empty() {
        "(nothing trained here)".to_string()
    } else {
        format_labels(fb.range.iter().copied())
    };
    let lines = vec![
        Line::from(vec![
            Span::raw("You chose to "),
            Span::styled(fb.decision.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(fb.hand.to_string(), Style::default().fg(Color::Red)),
            Span::raw(format!(" at {}; the chart says {should}.", fb.position)),
        ]),
        Line::from(""),
        Line::from(format!("{} range:", fb.position)),
        Line::from(range),
    ];
    let keys = Line::from(Span::styled(
        "R retry • N next hand • Esc chart",
        Style::default().add_modifier(Modifier::DIM),
    ));
    let inner_area = inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);
    f.render_widget(Paragraph::new(keys).alignment(Alignment::Center), chunks[1]);
}
