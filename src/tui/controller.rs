use crate::hand::GridStep;
use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick(Instant::now());
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key to an input action. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if app.editor_active() {
        match code {
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::EditCancel);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::EditSubmit);
            }
            KeyCode::Backspace => {
                let _ = app.handle_input(InputAction::EditBackspace);
            }
            KeyCode::Char(c) => {
                let _ = app.handle_input(InputAction::EditChar(c));
            }
            _ => {}
        }
        return false;
    }
    if matches!(code, KeyCode::Char('?')) {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }

    match app.scene {
        Scene::Chart => match code {
            KeyCode::Up | KeyCode::Char('k') => {
                let _ = app.handle_input(InputAction::Cursor(GridStep::Up));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let _ = app.handle_input(InputAction::Cursor(GridStep::Down));
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let _ = app.handle_input(InputAction::Cursor(GridStep::Left));
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let _ = app.handle_input(InputAction::Cursor(GridStep::Right));
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let _ = app.handle_input(InputAction::ToggleHand);
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                let _ = app.handle_input(InputAction::ClearChart);
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                let _ = app.handle_input(InputAction::NextAction);
            }
            KeyCode::Tab => {
                let _ = app.handle_input(InputAction::NextHero);
            }
            KeyCode::Char('v') | KeyCode::Char('V') => {
                let _ = app.handle_input(InputAction::NextVillain);
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                let _ = app.handle_input(InputAction::EditOpen);
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                let _ = app.handle_input(InputAction::StartPractice);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Practice if app.feedback_open() => match code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let _ = app.handle_input(InputAction::Retry);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => {
                let _ = app.handle_input(InputAction::NextHand);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::LeavePractice);
            }
            _ => {}
        },
        Scene::Practice => match code {
            KeyCode::Char('f') | KeyCode::Char('F') => {
                let _ = app.handle_input(InputAction::Fold);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let _ = app.handle_input(InputAction::Raise);
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                let _ = app.handle_input(InputAction::NextHand);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::LeavePractice);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
    }
    false
}
