use crate::cards::Rank;
use crate::drill::{Cue, Decision, Drill, DrillSettings, Phase};
use crate::hand::{GridStep, HandLabel};
use crate::range::{ActionKind, Position, RangeStore};
use crate::storage::Persister;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Chart,
    Practice,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    ToggleHelp,
    Cursor(GridStep),
    ToggleHand,
    ClearChart,
    NextAction,
    NextHero,
    NextVillain,
    EditOpen,
    EditChar(char),
    EditBackspace,
    EditSubmit,
    EditCancel,
    StartPractice,
    Fold,
    Raise,
    Retry,
    NextHand,
    LeavePractice,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    // Chart being edited
    pub action: ActionKind,
    pub hero: Position,
    pub villain: Position,
    pub cursor: usize,
    pub(crate) ranges: RangeStore,
    persister: Option<Persister>,
    settings: DrillSettings,
    drill: Option<Drill>,
    last_cue: Option<Cue>,
    help_open: bool,
    pub(crate) editor: Option<String>,
    notice: Option<String>,
    notice_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RangeStore::default(), None, DrillSettings::default())
    }
}

impl AppState {
    const NOTICE_TTL: Duration = Duration::from_secs(3);

    /// `persister`, when present, receives every updated range store.
    pub fn new(ranges: RangeStore, persister: Option<Persister>, settings: DrillSettings) -> Self {
        Self {
            scene: Scene::Chart,
            action: ActionKind::Rfi,
            hero: Position::Utg,
            villain: Position::Utg,
            cursor: 0,
            ranges,
            persister,
            settings,
            drill: None,
            last_cue: None,
            help_open: false,
            editor: None,
            notice: None,
            notice_at: None,
        }
    }

    pub fn ranges(&self) -> &RangeStore {
        &self.ranges
    }

    pub fn drill(&self) -> Option<&Drill> {
        self.drill.as_ref()
    }

    pub fn last_cue(&self) -> Option<Cue> {
        self.last_cue
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub(crate) fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
        self.notice_at = Some(Instant::now());
    }

    /// Replace the range store and hand the new value to the persister.
    pub(crate) fn update_ranges(&mut self, f: impl FnOnce(RangeStore) -> RangeStore) {
        let ranges = std::mem::take(&mut self.ranges);
        self.ranges = f(ranges);
        if let Some(persister) = &self.persister {
            persister.schedule(&self.ranges);
        }
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleHelp => {
                self.help_open = !self.help_open;
                false
            }
            InputAction::Cursor(step) if self.scene == Scene::Chart => {
                self.move_cursor(step);
                true
            }
            InputAction::ToggleHand if self.scene == Scene::Chart => {
                self.toggle_cursor();
                true
            }
            InputAction::ClearChart if self.scene == Scene::Chart => {
                self.clear_chart();
                true
            }
            InputAction::NextAction if self.scene == Scene::Chart => {
                self.cycle_action();
                true
            }
            InputAction::NextHero if self.scene == Scene::Chart => {
                self.cycle_hero();
                true
            }
            InputAction::NextVillain if self.scene == Scene::Chart => self.cycle_villain(),
            InputAction::EditOpen if self.scene == Scene::Chart => {
                self.open_editor();
                true
            }
            InputAction::EditChar(c) => self.editor_push(c),
            InputAction::EditBackspace => self.editor_backspace(),
            InputAction::EditSubmit => self.editor_submit(),
            InputAction::EditCancel => self.editor_cancel(),
            InputAction::StartPractice if self.scene == Scene::Chart => {
                self.start_practice(Instant::now())
            }
            InputAction::Fold => self.decide(Decision::Fold),
            InputAction::Raise => self.decide(Decision::Raise),
            InputAction::Retry => self.drill.as_mut().is_some_and(Drill::retry),
            InputAction::NextHand => {
                let now = Instant::now();
                self.drill.as_mut().is_some_and(|d| d.next(now))
            }
            InputAction::LeavePractice => self.leave_practice(),
            _ => false,
        }
    }

    /// Snapshot the RFI ranges and deal the first practice hand.
    /// Refused while no RFI range is defined at any position.
    pub fn start_practice(&mut self, now: Instant) -> bool {
        let plan = self.ranges.training_plan(ActionKind::Rfi);
        if plan.is_empty() {
            self.set_notice("Define an RFI range before practising");
            return false;
        }
        let mut drill = Drill::new(plan, self.settings);
        drill.start(now);
        self.drill = Some(drill);
        self.last_cue = None;
        self.editor = None;
        self.scene = Scene::Practice;
        true
    }

    pub fn leave_practice(&mut self) -> bool {
        let Some(mut drill) = self.drill.take() else {
            return false;
        };
        drill.abandon();
        self.scene = Scene::Chart;
        true
    }

    fn decide(&mut self, decision: Decision) -> bool {
        if self.scene != Scene::Practice {
            return false;
        }
        let now = Instant::now();
        self.drill.as_mut().is_some_and(|d| d.decide(decision, now))
    }

    /// Whether the practice table is showing feedback for a wrong decision.
    pub fn feedback_open(&self) -> bool {
        self.drill.as_ref().is_some_and(|d| matches!(d.phase(), Phase::Feedback(_)))
    }

    /// Advance the practice sequence and expire old notices.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(at) = self.notice_at {
            if now.saturating_duration_since(at) >= Self::NOTICE_TTL {
                self.notice = None;
                self.notice_at = None;
            }
        }
        let Some(drill) = self.drill.as_mut() else {
            return;
        };
        drill.tick(now);
        if let Some(cue) = drill.take_cues().pop() {
            self.last_cue = Some(cue);
        }
    }

    pub fn cursor_label(&self) -> HandLabel {
        HandLabel::from_index(self.cursor).unwrap_or(HandLabel::pair(Rank::Ace))
    }

    /// Write any pending range update and stop the background writer.
    pub fn shutdown(&mut self) {
        if let Some(persister) = self.persister.take() {
            persister.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pacing;

    fn fast_app() -> AppState {
        let settings =
            DrillSettings { pacing: Pacing::instant(), seed: Some(3), ..DrillSettings::default() };
        AppState::new(RangeStore::default(), None, settings)
    }

    #[test]
    fn chart_inputs_ignored_during_practice() {
        let mut app = fast_app();
        let _ = app.handle_input(InputAction::ToggleHand);
        assert!(app.start_practice(Instant::now()));
        let before = app.ranges().clone();
        assert!(!app.handle_input(InputAction::ToggleHand));
        assert!(!app.handle_input(InputAction::ClearChart));
        assert_eq!(app.ranges(), &before);
    }

    #[test]
    fn decisions_ignored_outside_practice() {
        let mut app = fast_app();
        assert!(!app.handle_input(InputAction::Fold));
        assert!(!app.handle_input(InputAction::Raise));
        assert!(!app.handle_input(InputAction::Retry));
    }
}
