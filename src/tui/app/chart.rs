use crate::hand::{grid_step, GridStep};
use crate::range::context::{hero_positions, villain_positions};
use crate::range::{ActionKind, RangeSlot, TrainingContext};
use std::borrow::Cow;

use super::AppState;

/// Longest range text the editor accepts.
const EDITOR_LIMIT: usize = 2048;

impl AppState {
    /// The chart currently shown in the editor.
    pub fn context(&self) -> TrainingContext {
        TrainingContext::new(self.action, self.hero, Some(self.villain))
    }

    pub fn slot(&self) -> Cow<'_, RangeSlot> {
        self.ranges.slot(self.context())
    }

    pub fn range_text(&self) -> String {
        self.ranges.format(self.context(), self.action)
    }

    pub fn percentage_label(&self) -> String {
        self.ranges.percentage_label(self.context(), self.action)
    }

    pub fn editor_active(&self) -> bool {
        self.editor.is_some()
    }

    pub fn editor_text(&self) -> Option<&str> {
        self.editor.as_deref()
    }

    // --- Grid ---
    pub fn move_cursor(&mut self, step: GridStep) {
        self.cursor = grid_step(self.cursor, step);
    }

    pub fn toggle_cursor(&mut self) {
        let (ctx, label, action) = (self.context(), self.cursor_label(), self.action);
        self.update_ranges(|r| r.toggle(ctx, label, action));
    }

    pub fn clear_chart(&mut self) {
        let ctx = self.context();
        self.update_ranges(|r| r.clear(ctx));
    }

    // --- Chart selection ---
    pub fn cycle_action(&mut self) {
        let all = ActionKind::ALL;
        let i = all.iter().position(|a| *a == self.action).unwrap_or(0);
        self.action = all[(i + 1) % all.len()];
        self.fit_hero();
    }

    pub fn cycle_hero(&mut self) {
        let heroes = hero_positions(self.action, Some(self.villain));
        if heroes.is_empty() {
            return;
        }
        let next = heroes.iter().position(|p| *p == self.hero).map_or(0, |i| (i + 1) % heroes.len());
        self.hero = heroes[next];
    }

    /// Only villain-relative actions have a villain to pick.
    pub fn cycle_villain(&mut self) -> bool {
        if !self.action.is_villain_relative() {
            return false;
        }
        let villains = villain_positions();
        let next =
            villains.iter().position(|p| *p == self.villain).map_or(0, |i| (i + 1) % villains.len());
        self.villain = villains[next];
        self.fit_hero();
        true
    }

    /// Keep the hero on a position that makes sense for the action and villain.
    fn fit_hero(&mut self) {
        let heroes = hero_positions(self.action, Some(self.villain));
        if !heroes.contains(&self.hero) {
            if let Some(first) = heroes.first() {
                self.hero = *first;
            }
        }
    }

    // --- Range text editor ---
    pub fn open_editor(&mut self) {
        self.editor = Some(self.range_text());
    }

    pub(crate) fn editor_push(&mut self, c: char) -> bool {
        let Some(buf) = self.editor.as_mut() else {
            return false;
        };
        if buf.len() >= EDITOR_LIMIT || c.is_control() {
            return false;
        }
        buf.push(c);
        true
    }

    pub(crate) fn editor_backspace(&mut self) -> bool {
        self.editor.as_mut().is_some_and(|buf| buf.pop().is_some())
    }

    /// Replace the chart's membership for the current action with the typed text.
    pub(crate) fn editor_submit(&mut self) -> bool {
        let Some(text) = self.editor.take() else {
            return false;
        };
        let (ctx, action) = (self.context(), self.action);
        self.update_ranges(|r| r.apply_notation(ctx, action, &text));
        true
    }

    pub(crate) fn editor_cancel(&mut self) -> bool {
        self.editor.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{Position, VillainKey};

    #[test]
    fn action_change_moves_hero_to_admissible_position() {
        let mut app = AppState::default();
        assert_eq!(app.hero, Position::Utg);
        app.cycle_action();
        assert_eq!(app.action, ActionKind::Call);
        // nobody acts before UTG, so the hero moves after the villain
        assert_eq!(app.hero, Position::Mp);
        assert_eq!(app.context().villain, VillainKey::Vs(Position::Utg));
    }

    #[test]
    fn villain_cycle_only_for_villain_relative_actions() {
        let mut app = AppState::default();
        assert!(!app.cycle_villain());
        app.cycle_action();
        assert!(app.cycle_villain());
        assert_eq!(app.villain, Position::Mp);
        assert_eq!(app.hero, Position::Co);
    }

    #[test]
    fn editor_rejects_control_characters() {
        let mut app = AppState::default();
        app.open_editor();
        assert!(!app.editor_push('\n'));
        assert!(app.editor_push('A'));
        assert_eq!(app.editor_text(), Some("A"));
    }
}
