use serde::{Deserialize, Serialize};
use std::fmt;

/// Preflop actions a hand can be tagged with.
///
/// Only [`ActionKind::Rfi`] is practised by the drill; `Call` and `ThreeBet`
/// are storable but villain-relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ActionKind {
    #[serde(rename = "RFI")]
    Rfi,
    #[serde(rename = "Call")]
    Call,
    #[serde(rename = "3bet")]
    ThreeBet,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::Rfi, ActionKind::Call, ActionKind::ThreeBet];

    /// Whether the chart for this action depends on the villain's position.
    pub const fn is_villain_relative(self) -> bool {
        !matches!(self, ActionKind::Rfi)
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActionKind::Rfi => "RFI",
            ActionKind::Call => "Call",
            ActionKind::ThreeBet => "3bet",
        }
    }

    /// Inverse of [`ActionKind::label`].
    pub fn from_label(label: &str) -> Option<ActionKind> {
        ActionKind::ALL.into_iter().find(|a| a.label() == label)
    }

    pub const fn describe(self) -> &'static str {
        match self {
            ActionKind::Rfi => "Open (RFI)",
            ActionKind::Call => "Cold-Call (vs RFI)",
            ActionKind::ThreeBet => "3bet (vs RFI)",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            ActionKind::Rfi => 1,
            ActionKind::Call => 1 << 1,
            ActionKind::ThreeBet => 1 << 2,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The set of actions tagged on one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    pub const fn contains(self, action: ActionKind) -> bool {
        self.0 & action.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, action: ActionKind) {
        self.0 |= action.bit();
    }

    pub fn remove(&mut self, action: ActionKind) {
        self.0 &= !action.bit();
    }

    pub fn toggle(&mut self, action: ActionKind) {
        self.0 ^= action.bit();
    }

    pub fn iter(self) -> impl Iterator<Item = ActionKind> {
        ActionKind::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl FromIterator<ActionKind> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        let mut set = ActionSet::EMPTY;
        for action in iter {
            set.insert(action);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_is_identity() {
        let mut set = ActionSet::EMPTY;
        set.toggle(ActionKind::Call);
        assert!(set.contains(ActionKind::Call));
        set.toggle(ActionKind::Call);
        assert_eq!(set, ActionSet::EMPTY);
    }

    #[test]
    fn iter_in_declaration_order() {
        let set: ActionSet = [ActionKind::ThreeBet, ActionKind::Rfi].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![ActionKind::Rfi, ActionKind::ThreeBet]);
    }

    #[test]
    fn serde_names_match_storage_format() {
        assert_eq!(serde_json::to_string(&ActionKind::ThreeBet).unwrap(), "\"3bet\"");
        assert_eq!(serde_json::from_str::<ActionKind>("\"RFI\"").unwrap(), ActionKind::Rfi);
    }
}
