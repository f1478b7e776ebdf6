//! range-trainer: preflop range charts and a six-max practice table
//!
//! Goals:
//! - Edit range charts per (action, hero position, villain position) and persist them
//! - Drill the charts: deal a hand at a trained position, decide fold or raise, get feedback
//! - No panics on bad input; bad range text and corrupt storage degrade to empty results
//!
//! ## Quick start: build a chart and check a decision
//! ```
//! use range_trainer::drill::{is_correct, Decision};
//! use range_trainer::hand::HandLabel;
//! use range_trainer::range::{ActionKind, Position, RangeStore, TrainingContext};
//!
//! let ctx = TrainingContext::rfi(Position::Btn);
//! let store = RangeStore::default().apply_notation(ctx, ActionKind::Rfi, "22-AA, AKs");
//! assert_eq!(store.format(ctx, ActionKind::Rfi), "AA, AKs, KK, QQ, JJ, TT, 99, 88, 77, 66, 55, 44, 33, 22");
//!
//! let plan = store.training_plan(ActionKind::Rfi);
//! let hand: HandLabel = "AKs".parse().unwrap();
//! assert!(is_correct(&plan, Position::Btn, hand, Decision::Raise));
//! ```
//!
//! ## TUI
//! Run the interactive trainer with:
//! ```sh
//! cargo run --bin range-trainer
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod drill;
pub mod hand;
pub mod logging;
pub mod range;
pub mod storage;
pub mod table;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
