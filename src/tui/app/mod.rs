mod chart;
mod state;

pub use state::{AppState, InputAction, Scene};
