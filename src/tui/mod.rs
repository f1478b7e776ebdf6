//! Terminal front end: the chart editor and the practice table.

pub mod app;
pub mod controller;
mod ui;
