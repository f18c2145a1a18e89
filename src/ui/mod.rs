//! Terminal and machine-readable output for the CLI

pub mod blocks;
pub mod ci;
pub mod context;
pub mod json;
pub mod output;
pub mod primitives;
pub mod status_line;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
