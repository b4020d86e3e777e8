pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod grid;
pub mod journal;
pub mod list;
pub mod logging;
pub mod model;
pub mod paint;
pub mod pattern;
pub mod revert;
pub mod sequencer;
pub mod session;
