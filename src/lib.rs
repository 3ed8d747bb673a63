pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod gctrace;
pub mod metrics;
pub mod theme;
pub mod tui;
