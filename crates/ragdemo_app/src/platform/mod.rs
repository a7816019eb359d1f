//! Terminal shell around the core state machine and the engine.
mod app;
mod config;
mod effects;
mod input;
mod server_status;
mod ui;
mod visualization;

pub use app::run_app;
