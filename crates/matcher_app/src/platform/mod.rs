mod app;
mod commands;
mod config;
mod documents;
mod effects;
mod ui;

pub use app::run_app;
