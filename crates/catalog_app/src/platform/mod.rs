mod app;
mod config;
mod driver;
mod effects;
mod input;
mod ui;

pub use app::run_app;
