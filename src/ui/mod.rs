mod app;
mod forms;
mod helpers;
mod preview;
mod screens;
mod terminal;

pub use app::{App, AppOptions, Screen};
pub use terminal::run_app;
