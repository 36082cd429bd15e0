//! Core library surface for the Card Studio TUI.
//!
//! The document model, the card view model and the vCard encoder are plain
//! data transformations; the persistence layer and the terminal UI sit on top.
//! `main.rs` only parses arguments and wires these pieces together.
pub mod db;
pub mod exchange;
pub mod images;
pub mod models;
pub mod phone;
pub mod render;
pub mod ui;
pub mod vcard;

/// Persistence entry points used while bootstrapping.
pub use db::{data_dir, default_db_path, load_or_default, open_store, persist};

/// The editable card and its rendered form.
pub use models::CardDocument;
pub use render::{render, CardView};

/// The interactive application entry point and state container.
pub use ui::{run_app, App, AppOptions};
