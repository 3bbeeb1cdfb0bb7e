//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod dashboard;
pub mod entity_panel;
pub mod settings_panel;
pub mod setup_wizard;

pub use app::App;
pub use setup_wizard::{SetupApp, SetupWizard};
