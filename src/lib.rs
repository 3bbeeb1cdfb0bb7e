pub mod client;
pub mod config;
pub mod dates;
pub mod directory;
pub mod error;
pub mod models;
pub mod panel;
pub mod ui;

pub use error::{AppError, Result};
