pub mod app;
pub mod catalog;
pub mod config;
pub mod download;
pub mod error;
pub mod event;
pub mod gemini;
pub mod markdown;
pub mod session;
pub mod tutor;
pub mod ui;
pub mod upload;
pub mod util;
pub mod visualizer;

pub use config::Config;
pub use error::{Result, TutorError};
