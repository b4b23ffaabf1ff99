//! Headless host for therapy sessions: configuration, logging, a simulated
//! player and the loop that drives activity engines against a [`Clock`].
//!
//! [`Clock`]: mindplay_timing::Clock

pub mod app;
pub mod cli;
pub mod config;
pub mod driver;
pub mod player;
pub mod telemetry;

pub use app::{App, SessionReport};
pub use config::SessionConfig;
