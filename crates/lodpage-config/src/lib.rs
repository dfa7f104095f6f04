//! Configuration for lodpage.
//!
//! Provides the tunable paging heuristics and naming conventions, persisted
//! as RON with forward/backward compatible defaults, plus the clap command
//! line and its overrides.

mod cli;
mod config;
mod error;

pub use cli::{BuildArgs, CliArgs, Command, ConvertArgs, DEFAULT_CONVERT_OUTPUT};
pub use config::{InputSettings, LogSettings, OutputSettings, PagingSettings, Settings};
pub use error::ConfigError;
