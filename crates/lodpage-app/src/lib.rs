//! The lodpage command-line front-ends.
//!
//! Settings resolution and command dispatch live here so the binary stays a
//! thin wrapper around [`run`].

mod run;

pub use run::{RunSummary, resolve_settings, run};
