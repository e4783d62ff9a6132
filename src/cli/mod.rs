//! Command Line Interface (CLI) layer for whiteout.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! the console progress printer (`report`) and the orchestration logic
//! (`runner`). It wires user-provided options to the library functionality
//! exposed via `whiteout::api`.
//!
//! If you are embedding whiteout into another application, prefer using
//! the high-level `whiteout::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod report;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
