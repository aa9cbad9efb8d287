//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `check` | Validate a model document and report errors/warnings |
//! | `show` | List elements, optionally filtered by kind |
//! | `tree` | Print the strategy-rooted hierarchy |
//! | `render` | Render the model outline as markdown |
//! | `stats` | Per-kind counts and reference totals |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! blueprint --verbose check model.yaml
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod check;
mod output;
mod query;
mod render;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
