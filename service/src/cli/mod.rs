//! `xl2imp` command-line interface
//!
//! Thin front end over [`Pipeline`](crate::pipeline::Pipeline): resolves the
//! configuration from defaults, an optional YAML file and command-line
//! options, sets up logging and prints a short summary.

pub mod app;
pub mod types;

pub use app::Xl2ImpApp;
pub use types::Xl2ImpCli;

use pointimp_core::Result;

/// Run the CLI with the process arguments
///
/// # Errors
///
/// Returns error if the configuration is invalid or the conversion hits an
/// unexpected fault
pub fn run() -> Result<()> {
    Xl2ImpApp::from_args().run()
}
