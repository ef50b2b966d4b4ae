//! `xl2imp` CLI application.

use super::types::Xl2ImpCli;
use crate::config::{load_pipeline_config, validate_config};
use crate::pipeline::{Pipeline, PipelineReport};
use clap::Parser;
use colored::Colorize;
use pointimp_core::config::PipelineConfig;
use pointimp_core::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Main `xl2imp` application
pub struct Xl2ImpApp {
    cli: Xl2ImpCli,
}

impl Xl2ImpApp {
    /// Create the application from command line arguments
    #[must_use]
    pub fn from_args() -> Self {
        Self {
            cli: Xl2ImpCli::parse(),
        }
    }

    /// Create the application from an already parsed command line
    #[must_use]
    pub fn new(cli: Xl2ImpCli) -> Self {
        Self { cli }
    }

    /// Run the application
    ///
    /// A validation failure is not an error: it is written to the import
    /// file and reported, and the run still succeeds.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the conversion hits
    /// an unexpected fault
    pub fn run(self) -> Result<()> {
        self.init_logging();

        match self.execute() {
            Ok(report) => {
                self.print_summary(&report);
                Ok(())
            }
            Err(err) => {
                error!("Conversion failed: {}", err);
                if !self.cli.quiet {
                    eprintln!("{}: {err}", "Error".red());
                }
                Err(err)
            }
        }
    }

    /// Resolve the configuration: defaults, then the config file, then
    /// command-line options
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be loaded or the result is
    /// invalid
    pub fn resolve_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_pipeline_config(path)?,
            None => PipelineConfig::default(),
        };
        self.cli.apply_overrides(&mut config);
        validate_config(&config)?;
        Ok(config)
    }

    fn execute(&self) -> Result<PipelineReport> {
        let config = self.resolve_config()?;
        info!(
            rules = %config.paths.rules.display(),
            workbook = %config.paths.workbook.display(),
            output = %config.paths.output.display(),
            "Converting point workbook"
        );
        Pipeline::new(config).run()
    }

    /// Configure tracing subscriber based on CLI flags; `RUST_LOG` wins
    fn init_logging(&self) {
        let level = if self.cli.quiet {
            "error"
        } else if self.cli.verbose {
            "debug"
        } else {
            "info"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        // A subscriber may already be installed when embedded or under test
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    fn print_summary(&self, report: &PipelineReport) {
        if self.cli.quiet {
            return;
        }

        if let Some(failure) = &report.failure {
            println!("{} {failure}", "✗".red());
            println!(
                "  {} contains only the validation failure",
                report.output.display()
            );
            return;
        }

        println!(
            "{} Wrote {} points to {}",
            "✓".green(),
            report.points_written,
            report.output.display()
        );
        if report.defaults_filled > 0 {
            println!("  {} defaults filled", report.defaults_filled);
        }
        if !report.sheets_skipped.is_empty() {
            println!(
                "  {} sheets skipped: {}",
                "!".yellow(),
                report.sheets_skipped.join(", ")
            );
        }
    }
}
