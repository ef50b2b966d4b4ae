//! CLI type definitions

use clap::Parser;
use pointimp_core::config::PipelineConfig;
use std::path::PathBuf;

/// `xl2imp` command-line interface
///
/// Every option falls back to the configuration file, then to the built-in
/// defaults (`Defaults.csv`, `Points.xlsx`, `output.imp`).
#[derive(Parser, Debug, Default)]
#[command(
    name = "xl2imp",
    version,
    about = "Convert a point workbook into a point import file"
)]
pub struct Xl2ImpCli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode - only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rules file with required flags and defaults
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// Point workbook, one sheet per record type
    #[arg(short, long)]
    pub workbook: Option<PathBuf>,

    /// Import file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 0-based column holding the point name
    #[arg(long)]
    pub point_name_column: Option<usize>,

    /// Fail on malformed rules file rows instead of skipping them
    #[arg(long)]
    pub strict_rules: bool,
}

impl Xl2ImpCli {
    /// Apply command-line values on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(rules) = &self.rules {
            config.paths.rules.clone_from(rules);
        }
        if let Some(workbook) = &self.workbook {
            config.paths.workbook.clone_from(workbook);
        }
        if let Some(output) = &self.output {
            config.paths.output.clone_from(output);
        }
        if let Some(column) = self.point_name_column {
            config.extract.point_name_column = column;
        }
        if self.strict_rules {
            config.rules.strict = true;
        }
    }
}
