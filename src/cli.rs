use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

use crate::config::DashConfig;
use crate::constants::{DEFAULT_STORAGE_DIR, GRID_COLUMNS, ROW_HEIGHT, STORAGE_KEY};
use crate::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "rti-dash",
    version = env!("CARGO_PKG_VERSION"),
    about = "Customizable RTI/MTSS dashboard layout editor"
)]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Directory holding the saved layout.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_STORAGE_DIR, global = true)]
    pub storage_dir: PathBuf,

    /// Storage slot the layout is saved under.
    #[arg(long, value_name = "KEY", default_value = STORAGE_KEY, global = true)]
    pub storage_key: String,

    /// Quiet period before a change is written. 0 writes immediately.
    #[arg(long, value_name = "MS", default_value_t = 1000, global = true)]
    pub debounce_ms: u64,

    /// Layout used when nothing valid is saved.
    #[arg(long, value_name = "PRESET", default_value = "default", global = true)]
    pub preset: String,

    /// Grid columns.
    #[arg(long, value_name = "N", default_value_t = GRID_COLUMNS, global = true)]
    pub columns: u16,

    /// Terminal rows per grid row.
    #[arg(long, value_name = "N", default_value_t = ROW_HEIGHT, global = true)]
    pub row_height: u16,

    /// Append logs to this file. Without it logs are discarded while the
    /// editor runs and go to stderr for the other commands.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: Level,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the interactive editor (default).
    Run,
    /// Write the active layout as JSON to a file, or stdout.
    Export { path: Option<PathBuf> },
    /// Validate a JSON layout and make it the saved layout.
    Import { path: PathBuf },
    /// Check a JSON layout and report every problem found.
    Validate { path: PathBuf },
    /// Forget the saved layout.
    Clear,
    /// List the built-in presets.
    Presets,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}

impl TryFrom<&GlobalOptions> for DashConfig {
    type Error = AppError;

    fn try_from(opts: &GlobalOptions) -> Result<Self, Self::Error> {
        if opts.debounce_ms > 60_000 {
            return Err(AppError::Config(
                "debounce must be at most 60000 ms".to_string(),
            ));
        }
        let config = DashConfig {
            storage_dir: opts.storage_dir.clone(),
            storage_key: opts.storage_key.clone(),
            debounce: (opts.debounce_ms > 0).then(|| Duration::from_millis(opts.debounce_ms)),
            columns: opts.columns,
            row_height: opts.row_height,
            log_file: opts.log_file.clone(),
            log_level: opts.log_level,
            preset: Some(opts.preset.clone()),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run_with_defaults() {
        let cli = Cli::try_parse_from(["rti-dash"]).unwrap();
        assert_eq!(cli.command(), Command::Run);
        let config = DashConfig::try_from(&cli.options).unwrap();
        assert_eq!(config, DashConfig::default());
    }

    #[test]
    fn global_options_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "rti-dash",
            "export",
            "out.json",
            "--storage-key",
            "team_b",
            "--debounce-ms",
            "0",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(
            cli.command(),
            Command::Export {
                path: Some(PathBuf::from("out.json"))
            }
        );
        let config = DashConfig::try_from(&cli.options).unwrap();
        assert_eq!(config.storage_key, "team_b");
        assert_eq!(config.debounce, None);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cli = Cli::try_parse_from(["rti-dash", "--preset", "kanban"]).unwrap();
        assert!(DashConfig::try_from(&cli.options).is_err());
        let cli = Cli::try_parse_from(["rti-dash", "--debounce-ms", "90000"]).unwrap();
        assert!(DashConfig::try_from(&cli.options).is_err());
        assert!(Cli::try_parse_from(["rti-dash", "--log-level", "loud"]).is_err());
    }
}
