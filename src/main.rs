use std::io;

use clap::Parser;

use rti_dash::app::DashboardApp;
use rti_dash::cli::{Cli, Command};
use rti_dash::commands;
use rti_dash::config::DashConfig;
use rti_dash::constants::POLL_INTERVAL;
use rti_dash::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use rti_dash::error::AppError;
use rti_dash::runner::run_dashboard;
use rti_dash::tracing_sub::{self, LogTarget};

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = DashConfig::try_from(&cli.options)?;
    let command = cli.command();

    let target = match (&config.log_file, &command) {
        (Some(path), _) => LogTarget::File(path.clone()),
        // stderr would scribble over the editor
        (None, Command::Run) => LogTarget::Discard,
        (None, _) => LogTarget::Stderr,
    };
    tracing_sub::init(config.log_level, &target)?;

    let mut stdout = io::stdout();
    match command {
        Command::Run => run(&config),
        Command::Export { path } => commands::export(&config, path.as_deref(), &mut stdout),
        Command::Import { path } => commands::import(&config, &path, &mut stdout),
        Command::Validate { path } => commands::validate(&path, &mut stdout),
        Command::Clear => commands::clear(&config, &mut stdout),
        Command::Presets => commands::list_presets(&mut stdout),
    }
}

fn run(config: &DashConfig) -> Result<(), AppError> {
    let mut app = DashboardApp::new(config.customizer(), config.columns, config.row_height);
    let mut output = ConsoleOutputDriver::new()?;
    run_dashboard(&mut app, ConsoleInputDriver::new(), &mut output, POLL_INTERVAL)?;
    Ok(())
}
