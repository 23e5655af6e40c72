//! Command execution: settings, wiring and dispatch

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::Invocation;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Execute the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.completions {
        print_completions(shell);
        return Ok(());
    }

    let mut settings = Settings::load()?;
    if cli.propagate_exit {
        settings.propagate_exit = true;
    }

    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    let container = ServiceContainer::new(settings);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&container, &cli.argv, &mut out)
}

/// Parse `argv`, run the child and apply the exit policy.
///
/// The echoed capture (if any) goes to `out`.
#[instrument(skip(container, out))]
pub fn run(container: &ServiceContainer, argv: &[String], out: &mut dyn Write) -> CliResult<()> {
    let invocation =
        Invocation::parse(argv, &container.settings.marker).map_err(ApplicationError::from)?;

    let capture = container.dispatch.dispatch(&invocation, out)?;
    out.flush().map_err(|e| InfraError::io("flush stdout", e))?;

    if container.settings.propagate_exit && !capture.success() {
        debug!("run: propagating exit_code={:?}", capture.exit_code);
        return Err(CliError::ChildExit(capture.exit_code));
    }
    Ok(())
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
}
