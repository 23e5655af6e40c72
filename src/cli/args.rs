//! CLI argument definitions using clap

use clap::{ArgAction, Parser};

/// Run a command, optionally echoing its captured stdout
///
/// Options are only recognised before the first positional argument;
/// everything from there on is passed to the command verbatim.
#[derive(Parser, Debug)]
#[command(name = "runcap")]
#[command(author, version, about)]
#[command(override_usage = "runcap [OPTIONS] [stdout] <COMMAND> [ARGS]...")]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Exit with the child's exit code instead of 0
    #[arg(long)]
    pub propagate_exit: bool,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Optional `stdout` marker, then the command and its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        required_unless_present_any = ["completions", "show_config"]
    )]
    pub argv: Vec<String>,
}
