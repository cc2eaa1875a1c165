//! CLI module for ragchat.
//!
//! Argument parsing, version/help output and the interactive loop.
//!
//! # Usage
//!
//! ```ignore
//! use ragchat::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args())?;
//! if let Some(result) = run_cli_command(&command) {
//!     return result;
//! }
//! // CliCommand::Chat: start the REPL
//! ```

pub mod args;
pub mod repl;
pub mod version;

pub use args::{parse_args, ArgsError, ChatOptions, CliCommand};
pub use repl::{parse_line, run_repl, ReplInput};
pub use version::{handle_help_command, handle_version_command, VERSION};

use color_eyre::Result;

/// Run a CLI command if applicable.
///
/// Returns `None` for [`CliCommand::Chat`], which the caller runs itself.
/// The `Version` command never returns as it calls `std::process::exit(0)`.
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            handle_help_command();
            Some(Ok(()))
        }
        CliCommand::Chat(_) => None,
    }
}
