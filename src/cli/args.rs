//! Command-line argument parsing for the ragchat binary.

use thiserror::Error;

/// Options for an interactive chat session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatOptions {
    /// Overrides `RAGCHAT_BASE_URL`
    pub base_url: Option<String>,
    /// Overrides `RAGCHAT_USER` and the stored identity
    pub user: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Start the interactive chat (default)
    Chat(ChatOptions),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("option '{0}' requires a value")]
    MissingValue(&'static str),
    #[error("unknown argument '{0}' (see --help)")]
    Unknown(String),
}

/// Parse command-line arguments and return the command to execute.
///
/// `--version` and `--help` win over everything after them. Values may be
/// given as `--base-url URL` or `--base-url=URL`.
///
/// # Examples
///
/// ```
/// use ragchat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["ragchat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = ChatOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline_value) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--base-url" => {
                let value = inline_value.or_else(|| args.next());
                options.base_url = Some(value.ok_or(ArgsError::MissingValue("--base-url"))?);
            }
            "--user" => {
                let value = inline_value.or_else(|| args.next());
                options.user = Some(value.ok_or(ArgsError::MissingValue("--user"))?);
            }
            _ => return Err(ArgsError::Unknown(arg)),
        }
    }

    Ok(CliCommand::Chat(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ArgsError> {
        let mut full = vec!["ragchat".to_string()];
        full.extend(args.iter().map(|s| s.to_string()));
        parse_args(full.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["--help"]), Ok(CliCommand::Help));
        assert_eq!(parse(&["-h"]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), Ok(CliCommand::Chat(ChatOptions::default())));
    }

    #[test]
    fn test_parse_options() {
        let command = parse(&["--base-url", "http://h/v1", "--user=alice"]).unwrap();
        assert_eq!(
            command,
            CliCommand::Chat(ChatOptions {
                base_url: Some("http://h/v1".to_string()),
                user: Some("alice".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_missing_value() {
        assert_eq!(
            parse(&["--base-url"]),
            Err(ArgsError::MissingValue("--base-url"))
        );
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            Err(ArgsError::Unknown("--unknown".to_string()))
        );
    }

    #[test]
    fn test_version_wins() {
        assert_eq!(parse(&["--user", "a", "-V"]), Ok(CliCommand::Version));
    }
}
