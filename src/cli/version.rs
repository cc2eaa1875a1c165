//! Version and usage output.

/// The current version of ragchat, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: ragchat [OPTIONS]

Streams answers from a chat backend. Type a question and press Enter.

Options:
  --base-url <URL>  API base URL (env: RAGCHAT_BASE_URL)
  --user <ID>       caller identifier (env: RAGCHAT_USER)
  -h, --help        print this help
  -V, --version     print the version

Commands inside the chat:
  /reset            start a new conversation
  /quit             exit

Environment:
  RAGCHAT_API_KEY   bearer token for the backend
  RUST_LOG          log filter, e.g. ragchat=debug";

/// Handle the --version command.
///
/// Prints the version string and exits successfully.
pub fn handle_version_command() -> ! {
    println!("ragchat {}", VERSION);
    std::process::exit(0)
}

pub fn handle_help_command() {
    println!("{}", USAGE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_usage_lists_chat_commands() {
        assert!(USAGE.contains("/reset"));
        assert!(USAGE.contains("/quit"));
    }
}
