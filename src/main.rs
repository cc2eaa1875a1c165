use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use ragchat::adapters::{FileIdentity, InMemoryIdentity, ReqwestHttpClient};
use ragchat::cli::{parse_args, run_cli_command, run_repl, CliCommand};
use ragchat::client::ChatClient;
use ragchat::config::ClientConfig;

const DEFAULT_LOG_FILTER: &str = "ragchat=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // stdout carries the answer text, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args())?;
    if let Some(result) = run_cli_command(&command) {
        return result;
    }
    let CliCommand::Chat(options) = command else {
        return Ok(());
    };

    init_tracing();

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = options.base_url.as_deref() {
        config = config.with_base_url(base_url);
    }
    if let Some(user) = options.user.as_deref() {
        config = config.with_user(user);
    }

    let transport = ReqwestHttpClient::new();
    let mut client = match FileIdentity::new() {
        Ok(identity) => ChatClient::from_config(config, transport, &identity)?,
        Err(e) => {
            tracing::warn!(error = %e, "user id will not persist across runs");
            ChatClient::from_config(config, transport, &InMemoryIdentity::new())?
        }
    };

    tracing::info!(
        url = %client.config().chat_messages_url(),
        user = client.user_id(),
        "ragchat ready"
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_repl(&mut client, stdin, &mut stdout).await?;

    Ok(())
}
