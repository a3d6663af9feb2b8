//! # awaybot — status triggers from the command line
//!
//! Composition root that wires all adapters together and runs one status
//! operation for one requester.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the blob store, Slack connector and secret store (adapters)
//! - Construct the status service, injecting adapters via port traits
//! - Run the requested operation and print its outcome
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use awaybot_adapter_secrets_file::FileSecretStore;
use awaybot_adapter_slack::{SlackConfig, SlackConnector};
use awaybot_adapter_storage_sqlite_sqlx::SqliteBlobStore;
use awaybot_app::ports::{BlobStore, PresenceConnector, SecretStore};
use awaybot_app::services::credentials::CredentialResolver;
use awaybot_app::services::status_service::StatusService;
use awaybot_app::services::trigger_repository::TriggerRepository;
use awaybot_domain::error::AwayError;
use awaybot_domain::payload::Payload;

use crate::config::{Config, DEFAULT_CONFIG_PATH};

/// Set your Slack presence, status and do-not-disturb from saved triggers.
#[derive(Debug, Parser)]
#[command(name = "awaybot", version)]
struct Cli {
    /// Configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    /// Slack user id of the requester.
    #[arg(long, env = "AWAYBOT_USER_ID")]
    user_id: String,
    /// Display name of the requester.
    #[arg(long, env = "AWAYBOT_USER_NAME", default_value = "")]
    user_name: String,
    /// Slack team id of the requester.
    #[arg(long, env = "AWAYBOT_TEAM_ID")]
    team_id: String,
    /// Display name of the requester's team.
    #[arg(long, env = "AWAYBOT_TEAM_NAME", default_value = "")]
    team_name: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Go back to active with no status and no snooze.
    Clear,
    /// Show every saved trigger.
    List,
    /// Apply a saved trigger.
    Trigger {
        /// Trigger name.
        name: String,
    },
    /// Save a trigger, e.g. `vacation = I'm on a boat! (⛵️) DND for 1w`.
    Create {
        /// Trigger definition.
        definition: String,
    },
}

impl Cli {
    fn payload(&self) -> Payload {
        Payload::new(
            self.user_id.clone(),
            self.user_name.clone(),
            self.team_id.clone(),
            self.team_name.clone(),
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    init_tracing(&config);

    // Database
    let db = awaybot_adapter_storage_sqlite_sqlx::Config::new(config.database_url())
        .build()
        .await?;
    let triggers = TriggerRepository::new(SqliteBlobStore::new(db.pool().clone()));

    // Slack
    let connector = SlackConnector::new(SlackConfig {
        api_url: config.slack.api_url.clone(),
        debug: config.slack.debug,
    })?;

    // Credentials
    let secret_store = config.secrets.dir.as_deref().map(FileSecretStore::new);
    let credentials = CredentialResolver::new(secret_store, config.credential_settings());

    let service = StatusService::new(triggers, connector, credentials);
    let payload = cli.payload();

    let code = match run(&service, &payload, cli.command).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "request failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    };

    db.close().await;
    Ok(code)
}

fn init_tracing(config: &Config) {
    let mut directives = config.logging.filter.clone();
    if config.slack.debug {
        directives.push_str(",awaybot_adapter_slack=debug");
    }
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one operation and return the text to show the requester.
async fn run<B, C, S>(
    service: &StatusService<B, C, S>,
    payload: &Payload,
    command: Command,
) -> Result<String, AwayError>
where
    B: BlobStore,
    C: PresenceConnector,
    S: SecretStore,
{
    match command {
        Command::Clear => {
            service.clear_status(payload).await?;
            Ok("Status cleared".to_string())
        }
        Command::List => service.list_triggers(payload).await,
        Command::Trigger { name } => {
            service.trigger(payload, &name).await?;
            Ok(format!("Triggered {name}"))
        }
        Command::Create { definition } => {
            let template = service.create_trigger(payload, &definition).await?;
            Ok(format!("Created {template}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("awaybot").chain(args.iter().copied()))
    }

    #[test]
    fn should_parse_create_with_requester() {
        let cli = parse(&[
            "--user-id",
            "U1",
            "--user-name",
            "ada",
            "--team-id",
            "T1",
            "create",
            "vacation = I'm on a boat! (⛵️) DND for 1w",
        ])
        .unwrap();

        assert_eq!(cli.payload(), Payload::new("U1", "ada", "T1", ""));
        assert!(matches!(
            cli.command,
            Command::Create { ref definition }
                if definition == "vacation = I'm on a boat! (⛵️) DND for 1w"
        ));
        assert_eq!(cli.config, "awaybot.toml");
    }

    #[test]
    fn should_parse_each_subcommand() {
        let base = ["--user-id", "U1", "--team-id", "T1"];
        let with = |rest: &[&'static str]| {
            let args: Vec<&str> = base.iter().chain(rest).copied().collect();
            parse(&args).unwrap().command
        };

        assert!(matches!(with(&["clear"]), Command::Clear));
        assert!(matches!(with(&["list"]), Command::List));
        assert!(matches!(
            with(&["trigger", "lunch"]),
            Command::Trigger { ref name } if name == "lunch"
        ));
    }

    #[test]
    fn should_reject_missing_subcommand() {
        assert!(parse(&["--user-id", "U1", "--team-id", "T1"]).is_err());
    }

    #[test]
    fn should_accept_custom_config_path() {
        let cli = parse(&[
            "--config",
            "/etc/awaybot.toml",
            "--user-id",
            "U1",
            "--team-id",
            "T1",
            "list",
        ])
        .unwrap();
        assert_eq!(cli.config, "/etc/awaybot.toml");
    }
}
