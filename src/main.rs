//! agenthost - Main Entry Point
//!
//! CLI front end for the host coordinator: interactive chat against a remote
//! agent, registry-wide discovery, and configuration validation.

use agenthost::agent::{AgentConnector, AgentDiscovery};
use agenthost::config::HostConfig;
use agenthost::observability::init_default_logging;
use agenthost::registry::AgentRegistry;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use uuid::Uuid;

/// Host coordinator for A2A agent discovery and delegation
#[derive(Parser)]
#[command(name = "agenthost")]
#[command(about = "Host coordinator for A2A agent discovery and delegation")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat with a single remote agent
    Chat {
        /// Base URL of the agent
        #[arg(long, default_value = "http://localhost:11000")]
        agent: String,
        /// Session ID (use 0 to generate a new one)
        #[arg(long, default_value = "0")]
        session: String,
    },
    /// Resolve and print capability cards for all registered agents
    Discover,
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    info!("Starting agenthost v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Chat { agent, session } => run_chat(config, agent, session).await,
        Commands::Discover => run_discover(config).await,
        Commands::Config { show } => handle_config_command(config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<HostConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(HostConfig::load_from_file(path)?)
        }
        None => {
            // Try default locations before falling back to built-in defaults
            let default_paths = ["host.toml", "config/host.toml"];

            for path_str in default_paths {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(HostConfig::load_from_file(&path)?);
                }
            }

            info!("No configuration file found, using defaults");
            Ok(HostConfig::default())
        }
    }
}

/// Read-eval loop against one agent endpoint
///
/// Resolves the endpoint's card fresh before every send; the sentinel inputs
/// `quit` and `:q` end the session.
async fn run_chat(
    config: HostConfig,
    agent_url: String,
    session: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let session_id = if session == "0" {
        Uuid::new_v4().simple().to_string()
    } else {
        session
    };

    println!("Using session ID: {session_id}");

    let discovery = AgentDiscovery::new(
        AgentRegistry::from_urls([agent_url.clone()]),
        Duration::from_secs(config.http.discovery_timeout_secs),
    )?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout
            .write_all(b"\nWhat do you want to send to the agent? (type ':q' or 'quit' to exit)\n> ")
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let prompt = line.trim();
        if prompt.is_empty() {
            continue;
        }
        if matches!(prompt.to_lowercase().as_str(), "quit" | ":q") {
            break;
        }

        let card = match discovery.fetch_card(&agent_url).await {
            Ok(card) => card,
            Err(e) => {
                println!("Could not resolve agent at {agent_url}: {e}");
                continue;
            }
        };

        let connector = AgentConnector::new(card)
            .with_timeout(Duration::from_secs(config.http.delegation_timeout_secs));

        match connector.send_task(prompt, &session_id, None).await {
            Ok(result) => println!("\nAgent Response:\n{result}"),
            Err(e) => println!("\nDelegation failed: {e}"),
        }
    }

    Ok(())
}

/// Resolve and print the card of every registered agent
async fn run_discover(config: HostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let discovery = AgentDiscovery::from_config(&config)?;

    let registered = discovery.registry().len();
    let cards = discovery.list_agent_cards().await;

    println!("Resolved {}/{} registered agents", cards.len(), registered);
    for card in &cards {
        println!(
            "  {} - {} ({} skills) at {}",
            card.name,
            card.description,
            card.skills.len(),
            card.url
        );
    }

    Ok(())
}

fn handle_config_command(
    config: HostConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Configuration is valid");

    if show {
        println!("{}", toml::to_string_pretty(&config)?);
    }

    Ok(())
}
