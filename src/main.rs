use clap::{Parser, Subcommand};
use sentinel_config::{ReplaceConfigError, ReplaceOutcome, ReplacerConfig, ReplacerOptions};
use slog::Drain;
use std::error::Error;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "sentinelctl", version, about = "Manage a cluster through its leader sentinel")]
struct Cli {
    #[arg(long = "cluster-name", env = "SENTINELCTL_CLUSTER_NAME")]
    cluster_name: String,
    #[arg(
        long = "store-endpoints",
        env = "SENTINELCTL_STORE_ENDPOINTS",
        value_delimiter = ',',
        default_value = "http://127.0.0.1:2379"
    )]
    store_endpoints: Vec<String>,
    #[arg(long = "store-base-path")]
    store_base_path: Option<String>,
    #[arg(long = "store-timeout-ms")]
    store_timeout_ms: Option<u64>,
    #[arg(long = "leader-timeout-ms")]
    leader_timeout_ms: Option<u64>,
    #[arg(long = "debug")]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Replace the whole cluster configuration
    Replace {
        /// File containing the configuration to replace, or `-` for stdin
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },
}

const NO_CONFIG_FILE: &str = "no config file provided (--file/-f option)";

#[tokio::main]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{}", error_line(err.as_ref()));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let logger = create_root_logger_for_stderr(cli.debug);

    match cli.command {
        Commands::Config {
            command: ConfigCommands::Replace { file },
        } => {
            let file = file.ok_or(NO_CONFIG_FILE)?;
            let config = sentinel_config::read_config_source(&file)?;

            let replacer = sentinel_config::try_create_config_replacer(ReplacerConfig {
                cluster_name: cli.cluster_name,
                store_endpoints: cli.store_endpoints,
                logger: logger.clone(),
                options: ReplacerOptions {
                    store_request_timeout: cli.store_timeout_ms.map(Duration::from_millis),
                    leader_request_timeout: cli.leader_timeout_ms.map(Duration::from_millis),
                    store_base_path: cli.store_base_path,
                },
            })?;

            if let Err(e) = replacer.replace_config(&config).await {
                log_failure(&logger, &e);
                return Err(e.into());
            }
            slog::info!(logger, "Configuration replaced");
        }
    }

    Ok(())
}

fn log_failure(logger: &slog::Logger, e: &ReplaceConfigError) {
    match e.outcome() {
        ReplaceOutcome::Unresolvable => {
            slog::warn!(logger, "No leader sentinel right now, an election may be in progress. Retry later.")
        }
        ReplaceOutcome::TransportFailed => {
            slog::warn!(logger, "Leader sentinel may or may not have applied the configuration.")
        }
        ReplaceOutcome::StoreUnreachable | ReplaceOutcome::Rejected | ReplaceOutcome::NotSent => {}
    }
    if let Some(leader) = e.leader() {
        slog::debug!(logger, "Attempted leader sentinel: {:?}", leader);
    }
}

fn error_line(err: &dyn Error) -> String {
    format!("error: {}", sentinel_config::error_chain(err))
}

fn create_root_logger_for_stderr(debug: bool) -> slog::Logger {
    let level = if debug { slog::Level::Debug } else { slog::Level::Info };

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}
