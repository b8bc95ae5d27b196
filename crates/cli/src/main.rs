mod dispatch;
mod input;

use std::path::{Path, PathBuf};

use {
    anyhow::Context,
    clap::{Parser, Subcommand},
    herald_config::HeraldConfig,
    herald_pipeline::{OutputPlugin, OutputRegistry},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use crate::{dispatch::dispatch, input::MessageReader};

#[derive(Parser)]
#[command(name = "herald", about = "Herald: forward pipeline messages to chat rooms")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file (defaults to ./herald.toml or ~/.config/herald/herald.toml).
    #[arg(long, short, global = true, env = "HERALD_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Deliver messages to every configured output (default).
    Run {
        /// Read newline-delimited JSON messages from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Validate the config and build every output without sending anything.
    Check,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays free for command output.
    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Every output plugin this binary knows how to build.
fn output_registry() -> OutputRegistry {
    let mut registry = OutputRegistry::new();
    herald_hipchat::register(&mut registry);
    registry
}

fn build_outputs(
    registry: &OutputRegistry,
    config: &HeraldConfig,
) -> anyhow::Result<Vec<(String, Box<dyn OutputPlugin>)>> {
    config
        .outputs
        .iter()
        .map(|(name, section)| {
            let plugin = registry
                .build(&section.plugin, section.settings_value())
                .with_context(|| {
                    format!(
                        "output {name:?} (known types: {})",
                        registry.names().join(", ")
                    )
                })?;
            Ok((name.clone(), plugin))
        })
        .collect()
}

fn load(cli: &Cli) -> anyhow::Result<Vec<(String, Box<dyn OutputPlugin>)>> {
    let (path, config) = herald_config::discover_and_load(cli.config.as_deref())?;
    info!(path = %path.display(), outputs = config.outputs.len(), "loaded config");
    build_outputs(&output_registry(), &config)
}

fn check(cli: &Cli) -> anyhow::Result<()> {
    for (name, plugin) in load(cli)? {
        println!("ok  {name} ({})", plugin.name());
    }
    Ok(())
}

async fn run(cli: &Cli, input: Option<&Path>) -> anyhow::Result<()> {
    let outputs = load(cli)?;
    let mut reader = MessageReader::open(input).await?;
    let summary = dispatch(&mut reader, outputs).await?;
    info!(
        messages = summary.messages,
        skipped = summary.skipped,
        recycled = summary.recycled,
        errors = summary.errors,
        "input exhausted, all outputs stopped"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_telemetry(&cli);

    match &cli.command {
        None => run(&cli, None).await,
        Some(Commands::Run { input }) => run(&cli, input.as_deref()).await,
        Some(Commands::Check) => check(&cli),
    }
}
