use std::sync::Arc;

use clap::{Parser, Subcommand};

use agentlens_core::config::Config;
use agentlens_core::types::ToolCallEvent;
use agentlens_core::usage_store::UsageStore;
use agentlens_toolview::{ToolViewRegistry, resolve_tool_view};
use agentlens_usage::{HttpRunsSource, ThreadTimer, TimerOptions};

#[derive(Parser)]
#[command(
    name = "agentlens",
    about = "Tool-activity interpretation and usage-time accounting for agent threads",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List all registered tool identifiers with their resolution
    Tools,

    /// Resolve a single tool-call event
    Resolve {
        /// Tool identifier (e.g. "execute-command")
        #[arg(long)]
        name: String,

        /// Raw serialized payload
        #[arg(long, default_value = "")]
        payload: String,
    },

    /// Watch usage minutes for a thread in real time
    Watch {
        /// Thread id to watch
        #[arg(long)]
        thread: String,
    },

    /// Show version, config path, and data locations
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    // Load config
    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(Config::config_path);

    let config = Config::load(&config_path)?;

    match cli.command {
        Commands::Tools => {
            let registry = ToolViewRegistry::new();
            let mut names = registry.tool_names();
            names.sort();
            for name in names {
                let event = ToolCallEvent {
                    name: name.clone(),
                    payload: String::new(),
                };
                let resolved = resolve_tool_view(&registry, &event);
                println!(
                    "{name:32} {:10} {:?}  {}",
                    format!("{:?}", resolved.capability).to_lowercase(),
                    resolved.icon,
                    resolved.label
                );
            }
        }
        Commands::Resolve { name, payload } => {
            let registry = ToolViewRegistry::new();
            let event = ToolCallEvent { name, payload };
            let resolved = resolve_tool_view(&registry, &event);
            println!("capability: {:?}", resolved.capability);
            println!("label:      {}", resolved.label);
            println!("icon:       {:?}", resolved.icon);
            match resolved.summary {
                Some(summary) => println!("summary:    {summary}"),
                None => println!("summary:    (none)"),
            }
        }
        Commands::Watch { thread } => {
            let Some(backend) = config.backend.as_ref() else {
                anyhow::bail!(
                    "No backend configured. Set backend.base_url in {}",
                    config_path.display()
                );
            };

            let source = Arc::new(HttpRunsSource::new(backend)?);
            let store = Arc::new(UsageStore::new(config.usage_data_dir()));
            let timer = ThreadTimer::spawn(
                thread.clone(),
                source,
                store,
                TimerOptions::from_config(&config),
            )
            .await;

            tracing::info!("Watching usage for thread {thread} (Ctrl-C to stop)");
            let mut rx = timer.subscribe();
            let mut last_printed = String::new();
            loop {
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = *rx.borrow();
                        let line = format!(
                            "{}m{}",
                            snapshot.minutes_used.round() as i64,
                            if snapshot.is_running { " (running)" } else { "" }
                        );
                        if line != last_printed {
                            println!("{line}");
                            last_printed = line;
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        break;
                    }
                }
            }
        }
        Commands::Status => {
            println!("Agentlens v{}", env!("CARGO_PKG_VERSION"));
            println!("Config: {}", config_path.display());
            println!("Usage data: {}", config.usage_data_dir().display());
            match config.backend.as_ref() {
                Some(backend) => println!("Backend: {}", backend.base_url),
                None => println!("Backend: (not configured)"),
            }
        }
    }

    Ok(())
}
