use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use modkit_discovery::{Discovery, DiscoverySettings};

mod output;

#[derive(Parser)]
#[command(name = "modkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Discover installed modkit extension modules",
    long_about = "modkit scans an installed-module tree and lists the modules \
                  that other tooling can load as plugins."
)]
struct Cli {
    /// Module root to scan (defaults to MODKIT_ROOT or the executable's directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Maximum traversal depth (defaults to MODKIT_MAX_DEPTH or unbounded)
    #[arg(long, global = true)]
    depth: Option<usize>,

    /// Emit records as JSON instead of the human listing
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every module beneath the root
    List,
    /// List only the modules that carry a plugin configuration
    Plugins,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = DiscoverySettings::from_env();
    if let Some(root) = cli.root {
        settings.root = root;
    }
    if let Some(depth) = cli.depth {
        settings.max_depth = Some(depth);
    }

    let discovery = Discovery::with_settings(settings);
    let (records, noun) = match cli.command {
        Commands::List => (discovery.list_modules(None)?, "modules"),
        Commands::Plugins => (discovery.list_plugin_modules(None)?, "plugin modules"),
    };
    tracing::debug!("rendering {} records", records.len());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&*records)?);
    } else {
        output::render(&records, noun);
    }

    Ok(())
}
