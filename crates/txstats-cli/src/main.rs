mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "txstats", about = "Collect Transifex translation statistics")]
#[command(version)]
struct Cli {
    /// Directory containing txstats.toml
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download today's stats snapshot into PATH
    DownloadStats {
        /// Existing directory the snapshot is written to
        path: PathBuf,
        /// Pretty-print the JSON snapshot
        #[arg(long)]
        pretty: bool,
        /// Sum resources sharing the slug prefix before `--`
        #[arg(long)]
        group_by_category: bool,
    },
    /// Run the daily stats collection until interrupted
    Schedule {
        /// Output directory (defaults to OUTPUT_DATA or [output].dir)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// List the project's resources
    Resources,
    /// Check token, configuration and API access
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::DownloadStats {
            path,
            pretty,
            group_by_category,
        } => commands::download_stats(&cli.config_dir, &path, pretty, group_by_category).await?,
        Commands::Schedule { output } => commands::schedule(&cli.config_dir, output).await?,
        Commands::Resources => commands::resources(&cli.config_dir).await?,
        Commands::Doctor => commands::doctor(&cli.config_dir).await?,
    }

    Ok(())
}
