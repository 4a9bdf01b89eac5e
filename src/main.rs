#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use release_stats::{badges_cmd, chart_cmd, collect_cmd, export_cmd, show_cmd};

#[derive(Parser, Debug)]
#[command(name = "release-stats")]
#[command(about = "Track GitHub release download counts and derive rolling stats", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set RELEASE_STATS_LOG)
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest a release listing and append one snapshot to the history
    Collect {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// JSON release listing in the GitHub REST shape; use - for stdin
        #[arg(long, value_name = "releases.json")]
        listing: std::path::PathBuf,
        /// Base directory for stats data
        #[arg(long)]
        basedir: Option<std::path::PathBuf>,
        /// Sample time as unix seconds (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },

    /// Regenerate shields.io endpoint files from existing stats
    Badges {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// Base directory for stats data
        #[arg(long)]
        basedir: Option<std::path::PathBuf>,
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },

    /// Render light and dark SVG charts of the download history
    Chart {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// Base directory for stats data
        #[arg(long)]
        basedir: Option<std::path::PathBuf>,
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },

    /// Export the snapshot history as CSV
    Export {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// Base directory for stats data
        #[arg(long)]
        basedir: Option<std::path::PathBuf>,
        /// Output CSV file (stdout when omitted)
        #[arg(long)]
        output: Option<std::path::PathBuf>,
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },

    /// Print the latest summary for a tracked repository
    Show {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// Base directory for stats data
        #[arg(long)]
        basedir: Option<std::path::PathBuf>,
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("RELEASE_STATS_LOG").unwrap_or_else(|_| {
        if verbose { "release_stats=debug".to_string() } else { "release_stats=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Collect { owner, repo, listing, basedir, timestamp, config } => {
            collect_cmd::run(owner, repo, listing, basedir, timestamp, config)
        }
        Commands::Badges { owner, repo, basedir, config } => {
            badges_cmd::run(owner, repo, basedir, config)
        }
        Commands::Chart { owner, repo, basedir, config } => {
            chart_cmd::run(owner, repo, basedir, config)
        }
        Commands::Export { owner, repo, basedir, output, config } => {
            export_cmd::run(owner, repo, basedir, output, config)
        }
        Commands::Show { owner, repo, basedir, config } => {
            show_cmd::run(owner, repo, basedir, config)
        }
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
