use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "swrr",
    about = "swrr — smooth weighted round-robin pool tooling",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every pool in a pools.toml file
    Check {
        /// Path to pools.toml
        #[arg(short, long, default_value = "pools.toml")]
        config: String,
    },
    /// Print the dispatch order for whole selection cycles of one pool.
    ///
    /// A cycle is `total_weight` selections; over one cycle every backend
    /// is picked exactly `weight` times.
    Plan {
        /// Path to pools.toml
        #[arg(short, long, default_value = "pools.toml")]
        config: String,
        /// Pool name, as in [pools.<name>]
        #[arg(short, long)]
        pool: String,
        /// Number of cycles to print
        #[arg(long, default_value_t = 1)]
        cycles: u32,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Write a sample pools.toml
    Init {
        #[arg(short, long, default_value = "pools.toml")]
        path: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("swrr=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => commands::check::check(&config),
        Commands::Plan {
            config,
            pool,
            cycles,
            format,
        } => commands::plan::plan(&config, &pool, cycles, &format),
        Commands::Init { path, force } => commands::init::init(&path, force),
    }
}
