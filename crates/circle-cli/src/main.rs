//! Circle CLI - Command-line interface for Circle
//!
//! This is the main entry point for users interacting with Circle.
//! Every command loads the dataset, builds the network once and runs a
//! single query against it.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "circle")]
#[command(author = "Circle Contributors")]
#[command(version)]
#[command(about = "Social network analysis over an account dataset", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Dataset CSV (defaults to `dataset` in .circle/config.json)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Config file (defaults to .circle/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Circle in a directory
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Dataset to record in the config
        #[arg(long)]
        dataset: Option<PathBuf>,
    },

    /// Show dataset and graph statistics
    Stats,

    /// Show a user's connection count and activity score
    Info {
        /// User name (case-insensitive)
        name: String,
    },

    /// Find mutual connections between two users
    Mutuals {
        /// First user name
        first: String,

        /// Second user name
        second: String,
    },

    /// List users whose metric is strictly above a threshold
    Above {
        /// Minimum value (exclusive)
        #[arg(allow_negative_numbers = true)]
        min: f64,

        /// Metric to filter on: popularity or activity
        #[arg(short, long, default_value = "popularity")]
        by: String,
    },

    /// Show the top N users by a metric
    Top {
        /// Number of users to show
        #[arg(allow_negative_numbers = true)]
        n: i64,

        /// Metric to rank by: popularity or activity
        #[arg(short, long, default_value = "popularity")]
        by: String,
    },

    /// List users in a category
    Category {
        /// Category label (case-insensitive)
        label: String,
    },

    /// Depth-first traversal from a user
    Dfs {
        /// Start user name
        name: String,
    },

    /// Breadth-first traversal from a user
    Bfs {
        /// Start user name
        name: String,
    },

    /// All-pairs shortest hop distances
    Distances {
        /// Rows and columns to show (defaults to config display_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Recommend new connections by shared peers
    Recommend {
        /// User name
        name: String,

        /// Recommendations to show (defaults to config recommendation_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a user's connections as a tree
    Tree {
        /// Root user name
        name: String,
    },

    /// Show the most popular users of a category as a tree
    CategoryTree {
        /// Category label (case-insensitive)
        label: String,
    },

    /// Export the network to JSON
    Export {
        /// Output file
        #[arg(short, long, default_value = "circle-graph.json")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = run(cli);

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> commands::Result<()> {
    let Cli {
        data,
        config,
        json,
        command,
        ..
    } = cli;
    let context = || commands::Context::new(data.clone(), config.as_deref(), json);

    match command {
        Commands::Init { path, dataset } => commands::init(&path, dataset.as_deref()),
        Commands::Stats => commands::stats(&context()?),
        Commands::Info { name } => commands::info(&context()?, &name),
        Commands::Mutuals { first, second } => commands::mutuals(&context()?, &first, &second),
        Commands::Above { min, by } => commands::above(&context()?, min, &by),
        Commands::Top { n, by } => commands::top(&context()?, n, &by),
        Commands::Category { label } => commands::category(&context()?, &label),
        Commands::Dfs { name } => {
            commands::traverse(&context()?, &name, commands::Walk::DepthFirst)
        }
        Commands::Bfs { name } => {
            commands::traverse(&context()?, &name, commands::Walk::BreadthFirst)
        }
        Commands::Distances { limit } => commands::distances(&context()?, limit),
        Commands::Recommend { name, limit } => commands::recommend(&context()?, &name, limit),
        Commands::Tree { name } => commands::tree(&context()?, &name),
        Commands::CategoryTree { label } => commands::category_tree(&context()?, &label),
        Commands::Export { output } => commands::export(&context()?, &output),
    }
}
