use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "setloop", version, about = "Interval workout timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workout in the terminal
    Run(commands::run::RunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Edit the exercise list
    Exercise {
        #[command(subcommand)]
        action: commands::exercise::ExerciseAction,
    },
    /// Print a share link for the stored workout
    Share {
        /// Page the query string is attached to
        #[arg(long, default_value = commands::share::DEFAULT_BASE)]
        base: String,
    },
    /// Apply a share link to the stored workout
    Import {
        /// Full URL, `?query` or bare query string
        link: String,
    },
    /// Show the segments of one set
    Plan {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the selectable durations
    Durations,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SETLOOP_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Exercise { action } => commands::exercise::run(action),
        Commands::Share { base } => commands::share::share(&base),
        Commands::Import { link } => commands::share::import(&link),
        Commands::Plan { json } => commands::plan::plan(json),
        Commands::Durations => commands::plan::durations(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
