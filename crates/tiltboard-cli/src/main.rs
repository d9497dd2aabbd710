use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tiltboard-cli", version, about = "Tiltboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one set of orientation inputs
    Classify(commands::classify::ClassifyArgs),
    /// Feed a JSON-lines sensor script through the dashboard
    Replay {
        /// Path to the script, one tagged update per line
        file: std::path::PathBuf,
    },
    /// Run a live countdown
    Countdown(commands::countdown::CountdownArgs),
    /// Run the stopwatch for a fixed time, recording laps
    Stopwatch(commands::stopwatch::StopwatchArgs),
    /// Wait for an alarm
    Alarm(commands::alarm::AlarmArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Replay { file } => commands::replay::run(&file),
        Commands::Countdown(args) => commands::countdown::run(args).await,
        Commands::Stopwatch(args) => commands::stopwatch::run(args).await,
        Commands::Alarm(args) => commands::alarm::run(args).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
