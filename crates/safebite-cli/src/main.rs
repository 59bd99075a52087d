use clap::{Parser, Subcommand};
use safebite_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "safebite", version, about = "Safe Bite food journal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login(commands::auth::LoginArgs),
    /// Sign out and forget the remembered user
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Summary of the food journal
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Food log management
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Alertness, cause and medical reports
    Predict {
        #[command(subcommand)]
        action: commands::predict::PredictAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let cli = Cli::parse();
    let (config, load_error) = Config::load_or_default();
    init_tracing(&config);
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "falling back to default configuration");
    }

    let result = match cli.command {
        Commands::Login(args) => commands::auth::login(args, &config),
        Commands::Logout => commands::auth::logout(),
        Commands::Whoami => commands::auth::whoami(),
        Commands::Dashboard { json } => commands::dashboard::run(json),
        Commands::Log { action } => commands::log::run(action),
        Commands::Predict { action } => commands::predict::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
