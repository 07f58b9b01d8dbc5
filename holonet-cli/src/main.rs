use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "holonet", about = "Chat companion for Star Wars: The Old Republic")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage settings
    Config(commands::config::ConfigArgs),
    /// Validate messages and preview how they would be submitted
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Config(args) => commands::config::run(args).await,
        Commands::Check(args) => commands::check::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["holonet", "config", "show", "--verbose"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Config(_)));
    }

    #[test]
    fn check_subcommand() {
        let cli = Cli::parse_from(["holonet", "check", "hello"]);
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Check(_)));
    }
}
