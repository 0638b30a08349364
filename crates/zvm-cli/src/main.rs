//! zvm - a Zig toolchain version manager

use clap::Parser;
use tracing_subscriber::EnvFilter;

use zvm_cli::ui::Output;
use zvm_cli::{cmd, CacheCommands, Cli, Commands};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        Output::new().error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Install { version, verbose } => {
            cmd::install::install(&cli.index_url, &version, verbose).await
        }
        Commands::Update { version } => cmd::update::update(&cli.index_url, &version).await,
        Commands::Uninstall { version } => cmd::uninstall::uninstall(&version),
        Commands::List { online } => cmd::list::list(&cli.index_url, online).await,
        Commands::Use { version, global } => cmd::r#use::use_version(&version, global),
        Commands::Spawn { version, args } => cmd::spawn::spawn(&version, &args),
        Commands::Cache { command } => match command {
            CacheCommands::Clear => cmd::cache::clear(),
        },
    }
}
