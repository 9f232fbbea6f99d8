use anyhow::Result;
use clap::Parser;
use iconsmith::cli::{Cli, Commands};
use iconsmith::commands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init => commands::init::run(&cli),
        Commands::Serve { listen } => commands::serve::run(&cli, listen.clone()).await,
        Commands::Generate {
            input,
            output,
            favicon_only,
            stretch,
        } => commands::generate::run(&cli, input, output, *favicon_only, *stretch),
    }
}
