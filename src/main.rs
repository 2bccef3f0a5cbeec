use clap::Parser;
use quiz_forge::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.config.init_logging();
    log::debug!("using store {}", cli.config.store.display());

    cli::run(cli).await?;
    Ok(())
}
