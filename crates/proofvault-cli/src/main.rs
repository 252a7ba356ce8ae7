use anyhow::Result;
use clap::Parser;

mod args;
mod cmd;
mod output;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = args::Cli::parse();
    output::init(cli.json);

    cmd::dispatch(cli).await
}
