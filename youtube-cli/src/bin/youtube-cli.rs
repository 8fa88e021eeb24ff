use clap::Parser;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_cli::cli::Cli;
use youtube_cli::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    // stdout belongs to the command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    let config = Config::from_args(&cli.global)?;
    let yt = youtube_cli::authorize(&config, cli.command.scopes()).await?;

    let mut stdout = std::io::stdout().lock();
    let mut stdin = std::io::stdin().lock();
    cli.command.run(&yt, &mut stdout, &mut stdin).await
}
