mod commands;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "helm2bundle",
    about = "Packages a helm chart as a Service Bundle"
)]
#[command(version)]
struct Cli {
    /// Path to the packaged helm chart (.tgz)
    chart_file: String,
    /// Force overwrite of existing files
    #[arg(long, short = 'f')]
    force: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    commands::package(&cli.chart_file, cli.force)?;

    Ok(())
}
