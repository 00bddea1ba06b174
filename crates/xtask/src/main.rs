use clap::Parser;
use clap::ValueEnum;
use clap_complete::Shell;
use cli::Commands;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
    let cli = cli::Cli::parse();

    match cli.command {
        Commands::Man { output, cmd } => {
            std::fs::create_dir_all(&output)?;
            clap_mangen::generate_to(cmd.command(), &output)?;
            tracing::info!("Man pages for {cmd} written to {output}");
        }
        Commands::Completions { output, cmd } => {
            let bin_name = cmd.to_string();
            let mut command = cmd.command();
            std::fs::create_dir_all(&output)?;
            for &shell in Shell::value_variants() {
                clap_complete::generate_to(shell, &mut command, &bin_name, &output)?;
            }
            tracing::info!("Completions for {cmd} written to {output}");
        }
    }
    Ok(())
}
