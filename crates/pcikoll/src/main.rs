//! Implements the CLI for pcikoll

use clap::Parser;
use eyre::WrapErr;
use pcikoll::cli::Cli;
use pcikoll::cli::Commands;
use pcikoll_core::Configuration;
use pcikoll_core::ids::IdPair;
use proc_exit::Code;
use proc_exit::Exit;
use std::io::BufWriter;
use std::io::Write;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod output;

#[cfg(target_env = "musl")]
use mimalloc::MiMalloc;

#[cfg(target_env = "musl")]
#[cfg_attr(target_env = "musl", global_allocator)]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> eyre::Result<Exit> {
    color_eyre::install()?;
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    let cli = Cli::parse();
    let config: Configuration = (&cli).try_into()?;

    let mut stdout = BufWriter::new(std::io::stdout().lock());
    let code = match cli.command {
        Commands::Devices => {
            let rows = pcikoll_core::query(&config);
            output::write_rows(&mut stdout, cli.format, &rows)?;
            Code::SUCCESS
        }
        Commands::Lookup {
            ref vendor,
            ref model,
            ref subsystem,
        } => {
            let subsystem = subsystem
                .as_deref()
                .map(|raw| {
                    IdPair::parse(raw).ok_or_else(|| {
                        eyre::eyre!("Invalid subsystem {raw:?}, expected VENDOR:DEVICE")
                    })
                })
                .transpose()?;
            let db = config.load_database();
            let report = output::lookup(&db, vendor, model.as_deref(), subsystem.as_ref());
            output::write_lookup(&mut stdout, cli.format, &report)?;
            if report.is_complete() {
                Code::SUCCESS
            } else {
                Code::FAILURE
            }
        }
    };
    stdout.flush().wrap_err("Failed to write output")?;
    Ok(Exit::new(code))
}
