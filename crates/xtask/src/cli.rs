use camino::Utf8PathBuf;
use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[clap(disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Generate man page
    Man {
        /// Output directory
        #[arg(short, long)]
        output: Utf8PathBuf,
        /// Command to generate for
        #[arg(default_value_t = CommandName::Pcikoll)]
        cmd: CommandName,
    },
    /// Generate shell completions
    Completions {
        /// Output directory
        #[arg(short, long)]
        output: Utf8PathBuf,
        /// Command to generate for
        #[arg(default_value_t = CommandName::Pcikoll)]
        cmd: CommandName,
    },
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, clap::ValueEnum)]
pub(crate) enum CommandName {
    Pcikoll,
}

impl CommandName {
    pub(crate) fn command(self) -> clap::Command {
        use clap::CommandFactory;
        match self {
            Self::Pcikoll => pcikoll::cli::Cli::command(),
        }
    }
}

impl std::fmt::Display for CommandName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pcikoll => write!(f, "pcikoll"),
        }
    }
}
