use anyhow::Result;
use clap::{Parser, Subcommand};
use devlua_lib::consts::CONFIG_FILENAME;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use output::OutputFormat;

/// devlua - reproducible development environments, declared in Lua
#[derive(Parser)]
#[command(name = "dev")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate the configuration for every declared platform
  Show {
    /// Path to the configuration file
    #[arg(default_value = CONFIG_FILENAME)]
    config: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Print the development shell for one platform
  Shell {
    /// Path to the configuration file
    #[arg(default_value = CONFIG_FILENAME)]
    config: String,

    /// Target platform triple (default: current host)
    #[arg(short, long)]
    platform: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// List the supported target platforms
  Platforms,

  /// Scaffold a starter configuration
  Init {
    /// Directory to create the configuration in
    #[arg(default_value = ".")]
    dir: String,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Show { config, format } => cmd::cmd_show(&config, format),
    Commands::Shell {
      config,
      platform,
      format,
    } => cmd::cmd_shell(&config, platform.as_deref(), format),
    Commands::Platforms => cmd::cmd_platforms(),
    Commands::Init { dir } => cmd::cmd_init(&dir),
  }
}
