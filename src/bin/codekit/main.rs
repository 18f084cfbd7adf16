//! `codekit` CLI.

/// Internal module.
mod commands;
/// Internal module.
mod error;
/// Internal module.
mod output;

use clap::{Parser, Subcommand};
use codekit::config::{self, CodecConfig};
use codekit::Codec;
use error::{CliError, Result};
use output::Output;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "codekit")]
#[command(about = "Checksummed obfuscated codes for integers", version)]
#[command(arg_required_else_help = true)]
/// Internal struct.
struct Cli {
    /// Verbose output (debug logging on stderr).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (only results and errors).
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file path (default: ~/.codekit/config.toml or $CODEKIT_CONFIG).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the alphabet from the config file.
    #[arg(long, global = true, value_name = "SYMBOLS")]
    alphabet: Option<String>,

    /// Override the number scaling prime.
    #[arg(long, global = true, value_name = "PRIME", allow_negative_numbers = true)]
    prime1: Option<i64>,

    /// Override the position prime.
    #[arg(long, global = true, value_name = "PRIME", allow_negative_numbers = true)]
    prime2: Option<i64>,

    #[command(subcommand)]
    /// Internal field.
    command: Commands,
}

#[derive(Subcommand)]
/// Internal enum.
enum Commands {
    /// Encode numbers into codes.
    Encode(commands::encode::CmdArgs),

    /// Decode codes back into numbers.
    Decode(commands::decode::CmdArgs),

    /// Check whether a code is valid.
    Verify(commands::verify::CmdArgs),

    /// Show the largest number a code length can hold.
    Capacity(commands::capacity::CmdArgs),

    /// Alphabet helpers.
    Alphabet {
        #[command(subcommand)]
        /// Internal field.
        command: commands::alphabet::Command,
    },

    /// Configuration file helpers.
    Config {
        #[command(subcommand)]
        /// Internal field.
        command: commands::config::Command,
    },
}

/// Internal struct.
pub struct Context {
    /// Internal field.
    pub out: Output,
    /// Effective configuration (file + command line overrides).
    pub config: CodecConfig,
    /// Internal field.
    pub config_path: PathBuf,
}

impl Context {
    /// Build the codec from the effective configuration.
    pub fn codec(&self) -> Result<Codec> {
        let codec = self.config.build()?;
        self.out.info_diag(format!(
            "codec: base {}, primes {}/{}",
            codec.base(),
            codec.prime1(),
            codec.prime2()
        ));
        Ok(codec)
    }
}

fn main() {
    if let Err(err) = run() {
        Output::error_user(err.user_message());
        std::process::exit(1);
    }
}

/// Internal helper function.
fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.quiet && cli.verbose {
        return Err(CliError::QuietVerboseConflict);
    }
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let mut config = CodecConfig::load_from(&config_path)?;
    if let Some(alphabet) = cli.alphabet {
        config.alphabet = alphabet;
    }
    if let Some(prime1) = cli.prime1 {
        config.prime1 = prime1;
    }
    if let Some(prime2) = cli.prime2 {
        config.prime2 = prime2;
    }

    let ctx = Context {
        out: Output::new(cli.quiet, cli.verbose),
        config,
        config_path,
    };

    match cli.command {
        Commands::Encode(args) => commands::encode::run(&ctx, &args),
        Commands::Decode(args) => commands::decode::run(&ctx, &args),
        Commands::Verify(args) => commands::verify::run(&ctx, &args),
        Commands::Capacity(args) => commands::capacity::run(&ctx, &args),
        Commands::Alphabet { command } => commands::alphabet::run(&ctx, command),
        Commands::Config { command } => commands::config::run(&ctx, command),
    }
}

/// Internal helper function.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "codekit=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .init();
}
