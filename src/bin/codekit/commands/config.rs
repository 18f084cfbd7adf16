use crate::error::{CliError, Result};
use crate::Context;
use clap::{Args, Subcommand};

#[derive(Subcommand)]
/// Internal enum.
pub enum Command {
    /// Print the effective configuration as TOML.
    Show,

    /// Print the config file path.
    Path,

    /// Write the effective configuration to the config file.
    Init(InitArgs),
}

#[derive(Args)]
/// Internal struct.
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

/// Internal helper function.
pub fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Show => {
            ctx.out.result(ctx.config.to_toml()?.trim_end());
            Ok(())
        }
        Command::Path => {
            ctx.out.result(ctx.config_path.display());
            Ok(())
        }
        Command::Init(args) => init(ctx, &args),
    }
}

/// Internal helper function.
fn init(ctx: &Context, args: &InitArgs) -> Result<()> {
    let path = &ctx.config_path;
    if path.exists() && !args.force {
        return Err(CliError::ConfigExists(path.display().to_string()));
    }

    // Refuse to persist a configuration that cannot build a codec.
    ctx.codec()?;
    ctx.config.save_to(path)?;
    ctx.out
        .info_user(format!("config written to {}", path.display()));
    Ok(())
}
