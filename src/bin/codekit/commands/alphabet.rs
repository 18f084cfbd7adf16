use crate::error::Result;
use crate::Context;
use clap::{Args, Subcommand};
use codekit::Alphabet;

#[derive(Subcommand)]
/// Internal enum.
pub enum Command {
    /// Validate an alphabet and print its base.
    Check(CheckArgs),

    /// Print a randomly shuffled copy of an alphabet.
    Shuffle(ShuffleArgs),
}

#[derive(Args)]
/// Internal struct.
pub struct CheckArgs {
    /// Alphabet to validate.
    pub alphabet: String,
}

#[derive(Args)]
/// Internal struct.
pub struct ShuffleArgs {
    /// Alphabet to shuffle (default: the configured alphabet).
    pub alphabet: Option<String>,
}

/// Internal helper function.
pub fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Check(args) => check(ctx, &args),
        Command::Shuffle(args) => shuffle(ctx, &args),
    }
}

/// Internal helper function.
fn check(ctx: &Context, args: &CheckArgs) -> Result<()> {
    let alphabet = Alphabet::new(&args.alphabet)?;
    ctx.out.info_user("alphabet is valid");
    ctx.out.result(format!("base: {}", alphabet.base()));
    Ok(())
}

/// Internal helper function.
fn shuffle(ctx: &Context, args: &ShuffleArgs) -> Result<()> {
    let source = args.alphabet.as_deref().unwrap_or(&ctx.config.alphabet);
    let alphabet = Alphabet::new(source)?;
    let shuffled = alphabet.shuffled(&mut rand::thread_rng());
    ctx.out
        .warn_user("codes issued with one alphabet cannot be decoded with another");
    ctx.out.result(shuffled);
    Ok(())
}
