use crate::error::{CliError, Result};
use crate::Context;
use clap::Args;

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Code to check.
    pub code: String,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let codec = ctx.codec()?;
    if codec.verify(&args.code) {
        ctx.out.result("valid");
        Ok(())
    } else {
        ctx.out.result("invalid");
        Err(CliError::InvalidCode(args.code.clone()))
    }
}
