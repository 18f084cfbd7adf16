use crate::error::{CliError, Result};
use crate::Context;
use clap::Args;

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Codes to decode.
    #[arg(required = true)]
    pub codes: Vec<String>,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let codec = ctx.codec()?;
    for code in &args.codes {
        let number = codec
            .decode(code)
            .map_err(|_| CliError::InvalidCode(code.clone()))?;
        ctx.out.info_diag(format!("{code} -> {number}"));
        ctx.out.result(number);
    }
    Ok(())
}
