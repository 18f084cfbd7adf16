use crate::commands::DEFAULT_LENGTH;
use crate::error::Result;
use crate::Context;
use clap::Args;

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Non-negative integers to encode.
    #[arg(required = true)]
    pub numbers: Vec<u64>,

    /// Code length (at least 6).
    #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let codec = ctx.codec()?;
    for &number in &args.numbers {
        let code = codec.encode(number, args.length)?;
        ctx.out.info_diag(format!("{number} -> {code}"));
        ctx.out.result(code);
    }
    Ok(())
}
