use crate::commands::DEFAULT_LENGTH;
use crate::error::Result;
use crate::Context;
use clap::Args;

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Code length (at least 6).
    #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let codec = ctx.codec()?;
    let max = codec.capacity(args.length)?;
    if max == u64::MAX {
        ctx.out
            .info_user(format!("length {} holds every u64 value", args.length));
    }
    ctx.out.result(max);
    Ok(())
}
