use anyhow::{Result, bail};

use crate::cli::CheckArgs;
use crate::config::build_convert_config;
use crate::display::{Context as DisplayContext, print_warnings};

use super::convert_input;

pub fn run_check(args: CheckArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_convert_config(&args.convert, &args.styles)?;

    let mut progress = ctx.progress();
    let ff = convert_input(&args.io, &args.convert, &config, &mut progress)?;

    print_warnings(&ff.warnings);

    if args.strict && !ff.warnings.is_empty() {
        bail!(
            "{} warning(s) reported and --strict is set",
            ff.warnings.len()
        );
    }

    progress.finish("Check passed");
    Ok(())
}
