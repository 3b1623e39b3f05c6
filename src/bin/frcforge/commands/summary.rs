use anyhow::Result;

use crate::cli::SummaryArgs;
use crate::config::build_convert_config;
use crate::display::{
    Context as DisplayContext, print_atom_types, print_interactions,
    print_model_summary, print_warnings,
};

use super::convert_input;

pub fn run_summary(args: SummaryArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_convert_config(&args.convert, &args.styles)?;

    let mut progress = ctx.progress();
    let ff = convert_input(&args.io, &args.convert, &config, &mut progress)?;

    print_model_summary(&ff);
    print_atom_types(&ff, args.limit);
    print_interactions(&ff, args.limit);
    print_warnings(&ff.warnings);

    progress.finish("Conversion complete");
    Ok(())
}
