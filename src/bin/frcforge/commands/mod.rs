mod check;
mod summary;

use check::run_check;
use summary::run_summary;

use anyhow::{Context, Result, bail};
use frc_forge::{ConvertConfig, ForceField, convert_reader};

use crate::cli::{Command, ConvertOptions, IoOptions};
use crate::display::{Context as DisplayContext, Progress};
use crate::io::{InputSource, open_input, stdin_is_tty};

pub fn dispatch(command: Command, ctx: DisplayContext) -> Result<()> {
    match command {
        Command::Summary(args) => run_summary(args, ctx),
        Command::Check(args) => run_check(args, ctx),
    }
}

/// Reads and converts the input named by `io` under one spinner.
fn convert_input(
    io: &IoOptions,
    opts: &ConvertOptions,
    config: &ConvertConfig,
    progress: &mut Progress,
) -> Result<ForceField> {
    if io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: frcforge <COMMAND> -i <FILE> or pipe an FRC file via stdin."
        );
    }

    let label = InputSource::label(io.input.as_deref());
    progress.begin("Converting force field");

    let input = open_input(io.input.as_deref())?;
    let ff = convert_reader(input, config)
        .with_context(|| format!("Failed to convert {label}"))?;

    progress.end("Converting force field", &convert_substeps(&label, opts, config));
    Ok(ff)
}

fn convert_substeps(label: &str, opts: &ConvertOptions, config: &ConvertConfig) -> Vec<String> {
    let mut steps = vec![format!("Read {label}")];

    if let Some(path) = &opts.config {
        steps.push(format!("Settings from {}", path.display()));
    }

    let styles = &config.styles;
    let chosen: Vec<String> = [
        styles.bond.map(|s| format!("bond {s}")),
        styles.angle.map(|s| format!("angle {s}")),
        styles.dihedral.map(|s| format!("dihedral {s}")),
        styles.improper.map(|s| format!("improper {s}")),
        styles.pair.map(|s| format!("pair {s}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if chosen.is_empty() {
        steps.push("All functional forms".to_string());
    } else {
        steps.push(format!("Styles: {}", chosen.join(", ")));
    }

    if let Some(types) = &config.atom_types {
        steps.push(format!("Restricted to {} atom type(s)", types.len()));
    }
    if config.include_auto {
        steps.push("Including auto-generalized parameters".to_string());
    }

    steps
}
