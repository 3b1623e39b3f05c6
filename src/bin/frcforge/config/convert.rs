use std::fs;

use anyhow::{Context, Result};
use frc_forge::{ConvertConfig, StyleSelection};

use crate::cli::{ConvertOptions, StyleOptions};

/// Builds the library configuration: the `--config` file first, then any
/// flag given on the command line.
pub fn build_convert_config(opts: &ConvertOptions, styles: &StyleOptions) -> Result<ConvertConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            ConvertConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => ConvertConfig::default(),
    };

    apply_styles(&mut config.styles, styles);

    if !opts.atoms.is_empty() {
        config.atom_types = Some(opts.atoms.iter().cloned().collect());
    }
    if opts.auto {
        config.include_auto = true;
    }
    if let Some(mode) = opts.equivalences {
        config.equivalences = Some(mode.into());
    }
    if let Some(chars) = &opts.comment_chars {
        config.comment_chars = chars.clone();
    }

    Ok(config)
}

fn apply_styles(selection: &mut StyleSelection, styles: &StyleOptions) {
    if let Some(style) = styles.bond_style {
        selection.bond = Some(style.into());
    }
    if let Some(style) = styles.angle_style {
        selection.angle = Some(style.into());
    }
    if let Some(style) = styles.dihedral_style {
        selection.dihedral = Some(style.into());
    }
    if let Some(style) = styles.improper_style {
        selection.improper = Some(style.into());
    }
    if let Some(style) = styles.pair_style {
        selection.pair = Some(style.into());
    }
}
