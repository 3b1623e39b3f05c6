mod angle;
mod atoms;
pub mod canon;
mod config;
mod dihedral;
mod equivalence;
mod error;
mod filter;
mod improper;
mod primitive;
mod priority;
mod tables;

pub use config::{ConvertConfig, EquivalenceMode, StyleSelection};
pub use error::{Error, ReferenceKind};

use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use log::{debug, warn};

use crate::frc::{self, FrcDocument, Phase};
use crate::model::topology::{ForceField, Warning};
use equivalence::EquivalenceTable;
use improper::AngleAngleTerms;
use tables::Tables;

/// Converts FRC text into a normalized [`ForceField`].
pub fn convert(text: &str, config: &ConvertConfig) -> Result<ForceField, Error> {
    let document = frc::parse_str(text, &config.comment_chars);
    convert_document(&document, config)
}

pub fn convert_reader<R: BufRead>(reader: R, config: &ConvertConfig) -> Result<ForceField, Error> {
    let document = frc::read(reader, &config.comment_chars)?;
    convert_document(&document, config)
}

pub fn convert_file(path: impl AsRef<Path>, config: &ConvertConfig) -> Result<ForceField, Error> {
    let document = frc::read_file(path, &config.comment_chars)?;
    convert_document(&document, config)
}

/// Runs both conversion passes over an already-read document.
///
/// Primitive sections are applied before any cross term, so cross terms may
/// reference bonds and angles defined anywhere in the file.
pub fn convert_document(document: &FrcDocument, config: &ConvertConfig) -> Result<ForceField, Error> {
    let equivalences = EquivalenceTable::collect(document);
    let nonbond = atoms::collect_nonbond(document, config)?;
    let mode = config.equivalence_mode();

    let mut atom_types = atoms::collect_atom_types(document, config)?;
    for atom in &mut atom_types {
        atom.equivalence = equivalences.build(&atom.name, mode);
        atom.nonbond = nonbond
            .get(equivalences.nonbond_class(&atom.name))
            .copied();
    }

    let mut tables = Tables::default();
    for line in document.lines() {
        if line.kind.phase() == Phase::Primitive {
            primitive::apply(line, config, &mut tables)?;
        }
    }
    improper::assume_leaf_symmetry(&mut tables);

    let mut angle_angle = AngleAngleTerms::default();
    for line in document.lines() {
        if line.kind.phase() == Phase::CrossTerm {
            angle::apply(line, config, &mut tables)?;
            dihedral::apply(line, config, &mut tables)?;
            angle_angle.record(line, config, &mut tables)?;
        }
    }
    tables.resolve_reversal_symmetry()?;
    angle_angle.assemble(&mut tables)?;

    for &kind in document.unsupported() {
        tables.warn(Warning::UnsupportedSection(kind));
    }

    let identifiers = config.atom_types.as_ref().map(|_| {
        atom_types
            .iter()
            .flat_map(|atom| {
                equivalences
                    .build(&atom.name, EquivalenceMode::WithAuto)
                    .identifiers()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect::<HashSet<_>>()
    });
    filter::retain(&mut tables, config.include_auto, identifiers.as_ref());
    filter::order(&mut tables);

    for warning in &tables.warnings {
        warn!("{warning}");
    }
    debug!(
        "converted {} atom types, {} bonds, {} angles, {} dihedrals, {} impropers",
        atom_types.len(),
        tables.bonds.len(),
        tables.angles.len(),
        tables.dihedrals.len(),
        tables.impropers.len()
    );

    Ok(ForceField {
        atom_types,
        bond_increments: tables.bond_increments,
        bonds: tables.bonds,
        angles: tables.angles,
        dihedrals: tables.dihedrals,
        impropers: tables.impropers,
        warnings: tables.warnings,
    })
}
