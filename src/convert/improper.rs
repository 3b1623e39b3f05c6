//! Angle-angle coupling of class2 (Wilson) impropers.
//!
//! An improper with hub `J` and leaves `I`, `K`, `L` has three angle-angle
//! terms, one per leaf: the term of leaf `K` couples the angles `I-J-K` and
//! `K-J-L`, which share the bond `J-K`. An `#angle-angle` line
//! `I J K L M` gives the coefficient `M` of the term whose shared leaf is
//! the third atom.
//!
//! Lines arrive in arbitrary leaf orders, so each one fills the slot of its
//! shared leaf in the improper's canonical order. Once every line is read,
//! the three coefficients and the three leaf-hub-leaf reference angles
//! decide which leaves may be exchanged.

use std::collections::HashMap;

use super::canon::{self, LEAVES};
use super::config::ConvertConfig;
use super::error::Error;
use super::priority;
use super::tables::Tables;
use crate::frc::{SectionKind, SectionLine};
use crate::model::key::{AtomName, InteractionKey};
use crate::model::topology::{CrossTermKind, Warning};
use crate::model::types::{ImproperStyle, InteractionStyle};

/// Angle-angle coefficients collected per improper, by canonical leaf slot.
#[derive(Debug, Default)]
pub struct AngleAngleTerms {
    order: Vec<InteractionKey>,
    slots: HashMap<InteractionKey, [Option<f64>; 3]>,
}

impl AngleAngleTerms {
    /// Records one `#angle-angle` line.
    pub fn record(
        &mut self,
        line: &SectionLine,
        config: &ConvertConfig,
        tables: &mut Tables,
    ) -> Result<(), Error> {
        if line.kind != SectionKind::AngleAngle
            || !config.styles.accepts_improper(ImproperStyle::Class2)
        {
            return Ok(());
        }

        let raw = line.names(2..6);
        priority::resolve(raw, line.auto, line.line)?;
        let names = canon::encode4(raw);
        let (key, perm) = canon::wilson(names.clone(), line.auto);

        // The term couples angles I-J-K and K-J-L.
        for [a, b] in [[0, 2], [2, 3]] {
            let triple = [names[a].clone(), names[1].clone(), names[b].clone()];
            tables.angle_baselines.lookup(&key, &triple)?;
        }

        let has_primary = tables
            .impropers
            .get(&key)
            .is_some_and(|r| r.style == InteractionStyle::Improper(ImproperStyle::Class2));
        if !has_primary {
            tables.warn(Warning::OrphanCrossTerm {
                key,
                term: CrossTermKind::AngleAngle,
            });
            return Ok(());
        }

        let coefficient = line.number(6)?;
        let Some(slot) = LEAVES.iter().position(|&pos| perm[pos] == 2) else {
            return Ok(());
        };

        let slots = self.slots.entry(key.clone()).or_insert_with(|| {
            self.order.push(key);
            [None; 3]
        });
        slots[slot] = Some(coefficient);
        Ok(())
    }

    /// Completes every collected improper and stores its `aa` term and
    /// leaf-exchange symmetry.
    pub fn assemble(self, tables: &mut Tables) -> Result<(), Error> {
        for key in &self.order {
            let Some(&slots) = self.slots.get(key) else {
                continue;
            };
            let (aa, symmetry) = complete(key, slots, tables)?;
            if let Some(record) = tables.impropers.get_mut(key) {
                record.cross_terms.insert(CrossTermKind::AngleAngle, aa);
                record.symmetry.clear();
                for (p, q) in symmetry {
                    record.symmetry.insert(p, q);
                }
            }
        }
        Ok(())
    }
}

/// Gives every class2 improper full leaf symmetry; [`AngleAngleTerms::assemble`]
/// narrows it for impropers with angle-angle terms.
pub fn assume_leaf_symmetry(tables: &mut Tables) {
    for record in tables.impropers.iter_mut() {
        if record.style == InteractionStyle::Improper(ImproperStyle::Class2) {
            for (i, &p) in LEAVES.iter().enumerate() {
                for &q in &LEAVES[i + 1..] {
                    record.symmetry.insert(p, q);
                }
            }
        }
    }
}

type LeafPair = (usize, usize);

fn complete(
    key: &InteractionKey,
    mut slots: [Option<f64>; 3],
    tables: &Tables,
) -> Result<(Vec<f64>, Vec<LeafPair>), Error> {
    let names = key.atoms();

    for i in 0..3 {
        if slots[i].is_some() {
            continue;
        }
        let twin = (0..3)
            .filter(|&j| j != i && names[LEAVES[j]] == names[LEAVES[i]])
            .find_map(|j| slots[j]);
        slots[i] = twin;
    }

    let mut m = [0.0; 4];
    for (i, &pos) in LEAVES.iter().enumerate() {
        m[pos] = slots[i].ok_or_else(|| {
            Error::incomplete_cross_term(
                key,
                format!("no coefficient for the term sharing leaf '{}'", names[pos]),
            )
        })?;
    }

    let theta = |a: usize, b: usize| -> Result<f64, Error> {
        let triple: [AtomName; 3] = [names[a].clone(), names[1].clone(), names[b].clone()];
        tables.angle_baselines.lookup(key, &triple)
    };
    let t02 = theta(0, 2)?;
    let t03 = theta(0, 3)?;
    let t23 = theta(2, 3)?;
    let angle = |a: usize, b: usize| match (a.min(b), a.max(b)) {
        (0, 2) => t02,
        (0, 3) => t03,
        _ => t23,
    };

    let mut symmetry = Vec::new();
    for &leaf in &LEAVES {
        let [p, q] = others(leaf);
        let exchangeable = m[p] == m[q] && angle(leaf, p) == angle(leaf, q);
        if exchangeable {
            symmetry.push((p, q));
        } else if names[p] == names[q] {
            return Err(Error::symmetry_contradiction(key, &names[p], &names[q]));
        }
    }

    let aa = vec![m[2], m[0], m[3], t02, t03, t23];
    Ok((aa, symmetry))
}

/// The two leaves other than `leaf`, in ascending order.
fn others(leaf: usize) -> [usize; 2] {
    match leaf {
        0 => [2, 3],
        2 => [0, 3],
        _ => [0, 2],
    }
}
