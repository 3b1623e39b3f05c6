use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use super::atom::AtomType;
use super::key::{InteractionKey, Priority};
use super::types::{AngleStyle, BondStyle, InteractionStyle};
use crate::frc::SectionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CrossTermKind {
    /// Angle `[K, r1, r2]`.
    BondBond,
    /// Angle `[K1, K2, r1, r2]`.
    BondAngle,
    /// Dihedral `[F1, F2, F3, r_jk]`.
    MiddleBondTorsion,
    /// Dihedral `[L1, L2, L3, R1, R2, R3, r_ij, r_kl]`.
    EndBondTorsion,
    /// Dihedral `[L1, L2, L3, R1, R2, R3, theta_ijk, theta_jkl]`.
    AngleTorsion,
    /// Dihedral `[K, theta_ijk, theta_jkl]`.
    AngleAngleTorsion,
    /// Dihedral `[K, r_ij, r_kl]`.
    BondBond13,
    /// Improper `[M1, M2, M3, theta1, theta2, theta3]`.
    AngleAngle,
}

impl CrossTermKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::BondBond => "bb",
            Self::BondAngle => "ba",
            Self::MiddleBondTorsion => "mbt",
            Self::EndBondTorsion => "ebt",
            Self::AngleTorsion => "at",
            Self::AngleAngleTorsion => "aat",
            Self::BondBond13 => "bb13",
            Self::AngleAngle => "aa",
        }
    }
}

impl fmt::Display for CrossTermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pairs of canonical atom positions whose names may be exchanged without
/// changing the interaction's energy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymmetrySet(BTreeSet<(usize, usize)>);

impl SymmetrySet {
    pub fn insert(&mut self, a: usize, b: usize) {
        self.0.insert((a.min(b), a.max(b)));
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.0.contains(&(a.min(b), a.max(b)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for SymmetrySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (a, b)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({a},{b})")?;
        }
        f.write_str("}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    pub key: InteractionKey,
    pub priority: Priority,
    pub style: InteractionStyle,
    pub params: Vec<f64>,
    pub cross_terms: BTreeMap<CrossTermKind, Vec<f64>>,
    pub symmetry: SymmetrySet,
}

impl InteractionRecord {
    pub fn new(
        key: InteractionKey,
        priority: Priority,
        style: InteractionStyle,
        params: Vec<f64>,
    ) -> Self {
        Self {
            key,
            priority,
            style,
            params,
            cross_terms: BTreeMap::new(),
            symmetry: SymmetrySet::default(),
        }
    }

    pub fn cross_term(&self, kind: CrossTermKind) -> Option<&[f64]> {
        self.cross_terms.get(&kind).map(Vec::as_slice)
    }

    /// Equilibrium length (bonds) or angle (angles) of the primary term.
    pub fn baseline(&self) -> Option<f64> {
        let index = match self.style {
            InteractionStyle::Bond(BondStyle::Harmonic) => 1,
            InteractionStyle::Bond(BondStyle::Class2) => 0,
            InteractionStyle::Bond(BondStyle::Morse) => 2,
            InteractionStyle::Angle(AngleStyle::Harmonic) => 1,
            InteractionStyle::Angle(AngleStyle::Class2) => 0,
            InteractionStyle::Dihedral(_) | InteractionStyle::Improper(_) => return None,
        };
        self.params.get(index).copied()
    }
}

/// Interaction records of one family, unique by key.
///
/// Records keep the order in which their keys were first seen until
/// [`sort_by_priority`](Self::sort_by_priority) reorders them.
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    records: Vec<InteractionRecord>,
    index: HashMap<InteractionKey, usize>,
}

impl InteractionTable {
    pub fn get(&self, key: &InteractionKey) -> Option<&InteractionRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn contains(&self, key: &InteractionKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn get_mut(&mut self, key: &InteractionKey) -> Option<&mut InteractionRecord> {
        let i = *self.index.get(key)?;
        self.records.get_mut(i)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut InteractionRecord> {
        self.records.iter_mut()
    }

    /// Inserts a record, replacing any record with the same key in place.
    pub(crate) fn upsert(&mut self, record: InteractionRecord) {
        match self.index.get(&record.key) {
            Some(&i) => self.records[i] = record,
            None => {
                self.index.insert(record.key.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&InteractionRecord) -> bool) {
        self.records.retain(keep);
        self.reindex();
    }

    /// Orders records by descending priority; equal priorities keep their
    /// relative order.
    pub(crate) fn sort_by_priority(&mut self) {
        self.records.sort_by(|a, b| b.priority.cmp(&a.priority));
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.key.clone(), i))
            .collect();
    }
}

impl<'a> IntoIterator for &'a InteractionTable {
    type Item = &'a InteractionRecord;
    type IntoIter = std::slice::Iter<'a, InteractionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BondIncrement {
    pub key: InteractionKey,
    pub priority: Priority,
    /// Charge moved onto the first atom of the key.
    pub delta_ij: f64,
    /// Charge moved onto the second atom of the key.
    pub delta_ji: f64,
}

/// Non-fatal conditions found while converting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A recognized section whose terms are not converted.
    UnsupportedSection(SectionKind),
    /// A cross term with no class2 primary term to attach to; it was dropped.
    OrphanCrossTerm {
        key: InteractionKey,
        term: CrossTermKind,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSection(kind) => {
                write!(f, "{kind} terms are not supported and were ignored")
            }
            Self::OrphanCrossTerm { key, term } => {
                write!(f, "'{term}' term for {key} has no class2 primary term; dropped")
            }
        }
    }
}

/// The normalized result of one conversion run.
#[derive(Debug, Clone, Default)]
pub struct ForceField {
    pub atom_types: Vec<AtomType>,
    pub bond_increments: Vec<BondIncrement>,
    pub bonds: InteractionTable,
    pub angles: InteractionTable,
    pub dihedrals: InteractionTable,
    pub impropers: InteractionTable,
    pub warnings: Vec<Warning>,
}

impl ForceField {
    pub fn atom_type(&self, name: &str) -> Option<&AtomType> {
        self.atom_types.iter().find(|a| a.name == name)
    }

    /// Total number of bonded interaction records.
    pub fn interaction_count(&self) -> usize {
        self.bonds.len() + self.angles.len() + self.dihedrals.len() + self.impropers.len()
    }
}
