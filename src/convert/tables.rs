use std::collections::{BTreeSet, HashMap};

use super::canon;
use super::error::{Error, ReferenceKind};
use crate::model::key::{AtomName, InteractionKey};
use crate::model::topology::{BondIncrement, CrossTermKind, InteractionTable, Warning};

/// Reference geometry (r0 or theta0) of every primitive bond or angle line.
///
/// Recorded whether or not the line's style was selected, because cross
/// terms of the selected style still need it.
#[derive(Debug)]
pub struct Baselines {
    kind: ReferenceKind,
    values: HashMap<InteractionKey, (f64, bool)>,
}

impl Baselines {
    pub fn new(kind: ReferenceKind) -> Self {
        Self {
            kind,
            values: HashMap::new(),
        }
    }

    /// Records a baseline. A quartic value replaces any other, a quadratic
    /// or Morse value never replaces a quartic one.
    pub fn record(&mut self, key: InteractionKey, value: f64, quartic: bool) {
        match self.values.get(&key) {
            Some(&(_, true)) if !quartic => {}
            _ => {
                self.values.insert(key, (value, quartic));
            }
        }
    }

    pub fn get(&self, key: &InteractionKey) -> Option<f64> {
        self.values.get(key).map(|&(value, _)| value)
    }

    /// Looks up the baseline of a sub-interaction of `owner`.
    ///
    /// # Arguments
    ///
    /// * `owner` - The interaction whose cross term needs the value.
    /// * `names` - Encoded names of the sub-interaction, in any direction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedReference`] if no primitive line defines it.
    pub fn lookup(&self, owner: &InteractionKey, names: &[AtomName]) -> Result<f64, Error> {
        let (reference, _) = canon::chain(names.to_vec(), owner.is_auto());
        self.get(&reference).ok_or(Error::UnresolvedReference {
            key: owner.clone(),
            kind: self.kind,
            reference,
        })
    }
}

/// Mutable state shared by the conversion passes.
#[derive(Debug)]
pub struct Tables {
    pub bonds: InteractionTable,
    pub angles: InteractionTable,
    pub dihedrals: InteractionTable,
    pub impropers: InteractionTable,
    pub bond_increments: Vec<BondIncrement>,
    pub bond_baselines: Baselines,
    pub angle_baselines: Baselines,
    /// Cross terms that differ between the two directions of a chain interaction.
    pub asymmetric: HashMap<InteractionKey, BTreeSet<CrossTermKind>>,
    pub warnings: Vec<Warning>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            bonds: InteractionTable::default(),
            angles: InteractionTable::default(),
            dihedrals: InteractionTable::default(),
            impropers: InteractionTable::default(),
            bond_increments: Vec::new(),
            bond_baselines: Baselines::new(ReferenceKind::Bond),
            angle_baselines: Baselines::new(ReferenceKind::Angle),
            asymmetric: HashMap::new(),
            warnings: Vec::new(),
        }
    }
}

impl Tables {
    /// Adds a warning unless an identical one is already recorded.
    pub fn warn(&mut self, warning: Warning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Inserts or replaces a bond increment by key.
    pub fn upsert_increment(&mut self, increment: BondIncrement) {
        match self
            .bond_increments
            .iter_mut()
            .find(|existing| existing.key == increment.key)
        {
            Some(existing) => *existing = increment,
            None => self.bond_increments.push(increment),
        }
    }

    /// Checks that `key` has a class2 record able to take cross terms.
    ///
    /// Otherwise the cross term is to be dropped and a warning is recorded.
    pub fn expects_cross_term(
        &mut self,
        family: Family,
        key: &InteractionKey,
        term: CrossTermKind,
    ) -> bool {
        let found = self
            .table(family)
            .get(key)
            .is_some_and(|record| record.style.is_class2());
        if !found {
            self.warn(Warning::OrphanCrossTerm {
                key: key.clone(),
                term,
            });
        }
        found
    }

    /// Stores a cross term on an existing record and notes whether it reads
    /// the same in both directions.
    pub fn attach(
        &mut self,
        family: Family,
        key: &InteractionKey,
        term: CrossTermKind,
        values: Vec<f64>,
        symmetric: bool,
    ) {
        let table = match family {
            Family::Angle => &mut self.angles,
            Family::Dihedral => &mut self.dihedrals,
        };
        let Some(record) = table.get_mut(key) else {
            return;
        };
        record.cross_terms.insert(term, values);

        let broken = self.asymmetric.entry(key.clone()).or_default();
        if symmetric {
            broken.remove(&term);
        } else {
            broken.insert(term);
        }
    }

    fn table(&self, family: Family) -> &InteractionTable {
        match family {
            Family::Angle => &self.angles,
            Family::Dihedral => &self.dihedrals,
        }
    }

    /// Sets reversal symmetry on every bond, angle and dihedral.
    ///
    /// A record is reversal-symmetric unless one of its cross terms differs
    /// between directions; such a record must not have palindromic names.
    pub fn resolve_reversal_symmetry(&mut self) -> Result<(), Error> {
        for record in self.bonds.iter_mut() {
            record.symmetry.insert(0, 1);
        }
        for table in [&mut self.angles, &mut self.dihedrals] {
            for record in table.iter_mut() {
                let last = record.key.arity() - 1;
                let symmetric = self
                    .asymmetric
                    .get(&record.key)
                    .is_none_or(BTreeSet::is_empty);
                if symmetric {
                    record.symmetry.insert(0, last);
                    if last == 3 {
                        record.symmetry.insert(1, 2);
                    }
                } else if record.key.is_palindrome() {
                    let atoms = record.key.atoms();
                    return Err(Error::symmetry_contradiction(
                        &record.key,
                        &atoms[0],
                        &atoms[last],
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Chain family a direction-dependent cross term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Angle,
    Dihedral,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::key::Priority;
    use crate::model::topology::InteractionRecord;
    use crate::model::types::{AngleStyle, DihedralStyle, InteractionStyle};

    fn names(raw: &[&str]) -> Vec<AtomName> {
        raw.iter().map(|n| AtomName::encode(n)).collect()
    }

    fn key(raw: &[&str]) -> InteractionKey {
        canon::chain(names(raw), false).0
    }

    #[test]
    fn quartic_baseline_wins_over_quadratic() {
        let mut b = Baselines::new(ReferenceKind::Bond);
        b.record(key(&["c", "h"]), 1.09, false);
        b.record(key(&["c", "h"]), 1.10, true);
        b.record(key(&["c", "h"]), 1.08, false);
        assert_eq!(b.get(&key(&["c", "h"])), Some(1.10));
    }

    #[test]
    fn lookup_is_direction_independent() {
        let mut b = Baselines::new(ReferenceKind::Angle);
        b.record(key(&["h", "c", "o"]), 109.5, false);
        let owner = key(&["h", "c", "o", "h"]);
        assert_eq!(b.lookup(&owner, &names(&["o", "c", "h"])).unwrap(), 109.5);
    }

    #[test]
    fn missing_lookup_names_owner_and_reference() {
        let b = Baselines::new(ReferenceKind::Bond);
        let owner = key(&["c", "c", "h"]);
        let err = b.lookup(&owner, &names(&["h", "c"])).unwrap_err();
        match err {
            Error::UnresolvedReference {
                key,
                kind,
                reference,
            } => {
                assert_eq!(key, owner);
                assert_eq!(kind, ReferenceKind::Bond);
                assert_eq!(reference.to_string(), "c,h");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn auto_owner_looks_up_auto_baselines() {
        let mut b = Baselines::new(ReferenceKind::Bond);
        b.record(key(&["c", "h"]), 1.09, false);
        let auto_owner = canon::chain(names(&["h", "c", "c"]), true).0;
        assert!(b.lookup(&auto_owner, &names(&["c", "h"])).is_err());
    }

    #[test]
    fn cross_term_without_class2_primary_warns_once() {
        let mut tables = Tables::default();
        let k = key(&["h", "c", "h"]);
        tables.angles.upsert(InteractionRecord::new(
            k.clone(),
            Priority::default(),
            InteractionStyle::Angle(AngleStyle::Harmonic),
            vec![39.5, 106.4],
        ));
        assert!(!tables.expects_cross_term(Family::Angle, &k, CrossTermKind::BondBond));
        assert!(!tables.expects_cross_term(Family::Angle, &k, CrossTermKind::BondBond));
        assert_eq!(tables.warnings.len(), 1);
        let missing = key(&["o", "c", "o"]);
        assert!(!tables.expects_cross_term(Family::Angle, &missing, CrossTermKind::BondBond));
        assert_eq!(tables.warnings.len(), 2);
    }

    #[test]
    fn asymmetric_palindrome_is_a_contradiction() {
        let mut tables = Tables::default();
        let k = key(&["h", "c", "c", "h"]);
        tables.dihedrals.upsert(InteractionRecord::new(
            k.clone(),
            Priority::default(),
            InteractionStyle::Dihedral(DihedralStyle::Class2),
            vec![0.0; 6],
        ));
        tables.attach(Family::Dihedral, &k, CrossTermKind::EndBondTorsion, vec![], false);
        assert!(matches!(
            tables.resolve_reversal_symmetry(),
            Err(Error::SymmetryContradiction { .. })
        ));
    }

    #[test]
    fn symmetric_dihedral_gets_both_pairs() {
        let mut tables = Tables::default();
        let k = key(&["h", "c", "c", "o"]);
        tables.dihedrals.upsert(InteractionRecord::new(
            k.clone(),
            Priority::default(),
            InteractionStyle::Dihedral(DihedralStyle::Class2),
            vec![0.0; 6],
        ));
        tables.resolve_reversal_symmetry().unwrap();
        let record = tables.dihedrals.get(&k).unwrap();
        assert!(record.symmetry.contains(0, 3));
        assert!(record.symmetry.contains(1, 2));
    }
}
