use std::collections::HashSet;

use log::debug;

use super::priority;
use super::tables::Tables;
use crate::model::key::InteractionKey;

/// Drops auto records and bond increments, and records that mention atoms
/// outside the allow-list.
///
/// `identifiers` holds every equivalence identifier of the allowed atom
/// types; `None` keeps every record.
pub fn retain(tables: &mut Tables, include_auto: bool, identifiers: Option<&HashSet<String>>) {
    let keep = |key: &InteractionKey| {
        (include_auto || !key.is_auto()) && identifiers.is_none_or(|ids| mentions_only(key, ids))
    };

    for (family, table) in [
        ("bond", &mut tables.bonds),
        ("angle", &mut tables.angles),
        ("dihedral", &mut tables.dihedrals),
        ("improper", &mut tables.impropers),
    ] {
        let before = table.len();
        table.retain(|record| keep(&record.key));
        if table.len() != before {
            debug!("dropped {} {family} record(s)", before - table.len());
        }
    }

    if include_auto {
        tables.bond_increments.retain(|inc| keep(&inc.key));
    } else {
        tables.bond_increments.clear();
    }
}

/// Orders every table by descending priority, stable on discovery order.
pub fn order(tables: &mut Tables) {
    for table in [
        &mut tables.bonds,
        &mut tables.angles,
        &mut tables.dihedrals,
        &mut tables.impropers,
    ] {
        table.sort_by_priority();
    }
    tables
        .bond_increments
        .sort_by(|a, b| b.priority.cmp(&a.priority));
}

fn mentions_only(key: &InteractionKey, identifiers: &HashSet<String>) -> bool {
    key.atoms()
        .iter()
        .filter(|name| !name.is_wildcard())
        .all(|name| {
            let label = name.as_str().replace("\\*", "*");
            identifiers.contains(priority::base_label(&label))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::canon;
    use crate::model::key::{AtomName, Priority};
    use crate::model::topology::{BondIncrement, InteractionRecord};
    use crate::model::types::{BondStyle, InteractionStyle};

    fn bond(raw: &[&str], auto: bool, level: i64) -> InteractionRecord {
        let names = raw.iter().map(|n| AtomName::encode(n)).collect();
        let (key, _) = canon::chain(names, auto);
        InteractionRecord::new(
            key,
            Priority::new(auto, level),
            InteractionStyle::Bond(BondStyle::Harmonic),
            vec![300.0, 1.1],
        )
    }

    fn ids(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn auto_records_and_increments_are_dropped_by_default() {
        let mut tables = Tables::default();
        tables.bonds.upsert(bond(&["c", "h"], false, 0));
        tables.bonds.upsert(bond(&["c", "h"], true, 0));
        tables.bond_increments.push(BondIncrement {
            key: bond(&["c", "h"], false, 0).key,
            priority: Priority::new(false, 0),
            delta_ij: -0.1,
            delta_ji: 0.1,
        });

        retain(&mut tables, false, None);
        assert_eq!(tables.bonds.len(), 1);
        assert!(!tables.bonds.iter().next().unwrap().key.is_auto());
        assert!(tables.bond_increments.is_empty());
    }

    #[test]
    fn allow_list_checks_every_named_atom() {
        let mut tables = Tables::default();
        tables.bonds.upsert(bond(&["c", "h"], false, 0));
        tables.bonds.upsert(bond(&["c", "o"], false, 0));
        tables.bonds.upsert(bond(&["*", "h"], false, 0));

        retain(&mut tables, false, Some(&ids(&["c", "h"])));
        let kept: Vec<_> = tables.bonds.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(kept, ["c,h", "*,h"]);
    }

    #[test]
    fn allow_list_ignores_priority_suffixes() {
        let mut tables = Tables::default();
        tables.bonds.upsert(bond(&["c*2", "h*2"], false, 2));
        retain(&mut tables, false, Some(&ids(&["c", "h"])));
        assert_eq!(tables.bonds.len(), 1);
    }

    #[test]
    fn ordering_is_stable_within_a_priority() {
        let mut tables = Tables::default();
        tables.bonds.upsert(bond(&["c", "h"], true, 5));
        tables.bonds.upsert(bond(&["c", "n"], false, 0));
        tables.bonds.upsert(bond(&["c", "o"], false, 2));
        tables.bonds.upsert(bond(&["c", "s"], false, 0));

        order(&mut tables);
        let keys: Vec<_> = tables.bonds.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, ["c,o", "c,n", "c,s", "auto:c,h"]);
    }
}
