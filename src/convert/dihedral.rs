use super::canon;
use super::config::ConvertConfig;
use super::error::Error;
use super::priority;
use super::tables::{Family, Tables};
use crate::frc::{SectionKind, SectionLine};
use crate::model::key::{AtomName, InteractionKey};
use crate::model::topology::CrossTermKind;
use crate::model::types::DihedralStyle;

/// Merges one class2 torsion cross-term line into its dihedral.
///
/// Each term borrows reference geometry from the dihedral's sub-bonds or
/// sub-angles and reports whether its two directions agree; the dihedral
/// stays reversal-symmetric only while every term does.
pub fn apply(line: &SectionLine, config: &ConvertConfig, tables: &mut Tables) -> Result<(), Error> {
    let term = match line.kind {
        SectionKind::MiddleBondTorsion3 => CrossTermKind::MiddleBondTorsion,
        SectionKind::EndBondTorsion3 => CrossTermKind::EndBondTorsion,
        SectionKind::AngleTorsion3 => CrossTermKind::AngleTorsion,
        SectionKind::AngleAngleTorsion1 => CrossTermKind::AngleAngleTorsion,
        SectionKind::BondBond13 => CrossTermKind::BondBond13,
        _ => return Ok(()),
    };
    if !config.styles.accepts_dihedral(DihedralStyle::Class2) {
        return Ok(());
    }

    let raw = line.names(2..6);
    priority::resolve(raw, line.auto, line.line)?;
    let names = canon::encode(raw);
    let (key, reversed) = canon::chain(names.clone(), line.auto);

    let (values, symmetric) = match term {
        CrossTermKind::MiddleBondTorsion => {
            let r = tables.bond_baselines.lookup(&key, &names[1..3])?;
            let f = [line.number(6)?, line.number_or(7, 0.0)?, line.number_or(8, 0.0)?];
            (vec![f[0], f[1], f[2], r], true)
        }
        CrossTermKind::EndBondTorsion => {
            let r = end_bonds(tables, &key, &names, reversed)?;
            directional(line, r, reversed)?
        }
        CrossTermKind::AngleTorsion => {
            let theta = sub_angles(tables, &key, &names, reversed)?;
            directional(line, theta, reversed)?
        }
        CrossTermKind::AngleAngleTorsion => {
            let theta = sub_angles(tables, &key, &names, reversed)?;
            (vec![line.number(6)?, theta[0], theta[1]], theta[0] == theta[1])
        }
        _ => {
            let r = end_bonds(tables, &key, &names, reversed)?;
            (vec![line.number(6)?, r[0], r[1]], r[0] == r[1])
        }
    };

    if !tables.expects_cross_term(Family::Dihedral, &key, term) {
        return Ok(());
    }
    tables.attach(Family::Dihedral, &key, term, values, symmetric);
    Ok(())
}

/// Lengths of bonds i-j and k-l, in canonical order.
fn end_bonds(
    tables: &Tables,
    key: &InteractionKey,
    names: &[AtomName],
    reversed: bool,
) -> Result<[f64; 2], Error> {
    let mut r = [
        tables.bond_baselines.lookup(key, &names[0..2])?,
        tables.bond_baselines.lookup(key, &names[2..4])?,
    ];
    if reversed {
        r.swap(0, 1);
    }
    Ok(r)
}

/// Angles i-j-k and j-k-l, in canonical order.
fn sub_angles(
    tables: &Tables,
    key: &InteractionKey,
    names: &[AtomName],
    reversed: bool,
) -> Result<[f64; 2], Error> {
    let mut theta = [
        tables.angle_baselines.lookup(key, &names[0..3])?,
        tables.angle_baselines.lookup(key, &names[1..4])?,
    ];
    if reversed {
        theta.swap(0, 1);
    }
    Ok(theta)
}

/// Reads left and right coefficient triples; the right side defaults to
/// the left one.
fn directional(
    line: &SectionLine,
    reference: [f64; 2],
    reversed: bool,
) -> Result<(Vec<f64>, bool), Error> {
    let left = [line.number(6)?, line.number_or(7, 0.0)?, line.number_or(8, 0.0)?];
    let right = [
        line.number_or(9, left[0])?,
        line.number_or(10, left[1])?,
        line.number_or(11, left[2])?,
    ];
    let (left, right) = if reversed { (right, left) } else { (left, right) };

    let symmetric = left == right && reference[0] == reference[1];
    let mut values = Vec::with_capacity(8);
    values.extend(left);
    values.extend(right);
    values.extend(reference);
    Ok((values, symmetric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::primitive;
    use crate::frc::parse_str;
    use crate::model::topology::Warning;

    const PRIMITIVES: &str = "\
#quartic_bond x
 1.0 1 c c 1.53 299.67 -501.77 679.81
 1.0 1 c h 1.10 345.00 -691.89 844.60
 1.0 1 c o 1.42 400.00 -835.20 1313.0

#quartic_angle x
 1.0 1 h c c 110.77 41.45 -10.60 5.13
 1.0 1 c c o 109.50 61.45 -10.60 0.0
 1.0 1 h c o 111.27 54.54 -10.89 -8.72

#torsion_3 x
 1.0 1 h c c o -0.14 0.0 0.17 0.0 -0.23 0.0
 1.0 1 h c c h -0.14 0.0 0.17 0.0 -0.23 0.0
";

    fn run(extra: &str) -> Result<Tables, Error> {
        let text = format!("{PRIMITIVES}{extra}");
        let doc = parse_str(&text, "!>");
        let config = ConvertConfig::default();
        let mut tables = Tables::default();
        for line in doc.lines() {
            primitive::apply(line, &config, &mut tables)?;
        }
        for line in doc.lines() {
            apply(line, &config, &mut tables)?;
        }
        tables.resolve_reversal_symmetry()?;
        Ok(tables)
    }

    fn key(raw: &[&str]) -> InteractionKey {
        canon::chain(raw.iter().map(|n| AtomName::encode(n)).collect(), false).0
    }

    #[test]
    fn middle_bond_uses_central_length() {
        let tables = run("#middle_bond-torsion_3 x\n 1.0 1 h c c o -14.8 1.4 0.3\n").unwrap();
        let record = tables.dihedrals.get(&key(&["h", "c", "c", "o"])).unwrap();
        assert_eq!(
            record.cross_term(CrossTermKind::MiddleBondTorsion),
            Some(&[-14.8, 1.4, 0.3, 1.53][..])
        );
    }

    #[test]
    fn end_bond_orders_sides_canonically() {
        let tables =
            run("#end_bond-torsion_3 x\n 1.0 1 o c c h 0.1 0.2 0.3 1.1 1.2 1.3\n").unwrap();
        let record = tables.dihedrals.get(&key(&["h", "c", "c", "o"])).unwrap();
        assert_eq!(
            record.cross_term(CrossTermKind::EndBondTorsion),
            Some(&[1.1, 1.2, 1.3, 0.1, 0.2, 0.3, 1.10, 1.42][..])
        );
        assert!(record.symmetry.is_empty());
    }

    #[test]
    fn right_side_defaults_to_left() {
        let tables = run("#angle-torsion_3 x\n 1.0 1 h c c h 0.5 -0.3 0.1\n").unwrap();
        let record = tables.dihedrals.get(&key(&["h", "c", "c", "h"])).unwrap();
        assert_eq!(
            record.cross_term(CrossTermKind::AngleTorsion),
            Some(&[0.5, -0.3, 0.1, 0.5, -0.3, 0.1, 110.77, 110.77][..])
        );
        assert!(record.symmetry.contains(0, 3));
        assert!(record.symmetry.contains(1, 2));
    }

    #[test]
    fn angle_angle_torsion_uses_both_sub_angles() {
        let tables = run("#angle-angle-torsion_1 x\n 1.0 1 h c c o -12.5\n").unwrap();
        let record = tables.dihedrals.get(&key(&["h", "c", "c", "o"])).unwrap();
        assert_eq!(
            record.cross_term(CrossTermKind::AngleAngleTorsion),
            Some(&[-12.5, 110.77, 109.5][..])
        );
    }

    #[test]
    fn bond_bond_13_uses_end_bonds() {
        let tables = run("#bond-bond_1_3 x\n 1.0 1 h c c h 0.0\n").unwrap();
        let record = tables.dihedrals.get(&key(&["h", "c", "c", "h"])).unwrap();
        assert_eq!(
            record.cross_term(CrossTermKind::BondBond13),
            Some(&[0.0, 1.10, 1.10][..])
        );
    }

    #[test]
    fn uneven_sides_on_palindrome_are_rejected() {
        let err = run("#end_bond-torsion_3 x\n 1.0 1 h c c h 0.1 0.2 0.3 0.3 0.2 0.1\n")
            .unwrap_err();
        match err {
            Error::SymmetryContradiction { key: k, first, second } => {
                assert_eq!(k, key(&["h", "c", "c", "h"]));
                assert_eq!(first.as_str(), "h");
                assert_eq!(second.as_str(), "h");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_sub_angle_is_unresolved() {
        let text = "#torsion_3 x\n 1.0 1 n c c n 0.1 0.0\n#angle-angle-torsion_1 x\n 1.0 1 n c c n -5.0\n";
        let doc = parse_str(text, "!>");
        let config = ConvertConfig::default();
        let mut tables = Tables::default();
        for line in doc.lines() {
            primitive::apply(line, &config, &mut tables).unwrap();
        }
        let err = doc
            .lines()
            .map(|line| apply(line, &config, &mut tables))
            .find_map(Result::err)
            .unwrap();
        assert!(matches!(err, Error::UnresolvedReference { .. }));
    }

    #[test]
    fn missing_sub_bond_is_unresolved_without_primary_torsion() {
        let err = run("#bond-bond_1_3 x\n 1.0 1 h c c n 0.0\n").unwrap_err();
        match err {
            Error::UnresolvedReference { reference, .. } => assert_eq!(reference.to_string(), "c,n"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cross_term_without_class2_torsion_warns() {
        let tables = run("#middle_bond-torsion_3 x\n 1.0 1 o c c o -14.8 1.4 0.3\n").unwrap();
        assert!(matches!(tables.warnings[..], [Warning::OrphanCrossTerm { .. }]));
    }

    #[test]
    fn disagreeing_priorities_on_cross_term_are_rejected() {
        let err = run("#middle_bond-torsion_3 x\n 1.0 1 h*1 c c*2 o -14.8\n").unwrap_err();
        assert!(matches!(err, Error::InconsistentPriority { .. }));
    }

    #[test]
    fn reference_becomes_resolvable_once_defined() {
        let text = "\
#torsion_3 x
 1.0 1 n c c n 0.1 0.0
#quadratic_angle x
 1.0 1 n c c 109.0 50.0
#angle-angle-torsion_1 x
 1.0 1 n c c n -5.0
";
        let doc = parse_str(text, "!>");
        let config = ConvertConfig::default();
        let mut tables = Tables::default();
        for line in doc.lines() {
            primitive::apply(line, &config, &mut tables).unwrap();
        }
        for line in doc.lines() {
            apply(line, &config, &mut tables).unwrap();
        }
        let record = tables.dihedrals.get(&key(&["n", "c", "c", "n"])).unwrap();
        assert_eq!(
            record.cross_term(CrossTermKind::AngleAngleTorsion),
            Some(&[-5.0, 109.0, 109.0][..])
        );
    }
}
