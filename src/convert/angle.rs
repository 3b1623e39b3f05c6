use super::canon;
use super::config::ConvertConfig;
use super::error::Error;
use super::priority;
use super::tables::{Family, Tables};
use crate::frc::{SectionKind, SectionLine};
use crate::model::topology::CrossTermKind;
use crate::model::types::AngleStyle;

/// Merges one `#bond-bond` or `#bond-angle` line into its class2 angle.
///
/// Both terms carry the two bond lengths of the angle. Coefficients and
/// lengths are written for the line's atom order and swapped when the
/// canonical key runs the other way.
pub fn apply(line: &SectionLine, config: &ConvertConfig, tables: &mut Tables) -> Result<(), Error> {
    let term = match line.kind {
        SectionKind::BondBond => CrossTermKind::BondBond,
        SectionKind::BondAngle => CrossTermKind::BondAngle,
        _ => return Ok(()),
    };
    if !config.styles.accepts_angle(AngleStyle::Class2) {
        return Ok(());
    }

    let raw = line.names(2..5);
    priority::resolve(raw, line.auto, line.line)?;
    let names = canon::encode(raw);
    let (key, reversed) = canon::chain(names.clone(), line.auto);

    let mut r = [
        tables.bond_baselines.lookup(&key, &names[0..2])?,
        tables.bond_baselines.lookup(&key, &names[1..3])?,
    ];
    if reversed {
        r.swap(0, 1);
    }

    let (values, symmetric) = match term {
        CrossTermKind::BondBond => {
            let k = line.number(5)?;
            (vec![k, r[0], r[1]], r[0] == r[1])
        }
        _ => {
            let k1 = line.number(5)?;
            let mut k = [k1, line.number_or(6, k1)?];
            if reversed {
                k.swap(0, 1);
            }
            (vec![k[0], k[1], r[0], r[1]], k[0] == k[1] && r[0] == r[1])
        }
    };

    if !tables.expects_cross_term(Family::Angle, &key, term) {
        return Ok(());
    }
    tables.attach(Family::Angle, &key, term, values, symmetric);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::primitive;
    use crate::frc::parse_str;
    use crate::model::key::{AtomName, InteractionKey};
    use crate::model::topology::Warning;

    const PRIMITIVES: &str = "\
#quartic_bond x
 1.0 1 c c 1.53 299.67 -501.77 679.81
 1.0 1 c h 1.10 345.00 -691.89 844.60
 1.0 1 c o 1.42 400.00 -835.20 1313.0

#quartic_angle x
 1.0 1 h c o 111.27 54.54 -10.89 -8.72
 1.0 1 h c h 107.66 39.64 -12.92 -2.43
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
    fn bond_bond_follows_canonical_direction() {
        let tables = run("#bond-bond x\n 1.0 1 o c h 11.4\n").unwrap();
        let record = tables.angles.get(&key(&["h", "c", "o"])).unwrap();
        assert_eq!(record.cross_term(CrossTermKind::BondBond), Some(&[11.4, 1.10, 1.42][..]));
        assert!(!record.symmetry.contains(0, 2));
    }

    #[test]
    fn bond_angle_swaps_coefficients_on_reversal() {
        let tables = run("#bond-angle x\n 1.0 1 o c h 20.0 18.0\n").unwrap();
        let record = tables.angles.get(&key(&["h", "c", "o"])).unwrap();
        assert_eq!(
            record.cross_term(CrossTermKind::BondAngle),
            Some(&[18.0, 20.0, 1.10, 1.42][..])
        );
    }

    #[test]
    fn bond_angle_second_coefficient_defaults_to_first() {
        let tables = run("#bond-angle x\n 1.0 1 h c h 18.1\n").unwrap();
        let record = tables.angles.get(&key(&["h", "c", "h"])).unwrap();
        assert_eq!(
            record.cross_term(CrossTermKind::BondAngle),
            Some(&[18.1, 18.1, 1.10, 1.10][..])
        );
        assert!(record.symmetry.contains(0, 2));
    }

    #[test]
    fn asymmetric_coefficients_on_matching_ends_are_rejected() {
        let err = run("#bond-angle x\n 1.0 1 h c h 18.1 17.0\n").unwrap_err();
        assert!(matches!(err, Error::SymmetryContradiction { .. }));
    }

    #[test]
    fn missing_bond_length_is_unresolved() {
        let text = "#quartic_angle x\n 1.0 1 c c n 110.0 1.0 0.0 0.0\n#bond-bond x\n 1.0 1 c c n 5.0\n";
        let doc = parse_str(text, "!>");
        let config = ConvertConfig::default();
        let mut tables = Tables::default();
        for line in doc.lines() {
            primitive::apply(line, &config, &mut tables).unwrap();
        }
        let mut results = doc.lines().map(|line| apply(line, &config, &mut tables));
        let err = results.find_map(Result::err).unwrap();
        assert!(matches!(err, Error::UnresolvedReference { .. }));
    }

    #[test]
    fn disagreeing_priorities_on_cross_term_are_rejected() {
        let err = run("#bond-bond x\n 1.0 1 h*2 c h*3 5.3\n").unwrap_err();
        assert!(matches!(err, Error::InconsistentPriority { line: 10, .. }));
    }

    #[test]
    fn missing_bond_length_is_unresolved_without_primary_angle() {
        let err = run("#bond-bond x\n 1.0 1 h c n 5.3\n").unwrap_err();
        match err {
            Error::UnresolvedReference { reference, .. } => assert_eq!(reference.to_string(), "c,n"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cross_term_for_unknown_angle_is_dropped_with_warning() {
        let tables = run("#bond-bond x\n 1.0 1 c c c 5.0\n").unwrap();
        assert_eq!(tables.warnings.len(), 1);
        assert!(matches!(tables.warnings[0], Warning::OrphanCrossTerm { .. }));
    }
}
