use super::canon;
use super::config::ConvertConfig;
use super::error::Error;
use super::priority;
use super::tables::Tables;
use crate::frc::{SectionKind, SectionLine};
use crate::model::topology::{BondIncrement, InteractionRecord};
use crate::model::types::{
    AngleStyle, BondStyle, DihedralStyle, ImproperStyle, InteractionStyle,
};

/// Applies one line of a primitive bonded section.
///
/// Lines of other sections are ignored.
pub fn apply(line: &SectionLine, config: &ConvertConfig, tables: &mut Tables) -> Result<(), Error> {
    match line.kind {
        SectionKind::BondIncrements => bond_increment(line, tables),
        SectionKind::QuadraticBond => bond(line, BondStyle::Harmonic, config, tables),
        SectionKind::QuarticBond => bond(line, BondStyle::Class2, config, tables),
        SectionKind::MorseBond => bond(line, BondStyle::Morse, config, tables),
        SectionKind::QuadraticAngle => angle(line, AngleStyle::Harmonic, config, tables),
        SectionKind::QuarticAngle => angle(line, AngleStyle::Class2, config, tables),
        SectionKind::Torsion1 => torsion(line, DihedralStyle::Charmm, config, tables),
        SectionKind::Torsion3 => torsion(line, DihedralStyle::Class2, config, tables),
        SectionKind::OutOfPlane => out_of_plane(line, config, tables),
        SectionKind::WilsonOutOfPlane => wilson(line, config, tables),
        _ => Ok(()),
    }
}

fn bond_increment(line: &SectionLine, tables: &mut Tables) -> Result<(), Error> {
    let raw = line.names(2..4);
    let priority = priority::resolve(raw, line.auto, line.line)?;
    let (key, reversed) = canon::chain_from_raw(raw, line.auto);

    let (mut delta_ij, mut delta_ji) = (line.number(4)?, line.number(5)?);
    if reversed {
        std::mem::swap(&mut delta_ij, &mut delta_ji);
    }

    tables.upsert_increment(BondIncrement {
        key,
        priority,
        delta_ij,
        delta_ji,
    });
    Ok(())
}

fn bond(
    line: &SectionLine,
    style: BondStyle,
    config: &ConvertConfig,
    tables: &mut Tables,
) -> Result<(), Error> {
    let raw = line.names(2..4);
    let priority = priority::resolve(raw, line.auto, line.line)?;
    let (key, _) = canon::chain_from_raw(raw, line.auto);

    let r0 = line.number(4)?;
    let params = match style {
        BondStyle::Harmonic => vec![line.number(5)?, r0],
        BondStyle::Class2 => vec![r0, line.number(5)?, line.number(6)?, line.number(7)?],
        BondStyle::Morse => vec![line.number(5)?, line.number(6)?, r0],
    };

    tables
        .bond_baselines
        .record(key.clone(), r0, style == BondStyle::Class2);

    if config.styles.accepts_bond(style) {
        tables.bonds.upsert(InteractionRecord::new(
            key,
            priority,
            InteractionStyle::Bond(style),
            params,
        ));
    }
    Ok(())
}

fn angle(
    line: &SectionLine,
    style: AngleStyle,
    config: &ConvertConfig,
    tables: &mut Tables,
) -> Result<(), Error> {
    let raw = line.names(2..5);
    let priority = priority::resolve(raw, line.auto, line.line)?;
    let (key, _) = canon::chain_from_raw(raw, line.auto);

    let theta0 = line.number(5)?;
    let params = match style {
        AngleStyle::Harmonic => vec![line.number(6)?, theta0],
        AngleStyle::Class2 => vec![theta0, line.number(6)?, line.number(7)?, line.number(8)?],
    };

    tables
        .angle_baselines
        .record(key.clone(), theta0, style == AngleStyle::Class2);

    if config.styles.accepts_angle(style) {
        tables.angles.upsert(InteractionRecord::new(
            key,
            priority,
            InteractionStyle::Angle(style),
            params,
        ));
    }
    Ok(())
}

fn torsion(
    line: &SectionLine,
    style: DihedralStyle,
    config: &ConvertConfig,
    tables: &mut Tables,
) -> Result<(), Error> {
    if !config.styles.accepts_dihedral(style) {
        return Ok(());
    }

    let raw = line.names(2..6);
    let priority = priority::resolve(raw, line.auto, line.line)?;
    let (key, _) = canon::chain_from_raw(raw, line.auto);

    let params = match style {
        DihedralStyle::Charmm => vec![line.number(6)?, line.number(7)?, line.number(8)?, 0.0],
        DihedralStyle::Class2 => (6..12)
            .map(|i| line.number_or(i, 0.0))
            .collect::<Result<Vec<_>, _>>()?,
    };

    tables.dihedrals.upsert(InteractionRecord::new(
        key,
        priority,
        InteractionStyle::Dihedral(style),
        params,
    ));
    Ok(())
}

fn out_of_plane(
    line: &SectionLine,
    config: &ConvertConfig,
    tables: &mut Tables,
) -> Result<(), Error> {
    if !config.styles.accepts_improper(ImproperStyle::Cvff) {
        return Ok(());
    }

    let raw = line.names(2..6);
    let priority = priority::resolve(raw, line.auto, line.line)?;
    let (key, _) = canon::out_of_plane(canon::encode4(raw), line.auto);

    let params = vec![line.number(6)?, line.number(7)?, line.number(8)?];
    let mut record = InteractionRecord::new(
        key,
        priority,
        InteractionStyle::Improper(ImproperStyle::Cvff),
        params,
    );
    record.symmetry.insert(0, 3);
    tables.impropers.upsert(record);
    Ok(())
}

fn wilson(line: &SectionLine, config: &ConvertConfig, tables: &mut Tables) -> Result<(), Error> {
    if !config.styles.accepts_improper(ImproperStyle::Class2) {
        return Ok(());
    }

    let raw = line.names(2..6);
    let priority = priority::resolve(raw, line.auto, line.line)?;
    let (key, _) = canon::wilson(canon::encode4(raw), line.auto);

    let params = vec![line.number(6)?, line.number(7)?];
    tables.impropers.upsert(InteractionRecord::new(
        key,
        priority,
        InteractionStyle::Improper(ImproperStyle::Class2),
        params,
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::config::StyleSelection;
    use crate::frc::parse_str;
    use crate::model::key::{AtomName, InteractionKey};

    fn run(text: &str, config: &ConvertConfig) -> Result<Tables, Error> {
        let doc = parse_str(text, "!>");
        let mut tables = Tables::default();
        for line in doc.lines() {
            apply(line, config, &mut tables)?;
        }
        Ok(tables)
    }

    fn key(raw: &[&str]) -> InteractionKey {
        canon::chain(raw.iter().map(|n| AtomName::encode(n)).collect(), false).0
    }

    #[test]
    fn quadratic_bond_stores_k_then_r0() {
        let tables = run(
            "#quadratic_bond x\n 1.0 1 h c 1.105 340.6\n",
            &ConvertConfig::default(),
        )
        .unwrap();
        let record = tables.bonds.get(&key(&["c", "h"])).unwrap();
        assert_eq!(record.params, [340.6, 1.105]);
        assert_eq!(record.style.to_string(), "harmonic");
    }

    #[test]
    fn quartic_bond_stores_r0_first() {
        let tables = run(
            "#quartic_bond x\n 2.1 17 c c 1.5300 299.67 -501.77 679.81\n",
            &ConvertConfig::default(),
        )
        .unwrap();
        let record = tables.bonds.get(&key(&["c", "c"])).unwrap();
        assert_eq!(record.params, [1.53, 299.67, -501.77, 679.81]);
        assert_eq!(record.baseline(), Some(1.53));
    }

    #[test]
    fn morse_bond_stores_d_alpha_r0() {
        let tables = run(
            "#morse_bond x\n 1.0 1 c o 1.425 96.0 2.0\n",
            &ConvertConfig::default(),
        )
        .unwrap();
        let record = tables.bonds.get(&key(&["c", "o"])).unwrap();
        assert_eq!(record.params, [96.0, 2.0, 1.425]);
    }

    #[test]
    fn later_line_overrides_earlier_for_same_key() {
        let text = "#quadratic_bond a\n 1.0 1 c h 1.10 300.0\n#quadratic_bond b\n 2.0 1 h c 1.09 340.0\n";
        let tables = run(text, &ConvertConfig::default()).unwrap();
        assert_eq!(tables.bonds.len(), 1);
        assert_eq!(tables.bonds.iter().next().unwrap().params, [340.0, 1.09]);
    }

    #[test]
    fn unselected_style_still_records_baseline() {
        let config = ConvertConfig {
            styles: StyleSelection {
                angle: Some(AngleStyle::Class2),
                ..Default::default()
            },
            ..Default::default()
        };
        let tables = run("#quadratic_angle x\n 1.0 1 h c h 106.4 39.5\n", &config).unwrap();
        assert!(tables.angles.is_empty());
        assert_eq!(tables.angle_baselines.get(&key(&["h", "c", "h"])), Some(106.4));
    }

    #[test]
    fn torsion_3_pads_missing_pairs() {
        let tables = run(
            "#torsion_3 x\n 1.0 1 h c c o 0.5 0.0\n",
            &ConvertConfig::default(),
        )
        .unwrap();
        let record = tables.dihedrals.get(&key(&["h", "c", "c", "o"])).unwrap();
        assert_eq!(record.params, [0.5, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn torsion_1_is_charmm_with_zero_weight() {
        let tables = run(
            "#torsion_1 x\n 1.0 1 * c c * 0.1581 3 0.0\n",
            &ConvertConfig::default(),
        )
        .unwrap();
        let record = tables.dihedrals.iter().next().unwrap();
        assert_eq!(record.key.to_string(), "*,c,c,*");
        assert_eq!(record.params, [0.1581, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn bond_increments_swap_with_key() {
        let tables = run(
            "#bond_increments x\n 1.0 1 o c -0.3 0.3\n",
            &ConvertConfig::default(),
        )
        .unwrap();
        let inc = &tables.bond_increments[0];
        assert_eq!(inc.key.to_string(), "c,o");
        assert_eq!((inc.delta_ij, inc.delta_ji), (0.3, -0.3));
    }

    #[test]
    fn cvff_out_of_plane_is_symmetric_in_outer_atoms() {
        let tables = run(
            "#out_of_plane x\n 1.0 1 o c h c 10.0 2 180.0\n",
            &ConvertConfig::default(),
        )
        .unwrap();
        let record = tables.impropers.iter().next().unwrap();
        assert_eq!(record.key.to_string(), "c,c,h,o");
        assert!(record.symmetry.contains(0, 3));
        assert_eq!(record.params, [10.0, 2.0, 180.0]);
    }

    #[test]
    fn inconsistent_priorities_are_fatal() {
        let err = run(
            "#quadratic_bond x\n 1.0 1 c*2 h*3 1.1 300.0\n",
            &ConvertConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InconsistentPriority { line: 2, .. }));
    }
}
