use std::collections::HashMap;

use log::debug;

use super::config::ConvertConfig;
use super::error::Error;
use crate::frc::{self, AtomColumns, FrcDocument, SectionKind, SectionLine};
use crate::model::atom::{AtomType, NonbondParams};
use crate::model::types::PairStyle;

/// Reads `#atom_types` in discovery order, keeping allowed types only.
///
/// A type listed twice keeps its first position and its last definition.
pub fn collect_atom_types(
    document: &FrcDocument,
    config: &ConvertConfig,
) -> Result<Vec<AtomType>, Error> {
    let mut atoms: Vec<AtomType> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut columns: Option<AtomColumns> = None;
    let mut block = 0;

    for line in document.section(SectionKind::AtomTypes) {
        if line.block != block {
            columns = None;
            block = line.block;
        }

        if AtomColumns::is_header(&line.text) {
            columns = Some(AtomColumns::from_header(line.line, &line.text)?);
            continue;
        }
        if line.tokens.is_empty() {
            continue;
        }

        let Some(cols) = columns else {
            return Err(frc::Error::missing_columns(line.line, &["type", "mass"]).into());
        };
        let Some(record) = cols.split(&line.text, &config.comment_chars) else {
            debug!("line {}: atom type line is missing columns; skipped", line.line);
            continue;
        };
        if !config.allows_atom(&record.name) {
            continue;
        }

        let mass = record.mass.parse::<f64>().map_err(|_| {
            frc::Error::parse(line.line, format!("invalid mass '{}'", record.mass))
        })?;

        let mut atom = AtomType::new(&record.name, mass);
        atom.element = record.element.unwrap_or_default();
        atom.connections = record.connections.and_then(|c| c.parse().ok());
        atom.description = record.description;

        match index.get(&atom.name) {
            Some(&i) => atoms[i] = atom,
            None => {
                index.insert(atom.name.clone(), atoms.len());
                atoms.push(atom);
            }
        }
    }

    Ok(atoms)
}

/// How a non-bonded section writes its two coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NonbondForm {
    /// Repulsive and attractive coefficients.
    AB,
    /// Well position and depth.
    REps,
}

/// Reads `#nonbond(12-6)` and `#nonbond(9-6)`, keyed by non-bonded class.
///
/// Each section starts in its customary form (`A-B` for 12-6, `r-eps` for
/// 9-6) until a `@type` directive says otherwise.
pub fn collect_nonbond(
    document: &FrcDocument,
    config: &ConvertConfig,
) -> Result<HashMap<String, NonbondParams>, Error> {
    let mut params = HashMap::new();
    let mut form = NonbondForm::AB;
    let mut block = 0;

    for line in document.lines() {
        let style = match line.kind {
            SectionKind::Nonbond12_6 => PairStyle::LjCut,
            SectionKind::Nonbond9_6 => PairStyle::Class2,
            _ => continue,
        };

        if line.block != block {
            block = line.block;
            form = match style {
                PairStyle::LjCut => NonbondForm::AB,
                PairStyle::Class2 => NonbondForm::REps,
            };
        }

        if line.is_directive() {
            form = directive_form(line).unwrap_or(form);
            continue;
        }
        if !config.styles.accepts_pair(style) {
            continue;
        }

        let first = line.number(3)?;
        let second = line.number(4)?;
        params.insert(line.tokens[2].clone(), convert_pair(style, form, first, second));
    }

    Ok(params)
}

fn directive_form(line: &SectionLine) -> Option<NonbondForm> {
    if line.tokens[0] != "@type" {
        return None;
    }
    match line.tokens.get(1).map(String::as_str) {
        Some("A-B") => Some(NonbondForm::AB),
        Some("r-eps") => Some(NonbondForm::REps),
        other => {
            debug!("line {}: unknown nonbond form {:?}; ignored", line.line, other);
            None
        }
    }
}

fn convert_pair(style: PairStyle, form: NonbondForm, first: f64, second: f64) -> NonbondParams {
    match (style, form) {
        (PairStyle::LjCut, NonbondForm::AB) => {
            let (a, b) = (first, second);
            let epsilon = if a != 0.0 { b * b / (4.0 * a) } else { 0.0 };
            let sigma = positive_or_fallback((a / b).powf(1.0 / 6.0));
            NonbondParams::new(style, epsilon, sigma)
        }
        (PairStyle::LjCut, NonbondForm::REps) => {
            let sigma = positive_or_fallback(first / 2f64.powf(1.0 / 6.0));
            NonbondParams::new(style, second, sigma)
        }
        (PairStyle::Class2, NonbondForm::AB) => {
            // A = 2 eps r0^9, B = 3 eps r0^6
            let (a, b) = (first, second);
            let r0 = positive_or_fallback((1.5 * a / b).cbrt());
            let epsilon = if b != 0.0 { b / (3.0 * r0.powi(6)) } else { 0.0 };
            NonbondParams::new(style, epsilon, r0)
        }
        (PairStyle::Class2, NonbondForm::REps) => NonbondParams::new(style, second, first),
    }
}

fn positive_or_fallback(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        NonbondParams::FALLBACK_SIGMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frc::parse_str;
    use std::collections::HashSet;

    const ATOMS: &str = "\
#atom_types cff91
> Atom type definitions
!Ver  Ref  Type    Mass      Element   connection   Comment
!---- ---  ----  ----------  -------   ----------------------------
 1.0   1    c    12.011150    C           4      generic SP3 carbon
 1.0   1    h     1.007970    H           1      'nonpolar hydrogen'
 1.0   1    lp    0.000000    L           1      lone pair
 2.0  18    c    12.011150    C           4      revised SP3 carbon
";

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(1.0)
    }

    #[test]
    fn atom_types_keep_discovery_order_and_last_definition() {
        let doc = parse_str(ATOMS, "!>");
        let atoms = collect_atom_types(&doc, &ConvertConfig::default()).unwrap();
        let names: Vec<_> = atoms.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["c", "h", "lp"]);
        assert_eq!(atoms[0].description, "revised SP3 carbon");
        assert_eq!(atoms[0].connections, Some(4));
        assert_eq!(atoms[1].description, "nonpolar hydrogen");
        assert_eq!(atoms[1].element, "H");
    }

    #[test]
    fn zero_mass_is_floored() {
        let doc = parse_str(ATOMS, "!>");
        let atoms = collect_atom_types(&doc, &ConvertConfig::default()).unwrap();
        assert_eq!(atoms[2].mass, 1.0);
    }

    #[test]
    fn allow_list_drops_other_types() {
        let doc = parse_str(ATOMS, "!>");
        let config = ConvertConfig {
            atom_types: Some(HashSet::from(["h".to_string()])),
            ..Default::default()
        };
        let atoms = collect_atom_types(&doc, &config).unwrap();
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].name, "h");
    }

    #[test]
    fn data_before_column_line_is_fatal() {
        let doc = parse_str("#atom_types x\n 1.0 1 c 12.0 C 4 carbon\n", "!>");
        let err = collect_atom_types(&doc, &ConvertConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Read(frc::Error::MissingColumns { line: 2, .. })
        ));
    }

    #[test]
    fn bad_mass_is_a_parse_error() {
        let doc = parse_str("#atom_types x\n!Ver Ref Type Mass\n 1.0 1 c heavy\n", "!>");
        let err = collect_atom_types(&doc, &ConvertConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Read(frc::Error::Parse { line: 3, .. })));
    }

    #[test]
    fn twelve_six_a_b_converts_to_epsilon_sigma() {
        let text = "#nonbond(12-6) cvff\n@type A-B\n 1.0 1 c 1981049.2 1125.6\n";
        let params = collect_nonbond(&parse_str(text, "!>"), &ConvertConfig::default()).unwrap();
        let c = params["c"];
        assert_eq!(c.style, PairStyle::LjCut);
        assert!(approx_eq(c.epsilon, 1125.6 * 1125.6 / (4.0 * 1981049.2)));
        assert!(approx_eq(c.sigma, (1981049.2f64 / 1125.6).powf(1.0 / 6.0)));
    }

    #[test]
    fn degenerate_coefficients_fall_back_to_unit_sigma() {
        let text = "#nonbond(12-6) cvff\n 1.0 1 h 0.0 0.0\n";
        let params = collect_nonbond(&parse_str(text, "!>"), &ConvertConfig::default()).unwrap();
        assert_eq!(params["h"].sigma, 1.0);
        assert_eq!(params["h"].epsilon, 0.0);
    }

    #[test]
    fn nine_six_reads_r_eps_directly() {
        let text = "#nonbond(9-6) cff91\n@type r-eps\n 1.0 1 c 4.01 0.054\n";
        let params = collect_nonbond(&parse_str(text, "!>"), &ConvertConfig::default()).unwrap();
        assert_eq!(params["c"].style, PairStyle::Class2);
        assert_eq!(params["c"].sigma, 4.01);
        assert_eq!(params["c"].epsilon, 0.054);
    }

    #[test]
    fn r_eps_directive_applies_to_twelve_six() {
        let text = "#nonbond(12-6) x\n@type r-eps\n 1.0 1 o 3.5 0.2\n";
        let params = collect_nonbond(&parse_str(text, "!>"), &ConvertConfig::default()).unwrap();
        assert!(approx_eq(params["o"].sigma * 2f64.powf(1.0 / 6.0), 3.5));
        assert_eq!(params["o"].epsilon, 0.2);
    }

    #[test]
    fn pair_style_selection_skips_other_sections() {
        let text = "#nonbond(12-6) a\n 1.0 1 c 1.0 1.0\n#nonbond(9-6) b\n 1.0 1 h 3.0 0.02\n";
        let config = ConvertConfig {
            styles: crate::convert::StyleSelection {
                pair: Some(PairStyle::Class2),
                ..Default::default()
            },
            ..Default::default()
        };
        let params = collect_nonbond(&parse_str(text, "!>"), &config).unwrap();
        assert!(!params.contains_key("c"));
        assert!(params.contains_key("h"));
    }
}
