use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported {family} style: '{value}'")]
pub struct ParseStyleError {
    family: &'static str,
    value: String,
}

impl ParseStyleError {
    fn new(family: &'static str, value: &str) -> Self {
        Self {
            family,
            value: value.to_string(),
        }
    }
}

/// Functional form of a bond-stretching term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BondStyle {
    /// `#quadratic_bond`: `[K2, r0]`.
    Harmonic,
    /// `#quartic_bond`: `[r0, K2, K3, K4]`.
    Class2,
    /// `#morse_bond`: `[D, alpha, r0]`.
    Morse,
}

/// Functional form of an angle-bending term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleStyle {
    /// `#quadratic_angle`: `[K2, theta0]`.
    Harmonic,
    /// `#quartic_angle`: `[theta0, K2, K3, K4]`.
    Class2,
}

/// Functional form of a torsion term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DihedralStyle {
    /// `#torsion_1`: `[K, n, phi0, 0.0]`.
    Charmm,
    /// `#torsion_3`: `[V1, phi1, V2, phi2, V3, phi3]`.
    Class2,
}

/// Functional form of an out-of-plane term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImproperStyle {
    /// `#out_of_plane`: `[K, n, chi0]`.
    Cvff,
    /// `#wilson_out_of_plane`: `[K, chi0]`.
    Class2,
}

/// Functional form of the non-bonded pair term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum PairStyle {
    /// `#nonbond(12-6)`, Lennard-Jones.
    #[serde(rename = "lj/cut")]
    LjCut,
    /// `#nonbond(9-6)`.
    #[serde(rename = "class2")]
    Class2,
}

/// Style tag of an interaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionStyle {
    Bond(BondStyle),
    Angle(AngleStyle),
    Dihedral(DihedralStyle),
    Improper(ImproperStyle),
}

impl InteractionStyle {
    /// Returns `true` for the class2 form of any family.
    pub fn is_class2(self) -> bool {
        matches!(
            self,
            Self::Bond(BondStyle::Class2)
                | Self::Angle(AngleStyle::Class2)
                | Self::Dihedral(DihedralStyle::Class2)
                | Self::Improper(ImproperStyle::Class2)
        )
    }
}

impl fmt::Display for BondStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Harmonic => "harmonic",
            Self::Class2 => "class2",
            Self::Morse => "morse",
        })
    }
}

impl fmt::Display for AngleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Harmonic => "harmonic",
            Self::Class2 => "class2",
        })
    }
}

impl fmt::Display for DihedralStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Charmm => "charmm",
            Self::Class2 => "class2",
        })
    }
}

impl fmt::Display for ImproperStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cvff => "cvff",
            Self::Class2 => "class2",
        })
    }
}

impl fmt::Display for PairStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LjCut => "lj/cut",
            Self::Class2 => "class2",
        })
    }
}

impl fmt::Display for InteractionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bond(s) => s.fmt(f),
            Self::Angle(s) => s.fmt(f),
            Self::Dihedral(s) => s.fmt(f),
            Self::Improper(s) => s.fmt(f),
        }
    }
}

impl FromStr for BondStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "harmonic" | "quadratic" => Ok(BondStyle::Harmonic),
            "class2" | "quartic" => Ok(BondStyle::Class2),
            "morse" => Ok(BondStyle::Morse),
            _ => Err(ParseStyleError::new("bond", s)),
        }
    }
}

impl FromStr for AngleStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "harmonic" | "quadratic" => Ok(AngleStyle::Harmonic),
            "class2" | "quartic" => Ok(AngleStyle::Class2),
            _ => Err(ParseStyleError::new("angle", s)),
        }
    }
}

impl FromStr for DihedralStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "charmm" => Ok(DihedralStyle::Charmm),
            "class2" => Ok(DihedralStyle::Class2),
            _ => Err(ParseStyleError::new("dihedral", s)),
        }
    }
}

impl FromStr for ImproperStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cvff" => Ok(ImproperStyle::Cvff),
            "class2" | "wilson" => Ok(ImproperStyle::Class2),
            _ => Err(ParseStyleError::new("improper", s)),
        }
    }
}

impl FromStr for PairStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lj/cut" | "lj" | "12-6" => Ok(PairStyle::LjCut),
            "class2" | "9-6" => Ok(PairStyle::Class2),
            _ => Err(ParseStyleError::new("pair", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_parse_case_insensitively() {
        assert_eq!("Harmonic".parse::<BondStyle>().unwrap(), BondStyle::Harmonic);
        assert_eq!("CLASS2".parse::<AngleStyle>().unwrap(), AngleStyle::Class2);
        assert_eq!("charmm".parse::<DihedralStyle>().unwrap(), DihedralStyle::Charmm);
        assert_eq!("wilson".parse::<ImproperStyle>().unwrap(), ImproperStyle::Class2);
        assert_eq!("lj/cut".parse::<PairStyle>().unwrap(), PairStyle::LjCut);
    }

    #[test]
    fn unknown_style_names_the_family() {
        let err = "cosine".parse::<AngleStyle>().unwrap_err();
        assert_eq!(err.to_string(), "invalid or unsupported angle style: 'cosine'");
    }

    #[test]
    fn display_matches_parse() {
        for style in [BondStyle::Harmonic, BondStyle::Class2, BondStyle::Morse] {
            assert_eq!(style.to_string().parse::<BondStyle>().unwrap(), style);
        }
        for style in [PairStyle::LjCut, PairStyle::Class2] {
            assert_eq!(style.to_string().parse::<PairStyle>().unwrap(), style);
        }
    }

    #[test]
    fn interaction_style_displays_inner_style() {
        let style = InteractionStyle::Improper(ImproperStyle::Cvff);
        assert_eq!(style.to_string(), "cvff");
        assert!(!style.is_class2());
        assert!(InteractionStyle::Dihedral(DihedralStyle::Class2).is_class2());
    }
}
