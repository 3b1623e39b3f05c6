//! Configuration types for FRC conversion.
//!
//! [`ConvertConfig`] controls which functional forms are kept, which atom
//! types survive, and whether auto-generalized parameters take part.
//! Settings can be built in code or loaded from TOML:
//!
//! ```toml
//! include_auto = true
//! atom_types = ["c", "h", "o"]
//!
//! [styles]
//! bond = "class2"
//! pair = "lj/cut"
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use super::error::Error;
use crate::frc::lexer::DEFAULT_COMMENT_CHARS;
use crate::model::types::{AngleStyle, BondStyle, DihedralStyle, ImproperStyle, PairStyle};

/// Main configuration for [`convert`](super::convert).
///
/// # Examples
///
/// ```
/// use frc_forge::{BondStyle, ConvertConfig, StyleSelection};
///
/// let config = ConvertConfig {
///     include_auto: true,
///     styles: StyleSelection {
///         bond: Some(BondStyle::Class2),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// assert!(config.styles.accepts_bond(BondStyle::Class2));
/// assert!(!config.styles.accepts_bond(BondStyle::Harmonic));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Functional forms to keep for each interaction family.
    pub styles: StyleSelection,

    /// Atom types to keep. `None` keeps every type.
    pub atom_types: Option<HashSet<String>>,

    /// Keep auto-generalized interactions, bond increments and equivalences.
    pub include_auto: bool,

    /// Which equivalence classes to attach to atom types.
    ///
    /// If `None`, auto classes are attached exactly when `include_auto` is set.
    pub equivalences: Option<EquivalenceMode>,

    /// Characters that start a comment.
    pub comment_chars: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            styles: StyleSelection::default(),
            atom_types: None,
            include_auto: false,
            equivalences: None,
            comment_chars: DEFAULT_COMMENT_CHARS.to_string(),
        }
    }
}

impl ConvertConfig {
    /// Parses settings from TOML; omitted fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    pub fn equivalence_mode(&self) -> EquivalenceMode {
        self.equivalences.unwrap_or(if self.include_auto {
            EquivalenceMode::WithAuto
        } else {
            EquivalenceMode::Explicit
        })
    }

    pub fn allows_atom(&self, name: &str) -> bool {
        self.atom_types
            .as_ref()
            .is_none_or(|allowed| allowed.contains(name))
    }
}

/// Selected functional form per interaction family.
///
/// `None` accepts every form the file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSelection {
    pub bond: Option<BondStyle>,
    pub angle: Option<AngleStyle>,
    pub dihedral: Option<DihedralStyle>,
    pub improper: Option<ImproperStyle>,
    pub pair: Option<PairStyle>,
}

impl StyleSelection {
    pub fn accepts_bond(&self, style: BondStyle) -> bool {
        self.bond.is_none_or(|s| s == style)
    }

    pub fn accepts_angle(&self, style: AngleStyle) -> bool {
        self.angle.is_none_or(|s| s == style)
    }

    pub fn accepts_dihedral(&self, style: DihedralStyle) -> bool {
        self.dihedral.is_none_or(|s| s == style)
    }

    pub fn accepts_improper(&self, style: ImproperStyle) -> bool {
        self.improper.is_none_or(|s| s == style)
    }

    pub fn accepts_pair(&self, style: PairStyle) -> bool {
        self.pair.is_none_or(|s| s == style)
    }
}

/// Equivalence classes attached to each atom type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquivalenceMode {
    /// Only the `#equivalence` classes.
    #[default]
    Explicit,
    /// The `#equivalence` classes plus the `#auto_equivalence` ones.
    WithAuto,
}
