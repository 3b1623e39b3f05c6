//! Error types for FRC conversion.
//!
//! Reading failures come from the [`frc`](crate::frc) layer; everything
//! else is a structural problem in the force field itself: disagreeing
//! priorities, cross terms that refer to undefined geometry, and class2
//! coefficients that contradict the symmetry of their atom names.

use std::fmt;

use thiserror::Error;

use crate::frc;
use crate::model::key::{AtomName, InteractionKey};

/// Errors that can occur while converting an FRC file.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be read or split into sections.
    #[error(transparent)]
    Read(#[from] frc::Error),

    /// Failed to parse conversion settings TOML.
    #[error("failed to parse conversion settings: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Atom names of one interaction carry different `*n` priorities.
    #[error("inconsistent priority suffixes in interaction '{names}' (line {line})")]
    InconsistentPriority {
        /// The raw atom names as written.
        names: String,
        /// Line of the offending entry.
        line: usize,
    },

    /// A cross term needs a bond length or angle that no primitive section defines.
    ///
    /// Cross-term sections only carry coefficients; their reference geometry
    /// is looked up from `#quadratic_*`/`#quartic_*`/`#morse_bond` entries.
    #[error("{key} refers to {kind} {reference}, which is not defined by any {kind} section")]
    UnresolvedReference {
        /// The interaction whose cross term needs the reference.
        key: InteractionKey,
        /// Which family the reference belongs to.
        kind: ReferenceKind,
        /// The missing bond or angle.
        reference: InteractionKey,
    },

    /// Angle-angle coefficients do not cover every leaf of an improper.
    #[error("improper {key} has incomplete angle-angle coefficients: {detail}")]
    IncompleteCrossTerm {
        /// The improper interaction.
        key: InteractionKey,
        /// Description of what is missing.
        detail: String,
    },

    /// Two positions carry the same atom name but have different coefficients.
    ///
    /// Such an interaction cannot be written in a form that is independent
    /// of atom order.
    #[error(
        "{key} treats positions holding '{first}' and '{second}' differently although the names match"
    )]
    SymmetryContradiction {
        /// The interaction.
        key: InteractionKey,
        /// Name at the first exchanged position.
        first: AtomName,
        /// Name at the second exchanged position.
        second: AtomName,
    },
}

/// Family of a cross-term reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Bond,
    Angle,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bond => "bond",
            Self::Angle => "angle",
        })
    }
}

impl Error {
    /// Creates an [`Error::InconsistentPriority`] for raw atom names.
    ///
    /// # Arguments
    ///
    /// * `names` - The raw names of the interaction.
    /// * `line` - Line number of the entry.
    ///
    /// # Returns
    ///
    /// A new `InconsistentPriority` error.
    pub fn inconsistent_priority(names: &[String], line: usize) -> Self {
        Self::InconsistentPriority {
            names: names.join(","),
            line,
        }
    }

    /// Creates an [`Error::IncompleteCrossTerm`].
    ///
    /// # Arguments
    ///
    /// * `key` - The improper missing coefficients.
    /// * `detail` - Description of the gap.
    ///
    /// # Returns
    ///
    /// A new `IncompleteCrossTerm` error.
    pub fn incomplete_cross_term(key: &InteractionKey, detail: impl Into<String>) -> Self {
        Self::IncompleteCrossTerm {
            key: key.clone(),
            detail: detail.into(),
        }
    }

    pub fn symmetry_contradiction(key: &InteractionKey, first: &AtomName, second: &AtomName) -> Self {
        Self::SymmetryContradiction {
            key: key.clone(),
            first: first.clone(),
            second: second.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inconsistent_priority_lists_raw_names() {
        let names = vec!["c4*2".to_string(), "h1*3".to_string()];
        let err = Error::inconsistent_priority(&names, 12);
        assert_eq!(
            err.to_string(),
            "inconsistent priority suffixes in interaction 'c4*2,h1*3' (line 12)"
        );
    }

    #[test]
    fn read_errors_pass_through_unchanged() {
        let err: Error = frc::Error::parse(4, "bad").into();
        assert_eq!(err.to_string(), "failed to parse FRC data: bad (at line 4)");
    }

    #[test]
    fn reference_kind_display() {
        assert_eq!(ReferenceKind::Bond.to_string(), "bond");
        assert_eq!(ReferenceKind::Angle.to_string(), "angle");
    }
}
