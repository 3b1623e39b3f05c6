use std::cmp::Ordering;
use std::fmt;

/// An encoded atom label as it appears in an interaction key.
///
/// Labels starting with `*` are wildcards and all encode to the reserved
/// symbol `*`, dropping any priority digits. A `*` anywhere else in a
/// literal label is escaped as `\*`, so literal names never collide with
/// the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomName(String);

impl AtomName {
    pub const WILDCARD: &'static str = "*";

    /// Encodes a raw FRC atom label.
    ///
    /// ```
    /// use frc_forge::AtomName;
    ///
    /// assert!(AtomName::encode("*2").is_wildcard());
    /// assert_eq!(AtomName::encode("c4*2").as_str(), r"c4\*2");
    /// assert_eq!(AtomName::encode("cp").as_str(), "cp");
    /// ```
    pub fn encode(raw: &str) -> Self {
        if raw.starts_with('*') {
            Self::wildcard()
        } else {
            Self(raw.replace('*', "\\*"))
        }
    }

    pub fn wildcard() -> Self {
        Self(Self::WILDCARD.to_string())
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::WILDCARD
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AtomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order-independent identity of a bonded interaction.
///
/// Holds the canonically ordered atom names plus whether the interaction
/// came from an auto-generalized section. Two keys are equal only if both
/// agree. Keys are built by the canonicalizer; see
/// [`convert::canon`](crate::convert::canon).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractionKey {
    atoms: Vec<AtomName>,
    auto: bool,
}

impl InteractionKey {
    /// Wraps names that are already in canonical order.
    pub(crate) fn from_canonical(atoms: Vec<AtomName>, auto: bool) -> Self {
        Self { atoms, auto }
    }

    pub fn atoms(&self) -> &[AtomName] {
        &self.atoms
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    /// Number of atoms: 2 for bonds, 3 for angles, 4 for torsions and impropers.
    pub fn arity(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if the name sequence reads the same in both directions.
    pub fn is_palindrome(&self) -> bool {
        self.atoms.iter().eq(self.atoms.iter().rev())
    }
}

impl fmt::Display for InteractionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.auto {
            f.write_str("auto:")?;
        }
        for (i, atom) in self.atoms.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{atom}")?;
        }
        Ok(())
    }
}

/// Precedence of an interaction.
///
/// Explicit interactions always outrank auto-generalized ones; within the
/// same auto-ness a higher level outranks a lower one. The ordering follows
/// precedence, so the highest-priority record is the greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Priority {
    pub auto: bool,
    pub level: i64,
}

impl Priority {
    pub fn new(auto: bool, level: i64) -> Self {
        Self { auto, level }
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .auto
            .cmp(&self.auto)
            .then(self.level.cmp(&other.level))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.auto {
            write!(f, "auto {}", self.level)
        } else {
            write!(f, "{}", self.level)
        }
    }
}
