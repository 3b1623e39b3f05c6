use std::fmt;

/// The section an FRC line belongs to.
///
/// Every recognized `#header` maps to one variant. Headers that are not
/// recognized, and the lines before the first header, map to
/// [`SectionKind::Ignored`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum SectionKind {
    #[default]
    Ignored,
    AtomTypes,
    Equivalence,
    AutoEquivalence,
    Nonbond12_6,
    Nonbond9_6,
    BondIncrements,
    QuadraticBond,
    QuarticBond,
    MorseBond,
    QuadraticAngle,
    QuarticAngle,
    BondBond,
    BondAngle,
    Torsion1,
    Torsion3,
    MiddleBondTorsion3,
    EndBondTorsion3,
    AngleTorsion3,
    AngleAngleTorsion1,
    BondBond13,
    OutOfPlane,
    WilsonOutOfPlane,
    AngleAngle,
    OutOfPlaneOutOfPlane,
    TorsionTorsion1,
}

/// Processing phase of a section's data lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Read for its own sake (atom types, equivalences, non-bonded).
    Definition,
    /// Defines primary bonded terms and baseline geometry.
    Primitive,
    /// Refers back to primitive terms; processed after all of them.
    CrossTerm,
    /// Recognized but not converted.
    Unsupported,
    Ignored,
}

impl SectionKind {
    const ALL: [SectionKind; 25] = [
        Self::AtomTypes,
        Self::Equivalence,
        Self::AutoEquivalence,
        Self::Nonbond12_6,
        Self::Nonbond9_6,
        Self::BondIncrements,
        Self::QuadraticBond,
        Self::QuarticBond,
        Self::MorseBond,
        Self::QuadraticAngle,
        Self::QuarticAngle,
        Self::BondBond,
        Self::BondAngle,
        Self::Torsion1,
        Self::Torsion3,
        Self::MiddleBondTorsion3,
        Self::EndBondTorsion3,
        Self::AngleTorsion3,
        Self::AngleAngleTorsion1,
        Self::BondBond13,
        Self::OutOfPlane,
        Self::WilsonOutOfPlane,
        Self::AngleAngle,
        Self::OutOfPlaneOutOfPlane,
        Self::TorsionTorsion1,
    ];

    /// Looks up the section named by a header token such as `#quartic_bond`.
    ///
    /// Unknown headers yield [`SectionKind::Ignored`].
    pub fn from_header(token: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.header() == token)
            .unwrap_or(Self::Ignored)
    }

    pub fn header(self) -> &'static str {
        match self {
            Self::Ignored => "",
            Self::AtomTypes => "#atom_types",
            Self::Equivalence => "#equivalence",
            Self::AutoEquivalence => "#auto_equivalence",
            Self::Nonbond12_6 => "#nonbond(12-6)",
            Self::Nonbond9_6 => "#nonbond(9-6)",
            Self::BondIncrements => "#bond_increments",
            Self::QuadraticBond => "#quadratic_bond",
            Self::QuarticBond => "#quartic_bond",
            Self::MorseBond => "#morse_bond",
            Self::QuadraticAngle => "#quadratic_angle",
            Self::QuarticAngle => "#quartic_angle",
            Self::BondBond => "#bond-bond",
            Self::BondAngle => "#bond-angle",
            Self::Torsion1 => "#torsion_1",
            Self::Torsion3 => "#torsion_3",
            Self::MiddleBondTorsion3 => "#middle_bond-torsion_3",
            Self::EndBondTorsion3 => "#end_bond-torsion_3",
            Self::AngleTorsion3 => "#angle-torsion_3",
            Self::AngleAngleTorsion1 => "#angle-angle-torsion_1",
            Self::BondBond13 => "#bond-bond_1_3",
            Self::OutOfPlane => "#out_of_plane",
            Self::WilsonOutOfPlane => "#wilson_out_of_plane",
            Self::AngleAngle => "#angle-angle",
            Self::OutOfPlaneOutOfPlane => "#out_of_plane-out_of_plane",
            Self::TorsionTorsion1 => "#torsion-torsion_1",
        }
    }

    /// Fewest tokens a data line of this section must carry.
    ///
    /// Counts include the leading version and reference columns.
    pub fn min_tokens(self) -> usize {
        match self {
            Self::Ignored | Self::AtomTypes => 0,
            Self::OutOfPlaneOutOfPlane | Self::TorsionTorsion1 => 1,
            Self::Nonbond12_6 | Self::Nonbond9_6 => 5,
            Self::BondIncrements | Self::QuadraticBond | Self::BondBond | Self::BondAngle => 6,
            Self::MorseBond
            | Self::QuadraticAngle
            | Self::MiddleBondTorsion3
            | Self::EndBondTorsion3
            | Self::AngleTorsion3
            | Self::AngleAngleTorsion1
            | Self::BondBond13
            | Self::AngleAngle => 7,
            Self::Equivalence | Self::QuarticBond | Self::Torsion3 | Self::WilsonOutOfPlane => 8,
            Self::QuarticAngle | Self::Torsion1 | Self::OutOfPlane => 9,
            Self::AutoEquivalence => 12,
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            Self::Ignored => Phase::Ignored,
            Self::AtomTypes
            | Self::Equivalence
            | Self::AutoEquivalence
            | Self::Nonbond12_6
            | Self::Nonbond9_6 => Phase::Definition,
            Self::BondIncrements
            | Self::QuadraticBond
            | Self::QuarticBond
            | Self::MorseBond
            | Self::QuadraticAngle
            | Self::QuarticAngle
            | Self::Torsion1
            | Self::Torsion3
            | Self::OutOfPlane
            | Self::WilsonOutOfPlane => Phase::Primitive,
            Self::BondBond
            | Self::BondAngle
            | Self::MiddleBondTorsion3
            | Self::EndBondTorsion3
            | Self::AngleTorsion3
            | Self::AngleAngleTorsion1
            | Self::BondBond13
            | Self::AngleAngle => Phase::CrossTerm,
            Self::OutOfPlaneOutOfPlane | Self::TorsionTorsion1 => Phase::Unsupported,
        }
    }

    /// Whether `@` directive lines carry meaning in this section.
    pub fn takes_directives(self) -> bool {
        matches!(self, Self::Nonbond12_6 | Self::Nonbond9_6)
    }

    pub fn is_supported(self) -> bool {
        !matches!(self.phase(), Phase::Unsupported | Phase::Ignored)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => f.write_str("(ignored)"),
            other => f.write_str(other.header()),
        }
    }
}
