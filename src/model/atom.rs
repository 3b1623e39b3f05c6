use super::equivalence::Equivalence;
use super::types::PairStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct AtomType {
    pub name: String,
    /// Atomic mass, never below 1.0.
    pub mass: f64,
    pub element: String,
    /// Expected number of bonded neighbours, when the file gives one.
    pub connections: Option<u32>,
    pub description: String,
    /// Partial charge placeholder; FRC charges come from bond increments.
    pub charge: f64,
    pub nonbond: Option<NonbondParams>,
    pub equivalence: Equivalence,
}

impl AtomType {
    pub const MIN_MASS: f64 = 1.0;

    pub fn new(name: &str, mass: f64) -> Self {
        Self {
            name: name.to_string(),
            mass: mass.max(Self::MIN_MASS),
            element: String::new(),
            connections: None,
            description: String::new(),
            charge: 0.0,
            nonbond: None,
            equivalence: Equivalence::identity(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonbondParams {
    pub style: PairStyle,
    pub epsilon: f64,
    /// Sigma for `lj/cut`; the well position r0 for `class2`.
    pub sigma: f64,
}

impl NonbondParams {
    /// Substitute sigma when the file's coefficients give none.
    pub const FALLBACK_SIGMA: f64 = 1.0;

    pub fn new(style: PairStyle, epsilon: f64, sigma: f64) -> Self {
        Self {
            style,
            epsilon,
            sigma,
        }
    }
}
