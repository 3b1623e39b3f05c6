//! A pure Rust engine for extracting and normalizing MSI/BIOSYM FRC force fields.
//! It reads the section-based, column-oriented FRC text format and produces a
//! queryable model of atom types and bonded and non-bonded interactions.
//!
//! # Features
//!
//! - **Robust reading**: Quoted-token lexing, a closed set of recognized
//!   sections, and line-numbered diagnostics
//! - **Canonical keys**: Order-independent keys for bonds, angles, torsions,
//!   cvff out-of-plane and Wilson impropers, with wildcard and escape handling
//! - **Priorities**: `*n` priority suffixes, with auto-generalized parameters
//!   always ranked below explicit ones
//! - **Class2 cross terms**: Bond-bond, bond-angle, torsion couplings and
//!   improper angle-angle terms merged onto their primary interactions, with
//!   reference geometry filled in and exchange symmetry detected
//!
//! # Quick Start
//!
//! The main entry point is the [`convert`] function, which takes FRC text and a
//! [`ConvertConfig`] and produces a normalized [`ForceField`]:
//!
//! ```
//! use frc_forge::{convert, ConvertConfig, FrcError};
//!
//! let frc = "\
//! #atom_types cvff
//! !Ver Ref  Type  Mass      Element  connection  Comment
//!  1.0  1   c     12.01115  C        4           sp3 aliphatic carbon
//!  1.0  1   h     1.00797   H        1           hydrogen bonded to carbon
//!
//! #quadratic_bond cvff
//!  1.0  1   c  h   1.1050  340.6175
//!
//! #quadratic_angle cvff
//!  1.0  1   h  c  h   106.4000  39.5000
//! ";
//!
//! let ff = convert(frc, &ConvertConfig::default())?;
//!
//! assert_eq!(ff.atom_types.len(), 2);
//! assert_eq!(ff.atom_type("c").unwrap().element, "C");
//!
//! // Harmonic bonds store [K, r0]; angles store [K, theta0].
//! let bond = ff.bonds.iter().next().unwrap();
//! assert_eq!(bond.key.to_string(), "c,h");
//! assert_eq!(bond.params, [340.6175, 1.105]);
//! assert_eq!(bond.baseline(), Some(1.105));
//!
//! let angle = ff.angles.iter().next().unwrap();
//! assert_eq!(angle.params, [39.5, 106.4]);
//!
//! assert!(ff.warnings.is_empty());
//! # Ok::<(), FrcError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`frc`]: Lexer and section reader for FRC text
//! - [`convert`]: Conversion passes from a read document to a [`ForceField`]
//!
//! # Data Types
//!
//! - [`ForceField`]: Atom types, bond increments, interaction tables and warnings
//! - [`AtomType`]: Mass, element, description, equivalences and non-bonded parameters
//! - [`Equivalence`]: Per-type equivalence classes used for parameter lookup
//! - [`InteractionKey`]: Canonical atom names plus the auto flag
//! - [`InteractionRecord`]: Style, parameters, cross terms and symmetry of one interaction
//! - [`Priority`]: Precedence of an interaction
//! - [`Warning`]: Non-fatal conditions found while converting

pub mod convert;
pub mod frc;
mod model;

pub use model::atom::{AtomType, NonbondParams};
pub use model::equivalence::{AutoEquivalence, Equivalence};
pub use model::key::{AtomName, InteractionKey, Priority};
pub use model::topology::{
    BondIncrement, CrossTermKind, ForceField, InteractionRecord, InteractionTable, SymmetrySet,
    Warning,
};
pub use model::types::{
    AngleStyle, BondStyle, DihedralStyle, ImproperStyle, InteractionStyle, PairStyle,
    ParseStyleError,
};

pub use convert::{
    ConvertConfig, EquivalenceMode, ReferenceKind, StyleSelection, convert, convert_file,
    convert_reader,
};

pub use convert::Error as FrcError;
