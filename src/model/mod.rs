//! Core data structures of the normalized force field.
//!
//! This module provides the types that flow out of `frc-forge`:
//!
//! - [`atom`] – Atom types with mass, element, description and non-bonded parameters.
//! - [`equivalence`] – Per-type equivalence classes and their lookup token.
//! - [`key`] – Encoded atom names, canonical interaction keys and priorities.
//! - [`types`] – Functional-form tags for each interaction family.
//! - [`topology`] – Interaction records, priority-ordered tables, warnings and the
//!   [`ForceField`] that owns them.
//!
//! The model is built once per conversion by [`crate::convert`] and is read-only
//! afterwards.
//!
//! [`ForceField`]: topology::ForceField

pub mod atom;
pub mod equivalence;
pub mod key;
pub mod topology;
pub mod types;
