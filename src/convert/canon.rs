//! Canonical ordering of interaction keys.
//!
//! The same physical interaction may be written in several atom orders; each
//! function here picks one representative so that lookups become
//! order-independent. Chains (bonds, angles, torsions) read the same
//! forwards and backwards. A cvff out-of-plane term is symmetric in its two
//! outer atoms. A Wilson improper keeps its hub at position 1 and is
//! symmetric in its three leaves.
//!
//! Every function returns the permutation it applied so that direction-
//! dependent coefficients can be reordered alongside the names.

use crate::model::key::{AtomName, InteractionKey};

/// Leaf positions of a four-atom improper; position 1 is the hub.
pub const LEAVES: [usize; 3] = [0, 2, 3];

pub fn encode(raw: &[String]) -> Vec<AtomName> {
    raw.iter().map(|name| AtomName::encode(name)).collect()
}

/// Canonicalizes a bond, angle or torsion.
///
/// The sequence is reversed when its reverse is lexicographically smaller,
/// so the first atom never exceeds the last and ties between them are
/// broken by the inner atoms.
///
/// # Returns
///
/// The key and whether the names were reversed.
pub fn chain(names: Vec<AtomName>, auto: bool) -> (InteractionKey, bool) {
    let reversed = names.iter().rev().lt(names.iter());
    let mut names = names;
    if reversed {
        names.reverse();
    }
    (InteractionKey::from_canonical(names, auto), reversed)
}

/// Canonicalizes a chain from raw FRC labels.
pub fn chain_from_raw(raw: &[String], auto: bool) -> (InteractionKey, bool) {
    chain(encode(raw), auto)
}

/// Canonicalizes a cvff out-of-plane term `(i, j, k, l)`.
///
/// Positions 0 and 3 are exchanged when position 0 sorts after position 3.
///
/// # Returns
///
/// The key and the permutation `p` with `canonical[k] = original[p[k]]`.
pub fn out_of_plane(names: [AtomName; 4], auto: bool) -> (InteractionKey, [usize; 4]) {
    let perm = if names[0] > names[3] {
        [3, 1, 2, 0]
    } else {
        [0, 1, 2, 3]
    };
    (permuted(&names, perm, auto), perm)
}

/// Canonicalizes a Wilson (class2) improper with hub at position 1.
///
/// The three leaves are sorted by name, ties keeping their original order.
///
/// # Returns
///
/// The key and the permutation `p` with `canonical[k] = original[p[k]]`.
pub fn wilson(names: [AtomName; 4], auto: bool) -> (InteractionKey, [usize; 4]) {
    let mut leaves = LEAVES;
    leaves.sort_by(|&a, &b| names[a].cmp(&names[b]).then(a.cmp(&b)));
    let perm = [leaves[0], 1, leaves[1], leaves[2]];
    (permuted(&names, perm, auto), perm)
}

/// Splits four raw labels into encoded names.
pub fn encode4(raw: &[String]) -> [AtomName; 4] {
    std::array::from_fn(|i| AtomName::encode(&raw[i]))
}

fn permuted(names: &[AtomName; 4], perm: [usize; 4], auto: bool) -> InteractionKey {
    InteractionKey::from_canonical(perm.iter().map(|&i| names[i].clone()).collect(), auto)
}
