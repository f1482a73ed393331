//! Kabsch-Sander hydrogen-bond energies
//!
//! Evaluates the electrostatic approximation of the backbone hydrogen
//! bond energy for candidate residue pairs and keeps, per donor and
//! acceptor slot, only the lowest-energy bond.

use crate::backbone::BackboneAtoms;

/// Distance cutoff for candidate pair enumeration (Angstroms)
pub(crate) const HBOND_CUTOFF_DISTANCE: f64 = 8.0;

/// Kabsch-Sander dimensional factor (kcal/mol * Angstrom)
const ENERGY_FACTOR: f64 = 332.0;

/// Partial charge on the carbonyl group
const CHARGE1: f64 = 0.42;

/// Partial charge on the amide group
const CHARGE2: f64 = 0.20;

/// Energies above this threshold do not qualify as hydrogen bonds
const HBOND_ENERGY_THRESHOLD: f64 = -0.5;

/// Initial per-slot energy, above any physical bond
const UNSET_ENERGY: f64 = 1.0e10;

/// Best hydrogen bond per C=O and per N-H slot, indexed by amino-acid
/// projection index
#[derive(Debug, Clone)]
pub(crate) struct HBondMap {
    /// Partner whose N-H accepts this residue's C=O, if any
    pub co_bond: Vec<Option<usize>>,
    /// Partner whose C=O reaches this residue's N-H, if any
    pub hn_bond: Vec<Option<usize>>,
    /// Energy stored for the C=O slot
    pub co_energy: Vec<f64>,
    /// Energy stored for the N-H slot
    pub hn_energy: Vec<f64>,
}

impl HBondMap {
    /// Evaluate all candidate pairs and reduce to the best bond per slot.
    ///
    /// Both directions of every pair are evaluated independently; a
    /// direction is skipped when either side lacks the backbone atoms it
    /// needs. `pairs` must hold ascending `(i, j)` pairs; processing them
    /// in ascending order keeps the published reduction deterministic for
    /// any enumeration order upstream.
    pub fn evaluate(backbone: &[BackboneAtoms], pairs: &[(usize, usize)]) -> Self {
        let count = backbone.len();
        let mut map = HBondMap {
            co_bond: vec![None; count],
            hn_bond: vec![None; count],
            co_energy: vec![UNSET_ENERGY; count],
            hn_energy: vec![UNSET_ENERGY; count],
        };

        for &(i, j) in pairs {
            if let Some(energy) = pair_energy(&backbone[i], &backbone[j]) {
                if energy < HBOND_ENERGY_THRESHOLD && energy < map.co_energy[i] {
                    map.co_bond[i] = Some(j);
                    map.hn_bond[j] = Some(i);
                    map.co_energy[i] = energy;
                }
            }

            if let Some(energy) = pair_energy(&backbone[j], &backbone[i]) {
                if energy < HBOND_ENERGY_THRESHOLD && energy < map.hn_energy[i] {
                    map.hn_bond[i] = Some(j);
                    map.co_bond[j] = Some(i);
                    map.hn_energy[i] = energy;
                }
            }
        }

        map
    }
}

/// Kabsch-Sander energy of the bond from `acceptor`'s C=O to `donor`'s
/// N-H, or `None` when the needed atoms are missing.
fn pair_energy(acceptor: &BackboneAtoms, donor: &BackboneAtoms) -> Option<f64> {
    let c = acceptor.c?;
    let o = acceptor.o?;
    let n = donor.n?;
    let h = donor.h?;

    let energy = 1.0 / (o - n).magnitude() + 1.0 / (c - h).magnitude()
        - 1.0 / (o - h).magnitude()
        - 1.0 / (c - n).magnitude();
    Some(energy * ENERGY_FACTOR * CHARGE1 * CHARGE2)
}
