//! Backbone geometry resolution
//!
//! Locates the N, C, and O backbone atoms of each amino-acid residue and
//! infers the position of the amide hydrogen, which crystallographic
//! models do not carry. Residues with missing backbone atoms keep `None`
//! slots and silently drop out of the corresponding donor/acceptor role.

use lin_alg::f64::Vec3;
use molkit_mol::{Residue, Structure};

/// Amide N-H bond length in Angstroms
const AMIDE_BOND_LENGTH: f64 = 1.008;

/// Maximum C(prev)-N distance for the trans-peptide H placement
const PREVIOUS_C_DISTANCE: f64 = 2.0;

/// Resolved backbone positions of one amino-acid residue
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BackboneAtoms {
    /// Amide nitrogen
    pub n: Option<Vec3>,
    /// Carbonyl carbon
    pub c: Option<Vec3>,
    /// Carbonyl oxygen
    pub o: Option<Vec3>,
    /// Inferred amide hydrogen
    pub h: Option<Vec3>,
}

/// Resolve backbone atoms for every projected amino acid, in order.
///
/// The amide hydrogen is placed `1.008` Angstroms from N, along the
/// direction of the preceding residue's C=O bond when that carbonyl
/// carbon is within `2.0` Angstroms of N (trans-peptide geometry), and
/// along the residue's own C=O direction otherwise. The first amino
/// acid always uses the own-carbonyl fallback.
pub(crate) fn resolve_backbone(structure: &Structure, res_pointers: &[usize]) -> Vec<BackboneAtoms> {
    let mut backbone = Vec::with_capacity(res_pointers.len());

    for (aa, &global) in res_pointers.iter().enumerate() {
        let mut atoms = match structure.residue(global) {
            Some(residue) => locate_backbone(residue),
            None => BackboneAtoms::default(),
        };

        atoms.h = infer_amide_hydrogen(&atoms, if aa > 0 { backbone.get(aa - 1) } else { None });
        backbone.push(atoms);
    }

    backbone
}

/// Find N, C, and O in a residue's atom list.
///
/// N is the first atom so named anywhere in the residue; C and O are the
/// first so named after the alpha carbon (or from the start when the
/// alpha index is unknown).
fn locate_backbone(residue: &Residue) -> BackboneAtoms {
    let n = residue.find_atom("N").map(|(_, a)| a.coord);

    let mut c = None;
    let mut o = None;
    let after_alpha = residue.alpha_index.map(|i| i + 1).unwrap_or(0);
    for i in after_alpha..residue.atom_count() {
        let atom = match residue.atom(i) {
            Some(atom) => atom,
            None => break,
        };
        if c.is_none() && atom.is_named("C") {
            c = Some(atom.coord);
        }
        if o.is_none() && atom.is_named("O") {
            o = Some(atom.coord);
        }
        if c.is_some() && o.is_some() {
            break;
        }
    }

    BackboneAtoms { n, c, o, h: None }
}

/// Place the amide hydrogen of a residue given its own backbone and the
/// previous amino acid's, when there is one.
fn infer_amide_hydrogen(own: &BackboneAtoms, previous: Option<&BackboneAtoms>) -> Option<Vec3> {
    let n = own.n?;

    let direction = match previous {
        Some(prev) => match (prev.c, prev.o) {
            (Some(cp), Some(op)) if (cp - n).magnitude() <= PREVIOUS_C_DISTANCE => Some(cp - op),
            _ => own_carbonyl_direction(own),
        },
        None => own_carbonyl_direction(own),
    };

    direction.map(|d| n + d.to_normalized() * AMIDE_BOND_LENGTH)
}

fn own_carbonyl_direction(own: &BackboneAtoms) -> Option<Vec3> {
    match (own.c, own.o) {
        (Some(c), Some(o)) => Some(o - c),
        _ => None,
    }
}
