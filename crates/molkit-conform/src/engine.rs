//! Conformation engine driver
//!
//! One stateless pass over a structure: project the amino acids, find
//! hydrogen bonds through the spatial index, classify turn and bridge
//! patterns, assign extended symbols, and coarsen them into disjoint
//! per-chain fragments. A second pass publishes the fragments onto the
//! chain map.

use lin_alg::f64::Vec3;
use log::warn;
use molkit_mol::{ChainMap, ConformationType, Structure};

use crate::backbone::resolve_backbone;
use crate::fragments::{self, Fragment};
use crate::hbond::{HBondMap, HBOND_CUTOFF_DISTANCE};
use crate::octree::{Octree, OctreeItem};
use crate::pattern::Patterns;
use crate::symbols::assign_symbols;

/// Derived conformation annotations, in global residue indices
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    /// Disjoint fragments: amino-acid fragments in chain order, then
    /// one strand per contiguous nucleic-acid run
    pub fragments: Vec<Fragment>,
}

impl Annotations {
    /// Check if no fragments were derived
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Derive conformation fragments for a structure.
///
/// The input is borrowed immutably and never modified. A structure
/// without amino acids yields only nucleic-acid strand fragments; an
/// empty structure yields nothing.
pub fn annotate(structure: &Structure) -> Annotations {
    let res_count = structure.residue_count();
    if res_count == 0 {
        return Annotations::default();
    }

    // Amino-acid projection and initial symbol array
    let mut res_pointers = Vec::new();
    let mut flags: Vec<char> = Vec::with_capacity(res_count);
    for (global, residue) in structure.residues().iter().enumerate() {
        if residue.is_amino_acid() {
            res_pointers.push(global);
            flags.push(' ');
        } else {
            flags.push('-');
        }
    }

    let mut all = Vec::new();
    if !res_pointers.is_empty() {
        let (ca_coords, chains) = collect_alpha_and_chains(structure, &res_pointers);
        let backbone = resolve_backbone(structure, &res_pointers);

        let items: Vec<OctreeItem> = ca_coords
            .iter()
            .enumerate()
            .map(|(aa, &position)| OctreeItem::new(position, aa))
            .collect();
        let mut pairs = match Octree::build(&items, 0.0) {
            Ok(tree) => tree.candidate_pairs(HBOND_CUTOFF_DISTANCE),
            Err(err) => {
                warn!("spatial index failed ({err}); no hydrogen bonds will be assigned");
                Vec::new()
            }
        };
        // The slot reduction below requires ascending pair order
        pairs.sort_unstable();

        let hbonds = HBondMap::evaluate(&backbone, &pairs);
        let patterns = Patterns::classify(&hbonds, &res_pointers, res_count);
        assign_symbols(&mut flags, &patterns, &res_pointers);

        fragments::reinterpret(&mut flags);
        all = fragments::disjoint_fragments(&flags, &chains);
        fragments::open_distance_gaps(structure, &mut all);
        fragments::demote_short_secondary(&mut all);
    }

    all.extend(nucleic_strands(structure));
    Annotations { fragments: all }
}

/// Publish annotations onto the chain map.
///
/// Each fragment is translated into chain-local indices through the
/// chain of its first residue. Fragments that do not resolve are logged
/// and skipped; publication never fails as a whole.
pub fn apply(structure: &Structure, annotations: &Annotations, chains: &mut ChainMap) {
    for fragment in &annotations.fragments {
        let Some(residue) = structure.residue(fragment.start) else {
            warn!(
                "fragment {}..={} starts past the structure; skipped",
                fragment.start, fragment.end
            );
            continue;
        };
        let Some(chain) = chains.get_mut(&residue.chain_id) else {
            warn!(
                "no chain '{}' for fragment {}..={}; skipped",
                residue.chain_id, fragment.start, fragment.end
            );
            continue;
        };
        let Some(local) = chain.residue_index(fragment.start) else {
            warn!(
                "residue {} is not on chain '{}'; fragment skipped",
                fragment.start, residue.chain_id
            );
            continue;
        };

        let span = fragment.end - fragment.start;
        if let Err(err) = chain.set_fragment_range(local, local + span, fragment.conformation) {
            warn!(
                "could not publish fragment {}..={}: {err}",
                fragment.start, fragment.end
            );
        }
    }
}

/// Derive and publish in one call; the annotations are also returned.
pub fn assign(structure: &Structure, chains: &mut ChainMap) -> Annotations {
    let annotations = annotate(structure);
    apply(structure, &annotations, chains);
    annotations
}

/// Alpha-carbon coordinates per projected amino acid, plus the chain
/// boundary table `[start, end]` in global indices.
///
/// Chain membership follows the chain id of the alpha atom; a residue
/// without one contributes its first atom instead, with a warning.
fn collect_alpha_and_chains(
    structure: &Structure,
    res_pointers: &[usize],
) -> (Vec<Vec3>, Vec<[usize; 2]>) {
    let mut coords = Vec::with_capacity(res_pointers.len());
    let mut chains: Vec<[usize; 2]> = Vec::new();
    let mut current_chain: Option<String> = None;

    for (aa, &global) in res_pointers.iter().enumerate() {
        let Some(residue) = structure.residue(global) else {
            continue;
        };
        let atom = residue.alpha_atom().or_else(|| {
            warn!(
                "residue {global} ({}) has no alpha carbon; using its first atom",
                residue.name
            );
            residue.atom(0)
        });
        let (coord, chain_id) = match atom {
            Some(atom) => (atom.coord, atom.chain_id.clone()),
            None => (Vec3::new(0.0, 0.0, 0.0), residue.chain_id.clone()),
        };
        coords.push(coord);

        if current_chain.as_deref() != Some(chain_id.as_str()) {
            if let Some(last) = chains.last_mut() {
                last[1] = res_pointers[aa - 1];
            }
            chains.push([global, global]);
            current_chain = Some(chain_id);
        }
    }
    if let (Some(last), Some(&tail)) = (chains.last_mut(), res_pointers.last()) {
        last[1] = tail;
    }

    (coords, chains)
}

/// One STRAND fragment per contiguous same-chain run of nucleic acids
fn nucleic_strands(structure: &Structure) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut run: Option<(usize, usize)> = None;
    let mut run_chain = "";

    for (global, residue) in structure.residues().iter().enumerate() {
        let continues = residue.is_nucleic_acid()
            && run.is_some_and(|(_, end)| end + 1 == global && run_chain == residue.chain_id);
        if continues {
            if let Some(run) = run.as_mut() {
                run.1 = global;
            }
            continue;
        }

        if let Some((start, end)) = run.take() {
            fragments.push(Fragment::new(start, end, ConformationType::Strand));
        }
        if residue.is_nucleic_acid() {
            run = Some((global, global));
            run_chain = residue.chain_id.as_str();
        }
    }
    if let Some((start, end)) = run {
        fragments.push(Fragment::new(start, end, ConformationType::Strand));
    }

    fragments
}
