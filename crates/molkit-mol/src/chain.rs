//! Chains and fragment range maps
//!
//! A chain collects the global residue indices that share one chain
//! identifier and carries the fragment ranges published by the
//! conformation engine. Chain-local indices count residues within the
//! chain, in structure order.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{MolError, MolResult};
use crate::secondary::ConformationType;
use crate::structure::Structure;

/// A conformation range in chain-local residue indices, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentRange {
    /// First residue of the fragment (chain-local)
    pub start: usize,
    /// Last residue of the fragment (chain-local, inclusive)
    pub end: usize,
    /// Assigned conformation
    pub conformation: ConformationType,
}

impl FragmentRange {
    /// Number of residues covered by the range
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Ranges always cover at least one residue
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A single chain: its residues (as global indices) and fragment ranges
#[derive(Debug, Clone)]
pub struct Chain {
    id: String,
    /// Global residue indices belonging to this chain, ascending
    residues: Vec<usize>,
    fragments: Vec<FragmentRange>,
}

impl Chain {
    fn new(id: impl Into<String>) -> Self {
        Chain {
            id: id.into(),
            residues: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// Chain identifier
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of residues in the chain
    #[inline]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Check if the chain has no residues
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Chain-local index of a global residue index
    pub fn residue_index(&self, global: usize) -> Option<usize> {
        self.residues.binary_search(&global).ok()
    }

    /// Global residue index at a chain-local position
    pub fn residue_at(&self, local: usize) -> Option<usize> {
        self.residues.get(local).copied()
    }

    /// Record a conformation over a chain-local residue range
    pub fn set_fragment_range(
        &mut self,
        start: usize,
        end: usize,
        conformation: ConformationType,
    ) -> MolResult<()> {
        if end < start {
            return Err(MolError::InvertedRange(start, end));
        }
        if end >= self.residues.len() {
            return Err(MolError::fragment_out_of_range(
                &self.id,
                start,
                end,
                self.residues.len(),
            ));
        }
        self.fragments.push(FragmentRange {
            start,
            end,
            conformation,
        });
        Ok(())
    }

    /// Published fragment ranges, in publication order
    #[inline]
    pub fn fragments(&self) -> &[FragmentRange] {
        &self.fragments
    }
}

/// Insertion-ordered collection of chains, keyed by chain identifier
#[derive(Debug, Clone, Default)]
pub struct ChainMap {
    chains: Vec<Chain>,
    index: AHashMap<String, usize>,
}

impl ChainMap {
    /// Build the chain map of a structure: one chain per distinct
    /// chain identifier, holding every residue of that chain
    pub fn from_structure(structure: &Structure) -> Self {
        let mut map = ChainMap::default();
        for (global, residue) in structure.residues().iter().enumerate() {
            let slot = match map.index.get(&residue.chain_id) {
                Some(&slot) => slot,
                None => {
                    let slot = map.chains.len();
                    map.chains.push(Chain::new(residue.chain_id.clone()));
                    map.index.insert(residue.chain_id.clone(), slot);
                    slot
                }
            };
            map.chains[slot].residues.push(global);
        }
        map
    }

    /// Number of chains
    #[inline]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Check if there are no chains
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Look up a chain by identifier
    pub fn get(&self, id: &str) -> Option<&Chain> {
        self.index.get(id).map(|&slot| &self.chains[slot])
    }

    /// Look up a chain mutably by identifier
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Chain> {
        match self.index.get(id) {
            Some(&slot) => Some(&mut self.chains[slot]),
            None => None,
        }
    }

    /// Iterate over chains in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Chain> {
        self.chains.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::residue::{Classification, Residue};
    use lin_alg::f64::Vec3;

    fn residue(name: &str, chain: &str) -> Residue {
        let atoms = vec![Atom::new("CA", chain, Vec3::new(0.0, 0.0, 0.0))];
        Residue::new(name, chain, Classification::of(name), atoms)
    }

    fn two_chain_structure() -> Structure {
        let mut s = Structure::new();
        s.push_residue(residue("ALA", "A"));
        s.push_residue(residue("GLY", "A"));
        s.push_residue(residue("HOH", "A"));
        s.push_residue(residue("SER", "B"));
        s.push_residue(residue("VAL", "B"));
        s
    }

    #[test]
    fn test_from_structure() {
        let chains = ChainMap::from_structure(&two_chain_structure());
        assert_eq!(chains.len(), 2);

        let a = chains.get("A").unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a.residue_at(0), Some(0));
        assert_eq!(a.residue_at(2), Some(2));

        let b = chains.get("B").unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!(b.residue_at(0), Some(3));
    }

    #[test]
    fn test_residue_index() {
        let chains = ChainMap::from_structure(&two_chain_structure());
        let b = chains.get("B").unwrap();
        assert_eq!(b.residue_index(3), Some(0));
        assert_eq!(b.residue_index(4), Some(1));
        assert_eq!(b.residue_index(0), None);
    }

    #[test]
    fn test_set_fragment_range() {
        let mut chains = ChainMap::from_structure(&two_chain_structure());
        let a = chains.get_mut("A").unwrap();
        a.set_fragment_range(0, 1, ConformationType::Helix).unwrap();

        assert_eq!(a.fragments().len(), 1);
        assert_eq!(a.fragments()[0].len(), 2);
        assert_eq!(a.fragments()[0].conformation, ConformationType::Helix);
    }

    #[test]
    fn test_set_fragment_range_errors() {
        let mut chains = ChainMap::from_structure(&two_chain_structure());
        let b = chains.get_mut("B").unwrap();

        assert!(matches!(
            b.set_fragment_range(1, 0, ConformationType::Coil),
            Err(MolError::InvertedRange(1, 0))
        ));
        assert!(matches!(
            b.set_fragment_range(0, 2, ConformationType::Coil),
            Err(MolError::FragmentOutOfRange { .. })
        ));
    }

    #[test]
    fn test_unknown_chain() {
        let mut chains = ChainMap::from_structure(&two_chain_structure());
        assert!(chains.get("Z").is_none());
        assert!(chains.get_mut("Z").is_none());
    }
}
