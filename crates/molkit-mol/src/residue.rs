//! Residue classification and data structure
//!
//! Residues carry their atoms inline together with a classification and
//! the index of the alpha-carbon atom, when one exists. Classification
//! helpers recognize residue names by lookup tables.

use serde::{Deserialize, Serialize};

use crate::atom::Atom;

/// Chemical classification of a residue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Classification {
    /// Protein residue
    AminoAcid = 0,
    /// DNA/RNA residue
    NucleicAcid = 1,
    /// Bound small molecule
    Ligand = 2,
    /// Water
    Water = 3,
    /// Anything else
    #[default]
    Unknown = 4,
}

impl Classification {
    /// Classify a residue by its name
    pub fn of(resn: &str) -> Self {
        if is_amino_acid(resn) {
            Classification::AminoAcid
        } else if is_nucleotide(resn) {
            Classification::NucleicAcid
        } else if is_water(resn) {
            Classification::Water
        } else {
            Classification::Unknown
        }
    }
}

/// Standard amino acid residue names (3-letter codes)
pub const AMINO_ACIDS: &[&str] = &[
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    // Histidine protonation variants
    "HID", "HIE", "HIP", "HSP", "HSD", "HSE",
    // Cysteine variants
    "CYX",
    // Non-standard but common
    "MSE", "SEC", "PYL", "UNK",
];

/// Standard nucleotide residue names
pub const NUCLEOTIDES: &[&str] = &[
    // Standard DNA
    "DA", "DC", "DG", "DT", "DI",
    // Standard RNA
    "A", "C", "G", "U", "I",
    // Generic
    "N", "DN",
    // Alternative 3-letter names
    "ADE", "CYT", "GUA", "THY", "URA",
];

/// Common water residue names
pub const WATER_NAMES: &[&str] = &["HOH", "WAT", "H2O", "DOD", "TIP", "TIP3", "SPC", "SOL"];

/// Check if a residue name is a standard amino acid
pub fn is_amino_acid(resn: &str) -> bool {
    AMINO_ACIDS.contains(&resn)
}

/// Check if a residue name is a nucleotide
pub fn is_nucleotide(resn: &str) -> bool {
    NUCLEOTIDES.contains(&resn)
}

/// Check if a residue name is water
pub fn is_water(resn: &str) -> bool {
    WATER_NAMES.contains(&resn)
}

/// A residue: an ordered list of atoms plus identity and classification
#[derive(Debug, Clone)]
pub struct Residue {
    /// Residue name (e.g. "ALA")
    pub name: String,
    /// Chain identifier
    pub chain_id: String,
    /// Chemical classification
    pub classification: Classification,
    /// Index of the alpha-carbon atom, when present
    pub alpha_index: Option<usize>,
    atoms: Vec<Atom>,
}

impl Residue {
    /// Create a residue; the alpha atom is located by name ("CA")
    pub fn new(
        name: impl Into<String>,
        chain_id: impl Into<String>,
        classification: Classification,
        atoms: Vec<Atom>,
    ) -> Self {
        let alpha_index = atoms.iter().position(|a| a.is_named("CA"));
        Residue {
            name: name.into(),
            chain_id: chain_id.into(),
            classification,
            alpha_index,
            atoms,
        }
    }

    /// Create a residue classifying it by name
    pub fn classified(
        name: impl Into<String>,
        chain_id: impl Into<String>,
        atoms: Vec<Atom>,
    ) -> Self {
        let name = name.into();
        let classification = Classification::of(&name);
        Residue::new(name, chain_id, classification, atoms)
    }

    /// Number of atoms in the residue
    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Check if the residue has no atoms
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Get an atom by index
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Iterate over the atoms
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    /// Get the alpha-carbon atom, when present
    pub fn alpha_atom(&self) -> Option<&Atom> {
        self.alpha_index.and_then(|i| self.atoms.get(i))
    }

    /// Find the first atom with the given name
    pub fn find_atom(&self, name: &str) -> Option<(usize, &Atom)> {
        self.atoms
            .iter()
            .enumerate()
            .find(|(_, a)| a.is_named(name))
    }

    /// Check if the residue is an amino acid
    #[inline]
    pub fn is_amino_acid(&self) -> bool {
        self.classification == Classification::AminoAcid
    }

    /// Check if the residue is a nucleic acid
    #[inline]
    pub fn is_nucleic_acid(&self) -> bool {
        self.classification == Classification::NucleicAcid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lin_alg::f64::Vec3;

    fn backbone(chain: &str) -> Vec<Atom> {
        ["N", "CA", "C", "O"]
            .iter()
            .enumerate()
            .map(|(i, name)| Atom::new(*name, chain, Vec3::new(i as f64, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_classification_of() {
        assert_eq!(Classification::of("ALA"), Classification::AminoAcid);
        assert_eq!(Classification::of("DA"), Classification::NucleicAcid);
        assert_eq!(Classification::of("U"), Classification::NucleicAcid);
        assert_eq!(Classification::of("HOH"), Classification::Water);
        assert_eq!(Classification::of("HEM"), Classification::Unknown);
    }

    #[test]
    fn test_alpha_index_located() {
        let res = Residue::classified("ALA", "A", backbone("A"));
        assert_eq!(res.alpha_index, Some(1));
        assert_eq!(res.alpha_atom().unwrap().name, "CA");
    }

    #[test]
    fn test_alpha_index_missing() {
        let atoms = vec![Atom::new("P", "A", Vec3::new(0.0, 0.0, 0.0))];
        let res = Residue::classified("U", "A", atoms);
        assert_eq!(res.alpha_index, None);
        assert!(res.alpha_atom().is_none());
    }

    #[test]
    fn test_find_atom() {
        let res = Residue::classified("GLY", "A", backbone("A"));
        let (idx, atom) = res.find_atom("O").unwrap();
        assert_eq!(idx, 3);
        assert_eq!(atom.name, "O");
        assert!(res.find_atom("CB").is_none());
    }

    #[test]
    fn test_predicates() {
        let aa = Residue::classified("GLY", "A", backbone("A"));
        assert!(aa.is_amino_acid());
        assert!(!aa.is_nucleic_acid());

        let na = Residue::classified("G", "B", vec![]);
        assert!(na.is_nucleic_acid());
    }
}
