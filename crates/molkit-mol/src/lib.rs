//! Molecular data structures for molkit-rs
//!
//! This crate provides the structural model consumed and annotated by the
//! conformation engine:
//!
//! - [`Atom`] - Atom name, chain membership, and position
//! - [`Residue`] - Atom list plus classification and alpha-carbon index
//! - [`Structure`] - Ordered, read-only residue sequence
//! - [`Chain`] / [`ChainMap`] - Per-chain residue indexing and fragment ranges
//! - [`ConformationType`] - Coarse conformation classification
//!
//! # Architecture
//!
//! Residues own their atoms; a [`Structure`] owns its residues and is
//! borrowed immutably by algorithms. Chains are a separate, mutable
//! output surface: they map global residue indices to chain-local ones
//! and collect the [`FragmentRange`] values an engine publishes via
//! [`Chain::set_fragment_range`].
//!
//! # Example
//!
//! ```rust
//! use molkit_mol::{Atom, ChainMap, ConformationType, Residue, Structure};
//! use lin_alg::f64::Vec3;
//!
//! let mut structure = Structure::new();
//! for i in 0..3 {
//!     let atoms = vec![Atom::new("CA", "A", Vec3::new(i as f64 * 3.8, 0.0, 0.0))];
//!     structure.push_residue(Residue::classified("GLY", "A", atoms));
//! }
//!
//! let mut chains = ChainMap::from_structure(&structure);
//! let chain = chains.get_mut("A").unwrap();
//! chain.set_fragment_range(0, 2, ConformationType::Coil).unwrap();
//!
//! assert_eq!(chain.fragments().len(), 1);
//! ```

// Module declarations
mod atom;
mod chain;
mod error;
mod residue;
mod secondary;
mod structure;

// Re-export main types
pub use atom::Atom;
pub use chain::{Chain, ChainMap, FragmentRange};
pub use error::{MolError, MolResult};
pub use residue::{
    is_amino_acid, is_nucleotide, is_water, Classification, Residue, AMINO_ACIDS, NUCLEOTIDES,
    WATER_NAMES,
};
pub use secondary::ConformationType;
pub use structure::Structure;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::atom::Atom;
    pub use crate::chain::{Chain, ChainMap, FragmentRange};
    pub use crate::error::{MolError, MolResult};
    pub use crate::residue::{Classification, Residue};
    pub use crate::secondary::ConformationType;
    pub use crate::structure::Structure;
}
