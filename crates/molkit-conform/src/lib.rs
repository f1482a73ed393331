//! Secondary-structure derivation for molkit-rs
//!
//! Implements the Kabsch-Sander hydrogen-bond analysis in the Molscript
//! variant: backbone amide hydrogens are inferred from carbonyl
//! geometry, candidate bonds are discovered through an octree over the
//! alpha carbons, and the surviving bonds are translated into n-turn
//! and bridge patterns, an extended per-residue symbol alphabet, and
//! finally disjoint conformation fragments per chain.
//!
//! # Pipeline
//!
//! 1. Project amino acids and locate backbone atoms ([`octree`],
//!    backbone resolution)
//! 2. Evaluate hydrogen-bond energies over candidate pairs, keeping the
//!    best bond per donor and acceptor slot
//! 3. Classify 3/4/5-turns and parallel/antiparallel bridges
//! 4. Assign extended symbols in eight ordered passes
//! 5. Coarsen, fragment per chain, split across density gaps, and
//!    demote too-short helices and strands
//!
//! # Example
//!
//! ```rust
//! use molkit_mol::{Atom, ChainMap, Residue, Structure};
//! use lin_alg::f64::Vec3;
//!
//! let mut structure = Structure::new();
//! for i in 0..4 {
//!     let atoms = vec![Atom::new("CA", "A", Vec3::new(i as f64 * 3.8, 0.0, 0.0))];
//!     structure.push_residue(Residue::classified("GLY", "A", atoms));
//! }
//!
//! let mut chains = ChainMap::from_structure(&structure);
//! let annotations = molkit_conform::assign(&structure, &mut chains);
//!
//! assert_eq!(annotations.fragments.len(), 1);
//! assert_eq!(chains.get("A").unwrap().fragments().len(), 1);
//! ```

// Module declarations
mod backbone;
mod engine;
mod fragments;
mod hbond;
pub mod octree;
mod pattern;
mod symbols;

// Re-export the engine surface
pub use engine::{annotate, apply, assign, Annotations};
pub use fragments::Fragment;
pub use octree::{Octree, OctreeError, OctreeItem};
