//! Atom data structure
//!
//! Provides the minimal atom record the conformation engine consumes:
//! a name, a chain identifier, and a coordinate.

use lin_alg::f64::Vec3;

/// A single atom within a residue
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom name as given by the source model ("N", "CA", "C", "O", ...)
    pub name: String,
    /// Chain identifier of the owning residue
    pub chain_id: String,
    /// Position in Angstroms
    pub coord: Vec3,
}

impl Atom {
    /// Create a new atom
    pub fn new(name: impl Into<String>, chain_id: impl Into<String>, coord: Vec3) -> Self {
        Atom {
            name: name.into(),
            chain_id: chain_id.into(),
            coord,
        }
    }

    /// Check the atom name against a backbone label
    #[inline]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}
