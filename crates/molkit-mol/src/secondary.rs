//! Conformation types
//!
//! Provides the coarse conformation classification assigned to residue
//! fragments after secondary-structure derivation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Conformation type for a fragment of consecutive residues
///
/// This is the coarse classification published onto chains; the finer
/// helix subtypes used during derivation are collapsed before fragments
/// are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ConformationType {
    /// Random coil (no regular conformation)
    Coil = 0,
    /// Turn
    Turn = 1,
    /// Helix
    Helix = 2,
    /// Beta strand (also used for nucleic-acid stretches)
    Strand = 3,
    /// Unusable stretch (missing density, degenerate split)
    None = 4,
    /// Not yet assigned
    #[default]
    Undefined = 5,
}

impl ConformationType {
    /// Convert to single character code
    pub fn to_char(&self) -> char {
        match self {
            ConformationType::Coil => 'C',
            ConformationType::Turn => 'T',
            ConformationType::Helix => 'H',
            ConformationType::Strand => 'E',
            ConformationType::None => '-',
            ConformationType::Undefined => '?',
        }
    }

    /// Get a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ConformationType::Coil => "Coil",
            ConformationType::Turn => "Turn",
            ConformationType::Helix => "Helix",
            ConformationType::Strand => "Strand",
            ConformationType::None => "None",
            ConformationType::Undefined => "Undefined",
        }
    }

    /// Check if this is a regular conformation (helix or strand)
    #[inline]
    pub fn is_regular(&self) -> bool {
        matches!(self, ConformationType::Helix | ConformationType::Strand)
    }
}

impl fmt::Display for ConformationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_char() {
        assert_eq!(ConformationType::Helix.to_char(), 'H');
        assert_eq!(ConformationType::Strand.to_char(), 'E');
        assert_eq!(ConformationType::Coil.to_char(), 'C');
    }

    #[test]
    fn test_is_regular() {
        assert!(ConformationType::Helix.is_regular());
        assert!(ConformationType::Strand.is_regular());
        assert!(!ConformationType::Turn.is_regular());
        assert!(!ConformationType::Coil.is_regular());
        assert!(!ConformationType::None.is_regular());
    }

    #[test]
    fn test_default() {
        assert_eq!(ConformationType::default(), ConformationType::Undefined);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ConformationType::Helix), "Helix");
    }
}
