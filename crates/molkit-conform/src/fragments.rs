//! Coarsening and fragment extraction
//!
//! Reinterprets the extended symbol alphabet into the coarse coil /
//! turn / helix / strand classes, partitions each chain into disjoint
//! fragments, splits fragments across missing-density gaps, and demotes
//! helices and strands too short to be real.

use lin_alg::f64::Vec3;
use molkit_mol::{ConformationType, Structure};

/// Alpha-carbon distance above which a fragment is split (Angstroms)
const GAP_SPLIT_DISTANCE: f64 = 5.1;

/// Minimum residue count for a helix or strand fragment
const MIN_SECONDARY_LENGTH: usize = 3;

/// A contiguous residue range in global indices, inclusive, with its
/// assigned conformation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    /// First residue (global index)
    pub start: usize,
    /// Last residue (global index, inclusive)
    pub end: usize,
    /// Assigned conformation
    pub conformation: ConformationType,
}

impl Fragment {
    /// Create a fragment
    pub fn new(start: usize, end: usize, conformation: ConformationType) -> Self {
        Fragment {
            start,
            end,
            conformation,
        }
    }

    /// Number of residues covered
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Fragments always cover at least one residue
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Lossily coarsen the extended alphabet in place.
pub(crate) fn reinterpret(flags: &mut [char]) {
    let len = flags.len();

    // Collapse pi-helices and bridges into coil, 3-helices into helix
    for flag in flags.iter_mut() {
        match *flag {
            'i' | 'I' | 'b' | 'B' => *flag = ' ',
            'g' => *flag = 'h',
            'G' => *flag = 'H',
            _ => {}
        }
    }
    if len < 2 {
        return;
    }

    // A coil residue next to a turn joins the turn; interior cells also
    // require the far side to be assigned when the turn precedes them
    if flags[0] == ' ' && flags[1].to_ascii_uppercase() == 'T' {
        flags[0] = 'T';
    }
    for i in 1..len.saturating_sub(2) {
        let here_coil = flags[i] == ' ';
        let after_turn = flags[i - 1].to_ascii_uppercase() == 'T' && flags[i + 1] != ' ';
        let before_turn = flags[i + 1].to_ascii_uppercase() == 'T';
        if here_coil && (after_turn || before_turn) {
            flags[i] = 'T';
        }
    }
    if flags[len - 1] == ' ' && flags[len - 2].to_ascii_uppercase() == 'T' {
        flags[len - 1] = 'T';
    }

    // A turn start directly after a turn continues it
    for i in 1..len {
        if flags[i] == 't' && flags[i - 1] == 'T' {
            flags[i] = 'T';
        }
    }

    // Helices and strands shorter than three residues are noise
    let mut start = 0;
    let mut class = flags[0].to_ascii_uppercase();
    for i in 1..=len {
        let next = if i < len {
            flags[i].to_ascii_uppercase()
        } else {
            '\0'
        };
        if next != class {
            if (class == 'H' || class == 'E') && i - start < MIN_SECONDARY_LENGTH {
                for flag in &mut flags[start..i] {
                    *flag = ' ';
                }
            }
            start = i;
            class = next;
        }
    }

    // A lone amino acid between ligand gaps is absorbed into the gap
    for i in 1..len - 1 {
        if flags[i] != '-' && flags[i - 1] == '-' && flags[i + 1] == '-' {
            flags[i] = '-';
        }
    }
}

/// Partition the coarsened symbol array into disjoint fragments.
///
/// `chains` holds `[start, end]` global bounds per amino-acid chain. A
/// symbol change closes the running fragment at `i - 1`; a chain end
/// forcibly emits whatever is in progress, including `i` itself.
pub(crate) fn disjoint_fragments(flags: &[char], chains: &[[usize; 2]]) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    if chains.is_empty() || flags.is_empty() {
        return fragments;
    }

    let mut chain_index = 0;
    let mut end_of_chain: Option<usize> = None;
    let mut class = '-';
    let mut start = 0usize;

    for (i, &flag) in flags.iter().enumerate() {
        if chain_index < chains.len() && i == chains[chain_index][0] {
            end_of_chain = Some(chains[chain_index][1]);
            chain_index += 1;
            class = flag.to_ascii_uppercase();
            start = i;
        } else if flag != class && i > 0 {
            close_fragment(&mut fragments, class, start, i - 1, flag);
            class = flag.to_ascii_uppercase();
            start = i;
        }

        if end_of_chain == Some(i) {
            if class != '-' && start <= i {
                push_fragment(&mut fragments, class, start, i);
            }
            end_of_chain = None;
            class = '-';
            start = i + 1;
        }
    }

    fragments
}

/// Emit the fragment ending just before a symbol transition
fn close_fragment(fragments: &mut Vec<Fragment>, class: char, start: usize, end: usize, next: char) {
    if class == '-' || start > end {
        return;
    }
    // A one-residue coil running into a ligand gap is dropped
    if class == ' ' && next == '-' && end == start {
        return;
    }
    push_fragment(fragments, class, start, end);
}

fn push_fragment(fragments: &mut Vec<Fragment>, class: char, start: usize, end: usize) {
    let conformation = match class {
        ' ' => ConformationType::Coil,
        'T' => ConformationType::Turn,
        'H' => ConformationType::Helix,
        'E' => ConformationType::Strand,
        _ => return,
    };
    fragments.push(Fragment::new(start, end, conformation));
}

fn alpha_coord(structure: &Structure, global: usize) -> Vec3 {
    match structure.residue(global) {
        Some(residue) => residue
            .alpha_atom()
            .or_else(|| residue.atom(0))
            .map(|a| a.coord)
            .unwrap_or(Vec3::new(0.0, 0.0, 0.0)),
        None => Vec3::new(0.0, 0.0, 0.0),
    }
}

/// Split fragments at unusually long alpha-carbon steps.
///
/// The prefix keeps its type. A suffix of at least two residues becomes
/// a new fragment of the same type and is rescanned; a single far-side
/// residue is absorbed into the following fragment. A prefix left with
/// a single residue merges into an adjacent preceding fragment, or is
/// marked [`ConformationType::None`] when none is adjacent.
pub(crate) fn open_distance_gaps(structure: &Structure, fragments: &mut Vec<Fragment>) {
    let mut index = 0;
    while index < fragments.len() {
        let Fragment {
            start,
            end,
            conformation,
        } = fragments[index];

        let mut previous = alpha_coord(structure, start);
        let mut gap_at = None;
        for residue in start + 1..=end {
            let current = alpha_coord(structure, residue);
            if (current - previous).magnitude() <= GAP_SPLIT_DISTANCE {
                previous = current;
            } else {
                gap_at = Some(residue);
                break;
            }
        }
        let Some(far_side) = gap_at else {
            index += 1;
            continue;
        };

        fragments[index].end = far_side - 1;
        let remaining = end - far_side + 1;
        if remaining >= 2 {
            fragments.insert(index + 1, Fragment::new(far_side, end, conformation));
        } else if index + 1 < fragments.len() {
            fragments[index + 1].start = far_side;
        }

        let prefix = fragments[index];
        if prefix.len() <= 1 {
            if index > 0 && fragments[index - 1].end + 1 >= prefix.start {
                fragments[index - 1].end = prefix.end;
                fragments.remove(index);
                // the far-side fragment now sits at `index`; rescan it
                continue;
            }
            fragments[index].conformation = ConformationType::None;
        }
        index += 1;
    }
}

/// Demote helix and strand fragments shorter than three residues to coil.
pub(crate) fn demote_short_secondary(fragments: &mut [Fragment]) {
    for fragment in fragments {
        if fragment.len() < MIN_SECONDARY_LENGTH && fragment.conformation.is_regular() {
            fragment.conformation = ConformationType::Coil;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molkit_mol::{Atom, Classification, Residue};

    fn flags_of(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn as_string(flags: &[char]) -> String {
        flags.iter().collect()
    }

    #[test]
    fn test_reinterpret_collapses_symbols() {
        let mut flags = flags_of("iIbBgG");
        reinterpret(&mut flags);
        // g/G become h/H but the 2-long helix run is then reset
        assert_eq!(as_string(&flags), "      ");
    }

    #[test]
    fn test_reinterpret_keeps_long_helix() {
        let mut flags = flags_of(" hHHH ");
        reinterpret(&mut flags);
        assert_eq!(as_string(&flags), " hHHH ");
    }

    #[test]
    fn test_reinterpret_resets_short_strand() {
        let mut flags = flags_of(" eE  ");
        reinterpret(&mut flags);
        assert_eq!(as_string(&flags), "     ");
    }

    #[test]
    fn test_reinterpret_turn_absorption_at_ends() {
        // Both end cells join the turn, then the 't' start is continued
        let mut flags = flags_of(" tT ");
        reinterpret(&mut flags);
        assert_eq!(as_string(&flags), "TTTT");
    }

    #[test]
    fn test_reinterpret_turn_start_after_turn() {
        let mut flags = flags_of("tTtT");
        reinterpret(&mut flags);
        assert_eq!(as_string(&flags), "tTTT");
    }

    #[test]
    fn test_reinterpret_lone_residue_between_gaps() {
        let mut flags = flags_of("- -");
        reinterpret(&mut flags);
        assert_eq!(as_string(&flags), "---");
    }

    #[test]
    fn test_disjoint_single_chain() {
        let flags = flags_of(" hHHH ");
        let fragments = disjoint_fragments(&flags, &[[0, 5]]);
        assert_eq!(
            fragments,
            vec![
                Fragment::new(0, 0, ConformationType::Coil),
                Fragment::new(1, 4, ConformationType::Helix),
                Fragment::new(5, 5, ConformationType::Coil),
            ]
        );
    }

    #[test]
    fn test_disjoint_chain_end_forces_emission() {
        let flags = flags_of("eEEE");
        let fragments = disjoint_fragments(&flags, &[[0, 3]]);
        assert_eq!(
            fragments,
            vec![Fragment::new(0, 3, ConformationType::Strand)]
        );
    }

    #[test]
    fn test_disjoint_two_chains() {
        // Chain A residues 0..=2, a ligand at 3, chain B residues 4..=6
        let flags = flags_of("   -eEE");
        let fragments = disjoint_fragments(&flags, &[[0, 2], [4, 6]]);
        assert_eq!(
            fragments,
            vec![
                Fragment::new(0, 2, ConformationType::Coil),
                Fragment::new(4, 6, ConformationType::Strand),
            ]
        );
    }

    #[test]
    fn test_disjoint_interior_ligand() {
        let flags = flags_of("hHH- TT");
        let fragments = disjoint_fragments(&flags, &[[0, 6]]);
        assert_eq!(
            fragments,
            vec![
                Fragment::new(0, 2, ConformationType::Helix),
                Fragment::new(4, 4, ConformationType::Coil),
                Fragment::new(5, 6, ConformationType::Turn),
            ]
        );
    }

    #[test]
    fn test_disjoint_single_coil_before_gap_dropped() {
        let flags = flags_of("hHH -hHH");
        let fragments = disjoint_fragments(&flags, &[[0, 7]]);
        assert_eq!(
            fragments,
            vec![
                Fragment::new(0, 2, ConformationType::Helix),
                Fragment::new(5, 7, ConformationType::Helix),
            ]
        );
    }

    #[test]
    fn test_disjoint_helix_into_strand_shares_no_residue() {
        let flags = flags_of("hHHeEE");
        let fragments = disjoint_fragments(&flags, &[[0, 5]]);
        assert_eq!(
            fragments,
            vec![
                Fragment::new(0, 2, ConformationType::Helix),
                Fragment::new(3, 5, ConformationType::Strand),
            ]
        );
    }

    fn ca_only_structure(xs: &[f64]) -> Structure {
        let mut structure = Structure::new();
        for &x in xs {
            let atoms = vec![Atom::new("CA", "A", Vec3::new(x, 0.0, 0.0))];
            structure.push_residue(Residue::new("ALA", "A", Classification::AminoAcid, atoms));
        }
        structure
    }

    #[test]
    fn test_gap_split_keeps_type_both_sides() {
        let structure =
            ca_only_structure(&[0.0, 3.8, 7.6, 11.4, 19.4, 23.2, 27.0, 30.8]);
        let mut fragments = vec![Fragment::new(0, 7, ConformationType::Coil)];

        open_distance_gaps(&structure, &mut fragments);
        assert_eq!(
            fragments,
            vec![
                Fragment::new(0, 3, ConformationType::Coil),
                Fragment::new(4, 7, ConformationType::Coil),
            ]
        );
    }

    #[test]
    fn test_gap_single_far_residue_absorbed_into_next() {
        let structure = ca_only_structure(&[0.0, 3.8, 15.0, 18.8, 22.6, 26.4]);
        let mut fragments = vec![
            Fragment::new(0, 2, ConformationType::Coil),
            Fragment::new(3, 5, ConformationType::Helix),
        ];

        open_distance_gaps(&structure, &mut fragments);
        assert_eq!(
            fragments,
            vec![
                Fragment::new(0, 1, ConformationType::Coil),
                Fragment::new(2, 5, ConformationType::Helix),
            ]
        );
    }

    #[test]
    fn test_gap_degenerate_prefix_marked_none() {
        let structure = ca_only_structure(&[0.0, 12.0, 15.8, 19.6]);
        let mut fragments = vec![Fragment::new(0, 3, ConformationType::Coil)];

        open_distance_gaps(&structure, &mut fragments);
        assert_eq!(
            fragments,
            vec![
                Fragment::new(0, 0, ConformationType::None),
                Fragment::new(1, 3, ConformationType::Coil),
            ]
        );
    }

    #[test]
    fn test_gap_degenerate_prefix_merges_into_neighbor() {
        let structure = ca_only_structure(&[0.0, 3.8, 7.6, 11.4, 25.0, 28.8, 32.6]);
        let mut fragments = vec![
            Fragment::new(0, 2, ConformationType::Coil),
            Fragment::new(3, 6, ConformationType::Helix),
        ];

        open_distance_gaps(&structure, &mut fragments);
        // Helix prefix [3,3] merges into the adjacent coil
        assert_eq!(
            fragments,
            vec![
                Fragment::new(0, 3, ConformationType::Coil),
                Fragment::new(4, 6, ConformationType::Helix),
            ]
        );
    }

    #[test]
    fn test_no_gap_leaves_fragments_alone() {
        let structure = ca_only_structure(&[0.0, 3.8, 7.6]);
        let mut fragments = vec![Fragment::new(0, 2, ConformationType::Coil)];
        open_distance_gaps(&structure, &mut fragments);
        assert_eq!(fragments, vec![Fragment::new(0, 2, ConformationType::Coil)]);
    }

    #[test]
    fn test_demote_short_secondary() {
        let mut fragments = vec![
            Fragment::new(0, 1, ConformationType::Helix),
            Fragment::new(2, 4, ConformationType::Strand),
            Fragment::new(5, 5, ConformationType::Turn),
        ];
        demote_short_secondary(&mut fragments);
        assert_eq!(fragments[0].conformation, ConformationType::Coil);
        assert_eq!(fragments[1].conformation, ConformationType::Strand);
        assert_eq!(fragments[2].conformation, ConformationType::Turn);
    }
}
