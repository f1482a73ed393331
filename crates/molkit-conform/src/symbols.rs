//! Extended secondary-structure symbol assignment
//!
//! Converts turn and bridge patterns into the extended per-residue
//! alphabet: `' '` unassigned, `'-'` non-amino-acid, `h/H` 4-helix,
//! `e/E` strand, `g/G` 3-helix, `i/I` 5-helix, `t/T` turn. Lowercase
//! marks the first residue of a run.
//!
//! The passes run in a fixed order; later passes only claim residues
//! still unassigned, so order is semantics. Neighbor tests that would
//! reach past either end of the array treat the missing neighbor as
//! unset.

use crate::pattern::{Patterns, TurnPattern};

/// Run all assignment passes over the global symbol array.
///
/// `flags` is indexed by global residue; `res_pointers` maps amino-acid
/// projection indices to global indices.
pub(crate) fn assign_symbols(flags: &mut [char], patterns: &Patterns, res_pointers: &[usize]) {
    four_helices(flags, &patterns.flags, res_pointers);
    strands(flags, &patterns.beta1, res_pointers);
    strands(flags, &patterns.beta2, res_pointers);
    wide_helices(flags, &patterns.flags, res_pointers, TurnPattern::TURN5, 5, 'i');
    wide_helices(flags, &patterns.flags, res_pointers, TurnPattern::TURN3, 3, 'g');
    demote_singlet_helices(flags, res_pointers);
    single_turns(flags, &patterns.flags, res_pointers, TurnPattern::TURN5, 5);
    single_turns(flags, &patterns.flags, res_pointers, TurnPattern::TURN4, 4);
    single_turns(flags, &patterns.flags, res_pointers, TurnPattern::TURN3, 3);
}

/// Two consecutive 4-turns open an alpha helix: the residue after the
/// first turn starts it, the following three continue it.
fn four_helices(flags: &mut [char], pattern: &[TurnPattern], rp: &[usize]) {
    let aa_count = rp.len();
    let mut ss = 'h';
    for i in 0..aa_count.saturating_sub(1) {
        if pattern[i].contains(TurnPattern::TURN4) && pattern[i + 1].contains(TurnPattern::TURN4) {
            flags[rp[i + 1]] = ss;
            ss = 'H';
            for offset in 2..=4 {
                if i + offset < aa_count {
                    flags[rp[i + offset]] = ss;
                }
            }
        } else {
            ss = 'h';
        }
    }
}

/// Strand growth along one beta-partner array.
///
/// Starting from a residue with a partner, the walk chains forward over
/// partnered residues, tolerating one- or two-residue gaps; each step is
/// accepted when the partner indices of the two anchor points are within
/// the allowed register shift (2, or 3 across a single gap). Accepted
/// stretches are painted `e`/`E` over unassigned or strand cells only.
fn strands(flags: &mut [char], beta: &[Option<usize>], rp: &[usize]) {
    let aa_count = rp.len();
    let mut i = 0;
    while i < aa_count {
        if beta[rp[i]].is_none() {
            i += 1;
            continue;
        }

        let mut ss = 'e';
        let mut anchor = i;
        let mut j = i + 1;
        while j < aa_count {
            let allowed;
            if beta[rp[j]].is_some() {
                allowed = 2;
            } else {
                j += 1;
                if j >= aa_count {
                    break;
                }
                if beta[rp[j]].is_some() {
                    allowed = 3;
                } else {
                    j += 1;
                    if j >= aa_count {
                        break;
                    }
                    if beta[rp[j]].is_none() {
                        break;
                    }
                    allowed = 2;
                }
            }

            let (Some(a), Some(b)) = (beta[rp[anchor]], beta[rp[j]]) else {
                break;
            };
            if (a as isize - b as isize).abs() <= allowed {
                for k in anchor..=j {
                    match flags[rp[k]] {
                        ' ' | 'e' => {
                            flags[rp[k]] = ss;
                            ss = 'E';
                        }
                        'E' => {
                            ss = 'E';
                        }
                        _ => {}
                    }
                }
            }
            anchor = j;
            j += 1;
        }

        i = anchor + 1;
    }
}

/// 3- and 5-helices: two consecutive n-turns paint the covered stretch
/// into unassigned cells only.
fn wide_helices(
    flags: &mut [char],
    pattern: &[TurnPattern],
    rp: &[usize],
    turn: TurnPattern,
    width: usize,
    first: char,
) {
    let aa_count = rp.len();
    let continued = first.to_ascii_uppercase();
    let mut ss = first;
    for i in 0..aa_count {
        let next_turn = i + 1 < aa_count && pattern[i + 1].contains(turn);
        if pattern[i].contains(turn) && next_turn {
            for offset in 1..=width {
                let index = i + offset;
                if index < aa_count && flags[rp[index]] == ' ' {
                    flags[rp[index]] = ss;
                    ss = continued;
                }
            }
        } else {
            ss = first;
        }
    }
}

/// A 3- or 5-helix symbol with no same-class neighbor becomes a turn
fn demote_singlet_helices(flags: &mut [char], rp: &[usize]) {
    let aa_count = rp.len();
    for i in 0..aa_count {
        let symbol = flags[rp[i]];
        if !matches!(symbol, 'g' | 'G' | 'i' | 'I') {
            continue;
        }
        let class = symbol.to_ascii_uppercase();
        let prev_same = i > 0 && flags[rp[i - 1]].to_ascii_uppercase() == class;
        let next_same = i + 1 < aa_count && flags[rp[i + 1]].to_ascii_uppercase() == class;
        if !prev_same && !next_same {
            flags[rp[i]] = 't';
        }
    }
}

/// An isolated n-turn (neither neighbor carries the same turn flag)
/// paints `t`/`T` across its width into unassigned cells.
fn single_turns(
    flags: &mut [char],
    pattern: &[TurnPattern],
    rp: &[usize],
    turn: TurnPattern,
    width: usize,
) {
    let aa_count = rp.len();
    for i in 0..aa_count {
        if !pattern[i].contains(turn) {
            continue;
        }
        let prev_set = i > 0 && pattern[i - 1].contains(turn);
        let next_set = i + 1 < aa_count && pattern[i + 1].contains(turn);
        if prev_set || next_set {
            continue;
        }

        let mut ss = 't';
        for offset in 1..=width {
            let index = i + offset;
            if index < aa_count && flags[rp[index]] == ' ' {
                flags[rp[index]] = ss;
                ss = 'T';
            }
        }
    }
}
