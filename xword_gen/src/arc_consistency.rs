//! AC-3 over the crossings of a puzzle.
//!
//! An arc `(x, y)` is satisfied when every word left in `x`'s domain has at
//! least one word in `y`'s domain that puts the same letter in their shared
//! cell. [`enforce`] revises arcs off a FIFO worklist until nothing changes or
//! some domain runs dry.

use std::collections::{HashSet, VecDeque};

use crate::{
  domains::Domains,
  puzzle::{Puzzle, Slot},
};

/// A directional constraint: words in the first slot need support in the
/// second.
pub type Arc = (Slot, Slot);

/// Propagation emptied `slot`'s domain, so nothing can be placed there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainWipeout {
  pub slot: Slot,
}

pub type ArcConsistencyResult = Result<(), DomainWipeout>;

/// Removes the words of `x` that have no support in `y`. Only `x`'s domain is
/// touched. Returns whether anything was removed.
pub fn revise(puzzle: &Puzzle, domains: &mut Domains, x: Slot, y: Slot) -> bool {
  let Some((x_idx, y_idx)) = puzzle.overlap(x, y) else {
    return false;
  };

  let bank = puzzle.words();
  let supported: HashSet<char> = domains
    .get(y)
    .iter()
    .map(|&word| bank.letter(word, y_idx))
    .collect();
  domains.retain(x, |word| supported.contains(&bank.letter(word, x_idx))) > 0
}

/// Every arc of the puzzle, in both directions.
pub fn all_arcs(puzzle: &Puzzle) -> Vec<Arc> {
  puzzle
    .slots()
    .iter()
    .flat_map(|&x| puzzle.neighbors(x).iter().map(move |&y| (x, y)))
    .collect()
}

/// The arcs whose support changes when `slot` is narrowed: each neighbor
/// against `slot`.
pub fn arcs_into(puzzle: &Puzzle, slot: Slot) -> Vec<Arc> {
  puzzle
    .neighbors(slot)
    .iter()
    .map(|&neighbor| (neighbor, slot))
    .collect()
}

/// Runs AC-3. With no `arcs`, the worklist starts with every arc of the
/// puzzle; otherwise it starts with exactly `arcs`.
///
/// On success every remaining word of every slot is supported in each of its
/// neighbors.
pub fn enforce(puzzle: &Puzzle, domains: &mut Domains, arcs: Option<Vec<Arc>>) -> ArcConsistencyResult {
  let mut queue = VecDeque::from(arcs.unwrap_or_else(|| all_arcs(puzzle)));
  let mut revisions = 0usize;

  while let Some((x, y)) = queue.pop_front() {
    revisions += 1;
    if !revise(puzzle, domains, x, y) {
      continue;
    }

    if domains.get(x).is_empty() {
      log::trace!("Domain of {x} wiped out after {revisions} revisions");
      return Err(DomainWipeout { slot: x });
    }

    queue.extend(
      puzzle
        .neighbors(x)
        .iter()
        .filter(|&&z| z != y)
        .map(|&z| (z, x)),
    );
  }

  log::trace!("Arc consistency reached after {revisions} revisions");
  Ok(())
}
