//! Which slot to fill next, and in what order to try its words.

use std::cmp::Reverse;

use itertools::Itertools;

use crate::{
  domains::Domains,
  puzzle::{Overlap, Puzzle, Slot},
  word_bank::WordId,
  Assignment,
};

/// Minimum remaining values, then most neighbors, then slot order.
pub fn select_unassigned_slot(
  puzzle: &Puzzle,
  assignment: &Assignment,
  domains: &Domains,
) -> Option<Slot> {
  puzzle
    .slots()
    .iter()
    .filter(|&&slot| !assignment.contains_key(&slot))
    .min_by_key(|&&slot| {
      (
        domains.domain_size(slot),
        Reverse(puzzle.degree(slot)),
        slot,
      )
    })
    .copied()
}

/// How many words `word` would rule out of the given neighbors' domains if it
/// were placed in the slot they cross.
fn eliminated_count(
  puzzle: &Puzzle,
  domains: &Domains,
  word: WordId,
  neighbors: &[(Slot, Overlap)],
) -> usize {
  let bank = puzzle.words();
  neighbors
    .iter()
    .map(|&(neighbor, (idx, neighbor_idx))| {
      let letter = bank.letter(word, idx);
      domains
        .get(neighbor)
        .iter()
        .filter(|&&other| other == word || bank.letter(other, neighbor_idx) != letter)
        .count()
    })
    .sum()
}

/// The words of `slot`'s domain, least constraining first. Ties keep word
/// order.
pub fn order_candidate_words(
  puzzle: &Puzzle,
  slot: Slot,
  assignment: &Assignment,
  domains: &Domains,
) -> Vec<WordId> {
  let neighbors: Vec<_> = puzzle
    .neighbors(slot)
    .iter()
    .filter(|&&neighbor| !assignment.contains_key(&neighbor))
    .filter_map(|&neighbor| Some((neighbor, puzzle.overlap(slot, neighbor)?)))
    .collect();

  domains
    .get(slot)
    .iter()
    .map(|&word| (eliminated_count(puzzle, domains, word, &neighbors), word))
    .sorted()
    .map(|(_, word)| word)
    .collect()
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use crate::{
    domains::{enforce_node_consistency, Domains},
    puzzle::{Orientation, Puzzle, Slot},
    Assignment,
  };

  use super::{order_candidate_words, select_unassigned_slot};

  fn puzzle(layout: &str, words: &[&str]) -> Puzzle {
    Puzzle::from_layout(layout, words.iter().map(|&word| word.to_owned())).unwrap()
  }

  fn node_consistent(puzzle: &Puzzle) -> Domains {
    let mut domains = Domains::new(puzzle);
    enforce_node_consistency(puzzle, &mut domains);
    domains
  }

  #[gtest]
  fn test_selects_fewest_remaining_values() {
    // The 2-letter down slot has one candidate, the 3-letter slots have two.
    let puzzle = puzzle(
      "___
       #_#",
      &["CAT", "COT", "AT"],
    );
    let domains = node_consistent(&puzzle);
    expect_that!(
      select_unassigned_slot(&puzzle, &Assignment::new(), &domains),
      some(eq(Slot::new(0, 1, Orientation::Down, 2)))
    );
  }

  #[gtest]
  fn test_ties_broken_by_degree() {
    // Every slot has two candidates; the middle down slot crosses both across
    // slots.
    let puzzle = puzzle(
      "___
       #_#
       ___",
      &["CAT", "COT"],
    );
    let domains = node_consistent(&puzzle);
    expect_that!(
      select_unassigned_slot(&puzzle, &Assignment::new(), &domains),
      some(eq(Slot::new(0, 1, Orientation::Down, 3)))
    );
  }

  #[gtest]
  fn test_remaining_ties_use_slot_order() {
    let puzzle = puzzle(
      "___
       ###
       ___",
      &["CAT", "COT"],
    );
    let domains = node_consistent(&puzzle);
    let top = Slot::new(0, 0, Orientation::Across, 3);
    let bottom = Slot::new(2, 0, Orientation::Across, 3);
    expect_that!(
      select_unassigned_slot(&puzzle, &Assignment::new(), &domains),
      some(eq(top))
    );

    let assignment = Assignment::from([(top, puzzle.words().id("CAT").unwrap())]);
    expect_that!(
      select_unassigned_slot(&puzzle, &assignment, &domains),
      some(eq(bottom))
    );

    let assignment = Assignment::from([
      (top, puzzle.words().id("CAT").unwrap()),
      (bottom, puzzle.words().id("COT").unwrap()),
    ]);
    expect_that!(select_unassigned_slot(&puzzle, &assignment, &domains), none());
  }

  #[gtest]
  fn test_least_constraining_value_first() {
    // Across[1] meets Down[0], and the down slot starts out with all five
    // words.
    let puzzle = puzzle(
      "___
       #_#
       #_#",
      &["BOX", "CAT", "ACE", "ARK", "OWL"],
    );
    let domains = node_consistent(&puzzle);
    let across = Slot::new(0, 0, Orientation::Across, 3);
    let order: Vec<_> = order_candidate_words(&puzzle, across, &Assignment::new(), &domains)
      .into_iter()
      .map(|word| puzzle.words().get(word))
      .collect();

    // CAT rules out 3 (BOX, CAT, OWL), ACE and BOX rule out 4, ARK and OWL
    // rule out all 5.
    expect_that!(order, container_eq(["CAT", "ACE", "BOX", "ARK", "OWL"]));
  }

  #[gtest]
  fn test_assigned_neighbors_do_not_count() {
    let puzzle = puzzle(
      "___
       #_#
       #_#",
      &["BOX", "CAT", "ACE", "ARK", "OWL"],
    );
    let domains = node_consistent(&puzzle);
    let across = Slot::new(0, 0, Orientation::Across, 3);
    let down = Slot::new(0, 1, Orientation::Down, 3);
    let assignment = Assignment::from([(down, puzzle.words().id("ACE").unwrap())]);

    let order: Vec<_> = order_candidate_words(&puzzle, across, &assignment, &domains)
      .into_iter()
      .map(|word| puzzle.words().get(word))
      .collect();
    expect_that!(order, container_eq(["ACE", "ARK", "BOX", "CAT", "OWL"]));
  }

  #[gtest]
  fn test_ordering_leaves_domains_untouched() {
    let puzzle = puzzle(
      "___
       #_#
       #_#",
      &["BOX", "CAT", "ACE", "ARK", "OWL"],
    );
    let domains = node_consistent(&puzzle);
    let before = domains.clone();
    order_candidate_words(
      &puzzle,
      Slot::new(0, 0, Orientation::Across, 3),
      &Assignment::new(),
      &domains,
    );
    expect_eq!(domains, before);
  }
}
