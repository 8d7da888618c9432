use itertools::Itertools;

use crate::{puzzle::Puzzle, Assignment};

/// True when no word is used twice and every pair of assigned crossing slots
/// agrees on their shared letter. Unassigned slots are ignored.
pub fn is_consistent(puzzle: &Puzzle, assignment: &Assignment) -> bool {
  let bank = puzzle.words();
  assignment.values().all_unique()
    && assignment
      .iter()
      .tuple_combinations()
      .all(|((&x, &x_word), (&y, &y_word))| match puzzle.overlap(x, y) {
        Some((x_idx, y_idx)) => bank.letter(x_word, x_idx) == bank.letter(y_word, y_idx),
        None => true,
      })
}

pub fn is_complete(puzzle: &Puzzle, assignment: &Assignment) -> bool {
  puzzle
    .slots()
    .iter()
    .all(|slot| assignment.contains_key(slot))
}
