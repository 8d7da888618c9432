use std::collections::BTreeMap;

use util::{
  error::{FillError, FillResult},
  grid::{Grid, MutGridlike},
};

use crate::{puzzle::Puzzle, puzzle::Slot, Assignment};

/// A complete fill: the word placed in every slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
  words: BTreeMap<Slot, String>,
}

impl Solution {
  pub fn from_assignment(puzzle: &Puzzle, assignment: &Assignment) -> Self {
    Self {
      words: assignment
        .iter()
        .map(|(&slot, &word)| (slot, puzzle.words().get(word).to_owned()))
        .collect(),
    }
  }

  pub fn get(&self, slot: Slot) -> Option<&str> {
    self.words.get(&slot).map(|word| word.as_str())
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  /// Slots and their words, in slot order.
  pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
    self.words.iter().map(|(&slot, word)| (slot, word.as_str()))
  }

  /// Lays every word out on a grid the size of the puzzle. Cells no word
  /// covers stay `None`.
  pub fn letter_grid(&self, puzzle: &Puzzle) -> FillResult<Grid<Option<char>>> {
    let mut answer_grid = Grid::new(puzzle.width(), puzzle.height());
    for (slot, word) in self.iter() {
      for (c, tile_pos) in word.chars().zip(slot.cells()) {
        let tile = answer_grid.get_mut(tile_pos).ok_or_else(|| {
          FillError::Internal(format!("Position {tile_pos} is out of bounds"))
        })?;
        match tile {
          Some(existing_c) => {
            if c != *existing_c {
              return Err(
                FillError::Internal(format!(
                  "Conflicting letter assignment at position {tile_pos}: {c} vs {existing_c}"
                ))
                .into(),
              );
            }
          }
          None => *tile = Some(c),
        }
      }
    }

    Ok(answer_grid)
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;
  use util::{grid::Gridlike, pos::Pos};

  use crate::{
    puzzle::{Orientation, Puzzle, Slot},
    Assignment,
  };

  use super::Solution;

  const ACROSS: Slot = Slot::new(0, 0, Orientation::Across, 3);
  const DOWN: Slot = Slot::new(0, 1, Orientation::Down, 3);

  fn crossing_puzzle() -> Puzzle {
    Puzzle::from_layout(
      "___
       #_#
       #_#",
      ["CAT", "ACE", "TIN"].map(|word| word.to_owned()),
    )
    .unwrap()
  }

  fn solution(puzzle: &Puzzle, words: &[(Slot, &str)]) -> Solution {
    let assignment: Assignment = words
      .iter()
      .map(|&(slot, word)| (slot, puzzle.words().id(word).unwrap()))
      .collect();
    Solution::from_assignment(puzzle, &assignment)
  }

  #[gtest]
  fn test_letter_grid() {
    let puzzle = crossing_puzzle();
    let solution = solution(&puzzle, &[(ACROSS, "CAT"), (DOWN, "ACE")]);
    expect_that!(solution.get(DOWN), some(eq("ACE")));

    let grid = solution.letter_grid(&puzzle);
    assert_that!(grid, ok(anything()));
    let grid = grid.unwrap();
    expect_that!(
      grid.iter_row(0).cloned().collect::<Vec<_>>(),
      container_eq([Some('C'), Some('A'), Some('T')])
    );
    expect_that!(grid.get(Pos { x: 1, y: 2 }).cloned().flatten(), some(eq('E')));
    expect_that!(grid.get(Pos { x: 0, y: 1 }).cloned().flatten(), none());
  }

  #[gtest]
  fn test_letter_grid_conflict() {
    let puzzle = crossing_puzzle();
    let solution = solution(&puzzle, &[(ACROSS, "CAT"), (DOWN, "TIN")]);
    expect_that!(solution.letter_grid(&puzzle), err(anything()));
  }
}
