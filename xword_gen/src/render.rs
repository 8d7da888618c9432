use util::{
  bitcode,
  error::FillResult,
  grid::{Grid, Gridlike},
  pos::Pos,
};

use crate::puzzle::Puzzle;

pub const BLOCKED_CELL: char = '█';

/// One line per row. Fillable cells show their letter, or a space if they
/// have none.
pub fn render_text(puzzle: &Puzzle, letters: &Grid<Option<char>>) -> String {
  (0..puzzle.height() as i32)
    .map(|y| {
      (0..puzzle.width() as i32)
        .map(|x| {
          let pos = Pos { x, y };
          if puzzle.available(pos) {
            letters.get(pos).cloned().flatten().unwrap_or(' ')
          } else {
            BLOCKED_CELL
          }
        })
        .chain(std::iter::once('\n'))
        .collect::<String>()
    })
    .collect()
}

pub fn encode_grid(letters: &Grid<Option<char>>) -> Vec<u8> {
  bitcode::encode(letters)
}

pub fn decode_grid(bytes: &[u8]) -> FillResult<Grid<Option<char>>> {
  Ok(bitcode::decode(bytes)?)
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;
  use util::grid::Grid;

  use crate::puzzle::Puzzle;

  use super::{decode_grid, encode_grid, render_text};

  #[gtest]
  fn test_render_text() {
    let puzzle = Puzzle::from_layout(
      "___
       #_#",
      vec![],
    )
    .unwrap();
    let letters = Grid::from_vec(
      vec![Some('C'), Some('A'), Some('T'), None, None, None],
      3,
      2,
    )
    .unwrap();
    expect_eq!(render_text(&puzzle, &letters), "CAT\n█ █\n");
  }

  #[gtest]
  fn test_binary_grid() {
    let letters = Grid::from_vec(vec![Some('A'), None], 2, 1).unwrap();
    let decoded = decode_grid(&encode_grid(&letters));
    assert_that!(decoded, ok(anything()));
    expect_true!(decoded.unwrap() == letters);
  }
}
