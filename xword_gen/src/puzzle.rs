use std::{
  cmp::Ordering,
  collections::{BTreeMap, BTreeSet, HashMap},
  fmt::Display,
  fs,
  path::Path,
};

use itertools::Itertools;
use util::{
  error::{FillError, FillResult},
  grid::{Grid, Gridlike},
  pos::{Diff, Pos},
};
use xword_dict::XWordDict;

use crate::word_bank::WordBank;

/// Runs of fillable cells shorter than this are not slots.
pub const MIN_SLOT_LENGTH: u32 = 2;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Orientation {
  Across,
  Down,
}

impl Orientation {
  pub const fn step(self) -> Diff {
    match self {
      Orientation::Across => Diff { x: 1, y: 0 },
      Orientation::Down => Diff { x: 0, y: 1 },
    }
  }
}

impl Display for Orientation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Orientation::Across => write!(f, "across"),
      Orientation::Down => write!(f, "down"),
    }
  }
}

/// A maximal run of fillable cells in one orientation. Slots order by
/// (row, column, orientation, length).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Slot {
  pos: Pos,
  orientation: Orientation,
  length: u32,
}

impl Slot {
  pub const fn new(row: u32, col: u32, orientation: Orientation, length: u32) -> Self {
    Self {
      pos: Pos { x: col as i32, y: row as i32 },
      orientation,
      length,
    }
  }

  pub const fn pos(&self) -> Pos {
    self.pos
  }

  pub const fn row(&self) -> u32 {
    self.pos.y as u32
  }

  pub const fn col(&self) -> u32 {
    self.pos.x as u32
  }

  pub const fn orientation(&self) -> Orientation {
    self.orientation
  }

  pub const fn length(&self) -> u32 {
    self.length
  }

  pub fn cells(&self) -> impl Iterator<Item = Pos> {
    let Self { pos, orientation, length } = *self;
    (0..length as i32).map(move |idx| pos + orientation.step() * idx)
  }

  /// The index of `cell` within this slot, if the slot covers it.
  pub fn index_of(&self, cell: Pos) -> Option<usize> {
    let diff = cell - self.pos;
    let (along, across) = match self.orientation {
      Orientation::Across => (diff.x, diff.y),
      Orientation::Down => (diff.y, diff.x),
    };
    (across == 0 && (0..self.length as i32).contains(&along)).then_some(along as usize)
  }

  fn sort_key(&self) -> (i32, i32, Orientation, u32) {
    (self.pos.y, self.pos.x, self.orientation, self.length)
  }
}

impl PartialOrd for Slot {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Slot {
  fn cmp(&self, other: &Self) -> Ordering {
    self.sort_key().cmp(&other.sort_key())
  }
}

impl Display for Slot {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} {} at row {}, col {}",
      self.length,
      self.orientation,
      self.row(),
      self.col()
    )
  }
}

/// `(i, j)`: letter `i` of the first slot's word shares a cell with letter `j`
/// of the second slot's word.
pub type Overlap = (usize, usize);

struct XWordEntry {
  pos: Pos,
  length: u32,
}

/// The read-only model of a puzzle: the board, its slots, how they cross, and
/// the vocabulary.
#[derive(Clone, Debug)]
pub struct Puzzle {
  board: Grid<bool>,
  slots: Vec<Slot>,
  overlaps: HashMap<(Slot, Slot), Overlap>,
  neighbors: BTreeMap<Slot, BTreeSet<Slot>>,
  bank: WordBank,
}

impl Puzzle {
  /// Parses a structure layout: `_` is a fillable cell, `#`, `X` and `█` are
  /// blocked. Rows shorter than the widest row are padded with blocked cells.
  pub fn build_board(layout: &str) -> FillResult<Grid<bool>> {
    let rows = layout
      .lines()
      .map(|line| line.trim())
      .filter(|line| !line.is_empty())
      .map(|line| {
        line
          .chars()
          .map(|c| match c {
            '_' => Ok(true),
            '#' | 'X' | '█' => Ok(false),
            _ => Err(FillError::Parse(format!("Unrecognized board character '{c}'")).into()),
          })
          .collect::<FillResult<Vec<_>>>()
      })
      .collect::<FillResult<Vec<_>>>()?;

    let width = rows
      .iter()
      .map(|row| row.len())
      .max()
      .ok_or_else(|| FillError::Parse("Empty board string".to_owned()))?;
    let height = rows.len();

    let board = rows
      .into_iter()
      .flat_map(|row| {
        let padding = width - row.len();
        row.into_iter().chain((0..padding).map(|_| false))
      })
      .collect();
    Grid::from_vec(board, width as u32, height as u32)
  }

  pub fn from_layout(layout: &str, words: impl IntoIterator<Item = String>) -> FillResult<Self> {
    Ok(Self::from_grid(Self::build_board(layout)?, words))
  }

  pub fn from_files(
    structure_path: impl AsRef<Path>,
    words_path: impl AsRef<Path>,
  ) -> FillResult<Self> {
    let layout = fs::read_to_string(structure_path)?;
    let dict = XWordDict::from_file(words_path)?;
    Self::from_layout(&layout, dict.into_words())
  }

  pub fn from_grid(board: Grid<bool>, words: impl IntoIterator<Item = String>) -> Self {
    let slots: Vec<_> = Self::iterate_row_entries(&board)
      .map(|XWordEntry { pos, length }| Slot { pos, orientation: Orientation::Across, length })
      .chain(
        Self::iterate_col_entries(&board)
          .map(|XWordEntry { pos, length }| Slot { pos, orientation: Orientation::Down, length }),
      )
      .filter(|slot| slot.length >= MIN_SLOT_LENGTH)
      .sorted()
      .collect();

    let overlaps = Self::build_overlaps(&slots);
    let neighbors = slots
      .iter()
      .map(|&slot| {
        let crossing = slots
          .iter()
          .filter(|&&other| overlaps.contains_key(&(slot, other)))
          .copied()
          .collect();
        (slot, crossing)
      })
      .collect();

    let bank = WordBank::from_words(words);
    log::debug!(
      "Built {}x{} puzzle with {} slots, {} crossings and {} words",
      board.width(),
      board.height(),
      slots.len(),
      overlaps.len() / 2,
      bank.len()
    );

    Self { board, slots, overlaps, neighbors, bank }
  }

  fn iterate_board_row_entries<'a, G: Gridlike<bool> + 'a>(
    board: G,
  ) -> impl Iterator<Item = XWordEntry> + 'a {
    struct FillableRuns<I> {
      x: u32,
      y: u32,
      iter: Option<I>,
    }

    impl<I> Iterator for FillableRuns<I>
    where
      I: Iterator<Item = bool>,
    {
      type Item = XWordEntry;

      fn next(&mut self) -> Option<XWordEntry> {
        let iter = self.iter.as_mut()?;

        loop {
          self.x += 1;
          match iter.next() {
            Some(true) => break,
            Some(false) => {}
            None => return None,
          }
        }
        let mut length = 1;
        let pos = Pos { x: (self.x - 1) as i32, y: self.y as i32 };

        loop {
          self.x += 1;
          match iter.next() {
            Some(true) => length += 1,
            Some(false) => break,
            None => {
              self.iter = None;
              break;
            }
          }
        }

        Some(XWordEntry { pos, length })
      }
    }

    (0..board.height()).flat_map(move |y| {
      let result: Vec<_> = FillableRuns {
        x: 0,
        y,
        iter: Some(board.iter_row(y).cloned()),
      }
      .collect();
      result.into_iter()
    })
  }

  fn iterate_row_entries(board: &Grid<bool>) -> impl Iterator<Item = XWordEntry> + '_ {
    Self::iterate_board_row_entries(board)
  }

  fn iterate_col_entries(board: &Grid<bool>) -> impl Iterator<Item = XWordEntry> + '_ {
    Self::iterate_board_row_entries(board.transpose())
      .map(|entry| XWordEntry { pos: entry.pos.transpose(), ..entry })
  }

  /// Records every crossing in both directions.
  fn build_overlaps(slots: &[Slot]) -> HashMap<(Slot, Slot), Overlap> {
    slots
      .iter()
      .filter(|slot| slot.orientation == Orientation::Across)
      .cartesian_product(
        slots
          .iter()
          .filter(|slot| slot.orientation == Orientation::Down),
      )
      .filter_map(|(&across, &down)| {
        let cell = Pos { x: down.pos.x, y: across.pos.y };
        let across_idx = across.index_of(cell)?;
        let down_idx = down.index_of(cell)?;
        Some([
          ((across, down), (across_idx, down_idx)),
          ((down, across), (down_idx, across_idx)),
        ])
      })
      .flatten()
      .collect()
  }

  pub fn width(&self) -> u32 {
    self.board.width()
  }

  pub fn height(&self) -> u32 {
    self.board.height()
  }

  pub fn board(&self) -> &Grid<bool> {
    &self.board
  }

  pub fn available(&self, pos: Pos) -> bool {
    self.board.get(pos).is_some_and(|&available| available)
  }

  /// All slots, in slot order.
  pub fn slots(&self) -> &[Slot] {
    &self.slots
  }

  pub fn words(&self) -> &WordBank {
    &self.bank
  }

  /// Panics if `slot` is not part of this puzzle.
  pub fn neighbors(&self, slot: Slot) -> &BTreeSet<Slot> {
    match self.neighbors.get(&slot) {
      Some(neighbors) => neighbors,
      None => panic!("Slot {slot} is not part of this puzzle"),
    }
  }

  pub fn degree(&self, slot: Slot) -> usize {
    self.neighbors(slot).len()
  }

  pub fn overlap(&self, x: Slot, y: Slot) -> Option<Overlap> {
    self.overlaps.get(&(x, y)).copied()
  }
}
