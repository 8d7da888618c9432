//! The domain store: for every slot, the set of words still considered
//! possible for it.
//!
//! Every removal is recorded on a trail so that speculative work done during
//! search can be undone exactly. Take a [`Checkpoint`] before trying a
//! candidate and [`Domains::rewind`] to it when the candidate is abandoned.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
  puzzle::{Puzzle, Slot},
  word_bank::WordId,
};

/// A position in the domain trail to rewind to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Clone, Debug)]
pub struct Domains {
  domains: BTreeMap<Slot, BTreeSet<WordId>>,
  /// Removed (slot, word) pairs, oldest first.
  trail: Vec<(Slot, WordId)>,
}

#[track_caller]
fn unknown_slot(slot: Slot) -> ! {
  panic!("No domain for slot {slot}")
}

impl Domains {
  /// Every slot starts out with the whole vocabulary.
  pub fn new(puzzle: &Puzzle) -> Self {
    let all_words: BTreeSet<_> = puzzle.words().all_word_ids().collect();
    Self {
      domains: puzzle
        .slots()
        .iter()
        .map(|&slot| (slot, all_words.clone()))
        .collect(),
      trail: Vec::new(),
    }
  }

  pub fn get(&self, slot: Slot) -> &BTreeSet<WordId> {
    self
      .domains
      .get(&slot)
      .unwrap_or_else(|| unknown_slot(slot))
  }

  pub fn domain_size(&self, slot: Slot) -> usize {
    self.get(slot).len()
  }

  pub fn contains(&self, slot: Slot, word: WordId) -> bool {
    self.get(slot).contains(&word)
  }

  pub fn iter(&self) -> impl Iterator<Item = (Slot, &BTreeSet<WordId>)> {
    self.domains.iter().map(|(&slot, words)| (slot, words))
  }

  /// Removes every word of `slot`'s domain for which `keep` is false, and
  /// returns how many were removed.
  pub fn retain(&mut self, slot: Slot, mut keep: impl FnMut(WordId) -> bool) -> usize {
    let trail = &mut self.trail;
    let words = self
      .domains
      .get_mut(&slot)
      .unwrap_or_else(|| unknown_slot(slot));

    let before = trail.len();
    words.retain(|&word| {
      let kept = keep(word);
      if !kept {
        trail.push((slot, word));
      }
      kept
    });
    trail.len() - before
  }

  pub fn remove(&mut self, slot: Slot, word: WordId) -> bool {
    self.retain(slot, |other| other != word) > 0
  }

  /// Narrows `slot`'s domain to the single word `word`.
  pub fn assign(&mut self, slot: Slot, word: WordId) {
    self.retain(slot, |other| other == word);
  }

  pub fn checkpoint(&self) -> Checkpoint {
    Checkpoint(self.trail.len())
  }

  /// Restores every word removed since `checkpoint` was taken.
  pub fn rewind(&mut self, checkpoint: Checkpoint) {
    let Checkpoint(len) = checkpoint;
    debug_assert!(len <= self.trail.len());
    for (slot, word) in self.trail.drain(len..).rev() {
      self
        .domains
        .get_mut(&slot)
        .unwrap_or_else(|| unknown_slot(slot))
        .insert(word);
    }
  }

  /// Forgets the trail. Removals made so far can no longer be rewound.
  pub fn commit(&mut self) {
    self.trail.clear();
  }

  /// The first slot (in slot order) with no words left, if any.
  pub fn first_empty(&self) -> Option<Slot> {
    self
      .domains
      .iter()
      .find(|(_, words)| words.is_empty())
      .map(|(&slot, _)| slot)
  }
}

/// Two stores are equal when every slot has the same words, regardless of
/// how they got there.
impl PartialEq for Domains {
  fn eq(&self, other: &Self) -> bool {
    self.domains == other.domains
  }
}

impl Eq for Domains {}

/// Drops every word whose length differs from its slot's length. Returns the
/// first slot left with no candidates, if any.
pub fn enforce_node_consistency(puzzle: &Puzzle, domains: &mut Domains) -> Option<Slot> {
  let bank = puzzle.words();
  for &slot in puzzle.slots() {
    let removed = domains.retain(slot, |word| bank.word_len(word) == slot.length());
    log::trace!("Node consistency removed {removed} words from {slot}");
  }

  let empty = domains.first_empty();
  if let Some(slot) = empty {
    log::debug!("No word in the vocabulary fits {slot}");
  }
  empty
}
