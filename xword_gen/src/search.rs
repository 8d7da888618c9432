//! Backtracking search that maintains arc consistency.
//!
//! The solver makes the whole puzzle node- and arc-consistent once, then fills
//! one slot at a time: pick a slot, try its words in order, and after each
//! choice propagate the consequences to its neighbors. A choice that leads
//! nowhere is undone by rewinding the domain store to the checkpoint taken
//! before it, so sibling branches always start from the same state.

use std::time::{Duration, Instant};

use util::error::{FillError, FillResult};

use crate::{
  arc_consistency::{arcs_into, enforce},
  consistency::{is_complete, is_consistent},
  domains::{enforce_node_consistency, Domains},
  heuristics::{order_candidate_words, select_unassigned_slot},
  puzzle::{Puzzle, Slot},
  solution::Solution,
  word_bank::WordId,
  Assignment,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
  /// Give up with [`FillError::Timeout`] once the search has run this long.
  pub timeout: Option<Duration>,
  /// Try the words that rule out the fewest neighbor words first. When off,
  /// words are tried in word order.
  pub least_constraining_values: bool,
}

impl Default for SolverConfig {
  fn default() -> Self {
    Self { timeout: None, least_constraining_values: true }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
  /// Partial assignments the search entered.
  pub states: u64,
  /// Words that were tried and then taken back.
  pub backtracks: u64,
}

pub struct Solver<'a> {
  puzzle: &'a Puzzle,
  config: SolverConfig,
  domains: Domains,
  deadline: Option<Instant>,
  stats: SearchStats,
}

impl<'a> Solver<'a> {
  pub fn new(puzzle: &'a Puzzle, config: SolverConfig) -> Self {
    Self {
      puzzle,
      config,
      domains: Domains::new(puzzle),
      deadline: None,
      stats: SearchStats::default(),
    }
  }

  pub fn domains(&self) -> &Domains {
    &self.domains
  }

  pub fn stats(&self) -> SearchStats {
    self.stats
  }

  /// Filters every domain by length, then runs AC-3 over the whole puzzle.
  /// Returns false if some slot is left with no candidates.
  pub fn establish_consistency(&mut self) -> bool {
    if enforce_node_consistency(self.puzzle, &mut self.domains).is_some() {
      return false;
    }
    if let Err(wipeout) = enforce(self.puzzle, &mut self.domains, None) {
      log::debug!("No word fits {} once crossings are considered", wipeout.slot);
      return false;
    }
    self.domains.commit();
    true
  }

  /// Searches for a complete fill. `Ok(None)` means the puzzle has no
  /// solution with this vocabulary.
  pub fn solve(&mut self) -> FillResult<Option<Solution>> {
    // A deadline past the end of representable time is no deadline.
    self.deadline = self
      .config
      .timeout
      .and_then(|timeout| Instant::now().checked_add(timeout));

    if !self.establish_consistency() {
      return Ok(None);
    }

    let mut assignment = Assignment::new();
    let found = self.backtrack(&mut assignment)?;
    log::info!(
      "Search {} after {} states and {} backtracks",
      if found { "succeeded" } else { "failed" },
      self.stats.states,
      self.stats.backtracks
    );

    Ok(found.then(|| Solution::from_assignment(self.puzzle, &assignment)))
  }

  fn check_deadline(&self) -> FillResult {
    match (self.deadline, self.config.timeout) {
      (Some(deadline), Some(timeout)) if Instant::now() >= deadline => {
        Err(FillError::Timeout(timeout).into())
      }
      _ => Ok(()),
    }
  }

  fn candidate_words(&self, slot: Slot, assignment: &Assignment) -> Vec<WordId> {
    if self.config.least_constraining_values {
      order_candidate_words(self.puzzle, slot, assignment, &self.domains)
    } else {
      self.domains.get(slot).iter().copied().collect()
    }
  }

  fn backtrack(&mut self, assignment: &mut Assignment) -> FillResult<bool> {
    self.stats.states += 1;
    self.check_deadline()?;

    let Some(slot) = select_unassigned_slot(self.puzzle, assignment, &self.domains) else {
      debug_assert!(is_complete(self.puzzle, assignment));
      debug_assert!(is_consistent(self.puzzle, assignment));
      return Ok(true);
    };

    for word in self.candidate_words(slot, assignment) {
      if self.try_word(assignment, slot, word)? {
        return Ok(true);
      }
    }

    log::trace!("Exhausted every candidate for {slot}");
    Ok(false)
  }

  /// Places `word` in `slot` and searches onward. On failure, including a
  /// timeout, the assignment and the domain store are left exactly as they
  /// were.
  fn try_word(&mut self, assignment: &mut Assignment, slot: Slot, word: WordId) -> FillResult<bool> {
    log::trace!(
      "Trying {} in {slot} at depth {}",
      self.puzzle.words().get(word),
      assignment.len()
    );

    let checkpoint = self.domains.checkpoint();
    assignment.insert(slot, word);

    let found = if is_consistent(self.puzzle, assignment) {
      self.domains.assign(slot, word);
      match enforce(self.puzzle, &mut self.domains, Some(arcs_into(self.puzzle, slot))) {
        Ok(()) => self.backtrack(assignment),
        Err(_) => Ok(false),
      }
    } else {
      Ok(false)
    };

    if !matches!(found, Ok(true)) {
      assignment.remove(&slot);
      self.domains.rewind(checkpoint);
      self.stats.backtracks += 1;
    }
    found
  }
}

/// Fills `puzzle` with the default configuration.
pub fn solve(puzzle: &Puzzle) -> FillResult<Option<Solution>> {
  Solver::new(puzzle, SolverConfig::default()).solve()
}
