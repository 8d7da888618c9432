use std::collections::BTreeMap;

pub mod arc_consistency;
pub mod consistency;
pub mod domains;
pub mod heuristics;
pub mod puzzle;
pub mod render;
pub mod search;
pub mod solution;
pub mod word_bank;

pub use search::{solve, Solver, SolverConfig};

/// Words chosen so far, by slot. Partial during search.
pub type Assignment = BTreeMap<puzzle::Slot, word_bank::WordId>;
