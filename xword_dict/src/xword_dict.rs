use std::{
  borrow::Borrow,
  collections::BTreeSet,
  fs::File,
  io::{BufRead, BufReader},
  path::Path,
};

use itertools::Itertools;
use util::error::{FillError, FillResult};

/// The vocabulary available to a fill: canonical (uppercase ASCII) words,
/// without duplicates, in lexicographic order. Restricting words to ASCII
/// letters keeps a word's length the same before and after uppercasing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XWordDict {
  words: BTreeSet<String>,
}

impl XWordDict {
  fn canonicalize_word(word: &str) -> String {
    word.to_ascii_uppercase()
  }

  fn parse_word_line(line: &str) -> FillResult<Option<String>> {
    let word = line.trim();
    if word.is_empty() {
      return Ok(None);
    }
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
      return Err(FillError::Parse(format!("\"{word}\" is not a word")).into());
    }

    Ok(Some(Self::canonicalize_word(word)))
  }

  /// Parses a newline-separated word list, one word per line. Blank lines are
  /// skipped.
  pub fn parse_word_list<S>(lines: impl IntoIterator<Item = S>) -> FillResult<Self>
  where
    S: Borrow<String>,
  {
    let words = lines.into_iter().enumerate().try_fold(
      BTreeSet::new(),
      |mut words, (line_number, line)| -> FillResult<_> {
        if let Some(word) = Self::parse_word_line(line.borrow()).map_err(|err| {
          FillError::Parse(format!("Failed to parse line {}: {err}", line_number + 1))
        })? {
          words.insert(word);
        }
        Ok(words)
      },
    )?;

    let dict = Self { words };
    log::debug!(
      "Loaded {} words, by length: {:?}",
      dict.len(),
      dict.length_histogram()
    );
    Ok(dict)
  }

  pub fn from_file(path: impl AsRef<Path>) -> FillResult<Self> {
    Self::parse_word_list(
      BufReader::new(File::open(path)?)
        .lines()
        .collect::<Result<Vec<_>, _>>()?,
    )
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  pub fn has(&self, word: &str) -> bool {
    self.words.contains(word)
  }

  pub fn words(&self) -> impl Iterator<Item = &str> {
    self.words.iter().map(|word| word.as_str())
  }

  pub fn into_words(self) -> impl Iterator<Item = String> {
    self.words.into_iter()
  }

  /// (word length, number of words) pairs, ordered by length.
  pub fn length_histogram(&self) -> Vec<(usize, usize)> {
    self
      .words
      .iter()
      .counts_by(|word| word.chars().count())
      .into_iter()
      .sorted()
      .collect()
  }
}
