use std::collections::HashMap;

/// Index of a word in a [`WordBank`]. Ids follow the lexicographic order of
/// the words they name.
pub type WordId = u32;

#[derive(Clone, Debug, Default)]
pub struct WordBank {
  bank: Vec<String>,
  letters: Vec<Vec<char>>,
  ids: HashMap<String, WordId>,
}

impl WordBank {
  pub fn from_words(words: impl IntoIterator<Item = String>) -> Self {
    let mut bank: Vec<_> = words.into_iter().collect();
    bank.sort();
    bank.dedup();

    let letters = bank.iter().map(|word| word.chars().collect()).collect();
    let ids = bank
      .iter()
      .enumerate()
      .map(|(id, word)| (word.clone(), id as WordId))
      .collect();
    Self { bank, letters, ids }
  }

  pub fn len(&self) -> usize {
    self.bank.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bank.is_empty()
  }

  pub fn id(&self, word: &str) -> Option<WordId> {
    self.ids.get(word).copied()
  }

  /// Panics if `id` was not handed out by this bank.
  pub fn get(&self, id: WordId) -> &str {
    &self.bank[id as usize]
  }

  pub fn letters(&self, id: WordId) -> &[char] {
    &self.letters[id as usize]
  }

  pub fn letter(&self, id: WordId, idx: usize) -> char {
    self.letters(id)[idx]
  }

  /// Length in letters, not bytes.
  pub fn word_len(&self, id: WordId) -> u32 {
    self.letters(id).len() as u32
  }

  pub fn all_word_ids(&self) -> impl Iterator<Item = WordId> {
    0..self.bank.len() as WordId
  }

  pub fn all_words_with_id(&self) -> impl Iterator<Item = (WordId, &str)> {
    self
      .bank
      .iter()
      .enumerate()
      .map(|(id, word)| (id as WordId, word.as_str()))
  }
}

#[cfg(test)]
mod tests {
  use googletest::prelude::*;

  use super::WordBank;

  #[gtest]
  fn test_ids_follow_word_order() {
    let bank = WordBank::from_words(["DOG", "CAT", "DOG", "ACE"].map(|word| word.to_owned()));
    expect_eq!(bank.len(), 3);
    expect_false!(bank.is_empty());
    expect_true!(WordBank::from_words(Vec::new()).is_empty());
    expect_that!(
      bank.all_words_with_id().collect::<Vec<_>>(),
      container_eq([(0, "ACE"), (1, "CAT"), (2, "DOG")])
    );
    expect_that!(bank.id("CAT"), some(eq(1)));
    expect_that!(bank.id("COW"), none());
  }

  #[gtest]
  fn test_letters() {
    let bank = WordBank::from_words(["ÉCLAT".to_owned()]);
    expect_eq!(bank.word_len(0), 5);
    expect_eq!(bank.letter(0, 0), 'É');
    expect_eq!(bank.letter(0, 4), 'T');
  }
}
