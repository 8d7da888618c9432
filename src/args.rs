use std::{path::PathBuf, time::Duration};

use clap::Parser;
use xword_gen::SolverConfig;

fn parse_timeout(seconds: &str) -> Result<Duration, String> {
  let seconds: f64 = seconds.parse().map_err(|err| format!("{err}"))?;
  Duration::try_from_secs_f64(seconds).map_err(|err| format!("{err}"))
}

/// Fills a crossword structure with words from a word list.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
  /// Structure file: `_` marks a fillable cell, `#` a blocked one.
  pub structure: PathBuf,

  /// Word list, one word per line.
  pub words: PathBuf,

  /// Where to save the filled grid. A `.bin` file gets the encoded letter
  /// grid, anything else the text rendering.
  pub output: Option<PathBuf>,

  /// Give up after this many seconds.
  #[arg(long, value_name = "SECONDS", value_parser = parse_timeout)]
  pub timeout: Option<Duration>,

  /// Try words in word order instead of least constraining first.
  #[arg(long)]
  pub no_lcv: bool,

  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,
}

impl Args {
  pub fn log_level(&self) -> &'static str {
    match self.verbose {
      0 => "warn",
      1 => "info",
      2 => "debug",
      _ => "trace",
    }
  }

  pub fn solver_config(&self) -> SolverConfig {
    SolverConfig {
      timeout: self.timeout,
      least_constraining_values: !self.no_lcv,
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use std::{path::PathBuf, time::Duration};

  use clap::Parser;
  use googletest::prelude::*;

  use super::Args;

  #[gtest]
  fn test_positional_arguments() {
    let args = Args::try_parse_from(["generate", "structure.txt", "words.txt"]).unwrap();
    expect_eq!(args.structure, PathBuf::from("structure.txt"));
    expect_eq!(args.words, PathBuf::from("words.txt"));
    expect_that!(args.output, none());
    expect_eq!(args.log_level(), "warn");

    let config = args.solver_config();
    expect_that!(config.timeout, none());
    expect_true!(config.least_constraining_values);
  }

  #[gtest]
  fn test_options() {
    let args = Args::try_parse_from([
      "generate",
      "structure.txt",
      "words.txt",
      "out.bin",
      "--timeout",
      "1.5",
      "--no-lcv",
      "-vv",
    ])
    .unwrap();
    expect_that!(args.output, some(eq(&PathBuf::from("out.bin"))));
    expect_eq!(args.log_level(), "debug");

    let config = args.solver_config();
    expect_that!(config.timeout, some(eq(Duration::from_millis(1500))));
    expect_false!(config.least_constraining_values);
  }

  #[gtest]
  fn test_rejects_bad_timeouts() {
    for timeout in ["--timeout=-1", "--timeout=NaN", "--timeout=1e300", "--timeout=soon"] {
      expect_that!(
        Args::try_parse_from(["generate", "structure.txt", "words.txt", timeout]),
        err(anything())
      );
    }
  }

  #[gtest]
  fn test_wrong_argument_count() {
    expect_that!(Args::try_parse_from(["generate", "structure.txt"]), err(anything()));
    expect_that!(
      Args::try_parse_from(["generate", "a", "b", "c", "d"]),
      err(anything())
    );
  }
}
