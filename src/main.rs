#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod args;

use std::{
  fs::File,
  io::Write,
  path::Path,
  process::ExitCode,
};

use args::Args;
use clap::Parser;
use util::{error::FillResult, grid::Grid, time::time_fn};
use xword_gen::{
  puzzle::Puzzle,
  render::{encode_grid, render_text},
  Solver,
};

fn save_grid(path: &Path, puzzle: &Puzzle, letters: &Grid<Option<char>>) -> FillResult {
  let bytes = if path.extension().is_some_and(|ext| ext == "bin") {
    encode_grid(letters)
  } else {
    render_text(puzzle, letters).into_bytes()
  };

  let mut file = File::create(path)?;
  file.write_all(&bytes)?;
  log::info!("Saved solution to {}", path.display());
  Ok(())
}

fn run(args: &Args) -> FillResult {
  let puzzle = Puzzle::from_files(&args.structure, &args.words)?;
  log::info!(
    "Loaded a {}x{} structure with {} slots and {} words",
    puzzle.width(),
    puzzle.height(),
    puzzle.slots().len(),
    puzzle.words().len()
  );
  if puzzle.words().is_empty() {
    log::warn!("The word list is empty");
  }

  let mut solver = Solver::new(&puzzle, args.solver_config());
  let (time, solution) = time_fn(|| solver.solve());
  let solution = solution?;
  log::info!("Took {}s", time.as_secs_f32());

  let Some(solution) = solution else {
    println!("No solution.");
    return Ok(());
  };

  let letters = solution.letter_grid(&puzzle)?;
  print!("{}", render_text(&puzzle, &letters));

  if let Some(output) = &args.output {
    save_grid(output, &puzzle, &letters)?;
  }
  Ok(())
}

fn main() -> ExitCode {
  let args = Args::parse();
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
    .init();

  if let Err(err) = run(&args) {
    println!("Error: {err}");
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}
