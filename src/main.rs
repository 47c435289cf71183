use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use lifeboard::*;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "lifeboard", version, about = "Run a Life-like automaton on a bounded grid")]
struct Cli {
  #[arg(long, default_value_t = 32)]
  width: usize,

  #[arg(long, default_value_t = 32)]
  height: usize,

  /// Cells seeded alive, capped at width * height.
  #[arg(long, default_value_t = 128)]
  population: usize,

  /// Rule name (e.g. HighLife, day-and-night).
  #[arg(long, default_value_t = RuleName::Classic)]
  rule: RuleName,

  /// Seed for the initial population; random when absent.
  #[arg(long)]
  seed: Option<u64>,

  /// Load the starting grid from an RLE file instead of seeding randomly.
  #[arg(long)]
  pattern: Option<PathBuf>,

  #[arg(long, short = 'n', default_value_t = 100)]
  generations: usize,

  /// Report the oscillation period, searching up to this many generations.
  #[arg(long)]
  period: Option<usize>,

  /// Print the final generation as RLE instead of text.
  #[arg(long)]
  rle: bool,

  /// Save the final generation as an image.
  #[arg(long)]
  image: Option<PathBuf>,

  #[arg(long, default_value_t = 8)]
  cell_size: u32,
}

fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  let mut board = match &cli.pattern {
    Some(path) => {
      let src = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
      rle::read(src).with_context(|| format!("parsing {}", path.display()))?
    }
    None => {
      let settings = Settings::new(cli.width, cli.height, cli.population, cli.rule);
      match cli.seed {
        Some(seed) => Board::with_seed(settings, seed)?,
        None => Board::new(settings)?,
      }
    }
  };
  info!(
    width = board.width(),
    height = board.height(),
    rule = %board.rule(),
    living = board.living_cell_count(),
    "board ready",
  );

  board.advance_by(cli.generations);

  if let Some(max_gen) = cli.period {
    let mut scratch = board.clone();
    match scratch.find_period(max_gen) {
      Some(period) => println!("period: {}", period),
      None => println!("period: none within {} generations", max_gen),
    }
  }

  if cli.rle {
    print!("{}", rle::write(&board));
  } else {
    print!("{}", board);
  }
  println!("generation {}: {} living cells", board.generation(), board.living_cell_count());

  if let Some(path) = &cli.image {
    export::save_image(&board, cli.cell_size, path)
      .with_context(|| format!("saving {}", path.display()))?;
    info!(path = %path.display(), "saved image");
  }

  Ok(())
}

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .try_init();
}
