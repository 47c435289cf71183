use std::fmt::{self, Display};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};
use crate::error::{Error, Result};
use crate::rule::{Rule, RuleName};
use crate::settings::Settings;

/// One row of the grid. Bit `x` is the cell in column `x`.
pub type Row = u64;

/// Widest grid a row word can hold.
pub const ROW_CAPACITY: usize = Row::BITS as usize;

/// Bounded grid of cells advanced one generation at a time.
///
/// Cells outside `[0, width) x [0, height)` are permanently dead; the grid
/// does not wrap around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
  width: usize,
  height: usize,
  rows: Vec<Row>,
  rule: Rule,
  generation: u64,
}

impl Board {
  /// Builds a board and seeds it from the thread-local random generator.
  pub fn new(settings: Settings) -> Result<Self> {
    Self::with_rng(settings, &mut rand::thread_rng())
  }

  pub fn with_seed(settings: Settings, seed: u64) -> Result<Self> {
    Self::with_rng(settings, &mut StdRng::seed_from_u64(seed))
  }

  /// Builds a board and brings `min(initial_population, width * height)`
  /// distinct cells to life, chosen uniformly from `rng`.
  pub fn with_rng<R: Rng + ?Sized>(settings: Settings, rng: &mut R) -> Result<Self> {
    let mut board = Self::empty(settings.width, settings.height, settings.rule.rule())?;

    let cells = settings.cell_count();
    let population = settings.initial_population.min(cells);
    for i in index::sample(rng, cells, population).into_iter() {
      board.set(i % board.width, i / board.width, true);
    }

    debug!(
      width = board.width,
      height = board.height,
      population,
      rule = %settings.rule,
      "seeded board",
    );
    Ok(board)
  }

  /// All-dead board.
  pub fn empty(width: usize, height: usize, rule: Rule) -> Result<Self> {
    check_dimensions(width, height)?;
    Ok(Self {
      width,
      height,
      rows: vec![0; height],
      rule,
      generation: 0,
    })
  }

  /// Board holding exactly `rows`, top row first.
  pub fn from_rows(width: usize, rule: Rule, rows: Vec<Row>) -> Result<Self> {
    check_dimensions(width, rows.len())?;
    let outside = !row_mask(width);
    if let Some(y) = rows.iter().position(|row| row & outside != 0) {
      return Err(Error::InvalidSettings(
        format!("row {} has live cells beyond width {}", y, width)));
    }

    Ok(Self {
      width,
      height: rows.len(),
      rows,
      rule,
      generation: 0,
    })
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn rule(&self) -> Rule {
    self.rule
  }

  /// `None` when the board runs a custom rulestring that matches none of
  /// the named automata.
  pub fn rule_name(&self) -> Option<RuleName> {
    RuleName::from_rule(self.rule)
  }

  /// Takes effect from the next generation on.
  pub fn set_rule(&mut self, rule: impl Into<Rule>) {
    self.rule = rule.into();
  }

  /// Generations advanced since construction.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn rows(&self) -> &[Row] {
    &self.rows
  }

  pub fn is_alive(&self, x: usize, y: usize) -> bool {
    x < self.width && y < self.height && self.rows[y] >> x & 1 != 0
  }

  pub fn set(&mut self, x: usize, y: usize, alive: bool) {
    assert!(x < self.width && y < self.height,
      "cell ({}, {}) outside {}x{} board", x, y, self.width, self.height);
    let mask = 1 << x;
    if alive {
      self.rows[y] |= mask;
    } else {
      self.rows[y] &= !mask;
    }
  }

  pub fn living_cell_count(&self) -> usize {
    self.rows.iter().map(|row| row.count_ones() as usize).sum()
  }

  /// Advances one generation.
  pub fn advance(&mut self) {
    self.rows = self.next_rows();
    self.generation += 1;
    trace!(generation = self.generation, "advanced");
  }

  pub fn advance_by(&mut self, num_gen: usize) {
    for _ in 0..num_gen {
      self.advance();
    }
  }

  #[cfg(not(feature = "parallel"))]
  fn next_rows(&self) -> Vec<Row> {
    (0..self.height).map(|y| self.next_row(y)).collect()
  }

  #[cfg(feature = "parallel")]
  fn next_rows(&self) -> Vec<Row> {
    use rayon::prelude::*;

    (0..self.height).into_par_iter().map(|y| self.next_row(y)).collect()
  }

  /// Reads only the current rows, so rows can be computed in any order.
  fn next_row(&self, y: usize) -> Row {
    let mut row = 0;
    for x in 0..self.width {
      let alive = self.rows[y] >> x & 1 != 0;
      if self.rule.apply(alive, self.count_neighbors(x, y)) {
        row |= 1 << x;
      }
    }
    row
  }

  /// Live cells in the Moore neighborhood of `(x, y)`, excluding the cell
  /// itself.
  pub(crate) fn count_neighbors(&self, x: usize, y: usize) -> u8 {
    let left = x.saturating_sub(1);
    let right = (x + 1).min(self.width - 1);
    let window = row_mask(right + 1) & !row_mask(left);

    let top = y.saturating_sub(1);
    let bottom = (y + 1).min(self.height - 1);
    let total: u32 = self.rows[top..=bottom]
      .iter()
      .map(|row| (row & window).count_ones())
      .sum();

    (total - (self.rows[y] >> x & 1) as u32) as u8
  }
}

/// Rows as text, `o` for live cells and `.` for dead ones.
impl Display for Board {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let text = self.rows.iter()
      .map(|row| {
        (0..self.width)
          .map(|x| if row >> x & 1 != 0 { 'o' } else { '.' })
          .collect::<String>()
      })
      .join("\n");
    writeln!(f, "{}", text)
  }
}

/// Mask of the lowest `width` bits.
pub(crate) fn row_mask(width: usize) -> Row {
  if width >= ROW_CAPACITY {
    Row::MAX
  } else {
    (1 << width) - 1
  }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
  if width == 0 || height == 0 {
    return Err(Error::InvalidSettings(
      format!("{}x{} board has no cells", width, height)));
  }
  if width > ROW_CAPACITY {
    return Err(Error::CapacityExceeded { width, capacity: ROW_CAPACITY });
  }
  Ok(())
}
