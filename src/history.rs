use indexmap::IndexSet;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use tracing::debug;
use crate::board::*;

/// Grids seen so far, in generation order.
#[derive(Debug, Default)]
pub struct History {
  set: IndexSet<Vec<Row>, BuildHasherDefault<FxHasher>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
  /// Index of the earlier occurrence in the history.
  pub first_seen: usize,
  /// Generations between the two occurrences.
  pub period: usize,
}

impl History {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records `rows` as the next entry, or reports the earlier identical entry.
  pub fn record(&mut self, rows: &[Row]) -> Option<Repeat> {
    if let Some((first_seen, _)) = self.set.get_full(rows) {
      return Some(Repeat {
        first_seen,
        period: self.set.len() - first_seen,
      });
    }

    self.set.insert(rows.to_vec());
    None
  }

  pub fn len(&self) -> usize {
    self.set.len()
  }

  pub fn is_empty(&self) -> bool {
    self.set.is_empty()
  }
}

impl Board {
  /// Advances until the grid repeats an earlier generation and returns the
  /// period, or `None` if no repeat shows up within `max_gen` generations.
  ///
  /// A still life has period 1.
  pub fn find_period(&mut self, max_gen: usize) -> Option<usize> {
    let mut history = History::new();
    history.record(self.rows());

    for _ in 0..max_gen {
      self.advance();
      if let Some(repeat) = history.record(self.rows()) {
        debug!(
          generation = self.generation(),
          period = repeat.period,
          "grid repeated",
        );
        return Some(repeat.period);
      }
    }
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rule::*;

  #[test]
  fn test_record() {
    let mut history = History::new();
    assert!(history.is_empty());
    assert_eq!(history.record(&[0b01, 0b10]), None);
    assert_eq!(history.record(&[0b11, 0b00]), None);
    assert_eq!(history.record(&[0b00, 0b11]), None);
    assert_eq!(history.record(&[0b11, 0b00]), Some(Repeat { first_seen: 1, period: 2 }));
    assert_eq!(history.len(), 3);
  }

  #[test]
  fn test_block_period() {
    let mut board = Board::from_rows(4, GAME_OF_LIFE, vec![0, 0b0110, 0b0110, 0]).unwrap();
    assert_eq!(board.find_period(10), Some(1));
    assert_eq!(board.generation(), 1);
  }

  #[test]
  fn test_blinker_period() {
    let mut board = Board::from_rows(5, GAME_OF_LIFE, vec![0, 0, 0b01110, 0, 0]).unwrap();
    assert_eq!(board.find_period(10), Some(2));
  }

  #[test]
  fn test_no_period_in_time() {
    // glider on a large board keeps moving for longer than the limit
    let mut board = Board::from_rows(32, GAME_OF_LIFE, {
      let mut rows = vec![0; 32];
      rows[0] = 0b010;
      rows[1] = 0b100;
      rows[2] = 0b111;
      rows
    }).unwrap();
    assert_eq!(board.find_period(20), None);
    assert_eq!(board.generation(), 20);
  }

  #[test]
  fn test_dies_out() {
    let mut board = Board::from_rows(3, RuleName::Seeds.rule(), vec![0b010, 0, 0]).unwrap();
    assert_eq!(board.find_period(5), Some(1));
    assert_eq!(board.living_cell_count(), 0);
  }
}
