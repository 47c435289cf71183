use std::fs;
use lifeboard::*;
use pretty_assertions::assert_eq;

#[test]
fn glider_moves_diagonally() {
  let glider_0 = "x = 8, y = 8, rule = B3/S23\nbo$2bo$3o!\n";
  let glider_1 = "x = 8, y = 8, rule = B3/S23\n$obo$b2o$bo!\n";
  let glider_4 = "x = 8, y = 8, rule = B3/S23\n$2bo$3bo$b3o!\n";
  let mut board = rle::read(glider_0).unwrap();

  board.advance();

  assert_eq!(glider_1, &rle::write(&board));

  board.advance_by(3);

  assert_eq!(glider_4, &rle::write(&board));
  assert_eq!(board.living_cell_count(), 5);
}

#[test]
fn pulsar_period() {
  let src = fs::read_to_string("tests/fixtures/pulsar.rle").unwrap();
  let mut board = rle::read(&src).unwrap();
  let start = board.clone();

  let counts: Vec<usize> = (0..3)
    .map(|_| {
      board.advance();
      board.living_cell_count()
    })
    .collect();

  assert_eq!(counts, vec![56, 72, 48]);
  assert_eq!(board.rows(), start.rows());
  assert_eq!(board.find_period(10), Some(3));
}

#[test]
fn pulsar_written_back() {
  let src = fs::read_to_string("tests/fixtures/pulsar.rle").unwrap();
  let board = rle::read(&src).unwrap();

  let body: String = src.lines()
    .filter(|line| !line.starts_with('#'))
    .map(|line| format!("{}\n", line))
    .collect();

  assert_eq!(body, rle::write(&board));
}
