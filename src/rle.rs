use std::sync::OnceLock;
use itertools::Itertools;
use regex::Regex;
use tracing::debug;
use crate::board::*;
use crate::error::{Error, Result};
use crate::rule::*;

/// Read a Life pattern from a RLE string.
///
/// RLE format: <https://www.conwaylife.com/wiki/Run_Length_Encoded>.
///
/// The board gets the size given in the header line and the header's rule,
/// or the Game of Life when the header names none.
pub fn read(src: impl AsRef<str>) -> Result<Board> {
  static HEADER: OnceLock<Regex> = OnceLock::new();
  let header_re = HEADER.get_or_init(|| {
    Regex::new(
      r"^x\s*=\s*(\d+)\s*,\s*y\s*=\s*(\d+)\s*(?:,\s*rule\s*=\s*([^\s,]+))?\s*$"
    ).expect("header pattern is valid")
  });

  let mut lines = src.as_ref()
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'));

  let header = lines.next()
    .ok_or_else(|| invalid("missing header line"))?;
  let caps = header_re.captures(header)
    .ok_or_else(|| invalid(format!("invalid header line {:?}", header)))?;
  let width = parse_size(&caps[1])?;
  let height = parse_size(&caps[2])?;
  let rule = match caps.get(3) {
    Some(rule) => parse_rule(rule.as_str())?,
    None => GAME_OF_LIFE,
  };

  debug!(width, height, rule = %rule, "reading RLE pattern");
  let mut board = Board::empty(width, height, rule)?;

  let mut x = 0;
  let mut y = 0;
  let mut num: Option<usize> = None;
  for c in lines.flat_map(str::chars) {
    if let Some(d) = c.to_digit(10) {
      let n = num.unwrap_or(0)
        .checked_mul(10)
        .and_then(|n| n.checked_add(d as usize))
        .ok_or_else(|| invalid("run count overflows"))?;
      num = Some(n);
      continue;
    }
    if c.is_whitespace() {
      continue;
    }

    let run = num.take().unwrap_or(1);
    match c {
      'b' => {
        x = run_end(x, run)?;
      }
      'o' => {
        let end = run_end(x, run)?;
        if y >= height || end > width {
          return Err(invalid(format!(
            "live cells at row {} columns {}..{} outside {}x{} pattern",
            y, x, end, width, height)));
        }
        for i in x..end {
          board.set(i, y, true);
        }
        x = end;
      }
      '$' => {
        x = 0;
        y = run_end(y, run)?;
      }
      '!' => {
        return Ok(board);
      }
      _ => {
        return Err(invalid(format!("invalid character {:?}", c)));
      }
    }
  }

  Err(invalid("unexpected EOF"))
}

/// Write a Life pattern to a RLE string.
///
/// RLE format: <https://www.conwaylife.com/wiki/Run_Length_Encoded>.
pub fn write(board: &Board) -> String {
  let mut output = format!(
    "x = {}, y = {}, rule = {}\n", board.width(), board.height(), board.rule());

  let mut num_consec_next_rows = 0;
  for (y, &row) in board.rows().iter().enumerate() {
    if y > 0 {
      num_consec_next_rows += 1;
    }
    if row == 0 {
      continue;
    }

    if num_consec_next_rows > 0 {
      RleUnit::NextRow.write(num_consec_next_rows, &mut output);
      num_consec_next_rows = 0;
    }

    // a non-empty row always ends on a live run once trailing dead cells go
    let last_alive = (Row::BITS - 1 - row.leading_zeros()) as usize;
    let groups = (0..=last_alive).group_by(|&x| row >> x & 1 != 0);
    for (alive, run) in &groups {
      let unit = if alive { RleUnit::Alive } else { RleUnit::Dead };
      unit.write(run.count(), &mut output);
    }
  }

  output.push('!');
  output.push('\n');
  output
}

fn invalid(msg: impl Into<String>) -> Error {
  Error::InvalidRle(msg.into())
}

fn run_end(pos: usize, run: usize) -> Result<usize> {
  pos.checked_add(run).ok_or_else(|| invalid("run count overflows"))
}

fn parse_size(s: &str) -> Result<usize> {
  s.parse().map_err(|_| invalid(format!("pattern size {} is too large", s)))
}

/// Accepts a rulestring or one of the rule names.
fn parse_rule(s: &str) -> Result<Rule> {
  s.parse::<Rule>()
    .or_else(|_| s.parse::<RuleName>().map(RuleName::rule))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RleUnit {
  Dead,
  Alive,
  NextRow,
}

impl RleUnit {
  fn write(&self, num: usize, s: &mut String) {
    let c = match self {
      Self::Dead => 'b',
      Self::Alive => 'o',
      Self::NextRow => '$',
    };

    let buf = if num == 1 {
      c.to_string()
    } else {
      format!("{}{}", num, c)
    };

    let line_start = s.rfind('\n').map_or(0, |i| i + 1);
    if s.len() - line_start + buf.len() > 70 {
      s.push('\n');
    }

    s.push_str(&buf);
  }
}
