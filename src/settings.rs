use crate::error::{Error, Result};
use crate::rule::RuleName;

/// Parameters a board is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
  pub width: usize,
  pub height: usize,
  /// Cells seeded alive at construction, capped at `width * height`.
  pub initial_population: usize,
  pub rule: RuleName,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      width: 32,
      height: 32,
      initial_population: 128,
      rule: RuleName::Classic,
    }
  }
}

impl Settings {
  pub fn new(width: usize, height: usize, initial_population: usize, rule: RuleName) -> Self {
    Self { width, height, initial_population, rule }
  }

  /// Builds settings from the raw text of a settings form.
  ///
  /// Width and height must be positive integers, the population a
  /// non-negative integer. Surrounding whitespace is ignored.
  pub fn parse(
    width: &str,
    height: &str,
    initial_population: &str,
  ) -> Result<Self> {
    let width = parse_field("width", width)?;
    let height = parse_field("height", height)?;
    let initial_population = parse_field("initial population", initial_population)?;
    if width == 0 {
      return Err(Error::InvalidSettings("width must be positive".to_owned()));
    }
    if height == 0 {
      return Err(Error::InvalidSettings("height must be positive".to_owned()));
    }

    Ok(Self {
      width,
      height,
      initial_population,
      ..Self::default()
    })
  }

  pub fn with_rule(self, rule: RuleName) -> Self {
    Self { rule, ..self }
  }

  pub fn cell_count(&self) -> usize {
    self.width * self.height
  }
}

fn parse_field(name: &str, value: &str) -> Result<usize> {
  value.trim().parse().map_err(|_| {
    Error::InvalidSettings(format!("{} is not a non-negative integer: {:?}", name, value))
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default() {
    let settings = Settings::default();
    assert_eq!(settings, Settings::new(32, 32, 128, RuleName::Classic));
    assert_eq!(settings.cell_count(), 1024);
  }

  #[test]
  fn test_parse() {
    let settings = Settings::parse(" 40", "20 ", "100").unwrap();
    assert_eq!(settings, Settings::new(40, 20, 100, RuleName::Classic));

    let settings = Settings::parse("5", "5", "0").unwrap()
      .with_rule(RuleName::Seeds);
    assert_eq!(settings.initial_population, 0);
    assert_eq!(settings.rule, RuleName::Seeds);
  }

  #[test]
  fn test_parse_rejects() {
    for (w, h, p) in &[
      ("", "5", "5"),
      ("abc", "5", "5"),
      ("5", "-1", "5"),
      ("5", "5", "1.5"),
      ("0", "5", "5"),
      ("5", "0", "5"),
    ] {
      assert!(matches!(Settings::parse(w, h, p), Err(Error::InvalidSettings(_))),
        "{:?}", (w, h, p));
    }
  }
}
