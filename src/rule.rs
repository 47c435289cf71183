use std::fmt::{self, Display};
use std::str::FromStr;
use crate::error::{Error, Result};

/// Birth/survival rule of a Life-like automaton.
///
/// Bit `n` of a mask is set when `n` live neighbors satisfy the condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rule {
  birth: NeighborMask,
  survival: NeighborMask,
}

pub type NeighborMask = u16;

const ODD: NeighborMask = 0b0_1010_1010;
const ANY: NeighborMask = 0b1_1111_1111;

pub const GAME_OF_LIFE: Rule = Rule {
  birth: 0b000001000,
  survival: 0b000001100,
};

impl Rule {
  pub const fn from_masks(birth: NeighborMask, survival: NeighborMask) -> Self {
    Self {
      birth: birth & ANY,
      survival: survival & ANY,
    }
  }

  /// Next state of a cell with `live_neighbors` live cells around it.
  #[inline]
  pub fn apply(&self, is_alive: bool, live_neighbors: u8) -> bool {
    if live_neighbors > 8 {
      return false;
    }
    let mask = if is_alive { self.survival } else { self.birth };
    mask >> live_neighbors & 1 != 0
  }

  pub fn birth(&self) -> NeighborMask {
    self.birth
  }

  pub fn survival(&self) -> NeighborMask {
    self.survival
  }

  pub(crate) fn set_birth(&mut self, num: u8) {
    assert!(num < 9);
    self.birth |= 1 << num;
  }

  pub(crate) fn set_survival(&mut self, num: u8) {
    assert!(num < 9);
    self.survival |= 1 << num;
  }
}

impl Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "B")?;
    let mut b = self.birth;
    while b != 0 {
      write!(f, "{}", b.trailing_zeros())?;
      b &= b - 1;
    }
    write!(f, "/S")?;
    let mut s = self.survival;
    while s != 0 {
      write!(f, "{}", s.trailing_zeros())?;
      s &= s - 1;
    }
    Ok(())
  }
}

/// Parses `B3/S23` notation. The two halves may come in either order.
impl FromStr for Rule {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidRule(s.to_owned());

    let mut rule = Rule::default();
    let mut seen_birth = false;
    let mut seen_survival = false;
    let mut parts = 0;
    for part in s.trim().split('/') {
      parts += 1;
      let mut chars = part.chars();
      let is_birth = match chars.next() {
        Some('b') | Some('B') if !seen_birth => {
          seen_birth = true;
          true
        }
        Some('s') | Some('S') if !seen_survival => {
          seen_survival = true;
          false
        }
        _ => return Err(invalid()),
      };
      for c in chars {
        let num = match c.to_digit(10) {
          Some(d) if d < 9 => d as u8,
          _ => return Err(invalid()),
        };
        if is_birth {
          rule.set_birth(num);
        } else {
          rule.set_survival(num);
        }
      }
    }

    if parts != 2 {
      return Err(invalid());
    }
    Ok(rule)
  }
}

/// The named automata a board can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleName {
  Classic,
  HighLife,
  DayAndNight,
  Morley,
  TwoByTwo,
  Diamoeba,
  LifeWithoutDeath,
  Replicator,
  Seeds,
}

const RULES: [Rule; 9] = [
  GAME_OF_LIFE,
  Rule::from_masks(0b0_0100_1000, 0b0_0000_1100),
  Rule::from_masks(0b1_1100_1000, 0b1_1100_1000),
  Rule::from_masks(0b0_0100_1000, 0b0_0011_0100),
  Rule::from_masks(0b0_0100_1000, 0b0_0010_0110),
  Rule::from_masks(0b0_1110_1000, 0b1_1110_0000),
  Rule::from_masks(0b0_0000_1000, ANY),
  Rule::from_masks(ODD, ODD),
  Rule::from_masks(0b0_0000_0100, 0),
];

impl RuleName {
  pub const ALL: [RuleName; 9] = [
    RuleName::Classic,
    RuleName::HighLife,
    RuleName::DayAndNight,
    RuleName::Morley,
    RuleName::TwoByTwo,
    RuleName::Diamoeba,
    RuleName::LifeWithoutDeath,
    RuleName::Replicator,
    RuleName::Seeds,
  ];

  pub fn rule(self) -> Rule {
    RULES[self as usize]
  }

  /// Name of `rule` if it is one of the named automata.
  pub fn from_rule(rule: Rule) -> Option<RuleName> {
    Self::ALL.iter().copied().find(|name| name.rule() == rule)
  }

  fn as_str(self) -> &'static str {
    match self {
      RuleName::Classic => "Classic",
      RuleName::HighLife => "HighLife",
      RuleName::DayAndNight => "DayAndNight",
      RuleName::Morley => "Morley",
      RuleName::TwoByTwo => "TwoByTwo",
      RuleName::Diamoeba => "Diamoeba",
      RuleName::LifeWithoutDeath => "LifeWithoutDeath",
      RuleName::Replicator => "Replicator",
      RuleName::Seeds => "Seeds",
    }
  }
}

impl Default for RuleName {
  fn default() -> Self {
    RuleName::Classic
  }
}

impl From<RuleName> for Rule {
  fn from(name: RuleName) -> Self {
    name.rule()
  }
}

impl Display for RuleName {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Case-insensitive; `-`, `_` and spaces are ignored, so `day-and-night`
/// names `DayAndNight`.
impl FromStr for RuleName {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let key: String = s.chars()
      .filter(|&c| !matches!(c, '-' | '_' | ' '))
      .flat_map(char::to_lowercase)
      .collect();
    let key = if key == "conway" { "classic".to_owned() } else { key };

    Self::ALL.iter()
      .copied()
      .find(|name| name.as_str().to_lowercase() == key)
      .ok_or_else(|| Error::InvalidRule(s.to_owned()))
  }
}
