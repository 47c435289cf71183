//! Bounded two-dimensional Life-like cellular automata.
//!
//! A [`Board`] holds one row word per grid row and advances one generation
//! per [`Board::advance`] call under one of the named [`RuleName`] rules or
//! any birth/survival [`Rule`].

pub mod board;
pub mod error;
pub mod export;
pub mod history;
pub mod rle;
pub mod rule;
pub mod settings;

pub use board::{Board, Row, ROW_CAPACITY};
pub use error::{Error, Result};
pub use rule::{Rule, RuleName};
pub use settings::Settings;
