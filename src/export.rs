use std::convert::TryFrom;
use std::path::Path;
use image::{GrayImage, ImageBuffer, Luma};
use tracing::debug;
use crate::board::*;
use crate::error::{Error, Result};

const ALIVE: Luma<u8> = Luma([0]);
const DEAD: Luma<u8> = Luma([0xff]);

/// Packs the grid into one bit per cell, each row padded to whole bytes.
///
/// The leftmost cell of a row is the highest bit of its first byte.
pub fn write_buffer(board: &Board) -> Vec<Vec<u8>> {
  let bw = (board.width() + 7) >> 3;
  board.rows()
    .iter()
    .map(|&row| {
      let mut bytes = vec![0u8; bw];
      for x in 0..board.width() {
        if row >> x & 1 != 0 {
          bytes[x >> 3] |= 0x80 >> (x & 7);
        }
      }
      bytes
    })
    .collect()
}

/// Renders live cells black on white, `cell_size` pixels per cell.
///
/// Fails when the image side would not fit in a `u32`.
pub fn to_image(board: &Board, cell_size: u32) -> Result<GrayImage> {
  let cell_size = cell_size.max(1);
  let w = pixels(board.width(), cell_size)?;
  let h = pixels(board.height(), cell_size)?;
  Ok(ImageBuffer::from_fn(w, h, |px, py| {
    let x = (px / cell_size) as usize;
    let y = (py / cell_size) as usize;
    if board.is_alive(x, y) { ALIVE } else { DEAD }
  }))
}

fn pixels(cells: usize, cell_size: u32) -> Result<u32> {
  u32::try_from(cells)
    .ok()
    .and_then(|cells| cells.checked_mul(cell_size))
    .ok_or_else(|| Error::InvalidSettings(
      format!("{} cells of {} pixels do not fit in an image", cells, cell_size)))
}

/// The image format follows the extension of `path`.
pub fn save_image(board: &Board, cell_size: u32, path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  let img = to_image(board, cell_size)?;
  debug!(path = %path.display(), width = img.width(), height = img.height(), "saving image");
  img.save(path)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rule::GAME_OF_LIFE;

  #[test]
  fn test_write_buffer() {
    let board = Board::from_rows(10, GAME_OF_LIFE, vec![
      0b10_0000_0001,
      0b01_1000_0000,
    ]).unwrap();
    assert_eq!(write_buffer(&board), vec![
      vec![0b1000_0000, 0b0100_0000],
      vec![0b0000_0001, 0b1000_0000],
    ]);
  }

  #[test]
  fn test_to_image() {
    let board = Board::from_rows(2, GAME_OF_LIFE, vec![0b01, 0b10]).unwrap();
    let img = to_image(&board, 3).unwrap();
    assert_eq!(img.dimensions(), (6, 6));
    assert_eq!(*img.get_pixel(0, 0), ALIVE);
    assert_eq!(*img.get_pixel(2, 2), ALIVE);
    assert_eq!(*img.get_pixel(3, 0), DEAD);
    assert_eq!(*img.get_pixel(5, 5), ALIVE);
    assert_eq!(*img.get_pixel(0, 5), DEAD);
  }

  #[test]
  fn test_image_too_large() {
    let board = Board::from_rows(2, GAME_OF_LIFE, vec![0b01]).unwrap();
    assert!(matches!(to_image(&board, u32::MAX), Err(Error::InvalidSettings(_))));
    assert!(matches!(
      save_image(&board, u32::MAX, std::env::temp_dir().join("lifeboard-too-large.png")),
      Err(Error::InvalidSettings(_))
    ));
  }

  #[test]
  fn test_save_image() {
    let board = Board::from_rows(3, GAME_OF_LIFE, vec![0b010, 0b010, 0b010]).unwrap();
    let path = std::env::temp_dir().join(format!("lifeboard-{}.png", std::process::id()));
    save_image(&board, 4, &path).unwrap();

    let loaded = image::open(&path).unwrap().to_luma8();
    assert_eq!(loaded, to_image(&board, 4).unwrap());
    std::fs::remove_file(&path).unwrap();
  }
}
