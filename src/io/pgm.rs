//! PGM image reading and writing.
//!
//! Decoding goes through the `image` crate's PNM support; encoding writes
//! `map_saver` style binary (`P5`) files directly.

use std::io::Write;
use std::path::Path;

use image::{ColorType, ImageBuffer, ImageFormat, Luma};

use super::MapLoadError;
use crate::grid::{CellState, OccupancyGrid};

/// Pixel value written for free cells.
pub const FREE_PIXEL: u8 = 254;
/// Pixel value written for occupied cells.
pub const OCCUPIED_PIXEL: u8 = 0;
/// Pixel value written for unknown cells.
pub const UNKNOWN_PIXEL: u8 = 205;

/// Decoded greymap with 16-bit samples. Row 0 is the top of the image.
///
/// 8-bit images are widened so that the full sample range maps to
/// `0..=u16::MAX`.
pub type Greymap = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Decode a PGM image (`P2` or `P5`, 8 or 16 bit).
pub fn decode_pgm(bytes: &[u8]) -> Result<Greymap, MapLoadError> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Pnm)?;
    match image.color() {
        ColorType::L8 | ColorType::L16 => Ok(image.into_luma16()),
        other => Err(MapLoadError::Pgm(format!("expected a greymap, got {:?}", other))),
    }
}

/// Read and decode a PGM file.
pub fn read_pgm(path: &Path) -> Result<Greymap, MapLoadError> {
    decode_pgm(&std::fs::read(path)?)
}

/// Encode a grid as a binary PGM in `map_saver` conventions.
pub fn encode_pgm(grid: &OccupancyGrid) -> Vec<u8> {
    let (width, height) = (grid.width(), grid.height());
    let mut out = format!("P5\n{} {}\n255\n", width, height).into_bytes();
    out.reserve(width * height);
    for y in (0..height).rev() {
        let row = &grid.cells()[y * width..(y + 1) * width];
        out.extend(row.iter().map(|state| match state {
            CellState::Free => FREE_PIXEL,
            CellState::Occupied => OCCUPIED_PIXEL,
            CellState::Unknown => UNKNOWN_PIXEL,
        }));
    }
    out
}

/// Write a grid as a binary PGM file.
pub fn write_pgm(grid: &OccupancyGrid, path: &Path) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(&encode_pgm(grid))?;
    Ok(())
}
