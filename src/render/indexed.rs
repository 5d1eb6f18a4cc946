//! Indexed-colour output for terrain maps.
//!
//! The game reads terrain as an 8-bit palette PNG: pixel values are terrain
//! indices and the PLTE chunk carries one colour per terrain type.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{LevelError, Result};
use crate::types::Colour;

use super::terrain::TerrainMap;

/// An image with one palette index per pixel and its colour table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    colours: Vec<Colour>,
}

impl IndexedImage {
    /// Build the final raster from a composited terrain map.
    pub fn emit(map: &TerrainMap) -> Self {
        Self {
            width: map.buffer.width(),
            height: map.buffer.height(),
            pixels: map.buffer.as_raw().to_vec(),
            colours: map.palette.colours().to_vec(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index at `(x, y)`.
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Colour table, ordered by index.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Write as an 8-bit indexed PNG.
    pub fn write_png(&self, path: &Path) -> Result<()> {
        let io_err = |message: String| LevelError::Io {
            path: path.to_path_buf(),
            message,
        };

        let file = File::create(path).map_err(|e| io_err(format!("Failed to create file: {}", e)))?;

        let mut encoder = png::Encoder::new(BufWriter::new(file), self.width, self.height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(self.colours.iter().flat_map(|c| c.to_rgb()).collect::<Vec<u8>>());

        let mut writer = encoder
            .write_header()
            .map_err(|e| io_err(format!("Failed to write PNG header: {}", e)))?;
        writer
            .write_image_data(&self.pixels)
            .map_err(|e| io_err(format!("Failed to write PNG: {}", e)))?;
        writer
            .finish()
            .map_err(|e| io_err(format!("Failed to write PNG: {}", e)))?;

        Ok(())
    }
}
