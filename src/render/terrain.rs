//! Terrain compositor.
//!
//! Flattens every visible terrain layer of a document into a single map of
//! palette indices. Layers are painted bottom to top; wherever a layer's alpha
//! is non-zero it replaces whatever was painted there before, and everything
//! never painted stays `space` (index 0).
//!
//! The colour of `water` is not fixed: the first opaque pixel of the first
//! `water` layer painted decides it. The game uses that colour to refill
//! destroyed underwater terrain, so it should match the artwork.

use crate::error::{LevelError, Result};
use crate::types::{Colour, Document, Layer, TerrainPalette, MAX_TERRAIN_TYPES, WATER_INDEX};

use super::clip::clip_layer;
use super::walk::walk_terrain;

/// Name of the layer whose pixels decide the water colour.
const WATER_LAYER: &str = "water";

/// A map-sized grid of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl IndexBuffer {
    /// Create a buffer filled with index 0.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Index at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[self.offset(x, y)]
    }

    fn set(&mut self, x: u32, y: u32, index: u8) {
        let offset = self.offset(x, y);
        self.data[offset] = index;
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }

    /// Row-major indices.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

/// Result of compositing a document's terrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainMap {
    pub buffer: IndexBuffer,
    pub palette: TerrainPalette,
}

/// Composite the terrain layers of `document`.
///
/// Deterministic: the same document always yields the same map.
#[tracing::instrument(skip_all, fields(width = document.width(), height = document.height()))]
pub fn composite(document: &Document) -> Result<TerrainMap> {
    TerrainCompositor::new(document).run()
}

/// State of a single compositing run.
struct TerrainCompositor<'a> {
    document: &'a Document,
    buffer: IndexBuffer,
    palette: TerrainPalette,
    /// Set once the water colour has been taken from a layer.
    water_sampled: bool,
}

impl<'a> TerrainCompositor<'a> {
    fn new(document: &'a Document) -> Self {
        Self {
            document,
            buffer: IndexBuffer::new(document.width(), document.height()),
            palette: TerrainPalette::new(),
            water_sampled: false,
        }
    }

    fn run(mut self) -> Result<TerrainMap> {
        let document = self.document;
        walk_terrain(document.root(), &mut |layer: &Layer| self.paint_layer(layer))?;

        tracing::debug!(terrain_types = self.palette.len(), "terrain composited");

        Ok(TerrainMap {
            buffer: self.buffer,
            palette: self.palette,
        })
    }

    fn paint_layer(&mut self, layer: &Layer) -> Result<()> {
        let index = self
            .palette
            .get_or_assign(&layer.name)
            .ok_or_else(|| LevelError::Build {
                message: format!(
                    "layer '{}' would be terrain type number {}, but at most {} fit in an indexed image",
                    layer.name,
                    self.palette.len() + 1,
                    MAX_TERRAIN_TYPES
                ),
                help: Some("Rename or merge some terrain layers".to_string()),
            })?;

        let Some(rect) = clip_layer(self.buffer.width(), self.buffer.height(), layer) else {
            tracing::debug!(layer = %layer.name, x = layer.x, y = layer.y, "layer outside map");
            return Ok(());
        };

        let mut first_opaque: Option<Colour> = None;
        for (map_x, map_y, src_x, src_y) in rect.positions() {
            let px = Colour::from(*layer.pixels.get_pixel(src_x, src_y));
            if px.is_transparent() {
                continue;
            }
            self.buffer.set(map_x, map_y, index);
            first_opaque.get_or_insert(px);
        }

        if layer.name == WATER_LAYER && !self.water_sampled {
            if let Some(colour) = first_opaque {
                let colour = colour.opaque();
                self.palette.set_colour(WATER_INDEX, colour);
                self.water_sampled = true;
                tracing::info!(index = WATER_INDEX, %colour, "water colour sampled");
            }
        }

        Ok(())
    }
}
