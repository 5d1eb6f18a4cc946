//! Core domain types for ora2level.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Document` - The layered image being converted (groups and layers)
//! - `TerrainPalette` - Terrain-type names mapped to indices and colours
//! - `Colour` - RGBA colour values

mod colour;
mod document;
mod palette;
mod terrain;

pub use colour::Colour;
pub use document::{Document, Group, Layer, Node};
pub use palette::{
    TerrainPalette, DEFAULT_COLOURS, MAX_TERRAIN_TYPES, SEED_TERRAIN_TYPES, WATER_INDEX,
};
pub use terrain::{is_terrain_type, TERRAIN_TYPE_PATTERN};
