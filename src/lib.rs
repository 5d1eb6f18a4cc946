//! ora2level - Level asset converter
//!
//! A library for turning layered level artwork into the assets a 2-D cave
//! flying game loads: an indexed terrain map, the level artwork, a parallax
//! background and a thumbnail.

pub mod cli;
pub mod error;
pub mod level;
pub mod output;
pub mod render;
pub mod types;

pub use error::{LevelError, Result};
pub use level::{convert_document, convert_level, ConvertReport, LevelFiles, LevelManifest};
pub use render::{composite, IndexBuffer, IndexedImage, TerrainMap};
pub use types::{Colour, Document, Group, Layer, Node, TerrainPalette};
