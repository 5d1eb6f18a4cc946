//! Rendering module for ora2level.
//!
//! This module turns a layered document into level assets: the indexed
//! terrain map, the flattened artwork, the parallax background and the
//! thumbnail.

mod background;
mod clip;
mod flatten;
mod indexed;
mod terrain;
mod walk;

pub use background::{
    extract_background, make_thumbnail, Background, BackgroundFormat, THUMBNAIL_SIZE,
};
pub use clip::{clip, clip_layer, ClipRect};
pub use flatten::{flatten, over, render_artwork, Selection};
pub use indexed::IndexedImage;
pub use terrain::{composite, IndexBuffer, TerrainMap};
pub use walk::walk_terrain;
