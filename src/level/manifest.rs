//! Level manifest (`<level>.toml`) handling.
//!
//! The manifest is the game's description of a level. The converter only
//! adds the names of the files it produced and the terrain palette; every
//! other key is passed through untouched, in its original order.

use std::path::Path;

use crate::error::{LevelError, Result};
use crate::types::TerrainPalette;

pub const ARTWORK_KEY: &str = "artwork";
pub const TERRAIN_KEY: &str = "terrain";
pub const THUMBNAIL_KEY: &str = "thumbnail";
pub const BACKGROUND_KEY: &str = "background";
pub const TERRAIN_PALETTE_KEY: &str = "terrain-palette";

/// A level manifest loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelManifest {
    table: toml::Table,
}

impl LevelManifest {
    /// Load a manifest from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LevelError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read level manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a manifest from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let table = content.parse::<toml::Table>().map_err(|e| LevelError::Parse {
            message: format!("Invalid level manifest: {}", e),
            help: Some("Check the level TOML syntax".to_string()),
        })?;
        Ok(Self { table })
    }

    /// Get a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.table.get(key).and_then(|v| v.as_str())
    }

    /// Set a string value, replacing any existing one.
    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.table
            .insert(key.to_string(), toml::Value::String(value.into()));
    }

    /// Record the terrain palette as `name = index` pairs in index order.
    pub fn set_terrain_palette(&mut self, palette: &TerrainPalette) {
        let entries: toml::Table = palette
            .iter()
            .map(|(index, name)| (name.to_string(), toml::Value::Integer(i64::from(index))))
            .collect();
        self.table
            .insert(TERRAIN_PALETTE_KEY.to_string(), toml::Value::Table(entries));
    }

    /// The recorded terrain palette, if any, in file order.
    pub fn terrain_palette(&self) -> Option<Vec<(String, i64)>> {
        let entries = self.table.get(TERRAIN_PALETTE_KEY)?.as_table()?;
        entries
            .iter()
            .map(|(name, v)| v.as_integer().map(|i| (name.clone(), i)))
            .collect()
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(&self.table).map_err(|e| LevelError::Build {
            message: format!("Failed to serialize level manifest: {}", e),
            help: None,
        })
    }

    /// Write the manifest to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| LevelError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write level manifest: {}", e),
        })
    }
}
