//! Terrain palette: terrain-type names mapped to dense indices and colours.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Colour;

/// Terrain types every palette starts with, in index order.
pub const SEED_TERRAIN_TYPES: [&str; 3] = ["space", "ground", "water"];

/// Index of the `water` terrain type.
pub const WATER_INDEX: u8 = 2;

/// Colours handed out by index before any overrides.
pub const DEFAULT_COLOURS: [Colour; 19] = [
    Colour::rgb(0, 0, 0),
    Colour::rgb(255, 255, 255),
    Colour::rgb(0, 0, 255),
    Colour::rgb(255, 255, 0),
    Colour::rgb(255, 0, 0),
    Colour::rgb(0, 255, 0),
    Colour::rgb(255, 0, 255),
    Colour::rgb(127, 0, 0),
    Colour::rgb(0, 127, 0),
    Colour::rgb(0, 0, 127),
    Colour::rgb(127, 127, 0),
    Colour::rgb(127, 0, 127),
    Colour::rgb(127, 127, 127),
    Colour::rgb(64, 0, 0),
    Colour::rgb(0, 64, 0),
    Colour::rgb(0, 0, 64),
    Colour::rgb(64, 64, 0),
    Colour::rgb(64, 0, 64),
    Colour::rgb(64, 64, 64),
];

/// Most terrain types an 8-bit index can address.
pub const MAX_TERRAIN_TYPES: usize = 256;

/// Ordered, append-only mapping from terrain-type name to palette index.
///
/// Indices are dense and 0-based; a name keeps the index it was first given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainPalette {
    /// Names by index.
    names: Vec<String>,
    /// Reverse lookup.
    indices: HashMap<String, u8>,
    /// Resolved colour by index.
    colours: Vec<Colour>,
}

impl TerrainPalette {
    /// Create a palette holding just the seed entries.
    pub fn new() -> Self {
        let mut palette = Self {
            names: Vec::new(),
            indices: HashMap::new(),
            colours: Vec::new(),
        };
        for name in SEED_TERRAIN_TYPES {
            palette.push(name.to_string());
        }
        palette
    }

    /// Get the index for `name`, appending a new entry on first sight.
    ///
    /// Returns `None` when the palette is full.
    pub fn get_or_assign(&mut self, name: &str) -> Option<u8> {
        if let Some(&index) = self.indices.get(name) {
            return Some(index);
        }
        if self.names.len() >= MAX_TERRAIN_TYPES {
            return None;
        }
        Some(self.push(name.to_string()))
    }

    fn push(&mut self, name: String) -> u8 {
        // Callers guarantee len < MAX_TERRAIN_TYPES.
        let index = self.names.len() as u8;
        let colour = DEFAULT_COLOURS
            .get(index as usize)
            .copied()
            .unwrap_or(Colour::MAGENTA);
        self.indices.insert(name.clone(), index);
        self.names.push(name);
        self.colours.push(colour);
        index
    }

    /// Look up an existing index.
    pub fn index_of(&self, name: &str) -> Option<u8> {
        self.indices.get(name).copied()
    }

    /// Name at `index`.
    pub fn name(&self, index: u8) -> Option<&str> {
        self.names.get(index as usize).map(|s| s.as_str())
    }

    /// Resolved colour at `index`.
    pub fn colour(&self, index: u8) -> Option<Colour> {
        self.colours.get(index as usize).copied()
    }

    /// Override the colour at an existing index.
    pub(crate) fn set_colour(&mut self, index: u8, colour: Colour) {
        if let Some(slot) = self.colours.get_mut(index as usize) {
            *slot = colour;
        }
    }

    /// All resolved colours in index order.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// `(index, name)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (i as u8, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the seed entries are never removed.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TerrainPalette {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes as a `name -> index` map in index order.
impl Serialize for TerrainPalette {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (index, name) in self.iter() {
            map.serialize_entry(name, &index)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seeded_entries() {
        let palette = TerrainPalette::new();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.index_of("space"), Some(0));
        assert_eq!(palette.index_of("ground"), Some(1));
        assert_eq!(palette.index_of("water"), Some(WATER_INDEX));
        assert_eq!(palette.colour(0), Some(Colour::BLACK));
        assert_eq!(palette.colour(1), Some(Colour::WHITE));
        assert_eq!(palette.colour(2), Some(Colour::rgb(0, 0, 255)));
    }

    #[test]
    fn test_get_or_assign_reuses_existing() {
        let mut palette = TerrainPalette::new();
        assert_eq!(palette.get_or_assign("ground"), Some(1));
        assert_eq!(palette.get_or_assign("lava-uw"), Some(3));
        assert_eq!(palette.get_or_assign("ice"), Some(4));
        assert_eq!(palette.get_or_assign("lava-uw"), Some(3));
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.colour(3), Some(Colour::rgb(255, 255, 0)));
    }

    #[test]
    fn test_iter_in_index_order() {
        let mut palette = TerrainPalette::new();
        palette.get_or_assign("rock");
        let entries: Vec<(u8, &str)> = palette.iter().collect();
        assert_eq!(
            entries,
            vec![(0, "space"), (1, "ground"), (2, "water"), (3, "rock")]
        );
        assert_eq!(palette.name(3), Some("rock"));
        assert_eq!(palette.name(4), None);
    }

    #[test]
    fn test_colours_past_default_table_are_magenta() {
        let mut palette = TerrainPalette::new();
        for i in 0..20 {
            palette.get_or_assign(&format!("t{}", i));
        }
        assert_eq!(palette.colours().len(), palette.len());
        assert_eq!(palette.colour(18), Some(Colour::rgb(64, 64, 64)));
        assert_eq!(palette.colour(19), Some(Colour::MAGENTA));
    }

    #[test]
    fn test_palette_full() {
        let mut palette = TerrainPalette::new();
        for i in 3..MAX_TERRAIN_TYPES {
            assert!(palette.get_or_assign(&format!("t{}", i)).is_some());
        }
        assert_eq!(palette.len(), MAX_TERRAIN_TYPES);
        assert_eq!(palette.get_or_assign("onemore"), None);
        assert_eq!(palette.get_or_assign("ground"), Some(1));
    }

    #[test]
    fn test_set_colour() {
        let mut palette = TerrainPalette::new();
        palette.set_colour(WATER_INDEX, Colour::rgb(1, 2, 3));
        assert_eq!(palette.colour(WATER_INDEX), Some(Colour::rgb(1, 2, 3)));
        // Out of range is ignored
        palette.set_colour(200, Colour::WHITE);
        assert_eq!(palette.len(), 3);
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let mut palette = TerrainPalette::new();
        palette.get_or_assign("lava");
        let json = serde_json::to_string(&palette).unwrap();
        assert_eq!(json, r#"{"space":0,"ground":1,"water":2,"lava":3}"#);
    }
}
