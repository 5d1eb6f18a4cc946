//! Terrain-type name recognition.
//!
//! A layer is terrain when its name is one or more lowercase letters followed
//! by any number of `-uw` / `-i` suffixes (`ground`, `water-uw`, `lava-i-uw`).
//! The rule is purely lexical: names the game engine has never heard of are
//! still accepted and get their own palette slot.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern a layer name must match to be treated as a terrain type.
pub const TERRAIN_TYPE_PATTERN: &str = r"^[a-z]+(?:-(?:uw|i))*$";

static TERRAIN_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TERRAIN_TYPE_PATTERN).expect("terrain pattern is a valid regex"));

/// Check whether `name` looks like a terrain type.
pub fn is_terrain_type(name: &str) -> bool {
    TERRAIN_TYPE_RE.is_match(name)
}
