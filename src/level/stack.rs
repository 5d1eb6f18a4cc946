//! Layer stack (`*.stack.yaml`) loading.
//!
//! A layer stack describes a layered document exported from a painting
//! program: its size, the tree of groups and layers (topmost first), and the
//! PNG file holding each layer's pixels.
//!
//! ```yaml
//! width: 640
//! height: 480
//! merged: merged.png
//! layers:
//!   - name: Parallax.jpeg
//!     src: data/bg.jpg
//!   - name: Terrain
//!     children:
//!       - name: water
//!         src: data/water.png
//!         y: 300
//!       - name: ground
//!         src: data/ground.png
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LevelError, Result};
use crate::types::{Document, Group, Layer, Node};

/// Suffix identifying layer stack files.
pub const STACK_SUFFIX: &str = ".stack.yaml";

/// Top level of a stack file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StackFile {
    width: i64,
    height: i64,
    /// Pre-flattened image of the whole document.
    #[serde(default)]
    merged: Option<PathBuf>,
    #[serde(default)]
    layers: Vec<NodeEntry>,
}

/// A group (has `children`) or a layer (has `src`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeEntry {
    name: String,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
    #[serde(default)]
    src: Option<PathBuf>,
    #[serde(default)]
    children: Option<Vec<NodeEntry>>,
}

fn default_visible() -> bool {
    true
}

/// Load a stack file and every image it references.
pub fn load_stack(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| LevelError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read layer stack: {}", e),
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    parse_stack(&content, base)
}

/// Parse stack YAML, resolving image paths against `base`.
pub fn parse_stack(content: &str, base: &Path) -> Result<Document> {
    let stack: StackFile = serde_yaml::from_str(content).map_err(|e| LevelError::Parse {
        message: format!("Invalid layer stack: {}", e),
        help: Some("Check the stack file's YAML syntax".to_string()),
    })?;

    let width = dimension("width", stack.width)?;
    let height = dimension("height", stack.height)?;

    let mut root = Group::new("root");
    for entry in stack.layers {
        root.children.push(build_node(entry, base)?);
    }

    let document = Document::new(width, height, root)?;
    match stack.merged {
        Some(merged) => Ok(document.with_merged(load_pixels(&base.join(merged))?)),
        None => Ok(document),
    }
}

fn dimension(what: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| LevelError::Validation {
            message: format!("layer stack {} must be a positive integer, got {}", what, value),
            help: None,
        })
}

fn build_node(entry: NodeEntry, base: &Path) -> Result<Node> {
    match (entry.children, entry.src) {
        (Some(children), None) => {
            let mut group = Group::new(entry.name);
            group.visible = entry.visible;
            for child in children {
                group.children.push(build_node(child, base)?);
            }
            Ok(Node::Group(group))
        }
        (None, Some(src)) => {
            let pixels = load_pixels(&base.join(src))?;
            let mut layer = Layer::new(entry.name, pixels).at(entry.x, entry.y);
            layer.visible = entry.visible;
            Ok(Node::Layer(layer))
        }
        (Some(_), Some(_)) => Err(LevelError::Validation {
            message: format!("node '{}' has both `src` and `children`", entry.name),
            help: Some("A node is either a group (children) or a layer (src)".to_string()),
        }),
        (None, None) => Err(LevelError::Validation {
            message: format!("node '{}' has neither `src` nor `children`", entry.name),
            help: Some("Give layers a `src` image, or groups a `children` list".to_string()),
        }),
    }
}

fn load_pixels(path: &Path) -> Result<image::RgbaImage> {
    let img = image::open(path).map_err(|e| LevelError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read layer image: {}", e),
    })?;
    Ok(img.to_rgba8())
}
