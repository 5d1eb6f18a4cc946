//! Layered document model.
//!
//! A document is a tree of groups and layers, stored the way layered image
//! formats store stacks: the first child of a group is the visually topmost.
//! Layers own their pixels and sit at an offset within the document, and may
//! extend past its edges on any side.

use image::RgbaImage;

use crate::error::{LevelError, Result};

use super::terrain::is_terrain_type;

/// A layered image document: dimensions plus the root group.
#[derive(Debug, Clone)]
pub struct Document {
    width: u32,
    height: u32,
    root: Group,
    /// Pre-flattened image of the whole document, if the source provided one.
    merged: Option<RgbaImage>,
}

impl Document {
    /// Create a document. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32, root: Group) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LevelError::Validation {
                message: format!("document dimensions must be positive, got {}x{}", width, height),
                help: Some("Set a non-zero width and height for the layer stack".to_string()),
            });
        }

        Ok(Self {
            width,
            height,
            root,
            merged: None,
        })
    }

    /// Attach a pre-flattened image of the document.
    pub fn with_merged(mut self, merged: RgbaImage) -> Self {
        self.merged = Some(merged);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Document dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    pub fn merged(&self) -> Option<&RgbaImage> {
        self.merged.as_ref()
    }
}

/// A node of the layer tree.
#[derive(Debug, Clone)]
pub enum Node {
    Group(Group),
    Layer(Layer),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Group(g) => &g.name,
            Node::Layer(l) => &l.name,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Node::Group(g) => g.visible,
            Node::Layer(l) => l.visible,
        }
    }

    /// Whether the node's name looks like a terrain type.
    pub fn is_terrain(&self) -> bool {
        is_terrain_type(self.name())
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<Layer> for Node {
    fn from(layer: Layer) -> Self {
        Node::Layer(layer)
    }
}

/// A group of nodes. `children[0]` is the topmost.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub visible: bool,
    pub children: Vec<Node>,
}

impl Group {
    /// Create an empty visible group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Append a child below all existing children.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Mark the group hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Children from bottom-most to topmost, i.e. the order they are drawn in.
    pub fn draw_order(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().rev()
    }
}

/// A raster layer.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    /// Position of the layer's top-left pixel in document coordinates.
    pub x: i32,
    pub y: i32,
    pub pixels: RgbaImage,
}

impl Layer {
    /// Create a visible layer at the document origin.
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            name: name.into(),
            visible: true,
            x: 0,
            y: 0,
            pixels,
        }
    }

    /// Move the layer to `(x, y)`.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Mark the layer hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_terrain(&self) -> bool {
        is_terrain_type(&self.name)
    }
}
