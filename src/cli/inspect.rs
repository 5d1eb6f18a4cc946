//! Inspect command implementation.
//!
//! Prints a layer stack's tree, marking which layers count as terrain, and
//! the terrain palette compositing would produce. Nothing is written.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{LevelError, Result};
use crate::level::load_stack;
use crate::output::{display_path, plural, Printer};
use crate::render::{composite, extract_background};
use crate::types::{Document, Node, TerrainPalette};

/// Show a layer stack's tree and the terrain palette it produces
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Layer stack file (`<name>.stack.yaml`)
    #[arg(required = true)]
    pub stack: PathBuf,

    /// Print JSON to stdout instead of a tree
    #[arg(long)]
    pub json: bool,
}

/// Machine-readable summary of a document.
#[derive(Debug, Serialize)]
pub struct Inspection {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<NodeSummary>,
    #[serde(rename = "terrain-palette")]
    pub terrain_palette: TerrainPalette,
    /// Resolved colour per palette index, as `#RRGGBB`.
    pub colours: Vec<String>,
    pub background: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NodeSummary {
    pub name: String,
    pub kind: &'static str,
    pub visible: bool,
    pub terrain: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<[i32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<[u32; 2]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSummary>,
}

impl NodeSummary {
    fn from_node(node: &Node) -> Self {
        match node {
            Node::Group(group) => Self {
                name: group.name.clone(),
                kind: "group",
                visible: group.visible,
                terrain: node.is_terrain(),
                offset: None,
                size: None,
                children: group.children.iter().map(Self::from_node).collect(),
            },
            Node::Layer(layer) => Self {
                name: layer.name.clone(),
                kind: "layer",
                visible: layer.visible,
                terrain: layer.is_terrain(),
                offset: Some([layer.x, layer.y]),
                size: Some([layer.width(), layer.height()]),
                children: Vec::new(),
            },
        }
    }
}

/// Summarize a document, compositing its terrain to get the palette.
pub fn inspect(document: &Document) -> Result<Inspection> {
    let map = composite(document)?;
    Ok(Inspection {
        width: document.width(),
        height: document.height(),
        layers: document.root().children.iter().map(NodeSummary::from_node).collect(),
        colours: map.palette.colours().iter().map(|c| c.opaque().to_string()).collect(),
        terrain_palette: map.palette,
        background: extract_background(document).map(|bg| bg.format.extension().to_string()),
    })
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<()> {
    let document = load_stack(&args.stack)?;
    let inspection = inspect(&document)?;

    if args.json {
        let json = serde_json::to_string_pretty(&inspection).map_err(|e| LevelError::Build {
            message: format!("Failed to serialize inspection: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    printer.status(
        "Inspecting",
        &format!(
            "{} ({}x{})",
            display_path(&args.stack),
            inspection.width,
            inspection.height
        ),
    );
    for node in &inspection.layers {
        print_node(node, 0, printer);
    }
    printer.info(
        "Palette",
        &plural(inspection.terrain_palette.len(), "terrain type", "terrain types"),
    );
    for ((index, name), colour) in inspection.terrain_palette.iter().zip(&inspection.colours) {
        println!("{:>3} {:<16} {}", index, name, colour);
    }

    Ok(())
}

fn print_node(node: &NodeSummary, depth: usize, printer: &Printer) {
    let mut line = format!("{}{}", "  ".repeat(depth), node.name);
    if node.kind == "group" {
        line.push('/');
    }
    if let (Some([x, y]), Some([w, h])) = (node.offset, node.size) {
        line.push_str(&printer.dim(&format!(" {}x{} @ {},{}", w, h, x, y)));
    }
    if !node.visible {
        line.push_str(&printer.dim(" (hidden)"));
    }

    let verb = match (node.kind, node.terrain) {
        ("layer", true) => "Terrain",
        ("group", _) => "Group",
        _ => "Layer",
    };
    printer.info(verb, &line);

    for child in &node.children {
        print_node(child, depth + 1, printer);
    }
}
