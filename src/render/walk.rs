//! Layer tree traversal.

use crate::error::Result;
use crate::types::{Group, Layer, Node};

/// Visit every visible terrain layer under `group` in draw order.
///
/// Siblings are visited bottom-most first so that later visits end up on top.
/// Hidden nodes are skipped together with everything below them, and visible
/// layers whose names are not terrain types are ignored. The first error
/// returned by `visit` stops the walk.
pub fn walk_terrain<F>(group: &Group, visit: &mut F) -> Result<()>
where
    F: FnMut(&Layer) -> Result<()>,
{
    walk_group(group, 0, visit)
}

fn walk_group<F>(group: &Group, depth: usize, visit: &mut F) -> Result<()>
where
    F: FnMut(&Layer) -> Result<()>,
{
    for node in group.draw_order() {
        if !node.visible() {
            continue;
        }
        match node {
            Node::Group(child) => {
                tracing::debug!(depth, group = %child.name, "entering group");
                walk_group(child, depth + 1, visit)?;
            }
            Node::Layer(layer) if layer.is_terrain() => {
                tracing::debug!(depth, layer = %layer.name, "paint");
                visit(layer)?;
            }
            Node::Layer(_) => {}
        }
    }
    Ok(())
}
