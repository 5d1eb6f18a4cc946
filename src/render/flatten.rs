//! Flattening a document into a single RGBA image.
//!
//! Used for the level artwork (terrain layers only) and for thumbnails when
//! the document carries no pre-merged image. Only straight alpha-over is
//! supported.

use image::{Rgba, RgbaImage};

use crate::types::{Document, Group, Layer, Node};

use super::clip::clip_layer;

/// Which parts of the tree are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Every visible layer.
    All,
    /// Terrain nodes only. A terrain-named group is drawn with all of its
    /// visible contents; other groups are searched for terrain nodes and
    /// every other layer is hidden.
    TerrainOnly,
}

/// Flatten `document` onto a transparent canvas of document size.
#[tracing::instrument(skip(document), fields(width = document.width(), height = document.height()))]
pub fn flatten(document: &Document, selection: Selection) -> RgbaImage {
    let mut canvas = RgbaImage::new(document.width(), document.height());
    draw_group(&mut canvas, document.root(), selection == Selection::TerrainOnly);
    canvas
}

/// Flatten only the terrain layers: the level artwork.
pub fn render_artwork(document: &Document) -> RgbaImage {
    flatten(document, Selection::TerrainOnly)
}

fn draw_group(canvas: &mut RgbaImage, group: &Group, hide_non_terrain: bool) {
    for node in group.draw_order() {
        if !node.visible() {
            continue;
        }
        let hide = hide_non_terrain && !node.is_terrain();
        match node {
            Node::Group(child) => draw_group(canvas, child, hide),
            Node::Layer(_) if hide => {
                tracing::trace!(layer = node.name(), "hidden from artwork");
            }
            Node::Layer(layer) => draw_layer(canvas, layer),
        }
    }
}

fn draw_layer(canvas: &mut RgbaImage, layer: &Layer) {
    let Some(rect) = clip_layer(canvas.width(), canvas.height(), layer) else {
        return;
    };
    for (x, y, sx, sy) in rect.positions() {
        let src = *layer.pixels.get_pixel(sx, sy);
        let dst = canvas.get_pixel_mut(x, y);
        *dst = over(*dst, src);
    }
}

/// Straight (non-premultiplied) source-over.
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 || dst[3] == 0 {
        return src;
    }

    let da = mul_div255(dst[3], 255 - sa);
    let out_a = u32::from(sa) + u32::from(da);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(da);
        out[i] = ((num + out_a / 2) / out_a) as u8;
    }
    out[3] = out_a as u8;
    Rgba(out)
}

fn mul_div255(x: u8, y: u8) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}
