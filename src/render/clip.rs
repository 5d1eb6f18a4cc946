//! Clipping layer rectangles to the map.

use crate::types::Layer;

/// The part of a layer that lands inside the map.
///
/// `x0..x1` / `y0..y1` are map coordinates; `src_x` / `src_y` are where that
/// region starts inside the layer's own pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
    pub src_x: u32,
    pub src_y: u32,
}

impl ClipRect {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Iterate `(map_x, map_y, src_x, src_y)` in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32, u32, u32)> + '_ {
        (0..self.height()).flat_map(move |dy| {
            (0..self.width()).map(move |dx| {
                (self.x0 + dx, self.y0 + dy, self.src_x + dx, self.src_y + dy)
            })
        })
    }
}

/// Intersect a `w`x`h` rectangle at `(x, y)` with a `map_w`x`map_h` map.
///
/// Returns `None` when nothing overlaps.
pub fn clip(map_w: u32, map_h: u32, x: i32, y: i32, w: u32, h: u32) -> Option<ClipRect> {
    let (x, y) = (i64::from(x), i64::from(y));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(w)).min(i64::from(map_w));
    let y1 = (y + i64::from(h)).min(i64::from(map_h));

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    // All values are within 0..=u32::MAX here: x0/y0 are clamped to >= 0 and
    // x1/y1 to the map size, and the crop origin is bounded by the layer size.
    Some(ClipRect {
        x0: x0 as u32,
        y0: y0 as u32,
        x1: x1 as u32,
        y1: y1 as u32,
        src_x: (x0 - x) as u32,
        src_y: (y0 - y) as u32,
    })
}

/// Clip a layer's pixel rectangle to the map.
pub fn clip_layer(map_w: u32, map_h: u32, layer: &Layer) -> Option<ClipRect> {
    clip(map_w, map_h, layer.x, layer.y, layer.width(), layer.height())
}
