//! Parallax background extraction and thumbnails.

use image::{imageops::FilterType, DynamicImage, RgbImage, RgbaImage};

use crate::types::{Document, Node};

/// Largest thumbnail edge, in pixels.
pub const THUMBNAIL_SIZE: u32 = 256;

/// Output format of the parallax background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundFormat {
    Png,
    Jpeg,
}

impl BackgroundFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            BackgroundFormat::Png => "png",
            BackgroundFormat::Jpeg => "jpeg",
        }
    }
}

/// A parallax background ready to be saved.
#[derive(Debug, Clone)]
pub struct Background {
    pub format: BackgroundFormat,
    pub image: DynamicImage,
}

/// Find the parallax background among the document's top-level layers.
///
/// A layer named `Parallax` is saved as PNG and one named `Parallax.jpeg` as
/// an RGB JPEG. Visibility does not matter; the first match wins.
pub fn extract_background(document: &Document) -> Option<Background> {
    document.root().children.iter().find_map(|node| {
        let Node::Layer(layer) = node else {
            return None;
        };
        let format = match layer.name.as_str() {
            "Parallax" => BackgroundFormat::Png,
            "Parallax.jpeg" => BackgroundFormat::Jpeg,
            _ => return None,
        };

        let image = DynamicImage::ImageRgba8(layer.pixels.clone());
        let image = match format {
            BackgroundFormat::Png => image,
            BackgroundFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        };
        Some(Background { format, image })
    })
}

/// Shrink `merged` to fit within `THUMBNAIL_SIZE` square, as RGB.
///
/// Aspect ratio is kept and small images are never enlarged.
pub fn make_thumbnail(merged: &RgbaImage) -> RgbImage {
    let image = DynamicImage::ImageRgba8(merged.clone());
    let image = if merged.width() > THUMBNAIL_SIZE || merged.height() > THUMBNAIL_SIZE {
        image.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle)
    } else {
        image
    };
    image.to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Group, Layer};
    use image::Rgba;

    fn layer(name: &str) -> Layer {
        Layer::new(name, RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 200])))
    }

    #[test]
    fn test_png_background() {
        let root = Group::new("root")
            .with_child(layer("ground"))
            .with_child(layer("Parallax").hidden());
        let document = Document::new(8, 8, root).unwrap();

        let bg = extract_background(&document).unwrap();
        assert_eq!(bg.format, BackgroundFormat::Png);
        assert_eq!(bg.image.to_rgba8().get_pixel(0, 0).0, [10, 20, 30, 200]);
    }

    #[test]
    fn test_jpeg_background_is_rgb() {
        let root = Group::new("root").with_child(layer("Parallax.jpeg"));
        let document = Document::new(8, 8, root).unwrap();

        let bg = extract_background(&document).unwrap();
        assert_eq!(bg.format, BackgroundFormat::Jpeg);
        assert_eq!(bg.format.extension(), "jpeg");
        assert!(matches!(bg.image, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_background_only_at_top_level() {
        let root = Group::new("root")
            .with_child(Group::new("Parallax"))
            .with_child(Group::new("Backdrop").with_child(layer("Parallax")));
        let document = Document::new(8, 8, root).unwrap();

        assert!(extract_background(&document).is_none());
    }

    #[test]
    fn test_thumbnail_fits_and_keeps_aspect() {
        let merged = RgbaImage::from_pixel(1024, 512, Rgba([1, 2, 3, 255]));
        let thumb = make_thumbnail(&merged);
        assert_eq!((thumb.width(), thumb.height()), (256, 128));
        assert_eq!(thumb.get_pixel(10, 10).0, [1, 2, 3]);
    }

    #[test]
    fn test_small_thumbnail_not_enlarged() {
        let merged = RgbaImage::from_pixel(100, 40, Rgba([1, 2, 3, 255]));
        let thumb = make_thumbnail(&merged);
        assert_eq!((thumb.width(), thumb.height()), (100, 40));
    }
}
