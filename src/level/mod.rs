//! Level conversion.
//!
//! Turns a level manifest and its layer stack into the files the game loads:
//!
//! - `<name>-terrain.png` : indexed terrain map
//! - `<name>-art.png` : artwork (terrain layers only)
//! - `<name>-bg.png` / `<name>-bg.jpeg` : parallax background, if any
//! - `<name>-thumb.jpeg` : thumbnail
//! - `<name>.toml` : the manifest, with the above and the terrain palette added

mod manifest;
mod scanner;
mod stack;

use std::path::{Path, PathBuf};

use image::DynamicImage;

pub use manifest::{
    LevelManifest, ARTWORK_KEY, BACKGROUND_KEY, TERRAIN_KEY, TERRAIN_PALETTE_KEY, THUMBNAIL_KEY,
};
pub use scanner::{discover_levels, stack_path_for};
pub use stack::{load_stack, parse_stack, STACK_SUFFIX};

use crate::error::{LevelError, Result};
use crate::render::{
    composite, extract_background, flatten, make_thumbnail, render_artwork, BackgroundFormat,
    IndexedImage, Selection,
};
use crate::types::{Document, TerrainPalette};

/// Where converted levels go unless told otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "luola2";

/// Output file names for one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFiles {
    base: String,
}

impl LevelFiles {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Derive the base name from a manifest path (`levels/cave.toml` -> `cave`).
    pub fn for_manifest(path: &Path) -> Result<Self> {
        path.file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .map(Self::new)
            .ok_or_else(|| LevelError::Io {
                path: path.to_path_buf(),
                message: "Cannot derive a level name from this path".to_string(),
            })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn artwork(&self) -> String {
        format!("{}-art.png", self.base)
    }

    pub fn terrain(&self) -> String {
        format!("{}-terrain.png", self.base)
    }

    pub fn thumbnail(&self) -> String {
        format!("{}-thumb.jpeg", self.base)
    }

    pub fn background(&self, format: BackgroundFormat) -> String {
        format!("{}-bg.{}", self.base, format.extension())
    }

    pub fn manifest(&self) -> String {
        format!("{}.toml", self.base)
    }
}

/// What a conversion produced.
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub palette: TerrainPalette,
    pub background: Option<BackgroundFormat>,
    /// Every file written, in the order written.
    pub written: Vec<PathBuf>,
}

/// Convert the level described by `manifest_path` into `output_dir`.
pub fn convert_level(manifest_path: &Path, output_dir: &Path) -> Result<ConvertReport> {
    let files = LevelFiles::for_manifest(manifest_path)?;
    let manifest = LevelManifest::load(manifest_path)?;
    let document = load_stack(&stack_path_for(manifest_path))?;

    convert_document(&document, manifest, &files, output_dir)
}

/// Convert an already loaded document and manifest.
pub fn convert_document(
    document: &Document,
    mut manifest: LevelManifest,
    files: &LevelFiles,
    output_dir: &Path,
) -> Result<ConvertReport> {
    std::fs::create_dir_all(output_dir).map_err(|e| LevelError::Io {
        path: output_dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    tracing::info!(level = files.base(), width = document.width(), height = document.height(), "converting");

    let mut written = Vec::new();

    manifest.set_str(ARTWORK_KEY, files.artwork());
    manifest.set_str(TERRAIN_KEY, files.terrain());
    manifest.set_str(THUMBNAIL_KEY, files.thumbnail());

    // Terrain
    let map = composite(document)?;
    manifest.set_terrain_palette(&map.palette);
    let terrain_path = output_dir.join(files.terrain());
    IndexedImage::emit(&map).write_png(&terrain_path)?;
    written.push(terrain_path);

    // Parallax background
    let background = extract_background(document);
    if let Some(bg) = &background {
        let name = files.background(bg.format);
        let path = output_dir.join(&name);
        save_image(&bg.image, &path)?;
        manifest.set_str(BACKGROUND_KEY, name);
        written.push(path);
    } else {
        tracing::debug!(level = files.base(), "no parallax background");
    }

    // Artwork
    let artwork_path = output_dir.join(files.artwork());
    save_image(&DynamicImage::ImageRgba8(render_artwork(document)), &artwork_path)?;
    written.push(artwork_path);

    // Thumbnail
    let thumbnail = match document.merged() {
        Some(merged) => make_thumbnail(merged),
        None => make_thumbnail(&flatten(document, Selection::All)),
    };
    let thumbnail_path = output_dir.join(files.thumbnail());
    save_image(&DynamicImage::ImageRgb8(thumbnail), &thumbnail_path)?;
    written.push(thumbnail_path);

    let manifest_path = output_dir.join(files.manifest());
    manifest.write(&manifest_path)?;
    written.push(manifest_path);

    Ok(ConvertReport {
        name: files.base().to_string(),
        width: document.width(),
        height: document.height(),
        palette: map.palette,
        background: background.map(|bg| bg.format),
        written,
    })
}

fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|e| LevelError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write image: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, Group, Layer, WATER_INDEX};
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(px))
    }

    #[test]
    fn test_level_file_names() {
        let files = LevelFiles::for_manifest(Path::new("levels/cave.toml")).unwrap();
        assert_eq!(files.base(), "cave");
        assert_eq!(files.artwork(), "cave-art.png");
        assert_eq!(files.terrain(), "cave-terrain.png");
        assert_eq!(files.thumbnail(), "cave-thumb.jpeg");
        assert_eq!(files.background(BackgroundFormat::Jpeg), "cave-bg.jpeg");
        assert_eq!(files.background(BackgroundFormat::Png), "cave-bg.png");
        assert_eq!(files.manifest(), "cave.toml");
    }

    #[test]
    fn test_convert_document_writes_all_outputs() {
        let root = Group::new("root")
            .with_child(Layer::new("Parallax", solid(4, 4, [9, 9, 9, 255])))
            .with_child(Layer::new("Glow", solid(4, 4, [200, 200, 0, 255])))
            .with_child(Layer::new("water", solid(4, 2, [0, 60, 120, 255])).at(0, 2))
            .with_child(Layer::new("ground", solid(4, 4, [120, 80, 40, 255])));
        let document = Document::new(4, 4, root).unwrap();
        let manifest = LevelManifest::parse("title = \"Test\"\n").unwrap();

        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let report =
            convert_document(&document, manifest, &LevelFiles::new("test"), &out).unwrap();

        assert_eq!(report.background, Some(BackgroundFormat::Png));
        assert_eq!(report.written.len(), 5);
        for path in &report.written {
            assert!(path.exists(), "missing {}", path.display());
        }
        assert_eq!(report.palette.colour(WATER_INDEX), Some(Colour::rgb(0, 60, 120)));

        // Artwork holds only terrain layers
        let art = image::open(out.join("test-art.png")).unwrap().to_rgba8();
        assert_eq!(art.get_pixel(0, 0).0, [120, 80, 40, 255]);
        assert_eq!(art.get_pixel(0, 3).0, [0, 60, 120, 255]);

        let thumb = image::open(out.join("test-thumb.jpeg")).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (4, 4));

        let written = LevelManifest::load(&out.join("test.toml")).unwrap();
        assert_eq!(written.get_str("title"), Some("Test"));
        assert_eq!(written.get_str(ARTWORK_KEY), Some("test-art.png"));
        assert_eq!(written.get_str(TERRAIN_KEY), Some("test-terrain.png"));
        assert_eq!(written.get_str(THUMBNAIL_KEY), Some("test-thumb.jpeg"));
        assert_eq!(written.get_str(BACKGROUND_KEY), Some("test-bg.png"));
        assert_eq!(
            written.terrain_palette(),
            Some(vec![
                ("space".to_string(), 0),
                ("ground".to_string(), 1),
                ("water".to_string(), 2),
            ])
        );
    }

    #[test]
    fn test_convert_without_background() {
        let root = Group::new("root").with_child(Layer::new("ground", solid(2, 2, [1, 1, 1, 255])));
        let document = Document::new(2, 2, root).unwrap();

        let dir = tempdir().unwrap();
        let report = convert_document(
            &document,
            LevelManifest::default(),
            &LevelFiles::new("plain"),
            dir.path(),
        )
        .unwrap();

        assert_eq!(report.background, None);
        let written = LevelManifest::load(&dir.path().join("plain.toml")).unwrap();
        assert_eq!(written.get_str(BACKGROUND_KEY), None);
    }

    #[test]
    fn test_convert_level_from_files() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();
        solid(6, 3, [10, 10, 10, 255]).save(src.join("ground.png")).unwrap();
        solid(2, 2, [0, 0, 0, 255]).save(src.join("lava.png")).unwrap();
        fs::write(src.join("pit.toml"), "title = \"Pit\"\n").unwrap();
        fs::write(
            src.join("pit.stack.yaml"),
            r#"
width: 6
height: 3
layers:
  - name: lava-i
    src: lava.png
    x: 5
    y: 2
  - name: ground
    src: ground.png
"#,
        )
        .unwrap();

        let out = dir.path().join("out");
        let report = convert_level(&src.join("pit.toml"), &out).unwrap();
        assert_eq!(report.name, "pit");
        assert_eq!((report.width, report.height), (6, 3));
        assert_eq!(report.palette.index_of("lava-i"), Some(3));

        let mut decoder = png::Decoder::new(fs::File::open(out.join("pit-terrain.png")).unwrap());
        decoder.set_transformations(png::Transformations::IDENTITY);
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf).unwrap();
        let pixels = &buf[..frame.buffer_size()];
        assert_eq!(pixels.len(), 18);
        assert_eq!(pixels[0], 1);
        assert_eq!(pixels[17], 3);
        assert_eq!(pixels.iter().filter(|&&i| i == 3).count(), 1);
    }

    #[test]
    fn test_convert_level_missing_stack() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lonely.toml"), "").unwrap();
        let err = convert_level(&dir.path().join("lonely.toml"), dir.path()).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }
}
