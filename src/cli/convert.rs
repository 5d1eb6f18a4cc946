//! Convert command implementation.
//!
//! Converts level manifests and their layer stacks into game assets.

use std::path::PathBuf;

use clap::Args;

use crate::error::{LevelError, Result};
use crate::level::{convert_level, discover_levels, ConvertReport, DEFAULT_OUTPUT_DIR};
use crate::output::{display_path, plural, Printer};
use crate::types::WATER_INDEX;

/// Convert levels into terrain, artwork, background and thumbnail files
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Level manifests (`<name>.toml`) or directories to search for them
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output directory
    #[arg(long, short, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let levels = discover_levels(&args.paths);
    if levels.is_empty() {
        return Err(LevelError::Build {
            message: "No levels found".to_string(),
            help: Some(
                "A level is a <name>.toml manifest with a <name>.stack.yaml beside it".to_string(),
            ),
        });
    }

    for level in &levels {
        printer.status("Converting", &display_path(level));
        let report = convert_level(level, &args.output)?;
        print_report(&report, printer);
    }

    printer.status(
        "Finished",
        &format!(
            "{} to {}",
            plural(levels.len(), "level", "levels"),
            display_path(&args.output)
        ),
    );

    Ok(())
}

fn print_report(report: &ConvertReport, printer: &Printer) {
    printer.info("Size", &format!("{}x{}", report.width, report.height));

    let palette: Vec<String> = report
        .palette
        .iter()
        .map(|(index, name)| format!("{}={}", name, index))
        .collect();
    printer.info("Terrain", &palette.join(", "));

    if let Some(colour) = report.palette.colour(WATER_INDEX) {
        printer.info("Water", &format!("#{} {}", WATER_INDEX, colour));
    }
    if report.background.is_none() {
        printer.info("Background", &printer.dim("none"));
    }

    for path in &report.written {
        printer.status("Wrote", &display_path(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    fn write_level(dir: &std::path::Path, name: &str) {
        RgbaImage::from_pixel(3, 3, Rgba([50, 60, 70, 255]))
            .save(dir.join(format!("{name}-ground.png")))
            .unwrap();
        fs::write(dir.join(format!("{name}.toml")), "title = \"x\"\n").unwrap();
        fs::write(
            dir.join(format!("{name}.stack.yaml")),
            format!("width: 3\nheight: 3\nlayers:\n  - name: ground\n    src: {name}-ground.png\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_convert_directory() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("levels");
        fs::create_dir(&src).unwrap();
        write_level(&src, "alpha");
        write_level(&src, "beta");

        let output = dir.path().join("out");
        let args = ConvertArgs {
            paths: vec![src],
            output: output.clone(),
        };
        run(args, &Printer::new()).unwrap();

        for name in ["alpha", "beta"] {
            assert!(output.join(format!("{name}.toml")).exists());
            assert!(output.join(format!("{name}-terrain.png")).exists());
            assert!(output.join(format!("{name}-art.png")).exists());
            assert!(output.join(format!("{name}-thumb.jpeg")).exists());
        }
    }

    #[test]
    fn test_no_levels_is_an_error() {
        let dir = tempdir().unwrap();
        let args = ConvertArgs {
            paths: vec![dir.path().to_path_buf()],
            output: dir.path().join("out"),
        };
        let err = run(args, &Printer::new()).unwrap_err();
        assert!(matches!(err, LevelError::Build { .. }));
    }
}
