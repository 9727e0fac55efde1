use std::path::{Path, PathBuf};

use image::ImageFormat;
use palette::Palette;
use rayon::prelude::*;
use slp::Slp;

pub struct RenderOptions<'a> {
    pub palette: &'a Palette,
    pub player: u8,
    /// Renders every frame when `None`.
    pub frame: Option<usize>,
    pub output: &'a Path,
    /// Output files are named `<name>_<frame>.png`.
    pub name: &'a str,
}

#[derive(Debug, Default)]
pub struct RenderReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(usize, eyre::Report)>,
}

pub fn frame_file_name(name: &str, index: usize) -> String {
    format!("{name}_{index:03}.png")
}

/// Decodes frames to PNG in parallel.
///
/// A frame that fails does not stop the others. Failures are collected in the report.
pub fn render_frames(slp: &Slp, options: &RenderOptions) -> eyre::Result<RenderReport> {
    let indices: Vec<usize> = match options.frame {
        Some(index) => {
            slp.frame(index)?;
            vec![index]
        }
        None => (0..slp.frame_count()).collect(),
    };

    std::fs::create_dir_all(options.output)?;

    let render_one = |index: usize| -> eyre::Result<PathBuf> {
        let image = slp.to_rgba8(index, options.palette.colors(), options.player)?;
        let path = options.output.join(frame_file_name(options.name, index));

        image.save_with_format(&path, ImageFormat::Png)?;

        Ok(path)
    };

    let results = indices
        .into_par_iter()
        .map(|index| (index, render_one(index)))
        .collect::<Vec<_>>();

    let mut report = RenderReport::default();

    results
        .into_iter()
        .for_each(|(index, result)| match result {
            Ok(path) => {
                log::info!("Rendered frame {index} to {}", path.display());
                report.written.push(path);
            }
            Err(err) => {
                log::warn!("Cannot render frame {index}: {err}");
                report.failed.push((index, err));
            }
        });

    log::info!(
        "Rendered {} frames, {} failed",
        report.written.len(),
        report.failed.len()
    );

    Ok(report)
}
