//! PNG export of composite images with pattern matches highlighted

use std::fs;
use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::analysis::compositor::CompositeImage;
use crate::analysis::patterns::OrientationScan;
use crate::io::configuration::{MONSTER_COLOR, PNG_PIXEL_SCALE, ROUGH_COLOR, WATER_COLOR};
use crate::io::error::{PuzzleError, Result, WithContext};
use crate::spatial::orientation::Orientation;

/// Render an image, oriented and coloured according to `scan`
///
/// Without a scan the image is drawn as assembled with no highlights.
pub fn render_scan(image: &CompositeImage, scan: Option<&OrientationScan>) -> RgbaImage {
    let orientation = scan.map_or(Orientation::IDENTITY, OrientationScan::orientation);
    let oriented = image.oriented(orientation);
    let scale = PNG_PIXEL_SCALE;
    let width = oriented.width() as u32 * scale;
    let height = oriented.height() as u32 * scale;

    ImageBuffer::from_fn(width, height, |x, y| {
        let (row, col) = ((y / scale) as usize, (x / scale) as usize);
        let color = match oriented.get(row, col) {
            Some(true) if scan.is_some_and(|scan| scan.is_marked(row, col)) => MONSTER_COLOR,
            Some(true) => ROUGH_COLOR,
            _ => WATER_COLOR,
        };
        Rgba(color)
    })
}

/// Save a rendered image as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_scan_as_png(
    image: &CompositeImage,
    scan: Option<&OrientationScan>,
    output_path: &Path,
) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    render_scan(image, scan)
        .save(output_path)
        .map_err(|e| PuzzleError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
