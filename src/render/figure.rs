//! Raster output: render into memory, crop to the drawn content, save as PNG.

use std::{fs, path::Path};

use log::{debug, info};
use plotters::{coord::Shift, prelude::*};

use crate::utils::{
    config::{Figure, TIGHT_PAD_INCHES},
    error::{ReportError, Result},
};

const BACKGROUND: [u8; 3] = [255, 255, 255];

/// Pixel rectangle, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Bounds {
    /// Grows the rectangle by `pad` pixels, clamped to the canvas.
    pub fn expand(self, pad: u32, (width, height): (u32, u32)) -> Self {
        Self {
            x0: self.x0.saturating_sub(pad),
            y0: self.y0.saturating_sub(pad),
            x1: (self.x1 + pad).min(width - 1),
            y1: (self.y1 + pad).min(height - 1),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.x1 - self.x0 + 1, self.y1 - self.y0 + 1)
    }
}

/// Smallest rectangle holding every pixel that differs from the background.
pub fn content_bounds(rgb: &[u8], (width, height): (u32, u32)) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for (i, pixel) in rgb.chunks_exact(3).enumerate().take((width * height) as usize) {
        if pixel == BACKGROUND {
            continue;
        }
        let x = i as u32 % width;
        let y = i as u32 / width;
        bounds = Some(match bounds {
            None => Bounds { x0: x, y0: y, x1: x, y1: y },
            Some(b) => Bounds {
                x0: b.x0.min(x),
                y0: b.y0.min(y),
                x1: b.x1.max(x),
                y1: b.y1.max(y),
            },
        });
    }
    bounds
}

/// Copies the pixels inside `bounds` into a new RGB buffer.
pub fn crop(rgb: &[u8], width: u32, bounds: Bounds) -> Vec<u8> {
    let (crop_w, crop_h) = bounds.size();
    let mut out = Vec::with_capacity((crop_w * crop_h * 3) as usize);
    for y in bounds.y0..=bounds.y1 {
        let start = ((y * width + bounds.x0) * 3) as usize;
        let end = start + (crop_w * 3) as usize;
        out.extend_from_slice(&rgb[start..end]);
    }
    out
}

/// Draws a chart on a white canvas of the figure's size and writes it to
/// `path`, trimmed to its content plus a small margin.
pub fn render_png<F>(figure: &Figure, path: &Path, draw: F) -> Result<()>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
{
    let (width, height) = figure.pixels();
    let mut rgb = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }

    let (pixels, size) = match content_bounds(&rgb, (width, height)) {
        Some(bounds) => {
            let bounds = bounds.expand(figure.inches(TIGHT_PAD_INCHES), (width, height));
            debug!("tight crop {:?} of {}x{}", bounds, width, height);
            (crop(&rgb, width, bounds), bounds.size())
        }
        None => (rgb, (width, height)),
    };

    write_png(path, pixels, size)
}

fn write_png(path: &Path, pixels: Vec<u8>, (width, height): (u32, u32)) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let image = BitMapElement::<(i32, i32)>::with_owned_buffer((0, 0), (width, height), pixels)
        .ok_or(ReportError::Buffer { width, height })?;
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.draw(&image)?;
    root.present()?;

    info!("chart written to {} ({}x{})", path.display(), width, height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32, ink: &[(u32, u32)]) -> Vec<u8> {
        let mut rgb = vec![255u8; (width * height * 3) as usize];
        for &(x, y) in ink {
            let i = ((y * width + x) * 3) as usize;
            rgb[i..i + 3].copy_from_slice(&[0, 0, 0]);
        }
        rgb
    }

    #[test]
    fn blank_canvas_has_no_content() {
        assert_eq!(content_bounds(&canvas(4, 3, &[]), (4, 3)), None);
    }

    #[test]
    fn bounds_cover_every_inked_pixel() {
        let rgb = canvas(10, 8, &[(2, 5), (7, 1), (4, 4)]);
        let bounds = content_bounds(&rgb, (10, 8)).unwrap();
        assert_eq!(bounds, Bounds { x0: 2, y0: 1, x1: 7, y1: 5 });
        assert_eq!(bounds.size(), (6, 5));
    }

    #[test]
    fn padding_is_clamped_to_canvas() {
        let bounds = Bounds { x0: 1, y0: 6, x1: 3, y1: 7 };
        assert_eq!(
            bounds.expand(2, (10, 8)),
            Bounds { x0: 0, y0: 4, x1: 5, y1: 7 }
        );
    }

    #[test]
    fn crop_keeps_content_pixels() {
        let rgb = canvas(5, 5, &[(1, 1), (3, 2)]);
        let bounds = content_bounds(&rgb, (5, 5)).unwrap();
        let out = crop(&rgb, 5, bounds);

        assert_eq!(bounds.size(), (3, 2));
        assert_eq!(out.len(), 3 * 2 * 3);
        // (1,1) becomes the top-left pixel, (3,2) the bottom-right one
        assert_eq!(&out[0..3], &[0, 0, 0]);
        assert_eq!(&out[out.len() - 3..], &[0, 0, 0]);
        assert_eq!(&out[3..6], &[255, 255, 255]);
    }

    #[test]
    fn render_png_writes_a_cropped_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("box.png");
        let figure = Figure::new(2.0, 2.0).with_dpi(50);

        render_png(&figure, &path, |root| {
            root.draw(&Rectangle::new([(40, 40), (60, 60)], BLACK.filled()))?;
            Ok(())
        })
        .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        // 20x20 box plus 5 px (0.1 in at 50 dpi) on each side
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        assert_eq!((width, height), (30, 30));
    }
}
