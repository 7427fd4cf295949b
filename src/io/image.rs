//! Raster loading for masks and PNG export of grid-shaped results

use crate::io::error::{AnalysisError, Result, file_system_error};
use crate::spatial::components::ComponentLabels;
use crate::spatial::mask::{Raster, SampleDepth};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Pixel, Rgb, RgbImage};
use ndarray::{Array2, Array3};
use num_traits::ToPrimitive;
use std::path::Path;

// Qualitative palette for component ids, cycled when there are more components
const COMPONENT_PALETTE: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

fn raster_from_buffer<P>(buffer: &ImageBuffer<P, Vec<P::Subpixel>>, depth: SampleDepth) -> Raster
where
    P: Pixel,
    P::Subpixel: ToPrimitive,
{
    let (width, height) = buffer.dimensions();
    let channels = usize::from(P::CHANNEL_COUNT);
    let mut data = Array3::zeros((height as usize, width as usize, channels));

    for (x, y, pixel) in buffer.enumerate_pixels() {
        for (c, sample) in pixel.channels().iter().enumerate() {
            if let Some(slot) = data.get_mut((y as usize, x as usize, c)) {
                *slot = sample.to_f64().unwrap_or(f64::NAN);
            }
        }
    }

    Raster::new(data, depth)
}

/// Convert a decoded image into a raster, keeping its channel layout and depth
pub fn raster_from_image(img: &DynamicImage) -> Raster {
    match img {
        DynamicImage::ImageLuma8(buf) => raster_from_buffer(buf, SampleDepth::Integer),
        DynamicImage::ImageLumaA8(buf) => raster_from_buffer(buf, SampleDepth::Integer),
        DynamicImage::ImageRgb8(buf) => raster_from_buffer(buf, SampleDepth::Integer),
        DynamicImage::ImageRgba8(buf) => raster_from_buffer(buf, SampleDepth::Integer),
        DynamicImage::ImageLuma16(buf) => raster_from_buffer(buf, SampleDepth::Integer),
        DynamicImage::ImageLumaA16(buf) => raster_from_buffer(buf, SampleDepth::Integer),
        DynamicImage::ImageRgb16(buf) => raster_from_buffer(buf, SampleDepth::Integer),
        DynamicImage::ImageRgba16(buf) => raster_from_buffer(buf, SampleDepth::Integer),
        DynamicImage::ImageRgb32F(buf) => raster_from_buffer(buf, SampleDepth::Float),
        DynamicImage::ImageRgba32F(buf) => raster_from_buffer(buf, SampleDepth::Float),
        other => raster_from_buffer(&other.to_rgba8(), SampleDepth::Integer),
    }
}

/// Load a raster image (PNG, TIFF, JPEG) from disk
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path).map_err(|e| AnalysisError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(raster_from_image(&img))
}

/// Scale finite values to [0, 1] between their minimum and maximum
///
/// A constant image divides by 1; non-finite cells map to 0.
pub fn normalize(values: &Array2<f64>) -> Array2<f64> {
    let (vmin, vmax) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, &v| {
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        })
        .unwrap_or((0.0, 1.0));
    let den = if vmax > vmin { vmax - vmin } else { 1.0 };

    values.mapv(|v| {
        if v.is_finite() {
            ((v - vmin) / den).clamp(0.0, 1.0)
        } else {
            0.0
        }
    })
}

/// The `afmhot` colormap evaluated at a normalized value
pub fn afmhot(value: f64) -> [u8; 3] {
    let channel = |offset: f64| {
        let level = 2.0_f64.mul_add(value, -offset).clamp(0.0, 1.0);
        (level * 255.0) as u8
    };
    [channel(0.0), channel(0.5), channel(1.0)]
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }
    Ok(())
}

fn image_size((rows, cols): (usize, usize)) -> Result<(u32, u32)> {
    let height = u32::try_from(rows).map_err(|e| AnalysisError::InvalidSourceData {
        reason: format!("{rows} rows: {e}"),
    })?;
    let width = u32::try_from(cols).map_err(|e| AnalysisError::InvalidSourceData {
        reason: format!("{cols} columns: {e}"),
    })?;
    if width == 0 || height == 0 {
        return Err(AnalysisError::InvalidSourceData {
            reason: "cannot render an empty grid".to_string(),
        });
    }
    Ok((width, height))
}

/// Save a grid of values as a min/max-normalized `afmhot` PNG, one pixel per cell
///
/// # Errors
///
/// Returns an error if the grid is empty or the image cannot be written
pub fn export_colormap_png(values: &Array2<f64>, path: &Path) -> Result<()> {
    let (width, height) = image_size(values.dim())?;
    let norm = normalize(values);
    let img = RgbImage::from_fn(width, height, |x, y| {
        let v = norm.get((y as usize, x as usize)).copied().unwrap_or(0.0);
        Rgb(afmhot(v))
    });

    ensure_parent(path)?;
    img.save(path).map_err(|e| AnalysisError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save a grid of values as a min/max-normalized 8-bit grayscale PNG
///
/// # Errors
///
/// Returns an error if the grid is empty or the image cannot be written
pub fn export_grayscale_png(values: &Array2<f64>, path: &Path) -> Result<()> {
    let (width, height) = image_size(values.dim())?;
    let norm = normalize(values);
    let img = GrayImage::from_fn(width, height, |x, y| {
        let v = norm.get((y as usize, x as usize)).copied().unwrap_or(0.0);
        Luma([(v * 255.0) as u8])
    });

    ensure_parent(path)?;
    img.save(path).map_err(|e| AnalysisError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Color of a component id; unselected cells are black
pub fn component_color(label: u32) -> [u8; 3] {
    if label == 0 {
        return [0, 0, 0];
    }
    let slot = (label as usize - 1) % COMPONENT_PALETTE.len();
    COMPONENT_PALETTE.get(slot).copied().unwrap_or([255, 255, 255])
}

/// Save a component label map, one color per component
///
/// # Errors
///
/// Returns an error if the label map is empty or the image cannot be written
pub fn export_components_png(components: &ComponentLabels, path: &Path) -> Result<()> {
    let labels = components.labels();
    let (width, height) = image_size(labels.dim())?;
    let img = RgbImage::from_fn(width, height, |x, y| {
        let label = labels.get((y as usize, x as usize)).copied().unwrap_or(0);
        Rgb(component_color(label))
    });

    ensure_parent(path)?;
    img.save(path).map_err(|e| AnalysisError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
