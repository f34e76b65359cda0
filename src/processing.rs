use crate::constants::{
    DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL,
    MAX_QUALITY, MIN_QUALITY, ZOPFLI_ITERATIONS,
};
use crate::error::{OptimizeError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, ColorType, DynamicImage, GenericImageView, ImageReader, Rgba, RgbaImage};
use oxipng::{Deflaters, InFile, Options, OutFile};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::num::NonZeroU8;
use std::path::{Path, PathBuf};

/// Settings for one optimization run. Immutable once the walk starts.
#[derive(Debug, Clone, Copy)]
pub struct OptimizeOptions {
    pub quality: u8,
    pub max_width: u32,
}

impl OptimizeOptions {
    /// Builds run options, clamping quality into 1-100 and replacing a
    /// missing or zero max width with the default.
    pub fn new(quality: Option<u8>, max_width: Option<u32>) -> Self {
        let quality = quality.unwrap_or(DEFAULT_QUALITY).clamp(MIN_QUALITY, MAX_QUALITY);
        let max_width = match max_width {
            Some(w) if w > 0 => w,
            _ => DEFAULT_MAX_WIDTH,
        };
        Self { quality, max_width }
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Encoding chosen from the INPUT extension. Anything that is neither
/// JPEG nor PNG gets re-encoded as a sibling JPEG file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeTarget {
    Jpeg,
    Png,
    /// Unrecognized encode target: write a `.jpg` next to the original.
    JpegSibling,
}

impl EncodeTarget {
    pub fn for_input(input: &Path) -> Self {
        match input
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => EncodeTarget::Jpeg,
            Some("png") => EncodeTarget::Png,
            _ => EncodeTarget::JpegSibling,
        }
    }
}

/// Outcome of a single successfully transformed file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub original_size: u64,
    pub optimized_size: u64,
    pub output_path: PathBuf,
    /// Original dimensions if the image was downscaled.
    pub resized_from: Option<(u32, u32)>,
    pub dimensions: (u32, u32),
}

impl FileReport {
    pub fn reduction_percent(&self) -> f64 {
        crate::utils::calculate_reduction(self.original_size, self.optimized_size)
    }
}

/// Resolves the on-disk path a transformed file will be written to.
///
/// JPEG and PNG inputs are overwritten in place (or written to `output`
/// when one is given); every other extension becomes a `.jpg` sibling,
/// leaving the original file untouched.
pub fn generate_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    let base = output.unwrap_or(input);
    match EncodeTarget::for_input(input) {
        EncodeTarget::Jpeg | EncodeTarget::Png => base.to_path_buf(),
        EncodeTarget::JpegSibling => base.with_extension("jpg"),
    }
}

/// Composites alpha onto an opaque white background so the image is safe
/// for lossy encoding. Images without an alpha channel pass through
/// unchanged; palette inputs are already expanded by the decoders.
pub fn flatten_alpha(img: DynamicImage) -> DynamicImage {
    if !img.color().has_alpha() {
        return img;
    }

    let (width, height) = img.dimensions();
    let mut background = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut background, &img.to_rgba8(), 0, 0);
    DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(background).to_rgb8())
}

/// Downscales the image to `max_width` with Lanczos resampling, keeping
/// the aspect ratio (height rounded to the nearest integer). Returns the
/// original dimensions when a resize happened; never upscales.
pub fn resize_to_max_width(img: &mut DynamicImage, max_width: u32) -> Option<(u32, u32)> {
    let (width, height) = img.dimensions();
    if width <= max_width {
        return None;
    }

    let new_height = ((height as u64 * max_width as u64 + width as u64 / 2) / width as u64)
        .max(1) as u32;
    *img = img.resize_exact(max_width, new_height, imageops::FilterType::Lanczos3);
    Some((width, height))
}

/// Transforms a single file: decode, flatten alpha, downscale if wider
/// than the configured maximum, re-encode per the input extension.
///
/// Overwrites `input` unless a distinct `output` is given. Errors are
/// per-file; the caller decides whether they abort the run.
pub fn optimize_image(
    input: &Path,
    output: Option<&Path>,
    options: &OptimizeOptions,
) -> Result<FileReport> {
    if !input.exists() {
        return Err(OptimizeError::FileNotFound(input.to_path_buf()));
    }
    let original_size = fs::metadata(input)?.len();

    let img = ImageReader::open(input)?.decode()?;
    let mut img = flatten_alpha(img);
    let resized_from = resize_to_max_width(&mut img, options.max_width);

    let output_path = generate_output_path(input, output);
    match EncodeTarget::for_input(input) {
        EncodeTarget::Png => save_png_optimized(&img, &output_path, options.quality)?,
        EncodeTarget::Jpeg | EncodeTarget::JpegSibling => {
            save_jpeg(&img, &output_path, options.quality)?
        }
    }

    let optimized_size = fs::metadata(&output_path)?.len();
    Ok(FileReport {
        original_size,
        optimized_size,
        output_path,
        resized_from,
        dimensions: img.dimensions(),
    })
}

fn save_jpeg(img: &DynamicImage, output: &Path, quality: u8) -> Result<()> {
    // The JPEG encoder only takes 8-bit samples; flattening already
    // removed any alpha channel.
    let converted;
    let img = match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img,
        _ => {
            converted = DynamicImage::ImageRgb8(img.to_rgb8());
            &converted
        }
    };

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    img.write_with_encoder(encoder)?;
    writer.flush()?;
    Ok(())
}

fn save_png_optimized(img: &DynamicImage, output: &Path, quality: u8) -> Result<()> {
    let temp_path = output.with_extension("temp.png");
    img.save_with_format(&temp_path, image::ImageFormat::Png)?;

    struct TempFileGuard(PathBuf);
    impl Drop for TempFileGuard {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }
    let _guard = TempFileGuard(temp_path.clone());

    let mut oxipng_options = Options::from_preset(4);
    oxipng_options.force = true;

    // Quality steers how much CPU the lossless pass gets to spend.
    if quality >= 90 {
        oxipng_options.deflate = Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap(),
        };
    } else if quality >= 70 {
        oxipng_options.deflate = Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        };
    } else {
        oxipng_options.deflate = Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        };
    }

    let infile = InFile::Path(temp_path.clone());
    let outfile = OutFile::Path {
        path: Some(output.to_path_buf()),
        preserve_attrs: false,
    };
    oxipng::optimize(&infile, &outfile, &oxipng_options)
        .map_err(|e| OptimizeError::PngOptimization(e.to_string()))?;

    Ok(())
}
