use image::{DynamicImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a solid-color opaque image; the format follows the extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    DynamicImage::new_rgb8(width, height).save(path).unwrap();
}

/// Writes a PNG with a semi-transparent fill.
pub fn write_transparent_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_pixel(width, height, Rgba([30, 60, 90, 120]));
    DynamicImage::ImageRgba8(img).save(path).unwrap();
}

/// Writes a file that only pretends to be an image.
pub fn write_fake_image(path: &Path) {
    File::create(path)
        .unwrap()
        .write_all(b"definitely not pixels")
        .unwrap();
}

pub fn write_text_file(path: &Path, content: &str) {
    File::create(path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
}
