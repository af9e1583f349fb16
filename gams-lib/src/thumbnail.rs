//! Thumbnail synthesis from the site logo or a downloaded image.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::GamsError;

/// Fit `logo` into a transparent `size`×`size` square, centered.
pub fn render_thumbnail(logo: &DynamicImage, size: u32) -> RgbaImage {
    if size == 0 {
        return RgbaImage::new(0, 0);
    }
    let logo = logo.to_rgba8();
    let (w, h) = fit_to_bounds(logo.width(), logo.height(), size, size);
    let filter = if w > logo.width() || h > logo.height() {
        FilterType::Nearest
    } else {
        FilterType::Lanczos3
    };
    let scaled = imageops::resize(&logo, w, h, filter);

    let mut canvas = RgbaImage::new(size, size);
    let x = (size as i64 - w as i64) / 2;
    let y = (size as i64 - h as i64) / 2;
    imageops::overlay(&mut canvas, &scaled, x, y);
    canvas
}

/// Largest size with the same aspect ratio that fits inside `max_w`×`max_h`.
/// Never returns a zero dimension.
fn fit_to_bounds(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (max_w.max(1), max_h.max(1));
    }
    let scale = f64::min(max_w as f64 / w as f64, max_h as f64 / h as f64);
    let fw = (w as f64 * scale).round() as u32;
    let fh = (h as f64 * scale).round() as u32;
    (fw.max(1), fh.max(1))
}

/// Generate a thumbnail at `output` from the logo at `logo_path`.
///
/// Fails with [`GamsError::Config`] when `size` is zero.
pub fn synthesize_thumbnail(logo_path: &Path, output: &Path, size: u32) -> Result<(), GamsError> {
    if size == 0 {
        return Err(GamsError::config("thumbnail.size must be at least 1"));
    }
    let logo = image::open(logo_path).map_err(|e| GamsError::image(logo_path, e))?;
    let thumb = DynamicImage::ImageRgba8(render_thumbnail(&logo, size));
    save_image(&thumb, output)
}

/// Decode downloaded image bytes and write them to `output`, re-encoded in
/// the format its extension names.
pub fn save_image_bytes(bytes: &[u8], output: &Path) -> Result<(), GamsError> {
    let img = image::load_from_memory(bytes).map_err(|e| GamsError::image(output, e))?;
    save_image(&img, output)
}

fn save_image(img: &DynamicImage, output: &Path) -> Result<(), GamsError> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GamsError::io(parent, e))?;
    }
    // JPEG has no alpha channel.
    let is_jpeg = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));
    let result = if is_jpeg {
        DynamicImage::ImageRgb8(img.to_rgb8()).save(output)
    } else {
        img.save(output)
    };
    result.map_err(|e| GamsError::image(output, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    fn logo(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([200, 30, 30, 255])))
    }

    #[test]
    fn fit_keeps_aspect_ratio() {
        assert_eq!(fit_to_bounds(100, 50, 256, 256), (256, 128));
        assert_eq!(fit_to_bounds(50, 100, 256, 256), (128, 256));
        assert_eq!(fit_to_bounds(512, 512, 256, 256), (256, 256));
        assert_eq!(fit_to_bounds(0, 10, 64, 64), (64, 64));
        assert_eq!(fit_to_bounds(10, 10, 0, 0), (1, 1));
        assert_eq!(fit_to_bounds(1000, 1, 8, 8), (8, 1));
    }

    #[test]
    fn zero_size_is_rejected_not_a_panic() {
        assert_eq!(render_thumbnail(&logo(10, 10), 0).dimensions(), (0, 0));

        let tmp = TempDir::new().unwrap();
        let logo_path = tmp.path().join("gams.png");
        logo(10, 10).save(&logo_path).unwrap();
        let out = tmp.path().join("slope.png");
        let err = synthesize_thumbnail(&logo_path, &out, 0).unwrap_err();
        assert!(matches!(err, GamsError::Config(_)));
        assert!(!out.exists());
    }

    #[test]
    fn wide_logo_is_letterboxed() {
        let thumb = render_thumbnail(&logo(100, 50), 64);
        assert_eq!(thumb.dimensions(), (64, 64));
        assert!(thumb.get_pixel(32, 32)[3] > 200);
        assert_eq!(thumb.get_pixel(32, 2)[3], 0);
    }

    #[test]
    fn synthesize_writes_png() {
        let tmp = TempDir::new().unwrap();
        let logo_path = tmp.path().join("gams.png");
        logo(40, 40).save(&logo_path).unwrap();

        let out = tmp.path().join("img").join("slope.png");
        synthesize_thumbnail(&logo_path, &out, 32).unwrap();
        let written = image::open(&out).unwrap();
        assert_eq!((written.width(), written.height()), (32, 32));
    }

    #[test]
    fn missing_logo_is_image_error() {
        let tmp = TempDir::new().unwrap();
        let err = synthesize_thumbnail(
            &tmp.path().join("missing.png"),
            &tmp.path().join("out.png"),
            32,
        )
        .unwrap_err();
        assert!(matches!(err, GamsError::Image { .. }));
    }

    #[test]
    fn bytes_are_reencoded_by_extension() {
        let tmp = TempDir::new().unwrap();
        let mut png = Vec::new();
        logo(8, 8)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let out = tmp.path().join("cover.jpg");
        save_image_bytes(&png, &out).unwrap();
        assert_eq!(image::ImageFormat::from_path(&out).unwrap(), image::ImageFormat::Jpeg);
        assert_eq!(image::open(&out).unwrap().width(), 8);

        assert!(save_image_bytes(b"not an image", &tmp.path().join("x.png")).is_err());
    }
}
