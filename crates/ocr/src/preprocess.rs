use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to rasterize PDF: {0}")]
    Convert(String),
    #[error("PDF input requires a build with the `pdf` feature")]
    PdfSupport,
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Contrast factor applied around the image mean.
const CONTRAST_FACTOR: f32 = 3.0;

/// Centre-heavy 3×3 sharpen kernel; weights sum to one.
const SHARPEN_KERNEL: [f32; 9] = [
    -0.125, -0.125, -0.125,
    -0.125, 2.0, -0.125,
    -0.125, -0.125, -0.125,
];

/// Load a receipt document, normalize it, and return PNG bytes ready for the
/// OCR backend.
pub fn prepare_for_ocr(path: &Path) -> Result<Vec<u8>, PreprocessError> {
    let img = load_document(path)?;
    encode_as_png(normalize(img))
}

/// Load a receipt document as a raster image. A PDF input is rasterized
/// from its first page only; later pages are ignored.
pub fn load_document(path: &Path) -> Result<DynamicImage, PreprocessError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    if ext.as_deref() == Some("pdf") {
        rasterize_first_page(path)
    } else {
        Ok(image::open(path)?)
    }
}

/// Grayscale → 2× upscale → contrast boost → sharpen. The registration
/// forms use small print; recognition accuracy depends on this pass.
pub fn normalize(img: DynamicImage) -> GrayImage {
    let gray = img.to_luma8();

    let (w, h) = gray.dimensions();
    let upscaled =
        image::imageops::resize(&gray, w * 2, h * 2, image::imageops::FilterType::Lanczos3);

    let contrasted = boost_contrast(&upscaled, CONTRAST_FACTOR);

    image::imageops::filter3x3(&contrasted, &SHARPEN_KERNEL)
}

/// Push pixel values away from the image mean by a fixed factor, clamped to
/// the 8-bit range.
fn boost_contrast(img: &GrayImage, factor: f32) -> GrayImage {
    let count = (u64::from(img.width()) * u64::from(img.height())).max(1);
    let sum: u64 = img.pixels().map(|p| u64::from(p[0])).sum();
    let mean = (sum / count) as f32;

    ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
        let p = f32::from(img.get_pixel(x, y)[0]);
        let v = mean + (p - mean) * factor;
        Luma([v.clamp(0.0, 255.0) as u8])
    })
}

fn encode_as_png(img: GrayImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}

// ── PDF rasterization (optional, gated behind `pdf` feature) ─────────────────

/// Rasterization resolution. Receipts are letter-size forms; 400 DPI keeps
/// small print legible after the OCR upscale.
#[cfg(feature = "pdf")]
const PDF_RASTER_DPI: f32 = 400.0;

#[cfg(feature = "pdf")]
fn rasterize_first_page(path: &Path) -> Result<DynamicImage, PreprocessError> {
    use pdfium_render::prelude::*;

    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| PreprocessError::Convert(e.to_string()))?;
    let pdfium = Pdfium::new(bindings);
    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| PreprocessError::Convert(e.to_string()))?;
    let page = document
        .pages()
        .first()
        .map_err(|e| PreprocessError::Convert(e.to_string()))?;
    let config = PdfRenderConfig::new().scale_page_by_factor(PDF_RASTER_DPI / 72.0);
    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| PreprocessError::Convert(e.to_string()))?;
    Ok(bitmap.as_image())
}

#[cfg(not(feature = "pdf"))]
fn rasterize_first_page(_path: &Path) -> Result<DynamicImage, PreprocessError> {
    Err(PreprocessError::PdfSupport)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_gray(width: u32, height: u32, value: u8) -> DynamicImage {
        let img: GrayImage = ImageBuffer::from_fn(width, height, |_, _| Luma([value]));
        DynamicImage::ImageLuma8(img)
    }

    fn gradient_gray(width: u32, height: u32) -> GrayImage {
        ImageBuffer::from_fn(width, height, |x, _| Luma([(x * 255 / width) as u8]))
    }

    #[test]
    fn normalize_doubles_dimensions() {
        let result = normalize(solid_gray(10, 8, 128));
        assert_eq!(result.dimensions(), (20, 16));
    }

    #[test]
    fn normalize_uniform_image_does_not_panic() {
        let result = normalize(solid_gray(4, 4, 200));
        assert_eq!(result.dimensions(), (8, 8));
    }

    #[test]
    fn contrast_pushes_gradient_to_extremes() {
        let boosted = boost_contrast(&gradient_gray(64, 1), CONTRAST_FACTOR);
        let min = boosted.pixels().map(|p| p[0]).min().unwrap();
        let max = boosted.pixels().map(|p| p[0]).max().unwrap();
        assert_eq!(min, 0);
        assert_eq!(max, 255);
    }

    #[test]
    fn contrast_keeps_uniform_image_uniform() {
        let flat: GrayImage = ImageBuffer::from_fn(8, 8, |_, _| Luma([90u8]));
        let boosted = boost_contrast(&flat, CONTRAST_FACTOR);
        assert!(boosted.pixels().all(|p| p[0] == 90));
    }

    #[test]
    fn sharpen_kernel_preserves_brightness() {
        let sum: f32 = SHARPEN_KERNEL.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn prepare_for_ocr_produces_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        solid_gray(6, 6, 100).save(&path).unwrap();

        let bytes = prepare_for_ocr(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn undecodable_image_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(matches!(
            prepare_for_ocr(&path),
            Err(PreprocessError::Load(_))
        ));
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn pdf_without_feature_reports_missing_support() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        assert!(matches!(
            load_document(&path),
            Err(PreprocessError::PdfSupport)
        ));
    }
}
