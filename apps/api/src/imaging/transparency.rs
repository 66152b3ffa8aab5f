//! Corner-sample chroma key.
//!
//! The pixel at (0, 0) is taken as the background color. Every pixel whose
//! R, G and B each differ from it by less than the threshold gets alpha 0;
//! everything else is left exactly as it was. This assumes a uniform
//! background visible in the top-left corner. JPEG artifacts and anti-aliased
//! edges leave speckles and halos.

use std::io::Cursor;

use base64::Engine as _;
use image::{ImageFormat, ImageReader, RgbaImage};
use thiserror::Error;

use crate::document::model::{CvDocument, ProfileImage};
use crate::errors::AppError;

pub const DEFAULT_THRESHOLD: u8 = 30;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("image has no pixels")]
    Empty,

    #[error("image could not be decoded: {0}")]
    Decode(String),

    #[error("image is {pixels} pixels, limit is {limit}")]
    TooLarge { pixels: u64, limit: u64 },

    #[error("image could not be encoded: {0}")]
    Encode(String),

    #[error("document has no profile image")]
    NoProfileImage,
}

impl From<FilterError> for AppError {
    fn from(e: FilterError) -> Self {
        match e {
            FilterError::TooLarge { .. } => AppError::PayloadTooLarge(e.to_string()),
            FilterError::NoProfileImage => AppError::Validation(e.to_string()),
            _ => AppError::ImageProcessing(e.to_string()),
        }
    }
}

/// Returns a copy of `image` with the background keyed out.
pub fn remove_background(image: &RgbaImage, threshold: u8) -> Result<RgbaImage, FilterError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(FilterError::Empty);
    }
    let sample = *image.get_pixel(0, 0);
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let close = pixel.0[..3]
            .iter()
            .zip(&sample.0[..3])
            .all(|(c, s)| c.abs_diff(*s) < threshold);
        if close {
            pixel.0[3] = 0;
        }
    }
    Ok(out)
}

/// Decodes raster bytes, refusing images above `max_pixels` before decoding.
pub fn decode_capped(bytes: &[u8], max_pixels: u64) -> Result<RgbaImage, FilterError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| FilterError::Decode(e.to_string()))?;
    let (w, h) = reader
        .into_dimensions()
        .map_err(|e| FilterError::Decode(e.to_string()))?;
    let pixels = u64::from(w) * u64::from(h);
    if pixels > max_pixels {
        return Err(FilterError::TooLarge {
            pixels,
            limit: max_pixels,
        });
    }
    let decoded = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| FilterError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| FilterError::Decode(e.to_string()))?;
    Ok(decoded.to_rgba8())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, FilterError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| FilterError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Raster bytes in, keyed PNG bytes out.
pub fn apply_transparency(bytes: &[u8], threshold: u8, max_pixels: u64) -> Result<Vec<u8>, FilterError> {
    let image = decode_capped(bytes, max_pixels)?;
    let keyed = remove_background(&image, threshold)?;
    encode_png(&keyed)
}

pub fn png_data_url(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

/// Turns transparency on for the document's profile image, given the image's
/// current bytes. The input document is never modified; on failure the caller
/// still holds the untouched original with the flag off.
pub fn enable_on_document(
    doc: &CvDocument,
    image_bytes: &[u8],
    threshold: u8,
    max_pixels: u64,
) -> Result<CvDocument, FilterError> {
    let current = doc
        .personal_info
        .profile_image
        .as_ref()
        .ok_or(FilterError::NoProfileImage)?;
    let png = apply_transparency(image_bytes, threshold, max_pixels)?;
    let mut updated = doc.clone();
    updated.set_profile_image(Some(ProfileImage {
        url: png_data_url(&png),
        is_transparent: true,
        ..current.clone()
    }));
    Ok(updated)
}

/// Turns transparency off, restoring `original_url` when the host kept it.
pub fn disable_on_document(
    doc: &CvDocument,
    original_url: Option<&str>,
) -> Result<CvDocument, FilterError> {
    let current = doc
        .personal_info
        .profile_image
        .as_ref()
        .ok_or(FilterError::NoProfileImage)?;
    let mut updated = doc.clone();
    updated.set_profile_image(Some(ProfileImage {
        url: original_url
            .map(str::to_string)
            .unwrap_or_else(|| current.url.clone()),
        is_transparent: false,
        ..current.clone()
    }));
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    const C: [u8; 4] = [240, 240, 240, 255];
    const D: [u8; 4] = [30, 60, 120, 255];

    /// Background `C` with a `D` square in the middle.
    fn portrait() -> RgbaImage {
        RgbaImage::from_fn(20, 20, |x, y| {
            if (5..15).contains(&x) && (5..15).contains(&y) {
                Rgba(D)
            } else {
                Rgba(C)
            }
        })
    }

    fn doc_with_image(url: &str) -> CvDocument {
        let mut doc = CvDocument::empty();
        doc.personal_info.profile_image = Some(ProfileImage {
            url: url.to_string(),
            show_frame: true,
            ..Default::default()
        });
        doc
    }

    #[test]
    fn test_corner_region_keyed_foreground_untouched() {
        let out = remove_background(&portrait(), DEFAULT_THRESHOLD).unwrap();
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(19, 19).0[3], 0);
        assert_eq!(*out.get_pixel(10, 10), Rgba(D));
        // Keyed pixels keep their color.
        assert_eq!(&out.get_pixel(0, 0).0[..3], &C[..3]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([100, 100, 100, 255])
            } else {
                Rgba([130, 100, 100, 255])
            }
        });
        let out = remove_background(&img, 30).unwrap();
        assert_eq!(out.get_pixel(1, 0).0[3], 255, "distance 30 is not below 30");
        let out = remove_background(&img, 31).unwrap();
        assert_eq!(out.get_pixel(1, 0).0[3], 0);
    }

    #[test]
    fn test_one_channel_far_keeps_pixel() {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([10, 10, 10, 255])
            } else {
                Rgba([10, 10, 200, 128])
            }
        });
        let out = remove_background(&img, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(*out.get_pixel(1, 0), Rgba([10, 10, 200, 128]));
    }

    #[test]
    fn test_empty_image_is_an_error() {
        assert!(matches!(
            remove_background(&RgbaImage::new(0, 0), DEFAULT_THRESHOLD),
            Err(FilterError::Empty)
        ));
    }

    #[test]
    fn test_apply_round_trips_through_png() {
        let png = encode_png(&portrait()).unwrap();
        let keyed = apply_transparency(&png, DEFAULT_THRESHOLD, 1_000).unwrap();
        let decoded = image::load_from_memory(&keyed).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
        assert_eq!(decoded.get_pixel(10, 10).0[3], 255);
    }

    #[test]
    fn test_pixel_cap_checked_before_decode() {
        let png = encode_png(&portrait()).unwrap();
        assert!(matches!(
            apply_transparency(&png, DEFAULT_THRESHOLD, 399),
            Err(FilterError::TooLarge { pixels: 400, limit: 399 })
        ));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(matches!(
            apply_transparency(b"definitely not a picture", DEFAULT_THRESHOLD, 1_000),
            Err(FilterError::Decode(_))
        ));
    }

    #[test]
    fn test_enable_replaces_url_and_keeps_frame_settings() {
        let doc = doc_with_image("https://cdn.example.se/anna.jpg");
        let png = encode_png(&portrait()).unwrap();
        let updated = enable_on_document(&doc, &png, DEFAULT_THRESHOLD, 1_000).unwrap();
        let image = updated.personal_info.profile_image.unwrap();
        assert!(image.is_transparent);
        assert!(image.show_frame);
        assert!(image.url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_failed_enable_leaves_document_untouched() {
        let doc = doc_with_image("https://cdn.example.se/anna.jpg");
        let before = doc.clone();
        assert!(enable_on_document(&doc, b"broken", DEFAULT_THRESHOLD, 1_000).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_disable_restores_original_url() {
        let doc = doc_with_image("data:image/png;base64,AAAA");
        let updated = disable_on_document(&doc, Some("https://cdn.example.se/anna.jpg")).unwrap();
        let image = updated.personal_info.profile_image.unwrap();
        assert!(!image.is_transparent);
        assert_eq!(image.url, "https://cdn.example.se/anna.jpg");
    }

    #[test]
    fn test_no_profile_image_maps_to_validation() {
        let err = disable_on_document(&CvDocument::empty(), None).unwrap_err();
        assert!(matches!(AppError::from(err), AppError::Validation(_)));
    }
}
