//! Page units shared by the viewport fit calculator and the export backend.
//!
//! Everything is anchored on the 96dpi CSS baseline: `1mm = 3.7795px`.
//! The export backend converts CSS px to PDF points with `PX_TO_PT` (72 / 96).

/// CSS pixels per millimetre at 96dpi.
pub const MM_TO_PX: f32 = 3.7795;

/// PDF points per CSS pixel.
pub const PX_TO_PT: f32 = 0.75;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// A4 page width in CSS px (≈ 793.7px).
pub fn page_width_px() -> f32 {
    A4_WIDTH_MM * MM_TO_PX
}

/// A4 page height in CSS px (≈ 1122.5px).
pub fn page_height_px() -> f32 {
    A4_HEIGHT_MM * MM_TO_PX
}

pub fn px_to_pt(px: f32) -> f32 {
    px * PX_TO_PT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_width_px_matches_a4() {
        assert!((page_width_px() - 793.695).abs() < 1e-3);
    }

    #[test]
    fn test_page_aspect_ratio_is_a4() {
        let ratio = page_height_px() / page_width_px();
        assert!((ratio - 297.0 / 210.0).abs() < 1e-5);
    }

    #[test]
    fn test_px_to_pt_gives_a4_points() {
        // A4 in PDF points is 595.28 × 841.89
        assert!((px_to_pt(page_width_px()) - 595.27).abs() < 0.05);
        assert!((px_to_pt(page_height_px()) - 841.89).abs() < 0.05);
    }
}
