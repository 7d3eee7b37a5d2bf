//! Logo overlay: decoding, module excavation and aspect-preserving fit.

use image::RgbaImage;

use crate::error::GenerateError;
use crate::models::{QrSymbol, Role};

/// Largest share of modules the excavation window may cover.
const MAX_EXCAVATED_FRACTION: f64 = 0.30;

/// Decoded logo image, kept in RGBA for compositing.
#[derive(Debug, Clone)]
pub struct Logo {
    image: RgbaImage,
}

impl Logo {
    /// Decode logo bytes in any raster format the `image` crate
    /// recognizes by content sniffing (PNG, JPEG, GIF, ...).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GenerateError> {
        let image = image::load_from_memory(bytes)
            .map_err(|_| GenerateError::UnsupportedFormat)?
            .to_rgba8();
        Ok(Self { image })
    }

    /// Pixel dimensions of the decoded logo.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub(crate) fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Scale dimensions to fit a square window, preserving aspect
    /// ratio: the longer side fills the window, the shorter side is
    /// rounded to the nearest pixel (at least one).
    pub fn fit_within(&self, window_px: u32) -> (u32, u32) {
        let (w, h) = self.image.dimensions();
        let (long, short) = (w.max(h), w.min(h));
        let scaled_short = ((u64::from(window_px) * u64::from(short) + u64::from(long) / 2)
            / u64::from(long)) as u32;
        let scaled_short = scaled_short.max(1);
        if w >= h {
            (window_px, scaled_short)
        } else {
            (scaled_short, window_px)
        }
    }
}

/// Cleared square window at the symbol center, in module coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Excavation {
    /// Left edge of the window.
    pub x: usize,
    /// Top edge of the window.
    pub y: usize,
    /// Window side length in modules.
    pub side: usize,
}

/// Clear a centered square of modules to host the logo.
///
/// The requested window is `ceil(side * fraction)` modules, capped so
/// the cleared area never exceeds 30% of the symbol. Level-H error
/// correction tolerates that loss. Returns None when the fraction
/// yields no window at all.
pub fn excavate(symbol: &mut QrSymbol, fraction: f32) -> Option<Excavation> {
    if !(fraction > 0.0) {
        return None;
    }
    let side = symbol.side();
    let cap = (MAX_EXCAVATED_FRACTION.sqrt() * side as f64).floor() as usize;
    let requested = (f64::from(fraction) * side as f64).ceil() as usize;
    let window = requested.min(cap);
    if window == 0 {
        return None;
    }

    let origin = (side - window) / 2;
    let matrix = symbol.matrix_mut();
    for y in origin..origin + window {
        for x in origin..origin + window {
            matrix.set(x, y, false);
            matrix.set_role(x, y, Role::Excavated);
        }
    }
    debug_assert!(f64::from(symbol.excavated_fraction()) <= MAX_EXCAVATED_FRACTION);
    Some(Excavation {
        x: origin,
        y: origin,
        side: window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::build_symbol;
    use image::ImageOutputFormat;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut bytes, ImageOutputFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(matches!(
            Logo::from_bytes(b"not an image"),
            Err(GenerateError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_from_bytes_decodes_png() {
        let logo = Logo::from_bytes(&png_bytes(16, 8)).unwrap();
        assert_eq!(logo.dimensions(), (16, 8));
    }

    #[test]
    fn test_fit_preserves_aspect() {
        // 2:1 landscape into an 88px window.
        let logo = Logo::from_bytes(&png_bytes(200, 100)).unwrap();
        assert_eq!(logo.fit_within(88), (88, 44));
        // Portrait flips the long axis.
        let logo = Logo::from_bytes(&png_bytes(100, 200)).unwrap();
        assert_eq!(logo.fit_within(88), (44, 88));
        // Square fills the window.
        let logo = Logo::from_bytes(&png_bytes(64, 64)).unwrap();
        assert_eq!(logo.fit_within(88), (88, 88));
    }

    #[test]
    fn test_fit_never_collapses_to_zero() {
        let logo = Logo::from_bytes(&png_bytes(500, 1)).unwrap();
        assert_eq!(logo.fit_within(10), (10, 1));
    }

    #[test]
    fn test_excavation_centered_and_capped() {
        let mut symbol = build_symbol("https://qrcode.gomes.lol").unwrap();
        let side = symbol.side();
        let excavation = excavate(&mut symbol, 0.9).unwrap();
        // A 0.9 request is clamped so the cleared area stays at or
        // under 30% of the modules.
        assert!(symbol.excavated_fraction() <= 0.30);
        assert!(excavation.side < side);
        assert_eq!(excavation.x, (side - excavation.side) / 2);
        assert_eq!(excavation.x, excavation.y);
        assert_eq!(
            symbol.matrix().count_role(Role::Excavated),
            excavation.side * excavation.side
        );
    }

    #[test]
    fn test_excavated_modules_render_light() {
        let mut symbol = build_symbol("HELLO WORLD").unwrap();
        let excavation = excavate(&mut symbol, 0.3).unwrap();
        for y in excavation.y..excavation.y + excavation.side {
            for x in excavation.x..excavation.x + excavation.side {
                assert!(!symbol.matrix().get(x, y));
                assert_eq!(symbol.matrix().role(x, y), Role::Excavated);
            }
        }
    }

    #[test]
    fn test_zero_fraction_is_noop() {
        let mut symbol = build_symbol("HELLO").unwrap();
        assert_eq!(excavate(&mut symbol, 0.0), None);
        assert_eq!(excavate(&mut symbol, -1.0), None);
        assert_eq!(symbol.matrix().count_role(Role::Excavated), 0);
    }
}
