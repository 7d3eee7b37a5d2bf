//! Raster output: module grid to RGBA pixels and PNG bytes.

use std::io::Cursor;

use image::{imageops, ImageOutputFormat, Rgba, RgbaImage};

use crate::error::GenerateError;
use crate::models::QrSymbol;
use crate::render::logo::{Excavation, Logo};

/// Opaque render color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Dark-module default, lime green.
    pub const LIME: Rgb = Rgb::new(0x32, 0xCD, 0x32);
    /// Light-module default, near-black.
    pub const DARK_GRAY: Rgb = Rgb::new(0x1E, 0x1E, 0x1E);
    /// Plain black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Plain white.
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    fn pixel(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 0xFF])
    }
}

/// Rendered symbol image.
pub struct RasterImage {
    image: RgbaImage,
}

impl RasterImage {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the RGBA pixel buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, GenerateError> {
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(self.image.clone())
            .write_to(&mut bytes, ImageOutputFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

/// Largest accepted pixels-per-module value.
pub const MAX_MODULE_PIXELS: u32 = 64;
/// Largest accepted quiet-zone width, in modules.
pub const MAX_QUIET_ZONE: u32 = 64;

/// Render a symbol to pixels: dark modules in `fg`, everything else
/// (light modules, excavated window, quiet zone) in `bg`, then the
/// optional logo composited over the excavation window.
///
/// `module_pixels` is clamped to 1..=64 and `quiet_zone` to at most 64
/// modules; with the 177-module version cap this keeps every pixel
/// coordinate well inside `u32`.
pub fn render(
    symbol: &QrSymbol,
    fg: Rgb,
    bg: Rgb,
    module_pixels: u32,
    quiet_zone: u32,
    logo: Option<(&Logo, &Excavation)>,
) -> RasterImage {
    let module_pixels = module_pixels.clamp(1, MAX_MODULE_PIXELS);
    let quiet_zone = quiet_zone.min(MAX_QUIET_ZONE);
    let side = symbol.side() as u32;
    let dim = (side + 2 * quiet_zone) * module_pixels;
    let mut image = RgbaImage::from_pixel(dim, dim, bg.pixel());

    let fg_pixel = fg.pixel();
    for y in 0..symbol.side() {
        for x in 0..symbol.side() {
            if !symbol.matrix().get(x, y) {
                continue;
            }
            let px0 = (quiet_zone + x as u32) * module_pixels;
            let py0 = (quiet_zone + y as u32) * module_pixels;
            for py in py0..py0 + module_pixels {
                for px in px0..px0 + module_pixels {
                    image.put_pixel(px, py, fg_pixel);
                }
            }
        }
    }

    if let Some((logo, excavation)) = logo {
        composite_logo(&mut image, logo, excavation, module_pixels, quiet_zone);
    }

    RasterImage { image }
}

/// Scale the logo into the excavation window and alpha-blend it over
/// the background, centered on both axes.
fn composite_logo(
    image: &mut RgbaImage,
    logo: &Logo,
    excavation: &Excavation,
    module_pixels: u32,
    quiet_zone: u32,
) {
    let window_px = excavation.side as u32 * module_pixels;
    let (w, h) = logo.fit_within(window_px);
    let scaled = imageops::resize(logo.image(), w, h, imageops::FilterType::Triangle);

    let base_x = (quiet_zone + excavation.x as u32) * module_pixels + (window_px - w) / 2;
    let base_y = (quiet_zone + excavation.y as u32) * module_pixels + (window_px - h) / 2;
    for (lx, ly, pixel) in scaled.enumerate_pixels() {
        let under = *image.get_pixel(base_x + lx, base_y + ly);
        image.put_pixel(base_x + lx, base_y + ly, blend_over(*pixel, under));
    }
}

/// Source-over blend of a translucent pixel onto an opaque one.
fn blend_over(over: Rgba<u8>, under: Rgba<u8>) -> Rgba<u8> {
    let a = u32::from(over[3]);
    let channel = |o: u8, u: u8| {
        ((u32::from(o) * a + u32::from(u) * (255 - a) + 127) / 255) as u8
    };
    Rgba([
        channel(over[0], under[0]),
        channel(over[1], under[1]),
        channel(over[2], under[2]),
        0xFF,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::logo::excavate;
    use crate::symbol::build_symbol;

    #[test]
    fn test_render_dimensions() {
        let symbol = build_symbol("HELLO").unwrap();
        let image = render(&symbol, Rgb::BLACK, Rgb::WHITE, 8, 4, None);
        // Version 1: (21 + 2*4) * 8 pixels per side.
        assert_eq!(image.width(), 232);
        assert_eq!(image.height(), 232);
    }

    #[test]
    fn test_quiet_zone_is_background() {
        let symbol = build_symbol("HELLO").unwrap();
        let image = render(&symbol, Rgb::LIME, Rgb::DARK_GRAY, 4, 4, None);
        let bg = Rgb::DARK_GRAY.pixel();
        let rgba = image.as_rgba();
        let dim = image.width();
        for i in 0..dim {
            assert_eq!(*rgba.get_pixel(i, 0), bg);
            assert_eq!(*rgba.get_pixel(0, i), bg);
            assert_eq!(*rgba.get_pixel(i, dim - 1), bg);
            assert_eq!(*rgba.get_pixel(dim - 1, i), bg);
        }
    }

    #[test]
    fn test_module_colors() {
        let symbol = build_symbol("HELLO").unwrap();
        let image = render(&symbol, Rgb::LIME, Rgb::DARK_GRAY, 4, 2, None);
        // Finder corner module (0, 0) is dark; its pixel block starts
        // past the quiet zone.
        assert_eq!(*image.as_rgba().get_pixel(8, 8), Rgb::LIME.pixel());
        // Separator module (7, 7) is light.
        assert_eq!(
            *image.as_rgba().get_pixel(8 + 7 * 4, 8 + 7 * 4),
            Rgb::DARK_GRAY.pixel()
        );
    }

    #[test]
    fn test_extreme_sizes_are_clamped() {
        let symbol = build_symbol("HELLO").unwrap();
        // Oversized pixel scale clamps to 64 per module.
        let image = render(&symbol, Rgb::BLACK, Rgb::WHITE, u32::MAX, 0, None);
        assert_eq!(image.width(), 21 * MAX_MODULE_PIXELS);
        // Oversized quiet zone clamps to 64 modules per edge.
        let image = render(&symbol, Rgb::BLACK, Rgb::WHITE, 1, u32::MAX, None);
        assert_eq!(image.width(), 21 + 2 * MAX_QUIET_ZONE);
    }

    #[test]
    fn test_png_bytes_have_signature() {
        let symbol = build_symbol("HELLO").unwrap();
        let png = render(&symbol, Rgb::BLACK, Rgb::WHITE, 4, 4, None)
            .to_png()
            .unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']);
    }

    #[test]
    fn test_blend_over() {
        let opaque = blend_over(Rgba([200, 100, 50, 255]), Rgba([0, 0, 0, 255]));
        assert_eq!(opaque, Rgba([200, 100, 50, 255]));
        let clear = blend_over(Rgba([200, 100, 50, 0]), Rgba([1, 2, 3, 255]));
        assert_eq!(clear, Rgba([1, 2, 3, 255]));
        let half = blend_over(Rgba([255, 255, 255, 128]), Rgba([0, 0, 0, 255]));
        assert_eq!(half[0], 128);
    }

    #[test]
    fn test_logo_composited_inside_window() {
        let mut symbol = build_symbol("https://qrcode.gomes.lol").unwrap();
        let excavation = excavate(&mut symbol, 0.3).unwrap();

        let red = RgbaImage::from_pixel(32, 32, Rgba([255, 0, 0, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(red)
            .write_to(&mut bytes, ImageOutputFormat::Png)
            .unwrap();
        let logo = Logo::from_bytes(&bytes.into_inner()).unwrap();

        let module_pixels = 4;
        let quiet_zone = 2;
        let image = render(
            &symbol,
            Rgb::BLACK,
            Rgb::WHITE,
            module_pixels,
            quiet_zone,
            Some((&logo, &excavation)),
        );
        // Center of the excavation window shows the logo.
        let cx = (quiet_zone as usize + excavation.x + excavation.side / 2) as u32 * module_pixels;
        let cy = (quiet_zone as usize + excavation.y + excavation.side / 2) as u32 * module_pixels;
        assert_eq!(*image.as_rgba().get_pixel(cx, cy), Rgba([255, 0, 0, 255]));
        // The quiet zone stays untouched.
        assert_eq!(*image.as_rgba().get_pixel(0, 0), Rgb::WHITE.pixel());
    }
}
