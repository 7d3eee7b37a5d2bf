//! High-level generation front end tying the pipeline stages together.

use crate::error::GenerateError;
use crate::render::{excavate, render, Logo, RasterImage, Rgb};
use crate::symbol::build_symbol;

/// Configurable QR generator.
///
/// Holds render settings and an optional logo; `generate` runs the
/// whole pipeline for one input text. The same generator can be reused
/// across inputs.
#[derive(Debug, Clone)]
pub struct Generator {
    fg: Rgb,
    bg: Rgb,
    module_pixels: u32,
    quiet_zone: u32,
    logo: Option<Logo>,
    logo_fraction: f32,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            fg: Rgb::LIME,
            bg: Rgb::DARK_GRAY,
            module_pixels: 8,
            quiet_zone: 4,
            logo: None,
            logo_fraction: 0.3,
        }
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dark-module color.
    pub fn foreground(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Light-module and quiet-zone color.
    pub fn background(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Pixels per module. Zero is bumped to one; rendering clamps to
    /// 64 at the top end.
    pub fn module_pixels(mut self, px: u32) -> Self {
        self.module_pixels = px.max(1);
        self
    }

    /// Quiet-zone width in modules. Rendering clamps to 64.
    pub fn quiet_zone(mut self, modules: u32) -> Self {
        self.quiet_zone = modules;
        self
    }

    /// Logo composited over the symbol center.
    pub fn logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Linear size of the logo window as a fraction of the symbol
    /// side. Clamped during excavation so the cleared area stays
    /// within the error-correction margin.
    pub fn logo_fraction(mut self, fraction: f32) -> Self {
        self.logo_fraction = fraction;
        self
    }

    /// Run the pipeline: encode, build the symbol, excavate for the
    /// logo if one is set, and render to pixels.
    pub fn generate(&self, text: &str) -> Result<RasterImage, GenerateError> {
        let mut symbol = build_symbol(text)?;

        let excavation = match &self.logo {
            Some(_) => excavate(&mut symbol, self.logo_fraction),
            None => None,
        };
        #[cfg(debug_assertions)]
        if let Some(excavation) = &excavation {
            eprintln!(
                "excavated {}x{} window at ({}, {}), {:.1}% of modules",
                excavation.side,
                excavation.side,
                excavation.x,
                excavation.y,
                symbol.excavated_fraction() * 100.0
            );
        }
        let overlay = match (&self.logo, &excavation) {
            (Some(logo), Some(excavation)) => Some((logo, excavation)),
            _ => None,
        };

        Ok(render(
            &symbol,
            self.fg,
            self.bg,
            self.module_pixels,
            self.quiet_zone,
            overlay,
        ))
    }

    /// Shorthand for `generate` followed by PNG encoding.
    pub fn generate_png(&self, text: &str) -> Result<Vec<u8>, GenerateError> {
        self.generate(text)?.to_png()
    }
}

/// One-shot generation with custom colors and default layout.
pub fn generate(text: &str, fg: Rgb, bg: Rgb) -> Result<Vec<u8>, GenerateError> {
    Generator::new().foreground(fg).background(bg).generate_png(text)
}
