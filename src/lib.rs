//! QR code generation: text in, styled PNG out.
//!
//! The pipeline encodes text into mode segments, appends Reed-Solomon
//! error correction at level H, lays the codewords onto a Model 2
//! module grid, selects the lowest-penalty mask, optionally clears a
//! centered window for a logo overlay, and renders the result to RGBA
//! pixels or PNG bytes.
//!
//! ```no_run
//! use qrsmith::{Generator, Rgb};
//!
//! let png = Generator::new()
//!     .foreground(Rgb::new(0x32, 0xCD, 0x32))
//!     .background(Rgb::new(0x1E, 0x1E, 0x1E))
//!     .generate_png("https://qrcode.gomes.lol")?;
//! # Ok::<(), qrsmith::GenerateError>(())
//! ```

pub mod encoder;
pub mod error;
pub mod generator;
pub mod models;
pub mod render;
pub mod symbol;

pub use error::GenerateError;
pub use generator::{generate, Generator};
pub use models::{ECLevel, MaskPattern, ModuleMatrix, QrSymbol, Role, Version};
pub use render::{excavate, render, Excavation, Logo, RasterImage, Rgb};
pub use symbol::build_symbol;

/// Longest accepted input, in characters.
pub const MAX_TEXT_LEN: usize = 500;
