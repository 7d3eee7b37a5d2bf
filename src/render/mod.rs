//! Rendering: logo handling and raster output.

pub mod logo;
pub mod raster;

pub use logo::{excavate, Excavation, Logo};
pub use raster::{render, RasterImage, Rgb};
