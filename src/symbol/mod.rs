//! Symbol construction: function patterns, codeword placement, masking
//! and the version-selection entry point.

pub mod builder;
pub mod format;
pub mod function_patterns;
pub mod masking;
pub mod placement;

pub use builder::build_symbol;
