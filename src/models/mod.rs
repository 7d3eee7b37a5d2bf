pub mod matrix;
pub mod symbol;

pub use matrix::{ModuleMatrix, Role};
pub use symbol::{ECLevel, MaskPattern, QrSymbol, Version};
