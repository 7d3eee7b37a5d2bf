//! Format and version information: BCH-protected metadata cells.

use crate::models::{ECLevel, MaskPattern, ModuleMatrix, Version};

/// Compute the 15 format bits for a level/mask pairing: 5 data bits,
/// 10 BCH remainder bits, XOR-masked so the field is never all zero.
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    let data = u32::from(ec_level.format_bits()) << 3 | u32::from(mask.value());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10) | rem) ^ 0x5412
}

/// Draw both format information copies and the dark module.
///
/// Cells were tagged `Role::Format` during function pattern placement;
/// this pass only writes their colors, so it can run once per mask
/// candidate without re-deriving the layout.
pub fn draw_format_info(matrix: &mut ModuleMatrix, ec_level: ECLevel, mask: MaskPattern) {
    let bits = format_bits(ec_level, mask);
    let bit = |i: u32| bits >> i & 1 != 0;
    let side = matrix.side();

    // First copy, around the top-left finder.
    for i in 0..6 {
        matrix.set(8, i as usize, bit(i));
    }
    matrix.set(8, 7, bit(6));
    matrix.set(8, 8, bit(7));
    matrix.set(7, 8, bit(8));
    for i in 9..15 {
        matrix.set(14 - i as usize, 8, bit(i));
    }

    // Second copy, split between the other two finders.
    for i in 0..8 {
        matrix.set(side - 1 - i as usize, 8, bit(i));
    }
    for i in 8..15 {
        matrix.set(8, side - 15 + i as usize, bit(i));
    }
    matrix.set(8, side - 8, true);
}

/// Compute the 18 version bits (versions 7+): 6 data bits plus a
/// 12-bit BCH remainder.
pub fn version_bits(version: Version) -> u32 {
    let data = u32::from(version.number());
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
    }
    (data << 12) | rem
}

/// Draw both version information blocks for versions 7 and up.
pub fn draw_version_info(matrix: &mut ModuleMatrix, version: Version) {
    debug_assert!(version.number() >= 7);
    let bits = version_bits(version);
    let side = matrix.side();
    for i in 0..18u32 {
        let dark = bits >> i & 1 != 0;
        let a = side - 11 + (i % 3) as usize;
        let b = (i / 3) as usize;
        matrix.set(a, b, dark);
        matrix.set(b, a, dark);
    }
}
