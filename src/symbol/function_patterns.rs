//! Function pattern placement: finders, separators, timing, alignment,
//! and the reserved format/version cells.

use crate::encoder::tables;
use crate::models::{ModuleMatrix, Role, Version};

/// Draw all function patterns and reserve the format/version cells.
///
/// After this pass every module still tagged `Role::Data` belongs to the
/// codeword region, and their count equals `tables::raw_data_modules`.
pub fn place(matrix: &mut ModuleMatrix, version: Version) {
    let side = matrix.side();
    debug_assert_eq!(side, version.side());

    draw_finders(matrix);
    draw_alignment(matrix, version);
    draw_timing(matrix);
    reserve_format(matrix);
    if version.number() >= 7 {
        reserve_version_info(matrix);
    }

    debug_assert_eq!(
        matrix.count_role(Role::Data),
        tables::raw_data_modules(version)
    );
}

/// Finder patterns plus their one-module separators at three corners.
fn draw_finders(matrix: &mut ModuleMatrix) {
    let side = matrix.side() as i32;
    for (cx, cy) in [(3, 3), (side - 4, 3), (3, side - 4)] {
        for dy in -4..=4i32 {
            for dx in -4..=4i32 {
                let x = cx + dx;
                let y = cy + dy;
                if x < 0 || y < 0 || x >= side || y >= side {
                    continue;
                }
                // Rings at distance 2 (inner) and 4 (separator) are
                // light, everything else is dark.
                let dist = dx.abs().max(dy.abs());
                matrix.set(x as usize, y as usize, dist != 2 && dist != 4);
                matrix.set_role(x as usize, y as usize, Role::Function);
            }
        }
    }
}

/// 5x5 alignment patterns at the version's center grid, skipping the
/// three positions covered by finder corners.
fn draw_alignment(matrix: &mut ModuleMatrix, version: Version) {
    let side = matrix.side();
    let positions = tables::alignment_positions(version);
    for &cy in positions {
        for &cx in positions {
            let in_corner = (cx == 6 && cy == 6)
                || (cx == 6 && cy == side - 7)
                || (cx == side - 7 && cy == 6);
            if in_corner {
                continue;
            }
            for dy in -2..=2i32 {
                for dx in -2..=2i32 {
                    let x = (cx as i32 + dx) as usize;
                    let y = (cy as i32 + dy) as usize;
                    matrix.set(x, y, dx.abs().max(dy.abs()) != 1);
                    matrix.set_role(x, y, Role::Function);
                }
            }
        }
    }
}

/// Timing patterns along row and column 6, alternating from dark.
/// Alignment patterns centered on line 6 already carry the matching
/// colors, so only untagged cells are written.
fn draw_timing(matrix: &mut ModuleMatrix) {
    let side = matrix.side();
    for i in 0..side {
        if matrix.is_data(i, 6) {
            matrix.set(i, 6, i % 2 == 0);
            matrix.set_role(i, 6, Role::Function);
        }
        if matrix.is_data(6, i) {
            matrix.set(6, i, i % 2 == 0);
            matrix.set_role(6, i, Role::Function);
        }
    }
}

/// Reserve both format information copies, including the always-dark
/// module above the bottom-left finder. Colors are written per mask
/// candidate later.
fn reserve_format(matrix: &mut ModuleMatrix) {
    let side = matrix.side();
    for i in 0..9 {
        if i != 6 {
            matrix.set_role(8, i, Role::Format);
            matrix.set_role(i, 8, Role::Format);
        }
    }
    for i in 0..8 {
        matrix.set_role(side - 1 - i, 8, Role::Format);
        matrix.set_role(8, side - 8 + i, Role::Format);
    }
}

/// Reserve the two 3x6 version information blocks (versions 7+).
fn reserve_version_info(matrix: &mut ModuleMatrix) {
    let side = matrix.side();
    for y in 0..6 {
        for x in side - 11..side - 8 {
            matrix.set_role(x, y, Role::Reserved);
            matrix.set_role(y, x, Role::Reserved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(version: Version) -> ModuleMatrix {
        let mut matrix = ModuleMatrix::new(version.side());
        place(&mut matrix, version);
        matrix
    }

    #[test]
    fn test_data_module_count_matches_table() {
        for ver in [1, 2, 6, 7, 14, 21, 32, 40] {
            let version = Version::new(ver);
            let matrix = placed(version);
            assert_eq!(
                matrix.count_role(Role::Data),
                tables::raw_data_modules(version),
                "version {}",
                ver
            );
        }
    }

    #[test]
    fn test_finder_shape() {
        let matrix = placed(Version::new(1));
        // Center and border of the top-left finder are dark.
        assert!(matrix.get(3, 3));
        assert!(matrix.get(0, 0));
        assert!(matrix.get(6, 6));
        // Inner ring and separator are light.
        assert!(!matrix.get(1, 1));
        assert!(!matrix.get(7, 7));
        assert_eq!(matrix.role(7, 7), Role::Function);
    }

    #[test]
    fn test_timing_alternates() {
        let matrix = placed(Version::new(2));
        assert!(matrix.get(8, 6));
        assert!(!matrix.get(9, 6));
        assert!(matrix.get(6, 8));
        assert!(!matrix.get(6, 9));
        assert_eq!(matrix.role(8, 6), Role::Function);
    }

    #[test]
    fn test_alignment_pattern_version_2() {
        let matrix = placed(Version::new(2));
        // Single alignment pattern centered at (18, 18).
        assert!(matrix.get(18, 18));
        assert!(!matrix.get(17, 18));
        assert!(matrix.get(16, 16));
        assert_eq!(matrix.role(16, 16), Role::Function);
    }

    #[test]
    fn test_format_cells_reserved() {
        let matrix = placed(Version::new(1));
        assert_eq!(matrix.role(8, 8), Role::Format);
        assert_eq!(matrix.role(0, 8), Role::Format);
        assert_eq!(matrix.role(8, 0), Role::Format);
        // Dark-module cell above the bottom-left finder.
        assert_eq!(matrix.role(8, 13), Role::Format);
        // Timing cells stay function, not format.
        assert_eq!(matrix.role(6, 8), Role::Function);
        assert_eq!(matrix.role(8, 6), Role::Function);
    }

    #[test]
    fn test_version_info_reserved_from_v7() {
        let v6 = placed(Version::new(6));
        assert_eq!(v6.count_role(Role::Reserved), 0);

        let v7 = placed(Version::new(7));
        assert_eq!(v7.count_role(Role::Reserved), 36);
        let side = Version::new(7).side();
        assert_eq!(v7.role(side - 11, 0), Role::Reserved);
        assert_eq!(v7.role(0, side - 11), Role::Reserved);
    }
}
