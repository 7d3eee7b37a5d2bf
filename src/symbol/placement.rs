//! Codeword placement: the zigzag walk over data modules.

use crate::models::ModuleMatrix;

/// Place codeword bits onto the data modules in the standard zigzag
/// order: two-column strips right to left, alternating upward and
/// downward, skipping the timing column.
///
/// The symbol may have up to seven more data modules than codeword
/// bits; those remainder modules stay light.
pub fn draw_codewords(matrix: &mut ModuleMatrix, codewords: &[u8]) {
    let side = matrix.side();
    let total_bits = codewords.len() * 8;
    let mut bit = 0usize;

    let mut right = side as i32 - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        for vert in 0..side {
            for j in 0..2 {
                let x = (right - j) as usize;
                let upward = (right + 1) & 2 == 0;
                let y = if upward { side - 1 - vert } else { vert };
                if matrix.is_data(x, y) && bit < total_bits {
                    let dark = (codewords[bit >> 3] >> (7 - (bit & 7))) & 1 != 0;
                    matrix.set(x, y, dark);
                    bit += 1;
                }
            }
        }
        right -= 2;
    }
    debug_assert!(bit == total_bits, "codewords did not fit the data region");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables;
    use crate::models::{Role, Version};
    use crate::symbol::function_patterns;

    #[test]
    fn test_first_codeword_lands_bottom_right() {
        let version = Version::new(1);
        let mut matrix = ModuleMatrix::new(version.side());
        function_patterns::place(&mut matrix, version);
        let codewords = vec![0xFFu8; tables::total_codewords(version)];
        draw_codewords(&mut matrix, &codewords);

        // The walk starts at the bottom-right corner moving up.
        let side = matrix.side();
        assert!(matrix.get(side - 1, side - 1));
        assert!(matrix.get(side - 2, side - 1));
        assert!(matrix.get(side - 1, side - 2));
    }

    #[test]
    fn test_all_data_modules_written_dark() {
        // With all-ones codewords every data module of version 1 is dark
        // (26 codewords = 208 bits, exactly the data module count).
        let version = Version::new(1);
        let mut matrix = ModuleMatrix::new(version.side());
        function_patterns::place(&mut matrix, version);
        let codewords = vec![0xFFu8; tables::total_codewords(version)];
        draw_codewords(&mut matrix, &codewords);

        let side = matrix.side();
        for y in 0..side {
            for x in 0..side {
                if matrix.role(x, y) == Role::Data {
                    assert!(matrix.get(x, y), "light data module at ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_remainder_bits_stay_light() {
        // Version 2 has 359 data modules for 44 codewords (352 bits);
        // the 7 remainder modules stay light even with all-ones data.
        let version = Version::new(2);
        let mut matrix = ModuleMatrix::new(version.side());
        function_patterns::place(&mut matrix, version);
        let codewords = vec![0xFFu8; tables::total_codewords(version)];
        draw_codewords(&mut matrix, &codewords);

        let side = matrix.side();
        let mut light = 0;
        for y in 0..side {
            for x in 0..side {
                if matrix.role(x, y) == Role::Data && !matrix.get(x, y) {
                    light += 1;
                }
            }
        }
        assert_eq!(light, tables::raw_data_modules(version) % 8);
    }
}
