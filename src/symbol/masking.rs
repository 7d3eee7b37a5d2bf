//! Mask application and penalty-scored selection.

use rayon::prelude::*;

use crate::models::{ECLevel, MaskPattern, ModuleMatrix};
use crate::symbol::format;

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

/// XOR a mask pattern onto the data modules. Function, format and
/// version cells are never masked. Applying the same mask twice
/// restores the original matrix.
pub fn apply_mask(matrix: &mut ModuleMatrix, mask: MaskPattern) {
    let side = matrix.side();
    for y in 0..side {
        for x in 0..side {
            if matrix.is_data(x, y) && mask.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Score every mask candidate and keep the best matrix.
///
/// Each candidate gets its format information drawn before scoring, so
/// the penalty reflects the exact grid a reader would see. Candidates
/// are scored in parallel; ties on the penalty fall to the lowest mask
/// id, which keeps the result deterministic regardless of scheduling.
pub fn select_mask(matrix: &ModuleMatrix, ec_level: ECLevel) -> (MaskPattern, ModuleMatrix) {
    let (mask, _, masked) = MaskPattern::ALL
        .into_par_iter()
        .map(|mask| {
            let mut candidate = matrix.clone();
            apply_mask(&mut candidate, mask);
            format::draw_format_info(&mut candidate, ec_level, mask);
            let score = penalty_score(&candidate);
            (mask, score, candidate)
        })
        .min_by_key(|&(mask, score, _)| (score, mask.value()))
        .expect("eight mask candidates");
    (mask, masked)
}

/// Total penalty score of a fully drawn grid, the sum of the four
/// standard rules: long same-color runs, 2x2 blocks, finder-like
/// patterns, and dark-module imbalance.
pub fn penalty_score(matrix: &ModuleMatrix) -> i32 {
    let side = matrix.side();
    let mut result = 0;

    // Runs of five or more equal modules per row, plus finder-likes.
    for y in 0..side {
        let mut run_color = false;
        let mut run_len = 0i32;
        let mut finder = FinderPenalty::new(side);
        for x in 0..side {
            if matrix.get(x, y) == run_color {
                run_len += 1;
                if run_len == 5 {
                    result += PENALTY_N1;
                } else if run_len > 5 {
                    result += 1;
                }
            } else {
                finder.add_history(run_len);
                if !run_color {
                    result += finder.count_patterns() * PENALTY_N3;
                }
                run_color = matrix.get(x, y);
                run_len = 1;
            }
        }
        result += finder.terminate_and_count(run_color, run_len) * PENALTY_N3;
    }
    // Same per column.
    for x in 0..side {
        let mut run_color = false;
        let mut run_len = 0i32;
        let mut finder = FinderPenalty::new(side);
        for y in 0..side {
            if matrix.get(x, y) == run_color {
                run_len += 1;
                if run_len == 5 {
                    result += PENALTY_N1;
                } else if run_len > 5 {
                    result += 1;
                }
            } else {
                finder.add_history(run_len);
                if !run_color {
                    result += finder.count_patterns() * PENALTY_N3;
                }
                run_color = matrix.get(x, y);
                run_len = 1;
            }
        }
        result += finder.terminate_and_count(run_color, run_len) * PENALTY_N3;
    }

    // 2x2 blocks of a single color.
    for y in 0..side - 1 {
        for x in 0..side - 1 {
            let color = matrix.get(x, y);
            if color == matrix.get(x + 1, y)
                && color == matrix.get(x, y + 1)
                && color == matrix.get(x + 1, y + 1)
            {
                result += PENALTY_N2;
            }
        }
    }

    // Dark-module balance, in 5% deviation steps from 50%.
    let dark = matrix.count_dark() as i32;
    let total = matrix.module_count() as i32;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    result += k * PENALTY_N4;
    result
}

/// Sliding run-length history for the finder-like pattern rule
/// (1:1:3:1:1 dark ratio flanked by at least four light modules).
struct FinderPenalty {
    side: i32,
    run_history: [i32; 7],
}

impl FinderPenalty {
    fn new(side: usize) -> Self {
        Self {
            side: side as i32,
            run_history: [0; 7],
        }
    }

    /// Push a finished run onto the history. The first run of a line is
    /// padded with a virtual light border.
    fn add_history(&mut self, mut run_len: i32) {
        if self.run_history[0] == 0 {
            run_len += self.side;
        }
        self.run_history.copy_within(0..6, 1);
        self.run_history[0] = run_len;
    }

    /// Number of finder-like patterns ending at the current position.
    fn count_patterns(&self) -> i32 {
        let n = self.run_history[1];
        debug_assert!(n <= self.side * 3);
        let core = n > 0
            && self.run_history[2] == n
            && self.run_history[3] == n * 3
            && self.run_history[4] == n
            && self.run_history[5] == n;
        i32::from(core && self.run_history[0] >= n * 4 && self.run_history[6] >= n)
            + i32::from(core && self.run_history[6] >= n * 4 && self.run_history[0] >= n)
    }

    /// Close out the line with a virtual light border and count.
    fn terminate_and_count(mut self, run_color: bool, mut run_len: i32) -> i32 {
        if run_color {
            self.add_history(run_len);
            run_len = 0;
        }
        run_len += self.side;
        self.add_history(run_len);
        self.count_patterns()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_mask_is_involutive() {
        let mut matrix = ModuleMatrix::new(21);
        matrix.set(3, 5, true);
        matrix.set(10, 10, true);
        let original = matrix.clone();
        for mask in MaskPattern::ALL {
            apply_mask(&mut matrix, mask);
            apply_mask(&mut matrix, mask);
            assert_eq!(matrix, original, "mask {:?}", mask);
        }
    }

    #[test]
    fn test_mask_skips_non_data_modules() {
        let mut matrix = ModuleMatrix::new(21);
        matrix.set_role(0, 0, Role::Function);
        matrix.set_role(1, 0, Role::Format);
        apply_mask(&mut matrix, MaskPattern::Pattern0);
        assert!(!matrix.get(0, 0));
        assert!(!matrix.get(1, 0));
        // A data module covered by pattern 0 is toggled.
        assert!(matrix.get(1, 1));
    }

    #[test]
    fn test_penalty_all_light() {
        // 21x21 all light: runs 19 per line over 42 lines, full 2x2
        // coverage, no finder-likes, maximum imbalance.
        let matrix = ModuleMatrix::new(21);
        let runs = 42 * (PENALTY_N1 + 16);
        let blocks = 20 * 20 * PENALTY_N2;
        let balance = 9 * PENALTY_N4;
        assert_eq!(penalty_score(&matrix), runs + blocks + balance);
    }

    #[test]
    fn test_penalty_detects_finder_pattern() {
        // A lone 1:1:3:1:1 run centered in row 10 of an otherwise light
        // grid. Both flanks have 4+ light modules, so the rule fires
        // twice (once per direction).
        let mut matrix = ModuleMatrix::new(21);
        for (offset, dark) in [true, false, true, true, true, false, true]
            .into_iter()
            .enumerate()
        {
            matrix.set(7 + offset, 10, dark);
        }
        // Runs: 20 light rows at 19 each + 10 for row 10, then 16 clear
        // columns at 19 each + 5 pierced columns at 16 each.
        let runs = 20 * 19 + 10 + 16 * 19 + 5 * 16;
        // 2x2 blocks: 18 clear row pairs of 20 + 12 each for the two
        // pairs touching row 10.
        let blocks = (18 * 20 + 2 * 12) * PENALTY_N2;
        let finders = 2 * PENALTY_N3;
        let balance = 9 * PENALTY_N4;
        assert_eq!(penalty_score(&matrix), runs + blocks + finders + balance);
    }

    #[test]
    fn test_select_mask_is_deterministic_and_minimal() {
        let mut matrix = ModuleMatrix::new(21);
        for i in 0..21 {
            matrix.set(i, (i * 7) % 21, true);
        }
        let (mask, masked) = select_mask(&matrix, ECLevel::H);
        let (mask2, _) = select_mask(&matrix, ECLevel::H);
        assert_eq!(mask, mask2);

        // No other candidate scores strictly lower.
        let best = penalty_score(&masked);
        for candidate_mask in MaskPattern::ALL {
            let mut candidate = matrix.clone();
            apply_mask(&mut candidate, candidate_mask);
            format::draw_format_info(&mut candidate, ECLevel::H, candidate_mask);
            assert!(penalty_score(&candidate) >= best);
        }
    }
}
