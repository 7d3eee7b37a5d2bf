//! Symbol construction: version selection and pipeline orchestration.

use crate::encoder::{self, segment::EncodingPlan, tables};
use crate::error::GenerateError;
use crate::models::{ECLevel, ModuleMatrix, QrSymbol, Version};
use crate::symbol::{format, function_patterns, masking, placement};
use crate::MAX_TEXT_LEN;

/// Build a finished symbol for the given text at the fixed
/// error-correction level H.
///
/// Picks the smallest version whose data capacity holds the encoded
/// payload, then runs function placement, codeword placement, and
/// penalty-scored mask selection.
pub fn build_symbol(text: &str) -> Result<QrSymbol, GenerateError> {
    if text.is_empty() {
        return Err(GenerateError::InvalidInput("text is empty"));
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(GenerateError::InvalidInput(
            "text is longer than 500 characters",
        ));
    }

    let ec_level = ECLevel::H;
    let plan = EncodingPlan::new(text);
    let version = select_version(&plan, ec_level)?;
    let codewords = encoder::encode(&plan, version, ec_level);

    let mut matrix = ModuleMatrix::new(version.side());
    function_patterns::place(&mut matrix, version);
    if version.number() >= 7 {
        format::draw_version_info(&mut matrix, version);
    }
    placement::draw_codewords(&mut matrix, &codewords);

    let (mask, matrix) = masking::select_mask(&matrix, ec_level);

    #[cfg(debug_assertions)]
    eprintln!(
        "built symbol: version {}, mask {}, {} codewords",
        version.number(),
        mask.value(),
        codewords.len()
    );

    Ok(QrSymbol::new(version, ec_level, mask, matrix))
}

/// Smallest version able to hold the plan, or the capacity error with
/// the codeword counts that did not fit.
fn select_version(plan: &EncodingPlan, ec_level: ECLevel) -> Result<Version, GenerateError> {
    for number in Version::MIN.number()..=Version::MAX.number() {
        let version = Version::new(number);
        let capacity_bits = tables::data_codewords(version, ec_level) * 8;
        if let Some((bits, _)) = plan.bits_for(version) {
            if bits <= capacity_bits {
                return Ok(version);
            }
        }
    }
    let required = plan
        .bits_for(Version::MAX)
        .map(|(bits, _)| (bits + 7) / 8)
        .unwrap_or(usize::MAX);
    Err(GenerateError::CapacityExceeded {
        required,
        available: tables::data_codewords(Version::MAX, ec_level),
    })
}
