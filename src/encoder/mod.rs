//! Data encoding and error correction: text to the interleaved codeword
//! sequence the symbol builder places on the grid.

pub mod bitstream;
pub mod reed_solomon;
pub mod segment;
pub mod tables;

use crate::models::{ECLevel, Version};
use bitstream::BitWriter;
use segment::EncodingPlan;

/// Padding codewords alternated until the data capacity is full.
const PAD_BYTES: [u32; 2] = [0xEC, 0x11];

/// Assemble the data codewords for a plan at a selected version:
/// segment headers and payloads, terminator, byte alignment, then the
/// alternating filler bytes.
///
/// The caller has already verified the plan fits; a mismatch here is a
/// programming error.
pub fn data_codewords(plan: &EncodingPlan, version: Version, ec_level: ECLevel) -> Vec<u8> {
    let capacity_bits = tables::data_codewords(version, ec_level) * 8;
    let (bits_used, segments) = plan
        .bits_for(version)
        .expect("selected version cannot hold the payload");
    assert!(bits_used <= capacity_bits, "payload exceeds selected version");

    let mut bw = BitWriter::with_capacity(capacity_bits);
    for seg in segments {
        seg.write(version, &mut bw);
    }
    debug_assert_eq!(bw.len(), bits_used);

    // Terminator: up to four zero bits, clipped at capacity.
    let terminator = (capacity_bits - bw.len()).min(4);
    bw.append_bits(0, terminator);
    bw.append_bits(0, (8 - bw.len() % 8) % 8);

    for &pad in PAD_BYTES.iter().cycle() {
        if bw.len() >= capacity_bits {
            break;
        }
        bw.append_bits(pad, 8);
    }
    bw.into_bytes()
}

/// Full codeword sequence for a plan: data codewords plus interleaved
/// Reed-Solomon redundancy.
pub fn encode(plan: &EncodingPlan, version: Version, ec_level: ECLevel) -> Vec<u8> {
    let data = data_codewords(plan, version, ec_level);
    reed_solomon::with_error_correction(&data, version, ec_level)
}
