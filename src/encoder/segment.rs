//! Data encoding: mode classification and segment bitstreams.

use crate::encoder::bitstream::BitWriter;
use crate::models::Version;

/// Characters encodable in alphanumeric mode, in codebook order.
const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Segment encoding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mode {
    /// Digits 0-9, packed three per 10 bits.
    Numeric,
    /// The 45-character restricted set, packed two per 11 bits.
    Alphanumeric,
    /// Arbitrary bytes (UTF-8 for text input).
    Byte,
}

impl Mode {
    /// Four-bit mode indicator.
    pub fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0x1,
            Mode::Alphanumeric => 0x2,
            Mode::Byte => 0x4,
        }
    }

    /// Width of the character-count field at a version.
    pub fn char_count_bits(self, version: Version) -> usize {
        let class = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][class],
            Mode::Alphanumeric => [9, 11, 13][class],
            Mode::Byte => [8, 16, 16][class],
        }
    }

    /// Narrowest mode able to carry a character.
    fn classify(c: char) -> Mode {
        if c.is_ascii_digit() {
            Mode::Numeric
        } else if ALPHANUMERIC_CHARSET.contains(c) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }
}

/// One mode segment: character count plus pre-encoded payload bits.
///
/// Payload bits are version independent; only the header (mode
/// indicator + count field) varies with the version class.
#[derive(Debug, Clone)]
pub struct Segment {
    mode: Mode,
    char_count: usize,
    payload: Vec<u8>,
    payload_bits: usize,
}

impl Segment {
    /// Encode a run of decimal digits.
    pub fn numeric(text: &str) -> Self {
        let mut bw = BitWriter::with_capacity(text.len() * 10 / 3 + 10);
        let mut accum: u32 = 0;
        let mut count: usize = 0;
        for b in text.bytes() {
            debug_assert!(b.is_ascii_digit(), "non-digit in numeric segment");
            accum = accum * 10 + u32::from(b - b'0');
            count += 1;
            if count == 3 {
                bw.append_bits(accum, 10);
                accum = 0;
                count = 0;
            }
        }
        if count > 0 {
            bw.append_bits(accum, count * 3 + 1);
        }
        Self::from_writer(Mode::Numeric, text.len(), bw)
    }

    /// Encode a run of characters from the 45-character set.
    pub fn alphanumeric(text: &str) -> Self {
        let mut bw = BitWriter::with_capacity(text.len() * 11 / 2 + 11);
        let mut accum: u32 = 0;
        let mut count: usize = 0;
        for c in text.chars() {
            let index = ALPHANUMERIC_CHARSET
                .find(c)
                .expect("character outside alphanumeric set") as u32;
            accum = accum * 45 + index;
            count += 1;
            if count == 2 {
                bw.append_bits(accum, 11);
                accum = 0;
                count = 0;
            }
        }
        if count > 0 {
            bw.append_bits(accum, 6);
        }
        Self::from_writer(Mode::Alphanumeric, text.chars().count(), bw)
    }

    /// Encode arbitrary bytes. The character count is the byte count.
    pub fn bytes(data: &[u8]) -> Self {
        Self {
            mode: Mode::Byte,
            char_count: data.len(),
            payload: data.to_vec(),
            payload_bits: data.len() * 8,
        }
    }

    fn from_writer(mode: Mode, char_count: usize, bw: BitWriter) -> Self {
        let payload_bits = bw.len();
        let mut payload = bw;
        // Byte-align the backing store without disturbing the bit count.
        let pad = (8 - payload.len() % 8) % 8;
        payload.append_bits(0, pad);
        Self {
            mode,
            char_count,
            payload: payload.into_bytes(),
            payload_bits,
        }
    }

    /// Segment mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Character count for the header field.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Header + payload width at a version, or None if the character
    /// count overflows the count field.
    pub fn bit_len(&self, version: Version) -> Option<usize> {
        let ccbits = self.mode.char_count_bits(version);
        if ccbits < usize::BITS as usize && self.char_count >= 1usize << ccbits {
            return None;
        }
        Some(4 + ccbits + self.payload_bits)
    }

    /// Write header and payload into the symbol bitstream.
    pub fn write(&self, version: Version, bw: &mut BitWriter) {
        bw.append_bits(self.mode.indicator(), 4);
        bw.append_bits(self.char_count as u32, self.mode.char_count_bits(version));
        bw.append_packed(&self.payload, self.payload_bits);
    }
}

/// Total header + payload bits at a version, or None on count overflow.
pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
    segments.iter().try_fold(0usize, |acc, seg| {
        seg.bit_len(version).and_then(|n| acc.checked_add(n))
    })
}

/// The two candidate segmentations of an input text.
///
/// Maximal same-mode runs usually win; a single byte segment is always a
/// valid fallback and occasionally shorter when the text alternates
/// between modes every character or two.
#[derive(Debug, Clone)]
pub struct EncodingPlan {
    runs: Vec<Segment>,
    fallback: Vec<Segment>,
}

impl EncodingPlan {
    /// Partition text into maximal mode runs and build both candidates.
    pub fn new(text: &str) -> Self {
        Self {
            runs: partition(text),
            fallback: vec![Segment::bytes(text.as_bytes())],
        }
    }

    /// Cheapest fitting candidate at a version: (bits, segments).
    pub fn bits_for(&self, version: Version) -> Option<(usize, &[Segment])> {
        let runs = total_bits(&self.runs, version).map(|n| (n, self.runs.as_slice()));
        let fallback = total_bits(&self.fallback, version).map(|n| (n, self.fallback.as_slice()));
        match (runs, fallback) {
            (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
            (a, b) => a.or(b),
        }
    }
}

/// Split text into maximal runs of the narrowest mode covering each
/// character, then encode each run as one segment.
fn partition(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run_start = 0;
    let mut run_mode: Option<Mode> = None;
    for (offset, c) in text.char_indices() {
        let mode = Mode::classify(c);
        match run_mode {
            Some(current) if current == mode => {}
            Some(current) => {
                segments.push(make_segment(current, &text[run_start..offset]));
                run_start = offset;
                run_mode = Some(mode);
            }
            None => run_mode = Some(mode),
        }
    }
    if let Some(mode) = run_mode {
        segments.push(make_segment(mode, &text[run_start..]));
    }
    segments
}

fn make_segment(mode: Mode, run: &str) -> Segment {
    match mode {
        Mode::Numeric => Segment::numeric(run),
        Mode::Alphanumeric => Segment::alphanumeric(run),
        Mode::Byte => Segment::bytes(run.as_bytes()),
    }
}
