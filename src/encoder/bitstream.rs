/// Append-only bit buffer, packed most-significant-bit first.
///
/// Codewords read back out of `into_bytes` in the exact order the symbol
/// placement consumes them.
#[derive(Debug, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Create a writer with room for the given number of bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity((bits + 7) / 8),
            bit_len: 0,
        }
    }

    /// Number of bits written so far.
    pub fn len(&self) -> usize {
        self.bit_len
    }

    /// Whether no bits have been written.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Append the low `count` bits of `value`, most significant first.
    pub fn append_bits(&mut self, value: u32, count: usize) {
        assert!(count <= 31, "bit run too long");
        assert!(count == 31 || value >> count == 0, "value wider than count");
        for i in (0..count).rev() {
            let bit = ((value >> i) & 1) as u8;
            let offset = self.bit_len % 8;
            if offset == 0 {
                self.bytes.push(bit << 7);
            } else {
                *self.bytes.last_mut().unwrap() |= bit << (7 - offset);
            }
            self.bit_len += 1;
        }
    }

    /// Append `bit_len` bits from a packed msb-first byte slice.
    pub fn append_packed(&mut self, bytes: &[u8], bit_len: usize) {
        debug_assert!(bit_len == 0 || (bit_len - 1) / 8 < bytes.len());
        for i in 0..bit_len {
            let bit = (bytes[i / 8] >> (7 - (i % 8))) & 1;
            self.append_bits(bit as u32, 1);
        }
    }

    /// Finish and return the packed bytes. Requires byte alignment.
    pub fn into_bytes(self) -> Vec<u8> {
        assert_eq!(self.bit_len % 8, 0, "bitstream not byte aligned");
        self.bytes
    }

    /// Borrow the packed bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
