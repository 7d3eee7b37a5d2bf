use super::{ModuleMatrix, Role};

/// QR code version (1-40, Model 2). Grid side = 4 * version + 17.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    /// Smallest version, 21x21 modules.
    pub const MIN: Version = Version(1);
    /// Largest version, 177x177 modules.
    pub const MAX: Version = Version(40);

    /// Create a version. Panics outside 1..=40.
    pub const fn new(number: u8) -> Self {
        assert!(number >= 1 && number <= 40, "version out of range");
        Version(number)
    }

    /// Version number, 1..=40.
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Side length in modules.
    pub const fn side(self) -> usize {
        4 * self.0 as usize + 17
    }
}

/// Error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// Table row index (L=0, M=1, Q=2, H=3).
    pub fn index(self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }

    /// Two-bit value written into the format information.
    pub fn format_bits(self) -> u8 {
        match self {
            ECLevel::L => 1,
            ECLevel::M => 0,
            ECLevel::Q => 3,
            ECLevel::H => 2,
        }
    }
}

/// Mask pattern (0-7), XORed onto data modules before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in id order.
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its three-bit id.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits < 8 {
            Some(Self::ALL[bits as usize])
        } else {
            None
        }
    }

    /// Three-bit id written into the format information.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Whether the module at row i, column j is inverted by this mask.
    pub fn is_masked(self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// Finished QR symbol: masked module matrix plus its parameters.
///
/// Built once per request, immutable after masking and optional
/// excavation, consumed by the renderer, then dropped.
#[derive(Debug, Clone)]
pub struct QrSymbol {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    matrix: ModuleMatrix,
}

impl QrSymbol {
    pub(crate) fn new(
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        matrix: ModuleMatrix,
    ) -> Self {
        debug_assert_eq!(matrix.side(), version.side());
        Self {
            version,
            ec_level,
            mask,
            matrix,
        }
    }

    /// Symbol version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level.
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask pattern selected by penalty scoring.
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Side length in modules.
    pub fn side(&self) -> usize {
        self.matrix.side()
    }

    /// The module matrix.
    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }

    pub(crate) fn matrix_mut(&mut self) -> &mut ModuleMatrix {
        &mut self.matrix
    }

    /// Fraction of modules cleared for the logo overlay.
    pub fn excavated_fraction(&self) -> f32 {
        self.matrix.count_role(Role::Excavated) as f32 / self.matrix.module_count() as f32
    }
}
