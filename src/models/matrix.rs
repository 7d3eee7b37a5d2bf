/// Role tag for one module of the symbol grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Carries a data or error-correction codeword bit.
    Data,
    /// Structural pattern: finder, separator, timing or alignment.
    Function,
    /// Format information (EC level + mask id, BCH protected).
    Format,
    /// Version information cells (versions 7 and up).
    Reserved,
    /// Cleared to host the logo overlay.
    Excavated,
}

/// Square module grid: packed color bits plus one role tag per module.
///
/// Colors are packed bitwise into bytes (true = dark). Bits beyond
/// side*side are never set, so the dark-module balance penalty can sum
/// `count_ones` over the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    side: usize,
    colors: Vec<u8>,
    roles: Vec<Role>,
}

impl ModuleMatrix {
    /// Create an all-light matrix with every module tagged as data.
    pub fn new(side: usize) -> Self {
        let bytes_needed = (side * side + 7) / 8;
        Self {
            side,
            colors: vec![0; bytes_needed],
            roles: vec![Role::Data; side * side],
        }
    }

    /// Side length in modules (width = height).
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of modules.
    pub fn module_count(&self) -> usize {
        self.side * self.side
    }

    /// Get module color at (x, y). true = dark.
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.side && y < self.side, "module out of bounds");
        let index = y * self.side + x;
        (self.colors[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set module color at (x, y).
    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        assert!(x < self.side && y < self.side, "module out of bounds");
        let index = y * self.side + x;
        if dark {
            self.colors[index / 8] |= 1 << (index % 8);
        } else {
            self.colors[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Invert module color at (x, y).
    pub fn toggle(&mut self, x: usize, y: usize) {
        assert!(x < self.side && y < self.side, "module out of bounds");
        let index = y * self.side + x;
        self.colors[index / 8] ^= 1 << (index % 8);
    }

    /// Get the role tag at (x, y).
    pub fn role(&self, x: usize, y: usize) -> Role {
        assert!(x < self.side && y < self.side, "module out of bounds");
        self.roles[y * self.side + x]
    }

    /// Set the role tag at (x, y).
    pub fn set_role(&mut self, x: usize, y: usize, role: Role) {
        assert!(x < self.side && y < self.side, "module out of bounds");
        self.roles[y * self.side + x] = role;
    }

    /// Whether the module at (x, y) still carries codeword bits.
    pub fn is_data(&self, x: usize, y: usize) -> bool {
        self.role(x, y) == Role::Data
    }

    /// Number of dark modules.
    pub fn count_dark(&self) -> usize {
        self.colors.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Number of modules tagged with the given role.
    pub fn count_role(&self, role: Role) -> usize {
        self.roles.iter().filter(|&&r| r == role).count()
    }
}
