//! Options for random test-element generation.

/// Controls the shape of random elements produced by `randtest`.
///
/// # Example
///
/// ```
/// use generic_rings::RandOptions;
///
/// let opts = RandOptions::default().with_density(0.5).with_bits(4);
/// assert_eq!(opts.bits, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandOptions {
    /// Probability that a generated entry is nonzero, in `[0, 1]`.
    pub density: f64,
    /// Bound on the bit length of generated integers (numerators,
    /// denominators, residues before reduction).
    pub bits: u32,
}

impl RandOptions {
    /// Replaces the nonzero density, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        self
    }

    /// Replaces the integer bit bound, clamped to `1..=62`.
    #[must_use]
    pub fn with_bits(mut self, bits: u32) -> Self {
        self.bits = bits.clamp(1, 62);
        self
    }

    /// Largest magnitude a generated integer may take.
    #[inline]
    #[must_use]
    pub fn magnitude(&self) -> i64 {
        (1i64 << self.bits.clamp(1, 62)) - 1
    }
}

impl Default for RandOptions {
    fn default() -> Self {
        Self {
            density: 0.8,
            bits: 10,
        }
    }
}
