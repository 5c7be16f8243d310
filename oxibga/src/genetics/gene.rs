use super::{GeneticError, Result};

use std::fmt;

use serde::Serialize;

/// Genes describe how a single real-valued parameter
/// is stored in a fixed-width segment of a genotype.
///
/// Values are linearly quantized over `[lower, upper]`
/// into `2^bits - 1` steps: the all-zeros code decodes
/// to exactly `lower`, and the all-ones code to exactly
/// `upper`. Codes are stored most significant bit first.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Gene {
    name: Option<String>,
    bits: usize,
    lower: f64,
    upper: f64,
}

impl Gene {
    /// Widest supported segment. Every code of this width
    /// is exactly representable as an `f64`.
    pub const MAX_BITS: usize = 52;

    /// Returns a new anonymous gene using `bits` bits
    /// to encode values in `[lower, upper]`.
    ///
    /// # Errors
    /// Returns [`GeneticError::Domain`] if `lower >= upper` or
    /// either bound is not finite, and [`GeneticError::BitWidth`]
    /// if `bits` is 0 or greater than [`Gene::MAX_BITS`].
    ///
    /// # Examples
    /// ```
    /// use oxibga::Gene;
    ///
    /// let gene = Gene::new(8, -3.0, 3.0).unwrap();
    /// assert_eq!(gene.bits(), 8);
    ///
    /// assert!(Gene::new(8, 3.0, 3.0).is_err());
    /// assert!(Gene::new(0, -1.0, 1.0).is_err());
    /// ```
    pub fn new(bits: usize, lower: f64, upper: f64) -> Result<Gene> {
        if !(lower.is_finite() && upper.is_finite()) || lower >= upper {
            return Err(GeneticError::Domain { lower, upper });
        }
        if bits == 0 || bits > Self::MAX_BITS {
            return Err(GeneticError::BitWidth(bits));
        }
        Ok(Gene {
            name: None,
            bits,
            lower,
            upper,
        })
    }

    /// Returns a new gene carrying a name, which can be
    /// used to look the gene up in a [`Decoder`].
    ///
    /// [`Decoder`]: crate::Decoder
    pub fn named(name: impl Into<String>, bits: usize, lower: f64, upper: f64) -> Result<Gene> {
        let mut gene = Self::new(bits, lower, upper)?;
        gene.name = Some(name.into());
        Ok(gene)
    }

    /// Returns the gene's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the width of the gene's segment in bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Returns the lowest encodable value.
    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    /// Returns the highest encodable value.
    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    /// Returns the largest code, `2^bits - 1`.
    fn max_code(&self) -> u64 {
        (1u64 << self.bits) - 1
    }

    /// Returns the distance between two adjacent
    /// decodable values.
    ///
    /// # Examples
    /// ```
    /// use oxibga::Gene;
    ///
    /// let gene = Gene::new(4, 0.0, 15.0).unwrap();
    /// assert_eq!(gene.resolution(), 1.0);
    /// ```
    pub fn resolution(&self) -> f64 {
        (self.upper - self.lower) / self.max_code() as f64
    }

    /// Quantizes `value` into a code of [`bits`] bits.
    /// Values outside of the gene's range are encoded
    /// as the nearest bound.
    ///
    /// [`bits`]: Gene::bits
    ///
    /// # Examples
    /// ```
    /// use oxibga::Gene;
    ///
    /// let gene = Gene::new(4, 0.0, 15.0).unwrap();
    /// assert_eq!(gene.encode(5.0), [false, true, false, true]);
    /// assert_eq!(gene.encode(99.0), [true; 4]);
    /// assert_eq!(gene.encode(-1.0), [false; 4]);
    /// ```
    pub fn encode(&self, value: f64) -> Vec<bool> {
        let max_code = self.max_code();
        let normalized = ((value - self.lower) / (self.upper - self.lower)).clamp(0.0, 1.0);
        // NaN survives the clamp and saturates to 0 in the cast.
        let code = ((normalized * max_code as f64).round() as u64).min(max_code);
        (0..self.bits)
            .rev()
            .map(|shift| (code >> shift) & 1 == 1)
            .collect()
    }

    /// Decodes a segment of exactly [`bits`] bits back into
    /// a value in the gene's range.
    ///
    /// [`bits`]: Gene::bits
    ///
    /// # Errors
    /// Returns [`GeneticError::Length`] if the segment
    /// has the wrong length.
    ///
    /// # Examples
    /// ```
    /// use oxibga::Gene;
    ///
    /// let gene = Gene::new(4, 0.0, 15.0).unwrap();
    /// assert_eq!(gene.decode(&[false, true, false, true]).unwrap(), 5.0);
    /// assert!(gene.decode(&[true]).is_err());
    /// ```
    pub fn decode(&self, segment: &[bool]) -> Result<f64> {
        if segment.len() != self.bits {
            return Err(GeneticError::Length {
                expected: self.bits,
                found: segment.len(),
            });
        }
        let code = segment
            .iter()
            .fold(0u64, |code, bit| (code << 1) | u64::from(*bit));
        let t = code as f64 / self.max_code() as f64;
        // Written as a blend so that t = 0 and t = 1
        // reproduce the bounds exactly.
        Ok(self.lower * (1.0 - t) + self.upper * t)
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{} bits, {} ..= {}]",
            self.name.as_deref().unwrap_or("_"),
            self.bits,
            self.lower,
            self.upper
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn invalid_bounds() {
        assert!(matches!(
            Gene::new(8, 1.0, -1.0),
            Err(GeneticError::Domain { .. })
        ));
        assert!(matches!(
            Gene::new(8, 0.0, f64::INFINITY),
            Err(GeneticError::Domain { .. })
        ));
        assert!(matches!(
            Gene::new(Gene::MAX_BITS + 1, 0.0, 1.0),
            Err(GeneticError::BitWidth(_))
        ));
    }

    #[test]
    fn bounds_decode_exactly() {
        for (bits, lower, upper) in [
            (1, 0.1, 0.7),
            (7, -3.3, 2.9),
            (40, -3.0, 3.0),
            (52, 1e-3, 1e9),
        ] {
            let gene = Gene::new(bits, lower, upper).unwrap();
            assert_eq!(gene.decode(&vec![false; bits]).unwrap(), lower);
            assert_eq!(gene.decode(&vec![true; bits]).unwrap(), upper);
        }
    }

    #[test]
    fn round_trip_within_resolution() {
        let mut rng = StdRng::seed_from_u64(7);
        for bits in [1, 3, 8, 16, 40] {
            let gene = Gene::new(bits, -3.0, 3.0).unwrap();
            for _ in 0..200 {
                let value = rng.gen_range(-3.0..=3.0);
                let decoded = gene.decode(&gene.encode(value)).unwrap();
                assert!(
                    (decoded - value).abs() <= gene.resolution() + 1e-12,
                    "{} bits: {} -> {}",
                    bits,
                    value,
                    decoded
                );
            }
        }
    }

    #[test]
    fn encode_is_msb_first() {
        let gene = Gene::new(4, 0.0, 15.0).unwrap();
        assert_eq!(gene.encode(1.0), [false, false, false, true]);
        assert_eq!(gene.encode(8.0), [true, false, false, false]);
        // Rounds to nearest code.
        assert_eq!(gene.encode(7.6), [true, false, false, false]);
    }

    #[test]
    fn named() {
        let gene = Gene::named("bias", 8, -1.0, 1.0).unwrap();
        assert_eq!(gene.name(), Some("bias"));
        assert_eq!(Gene::new(8, -1.0, 1.0).unwrap().name(), None);
    }
}
