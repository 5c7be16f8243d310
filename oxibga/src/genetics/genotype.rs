use super::{GeneticError, Result};

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A fixed-length string of bits; the raw
/// genetic material of a [`Chromosome`].
///
/// [`Chromosome`]: crate::Chromosome
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Genotype(Vec<bool>);

impl Genotype {
    /// Returns a genotype of `len` bits, each of which
    /// is set with probability 0.5.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Genotype {
        Genotype((0..len).map(|_| rng.gen::<bool>()).collect())
    }

    /// Returns the genotype's bits.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Consumes the genotype, returning its bits.
    pub fn into_bits(self) -> Vec<bool> {
        self.0
    }

    /// Single-point crossover at `cut`: the first child keeps
    /// `self`'s bits before the cut and takes `other`'s from
    /// the cut onwards, and the second child the reverse.
    ///
    /// # Panics
    /// Panics if the genotypes differ in length, or if `cut`
    /// is beyond their length.
    ///
    /// # Examples
    /// ```
    /// use oxibga::Genotype;
    ///
    /// let a: Genotype = "1111".parse().unwrap();
    /// let b: Genotype = "0000".parse().unwrap();
    ///
    /// let (c, d) = a.crossover(&b, 1);
    /// assert_eq!(c.to_string(), "1000");
    /// assert_eq!(d.to_string(), "0111");
    /// ```
    pub fn crossover(&self, other: &Genotype, cut: usize) -> (Genotype, Genotype) {
        assert_eq!(
            self.len(),
            other.len(),
            "crossover between genotypes of different lengths"
        );
        let (head_a, tail_a) = self.0.split_at(cut);
        let (head_b, tail_b) = other.0.split_at(cut);
        (
            Genotype([head_a, tail_b].concat()),
            Genotype([head_b, tail_a].concat()),
        )
    }

    /// Exchanges tails at a uniformly random cut with probability
    /// `rate`; otherwise returns copies of both parents.
    pub(crate) fn recombine<R: Rng + ?Sized>(
        &self,
        other: &Genotype,
        rate: f64,
        rng: &mut R,
    ) -> (Genotype, Genotype) {
        if !self.is_empty() && rng.gen::<f64>() < rate {
            let cut = rng.gen_range(0..self.len());
            self.crossover(other, cut)
        } else {
            (self.clone(), other.clone())
        }
    }

    /// Flips each bit independently with probability `rate`.
    /// Returns the number of flipped bits.
    ///
    /// # Examples
    /// ```
    /// use oxibga::Genotype;
    ///
    /// let mut genotype: Genotype = "1010".parse().unwrap();
    /// let flips = genotype.mutate(1.0, &mut rand::thread_rng());
    ///
    /// assert_eq!(flips, 4);
    /// assert_eq!(genotype.to_string(), "0101");
    /// ```
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, rng: &mut R) -> usize {
        let mut flips = 0;
        for bit in &mut self.0 {
            if rng.gen::<f64>() < rate {
                *bit = !*bit;
                flips += 1;
            }
        }
        flips
    }
}

impl Deref for Genotype {
    type Target = [bool];

    fn deref(&self) -> &[bool] {
        &self.0
    }
}

impl From<Vec<bool>> for Genotype {
    fn from(bits: Vec<bool>) -> Genotype {
        Genotype(bits)
    }
}

impl FromStr for Genotype {
    type Err = GeneticError;

    /// Parses a string of `0`s and `1`s.
    fn from_str(s: &str) -> Result<Genotype> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(GeneticError::InvalidBit(position, c)),
            })
            .collect::<Result<Vec<bool>>>()
            .map(Genotype)
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
