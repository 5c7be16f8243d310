use super::{Decoder, Fitness, GeneticError, Genotype, Result};

use std::fmt;

use rand::Rng;
use serde::Serialize;

/// A candidate solution: a genotype together with its fitness.
///
/// The fitness is computed when the chromosome is created
/// and recomputed by [`mutate`], the only operation that
/// modifies the genotype, so it is never stale.
///
/// [`mutate`]: Chromosome::mutate
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Chromosome {
    genotype: Genotype,
    fitness: f64,
}

impl Chromosome {
    /// Creates a chromosome from a genotype, scoring it
    /// with `decoder`.
    ///
    /// # Errors
    /// Fails if the genotype can't be decoded or scored,
    /// see [`Decoder::fitness_of`].
    ///
    /// # Examples
    /// ```
    /// use oxibga::{Chromosome, Decoder, Gene};
    ///
    /// let gene = Gene::new(4, 0.0, 15.0).unwrap();
    /// let decoder = Decoder::from_fn(vec![gene.clone(), gene], |p| p[0] + p[1]);
    ///
    /// let chromosome = Chromosome::new(&decoder, "00010010".parse().unwrap()).unwrap();
    /// assert_eq!(chromosome.fitness(), 3.0);
    /// ```
    pub fn new<F: Fitness>(decoder: &Decoder<F>, genotype: Genotype) -> Result<Chromosome> {
        let fitness = decoder.fitness_of(&genotype)?;
        Ok(Chromosome { genotype, fitness })
    }

    /// Creates a chromosome with [`Decoder::total_bits`]
    /// random bits.
    pub fn random<F: Fitness, R: Rng + ?Sized>(
        decoder: &Decoder<F>,
        rng: &mut R,
    ) -> Result<Chromosome> {
        Self::new(decoder, Genotype::random(decoder.total_bits(), rng))
    }

    /// Returns the chromosome's fitness. Lower is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Returns the chromosome's genotype.
    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    /// Consumes the chromosome, returning its genotype.
    pub fn into_genotype(self) -> Genotype {
        self.genotype
    }

    /// Produces two offspring. With probability `crossover_rate`
    /// the parents exchange the tails of their genotypes past
    /// a uniformly random cut point (see [`Genotype::crossover`]);
    /// otherwise the offspring are copies of the parents.
    ///
    /// # Errors
    /// Returns [`GeneticError::Length`] if the parents' genotypes
    /// differ in length, and fails if either offspring can't be
    /// scored.
    ///
    /// # Examples
    /// ```
    /// use oxibga::{Chromosome, Decoder, Gene};
    ///
    /// let gene = Gene::new(4, 0.0, 15.0).unwrap();
    /// let decoder = Decoder::from_fn(vec![gene], |p| p[0]);
    /// let mut rng = rand::thread_rng();
    ///
    /// let a = Chromosome::new(&decoder, "1111".parse().unwrap()).unwrap();
    /// let b = Chromosome::new(&decoder, "0000".parse().unwrap()).unwrap();
    ///
    /// let (c, d) = a.mate(&b, 0.0, &decoder, &mut rng).unwrap();
    /// assert_eq!((c, d), (a, b));
    /// ```
    pub fn mate<F: Fitness, R: Rng + ?Sized>(
        &self,
        other: &Chromosome,
        crossover_rate: f64,
        decoder: &Decoder<F>,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        if self.genotype.len() != other.genotype.len() {
            return Err(GeneticError::Length {
                expected: self.genotype.len(),
                found: other.genotype.len(),
            });
        }
        let (first, second) = self
            .genotype
            .recombine(&other.genotype, crossover_rate, rng);
        Ok((Self::new(decoder, first)?, Self::new(decoder, second)?))
    }

    /// Flips each bit with probability `rate`, then rescores
    /// the chromosome once.
    ///
    /// # Errors
    /// Fails if the mutated genotype can't be scored, in which
    /// case the chromosome is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use oxibga::{Chromosome, Decoder, Gene};
    ///
    /// let gene = Gene::new(4, 0.0, 15.0).unwrap();
    /// let decoder = Decoder::from_fn(vec![gene], |p| p[0]);
    ///
    /// let mut chromosome = Chromosome::new(&decoder, "0011".parse().unwrap()).unwrap();
    /// chromosome.mutate(1.0, &decoder, &mut rand::thread_rng()).unwrap();
    ///
    /// assert_eq!(chromosome.genotype().to_string(), "1100");
    /// assert_eq!(chromosome.fitness(), 12.0);
    /// ```
    pub fn mutate<F: Fitness, R: Rng + ?Sized>(
        &mut self,
        rate: f64,
        decoder: &Decoder<F>,
        rng: &mut R,
    ) -> Result<()> {
        let mut genotype = self.genotype.clone();
        if genotype.mutate(rate, rng) > 0 {
            *self = Self::new(decoder, genotype)?;
        }
        Ok(())
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.genotype, self.fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FnFitness, Gene};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use std::sync::atomic::{AtomicUsize, Ordering};

    fn decoder() -> Decoder<FnFitness<impl Fn(&[f64]) -> f64 + Sync>> {
        let gene = Gene::new(4, 0.0, 15.0).unwrap();
        Decoder::from_fn(vec![gene.clone(), gene], |p: &[f64]| p[0] + p[1])
    }

    #[test]
    fn fitness_is_computed_eagerly() {
        let calls = AtomicUsize::new(0);
        let gene = Gene::new(4, 0.0, 15.0).unwrap();
        let decoder = Decoder::from_fn(vec![gene], |p| {
            calls.fetch_add(1, Ordering::Relaxed);
            p[0]
        });
        let mut rng = StdRng::seed_from_u64(0);
        let chromosome = Chromosome::random(&decoder, &mut rng).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(chromosome.genotype().len(), 4);
        assert_eq!(
            chromosome.fitness(),
            decoder.fitness_of(chromosome.genotype()).unwrap()
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            Chromosome::new(&decoder(), "101".parse().unwrap()),
            Err(GeneticError::Length { .. })
        ));
    }

    #[test]
    fn mate_without_crossover() {
        let decoder = decoder();
        let mut rng = StdRng::seed_from_u64(1);
        let a = Chromosome::random(&decoder, &mut rng).unwrap();
        let b = Chromosome::random(&decoder, &mut rng).unwrap();
        for _ in 0..20 {
            let (c, d) = a.mate(&b, 0.0, &decoder, &mut rng).unwrap();
            assert_eq!(c.genotype(), a.genotype());
            assert_eq!(d.genotype(), b.genotype());
            assert_eq!(c.fitness(), a.fitness());
            assert_eq!(d.fitness(), b.fitness());
        }
    }

    #[test]
    fn mate_with_crossover() {
        let decoder = decoder();
        let mut rng = StdRng::seed_from_u64(2);
        let a = Chromosome::new(&decoder, "11111111".parse().unwrap()).unwrap();
        let b = Chromosome::new(&decoder, "00000000".parse().unwrap()).unwrap();
        for _ in 0..20 {
            let (c, d) = a.mate(&b, 1.0, &decoder, &mut rng).unwrap();
            let cut = c.genotype().iter().take_while(|bit| **bit).count();
            let (expected_c, expected_d) = a.genotype().crossover(b.genotype(), cut);
            assert_eq!(c.genotype(), &expected_c);
            assert_eq!(d.genotype(), &expected_d);
            assert_eq!(c.fitness(), decoder.fitness_of(&expected_c).unwrap());
            assert_eq!(d.fitness(), decoder.fitness_of(&expected_d).unwrap());
        }
    }

    #[test]
    fn mate_mismatched_lengths() {
        let short = Decoder::from_fn(vec![Gene::new(4, 0.0, 15.0).unwrap()], |p| p[0]);
        let long = decoder();
        let a = Chromosome::new(&short, "1010".parse().unwrap()).unwrap();
        let b = Chromosome::new(&long, "01010101".parse().unwrap()).unwrap();
        for rate in [0.0, 1.0] {
            assert!(matches!(
                a.mate(&b, rate, &long, &mut StdRng::seed_from_u64(5)),
                Err(GeneticError::Length {
                    expected: 4,
                    found: 8
                })
            ));
        }
    }

    #[test]
    fn mutate_rates() {
        let decoder = decoder();
        let mut rng = StdRng::seed_from_u64(3);
        let original = Chromosome::random(&decoder, &mut rng).unwrap();

        let mut chromosome = original.clone();
        chromosome.mutate(0.0, &decoder, &mut rng).unwrap();
        assert_eq!(chromosome, original);

        chromosome.mutate(1.0, &decoder, &mut rng).unwrap();
        assert!(chromosome
            .genotype()
            .iter()
            .zip(original.genotype().iter())
            .all(|(a, b)| a != b));
        // Each 4-bit value v becomes 15 - v.
        assert_eq!(chromosome.fitness(), 30.0 - original.fitness());
    }

    #[test]
    fn failed_mutation_leaves_chromosome_unchanged() {
        let gene = Gene::new(2, 0.0, 3.0).unwrap();
        let decoder = Decoder::from_try_fn(vec![gene], |p| {
            if p[0] == 0.0 {
                Err("degenerate".into())
            } else {
                Ok(p[0])
            }
        });
        let mut rng = StdRng::seed_from_u64(4);
        let mut chromosome = Chromosome::new(&decoder, "11".parse().unwrap()).unwrap();
        assert!(chromosome.mutate(1.0, &decoder, &mut rng).is_err());
        assert_eq!(chromosome.genotype().to_string(), "11");
        assert_eq!(chromosome.fitness(), 3.0);
    }
}
