use super::{Gene, GeneticError, OracleError, Result};

use ahash::RandomState;

use std::collections::HashMap;

/// A fitness oracle: scores a phenotype, with
/// _lower_ values being better.
///
/// Oracles are shared between all evaluations of a
/// generation, which may run concurrently, and so must
/// be `Sync`. Any per-evaluation mutable state (e.g.
/// a simulation, or a network whose weights are set
/// from the phenotype) should be created inside
/// [`fitness`](Fitness::fitness).
pub trait Fitness: Sync {
    /// Returns the fitness of `phenotype`.
    fn fitness(&self, phenotype: &[f64]) -> std::result::Result<f64, OracleError>;
}

/// Adapts an infallible closure into a [`Fitness`] oracle.
/// See [`Decoder::from_fn`].
#[derive(Clone, Copy, Debug)]
pub struct FnFitness<F>(pub F);

impl<F> Fitness for FnFitness<F>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn fitness(&self, phenotype: &[f64]) -> std::result::Result<f64, OracleError> {
        Ok((self.0)(phenotype))
    }
}

/// Adapts a fallible closure into a [`Fitness`] oracle.
/// See [`Decoder::from_try_fn`].
#[derive(Clone, Copy, Debug)]
pub struct TryFnFitness<F>(pub F);

impl<F> Fitness for TryFnFitness<F>
where
    F: Fn(&[f64]) -> std::result::Result<f64, OracleError> + Sync,
{
    fn fitness(&self, phenotype: &[f64]) -> std::result::Result<f64, OracleError> {
        (self.0)(phenotype)
    }
}

/// Decoders map genotypes to phenotypes and score
/// them with a fitness oracle.
///
/// A genotype is split into contiguous segments, one
/// per gene and in gene order, each exactly as wide as
/// its gene. Each segment decodes independently into
/// one phenotype value.
#[derive(Clone, Debug)]
pub struct Decoder<F> {
    genes: Vec<Gene>,
    names: HashMap<String, usize, RandomState>,
    total_bits: usize,
    oracle: F,
}

impl<F: Fitness> Decoder<F> {
    /// Creates a new decoder over `genes`, scoring
    /// phenotypes with `oracle`.
    ///
    /// If several genes share a name, [`gene_index`]
    /// resolves it to the first of them.
    ///
    /// [`gene_index`]: Decoder::gene_index
    pub fn new(genes: Vec<Gene>, oracle: F) -> Decoder<F> {
        let mut names = HashMap::default();
        for (i, gene) in genes.iter().enumerate() {
            if let Some(name) = gene.name() {
                names.entry(name.to_owned()).or_insert(i);
            }
        }
        Decoder {
            total_bits: genes.iter().map(Gene::bits).sum(),
            genes,
            names,
            oracle,
        }
    }

    /// Returns the gene list.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Returns the position of the first gene named `name`.
    pub fn gene_index(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Returns the genotype length required by this decoder,
    /// i.e. the sum of all gene widths.
    ///
    /// # Examples
    /// ```
    /// use oxibga::{Decoder, Gene};
    ///
    /// let decoder = Decoder::from_fn(
    ///     vec![Gene::new(4, 0.0, 1.0).unwrap(), Gene::new(6, 0.0, 1.0).unwrap()],
    ///     |p| p.iter().sum(),
    /// );
    /// assert_eq!(decoder.total_bits(), 10);
    /// ```
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Returns the oracle used to score phenotypes.
    pub fn oracle(&self) -> &F {
        &self.oracle
    }

    /// Decodes a genotype into its phenotype.
    ///
    /// # Errors
    /// Returns [`GeneticError::Length`] if the genotype
    /// is not exactly [`total_bits`] long.
    ///
    /// [`total_bits`]: Decoder::total_bits
    ///
    /// # Examples
    /// ```
    /// use oxibga::{Decoder, Gene, Genotype};
    ///
    /// let gene = Gene::new(4, 0.0, 15.0).unwrap();
    /// let decoder = Decoder::from_fn(vec![gene.clone(), gene], |p| p[0] + p[1]);
    ///
    /// let genotype: Genotype = "00111111".parse().unwrap();
    /// assert_eq!(decoder.phenotype_of(&genotype).unwrap(), [3.0, 15.0]);
    /// ```
    pub fn phenotype_of(&self, genotype: &[bool]) -> Result<Vec<f64>> {
        if genotype.len() != self.total_bits {
            return Err(GeneticError::Length {
                expected: self.total_bits,
                found: genotype.len(),
            });
        }
        let mut start = 0;
        self.genes
            .iter()
            .map(|gene| {
                let segment = &genotype[start..start + gene.bits()];
                start += gene.bits();
                gene.decode(segment)
            })
            .collect()
    }

    /// Encodes one value per gene into a genotype.
    /// Values are quantized, so decoding the result
    /// only approximates `phenotype`.
    ///
    /// # Errors
    /// Returns [`GeneticError::Length`] if there isn't
    /// exactly one value per gene.
    pub fn encode(&self, phenotype: &[f64]) -> Result<super::Genotype> {
        if phenotype.len() != self.genes.len() {
            return Err(GeneticError::Length {
                expected: self.genes.len(),
                found: phenotype.len(),
            });
        }
        let mut bits = Vec::with_capacity(self.total_bits);
        for (gene, value) in self.genes.iter().zip(phenotype) {
            bits.extend(gene.encode(*value));
        }
        Ok(bits.into())
    }

    /// Scores an already-decoded phenotype.
    ///
    /// # Errors
    /// Returns [`GeneticError::Oracle`] if the oracle fails,
    /// and [`GeneticError::InvalidFitness`] if it returns NaN.
    pub fn fitness_of_phenotype(&self, phenotype: &[f64]) -> Result<f64> {
        let fitness = self
            .oracle
            .fitness(phenotype)
            .map_err(GeneticError::Oracle)?;
        if fitness.is_nan() {
            return Err(GeneticError::InvalidFitness(fitness));
        }
        Ok(fitness)
    }

    /// Decodes and scores a genotype.
    ///
    /// # Errors
    /// See [`phenotype_of`] and [`fitness_of_phenotype`].
    ///
    /// [`phenotype_of`]: Decoder::phenotype_of
    /// [`fitness_of_phenotype`]: Decoder::fitness_of_phenotype
    pub fn fitness_of(&self, genotype: &[bool]) -> Result<f64> {
        self.fitness_of_phenotype(&self.phenotype_of(genotype)?)
    }
}

impl<F> Decoder<FnFitness<F>>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    /// Creates a decoder from an infallible fitness closure.
    pub fn from_fn(genes: Vec<Gene>, oracle: F) -> Decoder<FnFitness<F>> {
        Decoder::new(genes, FnFitness(oracle))
    }
}

impl<F> Decoder<TryFnFitness<F>>
where
    F: Fn(&[f64]) -> std::result::Result<f64, OracleError> + Sync,
{
    /// Creates a decoder from a fallible fitness closure.
    ///
    /// # Examples
    /// ```
    /// use oxibga::{Decoder, Gene};
    ///
    /// let decoder = Decoder::from_try_fn(vec![Gene::new(4, 0.0, 1.0).unwrap()], |p| {
    ///     if p[0] > 0.5 {
    ///         Err("out of fuel".into())
    ///     } else {
    ///         Ok(p[0])
    ///     }
    /// });
    /// assert!(decoder.fitness_of(&[false; 4]).is_ok());
    /// assert!(decoder.fitness_of(&[true; 4]).is_err());
    /// ```
    pub fn from_try_fn(genes: Vec<Gene>, oracle: F) -> Decoder<TryFnFitness<F>> {
        Decoder::new(genes, TryFnFitness(oracle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Genotype;

    fn genes() -> Vec<Gene> {
        vec![
            Gene::named("x", 4, 0.0, 15.0).unwrap(),
            Gene::named("y", 8, -1.0, 1.0).unwrap(),
            Gene::new(1, 0.0, 1.0).unwrap(),
        ]
    }

    #[test]
    fn total_bits() {
        let decoder = Decoder::from_fn(genes(), |p| p[0]);
        assert_eq!(decoder.total_bits(), 13);
        assert_eq!(Decoder::from_fn(vec![], |_| 0.0).total_bits(), 0);
    }

    #[test]
    fn phenotype_segments() {
        let decoder = Decoder::from_fn(genes(), |p| p[0]);
        let genotype: Genotype = "1010111111110".parse().unwrap();
        let phenotype = decoder.phenotype_of(&genotype).unwrap();
        assert_eq!(phenotype.len(), 3);
        assert_eq!(phenotype, [10.0, 1.0, 0.0]);
    }

    #[test]
    fn length_mismatch() {
        let decoder = Decoder::from_fn(genes(), |p| p[0]);
        assert!(matches!(
            decoder.phenotype_of(&[true; 12]),
            Err(GeneticError::Length {
                expected: 13,
                found: 12
            })
        ));
        assert!(matches!(
            decoder.encode(&[1.0]),
            Err(GeneticError::Length { .. })
        ));
    }

    #[test]
    fn encode_decode() {
        let decoder = Decoder::from_fn(genes(), |p| p[0]);
        let genotype = decoder.encode(&[3.0, -1.0, 1.0]).unwrap();
        assert_eq!(genotype.len(), decoder.total_bits());
        assert_eq!(decoder.phenotype_of(&genotype).unwrap(), [3.0, -1.0, 1.0]);
    }

    #[test]
    fn gene_lookup() {
        let decoder = Decoder::from_fn(genes(), |p| p[0]);
        assert_eq!(decoder.gene_index("x"), Some(0));
        assert_eq!(decoder.gene_index("y"), Some(1));
        assert_eq!(decoder.gene_index("z"), None);
    }

    #[test]
    fn fitness_errors() {
        let nan = Decoder::from_fn(genes(), |_| f64::NAN);
        assert!(matches!(
            nan.fitness_of(&[false; 13]),
            Err(GeneticError::InvalidFitness(_))
        ));

        let failing = Decoder::from_try_fn(genes(), |_| Err("simulation crashed".into()));
        assert!(matches!(
            failing.fitness_of(&[false; 13]),
            Err(GeneticError::Oracle(_))
        ));
    }
}
