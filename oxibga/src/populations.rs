//! A Population is a fitness-sorted collection of chromosomes.
//! Populations are never modified once built: evolving one
//! produces the next generation as a new population.
mod config;
mod errors;
pub mod logging;
mod offspring_factory;

use crate::{Chromosome, Decoder, Fitness, GeneticError, Genotype, Result};
pub use config::PopulationConfig;
pub use errors::ConfigError;
use offspring_factory::OffspringFactory;

use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

/// A generation of chromosomes, sorted by ascending fitness.
pub struct Population<'d, F> {
    chromosomes: Vec<Chromosome>,
    decoder: &'d Decoder<F>,
    config: PopulationConfig,
}

impl<'d, F: Fitness> Population<'d, F> {
    /// Creates a population of [`size`] random chromosomes,
    /// each [`Decoder::total_bits`] long.
    ///
    /// The population size is expected to be even; this is
    /// not checked here (see [`PopulationConfig::validate`]).
    ///
    /// [`size`]: PopulationConfig::size
    ///
    /// # Errors
    /// Fails if any chromosome can't be scored.
    ///
    /// # Examples
    /// ```
    /// use oxibga::{Decoder, Gene, Population, PopulationConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// let decoder = Decoder::from_fn(vec![Gene::new(8, -1.0, 1.0).unwrap()], |p| p[0].abs());
    /// let config = PopulationConfig {
    ///     size: NonZeroUsize::new(10).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    ///
    /// let population = Population::new(&decoder, config, &mut rand::thread_rng()).unwrap();
    /// assert_eq!(population.len(), 10);
    /// ```
    pub fn new<R: Rng + ?Sized>(
        decoder: &'d Decoder<F>,
        config: PopulationConfig,
        rng: &mut R,
    ) -> Result<Population<'d, F>> {
        Self::seeded(decoder, config, vec![], rng)
    }

    /// Creates a population containing the `seeds` genotypes,
    /// filling the remaining places with random chromosomes.
    ///
    /// # Errors
    /// Fails with [`GeneticError::Length`] if there are more
    /// seeds than the configured size, or if any chromosome
    /// can't be scored.
    pub fn seeded<R: Rng + ?Sized>(
        decoder: &'d Decoder<F>,
        config: PopulationConfig,
        mut seeds: Vec<Genotype>,
        rng: &mut R,
    ) -> Result<Population<'d, F>> {
        let size = config.size.get();
        if seeds.len() > size {
            return Err(GeneticError::Length {
                expected: size,
                found: seeds.len(),
            });
        }
        debug!(size, seeds = seeds.len(), "generating initial population");
        let random_count = size - seeds.len();
        seeds.extend((0..random_count).map(|_| Genotype::random(decoder.total_bits(), rng)));
        let chromosomes = evaluate_all(decoder, seeds)?;
        Ok(Self::from_chromosomes(decoder, config, chromosomes))
    }

    /// Wraps already-scored chromosomes into a population,
    /// sorting them by fitness.
    ///
    /// `chromosomes` should not be empty: an empty population
    /// has no [`best`](Population::best) chromosome.
    pub fn from_chromosomes(
        decoder: &'d Decoder<F>,
        config: PopulationConfig,
        mut chromosomes: Vec<Chromosome>,
    ) -> Population<'d, F> {
        chromosomes.sort_by(|c1, c2| c1.fitness().total_cmp(&c2.fitness()));
        Population {
            chromosomes,
            decoder,
            config,
        }
    }

    /// Evolves the population by one generation.
    ///
    /// The [elite] are carried over unchanged. The remaining
    /// places are filled pairwise by mating two parents chosen
    /// by tournament selection, then mutating both offspring.
    /// All offspring are scored (concurrently) once every
    /// random decision has been made, so a run is reproducible
    /// from its random generator's seed.
    ///
    /// [elite]: PopulationConfig::elite_count
    ///
    /// # Errors
    /// Fails if any offspring can't be scored; the generation
    /// is then abandoned.
    ///
    /// # Examples
    /// ```
    /// use oxibga::{Decoder, Gene, Population, PopulationConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// let decoder = Decoder::from_fn(vec![Gene::new(8, -1.0, 1.0).unwrap()], |p| p[0].abs());
    /// let config = PopulationConfig {
    ///     size: NonZeroUsize::new(10).unwrap(),
    ///     crossover_rate: 0.9,
    ///     mutation_rate: 0.05,
    ///     elitism_fraction: 0.2,
    ///     tournament_size: NonZeroUsize::new(2).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    /// let mut rng = rand::thread_rng();
    ///
    /// let population = Population::new(&decoder, config, &mut rng).unwrap();
    /// let next = population.evolve(&mut rng).unwrap();
    ///
    /// assert_eq!(next.len(), 10);
    /// assert!(next.best().fitness() <= population.best().fitness());
    /// ```
    pub fn evolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Population<'d, F>> {
        let size = self.chromosomes.len();
        let elite = self.config.elite_count().min(size);
        debug!(elite, offspring = size - elite, "evolving population");

        let offspring = OffspringFactory::new(&self.chromosomes, &self.config)
            .generate_offspring(size - elite, rng);

        let mut next = Vec::with_capacity(size);
        next.extend_from_slice(&self.chromosomes[..elite]);
        next.extend(evaluate_all(self.decoder, offspring)?);
        Ok(Self::from_chromosomes(self.decoder, self.config, next))
    }

    /// Returns the fittest chromosome.
    ///
    /// # Panics
    /// Panics if the population is empty, which can only
    /// happen if it was built with [`from_chromosomes`].
    ///
    /// [`from_chromosomes`]: Population::from_chromosomes
    pub fn best(&self) -> &Chromosome {
        &self.chromosomes[0]
    }

    /// Returns the arithmetic mean of all fitnesses.
    pub fn average_fitness(&self) -> f64 {
        self.chromosomes.iter().map(Chromosome::fitness).sum::<f64>()
            / self.chromosomes.len() as f64
    }

    /// Returns the chromosomes sorted by ascending fitness.
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Consumes the population, returning its sorted chromosomes.
    pub fn into_chromosomes(self) -> Vec<Chromosome> {
        self.chromosomes
    }

    /// Returns the number of chromosomes.
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Returns whether the population has no chromosomes.
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Returns the decoder used to score the population.
    pub fn decoder(&self) -> &'d Decoder<F> {
        self.decoder
    }

    /// Returns the population's configuration.
    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    /// Returns a progress report for this population
    /// as generation number `generation`.
    pub fn report(&self, generation: usize) -> logging::Generation<'_> {
        logging::Generation {
            generation,
            members: &self.chromosomes,
        }
    }
}

/// Scores genotypes in parallel. Returns once every
/// genotype is scored, or with the first failure.
fn evaluate_all<F: Fitness>(
    decoder: &Decoder<F>,
    genotypes: Vec<Genotype>,
) -> Result<Vec<Chromosome>> {
    genotypes
        .into_par_iter()
        .map(|genotype| Chromosome::new(decoder, genotype))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gene;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use std::num::NonZeroUsize;

    fn config(size: usize) -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(size).unwrap(),
            crossover_rate: 0.8,
            mutation_rate: 0.05,
            elitism_fraction: 0.1,
            tournament_size: NonZeroUsize::new(3).unwrap(),
            max_generations: 10,
        }
    }

    fn assert_sorted<F: Fitness>(population: &Population<'_, F>) {
        assert!(population
            .chromosomes()
            .windows(2)
            .all(|w| w[0].fitness() <= w[1].fitness()));
    }

    #[test]
    fn new_is_sorted() {
        let decoder = Decoder::from_fn(vec![Gene::new(8, -5.0, 5.0).unwrap(); 3], |p| {
            p.iter().map(|x| x * x).sum()
        });
        let mut rng = StdRng::seed_from_u64(0);
        let population = Population::new(&decoder, config(20), &mut rng).unwrap();
        assert_eq!(population.len(), 20);
        assert_sorted(&population);
        assert!(population
            .chromosomes()
            .iter()
            .all(|c| c.genotype().len() == 24));
    }

    #[test]
    fn seeded() {
        let decoder = Decoder::from_fn(vec![Gene::new(4, 0.0, 15.0).unwrap()], |p| p[0]);
        let mut rng = StdRng::seed_from_u64(1);
        let seed: Genotype = "0000".parse().unwrap();
        let population =
            Population::seeded(&decoder, config(6), vec![seed.clone()], &mut rng).unwrap();
        assert_eq!(population.len(), 6);
        assert_eq!(population.best().genotype(), &seed);

        assert!(matches!(
            Population::seeded(&decoder, config(2), vec![seed.clone(); 3], &mut rng),
            Err(GeneticError::Length { .. })
        ));
        assert!(matches!(
            Population::seeded(&decoder, config(2), vec!["01".parse().unwrap()], &mut rng),
            Err(GeneticError::Length { .. })
        ));
    }

    #[test]
    fn evolve_keeps_size_and_elite() {
        let decoder = Decoder::from_fn(vec![Gene::new(10, -1.0, 1.0).unwrap(); 2], |p| {
            (p[0] - 0.25).abs() + (p[1] + 0.5).abs()
        });
        let mut rng = StdRng::seed_from_u64(2);
        let mut population = Population::new(&decoder, config(30), &mut rng).unwrap();
        for _ in 0..25 {
            let elite: Vec<Chromosome> =
                population.chromosomes()[..config(30).elite_count()].to_vec();
            let next = population.evolve(&mut rng).unwrap();
            assert_eq!(next.len(), 30);
            assert_sorted(&next);
            assert!(next.best().fitness() <= population.best().fitness());
            for chromosome in &elite {
                assert!(next.chromosomes().contains(chromosome));
            }
            population = next;
        }
    }

    #[test]
    fn evolve_without_elitism_replaces_everyone() {
        let decoder = Decoder::from_fn(vec![Gene::new(6, 0.0, 63.0).unwrap()], |p| p[0]);
        let mut rng = StdRng::seed_from_u64(3);
        let config = PopulationConfig {
            elitism_fraction: 0.0,
            crossover_rate: 0.0,
            mutation_rate: 1.0,
            tournament_size: NonZeroUsize::new(1).unwrap(),
            ..config(8)
        };
        let population = Population::new(&decoder, config, &mut rng).unwrap();
        let next = population.evolve(&mut rng).unwrap();
        assert_eq!(next.len(), 8);
        // Every offspring is the bitwise complement of some parent.
        for child in next.chromosomes() {
            assert!(population
                .chromosomes()
                .iter()
                .any(|parent| child.fitness() == 63.0 - parent.fitness()));
        }
    }

    #[test]
    fn odd_size_is_truncated() {
        let decoder = Decoder::from_fn(vec![Gene::new(4, 0.0, 15.0).unwrap()], |p| p[0]);
        let mut rng = StdRng::seed_from_u64(4);
        let population = Population::new(&decoder, config(5), &mut rng).unwrap();
        assert_eq!(population.evolve(&mut rng).unwrap().len(), 5);
    }

    #[test]
    fn oracle_failure_aborts_generation() {
        let decoder = Decoder::from_try_fn(vec![Gene::new(4, 0.0, 15.0).unwrap()], |p| {
            if p[0] >= 14.0 {
                Err("crashed".into())
            } else {
                Ok(p[0])
            }
        });
        let mut rng = StdRng::seed_from_u64(5);
        let seeds = vec!["0000".parse().unwrap(), "0001".parse().unwrap()];
        let config = PopulationConfig {
            elitism_fraction: 0.0,
            mutation_rate: 1.0,
            crossover_rate: 0.0,
            ..config(2)
        };
        let population = Population::seeded(&decoder, config, seeds, &mut rng).unwrap();
        assert!(matches!(
            population.evolve(&mut rng),
            Err(GeneticError::Oracle(_))
        ));
    }

    #[test]
    #[should_panic]
    fn empty_population_has_no_best() {
        let decoder = Decoder::from_fn(vec![Gene::new(2, 0.0, 3.0).unwrap()], |p| p[0]);
        let population = Population::from_chromosomes(&decoder, config(4), vec![]);
        assert!(population.is_empty());
        population.best();
    }

    #[test]
    fn average_fitness() {
        let decoder = Decoder::from_fn(vec![Gene::new(2, 0.0, 3.0).unwrap()], |p| p[0]);
        let chromosomes = ["11", "00", "10", "01"]
            .iter()
            .map(|s| Chromosome::new(&decoder, s.parse().unwrap()).unwrap())
            .collect();
        let population = Population::from_chromosomes(&decoder, config(4), chromosomes);
        assert_eq!(population.average_fitness(), 1.5);
        assert_eq!(population.best().fitness(), 0.0);
        assert_sorted(&population);
    }
}
