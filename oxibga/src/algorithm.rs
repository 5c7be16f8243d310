use crate::logging::Observer;
use crate::{Chromosome, Decoder, Fitness, Genotype, Population, PopulationConfig, Result};

use rand::Rng;
use tracing::info;

/// Runs a fixed number of generations of evolution.
///
/// Generation 0 is a random (optionally seeded) population;
/// generations 1 to [`max_generations`] are each obtained
/// by [evolving] the previous one. The observer is notified
/// after every generation, including generation 0.
///
/// [`max_generations`]: PopulationConfig::max_generations
/// [evolving]: Population::evolve
pub struct GeneticAlgorithm<'d, F> {
    decoder: &'d Decoder<F>,
    config: PopulationConfig,
    seeds: Vec<Genotype>,
}

impl<'d, F: Fitness> GeneticAlgorithm<'d, F> {
    /// Prepares a run.
    ///
    /// # Errors
    /// Returns [`GeneticError::Config`] if the configuration
    /// fails [validation](PopulationConfig::validate).
    ///
    /// [`GeneticError::Config`]: crate::GeneticError::Config
    pub fn new(
        decoder: &'d Decoder<F>,
        config: PopulationConfig,
    ) -> Result<GeneticAlgorithm<'d, F>> {
        config.validate()?;
        Ok(GeneticAlgorithm {
            decoder,
            config,
            seeds: vec![],
        })
    }

    /// Includes `seeds` in the initial population.
    pub fn with_seeds(mut self, seeds: Vec<Genotype>) -> GeneticAlgorithm<'d, F> {
        self.seeds = seeds;
        self
    }

    /// Runs the algorithm, returning the best chromosome
    /// of the final generation.
    ///
    /// # Errors
    /// Fails as soon as any chromosome can't be scored.
    ///
    /// # Examples
    /// ```
    /// use oxibga::logging::FnObserver;
    /// use oxibga::{Decoder, Gene, GeneticAlgorithm, PopulationConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// // Find the minimum of (x - 1)^2 over [-4, 4].
    /// let decoder = Decoder::from_fn(vec![Gene::new(16, -4.0, 4.0).unwrap()], |p| {
    ///     (p[0] - 1.0).powi(2)
    /// });
    /// let config = PopulationConfig {
    ///     size: NonZeroUsize::new(40).unwrap(),
    ///     crossover_rate: 0.9,
    ///     mutation_rate: 0.02,
    ///     elitism_fraction: 0.1,
    ///     tournament_size: NonZeroUsize::new(3).unwrap(),
    ///     max_generations: 30,
    /// };
    ///
    /// let mut bests = vec![];
    /// let best = GeneticAlgorithm::new(&decoder, config)
    ///     .unwrap()
    ///     .run(
    ///         &mut oxibga::rng::seeded(Some(1)),
    ///         &mut FnObserver::new(|report| bests.push(report.best_fitness())),
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(bests.len(), 31);
    /// assert!(bests.windows(2).all(|w| w[1] <= w[0]));
    /// assert_eq!(best.fitness(), bests[30]);
    /// ```
    pub fn run<R, O>(&self, rng: &mut R, observer: &mut O) -> Result<Chromosome>
    where
        R: Rng + ?Sized,
        O: Observer + ?Sized,
    {
        let mut population =
            Population::seeded(self.decoder, self.config, self.seeds.clone(), rng)?;
        Self::report(&population, 0, observer);

        for generation in 1..=self.config.max_generations {
            population = population.evolve(rng)?;
            Self::report(&population, generation, observer);
        }

        Ok(population.best().clone())
    }

    fn report<O: Observer + ?Sized>(
        population: &Population<'d, F>,
        generation: usize,
        observer: &mut O,
    ) {
        let report = population.report(generation);
        info!(
            generation,
            best = report.best_fitness(),
            average = report.average_fitness(),
            "generation evaluated"
        );
        observer.observe(&report);
    }
}
