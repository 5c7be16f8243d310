use super::ConfigError;

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Configuration data for population generation
/// and evolution.
///
/// # Note
/// All quantities expressing probabilities or fractions
/// should be in the range [0.0, 1.0]. Use [`validate`]
/// to check a configuration before running with it.
///
/// [`validate`]: PopulationConfig::validate
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PopulationConfig {
    /// Size of the population. Must be even, as
    /// offspring are generated in pairs.
    pub size: NonZeroUsize,
    /// Chance that two mating parents exchange
    /// genetic material.
    pub crossover_rate: f64,
    /// Chance that each individual bit of an
    /// offspring is flipped.
    pub mutation_rate: f64,
    /// Fraction of the population which is copied
    /// as-is to the next generation. The resulting
    /// count is rounded up to the next even number.
    pub elitism_fraction: f64,
    /// Number of randomly drawn contestants in each
    /// tournament selection.
    pub tournament_size: NonZeroUsize,
    /// Number of generations evolved by a full run.
    pub max_generations: usize,
}

impl PopulationConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to abbreviate configuration
    /// instantiation, or to fill in unused values.
    ///
    /// # Examples
    /// ```
    /// use oxibga::PopulationConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let cfg = PopulationConfig {
    ///     size: NonZeroUsize::new(50).unwrap(),
    ///     mutation_rate: 0.01,
    ///     ..PopulationConfig::zero()
    /// };
    /// # assert_eq!(cfg.crossover_rate, 0.0);
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            // SAFETY: 1 is a valid NonZeroUsize.
            size: unsafe { NonZeroUsize::new_unchecked(1) },
            crossover_rate: 0.0,
            mutation_rate: 0.0,
            elitism_fraction: 0.0,
            // SAFETY: 1 is a valid NonZeroUsize.
            tournament_size: unsafe { NonZeroUsize::new_unchecked(1) },
            max_generations: 0,
        }
    }

    /// Checks that the configuration can be used for evolution.
    ///
    /// # Errors
    /// Returns the first rule found to be violated.
    ///
    /// # Examples
    /// ```
    /// use oxibga::PopulationConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let odd = PopulationConfig {
    ///     size: NonZeroUsize::new(7).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    /// assert!(odd.validate().is_err());
    ///
    /// let even = PopulationConfig {
    ///     size: NonZeroUsize::new(8).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    /// assert!(even.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.get() % 2 != 0 {
            return Err(ConfigError::OddPopulationSize(self.size.get()));
        }
        for (name, value) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("elitism_fraction", self.elitism_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange(name, value));
            }
        }
        if self.tournament_size > self.size {
            return Err(ConfigError::OversizedTournament {
                tournament_size: self.tournament_size.get(),
                population_size: self.size.get(),
            });
        }
        Ok(())
    }

    /// Returns the number of chromosomes carried over unchanged
    /// into the next generation: `floor(size * elitism_fraction)`,
    /// rounded up to an even number and capped at the population size.
    ///
    /// # Examples
    /// ```
    /// use oxibga::PopulationConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let cfg = PopulationConfig {
    ///     size: NonZeroUsize::new(10).unwrap(),
    ///     elitism_fraction: 0.3,
    ///     ..PopulationConfig::zero()
    /// };
    /// assert_eq!(cfg.elite_count(), 4);
    /// ```
    pub fn elite_count(&self) -> usize {
        let size = self.size.get();
        let mut elite = (size as f64 * self.elitism_fraction).floor() as usize;
        if elite % 2 != 0 {
            elite += 1;
        }
        elite.min(size)
    }
}
