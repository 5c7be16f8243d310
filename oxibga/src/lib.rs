//! A binary-encoded genetic algorithm.
//!
//! Candidate solutions are fixed-length bit strings. A [`Decoder`]
//! splits each one into per-[`Gene`] segments, maps every segment
//! to a real number inside the gene's bounds, and hands the
//! resulting parameter vector to a user-supplied [`Fitness`]
//! function. Lower fitness is better.
//!
//! Each generation keeps an elite of the fittest chromosomes and
//! fills the rest of the population with offspring of parents
//! chosen by tournament selection, recombined by single-point
//! crossover and mutated bitwise. Offspring are scored in parallel.
//!
//! # Example usage: minimizing a quadratic
//! ```
//! use oxibga::logging::{EvolutionLogger, ReportingLevel};
//! use oxibga::{Decoder, Gene, GeneticAlgorithm, PopulationConfig};
//! use std::num::NonZeroUsize;
//!
//! fn main() {
//!     // (x - 3)^2 + (y + 1)^2 has its minimum at (3, -1).
//!     let genes = vec![
//!         Gene::named("x", 20, -10.0, 10.0).unwrap(),
//!         Gene::named("y", 20, -10.0, 10.0).unwrap(),
//!     ];
//!     let decoder = Decoder::from_fn(genes, |p| (p[0] - 3.0).powi(2) + (p[1] + 1.0).powi(2));
//!
//!     let config = PopulationConfig {
//!         size: NonZeroUsize::new(60).unwrap(),
//!         crossover_rate: 0.9,
//!         mutation_rate: 0.01,
//!         elitism_fraction: 0.1,
//!         tournament_size: NonZeroUsize::new(3).unwrap(),
//!         max_generations: 80,
//!     };
//!
//!     let mut logger = EvolutionLogger::new(ReportingLevel::NoGenomes);
//!     let best = GeneticAlgorithm::new(&decoder, config)
//!         .unwrap()
//!         .run(&mut oxibga::rng::seeded(Some(7)), &mut logger)
//!         .unwrap();
//!
//!     let solution = decoder.phenotype_of(best.genotype()).unwrap();
//!     let x = solution[decoder.gene_index("x").unwrap()];
//!     println!("best: {} at x = {}", best.fitness(), x);
//!     assert_eq!(logger.iter().count(), 81);
//! }
//! ```
mod algorithm;
mod genetics;
mod populations;
pub mod rng;

pub use algorithm::GeneticAlgorithm;
pub use genetics::*;
pub use populations::logging;
pub use populations::{ConfigError, Population, PopulationConfig};
