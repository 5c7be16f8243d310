//! Binary genetic representation: genes encode real values
//! into fixed-width bit segments, decoders split whole
//! genotypes into per-gene segments and score the resulting
//! phenotypes, and chromosomes pair a genotype with its
//! fitness.
mod chromosome;
mod decoder;
mod errors;
mod gene;
mod genotype;

pub use chromosome::Chromosome;
pub use decoder::{Decoder, Fitness, FnFitness, TryFnFitness};
pub use errors::{GeneticError, OracleError, Result};
pub use gene::Gene;
pub use genotype::Genotype;
