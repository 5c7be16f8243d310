use std::error::Error;
use std::fmt;

/// An error type indicating an unusable
/// [`PopulationConfig`](super::PopulationConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The population size is odd.
    OddPopulationSize(usize),
    /// A probability or fraction is outside of [0, 1].
    OutOfUnitRange(&'static str, f64),
    /// Tournaments would draw more contestants
    /// than there are chromosomes.
    OversizedTournament {
        tournament_size: usize,
        population_size: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddPopulationSize(size) => {
                write!(f, "population size must be even, got {}", size)
            }
            Self::OutOfUnitRange(name, value) => {
                write!(f, "{} must be in [0, 1], got {}", name, value)
            }
            Self::OversizedTournament {
                tournament_size,
                population_size,
            } => write!(
                f,
                "tournament size {} exceeds population size {}",
                tournament_size, population_size
            ),
        }
    }
}

impl Error for ConfigError {}
