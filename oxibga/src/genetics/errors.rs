use crate::populations::ConfigError;

use std::error::Error;
use std::fmt;

/// Error type returned by fitness oracles.
///
/// Any error that is `Send + Sync` converts into it with `?`,
/// so oracles can propagate failures of whatever they simulate.
pub type OracleError = Box<dyn Error + Send + Sync>;

/// Specialized result type for genetic operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// An error raised while encoding, decoding, evaluating
/// or evolving genomes.
#[derive(Debug)]
pub enum GeneticError {
    /// A gene was given an empty or non-finite range.
    Domain { lower: f64, upper: f64 },
    /// A gene was given a bit width of zero, or one
    /// too wide to be decoded exactly.
    BitWidth(usize),
    /// A bit string or value vector did not have
    /// the length required by its decoder or gene.
    Length { expected: usize, found: usize },
    /// A genotype string contained something other
    /// than `0` or `1` at the given position.
    InvalidBit(usize, char),
    /// The fitness oracle failed to score a phenotype.
    Oracle(OracleError),
    /// The fitness oracle returned NaN.
    InvalidFitness(f64),
    /// The run configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for GeneticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain { lower, upper } => write!(
                f,
                "invalid gene range [{}, {}]: lower bound must be finite and below the upper bound",
                lower, upper
            ),
            Self::BitWidth(bits) => write!(
                f,
                "invalid gene width of {} bits (expected 1 to {})",
                bits,
                crate::Gene::MAX_BITS
            ),
            Self::Length { expected, found } => {
                write!(f, "length mismatch: expected {}, found {}", expected, found)
            }
            Self::InvalidBit(position, c) => {
                write!(f, "invalid bit {:?} at position {}", c, position)
            }
            Self::Oracle(e) => write!(f, "fitness oracle failed: {}", e),
            Self::InvalidFitness(fitness) => {
                write!(f, "fitness oracle returned an unordered value ({})", fitness)
            }
            Self::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl Error for GeneticError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Oracle(e) => Some(e.as_ref()),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for GeneticError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
