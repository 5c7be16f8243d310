use std::error::Error;
use std::fmt;

pub type Result<T> = std::result::Result<T, NetworkError>;

/// An error type indicating a malformed network,
/// or a mismatch between a network and the values
/// fed into it.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A neuron or layer received the wrong number of inputs.
    Dimension { expected: usize, found: usize },
    /// A weight vector doesn't match the network's size.
    Length { expected: usize, found: usize },
    /// A layer's input width doesn't match the
    /// output width of the layer before it.
    Architecture {
        layer: usize,
        expected: usize,
        found: usize,
    },
    /// A network was built without any layers.
    EmptyNetwork,
    /// Partial execution was requested past the last layer.
    LayerIndex { index: usize, layers: usize },
    /// A snapshot was written with an unknown schema version.
    UnsupportedVersion(u32),
    /// A layer was declared with no inputs or no neurons.
    ZeroWidth,
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension { expected, found } => write!(
                f,
                "expected {} inputs, found {}",
                expected, found
            ),
            Self::Length { expected, found } => write!(
                f,
                "weight vector of length {} for network of size {}",
                found, expected
            ),
            Self::Architecture {
                layer,
                expected,
                found,
            } => write!(
                f,
                "layer {} takes {} inputs, but the previous layer has {} outputs",
                layer, found, expected
            ),
            Self::EmptyNetwork => write!(f, "network has no layers"),
            Self::LayerIndex { index, layers } => write!(
                f,
                "layer index {} out of range for network with {} layers",
                index, layers
            ),
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported network snapshot version {}", version)
            }
            Self::ZeroWidth => write!(f, "layers must have at least one input and one neuron"),
        }
    }
}

impl Error for NetworkError {}
