use super::{NetworkError, Result};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bound of the uniform distribution
/// untrained weights are drawn from.
pub const INITIAL_WEIGHT_BOUND: f64 = 3.0;

/// The logistic function, `1 / (1 + e^-x)`.
///
/// # Examples
/// ```
/// use oxibga_nn::networks::sigmoid;
///
/// assert_eq!(sigmoid(0.0), 0.5);
/// assert!((sigmoid(1.0) - 0.7310585786).abs() < 1e-10);
/// ```
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// A sigmoid unit with one weight per input
/// followed by a bias weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NeuronWeights")]
pub struct Neuron {
    weights: Vec<f64>,
}

/// Unchecked serialized form of a [`Neuron`].
#[derive(Deserialize)]
struct NeuronWeights {
    weights: Vec<f64>,
}

impl TryFrom<NeuronWeights> for Neuron {
    type Error = NetworkError;

    fn try_from(raw: NeuronWeights) -> Result<Neuron> {
        Neuron::with_weights(raw.weights)
    }
}

impl Neuron {
    /// Creates a neuron taking `inputs` inputs, with weights
    /// (bias included) drawn uniformly from `[-3, 3]`.
    ///
    /// # Errors
    /// Returns [`NetworkError::ZeroWidth`] if `inputs` is 0.
    pub fn random<R: Rng + ?Sized>(inputs: usize, rng: &mut R) -> Result<Neuron> {
        if inputs == 0 {
            return Err(NetworkError::ZeroWidth);
        }
        Ok(Neuron {
            weights: (0..=inputs)
                .map(|_| rng.gen_range(-INITIAL_WEIGHT_BOUND..=INITIAL_WEIGHT_BOUND))
                .collect(),
        })
    }

    /// Creates a neuron with the given weights. The
    /// last weight is the bias, so a neuron taking `n`
    /// inputs has `n + 1` weights.
    ///
    /// # Errors
    /// Returns [`NetworkError::ZeroWidth`] if there are
    /// fewer than two weights.
    ///
    /// # Examples
    /// ```
    /// use oxibga_nn::networks::Neuron;
    ///
    /// let neuron = Neuron::with_weights(vec![0.5, -1.0, 0.25]).unwrap();
    /// assert_eq!(neuron.inputs(), 2);
    /// ```
    pub fn with_weights(weights: Vec<f64>) -> Result<Neuron> {
        if weights.len() < 2 {
            return Err(NetworkError::ZeroWidth);
        }
        Ok(Neuron { weights })
    }

    /// Returns the number of inputs the neuron takes.
    pub fn inputs(&self) -> usize {
        self.weights.len() - 1
    }

    /// Returns the neuron's weights, bias last.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub(super) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    /// Returns the bias weight.
    pub fn bias(&self) -> f64 {
        self.weights[self.weights.len() - 1]
    }

    /// Returns `sigmoid(Σ inputs[i] × weights[i] + bias)`.
    ///
    /// # Errors
    /// Returns [`NetworkError::Dimension`] if `inputs`
    /// is not as long as the neuron's input count.
    ///
    /// # Examples
    /// ```
    /// use oxibga_nn::networks::{sigmoid, Neuron};
    ///
    /// let neuron = Neuron::with_weights(vec![2.0, -1.0, 0.5]).unwrap();
    /// assert_eq!(neuron.activation(&[1.0, 1.0]).unwrap(), sigmoid(1.5));
    /// assert!(neuron.activation(&[1.0]).is_err());
    /// ```
    pub fn activation(&self, inputs: &[f64]) -> Result<f64> {
        if inputs.len() != self.inputs() {
            return Err(NetworkError::Dimension {
                expected: self.inputs(),
                found: inputs.len(),
            });
        }
        let sum: f64 = inputs
            .iter()
            .zip(&self.weights)
            .map(|(input, weight)| input * weight)
            .sum();
        Ok(sigmoid(sum + self.bias()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bias_only() {
        let neuron = Neuron::with_weights(vec![1.0, 1.0]).unwrap();
        let output = neuron.activation(&[0.0]).unwrap();
        assert!((output - 0.7310585786).abs() < 1e-10);
    }

    #[test]
    fn dimension_mismatch() {
        let neuron = Neuron::with_weights(vec![1.0, 1.0, 1.0]).unwrap();
        assert_eq!(
            neuron.activation(&[1.0, 2.0, 3.0]),
            Err(NetworkError::Dimension {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            neuron.activation(&[]),
            Err(NetworkError::Dimension {
                expected: 2,
                found: 0
            })
        );
    }

    #[test]
    fn random_weights_in_bounds() {
        let mut rng = StdRng::seed_from_u64(0);
        let neuron = Neuron::random(5, &mut rng).unwrap();
        assert_eq!(neuron.weights().len(), 6);
        assert!(neuron
            .weights()
            .iter()
            .all(|w| (-INITIAL_WEIGHT_BOUND..=INITIAL_WEIGHT_BOUND).contains(w)));
        assert_eq!(Neuron::random(0, &mut rng), Err(NetworkError::ZeroWidth));
    }

    #[test]
    fn deserialize_checks_weights() {
        let neuron: Neuron = serde_json::from_str(r#"{"weights":[0.5,-1.0]}"#).unwrap();
        assert_eq!(neuron.inputs(), 1);
        assert!(serde_json::from_str::<Neuron>(r#"{"weights":[]}"#).is_err());
        assert!(serde_json::from_str::<Neuron>(r#"{"weights":[1.0]}"#).is_err());
    }

    #[test]
    fn saturation() {
        let neuron = Neuron::with_weights(vec![1.0, 0.0]).unwrap();
        assert!(neuron.activation(&[1000.0]).unwrap() > 0.999);
        assert!(neuron.activation(&[-1000.0]).unwrap() < 0.001);
    }
}
