//! Feedforward sigmoid networks.
//!
//! A [`Network`] is a chain of fully connected [`Layer`]s of
//! [`Neuron`]s. Its weights can be viewed as a single flat vector,
//! ordered by layer, then neuron, then input (bias last), which is
//! the parameter vector evolved by `oxibga`.
mod errors;
mod layer;
mod neuron;
mod snapshot;

pub use errors::{NetworkError, Result};
pub use layer::Layer;
pub use neuron::{sigmoid, Neuron, INITIAL_WEIGHT_BOUND};
pub use snapshot::{LayerShape, NetworkSnapshot, SNAPSHOT_VERSION};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A layered feedforward network. The output width of
/// every layer matches the input width of the next.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkSnapshot", into = "NetworkSnapshot")]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a network from its layers, checking
    /// that consecutive layers fit together.
    ///
    /// # Errors
    /// Returns [`NetworkError::EmptyNetwork`] if `layers`
    /// is empty, and [`NetworkError::Architecture`] if a
    /// layer's input width differs from the previous
    /// layer's output width.
    pub fn new(layers: Vec<Layer>) -> Result<Network> {
        if layers.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].outputs() != pair[1].inputs() {
                return Err(NetworkError::Architecture {
                    layer: i + 1,
                    expected: pair[0].outputs(),
                    found: pair[1].inputs(),
                });
            }
        }
        Ok(Network { layers })
    }

    /// Creates a randomly initialized network from a list
    /// of widths: the input width followed by the neuron
    /// count of each layer.
    ///
    /// # Errors
    /// Returns [`NetworkError::EmptyNetwork`] if fewer
    /// than two widths are given, and [`NetworkError::ZeroWidth`]
    /// if any of them is 0.
    ///
    /// # Examples
    /// ```
    /// use oxibga_nn::networks::Network;
    ///
    /// let network = Network::random(&[13, 10, 8, 4], &mut rand::thread_rng()).unwrap();
    /// assert_eq!(network.inputs(), 13);
    /// assert_eq!(network.outputs(), 4);
    /// assert_eq!(network.size(), 10 * 14 + 8 * 11 + 4 * 9);
    /// ```
    pub fn random<R: Rng + ?Sized>(widths: &[usize], rng: &mut R) -> Result<Network> {
        if widths.len() < 2 {
            return Err(NetworkError::EmptyNetwork);
        }
        let layers = widths
            .windows(2)
            .map(|w| Layer::random(w[0], w[1], rng))
            .collect::<Result<_>>()?;
        Network::new(layers)
    }

    /// Returns the number of network inputs.
    pub fn inputs(&self) -> usize {
        self.layers[0].inputs()
    }

    /// Returns the number of network outputs.
    pub fn outputs(&self) -> usize {
        self.layers[self.layers.len() - 1].outputs()
    }

    /// Returns the network's layers, input side first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the total number of weights in the network,
    /// which is also the length of [`flattened_weights`].
    ///
    /// [`flattened_weights`]: Network::flattened_weights
    pub fn size(&self) -> usize {
        self.layers.iter().map(Layer::size).sum()
    }

    /// Feeds `inputs` through every layer in order,
    /// returning the outputs of the last one.
    ///
    /// # Errors
    /// Returns [`NetworkError::Dimension`] if `inputs`
    /// doesn't match the network's input count.
    ///
    /// # Examples
    /// ```
    /// use oxibga_nn::networks::{sigmoid, Layer, Network, Neuron};
    ///
    /// let network = Network::new(vec![
    ///     Layer::new(vec![Neuron::with_weights(vec![1.0, 0.0]).unwrap()]).unwrap(),
    ///     Layer::new(vec![Neuron::with_weights(vec![1.0, 0.0]).unwrap()]).unwrap(),
    /// ])
    /// .unwrap();
    /// assert_eq!(network.execute(&[0.3]).unwrap(), vec![sigmoid(sigmoid(0.3))]);
    /// ```
    pub fn execute(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.execute_upto(self.layers.len() - 1, inputs)
    }

    /// Feeds `inputs` through layers `0..=last`,
    /// returning the outputs of layer `last`.
    ///
    /// # Errors
    /// Returns [`NetworkError::LayerIndex`] if there is no
    /// layer `last`, and [`NetworkError::Dimension`] if
    /// `inputs` doesn't match the network's input count.
    pub fn execute_upto(&self, last: usize, inputs: &[f64]) -> Result<Vec<f64>> {
        let layers = self.layers.get(..=last).ok_or(NetworkError::LayerIndex {
            index: last,
            layers: self.layers.len(),
        })?;
        let (first, rest) = layers.split_first().ok_or(NetworkError::EmptyNetwork)?;
        rest.iter()
            .try_fold(first.execute(inputs)?, |values, layer| layer.execute(&values))
    }

    /// Returns every weight of the network, ordered
    /// by layer, then neuron, then input, with each
    /// neuron's bias after its input weights.
    pub fn flattened_weights(&self) -> Vec<f64> {
        let mut weights = Vec::with_capacity(self.size());
        weights.extend(self.layers.iter().flat_map(Layer::weights));
        weights
    }

    /// Overwrites every weight of the network, in the
    /// order produced by [`flattened_weights`].
    ///
    /// # Errors
    /// Returns [`NetworkError::Length`] if `weights` is
    /// not exactly [`size`] long; the network is then
    /// left untouched.
    ///
    /// [`flattened_weights`]: Network::flattened_weights
    /// [`size`]: Network::size
    ///
    /// # Examples
    /// ```
    /// use oxibga_nn::networks::Network;
    ///
    /// let mut network = Network::random(&[2, 2, 1], &mut rand::thread_rng()).unwrap();
    /// let weights: Vec<f64> = (0..9).map(f64::from).collect();
    /// network.set_weights(&weights).unwrap();
    /// assert_eq!(network.flattened_weights(), weights);
    /// assert!(network.set_weights(&weights[1..]).is_err());
    /// ```
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        if weights.len() != self.size() {
            return Err(NetworkError::Length {
                expected: self.size(),
                found: weights.len(),
            });
        }
        let mut rest = weights;
        for layer in &mut self.layers {
            rest = layer.set_weights(rest);
        }
        Ok(())
    }

    /// Returns the network's architecture and weights
    /// in serializable form.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            version: SNAPSHOT_VERSION,
            layers: self
                .layers
                .iter()
                .map(|l| LayerShape {
                    inputs: l.inputs(),
                    neurons: l.outputs(),
                })
                .collect(),
            weights: self.flattened_weights(),
        }
    }

    /// Rebuilds a network from a snapshot.
    ///
    /// # Errors
    /// Returns [`NetworkError::UnsupportedVersion`] for
    /// snapshots of another schema version, and otherwise
    /// fails as [`Network::new`] and [`Network::set_weights`]
    /// do if the snapshot describes an invalid network.
    ///
    /// # Examples
    /// ```
    /// use oxibga_nn::networks::Network;
    ///
    /// let network = Network::random(&[3, 4, 2], &mut rand::thread_rng()).unwrap();
    /// let restored = Network::from_snapshot(&network.snapshot()).unwrap();
    /// assert_eq!(network, restored);
    /// ```
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Network> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(NetworkError::UnsupportedVersion(snapshot.version));
        }
        let expected = snapshot
            .layers
            .iter()
            .map(LayerShape::size)
            .fold(0, usize::saturating_add);
        if snapshot.weights.len() != expected {
            return Err(NetworkError::Length {
                expected,
                found: snapshot.weights.len(),
            });
        }
        let mut rest = &snapshot.weights[..];
        let mut layers = Vec::with_capacity(snapshot.layers.len());
        for shape in &snapshot.layers {
            if shape.inputs == 0 || shape.neurons == 0 {
                return Err(NetworkError::ZeroWidth);
            }
            let neurons = (0..shape.neurons)
                .map(|_| {
                    let (own, tail) = rest.split_at(shape.inputs + 1);
                    rest = tail;
                    Neuron::with_weights(own.to_vec())
                })
                .collect::<Result<_>>()?;
            layers.push(Layer::new(neurons)?);
        }
        Network::new(layers)
    }
}

impl TryFrom<NetworkSnapshot> for Network {
    type Error = NetworkError;

    fn try_from(snapshot: NetworkSnapshot) -> Result<Network> {
        Network::from_snapshot(&snapshot)
    }
}

impl From<Network> for NetworkSnapshot {
    fn from(network: Network) -> NetworkSnapshot {
        network.snapshot()
    }
}
