use super::{NetworkError, Neuron, Result};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A set of neurons sharing the same inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayerNeurons")]
pub struct Layer {
    neurons: Vec<Neuron>,
}

/// Unchecked serialized form of a [`Layer`].
#[derive(Deserialize)]
struct LayerNeurons {
    neurons: Vec<Neuron>,
}

impl TryFrom<LayerNeurons> for Layer {
    type Error = NetworkError;

    fn try_from(raw: LayerNeurons) -> Result<Layer> {
        Layer::new(raw.neurons)
    }
}

impl Layer {
    /// Creates a layer of `neurons` randomly
    /// initialized neurons, each taking `inputs` inputs.
    ///
    /// # Errors
    /// Returns [`NetworkError::ZeroWidth`] if either
    /// count is 0.
    pub fn random<R: Rng + ?Sized>(inputs: usize, neurons: usize, rng: &mut R) -> Result<Layer> {
        if neurons == 0 {
            return Err(NetworkError::ZeroWidth);
        }
        let neurons = (0..neurons)
            .map(|_| Neuron::random(inputs, rng))
            .collect::<Result<_>>()?;
        Ok(Layer { neurons })
    }

    /// Creates a layer from existing neurons, which
    /// must all take the same number of inputs.
    ///
    /// # Errors
    /// Returns [`NetworkError::ZeroWidth`] if `neurons`
    /// is empty, and [`NetworkError::Dimension`] if the
    /// neurons' input counts differ.
    pub fn new(neurons: Vec<Neuron>) -> Result<Layer> {
        let inputs = neurons.first().ok_or(NetworkError::ZeroWidth)?.inputs();
        if let Some(odd) = neurons.iter().find(|n| n.inputs() != inputs) {
            return Err(NetworkError::Dimension {
                expected: inputs,
                found: odd.inputs(),
            });
        }
        Ok(Layer { neurons })
    }

    /// Returns the number of inputs of the layer.
    pub fn inputs(&self) -> usize {
        self.neurons[0].inputs()
    }

    /// Returns the number of outputs of the
    /// layer, one per neuron.
    pub fn outputs(&self) -> usize {
        self.neurons.len()
    }

    /// Returns the layer's neurons.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Returns the total number of weights in the layer.
    pub fn size(&self) -> usize {
        self.outputs() * (self.inputs() + 1)
    }

    /// Activates every neuron on `inputs`, returning
    /// their outputs in neuron order.
    ///
    /// # Errors
    /// Returns [`NetworkError::Dimension`] if `inputs`
    /// doesn't match the layer's input count.
    pub fn execute(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.neurons.iter().map(|n| n.activation(inputs)).collect()
    }

    pub(super) fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.neurons.iter().flat_map(|n| n.weights().iter().copied())
    }

    /// Overwrites the layer's weights from the front of
    /// `weights`, returning what's left of it.
    pub(super) fn set_weights<'w>(&mut self, weights: &'w [f64]) -> &'w [f64] {
        let mut rest = weights;
        for neuron in &mut self.neurons {
            let (own, tail) = rest.split_at(neuron.weights().len());
            neuron.weights_mut().copy_from_slice(own);
            rest = tail;
        }
        rest
    }
}
