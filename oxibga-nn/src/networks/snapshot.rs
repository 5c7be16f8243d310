use serde::{Deserialize, Serialize};

/// Schema version written by [`Network::snapshot`].
///
/// [`Network::snapshot`]: super::Network::snapshot
pub const SNAPSHOT_VERSION: u32 = 1;

/// The shape of one layer: how many inputs
/// it takes and how many neurons it has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerShape {
    pub inputs: usize,
    pub neurons: usize,
}

/// A serializable description of a network: its
/// architecture and its flattened weight vector, in
/// the same order as [`Network::flattened_weights`].
///
/// [`Network::flattened_weights`]: super::Network::flattened_weights
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub version: u32,
    pub layers: Vec<LayerShape>,
    pub weights: Vec<f64>,
}

impl LayerShape {
    /// Returns the number of weights of a layer of this shape.
    pub fn size(&self) -> usize {
        self.neurons.saturating_mul(self.inputs.saturating_add(1))
    }
}
