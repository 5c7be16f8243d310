//! Glue between networks and the genetic algorithm: one
//! [`Gene`] per network weight, and a fitness oracle that
//! loads each phenotype into a network before scoring it.
use crate::networks::{Network, NetworkError};

use oxibga::{Decoder, Fitness, Gene, OracleError};

/// Returns one gene per weight of `network`, in flattened
/// weight order, each `bits` wide over `[lower, upper]`.
///
/// Genes are named after the weight they encode, e.g.
/// `"layer1.neuron0.weight2"`, or `"layer1.neuron0.bias"`.
///
/// # Errors
/// Fails as [`Gene::new`] does on invalid bounds or widths.
///
/// # Examples
/// ```
/// use oxibga_nn::decoding::network_genes;
/// use oxibga_nn::networks::Network;
///
/// let network = Network::random(&[2, 2, 1], &mut rand::thread_rng()).unwrap();
/// let genes = network_genes(&network, 40, -3.0, 3.0).unwrap();
/// assert_eq!(genes.len(), network.size());
/// assert_eq!(genes[2].name(), Some("layer0.neuron0.bias"));
/// ```
pub fn network_genes(
    network: &Network,
    bits: usize,
    lower: f64,
    upper: f64,
) -> oxibga::Result<Vec<Gene>> {
    let mut genes = Vec::with_capacity(network.size());
    for (l, layer) in network.layers().iter().enumerate() {
        for (n, neuron) in layer.neurons().iter().enumerate() {
            for w in 0..neuron.inputs() {
                genes.push(Gene::named(
                    format!("layer{}.neuron{}.weight{}", l, n, w),
                    bits,
                    lower,
                    upper,
                )?);
            }
            genes.push(Gene::named(
                format!("layer{}.neuron{}.bias", l, n),
                bits,
                lower,
                upper,
            )?);
        }
    }
    Ok(genes)
}

/// A fitness oracle scoring phenotypes as network weights.
///
/// Each evaluation works on its own copy of the template
/// network, so evaluations can run concurrently.
#[derive(Clone, Debug)]
pub struct NetworkOracle<S> {
    template: Network,
    score: S,
}

impl<S> NetworkOracle<S>
where
    S: Fn(&Network) -> Result<f64, OracleError> + Sync,
{
    /// Creates an oracle that scores networks shaped
    /// like `template` with `score`.
    pub fn new(template: Network, score: S) -> NetworkOracle<S> {
        NetworkOracle { template, score }
    }

    /// Returns the network whose architecture is used.
    pub fn template(&self) -> &Network {
        &self.template
    }

    /// Returns a copy of the template carrying
    /// `phenotype` as its weights.
    ///
    /// # Errors
    /// Returns [`NetworkError::Length`] if the phenotype
    /// doesn't have one value per network weight.
    pub fn network_of(&self, phenotype: &[f64]) -> Result<Network, NetworkError> {
        let mut network = self.template.clone();
        network.set_weights(phenotype)?;
        Ok(network)
    }
}

impl<S> Fitness for NetworkOracle<S>
where
    S: Fn(&Network) -> Result<f64, OracleError> + Sync,
{
    fn fitness(&self, phenotype: &[f64]) -> Result<f64, OracleError> {
        (self.score)(&self.network_of(phenotype)?)
    }
}

/// Builds a decoder evolving the weights of networks
/// shaped like `template`, scored by `score`.
///
/// See [`network_genes`] for the meaning of `bits`,
/// `lower` and `upper`.
///
/// # Examples
/// ```
/// use oxibga_nn::decoding::network_decoder;
/// use oxibga_nn::networks::Network;
///
/// let template = Network::random(&[1, 1], &mut rand::thread_rng()).unwrap();
/// let decoder = network_decoder(template, 16, -3.0, 3.0, |network| {
///     Ok(network.execute(&[1.0])?[0])
/// })
/// .unwrap();
///
/// // All weights at their lower bound: sigmoid(-3 - 3).
/// let fitness = decoder.fitness_of(&vec![false; 32]).unwrap();
/// assert!((fitness - oxibga_nn::networks::sigmoid(-6.0)).abs() < 1e-12);
/// ```
pub fn network_decoder<S>(
    template: Network,
    bits: usize,
    lower: f64,
    upper: f64,
    score: S,
) -> oxibga::Result<Decoder<NetworkOracle<S>>>
where
    S: Fn(&Network) -> Result<f64, OracleError> + Sync,
{
    let genes = network_genes(&template, bits, lower, upper)?;
    Ok(Decoder::new(genes, NetworkOracle::new(template, score)))
}
