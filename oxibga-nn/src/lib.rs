//! # OxiBGA-NN
//! Feedforward sigmoid networks for the [`oxibga`] genetic algorithm.
//!
//! Provides a [`Network`] type whose weights can be read and written
//! as one flat vector, and the [`decoding`] adapters that evolve that
//! vector: a gene per weight, and a [`NetworkOracle`] that loads each
//! candidate weight vector into a network before scoring it.
//!
//! [`Network`]: crate::networks::Network
//! [`NetworkOracle`]: crate::decoding::NetworkOracle
//!
//! # Example usage: Evolution of an AND gate
//! ```
//! use oxibga::{GeneticAlgorithm, PopulationConfig};
//! use oxibga_nn::decoding::network_decoder;
//! use oxibga_nn::networks::Network;
//! use std::num::NonZeroUsize;
//!
//! fn main() {
//!     let mut rng = oxibga::rng::seeded(Some(5));
//!     let template = Network::random(&[2, 1], &mut rng).unwrap();
//!
//!     let decoder = network_decoder(template, 16, -10.0, 10.0, |network| {
//!         let mut error = 0.0;
//!         for (inputs, target) in [
//!             ([0.0, 0.0], 0.0),
//!             ([0.0, 1.0], 0.0),
//!             ([1.0, 0.0], 0.0),
//!             ([1.0, 1.0], 1.0),
//!         ] {
//!             error += (network.execute(&inputs)?[0] - target).powi(2);
//!         }
//!         Ok(error)
//!     })
//!     .unwrap();
//!
//!     let config = PopulationConfig {
//!         size: NonZeroUsize::new(50).unwrap(),
//!         crossover_rate: 0.9,
//!         mutation_rate: 0.02,
//!         elitism_fraction: 0.1,
//!         tournament_size: NonZeroUsize::new(3).unwrap(),
//!         max_generations: 60,
//!     };
//!     let best = GeneticAlgorithm::new(&decoder, config)
//!         .unwrap()
//!         .run(&mut rng, &mut ())
//!         .unwrap();
//!
//!     let phenotype = decoder.phenotype_of(best.genotype()).unwrap();
//!     let network = decoder.oracle().network_of(&phenotype).unwrap();
//!     println!("{}", serde_json::to_string(&network).unwrap());
//!     let high = network.execute(&[1.0, 1.0]).unwrap()[0];
//!     let low = network.execute(&[0.0, 0.0]).unwrap()[0];
//!     assert!(high > low);
//! }
//! ```

pub mod decoding;
pub mod networks;
