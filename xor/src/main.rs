use oxibga::logging::TableReporter;
use oxibga::{GeneticAlgorithm, OracleError, PopulationConfig};
use oxibga_nn::decoding::network_decoder;
use oxibga_nn::networks::Network;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

const CASES: [([f64; 2], f64); 4] = [
    ([0.0, 0.0], 0.0),
    ([0.0, 1.0], 1.0),
    ([1.0, 0.0], 1.0),
    ([1.0, 1.0], 0.0),
];

/// Evolves the weights of a sigmoid network until it computes XOR.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON file holding the population configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the random generator; a fresh one is used if absent
    #[arg(long)]
    seed: Option<u64>,
    /// Where to write the trained network
    #[arg(long, default_value = "xor-network.ron")]
    output: PathBuf,
    /// Bits encoding each weight
    #[arg(long, default_value_t = 40)]
    bits: usize,
    /// Weights are searched for in [-bound, bound]
    #[arg(long, default_value_t = 10.0)]
    bound: f64,
    /// Neurons in the hidden layer
    #[arg(long, default_value_t = 2)]
    hidden: usize,
}

fn default_config() -> PopulationConfig {
    PopulationConfig {
        size: NonZeroUsize::new(100).unwrap(),
        crossover_rate: 0.9,
        mutation_rate: 0.01,
        elitism_fraction: 0.1,
        tournament_size: NonZeroUsize::new(3).unwrap(),
        max_generations: 200,
    }
}

fn load_config(args: &Args) -> anyhow::Result<PopulationConfig> {
    match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ron::from_str(&text).with_context(|| format!("invalid config in {}", path.display()))
        }
        None => Ok(default_config()),
    }
}

/// Sum of squared errors over the XOR truth table.
fn xor_error(network: &Network) -> Result<f64, OracleError> {
    let mut error = 0.0;
    for (inputs, target) in CASES {
        error += (network.execute(&inputs)?[0] - target).powi(2);
    }
    Ok(error)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut rng = oxibga::rng::seeded(args.seed);

    let template = Network::random(&[2, args.hidden, 1], &mut rng)?;
    let decoder = network_decoder(template, args.bits, -args.bound, args.bound, xor_error)?;
    info!(
        weights = decoder.genes().len(),
        bits = decoder.total_bits(),
        "evolving xor network"
    );

    let mut reporter = TableReporter::new(io::stdout().lock());
    let best = GeneticAlgorithm::new(&decoder, config)?.run(&mut rng, &mut reporter)?;
    reporter.finish()?;

    let network = decoder
        .oracle()
        .network_of(&decoder.phenotype_of(best.genotype())?)?;
    for (inputs, target) in CASES {
        info!(?inputs, target, output = network.execute(&inputs)?[0]);
    }

    let snapshot = ron::ser::to_string_pretty(&network.snapshot(), ron::ser::PrettyConfig::new())?;
    fs::write(&args.output, snapshot)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(fitness = best.fitness(), output = %args.output.display(), "saved trained network");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_parses() {
        let config: PopulationConfig = ron::from_str(include_str!("../config.ron")).unwrap();
        assert_eq!(config, default_config());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn perfect_network_scores_near_zero() {
        let snapshot = oxibga_nn::networks::NetworkSnapshot {
            version: oxibga_nn::networks::SNAPSHOT_VERSION,
            layers: vec![
                oxibga_nn::networks::LayerShape { inputs: 2, neurons: 2 },
                oxibga_nn::networks::LayerShape { inputs: 2, neurons: 1 },
            ],
            weights: vec![20.0, 20.0, -10.0, -20.0, -20.0, 30.0, 20.0, 20.0, -30.0],
        };
        let network = Network::from_snapshot(&snapshot).unwrap();
        assert!(xor_error(&network).unwrap() < 1e-6);
    }
}
