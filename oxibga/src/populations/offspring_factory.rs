use super::*;

/// Auxiliary type for offspring generation.
/// Draws every random decision of a generation
/// (selection, crossover and mutation) up front,
/// producing the genotypes of the next generation
/// without scoring them.
pub(super) struct OffspringFactory<'a> {
    parents: &'a [Chromosome],
    config: &'a PopulationConfig,
}

impl<'a> OffspringFactory<'a> {
    pub(super) fn new(
        parents: &'a [Chromosome],
        config: &'a PopulationConfig,
    ) -> OffspringFactory<'a> {
        OffspringFactory { parents, config }
    }

    /// Generates `count` offspring genotypes, two at a time.
    /// The last pair is truncated if `count` is odd.
    pub(super) fn generate_offspring<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Vec<Genotype> {
        let mut offspring = Vec::with_capacity(count + 1);
        while offspring.len() < count {
            let parent1 = self.select(rng);
            let parent2 = self.select(rng);
            let (mut child1, mut child2) = parent1.genotype().recombine(
                parent2.genotype(),
                self.config.crossover_rate,
                rng,
            );
            child1.mutate(self.config.mutation_rate, rng);
            child2.mutate(self.config.mutation_rate, rng);
            offspring.push(child1);
            offspring.push(child2);
        }
        offspring.truncate(count);
        offspring
    }

    /// Tournament selection: draws [`tournament_size`]
    /// chromosomes uniformly with replacement and returns
    /// the fittest. Ties go to the first drawn.
    ///
    /// [`tournament_size`]: PopulationConfig::tournament_size
    pub(super) fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a Chromosome {
        let mut winner = &self.parents[rng.gen_range(0..self.parents.len())];
        for _ in 1..self.config.tournament_size.get() {
            let contestant = &self.parents[rng.gen_range(0..self.parents.len())];
            if contestant.fitness() < winner.fitness() {
                winner = contestant;
            }
        }
        winner
    }
}
