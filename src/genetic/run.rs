//! Steady-state evolution loop: crossover or mutation each generation,
//! accept the child iff it isn't already present, replacing the worst
//! member.

use rand::Rng;
use tracing::{debug, info};

use crate::domain::instance::Instance;
use crate::domain::packing::Packing;

use super::crossover::crossover;
use super::mutation::{mutate, MutationParams};
use super::population::{Individual, Population};
use super::selection::tournament;

#[derive(Debug, Clone, Copy)]
pub struct GaParams {
    pub population_size: usize,
    pub generations: usize,
    /// Probability of crossover over mutation each generation (0.5-0.8).
    pub p_crossover: f64,
    pub tournament_size: usize,
    pub p_better: f64,
    pub mutation: MutationParams,
}

impl Default for GaParams {
    fn default() -> Self {
        GaParams {
            population_size: 100,
            generations: 2_000,
            p_crossover: 0.7,
            tournament_size: 4,
            p_better: 0.8,
            mutation: MutationParams::default(),
        }
    }
}

/// Runs the genetic algorithm and returns the best packing found, plus the
/// number of generations actually run (bounded by `params.generations` or
/// cut short once a member reaches `instance.best_known()` bins).
pub fn run(instance: &Instance, params: GaParams, rng: &mut impl Rng) -> (Packing, usize) {
    let mut population = Population::seed(instance, params.population_size, rng);
    let mut generation = 0usize;

    while generation < params.generations {
        if instance.best_known() > 0 && population.best_bin_count() <= instance.best_known() {
            break;
        }

        let child_bins = if rng.gen_bool(params.p_crossover) {
            let a = tournament(&population, params.tournament_size, params.p_better, rng);
            let b = tournament(&population, params.tournament_size, params.p_better, rng);
            crossover(instance, population.individual(a).bins(), population.individual(b).bins(), rng)
        } else {
            let a = tournament(&population, params.tournament_size, params.p_better, rng);
            mutate(instance, population.individual(a).bins(), &params.mutation, rng)
        };

        generation += 1;

        if population.contains(&child_bins) {
            continue;
        }
        let worst = population.worst_index();
        population.replace(worst, Individual::new(child_bins));
        debug!(
            generation,
            k = population.best_bin_count(),
            "genetic algorithm: accepted child"
        );
    }

    let best = population.best();
    let packing = Packing::from_bins(instance, best.bins())
        .expect("every accepted individual's bins satisfy I1-I4");
    info!(generation, k = packing.k(), "genetic algorithm: finished");
    (packing, generation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn converges_to_a_valid_packing_within_the_generation_budget() {
        let instance = Instance::new(10.0, vec![1.0, 3.0, 4.0, 5.0, 5.0, 6.0, 7.0, 9.0], 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let params = GaParams {
            population_size: 10,
            generations: 200,
            ..GaParams::default()
        };

        let (best, generations) = run(&instance, params, &mut rng);
        best.validate(&instance).expect("I1-I4 must hold");
        assert!(generations <= 200);
        assert!(best.k() >= instance.lower_bound());
    }
}
