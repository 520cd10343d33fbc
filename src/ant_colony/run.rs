//! Ant colony optimisation: each generation builds `ants_per_generation`
//! packings, mutates each once to diversify, reinforces the trail along
//! the generation's best solution, and tracks the best-so-far overall.

use rand::Rng;
use tracing::{debug, info};

use crate::domain::instance::Instance;
use crate::domain::packing::Packing;
use crate::domain::quality::{mean_squared_fill, PackingLike};
use crate::genetic::mutation::{mutate, MutationParams};

use super::construct::construct;
use super::pheromone::{MinTrail, Pheromone};

#[derive(Debug, Clone, Copy)]
pub struct AcoParams {
    pub ants_per_generation: usize,
    pub generations: usize,
    /// Evaporation rate (spec.md §4.7: 0.75).
    pub rho: f64,
    pub min_trail: MinTrail,
    pub mutation: MutationParams,
}

impl Default for AcoParams {
    fn default() -> Self {
        AcoParams {
            ants_per_generation: 20,
            generations: 200,
            rho: 0.75,
            min_trail: MinTrail::Zero,
            mutation: MutationParams::default(),
        }
    }
}

fn score(instance: &Instance, packing: &Packing) -> f64 {
    mean_squared_fill(instance, &PackingLike::from(packing))
}

pub fn run(instance: &Instance, params: AcoParams, rng: &mut impl Rng) -> (Packing, usize) {
    let mut pheromone = Pheromone::new(params.rho, params.min_trail);
    let mut best: Option<Packing> = None;
    let mut generation = 0usize;

    while generation < params.generations {
        if let Some(ref b) = best {
            if instance.best_known() > 0 && b.k() <= instance.best_known() {
                break;
            }
        }

        let mut generation_best: Option<Packing> = None;
        for _ in 0..params.ants_per_generation {
            let bins = construct(instance, &pheromone, rng);
            let mutated = mutate(instance, &bins, &params.mutation, rng);
            let packing = Packing::from_bins(instance, &mutated)
                .expect("ant construction + mutation always produces I1-I4");

            let improves = generation_best
                .as_ref()
                .map_or(true, |current| score(instance, &packing) > score(instance, current));
            if improves {
                generation_best = Some(packing);
            }
        }

        if let Some(gb) = generation_best {
            let fitness = score(instance, &gb);
            pheromone.evaporate();
            for b in 0..gb.k() {
                let items = gb.items_in_bin(b);
                for i in 0..items.len() {
                    for j in (i + 1)..items.len() {
                        let wi = instance.item_weight(items[i]);
                        let wj = instance.item_weight(items[j]);
                        pheromone.reinforce(wi, wj, fitness);
                    }
                }
            }

            let improves = best.as_ref().map_or(true, |current| {
                gb.k() < current.k() || (gb.k() == current.k() && score(instance, &gb) > score(instance, current))
            });
            if improves {
                debug!(generation, k = gb.k(), "ant colony: new best");
                best = Some(gb);
            }
        }

        generation += 1;
    }

    let best = best.expect("at least one generation runs for any non-empty instance");
    info!(generations = generation, k = best.k(), "ant colony: finished");
    (best, generation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn converges_to_a_valid_packing() {
        let instance = Instance::new(10.0, vec![1.0, 3.0, 4.0, 5.0, 5.0, 6.0, 7.0, 9.0], 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let params = AcoParams {
            ants_per_generation: 5,
            generations: 10,
            ..AcoParams::default()
        };

        let (best, generations) = run(&instance, params, &mut rng);
        best.validate(&instance).expect("I1-I4 must hold");
        assert!(generations <= 10);
        assert!(best.k() >= instance.lower_bound());
    }
}
