//! Hill climbing: repeatedly adopt the best neighbour under a
//! [`QualityOrder`] until none is a strict improvement.
//!
//! Grounded in `Algorithms.cpp`'s `hillClimbing` in
//! `original_source/bin_packing`, which likewise stops at the first local
//! optimum rather than accepting a worsening step (that's tabu's job).

use tracing::{debug, info};

use crate::domain::instance::Instance;
use crate::domain::packing::Packing;
use crate::domain::quality::{PackingLike, QualityOrder};

/// Runs hill climbing from `initial` and returns the local optimum found,
/// plus the number of adopted steps (monotone in `QualityOrder`, so this
/// always terminates on a finite instance).
pub fn hill_climb(instance: &Instance, initial: Packing, order: QualityOrder) -> (Packing, usize) {
    let mut current = initial;
    let mut steps = 0usize;

    loop {
        let neighbours = current.neighbourhood(instance);
        let best_idx = match order.best_neighbour(instance, &neighbours) {
            Some(idx) => idx,
            None => break,
        };
        let best = &neighbours[best_idx];

        let improves = order.less(
            instance,
            &PackingLike::from(best),
            &PackingLike::from(&current),
        );
        if !improves {
            break;
        }

        current = best.materialize(&current);
        steps += 1;
        debug!(step = steps, k = current.k(), "hill climbing: adopted neighbour");
    }

    info!(steps, k = current.k(), "hill climbing: converged to local optimum");
    (current, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instance::Instance;
    use crate::initial::ff_random;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn terminates_and_returns_a_local_optimum() {
        let instance = Instance::new(10.0, vec![1.0, 3.0, 4.0, 5.0, 5.0, 6.0, 7.0, 9.0], 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let initial = ff_random(&instance, &mut rng);

        let (result, _steps) = hill_climb(&instance, initial, QualityOrder::Lexicographic);

        result.validate(&instance).expect("I1-I4 must hold");
        let neighbours = result.neighbourhood(&instance);
        assert!(
            order_finds_no_improvement(&instance, &result, &neighbours),
            "a hill-climbing result must be a local optimum"
        );
        let total: f64 = instance.items().iter().sum();
        let fill_total: f64 = result.fill().iter().sum();
        assert!((total - fill_total).abs() < 1e-6);
    }

    fn order_finds_no_improvement(
        instance: &Instance,
        current: &Packing,
        neighbours: &[crate::domain::packing::Neighbour],
    ) -> bool {
        let order = QualityOrder::Lexicographic;
        !neighbours.iter().any(|n| {
            order.less(
                instance,
                &PackingLike::from(n),
                &PackingLike::from(current),
            )
        })
    }

    #[test]
    fn single_item_instance_returns_one_bin() {
        let instance = Instance::new(10.0, vec![4.0], 1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let initial = ff_random(&instance, &mut rng);
        let (result, _) = hill_climb(&instance, initial, QualityOrder::Lexicographic);
        assert_eq!(result.k(), 1);
        assert_eq!(result.fill(), &[4.0]);
    }
}
