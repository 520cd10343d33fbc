//! Constructs one ant's packing item-by-item under pheromone guidance.

use rand::Rng;

use crate::domain::bin::{item_pairs, Bin, ItemPair};
use crate::domain::instance::Instance;

use super::pheromone::Pheromone;

const BETA: f64 = 2.0;

fn roulette(weights: &[f64], rng: &mut impl Rng) -> usize {
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return weights.len() - 1;
    }
    let mut r = rng.gen::<f64>() * sum;
    for (i, &w) in weights.iter().enumerate() {
        r -= w;
        if r <= 0.0 {
            return i;
        }
    }
    weights.len() - 1
}

/// Builds bins by repeatedly picking, among the items that still fit the
/// open bin, one proportional to `trail(bin, item) * weight(item)^beta`;
/// falls back to `weight(item)^beta` alone if every candidate's trail sums
/// to zero.
pub fn construct(instance: &Instance, pheromone: &Pheromone, rng: &mut impl Rng) -> Vec<Bin> {
    let mut loose: Vec<ItemPair> = item_pairs(instance);
    loose.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    let mut bins: Vec<Bin> = Vec::new();
    let mut current = Bin::empty(instance.capacity());

    while !loose.is_empty() {
        let candidates: Vec<usize> = loose
            .iter()
            .enumerate()
            .filter(|&(_, &item)| current.can_insert(item))
            .map(|(idx, _)| idx)
            .collect();

        if candidates.is_empty() {
            bins.push(std::mem::replace(&mut current, Bin::empty(instance.capacity())));
            continue;
        }

        let weights: Vec<f64> = candidates
            .iter()
            .map(|&idx| {
                let item = loose[idx];
                let tau = if current.items().is_empty() {
                    1.0
                } else {
                    current
                        .items()
                        .iter()
                        .map(|&resident| pheromone.get(item.1, resident.1))
                        .sum::<f64>()
                        / current.items().len() as f64
                };
                tau * item.1.powf(BETA)
            })
            .collect();

        let sum: f64 = weights.iter().sum();
        let chosen_local = if sum > 0.0 {
            roulette(&weights, rng)
        } else {
            let fallback: Vec<f64> = candidates.iter().map(|&idx| loose[idx].1.powf(BETA)).collect();
            roulette(&fallback, rng)
        };

        let item = loose.remove(candidates[chosen_local]);
        current.insert(item).expect("can_insert just confirmed this fits");
    }

    if current.size() > 0.0 {
        bins.push(current);
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instance::Instance;
    use crate::domain::packing::Packing;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn construction_always_yields_a_valid_packing() {
        let instance = Instance::new(10.0, vec![1.0, 3.0, 4.0, 5.0, 5.0, 6.0, 7.0, 9.0], 4).unwrap();
        let pheromone = Pheromone::new(0.75, super::super::pheromone::MinTrail::Zero);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let bins = construct(&instance, &pheromone, &mut rng);
        let packing = Packing::from_bins(&instance, &bins).expect("construction must satisfy I1-I4");
        packing.validate(&instance).unwrap();
    }
}
