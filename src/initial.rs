//! Initial-packing generators: `FFRandom` and the deterministic fallback.
//!
//! Grounded in `RandomGenerators.h`'s `FFRandom` in
//! `original_source/bin_packing`, rewritten onto an injected `rand::Rng`
//! instead of global `std::srand` (see REDESIGN FLAGS in DESIGN.md).

use rand::Rng;

use crate::domain::bin::Bin;
use crate::domain::instance::Instance;
use crate::domain::packing::Packing;

/// Sequential first-fit with per-bin Bernoulli skipping (p=0.5): items are
/// offered to existing bins in order, each bin independently coin-flipped
/// for whether it's even considered; the item goes into the first
/// considered bin it fits in, or opens a new bin if none took it.
pub fn ff_random(instance: &Instance, rng: &mut impl Rng) -> Packing {
    let mut bins: Vec<Bin> = Vec::new();

    for (item, &w) in instance.items().iter().enumerate() {
        let mut placed = false;
        for bin in bins.iter_mut() {
            if !rng.gen_bool(0.5) {
                continue;
            }
            if bin.can_insert((item, w)) {
                bin.insert((item, w)).expect("can_insert just confirmed this");
                placed = true;
                break;
            }
        }
        if !placed {
            bins.push(Bin::with_item(instance.capacity(), (item, w)));
        }
    }

    Packing::from_bins(instance, &bins).expect("ff_random always produces a valid packing")
}

/// Same as [`ff_random`] but items are offered in weight-descending order
/// first (first-fit-decreasing with the same Bernoulli skipping), used to
/// seed the genetic algorithm's initial population.
pub fn ff_random_decreasing(instance: &Instance, rng: &mut impl Rng) -> Packing {
    let mut order: Vec<usize> = (0..instance.items_count()).collect();
    order.sort_by(|&a, &b| instance.item_weight(b).partial_cmp(&instance.item_weight(a)).unwrap());

    let mut bins: Vec<Bin> = Vec::new();
    for item in order {
        let w = instance.item_weight(item);
        let mut placed = false;
        for bin in bins.iter_mut() {
            if !rng.gen_bool(0.5) {
                continue;
            }
            if bin.can_insert((item, w)) {
                bin.insert((item, w)).expect("can_insert just confirmed this");
                placed = true;
                break;
            }
        }
        if !placed {
            bins.push(Bin::with_item(instance.capacity(), (item, w)));
        }
    }

    Packing::from_bins(instance, &bins).expect("ff_random_decreasing always produces a valid packing")
}

/// Worst-case fallback: one item per bin. Used for degenerate instances
/// (e.g. every item weighs exactly `capacity`) or as a deterministic
/// baseline that doesn't depend on the PRNG.
pub fn one_item_per_bin(instance: &Instance) -> Packing {
    let assignment: Vec<usize> = (0..instance.items_count()).collect();
    Packing::from_assignment(instance, assignment)
        .expect("one item per bin trivially satisfies I1-I4")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn ff_random_is_reproducible_given_a_seed() {
        let instance = Instance::new(10.0, vec![1.0, 3.0, 4.0, 5.0, 5.0, 6.0, 7.0, 9.0], 4).unwrap();
        let mut a = ChaCha8Rng::seed_from_u64(0);
        let mut b = ChaCha8Rng::seed_from_u64(0);
        let pa = ff_random(&instance, &mut a);
        let pb = ff_random(&instance, &mut b);
        assert_eq!(pa.assignment(), pb.assignment());
    }

    #[test]
    fn one_item_per_bin_has_k_equal_n() {
        let instance = Instance::new(10.0, vec![10.0, 10.0, 10.0], 3).unwrap();
        let p = one_item_per_bin(&instance);
        assert_eq!(p.k(), 3);
    }
}
