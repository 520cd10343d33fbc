//! Targeted mutation: break up the emptiest bin (always), optionally the
//! fullest bin too, plus a handful of random bins, then repair.

use rand::Rng;

use crate::domain::bin::{Bin, ItemPair};
use crate::domain::instance::Instance;
use crate::repair;

#[derive(Debug, Clone, Copy)]
pub struct MutationParams {
    /// Probability of also removing the fullest bin (spec.md §4.6: 0.2).
    pub remove_fullest_prob: f64,
    /// Additional random bins removed after the emptiest (and maybe
    /// fullest) bin. spec.md §4.6: 5 in the long-term variant, or
    /// `floor(sqrt(n))`.
    pub extra_random_bins: usize,
}

impl Default for MutationParams {
    fn default() -> Self {
        MutationParams {
            remove_fullest_prob: 0.2,
            extra_random_bins: 5,
        }
    }
}

/// `floor(sqrt(n))`, the alternative `extra_random_bins` sizing spec.md
/// offers as a configuration choice.
pub fn sqrt_scaled_extra_bins(items_count: usize) -> usize {
    (items_count as f64).sqrt().floor() as usize
}

fn remove_bin_by(bins: &mut Vec<Bin>, pick: impl Fn(&Bin, &Bin) -> std::cmp::Ordering) -> Option<Bin> {
    if bins.is_empty() {
        return None;
    }
    let idx = (0..bins.len())
        .min_by(|&i, &j| pick(&bins[i], &bins[j]))
        .expect("bins is non-empty");
    Some(bins.remove(idx))
}

pub fn mutate(
    instance: &Instance,
    bins: &[Bin],
    params: &MutationParams,
    rng: &mut impl Rng,
) -> Vec<Bin> {
    let mut bins = bins.to_vec();
    let mut loose: Vec<ItemPair> = Vec::new();

    if bins.len() > 1 && rng.gen_bool(params.remove_fullest_prob) {
        if let Some(fullest) = remove_bin_by(&mut bins, |a, b| b.size().partial_cmp(&a.size()).unwrap()) {
            loose.extend(fullest.items().iter().copied());
        }
    }

    if let Some(emptiest) = remove_bin_by(&mut bins, |a, b| a.size().partial_cmp(&b.size()).unwrap()) {
        loose.extend(emptiest.items().iter().copied());
    }

    for _ in 0..params.extra_random_bins {
        if bins.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..bins.len());
        loose.extend(bins.remove(idx).items().iter().copied());
    }

    repair::fit(instance, &mut bins, loose);
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instance::Instance;
    use crate::domain::packing::Packing;
    use crate::initial::ff_random_decreasing;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn mutated_child_is_a_valid_packing() {
        let instance = Instance::new(10.0, vec![1.0, 3.0, 4.0, 5.0, 5.0, 6.0, 7.0, 9.0], 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let parent = ff_random_decreasing(&instance, &mut rng).to_bins(&instance);

        let params = MutationParams::default();
        let child = mutate(&instance, &parent, &params, &mut rng);

        let packing = Packing::from_bins(&instance, &child).expect("child must satisfy I1-I4");
        packing.validate(&instance).unwrap();
    }
}
