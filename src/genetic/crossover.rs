//! Bin-segment crossover: splice a contiguous run of one parent's bins into
//! the other, strip the moved items out of the surviving bins, and repair
//! whatever got orphaned.

use std::collections::HashSet;

use rand::Rng;

use crate::domain::bin::{Bin, ItemPair};
use crate::domain::instance::Instance;
use crate::repair;

/// Picks `[lo, hi)` uniformly among the non-empty sub-ranges of `0..len`.
fn pick_range(rng: &mut impl Rng, len: usize) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }
    let lo = rng.gen_range(0..len);
    let hi = rng.gen_range((lo + 1)..=len);
    (lo, hi)
}

/// Produces one child from parents `a` and `b`: a cut `[a1,a2)` of `a`'s
/// bins is spliced into `b` at the position of `b`'s own cut `[b1,b2)`
/// (which is dropped). Any surviving `b` bin that loses an item to the
/// splice is entirely broken up and its remaining items repaired back in.
pub fn crossover(instance: &Instance, a: &[Bin], b: &[Bin], rng: &mut impl Rng) -> Vec<Bin> {
    if a.is_empty() {
        return b.to_vec();
    }
    if b.is_empty() {
        return a.to_vec();
    }

    let (a1, a2) = pick_range(rng, a.len());
    let (b1, b2) = pick_range(rng, b.len());

    let moved: HashSet<usize> = a[a1..a2]
        .iter()
        .flat_map(|bin| bin.items().iter().map(|item| item.0))
        .collect();

    let mut child: Vec<Bin> = Vec::new();
    let mut loose: Vec<ItemPair> = Vec::new();
    let mut spliced_in = false;

    for idx in 0..b.len() {
        if idx == b1 {
            child.extend(a[a1..a2].iter().cloned());
            spliced_in = true;
        }
        if idx >= b1 && idx < b2 {
            continue;
        }
        let mut bin = b[idx].clone();
        let mut lost_an_item = false;
        for &item in b[idx].items() {
            if moved.contains(&item.0) {
                bin.remove(item).expect("item is a resident of this bin");
                lost_an_item = true;
            }
        }
        if lost_an_item {
            loose.extend(bin.items().iter().copied());
        } else {
            child.push(bin);
        }
    }
    if !spliced_in {
        child.extend(a[a1..a2].iter().cloned());
    }

    repair::fit(instance, &mut child, loose);
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instance::Instance;
    use crate::initial::ff_random_decreasing;
    use crate::domain::packing::Packing;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn child_covers_every_item_exactly_once() {
        let instance = Instance::new(10.0, vec![1.0, 3.0, 4.0, 5.0, 5.0, 6.0, 7.0, 9.0], 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let a = ff_random_decreasing(&instance, &mut rng).to_bins(&instance);
        let b = ff_random_decreasing(&instance, &mut rng).to_bins(&instance);

        let child = crossover(&instance, &a, &b, &mut rng);
        let packing = Packing::from_bins(&instance, &child).expect("child must satisfy I1-I4");
        packing.validate(&instance).unwrap();
    }
}
