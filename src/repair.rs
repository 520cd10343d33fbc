//! `fit`: places loose items into partial bins via one-for-one and
//! two-for-one replacement followed by best-fit-decreasing for residuals.
//!
//! Grounded in `Algorithms.cpp`'s `Bin::replaceOne`/`replaceTwo` dance in
//! `original_source/bin_packing`, translated onto [`Bin`]'s already-sorted
//! resident list (`domain::bin::Bin::replace_one`/`replace_two`).

use tracing::trace;

use crate::domain::bin::{Bin, ItemPair};
use crate::domain::instance::Instance;

/// Places every item in `loose` into `bins`, opening new bins as needed.
///
/// Preconditions: every bin in `bins` already satisfies I2 for its own
/// items; every weight in `loose` is positive and `<= instance.capacity()`.
/// Postcondition: I1-I4 hold for the union of `bins` and any bins opened
/// here (checked by callers via `Packing::from_bins`, since `fit` itself
/// works on the flatter `Bin` representation and has no item count to
/// validate against in isolation).
pub fn fit(instance: &Instance, bins: &mut Vec<Bin>, mut loose: Vec<ItemPair>) {
    // Phase 1: walk from the back, try cheap replacements before resorting
    // to best-fit-decreasing. `i` is fixed to the length at loop entry so
    // any item pushed onto the back by `replace_two` is left for phase 2
    // rather than revisited by this walk.
    let mut i = loose.len();
    while i > 0 {
        i -= 1;
        let x = loose[i];

        let mut replaced = false;
        for bin in bins.iter_mut() {
            if bin.has(x) {
                continue;
            }
            if let Some(freed) = bin.replace_one(x) {
                trace!(item = x.0, freed = freed.0, "repair: replace-one");
                loose[i] = freed;
                replaced = true;
                break;
            }
        }
        if replaced {
            continue;
        }

        for bin in bins.iter_mut() {
            if bin.has(x) {
                continue;
            }
            if let Some((first, second)) = bin.replace_two(x) {
                trace!(item = x.0, a = first.0, b = second.0, "repair: replace-two");
                loose[i] = first;
                loose.push(second);
                break;
            }
        }
    }

    // Phase 2: best-fit-decreasing on whatever remains in `loose`.
    loose.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
    for item in loose {
        let mut best: Option<(usize, f64)> = None;
        for (idx, bin) in bins.iter().enumerate() {
            if let Some(slack) = bin.fits(item) {
                if best.map_or(true, |(_, s)| slack < s) {
                    best = Some((idx, slack));
                }
            }
        }
        match best {
            Some((idx, _)) => bins[idx].insert(item).expect("fits() already confirmed capacity"),
            None => {
                trace!(item = item.0, "repair: opening new bin");
                bins.push(Bin::with_item(instance.capacity(), item));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instance::Instance;

    fn instance(capacity: f64, items: Vec<f64>) -> Instance {
        Instance::new(capacity, items, 0).unwrap()
    }

    #[test]
    fn mass_is_conserved_and_no_bin_overflows() {
        let instance = instance(10.0, vec![1.0, 3.0, 4.0, 5.0, 5.0, 6.0, 7.0, 9.0]);
        let mut bins = vec![
            Bin::with_item(10.0, (0, 1.0)),
            Bin::with_item(10.0, (1, 3.0)),
        ];
        let loose = vec![(2, 4.0), (3, 5.0), (4, 5.0), (5, 6.0), (6, 7.0), (7, 9.0)];
        let before: f64 = bins.iter().map(|b| b.size()).sum::<f64>()
            + loose.iter().map(|i| i.1).sum::<f64>();

        fit(&instance, &mut bins, loose);

        let after: f64 = bins.iter().map(|b| b.size()).sum();
        assert!((before - after).abs() < 1e-9);
        for bin in &bins {
            assert!(bin.size() <= instance.capacity() + 1e-9);
        }
    }

    #[test]
    fn every_item_ends_up_placed_exactly_once() {
        let instance = instance(10.0, vec![2.0, 2.0, 2.0, 2.0, 2.0, 9.0]);
        let mut bins = vec![Bin::with_item(10.0, (5, 9.0))];
        let loose: Vec<ItemPair> = (0..5).map(|i| (i, 2.0)).collect();
        fit(&instance, &mut bins, loose);

        let mut seen: Vec<usize> = bins.iter().flat_map(|b| b.items().iter().map(|i| i.0)).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn opens_a_new_bin_when_nothing_fits() {
        let instance = instance(10.0, vec![9.0, 9.0]);
        let mut bins = vec![Bin::with_item(10.0, (0, 9.0))];
        fit(&instance, &mut bins, vec![(1, 9.0)]);
        assert_eq!(bins.len(), 2);
    }
}
