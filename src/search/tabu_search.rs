//! Tabu search: best-improvement search with a short-term memory, keyed
//! either by item (`TabuKey::Item`) or by `(bin, item)` (`TabuKey::Pair`).
//!
//! Grounded in `Algorithms.cpp`'s `tabuSearch` in
//! `original_source/bin_packing`, which keeps a `notAllowedToSet` per
//! neighbour and an aggregate tabu value used for aspiration when every
//! neighbour is forbidden. The tenure formula is an Open Question in
//! spec.md §9 — resolved here as a configurable [`TabuTenure`], see
//! DESIGN.md.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::instance::Instance;
use crate::domain::packing::{Neighbour, Packing};
use crate::domain::quality::{PackingLike, QualityOrder};

/// Which keys the short-term memory tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabuKey {
    /// A neighbour is forbidden if any item it touches has a live counter.
    Item,
    /// A neighbour is forbidden if any `(source bin, item)` pair it touches
    /// has a live counter; counters are remapped when a bin is deleted.
    Pair,
}

/// Tabu tenure formula. spec.md documents three variants used in different
/// revisions of the original; exposed as a configuration choice.
#[derive(Debug, Clone, Copy)]
pub enum TabuTenure {
    Fixed(i32),
    /// `floor(1.2 * sqrt(n))`.
    ScaledSqrtN,
    /// `floor(1.2 * sqrt(n * k0))`, `k0` = the starting packing's bin count.
    ScaledSqrtNK,
}

impl TabuTenure {
    fn resolve(self, n: usize, k0: usize) -> i32 {
        match self {
            TabuTenure::Fixed(t) => t,
            TabuTenure::ScaledSqrtN => (1.2 * (n as f64).sqrt()).floor() as i32,
            TabuTenure::ScaledSqrtNK => (1.2 * ((n * k0.max(1)) as f64).sqrt()).floor() as i32,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TabuParams {
    /// M in spec.md §4.5: at most this many adoption steps.
    pub max_steps: usize,
    pub key: TabuKey,
    pub tenure: TabuTenure,
    pub order: QualityOrder,
}

impl Default for TabuParams {
    fn default() -> Self {
        TabuParams {
            max_steps: 200,
            key: TabuKey::Pair,
            tenure: TabuTenure::ScaledSqrtNK,
            order: QualityOrder::MeanSquaredFill,
        }
    }
}

/// Short-term memory: either a per-item counter vector or a `(bin, item)`
/// counter map. The map form rotates its rows when a bin is deleted, per
/// spec.md §4.5's pair-key variant.
enum Memory {
    Item(Vec<i32>),
    Pair(HashMap<(usize, usize), i32>),
}

impl Memory {
    fn counter(&self, bin: usize, item: usize) -> i32 {
        match self {
            Memory::Item(counters) => counters[item],
            Memory::Pair(counters) => *counters.get(&(bin, item)).unwrap_or(&0),
        }
    }

    fn forbidden(&self, keys: &[(usize, usize)]) -> bool {
        keys.iter().any(|&(b, i)| self.counter(b, i) > 0)
    }

    /// Sum of (non-negative) counters over `keys`, used to pick the
    /// least-tabu neighbour when every neighbour is forbidden.
    fn aggregate(&self, keys: &[(usize, usize)]) -> i32 {
        keys.iter().map(|&(b, i)| self.counter(b, i).max(0)).sum()
    }

    fn reinforce(&mut self, keys: &[(usize, usize)], value: i32) {
        match self {
            Memory::Item(counters) => {
                for &(_, i) in keys {
                    counters[i] = value;
                }
            }
            Memory::Pair(counters) => {
                for &key in keys {
                    counters.insert(key, value);
                }
            }
        }
    }

    fn decay(&mut self) {
        match self {
            Memory::Item(counters) => counters.iter_mut().for_each(|c| *c -= 1),
            Memory::Pair(counters) => counters.values_mut().for_each(|c| *c -= 1),
        }
    }

    fn on_bin_deleted(&mut self, deleted: usize) {
        if let Memory::Pair(counters) = self {
            let remapped: HashMap<(usize, usize), i32> = counters
                .drain()
                .filter(|&((b, _), _)| b != deleted)
                .map(|((b, i), v)| (if b > deleted { (b - 1, i) } else { (b, i) }, v))
                .collect();
            *counters = remapped;
        }
    }
}

fn changed_keys(key: TabuKey, neighbour: &Neighbour) -> Vec<(usize, usize)> {
    match key {
        TabuKey::Item => neighbour.changed_items().into_iter().map(|i| (0, i)).collect(),
        TabuKey::Pair => neighbour.changed_item_keys(),
    }
}

/// Runs tabu search from `initial` for at most `params.max_steps` steps,
/// returning the best packing seen (tracked separately from the current,
/// possibly-worsening, search point) and the number of steps taken.
pub fn tabu_search(instance: &Instance, initial: Packing, params: TabuParams) -> (Packing, usize) {
    let n = instance.items_count();
    let tau = params.tenure.resolve(n, initial.k()).max(0);

    let mut memory = match params.key {
        TabuKey::Item => Memory::Item(vec![0; n]),
        TabuKey::Pair => Memory::Pair(HashMap::new()),
    };

    let mut current = initial.clone();
    let mut best = initial;
    let mut steps = 0usize;

    for _ in 0..params.max_steps {
        let neighbours = current.neighbourhood(instance);
        if neighbours.is_empty() {
            break;
        }

        let key_sets: Vec<Vec<(usize, usize)>> =
            neighbours.iter().map(|n| changed_keys(params.key, n)).collect();

        let allowed: Vec<usize> = (0..neighbours.len())
            .filter(|&i| !memory.forbidden(&key_sets[i]))
            .collect();

        let chosen_idx = if !allowed.is_empty() {
            let subset: Vec<Neighbour> = allowed.iter().map(|&i| neighbours[i].clone()).collect();
            let local_best = params
                .order
                .best_neighbour(instance, &subset)
                .expect("allowed is non-empty");
            allowed[local_best]
        } else {
            (0..neighbours.len())
                .min_by_key(|&i| memory.aggregate(&key_sets[i]))
                .expect("neighbourhood is non-empty")
        };

        let chosen = &neighbours[chosen_idx];
        let deleted_bin = chosen.deleted_bin();

        current = chosen.materialize(&current);
        steps += 1;

        if params.order.less(
            instance,
            &PackingLike::from(&current),
            &PackingLike::from(&best),
        ) {
            best = current.clone();
            debug!(step = steps, k = best.k(), "tabu search: new best-so-far");
        }

        if let Some(deleted) = deleted_bin {
            memory.on_bin_deleted(deleted);
        }
        let reinforce_value = match params.key {
            TabuKey::Item => tau,
            TabuKey::Pair => tau + 1,
        };
        memory.reinforce(&key_sets[chosen_idx], reinforce_value);
        memory.decay();
    }

    info!(steps, k = best.k(), "tabu search: finished");
    (best, steps)
}
