//! Population management for the grouping genetic algorithm.
//!
//! Equality is one of spec.md's Open Questions (the original code toggles
//! between multiset-of-bins equality and equality of a scalar fitness
//! proxy). This rewrite picks multiset-of-bins equality — see DESIGN.md —
//! since it's the only option that can't silently treat two structurally
//! different packings that happen to share a fitness value as duplicates.

use rand::Rng;

use crate::domain::bin::Bin;
use crate::domain::instance::Instance;
use crate::initial::ff_random_decreasing;

/// A population member: its bins, plus the mean-squared-fill fitness
/// (larger is better) computed once at construction.
#[derive(Debug, Clone)]
pub struct Individual {
    bins: Vec<Bin>,
    fitness: f64,
}

impl Individual {
    pub fn new(bins: Vec<Bin>) -> Self {
        let fitness = fitness_of(&bins);
        Individual { bins, fitness }
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn k(&self) -> usize {
        self.bins.len()
    }
}

fn fitness_of(bins: &[Bin]) -> f64 {
    if bins.is_empty() {
        return 0.0;
    }
    bins.iter().map(|b| b.fitness()).sum::<f64>() / bins.len() as f64
}

/// Multiset-of-bins equality: `a` and `b` are equal iff every bin of `a`
/// has a matching bin (by item set) somewhere in `b`, and vice versa.
pub fn bins_equal(a: &[Bin], b: &[Bin]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut remaining: Vec<&Bin> = b.iter().collect();
    for bin in a {
        match remaining.iter().position(|&candidate| candidate == bin) {
            Some(pos) => {
                remaining.remove(pos);
            }
            None => return false,
        }
    }
    true
}

pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Seeds `size` distinct individuals from first-fit-decreasing with
    /// randomized skipping (spec.md §4.4/§4.6). Falls back to accepting
    /// duplicates past a generous retry budget, since very small instances
    /// can have fewer than `size` distinct packings at all.
    pub fn seed(instance: &Instance, size: usize, rng: &mut impl Rng) -> Population {
        let mut individuals: Vec<Individual> = Vec::with_capacity(size);
        let mut attempts = 0usize;
        let max_attempts = size.max(1) * 50;

        while individuals.len() < size && attempts < max_attempts {
            attempts += 1;
            let packing = ff_random_decreasing(instance, rng);
            let bins = packing.to_bins(instance);
            if individuals.iter().any(|ind| bins_equal(ind.bins(), &bins)) {
                continue;
            }
            individuals.push(Individual::new(bins));
        }
        while individuals.len() < size {
            let packing = ff_random_decreasing(instance, rng);
            individuals.push(Individual::new(packing.to_bins(instance)));
        }

        Population { individuals }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individual(&self, idx: usize) -> &Individual {
        &self.individuals[idx]
    }

    pub fn contains(&self, bins: &[Bin]) -> bool {
        self.individuals.iter().any(|ind| bins_equal(ind.bins(), bins))
    }

    pub fn worst_index(&self) -> usize {
        self.individuals
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.fitness.partial_cmp(&b.1.fitness).unwrap())
            .map(|(i, _)| i)
            .expect("population is never empty")
    }

    pub fn replace(&mut self, idx: usize, individual: Individual) {
        self.individuals[idx] = individual;
    }

    /// The smallest bin count across the whole population, used to check
    /// the `k == bestKnown` termination condition.
    pub fn best_bin_count(&self) -> usize {
        self.individuals.iter().map(|ind| ind.k()).min().unwrap_or(0)
    }

    /// The individual with fewest bins, ties broken by higher fitness —
    /// the objective is minimizing bin count, fitness is just the engine
    /// that drives the search towards it.
    pub fn best(&self) -> &Individual {
        self.individuals
            .iter()
            .min_by(|a, b| a.k().cmp(&b.k()).then(b.fitness.partial_cmp(&a.fitness).unwrap()))
            .expect("population is never empty")
    }
}
