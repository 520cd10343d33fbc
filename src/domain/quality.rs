use rayon::prelude::*;

use crate::domain::instance::Instance;
use crate::domain::packing::{Neighbour, Packing};

/// Total preorder over packings/neighbours used to drive search.
///
/// Two interchangeable variants, chosen per search run: fewer bins always
/// wins under [`QualityOrder::Lexicographic`]; [`QualityOrder::MeanSquaredFill`]
/// instead rewards a tightly packed *average* bin and does not look at bin
/// count directly (in practice it still favours fewer bins, since spreading
/// the same mass over more bins can only lower the mean square).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityOrder {
    /// Fewer bins first; ties broken by which packing has its slack most
    /// concentrated in a few bins (sorted slacks compared lexicographically).
    Lexicographic,
    /// `(1/k) * sum((fill[b]/capacity)^2)`, larger is better.
    MeanSquaredFill,
}

impl QualityOrder {
    /// `true` iff `a` is strictly better than `b`.
    pub fn less(self, instance: &Instance, a: &PackingLike, b: &PackingLike) -> bool {
        match self {
            QualityOrder::Lexicographic => less_lexicographic(instance, a, b),
            QualityOrder::MeanSquaredFill => {
                score_mean_squared(instance, a) > score_mean_squared(instance, b)
            }
        }
    }

    /// Index of the best neighbour under this order, ties broken by emission
    /// order (the first strictly-better candidate wins any tie).
    ///
    /// Scoring each candidate is independent of the others, so it's done
    /// with `rayon::par_iter` — the same shape as `khx02-vrp`'s
    /// `find_neighbours` (`par_iter().map(score).collect()`), here keeping
    /// the score aligned to its candidate's index rather than sorting the
    /// scored `Vec` itself. The reduction back to a single winner stays a
    /// plain sequential fold over that `Vec`, so the deterministic
    /// emission order (items ascending/target bins ascending for MOVE,
    /// `(i,j)` lexicographic for SWAP) still decides ties exactly as
    /// before parallel scoring was added.
    pub fn best_neighbour(self, instance: &Instance, neighbours: &[Neighbour]) -> Option<usize> {
        match self {
            QualityOrder::Lexicographic => {
                let keys: Vec<(usize, Vec<f64>)> = neighbours
                    .par_iter()
                    .map(|n| (n.k(), sorted_slacks_of(instance, n.fill())))
                    .collect();
                best_index_by(&keys, |a, b| less_lexicographic_keys(a, b))
            }
            QualityOrder::MeanSquaredFill => {
                let scores: Vec<f64> = neighbours
                    .par_iter()
                    .map(|n| score_mean_squared_of(instance, n.fill(), n.k()))
                    .collect();
                best_index_by(&scores, |a, b| a > b)
            }
        }
    }
}

/// Index of the first `values[i]` for which no later-or-earlier element is
/// strictly better under `better`, scanned in order so the first
/// strictly-better candidate wins any tie — i.e. emission order.
fn best_index_by<T>(values: &[T], better: impl Fn(&T, &T) -> bool) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        match best {
            None => best = Some(i),
            Some(b) => {
                if better(v, &values[b]) {
                    best = Some(i);
                }
            }
        }
    }
    best
}

/// Either a fully materialized packing or a neighbour descriptor queried
/// without materializing it, so search can rank neighbours before committing
/// to the O(n) cost of building one.
pub enum PackingLike<'a> {
    Packing(&'a Packing),
    Neighbour(&'a Neighbour),
}

impl<'a> PackingLike<'a> {
    fn k(&self) -> usize {
        match self {
            PackingLike::Packing(p) => p.k(),
            PackingLike::Neighbour(n) => n.k(),
        }
    }

    fn fill(&self) -> &[f64] {
        match self {
            PackingLike::Packing(p) => p.fill(),
            PackingLike::Neighbour(n) => n.fill(),
        }
    }
}

impl<'a> From<&'a Packing> for PackingLike<'a> {
    fn from(p: &'a Packing) -> Self {
        PackingLike::Packing(p)
    }
}

impl<'a> From<&'a Neighbour> for PackingLike<'a> {
    fn from(n: &'a Neighbour) -> Self {
        PackingLike::Neighbour(n)
    }
}

fn sorted_slacks_of(instance: &Instance, fill: &[f64]) -> Vec<f64> {
    let mut slacks: Vec<f64> = fill.iter().map(|&f| instance.capacity() - f).collect();
    slacks.sort_by(|a, b| b.partial_cmp(a).unwrap());
    slacks
}

fn sorted_slacks(instance: &Instance, p: &PackingLike) -> Vec<f64> {
    sorted_slacks_of(instance, p.fill())
}

fn less_lexicographic(instance: &Instance, a: &PackingLike, b: &PackingLike) -> bool {
    if a.k() != b.k() {
        return a.k() < b.k();
    }
    let sa = sorted_slacks(instance, a);
    let sb = sorted_slacks(instance, b);
    less_lexicographic_keys(&(a.k(), sa), &(b.k(), sb))
}

fn less_lexicographic_keys(a: &(usize, Vec<f64>), b: &(usize, Vec<f64>)) -> bool {
    if a.0 != b.0 {
        return a.0 < b.0;
    }
    for (x, y) in a.1.iter().zip(b.1.iter()) {
        if x > y {
            return true;
        }
        if x < y {
            return false;
        }
    }
    false
}

/// Mean-squared-fill score, exposed for the genetic algorithm and ant colony,
/// which both use it directly as a fitness value rather than through `less`.
pub fn mean_squared_fill(instance: &Instance, p: &PackingLike) -> f64 {
    score_mean_squared_of(instance, p.fill(), p.k())
}

fn score_mean_squared_of(instance: &Instance, fill: &[f64], k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    let sum: f64 = fill
        .iter()
        .map(|&f| {
            let r = f / instance.capacity();
            r * r
        })
        .sum();
    sum / k as f64
}
