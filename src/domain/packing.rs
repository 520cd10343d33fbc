use crate::domain::bin::{Bin, item_pairs};
use crate::domain::instance::Instance;
use crate::error::{Error, Result};

/// A candidate solution: every item assigned to exactly one bin, plus the
/// derived per-bin fill weights. Logically immutable once built — every
/// transformation (`neighbourhood`, `materialize`) returns a new `Packing`.
#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    assignment: Vec<usize>,
    fill: Vec<f64>,
}

impl Packing {
    /// Builds a packing from a total item-to-bin assignment, checking I1-I4.
    pub fn from_assignment(instance: &Instance, assignment: Vec<usize>) -> Result<Self> {
        if assignment.len() != instance.items_count() {
            return Err(Error::InvariantViolation(format!(
                "assignment covers {} items, instance has {}",
                assignment.len(),
                instance.items_count()
            )));
        }
        let k = assignment.iter().copied().max().map_or(0, |m| m + 1);
        let mut fill = vec![0.0; k];
        for (item, &bin) in assignment.iter().enumerate() {
            fill[bin] += instance.item_weight(item);
        }
        let packing = Packing { assignment, fill };
        packing.validate(instance)?;
        Ok(packing)
    }

    /// Builds a packing from per-bin item lists (the GA/ACO `Bin` flavour).
    pub fn from_bins(instance: &Instance, bins: &[Bin]) -> Result<Self> {
        let mut assignment = vec![usize::MAX; instance.items_count()];
        for (b, bin) in bins.iter().enumerate() {
            for &(item, _) in bin.items() {
                assignment[item] = b;
            }
        }
        if assignment.iter().any(|&b| b == usize::MAX) {
            return Err(Error::InvariantViolation(
                "bin list does not cover every item".to_string(),
            ));
        }
        Packing::from_assignment(instance, assignment)
    }

    /// Converts to the GA/ACO `Bin` representation, sorted ascending by weight per bin.
    pub fn to_bins(&self, instance: &Instance) -> Vec<Bin> {
        let mut bins: Vec<Bin> = (0..self.k()).map(|_| Bin::empty(instance.capacity())).collect();
        for (item, &b) in self.assignment.iter().enumerate() {
            bins[b]
                .insert((item, instance.item_weight(item)))
                .expect("packing invariants guarantee this insert fits");
        }
        bins
    }

    pub fn k(&self) -> usize {
        self.fill.len()
    }

    pub fn fill(&self) -> &[f64] {
        &self.fill
    }

    pub fn bin_of(&self, item: usize) -> usize {
        self.assignment[item]
    }

    pub fn items_in_bin(&self, b: usize) -> Vec<usize> {
        self.assignment
            .iter()
            .enumerate()
            .filter(|&(_, &bin)| bin == b)
            .map(|(item, _)| item)
            .collect()
    }

    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Checks I1-I4. Called at every construction site; exposed so tests and
    /// the repair routine can reassert it on derived packings.
    pub fn validate(&self, instance: &Instance) -> Result<()> {
        if self.assignment.len() != instance.items_count() {
            return Err(Error::InvariantViolation("item count mismatch".into()));
        }
        let k = self.k();
        for &b in &self.assignment {
            if b >= k {
                return Err(Error::InvariantViolation(format!(
                    "item assigned to bin {b} but only {k} bins exist"
                )));
            }
        }
        let mut recomputed = vec![0.0; k];
        for (item, &b) in self.assignment.iter().enumerate() {
            recomputed[b] += instance.item_weight(item);
        }
        for (b, (&have, &want)) in self.fill.iter().zip(recomputed.iter()).enumerate() {
            if (have - want).abs() > 1e-9 {
                return Err(Error::InvariantViolation(format!(
                    "bin {b} fill {have} does not match recomputed {want}"
                )));
            }
        }
        for (b, &w) in self.fill.iter().enumerate() {
            if w <= 0.0 {
                return Err(Error::InvariantViolation(format!("bin {b} is empty")));
            }
            if w > instance.capacity() + 1e-9 {
                return Err(Error::InvariantViolation(format!(
                    "bin {b} overflows: {w} > {}",
                    instance.capacity()
                )));
            }
        }
        let total_fill: f64 = self.fill.iter().sum();
        let total_items: f64 = instance.items().iter().sum();
        if (total_fill - total_items).abs() > 1e-6 {
            return Err(Error::InvariantViolation(format!(
                "mass not conserved: bins sum to {total_fill}, items sum to {total_items}"
            )));
        }
        Ok(())
    }

    /// Enumerates every legal move, and every legal swap if no move in this
    /// neighbourhood would shrink the bin count. Deterministic order: items
    /// ascending, then target bins ascending for MOVE; `(i,j)` lexicographic
    /// for SWAP.
    pub fn neighbourhood(&self, instance: &Instance) -> Vec<Neighbour> {
        let n = instance.items_count();
        let mut moves = Vec::new();
        let mut any_move_deletes_bin = false;

        for item in 0..n {
            let from = self.assignment[item];
            let w = instance.item_weight(item);
            for to in 0..self.k() {
                if to == from {
                    continue;
                }
                if self.fill[to] + w > instance.capacity() {
                    continue;
                }
                let neighbour = self.apply_move(instance, item, from, to);
                if neighbour.k() < self.k() {
                    any_move_deletes_bin = true;
                }
                moves.push(neighbour);
            }
        }

        if !any_move_deletes_bin {
            for i in 0..n {
                for j in (i + 1)..n {
                    if let Some(neighbour) = self.try_swap(instance, i, j) {
                        moves.push(neighbour);
                    }
                }
            }
        }

        moves
    }

    fn apply_move(&self, instance: &Instance, item: usize, from: usize, to: usize) -> Neighbour {
        let w = instance.item_weight(item);
        let mut fill = self.fill.clone();
        fill[from] -= w;
        fill[to] += w;

        let deleted_bin = if fill[from].abs() < 1e-9 {
            let deleted = from;
            fill.remove(deleted);
            Some(deleted)
        } else {
            None
        };

        Neighbour {
            kind: NeighbourKind::Move {
                item,
                from,
                to,
                deleted_bin,
            },
            fill,
        }
    }

    fn try_swap(&self, instance: &Instance, i: usize, j: usize) -> Option<Neighbour> {
        let bi = self.assignment[i];
        let bj = self.assignment[j];
        if bi == bj {
            return None;
        }
        let (wi, wj) = (instance.item_weight(i), instance.item_weight(j));
        let new_bi = self.fill[bi] - wi + wj;
        let new_bj = self.fill[bj] - wj + wi;
        if new_bi > instance.capacity() || new_bj > instance.capacity() {
            return None;
        }
        let mut fill = self.fill.clone();
        fill[bi] = new_bi;
        fill[bj] = new_bj;
        Some(Neighbour {
            kind: NeighbourKind::Swap { i, bi, j, bj },
            fill,
        })
    }
}

/// Which items moved, and how, to produce a [`Neighbour`]. Carries enough to
/// both answer queries (bin count, fill) and, on acceptance, materialize a
/// full [`Packing`] without re-deriving it from scratch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NeighbourKind {
    Move {
        item: usize,
        from: usize,
        to: usize,
        deleted_bin: Option<usize>,
    },
    Swap {
        i: usize,
        bi: usize,
        j: usize,
        bj: usize,
    },
}

/// A candidate packing described by the single move/swap that produces it
/// from some base `Packing`, without paying for a full `O(n)` assignment
/// clone until the neighbour is actually adopted.
#[derive(Debug, Clone)]
pub struct Neighbour {
    kind: NeighbourKind,
    fill: Vec<f64>,
}

impl Neighbour {
    pub fn kind(&self) -> NeighbourKind {
        self.kind
    }

    pub fn k(&self) -> usize {
        self.fill.len()
    }

    pub fn fill(&self) -> &[f64] {
        &self.fill
    }

    /// The tabu-relevant (bin, item) keys this neighbour changes: the
    /// source bin and item for MOVE, or both items' source bins for SWAP.
    pub fn changed_item_keys(&self) -> Vec<(usize, usize)> {
        match self.kind {
            NeighbourKind::Move { item, from, .. } => vec![(from, item)],
            NeighbourKind::Swap { i, bi, j, bj } => vec![(bi, i), (bj, j)],
        }
    }

    pub fn changed_items(&self) -> Vec<usize> {
        match self.kind {
            NeighbourKind::Move { item, .. } => vec![item],
            NeighbourKind::Swap { i, j, .. } => vec![i, j],
        }
    }

    pub fn deleted_bin(&self) -> Option<usize> {
        match self.kind {
            NeighbourKind::Move { deleted_bin, .. } => deleted_bin,
            NeighbourKind::Swap { .. } => None,
        }
    }

    /// Produces the full `Packing` this neighbour describes, relative to `base`.
    pub fn materialize(&self, base: &Packing) -> Packing {
        let mut assignment = base.assignment.clone();
        match self.kind {
            NeighbourKind::Move {
                item,
                to,
                deleted_bin,
                ..
            } => {
                assignment[item] = to;
                if let Some(deleted) = deleted_bin {
                    for b in assignment.iter_mut() {
                        if *b > deleted {
                            *b -= 1;
                        }
                    }
                }
            }
            NeighbourKind::Swap { i, bi, j, bj } => {
                assignment[i] = bj;
                assignment[j] = bi;
            }
        }
        Packing {
            assignment,
            fill: self.fill.clone(),
        }
    }
}

/// Re-derives a fresh `Bin`-based packing into a flat `Packing`, used by GA/ACO
/// children before handing them back to tabu/hill-climbing style consumers.
pub fn packing_from_bins(instance: &Instance, bins: &[Bin]) -> Result<Packing> {
    Packing::from_bins(instance, bins)
}

/// Convenience used by tests: the `(index, weight)` pairs of an instance.
pub fn instance_item_pairs(instance: &Instance) -> Vec<(usize, f64)> {
    item_pairs(instance)
}
