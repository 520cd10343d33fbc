use crate::error::{Error, Result};

/// Immutable problem description: capacity, item weights, optional best-known bin count.
#[derive(Debug, Clone)]
pub struct Instance {
    capacity: f64,
    items: Vec<f64>,
    best_known: usize,
}

impl Instance {
    /// Builds an instance, rejecting non-positive weights and weights over capacity.
    pub fn new(capacity: f64, items: Vec<f64>, best_known: usize) -> Result<Self> {
        if capacity <= 0.0 {
            return Err(Error::InstanceInvalid(format!(
                "capacity must be positive, got {capacity}"
            )));
        }
        for (i, &w) in items.iter().enumerate() {
            if w <= 0.0 {
                return Err(Error::InstanceInvalid(format!(
                    "item {i} has non-positive weight {w}"
                )));
            }
            if w > capacity {
                return Err(Error::InstanceInvalid(format!(
                    "item {i} weight {w} exceeds capacity {capacity}"
                )));
            }
        }
        Ok(Instance {
            capacity,
            items,
            best_known,
        })
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn items(&self) -> &[f64] {
        &self.items
    }

    pub fn item_weight(&self, i: usize) -> f64 {
        self.items[i]
    }

    pub fn items_count(&self) -> usize {
        self.items.len()
    }

    pub fn best_known(&self) -> usize {
        self.best_known
    }

    /// Trivial lower bound on the number of bins any packing needs.
    pub fn lower_bound(&self) -> usize {
        let total: f64 = self.items.iter().sum();
        (total / self.capacity).ceil() as usize
    }
}
