pub mod hill_climbing;
pub mod tabu_search;

pub use hill_climbing::hill_climb;
pub use tabu_search::{tabu_search, TabuKey, TabuParams, TabuTenure};
