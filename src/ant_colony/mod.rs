pub mod construct;
pub mod pheromone;
pub mod run;

pub use pheromone::{MinTrail, Pheromone};
pub use run::{run, AcoParams};
