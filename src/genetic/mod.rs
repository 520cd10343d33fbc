pub mod crossover;
pub mod mutation;
pub mod population;
pub mod run;
pub mod selection;

pub use population::{Individual, Population};
pub use run::{run, GaParams};
