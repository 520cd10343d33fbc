pub mod bin;
pub mod instance;
pub mod packing;
pub mod quality;

pub use bin::{Bin, BinRefused, ItemPair};
pub use instance::Instance;
pub use packing::{Neighbour, NeighbourKind, Packing};
pub use quality::{PackingLike, QualityOrder};
