//! `solve <path> <dataset-index> [--algorithm hill|tabu|ga|aco] [--seed N]`
//! (spec.md §6). Built with `clap`'s derive API — the original C++ process
//! entry point hardcodes everything instead (see
//! `original_source/bin_packing/main.cpp`'s `main`); REDESIGN FLAG in
//! DESIGN.md: a CLI surface gets a real argument parser, following the
//! pack's CLI-carrying repos.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Algorithm {
    Hill,
    Tabu,
    Ga,
    Aco,
}

#[derive(Debug, Parser)]
#[command(name = "solve", about = "One-dimensional bin packing metaheuristics")]
pub struct Cli {
    /// Path to a `binpackN`-format benchmark file.
    pub path: PathBuf,

    /// 0-based index of the dataset to solve within that file.
    pub dataset_index: usize,

    #[arg(long, value_enum, default_value = "hill")]
    pub algorithm: Algorithm,

    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}
