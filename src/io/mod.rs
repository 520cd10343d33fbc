//! Benchmark loader for the OR-library `binpackN` convention (spec.md §6):
//!
//! ```text
//! <dataset count>
//! for each dataset:
//!   <dataset name>
//!   <capacity> <itemCount> <bestKnownBinCount>
//!   <weight_1> ... <weight_itemCount>
//! ```
//!
//! Grounded line-for-line in `DataLoader::load` in
//! `original_source/bin_packing/main.cpp`, which reads the count with
//! `>>` (whitespace-delimited, spans lines), then a `getline` per dataset
//! to skip to its name line. The `throw 1` sentinels become
//! [`Error::IoFailure`] / [`Error::InstanceInvalid`].

use std::fs;
use std::path::Path;

use crate::domain::instance::Instance;
use crate::error::{Error, Result};

/// A whitespace token stream over a text buffer, synchronized with a
/// parallel by-line cursor so a `getline`-equivalent ("skip to the next
/// physical line") can interleave with numeric `>>`-style reads.
struct Tokenizer<'a> {
    lines: std::str::Lines<'a>,
    current: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokenizer<'a> {
    fn new(content: &'a str) -> Self {
        Tokenizer {
            lines: content.lines(),
            current: "".split_whitespace(),
        }
    }

    fn next_token(&mut self) -> Option<&'a str> {
        loop {
            if let Some(tok) = self.current.next() {
                return Some(tok);
            }
            self.current = self.lines.next()?.split_whitespace();
        }
    }

    /// Discards whatever's left of the current line, then returns the next
    /// whole physical line (the `getline` half of the original's dance).
    fn next_line(&mut self) -> Option<&'a str> {
        self.current = "".split_whitespace();
        self.lines.next()
    }

    fn next_f64(&mut self) -> Result<f64> {
        self.next_token()
            .ok_or_else(|| Error::IoFailure("unexpected end of file".to_string()))?
            .parse()
            .map_err(|_| Error::IoFailure("expected a number".to_string()))
    }

    fn next_usize(&mut self) -> Result<usize> {
        self.next_token()
            .ok_or_else(|| Error::IoFailure("unexpected end of file".to_string()))?
            .parse()
            .map_err(|_| Error::IoFailure("expected an integer".to_string()))
    }
}

/// Loads dataset `dataset_index` (0-based) out of the `binpackN`-format
/// file at `path`.
pub fn load(path: &Path, dataset_index: usize) -> Result<Instance> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::IoFailure(format!("cannot read {}: {e}", path.display())))?;

    let mut tok = Tokenizer::new(&content);
    let dataset_count = tok.next_usize()?;
    if dataset_index >= dataset_count {
        return Err(Error::IoFailure(format!(
            "dataset index {dataset_index} out of range (file has {dataset_count})"
        )));
    }
    tok.next_line(); // consume the rest of the count's line

    for i in 0..=dataset_index {
        tok.next_line()
            .ok_or_else(|| Error::IoFailure("missing dataset name line".to_string()))?;

        let capacity = tok.next_f64()?;
        let items_count = tok.next_usize()?;
        let best_known = tok.next_usize()?;

        if i != dataset_index {
            for _ in 0..items_count {
                tok.next_token();
            }
            continue;
        }

        let mut items = Vec::with_capacity(items_count);
        for _ in 0..items_count {
            items.push(tok.next_f64()?);
        }
        return Instance::new(capacity, items, best_known);
    }

    Err(Error::IoFailure("dataset index out of range".to_string()))
}
