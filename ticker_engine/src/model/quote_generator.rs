//! One-shot generation of the backdrop dataset.
//!
//! The `QuoteGenerator` synthesizes exactly `TOTAL` quotes, one per grid cell, when the
//! backdrop mounts. The resulting `Dataset` is immutable: its size is fixed at mount and
//! entries are only ever read afterwards.

use crate::model::quote::QuoteEntry;
use log::debug;
use ticker_common::RandomSource;
use ticker_common::grid::TOTAL;

/// Ordered, fixed-size collection of quotes indexed by cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    entries: Vec<QuoteEntry>,
}

impl Dataset {
    /// Number of entries; always `TOTAL`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` only for a dataset with no cells, which `QuoteGenerator` never produces.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Quote for cell `index`.
    pub fn get(&self, index: usize) -> Option<&QuoteEntry> {
        self.entries.get(index)
    }

    /// Iterate entries in cell order.
    pub fn iter(&self) -> impl Iterator<Item = &QuoteEntry> {
        self.entries.iter()
    }
}

/// Synthetic dataset generator.
pub struct QuoteGenerator;

impl QuoteGenerator {
    /// Generate the full dataset, drawing every value from `rng`.
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Dataset {
        let entries: Vec<QuoteEntry> = (0..TOTAL)
            .map(|index| QuoteEntry::generate(index, rng))
            .collect();
        let rising = entries.iter().filter(|q| q.direction.is_up()).count();
        debug!("Generated {} quotes ({} rising)", entries.len(), rising);
        Dataset { entries }
    }
}
