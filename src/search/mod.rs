// src/search/mod.rs

//! Search core: substring search with snippet extraction and highlighting,
//! plus the exportable keyword index.
//!
//! - `SearchIndexer`: per-keystroke linear scan over precomputed blobs
//! - `snippet`: fixed-window excerpt and `<mark>` highlight injection
//! - `TokenIndex`: inverted keyword index exported as `index.json`

mod index;
mod indexer;
pub mod snippet;
pub mod text;

pub use index::{IndexBuilder, IndexConfig, TokenIndex, build_index};
pub use indexer::{SearchIndexer, SearchMatch};
