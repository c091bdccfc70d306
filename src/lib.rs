//! Cross-language keyword co-occurrence analysis.
//!
//! The pipeline collapses near-duplicate sentences, walks dependency parses
//! to find the words grammatically linked to a per-language keyword, and
//! enriches the resulting relation records for downstream visualization.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod enrich;
pub mod error;
pub mod logging;
pub mod parse;
pub mod rules;
