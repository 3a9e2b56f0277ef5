//! Corpus-level views that do not rank terms: dispersion and correlation

pub mod correlation;
pub mod dispersion;

pub use correlation::{word_correlations, word_correlations_with_config, CorrelationMatrix};
pub use dispersion::{lexical_dispersion, Dispersion, DispersionPoint};
