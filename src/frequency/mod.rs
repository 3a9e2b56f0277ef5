//! Frequency views of a corpus: ranked n-gram tables and word clouds

pub mod cloud;
pub mod ranking;

pub use cloud::{compare_clouds, word_cloud, CloudWord, VennTerms};
pub use ranking::{rank_terms, FrequencyRanker};
