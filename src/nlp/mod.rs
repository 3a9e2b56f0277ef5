//! Text processing: tokenization, stopwords, and n-gram counting

pub mod counter;
pub mod stopwords;
pub mod tokenizer;

pub use counter::{TermCounter, TermFrequencies};
pub use stopwords::StopwordFilter;
pub use tokenizer::Tokenizer;
