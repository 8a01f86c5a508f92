//! Synthetic nucleotide sequences carrying a marker token, with composition
//! statistics and single-record FASTA output.

pub mod error;
pub mod fasta;
pub mod logger;
pub mod pipeline;
pub mod prompt;
pub mod seq;
pub mod stats;

pub use error::{Result, SeqmarkError};
