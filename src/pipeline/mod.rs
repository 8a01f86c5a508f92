//! Generation, marking, analysis and formatting in one pass.
//!
//! The caller supplies validated inputs and a random source; the result is
//! the rendered document plus the composition of the generated symbols.

use crate::error::{Result, SeqmarkError};
use crate::fasta;
use crate::seq::{self, MarkedSequence};
use crate::stats::{self, CompositionStats};

use log::info;
use rand::Rng;

/// Parses a user-supplied sequence length, accepting positive integers only.
pub fn parse_length(input: &str) -> Result<usize> {
    let value: i128 = input
        .trim()
        .parse()
        .map_err(|_| SeqmarkError::InvalidLength("Invalid input. Please enter a valid number.".to_owned()))?;
    if value <= 0 {
        return Err(SeqmarkError::InvalidLength("Please enter a positive integer.".to_owned()));
    }
    usize::try_from(value).map_err(|_| SeqmarkError::InvalidLength(format!("{} is too large", value)))
}

/// Inputs of a single run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    length: usize,
    id: String,
    description: String,
    marker: String,
}

impl Request {
    pub fn new(length: usize, id: &str, description: &str, marker: &str) -> Result<Self> {
        if length == 0 {
            return Err(SeqmarkError::InvalidLength("Please enter a positive integer.".to_owned()));
        }
        fasta::validate_header(id, description)?;
        if marker.contains(['\n', '\r']) {
            return Err(SeqmarkError::InvalidMarker("marker contains a line break".to_owned()));
        }

        Ok(Request {
            length,
            id: id.to_owned(),
            description: description.to_owned(),
            marker: marker.to_owned(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug)]
pub struct Output {
    /// Header line and wrapped body, ready to be written out.
    pub document: String,
    /// Composition of the generated symbols only.
    pub stats: CompositionStats,
    pub marked: MarkedSequence,
}

pub fn run<R: Rng + ?Sized>(request: &Request, rng: &mut R) -> Result<Output> {
    let sequence = seq::generate_sequence(rng, request.length);
    let marked = seq::insert_marker(rng, &sequence, &request.marker);
    info!(
        "generated {} symbols, marker at position {}",
        request.length,
        marked.insertion_index()
    );

    let stats = stats::analyze(&marked)?;
    let document = fasta::format_document(&request.id, &request.description, marked.as_str());

    Ok(Output { document, stats, marked })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("10").unwrap(), 10);
        assert_eq!(parse_length("  42\n").unwrap(), 42);
        assert!(matches!(parse_length("0"), Err(SeqmarkError::InvalidLength(_))));
        assert!(matches!(parse_length("-5"), Err(SeqmarkError::InvalidLength(_))));
        assert!(matches!(parse_length("ten"), Err(SeqmarkError::InvalidLength(_))));
        assert!(matches!(parse_length(""), Err(SeqmarkError::InvalidLength(_))));
        assert!(matches!(parse_length("2.5"), Err(SeqmarkError::InvalidLength(_))));
    }

    #[test]
    fn test_request_validation() {
        assert!(Request::new(10, "seq1", "test", "BOB").is_ok());
        assert!(matches!(Request::new(0, "seq1", "test", "BOB"), Err(SeqmarkError::InvalidLength(_))));
        assert!(matches!(Request::new(10, "", "test", "BOB"), Err(SeqmarkError::InvalidHeader(_))));
        assert!(matches!(Request::new(10, "../seq1", "test", "BOB"), Err(SeqmarkError::InvalidHeader(_))));
        assert!(matches!(Request::new(10, "seq1", "test", "B\nOB"), Err(SeqmarkError::InvalidMarker(_))));
    }

    #[test]
    fn test_end_to_end() {
        let request = Request::new(10, "seq1", "test", "BOB").unwrap();
        let output = run(&request, &mut StdRng::seed_from_u64(2024)).unwrap();

        let mut lines = output.document.lines();
        assert_eq!(lines.next(), Some(">seq1 test"));
        let body = lines.next().unwrap();
        assert_eq!(lines.next(), None);
        assert_eq!(body.len(), 13);
        assert_eq!(body, output.marked.as_str());

        let i = output.marked.insertion_index();
        assert_eq!(&body[i..i + 3], "BOB");
        let generated = format!("{}{}", &body[..i], &body[i + 3..]);
        assert!(generated.bytes().all(|b| b"ACGT".contains(&b)));

        assert_eq!(output.stats.total(), 10);
        for (symbol, pct) in output.stats.iter() {
            let count = generated.chars().filter(|&c| c == symbol).count();
            assert!((pct - count as f64 * 10.0).abs() < 1e-9);
        }
        let sum: f64 = output.stats.iter().map(|(_, pct)| pct).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_output() {
        let request = Request::new(500, "seq1", "repeat", "Alice").unwrap();
        let a = run(&request, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = run(&request, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a.document, b.document);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_alphabet_marker_excluded_from_stats() {
        let request = Request::new(300, "seq1", "gc", "GCGCGCGC").unwrap();
        let output = run(&request, &mut StdRng::seed_from_u64(8)).unwrap();
        let cleaned = output.marked.cleaned();
        assert_eq!(cleaned.len(), 300);

        let gc = cleaned.bytes().filter(|&b| b == b'G' || b == b'C').count();
        assert!((output.stats.gc() - gc as f64 / 3.0).abs() < 1e-9);
    }
}
