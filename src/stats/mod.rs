use crate::error::{Result, SeqmarkError};
use crate::seq::{symbol_index, MarkedSequence, ALPHABET};

use log::debug;
use std::fmt;

/// Per-symbol composition of a sequence, marker excluded.
///
/// Percentages are kept at full precision; each one is computed on its own,
/// so their sum is 100 only up to floating point error.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionStats {
    counts: [usize; 4],
    total: usize,
    percentages: [f64; 4],
}

impl CompositionStats {
    /// Counts [`ALPHABET`] symbols over `sequence`. The denominator is the
    /// full length of `sequence`.
    pub fn from_sequence(sequence: &[u8]) -> Result<Self> {
        let total = sequence.len();
        if total == 0 {
            return Err(SeqmarkError::EmptySequence);
        }

        let mut counts = [0usize; 4];
        for &symbol in sequence {
            if let Some(i) = symbol_index(symbol) {
                counts[i] += 1;
            }
        }

        let percentages = counts.map(|count| count as f64 / total as f64 * 100.0);
        debug!("composition over {} symbols: {:?}", total, counts);

        Ok(CompositionStats { counts, total, percentages })
    }

    pub fn count(&self, symbol: u8) -> usize {
        symbol_index(symbol).map_or(0, |i| self.counts[i])
    }

    /// Percentage of `symbol`; zero for symbols outside the alphabet.
    pub fn percentage(&self, symbol: u8) -> f64 {
        symbol_index(symbol).map_or(0.0, |i| self.percentages[i])
    }

    /// Combined C and G percentage.
    pub fn gc(&self) -> f64 {
        self.percentage(b'C') + self.percentage(b'G')
    }

    /// Number of characters the percentages are relative to.
    pub fn total(&self) -> usize {
        self.total
    }

    /// `(symbol, percentage)` pairs in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        ALPHABET
            .iter()
            .zip(self.percentages.iter())
            .map(|(&symbol, &pct)| (symbol as char, pct))
    }
}

impl fmt::Display for CompositionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, pct) in self.iter() {
            writeln!(f, "{}: {:.1}%", symbol, pct)?;
        }
        write!(f, "%CG: {:.1}", self.gc())
    }
}

/// Composition of the generated part of `marked`.
///
/// The marker is cut out by its recorded span, so marker text made of
/// alphabet symbols, or repeated elsewhere, never skews the result.
pub fn analyze(marked: &MarkedSequence) -> Result<CompositionStats> {
    CompositionStats::from_sequence(marked.cleaned().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::{generate_sequence, insert_marker, splice_marker};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_composition_of_known_sequence() {
        let stats = CompositionStats::from_sequence(b"AACGTTTT").unwrap();
        assert_eq!(stats.total(), 8);
        assert_eq!(stats.count(b'T'), 4);
        assert_close(stats.percentage(b'A'), 25.0);
        assert_close(stats.percentage(b'C'), 12.5);
        assert_close(stats.percentage(b'G'), 12.5);
        assert_close(stats.percentage(b'T'), 50.0);
        assert_close(stats.gc(), 25.0);
    }

    #[test]
    fn test_empty_sequence_is_an_error() {
        assert!(matches!(
            CompositionStats::from_sequence(b""),
            Err(SeqmarkError::EmptySequence)
        ));
    }

    #[test]
    fn test_marker_only_is_an_error() {
        let marked = splice_marker("", "BOB", 0).unwrap();
        assert!(matches!(analyze(&marked), Err(SeqmarkError::EmptySequence)));
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let mut rng = StdRng::seed_from_u64(17);
        for length in [1, 3, 7, 99, 1001] {
            let sequence = generate_sequence(&mut rng, length);
            let marked = insert_marker(&mut rng, &sequence, "CGCG");
            let stats = analyze(&marked).unwrap();
            assert_eq!(stats.total(), length);
            let sum: f64 = stats.iter().map(|(_, pct)| pct).sum();
            assert!((sum - 100.0).abs() < 1e-9);
            assert!(stats.iter().all(|(_, pct)| (0.0..=100.0).contains(&pct)));
        }
    }

    #[test]
    fn test_alphabet_marker_does_not_skew() {
        let marked = splice_marker("AAAA", "AA", 1).unwrap();
        let stats = analyze(&marked).unwrap();
        assert_eq!(stats.total(), 4);
        assert_close(stats.percentage(b'A'), 100.0);

        let marked = splice_marker("ATAT", "GC", 2).unwrap();
        let stats = analyze(&marked).unwrap();
        assert_close(stats.gc(), 0.0);
    }

    #[test]
    fn test_display_report() {
        let stats = CompositionStats::from_sequence(b"AAACCGGGGT").unwrap();
        assert_eq!(
            stats.to_string(),
            "A: 30.0%\nC: 20.0%\nG: 40.0%\nT: 10.0%\n%CG: 60.0"
        );
    }
}
