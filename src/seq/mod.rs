use log::debug;
use rand::Rng;

use std::ops::Range;

/// Nucleotide symbols in reporting order.
pub const ALPHABET: [u8; 4] = *b"ACGT";

/// Position of `symbol` in [`ALPHABET`], or `None` for anything else.
pub fn symbol_index(symbol: u8) -> Option<usize> {
    match symbol {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Draws `length` symbols independently and uniformly from [`ALPHABET`].
///
/// A length of zero yields an empty sequence.
pub fn generate_sequence<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let sequence: String = (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    debug!("generated {} symbols", sequence.len());
    sequence
}

/// A sequence with one marker spliced in, remembering exactly where.
///
/// The marker is opaque text: it may contain alphabet symbols or occur
/// again elsewhere by chance, so it is only ever located by its recorded
/// span, never by searching for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkedSequence {
    sequence: String,
    // byte span of the marker within `sequence`
    span: Range<usize>,
    // insertion point counted in characters of the original sequence
    index: usize,
}

impl MarkedSequence {
    pub fn as_str(&self) -> &str {
        &self.sequence
    }

    /// The inserted marker text.
    pub fn marker(&self) -> &str {
        &self.sequence[self.span.clone()]
    }

    /// Number of characters of the original sequence preceding the marker.
    pub fn insertion_index(&self) -> usize {
        self.index
    }

    /// Byte range of the marker within [`as_str`](Self::as_str).
    pub fn marker_span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Length in characters, marker included.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The sequence as it was before insertion, recovered by cutting out
    /// the recorded span.
    pub fn cleaned(&self) -> String {
        let mut cleaned = String::with_capacity(self.sequence.len() - self.span.len());
        cleaned.push_str(&self.sequence[..self.span.start]);
        cleaned.push_str(&self.sequence[self.span.end..]);
        cleaned
    }
}

fn boundaries(sequence: &str) -> impl Iterator<Item = usize> + '_ {
    sequence
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(sequence.len()))
}

fn splice_at(sequence: &str, marker: &str, index: usize, offset: usize) -> MarkedSequence {
    let mut spliced = String::with_capacity(sequence.len() + marker.len());
    spliced.push_str(&sequence[..offset]);
    spliced.push_str(marker);
    spliced.push_str(&sequence[offset..]);

    MarkedSequence {
        sequence: spliced,
        span: offset..offset + marker.len(),
        index,
    }
}

/// Splices `marker` into `sequence` before the character at `index`.
///
/// `index` may equal the character count of `sequence` (append). Returns
/// `None` when it lies past the end.
pub fn splice_marker(sequence: &str, marker: &str, index: usize) -> Option<MarkedSequence> {
    let offset = boundaries(sequence).nth(index)?;
    Some(splice_at(sequence, marker, index, offset))
}

/// Inserts `marker` at a position drawn uniformly from the `n + 1` gaps of
/// an `n`-character sequence, both ends included.
pub fn insert_marker<R: Rng + ?Sized>(rng: &mut R, sequence: &str, marker: &str) -> MarkedSequence {
    let gaps: Vec<usize> = boundaries(sequence).collect();
    let index = rng.gen_range(0..gaps.len());
    debug!("inserting {}-character marker at position {}", marker.chars().count(), index);
    splice_at(sequence, marker, index, gaps[index])
}
