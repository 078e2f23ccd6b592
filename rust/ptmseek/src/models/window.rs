use super::peptide::{
    FLANK_WIDTH,
    PAD_CHAR,
    Peptide,
    WINDOW_WIDTH,
};
use std::collections::HashSet;

/// One window per residue, in sequence order, before de-duplication.
///
/// The sequence is padded with [`FLANK_WIDTH`] pad characters on both ends so
/// that window `i` is centered on residue `i`.
pub fn raw_windows(seq: &str) -> Vec<Peptide> {
    let padded: Vec<char> = std::iter::repeat(PAD_CHAR)
        .take(FLANK_WIDTH)
        .chain(seq.chars())
        .chain(std::iter::repeat(PAD_CHAR).take(FLANK_WIDTH))
        .collect();
    let num_residues = padded.len() - 2 * FLANK_WIDTH;

    (0..num_residues)
        .map(|i| {
            let window: String = padded[i..i + WINDOW_WIDTH].iter().collect();
            Peptide::new(window)
        })
        .collect()
}

/// Keeps the first occurrence of every window and drops later repeats.
pub fn deduplicate_peptides(mut peptides: Vec<Peptide>) -> Vec<Peptide> {
    let mut seen = HashSet::new();
    peptides.retain(|x| seen.insert(x.clone()));
    peptides
}

/// Windows for a sequence, de-duplicated.
///
/// NOTE: low complexity regions produce repeated windows which collapse into
/// a single entry here, so a sequence can yield fewer windows than residues.
/// Reports are built from this list, so they inherit that behavior.
pub fn extract_windows(seq: &str) -> Vec<Peptide> {
    deduplicate_peptides(raw_windows(seq))
}
