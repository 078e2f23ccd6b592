//! Reduction of the classifier's raw scores into the reported PTM labels.
//!
//! The classifier emits [`NUM_RAW_SCORES`] scores per peptide. Contiguous
//! ranges of those belong to the same modification type; each reported label
//! is the max over its range. Some ranges are shared by two labels that
//! differ only in the modified residue (e.g. S vs T phosphorylation), in
//! which case the center residue of the peptide decides which of the two
//! gets the value and the other one stays at zero.

use crate::classifier::{
    ClassifierError,
    NUM_RAW_SCORES,
    RawScores,
};
use crate::errors::Result;
use rayon::prelude::*;
use std::ops::Range;

pub const NUM_LABELS: usize = 20;

pub type ReducedLabels = [f32; NUM_LABELS];

/// When a label is allowed to take a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// Only when the peptide's center residue is exactly this character.
    Residue(char),
}

impl Gate {
    pub fn fires(&self, center_residue: Option<char>) -> bool {
        match self {
            Gate::Always => true,
            Gate::Residue(res) => center_residue == Some(*res),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LabelRule {
    pub name: &'static str,
    pub raw_range: Range<usize>,
    pub gate: Gate,
}

const fn rule(name: &'static str, start: usize, end: usize, gate: Gate) -> LabelRule {
    LabelRule {
        name,
        raw_range: start..end,
        gate,
    }
}

/// Output labels in report column order.
pub static LABEL_RULES: [LabelRule; NUM_LABELS] = [
    rule("S_Phosphorylation", 0, 5, Gate::Residue('S')),
    rule("T_Phosphorylation", 0, 5, Gate::Residue('T')),
    rule("K_Ubiquitination", 5, 25, Gate::Always),
    rule("Y_Phosphorylation", 25, 26, Gate::Always),
    rule("K_Acetylation", 26, 36, Gate::Always),
    rule("N_N-linked-Glycosylation", 36, 37, Gate::Always),
    rule("S_O-linked-Glycosylation", 37, 42, Gate::Residue('S')),
    rule("T_O-linked-Glycosylation", 37, 42, Gate::Residue('T')),
    rule("R_Methylation", 42, 46, Gate::Residue('R')),
    rule("K_Methylation", 42, 46, Gate::Residue('K')),
    rule("K_Sumoylation", 46, 47, Gate::Always),
    rule("K_Malonylation", 47, 48, Gate::Always),
    rule("M_Sulfoxidation", 48, 49, Gate::Always),
    rule("A_Acetylation", 49, 50, Gate::Residue('A')),
    rule("M_Acetylation", 49, 50, Gate::Residue('M')),
    rule("C_Glutathionylation", 50, 51, Gate::Always),
    rule("C_S-palmitoylation", 51, 52, Gate::Always),
    rule("P_Hydroxylation", 52, 53, Gate::Residue('P')),
    rule("K_Hydroxylation", 52, 53, Gate::Residue('K')),
    rule("NegLab", 53, NUM_RAW_SCORES, Gate::Always),
];

pub fn label_names() -> impl Iterator<Item = &'static str> {
    LABEL_RULES.iter().map(|x| x.name)
}

fn range_max(scores: &[f32]) -> f32 {
    scores.iter().copied().fold(f32::NEG_INFINITY, f32::max)
}

/// Reduces one raw score vector given the peptide's center residue.
pub fn reduce_scores(raw: &RawScores, center_residue: Option<char>) -> ReducedLabels {
    let mut out = [0.0f32; NUM_LABELS];
    for (slot, rule) in out.iter_mut().zip(LABEL_RULES.iter()) {
        if rule.gate.fires(center_residue) {
            *slot = range_max(&raw[rule.raw_range.clone()]);
        }
    }
    out
}

/// Reduces many vectors at once, keeping input order.
///
/// Fails when there is not exactly one score vector per center residue.
pub fn reduce_all(
    raw: &[RawScores],
    center_residues: &[Option<char>],
) -> Result<Vec<ReducedLabels>> {
    if raw.len() != center_residues.len() {
        return Err(ClassifierError::ShapeMismatch {
            expected: center_residues.len(),
            got: raw.len(),
        }
        .into());
    }
    Ok(raw
        .par_iter()
        .zip(center_residues.par_iter())
        .map(|(scores, &res)| reduce_scores(scores, res))
        .collect())
}
