use super::{
    ClassifierError,
    NUM_RAW_SCORES,
    PeptideClassifier,
    RawScores,
};

/// Answers every peptide with the same scores.
///
/// Useful for dry runs of the pipeline when no model server is around.
#[derive(Debug, Clone)]
pub struct ConstantClassifier {
    scores: RawScores,
}

impl ConstantClassifier {
    pub fn new(scores: RawScores) -> Self {
        Self { scores }
    }

    pub fn uniform(value: f32) -> Self {
        Self {
            scores: [value.clamp(0.0, 1.0); NUM_RAW_SCORES],
        }
    }
}

impl Default for ConstantClassifier {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}

impl PeptideClassifier for ConstantClassifier {
    fn classify(&self, batch: &[String]) -> Result<Vec<RawScores>, ClassifierError> {
        Ok(vec![self.scores; batch.len()])
    }
}
