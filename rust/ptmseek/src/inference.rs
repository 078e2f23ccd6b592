//! Batched calls into the classifier.

use crate::classifier::{
    ClassifierError,
    PeptideClassifier,
    RawScores,
};
use crate::errors::{
    PtmSeekError,
    Result,
};
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use std::time::Instant;
use tracing::{
    debug,
    error,
};

pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Splits peptides into contiguous batches and classifies them in order.
///
/// Batches are sent one after the other and the first failure aborts the
/// whole run; no partial results are returned.
#[derive(Debug, Clone)]
pub struct InferenceOrchestrator {
    batch_size: usize,
    show_progress: bool,
}

impl Default for InferenceOrchestrator {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            show_progress: false,
        }
    }
}

impl InferenceOrchestrator {
    pub fn try_new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(PtmSeekError::Config {
                msg: "batch_size must be greater than 0".to_string(),
            });
        }
        Ok(Self {
            batch_size,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn num_batches(&self, num_peptides: usize) -> usize {
        num_peptides.div_ceil(self.batch_size)
    }

    pub fn predict<C: PeptideClassifier>(
        &self,
        classifier: &C,
        peptides: &[String],
    ) -> Result<Vec<RawScores>> {
        let nbatches = self.num_batches(peptides.len());
        let pb = if self.show_progress {
            let style = ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} batches ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar());
            ProgressBar::new(nbatches as u64).with_style(style)
        } else {
            ProgressBar::hidden()
        };

        let st = Instant::now();
        let mut probs: Vec<RawScores> = Vec::with_capacity(peptides.len());
        for (batch_idx, batch) in peptides.chunks(self.batch_size).enumerate() {
            let out = classifier
                .classify(batch)
                .and_then(|out| {
                    if out.len() == batch.len() {
                        Ok(out)
                    } else {
                        Err(ClassifierError::ShapeMismatch {
                            expected: batch.len(),
                            got: out.len(),
                        })
                    }
                })
                .map_err(|e| {
                    error!(
                        "Model prediction failed on batch {}/{} ({} peptides, first: {:?}): {}",
                        batch_idx + 1,
                        nbatches,
                        batch.len(),
                        batch.first(),
                        e
                    );
                    pb.abandon();
                    PtmSeekError::Inference(e)
                })?;
            debug!(
                "Classified batch {}/{} with {} peptides",
                batch_idx + 1,
                nbatches,
                batch.len()
            );
            probs.extend(out);
            pb.inc(1);
        }
        pb.finish_and_clear();
        debug!(
            "Classified {} peptides in {} batches, took {:?}",
            probs.len(),
            nbatches,
            st.elapsed()
        );
        Ok(probs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::NUM_RAW_SCORES;
    use std::cell::RefCell;

    /// Scores every peptide by its length and records batch sizes.
    #[derive(Default)]
    struct RecordingClassifier {
        batches: RefCell<Vec<usize>>,
        fail_on_call: Option<usize>,
    }

    impl PeptideClassifier for RecordingClassifier {
        fn classify(&self, batch: &[String]) -> std::result::Result<Vec<RawScores>, ClassifierError> {
            let ncalls = self.batches.borrow().len();
            self.batches.borrow_mut().push(batch.len());
            if self.fail_on_call == Some(ncalls) {
                return Err(ClassifierError::Remote {
                    msg: "out of memory".to_string(),
                });
            }
            Ok(batch
                .iter()
                .map(|x| [x.len() as f32 / 100.0; NUM_RAW_SCORES])
                .collect())
        }
    }

    fn peptides(n: usize) -> Vec<String> {
        (1..=n).map(|i| "A".repeat(i)).collect()
    }

    #[test]
    fn test_batches_cover_input_in_order() {
        let clf = RecordingClassifier::default();
        let orch = InferenceOrchestrator::try_new(4).unwrap();
        let out = orch.predict(&clf, &peptides(10)).unwrap();
        assert_eq!(*clf.batches.borrow(), vec![4, 4, 2]);
        assert_eq!(out.len(), 10);
        for (i, scores) in out.iter().enumerate() {
            assert_eq!(scores[0], (i + 1) as f32 / 100.0);
        }
    }

    #[test]
    fn test_batch_size_does_not_change_output() {
        let peps = peptides(23);
        let reference = InferenceOrchestrator::try_new(1)
            .unwrap()
            .predict(&RecordingClassifier::default(), &peps)
            .unwrap();
        for bs in [2, 5, 23, 50] {
            let clf = RecordingClassifier::default();
            let out = InferenceOrchestrator::try_new(bs)
                .unwrap()
                .predict(&clf, &peps)
                .unwrap();
            assert_eq!(out, reference);
            assert_eq!(clf.batches.borrow().len(), 23usize.div_ceil(bs));
        }
    }

    #[test]
    fn test_empty_input_makes_no_calls() {
        let clf = RecordingClassifier::default();
        let out = InferenceOrchestrator::default().predict(&clf, &[]).unwrap();
        assert!(out.is_empty());
        assert!(clf.batches.borrow().is_empty());
    }

    #[test]
    fn test_failure_aborts_everything() {
        let clf = RecordingClassifier {
            fail_on_call: Some(1),
            ..Default::default()
        };
        let res = InferenceOrchestrator::try_new(3)
            .unwrap()
            .predict(&clf, &peptides(9));
        assert!(matches!(res, Err(PtmSeekError::Inference(_))));
        // No retries, and nothing after the failing batch.
        assert_eq!(*clf.batches.borrow(), vec![3, 3]);
    }

    #[test]
    fn test_short_answer_is_inference_failure() {
        struct Lossy;
        impl PeptideClassifier for Lossy {
            fn classify(
                &self,
                batch: &[String],
            ) -> std::result::Result<Vec<RawScores>, ClassifierError> {
                Ok(vec![[0.0; NUM_RAW_SCORES]; batch.len().saturating_sub(1)])
            }
        }
        let res = InferenceOrchestrator::default().predict(&Lossy, &peptides(3));
        assert!(matches!(
            res,
            Err(PtmSeekError::Inference(ClassifierError::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(matches!(
            InferenceOrchestrator::try_new(0),
            Err(PtmSeekError::Config { .. })
        ));
    }
}
