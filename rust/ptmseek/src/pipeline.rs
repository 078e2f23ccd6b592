//! Sequence to report, end to end.
//!
//! 1. Parse and validate the input records.
//! 2. Extract the de-duplicated windows of every record, in record order.
//! 3. Normalize the windows into classifier tokens.
//! 4. Classify in batches.
//! 5. Reduce the raw scores using each window's center residue.
//! 6. Pair the untouched windows with the reduced scores as report rows.
//!
//! Nothing is kept between runs; a pipeline can be reused for any number of
//! requests.

use crate::classifier::PeptideClassifier;
use crate::errors::Result;
use crate::ingest::{
    RawSequence,
    SequenceInput,
};
use crate::inference::InferenceOrchestrator;
use crate::labels::reduce_all;
use crate::models::{
    Peptide,
    extract_windows,
};
use crate::normalize::normalize_all;
use crate::report::{
    ReportRow,
    report_to_string,
};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PtmPipeline<C: PeptideClassifier> {
    classifier: C,
    orchestrator: InferenceOrchestrator,
}

/// Windows of every record, concatenated in record order.
///
/// De-duplication happens within a record only; the same window coming from
/// two different records is reported twice.
pub fn peptides_for_records(records: &[RawSequence]) -> Vec<Peptide> {
    let per_record: Vec<Vec<Peptide>> = records
        .par_iter()
        .map(|rec| extract_windows(&rec.residues))
        .collect();
    per_record.into_iter().flatten().collect()
}

impl<C: PeptideClassifier> PtmPipeline<C> {
    pub fn new(classifier: C, orchestrator: InferenceOrchestrator) -> Self {
        Self {
            classifier,
            orchestrator,
        }
    }

    pub fn predict_records(&self, records: &[RawSequence]) -> Result<Vec<ReportRow>> {
        let st = Instant::now();
        let peptides = peptides_for_records(records);
        let normalized = normalize_all(&peptides);
        info!(
            "Predicting {} unique windows from {} sequences in {} batches",
            peptides.len(),
            records.len(),
            self.orchestrator.num_batches(peptides.len())
        );

        let probs = self.orchestrator.predict(&self.classifier, &normalized)?;
        let centers: Vec<Option<char>> = peptides.iter().map(|x| x.center_residue()).collect();
        let reduced = reduce_all(&probs, &centers)?;

        let rows: Vec<ReportRow> = peptides
            .into_iter()
            .zip(reduced)
            .map(|(peptide, values)| ReportRow { peptide, values })
            .collect();
        info!("Prediction of {} rows took {:?}", rows.len(), st.elapsed());
        Ok(rows)
    }

    pub fn predict(&self, input: SequenceInput) -> Result<Vec<ReportRow>> {
        let records = input.into_records()?;
        self.predict_records(&records)
    }

    /// Runs the whole pipeline and renders the CSV report.
    pub fn predict_csv(&self, input: SequenceInput) -> Result<String> {
        let rows = self.predict(input)?;
        report_to_string(&rows)
    }
}
