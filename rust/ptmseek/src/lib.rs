pub mod classifier;
pub mod config;
pub mod errors;
pub mod inference;
pub mod ingest;
pub mod labels;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod report;

pub use classifier::{
    ClassifierError,
    ConstantClassifier,
    PeptideClassifier,
    RawScores,
    RemoteClassifier,
};
pub use config::{
    ClassifierConfig,
    Config,
};
pub use errors::{
    PtmSeekError,
    Result,
};
pub use inference::InferenceOrchestrator;
pub use ingest::{
    RawSequence,
    SequenceInput,
};
pub use labels::{
    LABEL_RULES,
    ReducedLabels,
};
pub use models::Peptide;
pub use pipeline::PtmPipeline;
pub use report::ReportRow;
