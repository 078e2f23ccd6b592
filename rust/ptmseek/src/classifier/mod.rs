//! The sequence classifier seen from the pipeline.
//!
//! The model itself (tokenizer + network) lives outside this crate. All the
//! pipeline needs is something that turns a batch of normalized peptides
//! into one [`RawScores`] per peptide, in the same order.

mod constant;
mod remote;

pub use constant::ConstantClassifier;
pub use remote::RemoteClassifier;

/// Number of per-class scores the classifier emits for every peptide.
pub const NUM_RAW_SCORES: usize = 54;

pub type RawScores = [f32; NUM_RAW_SCORES];

#[derive(Debug)]
pub enum ClassifierError {
    Io(std::io::Error),
    Protocol { msg: String },
    Remote { msg: String },
    ShapeMismatch { expected: usize, got: usize },
    ScoreOutOfRange { index: usize, value: f32 },
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error talking to the classifier: {}", e),
            Self::Protocol { msg } => write!(f, "Malformed classifier response: {}", msg),
            Self::Remote { msg } => write!(f, "Classifier reported an error: {}", msg),
            Self::ShapeMismatch { expected, got } => {
                write!(f, "Expected {} score vectors, got {}", expected, got)
            }
            Self::ScoreOutOfRange { index, value } => {
                write!(f, "Score {} at position {} is outside [0, 1]", value, index)
            }
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<std::io::Error> for ClassifierError {
    fn from(x: std::io::Error) -> Self {
        Self::Io(x)
    }
}

/// A batch classifier for normalized peptides.
///
/// Implementations must return exactly one vector per input, in input order,
/// and must not mutate anything the caller can observe between calls.
pub trait PeptideClassifier {
    fn classify(&self, batch: &[String]) -> Result<Vec<RawScores>, ClassifierError>;
}

impl<C: PeptideClassifier + ?Sized> PeptideClassifier for &C {
    fn classify(&self, batch: &[String]) -> Result<Vec<RawScores>, ClassifierError> {
        (**self).classify(batch)
    }
}

impl<C: PeptideClassifier + ?Sized> PeptideClassifier for Box<C> {
    fn classify(&self, batch: &[String]) -> Result<Vec<RawScores>, ClassifierError> {
        (**self).classify(batch)
    }
}

/// Checks a loosely typed score vector and converts it into [`RawScores`].
pub fn try_into_raw_scores(values: Vec<f32>) -> Result<RawScores, ClassifierError> {
    if let Some((index, &value)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !(0.0..=1.0).contains(*v))
    {
        return Err(ClassifierError::ScoreOutOfRange { index, value });
    }
    let got = values.len();
    values
        .try_into()
        .map_err(|_| ClassifierError::ShapeMismatch {
            expected: NUM_RAW_SCORES,
            got,
        })
}
