use crate::classifier::ClassifierError;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PtmSeekError {
    /// No usable record was found, or the input could not be decoded as text.
    EmptyInput {
        context: &'static str,
    },
    SequenceTooShort {
        identifier: String,
        length: usize,
        minimum: usize,
    },
    Inference(ClassifierError),
    Config {
        msg: String,
    },
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },
    ParseError {
        msg: String,
    },
}

impl std::fmt::Display for PtmSeekError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput { context } => write!(f, "No valid sequences found: {}", context),
            Self::SequenceTooShort {
                identifier,
                length,
                minimum,
            } => write!(
                f,
                "Sequence '{}' has {} residues, must be at least {} aa long",
                identifier, length, minimum
            ),
            Self::Inference(e) => write!(f, "Model prediction failed: {}", e),
            Self::Config { msg } => write!(f, "Error interpreting the config: {}", msg),
            Self::Io { source, path } => match path {
                Some(path) => write!(f, "Error reading file {}: {}", path.display(), source),
                None => write!(f, "IO error: {}", source),
            },
            Self::ParseError { msg } => write!(f, "Error parsing input: {}", msg),
        }
    }
}

impl std::error::Error for PtmSeekError {}

impl PtmSeekError {
    /// Short machine-readable tag, used by the daemon responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput { .. } => "empty_input",
            Self::SequenceTooShort { .. } => "sequence_too_short",
            Self::Inference(_) => "inference",
            Self::Config { .. } => "config",
            Self::Io { .. } => "io",
            Self::ParseError { .. } => "invalid_request",
        }
    }
}

pub type Result<T> = std::result::Result<T, PtmSeekError>;

impl From<ClassifierError> for PtmSeekError {
    fn from(x: ClassifierError) -> Self {
        Self::Inference(x)
    }
}

impl From<serde_json::Error> for PtmSeekError {
    fn from(val: serde_json::Error) -> Self {
        PtmSeekError::ParseError {
            msg: val.to_string(),
        }
    }
}

impl From<csv::Error> for PtmSeekError {
    fn from(val: csv::Error) -> Self {
        match val.into_kind() {
            csv::ErrorKind::Io(source) => PtmSeekError::Io { source, path: None },
            other => PtmSeekError::ParseError {
                msg: format!("{:?}", other),
            },
        }
    }
}
