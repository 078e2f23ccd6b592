use ptmseek::PtmSeekError;

#[derive(Debug)]
pub enum CliError {
    Config {
        source: String,
    },
    Input {
        source: String,
    },
    Io {
        source: String,
        path: Option<String>,
    },
    Prediction {
        source: String,
    },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config { source } => write!(f, "Error interpreting the config: {}", source),
            CliError::Input { source } => write!(f, "Invalid input: {}", source),
            CliError::Io { source, path } => {
                if let Some(path) = path {
                    write!(f, "Error accessing file {}: {}", path, source)
                } else {
                    write!(f, "IO error: {}", source)
                }
            }
            CliError::Prediction { source } => write!(f, "Prediction failed: {}", source),
        }
    }
}

impl From<PtmSeekError> for CliError {
    fn from(e: PtmSeekError) -> Self {
        match e {
            PtmSeekError::EmptyInput { .. } | PtmSeekError::SequenceTooShort { .. } => {
                CliError::Input {
                    source: e.to_string(),
                }
            }
            PtmSeekError::Config { .. } | PtmSeekError::ParseError { .. } => CliError::Config {
                source: e.to_string(),
            },
            PtmSeekError::Io { source, path } => CliError::Io {
                source: source.to_string(),
                path: path.map(|p| p.to_string_lossy().to_string()),
            },
            PtmSeekError::Inference(_) => CliError::Prediction {
                source: e.to_string(),
            },
        }
    }
}
