use crate::classifier::{
    ConstantClassifier,
    PeptideClassifier,
    RemoteClassifier,
};
use crate::errors::{
    PtmSeekError,
    Result,
};
use crate::inference::{
    DEFAULT_BATCH_SIZE,
    InferenceOrchestrator,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::path::Path;
use std::time::Duration;

/// Environment variable that changes the default batch size.
pub const BATCH_SIZE_ENV_VAR: &str = "PTMSEEK_BATCH_SIZE";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub classifier: Option<ClassifierConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AnalysisConfig {
    /// Falls back to the environment, then to [`DEFAULT_BATCH_SIZE`].
    #[serde(default)]
    pub batch_size: Option<usize>,
}

impl AnalysisConfig {
    pub fn resolve_batch_size(&self) -> Result<usize> {
        match self.batch_size {
            Some(x) => Ok(x),
            None => match std::env::var(BATCH_SIZE_ENV_VAR) {
                Ok(x) => batch_size_from_env(Some(&x)),
                Err(std::env::VarError::NotPresent) => batch_size_from_env(None),
                Err(e) => Err(PtmSeekError::Config {
                    msg: format!("Invalid {} value: {}", BATCH_SIZE_ENV_VAR, e),
                }),
            },
        }
    }
}

fn batch_size_from_env(value: Option<&str>) -> Result<usize> {
    let Some(value) = value else {
        return Ok(DEFAULT_BATCH_SIZE);
    };
    value.trim().parse().map_err(|e| PtmSeekError::Config {
        msg: format!("Invalid {} value {:?}: {}", BATCH_SIZE_ENV_VAR, value, e),
    })
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ClassifierConfig {
    #[serde(rename = "remote")]
    Remote {
        address: String,
        timeout_seconds: Option<u64>,
    },
    #[serde(rename = "constant")]
    Constant { value: f32 },
}

impl ClassifierConfig {
    pub fn build(&self) -> Box<dyn PeptideClassifier + Send + Sync> {
        match self {
            ClassifierConfig::Remote {
                address,
                timeout_seconds,
            } => {
                let clf = RemoteClassifier::new(address.clone());
                match timeout_seconds {
                    Some(secs) => Box::new(clf.with_timeout(Duration::from_secs(*secs))),
                    None => Box::new(clf),
                }
            }
            ClassifierConfig::Constant { value } => Box::new(ConstantClassifier::uniform(*value)),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let conf = match std::fs::File::open(path.as_ref()) {
            Ok(x) => x,
            Err(e) => {
                return Err(PtmSeekError::Io {
                    source: e,
                    path: Some(path.as_ref().to_path_buf()),
                });
            }
        };
        let config: Config = serde_json::from_reader(conf)?;
        Ok(config)
    }

    pub fn orchestrator(&self) -> Result<InferenceOrchestrator> {
        InferenceOrchestrator::try_new(self.analysis.resolve_batch_size()?)
    }
}
