use clap::Parser;
use ptmseek::errors::{
    PtmSeekError,
    Result,
};
use ptmseek::{
    ClassifierConfig,
    Config,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address of the model server (will over-write the config file)
    #[arg(short = 'm', long)]
    pub classifier_address: Option<String>,

    /// Address to listen on
    #[arg(short, long)]
    #[clap(default_value("127.0.0.1:3724"))]
    pub address: String,

    /// Seconds to wait for a client to finish sending its request
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub read_timeout_seconds: u64,
}

impl Cli {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_seconds)
    }

    pub fn read_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(address) = &self.classifier_address {
            config.classifier = Some(ClassifierConfig::Remote {
                address: address.clone(),
                timeout_seconds: None,
            });
        }
        if config.classifier.is_none() {
            return Err(PtmSeekError::Config {
                msg: "No classifier configured, use the config file or --classifier-address"
                    .to_string(),
            });
        }
        Ok(config)
    }
}
