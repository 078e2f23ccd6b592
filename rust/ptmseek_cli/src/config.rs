use ptmseek::{
    ClassifierConfig,
    Config,
};

use crate::cli::Cli;
use crate::errors::CliError;

/// Loads the config file (if any) and applies the command line overrides.
pub fn resolve_config(args: &Cli) -> Result<Config, CliError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(batch_size) = args.batch_size {
        config.analysis.batch_size = Some(batch_size);
    }
    if let Some(address) = &args.classifier_address {
        config.classifier = Some(ClassifierConfig::Remote {
            address: address.clone(),
            timeout_seconds: None,
        });
    }
    if args.dry_run {
        config.classifier = Some(ClassifierConfig::Constant { value: 0.0 });
    }
    if config.classifier.is_none() {
        return Err(CliError::Config {
            source: "No classifier configured, please provide one in either the config file, with the --classifier-address flag or use --dry-run".to_string(),
        });
    }
    Ok(config)
}
