use ptmseek::report::write_report;
use ptmseek::{
    Config,
    PtmPipeline,
    SequenceInput,
};
use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::cli::Cli;
use crate::errors::CliError;

pub fn read_input(args: &Cli) -> Result<SequenceInput, CliError> {
    if let Some(path) = &args.fasta_file {
        let bytes = std::fs::read(path).map_err(|e| CliError::Io {
            source: e.to_string(),
            path: Some(path.to_string_lossy().to_string()),
        })?;
        return Ok(SequenceInput::from_fasta_bytes(&bytes)?);
    }
    match &args.sequence {
        Some(seq) => Ok(SequenceInput::Single(seq.clone())),
        None => Err(CliError::Input {
            source: "No sequence or file provided, use --fasta-file or --sequence".to_string(),
        }),
    }
}

pub fn run(input: SequenceInput, config: &Config, output: Option<&Path>) -> Result<(), CliError> {
    let st = Instant::now();
    let classifier = match &config.classifier {
        Some(x) => x.build(),
        None => {
            return Err(CliError::Config {
                source: "No classifier configured".to_string(),
            });
        }
    };
    let orchestrator = config.orchestrator()?.with_progress(output.is_some());
    let pipeline = PtmPipeline::new(classifier, orchestrator);
    let rows = pipeline.predict(input)?;

    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| CliError::Io {
                source: e.to_string(),
                path: Some(path.to_string_lossy().to_string()),
            })?;
            let mut writer = write_report(BufWriter::new(file), &rows)?;
            writer.flush().map_err(|e| CliError::Io {
                source: e.to_string(),
                path: Some(path.to_string_lossy().to_string()),
            })?;
            info!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = write_report(stdout.lock(), &rows)?;
            writer.flush().map_err(|e| CliError::Io {
                source: e.to_string(),
                path: None,
            })?;
        }
    }
    info!("Finished in {:?}", st.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ptmseek::ClassifierConfig;

    fn tmp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ptmseek_cli_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_fasta_file_takes_precedence() {
        let fasta = tmp_path("input.fasta");
        std::fs::write(&fasta, ">p1\nMKTAYIAKQRQISFVKSHFSRQ\n").unwrap();
        let args = Cli::parse_from([
            "ptmseek",
            "--fasta-file",
            fasta.to_str().unwrap(),
            "--sequence",
            "AAAA",
        ]);
        let input = read_input(&args).unwrap();
        assert!(matches!(input, SequenceInput::Fasta(ref x) if x.contains(">p1")));
        std::fs::remove_file(&fasta).unwrap();
    }

    #[test]
    fn test_no_input() {
        let args = Cli::parse_from(["ptmseek", "--dry-run"]);
        assert!(matches!(read_input(&args), Err(CliError::Input { .. })));
    }

    #[test]
    fn test_dry_run_writes_report() {
        let out = tmp_path("report.csv");
        let mut config = Config::default();
        config.classifier = Some(ClassifierConfig::Constant { value: 0.0 });
        run(
            SequenceInput::Single("M".repeat(25)),
            &config,
            Some(out.as_path()),
        )
        .unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 1 + 21);
        assert!(text.starts_with("pep,S_Phosphorylation,"));
        std::fs::remove_file(&out).unwrap();
    }

    #[test]
    fn test_short_sequence_is_input_error() {
        let mut config = Config::default();
        config.classifier = Some(ClassifierConfig::Constant { value: 0.0 });
        let res = run(SequenceInput::Single("MKT".to_string()), &config, None);
        assert!(matches!(res, Err(CliError::Input { .. })));
    }
}
