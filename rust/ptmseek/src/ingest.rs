//! Turning request text into an ordered list of sequences.

use crate::errors::{
    PtmSeekError,
    Result,
};
use crate::models::WINDOW_WIDTH;

/// Identifier given to a sequence submitted without a FASTA header.
pub const DEFAULT_IDENTIFIER: &str = "sequence_1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSequence {
    pub identifier: String,
    pub residues: String,
}

impl RawSequence {
    pub fn new(identifier: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            residues: residues.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.residues.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// The two shapes a request can take.
#[derive(Debug, Clone)]
pub enum SequenceInput {
    /// Multi-record text, records started by `>` header lines.
    Fasta(String),
    /// One bare sequence.
    Single(String),
}

impl SequenceInput {
    /// Builds a FASTA input from raw bytes, failing if they are not UTF-8.
    pub fn from_fasta_bytes(bytes: &[u8]) -> Result<Self> {
        match std::str::from_utf8(bytes) {
            Ok(x) => Ok(Self::Fasta(x.to_string())),
            Err(_) => Err(PtmSeekError::EmptyInput {
                context: "File must be UTF-8 text",
            }),
        }
    }

    /// Parses and validates the input into ordered records.
    pub fn into_records(self) -> Result<Vec<RawSequence>> {
        let records = match self {
            Self::Fasta(text) => parse_fasta(&text),
            Self::Single(text) => parse_single(&text),
        };
        validate_records(records)
    }
}

/// Parses FASTA-style text. Lines are trimmed and blank lines skipped.
///
/// Lines may end in `\n`, `\r\n` or a bare `\r`.
///
/// A record is only emitted once the next header (or the end of the text)
/// is reached, so residue lines before the first header are discarded.
pub fn parse_fasta(text: &str) -> Vec<RawSequence> {
    let mut records = Vec::new();
    let mut curr_id: Option<String> = None;
    let mut curr_seq = String::new();

    for line in text.split(['\n', '\r']) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = curr_id.take() {
                records.push(RawSequence::new(id, std::mem::take(&mut curr_seq)));
            }
            curr_id = Some(header.trim().to_string());
            curr_seq.clear();
        } else {
            curr_seq.push_str(line);
        }
    }
    if let Some(id) = curr_id {
        records.push(RawSequence::new(id, curr_seq));
    }
    records
}

/// A whitespace-only string yields no record at all.
pub fn parse_single(text: &str) -> Vec<RawSequence> {
    let seq = text.trim();
    if seq.is_empty() {
        return Vec::new();
    }
    vec![RawSequence::new(DEFAULT_IDENTIFIER, seq)]
}

fn validate_records(records: Vec<RawSequence>) -> Result<Vec<RawSequence>> {
    if records.is_empty() {
        return Err(PtmSeekError::EmptyInput {
            context: "No sequence or file provided",
        });
    }
    records
        .into_iter()
        .map(|mut rec| {
            let trimmed = rec.residues.trim();
            if trimmed.len() != rec.residues.len() {
                rec.residues = trimmed.to_string();
            }
            let length = rec.len();
            if length < WINDOW_WIDTH {
                return Err(PtmSeekError::SequenceTooShort {
                    identifier: rec.identifier,
                    length,
                    minimum: WINDOW_WIDTH,
                });
            }
            Ok(rec)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ_A: &str = "MKTAYIAKQRQISFVKSHFSRQ";
    const SEQ_B: &str = "PEPTIDEPINKTOMATOTOMATO";

    #[test]
    fn test_parse_fasta_multiline() {
        let text = format!(
            ">first protein\n{}\n{}\n\n>  second \n{}\n",
            &SEQ_A[..10],
            &SEQ_A[10..],
            SEQ_B
        );
        let records = parse_fasta(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier, "first protein");
        assert_eq!(records[0].residues, SEQ_A);
        assert_eq!(records[1].identifier, "second");
        assert_eq!(records[1].residues, SEQ_B);
    }

    #[test]
    fn test_parse_fasta_trims_lines() {
        let text = format!(">x\r\n  {}  \r\n", SEQ_A);
        let records = parse_fasta(&text);
        assert_eq!(records, vec![RawSequence::new("x", SEQ_A)]);
    }

    #[test]
    fn test_parse_fasta_cr_only() {
        let text = format!(">p1\r{}\r{}\r>p2\r{}\r", &SEQ_A[..10], &SEQ_A[10..], SEQ_B);
        let records = parse_fasta(&text);
        assert_eq!(
            records,
            vec![RawSequence::new("p1", SEQ_A), RawSequence::new("p2", SEQ_B)]
        );
        let records = SequenceInput::Fasta(format!(">p1\r{}\r", SEQ_A))
            .into_records()
            .unwrap();
        assert_eq!(records[0].residues, SEQ_A);
    }

    #[test]
    fn test_parse_fasta_drops_headerless_lines() {
        let text = format!("{}\n>only\n{}\n", SEQ_B, SEQ_A);
        let records = parse_fasta(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].residues, SEQ_A);
    }

    #[test]
    fn test_parse_fasta_without_headers_is_empty() {
        assert!(parse_fasta(SEQ_A).is_empty());
        let res = SequenceInput::Fasta(SEQ_A.to_string()).into_records();
        assert!(matches!(res, Err(PtmSeekError::EmptyInput { .. })));
    }

    #[test]
    fn test_single_sequence_gets_default_id() {
        let records = SequenceInput::Single(format!("  {}\n", SEQ_A))
            .into_records()
            .unwrap();
        assert_eq!(records, vec![RawSequence::new(DEFAULT_IDENTIFIER, SEQ_A)]);
    }

    #[test]
    fn test_empty_input_fails() {
        let res = SequenceInput::Single("".to_string()).into_records();
        assert!(matches!(res, Err(PtmSeekError::EmptyInput { .. })));
        let res = SequenceInput::Single("   \n ".to_string()).into_records();
        assert!(matches!(res, Err(PtmSeekError::EmptyInput { .. })));
        let res = SequenceInput::Fasta("".to_string()).into_records();
        assert!(matches!(res, Err(PtmSeekError::EmptyInput { .. })));
    }

    #[test]
    fn test_short_sequence_fails() {
        let res = SequenceInput::Single("MKTAYIAKQR".to_string()).into_records();
        match res {
            Err(PtmSeekError::SequenceTooShort {
                identifier,
                length,
                minimum,
            }) => {
                assert_eq!(identifier, DEFAULT_IDENTIFIER);
                assert_eq!(length, 10);
                assert_eq!(minimum, 21);
            }
            other => panic!("Expected SequenceTooShort, got {:?}", other),
        }
    }

    #[test]
    fn test_short_record_among_valid_ones_fails() {
        let text = format!(">ok\n{}\n>short\nMKT\n", SEQ_A);
        let res = SequenceInput::Fasta(text).into_records();
        assert!(matches!(
            res,
            Err(PtmSeekError::SequenceTooShort { ref identifier, .. }) if identifier == "short"
        ));
    }

    #[test]
    fn test_exactly_minimum_length_is_accepted() {
        let seq = "A".repeat(21);
        let records = SequenceInput::Single(seq.clone()).into_records().unwrap();
        assert_eq!(records[0].residues, seq);
    }

    #[test]
    fn test_invalid_utf8_is_empty_input() {
        let res = SequenceInput::from_fasta_bytes(&[0xff, 0xfe, b'>']);
        assert!(matches!(res, Err(PtmSeekError::EmptyInput { .. })));
    }
}
