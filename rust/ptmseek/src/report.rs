//! CSV rendering of reduced predictions.

use crate::errors::{
    PtmSeekError,
    Result,
};
use crate::labels::{
    ReducedLabels,
    label_names,
};
use crate::models::Peptide;
use std::io::Write;

pub const PEPTIDE_COLUMN: &str = "pep";
/// Significant digits used for every reported value.
pub const SIGNIFICANT_DIGITS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub peptide: Peptide,
    pub values: ReducedLabels,
}

pub fn header_fields() -> impl Iterator<Item = &'static str> {
    std::iter::once(PEPTIDE_COLUMN).chain(label_names())
}

pub fn header_line() -> String {
    header_fields().collect::<Vec<_>>().join(",")
}

/// Formats a number the way C's `%.{precision}g` does.
///
/// Uses fixed notation unless the decimal exponent is below -4 or at least
/// `precision`, and drops trailing zeros in both notations.
pub fn format_significant(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(num: &str) -> &str {
    if num.contains('.') {
        num.trim_end_matches('0').trim_end_matches('.')
    } else {
        num
    }
}

/// Writes the header and one line per row, every line ending in `\n`.
///
/// Fields are written as they are, never quoted, so a peptide holding a `,`
/// or `"` shifts the columns of its line.
pub struct ReportWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);
        inner.write_record(header_fields())?;
        Ok(Self { inner })
    }

    pub fn add(&mut self, row: &ReportRow) -> Result<()> {
        let values = row
            .values
            .iter()
            .map(|&x| format_significant(f64::from(x), SIGNIFICANT_DIGITS));
        self.inner
            .write_record(std::iter::once(row.peptide.to_string()).chain(values))?;
        Ok(())
    }

    pub fn finish(self) -> Result<W> {
        self.inner.into_inner().map_err(|e| PtmSeekError::Io {
            source: e.into_error(),
            path: None,
        })
    }
}

pub fn write_report<W: Write>(writer: W, rows: &[ReportRow]) -> Result<W> {
    let mut report = ReportWriter::new(writer)?;
    for row in rows {
        report.add(row)?;
    }
    report.finish()
}

pub fn report_to_string(rows: &[ReportRow]) -> Result<String> {
    let buf = write_report(Vec::new(), rows)?;
    String::from_utf8(buf).map_err(|e| PtmSeekError::ParseError { msg: e.to_string() })
}
