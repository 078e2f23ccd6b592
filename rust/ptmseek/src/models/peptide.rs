use std::sync::Arc;

/// Residues on each side of the center residue.
pub const FLANK_WIDTH: usize = 10;
pub const WINDOW_WIDTH: usize = 2 * FLANK_WIDTH + 1;
pub const CENTER_OFFSET: usize = FLANK_WIDTH;
pub const PAD_CHAR: char = '-';

/// A fixed width window over a padded sequence.
///
/// The text is kept behind an `Arc<str>` since the same window is handed to
/// the normalizer, the reducer and the report writer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Peptide {
    seq: Arc<str>,
}

impl Peptide {
    pub fn new(seq: impl Into<Arc<str>>) -> Self {
        Self { seq: seq.into() }
    }

    pub fn as_str(&self) -> &str {
        self.seq.as_ref()
    }

    /// The residue the window is about, `None` if the text is too short
    /// to have one.
    pub fn center_residue(&self) -> Option<char> {
        self.seq.chars().nth(CENTER_OFFSET)
    }

    pub fn len(&self) -> usize {
        self.seq.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

impl From<&str> for Peptide {
    fn from(x: &str) -> Self {
        Self::new(x)
    }
}

impl From<String> for Peptide {
    fn from(x: String) -> Self {
        Self::new(x)
    }
}

impl From<Peptide> for String {
    fn from(x: Peptide) -> Self {
        x.seq.as_ref().to_string()
    }
}

impl std::fmt::Display for Peptide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
