mod peptide;
pub mod window;

pub use peptide::{
    CENTER_OFFSET,
    FLANK_WIDTH,
    PAD_CHAR,
    Peptide,
    WINDOW_WIDTH,
};
pub use window::{
    deduplicate_peptides,
    extract_windows,
    raw_windows,
};
