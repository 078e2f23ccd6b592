//! Rewrites peptide text into the token vocabulary the classifier was trained on.

use crate::models::{
    PAD_CHAR,
    Peptide,
};

pub const MASK_CHAR: char = '.';
pub const MASK_TOKEN: &str = "<mask>";
pub const PAD_TOKEN: &str = "<pad>";

pub fn normalize_peptide(pep: &str) -> String {
    let mut out = String::with_capacity(pep.len());
    for c in pep.chars() {
        match c {
            MASK_CHAR => out.push_str(MASK_TOKEN),
            PAD_CHAR => out.push_str(PAD_TOKEN),
            other => out.push(other),
        }
    }
    out
}

pub fn normalize_all(peptides: &[Peptide]) -> Vec<String> {
    peptides
        .iter()
        .map(|x| normalize_peptide(x.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_peptide_unchanged() {
        let pep = "MKTAYIAKQRQISFVKSHFSR";
        assert_eq!(normalize_peptide(pep), pep);
    }

    #[test]
    fn test_all_pads() {
        let pep = "-".repeat(21);
        assert_eq!(normalize_peptide(&pep), PAD_TOKEN.repeat(21));
    }

    #[test]
    fn test_mask_and_pad() {
        assert_eq!(
            normalize_peptide("--AB.C"),
            "<pad><pad>AB<mask>C".to_string()
        );
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let peps = vec![Peptide::from("-A"), Peptide::from("B.")];
        assert_eq!(normalize_all(&peps), vec!["<pad>A", "B<mask>"]);
    }
}
