//! Trigger scanning (input pre-classification).
//!
//! This module folds the raw description into the form every pass matches
//! against, then inspects it for coarse signals that let the parser skip
//! passes which cannot possibly match.
//!
//! ## Folding
//!
//! Municipal descriptions mix case and accents freely ("Lun au Ven",
//! "1er DÉC."). Folding maps everything to uppercase ASCII letters so the
//! passes only need one spelling per token.
//!
//! ## Design notes
//!
//! - The scan is a *heuristic*. False positives are fine because a pass still
//!   has to match its own regex; false negatives are not, so word lists here
//!   must cover every token the passes recognize.
//! - Words are split on any non-letter, which is never stricter than the `\b`
//!   boundaries the passes use.

use bitflags::bitflags;

bitflags! {
    /// Coarse buckets for fast input classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TriggerMask: u32 {
        const HAS_DIGITS = 1 << 0;
        const HAS_HOUR   = 1 << 1;
        const DAYISH     = 1 << 2;
        const MONTHISH   = 1 << 3;
    }
}

const DAY_WORDS: &[&str] = &[
    "LUNDI", "LUN", "MARDI", "MAR", "MERCREDI", "MER", "JEUDI", "JEU", "VENDREDI", "VEN", "SAMEDI", "SAM", "DIMANCHE",
    "DIM",
];

const MONTH_WORDS: &[&str] = &[
    "JANVIER",
    "JANV",
    "JAN",
    "FEVRIER",
    "FEV",
    "MARS",
    "AVRIL",
    "AVR",
    "MAI",
    "JUIN",
    "JUILLET",
    "JUIL",
    "AOUT",
    "SEPTEMBRE",
    "SEPT",
    "OCTOBRE",
    "OCT",
    "NOVEMBRE",
    "NOV",
    "DECEMBRE",
    "DEC",
];

/// Uppercase `input` and strip French accents.
///
/// ```text
/// "\p Lun. à Ven. 1er déc." -> "\P LUN. A VEN. 1ER DEC."
/// ```
pub fn fold(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_uppercase)
        .map(|c| match c {
            'À' | 'Â' | 'Ä' => 'A',
            'Ç' => 'C',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Î' | 'Ï' => 'I',
            'Ô' | 'Ö' => 'O',
            'Ù' | 'Û' | 'Ü' => 'U',
            'Ÿ' => 'Y',
            '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

/// Input characteristics detected from the folded description.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub mask: TriggerMask,
}

impl TriggerInfo {
    /// Scan already-folded text for coarse buckets.
    pub fn scan(folded: &str) -> Self {
        let mut mask = TriggerMask::empty();
        let bytes = folded.as_bytes();

        if bytes.iter().any(|b| b.is_ascii_digit()) {
            mask |= TriggerMask::HAS_DIGITS;
        }

        if bytes.windows(2).any(|w| w[0].is_ascii_digit() && w[1] == b'H') {
            mask |= TriggerMask::HAS_HOUR;
        }

        for word in folded.split(|c: char| !c.is_ascii_alphabetic()).filter(|w| !w.is_empty()) {
            if DAY_WORDS.contains(&word) {
                mask |= TriggerMask::DAYISH;
            }
            if MONTH_WORDS.contains(&word) {
                mask |= TriggerMask::MONTHISH;
            }
        }

        TriggerInfo { mask }
    }
}
