//! text_tools.rs
//!
//! Text-processing routines shared by the matcher and the output layer.
//!
//! # Overview
//!
//! - **`normalize(text)`**: The matching key for area paths. Accents are
//!   decomposed and dropped, whitespace runs collapse to one space, the
//!   result is lower-cased and trimmed. Display text is never replaced by
//!   this form.
//! - **`TextFormat`** / **`apply_text_format(text, format)`**: Display
//!   casing for area names (`Aa`, `aa`, `AA`).

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref LETTER_RUN: Regex = Regex::new(r"\p{L}+").unwrap();
}

/// Combining diacritical marks block (U+0300..=U+036F).
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Returns the normalized matching key for `text`.
///
/// ```
/// # use checkin_resumen::text_tools::normalize;
/// assert_eq!(normalize("  Producción   Lince > Atmósfera "), "produccion lince > atmosfera");
/// ```
pub fn normalize(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_diacritic(*c)).collect();
    WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .to_lowercase()
        .trim()
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    /// First letter of every word upper-case, the rest lower-case.
    #[default]
    Capitalize,
    /// Everything lower-case.
    Lowercase,
    /// Everything upper-case.
    Uppercase,
}

/// Applies a display format to `text` after trimming it. Inner spacing is
/// left as is.
pub fn apply_text_format(text: &str, format: TextFormat) -> String {
    let safe = text.trim();
    match format {
        TextFormat::Lowercase => safe.to_lowercase(),
        TextFormat::Uppercase => safe.to_uppercase(),
        TextFormat::Capitalize => {
            let lower = safe.to_lowercase();
            LETTER_RUN
                .replace_all(&lower, |caps: &Captures| {
                    let word = &caps[0];
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                })
                .into_owned()
        }
    }
}
