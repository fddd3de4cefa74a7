//! Variant selection: which slot of an entry answers a request.
//!
//! The mode depends only on which options are present:
//!
//! | count | gender | mode                 |
//! |-------|--------|----------------------|
//! | no    | no     | `Default`            |
//! | yes   | no     | `Pluralized`         |
//! | no    | yes    | `Gendered`           |
//! | yes   | yes    | `PluralizedGendered` |
//!
//! Each mode yields a chain of candidate slots ending in `Default`; the
//! first non-empty one wins.

use crate::entry::{Gender, PluralCategory, TranslationEntry, Variant};
use crate::options::Options;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Default,
    Pluralized,
    Gendered,
    PluralizedGendered,
}

impl Mode {
    pub fn select(options: &Options) -> Self {
        match (options.count.is_some(), options.gender.is_some()) {
            (true, true) => Mode::PluralizedGendered,
            (true, false) => Mode::Pluralized,
            (false, true) => Mode::Gendered,
            (false, false) => Mode::Default,
        }
    }

    pub fn uses_count(&self) -> bool {
        matches!(self, Mode::Pluralized | Mode::PluralizedGendered)
    }

    pub fn uses_gender(&self) -> bool {
        matches!(self, Mode::Gendered | Mode::PluralizedGendered)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Default => "Default",
            Mode::Pluralized => "Pluralized",
            Mode::Gendered => "Gendered",
            Mode::PluralizedGendered => "PluralizedGendered",
        };
        f.write_str(name)
    }
}

/// Candidate slots for a request, most specific first, always ending in
/// `Default`.
///
/// `plural` is `None` when the strategy returned a label outside the
/// category vocabulary; `gender` is `None` for absent or unrecognized
/// gender input. A gendered request without a valid gender is treated as
/// the same request without gender.
pub fn variant_chain(
    mode: Mode,
    plural: Option<PluralCategory>,
    gender: Option<Gender>,
) -> Vec<Variant> {
    let mut chain = Vec::with_capacity(3);
    match (mode, plural, gender) {
        (Mode::PluralizedGendered, Some(category), Some(gender)) => {
            chain.push(Variant::plural_gender(category, gender));
            chain.push(Variant::plural(category));
        }
        (Mode::PluralizedGendered | Mode::Pluralized, Some(category), _) => {
            chain.push(Variant::plural(category));
        }
        (Mode::Gendered, _, Some(gender)) => {
            chain.push(Variant::gender(gender));
        }
        _ => {}
    }
    chain.push(Variant::Default);
    chain
}

/// First non-empty slot of `chain`, or the (possibly empty) `Default` text.
pub fn select_text<'a>(entry: &'a TranslationEntry, chain: &[Variant]) -> (Variant, &'a str) {
    chain
        .iter()
        .find_map(|&variant| entry.text(variant).map(|text| (variant, text)))
        .unwrap_or((Variant::Default, entry.get(Variant::Default)))
}
