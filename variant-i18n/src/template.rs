//! Key/value argument adapter for template engines.
//!
//! Template engines call helper functions with flat string arguments. A
//! translation call is written as pairs:
//!
//! ```text
//! {{ Translate "lang" "en" "key" "hello_emails" "gender" "nonbinary" "count" "100" "Name" "Ada" }}
//! ```
//!
//! `lang`, `key`, `count` and `gender` are reserved; every other pair
//! becomes interpolation data. Order does not matter.

use crate::options::{Data, Options};

pub const LANG_ARG: &str = "lang";
pub const KEY_ARG: &str = "key";
pub const COUNT_ARG: &str = "count";
pub const GENDER_ARG: &str = "gender";

/// A translation request decoded from template arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateCall {
    pub lang: String,
    pub key: String,
    pub options: Options,
}

impl TemplateCall {
    /// Decode keyed pairs.
    ///
    /// A `count` that does not parse as an integer is ignored. Data is always
    /// attached, even when empty, so the text is always interpolated.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut call = TemplateCall::default();
        let mut data = Data::new();

        for (name, value) in pairs {
            let value = value.as_ref();
            match name.as_ref() {
                LANG_ARG => call.lang = value.to_owned(),
                KEY_ARG => call.key = value.to_owned(),
                COUNT_ARG => call.options.count = value.trim().parse::<i64>().ok(),
                GENDER_ARG => call.options.gender = Some(value.to_owned()),
                field => data.insert(field, value),
            }
        }

        call.options.data = Some(data);
        call
    }

    /// Decode a flat argument list, read two at a time. A trailing unpaired
    /// argument is dropped.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        Self::from_pairs(
            args.chunks_exact(2)
                .map(|pair| (pair[0].as_ref(), pair[1].as_ref())),
        )
    }
}
