//! Translation entries and the closed set of text slots they carry.
//!
//! A [`TranslationEntry`] holds one message under a key, with a `Default`
//! text and up to 23 optional variants:
//!
//! - plural variants: `Zero`, `One`, `Two`, `Few`, `Many`
//! - gender variants: `Male`, `Female`, `NonBinary`
//! - plural × gender variants: `ZeroMale`, `OneFemale`, `ManyNonBinary`, ...
//!
//! Slots are addressed through [`Variant`], never by field name at runtime.

use serde::Deserialize;
use std::fmt;

/// Plural categories a pluralization strategy can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
}

impl PluralCategory {
    pub const ALL: [PluralCategory; 5] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "Zero",
            PluralCategory::One => "One",
            PluralCategory::Two => "Two",
            PluralCategory::Few => "Few",
            PluralCategory::Many => "Many",
        }
    }

    /// Parse a label returned by a pluralization strategy.
    ///
    /// Labels are matched exactly (`"One"`, not `"one"`), as they name
    /// entry slots. Anything else is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == label)
    }
}

impl AsRef<str> for PluralCategory {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammatical gender of the subject of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::NonBinary];

    /// Normalize caller input into a gender.
    ///
    /// Case-insensitive: `male`, `female`, `nonbinary` and `non-binary`.
    /// Unrecognized input yields `None`, the same as no gender at all.
    ///
    /// ```
    /// use variant_i18n::Gender;
    ///
    /// assert_eq!(Gender::parse("Female"), Some(Gender::Female));
    /// assert_eq!(Gender::parse("NON-BINARY"), Some(Gender::NonBinary));
    /// assert_eq!(Gender::parse("unknown"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "nonbinary" | "non-binary" => Some(Gender::NonBinary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary => "NonBinary",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One text slot of a [`TranslationEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Default,
    Zero,
    One,
    Two,
    Few,
    Many,
    Male,
    Female,
    NonBinary,
    ZeroMale,
    OneMale,
    TwoMale,
    FewMale,
    ManyMale,
    ZeroFemale,
    OneFemale,
    TwoFemale,
    FewFemale,
    ManyFemale,
    ZeroNonBinary,
    OneNonBinary,
    TwoNonBinary,
    FewNonBinary,
    ManyNonBinary,
}

impl Variant {
    pub const ALL: [Variant; 24] = [
        Variant::Default,
        Variant::Zero,
        Variant::One,
        Variant::Two,
        Variant::Few,
        Variant::Many,
        Variant::Male,
        Variant::Female,
        Variant::NonBinary,
        Variant::ZeroMale,
        Variant::OneMale,
        Variant::TwoMale,
        Variant::FewMale,
        Variant::ManyMale,
        Variant::ZeroFemale,
        Variant::OneFemale,
        Variant::TwoFemale,
        Variant::FewFemale,
        Variant::ManyFemale,
        Variant::ZeroNonBinary,
        Variant::OneNonBinary,
        Variant::TwoNonBinary,
        Variant::FewNonBinary,
        Variant::ManyNonBinary,
    ];

    pub fn plural(category: PluralCategory) -> Self {
        match category {
            PluralCategory::Zero => Variant::Zero,
            PluralCategory::One => Variant::One,
            PluralCategory::Two => Variant::Two,
            PluralCategory::Few => Variant::Few,
            PluralCategory::Many => Variant::Many,
        }
    }

    pub fn gender(gender: Gender) -> Self {
        match gender {
            Gender::Male => Variant::Male,
            Gender::Female => Variant::Female,
            Gender::NonBinary => Variant::NonBinary,
        }
    }

    /// The combined slot, e.g. `Many` + `Female` = `ManyFemale`.
    pub fn plural_gender(category: PluralCategory, gender: Gender) -> Self {
        use Gender::*;
        use PluralCategory::*;
        match (category, gender) {
            (Zero, Male) => Variant::ZeroMale,
            (One, Male) => Variant::OneMale,
            (Two, Male) => Variant::TwoMale,
            (Few, Male) => Variant::FewMale,
            (Many, Male) => Variant::ManyMale,
            (Zero, Female) => Variant::ZeroFemale,
            (One, Female) => Variant::OneFemale,
            (Two, Female) => Variant::TwoFemale,
            (Few, Female) => Variant::FewFemale,
            (Many, Female) => Variant::ManyFemale,
            (Zero, NonBinary) => Variant::ZeroNonBinary,
            (One, NonBinary) => Variant::OneNonBinary,
            (Two, NonBinary) => Variant::TwoNonBinary,
            (Few, NonBinary) => Variant::FewNonBinary,
            (Many, NonBinary) => Variant::ManyNonBinary,
        }
    }

    /// Slot name as written in translation files.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Default => "Default",
            Variant::Zero => "Zero",
            Variant::One => "One",
            Variant::Two => "Two",
            Variant::Few => "Few",
            Variant::Many => "Many",
            Variant::Male => "Male",
            Variant::Female => "Female",
            Variant::NonBinary => "NonBinary",
            Variant::ZeroMale => "ZeroMale",
            Variant::OneMale => "OneMale",
            Variant::TwoMale => "TwoMale",
            Variant::FewMale => "FewMale",
            Variant::ManyMale => "ManyMale",
            Variant::ZeroFemale => "ZeroFemale",
            Variant::OneFemale => "OneFemale",
            Variant::TwoFemale => "TwoFemale",
            Variant::FewFemale => "FewFemale",
            Variant::ManyFemale => "ManyFemale",
            Variant::ZeroNonBinary => "ZeroNonBinary",
            Variant::OneNonBinary => "OneNonBinary",
            Variant::TwoNonBinary => "TwoNonBinary",
            Variant::FewNonBinary => "FewNonBinary",
            Variant::ManyNonBinary => "ManyNonBinary",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.name() == name)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A translatable message and all of its variants.
///
/// Field names follow the translation file format (`Key`, `Default`,
/// `OneMale`, ...). Missing fields deserialize as empty strings, and an
/// empty slot is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TranslationEntry {
    pub key: String,
    pub default: String,

    pub zero: String,
    pub one: String,
    pub two: String,
    pub few: String,
    pub many: String,

    pub male: String,
    pub female: String,
    pub non_binary: String,

    pub zero_male: String,
    pub one_male: String,
    pub two_male: String,
    pub few_male: String,
    pub many_male: String,

    pub zero_female: String,
    pub one_female: String,
    pub two_female: String,
    pub few_female: String,
    pub many_female: String,

    pub zero_non_binary: String,
    pub one_non_binary: String,
    pub two_non_binary: String,
    pub few_non_binary: String,
    pub many_non_binary: String,
}

/// All entries of one language, in registration order.
pub type TranslationEntries = Vec<TranslationEntry>;

impl TranslationEntry {
    pub fn new(key: &str) -> Self {
        TranslationEntry {
            key: key.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_default(self, text: &str) -> Self {
        self.with_variant(Variant::Default, text)
    }

    pub fn with_variant(mut self, variant: Variant, text: &str) -> Self {
        *self.slot_mut(variant) = text.to_owned();
        self
    }

    /// Raw slot content, possibly empty.
    pub fn get(&self, variant: Variant) -> &str {
        match variant {
            Variant::Default => &self.default,
            Variant::Zero => &self.zero,
            Variant::One => &self.one,
            Variant::Two => &self.two,
            Variant::Few => &self.few,
            Variant::Many => &self.many,
            Variant::Male => &self.male,
            Variant::Female => &self.female,
            Variant::NonBinary => &self.non_binary,
            Variant::ZeroMale => &self.zero_male,
            Variant::OneMale => &self.one_male,
            Variant::TwoMale => &self.two_male,
            Variant::FewMale => &self.few_male,
            Variant::ManyMale => &self.many_male,
            Variant::ZeroFemale => &self.zero_female,
            Variant::OneFemale => &self.one_female,
            Variant::TwoFemale => &self.two_female,
            Variant::FewFemale => &self.few_female,
            Variant::ManyFemale => &self.many_female,
            Variant::ZeroNonBinary => &self.zero_non_binary,
            Variant::OneNonBinary => &self.one_non_binary,
            Variant::TwoNonBinary => &self.two_non_binary,
            Variant::FewNonBinary => &self.few_non_binary,
            Variant::ManyNonBinary => &self.many_non_binary,
        }
    }

    /// Slot content, or `None` when the slot is empty.
    pub fn text(&self, variant: Variant) -> Option<&str> {
        let text = self.get(variant);
        if text.is_empty() { None } else { Some(text) }
    }

    fn slot_mut(&mut self, variant: Variant) -> &mut String {
        match variant {
            Variant::Default => &mut self.default,
            Variant::Zero => &mut self.zero,
            Variant::One => &mut self.one,
            Variant::Two => &mut self.two,
            Variant::Few => &mut self.few,
            Variant::Many => &mut self.many,
            Variant::Male => &mut self.male,
            Variant::Female => &mut self.female,
            Variant::NonBinary => &mut self.non_binary,
            Variant::ZeroMale => &mut self.zero_male,
            Variant::OneMale => &mut self.one_male,
            Variant::TwoMale => &mut self.two_male,
            Variant::FewMale => &mut self.few_male,
            Variant::ManyMale => &mut self.many_male,
            Variant::ZeroFemale => &mut self.zero_female,
            Variant::OneFemale => &mut self.one_female,
            Variant::TwoFemale => &mut self.two_female,
            Variant::FewFemale => &mut self.few_female,
            Variant::ManyFemale => &mut self.many_female,
            Variant::ZeroNonBinary => &mut self.zero_non_binary,
            Variant::OneNonBinary => &mut self.one_non_binary,
            Variant::TwoNonBinary => &mut self.two_non_binary,
            Variant::FewNonBinary => &mut self.few_non_binary,
            Variant::ManyNonBinary => &mut self.many_non_binary,
        }
    }
}
