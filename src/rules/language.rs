//! Display language and the sheet columns it maps to.

use crate::data::{DESCRIPTION_COLUMN, TITLE_COLUMN};
use std::fmt;

/// Languages offered in the language selector. English reads the unsuffixed
/// columns; every other language reads `<column>_<Language>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    English,
    German,
    French,
    Chinese,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::German,
        Language::French,
        Language::Chinese,
        Language::Spanish,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
            Language::French => "French",
            Language::Chinese => "Chinese",
            Language::Spanish => "Spanish",
        }
    }

    pub fn is_default(self) -> bool {
        self == Language::English
    }

    pub fn title_field(self) -> String {
        localized_field(TITLE_COLUMN, self)
    }

    pub fn description_field(self) -> String {
        localized_field(DESCRIPTION_COLUMN, self)
    }

    /// `(title_field, description_field)` for this language.
    ///
    /// The columns are not checked against the sheet; a missing column simply
    /// falls back to English at render time.
    pub fn fields(self) -> (String, String) {
        (self.title_field(), self.description_field())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column name for `base` in `language`.
pub fn localized_field(base: &str, language: Language) -> String {
    if language.is_default() {
        base.to_string()
    } else {
        format!("{base}_{}", language.name())
    }
}
