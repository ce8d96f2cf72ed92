//! Languages present in the multilingual Wikipedia dataset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::wiki_search_error::WikiSearchError;

/// Article language, stored in the `lang` property as an ISO 639-1 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    Zh,
    #[default]
    En,
    Fr,
    De,
    Hi,
    It,
    Ja,
    Ko,
    Es,
}

impl Language {
    /// Every supported language, ordered by display name.
    pub const ALL: [Language; 10] = [
        Language::Ar,
        Language::Zh,
        Language::En,
        Language::Fr,
        Language::De,
        Language::Hi,
        Language::It,
        Language::Ja,
        Language::Ko,
        Language::Es,
    ];

    /// Two-letter code as stored in the index.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::Zh => "zh",
            Language::En => "en",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Hi => "hi",
            Language::It => "it",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Es => "es",
        }
    }

    /// English name, used in prompts and listings.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Ar => "Arabic",
            Language::Zh => "Chinese",
            Language::En => "English",
            Language::Fr => "French",
            Language::De => "German",
            Language::Hi => "Hindi",
            Language::It => "Italian",
            Language::Ja => "Japanese",
            Language::Ko => "Korean",
            Language::Es => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = WikiSearchError;

    /// Accepts the code or the English name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Language::ALL
            .into_iter()
            .find(|l| {
                l.code().eq_ignore_ascii_case(needle) || l.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| WikiSearchError::InvalidQuery(format!("unsupported language: '{needle}'")))
    }
}
