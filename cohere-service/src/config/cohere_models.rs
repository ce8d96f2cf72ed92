//! Catalogue of Cohere models selectable per request.
//!
//! The set is closed: an unknown model name fails at parse time with
//! [`ConfigError::UnknownModel`] instead of reaching the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error_handler::ConfigError;

/// Generation models offered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenerationModel {
    /// Default quality model.
    #[default]
    #[serde(rename = "command")]
    Command,
    /// Smaller, faster variant.
    #[serde(rename = "command-light")]
    CommandLight,
    /// Nightly build of `command`.
    #[serde(rename = "command-nightly")]
    CommandNightly,
}

impl GenerationModel {
    pub const ALL: [GenerationModel; 3] = [
        GenerationModel::Command,
        GenerationModel::CommandLight,
        GenerationModel::CommandNightly,
    ];

    /// Wire name sent as `model`.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationModel::Command => "command",
            GenerationModel::CommandLight => "command-light",
            GenerationModel::CommandNightly => "command-nightly",
        }
    }
}

impl fmt::Display for GenerationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GenerationModel::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownModel(wanted.to_string()))
    }
}

/// Rerank models offered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RerankModel {
    /// English-only cross-encoder.
    #[default]
    #[serde(rename = "rerank-english-v2.0")]
    EnglishV2,
    /// Multilingual cross-encoder.
    #[serde(rename = "rerank-multilingual-v2.0")]
    MultilingualV2,
}

impl RerankModel {
    pub const ALL: [RerankModel; 2] = [RerankModel::EnglishV2, RerankModel::MultilingualV2];

    /// Wire name sent as `model`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RerankModel::EnglishV2 => "rerank-english-v2.0",
            RerankModel::MultilingualV2 => "rerank-multilingual-v2.0",
        }
    }
}

impl fmt::Display for RerankModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RerankModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RerankModel::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownModel(wanted.to_string()))
    }
}
