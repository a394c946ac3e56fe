//! Text Tokenizer
//!
//! Word → token-id table fit offline alongside the network. Matches the
//! training-side conventions: lowercase, punctuation stripped, split on
//! whitespace, out-of-vocabulary words mapped to the OOV token when one
//! exists and dropped otherwise.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::logic::errors::PredictError;

/// Characters stripped from phrases before splitting, mirroring the
/// training-side text preprocessing.
const FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tokenizer {
    /// Vocabulary word → token id (ids start at 1; 0 is padding).
    pub word_index: HashMap<String, i64>,
    /// Out-of-vocabulary marker, if the table was fit with one.
    #[serde(default)]
    pub oov_token: Option<String>,
}

impl Tokenizer {
    pub fn new(word_index: HashMap<String, i64>, oov_token: Option<String>) -> Self {
        Self {
            word_index,
            oov_token,
        }
    }

    /// Load from a JSON side file:
    /// `{"word_index": {"<OOV>": 1, ...}, "oov_token": "<OOV>"}`.
    pub fn from_json_file(path: &str) -> Result<Self, PredictError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PredictError::ArtifactUnavailable(format!("Failed to read tokenizer {}: {}", path, e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            PredictError::ArtifactUnavailable(format!("Failed to parse tokenizer {}: {}", path, e))
        })
    }

    fn oov_index(&self) -> Option<i64> {
        self.oov_token
            .as_ref()
            .and_then(|token| self.word_index.get(token))
            .copied()
    }

    /// Convert a phrase to its token-id sequence.
    pub fn tokens(&self, phrase: &str) -> Vec<i64> {
        let lowered = phrase.to_lowercase();
        let cleaned: String = lowered
            .chars()
            .map(|c| if FILTERS.contains(c) { ' ' } else { c })
            .collect();

        cleaned
            .split_whitespace()
            .filter_map(|word| self.word_index.get(word).copied().or_else(|| self.oov_index()))
            .collect()
    }

    /// First token of a phrase, 0 when the phrase tokenizes to nothing.
    pub fn first_token(&self, phrase: &str) -> i64 {
        self.tokens(phrase).first().copied().unwrap_or(0)
    }

    pub fn vocab_size(&self) -> usize {
        self.word_index.len()
    }
}
