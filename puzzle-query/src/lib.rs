use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const WORD_COUNT: RangeInclusive<usize> = 3..=20;
pub const GRID_SIZE: RangeInclusive<u32> = 10..=30;

/// Parameters for a word search generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSearchQuery {
    pub words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Affects which directions words may run in. Free-form on our side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl WordSearchQuery {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    /// Check the parameters before they are sent, collecting every problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.words.is_empty() {
            errors.push("Required parameter [words] is missing".to_owned());
        } else {
            if !WORD_COUNT.contains(&self.words.len()) {
                errors.push(format!(
                    "Parameter [words] must contain between {} and {} words",
                    WORD_COUNT.start(),
                    WORD_COUNT.end()
                ));
            }
            if self.words.iter().any(|w| w.trim().is_empty()) {
                errors.push("Parameter [words] must not contain blank words".to_owned());
            }
        }

        if let Some(size) = self.size {
            if size < *GRID_SIZE.start() {
                errors.push(format!(
                    "Parameter [size] must be at least {}",
                    GRID_SIZE.start()
                ));
            }
            if size > *GRID_SIZE.end() {
                errors.push(format!("Parameter [size] must be at most {}", GRID_SIZE.end()));
            }
        }

        if self.difficulty.as_deref().is_some_and(|d| d.trim().is_empty()) {
            errors.push("Parameter [difficulty] must not be blank".to_owned());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = errors.len(), "query failed validation");
            Err(ValidationError { errors })
        }
    }

    /// Query parameters for a GET request. Absent and empty values are left out.
    pub fn to_query_params(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        if !self.words.is_empty() {
            params.insert("words", self.words.join(","));
        }
        if let Some(size) = self.size {
            params.insert("size", size.to_string());
        }
        if let Some(difficulty) = self.difficulty.as_ref().filter(|d| !d.is_empty()) {
            params.insert("difficulty", difficulty.clone());
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", .errors.join("; "))]
pub struct ValidationError {
    pub errors: Vec<String>,
}
