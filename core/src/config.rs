use crate::error::{Result, SpellError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How suggestions for one token are ranked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionOrder {
    /// Document frequency desc, then edit distance, then term.
    #[default]
    #[serde(rename = "freq")]
    Frequency,
    /// Similarity score desc, then document frequency, then term.
    #[serde(rename = "score")]
    Score,
}

/// Options recognized when configuring a spellchecker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCheckerConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
    #[serde(default)]
    pub only_more_popular: bool,
    #[serde(default)]
    pub extended_results: bool,
    #[serde(default = "default_count", alias = "maxResultsPerToken")]
    pub count: usize,
    #[serde(default = "default_max_edits")]
    pub max_edits: u32,
    #[serde(default = "default_accuracy")]
    pub accuracy: f32,
    #[serde(default)]
    pub min_prefix: usize,
    #[serde(default = "default_max_inspections")]
    pub max_inspections: usize,
    /// Below 1 a fraction of the document count, otherwise an absolute count.
    #[serde(default)]
    pub threshold_token_frequency: f32,
    /// Same units as `threshold_token_frequency`.
    #[serde(default)]
    pub max_query_frequency: Option<f32>,
    #[serde(default)]
    pub comparator: SuggestionOrder,
}

fn default_name() -> String { "default".to_string() }
fn default_min_query_length() -> usize { 4 }
fn default_max_query_length() -> usize { usize::MAX }
fn default_count() -> usize { 1 }
fn default_max_edits() -> u32 { 2 }
fn default_accuracy() -> f32 { 0.5 }
fn default_max_inspections() -> usize { 5 }

impl Default for SpellCheckerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            field: None,
            min_query_length: default_min_query_length(),
            max_query_length: default_max_query_length(),
            only_more_popular: false,
            extended_results: false,
            count: default_count(),
            max_edits: default_max_edits(),
            accuracy: default_accuracy(),
            min_prefix: 0,
            max_inspections: default_max_inspections(),
            threshold_token_frequency: 0.0,
            max_query_frequency: None,
            comparator: SuggestionOrder::default(),
        }
    }
}

impl SpellCheckerConfig {
    pub fn for_field(field: impl Into<String>) -> Self {
        Self { field: Some(field.into()), ..Self::default() }
    }

    /// Build from a mapping of option name to value. Unknown keys are ignored.
    pub fn from_options(options: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let config: Self = serde_json::from_value(serde_json::Value::Object(options.clone()))
            .map_err(|e| SpellError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read spellcheck config: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse spellcheck config: {}", path.display()))
    }

    pub fn field(&self) -> Result<&str> {
        match self.field.as_deref().map(str::trim) {
            Some(f) if !f.is_empty() => Ok(f),
            _ => Err(SpellError::MissingField),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.field()?;
        if !(1..=2).contains(&self.max_edits) {
            return Err(invalid("maxEdits", format!("{} is not between 1 and 2", self.max_edits)));
        }
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(invalid("accuracy", format!("{} is not between 0 and 1", self.accuracy)));
        }
        if self.count == 0 {
            return Err(invalid("count", "must be at least 1".to_string()));
        }
        if self.max_inspections == 0 {
            return Err(invalid("maxInspections", "must be at least 1".to_string()));
        }
        if self.min_query_length > self.max_query_length {
            return Err(invalid(
                "minQueryLength",
                format!("{} exceeds maxQueryLength {}", self.min_query_length, self.max_query_length),
            ));
        }
        if self.threshold_token_frequency < 0.0 {
            return Err(invalid("thresholdTokenFrequency", "must not be negative".to_string()));
        }
        if matches!(self.max_query_frequency, Some(f) if f < 0.0) {
            return Err(invalid("maxQueryFrequency", "must not be negative".to_string()));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> SpellError {
    SpellError::InvalidOption { name, reason }
}

/// Resolve a frequency option against the corpus size.
pub(crate) fn absolute_frequency(value: f32, num_docs: u32) -> u32 {
    if value >= 1.0 {
        value as u32
    } else {
        (value * num_docs as f32).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = SpellCheckerConfig::from_options(&options(json!({ "field": "body" }))).unwrap();
        assert_eq!(config.min_query_length, 4);
        assert_eq!(config.max_query_length, usize::MAX);
        assert_eq!(config.count, 1);
        assert_eq!(config.max_edits, 2);
        assert!(!config.only_more_popular);
        assert!(!config.extended_results);
        assert_eq!(config.comparator, SuggestionOrder::Frequency);
    }

    #[test]
    fn test_recognized_keys() {
        let config = SpellCheckerConfig::from_options(&options(json!({
            "field": "teststop",
            "minQueryLength": 2,
            "maxQueryLength": 7,
            "onlyMorePopular": true,
            "maxResultsPerToken": 3,
            "comparator": "score",
            "unrelated": "ignored",
        })))
        .unwrap();
        assert_eq!(config.field().unwrap(), "teststop");
        assert_eq!(config.min_query_length, 2);
        assert_eq!(config.max_query_length, 7);
        assert!(config.only_more_popular);
        assert_eq!(config.count, 3);
        assert_eq!(config.comparator, SuggestionOrder::Score);
    }

    #[test]
    fn test_missing_field() {
        let err = SpellCheckerConfig::from_options(&options(json!({ "minQueryLength": 2 }))).unwrap_err();
        assert!(matches!(err, SpellError::MissingField));
        let err = SpellCheckerConfig::from_options(&options(json!({ "field": "  " }))).unwrap_err();
        assert!(matches!(err, SpellError::MissingField));
    }

    #[test]
    fn test_invalid_values() {
        let err = SpellCheckerConfig::from_options(&options(json!({ "field": "f", "maxEdits": 3 }))).unwrap_err();
        assert!(matches!(err, SpellError::InvalidOption { name: "maxEdits", .. }));
        let err = SpellCheckerConfig::from_options(&options(json!({ "field": "f", "count": "many" }))).unwrap_err();
        assert!(matches!(err, SpellError::InvalidConfig(_)));
        let err = SpellCheckerConfig::from_options(&options(json!({
            "field": "f", "minQueryLength": 9, "maxQueryLength": 8
        })))
        .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_absolute_frequency() {
        assert_eq!(absolute_frequency(0.0, 100), 0);
        assert_eq!(absolute_frequency(0.01, 5), 1);
        assert_eq!(absolute_frequency(0.25, 100), 25);
        assert_eq!(absolute_frequency(3.0, 100), 3);
    }
}
