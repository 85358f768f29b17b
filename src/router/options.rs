use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::Monitor;
use crate::pattern::{HIGH_PRIORITY_RANK_BONUS, RankPolicy};
use crate::table::RouteCollection;

pub const DEFAULT_LOAD_TIMER_LABEL: &str = "load-data";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RouterOptions {
    /// Flat score added to high-priority pattern routes.
    pub high_priority_bonus: u32,
    /// Monitoring timer label bracketing handler resolution.
    pub load_timer_label: String,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            high_priority_bonus: HIGH_PRIORITY_RANK_BONUS,
            load_timer_label: DEFAULT_LOAD_TIMER_LABEL.to_string(),
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if self.high_priority_bonus == 0 {
            return Err(RouterOptionsError::HighPriorityBonusInvalid {
                provided: self.high_priority_bonus,
            });
        }
        if self.load_timer_label.trim().is_empty() {
            return Err(RouterOptionsError::EmptyTimerLabel);
        }
        Ok(())
    }

    pub fn rank_policy(&self) -> RankPolicy {
        RankPolicy::new(self.high_priority_bonus)
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn high_priority_bonus(mut self, value: u32) -> Self {
        self.options.high_priority_bonus = value;
        self
    }

    pub fn load_timer_label<S: Into<String>>(mut self, label: S) -> Self {
        self.options.load_timer_label = label.into();
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("high_priority_bonus must be at least 1 (got {provided})")]
    HighPriorityBonusInvalid { provided: u32 },
    #[error("load_timer_label must not be empty")]
    EmptyTimerLabel,
}

/// Configuration handed to the resolver alongside each reference.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub monitoring: Option<Arc<dyn Monitor>>,
}

impl ResolveOptions {
    pub fn with_monitoring(monitoring: Arc<dyn Monitor>) -> Self {
        Self {
            monitoring: Some(monitoring),
        }
    }
}

/// Audience route sets as supplied by the targeting layer. Absent entries
/// are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionConfig {
    #[serde(default)]
    pub audiences: Vec<Option<RouteCollection>>,
}

impl SelectionConfig {
    pub fn into_collections(self) -> Vec<RouteCollection> {
        self.audiences.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_source_constants() {
        let options = RouterOptions::default();
        assert_eq!(options.high_priority_bonus, 1000);
        assert_eq!(options.load_timer_label, "load-data");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn builder_rejects_blank_label() {
        let err = RouterOptions::builder()
            .load_timer_label("  ")
            .build()
            .unwrap_err();
        assert_eq!(err, RouterOptionsError::EmptyTimerLabel);
    }

    #[test]
    fn deserializes_partial_options() {
        let options: RouterOptions =
            serde_json::from_str(r#"{ "highPriorityBonus": 500 }"#).unwrap();
        assert_eq!(options.high_priority_bonus, 500);
        assert_eq!(options.load_timer_label, DEFAULT_LOAD_TIMER_LABEL);
    }
}
