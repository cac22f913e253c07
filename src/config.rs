//! Scoring configuration.
//! Every field falls back to the stock weights, so a TOML file only needs to
//! name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LeadError, Result};

/// Hard ceiling for `probability_score`.
pub const SCORE_CEILING: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_max_score")]
    pub max_score: u32,
    #[serde(default = "default_biotech_hubs")]
    pub biotech_hubs: Vec<String>,
    #[serde(default)]
    pub role_fit: RoleFitRule,
    #[serde(default)]
    pub company_intent: CompanyIntentRule,
    #[serde(default = "default_technographic")]
    pub technographic: FlagRule,
    #[serde(default = "default_location_hub")]
    pub location_hub: FlagRule,
    #[serde(default)]
    pub scientific_intent: ScientificIntentRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFitRule {
    #[serde(default = "default_seniority_keywords")]
    pub seniority_keywords: Vec<String>,
    #[serde(default = "default_focus_keywords")]
    pub focus_keywords: Vec<String>,
    #[serde(default = "default_role_fit_points")]
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyIntentRule {
    /// Matched exactly, case included.
    #[serde(default = "default_funding_stages")]
    pub funding_stages: Vec<String>,
    #[serde(default = "default_company_intent_points")]
    pub points: u32,
}

/// A signal that fires on a single "Yes" flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRule {
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScientificIntentRule {
    #[serde(default = "default_topic_keywords")]
    pub topic_keywords: Vec<String>,
    #[serde(default = "default_scientific_intent_points")]
    pub points: u32,
}

fn default_max_score() -> u32 {
    SCORE_CEILING
}

fn default_biotech_hubs() -> Vec<String> {
    strings(&["Boston", "Cambridge MA", "Bay Area", "Basel", "UK Golden Triangle"])
}

fn default_seniority_keywords() -> Vec<String> {
    strings(&["director", "vp", "head"])
}

fn default_focus_keywords() -> Vec<String> {
    strings(&["toxicology", "safety", "hepatic", "3d"])
}

fn default_role_fit_points() -> u32 {
    30
}

fn default_funding_stages() -> Vec<String> {
    strings(&["Series A", "Series B"])
}

fn default_company_intent_points() -> u32 {
    20
}

fn default_technographic() -> FlagRule {
    FlagRule { points: 15 }
}

fn default_location_hub() -> FlagRule {
    FlagRule { points: 10 }
}

fn default_topic_keywords() -> Vec<String> {
    strings(&["liver", "dili", "hepatic"])
}

fn default_scientific_intent_points() -> u32 {
    40
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_score: default_max_score(),
            biotech_hubs: default_biotech_hubs(),
            role_fit: RoleFitRule::default(),
            company_intent: CompanyIntentRule::default(),
            technographic: default_technographic(),
            location_hub: default_location_hub(),
            scientific_intent: ScientificIntentRule::default(),
        }
    }
}

impl Default for RoleFitRule {
    fn default() -> Self {
        Self {
            seniority_keywords: default_seniority_keywords(),
            focus_keywords: default_focus_keywords(),
            points: default_role_fit_points(),
        }
    }
}

impl Default for CompanyIntentRule {
    fn default() -> Self {
        Self {
            funding_stages: default_funding_stages(),
            points: default_company_intent_points(),
        }
    }
}

impl Default for ScientificIntentRule {
    fn default() -> Self {
        Self {
            topic_keywords: default_topic_keywords(),
            points: default_scientific_intent_points(),
        }
    }
}

impl ScoringConfig {
    /// Read a TOML config from disk and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScoringConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_score == 0 || self.max_score > SCORE_CEILING {
            return Err(LeadError::InvalidConfig(format!(
                "max_score must be between 1 and {SCORE_CEILING}, got {}",
                self.max_score
            )));
        }
        if self.role_fit.seniority_keywords.is_empty()
            || self.role_fit.focus_keywords.is_empty()
        {
            return Err(LeadError::InvalidConfig(
                "role_fit needs at least one seniority and one focus keyword".to_string(),
            ));
        }
        Ok(())
    }

    /// Upper bound of the summed contributions before clamping, saturating
    /// at `u32::MAX`.
    pub fn max_raw_total(&self) -> u32 {
        [
            self.role_fit.points,
            self.company_intent.points,
            self.technographic.points,
            self.location_hub.points,
            self.scientific_intent.points,
        ]
        .into_iter()
        .fold(0, u32::saturating_add)
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
