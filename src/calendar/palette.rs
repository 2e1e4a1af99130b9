//! Job color palette
//!
//! An ordered list of keyword rules. A job name takes the color of the first
//! rule with a keyword contained in it (case-sensitive), or the default color.
//! Rule order is part of the behavior: "Enviar email reporte" is an email job
//! because the email rule comes before the reports rule.

use serde::{Deserialize, Serialize};

use super::types::LegendEntry;

/// Neutral color for jobs no rule matches
pub const DEFAULT_COLOR: &str = "#6B7280";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorRule {
    pub category: String,
    pub label: String,
    pub keywords: Vec<String>,
    pub color: String,
}

impl ColorRule {
    pub fn new(category: &str, label: &str, keywords: &[&str], color: &str) -> Self {
        Self {
            category: category.to_string(),
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            color: color.to_string(),
        }
    }

    pub fn matches(&self, job_name: &str) -> bool {
        self.keywords.iter().any(|k| job_name.contains(k.as_str()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobPalette {
    pub rules: Vec<ColorRule>,
    #[serde(default = "default_color")]
    pub default_color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Default for JobPalette {
    fn default() -> Self {
        Self {
            rules: vec![
                ColorRule::new("twitter", "Twitter", &["tweet", "Twitter"], "#1DA1F2"),
                ColorRule::new("email", "Email", &["email", "Email"], "#EA4335"),
                ColorRule::new("calendar", "Calendar", &["calendario"], "#FBBC04"),
                ColorRule::new("reports", "Reports", &["reporte", "Reporte"], "#34A853"),
                ColorRule::new("instagram", "Instagram", &["Instagram"], "#E4405F"),
                ColorRule::new("meta_ads", "Meta Ads", &["Meta"], "#0668E1"),
                ColorRule::new("linkedin", "LinkedIn", &["LinkedIn"], "#0A66C2"),
                ColorRule::new("analytics", "Analytics", &["Analytics"], "#FF6F00"),
                ColorRule::new("crm", "CRM", &["CRM"], "#7B68EE"),
                ColorRule::new("seo", "SEO", &["SEO"], "#9333EA"),
                ColorRule::new("spiders", "Spiders", &["spider", "araña"], "#F97316"),
                ColorRule::new("reminders", "Reminders", &["Recordatorio"], "#EC4899"),
            ],
            default_color: default_color(),
        }
    }
}

impl JobPalette {
    /// First matching rule in table order
    pub fn rule_for(&self, job_name: &str) -> Option<&ColorRule> {
        self.rules.iter().find(|rule| rule.matches(job_name))
    }

    /// Display color for a job name; total, never fails
    pub fn color_for(&self, job_name: &str) -> &str {
        self.rule_for(job_name)
            .map(|rule| rule.color.as_str())
            .unwrap_or(self.default_color.as_str())
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.rules
            .iter()
            .map(|rule| LegendEntry {
                category: rule.category.clone(),
                label: rule.label.clone(),
                color: rule.color.clone(),
            })
            .collect()
    }

    /// Validate palette loaded from config
    pub fn validate(&self) -> Result<(), String> {
        if self.default_color.trim().is_empty() {
            return Err("Palette default_color must not be empty".to_string());
        }
        for rule in &self.rules {
            if rule.color.trim().is_empty() {
                return Err(format!("Palette rule '{}' has no color", rule.category));
            }
            if rule.keywords.iter().all(|k| k.is_empty()) {
                return Err(format!("Palette rule '{}' has no keywords", rule.category));
            }
        }
        Ok(())
    }
}
