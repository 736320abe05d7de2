//! Rule-based paper classification.

use crate::config::CategoryRule;
use crate::models::PaperRecord;

/// Assigns each paper a category from an ordered trigger-phrase mapping.
///
/// Rules are evaluated in configuration order and the first category with
/// any trigger occurring as a case-insensitive substring of the paper's
/// searchable text wins — first match, not best match. Papers matching no
/// rule receive the fallback label.
#[derive(Debug, Clone)]
pub struct RuleBasedClassifier {
    rules: Vec<LoweredRule>,
    fallback: String,
}

#[derive(Debug, Clone)]
struct LoweredRule {
    category: String,
    triggers: Vec<String>,
}

impl RuleBasedClassifier {
    /// Build a classifier. Trigger phrases are lowercased once here so
    /// classification itself is allocation-light.
    #[must_use]
    pub fn new(rules: &[CategoryRule], fallback: impl Into<String>) -> Self {
        let rules = rules
            .iter()
            .map(|rule| LoweredRule {
                category: rule.category.clone(),
                triggers: rule.triggers.iter().map(|t| t.to_lowercase()).collect(),
            })
            .collect();
        Self { rules, fallback: fallback.into() }
    }

    /// Classify a paper by its title, abstract, and keywords.
    #[must_use]
    pub fn classify(&self, paper: &PaperRecord) -> &str {
        let text = paper.searchable_text().to_lowercase();
        for rule in &self.rules {
            if rule.triggers.iter().any(|trigger| text.contains(trigger.as_str())) {
                return &rule.category;
            }
        }
        &self.fallback
    }

    /// The label returned when no rule matches.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}
