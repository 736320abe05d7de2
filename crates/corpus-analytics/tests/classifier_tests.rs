//! Tests for the rule-based classifier: ordering, matching, fallback.

use corpus_analytics::config::CategoryRule;
use corpus_analytics::{PaperRecord, RuleBasedClassifier};

fn sample_paper(title: &str, abstract_text: &str, keywords: &[&str]) -> PaperRecord {
    PaperRecord {
        title: title.to_string(),
        r#abstract: Some(abstract_text.to_string()),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        ..Default::default()
    }
}

fn vision_then_medical() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new("vision", &["image", "segmentation", "detection"]),
        CategoryRule::new("medical", &["clinical", "patient", "diagnosis"]),
    ]
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_first_category_in_config_order_wins() {
    let classifier = RuleBasedClassifier::new(&vision_then_medical(), "uncategorized");
    let paper = sample_paper("Image analysis for clinical use", "", &[]);
    assert_eq!(classifier.classify(&paper), "vision");

    let mut reversed = vision_then_medical();
    reversed.reverse();
    let classifier = RuleBasedClassifier::new(&reversed, "uncategorized");
    assert_eq!(classifier.classify(&paper), "medical");
}

#[test]
fn test_later_trigger_in_same_rule_still_matches() {
    let classifier = RuleBasedClassifier::new(&vision_then_medical(), "uncategorized");
    let paper = sample_paper("Object detection benchmarks", "", &[]);
    assert_eq!(classifier.classify(&paper), "vision");
}

// =============================================================================
// Matching surface
// =============================================================================

#[test]
fn test_matches_are_case_insensitive() {
    let classifier = RuleBasedClassifier::new(&vision_then_medical(), "uncategorized");
    let paper = sample_paper("SEGMENTATION AT SCALE", "", &[]);
    assert_eq!(classifier.classify(&paper), "vision");
}

#[test]
fn test_abstract_and_keywords_are_searched() {
    let classifier = RuleBasedClassifier::new(&vision_then_medical(), "uncategorized");

    let by_abstract = sample_paper("A study", "We evaluate patient cohorts.", &[]);
    assert_eq!(classifier.classify(&by_abstract), "medical");

    let by_keyword = sample_paper("A study", "", &["diagnosis"]);
    assert_eq!(classifier.classify(&by_keyword), "medical");
}

#[test]
fn test_substring_matching_is_literal() {
    let classifier = RuleBasedClassifier::new(
        &[CategoryRule::new("nlp", &["language model"])],
        "uncategorized",
    );
    // The phrase must occur contiguously.
    let split = sample_paper("Language and the model of mind", "", &[]);
    assert_eq!(classifier.classify(&split), "uncategorized");

    let contiguous = sample_paper("A large language model survey", "", &[]);
    assert_eq!(classifier.classify(&contiguous), "nlp");
}

// =============================================================================
// Fallback
// =============================================================================

#[test]
fn test_fallback_label_is_configurable() {
    let classifier = RuleBasedClassifier::new(&vision_then_medical(), "other");
    let paper = sample_paper("Lattice QCD at finite temperature", "", &[]);
    assert_eq!(classifier.classify(&paper), "other");
    assert_eq!(classifier.fallback(), "other");
}

#[test]
fn test_classifier_is_deterministic() {
    let classifier = RuleBasedClassifier::new(&vision_then_medical(), "uncategorized");
    let paper = sample_paper("Image segmentation for patient diagnosis", "", &[]);
    let first = classifier.classify(&paper).to_string();
    for _ in 0..10 {
        assert_eq!(classifier.classify(&paper), first);
    }
}
