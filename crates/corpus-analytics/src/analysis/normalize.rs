//! Text normalization: lowercase, segment, reduce to base forms, filter.

use std::collections::{HashMap, HashSet};

use unicode_segmentation::UnicodeSegmentation;

use crate::config::NormalizerConfig;

/// Normalizes free text into a token sequence for downstream analysis.
///
/// Deterministic for a fixed [`NormalizerConfig`]; holds no mutable state.
/// Mixed-language input is supported by the stopword sets injected at
/// construction: segmentation follows UAX-29 word boundaries, so scripts
/// without whitespace-delimited words (Han ideographs in particular) pass
/// through as per-character tokens and are only filtered where the stopword
/// set covers them.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: HashSet<String>,
    lemma_overrides: HashMap<String, String>,
}

impl TextNormalizer {
    /// Build a normalizer from injected resources.
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self { stopwords: config.stopwords, lemma_overrides: config.lemma_overrides }
    }

    /// Normalize text into tokens: lowercase, segment, reduce each token to
    /// a base form, then drop stopwords and tokens with no alphanumeric
    /// character.
    #[must_use]
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        lowered
            .unicode_words()
            .map(|token| self.base_form(token))
            .filter(|token| {
                !token.is_empty()
                    && token.chars().any(char::is_alphanumeric)
                    && !self.stopwords.contains(token.as_str())
            })
            .collect()
    }

    /// Reduce a token to its base form: exact overrides first, then English
    /// noun-inflection rules. Tokens the rules don't recognize pass through
    /// unchanged.
    fn base_form(&self, token: &str) -> String {
        if let Some(lemma) = self.lemma_overrides.get(token) {
            return lemma.clone();
        }

        if let Some(stem) = token.strip_suffix("ies") {
            if stem.len() > 1 {
                return format!("{stem}y");
            }
        }

        for suffix in ["ches", "shes", "sses", "xes", "zes"] {
            if let Some(stem) = token.strip_suffix(suffix) {
                // Keep everything up to and including the sibilant.
                return format!("{stem}{}", &suffix[..suffix.len() - 2]);
            }
        }

        if token.len() > 3
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("is")
        {
            if let Some(stem) = token.strip_suffix('s') {
                return stem.to_string();
            }
        }

        token.to_string()
    }
}
