//! Paper record model consumed by the analysis pipeline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single academic-paper record.
///
/// Records are materialized by the acquisition layer before analysis; the
/// engine treats them as an immutable snapshot for the duration of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Identifier assigned by the source the record came from.
    #[serde(default)]
    pub source_id: String,

    /// Paper title. Doubles as the paper's identity in the citation graph.
    #[serde(default)]
    pub title: String,

    /// Author names in byline order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Paper abstract.
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Publication date.
    #[serde(default)]
    pub published: Option<NaiveDate>,

    /// Category label, assigned lazily by classification when absent.
    #[serde(default)]
    pub category: Option<String>,

    /// Keywords supplied by the source.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Works this paper cites.
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl PaperRecord {
    /// True when the record carries a non-empty title.
    #[must_use]
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Publication year, if the record is dated.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.published.map(|d| d.year())
    }

    /// The text searched by classification and fed to topic modeling:
    /// title, abstract, and keywords concatenated.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        let mut text = self.title.clone();
        if let Some(abs) = &self.r#abstract {
            text.push(' ');
            text.push_str(abs);
        }
        for keyword in &self.keywords {
            text.push(' ');
            text.push_str(keyword);
        }
        text
    }

    /// Author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.join(", ")
    }
}

/// A reference entry in a paper's bibliography.
///
/// Citation linking is by literal reference title; the optional external
/// identifier is carried through for callers but not used for matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reference {
    /// Title of the cited work.
    #[serde(default)]
    pub title: Option<String>,

    /// External identifier (DOI, arXiv id, ...), when the source provides
    /// one.
    #[serde(default)]
    pub external_id: Option<String>,
}

impl Reference {
    /// Create a reference from a title only.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), external_id: None }
    }
}
