//! Affiliation heuristics separating industry authors from academic ones.
//!
//! The classifier is a pure function over a [`PaperRecord`]: no I/O, no hidden
//! state, identical output for identical input. The marker lists it matches
//! against come from [`ClassifierConfig`](crate::config::ClassifierConfig).

use crate::config::ClassifierConfig;
use crate::models::{ClassifiedPaper, PaperRecord};

/// Marker-list classifier over author affiliation strings
#[derive(Debug, Clone)]
pub struct Classifier {
    industry_markers: Vec<String>,
    academic_markers: Vec<String>,
}

impl Classifier {
    /// Create a classifier from configured marker lists
    pub fn new(config: &ClassifierConfig) -> Self {
        // Lowercase once up front; matching lowercases the affiliation text
        Self {
            industry_markers: config
                .industry_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
            academic_markers: config
                .academic_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
        }
    }

    /// True when the affiliation text reads as a commercial organisation.
    ///
    /// An affiliation is industry if it contains an industry marker, or if it
    /// contains none of the academic markers. Blank text never matches, so
    /// authors with no affiliation data are never flagged.
    pub fn is_industry_affiliation(&self, affiliation: &str) -> bool {
        let text = affiliation.trim().to_lowercase();
        if text.is_empty() {
            return false;
        }
        if self
            .industry_markers
            .iter()
            .any(|marker| text.contains(marker.as_str()))
        {
            return true;
        }
        !self
            .academic_markers
            .iter()
            .any(|marker| text.contains(marker.as_str()))
    }

    /// Classify one paper.
    ///
    /// Returns `None` when no author has a company affiliation; such papers
    /// are dropped from the output entirely. Author names and affiliation
    /// strings are accumulated in record order, de-duplicated.
    pub fn classify(&self, paper: &PaperRecord) -> Option<ClassifiedPaper> {
        let mut non_academic_authors: Vec<String> = Vec::new();
        let mut company_affiliations: Vec<String> = Vec::new();

        for author in &paper.authors {
            let mut flagged = false;
            for affiliation in &author.affiliations {
                if self.is_industry_affiliation(affiliation) {
                    flagged = true;
                    if !company_affiliations.contains(affiliation) {
                        company_affiliations.push(affiliation.clone());
                    }
                }
            }
            if flagged && !non_academic_authors.contains(&author.name) {
                non_academic_authors.push(author.name.clone());
            }
        }

        if company_affiliations.is_empty() {
            return None;
        }

        Some(ClassifiedPaper {
            paper: paper.clone(),
            non_academic_authors,
            company_affiliations,
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}
