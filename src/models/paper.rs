//! Paper models: records as fetched from PubMed and their classified form.

use serde::{Deserialize, Serialize};

/// A single author on a PubMed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// Display name ("Fore Last", or the collective name for group authors)
    pub name: String,

    /// Raw affiliation strings exactly as they appear on the record.
    /// PubMed allows several per author; the list may be empty.
    pub affiliations: Vec<String>,
}

impl AuthorRecord {
    /// Create an author with no affiliations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliations: Vec::new(),
        }
    }

    /// Add an affiliation string
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliations.push(affiliation.into());
        self
    }
}

/// A PubMed article as returned by efetch.
///
/// Built once by the fetch stage and read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// PubMed identifier (PMID)
    pub pmid: String,

    /// Article title
    pub title: String,

    /// Publication date as printed on the record ("2023 Mar 15", "2021",
    /// or a MedlineDate range like "2019 Nov-Dec")
    pub publication_date: Option<String>,

    /// Authors in record order
    pub authors: Vec<AuthorRecord>,

    /// First email address found in any affiliation string, if present
    pub corresponding_email: Option<String>,
}

impl PaperRecord {
    /// Create a record with required fields
    pub fn new(pmid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            pmid: pmid.into(),
            title: title.into(),
            publication_date: None,
            authors: Vec::new(),
            corresponding_email: None,
        }
    }
}

/// Builder for constructing [`PaperRecord`] objects
#[derive(Debug, Clone)]
pub struct PaperRecordBuilder {
    paper: PaperRecord,
}

impl PaperRecordBuilder {
    /// Create a new builder with required fields
    pub fn new(pmid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            paper: PaperRecord::new(pmid, title),
        }
    }

    /// Set the publication date
    pub fn publication_date(mut self, date: impl Into<String>) -> Self {
        self.paper.publication_date = Some(date.into());
        self
    }

    /// Append an author
    pub fn author(mut self, author: AuthorRecord) -> Self {
        self.paper.authors.push(author);
        self
    }

    /// Set the corresponding-author email
    pub fn corresponding_email(mut self, email: impl Into<String>) -> Self {
        self.paper.corresponding_email = Some(email.into());
        self
    }

    /// Build the record
    pub fn build(self) -> PaperRecord {
        self.paper
    }
}

/// A paper flagged as industry-affiliated, with the evidence that flagged it.
///
/// Invariant: `company_affiliations` is never empty; papers without one are
/// dropped by the classifier rather than wrapped in this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedPaper {
    /// The underlying record
    pub paper: PaperRecord,

    /// Names of authors whose affiliation matched the industry heuristic,
    /// in record order, de-duplicated
    pub non_academic_authors: Vec<String>,

    /// Raw affiliation strings that matched, in record order, de-duplicated
    pub company_affiliations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_builder() {
        let paper = PaperRecordBuilder::new("12345678", "A Test Trial")
            .publication_date("2023 Mar")
            .author(AuthorRecord::new("Jane Smith").with_affiliation("Acme Pharma Inc, Boston, MA"))
            .corresponding_email("j.smith@acmepharma.com")
            .build();

        assert_eq!(paper.pmid, "12345678");
        assert_eq!(paper.title, "A Test Trial");
        assert_eq!(paper.publication_date.as_deref(), Some("2023 Mar"));
        assert_eq!(paper.authors.len(), 1);
        assert_eq!(paper.authors[0].affiliations.len(), 1);
        assert_eq!(paper.corresponding_email.as_deref(), Some("j.smith@acmepharma.com"));
    }

    #[test]
    fn test_author_without_affiliation() {
        let author = AuthorRecord::new("John Doe");
        assert!(author.affiliations.is_empty());
    }
}
