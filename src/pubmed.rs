//! PubMed client using the NCBI E-utilities API.
//!
//! Two endpoints are involved: `esearch.fcgi` turns a query string into an
//! ordered list of PMIDs, and `efetch.fcgi` turns a batch of PMIDs into full
//! article records. Both calls are made exactly once per run, with no retry.

use quick_xml::de::from_str;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::Error;
use crate::models::{AuthorRecord, PaperRecord, PaperRecordBuilder, SearchQuery};
use crate::utils::HttpClient;

/// PubMed E-utilities API base URLs
const PUBMED_ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const PUBMED_EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// PubMed client
///
/// Holds the shared HTTP client and the endpoint URLs. An NCBI API key is
/// picked up from the `NCBI_API_KEY` environment variable when set; NCBI
/// grants higher rate limits to keyed requests.
#[derive(Debug, Clone)]
pub struct PubMedClient {
    client: HttpClient,
    esearch_url: String,
    efetch_url: String,
    api_key: Option<String>,
}

impl PubMedClient {
    /// Create a new client around an HTTP client
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            esearch_url: PUBMED_ESEARCH_URL.to_string(),
            efetch_url: PUBMED_EFETCH_URL.to_string(),
            api_key: std::env::var("NCBI_API_KEY").ok(),
        }
    }

    /// Point the client at different endpoints (for testing against a mock server)
    pub fn with_base_urls(
        mut self,
        esearch_url: impl Into<String>,
        efetch_url: impl Into<String>,
    ) -> Self {
        self.esearch_url = esearch_url.into();
        self.efetch_url = efetch_url.into();
        self
    }

    /// Build the esearch URL for a query
    fn build_search_url(&self, query: &SearchQuery) -> String {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("term", query.query.clone()),
            ("retmax", query.max_results.to_string()),
            ("retmode", "xml".to_string()),
        ];

        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.esearch_url, query_string)
    }

    /// Build the efetch URL for a batch of PMIDs
    fn build_fetch_url(&self, ids: &[String]) -> String {
        let mut url = format!(
            "{}?db=pubmed&id={}&retmode=xml",
            self.efetch_url,
            ids.join(",")
        );
        if let Some(key) = &self.api_key {
            url.push_str("&api_key=");
            url.push_str(key);
        }
        url
    }

    async fn get_text(&self, url: &str, what: &str) -> Result<String, Error> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to {}: {}", what, e)))?;

        if !response.status().is_success() {
            return Err(Error::Api(format!(
                "PubMed API returned status {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))
    }

    /// Search PubMed, returning the ordered PMIDs (at most `max_results`)
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<String>, Error> {
        tracing::info!(query = %query.query, max_results = query.max_results, "Searching PubMed");

        let url = self.build_search_url(query);
        let xml = self.get_text(&url, "search PubMed").await?;
        let ids = parse_search_response(&xml)?;

        tracing::debug!(count = ids.len(), "esearch returned ids");
        Ok(ids)
    }

    /// Fetch full article records in one batched efetch call.
    ///
    /// A failing call aborts the run; an individual article without a PMID
    /// inside an otherwise valid response is skipped with a debug log.
    pub async fn fetch(&self, ids: &[String]) -> Result<Vec<PaperRecord>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_fetch_url(ids);
        let xml = self.get_text(&url, "fetch PubMed details").await?;
        parse_fetch_response(&xml)
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
    })
}

/// Parse the esearch response XML into a list of PMIDs
fn parse_search_response(xml: &str) -> Result<Vec<String>, Error> {
    #[derive(Debug, Deserialize)]
    struct ESearchResult {
        #[serde(rename = "IdList", default)]
        id_list: IdList,
    }

    #[derive(Debug, Default, Deserialize)]
    struct IdList {
        #[serde(rename = "Id", default)]
        ids: Vec<String>,
    }

    let result: ESearchResult = from_str(xml)
        .map_err(|e| Error::Parse(format!("Failed to parse PubMed search XML: {}", e)))?;

    Ok(result.id_list.ids)
}

/// Parse the efetch response XML into paper records
fn parse_fetch_response(xml: &str) -> Result<Vec<PaperRecord>, Error> {
    // Elements like ArticleTitle can carry inline markup, so text content is
    // captured through a `$text` wrapper rather than a plain String field.
    #[derive(Debug, Deserialize)]
    struct TextValue {
        #[serde(rename = "$text", default)]
        value: String,
    }

    #[derive(Debug, Deserialize)]
    struct PubmedArticleSet {
        #[serde(rename = "PubmedArticle", default)]
        articles: Vec<PubmedArticle>,
    }

    #[derive(Debug, Deserialize)]
    struct PubmedArticle {
        #[serde(rename = "MedlineCitation")]
        medline_citation: Option<MedlineCitation>,
    }

    #[derive(Debug, Deserialize)]
    struct MedlineCitation {
        #[serde(rename = "PMID")]
        pmid: Option<TextValue>,
        #[serde(rename = "Article")]
        article: Option<Article>,
    }

    #[derive(Debug, Deserialize)]
    struct Article {
        #[serde(rename = "Journal")]
        journal: Option<Journal>,
        #[serde(rename = "ArticleTitle")]
        article_title: Option<TextValue>,
        #[serde(rename = "AuthorList")]
        author_list: Option<AuthorList>,
    }

    #[derive(Debug, Deserialize)]
    struct Journal {
        #[serde(rename = "JournalIssue")]
        journal_issue: Option<JournalIssue>,
    }

    #[derive(Debug, Deserialize)]
    struct JournalIssue {
        #[serde(rename = "PubDate")]
        pub_date: Option<PubDate>,
    }

    #[derive(Debug, Deserialize)]
    struct PubDate {
        #[serde(rename = "Year")]
        year: Option<String>,
        #[serde(rename = "Month")]
        month: Option<String>,
        #[serde(rename = "Day")]
        day: Option<String>,
        #[serde(rename = "MedlineDate")]
        medline_date: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct AuthorList {
        #[serde(rename = "Author", default)]
        authors: Vec<Author>,
    }

    #[derive(Debug, Deserialize)]
    struct Author {
        #[serde(rename = "LastName")]
        last_name: Option<TextValue>,
        #[serde(rename = "ForeName")]
        fore_name: Option<TextValue>,
        #[serde(rename = "CollectiveName")]
        collective_name: Option<TextValue>,
        #[serde(rename = "AffiliationInfo", default)]
        affiliation_info: Vec<AffiliationInfo>,
    }

    #[derive(Debug, Deserialize)]
    struct AffiliationInfo {
        #[serde(rename = "Affiliation")]
        affiliation: Option<TextValue>,
    }

    fn format_pub_date(pub_date: &PubDate) -> Option<String> {
        if let Some(year) = &pub_date.year {
            let mut date = year.clone();
            if let Some(month) = &pub_date.month {
                date.push(' ');
                date.push_str(month);
                if let Some(day) = &pub_date.day {
                    date.push(' ');
                    date.push_str(day);
                }
            }
            return Some(date);
        }
        pub_date.medline_date.clone()
    }

    fn author_name(author: &Author) -> String {
        if let Some(collective) = &author.collective_name {
            return collective.value.trim().to_string();
        }
        let fore = author
            .fore_name
            .as_ref()
            .map(|f| f.value.as_str())
            .unwrap_or("");
        let last = author
            .last_name
            .as_ref()
            .map(|l| l.value.as_str())
            .unwrap_or("");
        let name = format!("{} {}", fore, last).trim().to_string();
        if name.is_empty() {
            "Unknown".to_string()
        } else {
            name
        }
    }

    let result: PubmedArticleSet = from_str(xml)
        .map_err(|e| Error::Parse(format!("Failed to parse PubMed fetch XML: {}", e)))?;

    let mut papers = Vec::new();

    for article in result.articles {
        let Some(citation) = article.medline_citation else {
            tracing::debug!("Skipping article without MedlineCitation");
            continue;
        };
        let Some(pmid) = citation.pmid.map(|p| p.value) else {
            tracing::debug!("Skipping article without PMID");
            continue;
        };

        let title = citation
            .article
            .as_ref()
            .and_then(|a| a.article_title.as_ref())
            .map(|t| t.value.trim().to_string())
            .unwrap_or_default();

        let publication_date = citation
            .article
            .as_ref()
            .and_then(|a| a.journal.as_ref())
            .and_then(|j| j.journal_issue.as_ref())
            .and_then(|ji| ji.pub_date.as_ref())
            .and_then(format_pub_date);

        let mut builder = PaperRecordBuilder::new(pmid, title);
        if let Some(date) = publication_date {
            builder = builder.publication_date(date);
        }

        let mut corresponding_email: Option<String> = None;

        if let Some(author_list) = citation.article.as_ref().and_then(|a| a.author_list.as_ref()) {
            for author in &author_list.authors {
                let mut record = AuthorRecord::new(author_name(author));
                for info in &author.affiliation_info {
                    let Some(affiliation) = &info.affiliation else {
                        continue;
                    };
                    let text = affiliation.value.trim();
                    if text.is_empty() {
                        continue;
                    }
                    if corresponding_email.is_none() {
                        if let Some(m) = email_regex().find(text) {
                            corresponding_email =
                                Some(m.as_str().trim_end_matches('.').to_string());
                        }
                    }
                    record = record.with_affiliation(text);
                }
                builder = builder.author(record);
            }
        }

        if let Some(email) = corresponding_email {
            builder = builder.corresponding_email(email);
        }

        papers.push(builder.build());
    }

    Ok(papers)
}
