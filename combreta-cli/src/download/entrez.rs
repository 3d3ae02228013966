//! NCBI E-utilities client for the nucleotide database

use combreta_core::config::EntrezConfig;
use combreta_core::{CombretaError, CombretaResult};
use serde::Deserialize;
use std::time::Duration;

const DATABASE: &str = "nucleotide";

/// Result of one search: the returned ids and the total hit count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHits {
    pub ids: Vec<String>,
    pub count: usize,
}

impl SearchHits {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Source of nucleotide records
pub trait NucleotideDatabase {
    /// Ids of records matching `term`, at most `retmax`
    fn search(&self, term: &str, retmax: usize) -> CombretaResult<SearchHits>;

    /// FASTA text of the given records
    fn fetch_fasta(&self, ids: &[String]) -> CombretaResult<String>;
}

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: ESearchResult,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    count: String,
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

fn parse_esearch(body: &str) -> CombretaResult<SearchHits> {
    let response: ESearchResponse = serde_json::from_str(body)?;
    let result = response.esearchresult;

    if let Some(message) = result.error {
        return Err(CombretaError::Network(format!("esearch error: {}", message)));
    }

    let count = if result.count.is_empty() {
        result.idlist.len()
    } else {
        result.count.parse().map_err(|_| {
            CombretaError::Parse(format!("esearch returned a non-numeric count: {}", result.count))
        })?
    };

    Ok(SearchHits {
        ids: result.idlist,
        count,
    })
}

/// Blocking Entrez client
pub struct EntrezClient {
    client: reqwest::blocking::Client,
    base_url: String,
    email: String,
    tool: String,
    api_key: Option<String>,
}

impl EntrezClient {
    /// NCBI requires a contact e-mail on every request
    pub fn new(config: &EntrezConfig) -> CombretaResult<Self> {
        let email = config
            .email
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                CombretaError::Configuration(
                    "a contact e-mail is required for NCBI requests (use --email, NCBI_EMAIL or \
                     entrez.email)"
                        .to_string(),
                )
            })?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("Combreta/{}", combreta_core::VERSION))
            .build()
            .map_err(|e| CombretaError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            email,
            tool: config.tool.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn get(&self, endpoint: &str, mut params: Vec<(&str, String)>) -> CombretaResult<String> {
        params.push(("email", self.email.clone()));
        params.push(("tool", self.tool.clone()));
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .map_err(|e| CombretaError::Network(format!("{} request failed: {}", endpoint, e)))?;

        if !response.status().is_success() {
            return Err(CombretaError::Network(format!(
                "{} returned status: {}",
                endpoint,
                response.status()
            )));
        }

        response
            .text()
            .map_err(|e| CombretaError::Network(format!("Failed to read {} response: {}", endpoint, e)))
    }
}

impl NucleotideDatabase for EntrezClient {
    fn search(&self, term: &str, retmax: usize) -> CombretaResult<SearchHits> {
        tracing::debug!("esearch: {}", term);
        let body = self.get(
            "esearch.fcgi",
            vec![
                ("db", DATABASE.to_string()),
                ("term", term.to_string()),
                ("retmax", retmax.to_string()),
                ("retmode", "json".to_string()),
            ],
        )?;
        parse_esearch(&body)
    }

    fn fetch_fasta(&self, ids: &[String]) -> CombretaResult<String> {
        if ids.is_empty() {
            return Ok(String::new());
        }
        tracing::debug!("efetch: {} ids", ids.len());
        self.get(
            "efetch.fcgi",
            vec![
                ("db", DATABASE.to_string()),
                ("id", ids.join(",")),
                ("rettype", "fasta".to_string()),
                ("retmode", "text".to_string()),
            ],
        )
    }
}
