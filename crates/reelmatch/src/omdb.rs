//! OMDb movie database client.
//!
//! Two requests are used: keyword search (`s=`) for the dropdown and lookup
//! by IMDb id (`i=`) for the summary. OMDb reports failures in-band as
//! `{"Response":"False","Error":"..."}` with HTTP 200.

use crate::config::ReelmatchConfig;
use futures::future::FutureExt;
use reelmatch_core::{FetchError, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// OMDb error strings that mean "nothing to show" rather than a failure.
const NO_MATCH_ERRORS: [&str; 2] = ["Movie not found!", "Too many results."];

/// Search result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Display title
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year (may be a range for series)
    #[serde(rename = "Year", default)]
    pub year: String,
    /// IMDb identifier
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// `movie`, `series` or `episode`
    #[serde(rename = "Type", default)]
    pub kind: String,
    /// Poster URL or `N/A`
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

/// Full movie record.
///
/// Missing fields decode as empty strings; the stat parsers treat those as
/// having no value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieDetail {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Plot")]
    pub plot: String,
    /// Currency formatted, e.g. `$858,373,000`
    #[serde(rename = "BoxOffice")]
    pub box_office: String,
    #[serde(rename = "Metascore")]
    pub metascore: String,
    /// Decimal string, e.g. `8.4`
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    /// Comma formatted, e.g. `1,234,567`
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    /// Free text, e.g. `Won 3 Oscars. 45 wins & 147 nominations total`
    #[serde(rename = "Awards")]
    pub awards: String,
}

#[derive(Deserialize)]
struct SearchPage {
    #[serde(rename = "Search", default)]
    search: Vec<MovieSummary>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct DetailPage {
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(flatten)]
    detail: MovieDetail,
}

fn decode_error(err: &serde_json::Error) -> FetchError {
    FetchError::Decode(err.to_string())
}

/// Decode a search response body.
///
/// "Movie not found!" and "Too many results." yield an empty list; any other
/// OMDb error is an [`FetchError::Upstream`].
pub fn parse_search(body: &str) -> Result<Vec<MovieSummary>, FetchError> {
    let page: SearchPage = serde_json::from_str(body).map_err(|e| decode_error(&e))?;
    match page.error {
        Some(msg) if NO_MATCH_ERRORS.contains(&msg.as_str()) => Ok(Vec::new()),
        Some(msg) => Err(FetchError::Upstream(msg)),
        None => Ok(page.search),
    }
}

/// Decode a detail response body.
pub fn parse_detail(body: &str) -> Result<MovieDetail, FetchError> {
    let page: DetailPage = serde_json::from_str(body).map_err(|e| decode_error(&e))?;
    match page.error {
        Some(msg) => Err(FetchError::Upstream(msg)),
        None => Ok(page.detail),
    }
}

/// Movie lookups needed by the comparison app.
pub trait MovieApi {
    /// Keyword search.
    fn search(&self, term: &str) -> LocalBoxFuture<'static, Result<Vec<MovieSummary>, FetchError>>;

    /// Full record by IMDb id.
    fn detail(&self, imdb_id: &str) -> LocalBoxFuture<'static, Result<MovieDetail, FetchError>>;
}

impl<A: MovieApi + ?Sized> MovieApi for Rc<A> {
    fn search(&self, term: &str) -> LocalBoxFuture<'static, Result<Vec<MovieSummary>, FetchError>> {
        (**self).search(term)
    }

    fn detail(&self, imdb_id: &str) -> LocalBoxFuture<'static, Result<MovieDetail, FetchError>> {
        (**self).detail(imdb_id)
    }
}

/// HTTP client for OMDb.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    base: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a client for the configured endpoint and key.
    #[must_use]
    pub fn new(config: &ReelmatchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Search by keyword. A blank term returns no results without a request.
    pub async fn search_movies(&self, term: &str) -> Result<Vec<MovieSummary>, FetchError> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        let body = self.get("s", term).await?;
        parse_search(&body)
    }

    /// Look up a movie by IMDb id.
    pub async fn movie_detail(&self, imdb_id: &str) -> Result<MovieDetail, FetchError> {
        let body = self.get("i", imdb_id).await?;
        parse_detail(&body)
    }

    async fn get(&self, param: &str, value: &str) -> Result<String, FetchError> {
        tracing::debug!(param, value, "omdb request");
        let response = self
            .http
            .get(&self.base)
            .query(&[("apikey", self.api_key.as_str()), (param, value)])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Upstream(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

impl MovieApi for OmdbClient {
    fn search(&self, term: &str) -> LocalBoxFuture<'static, Result<Vec<MovieSummary>, FetchError>> {
        let client = self.clone();
        let term = term.to_string();
        async move { client.search_movies(&term).await }.boxed_local()
    }

    fn detail(&self, imdb_id: &str) -> LocalBoxFuture<'static, Result<MovieDetail, FetchError>> {
        let client = self.clone();
        let imdb_id = imdb_id.to_string();
        async move { client.movie_detail(&imdb_id).await }.boxed_local()
    }
}
