//! Data Client for the Star Wars API people endpoint
//!
//! One GET per call, no retries. Every outcome is folded into a
//! [`SearchResult`] so callers never see a raw transport error.

use crate::error::{FetchError, HolocronError};
use crate::model::{Character, SearchPage, SearchResult};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Base URL for all API requests
pub const SWAPI_BASE: &str = "https://swapi.dev/api/";

/// Anything that can answer a character search.
///
/// The orchestrator calls this from worker threads, so implementations must
/// be shareable across threads.
pub trait CharacterSource: Send + Sync + 'static {
    /// Search by free text. An empty query asks for the unfiltered first page.
    fn fetch_characters(&self, query: &str) -> SearchResult;
}

/// Blocking client for `GET <base>/people/?search=<query>`
pub struct SwapiClient {
    http: Client,
    base_url: String,
}

impl SwapiClient {
    pub fn new() -> crate::Result<Self> {
        Self::with_base_url(SWAPI_BASE)
    }

    /// Point the client at another API root
    pub fn with_base_url(base_url: &str) -> crate::Result<Self> {
        let http = Client::builder()
            .user_agent(format!("holocron/{}", crate::VERSION))
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| HolocronError::HttpClientError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// Build the people URL, adding `search` only for a non-blank query
    pub fn people_url(&self, query: &str) -> Result<Url, FetchError> {
        let base = Url::parse(&self.base_url).map_err(|e| FetchError::Transport(e.to_string()))?;
        let mut url = base
            .join("people/")
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let query = query.trim();
        if !query.is_empty() {
            url.query_pairs_mut().append_pair("search", query);
        }
        Ok(url)
    }
}

impl CharacterSource for SwapiClient {
    fn fetch_characters(&self, query: &str) -> SearchResult {
        let url = self.people_url(query)?;
        debug!(%url, "requesting people");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes()?;
        parse_people_page(&body)
    }
}

/// Map a people response body onto a [`SearchPage`].
///
/// `results` must be an array; elements that are not objects are skipped.
/// `next` being present and non-null means more pages exist. A numeric
/// `count` is the total across pages; without one the item count is used.
pub fn parse_people_page(body: &[u8]) -> SearchResult {
    let json: Value = serde_json::from_slice(body).map_err(|_| FetchError::MalformedResponse)?;

    let results = json
        .get("results")
        .and_then(Value::as_array)
        .ok_or(FetchError::MalformedResponse)?;

    let skipped = results.iter().filter(|r| !r.is_object()).count();
    if skipped > 0 {
        debug!(skipped, "ignoring non-object people records");
    }

    let items = results
        .iter()
        .filter(|r| r.is_object())
        .cloned()
        .map(serde_json::from_value::<Character>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| FetchError::MalformedResponse)?;

    let has_next = json.get("next").is_some_and(|next| !next.is_null());
    let count = json
        .get("count")
        .and_then(Value::as_u64)
        .map(|c| c as usize);

    Ok(SearchPage::new(items, has_next, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answer exactly one request with a canned response; returns the base URL
    /// and a handle yielding the raw request text.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });

        (format!("http://{}/api/", addr), handle)
    }

    /// Client for a loopback server, ignoring any proxy in the environment
    fn local_client(base_url: &str) -> SwapiClient {
        SwapiClient {
            http: Client::builder().no_proxy().build().unwrap(),
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn parses_single_result_page() {
        let body = br#"{"count":1,"next":null,"previous":null,"results":[{"name":"Luke Skywalker","birth_year":"19BBY","gender":"male"}]}"#;
        let page = parse_people_page(body).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Luke Skywalker");
        assert!(!page.has_next);
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn next_link_sets_has_next() {
        let body = br#"{"count":82,"next":"https://swapi.dev/api/people/?page=2","results":[{"name":"Luke Skywalker"}]}"#;
        let page = parse_people_page(body).unwrap();
        assert!(page.has_next);
        assert_eq!(page.total_count, 82);
    }

    #[test]
    fn missing_count_falls_back_to_item_count() {
        let body = br#"{"results":[{"name":"Leia Organa"},{"name":"Han Solo"}]}"#;
        let page = parse_people_page(body).unwrap();
        assert_eq!(page.total_count, 2);
        assert!(!page.has_next);
    }

    #[test]
    fn null_fields_do_not_reject_the_page() {
        let body = br#"{"count":1,"next":null,"results":[{"name":"Luke Skywalker","birth_year":null,"gender":"male"}]}"#;
        let page = parse_people_page(body).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Luke Skywalker");
        assert_eq!(page.items[0].birth_year, "");
        assert_eq!(page.items[0].gender, "male");
    }

    #[test]
    fn non_object_records_are_skipped() {
        let page = parse_people_page(br#"{"results":[{"name":"Luke"},42,null,"x"]}"#).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Luke");
        assert_eq!(page.total_count, 1);

        let page = parse_people_page(br#"{"count":0,"results":[]}"#).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn missing_or_invalid_results_is_malformed() {
        assert_eq!(parse_people_page(br#"{"count":0}"#), Err(FetchError::MalformedResponse));
        assert_eq!(
            parse_people_page(br#"{"results":"nope"}"#),
            Err(FetchError::MalformedResponse)
        );
        assert_eq!(parse_people_page(b"<html>"), Err(FetchError::MalformedResponse));
    }

    #[test]
    fn people_url_only_adds_search_for_non_blank_query() {
        let client = SwapiClient::new().unwrap();
        assert_eq!(
            client.people_url("").unwrap().as_str(),
            "https://swapi.dev/api/people/"
        );
        assert_eq!(
            client.people_url("  luke ").unwrap().as_str(),
            "https://swapi.dev/api/people/?search=luke"
        );
    }

    #[test]
    fn bad_base_url_is_a_transport_error() {
        let client = SwapiClient::with_base_url("not a url").unwrap();
        assert!(matches!(
            client.fetch_characters("luke"),
            Err(FetchError::Transport(_))
        ));
    }

    #[test]
    fn fetch_success_against_local_server() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"count":1,"next":null,"results":[{"name":"Luke Skywalker","birth_year":"19BBY","gender":"male"}]}"#,
        );
        let client = local_client(&base);

        let page = client.fetch_characters("luke").unwrap();
        assert_eq!(page.items[0].gender, "male");

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /api/people/?search=luke "));
        assert!(request.to_lowercase().contains("accept: application/json"));
    }

    #[test]
    fn fetch_http_error_reports_status() {
        let (base, server) = serve_once("500 Internal Server Error", "Server error");
        let client = local_client(&base);

        let err = client.fetch_characters("x").unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpStatus {
                status: 500,
                reason: "Internal Server Error".to_string()
            }
        );
        assert!(err.to_string().contains("500"));
        server.join().unwrap();
    }

    #[test]
    fn fetch_connection_refused_is_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = local_client(&format!("http://127.0.0.1:{}/api/", port));

        match client.fetch_characters("luke") {
            Err(FetchError::Transport(message)) => assert!(!message.is_empty()),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
