//! HTTP client for the Trello API.
//!
//! Every outbound call funnels through [`TrelloClient::execute`], which owns
//! credential injection, the GET response cache, client-side pacing, the
//! single 429 retry, and error classification. Callers hand it a method,
//! path, and optional query/body and get back decoded JSON or a classified
//! [`Error`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::types::AttachmentPayload;
use crate::Error;

const BASE_URL: &str = "https://api.trello.com/1";

/// Freshness window for cached GET responses.
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Entries older than this are dropped whenever the cache is written.
const CACHE_SWEEP_AGE: Duration = Duration::from_secs(300);

/// Client-side throttle applied before every transport call.
const PACING_DELAY: Duration = Duration::from_millis(500);

/// Wait before the 429 retry when the response carries no usable
/// `Retry-After` header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    fetched_at: Instant,
}

/// Client for interacting with the Trello API.
///
/// Cloning is cheap and clones share the response cache.
#[derive(Debug, Clone)]
pub struct TrelloClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    token: String,
    cache: Arc<Mutex<HashMap<String, CacheEntry>>>,
    cache_ttl: Duration,
    pacing: Duration,
}

impl TrelloClient {
    /// Create a new client from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are absent or
    /// malformed, or if the HTTP client cannot be initialized.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(&Config::from_env()?)
    }

    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
            api_key: config.api_key.clone(),
            token: config.token.clone(),
            cache: Arc::new(Mutex::new(HashMap::new())),
            cache_ttl: CACHE_TTL,
            pacing: PACING_DELAY,
        })
    }

    /// Returns the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set a custom base URL (primarily for testing).
    #[doc(hidden)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Override the pacing delay (primarily for testing).
    #[doc(hidden)]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Override the cache freshness window (primarily for testing).
    #[doc(hidden)]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Make a GET request and deserialize the response.
    ///
    /// The `path` should be the API endpoint path without the base URL
    /// (e.g., "/members/me/boards"). Responses are served from the cache
    /// when a fresh entry exists for the same path and query.
    pub async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let payload = self.execute(Method::GET, path, query, None).await?;
        serde_json::from_value(payload).map_err(Error::Parse)
    }

    /// Make a POST request to create a resource and deserialize the response.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: serde::Serialize,
    {
        let body = serde_json::to_value(body).map_err(Error::Parse)?;
        let payload = self.execute(Method::POST, path, &[], Some(&body)).await?;
        serde_json::from_value(payload).map_err(Error::Parse)
    }

    /// Make a POST request whose response body is not needed.
    pub async fn post_empty<B>(&self, path: &str, body: &B) -> Result<(), Error>
    where
        B: serde::Serialize,
    {
        let body = serde_json::to_value(body).map_err(Error::Parse)?;
        self.execute(Method::POST, path, &[], Some(&body)).await?;
        Ok(())
    }

    /// Make a PUT request to update a resource and deserialize the response.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: serde::Serialize,
    {
        let body = serde_json::to_value(body).map_err(Error::Parse)?;
        let payload = self.execute(Method::PUT, path, &[], Some(&body)).await?;
        serde_json::from_value(payload).map_err(Error::Parse)
    }

    /// Make a PUT request whose response body is not needed.
    pub async fn put_empty<B>(&self, path: &str, body: &B) -> Result<(), Error>
    where
        B: serde::Serialize,
    {
        let body = serde_json::to_value(body).map_err(Error::Parse)?;
        self.execute(Method::PUT, path, &[], Some(&body)).await?;
        Ok(())
    }

    /// Make a DELETE request to remove a resource.
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.execute(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Fetch attachment bytes from an absolute Trello URL.
    ///
    /// Attachment downloads authenticate with the OAuth header rather than
    /// query credentials, and are paced and 429-retried like every other
    /// transport call. The raw payload is never cached.
    pub async fn fetch_attachment(&self, url: &str) -> Result<AttachmentPayload, Error> {
        tokio::time::sleep(self.pacing).await;
        tracing::debug!(url, "GET attachment");

        let mut response = self.send_attachment_request(url).await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let wait = retry_after(response.headers());
            tracing::debug!(url, wait_ms = wait.as_millis() as u64, "throttled, retrying once");
            tokio::time::sleep(wait).await;
            response = self.send_attachment_request(url).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message =
                extract_error_message(&body).unwrap_or_else(|| "Unknown API error".to_string());
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string());
        let file_name = file_name_from_disposition(response.headers());
        let bytes = response
            .bytes()
            .await
            .map_err(classify_transport_error)?
            .to_vec();

        Ok(AttachmentPayload {
            bytes,
            mime_type,
            file_name,
        })
    }

    async fn send_attachment_request(&self, url: &str) -> Result<reqwest::Response, Error> {
        let auth = format!(
            "OAuth oauth_consumer_key=\"{}\", oauth_token=\"{}\"",
            self.api_key, self.token
        );
        self.http
            .get(url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(classify_transport_error)
    }

    /// Execute one logical API call: cache lookup for GETs, pacing, a
    /// single retry on 429, then classification of the outcome.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let cacheable = method == Method::GET;
        let key = cache_key(path, query);

        if cacheable {
            if let Some(payload) = self.cache_lookup(&key) {
                tracing::debug!(path, "cache hit");
                return Ok(payload);
            }
        }

        tokio::time::sleep(self.pacing).await;
        tracing::debug!(method = %method, path, "sending request");

        let mut response = self.send(method.clone(), path, query, body).await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let wait = retry_after(response.headers());
            tracing::debug!(path, wait_ms = wait.as_millis() as u64, "throttled, retrying once");
            tokio::time::sleep(wait).await;
            response = self.send(method, path, query, body).await?;
        }

        tracing::debug!(status = response.status().as_u16(), path, "response");

        let payload = handle_response(response).await?;
        if cacheable {
            self.cache_store(key, payload.clone());
        }
        Ok(payload)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .query(&[("key", self.api_key.as_str()), ("token", self.token.as_str())])
            .query(query);
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(classify_transport_error)
    }

    fn cache_lookup(&self, key: &str) -> Option<Value> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.cache_ttl)
            .map(|entry| entry.payload.clone())
    }

    fn cache_store(&self, key: String, payload: Value) {
        let sweep_age = CACHE_SWEEP_AGE.max(self.cache_ttl);
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.retain(|_, entry| entry.fetched_at.elapsed() < sweep_age);
        cache.insert(
            key,
            CacheEntry {
                payload,
                fetched_at: Instant::now(),
            },
        );
    }
}

/// Decode a response body, classifying non-2xx statuses.
async fn handle_response(response: reqwest::Response) -> Result<Value, Error> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await.map_err(classify_transport_error)?;
        if body.trim().is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str(&body).map_err(Error::Parse)
        }
    } else {
        let body = response.text().await.unwrap_or_default();
        let message =
            extract_error_message(&body).unwrap_or_else(|| "Unknown API error".to_string());
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Classify a transport-level failure that never produced a response.
fn classify_transport_error(error: reqwest::Error) -> Error {
    let status = error.status().map(|s| s.as_u16()).unwrap_or(500);
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Network connection error".to_string()
    } else {
        error.to_string()
    };
    Error::Api { status, message }
}

/// The wait before retrying a throttled request, from the `Retry-After`
/// header. Absent or unparsable values fall back to one second.
fn retry_after(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_AFTER)
}

/// Cache key for a GET request: the path, plus any caller-supplied query
/// pairs that affect the representation. Credentials are not part of the key.
fn cache_key(path: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{}?{}", path, pairs.join("&"))
}

/// Extract the error message from a Trello API error response.
fn extract_error_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorResponse {
        message: Option<String>,
        error: Option<String>,
    }

    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|r| r.message.or(r.error))
}

/// File name from a `Content-Disposition` header, if one is present.
fn file_name_from_disposition(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    let name = value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))?;
    let name = name.trim_matches('"').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use serde::{Deserialize, Serialize};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Simple test type for HTTP tests.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct TestItem {
        id: String,
        name: String,
    }

    fn test_config() -> Config {
        Config {
            api_key: "test-key".to_string(),
            token: "test-token".to_string(),
            log_level: LogLevel::Info,
            timeout: Duration::from_secs(5),
        }
    }

    /// Create a test client pointing at the mock server, with pacing off.
    fn test_client(server: &MockServer) -> TrelloClient {
        TrelloClient::new(&test_config())
            .unwrap()
            .with_base_url(&server.uri())
            .with_pacing(Duration::ZERO)
    }

    #[test]
    fn test_new_client() {
        let client = TrelloClient::new(&test_config()).unwrap();
        assert_eq!(client.base_url(), BASE_URL);
    }

    #[test]
    fn test_cache_key_shapes() {
        assert_eq!(cache_key("/boards/1", &[]), "/boards/1");
        assert_eq!(
            cache_key("/boards/1", &[("lists", "open"), ("cards", "open")]),
            "/boards/1?lists=open&cards=open"
        );
    }

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), Duration::from_secs(1));

        headers.insert(RETRY_AFTER, "3".parse().unwrap());
        assert_eq!(retry_after(&headers), Duration::from_secs(3));

        headers.insert(RETRY_AFTER, "soon".parse().unwrap());
        assert_eq!(retry_after(&headers), Duration::from_secs(1));
    }

    #[test]
    fn test_extract_error_message_variants() {
        assert_eq!(
            extract_error_message(r#"{"message": "invalid id"}"#),
            Some("invalid id".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"error": "unauthorized"}"#),
            Some("unauthorized".to_string())
        );
        assert_eq!(extract_error_message("not json"), None);
        assert_eq!(extract_error_message(r#"{"detail": "other"}"#), None);
    }

    #[test]
    fn test_file_name_from_disposition() {
        let mut headers = HeaderMap::new();
        assert_eq!(file_name_from_disposition(&headers), None);

        headers.insert(
            CONTENT_DISPOSITION,
            "attachment; filename=\"report.pdf\"".parse().unwrap(),
        );
        assert_eq!(
            file_name_from_disposition(&headers),
            Some("report.pdf".to_string())
        );

        headers.insert(CONTENT_DISPOSITION, "inline".parse().unwrap());
        assert_eq!(file_name_from_disposition(&headers), None);
    }

    #[tokio::test]
    async fn test_get_injects_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items/1"))
            .and(query_param("key", "test-key"))
            .and(query_param("token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "1", "name": "Item"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let item: TestItem = client.get("/items/1", &[]).await.unwrap();

        assert_eq!(item.id, "1");
    }

    #[tokio::test]
    async fn test_get_with_query_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boards/b1"))
            .and(query_param("lists", "open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "b1", "name": "Board"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let item: TestItem = client.get("/boards/b1", &[("lists", "open")]).await.unwrap();

        assert_eq!(item.name, "Board");
    }

    #[tokio::test]
    async fn test_get_served_from_cache_within_window() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boards/b1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "b1", "name": "Board"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let first: TestItem = client.get("/boards/b1", &[]).await.unwrap();
        let second: TestItem = client.get("/boards/b1", &[]).await.unwrap();

        assert_eq!(first, second);
        // Mock expectation of exactly one request is verified on drop.
    }

    #[tokio::test]
    async fn test_get_refetches_after_window_elapses() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boards/b1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "b1", "name": "Board"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server).with_cache_ttl(Duration::from_millis(50));
        let _: TestItem = client.get("/boards/b1", &[]).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        let _: TestItem = client.get("/boards/b1", &[]).await.unwrap();
        // The refetch refreshed the entry, so an immediate third read is a hit.
        let _: TestItem = client.get("/boards/b1", &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_cache_distinguishes_query_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boards/b1/cards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "b1", "name": "Board"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let _: TestItem = client.get("/boards/b1/cards", &[]).await.unwrap();
        let _: TestItem = client
            .get("/boards/b1/cards", &[("filter", "closed")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_mutations_are_not_cached() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/cards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "c1", "name": "Card"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let body = serde_json::json!({"name": "Card"});
        let _: TestItem = client.post("/cards", &body).await.unwrap();
        let _: TestItem = client.post("/cards", &body).await.unwrap();
    }

    #[tokio::test]
    async fn test_pacing_delays_transport_call() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "1", "name": "Item"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server).with_pacing(Duration::from_millis(150));
        let start = Instant::now();
        let _: TestItem = client.get("/items/1", &[]).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_429_retried_once_with_header_delay() {
        let server = MockServer::start().await;

        // The throttling response matches first, then expires.
        Mock::given(method("GET"))
            .and(path("/items/1"))
            .respond_with(
                ResponseTemplate::new(429).insert_header("retry-after", "0"),
            )
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "1", "name": "Recovered"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let item: TestItem = client.get("/items/1", &[]).await.unwrap();

        assert_eq!(item.name, "Recovered");
    }

    #[tokio::test]
    async fn test_429_default_backoff_is_one_second() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "1", "name": "Recovered"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let start = Instant::now();
        let _: TestItem = client.get("/items/1", &[]).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_second_429_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items/1"))
            .respond_with(
                ResponseTemplate::new(429).insert_header("retry-after", "0"),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result: Result<TestItem, Error> = client.get("/items/1", &[]).await;

        match result {
            Err(Error::Api { status, .. }) => assert_eq!(status, 429),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_responses_are_not_cached() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boards/bad"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "board not found"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/boards/bad"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "bad", "name": "Board"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let first: Result<TestItem, Error> = client.get("/boards/bad", &[]).await;
        assert!(first.is_err());

        // The failure was not cached, so the next read goes to the server.
        let second: TestItem = client.get("/boards/bad", &[]).await.unwrap();
        assert_eq!(second.name, "Board");
    }

    #[tokio::test]
    async fn test_error_message_extracted_from_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items/forbidden"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "invalid token"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result: Result<TestItem, Error> = client.get("/items/forbidden", &[]).await;

        match result {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid token");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparsable_error_body_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result: Result<TestItem, Error> = client.get("/items/broken", &[]).await;

        match result {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Unknown API error");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_classified() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "1", "name": "Slow"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = Config {
            timeout: Duration::from_millis(100),
            ..test_config()
        };
        let client = TrelloClient::new(&config)
            .unwrap()
            .with_base_url(&server.uri())
            .with_pacing(Duration::ZERO);

        let result: Result<TestItem, Error> = client.get("/items/slow", &[]).await;

        match result {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Request timeout");
            }
            other => panic!("Expected timeout classification, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_classified() {
        // Nothing is listening on the loopback discard port.
        let client = TrelloClient::new(&test_config())
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .with_pacing(Duration::ZERO);

        let result: Result<TestItem, Error> = client.get("/items/1", &[]).await;

        match result {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Network connection error");
            }
            other => panic!("Expected connection classification, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/lists"))
            .and(body_json(serde_json::json!({
                "name": "Doing", "idBoard": "b1", "pos": "bottom"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "l1", "name": "Doing"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let body = serde_json::json!({"name": "Doing", "idBoard": "b1", "pos": "bottom"});
        let list: TestItem = client.post("/lists", &body).await.unwrap();

        assert_eq!(list.name, "Doing");
    }

    #[tokio::test]
    async fn test_delete_with_empty_body() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/cards/c1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(client.delete("/cards/c1").await.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_attachment_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/attachments/file.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .insert_header("content-disposition", "attachment; filename=\"shot.png\"")
                    .set_body_bytes(b"png-bytes".to_vec()),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = format!("{}/attachments/file.png", server.uri());
        let payload = client.fetch_attachment(&url).await.unwrap();

        assert_eq!(payload.bytes, b"png-bytes");
        assert_eq!(payload.mime_type.as_deref(), Some("image/png"));
        assert_eq!(payload.file_name.as_deref(), Some("shot.png"));
    }

    #[tokio::test]
    async fn test_fetch_attachment_sends_oauth_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/attachments/file.bin"))
            .and(wiremock::matchers::header(
                "authorization",
                "OAuth oauth_consumer_key=\"test-key\", oauth_token=\"test-token\"",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = format!("{}/attachments/file.bin", server.uri());
        client.fetch_attachment(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_attachment_retries_once_on_429() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/attachments/file.bin"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/attachments/file.bin"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = format!("{}/attachments/file.bin", server.uri());
        let payload = client.fetch_attachment(&url).await.unwrap();

        assert_eq!(payload.bytes, b"data");
    }

    #[tokio::test]
    async fn test_fetch_attachment_error_classified() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/attachments/missing.bin"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "attachment not found"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = format!("{}/attachments/missing.bin", server.uri());
        let result = client.fetch_attachment(&url).await;

        match result {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "attachment not found");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }
}
