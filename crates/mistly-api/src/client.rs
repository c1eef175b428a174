// Mist API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, token auth, the retry
// policy, page-walking for list endpoints, and error-body capture. The
// endpoint groups (orgs, sites, devices) are inherent methods implemented
// in sibling modules so this file stays focused on transport mechanics.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::Created;
use crate::transport::{RetryPolicy, TransportConfig};

/// Header carrying the total item count of a paginated listing.
const PAGE_TOTAL_HEADER: &str = "X-Page-Total";

/// Upper bound on pages fetched for a single listing.
const MAX_PAGES: u32 = 1000;

// ── Error response shape from the Mist API ───────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Mist REST API (`https://api.<region>.mist.com/api/v1/`).
///
/// One request is in flight at a time per call site; callers `await` each
/// response before issuing the next. The client itself holds no mutable
/// state, so a single instance is shared by reference across a run.
#[derive(Debug, Clone)]
pub struct MistClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
    page_size: u32,
}

impl MistClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API token and transport config.
    ///
    /// Injects `Authorization: Token <token>` as a default header on every
    /// request.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Token {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid API token header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self {
            http,
            base_url,
            retry: transport.retry,
            page_size: transport.page_size,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let defaults = TransportConfig::default();
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            retry: defaults.retry,
            page_size: defaults.page_size,
        })
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the page size used by list endpoints (minimum 1).
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The API base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Parse and force a trailing slash so relative joins keep `/api/v1`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments (e.g. `["orgs", id, "sites"]`) to the base URL.
    ///
    /// Each segment is percent-encoded, so an identifier can never escape
    /// its position in the path. Empty, `.` and `..` segments are rejected.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(Error::InvalidPathSegment((*bad).to_owned()));
        }
        let mut joined = self.base_url.clone();
        joined
            .path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(joined)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// POST a create request and return the new resource's `id`.
    ///
    /// A 2xx response without an `id` keeps the raw response text.
    pub(crate) async fn post_for_id<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<String, Error> {
        let url = self.url(segments)?;
        debug!("POST {url}");

        let resp = self.send(|| self.http.post(url.clone()).json(body)).await?;
        let raw = resp.text().await?;
        let created: Created = parse_body(&raw)?;
        match created.id {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(Error::MissingField {
                field: "id",
                body: raw,
            }),
        }
    }

    /// PUT a JSON body; the response body is not inspected.
    pub(crate) async fn put_no_response<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(segments)?;
        debug!("PUT {url}");

        self.send(|| self.http.put(url.clone()).json(body)).await?;
        Ok(())
    }

    /// Walk a paginated list endpoint and return every item in page order.
    ///
    /// Stops on an empty or short page, once `X-Page-Total` items have been
    /// collected, when a page repeats the previous one (the endpoint ignores
    /// `page`), or after `MAX_PAGES`. A failure on any page fails the whole
    /// listing.
    pub(crate) async fn get_paged<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let url = self.url(segments)?;
        let limit = self.page_size.max(1);
        let limit_len = usize::try_from(limit).unwrap_or(usize::MAX);
        let mut items: Vec<serde_json::Value> = Vec::new();
        let mut previous: Vec<serde_json::Value> = Vec::new();

        for page in 1..=MAX_PAGES {
            let mut query = params.to_vec();
            query.push(("limit", limit.to_string()));
            query.push(("page", page.to_string()));
            debug!("GET {url} params={query:?}");

            let resp = self
                .send(|| self.http.get(url.clone()).query(&query))
                .await?;
            let total = page_total(resp.headers());
            let batch: Vec<serde_json::Value> = decode(resp).await?;

            if !batch.is_empty() && batch == previous {
                warn!(%url, page, "page repeats the previous one, stopping");
                return decode_items(items);
            }
            items.extend(batch.iter().cloned());

            let reached_total = total.is_some_and(|t| items.len() >= t);
            if batch.len() < limit_len || reached_total {
                return decode_items(items);
            }
            previous = batch;
        }

        warn!(%url, max_pages = MAX_PAGES, "page limit reached, listing truncated");
        decode_items(items)
    }

    // ── Dispatch & response handling ─────────────────────────────────

    /// Send a request, retrying transient failures per the retry policy.
    ///
    /// `build` is invoked once per attempt. Non-2xx responses are turned
    /// into `Error` values with the body preserved.
    async fn send(
        &self,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Error> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let result = match build().send().await {
                Ok(resp) if resp.status().is_success() => Ok(resp),
                Ok(resp) => Err(parse_error(resp).await),
                Err(e) => Err(Error::Transport(e)),
            };

            match result {
                Err(ref err) if err.is_transient() && attempt < max_attempts => {
                    let delay = self.retry.delay_after(attempt);
                    warn!(attempt, max_attempts, ?delay, error = %err, "retrying request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await?;
    parse_body(&body)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

fn decode_items<T: DeserializeOwned>(items: Vec<serde_json::Value>) -> Result<Vec<T>, Error> {
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item.clone()).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: item.to_string(),
            })
        })
        .collect()
}

async fn parse_error(resp: reqwest::Response) -> Error {
    let status = resp.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        return Error::RateLimited { retry_after_secs };
    }

    let body = resp.text().await.unwrap_or_default();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::Authentication {
            message: "API token rejected (HTTP 401)".into(),
        };
    }

    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|err| err.detail.or(err.message))
        .unwrap_or_else(|| status.to_string());

    Error::Api {
        status: status.as_u16(),
        message,
        body,
    }
}

fn page_total(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(PAGE_TOTAL_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            MistClient::from_reqwest("https://api.ac2.mist.com/api/v1", reqwest::Client::new())
                .unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.ac2.mist.com/api/v1/");
        assert_eq!(
            client.url(&["orgs", "abc", "sites"]).unwrap().as_str(),
            "https://api.ac2.mist.com/api/v1/orgs/abc/sites"
        );
    }

    #[test]
    fn path_segments_are_encoded() {
        let client = MistClient::from_reqwest("https://api.mist.com/api/v1", reqwest::Client::new())
            .unwrap();
        assert_eq!(
            client.url(&["orgs", "a/b?c", "sites"]).unwrap().as_str(),
            "https://api.mist.com/api/v1/orgs/a%2Fb%3Fc/sites"
        );
        for bad in ["..", ".", ""] {
            assert!(matches!(
                client.url(&["orgs", bad, "sites"]),
                Err(Error::InvalidPathSegment(_))
            ));
        }
    }

    #[test]
    fn page_size_never_zero() {
        let client = MistClient::from_reqwest("https://api.mist.com/api/v1/", reqwest::Client::new())
            .unwrap()
            .with_page_size(0);
        assert_eq!(client.page_size, 1);
    }

    #[test]
    fn page_total_header_parses() {
        let mut headers = HeaderMap::new();
        headers.insert(PAGE_TOTAL_HEADER, HeaderValue::from_static("42"));
        assert_eq!(page_total(&headers), Some(42));
        assert_eq!(page_total(&HeaderMap::new()), None);
    }
}
