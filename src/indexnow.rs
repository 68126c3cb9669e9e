use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{header::CONTENT_TYPE, StatusCode};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde_derive::Serialize;
use tracing::{info, instrument};

use crate::types::ApiKey;

pub const DEFAULT_ENGINE: &str = "api.indexnow.org";

/// IndexNow accepts at most this many URLs per request.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Same set as JavaScript's `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("IndexNow API returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Fail to send IndexNow request")]
    Network(#[from] reqwest_middleware::Error),

    #[error("Fail to encode IndexNow payload")]
    Encode(#[from] serde_json::Error),
}

/// Response bodies returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Single(String),
    /// One body per batch, in submission order.
    Batches(Vec<String>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload<'a> {
    host: &'a str,
    key: &'a str,
    url_list: &'a [String],
}

#[derive(Debug, Clone)]
pub struct Submitter {
    client: ClientWithMiddleware,
    endpoint: String,
    batch_size: usize,
}

impl Submitter {
    pub fn new(client: ClientWithMiddleware, engine: Option<&str>) -> Self {
        Self {
            client,
            endpoint: endpoint(engine.unwrap_or(DEFAULT_ENGINE)),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit `urls`, which must not be empty. A single URL goes through the
    /// GET form, more are POSTed batch by batch, stopping at the first failure.
    #[instrument(skip(self, urls), fields(endpoint = %self.endpoint, urls = urls.len()))]
    pub async fn submit(
        &self,
        urls: &[String],
        host: &str,
        key: &ApiKey,
    ) -> Result<SubmissionResult, SubmitError> {
        if let [url] = urls {
            info!("Submitting single URL to IndexNow: {url}");
            let body = self.submit_single(url, key).await?;
            return Ok(SubmissionResult::Single(body));
        }

        info!("Submitting {} URLs to IndexNow via POST request", urls.len());
        let total = urls.len().div_ceil(self.batch_size);
        let mut results = Vec::with_capacity(total);
        for (i, batch) in urls.chunks(self.batch_size).enumerate() {
            info!("Submitting batch {} of {total}...", i + 1);
            let payload = Payload {
                host,
                key: key.as_str(),
                url_list: batch,
            };
            results.push(self.submit_batch(&payload).await?);
        }

        Ok(SubmissionResult::Batches(results))
    }

    async fn submit_single(&self, url: &str, key: &ApiKey) -> Result<String, SubmitError> {
        let request = self.client.get(format!(
            "{}?url={}&key={}",
            self.endpoint,
            utf8_percent_encode(url, URI_COMPONENT),
            key.as_str()
        ));
        send(request).await
    }

    async fn submit_batch(&self, payload: &Payload<'_>) -> Result<String, SubmitError> {
        let body = serde_json::to_vec(payload)?;
        let request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        send(request).await
    }
}

async fn send(request: RequestBuilder) -> Result<String, SubmitError> {
    let res = request.send().await?;
    let status = res.status();
    let body = res.text().await.map_err(reqwest_middleware::Error::from)?;

    if !status.is_success() {
        return Err(SubmitError::Rejected { status, body });
    }
    Ok(body)
}

fn endpoint(engine: &str) -> String {
    let engine = engine.trim_end_matches('/');
    if engine.starts_with("http://") || engine.starts_with("https://") {
        format!("{engine}/indexnow")
    } else {
        format!("https://{engine}/indexnow")
    }
}
