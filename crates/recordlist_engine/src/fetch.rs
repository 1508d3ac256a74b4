use std::time::Duration;

use engine_logging::{engine_debug, engine_trace};
use futures_util::StreamExt;
use recordlist_core::{FetchError, Query, Record};
use serde_json::Value;
use url::Url;

use crate::EngineError;

const ACCOUNTS_PATH: &str = "accounts";
const SEARCH_PATH: &str = "accounts/search";
const SEARCH_PARAM: &str = "searchKey";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Remote lookup of records, either unfiltered or by keyword.
///
/// Implementations own their timeouts; callers never cancel a fetch.
#[async_trait::async_trait]
pub trait RecordFetchService: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError>;

    async fn fetch_by_keyword(&self, keyword: &str) -> Result<Vec<Record>, FetchError>;
}

/// Dispatches a query to the matching service operation.
pub async fn run_query(
    service: &dyn RecordFetchService,
    query: &Query,
) -> Result<Vec<Record>, FetchError> {
    match query {
        Query::All => service.fetch_all().await,
        Query::Keyword(keyword) => service.fetch_by_keyword(keyword).await,
    }
}

/// Transport-level failures, folded into a [`FetchError`] before they reach state.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("timeout")]
    Timeout,
    #[error("http status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("response too large (max {max_bytes}, actual {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ServiceError> for FetchError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Timeout => FetchError::with_body("timeout"),
            ServiceError::Status {
                message: Some(message),
                ..
            } => FetchError::with_body(message),
            other => FetchError::with_message(other.to_string()),
        }
    }
}

/// HTTP implementation speaking JSON to `{base}/accounts` and
/// `{base}/accounts/search?searchKey=..`.
#[derive(Debug, Clone)]
pub struct ReqwestRecordService {
    settings: FetchSettings,
    client: reqwest::Client,
    accounts_url: Url,
    search_url: Url,
}

impl ReqwestRecordService {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let mut base = Url::parse(&settings.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let accounts_url = base.join(ACCOUNTS_PATH)?;
        let search_url = base.join(SEARCH_PATH)?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(EngineError::Client)?;

        Ok(Self {
            settings,
            client,
            accounts_url,
            search_url,
        })
    }

    async fn get_records(&self, url: Url) -> Result<Vec<Record>, ServiceError> {
        engine_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(ServiceError::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: content_len,
                });
            }
        }

        let bytes = self.read_body(response).await?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: error_message_from_body(&bytes),
            });
        }

        let records: Vec<Record> = serde_json::from_slice(&bytes)?;
        engine_trace!("Decoded {} records", records.len());
        Ok(records)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ServiceError> {
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(ServiceError::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: next_len,
                });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl RecordFetchService for ReqwestRecordService {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        Ok(self.get_records(self.accounts_url.clone()).await?)
    }

    async fn fetch_by_keyword(&self, keyword: &str) -> Result<Vec<Record>, FetchError> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair(SEARCH_PARAM, keyword);
        Ok(self.get_records(url).await?)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::Timeout;
    }
    ServiceError::Network(err.to_string())
}

/// Pulls `message` out of `{"message": ..}` or `[{"message": ..}, ..]` bodies.
fn error_message_from_body(bytes: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(bytes).ok()?;
    let payload = match &value {
        Value::Array(items) => items.first()?,
        other => other,
    };
    payload
        .get("message")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}
