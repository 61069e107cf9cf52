use std::fmt;
use std::fmt::Write;
use std::sync::Arc;

use md5::{Digest, Md5};
use url::Url;

use crate::CatalogError;

pub const DEFAULT_BASE_URL: &str = "https://gateway.marvel.com/v1/public";

/// Produces the `ts` value for each signed request.
pub type TimestampSource = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct ApiCredentials {
    pub public_key: String,
    pub private_key: String,
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Builds authenticated character endpoints.
///
/// The upstream API authenticates clients with `md5(ts + private + public)`.
/// MD5 is mandated by that contract; the hash proves possession of the key
/// pair and offers no confidentiality or tamper protection.
#[derive(Clone)]
pub struct RequestSigner {
    base_url: String,
    credentials: ApiCredentials,
    timestamp: TimestampSource,
}

impl RequestSigner {
    pub fn new(base_url: impl Into<String>, credentials: ApiCredentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            timestamp: Arc::new(|| chrono::Utc::now().timestamp_millis().to_string()),
        }
    }

    pub fn with_timestamp_source(mut self, timestamp: TimestampSource) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Lowercase hex digest of `timestamp + private_key + public_key`.
    pub fn sign(&self, timestamp: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(timestamp.as_bytes());
        hasher.update(self.credentials.private_key.as_bytes());
        hasher.update(self.credentials.public_key.as_bytes());
        let digest = hasher.finalize();
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest.iter() {
            let _ = write!(&mut hex, "{byte:02x}");
        }
        hex
    }

    pub fn build_endpoint(
        &self,
        page_index: u32,
        page_size: u32,
        query: Option<&str>,
    ) -> Result<String, CatalogError> {
        if page_size == 0 {
            return Err(CatalogError::InvalidEndpoint(
                "page size must be positive".into(),
            ));
        }
        let offset = u64::from(page_index) * u64::from(page_size);

        let base = format!("{}/characters", self.base_url.trim_end_matches('/'));
        let mut url =
            Url::parse(&base).map_err(|err| CatalogError::InvalidEndpoint(err.to_string()))?;

        let ts = (self.timestamp)();
        let hash = self.sign(&ts);
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("apikey", &self.credentials.public_key)
                .append_pair("ts", &ts)
                .append_pair("hash", &hash)
                .append_pair("limit", &page_size.to_string())
                .append_pair("offset", &offset.to_string());
            if let Some(query) = query.filter(|q| !q.is_empty()) {
                pairs.append_pair("nameStartsWith", query);
            }
        }
        Ok(url.into())
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
