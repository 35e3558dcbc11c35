use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// Fetches raw image bytes for a poster URL. `None` means the image could not
/// be retrieved; callers save the favorite without it.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, url: &str) -> Option<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct HttpImageLoader {
    http: Client,
}

impl HttpImageLoader {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl Default for HttpImageLoader {
    fn default() -> Self {
        let http = Client::builder()
            .no_proxy()
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::new(http)
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, url: &str) -> Option<Vec<u8>> {
        if url.trim().is_empty() {
            return None;
        }
        let res = match self.http.get(url).send().await {
            Ok(res) => res,
            Err(err) => {
                warn!(%url, ?err, "failed to retrieve image");
                return None;
            }
        };
        if !res.status().is_success() {
            warn!(%url, status = %res.status(), "failed to retrieve image");
            return None;
        }
        match res.bytes().await {
            Ok(bytes) if !bytes.is_empty() => {
                debug!(%url, len = bytes.len(), "image retrieved");
                Some(bytes.to_vec())
            }
            Ok(_) => None,
            Err(err) => {
                warn!(%url, ?err, "failed to read image body");
                None
            }
        }
    }
}
