use reqwest_middleware::ClientWithMiddleware;
use std::{env, path::PathBuf};
use tracing::{info, instrument, warn};

use crate::errors::Error;

/// Reads sitemap documents from a URL or from the local file system.
#[derive(Debug, Clone)]
pub struct Loader {
    client: ClientWithMiddleware,
}

#[inline]
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

impl Loader {
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn load(&self, location: &str) -> Result<String, Error> {
        if is_remote(location) {
            self.fetch(location).await
        } else {
            read_file(location).await
        }
    }

    async fn fetch(&self, location: &str) -> Result<String, Error> {
        info!("Fetching sitemap from URL: {location}");
        let network = |source| Error::Network {
            location: location.to_owned(),
            source,
        };

        let res = self.client.get(location).send().await.map_err(network)?;
        let status = res.status();
        // the body is used whatever the status is
        if !status.is_success() {
            warn!(?status, location, "Unexpected status for sitemap request");
        }

        res.text()
            .await
            .map_err(|err| network(reqwest_middleware::Error::from(err)))
    }
}

async fn read_file(location: &str) -> Result<String, Error> {
    info!("Reading sitemap from file: {location}");
    let path = resolve_path(location);
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| Error::Io { path, source })
}

/// Identity of a sitemap location: the URL without empty query or fragment, or
/// the canonical file path (lexically resolved when the file does not exist).
pub async fn location_key(location: &str) -> String {
    if is_remote(location) {
        return match url::Url::parse(location) {
            Ok(mut url) => {
                if url.query() == Some("") {
                    url.set_query(None);
                }
                url.set_fragment(None);
                url.into()
            }
            Err(_) => location.to_owned(),
        };
    }

    let path = resolve_path(location);
    let path = tokio::fs::canonicalize(&path).await.unwrap_or(path);
    path.display().to_string()
}

fn resolve_path(location: &str) -> PathBuf {
    match env::current_dir() {
        Ok(cwd) => cwd.join(location),
        Err(_) => PathBuf::from(location),
    }
}
