use crate::document::DayDocument;
use crate::index::{EntryIndex, IndexFile};
use serde::de::DeserializeOwned;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use url::Url;

static INDEX_PATH: &str = "data/index.json";

/// Where entry indexes and day documents come from. The application only
/// talks to this trait so that tests can substitute an in-memory source.
pub(crate) trait EntrySource {
    fn load_index(&self) -> anyhow::Result<EntryIndex>;
    fn load_document(&self, path: &str) -> anyhow::Result<DayDocument>;
}

#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("request failed")]
    Http(#[from] reqwest::Error),
    #[error("malformed response body")]
    Decode(#[from] serde_json::Error),
    #[error("invalid document path {path:?}")]
    BadPath {
        path: String,
        source: url::ParseError,
    },
}

#[derive(Debug)]
pub(crate) struct HttpSource {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub(crate) fn new(mut base: Url) -> HttpSource {
        // Url::join drops the last path segment of a base that does not end
        // in a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        HttpSource {
            base,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.base.join(path).map_err(|source| FetchError::BadPath {
            path: path.to_owned(),
            source,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let body = self
            .client
            .get(cache_busted(url))
            .send()?
            .error_for_status()?
            .text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl EntrySource for HttpSource {
    fn load_index(&self) -> anyhow::Result<EntryIndex> {
        let file: IndexFile = self.get_json(self.resolve(INDEX_PATH)?)?;
        Ok(EntryIndex::from_file(file))
    }

    fn load_document(&self, path: &str) -> anyhow::Result<DayDocument> {
        Ok(self.get_json(self.resolve(path)?)?)
    }
}

// Appends a changing `_` query parameter to defeat intermediate caching
fn cache_busted(mut url: Url) -> Url {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    url.query_pairs_mut()
        .append_pair("_", &stamp.to_string());
    url
}
