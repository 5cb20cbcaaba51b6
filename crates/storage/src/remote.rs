//! Document store reached over a small REST API.
//!
//! `GET {base}/{collection}` lists documents as `[{"id": key, "data": {..}}]`,
//! `GET`/`PUT`/`DELETE {base}/{collection}/{key}` address one document and
//! `POST {base}/{collection}` creates one, answering `{"id": key}`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::repository::{Collection, Document, DocumentStore, StorageError, StoredDocument, Storage};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteStoreError {
    #[error("remote store URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: String,
    pub token: Option<String>,
}

#[derive(Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

#[derive(Deserialize)]
struct ListedDocument {
    id: String,
    data: Document,
}

#[derive(Deserialize)]
struct CreatedDocument {
    id: String,
}

fn transport(err: reqwest::Error) -> StorageError {
    StorageError::Unavailable(err.to_string())
}

fn status_error(status: StatusCode) -> StorageError {
    match status {
        StatusCode::NOT_FOUND => StorageError::NotFound,
        StatusCode::CONFLICT => StorageError::Conflict,
        other => StorageError::Unavailable(format!("remote store answered {other}")),
    }
}

fn check(response: Response) -> Result<Response, StorageError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(status_error(response.status()))
    }
}

impl HttpDocumentStore {
    /// # Errors
    ///
    /// Returns `RemoteStoreError` for a base URL without an http(s) scheme or
    /// if the HTTP client cannot be built.
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteStoreError> {
        let base_url = match Url::parse(config.base_url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => url,
            _ => return Err(RemoteStoreError::InvalidBaseUrl(config.base_url)),
        };
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self {
            client,
            base_url,
            token: config.token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Base URL with `segments` appended, each percent-encoded as one path
    /// segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn collection_url(&self, collection: Collection) -> Url {
        self.endpoint(&[collection.name()])
    }

    fn document_url(&self, collection: Collection, key: &str) -> Url {
        self.endpoint(&[collection.name(), key])
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, StorageError> {
        let response = self
            .authorized(self.client.get(self.collection_url(collection)))
            .send()
            .await
            .map_err(transport)?;
        let listed: Vec<ListedDocument> = check(response)?.json().await.map_err(transport)?;
        debug!(%collection, count = listed.len(), "remote get_all");
        Ok(listed
            .into_iter()
            .map(|doc| StoredDocument {
                key: doc.id,
                body: doc.data,
            })
            .collect())
    }

    async fn get_one(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<Document>, StorageError> {
        let response = self
            .authorized(self.client.get(self.document_url(collection, key)))
            .send()
            .await
            .map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = check(response)?.json().await.map_err(transport)?;
        Ok(Some(body))
    }

    async fn put(
        &self,
        collection: Collection,
        key: &str,
        document: Document,
    ) -> Result<(), StorageError> {
        let response = self
            .authorized(self.client.put(self.document_url(collection, key)))
            .json(&document)
            .send()
            .await
            .map_err(transport)?;
        check(response)?;
        debug!(%collection, key, "remote put");
        Ok(())
    }

    async fn add(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<String, StorageError> {
        let response = self
            .authorized(self.client.post(self.collection_url(collection)))
            .json(&document)
            .send()
            .await
            .map_err(transport)?;
        let created: CreatedDocument = check(response)?.json().await.map_err(transport)?;
        debug!(%collection, key = %created.id, "remote add");
        Ok(created.id)
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StorageError> {
        let response = self
            .authorized(self.client.delete(self.document_url(collection, key)))
            .send()
            .await
            .map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        check(response)?;
        Ok(())
    }
}

impl Storage {
    /// Build a `Storage` backed by the remote document API.
    ///
    /// # Errors
    ///
    /// Returns `RemoteStoreError` if the configuration is invalid.
    pub fn remote(config: RemoteConfig) -> Result<Self, RemoteStoreError> {
        let store: Arc<dyn DocumentStore> = Arc::new(HttpDocumentStore::new(config)?);
        Ok(Self::from_store(store))
    }
}
