use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use planes_core::model::{LessonPlan, NewLessonPlan, PlanId, TeacherProfile, UserRecord};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::mapping;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── DOCUMENTS ─────────────────────────────────────────────────────────────────
//

/// The remote collections the application reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Users,
    Docentes,
    PlanesEducativos,
}

impl Collection {
    /// Collection name as used by the document database.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Docentes => "docentes",
            Collection::PlanesEducativos => "planesEducativos",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON object document.
pub type Document = Map<String, Value>;

/// A document together with its key.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument {
    pub key: String,
    pub body: Document,
}

/// Generic document database client.
///
/// Every write is a full overwrite and the last writer wins. Callers must not
/// rely on the order returned by `get_all`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document of a collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store cannot be reached.
    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, StorageError>;

    /// Fetch a single document, `None` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store cannot be reached.
    async fn get_one(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<Document>, StorageError>;

    /// Create or fully overwrite the document at `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn put(
        &self,
        collection: Collection,
        key: &str,
        document: Document,
    ) -> Result<(), StorageError>;

    /// Store a new document under a generated key and return that key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn add(&self, collection: Collection, document: Document)
    -> Result<String, StorageError>;

    /// Delete the document at `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete fails.
    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StorageError>;
}

pub(crate) fn generate_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

//
// ─── TYPED REPOSITORIES ────────────────────────────────────────────────────────
//

/// Access to the `users` collection.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every readable user record. Malformed documents are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read.
    async fn list_users(&self) -> Result<Vec<UserRecord>, StorageError>;

    /// Insert a user, or overwrite the record with the same name
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn upsert_user(&self, user: &UserRecord) -> Result<(), StorageError>;
}

/// Access to the `docentes` collection, keyed by user name.
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails or the document is malformed.
    async fn get_profile(&self, user_name: &str) -> Result<Option<TeacherProfile>, StorageError>;

    /// Overwrite the whole profile of `user_name`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn save_profile(
        &self,
        user_name: &str,
        profile: &TeacherProfile,
    ) -> Result<(), StorageError>;
}

/// Access to the `planesEducativos` collection.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// List every readable plan. Malformed documents are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read.
    async fn list_plans(&self) -> Result<Vec<LessonPlan>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the read fails or the document is malformed.
    async fn get_plan(&self, id: &PlanId) -> Result<Option<LessonPlan>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn create_plan(&self, plan: &NewLessonPlan) -> Result<PlanId, StorageError>;

    /// Overwrite the stored plan with the same id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn update_plan(&self, plan: &LessonPlan) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the delete fails.
    async fn delete_plan(&self, id: &PlanId) -> Result<(), StorageError>;
}

/// Typed repositories on top of any `DocumentStore`.
#[derive(Clone)]
pub struct DocumentRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentRepository {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for DocumentRepository {
    async fn list_users(&self) -> Result<Vec<UserRecord>, StorageError> {
        let docs = self.store.get_all(Collection::Users).await?;
        let mut users = Vec::with_capacity(docs.len());
        for doc in docs {
            match mapping::user_from_document(doc.body) {
                Ok(user) => users.push(user),
                Err(err) => warn!(key = %doc.key, error = %err, "skipping malformed user document"),
            }
        }
        Ok(users)
    }

    async fn upsert_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        let wanted = user.name.trim().to_lowercase();
        let existing = self
            .store
            .get_all(Collection::Users)
            .await?
            .into_iter()
            .find(|doc| {
                doc.body
                    .get("name")
                    .and_then(Value::as_str)
                    .is_some_and(|name| name.trim().to_lowercase() == wanted)
            });
        let key = existing.map_or_else(|| mapping::user_key(&user.name), |doc| doc.key);

        self.store
            .put(Collection::Users, &key, mapping::user_to_document(user)?)
            .await
    }
}

#[async_trait]
impl TeacherRepository for DocumentRepository {
    async fn get_profile(&self, user_name: &str) -> Result<Option<TeacherProfile>, StorageError> {
        self.store
            .get_one(Collection::Docentes, user_name)
            .await?
            .map(mapping::profile_from_document)
            .transpose()
    }

    async fn save_profile(
        &self,
        user_name: &str,
        profile: &TeacherProfile,
    ) -> Result<(), StorageError> {
        let document = mapping::profile_to_document(profile)?;
        self.store
            .put(Collection::Docentes, user_name, document)
            .await
    }
}

#[async_trait]
impl PlanRepository for DocumentRepository {
    async fn list_plans(&self) -> Result<Vec<LessonPlan>, StorageError> {
        let docs = self.store.get_all(Collection::PlanesEducativos).await?;
        let mut plans = Vec::with_capacity(docs.len());
        for doc in docs {
            let key = doc.key.clone();
            match mapping::plan_from_document(PlanId::new(doc.key), doc.body) {
                Ok(plan) => plans.push(plan),
                Err(err) => warn!(%key, error = %err, "skipping malformed plan document"),
            }
        }
        Ok(plans)
    }

    async fn get_plan(&self, id: &PlanId) -> Result<Option<LessonPlan>, StorageError> {
        self.store
            .get_one(Collection::PlanesEducativos, id.as_str())
            .await?
            .map(|body| mapping::plan_from_document(id.clone(), body))
            .transpose()
    }

    async fn create_plan(&self, plan: &NewLessonPlan) -> Result<PlanId, StorageError> {
        let document = mapping::new_plan_to_document(plan)?;
        let key = self
            .store
            .add(Collection::PlanesEducativos, document)
            .await?;
        debug!(%key, "plan document created");
        Ok(PlanId::new(key))
    }

    async fn update_plan(&self, plan: &LessonPlan) -> Result<(), StorageError> {
        let document = mapping::plan_to_document(plan)?;
        self.store
            .put(Collection::PlanesEducativos, plan.id.as_str(), document)
            .await
    }

    async fn delete_plan(&self, id: &PlanId) -> Result<(), StorageError> {
        self.store
            .delete(Collection::PlanesEducativos, id.as_str())
            .await
    }
}

//
// ─── IN-MEMORY STORE ───────────────────────────────────────────────────────────
//

/// Simple in-memory document store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<HashMap<Collection, BTreeMap<String, Document>>>>,
}

impl InMemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: fmt::Display>(e: E) -> StorageError {
    StorageError::Unavailable(e.to_string())
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, StorageError> {
        let guard = self.collections.lock().map_err(poisoned)?;
        Ok(guard
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .map(|(key, body)| StoredDocument {
                        key: key.clone(),
                        body: body.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_one(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<Document>, StorageError> {
        let guard = self.collections.lock().map_err(poisoned)?;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn put(
        &self,
        collection: Collection,
        key: &str,
        document: Document,
    ) -> Result<(), StorageError> {
        let mut guard = self.collections.lock().map_err(poisoned)?;
        guard
            .entry(collection)
            .or_default()
            .insert(key.to_string(), document);
        Ok(())
    }

    async fn add(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<String, StorageError> {
        let mut guard = self.collections.lock().map_err(poisoned)?;
        let docs = guard.entry(collection).or_default();
        let key = generate_key();
        if docs.contains_key(&key) {
            return Err(StorageError::Conflict);
        }
        docs.insert(key.clone(), document);
        Ok(key)
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StorageError> {
        let mut guard = self.collections.lock().map_err(poisoned)?;
        if let Some(docs) = guard.get_mut(&collection) {
            docs.remove(key);
        }
        Ok(())
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates the typed repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub plans: Arc<dyn PlanRepository>,
}

impl Storage {
    /// Typed repositories over an arbitrary document store.
    #[must_use]
    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        let repo = DocumentRepository::new(store);
        let users: Arc<dyn UserRepository> = Arc::new(repo.clone());
        let teachers: Arc<dyn TeacherRepository> = Arc::new(repo.clone());
        let plans: Arc<dyn PlanRepository> = Arc::new(repo);
        Self {
            users,
            teachers,
            plans,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryDocumentStore::new()))
    }
}
