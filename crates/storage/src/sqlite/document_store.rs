use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::Row;
use tracing::debug;

use crate::repository::{
    Collection, Document, DocumentStore, StorageError, StoredDocument, generate_key,
};

use super::SqliteDocumentStore;

fn unavailable(err: sqlx::Error) -> StorageError {
    StorageError::Unavailable(err.to_string())
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn parse_body(raw: &str) -> Result<Document, StorageError> {
    match serde_json::from_str::<Value>(raw).map_err(ser)? {
        Value::Object(map) => Ok(map),
        _ => Err(StorageError::Serialization(
            "stored body is not a JSON object".into(),
        )),
    }
}

fn encode_body(document: &Document) -> Result<String, StorageError> {
    serde_json::to_string(document).map_err(ser)
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT key, body
            FROM documents
            WHERE collection = ?1
            ORDER BY key
            ",
        )
        .bind(collection.name())
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let key: String = row.try_get("key").map_err(ser)?;
            let body: String = row.try_get("body").map_err(ser)?;
            docs.push(StoredDocument {
                key,
                body: parse_body(&body)?,
            });
        }
        debug!(%collection, count = docs.len(), "sqlite get_all");
        Ok(docs)
    }

    async fn get_one(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<Document>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT body
            FROM documents
            WHERE collection = ?1 AND key = ?2
            ",
        )
        .bind(collection.name())
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let body: String = row.try_get("body").map_err(ser)?;
        parse_body(&body).map(Some)
    }

    async fn put(
        &self,
        collection: Collection,
        key: &str,
        document: Document,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO documents (collection, key, body, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(collection, key) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            ",
        )
        .bind(collection.name())
        .bind(key)
        .bind(encode_body(&document)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        debug!(%collection, key, "sqlite put");
        Ok(())
    }

    async fn add(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<String, StorageError> {
        let key = generate_key();
        sqlx::query(
            r"
            INSERT INTO documents (collection, key, body, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(collection.name())
        .bind(&key)
        .bind(encode_body(&document)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                StorageError::Conflict
            } else {
                unavailable(err)
            }
        })?;

        debug!(%collection, %key, "sqlite add");
        Ok(key)
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM documents WHERE collection = ?1 AND key = ?2")
            .bind(collection.name())
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}
