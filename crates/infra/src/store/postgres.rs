//! Postgres-backed document store.
//!
//! Documents of every collection live in one JSONB table; unique keys are
//! mirrored into a side table whose primary key enforces uniqueness.
//!
//! ## Consistency
//!
//! Each insert/update/modify/delete runs in its own transaction covering the
//! document row and its unique-key rows; `modify` additionally holds the row
//! lock (`SELECT ... FOR UPDATE`) between read and write. There are no
//! cross-document transactions.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use bloglist_core::{Document, DomainError};

use super::{DocumentStore, Modification, StoreError, StoreResult};

const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS documents (
        collection TEXT NOT NULL,
        id UUID NOT NULL,
        seq BIGSERIAL,
        body JSONB NOT NULL,
        PRIMARY KEY (collection, id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS unique_keys (
        collection TEXT NOT NULL,
        field TEXT NOT NULL,
        value TEXT NOT NULL,
        id UUID NOT NULL,
        PRIMARY KEY (collection, field, value),
        FOREIGN KEY (collection, id) REFERENCES documents (collection, id) ON DELETE CASCADE
    )
    "#,
];

/// Create the backing tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    }
    Ok(())
}

/// Document store for one collection, backed by Postgres.
pub struct PostgresDocumentStore<D> {
    pool: Arc<PgPool>,
    _doc: PhantomData<fn() -> D>,
}

impl<D> PostgresDocumentStore<D> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
            _doc: PhantomData,
        }
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    tracing::error!(operation, error = %err, "postgres document store failure");
    StoreError::backend(format!("{operation}: {err}"))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

fn to_body<D: Document>(doc: &D) -> StoreResult<JsonValue> {
    serde_json::to_value(doc).map_err(|e| StoreError::backend(format!("serialize {}: {e}", D::COLLECTION)))
}

fn from_body<D: Document>(body: JsonValue) -> StoreResult<D> {
    serde_json::from_value(body).map_err(|e| StoreError::backend(format!("deserialize {}: {e}", D::COLLECTION)))
}

fn body_from_row<D: Document>(row: &sqlx::postgres::PgRow) -> StoreResult<D> {
    let body: JsonValue = row
        .try_get("body")
        .map_err(|e| map_sqlx_error("read_body", e))?;
    from_body(body)
}

async fn insert_unique_keys<D: Document>(tx: &mut Transaction<'_, Postgres>, doc: &D) -> StoreResult<()> {
    let id: Uuid = doc.id().into();
    for (field, value) in doc.unique_keys() {
        let result = sqlx::query(
            r#"
            INSERT INTO unique_keys (collection, field, value, id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(D::COLLECTION)
        .bind(field)
        .bind(&value)
        .bind(id)
        .execute(&mut **tx)
        .await;

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::duplicate(field, value).into());
            }
            Err(e) => return Err(map_sqlx_error("insert_unique_keys", e)),
        }
    }
    Ok(())
}

/// Replace the body and unique-key rows of an existing document.
async fn rewrite<D: Document>(tx: &mut Transaction<'_, Postgres>, doc: &D) -> StoreResult<u64> {
    let id: Uuid = doc.id().into();
    let body = to_body(doc)?;

    let updated = sqlx::query("UPDATE documents SET body = $3 WHERE collection = $1 AND id = $2")
        .bind(D::COLLECTION)
        .bind(id)
        .bind(body)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

    if updated.rows_affected() == 0 {
        return Ok(0);
    }

    sqlx::query("DELETE FROM unique_keys WHERE collection = $1 AND id = $2")
        .bind(D::COLLECTION)
        .bind(id)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("update_unique_keys", e))?;

    insert_unique_keys(tx, doc).await?;
    Ok(updated.rows_affected())
}

#[async_trait]
impl<D: Document> DocumentStore<D> for PostgresDocumentStore<D> {
    async fn find_all(&self) -> StoreResult<Vec<D>> {
        let rows = sqlx::query("SELECT body FROM documents WHERE collection = $1 ORDER BY seq ASC")
            .bind(D::COLLECTION)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter().map(body_from_row::<D>).collect()
    }

    async fn find_by_id(&self, id: D::Id) -> StoreResult<Option<D>> {
        let id: Uuid = id.into();
        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND id = $2")
            .bind(D::COLLECTION)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(body_from_row::<D>).transpose()
    }

    async fn find_by_unique(&self, field: &str, value: &str) -> StoreResult<Option<D>> {
        let row = sqlx::query(
            r#"
            SELECT d.body
            FROM documents d
            JOIN unique_keys k ON k.collection = d.collection AND k.id = d.id
            WHERE k.collection = $1 AND k.field = $2 AND k.value = $3
            "#,
        )
        .bind(D::COLLECTION)
        .bind(field)
        .bind(value)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_unique", e))?;

        row.as_ref().map(body_from_row::<D>).transpose()
    }

    async fn insert(&self, doc: D) -> StoreResult<D> {
        doc.validate()?;
        let id: Uuid = doc.id().into();
        let body = to_body(&doc)?;

        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error("begin", e))?;

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(D::COLLECTION)
            .bind(id)
            .bind(body)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;

        // Dropping the transaction on error rolls it back.
        insert_unique_keys(&mut tx, &doc).await?;

        tx.commit().await.map_err(|e| map_sqlx_error("commit", e))?;
        Ok(doc)
    }

    async fn update(&self, doc: D) -> StoreResult<Option<D>> {
        doc.validate()?;

        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error("begin", e))?;
        if rewrite(&mut tx, &doc).await? == 0 {
            return Ok(None);
        }

        tx.commit().await.map_err(|e| map_sqlx_error("commit", e))?;
        Ok(Some(doc))
    }

    async fn modify(&self, id: D::Id, change: Modification<D>) -> StoreResult<Option<D>> {
        let uuid: Uuid = id.into();
        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error("begin", e))?;

        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND id = $2 FOR UPDATE")
            .bind(D::COLLECTION)
            .bind(uuid)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("modify", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut doc = body_from_row::<D>(&row)?;
        change(&mut doc);
        doc.validate()?;
        rewrite(&mut tx, &doc).await?;

        tx.commit().await.map_err(|e| map_sqlx_error("commit", e))?;
        Ok(Some(doc))
    }

    async fn delete(&self, id: D::Id) -> StoreResult<Option<D>> {
        let id: Uuid = id.into();
        let row = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2 RETURNING body")
            .bind(D::COLLECTION)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        row.as_ref().map(body_from_row::<D>).transpose()
    }

    async fn count(&self) -> StoreResult<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM documents WHERE collection = $1")
            .bind(D::COLLECTION)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("count", e))?;

        let total: i64 = row.try_get("total").map_err(|e| map_sqlx_error("count", e))?;
        usize::try_from(total).map_err(|e| StoreError::backend(format!("count: {e}")))
    }
}
