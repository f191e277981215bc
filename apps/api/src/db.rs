use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{DocumentRow, StoredDocument};

pub const IDEAS_COLLECTION: &str = "ideas";
pub const CAMPAIGNS_COLLECTION: &str = "campaigns";

/// Creates a PostgreSQL connection pool and applies pending migrations.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Inserts `body` into `collection` under a new id. Documents are never updated.
pub async fn insert_document<T: Serialize>(
    pool: &PgPool,
    collection: &str,
    body: &T,
) -> Result<StoredDocument, AppError> {
    let body = serde_json::to_value(body)
        .with_context(|| format!("Failed to serialize {collection} document"))?;

    let stored = sqlx::query_as::<_, StoredDocument>(
        r#"
        INSERT INTO documents (id, collection, body)
        VALUES ($1, $2, $3)
        RETURNING id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(collection)
    .bind(body)
    .fetch_one(pool)
    .await?;

    info!("Document inserted into {collection} with id {}", stored.id);
    Ok(stored)
}

pub async fn find_document(
    pool: &PgPool,
    collection: &str,
    id: Uuid,
) -> Result<Option<DocumentRow>, AppError> {
    let row = sqlx::query_as::<_, DocumentRow>(
        "SELECT id, collection, body, created_at FROM documents WHERE id = $1 AND collection = $2",
    )
    .bind(id)
    .bind(collection)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
