use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub collection: String,
    pub body: Value,
    pub created_at: DateTime<Utc>,
}

/// Identity of a freshly inserted document.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct StoredDocument {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}
